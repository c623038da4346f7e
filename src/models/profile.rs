use serde::Deserialize;

/// Account metadata from `GET /users/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub bio: Option<String>,
    pub followers: u32,
    pub following: u32,
    pub location: Option<String>,
    pub public_repos: u32,
}

#[cfg(test)]
impl Profile {
    pub fn dummy(login: &str) -> Self {
        Self {
            login: login.to_string(),
            name: Some(format!("{login} display")),
            avatar_url: format!("https://avatars.example/{login}"),
            html_url: format!("https://github.com/{login}"),
            bio: Some("Writes code".to_string()),
            followers: 12,
            following: 3,
            location: Some("Lisbon".to_string()),
            public_repos: 2,
        }
    }
}
