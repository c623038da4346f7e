use serde::Deserialize;

/// One element of `GET /users/{name}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryEntry {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
}

#[cfg(test)]
impl RepositoryEntry {
    pub fn dummy(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            html_url: format!("https://github.com/someone/{name}"),
            description: None,
            stargazers_count: 5,
            forks_count: 1,
        }
    }
}
