use serde::Serialize;

/// Profile summary as the page shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCard {
    pub login: String,
    pub heading: String,
    pub avatar_url: String,
    pub avatar_fallback: String,
    pub html_url: String,
    pub bio: String,
    pub followers: String,
    pub following: String,
    pub location: String,
    pub public_repos: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryCard {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    pub description: String,
    pub stars: String,
    pub forks: String,
}

/// Everything the `index` template needs for one render.
#[derive(Debug, Clone, Serialize)]
pub struct ExplorerViewModel {
    pub username: String,
    pub loading: bool,
    pub error: Option<String>,
    pub profile: Option<ProfileCard>,
    pub repositories: Vec<RepositoryCard>,
}
