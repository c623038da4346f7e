pub mod github_service;
pub mod lookup_service;
