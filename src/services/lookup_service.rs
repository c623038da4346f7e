use crate::errors::LookupError;
use crate::models::profile::Profile;
use crate::models::repository_entry::RepositoryEntry;
use crate::services::github_service::ProfileSource;
use crate::validators;

/// Result of one successful profile + repositories round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub profile: Profile,
    pub repositories: Vec<RepositoryEntry>,
}

/// Fetches the profile, then its repositories. The repository request is only
/// issued once the profile has been found.
#[tracing::instrument(skip(source))]
pub async fn lookup(source: &dyn ProfileSource, username: &str) -> Result<Lookup, LookupError> {
    if !validators::is_valid_username(username) {
        log::info!("Rejected account name {:?}", username);
        return Err(LookupError::ProfileNotFound);
    }

    log::info!("Looking up GitHub user");
    let profile = source.fetch_profile(username).await.map_err(|e| {
        log::warn!("Profile fetch failed for {}: {}", username, e);
        LookupError::ProfileNotFound
    })?;

    let repositories = source.fetch_repositories(username).await.map_err(|e| {
        log::warn!("Repository fetch failed for {}: {}", username, e);
        LookupError::RepositoriesNotFound
    })?;

    log::info!(
        "Found {} with {} repositories",
        profile.login,
        repositories.len()
    );
    Ok(Lookup {
        profile,
        repositories,
    })
}
