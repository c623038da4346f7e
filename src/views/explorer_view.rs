use crate::errors::LookupError;
use crate::models::profile::Profile;
use crate::models::repository_entry::RepositoryEntry;
use crate::services::lookup_service::Lookup;

/// State behind one explorer page: the typed name, the busy flag, the last
/// error, and the records of the last successful lookup.
///
/// Profile and repositories only ever change together, inside [`complete`].
///
/// [`complete`]: ExplorerView::complete
#[derive(Debug, Default)]
pub struct ExplorerView {
    username: String,
    loading: bool,
    error: Option<String>,
    profile: Option<Profile>,
    repositories: Vec<RepositoryEntry>,
}

impl ExplorerView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_username(&mut self, username: &str) {
        self.username = username.to_string();
    }

    /// Starts a lookup for the current input and returns the name to fetch.
    ///
    /// Returns `None` without touching the state when a lookup is already in
    /// flight or the input is blank.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.loading {
            return None;
        }
        let username = self.username.trim();
        if username.is_empty() {
            return None;
        }
        let username = username.to_string();

        self.loading = true;
        self.error = None;
        Some(username)
    }

    pub fn complete(&mut self, result: Result<Lookup, LookupError>) {
        match result {
            Ok(lookup) => {
                self.profile = Some(lookup.profile);
                self.repositories = lookup.repositories;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.profile = None;
                self.repositories.clear();
            }
        }
        self.loading = false;
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn repositories(&self) -> &[RepositoryEntry] {
        &self.repositories
    }
}
