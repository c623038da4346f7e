use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::LookupError;
use crate::services::github_service::ProfileSource;
use crate::services::lookup_service;
use crate::views::explorer_view::ExplorerView;

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "explorer_session";

pub type SharedView = Arc<Mutex<ExplorerView>>;

struct Session {
    view: SharedView,
    last_seen: DateTime<Utc>,
}

/// The view a request should render, and whether it was just created.
pub struct SessionHandle {
    pub id: String,
    pub created: bool,
    pub view: SharedView,
}

/// One [`ExplorerView`] per browser, keyed by cookie.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn view_for(&self, id: Option<&str>) -> SessionHandle {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().await;

        if let Some(id) = id {
            if let Some(session) = sessions.get_mut(id) {
                session.last_seen = now;
                return SessionHandle {
                    id: id.to_string(),
                    created: false,
                    view: session.view.clone(),
                };
            }
        }

        let ttl = self.ttl;
        let before = sessions.len();
        sessions.retain(|_, session| now - session.last_seen <= ttl);
        if sessions.len() < before {
            log::debug!("Pruned {} idle sessions", before - sessions.len());
        }

        let id = Uuid::new_v4().simple().to_string();
        let view = Arc::new(Mutex::new(ExplorerView::new()));
        sessions.insert(
            id.clone(),
            Session {
                view: view.clone(),
                last_seen: now,
            },
        );
        log::debug!("Created session {}", id);

        SessionHandle {
            id,
            created: true,
            view,
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    #[cfg(test)]
    async fn age(&self, id: &str, by: Duration) {
        if let Some(session) = self.sessions.lock().await.get_mut(id) {
            session.last_seen = session.last_seen - by;
        }
    }
}

/// Runs one submission against `view`. Returns `false` when the submission was
/// ignored because the view was busy or the name was blank.
///
/// The view is not locked while the requests are in flight, so a second
/// submission sees the busy flag and backs off. The lookup runs in its own task
/// and always finishes the view, even if the caller is dropped.
pub async fn submit(view: SharedView, source: Arc<dyn ProfileSource>, username: &str) -> bool {
    let started = {
        let mut view = view.lock().await;
        if view.is_loading() {
            None
        } else {
            view.set_username(username);
            view.begin_submit()
        }
    };
    let Some(username) = started else {
        log::debug!("Ignored submission for {:?}", username);
        return false;
    };

    let task_view = view.clone();
    let task = tokio::spawn(async move {
        let result = lookup_service::lookup(source.as_ref(), &username).await;
        task_view.lock().await.complete(result);
    });
    if let Err(e) = task.await {
        log::error!("Lookup task failed: {}", e);
        view.lock().await.complete(Err(LookupError::ProfileNotFound));
    }
    true
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::Notify;

    use crate::models::profile::Profile;
    use crate::models::repository_entry::RepositoryEntry;
    use crate::services::github_service::{FetchError, MockProfileSource};

    use super::*;

    /// Holds every profile request until the gate opens.
    #[derive(Default)]
    struct GatedSource {
        gate: Notify,
        profile_calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl ProfileSource for GatedSource {
        async fn fetch_profile(&self, username: &str) -> Result<Profile, FetchError> {
            self.profile_calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(Profile::dummy(username))
        }

        async fn fetch_repositories(
            &self,
            _username: &str,
        ) -> Result<Vec<RepositoryEntry>, FetchError> {
            Ok(vec![RepositoryEntry::dummy(1, "one")])
        }
    }

    #[tokio::test]
    async fn unknown_id_creates_a_session() {
        let store = SessionStore::new(Duration::minutes(30));

        let first = store.view_for(Some("made-up")).await;
        let second = store.view_for(Some(first.id.as_str())).await;

        assert!(first.created);
        assert_ne!("made-up", first.id);
        assert!(!second.created);
        assert_eq!(first.id, second.id);
        assert!(Arc::ptr_eq(&first.view, &second.view));
    }

    #[tokio::test]
    async fn session_ids_are_unpredictable() {
        let store = SessionStore::new(Duration::minutes(30));

        let first = store.view_for(None).await;
        let second = store.view_for(None).await;

        assert_eq!(32, first.id.len());
        assert!(first.id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first.id, second.id);
        assert_ne!(first.id[..16], second.id[..16]);
    }

    #[tokio::test]
    async fn idle_sessions_are_pruned_on_creation() {
        let store = SessionStore::new(Duration::minutes(30));
        let stale = store.view_for(None).await;
        let fresh = store.view_for(None).await;
        store.age(&stale.id, Duration::minutes(31)).await;

        store.view_for(None).await;

        assert_eq!(2, store.len().await);
        assert!(!store.view_for(Some(fresh.id.as_str())).await.created);
    }

    #[tokio::test]
    async fn submit_while_busy_is_a_no_op() {
        let source = Arc::new(GatedSource::default());
        let view = SharedView::default();

        let first = {
            let source = source.clone();
            let view = view.clone();
            tokio::spawn(async move { submit(view, source, "octocat").await })
        };
        while source.profile_calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        assert!(view.lock().await.is_loading());
        assert!(!submit(view.clone(), source.clone(), "ferris").await);
        assert_eq!(1, source.profile_calls.load(Ordering::SeqCst));
        assert_eq!("octocat", view.lock().await.username());

        source.gate.notify_one();
        assert!(first.await.unwrap());

        let view = view.lock().await;
        assert!(!view.is_loading());
        assert_eq!("octocat", view.profile().unwrap().login);
        assert_eq!(1, view.repositories().len());
    }

    #[tokio::test]
    async fn dropped_submission_still_finishes_the_view() {
        let source = Arc::new(GatedSource::default());
        let view = SharedView::default();

        let dropped = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            submit(view.clone(), source.clone(), "octocat"),
        )
        .await;
        assert!(dropped.is_err());
        assert!(view.lock().await.is_loading());

        source.gate.notify_one();
        while view.lock().await.is_loading() {
            tokio::task::yield_now().await;
        }
        assert_eq!("octocat", view.lock().await.profile().unwrap().login);

        source.gate.notify_one();
        assert!(submit(view.clone(), source.clone(), "ferris").await);
        assert_eq!(2, source.profile_calls.load(Ordering::SeqCst));
        assert_eq!("ferris", view.lock().await.profile().unwrap().login);
    }

    #[tokio::test]
    async fn blank_submit_issues_no_request() {
        let mut source = MockProfileSource::new();
        source.expect_fetch_profile().times(0);
        source.expect_fetch_repositories().times(0);
        let view = SharedView::default();

        assert!(!submit(view.clone(), Arc::new(source), "  ").await);
        assert!(!view.lock().await.is_loading());
    }

    #[tokio::test]
    async fn failed_repositories_leave_an_error_and_no_cards() {
        let mut source = MockProfileSource::new();
        source
            .expect_fetch_profile()
            .returning(|name| Ok(Profile::dummy(name)))
            .times(1);
        source
            .expect_fetch_repositories()
            .returning(|_| Err(FetchError::Decode(serde_json::from_str::<u8>("x").unwrap_err())))
            .times(1);
        let view = SharedView::default();

        assert!(submit(view.clone(), Arc::new(source), "octocat").await);

        let view = view.lock().await;
        assert_eq!(Some("Repositories not found"), view.error());
        assert_eq!(None, view.profile());
        assert!(view.repositories().is_empty());
    }
}
