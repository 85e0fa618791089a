use std::rc::Rc;

use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::types::SubmissionId;

const USER_KEY: &str = "user";
const LAST_SUBMISSION_KEY: &str = "lastSubmissionId";

/// The client-side record of the authenticated user and their most recent
/// submission reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub last_submission_id: Option<SubmissionId>,
}

pub enum SessionAction {
    /// Successful login: replace whatever was current.
    Login(Session),
    /// Clear the session and its persisted copy. The route gate re-renders
    /// in the unauthenticated state; no page reload involved.
    Logout,
    /// A new submission id was produced (survey submit or details backfill).
    /// No-op without a current session.
    RecordSubmission(SubmissionId),
}

/// Single source of truth for "who is logged in". A session exists iff the
/// user is authenticated for routing purposes. Every transition persists to
/// localStorage before screens observe the new state.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SessionState {
    pub session: Option<Session>,
}

impl SessionState {
    pub fn authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Initial reducer state: whatever survived in localStorage. No network.
    pub fn restored() -> Self {
        let session = storage::load();
        if session.is_some() {
            log::info!("restored persisted session");
        }
        SessionState { session }
    }

    /// User id whose details still need a backfill: a restored session that
    /// has no last submission id yet.
    pub fn backfill_target(&self) -> Option<i64> {
        self.session
            .as_ref()
            .filter(|s| s.last_submission_id.is_none())
            .map(|s| s.user_id)
    }

    fn apply(&self, action: SessionAction) -> SessionState {
        match action {
            SessionAction::Login(session) => SessionState {
                session: Some(session),
            },
            SessionAction::Logout => SessionState { session: None },
            SessionAction::RecordSubmission(id) => match &self.session {
                Some(current) => SessionState {
                    session: Some(Session {
                        last_submission_id: Some(id),
                        ..current.clone()
                    }),
                },
                None => self.clone(),
            },
        }
    }
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: SessionAction) -> Rc<Self> {
        let next = self.apply(action);
        if next != *self {
            storage::persist(next.session.as_ref());
        }
        Rc::new(next)
    }
}

/// Handle screens obtain from context to read and mutate the session.
pub type SessionHandle = UseReducerHandle<SessionState>;

mod storage {
    use super::{Session, LAST_SUBMISSION_KEY, USER_KEY};

    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    pub(super) fn load() -> Option<Session> {
        let raw = local_storage()?.get_item(USER_KEY).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                log::warn!("discarding unreadable persisted session: {e}");
                None
            }
        }
    }

    pub(super) fn persist(session: Option<&Session>) {
        let Some(storage) = local_storage() else {
            return;
        };
        match session {
            Some(session) => {
                match serde_json::to_string(session) {
                    Ok(raw) => {
                        let _ = storage.set_item(USER_KEY, &raw);
                    }
                    Err(e) => log::error!("failed to encode session: {e}"),
                }
                match session.last_submission_id {
                    Some(id) => {
                        let _ = storage.set_item(LAST_SUBMISSION_KEY, &id.to_string());
                    }
                    None => {
                        let _ = storage.remove_item(LAST_SUBMISSION_KEY);
                    }
                }
            }
            None => {
                let _ = storage.remove_item(USER_KEY);
                let _ = storage.remove_item(LAST_SUBMISSION_KEY);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(last_submission_id: Option<SubmissionId>) -> Session {
        Session {
            user_id: 1,
            username: "ada".to_string(),
            last_submission_id,
        }
    }

    #[test]
    fn login_replaces_current_session() {
        let state = SessionState {
            session: Some(session(Some(3))),
        };
        let next = state.apply(SessionAction::Login(Session {
            user_id: 2,
            username: "grace".to_string(),
            last_submission_id: None,
        }));
        assert_eq!(next.session.as_ref().unwrap().user_id, 2);
        assert_eq!(next.session.as_ref().unwrap().last_submission_id, None);
    }

    #[test]
    fn logout_clears_session() {
        let state = SessionState {
            session: Some(session(Some(3))),
        };
        let next = state.apply(SessionAction::Logout);
        assert_eq!(next, SessionState::default());
        assert!(!next.authenticated());
    }

    #[test]
    fn record_submission_updates_current_session() {
        let state = SessionState {
            session: Some(session(None)),
        };
        let next = state.apply(SessionAction::RecordSubmission(42));
        assert_eq!(next.session.as_ref().unwrap().last_submission_id, Some(42));
        assert_eq!(next.session.as_ref().unwrap().username, "ada");
    }

    #[test]
    fn record_submission_without_session_is_a_noop() {
        let state = SessionState::default();
        let next = state.apply(SessionAction::RecordSubmission(42));
        assert_eq!(next, SessionState::default());
    }

    #[test]
    fn backfill_only_wanted_when_submission_id_missing() {
        assert_eq!(SessionState::default().backfill_target(), None);
        assert_eq!(
            SessionState {
                session: Some(session(Some(9)))
            }
            .backfill_target(),
            None
        );
        assert_eq!(
            SessionState {
                session: Some(session(None))
            }
            .backfill_target(),
            Some(1)
        );
    }

    #[test]
    fn persisted_form_uses_camel_case_keys() {
        let value = serde_json::to_value(session(Some(5))).unwrap();
        assert_eq!(value["userId"], 1);
        assert_eq!(value["username"], "ada");
        assert_eq!(value["lastSubmissionId"], 5);

        let round_trip: Session = serde_json::from_value(value).unwrap();
        assert_eq!(round_trip, session(Some(5)));
    }
}
