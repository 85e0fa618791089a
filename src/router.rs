use yew_router::prelude::*;

use crate::types::SubmissionId;

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/dashboard")]
    Dashboard,
    #[at("/new-survey")]
    NewSurvey,
    #[at("/current-diagnosis/:submission_id")]
    CurrentDiagnosis { submission_id: String },
    #[at("/treatment-plan/:submission_id")]
    TreatmentPlan { submission_id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Redirect target for a navigation, or `None` when the route may render.
/// Evaluated on every navigation: unauthenticated visitors only reach Login
/// and Register, authenticated users only the app screens.
pub fn gate(route: &Route, authenticated: bool) -> Option<Route> {
    if authenticated {
        match route {
            Route::Dashboard
            | Route::NewSurvey
            | Route::CurrentDiagnosis { .. }
            | Route::TreatmentPlan { .. } => None,
            Route::Login | Route::Register | Route::NotFound => Some(Route::Dashboard),
        }
    } else {
        match route {
            Route::Login | Route::Register => None,
            _ => Some(Route::Login),
        }
    }
}

/// Screens carry the submission id straight out of the path. Anything that is
/// not a positive integer is an input error, not a missing resource.
pub fn parse_submission_param(raw: &str) -> Option<SubmissionId> {
    raw.parse::<SubmissionId>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_visitors_are_sent_to_login() {
        assert_eq!(gate(&Route::Dashboard, false), Some(Route::Login));
        assert_eq!(gate(&Route::NewSurvey, false), Some(Route::Login));
        assert_eq!(
            gate(
                &Route::TreatmentPlan {
                    submission_id: "3".to_string()
                },
                false
            ),
            Some(Route::Login)
        );
        assert_eq!(gate(&Route::NotFound, false), Some(Route::Login));
    }

    #[test]
    fn unauthenticated_visitors_may_log_in_or_register() {
        assert_eq!(gate(&Route::Login, false), None);
        assert_eq!(gate(&Route::Register, false), None);
    }

    #[test]
    fn authenticated_users_are_kept_out_of_auth_screens() {
        assert_eq!(gate(&Route::Login, true), Some(Route::Dashboard));
        assert_eq!(gate(&Route::Register, true), Some(Route::Dashboard));
        assert_eq!(gate(&Route::NotFound, true), Some(Route::Dashboard));
    }

    #[test]
    fn authenticated_users_reach_the_app_screens() {
        assert_eq!(gate(&Route::Dashboard, true), None);
        assert_eq!(gate(&Route::NewSurvey, true), None);
        assert_eq!(
            gate(
                &Route::CurrentDiagnosis {
                    submission_id: "12".to_string()
                },
                true
            ),
            None
        );
    }

    #[test]
    fn submission_param_requires_a_positive_integer() {
        assert_eq!(parse_submission_param("42"), Some(42));
        assert_eq!(parse_submission_param("0"), None);
        assert_eq!(parse_submission_param("-3"), None);
        assert_eq!(parse_submission_param("abc"), None);
        assert_eq!(parse_submission_param(""), None);
        assert_eq!(parse_submission_param("4.2"), None);
    }
}
