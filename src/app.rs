use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::components::{Dashboard, DiagnosisResults, Login, Register, Survey, TreatmentPlan};
use crate::router::{gate, Route};
use crate::session::{SessionAction, SessionHandle, SessionState};

fn render_route(route: Route) -> Html {
    match route {
        Route::Login => html! { <Login /> },
        Route::Register => html! { <Register /> },
        Route::Dashboard => html! { <Dashboard /> },
        Route::NewSurvey => html! { <Survey /> },
        Route::CurrentDiagnosis { submission_id } => {
            html! { <DiagnosisResults {submission_id} /> }
        }
        Route::TreatmentPlan { submission_id } => {
            html! { <TreatmentPlan {submission_id} /> }
        }
        // Unreachable: the gate redirects NotFound in both auth states.
        Route::NotFound => html! {},
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let session = use_reducer(SessionState::restored);

    // Backfill the last submission id for a restored session that lacks one.
    // Best-effort: a failure just leaves the dashboard without result links.
    {
        let session = session.clone();
        use_effect_with((), move |_| {
            if let Some(user_id) = session.backfill_target() {
                spawn_local(async move {
                    match api::fetch_user_details(user_id).await {
                        Ok(details) => {
                            if let Some(id) = details.last_submission_id {
                                session.dispatch(SessionAction::RecordSubmission(id));
                            }
                        }
                        Err(e) => log::warn!("could not backfill user details: {e}"),
                    }
                });
            }
            || ()
        });
    }

    let authenticated = session.authenticated();
    html! {
        <ContextProvider<SessionHandle> context={session}>
            <BrowserRouter>
                <Switch<Route> render={move |route: Route| {
                    match gate(&route, authenticated) {
                        Some(target) => html! { <Redirect<Route> to={target} /> },
                        None => render_route(route),
                    }
                }} />
            </BrowserRouter>
        </ContextProvider<SessionHandle>>
    }
}
