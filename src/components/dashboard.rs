use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::NavBar;
use crate::router::Route;
use crate::session::{SessionAction, SessionHandle};

const LINK_STYLE: &str = "display:block; padding:0.75em 1em; border:1px solid #ddd; \
    border-radius:4px; margin-bottom:0.5em; color:#007bff; text-decoration:none; background:#fff;";

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let session = use_context::<SessionHandle>().expect("session context not provided");
    let navigator = use_navigator().expect("navigator not available");

    // The gate only renders this screen when a session exists.
    let Some(user) = session.session.clone() else {
        return html! {};
    };

    let on_new_survey = {
        let navigator = navigator.clone();
        Callback::from(move |_| navigator.push(&Route::NewSurvey))
    };

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_| {
            log::info!("logging out");
            session.dispatch(SessionAction::Logout);
        })
    };

    html! {
        <div style="font-family:Arial,sans-serif;">
            <NavBar />
            <div style="max-width:720px; margin:2em auto 0 auto; padding:0 1em;">
                <div style="padding:2em; background:#fff; border:1px solid #ddd; border-radius:8px; box-shadow:0 2px 8px rgba(0,0,0,0.08);">
                    <h2 style="margin:0 0 0.5em 0; color:#333;">
                        { format!("Welcome, {}", user.username) }
                    </h2>
                    <p style="color:#555; margin:0 0 1.5em 0;">
                        { "Manage your surveys and results below." }
                    </p>

                    <div style="margin-bottom:1.5em;">
                        { match user.last_submission_id {
                            Some(id) => html! {
                                <>
                                    <Link<Route> to={Route::TreatmentPlan { submission_id: id.to_string() }}>
                                        <span style={LINK_STYLE}>{ "View Treatment Plan" }</span>
                                    </Link<Route>>
                                    <Link<Route> to={Route::CurrentDiagnosis { submission_id: id.to_string() }}>
                                        <span style={LINK_STYLE}>{ "View Current Diagnosis" }</span>
                                    </Link<Route>>
                                </>
                            },
                            None => html! {
                                <p style="color:#888; font-size:0.9em;">
                                    { "No recent submission found. Complete a survey to see results." }
                                </p>
                            },
                        }}
                    </div>

                    <div style="display:flex; justify-content:space-between;">
                        <button
                            onclick={on_new_survey}
                            style="padding:0.6em 1.5em; background:#007bff; color:white; border:none; border-radius:4px; cursor:pointer;"
                        >
                            { "Start a New Survey" }
                        </button>
                        <button
                            onclick={on_logout}
                            style="padding:0.6em 1.5em; background:none; color:#dc3545; border:1px solid #dc3545; border-radius:4px; cursor:pointer;"
                        >
                            { "Logout" }
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
