use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::router::Route;
use crate::session::{Session, SessionAction, SessionHandle};

#[function_component(Login)]
pub fn login() -> Html {
    let email = use_state(String::new);
    let error = use_state(String::new);
    let submitting = use_state(|| false);
    let session = use_context::<SessionHandle>().expect("session context not provided");
    let navigator = use_navigator().expect("navigator not available");

    let on_email_change = {
        let email = email.clone();
        Callback::from(move |event: Event| {
            let target = event.target_unchecked_into::<HtmlInputElement>();
            email.set(target.value());
        })
    };

    let on_login = {
        let email = email.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        let session = session.clone();
        let navigator = navigator.clone();
        Callback::from(move |_| {
            if *submitting {
                return;
            }
            let address = (*email).clone();
            if address.is_empty() {
                error.set("Email is required".to_string());
                return;
            }
            let error = error.clone();
            let submitting = submitting.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            submitting.set(true);
            error.set(String::new());
            spawn_local(async move {
                match api::login_user(&address).await {
                    Ok(account) => {
                        // Best-effort: pick up the last submission id right away
                        // so the dashboard can link to existing results.
                        let last_submission_id = match api::fetch_user_details(account.id).await {
                            Ok(details) => details.last_submission_id,
                            Err(e) => {
                                log::warn!("could not fetch user details after login: {e}");
                                None
                            }
                        };
                        log::info!("user {} logged in", account.id);
                        session.dispatch(SessionAction::Login(Session {
                            user_id: account.id,
                            username: account.username,
                            last_submission_id,
                        }));
                        navigator.push(&Route::Dashboard);
                    }
                    Err(e) => {
                        log::error!("login failed: {e}");
                        error.set(e.user_message("An error occurred during login"));
                        submitting.set(false);
                    }
                }
            });
        })
    };

    let go_register = {
        let navigator = navigator.clone();
        Callback::from(move |_| navigator.push(&Route::Register))
    };

    html! {
        <div style="max-width:480px; margin:4em auto 0 auto; padding:0 1em; font-family:Arial,sans-serif;">
            <div style="padding:2em; background:#fff; border:1px solid #ddd; border-radius:8px; box-shadow:0 2px 8px rgba(0,0,0,0.08);">
                <h2 style="margin:0 0 1em 0; color:#333;">{ "Login" }</h2>
                <div style="display:flex; flex-direction:column; gap:0.5em;">
                    <label style="font-weight:bold; color:#555;">{ "Email:" }</label>
                    <input
                        type="email"
                        value={(*email).clone()}
                        onchange={on_email_change}
                        style="width:100%; padding:0.5em; border:1px solid #ccc; border-radius:4px; box-sizing:border-box;"
                    />
                </div>
                { if !error.is_empty() {
                    html! {
                        <div style="margin-top:1em; padding:0.75em 1em; background:#f8d7da; border:1px solid #f5c6cb; border-radius:4px; color:#721c24;">
                            { &*error }
                        </div>
                    }
                } else {
                    html! {}
                }}
                <div style="margin-top:1.5em; display:flex; justify-content:space-between; align-items:center;">
                    <button
                        onclick={on_login}
                        disabled={*submitting}
                        style={if *submitting {
                            "padding:0.6em 1.5em; background:#ccc; color:white; border:none; border-radius:4px; cursor:not-allowed;"
                        } else {
                            "padding:0.6em 1.5em; background:#007bff; color:white; border:none; border-radius:4px; cursor:pointer;"
                        }}
                    >
                        { if *submitting { "Logging in..." } else { "Login" } }
                    </button>
                    <button
                        onclick={go_register}
                        style="background:none; border:none; color:#007bff; cursor:pointer; text-decoration:underline;"
                    >
                        { "Register" }
                    </button>
                </div>
            </div>
        </div>
    }
}
