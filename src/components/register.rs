use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::router::Route;

#[function_component(Register)]
pub fn register() -> Html {
    let username = use_state(String::new);
    let email = use_state(String::new);
    let error = use_state(String::new);
    let submitting = use_state(|| false);
    let navigator = use_navigator().expect("navigator not available");

    let on_username_change = {
        let username = username.clone();
        Callback::from(move |event: Event| {
            let target = event.target_unchecked_into::<HtmlInputElement>();
            username.set(target.value());
        })
    };

    let on_email_change = {
        let email = email.clone();
        Callback::from(move |event: Event| {
            let target = event.target_unchecked_into::<HtmlInputElement>();
            email.set(target.value());
        })
    };

    let on_register = {
        let username = username.clone();
        let email = email.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        let navigator = navigator.clone();
        Callback::from(move |_| {
            if *submitting {
                return;
            }
            let name = (*username).clone();
            let address = (*email).clone();
            if name.is_empty() || address.is_empty() {
                error.set("Username and email are required".to_string());
                return;
            }
            let error = error.clone();
            let submitting = submitting.clone();
            let navigator = navigator.clone();
            submitting.set(true);
            error.set(String::new());
            spawn_local(async move {
                match api::register_user(&name, &address).await {
                    Ok(account) => {
                        log::info!("registered user {}", account.id);
                        navigator.push(&Route::Login);
                    }
                    Err(e) => {
                        log::error!("registration failed: {e}");
                        error.set(e.user_message("An error occurred during registration"));
                        submitting.set(false);
                    }
                }
            });
        })
    };

    let go_login = {
        let navigator = navigator.clone();
        Callback::from(move |_| navigator.push(&Route::Login))
    };

    html! {
        <div style="max-width:480px; margin:4em auto 0 auto; padding:0 1em; font-family:Arial,sans-serif;">
            <div style="padding:2em; background:#fff; border:1px solid #ddd; border-radius:8px; box-shadow:0 2px 8px rgba(0,0,0,0.08);">
                <h2 style="margin:0 0 1em 0; color:#333;">{ "Register" }</h2>
                <div style="display:flex; flex-direction:column; gap:0.5em; margin-bottom:1em;">
                    <label style="font-weight:bold; color:#555;">{ "Username:" }</label>
                    <input
                        type="text"
                        value={(*username).clone()}
                        onchange={on_username_change}
                        style="width:100%; padding:0.5em; border:1px solid #ccc; border-radius:4px; box-sizing:border-box;"
                    />
                </div>
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
                        onclick={on_register}
                        disabled={*submitting}
                        style={if *submitting {
                            "padding:0.6em 1.5em; background:#ccc; color:white; border:none; border-radius:4px; cursor:not-allowed;"
                        } else {
                            "padding:0.6em 1.5em; background:#007bff; color:white; border:none; border-radius:4px; cursor:pointer;"
                        }}
                    >
                        { if *submitting { "Registering..." } else { "Register" } }
                    </button>
                    <button
                        onclick={go_login}
                        style="background:none; border:none; color:#007bff; cursor:pointer; text-decoration:underline;"
                    >
                        { "Back to Login" }
                    </button>
                </div>
            </div>
        </div>
    }
}
