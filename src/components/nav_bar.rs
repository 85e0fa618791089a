use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

const NAV_BUTTON_STYLE: &str = "background:none; border:1px solid white; color:white; \
    padding:0.4em 1em; border-radius:4px; cursor:pointer; font-size:0.95em;";

#[function_component(NavBar)]
pub fn nav_bar() -> Html {
    let navigator = use_navigator().expect("navigator not available");

    let go_dashboard = {
        let navigator = navigator.clone();
        Callback::from(move |_| navigator.push(&Route::Dashboard))
    };
    let go_survey = {
        let navigator = navigator.clone();
        Callback::from(move |_| navigator.push(&Route::NewSurvey))
    };

    html! {
        <div style="display:flex; align-items:center; justify-content:space-between; padding:0.75em 1.5em; background:#007bff; color:white;">
            <strong style="font-size:1.1em;">{ "Health Survey" }</strong>
            <div style="display:flex; gap:0.5em;">
                <button onclick={go_dashboard} style={NAV_BUTTON_STYLE}>{ "Dashboard" }</button>
                <button onclick={go_survey} style={NAV_BUTTON_STYLE}>{ "New Survey" }</button>
            </div>
        </div>
    }
}
