use std::cell::Cell;
use std::rc::Rc;

use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::components::{FetchState, NavBar};
use crate::router::{parse_submission_param, Route};
use crate::types::DiagnosisResult;

#[derive(Properties, PartialEq)]
pub struct DiagnosisResultsProps {
    pub submission_id: String,
}

#[function_component(DiagnosisResults)]
pub fn diagnosis_results(props: &DiagnosisResultsProps) -> Html {
    let results = use_state(Vec::<DiagnosisResult>::new);
    let state = use_state(|| FetchState::Loading);
    let navigator = use_navigator().expect("navigator not available");

    // Re-runs whenever the route parameter changes; a result landing after
    // that (or after unmount) is dropped.
    {
        let results = results.clone();
        let state = state.clone();
        use_effect_with(props.submission_id.clone(), move |submission_id| {
            let cancelled = Rc::new(Cell::new(false));
            match parse_submission_param(submission_id) {
                None => {
                    log::error!("invalid submission id in route: {submission_id:?}");
                    state.set(FetchState::Failed(
                        "Invalid submission ID. Please try again.".to_string(),
                    ));
                }
                Some(id) => {
                    state.set(FetchState::Loading);
                    let flag = cancelled.clone();
                    spawn_local(async move {
                        let outcome = api::fetch_diagnosis_results(id).await;
                        if flag.get() {
                            return;
                        }
                        match outcome {
                            Ok(list) if list.is_empty() => state.set(FetchState::Failed(
                                "No diagnosis results found for the specified submission."
                                    .to_string(),
                            )),
                            Ok(list) => {
                                results.set(list);
                                state.set(FetchState::Ready);
                            }
                            Err(e) => {
                                log::error!("failed to load diagnosis results: {e}");
                                state.set(FetchState::Failed(
                                    "Failed to load diagnosis results. Please try again."
                                        .to_string(),
                                ));
                            }
                        }
                    });
                }
            }
            move || cancelled.set(true)
        });
    }

    match &*state {
        FetchState::Loading => html! {
            <div style="max-width:480px; margin:4em auto 0 auto; text-align:center; font-family:Arial,sans-serif; color:#555;">
                <p>{ "Loading diagnosis results..." }</p>
            </div>
        },
        FetchState::Failed(message) => html! {
            <div style="max-width:480px; margin:4em auto 0 auto; font-family:Arial,sans-serif;">
                <div style="padding:0.75em 1em; background:#f8d7da; border:1px solid #f5c6cb; border-radius:4px; color:#721c24; text-align:center;">
                    { message }
                </div>
            </div>
        },
        FetchState::Ready => {
            let submission_id = props.submission_id.clone();
            let view_plan = {
                let navigator = navigator.clone();
                let submission_id = submission_id.clone();
                Callback::from(move |_| {
                    navigator.push(&Route::TreatmentPlan {
                        submission_id: submission_id.clone(),
                    })
                })
            };
            html! {
                <div style="font-family:Arial,sans-serif;">
                    <NavBar />
                    <div style="max-width:720px; margin:2em auto 0 auto; padding:0 1em;">
                        <div style="padding:2em; background:#fff; border:1px solid #ddd; border-radius:8px; box-shadow:0 2px 8px rgba(0,0,0,0.08);">
                            <h2 style="margin:0 0 1em 0; color:#333;">
                                { format!("Diagnosis Results for Submission ID: {}", props.submission_id) }
                            </h2>
                            { for results.iter().map(|result| html! {
                                <div key={result.id} style="padding:1em 0; border-bottom:1px solid #eee;">
                                    <h3 style="margin:0 0 0.25em 0; color:#333;">{ &result.organ_name }</h3>
                                    <p style="margin:0 0 0.25em 0; color:#333;">{ &result.diagnosis_name }</p>
                                    <p style="margin:0; color:#888; font-size:0.9em;">{ &result.description }</p>
                                </div>
                            })}
                            <div style="margin-top:1.5em;">
                                <button
                                    onclick={view_plan}
                                    style="padding:0.6em 1.5em; background:#007bff; color:white; border:none; border-radius:4px; cursor:pointer;"
                                >
                                    { "View Treatment Plan" }
                                </button>
                            </div>
                        </div>
                    </div>
                </div>
            }
        }
    }
}
