use std::cell::Cell;
use std::rc::Rc;

use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::components::{FetchState, NavBar};
use crate::router::{parse_submission_param, Route};
use crate::types::OrganPlan;

#[derive(Properties, PartialEq)]
pub struct TreatmentPlanProps {
    pub submission_id: String,
}

fn section(title: &str, entries: Html, empty: bool, empty_message: &str) -> Html {
    html! {
        <div style="margin-bottom:1em;">
            <h4 style="margin:0 0 0.25em 0; color:#333;">{ title }</h4>
            <div style="border-top:1px solid #eee; padding-top:0.5em;">
                { if empty {
                    html! { <p style="margin:0; color:#888; font-size:0.9em;">{ empty_message }</p> }
                } else {
                    entries
                }}
            </div>
        </div>
    }
}

fn organ_card(organ: &OrganPlan) -> Html {
    let foods = html! {
        { for organ.foods.iter().map(|food| html! {
            <p style="margin:0 0 0.25em 0; color:#333;">
                <strong>{ &food.food_name }</strong>{ ": " }{ &food.properties }
            </p>
        })}
    };
    let herbs = html! {
        { for organ.herbs.iter().map(|herb| html! {
            <p style="margin:0 0 0.25em 0; color:#333;">
                <strong>{ &herb.herb_name }</strong>{ ": " }{ &herb.properties }
            </p>
        })}
    };
    let emotions = html! {
        { for organ.emotions.iter().map(|emotion| html! {
            <p style="margin:0 0 0.25em 0; color:#333;">
                <strong>{ &emotion.emotion_name }</strong>{ ": " }{ &emotion.description }
            </p>
        })}
    };

    html! {
        <div key={organ.organ_name.clone()} style="border:1px solid #ddd; border-radius:8px; overflow:hidden; background:#f9f9f9; margin-bottom:1.5em;">
            <div style="background:#4a5568; color:white; padding:0.75em 1em; font-weight:bold;">
                { &organ.organ_name }
            </div>
            <div style="padding:1em; background:#fff;">
                { section("Food Recommendations", foods, organ.foods.is_empty(),
                    "No food recommendations available.") }
                { section("Herbal Remedies", herbs, organ.herbs.is_empty(),
                    "No herbal remedies available.") }
                { section("Lifestyle & Emotions", emotions, organ.emotions.is_empty(),
                    "No emotional or lifestyle recommendations available.") }
            </div>
        </div>
    }
}

#[function_component(TreatmentPlan)]
pub fn treatment_plan(props: &TreatmentPlanProps) -> Html {
    let plan = use_state(Vec::<OrganPlan>::new);
    let state = use_state(|| FetchState::Loading);
    let navigator = use_navigator().expect("navigator not available");

    {
        let plan = plan.clone();
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
                        let outcome = api::fetch_treatment_plan(id).await;
                        if flag.get() {
                            return;
                        }
                        match outcome {
                            Ok(list) => {
                                plan.set(list);
                                state.set(FetchState::Ready);
                            }
                            Err(e) => {
                                log::error!("failed to load treatment plan: {e}");
                                state.set(FetchState::Failed(
                                    "Failed to load treatment plan. Please try again later."
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
                <p>{ "Loading treatment plan..." }</p>
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
            let back_to_diagnosis = {
                let navigator = navigator.clone();
                let submission_id = props.submission_id.clone();
                Callback::from(move |_| {
                    navigator.push(&Route::CurrentDiagnosis {
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
                                { format!("Treatment Plan for Submission ID: {}", props.submission_id) }
                            </h2>
                            { if plan.is_empty() {
                                html! {
                                    <p style="color:#888;">
                                        { "No treatment plan available for this submission yet." }
                                    </p>
                                }
                            } else {
                                html! { <>{ for plan.iter().map(organ_card) }</> }
                            }}
                            <div style="text-align:center; margin-top:1.5em;">
                                <button
                                    onclick={back_to_diagnosis}
                                    style="padding:0.6em 1.5em; background:#007bff; color:white; border:none; border-radius:4px; cursor:pointer;"
                                >
                                    { "Back to Diagnosis" }
                                </button>
                            </div>
                        </div>
                    </div>
                </div>
            }
        }
    }
}
