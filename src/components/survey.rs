use std::cell::Cell;
use std::rc::Rc;

use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::components::{FetchState, NavBar};
use crate::router::Route;
use crate::session::{SessionAction, SessionHandle};
use crate::types::{AnswerEntry, Question};

/// Pairs each question's bit position with its checkbox state, in list order.
/// An untouched checkbox submits as "no".
fn build_answers(questions: &[Question], responses: &[bool]) -> Vec<AnswerEntry> {
    questions
        .iter()
        .zip(responses.iter())
        .map(|(question, &is_true)| AnswerEntry {
            bit_position: question.bit_position,
            is_true,
        })
        .collect()
}

#[function_component(Survey)]
pub fn survey() -> Html {
    let questions = use_state(Vec::<Question>::new);
    let responses = use_state(Vec::<bool>::new);
    let load_state = use_state(|| FetchState::Loading);
    let submit_error = use_state(String::new);
    let submitting = use_state(|| false);
    let session = use_context::<SessionHandle>().expect("session context not provided");
    let navigator = use_navigator().expect("navigator not available");

    // Fetch the question list on mount; one response slot per question,
    // default false.
    {
        let questions = questions.clone();
        let responses = responses.clone();
        let load_state = load_state.clone();
        use_effect_with((), move |_| {
            let cancelled = Rc::new(Cell::new(false));
            let flag = cancelled.clone();
            spawn_local(async move {
                let result = api::fetch_questions().await;
                if flag.get() {
                    return;
                }
                match result {
                    Ok(list) => {
                        responses.set(vec![false; list.len()]);
                        questions.set(list);
                        load_state.set(FetchState::Ready);
                    }
                    Err(e) => {
                        log::error!("failed to load questions: {e}");
                        load_state.set(FetchState::Failed(
                            "Failed to load questions. Please try again later.".to_string(),
                        ));
                    }
                }
            });
            move || cancelled.set(true)
        });
    }

    let on_toggle = {
        let responses = responses.clone();
        Callback::from(move |(index, value): (usize, bool)| {
            let mut updated = (*responses).clone();
            if let Some(slot) = updated.get_mut(index) {
                *slot = value;
                responses.set(updated);
            }
        })
    };

    let on_submit = {
        let questions = questions.clone();
        let responses = responses.clone();
        let submit_error = submit_error.clone();
        let submitting = submitting.clone();
        let session = session.clone();
        let navigator = navigator.clone();
        Callback::from(move |_| {
            if *submitting || questions.is_empty() {
                return;
            }
            let Some(user_id) = session.session.as_ref().map(|s| s.user_id) else {
                navigator.push(&Route::Login);
                return;
            };
            let answers = build_answers(&questions, &responses);
            let submit_error = submit_error.clone();
            let submitting = submitting.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            submitting.set(true);
            submit_error.set(String::new());
            spawn_local(async move {
                match api::submit_answers(user_id, answers).await {
                    Ok(submission_id) => {
                        session.dispatch(SessionAction::RecordSubmission(submission_id));
                        navigator.push(&Route::TreatmentPlan {
                            submission_id: submission_id.to_string(),
                        });
                    }
                    Err(e) => {
                        log::error!("survey submission failed: {e}");
                        submit_error.set(
                            "Failed to submit survey. Please try again later.".to_string(),
                        );
                        submitting.set(false);
                    }
                }
            });
        })
    };

    let body = match &*load_state {
        FetchState::Loading => html! {
            <p style="text-align:center; color:#555;">{ "Loading questions..." }</p>
        },
        FetchState::Failed(message) => html! {
            <div style="padding:0.75em 1em; background:#f8d7da; border:1px solid #f5c6cb; border-radius:4px; color:#721c24;">
                { message }
            </div>
        },
        FetchState::Ready if questions.is_empty() => html! {
            <p style="text-align:center; color:#555;">
                { "No questions available at the moment." }
            </p>
        },
        FetchState::Ready => html! {
            <>
                <div>
                    { for questions.iter().enumerate().map(|(index, question)| {
                        let checked = responses.get(index).copied().unwrap_or(false);
                        let on_change = {
                            let on_toggle = on_toggle.clone();
                            Callback::from(move |event: Event| {
                                let target = event.target_unchecked_into::<HtmlInputElement>();
                                on_toggle.emit((index, target.checked()));
                            })
                        };
                        html! {
                            <label key={question.id} style="display:block; margin-bottom:1em; color:#333; cursor:pointer;">
                                <input
                                    type="checkbox"
                                    checked={checked}
                                    onchange={on_change}
                                    style="margin-right:0.6em;"
                                />
                                { &question.question_text }
                            </label>
                        }
                    })}
                </div>
                { if !submit_error.is_empty() {
                    html! {
                        <div style="margin-top:1em; padding:0.75em 1em; background:#f8d7da; border:1px solid #f5c6cb; border-radius:4px; color:#721c24;">
                            { &*submit_error }
                        </div>
                    }
                } else {
                    html! {}
                }}
                <div style="text-align:center; margin-top:1.5em;">
                    <button
                        onclick={on_submit}
                        disabled={*submitting}
                        style={if *submitting {
                            "padding:0.7em 2em; font-size:1em; background:#ccc; color:white; border:none; border-radius:4px; cursor:not-allowed;"
                        } else {
                            "padding:0.7em 2em; font-size:1em; background:#007bff; color:white; border:none; border-radius:4px; cursor:pointer;"
                        }}
                    >
                        { if *submitting { "Submitting..." } else { "Submit" } }
                    </button>
                </div>
            </>
        },
    };

    html! {
        <div style="font-family:Arial,sans-serif;">
            <NavBar />
            <div style="max-width:720px; margin:2em auto 0 auto; padding:0 1em;">
                <div style="padding:2em; background:#fff; border:1px solid #ddd; border-radius:8px; box-shadow:0 2px 8px rgba(0,0,0,0.08);">
                    <h2 style="margin:0 0 1em 0; color:#333;">{ "New Survey" }</h2>
                    { body }
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, bit_position: u32) -> Question {
        Question {
            id,
            bit_position,
            question_text: format!("Question {id}"),
        }
    }

    #[test]
    fn answers_pair_bit_positions_with_responses_in_order() {
        let questions = vec![question(1, 0), question(2, 1), question(3, 5)];
        let responses = vec![true, false, true];
        let answers = build_answers(&questions, &responses);
        assert_eq!(
            answers,
            vec![
                AnswerEntry { bit_position: 0, is_true: true },
                AnswerEntry { bit_position: 1, is_true: false },
                AnswerEntry { bit_position: 5, is_true: true },
            ]
        );
    }

    #[test]
    fn no_questions_means_no_answers() {
        assert!(build_answers(&[], &[]).is_empty());
    }

    #[test]
    fn untouched_responses_submit_as_no() {
        let questions = vec![question(1, 0), question(2, 1)];
        let responses = vec![false; questions.len()];
        let answers = build_answers(&questions, &responses);
        assert!(answers.iter().all(|a| !a.is_true));
    }
}
