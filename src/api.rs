use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::error::ApiError;
use crate::types::{
    AnswerEntry, DiagnosisResult, LoginRequest, OrganPlan, Question, RegisterRequest,
    SubmissionId, SubmissionResponse, SubmitAnswersRequest, UserAccount, UserDetails,
};

const API_BASE_URL: &str = "http://localhost:5000";

/// Registers a new account. The server answers with the created user record,
/// or a `{message}` body on rejection.
pub async fn register_user(username: &str, email: &str) -> Result<UserAccount, ApiError> {
    let body = RegisterRequest {
        username: username.to_string(),
        email: email.to_string(),
    };
    let (status, text) = post_json("/users/register", &body).await?;
    ensure_ok(status, &text)?;
    parse_body(&text)
}

/// Logs in by email. The server answers with the user record, or an `{error}`
/// body on rejection.
pub async fn login_user(email: &str) -> Result<UserAccount, ApiError> {
    let body = LoginRequest {
        email: email.to_string(),
    };
    let (status, text) = post_json("/users/login", &body).await?;
    ensure_ok(status, &text)?;
    parse_body(&text)
}

pub async fn fetch_user_details(user_id: i64) -> Result<UserDetails, ApiError> {
    let (status, text) = get(&format!("/users/{user_id}/details")).await?;
    ensure_ok(status, &text)?;
    parse_body(&text)
}

pub async fn fetch_questions() -> Result<Vec<Question>, ApiError> {
    let (status, text) = get("/questions").await?;
    ensure_ok(status, &text)?;
    parse_body(&text)
}

/// Submits the ordered answer list and returns the new submission id.
pub async fn submit_answers(
    user_id: i64,
    answers: Vec<AnswerEntry>,
) -> Result<SubmissionId, ApiError> {
    let body = SubmitAnswersRequest { user_id, answers };
    log::info!("submitting {} answers for user {user_id}", body.answers.len());
    let (status, text) = post_json("/answers", &body).await?;
    ensure_ok(status, &text)?;
    parse_submission_response(&text)
}

/// Diagnosis results for a submission. An empty list is a valid result (the
/// server has nothing for that id yet), not an error.
pub async fn fetch_diagnosis_results(
    submission_id: SubmissionId,
) -> Result<Vec<DiagnosisResult>, ApiError> {
    let (status, text) = get(&format!("/diagnosis/{submission_id}")).await?;
    ensure_ok(status, &text)?;
    parse_body(&text)
}

/// Treatment plan for a submission. The id is validated before any network
/// traffic; a non-positive value never reaches the server.
pub async fn fetch_treatment_plan(
    submission_id: SubmissionId,
) -> Result<Vec<OrganPlan>, ApiError> {
    validate_submission_id(submission_id)?;
    let (status, text) = get(&format!("/treatment-plans/{submission_id}")).await?;
    ensure_ok(status, &text)?;
    parse_body(&text)
}

pub(crate) fn validate_submission_id(submission_id: SubmissionId) -> Result<(), ApiError> {
    if submission_id > 0 {
        Ok(())
    } else {
        Err(ApiError::InvalidSubmissionId)
    }
}

fn parse_submission_response(body: &str) -> Result<SubmissionId, ApiError> {
    let response: SubmissionResponse = parse_body(body)?;
    if response.submission_id <= 0 {
        return Err(ApiError::InvalidResponse(format!(
            "non-positive submissionId {}",
            response.submission_id
        )));
    }
    Ok(response.submission_id)
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

fn ensure_ok(status: u16, body: &str) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    let message = error_message_from_body(body)
        .unwrap_or_else(|| format!("request failed with status {status}"));
    Err(ApiError::Server { status, message })
}

/// The backend reports rejections as either `{error}` or `{message}`.
fn error_message_from_body(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        error: Option<String>,
        #[serde(default)]
        message: Option<String>,
    }
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed.error.or(parsed.message)
}

async fn get(path: &str) -> Result<(u16, String), ApiError> {
    let url = format!("{API_BASE_URL}{path}");
    let request =
        Request::new_with_str(&url).map_err(|e| js_error("building request", e))?;
    send(request).await
}

async fn post_json<B: Serialize>(path: &str, body: &B) -> Result<(u16, String), ApiError> {
    let url = format!("{API_BASE_URL}{path}");
    let payload = serde_json::to_string(body)
        .map_err(|e| ApiError::Network(format!("encoding request body: {e}")))?;

    let headers = Headers::new().map_err(|e| js_error("building headers", e))?;
    headers
        .append("Content-Type", "application/json")
        .map_err(|e| js_error("building headers", e))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_headers(headers.as_ref());
    opts.set_body(&JsValue::from_str(&payload));

    let request = Request::new_with_str_and_init(&url, &opts)
        .map_err(|e| js_error("building request", e))?;
    send(request).await
}

async fn send(request: Request) -> Result<(u16, String), ApiError> {
    let window =
        web_sys::window().ok_or_else(|| ApiError::Network("window not available".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| js_error("fetch failed", e))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|e| js_error("not a Response", e))?;
    let status = resp.status();
    let text_promise = resp.text().map_err(|e| js_error("reading body", e))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| js_error("reading body", e))?;
    Ok((status, text.as_string().unwrap_or_default()))
}

fn js_error(context: &str, value: JsValue) -> ApiError {
    ApiError::Network(format!("{context}: {value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_response_parses_numeric_id() {
        assert_eq!(
            parse_submission_response(r#"{"submissionId": 42}"#).unwrap(),
            42
        );
    }

    #[test]
    fn submission_response_rejects_string_id() {
        let err = parse_submission_response(r#"{"submissionId": "42"}"#).unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn submission_response_rejects_missing_and_non_positive_ids() {
        assert!(matches!(
            parse_submission_response("{}").unwrap_err(),
            ApiError::InvalidResponse(_)
        ));
        assert!(matches!(
            parse_submission_response(r#"{"submissionId": 0}"#).unwrap_err(),
            ApiError::InvalidResponse(_)
        ));
    }

    #[test]
    fn submission_id_validated_before_any_request() {
        assert!(validate_submission_id(1).is_ok());
        assert_eq!(
            validate_submission_id(0).unwrap_err(),
            ApiError::InvalidSubmissionId
        );
        assert_eq!(
            validate_submission_id(-7).unwrap_err(),
            ApiError::InvalidSubmissionId
        );
    }

    #[test]
    fn non_ok_status_surfaces_server_message() {
        let err = ensure_ok(401, r#"{"error": "Unknown email"}"#).unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 401,
                message: "Unknown email".to_string()
            }
        );

        let err = ensure_ok(400, r#"{"message": "Username taken"}"#).unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 400,
                message: "Username taken".to_string()
            }
        );
    }

    #[test]
    fn non_ok_status_with_opaque_body_gets_generic_message() {
        let err = ensure_ok(500, "<html>oops</html>").unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 500,
                message: "request failed with status 500".to_string()
            }
        );
    }

    #[test]
    fn ok_statuses_pass_through() {
        assert!(ensure_ok(200, "").is_ok());
        assert!(ensure_ok(204, "").is_ok());
    }

    #[test]
    fn empty_diagnosis_list_is_a_valid_body() {
        let results: Vec<DiagnosisResult> = parse_body("[]").unwrap();
        assert!(results.is_empty());
    }
}
