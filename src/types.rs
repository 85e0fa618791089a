use serde::{Deserialize, Deserializer, Serialize};

/// Handle identifying one completed survey. Always positive; zero or negative
/// values never leave the API client.
pub type SubmissionId = i64;

/// One survey question. List order defines response-array indexing; the bit
/// position is the server's packing index for the answer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Question {
    pub id: i64,
    pub bit_position: u32,
    pub question_text: String,
}

/// One answered question, paired from a question's bit position and the
/// checkbox state at submit time.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub bit_position: u32,
    pub is_true: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswersRequest {
    pub user_id: i64,
    pub answers: Vec<AnswerEntry>,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
}

/// Body of a successful answer submission. The id must arrive as a JSON
/// number; a string is a schema violation, not something to coerce.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub submission_id: SubmissionId,
}

/// User record returned by login and register.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    #[serde(default)]
    pub last_submission_id: Option<SubmissionId>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DiagnosisResult {
    pub id: i64,
    pub organ_name: String,
    pub diagnosis_name: String,
    pub description: String,
}

/// Per-organ treatment plan entry. The server may omit or null out any of the
/// recommendation lists.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OrganPlan {
    pub organ_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub foods: Vec<FoodRecommendation>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub herbs: Vec<HerbRecommendation>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub emotions: Vec<EmotionRecommendation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FoodRecommendation {
    pub food_name: String,
    pub properties: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HerbRecommendation {
    pub herb_name: String,
    pub properties: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EmotionRecommendation {
    pub emotion_name: String,
    pub description: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_list_parses_snake_case_fields() {
        let body = r#"[
            {"id": 1, "bit_position": 0, "question_text": "Do you sleep well?"},
            {"id": 2, "bit_position": 1, "question_text": "Frequent headaches?"}
        ]"#;
        let questions: Vec<Question> = serde_json::from_str(body).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].bit_position, 0);
        assert_eq!(questions[1].question_text, "Frequent headaches?");
    }

    #[test]
    fn answer_payload_serializes_camel_case() {
        let request = SubmitAnswersRequest {
            user_id: 1,
            answers: vec![
                AnswerEntry { bit_position: 0, is_true: true },
                AnswerEntry { bit_position: 1, is_true: false },
            ],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["userId"], 1);
        assert_eq!(value["answers"][0]["bitPosition"], 0);
        assert_eq!(value["answers"][0]["isTrue"], true);
        assert_eq!(value["answers"][1]["isTrue"], false);
    }

    #[test]
    fn user_details_tolerates_missing_submission_id() {
        let details: UserDetails = serde_json::from_str("{}").unwrap();
        assert_eq!(details.last_submission_id, None);

        let details: UserDetails =
            serde_json::from_str(r#"{"lastSubmissionId": 7}"#).unwrap();
        assert_eq!(details.last_submission_id, Some(7));
    }

    #[test]
    fn organ_plan_defaults_absent_and_null_lists_to_empty() {
        let body = r#"[
            {"organ_name": "Liver", "foods": null, "herbs": [
                {"herb_name": "Milk thistle", "properties": "Bitter, cooling"}
            ]},
            {"organ_name": "Heart"}
        ]"#;
        let plan: Vec<OrganPlan> = serde_json::from_str(body).unwrap();
        assert_eq!(plan[0].foods, vec![]);
        assert_eq!(plan[0].herbs.len(), 1);
        assert_eq!(plan[1].organ_name, "Heart");
        assert!(plan[1].emotions.is_empty());
    }

    #[test]
    fn submission_response_rejects_string_id() {
        let err = serde_json::from_str::<SubmissionResponse>(r#"{"submissionId": "42"}"#);
        assert!(err.is_err());
    }
}
