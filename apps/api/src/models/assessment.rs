use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of input a question asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    #[default]
    MultipleChoice,
    Scale,
    Scenario,
    Ranking,
}

/// A question shown once by the quiz and then folded into a `QuizResponse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveQuestion {
    /// Blank when the model omitted it; filled in during sanitising.
    #[serde(default)]
    pub id: String,
    pub question: String,
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub skills_assessed: Vec<String>,
    /// 1 (introductory) – 5 (expert)
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
}

fn default_difficulty() -> u8 {
    2
}

/// A selected option, as sent back by the quiz for choice questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChosenOption {
    pub id: String,
    pub text: String,
}

/// The user's answer. Scale questions send numbers, free-text and
/// multiple-choice questions send strings, scenario pickers send the option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    Choice(ChosenOption),
}

impl AnswerValue {
    /// Text usable for keyword heuristics; numbers have none.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) => Some(text),
            AnswerValue::Choice(option) => Some(&option.text),
            AnswerValue::Number(_) => None,
        }
    }
}

/// One user answer. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub question: String,
    pub answer: AnswerValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "chrono::Utc::now")]
    pub timestamp: DateTime<Utc>,
}

/// A response option inside a workplace scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOption {
    #[serde(default)]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub traits: Vec<String>,
}

/// A short workplace vignette with 3–4 response options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioVariant {
    pub title: String,
    pub context: String,
    pub challenge: String,
    pub options: Vec<ScenarioOption>,
    #[serde(default)]
    pub follow_up_questions: Vec<String>,
}

/// The option a user picked for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioChoice {
    pub scenario_title: String,
    pub selected: ScenarioOption,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_answer_value_accepts_all_three_shapes() {
        let number: AnswerValue = serde_json::from_value(json!(4)).unwrap();
        assert_eq!(number, AnswerValue::Number(4.0));

        let text: AnswerValue = serde_json::from_value(json!("I am confident")).unwrap();
        assert_eq!(text.as_text(), Some("I am confident"));

        let choice: AnswerValue =
            serde_json::from_value(json!({"id": "b", "text": "Delegate the task"})).unwrap();
        assert_eq!(choice.as_text(), Some("Delegate the task"));
    }

    #[test]
    fn test_question_type_uses_kebab_case() {
        let json = serde_json::to_string(&QuestionType::MultipleChoice).unwrap();
        assert_eq!(json, "\"multiple-choice\"");
        let parsed: QuestionType = serde_json::from_str("\"ranking\"").unwrap();
        assert_eq!(parsed, QuestionType::Ranking);
    }

    #[test]
    fn test_question_defaults_fill_optional_fields() {
        let question: AdaptiveQuestion = serde_json::from_value(json!({
            "id": "q1",
            "question": "How do you plan a sprint?"
        }))
        .unwrap();
        assert_eq!(question.question_type, QuestionType::MultipleChoice);
        assert_eq!(question.difficulty, 2);
        assert!(question.options.is_empty());
        assert!(question.scenario.is_none());
    }

    #[test]
    fn test_question_serializes_skills_assessed_key() {
        let question = AdaptiveQuestion {
            id: "q1".to_string(),
            question: "Rate yourself".to_string(),
            question_type: QuestionType::Scale,
            options: vec![],
            skills_assessed: vec!["leadership".to_string()],
            difficulty: 1,
            scenario: None,
        };
        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["skillsAssessed"], json!(["leadership"]));
        assert_eq!(value["type"], json!("scale"));
        assert!(value.get("scenario").is_none());
    }

    #[test]
    fn test_quiz_response_timestamp_defaults_to_now() {
        let response: QuizResponse = serde_json::from_value(json!({
            "question": "Q",
            "answer": 3
        }))
        .unwrap();
        assert!(response.timestamp <= Utc::now());
        assert!(response.skills.is_empty());
    }
}
