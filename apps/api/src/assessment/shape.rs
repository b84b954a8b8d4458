//! Structural checks on model replies.
//!
//! Replies are deserialized leniently: list payloads arrive as raw JSON values
//! and each item is coerced on its own, so one bad entry costs that entry only.
//! Anything that survives is trimmed and range-checked; anything that does not
//! is left for the fallback engine.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::models::analysis::{
    CareerRecommendation, LearningStep, MarketInsights, PersonalityTrait, RoadmapPhase,
    ScenarioAnalysis, SkillDetail, SkillGap,
};
use crate::models::assessment::{AdaptiveQuestion, QuestionType, ScenarioVariant};

const MAX_SCENARIO_OPTIONS: usize = 4;
const MIN_SCENARIO_OPTIONS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Reply payloads
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct QuestionsPayload {
    #[serde(default)]
    pub questions: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRankingPayload {
    #[serde(default)]
    pub top_skills: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
}

/// Core career-fit reply. Every field is optional; gaps are filled from the
/// deterministic analysis.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerFitDraft {
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub top_strengths: Vec<String>,
    #[serde(default)]
    pub skill_gaps: Vec<Value>,
    #[serde(default)]
    pub career_recommendations: Vec<Value>,
    #[serde(default)]
    pub market_insights: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPathPayload {
    #[serde(default)]
    pub learning_path: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityPayload {
    #[serde(default)]
    pub personality_traits: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RoadmapPayload {
    #[serde(default)]
    pub roadmap: Vec<Value>,
}

// ────────────────────────────────────────────────────────────────────────────
// Well-formedness
// ────────────────────────────────────────────────────────────────────────────

/// A value the UI can render without special-casing missing parts.
pub trait WellFormed {
    fn is_well_formed(&self) -> bool;
}

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

fn percent(n: u8) -> bool {
    n <= 100
}

impl WellFormed for ScenarioVariant {
    fn is_well_formed(&self) -> bool {
        let mut ids = HashSet::new();
        filled(&self.title)
            && filled(&self.context)
            && filled(&self.challenge)
            && (MIN_SCENARIO_OPTIONS..=MAX_SCENARIO_OPTIONS).contains(&self.options.len())
            && self
                .options
                .iter()
                .all(|o| filled(&o.id) && filled(&o.text) && ids.insert(o.id.as_str()))
    }
}

impl WellFormed for PersonalityTrait {
    fn is_well_formed(&self) -> bool {
        filled(&self.name) && percent(self.score) && filled(&self.description)
    }
}

impl WellFormed for ScenarioAnalysis {
    fn is_well_formed(&self) -> bool {
        !self.dominant_traits.is_empty()
            && self.dominant_traits.iter().all(WellFormed::is_well_formed)
            && filled(&self.work_style)
            && filled(&self.summary)
    }
}

impl WellFormed for SkillDetail {
    fn is_well_formed(&self) -> bool {
        filled(&self.narrative)
            && filled(&self.market_demand.level)
            && !self.industry_breakdown.is_empty()
            && self.industry_breakdown.iter().all(|i| percent(i.percentage))
            && !self.learning_resources.is_empty()
            && !self.career_progression.is_empty()
    }
}

impl WellFormed for SkillGap {
    fn is_well_formed(&self) -> bool {
        filled(&self.skill) && percent(self.current_level) && percent(self.required_level)
    }
}

impl WellFormed for CareerRecommendation {
    fn is_well_formed(&self) -> bool {
        filled(&self.title) && percent(self.match_score)
    }
}

impl WellFormed for LearningStep {
    fn is_well_formed(&self) -> bool {
        filled(&self.skill) && filled(&self.resource)
    }
}

impl WellFormed for RoadmapPhase {
    fn is_well_formed(&self) -> bool {
        filled(&self.phase) && !self.goals.is_empty()
    }
}

impl WellFormed for MarketInsights {
    fn is_well_formed(&self) -> bool {
        filled(&self.demand_level) && filled(&self.competition_level)
    }
}

/// Deserializes every item on its own, keeping the well-formed ones.
pub fn coerce_items<T: DeserializeOwned + WellFormed>(raw: Vec<Value>) -> Vec<T> {
    raw.into_iter()
        .filter_map(|v| serde_json::from_value::<T>(v).ok())
        .filter(WellFormed::is_well_formed)
        .collect()
}

pub fn coerce_one<T: DeserializeOwned + WellFormed>(raw: Option<Value>) -> Option<T> {
    raw.and_then(|v| serde_json::from_value::<T>(v).ok())
        .filter(WellFormed::is_well_formed)
}

// ────────────────────────────────────────────────────────────────────────────
// Questions
// ────────────────────────────────────────────────────────────────────────────

/// Coerces raw question objects, dropping ones without text or skills and
/// repeats of an earlier question. Difficulty is clamped into 1–5, choice
/// questions need two options, and missing or duplicate ids are reassigned
/// as `{id_prefix}-{n}`.
pub fn sanitize_questions(raw: Vec<Value>, id_prefix: &str) -> Vec<AdaptiveQuestion> {
    let mut seen_text: HashSet<String> = HashSet::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut questions = Vec::new();

    for value in raw {
        let Ok(mut q) = serde_json::from_value::<AdaptiveQuestion>(value) else {
            continue;
        };

        q.question = q.question.trim().to_string();
        q.skills_assessed = q
            .skills_assessed
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        q.options = q
            .options
            .into_iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        if q.question.is_empty() || q.skills_assessed.is_empty() {
            continue;
        }
        if q.question_type != QuestionType::Scale && q.options.len() < 2 {
            continue;
        }
        if !seen_text.insert(q.question.to_lowercase()) {
            continue;
        }

        q.difficulty = q.difficulty.clamp(1, 5);
        if q.id.trim().is_empty() || seen_ids.contains(&q.id) {
            q.id = format!("{id_prefix}-{}", questions.len() + 1);
        }
        seen_ids.insert(q.id.clone());
        questions.push(q);
    }

    questions
}

/// Trims a model scenario, caps it at four options and fills missing option
/// ids; `None` when it still is not well formed.
pub fn normalize_scenario(mut scenario: ScenarioVariant) -> Option<ScenarioVariant> {
    scenario.title = scenario.title.trim().to_string();
    scenario.options.truncate(MAX_SCENARIO_OPTIONS);
    for (i, option) in scenario.options.iter_mut().enumerate() {
        if option.id.trim().is_empty() {
            option.id = ((b'a' + i as u8) as char).to_string();
        }
    }
    scenario.follow_up_questions.retain(|q| filled(q));
    scenario.is_well_formed().then_some(scenario)
}

/// Exactly two distinct, non-empty skill names.
pub fn valid_ranking(skills: &[String]) -> bool {
    skills.len() == 2
        && skills.iter().all(|s| filled(s))
        && !skills[0].trim().eq_ignore_ascii_case(skills[1].trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::ScenarioOption;
    use serde_json::json;

    fn option(id: &str, text: &str) -> ScenarioOption {
        ScenarioOption {
            id: id.to_string(),
            text: text.to_string(),
            skills: vec![],
            traits: vec![],
        }
    }

    fn scenario(options: Vec<ScenarioOption>) -> ScenarioVariant {
        ScenarioVariant {
            title: " The Outage ".to_string(),
            context: "Friday evening".to_string(),
            challenge: "Systems are down".to_string(),
            options,
            follow_up_questions: vec!["Why?".to_string(), " ".to_string()],
        }
    }

    #[test]
    fn test_sanitize_drops_questions_without_text_or_skills() {
        let raw = vec![
            json!({"id": "q1", "question": "Good one", "options": ["a", "b"], "skillsAssessed": ["communication"]}),
            json!({"id": "q2", "question": "   ", "options": ["a", "b"], "skillsAssessed": ["communication"]}),
            json!({"id": "q3", "question": "No skills", "options": ["a", "b"], "skillsAssessed": []}),
            json!({"id": "q4", "question": "Too few options", "options": ["a"], "skillsAssessed": ["x"]}),
            json!("not even an object"),
        ];
        let questions = sanitize_questions(raw, "initial");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, "q1");
    }

    #[test]
    fn test_sanitize_allows_scale_without_options() {
        let raw = vec![json!({"question": "Rate yourself", "type": "scale", "skillsAssessed": ["sql"]})];
        let questions = sanitize_questions(raw, "initial");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, "initial-1");
    }

    #[test]
    fn test_sanitize_clamps_difficulty_and_reassigns_duplicate_ids() {
        let raw = vec![
            json!({"id": "q", "question": "One", "options": ["a", "b"], "skillsAssessed": ["x"], "difficulty": 9}),
            json!({"id": "q", "question": "Two", "options": ["a", "b"], "skillsAssessed": ["x"], "difficulty": 0}),
        ];
        let questions = sanitize_questions(raw, "dd");
        assert_eq!(questions[0].difficulty, 5);
        assert_eq!(questions[1].difficulty, 1);
        assert_eq!(questions[1].id, "dd-2");
    }

    #[test]
    fn test_sanitize_drops_repeated_question_text() {
        let raw = vec![
            json!({"question": "Same", "options": ["a", "b"], "skillsAssessed": ["x"]}),
            json!({"question": "same ", "options": ["a", "b"], "skillsAssessed": ["x"]}),
        ];
        assert_eq!(sanitize_questions(raw, "q").len(), 1);
    }

    #[test]
    fn test_normalize_scenario_caps_options_and_fills_ids() {
        let s = scenario(vec![
            option("", "one"),
            option("", "two"),
            option("c", "three"),
            option("d", "four"),
            option("e", "five"),
        ]);
        let s = normalize_scenario(s).expect("well formed");
        assert_eq!(s.title, "The Outage");
        assert_eq!(s.options.len(), 4);
        assert_eq!(s.options[0].id, "a");
        assert_eq!(s.options[1].id, "b");
        assert_eq!(s.follow_up_questions, vec!["Why?"]);
    }

    #[test]
    fn test_question_without_id_key_is_kept() {
        let raw = vec![json!({
            "question": "How do you plan?",
            "options": ["a", "b"],
            "skillsAssessed": ["planning"]
        })];
        let questions = sanitize_questions(raw, "q");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, "q-1");
    }

    #[test]
    fn test_scenario_options_without_id_key_get_letters() {
        let raw = json!({
            "title": "Budget cut",
            "context": "Mid-quarter review",
            "challenge": "Funding drops by a third",
            "options": [
                {"text": "Trim scope"},
                {"text": "Ask for more time"},
                {"text": "Escalate"}
            ]
        });
        let parsed: ScenarioVariant = serde_json::from_value(raw).expect("options parse without ids");
        let s = normalize_scenario(parsed).expect("well formed");
        let ids: Vec<&str> = s.options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_scenario_needs_three_distinct_options() {
        assert!(normalize_scenario(scenario(vec![option("a", "one"), option("b", "two")])).is_none());
        assert!(normalize_scenario(scenario(vec![
            option("a", "one"),
            option("a", "two"),
            option("c", "three"),
        ]))
        .is_none());
    }

    #[test]
    fn test_coerce_items_keeps_valid_entries_only() {
        let raw = vec![
            json!({"skill": "sql", "currentLevel": 30, "requiredLevel": 70, "developmentTime": "3 months"}),
            json!({"skill": "sql", "currentLevel": 130, "requiredLevel": 70, "developmentTime": "3 months"}),
            json!({"skill": "", "currentLevel": 30, "requiredLevel": 70, "developmentTime": "3 months"}),
            json!({"unexpected": true}),
        ];
        let gaps: Vec<SkillGap> = coerce_items(raw);
        assert_eq!(gaps.len(), 1);
    }

    #[test]
    fn test_coerce_one() {
        let good = json!({"demandLevel": "High", "competitionLevel": "Low", "trendingSkills": []});
        assert!(coerce_one::<MarketInsights>(Some(good)).is_some());
        let empty = json!({"demandLevel": "", "competitionLevel": "Low"});
        assert!(coerce_one::<MarketInsights>(Some(empty)).is_none());
        assert!(coerce_one::<MarketInsights>(None).is_none());
    }

    #[test]
    fn test_valid_ranking() {
        let s = |v: &[&str]| v.iter().map(|x| x.to_string()).collect::<Vec<_>>();
        assert!(valid_ranking(&s(&["communication", "leadership"])));
        assert!(!valid_ranking(&s(&["communication"])));
        assert!(!valid_ranking(&s(&["a", "b", "c"])));
        assert!(!valid_ranking(&s(&["Leadership", "leadership "])));
        assert!(!valid_ranking(&s(&["", "leadership"])));
    }
}
