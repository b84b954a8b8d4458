//! Per-quiz session state.
//!
//! An `AssessmentSession` is created when a quiz starts, handed by `&mut` to
//! every orchestration call and dropped when the quiz ends or goes idle. It
//! replaces any process-wide history: two sessions never see each other's
//! questions or scenario picks.

pub mod store;

use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Instant;
use uuid::Uuid;

use crate::assessment::field_profiles::canonical_field;
use crate::fallback::scenario_bag::ScenarioTracker;
use crate::fallback::scenario_catalog::catalog_for;
use crate::models::assessment::{QuizResponse, ScenarioVariant};

/// Exchanges kept for "avoid repeating" prompts; older ones are dropped.
pub const HISTORY_LIMIT: usize = 20;

/// Which orchestration step produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    InitialQuestions,
    SkillRanking,
    DeepDive,
    Scenario,
    ScenarioAnalysis,
    SkillDetails,
    CareerAnalysis,
}

#[derive(Debug, Clone)]
pub enum Exchange {
    /// Question texts, scenario titles or skill names handed to the user.
    Generated { stage: Stage, items: Vec<String> },
    /// Answers submitted with one orchestration call.
    Answered(Vec<QuizResponse>),
}

#[derive(Debug)]
pub struct AssessmentSession {
    pub id: Uuid,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    last_active: Instant,
    history: VecDeque<Exchange>,
    /// Lower-cased titles per canonical field.
    issued_titles: HashMap<&'static str, HashSet<String>>,
    scenarios: ScenarioTracker,
}

impl AssessmentSession {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self::with_tracker(display_name.into(), ScenarioTracker::from_entropy())
    }

    /// A session whose canned-scenario picks are reproducible.
    pub fn with_seed(display_name: impl Into<String>, seed: u64) -> Self {
        Self::with_tracker(display_name.into(), ScenarioTracker::seeded(seed))
    }

    fn with_tracker(display_name: String, scenarios: ScenarioTracker) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name,
            created_at: Utc::now(),
            last_active: Instant::now(),
            history: VecDeque::with_capacity(HISTORY_LIMIT),
            issued_titles: HashMap::new(),
            scenarios,
        }
    }

    fn push(&mut self, exchange: Exchange) {
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(exchange);
        self.touch();
    }

    pub fn record_generated(&mut self, stage: Stage, items: Vec<String>) {
        if items.is_empty() {
            return;
        }
        self.push(Exchange::Generated { stage, items });
    }

    pub fn record_answers(&mut self, answers: &[QuizResponse]) {
        if answers.is_empty() {
            return;
        }
        self.push(Exchange::Answered(answers.to_vec()));
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Items generated by the given stages, oldest first.
    pub fn recent_items(&self, stages: &[Stage]) -> Vec<&str> {
        self.history
            .iter()
            .filter_map(|exchange| match exchange {
                Exchange::Generated { stage, items } if stages.contains(stage) => Some(items),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Answers still held in history, oldest first.
    pub fn recent_answers(&self) -> Vec<&QuizResponse> {
        self.history
            .iter()
            .filter_map(|exchange| match exchange {
                Exchange::Answered(answers) => Some(answers),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn is_title_issued(&self, field: &str, title: &str) -> bool {
        self.issued_titles
            .get(canonical_field(field))
            .is_some_and(|titles| titles.contains(&normalize_title(title)))
    }

    pub fn mark_title_issued(&mut self, field: &str, title: &str) {
        self.issued_titles
            .entry(canonical_field(field))
            .or_default()
            .insert(normalize_title(title));
    }

    /// Titles already shown for `field`, sorted for stable prompts.
    pub fn issued_titles(&self, field: &str) -> Vec<String> {
        let mut titles: Vec<String> = self
            .issued_titles
            .get(canonical_field(field))
            .map(|t| t.iter().cloned().collect())
            .unwrap_or_default();
        titles.sort();
        titles
    }

    /// Next canned scenario for `field`. Prefers titles not yet issued in this
    /// session; once every catalog entry has been issued, repeats are served.
    pub fn next_fallback_scenario(&mut self, field: &str) -> ScenarioVariant {
        let attempts = catalog_for(canonical_field(field)).len();
        let mut pick = self.scenarios.next_scenario(field);
        for _ in 1..attempts {
            if !self.is_title_issued(field, &pick.title) {
                break;
            }
            pick = self.scenarios.next_scenario(field);
        }
        pick
    }

    /// Forgets every canned pick and issued title so the whole catalog is
    /// eligible again.
    pub fn reset_scenario_tracking(&mut self) {
        self.scenarios.reset();
        self.issued_titles.clear();
        self.touch();
    }

    pub fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_active.elapsed()
    }
}

fn normalize_title(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::AnswerValue;

    fn answer(question: &str) -> QuizResponse {
        QuizResponse {
            question: question.to_string(),
            answer: AnswerValue::Number(3.0),
            reasoning: None,
            skills: vec!["communication".to_string()],
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_history_keeps_only_most_recent_entries() {
        let mut session = AssessmentSession::with_seed("Ada", 1);
        for i in 0..(HISTORY_LIMIT + 5) {
            session.record_generated(Stage::InitialQuestions, vec![format!("q{i}")]);
        }
        assert_eq!(session.history_len(), HISTORY_LIMIT);

        let items = session.recent_items(&[Stage::InitialQuestions]);
        assert_eq!(items.first(), Some(&"q5"));
        assert_eq!(items.last(), Some(&"q24"));
    }

    #[test]
    fn test_empty_records_are_ignored() {
        let mut session = AssessmentSession::with_seed("Ada", 1);
        session.record_generated(Stage::DeepDive, vec![]);
        session.record_answers(&[]);
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn test_recent_items_filters_by_stage() {
        let mut session = AssessmentSession::with_seed("Ada", 1);
        session.record_generated(Stage::InitialQuestions, vec!["q1".to_string()]);
        session.record_generated(Stage::Scenario, vec!["The Outage".to_string()]);
        session.record_answers(&[answer("q1")]);

        assert_eq!(session.recent_items(&[Stage::Scenario]), vec!["The Outage"]);
        assert_eq!(
            session.recent_items(&[Stage::InitialQuestions, Stage::Scenario]),
            vec!["q1", "The Outage"]
        );
        assert_eq!(session.recent_answers().len(), 1);
    }

    #[test]
    fn test_issued_titles_are_per_field_and_case_insensitive() {
        let mut session = AssessmentSession::with_seed("Ada", 1);
        session.mark_title_issued("Tech", "The  Midnight Deployment");

        assert!(session.is_title_issued("technology", "the midnight deployment"));
        assert!(!session.is_title_issued("healthcare", "The Midnight Deployment"));
        assert_eq!(session.issued_titles("IT"), vec!["the midnight deployment"]);
    }

    #[test]
    fn test_fallback_scenario_skips_titles_already_issued() {
        let mut session = AssessmentSession::with_seed("Ada", 9);
        let catalog = catalog_for("education");
        for scenario in &catalog[1..] {
            session.mark_title_issued("education", scenario.title);
        }
        let pick = session.next_fallback_scenario("education");
        assert_eq!(pick.title, catalog[0].title);
    }

    #[test]
    fn test_fallback_scenario_repeats_once_everything_is_issued() {
        let mut session = AssessmentSession::with_seed("Ada", 9);
        for scenario in catalog_for("business") {
            session.mark_title_issued("business", scenario.title);
        }
        let pick = session.next_fallback_scenario("business");
        assert!(catalog_for("business").iter().any(|s| s.title == pick.title));
    }

    #[test]
    fn test_reset_clears_titles_and_picks() {
        let mut session = AssessmentSession::with_seed("Ada", 2);
        let first = session.next_fallback_scenario("creative");
        session.mark_title_issued("creative", &first.title);

        session.reset_scenario_tracking();
        assert!(session.issued_titles("creative").is_empty());
        assert!(!session.is_title_issued("creative", &first.title));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_time_tracks_last_activity() {
        let mut session = AssessmentSession::with_seed("Ada", 1);
        tokio::time::advance(Duration::from_secs(30)).await;
        assert!(session.idle_for() >= Duration::from_secs(30));

        session.touch();
        assert!(session.idle_for() < Duration::from_secs(1));
    }
}
