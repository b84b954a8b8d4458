//! Assessment orchestration: one method per quiz step.
//!
//! Flow per method: build prompt → gateway (retry/backoff) → shape check →
//! (on any failure) deterministic or canned fallback → record into session.
//!
//! Methods take the session by `&mut` and never fail. Concurrent sub-calls
//! only read session data captured before the fan-out; every mutation happens
//! after the join.

use std::collections::HashSet;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::assessment::field_profiles::DomainContext;
use crate::assessment::prompt_builder::{
    build_career_fit_prompt, build_deep_dive_prompt, build_initial_questions_prompt,
    build_learning_path_prompt, build_personality_prompt, build_roadmap_prompt,
    build_scenario_analysis_prompt, build_scenario_prompt, build_skill_detail_prompt,
    build_skill_ranking_prompt,
};
use crate::assessment::shape::{
    coerce_items, coerce_one, normalize_scenario, sanitize_questions, valid_ranking,
    CareerFitDraft, LearningPathPayload, PersonalityPayload, QuestionsPayload, RoadmapPayload,
    SkillRankingPayload, WellFormed,
};
use crate::assessment::top_skills::{heuristic_top_skills, pad_to_two};
use crate::config::Config;
use crate::fallback::content;
use crate::llm_client::{GatewayOutcome, ModelGateway};
use crate::models::analysis::{CareerAnalysis, ScenarioAnalysis, SkillDetail};
use crate::models::assessment::{
    AdaptiveQuestion, AnswerValue, ChosenOption, QuizResponse, ScenarioChoice, ScenarioVariant,
};
use crate::models::profile::UserProfile;
use crate::session::{AssessmentSession, Stage};

#[derive(Debug, Clone)]
pub struct AssessmentSettings {
    pub initial_questions_per_skill: usize,
    /// Fixed length of the deep-dive round, split evenly across the two top skills.
    pub deep_dive_question_count: usize,
    /// Pause between sequential skill-detail requests.
    pub skill_detail_delay: Duration,
}

impl Default for AssessmentSettings {
    fn default() -> Self {
        Self {
            initial_questions_per_skill: 3,
            deep_dive_question_count: 30,
            skill_detail_delay: Duration::from_millis(1500),
        }
    }
}

impl AssessmentSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            deep_dive_question_count: config.deep_dive_question_count,
            skill_detail_delay: Duration::from_millis(config.skill_detail_delay_ms),
            ..Self::default()
        }
    }
}

#[derive(Clone)]
pub struct AssessmentService {
    gateway: ModelGateway,
    settings: AssessmentSettings,
}

impl AssessmentService {
    pub fn new(gateway: ModelGateway, settings: AssessmentSettings) -> Self {
        Self { gateway, settings }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Questions
    // ────────────────────────────────────────────────────────────────────────

    /// First-round questions, `initial_questions_per_skill` for each skill.
    pub async fn generate_initial_questions(
        &self,
        session: &mut AssessmentSession,
        skills: &[String],
    ) -> Vec<AdaptiveQuestion> {
        let skills = content::skills_or_default(skills);
        let per_skill = self.settings.initial_questions_per_skill;

        let (prompt, avoid) = {
            let avoid = session.recent_items(&[Stage::InitialQuestions, Stage::DeepDive]);
            (
                build_initial_questions_prompt(&skills, per_skill, &avoid),
                lowercase_set(&avoid),
            )
        };

        let model = match self.gateway.generate_json::<QuestionsPayload>(&prompt).await {
            GatewayOutcome::Parsed(payload) => {
                let questions = sanitize_questions(payload.questions, "q");
                if questions.is_empty() {
                    warn!("Initial questions: reply had no usable questions, using fallback");
                }
                questions
            }
            outcome => {
                log_fallback("Initial questions", &outcome);
                Vec::new()
            }
        };

        let questions = if model.is_empty() {
            content::initial_questions(&skills, per_skill)
        } else {
            fill_buckets(bucket_by_skill(model, &skills, &avoid), &skills, per_skill)
        };

        info!(
            "Generated {} initial questions for {} skill(s)",
            questions.len(),
            skills.len()
        );
        session.record_generated(Stage::InitialQuestions, question_texts(&questions));
        questions
    }

    /// Exactly two skills, strongest first.
    pub async fn find_top_skills(
        &self,
        session: &mut AssessmentSession,
        responses: &[QuizResponse],
    ) -> Vec<String> {
        session.record_answers(responses);

        let top = if responses.is_empty() {
            debug!("Top skills: no responses, using defaults");
            heuristic_top_skills(responses)
        } else {
            let skills = distinct_skill_tags(responses);
            let prompt = build_skill_ranking_prompt(&skills, responses);
            match self.gateway.generate_json::<SkillRankingPayload>(&prompt).await {
                GatewayOutcome::Parsed(payload) if valid_ranking(&payload.top_skills) => {
                    debug!("Top skills reasoning: {}", payload.reasoning);
                    payload.top_skills.iter().map(|s| s.trim().to_string()).collect()
                }
                outcome => {
                    log_fallback("Top skills", &outcome);
                    heuristic_top_skills(responses)
                }
            }
        };

        info!("Top skills: {}", top.join(", "));
        session.record_generated(Stage::SkillRanking, top.clone());
        top
    }

    /// Advanced questions for the two top skills, always exactly
    /// `deep_dive_question_count` long. Both skills are requested concurrently.
    pub async fn generate_deep_dive_questions(
        &self,
        session: &mut AssessmentSession,
        top_skills: &[String],
        prior: &[QuizResponse],
    ) -> Vec<AdaptiveQuestion> {
        let top = pad_to_two(top_skills.to_vec());
        let total = self.settings.deep_dive_question_count;
        let shares = [total - total / 2, total / 2];

        let (prompts, avoid) = {
            let avoid = session.recent_items(&[Stage::InitialQuestions, Stage::DeepDive]);
            let prompts: Vec<String> = top
                .iter()
                .zip(shares)
                .map(|(skill, count)| build_deep_dive_prompt(skill, count, prior, &avoid))
                .collect();
            (prompts, lowercase_set(&avoid))
        };

        let outcomes = join_all(
            prompts
                .iter()
                .map(|p| self.gateway.generate_json::<QuestionsPayload>(p)),
        )
        .await;

        let mut seen = avoid;
        let mut questions = Vec::with_capacity(total);
        for ((skill, count), outcome) in top.iter().zip(shares).zip(outcomes) {
            let mut batch: Vec<AdaptiveQuestion> = match outcome {
                GatewayOutcome::Parsed(payload) => {
                    sanitize_questions(payload.questions, &format!("dd-{}", slugish(skill)))
                }
                outcome => {
                    log_fallback("Deep-dive questions", &outcome);
                    Vec::new()
                }
            };

            batch.retain(|q| seen.insert(q.question.to_lowercase()));
            batch.truncate(count);
            for q in &mut batch {
                if !q.skills_assessed.iter().any(|s| s.eq_ignore_ascii_case(skill)) {
                    q.skills_assessed.insert(0, skill.clone());
                }
                q.difficulty = q.difficulty.max(3);
            }

            let missing = count - batch.len();
            if missing > 0 {
                warn!("Deep-dive questions: padding {missing} for '{skill}' from fallback");
                batch.extend(content::deep_dive_questions(skill, batch.len(), missing));
            }
            questions.extend(batch);
        }

        info!("Generated {} deep-dive questions", questions.len());
        session.record_answers(prior);
        session.record_generated(Stage::DeepDive, question_texts(&questions));
        questions
    }

    // ────────────────────────────────────────────────────────────────────────
    // Scenarios
    // ────────────────────────────────────────────────────────────────────────

    pub async fn generate_workplace_scenario(
        &self,
        session: &mut AssessmentSession,
        field: &str,
        niche: Option<&str>,
    ) -> ScenarioVariant {
        match self
            .generate_workplace_scenarios(session, 1, field, niche)
            .await
            .pop()
        {
            Some(scenario) => scenario,
            None => session.next_fallback_scenario(field),
        }
    }

    /// `count` scenarios requested concurrently, each around a different
    /// challenge type. Invalid replies and titles already issued in this session
    /// (or earlier in the batch) are replaced with canned scenarios.
    pub async fn generate_workplace_scenarios(
        &self,
        session: &mut AssessmentSession,
        count: usize,
        field: &str,
        niche: Option<&str>,
    ) -> Vec<ScenarioVariant> {
        let domain = DomainContext::resolve(field, niche);
        let focus_offset = session.issued_titles(field).len();
        let prompts: Vec<String> = {
            let avoid: Vec<String> = session
                .recent_items(&[Stage::Scenario])
                .into_iter()
                .map(str::to_string)
                .collect();
            (0..count)
                .map(|i| build_scenario_prompt(&domain, domain.challenge_focus(focus_offset + i), &avoid))
                .collect()
        };

        let outcomes = join_all(
            prompts
                .iter()
                .map(|p| self.gateway.generate_json::<ScenarioVariant>(p)),
        )
        .await;

        let mut scenarios = Vec::with_capacity(count);
        for outcome in outcomes {
            let candidate = match outcome {
                GatewayOutcome::Parsed(raw) => {
                    let normalized = normalize_scenario(raw);
                    if normalized.is_none() {
                        warn!("Workplace scenario: reply failed shape check, using canned scenario");
                    }
                    normalized
                }
                outcome => {
                    log_fallback("Workplace scenario", &outcome);
                    None
                }
            };

            let scenario = match candidate {
                Some(s) if !session.is_title_issued(field, &s.title) => s,
                Some(s) => {
                    warn!("Workplace scenario: title '{}' already issued, using canned scenario", s.title);
                    session.next_fallback_scenario(field)
                }
                None => session.next_fallback_scenario(field),
            };
            session.mark_title_issued(field, &scenario.title);
            scenarios.push(scenario);
        }

        info!(
            "Generated {} workplace scenario(s) for {}",
            scenarios.len(),
            domain.field_name
        );
        let titles = scenarios.iter().map(|s| s.title.clone()).collect();
        session.record_generated(Stage::Scenario, titles);
        scenarios
    }

    pub async fn analyze_scenario_responses(
        &self,
        session: &mut AssessmentSession,
        field: &str,
        niche: Option<&str>,
        choices: &[ScenarioChoice],
    ) -> ScenarioAnalysis {
        let analysis = if choices.is_empty() {
            debug!("Scenario analysis: no choices, using fallback");
            content::scenario_analysis(field, choices)
        } else {
            let domain = DomainContext::resolve(field, niche);
            let prompt = build_scenario_analysis_prompt(&domain, choices);
            match self.gateway.generate_json::<ScenarioAnalysis>(&prompt).await {
                GatewayOutcome::Parsed(analysis) if analysis.is_well_formed() => analysis,
                outcome => {
                    log_fallback("Scenario analysis", &outcome);
                    content::scenario_analysis(field, choices)
                }
            }
        };

        session.record_answers(&choices_as_responses(choices));
        session.record_generated(Stage::ScenarioAnalysis, vec![analysis.summary.clone()]);
        analysis
    }

    // ────────────────────────────────────────────────────────────────────────
    // Results
    // ────────────────────────────────────────────────────────────────────────

    /// Up to two skill dossiers, requested one after another.
    pub async fn generate_skill_details(
        &self,
        session: &mut AssessmentSession,
        top_skills: &[String],
        responses: &[QuizResponse],
        profile: &UserProfile,
    ) -> Vec<SkillDetail> {
        let details = self.skill_details(top_skills, responses, profile).await;
        session.record_answers(responses);
        session.record_generated(
            Stage::SkillDetails,
            details.iter().map(|d| d.skill.clone()).collect(),
        );
        details
    }

    async fn skill_details(
        &self,
        top_skills: &[String],
        responses: &[QuizResponse],
        profile: &UserProfile,
    ) -> Vec<SkillDetail> {
        let skills: Vec<String> = content::skills_or_default(top_skills).into_iter().take(2).collect();
        let mut details = Vec::with_capacity(skills.len());

        for (i, skill) in skills.iter().enumerate() {
            if i > 0 && !self.settings.skill_detail_delay.is_zero() {
                tokio::time::sleep(self.settings.skill_detail_delay).await;
            }

            let evidence: Vec<QuizResponse> = responses
                .iter()
                .filter(|r| r.skills.iter().any(|s| s.eq_ignore_ascii_case(skill)))
                .cloned()
                .collect();
            let prompt = build_skill_detail_prompt(skill, profile, &evidence);

            let detail = match self.gateway.generate_json::<SkillDetail>(&prompt).await {
                GatewayOutcome::Parsed(mut detail) if detail.is_well_formed() => {
                    detail.skill = skill.clone();
                    detail
                }
                outcome => {
                    log_fallback("Skill details", &outcome);
                    content::skill_detail(skill, profile)
                }
            };
            details.push(detail);
        }

        details
    }

    /// Full career analysis. The core analysis, learning path, personality
    /// profile, roadmap and skill dossiers are requested concurrently and merged;
    /// anything missing from the model is taken from the deterministic analysis.
    pub async fn analyze_career_fit(
        &self,
        session: &mut AssessmentSession,
        top_skills: &[String],
        responses: &[QuizResponse],
        profile: &UserProfile,
    ) -> CareerAnalysis {
        let top = pad_to_two(top_skills.to_vec());
        let domain = DomainContext::resolve(profile.field_or_default(), profile.niche.as_deref());

        let core_prompt = build_career_fit_prompt(&top, profile, &domain, responses);
        let learning_prompt = build_learning_path_prompt(&top, profile);
        let personality_prompt = build_personality_prompt(&top, responses);
        let roadmap_prompt = build_roadmap_prompt(&top, profile);

        let (core, learning, personality, roadmap, skill_details) = tokio::join!(
            self.gateway.generate_json::<CareerFitDraft>(&core_prompt),
            self.gateway.generate_json::<LearningPathPayload>(&learning_prompt),
            self.gateway.generate_json::<PersonalityPayload>(&personality_prompt),
            self.gateway.generate_json::<RoadmapPayload>(&roadmap_prompt),
            self.skill_details(&top, responses, profile),
        );

        let mut analysis = content::career_analysis(&top, responses, profile);
        analysis.skill_details = skill_details;

        match core {
            GatewayOutcome::Parsed(draft) => merge_core(&mut analysis, draft),
            outcome => log_fallback("Career analysis", &outcome),
        }
        match learning {
            GatewayOutcome::Parsed(p) => {
                replace_if_any(&mut analysis.learning_path, coerce_items(p.learning_path), "learning path")
            }
            outcome => log_fallback("Learning path", &outcome),
        }
        match personality {
            GatewayOutcome::Parsed(p) => replace_if_any(
                &mut analysis.personality_traits,
                coerce_items(p.personality_traits),
                "personality profile",
            ),
            outcome => log_fallback("Personality profile", &outcome),
        }
        match roadmap {
            GatewayOutcome::Parsed(p) => {
                replace_if_any(&mut analysis.roadmap, coerce_items(p.roadmap), "roadmap")
            }
            outcome => log_fallback("Roadmap", &outcome),
        }

        info!(
            "Career analysis ready: score {}, {} recommendation(s)",
            analysis.overall_score,
            analysis.career_recommendations.len()
        );
        session.record_answers(responses);
        session.record_generated(
            Stage::CareerAnalysis,
            analysis
                .career_recommendations
                .iter()
                .map(|r| r.title.clone())
                .collect(),
        );
        analysis
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn log_fallback<T>(stage: &str, outcome: &GatewayOutcome<T>) {
    match outcome {
        GatewayOutcome::QuotaExhausted => {
            warn!("{stage}: model quota exhausted, using fallback")
        }
        GatewayOutcome::Failed(e) => warn!("{stage}: model call failed ({e}), using fallback"),
        GatewayOutcome::Parsed(_) => {
            warn!("{stage}: reply failed shape check, using fallback")
        }
    }
}

fn merge_core(analysis: &mut CareerAnalysis, draft: CareerFitDraft) {
    if let Some(score) = draft.overall_score.filter(|s| s.is_finite()) {
        analysis.overall_score = score.round().clamp(0.0, 100.0) as u8;
    }
    let strengths: Vec<String> = draft
        .top_strengths
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    replace_if_any(&mut analysis.top_strengths, strengths, "top strengths");
    replace_if_any(&mut analysis.skill_gaps, coerce_items(draft.skill_gaps), "skill gaps");
    replace_if_any(
        &mut analysis.career_recommendations,
        coerce_items(draft.career_recommendations),
        "career recommendations",
    );
    match coerce_one(draft.market_insights) {
        Some(insights) => analysis.market_insights = insights,
        None => warn!("Career analysis: market insights missing, using fallback"),
    }
}

fn replace_if_any<T>(slot: &mut Vec<T>, model: Vec<T>, part: &str) {
    if model.is_empty() {
        warn!("Career analysis: {part} missing or malformed, using fallback");
    } else {
        *slot = model;
    }
}

/// Takes `per_skill` questions from each bucket, padding short ones from the
/// deterministic set.
fn fill_buckets(
    buckets: Vec<Vec<AdaptiveQuestion>>,
    skills: &[String],
    per_skill: usize,
) -> Vec<AdaptiveQuestion> {
    skills
        .iter()
        .zip(buckets)
        .flat_map(|(skill, mut bucket)| {
            bucket.truncate(per_skill);
            let missing = per_skill - bucket.len();
            if missing > 0 {
                debug!("Padding {missing} initial question(s) for '{skill}'");
            }
            let pad = content::initial_questions_for(skill, bucket.len(), missing);
            bucket.into_iter().chain(pad)
        })
        .collect()
}

/// Groups questions under the first requested skill they assess, skipping
/// questions already asked in this session.
fn bucket_by_skill(
    questions: Vec<AdaptiveQuestion>,
    skills: &[String],
    asked: &HashSet<String>,
) -> Vec<Vec<AdaptiveQuestion>> {
    let mut buckets: Vec<Vec<AdaptiveQuestion>> = vec![Vec::new(); skills.len()];
    for q in questions {
        if asked.contains(&q.question.to_lowercase()) {
            continue;
        }
        let slot = skills
            .iter()
            .position(|skill| q.skills_assessed.iter().any(|s| s.eq_ignore_ascii_case(skill)));
        if let Some(i) = slot {
            buckets[i].push(q);
        }
    }
    buckets
}

fn distinct_skill_tags(responses: &[QuizResponse]) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for skill in responses.iter().flat_map(|r| r.skills.iter()) {
        let skill = skill.trim();
        if !skill.is_empty() && !skills.iter().any(|s| s.eq_ignore_ascii_case(skill)) {
            skills.push(skill.to_string());
        }
    }
    skills
}

fn choices_as_responses(choices: &[ScenarioChoice]) -> Vec<QuizResponse> {
    choices
        .iter()
        .map(|c| QuizResponse {
            question: c.scenario_title.clone(),
            answer: AnswerValue::Choice(ChosenOption {
                id: c.selected.id.clone(),
                text: c.selected.text.clone(),
            }),
            reasoning: c.reasoning.clone(),
            skills: c.selected.skills.clone(),
            timestamp: chrono::Utc::now(),
        })
        .collect()
}

fn question_texts(questions: &[AdaptiveQuestion]) -> Vec<String> {
    questions.iter().map(|q| q.question.clone()).collect()
}

fn lowercase_set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

fn slugish(skill: &str) -> String {
    skill
        .trim()
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
