//! Top-skill ranking heuristic: used when the model cannot rank skills.
//!
//! Algorithm:
//! 1. Score every response 0–100:
//!    - numeric answers on the 1–5 scale → linear rescale (1 → 0, 5 → 100);
//!      larger numbers are read as percentages and clamped
//!    - text answers start at 50 and move with confidence vocabulary
//! 2. Every skill tag on the response receives that score
//! 3. Skill score = mean of its response scores; rank descending, ties keep first-seen order
//! 4. Pad with defaults so exactly two skills come back

use serde::Serialize;
use tracing::debug;

use crate::models::assessment::{AnswerValue, QuizResponse};

pub const TOP_SKILL_COUNT: usize = 2;

/// Returned when the responses do not name enough skills.
pub const DEFAULT_TOP_SKILLS: [&str; TOP_SKILL_COUNT] = ["communication", "problem-solving"];

const NEUTRAL_SCORE: f64 = 50.0;

/// Confidence vocabulary and its effect on a text answer's score.
/// Negated phrases are listed before the words they contain and consume them.
const CONFIDENCE_TERMS: &[(&str, f64)] = &[
    ("not confident", -20.0),
    ("not comfortable", -15.0),
    ("expert", 30.0),
    ("advanced", 25.0),
    ("confident", 20.0),
    ("experienced", 20.0),
    ("proficient", 20.0),
    ("comfortable", 10.0),
    ("some experience", 5.0),
    ("beginner", -20.0),
    ("unsure", -20.0),
    ("struggle", -15.0),
    ("never", -25.0),
];

/// Mean confidence score for one skill, kept for transparency in logs.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkillScore {
    pub skill: String,
    pub score: f64,
    pub evidence_count: usize,
}

/// Scores a single answer 0–100.
pub fn score_answer(answer: &AnswerValue) -> f64 {
    match answer {
        AnswerValue::Number(n) => rescale_number(*n),
        other => other.as_text().map_or(NEUTRAL_SCORE, score_text),
    }
}

fn rescale_number(n: f64) -> f64 {
    if !n.is_finite() {
        return NEUTRAL_SCORE;
    }
    if n <= 5.0 {
        ((n - 1.0) / 4.0 * 100.0).clamp(0.0, 100.0)
    } else {
        n.clamp(0.0, 100.0)
    }
}

fn score_text(text: &str) -> f64 {
    let mut remaining = text.to_lowercase();
    let mut score = NEUTRAL_SCORE;
    for (term, delta) in CONFIDENCE_TERMS {
        if remaining.contains(term) {
            score += delta;
            remaining = remaining.replace(term, " ");
        }
    }
    score.clamp(0.0, 100.0)
}

/// Mean score per skill tag, sorted strongest first.
pub fn rank_skills(responses: &[QuizResponse]) -> Vec<SkillScore> {
    let mut totals: Vec<(String, f64, usize)> = Vec::new();

    for response in responses {
        let score = score_answer(&response.answer);
        for skill in &response.skills {
            let skill = skill.trim();
            if skill.is_empty() {
                continue;
            }
            match totals.iter_mut().find(|(s, _, _)| s.eq_ignore_ascii_case(skill)) {
                Some((_, sum, count)) => {
                    *sum += score;
                    *count += 1;
                }
                None => totals.push((skill.to_string(), score, 1)),
            }
        }
    }

    let mut ranked: Vec<SkillScore> = totals
        .into_iter()
        .map(|(skill, sum, count)| SkillScore {
            skill,
            score: sum / count as f64,
            evidence_count: count,
        })
        .collect();

    // Stable sort keeps first-seen order for ties
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

/// Exactly two skill names, strongest first, padded with defaults.
pub fn heuristic_top_skills(responses: &[QuizResponse]) -> Vec<String> {
    let ranked = rank_skills(responses);
    for s in &ranked {
        debug!(
            "Heuristic score for '{}': {:.1} from {} answer(s)",
            s.skill, s.score, s.evidence_count
        );
    }
    pad_to_two(ranked.into_iter().map(|s| s.skill).collect())
}

/// Truncates or pads a skill list to exactly two distinct entries.
pub fn pad_to_two(skills: Vec<String>) -> Vec<String> {
    let mut top: Vec<String> = Vec::with_capacity(TOP_SKILL_COUNT);
    for skill in skills
        .into_iter()
        .chain(DEFAULT_TOP_SKILLS.iter().map(|s| s.to_string()))
    {
        if top.len() == TOP_SKILL_COUNT {
            break;
        }
        if !skill.trim().is_empty() && !top.iter().any(|t| t.eq_ignore_ascii_case(&skill)) {
            top.push(skill);
        }
    }
    top
}

/// Mean confidence across every response, 0–100; `None` without responses.
pub fn overall_confidence(responses: &[QuizResponse]) -> Option<f64> {
    if responses.is_empty() {
        return None;
    }
    let total: f64 = responses.iter().map(|r| score_answer(&r.answer)).sum();
    Some(total / responses.len() as f64)
}
