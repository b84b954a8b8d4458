//! Prompt Builder: pure functions that turn stage inputs into prompt text.
//!
//! Each builder picks a role preamble, fills the stage template and appends the
//! shared JSON-only instruction. Templates are filled in a single pass, so
//! placeholder-like text inside a skill name, profile or answer is never expanded.

use serde_json::json;

use crate::assessment::field_profiles::DomainContext;
use crate::assessment::prompts::{
    CAREER_ANALYST_ROLE, CAREER_FIT_TEMPLATE, DEEP_DIVE_TEMPLATE, INITIAL_QUESTIONS_TEMPLATE,
    LEARNING_PATH_TEMPLATE, MARKET_RESEARCHER_ROLE, PERSONALITY_TEMPLATE,
    QUESTION_DESIGNER_ROLE, ROADMAP_TEMPLATE, SCENARIO_ANALYSIS_TEMPLATE, SCENARIO_TEMPLATE,
    SCENARIO_WRITER_ROLE, SKILL_DETAIL_TEMPLATE, SKILL_RANKING_TEMPLATE,
};
use crate::llm_client::prompts::{AUDIENCE_INSTRUCTION, JSON_ONLY_INSTRUCTION};
use crate::models::assessment::{QuizResponse, ScenarioChoice};
use crate::models::profile::UserProfile;

/// Most recent entries listed in an "avoid repeating" block.
const MAX_AVOID_ITEMS: usize = 40;

pub fn build_initial_questions_prompt(skills: &[String], per_skill: usize, avoid: &[&str]) -> String {
    fill(
        INITIAL_QUESTIONS_TEMPLATE,
        &[
            ("role", QUESTION_DESIGNER_ROLE),
            ("audience", AUDIENCE_INSTRUCTION),
            ("json_instruction", JSON_ONLY_INSTRUCTION),
            ("count", &(skills.len() * per_skill).to_string()),
            ("per_skill", &per_skill.to_string()),
            ("skills", &skills.join(", ")),
            ("avoid", &avoid_list(avoid)),
        ],
    )
}

pub fn build_skill_ranking_prompt(skills: &[String], responses: &[QuizResponse]) -> String {
    fill(
        SKILL_RANKING_TEMPLATE,
        &[
            ("role", CAREER_ANALYST_ROLE),
            ("json_instruction", JSON_ONLY_INSTRUCTION),
            ("skills", &skills.join(", ")),
            ("responses_json", &responses_json(responses)),
        ],
    )
}

pub fn build_deep_dive_prompt(
    skill: &str,
    count: usize,
    prior: &[QuizResponse],
    avoid: &[&str],
) -> String {
    fill(
        DEEP_DIVE_TEMPLATE,
        &[
            ("role", QUESTION_DESIGNER_ROLE),
            ("json_instruction", JSON_ONLY_INSTRUCTION),
            ("count", &count.to_string()),
            ("skill", skill),
            ("avoid", &avoid_list(avoid)),
            ("prior_json", &responses_json(prior)),
        ],
    )
}

/// One workplace scenario centred on `focus`, one of the domain's challenge types.
pub fn build_scenario_prompt(domain: &DomainContext, focus: &str, avoid_titles: &[String]) -> String {
    let niche_line = domain
        .niche_name
        .map(|n| format!("The person specialises in {n}; set the scenario in that niche."))
        .unwrap_or_default();
    let avoid: Vec<&str> = avoid_titles.iter().map(String::as_str).collect();

    fill(
        SCENARIO_TEMPLATE,
        &[
            ("role", SCENARIO_WRITER_ROLE),
            ("json_instruction", JSON_ONLY_INSTRUCTION),
            ("field", domain.field_name),
            ("niche_line", &niche_line),
            ("vocabulary", &domain.vocabulary.join(", ")),
            ("stakeholders", &domain.stakeholders.join(", ")),
            ("focus", focus),
            ("avoid", &avoid_list(&avoid)),
        ],
    )
}

pub fn build_scenario_analysis_prompt(domain: &DomainContext, choices: &[ScenarioChoice]) -> String {
    let choices_json = serde_json::to_string_pretty(choices).unwrap_or_else(|_| "[]".to_string());

    fill(
        SCENARIO_ANALYSIS_TEMPLATE,
        &[
            ("role", CAREER_ANALYST_ROLE),
            ("json_instruction", JSON_ONLY_INSTRUCTION),
            ("field", domain.field_name),
            ("domain_context", &domain.summary()),
            ("choices_json", &choices_json),
        ],
    )
}

/// Dossier prompt; `evidence` are the answers tagged with this skill.
pub fn build_skill_detail_prompt(skill: &str, profile: &UserProfile, evidence: &[QuizResponse]) -> String {
    fill(
        SKILL_DETAIL_TEMPLATE,
        &[
            ("role", MARKET_RESEARCHER_ROLE),
            ("json_instruction", JSON_ONLY_INSTRUCTION),
            ("skill", skill),
            ("profile_line", &profile_line(profile)),
            ("evidence_json", &responses_json(evidence)),
        ],
    )
}

pub fn build_career_fit_prompt(
    top_skills: &[String],
    profile: &UserProfile,
    domain: &DomainContext,
    responses: &[QuizResponse],
) -> String {
    fill(
        CAREER_FIT_TEMPLATE,
        &[
            ("role", CAREER_ANALYST_ROLE),
            ("json_instruction", JSON_ONLY_INSTRUCTION),
            ("top_skills", &top_skills.join(", ")),
            ("domain_context", &domain.summary()),
            ("profile_line", &profile_line(profile)),
            ("responses_json", &responses_json(responses)),
        ],
    )
}

pub fn build_learning_path_prompt(top_skills: &[String], profile: &UserProfile) -> String {
    fill(
        LEARNING_PATH_TEMPLATE,
        &[
            ("role", MARKET_RESEARCHER_ROLE),
            ("json_instruction", JSON_ONLY_INSTRUCTION),
            ("top_skills", &top_skills.join(", ")),
            ("profile_line", &profile_line(profile)),
        ],
    )
}

pub fn build_personality_prompt(top_skills: &[String], responses: &[QuizResponse]) -> String {
    fill(
        PERSONALITY_TEMPLATE,
        &[
            ("role", CAREER_ANALYST_ROLE),
            ("json_instruction", JSON_ONLY_INSTRUCTION),
            ("top_skills", &top_skills.join(", ")),
            ("responses_json", &responses_json(responses)),
        ],
    )
}

pub fn build_roadmap_prompt(top_skills: &[String], profile: &UserProfile) -> String {
    fill(
        ROADMAP_TEMPLATE,
        &[
            ("role", CAREER_ANALYST_ROLE),
            ("json_instruction", JSON_ONLY_INSTRUCTION),
            ("top_skills", &top_skills.join(", ")),
            ("profile_line", &profile_line(profile)),
        ],
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Fragments
// ────────────────────────────────────────────────────────────────────────────

/// Substitutes every `{name}` in `template` from `vars` in one left-to-right
/// pass. Substituted text is never rescanned; unknown braces are kept as is.
fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let hit = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (close, *value))
        });
        match hit {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn avoid_list(items: &[&str]) -> String {
    if items.is_empty() {
        return "(none yet)".to_string();
    }
    let skip = items.len().saturating_sub(MAX_AVOID_ITEMS);
    items[skip..]
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Answers without timestamps, which carry no signal for the model.
fn responses_json(responses: &[QuizResponse]) -> String {
    if responses.is_empty() {
        return "[]".to_string();
    }
    let rows: Vec<_> = responses
        .iter()
        .map(|r| {
            json!({
                "question": r.question,
                "answer": r.answer,
                "reasoning": r.reasoning,
                "skills": r.skills,
            })
        })
        .collect();
    serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string())
}

fn profile_line(profile: &UserProfile) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !profile.name.trim().is_empty() {
        parts.push(format!("name {}", profile.name.trim()));
    }
    if let Some(field) = profile.field.as_deref().filter(|f| !f.trim().is_empty()) {
        parts.push(format!("works in {field}"));
    }
    if let Some(niche) = profile.niche.as_deref().filter(|n| !n.trim().is_empty()) {
        parts.push(format!("specialising in {niche}"));
    }
    if let Some(level) = profile.experience_level.as_deref().filter(|l| !l.trim().is_empty()) {
        parts.push(format!("{level} experience level"));
    }
    if parts.is_empty() {
        "no profile details provided".to_string()
    } else {
        parts.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::{AnswerValue, ScenarioOption};
    use chrono::Utc;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn response(question: &str, answer: AnswerValue) -> QuizResponse {
        QuizResponse {
            question: question.to_string(),
            answer,
            reasoning: Some("I do this weekly".to_string()),
            skills: skills(&["communication"]),
            timestamp: Utc::now(),
        }
    }

    fn assert_fully_filled(prompt: &str) {
        for placeholder in [
            "{role}", "{audience}", "{json_instruction}", "{count}", "{skills}", "{per_skill}",
            "{avoid}", "{responses_json}", "{prior_json}", "{skill}", "{field}", "{niche_line}",
            "{vocabulary}", "{stakeholders}", "{focus}", "{domain_context}", "{choices_json}",
            "{profile_line}", "{evidence_json}", "{top_skills}",
        ] {
            assert!(!prompt.contains(placeholder), "unfilled {placeholder}");
        }
        assert!(prompt.contains(JSON_ONLY_INSTRUCTION));
    }

    #[test]
    fn test_initial_prompt_counts_and_avoid_list() {
        let prompt = build_initial_questions_prompt(
            &skills(&["communication", "leadership"]),
            3,
            &["How do you run a meeting?"],
        );
        assert_fully_filled(&prompt);
        assert!(prompt.contains("Create 6 assessment questions"));
        assert!(prompt.contains("Write 3 questions per skill"));
        assert!(prompt.contains("communication, leadership"));
        assert!(prompt.contains("- How do you run a meeting?"));
        assert!(prompt.contains(QUESTION_DESIGNER_ROLE));
    }

    #[test]
    fn test_empty_avoid_list_is_explicit() {
        let prompt = build_initial_questions_prompt(&skills(&["writing"]), 3, &[]);
        assert!(prompt.contains("(none yet)"));
    }

    #[test]
    fn test_avoid_list_keeps_most_recent_items() {
        let items: Vec<String> = (0..50).map(|i| format!("item {i}")).collect();
        let refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let list = avoid_list(&refs);
        assert!(!list.contains("- item 9\n"));
        assert!(list.starts_with("- item 10"));
        assert!(list.ends_with("- item 49"));
    }

    #[test]
    fn test_ranking_prompt_embeds_answers_without_timestamps() {
        let prompt = build_skill_ranking_prompt(
            &skills(&["communication"]),
            &[response("Rate your writing", AnswerValue::Number(4.0))],
        );
        assert_fully_filled(&prompt);
        assert!(prompt.contains("Rate your writing"));
        assert!(prompt.contains("I do this weekly"));
        assert!(!prompt.contains("timestamp"));
    }

    #[test]
    fn test_deep_dive_prompt_names_skill_everywhere() {
        let prompt = build_deep_dive_prompt("negotiation", 15, &[], &[]);
        assert_fully_filled(&prompt);
        assert!(prompt.contains("strength in \"negotiation\""));
        assert!(prompt.contains("Write 15 ADVANCED questions"));
        assert!(prompt.contains("\"skillsAssessed\": [\"negotiation\"]"));
    }

    #[test]
    fn test_user_text_is_not_expanded_as_placeholder() {
        let prompt = build_deep_dive_prompt(
            "negotiation",
            15,
            &[response("My {skill} story", AnswerValue::Text("fine".to_string()))],
            &[],
        );
        assert!(prompt.contains("My {skill} story"));
    }

    #[test]
    fn test_skill_name_is_not_expanded_as_placeholder() {
        let prompt = build_deep_dive_prompt(
            "{prior_json}",
            5,
            &[response("Tell me about a deal", AnswerValue::Text("closed it".to_string()))],
            &["{avoid}"],
        );
        assert!(prompt.contains("strength in \"{prior_json}\""));
        assert!(prompt.contains("- {avoid}"));
        assert_eq!(prompt.matches("Tell me about a deal").count(), 1);
    }

    #[test]
    fn test_profile_name_is_not_expanded_as_placeholder() {
        let profile = UserProfile {
            name: "{evidence_json}".to_string(),
            ..UserProfile::default()
        };
        let prompt = build_skill_detail_prompt(
            "empathy",
            &profile,
            &[response("Comforting a patient", AnswerValue::Number(5.0))],
        );
        assert!(prompt.contains("name {evidence_json}"));
        assert_eq!(prompt.matches("Comforting a patient").count(), 1);
    }

    #[test]
    fn test_fill_keeps_unknown_and_json_braces() {
        let out = fill("{\"a\": {x}} {y} {", &[("x", "{y}"), ("y", "2")]);
        assert_eq!(out, "{\"a\": {y}} 2 {");
    }

    #[test]
    fn test_scenario_prompt_splices_domain_profile() {
        let domain = DomainContext::resolve("technology", Some("data-science"));
        let prompt = build_scenario_prompt(
            &domain,
            domain.challenge_focus(0),
            &["The Midnight Deployment".to_string()],
        );
        assert_fully_filled(&prompt);
        assert!(prompt.contains("someone working in Technology"));
        assert!(prompt.contains("specialises in Data Science"));
        assert!(prompt.contains("model accuracy"));
        assert!(prompt.contains("results that contradict what leadership expects"));
        assert!(prompt.contains("- The Midnight Deployment"));
    }

    #[test]
    fn test_scenario_prompt_for_unknown_field_uses_general_profile() {
        let domain = DomainContext::resolve("falconry", None);
        let prompt = build_scenario_prompt(&domain, domain.challenge_focus(1), &[]);
        assert_fully_filled(&prompt);
        assert!(prompt.contains("a general professional setting"));
    }

    #[test]
    fn test_scenario_analysis_prompt_embeds_choices() {
        let domain = DomainContext::resolve("education", None);
        let choices = vec![ScenarioChoice {
            scenario_title: "The Quiet Student".to_string(),
            selected: ScenarioOption {
                id: "b".to_string(),
                text: "Talk to them privately".to_string(),
                skills: skills(&["empathy"]),
                traits: skills(&["supportive"]),
            },
            reasoning: None,
        }];
        let prompt = build_scenario_analysis_prompt(&domain, &choices);
        assert_fully_filled(&prompt);
        assert!(prompt.contains("The Quiet Student"));
        assert!(prompt.contains("lesson plan"));
    }

    #[test]
    fn test_career_prompts_are_fully_filled() {
        let profile = UserProfile {
            name: "Ada".to_string(),
            field: Some("healthcare".to_string()),
            niche: Some("nursing".to_string()),
            experience_level: Some("mid".to_string()),
        };
        let top = skills(&["communication", "empathy"]);
        let responses = vec![response("Q", AnswerValue::Number(5.0))];
        let domain = DomainContext::resolve("healthcare", Some("nursing"));

        let career = build_career_fit_prompt(&top, &profile, &domain, &responses);
        assert_fully_filled(&career);
        assert!(career.contains("name Ada; works in healthcare; specialising in nursing; mid experience level"));

        for prompt in [
            build_learning_path_prompt(&top, &profile),
            build_personality_prompt(&top, &responses),
            build_roadmap_prompt(&top, &profile),
            build_skill_detail_prompt("empathy", &profile, &responses),
        ] {
            assert_fully_filled(&prompt);
            assert!(prompt.contains("empathy"));
        }
    }

    #[test]
    fn test_profile_line_without_details() {
        assert_eq!(profile_line(&UserProfile::default()), "no profile details provided");
    }
}
