//! Deterministic stand-ins for every model-generated payload.
//!
//! Nothing here is random: the same skills, field and answers always produce the
//! same content, and every function returns a fully populated value. Canned
//! workplace scenarios are the one exception and live in `scenario_bag`.

use crate::assessment::field_profiles::{canonical_field, field_profile, GENERAL};
use crate::assessment::top_skills::overall_confidence;
use crate::models::analysis::{
    CareerAnalysis, CareerRecommendation, CareerStage, IndustryShare, LearningResource,
    LearningStep, MarketDemand, MarketInsights, PersonalityTrait, Priority, RoadmapPhase,
    ScenarioAnalysis, SkillDetail, SkillGap,
};
use crate::models::assessment::{
    AdaptiveQuestion, QuestionType, QuizResponse, ScenarioChoice,
};
use crate::models::profile::UserProfile;

/// Skills assessed when the caller supplies none.
pub const DEFAULT_SKILLS: &[&str] = &["communication", "problem-solving", "teamwork"];

const SCALE_LABELS: [&str; 5] = [
    "1 - Not at all confident",
    "2 - Slightly confident",
    "3 - Moderately confident",
    "4 - Very confident",
    "5 - Extremely confident",
];

const DEEP_DIVE_CONTEXTS: &[&str] = &[
    "under a tight deadline",
    "with a team you have just joined",
    "when a senior stakeholder disagrees with you",
    "on a project that is already behind schedule",
    "while mentoring someone less experienced",
];

const DEEP_DIVE_FORMS: usize = 6;

// ────────────────────────────────────────────────────────────────────────────
// Questions
// ────────────────────────────────────────────────────────────────────────────

/// The caller's skills with blanks removed, or `DEFAULT_SKILLS` when none remain.
pub fn skills_or_default(skills: &[String]) -> Vec<String> {
    let cleaned: Vec<String> = skills
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if cleaned.is_empty() {
        DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect()
    } else {
        cleaned
    }
}

/// `per_skill` first-round questions for each skill.
pub fn initial_questions(skills: &[String], per_skill: usize) -> Vec<AdaptiveQuestion> {
    skills_or_default(skills)
        .iter()
        .flat_map(|skill| initial_questions_for(skill, 0, per_skill))
        .collect()
}

/// First-round questions `start..start + count` for one skill.
pub fn initial_questions_for(skill: &str, start: usize, count: usize) -> Vec<AdaptiveQuestion> {
    (start..start + count)
        .map(|k| initial_question(skill, k))
        .collect()
}

fn initial_question(skill: &str, k: usize) -> AdaptiveQuestion {
    let id = format!("fallback-{}-{}", slug(skill), k + 1);
    let round = k / 4;
    let suffix = if round > 0 {
        format!(" (follow-up {round})")
    } else {
        String::new()
    };

    let (question_type, question, options, difficulty, scenario) = match k % 4 {
        0 => (
            QuestionType::Scale,
            format!("How confident are you in your {skill} ability?{suffix}"),
            SCALE_LABELS.iter().map(|s| s.to_string()).collect(),
            1,
            None,
        ),
        1 => (
            QuestionType::MultipleChoice,
            format!("Which statement best describes your experience with {skill}?{suffix}"),
            vec![
                format!("I rarely use {skill} and am still learning the basics"),
                format!("I use {skill} occasionally with some guidance"),
                format!("I use {skill} regularly and independently"),
                format!("Others come to me for help with {skill}"),
            ],
            1,
            None,
        ),
        2 => (
            QuestionType::Scenario,
            format!(
                "A colleague asks for help with a task that depends on {skill}, \
                 but your own deadline is tomorrow. What do you do?{suffix}"
            ),
            vec![
                "Help them now and work late on your own task".to_string(),
                "Agree a short slot after your deadline".to_string(),
                "Point them to a resource or another colleague".to_string(),
                "Explain you cannot help this week".to_string(),
            ],
            2,
            Some(format!(
                "Your team relies on {skill} for an upcoming delivery and time is short."
            )),
        ),
        _ => (
            QuestionType::Ranking,
            format!("Rank these ways you use {skill} at work, most frequent first.{suffix}"),
            vec![
                "Day-to-day tasks".to_string(),
                "Solving unexpected problems".to_string(),
                "Helping or teaching others".to_string(),
                "Planning ahead".to_string(),
            ],
            2,
            None,
        ),
    };

    AdaptiveQuestion {
        id,
        question,
        question_type,
        options,
        skills_assessed: vec![skill.to_string()],
        difficulty,
        scenario,
    }
}

/// Advanced questions `start..start + count` for one skill. Indices are stable,
/// so padding a partial model list with `start = model_len` never repeats a
/// question already handed out for the same skill.
pub fn deep_dive_questions(skill: &str, start: usize, count: usize) -> Vec<AdaptiveQuestion> {
    (start..start + count)
        .map(|k| deep_dive_question(skill, k))
        .collect()
}

fn deep_dive_question(skill: &str, k: usize) -> AdaptiveQuestion {
    let context = DEEP_DIVE_CONTEXTS[(k / DEEP_DIVE_FORMS) % DEEP_DIVE_CONTEXTS.len()];
    let cycle = k / (DEEP_DIVE_FORMS * DEEP_DIVE_CONTEXTS.len());
    let suffix = if cycle > 0 {
        format!(" (variation {})", cycle + 1)
    } else {
        String::new()
    };

    let (question_type, question, options) = match k % DEEP_DIVE_FORMS {
        0 => (
            QuestionType::Scenario,
            format!("You must rely on {skill} {context}. What is your first move?"),
            vec![
                "Clarify the goal and constraints with everyone involved".to_string(),
                "Start immediately with the approach you know best".to_string(),
                "Break the work into small steps and check progress often".to_string(),
                "Ask someone more experienced to lead".to_string(),
            ],
        ),
        1 => (
            QuestionType::MultipleChoice,
            format!("Which approach shows the most advanced use of {skill} {context}?"),
            vec![
                "Adapting a proven method to the situation".to_string(),
                "Following the standard procedure exactly".to_string(),
                "Inventing a new method from scratch".to_string(),
                "Waiting for clearer instructions".to_string(),
            ],
        ),
        2 => (
            QuestionType::Ranking,
            format!("Rank these actions for applying {skill} {context}, most effective first."),
            vec![
                "Gather information".to_string(),
                "Agree priorities with others".to_string(),
                "Act on a first plan".to_string(),
                "Review and adjust".to_string(),
            ],
        ),
        3 => (
            QuestionType::Scenario,
            format!("Your use of {skill} {context} produced a poor result. How do you respond?"),
            vec![
                "Own the result and run a short retrospective".to_string(),
                "Fix it quietly before anyone notices".to_string(),
                "Explain the outside factors that caused it".to_string(),
                "Ask for feedback from the people affected".to_string(),
            ],
        ),
        4 => (
            QuestionType::MultipleChoice,
            format!("How would an expert judge whether their {skill} worked {context}?"),
            vec![
                "Measurable outcomes against the original goal".to_string(),
                "Feedback from the people involved".to_string(),
                "Whether the work finished on time".to_string(),
                "Their own sense of how it went".to_string(),
            ],
        ),
        _ => (
            QuestionType::Ranking,
            format!("Rank these ways of growing your {skill} {context}, most useful first."),
            vec![
                "Deliberate practice on real work".to_string(),
                "Coaching from an expert".to_string(),
                "Formal training".to_string(),
                "Reflecting on past mistakes".to_string(),
            ],
        ),
    };

    AdaptiveQuestion {
        id: format!("fallback-dd-{}-{}", slug(skill), k + 1),
        question: format!("{question}{suffix}"),
        question_type,
        options,
        skills_assessed: vec![skill.to_string()],
        difficulty: 3 + (k % 3) as u8,
        scenario: None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scenario analysis
// ────────────────────────────────────────────────────────────────────────────

/// Tallies the traits and skills of the chosen options.
pub fn scenario_analysis(field: &str, choices: &[ScenarioChoice]) -> ScenarioAnalysis {
    let traits = tally(choices.iter().flat_map(|c| c.selected.traits.iter()));
    let skills = tally(choices.iter().flat_map(|c| c.selected.skills.iter()));
    let total = choices.len().max(1);

    let dominant_traits: Vec<PersonalityTrait> = if traits.is_empty() {
        vec![
            trait_entry("Adaptable", 70, "You adjust your approach to the situation in front of you."),
            trait_entry("Thoughtful", 65, "You weigh options before committing to one."),
        ]
    } else {
        traits
            .iter()
            .take(4)
            .map(|(name, count)| {
                let score = (50 + 45 * count / total).min(95) as u8;
                trait_entry(
                    &capitalize(name),
                    score,
                    &format!("You chose a {} approach in {} of {} scenarios.", name.to_lowercase(), count, choices.len()),
                )
            })
            .collect()
    };

    let work_style = work_style_for(&dominant_traits[0].name).to_string();
    let demonstrated_skills: Vec<String> = skills.into_iter().take(5).map(|(s, _)| s).collect();
    let career_suggestions: Vec<String> = career_table(field)
        .iter()
        .take(3)
        .map(|role| role.title.to_string())
        .collect();

    let summary = if choices.is_empty() {
        "No scenario choices were recorded yet, so this profile is a neutral starting point.".to_string()
    } else {
        format!(
            "Across {} scenarios your choices point to a {} working style, led by {}.",
            choices.len(),
            work_style.to_lowercase(),
            dominant_traits[0].name.to_lowercase()
        )
    };

    ScenarioAnalysis {
        dominant_traits,
        work_style,
        demonstrated_skills,
        career_suggestions,
        summary,
    }
}

/// Counts case-insensitively, keeping first-seen spelling; most frequent first,
/// ties in first-seen order.
fn tally<'a>(items: impl Iterator<Item = &'a String>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for item in items {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(s, _)| s.eq_ignore_ascii_case(item)) {
            Some((_, n)) => *n += 1,
            None => counts.push((item.to_string(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn work_style_for(trait_name: &str) -> &'static str {
    let t = trait_name.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| t.contains(w));
    if has(&["collab", "cooperat", "team", "inclusive"]) {
        "Collaborative and consensus-driven"
    } else if has(&["analyt", "method", "cautious", "careful", "detail"]) {
        "Careful and evidence-driven"
    } else if has(&["decisive", "bold", "assert", "direct"]) {
        "Decisive and action-oriented"
    } else if has(&["empath", "support", "caring", "patient"]) {
        "People-centred and supportive"
    } else if has(&["creativ", "innovat", "curious"]) {
        "Inventive and exploratory"
    } else {
        "Balanced and adaptable"
    }
}

fn trait_entry(name: &str, score: u8, description: &str) -> PersonalityTrait {
    PersonalityTrait {
        name: name.to_string(),
        score,
        description: description.to_string(),
        career_implications: vec![
            format!("Look for roles that reward a {} approach", name.to_lowercase()),
            "Seek feedback on how this trait lands with different teams".to_string(),
        ],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Career-fit pieces
// ────────────────────────────────────────────────────────────────────────────

/// Personality traits inferred from skill names alone.
pub fn personality_profile(top_skills: &[String]) -> Vec<PersonalityTrait> {
    const SKILL_TRAITS: &[(&[&str], &str, &str)] = &[
        (&["communicat", "present", "writing"], "Expressive", "You put ideas into words that others act on."),
        (&["lead", "manag"], "Assertive", "You are comfortable setting direction for others."),
        (&["analy", "data", "problem", "research"], "Analytical", "You break problems into parts before acting."),
        (&["creativ", "design", "innovat"], "Creative", "You look for new angles rather than the usual answer."),
        (&["team", "collab", "empath"], "Cooperative", "You work towards shared outcomes."),
        (&["organi", "plan", "detail"], "Conscientious", "You keep commitments and track the details."),
    ];
    const FILLERS: &[(&str, &str)] = &[
        ("Conscientious", "You keep commitments and track the details."),
        ("Adaptable", "You adjust quickly when plans change."),
        ("Curious", "You actively look for things to learn."),
        ("Resilient", "You recover quickly from setbacks."),
    ];

    let mut traits: Vec<(&str, &str)> = Vec::new();
    for skill in top_skills {
        let skill = skill.to_lowercase();
        for &(keywords, name, description) in SKILL_TRAITS {
            if keywords.iter().any(|k| skill.contains(k)) && !traits.iter().any(|(n, _)| *n == name) {
                traits.push((name, description));
            }
        }
    }
    for &(name, description) in FILLERS {
        if traits.len() >= 4 {
            break;
        }
        if !traits.iter().any(|(n, _)| *n == name) {
            traits.push((name, description));
        }
    }

    traits
        .into_iter()
        .take(5)
        .enumerate()
        .map(|(i, (name, description))| trait_entry(name, 80 - 5 * i as u8, description))
        .collect()
}

/// Two steps per skill, then a closing career-planning step.
pub fn learning_path(top_skills: &[String]) -> Vec<LearningStep> {
    let mut steps: Vec<LearningStep> = skills_or_default(top_skills)
        .iter()
        .flat_map(|skill| {
            [
                LearningStep {
                    skill: skill.clone(),
                    resource: format!("Foundations of {} (Coursera or LinkedIn Learning)", capitalize(skill)),
                    format: "online course".to_string(),
                    duration: "4 weeks".to_string(),
                },
                LearningStep {
                    skill: skill.clone(),
                    resource: format!("A self-directed project that showcases your {skill}"),
                    format: "project".to_string(),
                    duration: "6 weeks".to_string(),
                },
            ]
        })
        .collect();
    steps.push(LearningStep {
        skill: "career planning".to_string(),
        resource: "Informational interviews with three people in your target role".to_string(),
        format: "networking".to_string(),
        duration: "2 weeks".to_string(),
    });
    steps
}

/// Three-phase, twelve-month roadmap built around the top skills.
pub fn roadmap(top_skills: &[String]) -> Vec<RoadmapPhase> {
    let skills = skills_or_default(top_skills).join(" and ");
    vec![
        RoadmapPhase {
            phase: "Foundation".to_string(),
            duration: "Months 1-3".to_string(),
            goals: vec![
                format!("Formalise your {skills} with structured learning"),
                "Identify two target roles".to_string(),
            ],
            milestones: vec![
                "Complete one course or certification".to_string(),
                "Update your CV around your strongest skills".to_string(),
            ],
        },
        RoadmapPhase {
            phase: "Growth".to_string(),
            duration: "Months 4-8".to_string(),
            goals: vec![
                format!("Apply {skills} on visible, real projects"),
                "Close your highest-priority skill gap".to_string(),
            ],
            milestones: vec![
                "Lead one piece of work end to end".to_string(),
                "Collect feedback from a mentor or manager".to_string(),
            ],
        },
        RoadmapPhase {
            phase: "Transition".to_string(),
            duration: "Months 9-12".to_string(),
            goals: vec![
                "Move into or apply for your target role".to_string(),
                "Build a network in your chosen field".to_string(),
            ],
            milestones: vec![
                "Apply to at least five matching roles".to_string(),
                "Present your portfolio to a hiring manager".to_string(),
            ],
        },
    ]
}

/// Dossier on one skill, weighted towards the person's field.
pub fn skill_detail(skill: &str, profile: &UserProfile) -> SkillDetail {
    let field = field_profile(profile.field_or_default());
    let home_industry = if field.key == GENERAL {
        "Professional Services"
    } else {
        field.display_name
    };

    let mut industry_breakdown = vec![IndustryShare {
        industry: home_industry.to_string(),
        percentage: 35,
    }];
    let others = ["Technology", "Healthcare", "Finance", "Education"]
        .into_iter()
        .filter(|i| !home_industry.contains(i))
        .take(3);
    industry_breakdown.extend(others.zip([25u8, 20, 10]).map(|(industry, percentage)| IndustryShare {
        industry: industry.to_string(),
        percentage,
    }));
    industry_breakdown.push(IndustryShare {
        industry: "Other".to_string(),
        percentage: 10,
    });

    let title = capitalize(skill);
    SkillDetail {
        skill: skill.to_string(),
        market_demand: MarketDemand {
            level: "High".to_string(),
            growth_rate: "Steady growth over the next five years".to_string(),
            average_salary: "$60,000 - $95,000".to_string(),
        },
        industry_breakdown,
        narrative: format!(
            "{title} came through as one of your strongest skills. It transfers across \
             industries, and pairing it with domain knowledge in {} makes it far more valuable.",
            field.display_name
        ),
        learning_resources: vec![
            LearningResource {
                title: format!("{title} Fundamentals"),
                kind: "course".to_string(),
                provider: "Coursera".to_string(),
                duration: "4 weeks".to_string(),
            },
            LearningResource {
                title: format!("Applied {title}: Case Studies"),
                kind: "book".to_string(),
                provider: "O'Reilly".to_string(),
                duration: "3 weeks".to_string(),
            },
            LearningResource {
                title: format!("{title} practice project"),
                kind: "project".to_string(),
                provider: "Self-directed".to_string(),
                duration: "6 weeks".to_string(),
            },
        ],
        career_progression: vec![
            stage("Entry", "Associate", "0-2", "$40,000 - $55,000"),
            stage("Mid", "Specialist", "2-5", "$55,000 - $80,000"),
            stage("Senior", "Senior Specialist", "5-8", "$80,000 - $110,000"),
            stage("Lead", "Team Lead or Manager", "8+", "$110,000 - $150,000"),
        ],
    }
}

fn stage(level: &str, title: &str, years: &str, salary: &str) -> CareerStage {
    CareerStage {
        level: level.to_string(),
        title: title.to_string(),
        years_experience: years.to_string(),
        salary_range: salary.to_string(),
    }
}

struct RoleTemplate {
    title: &'static str,
    salary_range: &'static str,
    growth_outlook: &'static str,
    required_skills: &'static [&'static str],
    transition_time: &'static str,
}

struct FieldMarket {
    roles: &'static [RoleTemplate],
    gap_skills: &'static [&'static str],
    demand_level: &'static str,
    competition_level: &'static str,
    trending_skills: &'static [&'static str],
}

macro_rules! role {
    ($title:expr, $salary:expr, $growth:expr, [$($skill:expr),*], $transition:expr) => {
        RoleTemplate {
            title: $title,
            salary_range: $salary,
            growth_outlook: $growth,
            required_skills: &[$($skill),*],
            transition_time: $transition,
        }
    };
}

static TECHNOLOGY_MARKET: FieldMarket = FieldMarket {
    roles: &[
        role!("Product Manager", "$95,000 - $140,000", "Strong", ["communication", "prioritization", "data analysis"], "6-12 months"),
        role!("Software Engineer", "$85,000 - $135,000", "Strong", ["programming", "problem-solving", "system design"], "9-18 months"),
        role!("Data Analyst", "$65,000 - $95,000", "Strong", ["data analysis", "SQL", "communication"], "4-8 months"),
        role!("Technical Program Manager", "$110,000 - $150,000", "Good", ["leadership", "planning", "stakeholder management"], "12-18 months"),
    ],
    gap_skills: &["system design", "data analysis", "stakeholder management"],
    demand_level: "High",
    competition_level: "High",
    trending_skills: &["AI literacy", "cloud platforms", "data analysis", "security awareness"],
};

static HEALTHCARE_MARKET: FieldMarket = FieldMarket {
    roles: &[
        role!("Care Coordinator", "$45,000 - $65,000", "Strong", ["communication", "organisation", "empathy"], "3-6 months"),
        role!("Clinical Research Associate", "$60,000 - $90,000", "Good", ["attention to detail", "regulatory knowledge"], "6-12 months"),
        role!("Health Services Manager", "$80,000 - $120,000", "Strong", ["leadership", "budgeting", "operations"], "12-24 months"),
        role!("Patient Experience Specialist", "$50,000 - $70,000", "Good", ["communication", "problem-solving"], "3-6 months"),
    ],
    gap_skills: &["clinical documentation", "healthcare regulation", "data literacy"],
    demand_level: "Very High",
    competition_level: "Moderate",
    trending_skills: &["telehealth", "health informatics", "patient advocacy"],
};

static BUSINESS_MARKET: FieldMarket = FieldMarket {
    roles: &[
        role!("Business Analyst", "$65,000 - $95,000", "Strong", ["data analysis", "communication", "problem-solving"], "4-8 months"),
        role!("Project Manager", "$75,000 - $115,000", "Strong", ["planning", "leadership", "risk management"], "6-12 months"),
        role!("Account Manager", "$55,000 - $90,000", "Good", ["communication", "negotiation", "relationship building"], "3-6 months"),
        role!("Operations Manager", "$70,000 - $110,000", "Good", ["leadership", "process improvement"], "9-15 months"),
    ],
    gap_skills: &["financial analysis", "negotiation", "data visualisation"],
    demand_level: "High",
    competition_level: "High",
    trending_skills: &["data-driven decision making", "change management", "AI tools"],
};

static CREATIVE_MARKET: FieldMarket = FieldMarket {
    roles: &[
        role!("UX Designer", "$70,000 - $110,000", "Strong", ["user research", "prototyping", "communication"], "6-12 months"),
        role!("Content Strategist", "$55,000 - $85,000", "Good", ["writing", "SEO", "planning"], "4-8 months"),
        role!("Art Director", "$80,000 - $125,000", "Moderate", ["creative direction", "leadership"], "18-36 months"),
        role!("Brand Designer", "$50,000 - $80,000", "Good", ["visual design", "storytelling"], "3-6 months"),
    ],
    gap_skills: &["portfolio presentation", "client management", "design tools"],
    demand_level: "Moderate",
    competition_level: "Very High",
    trending_skills: &["motion design", "AI-assisted creation", "accessibility"],
};

static EDUCATION_MARKET: FieldMarket = FieldMarket {
    roles: &[
        role!("Instructional Designer", "$60,000 - $90,000", "Strong", ["curriculum design", "e-learning tools", "communication"], "6-12 months"),
        role!("Corporate Trainer", "$55,000 - $85,000", "Good", ["presentation", "facilitation"], "3-6 months"),
        role!("Academic Advisor", "$45,000 - $65,000", "Good", ["empathy", "communication", "organisation"], "3-6 months"),
        role!("Education Program Manager", "$65,000 - $95,000", "Good", ["leadership", "planning"], "12-18 months"),
    ],
    gap_skills: &["learning technology", "assessment design", "data literacy"],
    demand_level: "Moderate",
    competition_level: "Moderate",
    trending_skills: &["online learning design", "learning analytics", "inclusive teaching"],
};

static GENERAL_MARKET: FieldMarket = FieldMarket {
    roles: &[
        role!("Project Coordinator", "$45,000 - $65,000", "Good", ["organisation", "communication"], "3-6 months"),
        role!("Operations Specialist", "$50,000 - $75,000", "Good", ["problem-solving", "process improvement"], "4-8 months"),
        role!("Customer Success Manager", "$55,000 - $85,000", "Strong", ["communication", "relationship building"], "3-6 months"),
        role!("Team Lead", "$60,000 - $90,000", "Good", ["leadership", "coaching"], "9-15 months"),
    ],
    gap_skills: &["data literacy", "project management", "digital tools"],
    demand_level: "Moderate",
    competition_level: "Moderate",
    trending_skills: &["digital literacy", "adaptability", "remote collaboration"],
};

fn market_for(field: &str) -> &'static FieldMarket {
    match canonical_field(field) {
        "technology" => &TECHNOLOGY_MARKET,
        "healthcare" => &HEALTHCARE_MARKET,
        "business" => &BUSINESS_MARKET,
        "creative" => &CREATIVE_MARKET,
        "education" => &EDUCATION_MARKET,
        _ => &GENERAL_MARKET,
    }
}

fn career_table(field: &str) -> &'static [RoleTemplate] {
    market_for(field).roles
}

/// Role suggestions for the field; roles that use a top skill rank first.
pub fn career_recommendations(top_skills: &[String], field: &str) -> Vec<CareerRecommendation> {
    let display = field_profile(field).display_name;
    let uses_top_skill = |role: &RoleTemplate| {
        role.required_skills
            .iter()
            .any(|r| top_skills.iter().any(|s| s.eq_ignore_ascii_case(r)))
    };

    let mut roles: Vec<&RoleTemplate> = career_table(field).iter().collect();
    // Stable: table order is kept within each group
    roles.sort_by_key(|role| !uses_top_skill(*role));

    roles
        .into_iter()
        .enumerate()
        .map(|(i, role)| CareerRecommendation {
            title: role.title.to_string(),
            field: display.to_string(),
            match_score: 85u8.saturating_sub(5 * i as u8),
            salary_range: role.salary_range.to_string(),
            growth_outlook: role.growth_outlook.to_string(),
            required_skills: role.required_skills.iter().map(|s| s.to_string()).collect(),
            transition_time: role.transition_time.to_string(),
        })
        .collect()
}

/// Complementary skills for the field that the person did not rank highly.
pub fn skill_gaps(top_skills: &[String], field: &str) -> Vec<SkillGap> {
    const PRIORITIES: [(Priority, u8, &str); 3] = [
        (Priority::High, 35, "3-6 months"),
        (Priority::Medium, 45, "2-4 months"),
        (Priority::Low, 55, "1-3 months"),
    ];

    market_for(field)
        .gap_skills
        .iter()
        .filter(|gap| !top_skills.iter().any(|s| s.eq_ignore_ascii_case(gap)))
        .zip(PRIORITIES)
        .map(|(gap, (priority, current_level, development_time))| SkillGap {
            skill: gap.to_string(),
            current_level,
            required_level: 75,
            priority,
            development_time: development_time.to_string(),
        })
        .collect()
}

pub fn market_insights(field: &str) -> MarketInsights {
    let market = market_for(field);
    MarketInsights {
        demand_level: market.demand_level.to_string(),
        competition_level: market.competition_level.to_string(),
        trending_skills: market.trending_skills.iter().map(|s| s.to_string()).collect(),
    }
}

/// Overall readiness from answer confidence; 65 without answers.
pub fn overall_score(responses: &[QuizResponse]) -> u8 {
    overall_confidence(responses)
        .map(|c| c.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(65)
}

pub fn top_strengths(top_skills: &[String]) -> Vec<String> {
    let mut strengths: Vec<String> = skills_or_default(top_skills)
        .iter()
        .map(|s| format!("Strong {}", s.to_lowercase()))
        .collect();
    strengths.push("Willingness to learn and reflect".to_string());
    strengths
}

/// A complete analysis built without the model.
pub fn career_analysis(
    top_skills: &[String],
    responses: &[QuizResponse],
    profile: &UserProfile,
) -> CareerAnalysis {
    let field = profile.field_or_default();
    CareerAnalysis {
        overall_score: overall_score(responses),
        top_strengths: top_strengths(top_skills),
        skill_gaps: skill_gaps(top_skills, field),
        career_recommendations: career_recommendations(top_skills, field),
        learning_path: learning_path(top_skills),
        roadmap: roadmap(top_skills),
        market_insights: market_insights(field),
        personality_traits: personality_profile(top_skills),
        skill_details: skills_or_default(top_skills)
            .iter()
            .take(2)
            .map(|s| skill_detail(s, profile))
            .collect(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// helpers
// ────────────────────────────────────────────────────────────────────────────

fn slug(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
