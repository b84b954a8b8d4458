use serde::{Deserialize, Serialize};

/// Urgency of closing a skill gap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGap {
    pub skill: String,
    /// 0 – 100
    pub current_level: u8,
    /// 0 – 100
    pub required_level: u8,
    #[serde(default)]
    pub priority: Priority,
    pub development_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRecommendation {
    pub title: String,
    pub field: String,
    /// 0 – 100
    pub match_score: u8,
    pub salary_range: String,
    pub growth_outlook: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub transition_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStep {
    pub skill: String,
    pub resource: String,
    pub format: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapPhase {
    pub phase: String,
    pub duration: String,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub milestones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInsights {
    pub demand_level: String,
    pub competition_level: String,
    #[serde(default)]
    pub trending_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityTrait {
    #[serde(rename = "trait")]
    pub name: String,
    /// 0 – 100
    pub score: u8,
    pub description: String,
    #[serde(default)]
    pub career_implications: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDemand {
    pub level: String,
    pub growth_rate: String,
    pub average_salary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryShare {
    pub industry: String,
    /// Share of openings, 0 – 100
    pub percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningResource {
    pub title: String,
    /// course | book | project | certification | community
    pub kind: String,
    pub provider: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerStage {
    pub level: String,
    pub title: String,
    pub years_experience: String,
    pub salary_range: String,
}

/// Deep-dive dossier on one of the user's top skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDetail {
    pub skill: String,
    pub market_demand: MarketDemand,
    #[serde(default)]
    pub industry_breakdown: Vec<IndustryShare>,
    pub narrative: String,
    #[serde(default)]
    pub learning_resources: Vec<LearningResource>,
    #[serde(default)]
    pub career_progression: Vec<CareerStage>,
}

/// Aggregate derived from the user's workplace-scenario choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioAnalysis {
    pub dominant_traits: Vec<PersonalityTrait>,
    pub work_style: String,
    #[serde(default)]
    pub demonstrated_skills: Vec<String>,
    #[serde(default)]
    pub career_suggestions: Vec<String>,
    pub summary: String,
}

/// Terminal result of a completed assessment. Built once, then only displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerAnalysis {
    /// 0 – 100
    pub overall_score: u8,
    pub top_strengths: Vec<String>,
    pub skill_gaps: Vec<SkillGap>,
    pub career_recommendations: Vec<CareerRecommendation>,
    pub learning_path: Vec<LearningStep>,
    pub roadmap: Vec<RoadmapPhase>,
    pub market_insights: MarketInsights,
    pub personality_traits: Vec<PersonalityTrait>,
    pub skill_details: Vec<SkillDetail>,
}
