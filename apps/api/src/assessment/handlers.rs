use axum::{
    extract::{FromRequest, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::{CareerAnalysis, ScenarioAnalysis, SkillDetail};
use crate::models::assessment::{AdaptiveQuestion, QuizResponse, ScenarioChoice, ScenarioVariant};
use crate::models::profile::UserProfile;
use crate::session::store::SharedSession;
use crate::session::AssessmentSession;
use crate::state::AppState;

/// Upper bound on scenarios generated by one request.
pub const MAX_SCENARIO_BATCH: usize = 10;

/// `Json` whose rejections surface as `AppError::Validation` (400).
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

async fn find_session(state: &AppState, id: Uuid) -> Result<SharedSession, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Sessions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub display_name: String,
    /// Makes canned-scenario picks reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateSessionRequest>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), AppError> {
    let name = req.display_name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("displayName must not be empty".to_string()));
    }

    let session = match req.seed {
        Some(seed) => AssessmentSession::with_seed(name, seed),
        None => AssessmentSession::new(name),
    };
    let session_id = state.sessions.insert(session).await;
    Ok((StatusCode::CREATED, Json(CreateSessionResponse { session_id })))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub idle_seconds: u64,
    /// Exchanges currently held for "avoid repeating" prompts.
    pub history_len: usize,
    pub answers_held: usize,
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSummary>, AppError> {
    let session = find_session(&state, id).await?;
    let session = session.lock().await;
    Ok(Json(SessionSummary {
        session_id: session.id,
        display_name: session.display_name.clone(),
        created_at: session.created_at,
        idle_seconds: session.idle_for().as_secs(),
        history_len: session.history_len(),
        answers_held: session.recent_answers().len(),
    }))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Questions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct InitialQuestionsRequest {
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<AdaptiveQuestion>,
}

/// POST /api/v1/sessions/:id/questions/initial
pub async fn handle_initial_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<InitialQuestionsRequest>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    let questions = state
        .service
        .generate_initial_questions(&mut session, &req.skills)
        .await;
    Ok(Json(QuestionsResponse { questions }))
}

#[derive(Deserialize)]
pub struct TopSkillsRequest {
    #[serde(default)]
    pub responses: Vec<QuizResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopSkillsResponse {
    pub top_skills: Vec<String>,
}

/// POST /api/v1/sessions/:id/top-skills
pub async fn handle_top_skills(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<TopSkillsRequest>,
) -> Result<Json<TopSkillsResponse>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    let top_skills = state.service.find_top_skills(&mut session, &req.responses).await;
    Ok(Json(TopSkillsResponse { top_skills }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepDiveRequest {
    pub top_skills: Vec<String>,
    #[serde(default)]
    pub responses: Vec<QuizResponse>,
}

/// POST /api/v1/sessions/:id/questions/deep-dive
pub async fn handle_deep_dive_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<DeepDiveRequest>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    let questions = state
        .service
        .generate_deep_dive_questions(&mut session, &req.top_skills, &req.responses)
        .await;
    Ok(Json(QuestionsResponse { questions }))
}

// ────────────────────────────────────────────────────────────────────────────
// Scenarios
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ScenariosRequest {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub niche: Option<String>,
    #[serde(default = "default_scenario_count")]
    pub count: usize,
}

fn default_scenario_count() -> usize {
    1
}

#[derive(Serialize)]
pub struct ScenariosResponse {
    pub scenarios: Vec<ScenarioVariant>,
}

/// POST /api/v1/sessions/:id/scenarios
pub async fn handle_scenarios(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<ScenariosRequest>,
) -> Result<Json<ScenariosResponse>, AppError> {
    if !(1..=MAX_SCENARIO_BATCH).contains(&req.count) {
        return Err(AppError::Validation(format!(
            "count must be between 1 and {MAX_SCENARIO_BATCH}"
        )));
    }

    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    let niche = req.niche.as_deref().filter(|n| !n.trim().is_empty());
    let scenarios = if req.count == 1 {
        vec![
            state
                .service
                .generate_workplace_scenario(&mut session, &req.field, niche)
                .await,
        ]
    } else {
        state
            .service
            .generate_workplace_scenarios(&mut session, req.count, &req.field, niche)
            .await
    };
    Ok(Json(ScenariosResponse { scenarios }))
}

#[derive(Deserialize)]
pub struct ScenarioAnalysisRequest {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub niche: Option<String>,
    pub choices: Vec<ScenarioChoice>,
}

/// POST /api/v1/sessions/:id/scenarios/analysis
pub async fn handle_scenario_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<ScenarioAnalysisRequest>,
) -> Result<Json<ScenarioAnalysis>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    let niche = req.niche.as_deref().filter(|n| !n.trim().is_empty());
    let analysis = state
        .service
        .analyze_scenario_responses(&mut session, &req.field, niche, &req.choices)
        .await;
    Ok(Json(analysis))
}

/// POST /api/v1/sessions/:id/scenarios/reset
pub async fn handle_reset_scenarios(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let session = find_session(&state, id).await?;
    session.lock().await.reset_scenario_tracking();
    info!("Session {id}: scenario tracking reset");
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Results
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsRequest {
    pub top_skills: Vec<String>,
    #[serde(default)]
    pub responses: Vec<QuizResponse>,
    #[serde(default)]
    pub profile: UserProfile,
}

impl ResultsRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.top_skills.iter().all(|s| s.trim().is_empty()) {
            return Err(AppError::Validation("topSkills must name at least one skill".to_string()));
        }
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDetailsResponse {
    pub skill_details: Vec<SkillDetail>,
}

/// POST /api/v1/sessions/:id/skills/details
pub async fn handle_skill_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<ResultsRequest>,
) -> Result<Json<SkillDetailsResponse>, AppError> {
    req.validate()?;
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    let skill_details = state
        .service
        .generate_skill_details(&mut session, &req.top_skills, &req.responses, &req.profile)
        .await;
    Ok(Json(SkillDetailsResponse { skill_details }))
}

/// POST /api/v1/sessions/:id/career-analysis
pub async fn handle_career_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<ResultsRequest>,
) -> Result<Json<CareerAnalysis>, AppError> {
    req.validate()?;
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    let analysis = state
        .service
        .analyze_career_fit(&mut session, &req.top_skills, &req.responses, &req.profile)
        .await;
    Ok(Json(analysis))
}
