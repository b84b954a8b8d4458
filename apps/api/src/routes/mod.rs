pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        // Questions
        .route(
            "/api/v1/sessions/:id/questions/initial",
            post(handlers::handle_initial_questions),
        )
        .route(
            "/api/v1/sessions/:id/top-skills",
            post(handlers::handle_top_skills),
        )
        .route(
            "/api/v1/sessions/:id/questions/deep-dive",
            post(handlers::handle_deep_dive_questions),
        )
        // Scenarios
        .route(
            "/api/v1/sessions/:id/scenarios",
            post(handlers::handle_scenarios),
        )
        .route(
            "/api/v1/sessions/:id/scenarios/analysis",
            post(handlers::handle_scenario_analysis),
        )
        .route(
            "/api/v1/sessions/:id/scenarios/reset",
            post(handlers::handle_reset_scenarios),
        )
        // Results
        .route(
            "/api/v1/sessions/:id/skills/details",
            post(handlers::handle_skill_details),
        )
        .route(
            "/api/v1/sessions/:id/career-analysis",
            post(handlers::handle_career_analysis),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::assessment::{AssessmentService, AssessmentSettings};
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::llm_client::ModelGateway;
    use crate::session::store::SessionStore;

    fn offline_router() -> (Router, SessionStore) {
        let gateway = ModelGateway::new(Arc::new(ScriptedGenerator::offline()), 3);
        let settings = AssessmentSettings {
            skill_detail_delay: Duration::ZERO,
            ..AssessmentSettings::default()
        };
        let sessions = SessionStore::new();
        let state = AppState {
            service: AssessmentService::new(gateway, settings),
            sessions: sessions.clone(),
        };
        (build_router(state), sessions)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create_session(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(post_json("/api/v1/sessions", json!({"displayName": "Ada", "seed": 7})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["sessionId"]
            .as_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = offline_router();
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["service"], "compass-api");
    }

    #[tokio::test]
    async fn test_create_and_delete_session() {
        let (app, sessions) = offline_router();
        let id = create_session(&app).await;
        assert_eq!(sessions.len().await, 1);

        let delete = |id: &str| {
            Request::delete(format!("/api/v1/sessions/{id}"))
                .body(Body::empty())
                .unwrap()
        };
        let response = app.clone().oneshot(delete(&id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.oneshot(delete(&id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_session_summary_counts_history() {
        let (app, _) = offline_router();
        let id = create_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}");

        app.clone()
            .oneshot(post_json(
                &format!("{uri}/top-skills"),
                json!({"responses": [{"question": "Q", "answer": 4, "skills": ["design"]}]}),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(Request::get(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let summary = body_json(response).await;
        assert_eq!(summary["displayName"], "Ada");
        assert_eq!(summary["sessionId"], id.as_str());
        // the answers plus the ranking that was produced
        assert_eq!(summary["historyLen"], 2);
        assert_eq!(summary["answersHeld"], 1);
    }

    #[tokio::test]
    async fn test_blank_display_name_is_rejected() {
        let (app, _) = offline_router();
        let response = app
            .oneshot(post_json("/api/v1/sessions", json!({"displayName": "  "})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (app, _) = offline_router();
        let response = app
            .oneshot(post_json("/api/v1/sessions", json!({"seed": "not a number"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let (app, _) = offline_router();
        let uri = format!("/api/v1/sessions/{}/questions/initial", Uuid::new_v4());
        let response = app
            .oneshot(post_json(&uri, json!({"skills": ["communication"]})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_offline_quiz_flow_returns_content() {
        let (app, _) = offline_router();
        let id = create_session(&app).await;
        let base = format!("/api/v1/sessions/{id}");

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("{base}/questions/initial"),
                json!({"skills": ["communication", "leadership"]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let questions = body_json(response).await["questions"].as_array().unwrap().clone();
        assert_eq!(questions.len(), 6);
        assert!(questions[0]["skillsAssessed"][0].is_string());

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("{base}/top-skills"),
                json!({"responses": [
                    {"question": "Rate your leadership", "answer": 5, "skills": ["leadership"]},
                    {"question": "Describe a talk you gave", "answer": "I am a beginner", "skills": ["communication"]}
                ]}),
            ))
            .await
            .unwrap();
        assert_eq!(
            body_json(response).await["topSkills"],
            json!(["leadership", "communication"])
        );

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("{base}/questions/deep-dive"),
                json!({"topSkills": ["leadership", "communication"]}),
            ))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["questions"].as_array().unwrap().len(), 30);

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("{base}/career-analysis"),
                json!({"topSkills": ["leadership", "communication"], "profile": {"field": "business"}}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let analysis = body_json(response).await;
        assert!(analysis["careerRecommendations"].as_array().unwrap().len() > 0);
        assert_eq!(analysis["skillDetails"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_scenario_batch_and_reset() {
        let (app, _) = offline_router();
        let id = create_session(&app).await;
        let base = format!("/api/v1/sessions/{id}");

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("{base}/scenarios"),
                json!({"field": "healthcare", "count": 3}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let scenarios = body_json(response).await["scenarios"].as_array().unwrap().clone();
        assert_eq!(scenarios.len(), 3);
        assert!(scenarios.iter().all(|s| s["options"].as_array().unwrap().len() >= 3));

        let response = app
            .clone()
            .oneshot(post_json(&format!("{base}/scenarios/reset"), json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(post_json(
                &format!("{base}/scenarios"),
                json!({"field": "healthcare", "count": 0}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_scenario_analysis_accepts_niche() {
        let (app, _) = offline_router();
        let id = create_session(&app).await;
        let response = app
            .oneshot(post_json(
                &format!("/api/v1/sessions/{id}/scenarios/analysis"),
                json!({
                    "field": "healthcare",
                    "niche": "nursing",
                    "choices": [{
                        "scenarioTitle": "The Night Shift",
                        "selected": {"text": "Recheck the care plan", "traits": ["methodical"]}
                    }]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let analysis = body_json(response).await;
        assert_eq!(analysis["dominantTraits"][0]["trait"], "Methodical");
    }

    #[tokio::test]
    async fn test_results_require_a_top_skill() {
        let (app, _) = offline_router();
        let id = create_session(&app).await;
        let response = app
            .oneshot(post_json(
                &format!("/api/v1/sessions/{id}/skills/details"),
                json!({"topSkills": [" "]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
