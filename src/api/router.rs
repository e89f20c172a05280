//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! CORS is permissive: the demo UI is served from a separate origin and
//! there is no real authentication in this build.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the router over a pre-constructed `ApiContext`.
pub fn api_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/process_query", post(endpoints::queries::process))
        .route("/pending_queries", get(endpoints::queries::pending))
        .route("/update_query/:id", post(endpoints::queries::update))
        .route(
            "/queries/by_patient/:patient_id",
            get(endpoints::queries::by_patient),
        )
        .route("/patients", get(endpoints::patients::list))
        .route("/patients/:id", get(endpoints::patients::detail))
        .route("/patients/:id/summary", get(endpoints::patients::summary))
        .route("/doctor_stats", get(endpoints::stats::doctor_stats))
        .with_state(ctx)
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::patients::PatientDirectory;
    use crate::pipeline::generate::DraftGenerator;
    use crate::pipeline::QueryPipeline;
    use crate::store::QueryStore;

    fn test_context() -> ApiContext {
        let store = Arc::new(QueryStore::open_in_memory().unwrap());
        let patients = Arc::new(PatientDirectory::seeded());
        let pipeline = Arc::new(QueryPipeline::new(
            Arc::clone(&patients),
            DraftGenerator::without_model(),
            Arc::clone(&store),
        ));
        ApiContext::new(pipeline, store, patients)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 262144).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn submit(ctx: &ApiContext, patient_id: &str, query: &str) -> serde_json::Value {
        let app = api_router(ctx.clone());
        let req = post_json(
            "/process_query",
            serde_json::json!({"patient_id": patient_id, "query": query}),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response_json(response).await
    }

    #[tokio::test]
    async fn health_response_shape() {
        let app = api_router(test_context());
        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert!(!json["version"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn process_query_returns_full_pipeline_state() {
        let ctx = test_context();
        let json = submit(&ctx, "P001", "My blood sugar reading is 250 mg/dL after lunch").await;

        assert_eq!(json["patient_id"], "P001");
        assert!(json["patient_context"].as_str().unwrap().contains("Sarah Johnson"));
        assert!(!json["ai_response"].as_str().unwrap().is_empty());
        assert_eq!(json["urgency_level"], "low");
        assert!(json["query_id"].is_string());
        assert!(json["final_response_to_patient"]
            .as_str()
            .unwrap()
            .contains("24 hours"));
        assert!(json["error_message"].is_null());
    }

    #[tokio::test]
    async fn process_query_rejects_empty_text() {
        let app = api_router(test_context());
        let req = post_json(
            "/process_query",
            serde_json::json!({"patient_id": "P001", "query": "   "}),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn process_query_unknown_patient_is_400_with_detail() {
        let app = api_router(test_context());
        let req = post_json(
            "/process_query",
            serde_json::json!({"patient_id": "P999", "query": "Anything"}),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("'P999' not found"));
    }

    #[tokio::test]
    async fn duplicate_submission_returns_same_record_id() {
        let ctx = test_context();
        let first = submit(&ctx, "P001", "Exactly the same question").await;
        let second = submit(&ctx, "P001", "Exactly the same question").await;
        assert_eq!(first["query_id"], second["query_id"]);

        let app = api_router(ctx);
        let response = app.oneshot(get_request("/pending_queries")).await.unwrap();
        let json = response_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn pending_queue_is_sorted_by_urgency() {
        let ctx = test_context();
        submit(&ctx, "P001", "What snacks are good before walking?").await;
        submit(&ctx, "P002", "I have severe chest pain").await;
        submit(&ctx, "P003", "I've had a headache all day").await;

        let app = api_router(ctx);
        let response = app.oneshot(get_request("/pending_queries")).await.unwrap();
        let json = response_json(response).await;

        let tiers: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["urgency_level"].as_str().unwrap())
            .collect();
        assert_eq!(tiers, vec!["high", "medium", "low"]);
    }

    #[tokio::test]
    async fn update_query_approves_and_clears_from_queue() {
        let ctx = test_context();
        let submitted = submit(&ctx, "P001", "A question to approve").await;
        let id = submitted["query_id"].as_str().unwrap().to_string();

        let app = api_router(ctx.clone());
        let req = post_json(
            &format!("/update_query/{id}"),
            serde_json::json!({"new_status": "approved", "doctor_response": "Looks fine — keep monitoring."}),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["record"]["status"], "approved");
        assert_eq!(
            json["record"]["doctor_final_response"],
            "Looks fine — keep monitoring."
        );
        assert!(json["record"]["reviewed_at"].is_string());

        let app = api_router(ctx);
        let response = app.oneshot(get_request("/pending_queries")).await.unwrap();
        let json = response_json(response).await;
        assert!(json.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_query_unknown_id_is_404() {
        let app = api_router(test_context());
        let req = post_json(
            &format!("/update_query/{}", uuid::Uuid::new_v4()),
            serde_json::json!({"new_status": "approved"}),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_query_validates_id_and_status() {
        let app = api_router(test_context());
        let req = post_json(
            "/update_query/not-a-uuid",
            serde_json::json!({"new_status": "approved"}),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let ctx = test_context();
        let submitted = submit(&ctx, "P001", "q").await;
        let id = submitted["query_id"].as_str().unwrap().to_string();
        let app = api_router(ctx);
        let req = post_json(
            &format!("/update_query/{id}"),
            serde_json::json!({"new_status": "answered"}),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn patient_history_is_most_recent_first() {
        let ctx = test_context();
        submit(&ctx, "P001", "First question").await;
        submit(&ctx, "P001", "Second question").await;
        submit(&ctx, "P002", "Unrelated question").await;

        let app = api_router(ctx);
        let response = app
            .oneshot(get_request("/queries/by_patient/P001"))
            .await
            .unwrap();
        let json = response_json(response).await;
        let queries = json.as_array().unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0]["original_query"], "Second question");
    }

    #[tokio::test]
    async fn patients_roster_lists_all_demo_profiles() {
        let app = api_router(test_context());
        let response = app.oneshot(get_request("/patients")).await.unwrap();
        let json = response_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn patient_detail_and_summary_shapes() {
        let ctx = test_context();
        let app = api_router(ctx.clone());
        let response = app.oneshot(get_request("/patients/P004")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["name"], "Priya Patel");
        assert!(json["medications"].is_array());

        let app = api_router(ctx);
        let response = app
            .oneshot(get_request("/patients/P004/summary"))
            .await
            .unwrap();
        let json = response_json(response).await;
        assert_eq!(json["diabetes_type"], "Type 2 (post-GDM)");
        assert!(json["key_medications"].is_number());
    }

    #[tokio::test]
    async fn unknown_patient_detail_is_404() {
        let app = api_router(test_context());
        let response = app.oneshot(get_request("/patients/P999")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn doctor_stats_track_todays_work() {
        let ctx = test_context();
        let submitted = submit(&ctx, "P001", "Stat me").await;
        let id = submitted["query_id"].as_str().unwrap().to_string();

        let app = api_router(ctx.clone());
        let req = post_json(
            &format!("/update_query/{id}"),
            serde_json::json!({"new_status": "approved", "doctor_response": "ok"}),
        );
        app.oneshot(req).await.unwrap();

        let app = api_router(ctx);
        let response = app.oneshot(get_request("/doctor_stats")).await.unwrap();
        let json = response_json(response).await;
        assert_eq!(json["today"], 1);
        assert_eq!(json["responses"], 1);
        assert_eq!(json["pending"], 0);
        assert!(json["avg_time"].is_string());
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = api_router(test_context());
        let response = app.oneshot(get_request("/nonexistent")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
