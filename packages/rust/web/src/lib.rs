//! HTTP API for the Tokyon site.
//!
//! Routes:
//! - `POST /api/submit-lead`: deliver a contact-form lead to Pipefy
//! - `POST /api/consultant`: one consultant chat turn
//! - `GET /api/services`: the service catalog
//! - `GET /api/portfolio?service=&language=`: case studies, CMS first
//! - `GET /api/portfolio/:slug`: one case study
//! - `GET /health`

mod error;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokyon_consultant::ConsultantClient;
use tokyon_content::ContentService;
use tokyon_leads::LeadAdapter;
use tokyon_shared::{Result, TokyonError};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::ApiError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub leads: Arc<LeadAdapter>,
    pub consultant: Arc<ConsultantClient>,
    pub content: Arc<ContentService>,
}

impl AppState {
    pub fn new(leads: LeadAdapter, consultant: ConsultantClient, content: ContentService) -> Self {
        Self {
            leads: Arc::new(leads),
            consultant: Arc::new(consultant),
            content: Arc::new(content),
        }
    }
}

/// Build the router with tracing and CORS layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/submit-lead",
            post(handlers::submit_lead).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/consultant",
            post(handlers::consultant).fallback(handlers::method_not_allowed),
        )
        .route("/api/services", get(handlers::services))
        .route("/api/portfolio", get(handlers::portfolio))
        .route("/api/portfolio/:slug", get(handlers::case_study))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| TokyonError::Network(format!("failed to bind {addr}: {e}")))?;

    info!(%addr, leads_configured = state.leads.is_configured(), "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TokyonError::Network(format!("server error: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use tokyon_shared::PipefyCredentials;
    use url::Url;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn state(pipefy: &MockServer, configured: bool) -> AppState {
        let credentials = configured.then(|| PipefyCredentials {
            token: "t".into(),
            pipe_id: "1".into(),
        });
        let leads = LeadAdapter::new(
            format!("{}/graphql", pipefy.uri()),
            credentials,
            Duration::from_secs(2),
        )
        .unwrap();
        let consultant = ConsultantClient::new(
            &Url::parse(&pipefy.uri()).unwrap(),
            None,
            "test-model",
            0.7,
            Duration::from_secs(2),
        )
        .unwrap();
        let content = ContentService::with_cms(
            &Url::parse(&pipefy.uri()).unwrap(),
            "v2024-03-01",
            "production",
            Duration::from_secs(2),
        )
        .unwrap();
        AppState::new(leads, consultant, content)
    }

    fn server(state: AppState) -> TestServer {
        TestServer::new(router(state)).unwrap()
    }

    async fn mount_pipefy(pipefy: &MockServer, fields: Value, create: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(body_string_contains("StartFormFields"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({ "data": { "pipe": { "start_form_fields": fields } } }),
            ))
            .mount(pipefy)
            .await;
        Mock::given(method("POST"))
            .and(body_string_contains("CreateCard"))
            .respond_with(create)
            .mount(pipefy)
            .await;
    }

    #[tokio::test]
    async fn get_is_method_not_allowed() {
        let pipefy = MockServer::start().await;
        let server = server(state(&pipefy, true));

        let response = server.get("/api/submit-lead").expect_failure().await;
        assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        let body: Value = response.json();
        assert_eq!(body["message"], "Method not allowed");
        assert!(pipefy.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_email_is_bad_request() {
        let pipefy = MockServer::start().await;
        let server = server(state(&pipefy, true));

        let response = server
            .post("/api/submit-lead")
            .json(&json!({ "company": "Acme" }))
            .expect_failure()
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Missing required fields");
        assert!(pipefy.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let pipefy = MockServer::start().await;
        let server = server(state(&pipefy, true));

        let response = server
            .post("/api/submit-lead")
            .text("company=Acme")
            .expect_failure()
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["message"].is_string());
    }

    #[tokio::test]
    async fn missing_configuration_is_server_error() {
        let pipefy = MockServer::start().await;
        let server = server(state(&pipefy, false));

        let response = server
            .post("/api/submit-lead")
            .json(&json!({ "company": "Acme", "email": "a@acme.com" }))
            .expect_failure()
            .await;
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert!(body["message"].as_str().unwrap().contains("Token ou ID do Pipefy"));
        assert!(pipefy.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn successful_submission_returns_card_id() {
        let pipefy = MockServer::start().await;
        mount_pipefy(
            &pipefy,
            json!([{ "id": "f1", "label": "Empresa", "type": "short_text" }]),
            ResponseTemplate::new(200).set_body_json(
                json!({ "data": { "createCard": { "card": { "id": "123", "title": "Acme" } } } }),
            ),
        )
        .await;
        let server = server(state(&pipefy, true));

        let response = server
            .post("/api/submit-lead")
            .json(&json!({
                "company": "Acme",
                "email": "a@acme.com",
                "phone": "",
                "challenge": ""
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["id"], "123");
        assert_eq!(body["message"], "Lead criado com sucesso");
    }

    #[tokio::test]
    async fn discovery_failure_is_invisible_to_caller() {
        let pipefy = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("StartFormFields"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&pipefy)
            .await;
        Mock::given(method("POST"))
            .and(body_string_contains("CreateCard"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({ "data": { "createCard": { "card": { "id": "9" } } } }),
            ))
            .mount(&pipefy)
            .await;
        let server = server(state(&pipefy, true));

        let response = server
            .post("/api/submit-lead")
            .json(&json!({ "company": "Acme", "email": "a@acme.com" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["id"], "9");
    }

    #[tokio::test]
    async fn remote_rejection_passes_message_through() {
        let pipefy = MockServer::start().await;
        mount_pipefy(
            &pipefy,
            json!([]),
            ResponseTemplate::new(200).set_body_json(json!({
                "data": { "createCard": null },
                "errors": [{ "message": "Field 'Segmento' is required" }]
            })),
        )
        .await;
        let server = server(state(&pipefy, true));

        let response = server
            .post("/api/submit-lead")
            .json(&json!({ "company": "Acme", "email": "a@acme.com" }))
            .expect_failure()
            .await;
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .contains("Field 'Segmento' is required")
        );
        assert_eq!(body["details"][0]["message"], "Field 'Segmento' is required");
    }

    #[tokio::test]
    async fn rejection_behind_error_status_reaches_caller() {
        let pipefy = MockServer::start().await;
        mount_pipefy(
            &pipefy,
            json!([]),
            ResponseTemplate::new(401).set_body_json(json!({
                "errors": [{ "message": "Permission denied: invalid token" }]
            })),
        )
        .await;
        let server = server(state(&pipefy, true));

        let response = server
            .post("/api/submit-lead")
            .json(&json!({ "company": "Acme", "email": "a@acme.com" }))
            .expect_failure()
            .await;
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["message"], "Erro no Pipefy: Permission denied: invalid token");
        assert_eq!(body["details"][0]["message"], "Permission denied: invalid token");
    }

    #[tokio::test]
    async fn unreachable_pipefy_reports_context() {
        let pipefy = MockServer::start().await;
        mount_pipefy(
            &pipefy,
            json!([]),
            ResponseTemplate::new(503).set_body_string("upstream maintenance"),
        )
        .await;
        let server = server(state(&pipefy, true));

        let response = server
            .post("/api/submit-lead")
            .json(&json!({ "company": "Acme", "email": "a@acme.com" }))
            .expect_failure()
            .await;
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["message"], "Erro interno de conexão com Pipefy.");
        let details = body["details"].as_str().unwrap();
        assert!(details.contains("503"), "{details}");
        assert!(details.contains("upstream maintenance"), "{details}");
    }

    #[tokio::test]
    async fn null_optionals_are_accepted() {
        let pipefy = MockServer::start().await;
        mount_pipefy(
            &pipefy,
            json!([]),
            ResponseTemplate::new(200).set_body_json(
                json!({ "data": { "createCard": { "card": { "id": "12" } } } }),
            ),
        )
        .await;
        let server = server(state(&pipefy, true));

        let response = server
            .post("/api/submit-lead")
            .json(&json!({
                "company": "Acme",
                "email": "a@acme.com",
                "phone": null,
                "challenge": null
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["id"], "12");
    }

    #[tokio::test]
    async fn consultant_without_key_apologises() {
        let pipefy = MockServer::start().await;
        let server = server(state(&pipefy, true));

        let response = server
            .post("/api/consultant")
            .json(&json!({ "message": "Quais serviços vocês oferecem?" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["reply"], tokyon_consultant::UNAVAILABLE_REPLY);
        assert_eq!(body["session"], json!([]));
    }

    #[tokio::test]
    async fn consultant_rejects_empty_message() {
        let pipefy = MockServer::start().await;
        let server = server(state(&pipefy, true));

        let response = server
            .post("/api/consultant")
            .json(&json!({ "message": "   " }))
            .expect_failure()
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let response = server.get("/api/consultant").expect_failure().await;
        assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn services_and_health() {
        let pipefy = MockServer::start().await;
        let server = server(state(&pipefy, true));

        let services: Value = server.get("/api/services").await.json();
        assert_eq!(services.as_array().unwrap().len(), 11);
        assert_eq!(services[0]["id"], "brand-core");

        let health: Value = server.get("/health").await.json();
        assert_eq!(health["status"], "ok");
    }

    #[tokio::test]
    async fn portfolio_filters_by_service_and_language() {
        let upstream = MockServer::start().await;
        let server = server(state(&upstream, true));

        // CMS unreachable at this path: the bundled cases answer.
        let cases: Value = server
            .get("/api/portfolio")
            .add_query_param("service", "social-presence")
            .add_query_param("language", "en")
            .await
            .json();
        let cases = cases.as_array().unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0]["slug"], "nexcorp-rebrand");
        assert_eq!(cases[0]["language"], "en");

        let all_pt: Value = server.get("/api/portfolio").await.json();
        assert_eq!(all_pt.as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn portfolio_prefers_cms_results() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2024-03-01/data/query/production"))
            .and(query_param("$serviceId", "\"brand-guard\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": [{ "client": "Orbit", "project": "Watch", "imageColor": "bg-black" }]
            })))
            .expect(1)
            .mount(&upstream)
            .await;
        let server = server(state(&upstream, true));

        let cases: Value = server
            .get("/api/portfolio")
            .add_query_param("service", "brand-guard")
            .await
            .json();
        assert_eq!(cases.as_array().unwrap().len(), 1);
        assert_eq!(cases[0]["client"], "Orbit");
        assert_eq!(cases[0]["serviceIds"], json!(["brand-guard"]));
    }

    #[tokio::test]
    async fn case_study_by_slug() {
        let upstream = MockServer::start().await;
        let server = server(state(&upstream, true));

        let case: Value = server
            .get("/api/portfolio/alpha-invest-repositioning")
            .add_query_param("language", "en")
            .await
            .json();
        assert_eq!(case["client"], "Alpha Invest");

        let case: Value = server.get("/api/portfolio/casa-adega").await.json();
        assert_eq!(case["client"], "Casa Adega");
        assert_eq!(case["gallery"].as_array().unwrap().len(), 10);

        let missing = server.get("/api/portfolio/nope").expect_failure().await;
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert!(missing.json::<Value>()["message"].as_str().unwrap().contains("nope"));

        let bad_language = server
            .get("/api/portfolio/casa-adega")
            .add_query_param("language", "fr")
            .expect_failure()
            .await;
        assert_eq!(bad_language.status_code(), StatusCode::BAD_REQUEST);
    }
}
