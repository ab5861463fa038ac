//! Request handlers.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokyon_consultant::{ChatSession, SERVICES, Service};
use tokyon_content::{CaseStudy, Language, find_case, local_portfolio};
use tokyon_leads::{LeadSubmission, RecordId};
use tracing::info;

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct LeadCreated {
    pub message: &'static str,
    pub id: RecordId,
}

/// `POST /api/submit-lead`
pub async fn submit_lead(
    State(state): State<AppState>,
    payload: Result<Json<LeadSubmission>, JsonRejection>,
) -> Result<Json<LeadCreated>, ApiError> {
    let Json(lead) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let id = state.leads.submit(&lead).await?;
    info!(card_id = %id, "lead delivered");

    Ok(Json(LeadCreated {
        message: "Lead criado com sucesso",
        id,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ConsultantRequest {
    #[serde(default)]
    pub session: ChatSession,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ConsultantReply {
    pub reply: String,
    pub session: ChatSession,
}

/// `POST /api/consultant`
///
/// The browser owns the transcript and sends it back with every message.
pub async fn consultant(
    State(state): State<AppState>,
    payload: Result<Json<ConsultantRequest>, JsonRejection>,
) -> Result<Json<ConsultantReply>, ApiError> {
    let Json(ConsultantRequest {
        mut session,
        message,
    }) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".into()));
    }

    let reply = state.consultant.send_message(&mut session, &message).await;
    Ok(Json(ConsultantReply { reply, session }))
}

/// `GET /api/services`
pub async fn services() -> Json<&'static [Service]> {
    Json(SERVICES)
}

#[derive(Debug, Deserialize)]
pub struct PortfolioQuery {
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub language: Language,
}

/// `GET /api/portfolio?service=&language=`
///
/// With a service, asks the CMS first; without one, lists every bundled case.
pub async fn portfolio(
    State(state): State<AppState>,
    query: Result<Query<PortfolioQuery>, QueryRejection>,
) -> Result<Json<Vec<CaseStudy>>, ApiError> {
    let Query(PortfolioQuery { service, language }) =
        query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let cases = match service.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(service) => state.content.portfolio_for_service(service, language).await,
        None => local_portfolio(None, language),
    };
    Ok(Json(cases))
}

#[derive(Debug, Deserialize)]
pub struct LanguageQuery {
    #[serde(default)]
    pub language: Language,
}

/// `GET /api/portfolio/:slug?language=`
pub async fn case_study(
    Path(slug): Path<String>,
    query: Result<Query<LanguageQuery>, QueryRejection>,
) -> Result<Json<CaseStudy>, ApiError> {
    let Query(LanguageQuery { language }) =
        query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    find_case(&slug, language)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Case study '{slug}' not found")))
}

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Fallback for any method other than the route's own.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "message": "Method not allowed" })),
    )
        .into_response()
}
