//! Workflow dispatch, status and registry listing.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use opsgate_types::workflow::{DispatchAck, WorkflowName, WorkflowStatus};

use crate::http::error::AppError;
use crate::http::extractors::admin::AdminAuthorized;
use crate::http::extractors::csrf::CsrfVerified;
use crate::http::response::OkResponse;
use crate::state::AppState;

/// Optional body of a dispatch request. An empty body means the default ref.
#[derive(Debug, Default, Deserialize)]
pub struct DispatchRequest {
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WorkflowEntry {
    pub name: WorkflowName,
    pub workflow: String,
}

#[derive(Debug, Serialize)]
pub struct WorkflowList {
    pub workflows: Vec<WorkflowEntry>,
    pub default_ref: String,
}

/// POST /api/admin/workflows/{name}/run - Dispatch a workflow run.
pub async fn run_workflow(
    State(state): State<AppState>,
    _admin: AdminAuthorized,
    _csrf: CsrfVerified,
    WithRejection(Path(name), _): WithRejection<Path<String>, AppError>,
    body: Bytes,
) -> Result<OkResponse<DispatchAck>, AppError> {
    let request = parse_dispatch_body(&body)?;
    let ack = state
        .orchestrator
        .dispatch(&name, request.git_ref.as_deref())
        .await?;
    Ok(OkResponse::new(ack).with_status(StatusCode::ACCEPTED))
}

/// GET /api/admin/workflows/{name}/status - Latest run of a workflow.
pub async fn get_workflow_status(
    State(state): State<AppState>,
    _admin: AdminAuthorized,
    WithRejection(Path(name), _): WithRejection<Path<String>, AppError>,
) -> Result<OkResponse<WorkflowStatus>, AppError> {
    let status = state.orchestrator.status(&name).await?;
    Ok(OkResponse::new(status))
}

/// GET /api/admin/workflows - Registered workflows and the default ref.
pub async fn list_workflows(
    State(state): State<AppState>,
    _admin: AdminAuthorized,
) -> OkResponse<WorkflowList> {
    let orchestrator = &state.orchestrator;
    let workflows = orchestrator
        .registry()
        .entries()
        .map(|(name, workflow)| WorkflowEntry {
            name,
            workflow: workflow.to_string(),
        })
        .collect();

    OkResponse::new(WorkflowList {
        workflows,
        default_ref: orchestrator.default_ref().to_string(),
    })
}

fn parse_dispatch_body(body: &[u8]) -> Result<DispatchRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DispatchRequest::default());
    }
    serde_json::from_slice::<Option<DispatchRequest>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| AppError::BadRequest(format!("invalid request body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_uses_default_ref() {
        assert!(parse_dispatch_body(b"").unwrap().git_ref.is_none());
        assert!(parse_dispatch_body(b"  \n").unwrap().git_ref.is_none());
        assert!(parse_dispatch_body(b"null").unwrap().git_ref.is_none());
        assert!(parse_dispatch_body(b"{}").unwrap().git_ref.is_none());
    }

    #[test]
    fn test_body_ref() {
        let request = parse_dispatch_body(br#"{"ref": "release"}"#).unwrap();
        assert_eq!(request.git_ref.as_deref(), Some("release"));
    }

    #[test]
    fn test_malformed_body_is_bad_request() {
        assert!(matches!(
            parse_dispatch_body(b"{ref:"),
            Err(AppError::BadRequest(_))
        ));
    }
}
