use super::{AppState, ClassifyBody, ClassifyResponse, ERROR_CATEGORY, ReviseBody, ReviseResponse};
use crate::error::{InputError, MailroomError};
use crate::triage::{ClassificationRequest, RevisionRequest};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

const INVALID_BODY_MESSAGE: &str = "Corpo da requisição inválido: envie um JSON válido.";

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": message.into() })),
    )
        .into_response()
}

fn invalid_body_response(route: &str, rejection: &JsonRejection) -> Response {
    tracing::warn!(route, "Rejected request body: {}", rejection.body_text());
    error_response(StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE)
}

/// Client-facing wording for a rejected field.
fn input_message(error: &InputError) -> String {
    match error {
        InputError::EmptyField(field) => {
            format!("A chave \"{field}\" é obrigatória e não pode estar vazia.")
        }
    }
}

fn processing_message(error: &MailroomError) -> String {
    format!("Erro ao processar: {error}")
}

/// GET /health
pub(super) async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "alive" }))
}

/// POST /api/classificar
pub(super) async fn handle_classify(
    State(state): State<AppState>,
    body: Result<Json<ClassifyBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return invalid_body_response("classify", &rejection),
    };

    let request = ClassificationRequest::new(body.email_texto);
    match state.classifier.classify(&request).await {
        Ok(result) => Json(ClassifyResponse {
            categoria: result.category.to_string(),
            resposta: result.suggested_reply,
        })
        .into_response(),
        Err(MailroomError::Input(e)) => error_response(StatusCode::BAD_REQUEST, input_message(&e)),
        Err(e) => {
            tracing::warn!("Classification failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ClassifyResponse {
                    categoria: ERROR_CATEGORY.to_string(),
                    resposta: processing_message(&e),
                }),
            )
                .into_response()
        }
    }
}

/// POST /api/revisar
pub(super) async fn handle_revise(
    State(state): State<AppState>,
    body: Result<Json<ReviseBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return invalid_body_response("revise", &rejection),
    };

    let request = RevisionRequest::new(body.texto, body.acao);
    match state.reviser.revise(&request).await {
        Ok(result) => Json(ReviseResponse {
            texto_revisado: result.revised_text,
        })
        .into_response(),
        Err(MailroomError::Input(e)) => error_response(StatusCode::BAD_REQUEST, input_message(&e)),
        Err(e) => {
            tracing::warn!("Revision failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, processing_message(&e))
        }
    }
}
