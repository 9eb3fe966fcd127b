use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// As quatro primeiras variantes formam a taxonomia de domínio; o resto é
// infraestrutura (validação, banco, hashing).
#[derive(Debug, Error)]
pub enum AppError {
    // Entidade referenciada não existe.
    #[error("{0}")]
    NotFound(String),

    // Campo malformado ou fora de faixa (duração não positiva, custo
    // negativo, regressão de odômetro).
    #[error("{0}")]
    InvalidInput(String),

    // Operação ilegal no estado atual do ciclo de vida.
    #[error("{0}")]
    InvalidState(String),

    // Violação de unicidade (documento, placa, username, fatura duplicada).
    #[error("{0}")]
    Conflict(String),

    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "invalid_input",
                    "message": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "invalid_input", msg),
            AppError::InvalidState(msg) => (StatusCode::BAD_REQUEST, "invalid_state", msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Incorrect username or password".to_string(),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        // Resposta padrão: o tipo do erro e uma mensagem legível.
        let body = Json(json!({ "error": kind, "message": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let resp = AppError::NotFound("Lease not found".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_input_and_invalid_state_map_to_400() {
        let input = AppError::InvalidInput("End date must be after start date".into());
        let state = AppError::InvalidState("Cannot confirm a cancelled lease".into());
        assert_eq!(input.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflict_maps_to_409() {
        let resp = AppError::Conflict("A vehicle with this plate already exists".into());
        assert_eq!(resp.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn invalid_credentials_map_to_401() {
        let resp = AppError::InvalidCredentials.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
