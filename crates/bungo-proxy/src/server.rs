//! Actix Web HTTP server.
//!
//! Endpoints:
//! - `POST /ask`
//! - `GET /health`

use crate::{config::ProxyConfig, fault, fault::UpstreamFailure};
use actix_cors::Cors;
use actix_web::{
    error::JsonPayloadError,
    http::{header::ContentType, StatusCode},
    middleware::Logger, web, App, HttpRequest,
    HttpResponse, HttpServer, ResponseError,
};
use anyhow::{Context, Result};
use bungo_prompts::{ContextEnricher, RoleCatalog};
use bungo_protocol::AskRequest;
use bungo_providers::{ChatCompletionClient, OpenAIClient, ProviderError};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Largest accepted `/ask` body.
pub const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

const OPAQUE_DETAIL: &str = "Internal Server Error";

pub struct AppState {
    pub client: Arc<dyn ChatCompletionClient>,
    pub catalog: RoleCatalog,
}

impl AppState {
    pub fn new(client: Arc<dyn ChatCompletionClient>) -> Self {
        Self {
            client,
            catalog: RoleCatalog::builtin(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error(transparent)]
    Upstream(#[from] UpstreamFailure),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("unhandled upstream error: {0}")]
    Unhandled(#[from] ProviderError),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Upstream(failure) => {
                StatusCode::from_u16(failure.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Unhandled(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let detail = match self {
            Self::Upstream(failure) => failure.message.as_str(),
            Self::InvalidRequest(detail) | Self::PayloadTooLarge(detail) => detail.as_str(),
            Self::Unhandled(_) => OPAQUE_DETAIL,
        };
        HttpResponse::build(self.status_code()).json(ErrorBody { detail })
    }
}

/// CORS policy: any origin and header, GET and POST only.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST"])
        .allow_any_header()
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = %req.path(), error = %err, "rejecting request body");
    match err {
        JsonPayloadError::OverflowKnownLength { length, limit } => ProxyError::PayloadTooLarge(
            format!("Payload too large: {length} bytes exceeds limit of {limit} bytes"),
        )
        .into(),
        JsonPayloadError::Overflow { limit } => {
            ProxyError::PayloadTooLarge(format!("Payload exceeds limit of {limit} bytes")).into()
        }
        other => ProxyError::InvalidRequest(other.to_string()).into(),
    }
}

/// Register routes and the JSON extractor config on an app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health_check))
        .route("/ask", web::post().to(handle_ask));
}

pub async fn serve(config: ProxyConfig) -> Result<()> {
    let client = OpenAIClient::new(config.provider_config())
        .context("failed to build upstream client")?;
    serve_with_client(&config, Arc::new(client)).await
}

pub async fn serve_with_client(
    config: &ProxyConfig,
    client: Arc<dyn ChatCompletionClient>,
) -> Result<()> {
    let addr = config.bind_addr();
    info!(
        addr = %addr,
        upstream = %config.base_url_trimmed(),
        model = %client.model(),
        "bungo listening"
    );

    let state = web::Data::new(AppState::new(client));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors())
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind(&addr)
    .with_context(|| format!("failed to bind {}", addr))?
    .run()
    .await
    .context("server error")?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

async fn handle_ask(
    state: web::Data<AppState>,
    body: web::Json<AskRequest>,
) -> Result<HttpResponse, ProxyError> {
    let mut request = body.into_inner();
    ContextEnricher::new(&state.catalog).enrich(&mut request);

    match state.client.create_chat_completion(&request.messages).await {
        Ok(completion) => Ok(HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(completion.into_body())),
        Err(err) => {
            let kind = err.kind();
            match fault::translate(err) {
                Ok(failure) => {
                    warn!(
                        kind,
                        status = failure.status,
                        detail = %failure.message,
                        "upstream request failed"
                    );
                    Err(failure.into())
                }
                Err(err) => {
                    error!(kind, error = %err, "unhandled upstream error");
                    Err(err.into())
                }
            }
        }
    }
}
