use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::api::{MessageResponse, MultipartBody, RequestBody, RequestDescriptor};
use crate::config::ApiConfig;
use crate::http::error::ApiError;
use crate::session::{SessionGuard, TokenProvider};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Backend client with bearer injection and the re-auth interceptor.
///
/// Cheap to clone; clones share the connection pool, token provider and
/// session guard.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
    guard: Arc<dyn SessionGuard>,
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        tokens: Arc<dyn TokenProvider>,
        guard: Arc<dyn SessionGuard>,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
            guard,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session_guard(&self) -> &Arc<dyn SessionGuard> {
        &self.guard
    }

    /// Sends `request` and decodes the body into `T`.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
    ) -> Result<T, ApiError> {
        let value = self.send(request).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Sends `request` and returns the parsed JSON body (`null` if empty).
    pub async fn send(&self, request: &RequestDescriptor) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, request.target());
        let request_id = Uuid::new_v4().to_string();

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(REQUEST_ID_HEADER, &request_id);

        match self.tokens.access_token().await {
            Some(token) => builder = builder.bearer_auth(token.expose()),
            None => tracing::debug!(request_id = %request_id, "No access token; sending unauthenticated"),
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(body) => builder.multipart(build_form(body)?),
        };

        tracing::debug!(
            request_id = %request_id,
            method = %request.method,
            target = %request.target(),
            "Sending request"
        );

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(request_id = %request_id, error = %e, "Request failed without response");
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Network(e)
            }
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Network(e)
            }
        })?;

        if status.is_success() {
            tracing::debug!(request_id = %request_id, status = status.as_u16(), "Request succeeded");
            if body.iter().all(u8::is_ascii_whitespace) {
                return Ok(Value::Null);
            }
            return serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()));
        }

        match status {
            StatusCode::UNAUTHORIZED => {
                let performed = self.guard.on_unauthorized();
                tracing::warn!(
                    request_id = %request_id,
                    target = %request.target(),
                    redirected = performed,
                    "Backend rejected session"
                );
                Err(ApiError::SessionExpired)
            }
            StatusCode::REQUEST_TIMEOUT => {
                tracing::warn!(request_id = %request_id, "Backend reported request timeout");
                Err(ApiError::Timeout)
            }
            _ => {
                let message = serde_json::from_slice::<MessageResponse>(&body)
                    .ok()
                    .and_then(|b| b.message);
                tracing::warn!(
                    request_id = %request_id,
                    status = status.as_u16(),
                    message = message.as_deref().unwrap_or(""),
                    "Backend returned error"
                );
                Err(ApiError::Status {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

fn build_form(body: &MultipartBody) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for (name, value) in &body.fields {
        form = form.text(name.clone(), value.clone());
    }
    for file in &body.files {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| {
                ApiError::InvalidRequest(format!(
                    "Invalid content type '{}' for '{}': {}",
                    file.content_type, file.file_name, e
                ))
            })?;
        form = form.part(file.field.clone(), part);
    }
    Ok(form)
}
