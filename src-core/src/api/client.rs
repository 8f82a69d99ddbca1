//! API Client
//!
//! Resolves paths against the configured backend, attaches credentials,
//! and turns statuses and bodies into typed results.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use super::contact::ContactMessage;
use super::credentials::CredentialStore;
use super::error::ApiError;
use super::transport::{HttpRequest, Method, MultipartForm, RequestBody, Transport};
use crate::config::ClientConfig;
use crate::url::UrlResolver;

/// One logical call before resolution
#[derive(Debug, Clone)]
pub struct ApiCall {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub auth: bool,
    pub timeout: Option<Duration>,
}

impl ApiCall {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            auth: false,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    pub fn json(mut self, value: Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Requires a stored token
    pub fn authenticated(mut self) -> Self {
        self.auth = true;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

pub struct ApiClient {
    config: ClientConfig,
    resolver: UrlResolver,
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let resolver = UrlResolver::new(config.origin());
        Self {
            config,
            resolver,
            transport,
            credentials,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn resolver(&self) -> &UrlResolver {
        &self.resolver
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    pub fn is_authenticated(&self) -> bool {
        self.stored_token().is_some()
    }

    fn stored_token(&self) -> Option<String> {
        self.credentials
            .token()
            .filter(|token| !token.trim().is_empty())
    }

    /// Issue a call and decode its JSON body. An empty body decodes as
    /// `Value::Null`.
    pub async fn request(&self, call: ApiCall) -> Result<Value, ApiError> {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if call.auth {
            let token = self.stored_token().ok_or(ApiError::MissingCredentials)?;
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
            headers.push(("x-auth-token".to_string(), token));
        }

        let is_upload = matches!(call.body, RequestBody::Multipart(_));
        let timeout = call.timeout.unwrap_or_else(|| {
            if is_upload {
                self.config.upload_timeout()
            } else {
                self.config.request_timeout()
            }
        });
        let request = HttpRequest {
            method: call.method,
            url: self.resolver.endpoint(&call.path),
            query: call.query,
            headers,
            body: call.body,
            timeout,
        };

        log::debug!("{} {}", request.method, request.url);
        let method = request.method;
        let url = request.url.clone();
        let response = self.transport.send(request).await.map_err(|e| {
            log::warn!("{} {} failed: {}", method, url, e);
            ApiError::from(e)
        })?;

        if !response.is_success() {
            let message = error_message(&response.body, response.status);
            log::warn!("{} {} -> {}: {}", method, url, response.status, message);
            if response.status == 401 {
                self.credentials.clear();
            }
            return Err(ApiError::Http {
                status: response.status,
                message,
            });
        }

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Liveness probe
    pub async fn health(&self) -> Result<Value, ApiError> {
        self.request(ApiCall::get("/api/health")).await
    }

    pub async fn submit_contact(&self, message: &ContactMessage) -> Result<Value, ApiError> {
        let body = serde_json::to_value(message).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.request(ApiCall::post("/api/contact").json(body)).await
    }
}

/// Prefer the backend's `message`/`error` field, then the raw body
fn error_message(body: &str, status: u16) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(Value::as_str) {
                return text.to_string();
            }
        }
    }
    let text = body.trim();
    if text.is_empty() {
        format!("status {}", status)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{HttpResponse, MemoryCredentials, TransportError};
    use crate::testing::ScriptedTransport;
    use serde_json::json;

    fn client(transport: &Arc<ScriptedTransport>, token: Option<&str>) -> ApiClient {
        let credentials = match token {
            Some(t) => MemoryCredentials::with_token(t),
            None => MemoryCredentials::new(),
        };
        ApiClient::new(
            ClientConfig::new("https://api.example.com/"),
            transport.clone(),
            Arc::new(credentials),
        )
    }

    #[tokio::test]
    async fn test_resolves_url_and_decodes_json() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(200, json!({"status": "ok"}));
        let value = client(&transport, None).health().await.unwrap();
        assert_eq!(value["status"], "ok");

        let sent = transport.requests();
        assert_eq!(sent[0].url, "https://api.example.com/api/health");
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(sent[0].header("Authorization"), None);
        assert_eq!(sent[0].timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_auth_headers_attached() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(200, json!({}));
        client(&transport, Some("tok"))
            .request(ApiCall::delete("/api/gallery/1").authenticated())
            .await
            .unwrap();
        let sent = transport.requests();
        assert_eq!(sent[0].header("authorization"), Some("Bearer tok"));
        assert_eq!(sent[0].header("x-auth-token"), Some("tok"));
    }

    #[tokio::test]
    async fn test_missing_token_short_circuits() {
        let transport = Arc::new(ScriptedTransport::new());
        let err = client(&transport, None)
            .request(ApiCall::delete("/api/gallery/1").authenticated())
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::MissingCredentials);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_http_error_uses_backend_message() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(400, json!({"message": "Title is required"}));
        transport.push(Ok(HttpResponse::new(502, "Bad Gateway")));
        let api = client(&transport, None);

        let err = api.request(ApiCall::get("/api/projects")).await.unwrap_err();
        assert_eq!(err, ApiError::Http { status: 400, message: "Title is required".into() });

        let err = api.request(ApiCall::get("/api/projects")).await.unwrap_err();
        assert_eq!(err, ApiError::Http { status: 502, message: "Bad Gateway".into() });
    }

    #[tokio::test]
    async fn test_unauthorized_clears_token() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(401, json!({"message": "Token is not valid"}));
        let api = client(&transport, Some("stale"));
        let err = api
            .request(ApiCall::post("/api/projects").authenticated())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(!api.is_authenticated());
    }

    #[tokio::test]
    async fn test_transport_failures_map() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push(Err(TransportError::Timeout));
        transport.push(Err(TransportError::Network("refused".into())));
        let api = client(&transport, None);
        assert_eq!(api.health().await.unwrap_err(), ApiError::Timeout);
        assert_eq!(api.health().await.unwrap_err(), ApiError::Network("refused".into()));
    }

    #[tokio::test]
    async fn test_multipart_uses_upload_timeout() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push(Ok(HttpResponse::new(204, "")));
        let value = client(&transport, Some("t"))
            .request(ApiCall::post("/api/gallery").multipart(MultipartForm::new().text("title", "x")).authenticated())
            .await
            .unwrap();
        assert_eq!(value, Value::Null);
        assert_eq!(transport.requests()[0].timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_contact_posts_json() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(200, json!({"success": true}));
        let message = ContactMessage::new("Asha", "asha@example.com", "Hello");
        client(&transport, None).submit_contact(&message).await.unwrap();
        let sent = transport.requests();
        assert_eq!(sent[0].url, "https://api.example.com/api/contact");
        match &sent[0].body {
            RequestBody::Json(body) => {
                assert_eq!(body["email"], "asha@example.com");
                assert!(body.get("subject").is_none());
            }
            other => panic!("unexpected body {other:?}"),
        }
    }
}
