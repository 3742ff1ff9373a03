use async_trait::async_trait;
use glossa_core::config::PreferenceConfig;
use glossa_core::error::GlossaError;
use glossa_core::traits::PreferenceSource;
use serde::Deserialize;
use tracing::debug;

/// Wire shape of the preference endpoint response.
#[derive(Debug, Deserialize)]
struct PreferenceResponse {
    language: Option<String>,
}

/// Preference source backed by a backend configuration endpoint.
///
/// The endpoint returns the user's saved language as `{"language": "fr"}`;
/// an absent field means no preference is stored.
pub struct HttpPreferenceSource {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl HttpPreferenceSource {
    /// Create from config values. `token` is attached as a bearer token
    /// when present.
    pub fn from_config(preference: &PreferenceConfig, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: preference.url.clone(),
            token,
        }
    }
}

#[async_trait]
impl PreferenceSource for HttpPreferenceSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn user_language(&self) -> Result<Option<String>, GlossaError> {
        debug!("GET {}", self.url);

        let mut request = self.client.get(&self.url);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| GlossaError::Fetch(format!("preference request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(GlossaError::Fetch(format!(
                "preference endpoint returned {}",
                resp.status()
            )));
        }

        let parsed: PreferenceResponse = resp
            .json()
            .await
            .map_err(|e| GlossaError::Fetch(format!("failed to parse preference response: {e}")))?;

        Ok(parsed.language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::response::Json;
    use axum::routing::get;
    use axum::Router;
    use serde_json::{json, Value};

    async fn serve(body: Value, status_ok: bool) -> String {
        let app = Router::new().route(
            "/api/profile",
            get(move || async move {
                if status_ok {
                    Ok(Json(body))
                } else {
                    Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/api/profile")
    }

    fn source_for(url: String) -> HttpPreferenceSource {
        let preference = PreferenceConfig { enabled: true, url };
        HttpPreferenceSource::from_config(&preference, None)
    }

    #[test]
    fn test_response_parsing() {
        let parsed: PreferenceResponse = serde_json::from_str(r#"{"language": "fr"}"#).unwrap();
        assert_eq!(parsed.language.as_deref(), Some("fr"));

        let parsed: PreferenceResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.language.is_none());
    }

    #[tokio::test]
    async fn test_user_language_returns_saved_preference() {
        let url = serve(json!({"language": "de"}), true).await;
        let source = source_for(url);
        assert_eq!(source.name(), "http");
        assert_eq!(source.user_language().await.unwrap().as_deref(), Some("de"));
    }

    #[tokio::test]
    async fn test_user_language_absent_field() {
        let url = serve(json!({}), true).await;
        let source = source_for(url);
        assert_eq!(source.user_language().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_user_language_server_error() {
        let url = serve(json!({}), false).await;
        let source = source_for(url);
        let err = source.user_language().await.unwrap_err();
        assert!(matches!(err, GlossaError::Fetch(_)));
    }

    #[tokio::test]
    async fn test_user_language_unreachable_endpoint() {
        let source = source_for("http://127.0.0.1:9/api/profile".to_string());
        let err = source.user_language().await.unwrap_err();
        assert!(matches!(err, GlossaError::Fetch(_)));
    }
}
