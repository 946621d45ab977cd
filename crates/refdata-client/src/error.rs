//! Client error types.

use refdata_core::RemoteError;

use crate::config::ConfigError;

/// Errors from RefData API calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The backend returned a non-2xx status.
    #[error("RefData API {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// HTTP status, when the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http { source, .. } | Self::Deserialization { source, .. } => {
                source.status().map(|s| s.as_u16())
            }
            Self::Config(_) => None,
        }
    }

    /// The `detail` string of a JSON error body, if there is one.
    ///
    /// Structured details (e.g. lists of validation errors) are not
    /// human-readable and yield `None`.
    pub fn detail(&self) -> Option<String> {
        let Self::Api { body, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value.get("detail")?.as_str().map(str::to_string)
    }

    /// Convert into the gateway-level error for `operation`.
    pub fn into_remote(self, operation: &str) -> RemoteError {
        let mut remote = RemoteError::new(operation, self.to_string());
        if let Some(status) = self.status() {
            remote = remote.with_status(status);
        }
        if let Some(detail) = self.detail() {
            remote = remote.with_detail(detail);
        }
        remote
    }
}

/// Turn a response into `T`, or the matching [`ClientError`].
pub(crate) async fn decode<T>(endpoint: &str, resp: reqwest::Response) -> Result<T, ClientError>
where
    T: serde::de::DeserializeOwned,
{
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(endpoint, status, "RefData API returned an error status");
        return Err(ClientError::Api {
            endpoint: endpoint.to_string(),
            status,
            body,
        });
    }

    resp.json().await.map_err(|e| ClientError::Deserialization {
        endpoint: endpoint.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, body: &str) -> ClientError {
        ClientError::Api {
            endpoint: "POST /structures".into(),
            status,
            body: body.into(),
        }
    }

    #[test]
    fn detail_is_extracted_from_json_body() {
        let err = api(409, r#"{"detail":"Structure name already exists"}"#);
        assert_eq!(err.detail().as_deref(), Some("Structure name already exists"));

        let remote = err.into_remote("createStructure");
        assert_eq!(remote.operation, "createStructure");
        assert_eq!(remote.status, Some(409));
        assert_eq!(remote.user_message("fallback"), "Structure name already exists");
    }

    #[test]
    fn structured_detail_is_ignored() {
        let err = api(422, r#"{"detail":[{"loc":["body","name"],"msg":"field required"}]}"#);
        assert_eq!(err.detail(), None);
        assert_eq!(err.into_remote("createStructure").user_message("fallback"), "fallback");
    }

    #[test]
    fn non_json_body_has_no_detail() {
        let err = api(502, "Bad Gateway");
        assert_eq!(err.detail(), None);
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn config_error_has_no_status() {
        let err = ClientError::Config(ConfigError::InvalidUrl("x".into(), "y".into()));
        let remote = err.into_remote("listStructures");
        assert_eq!(remote.status, None);
        assert_eq!(remote.detail, None);
    }
}
