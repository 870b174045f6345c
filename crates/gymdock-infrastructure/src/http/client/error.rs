use gymdock_domain::DomainError;
use reqwest::StatusCode;
use thiserror::Error;

/// A non-2xx answer from the backend, with the `detail` text it carried.
#[derive(Debug, Error)]
#[error("HTTP {status}: {message}")]
pub struct HttpStatusError {
    pub status: StatusCode,
    pub message: String,
}

impl HttpStatusError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.status.is_server_error() || self.status == StatusCode::TOO_MANY_REQUESTS
    }
}

/// Pull a human message out of an error body.
///
/// FastAPI-style `{"detail": "..."}` comes first, then `{"message": "..."}`.
/// Validation errors carry `detail` as a list; their `msg` fields are joined.
pub(super) fn extract_error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return truncate(body.trim(), 200);
    };

    match &json["detail"] {
        serde_json::Value::String(detail) => return detail.clone(),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item["msg"].as_str())
                .collect();
            if !messages.is_empty() {
                return messages.join("; ");
            }
        }
        _ => {}
    }

    json["message"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| truncate(body.trim(), 200))
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Map a client failure onto the domain taxonomy.
///
/// `not_found` builds the error for a 404 so each endpoint can name what
/// was missing.
pub(super) fn to_domain_error<F>(error: anyhow::Error, not_found: F) -> DomainError
where
    F: FnOnce(String) -> DomainError,
{
    if let Some(status_err) = error.downcast_ref::<HttpStatusError>() {
        let message = status_err.message.clone();
        return match status_err.status {
            StatusCode::NOT_FOUND => not_found(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                DomainError::Validation(message)
            }
            StatusCode::CONFLICT => DomainError::Conflict(message),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                DomainError::Timeout(message)
            }
            status =>DomainError::ExternalService(format!("{}: {}", status, message)),
        };
    }

    if let Some(reqwest_err) = error.downcast_ref::<reqwest::Error>() {
        if reqwest_err.is_timeout() {
            return DomainError::Timeout(reqwest_err.to_string());
        }
        if reqwest_err.is_decode() {
            return DomainError::Deserialization(reqwest_err.to_string());
        }
        return DomainError::Network(reqwest_err.to_string());
    }

    if error.downcast_ref::<serde_json::Error>().is_some() {
        return DomainError::Deserialization(format!("{:#}", error));
    }

    DomainError::Infrastructure(format!("{:#}", error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message_variants() {
        assert_eq!(
            extract_error_message(r#"{"detail":"Member not found"}"#),
            "Member not found"
        );
        assert_eq!(
            extract_error_message(
                r#"{"detail":[{"loc":["body","name"],"msg":"field required"},{"msg":"bad email"}]}"#
            ),
            "field required; bad email"
        );
        assert_eq!(extract_error_message(r#"{"message":"nope"}"#), "nope");
        assert_eq!(extract_error_message("Internal Server Error"), "Internal Server Error");
    }

    #[test]
    fn test_status_mapping() {
        let not_found = to_domain_error(
            HttpStatusError::new(StatusCode::NOT_FOUND, "Member not found").into(),
            DomainError::MemberNotFound,
        );
        assert!(matches!(not_found, DomainError::MemberNotFound(ref m) if m == "Member not found"));

        let duplicate = to_domain_error(
            HttpStatusError::new(StatusCode::BAD_REQUEST, "Member ID already exists").into(),
            DomainError::NotFound,
        );
        assert!(matches!(duplicate, DomainError::Validation(_)));

        let server = to_domain_error(
            HttpStatusError::new(StatusCode::SERVICE_UNAVAILABLE, "down").into(),
            DomainError::NotFound,
        );
        assert!(server.is_recoverable());

        let other = to_domain_error(anyhow::anyhow!("boom"), DomainError::NotFound);
        assert!(matches!(other, DomainError::Infrastructure(_)));
    }
}
