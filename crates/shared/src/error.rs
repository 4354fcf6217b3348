use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentinel phrase the model returns when it cannot interpret the input.
pub const INVALID_INPUT_SENTINEL: &str = "invalid input";

/// Everything a conversion attempt can surface to the user. The `Display`
/// form is the message shown in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    #[error("Please enter at least 2 characters.")]
    TooShort,
    #[error("The AI couldn't recognize this as valid text to convert. Please try again.")]
    SemanticReject,
    #[error("Invalid API Key. Please check your configuration.")]
    AuthError,
    #[error("Network error. Please check your internet connection and try again.")]
    NetworkError,
    #[error("API quota exceeded. Please wait a moment before trying again.")]
    QuotaError,
    #[error("An unexpected error occurred. Please try again later.")]
    UnknownError,
}

impl ErrorKind {
    /// Buckets a backend failure message. Checked in priority order, so a
    /// message mentioning both "403" and "network" is an auth failure.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("api key") || lower.contains("403") || lower.contains("401") {
            ErrorKind::AuthError
        } else if lower.contains("failed to fetch")
            || lower.contains("fetch")
            || lower.contains("network")
        {
            ErrorKind::NetworkError
        } else if lower.contains("quota") || lower.contains("429") {
            ErrorKind::QuotaError
        } else {
            ErrorKind::UnknownError
        }
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// True when the model's reply is the "could not convert" sentinel, in any
/// casing and with any surrounding text.
pub fn is_semantic_reject(reply: &str) -> bool {
    reply.to_lowercase().contains(INVALID_INPUT_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_status_is_auth_not_unknown() {
        assert_eq!(ErrorKind::classify("403 Forbidden"), ErrorKind::AuthError);
    }

    #[test]
    fn auth_outranks_network_and_quota() {
        assert_eq!(
            ErrorKind::classify("network layer returned 401 after quota check"),
            ErrorKind::AuthError
        );
        assert_eq!(
            ErrorKind::classify("API key not valid. Please pass a valid API key."),
            ErrorKind::AuthError
        );
    }

    #[test]
    fn network_outranks_quota() {
        assert_eq!(
            ErrorKind::classify("TypeError: Failed to fetch (quota unknown)"),
            ErrorKind::NetworkError
        );
        assert_eq!(
            ErrorKind::classify("network error: connection refused"),
            ErrorKind::NetworkError
        );
    }

    #[test]
    fn quota_and_rate_limits() {
        assert_eq!(
            ErrorKind::classify("429 Too Many Requests"),
            ErrorKind::QuotaError
        );
        assert_eq!(
            ErrorKind::classify("Resource has been exhausted (e.g. check QUOTA)."),
            ErrorKind::QuotaError
        );
    }

    #[test]
    fn anything_else_is_unknown() {
        assert_eq!(
            ErrorKind::classify("500 Internal Server Error"),
            ErrorKind::UnknownError
        );
        assert_eq!(ErrorKind::classify(""), ErrorKind::UnknownError);
    }

    #[test]
    fn sentinel_matches_any_case_and_context() {
        assert!(is_semantic_reject("Invalid input"));
        assert!(is_semantic_reject("Sorry: INVALID INPUT."));
        assert!(is_semantic_reject("this is invalid input, try again"));
        assert!(!is_semantic_reject("আমি ভালো আছি।"));
    }

    #[test]
    fn messages_match_the_form_copy() {
        assert_eq!(
            ErrorKind::TooShort.user_message(),
            "Please enter at least 2 characters."
        );
        assert_eq!(
            ErrorKind::NetworkError.to_string(),
            "Network error. Please check your internet connection and try again."
        );
        assert!(ErrorKind::AuthError.user_message().starts_with("Invalid API Key"));
    }
}
