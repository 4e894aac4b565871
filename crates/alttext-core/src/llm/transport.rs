//! Shared HTTP send and response decoding for provider clients.

use super::provider::ProviderKind;
use crate::error::{ProviderError, ProviderResult};
use serde::de::DeserializeOwned;

/// Longest response body excerpt kept in logs and error messages.
const BODY_EXCERPT_CHARS: usize = 500;

/// Send a prepared request and return the response body on a 2xx status.
///
/// Network errors, timeouts, and non-success statuses become
/// [`ProviderError::Transport`] and are logged at error level.
pub(crate) async fn send(
    provider: ProviderKind,
    request: reqwest::RequestBuilder,
) -> ProviderResult<String> {
    // reqwest errors display the request URL, which carries Gemini's `key` parameter.
    let resp = request.send().await.map_err(|e| {
        let e = e.without_url();
        let timed_out = e.is_timeout();
        tracing::error!(provider = %provider, timed_out, "{} request failed: {e}", provider.display_name());
        ProviderError::Transport {
            provider,
            message: if timed_out {
                format!("request timed out: {e}")
            } else {
                e.to_string()
            },
            status_code: None,
            timed_out,
        }
    })?;

    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        let excerpt = excerpt(&text);
        tracing::error!(
            provider = %provider,
            status = status.as_u16(),
            "{} error response: {excerpt}",
            provider.display_name()
        );
        return Err(ProviderError::Transport {
            provider,
            message: format!("HTTP {status}: {excerpt}"),
            status_code: Some(status.as_u16()),
            timed_out: false,
        });
    }

    resp.text().await.map_err(|e| {
        let e = e.without_url();
        tracing::error!(provider = %provider, "Failed to read {} response body: {e}", provider.display_name());
        ProviderError::Transport {
            provider,
            message: format!("failed to read response body: {e}"),
            status_code: Some(status.as_u16()),
            timed_out: e.is_timeout(),
        }
    })
}

/// Decode a success body into the provider's response type.
pub(crate) fn parse_json<T: DeserializeOwned>(provider: ProviderKind, body: &str) -> ProviderResult<T> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!(provider = %provider, "Unparseable {} response: {}", provider.display_name(), excerpt(body));
        unexpected(provider, format!("response is not valid JSON: {e}"))
    })
}

/// Build an `UnexpectedResponse` error, logging the offending body excerpt.
pub(crate) fn missing_field(provider: ProviderKind, field: &str, body: &str) -> ProviderError {
    tracing::error!(
        provider = %provider,
        "{} response lacks {field}: {}",
        provider.display_name(),
        excerpt(body)
    );
    unexpected(provider, format!("missing {field}"))
}

pub(crate) fn unexpected(provider: ProviderKind, message: String) -> ProviderError {
    ProviderError::UnexpectedResponse { provider, message }
}

fn excerpt(body: &str) -> String {
    if body.chars().count() <= BODY_EXCERPT_CHARS {
        body.to_string()
    } else {
        let cut: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
        format!("{cut}...(truncated)")
    }
}
