//! Provider HTTP API 호출 공용 유틸리티.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use url::Url;

/// Provider API 호출용 HTTP 클라이언트를 생성한다.
/// 타임아웃이 주어지지 않으면 reqwest 기본값(무제한)을 그대로 쓴다.
pub fn build_api_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("failed to build HTTP client")
}

/// 베이스 URL이 절대 http(s) URL인지 검사하고 하위 경로를 붙인 엔드포인트를 만든다.
pub fn endpoint_url(api_base: &str, path: &str) -> Result<String> {
    let parsed = Url::parse(api_base)
        .with_context(|| format!("invalid api_base URL: {api_base}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("unsupported api_base scheme '{}': {api_base}", parsed.scheme());
    }
    Ok(format!(
        "{}/{}",
        api_base.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

/// JSON 응답을 기대하는 요청을 전송하고 실패/파싱 오류를 표준화한다.
pub async fn send_json(
    provider_name: &str,
    action: &str,
    request: RequestBuilder,
) -> Result<Value> {
    let response = request
        .send()
        .await
        .with_context(|| format!("{provider_name}: failed to {action}"))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .with_context(|| format!("{provider_name}: failed to read {action} response body"))?;

    if !status.is_success() {
        bail!("{provider_name}: {action} failed ({status}): {body}");
    }

    serde_json::from_str(&body)
        .with_context(|| format!("{provider_name}: invalid JSON response while {action}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        assert_eq!(
            endpoint_url("https://api.openai.com/v1/", "/chat/completions").unwrap(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            endpoint_url("http://127.0.0.1:8080", "chat/completions").unwrap(),
            "http://127.0.0.1:8080/chat/completions"
        );
    }

    #[test]
    fn endpoint_rejects_relative_or_non_http_base() {
        assert!(endpoint_url("api.openai.com/v1", "chat/completions").is_err());
        assert!(endpoint_url("ftp://example.com", "chat/completions").is_err());
    }
}
