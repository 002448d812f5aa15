//! PostgREST-compatible HTTP record source.
//!
//! Issues `GET {base}/rest/v1/{table}?select=*` and decodes the JSON body.
//! When an API key is configured it is sent both as the `apikey` header and
//! as a bearer token, which is what Supabase-hosted endpoints expect.

use std::time::Duration;

use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::records::{Invoice, RecordFields, decode_payload};
use crate::sources::errors::FetchError;
use crate::sources::traits::RecordSource;

/// Longest error body kept in a [`FetchError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 200;

pub struct HttpSource {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    fields: RecordFields,
}

impl HttpSource {
    /// Build a source for `table` on the REST endpoint at `base_url`.
    ///
    /// `timeout` is the per-request deadline.
    pub fn new(
        base_url: &str,
        table: &str,
        api_key: Option<String>,
        timeout: Duration,
        fields: RecordFields,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(
                    event = "core.source.http_client_build_failed",
                    error = %e,
                    "Falling back to default HTTP client without timeout"
                );
                reqwest::Client::new()
            });

        Self {
            client,
            endpoint: endpoint_url(base_url, table),
            api_key,
            fields,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn endpoint_url(base_url: &str, table: &str) -> String {
    format!(
        "{}/rest/v1/{}?select=*",
        base_url.trim_end_matches('/'),
        table
    )
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}...", head)
    }
}

impl RecordSource for HttpSource {
    async fn list_invoices(&self) -> Result<Option<Vec<Invoice>>, FetchError> {
        let mut request = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json");
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| FetchError::Request {
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let payload: Value = response.json().await.map_err(|e| FetchError::Decode {
            message: e.to_string(),
        })?;

        decode_payload(payload, &self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve exactly one HTTP response and hand back the raw request text.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let _ = tx.send(String::from_utf8_lossy(&request).to_string());
        });

        (format!("http://{}", addr), rx)
    }

    fn source(base_url: &str, api_key: Option<&str>) -> HttpSource {
        HttpSource::new(
            base_url,
            "invoices",
            api_key.map(str::to_string),
            Duration::from_secs(5),
            RecordFields::default(),
        )
    }

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        assert_eq!(
            endpoint_url("https://db.example/", "invoices"),
            "https://db.example/rest/v1/invoices?select=*"
        );
        assert_eq!(
            endpoint_url("https://db.example", "bills"),
            "https://db.example/rest/v1/bills?select=*"
        );
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("  short \n"), "short");
        let long = "x".repeat(MAX_ERROR_BODY_CHARS + 10);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), MAX_ERROR_BODY_CHARS + 3);
    }

    #[tokio::test]
    async fn test_fetch_decodes_records_and_sends_key() {
        let (base, request_rx) = serve_once(
            "HTTP/1.1 200 OK",
            r#"[{"id":"1","balance":100,"customerRef":{"name":"A"}}]"#,
        )
        .await;

        let records = source(&base, Some("secret"))
            .list_invoices()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), "1");
        assert_eq!(records[0].customer_name().as_deref(), Some("A"));

        let request = request_rx.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /rest/v1/invoices?select=*"));
        assert!(request.contains("apikey: secret"));
        assert!(request.contains("authorization: bearer secret"));
    }

    #[tokio::test]
    async fn test_null_body_is_absent_payload() {
        let (base, _rx) = serve_once("HTTP/1.1 200 OK", "null").await;
        let result = source(&base, None).list_invoices().await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_error_status_is_fetch_failure() {
        let (base, _rx) = serve_once(
            "HTTP/1.1 401 Unauthorized",
            r#"{"message":"Invalid API key"}"#,
        )
        .await;
        let err = source(&base, None).list_invoices().await.unwrap_err();
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Invalid API key"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_request_failure() {
        // Bind and drop to get a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = source(&format!("http://{}", addr), None)
            .list_invoices()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
    }
}
