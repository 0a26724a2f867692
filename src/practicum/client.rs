use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::{config::PollerConfig, domain::PollCursor};

use super::error::PollError;

/// Anything that can answer "what changed since `from_date`" with a raw payload.
pub trait StatusSource: Send + Sync {
    fn fetch(&self, from_date: PollCursor) -> BoxFuture<'_, Result<Value, PollError>>;
}

#[derive(Clone)]
pub struct PracticumClient {
    http: Client,
    endpoint: Url,
    token: String,
    timeout: Duration,
}

impl PracticumClient {
    pub fn new(http: Client, config: &PollerConfig, token: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: config.endpoint.clone(),
            token: token.into(),
            timeout: config.request_timeout,
        }
    }

    pub async fn homework_statuses(&self, from_date: PollCursor) -> Result<Value, PollError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date.0)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(target: "practicum", error = %err, endpoint = %self.endpoint, "endpoint unreachable");
                PollError::Transport(err)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!(target: "practicum", %status, endpoint = %self.endpoint, "unexpected response status");
            return Err(PollError::Upstream { status });
        }

        let body = response.text().await.map_err(PollError::Transport)?;
        serde_json::from_str(&body)
            .map_err(|err| PollError::schema(format!("body is not valid JSON: {err}")))
    }
}

impl StatusSource for PracticumClient {
    fn fetch(&self, from_date: PollCursor) -> BoxFuture<'_, Result<Value, PollError>> {
        Box::pin(self.homework_statuses(from_date))
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    use super::*;

    /// Accepts one connection, captures the request head, answers with a canned response.
    async fn one_shot_server(status_line: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = socket.read(&mut buf).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..read]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });
        let url = Url::parse(&format!("http://{addr}/api/user_api/homework_statuses/")).unwrap();
        (url, handle)
    }

    fn client_for(endpoint: Url) -> PracticumClient {
        let config = PollerConfig {
            endpoint,
            retry_period: Duration::from_secs(600),
            request_timeout: Duration::from_secs(5),
        };
        let http = Client::builder().no_proxy().build().unwrap();
        PracticumClient::new(http, &config, "secret-token")
    }

    #[tokio::test]
    async fn test_success_returns_decoded_body_verbatim() {
        let (url, server) =
            one_shot_server("200 OK", r#"{"homeworks":[],"current_date":1700000000,"extra":true}"#)
                .await;

        let body = client_for(url).fetch(PollCursor(1_699_999_400)).await.unwrap();
        assert_eq!(body["current_date"], 1_700_000_000);
        assert_eq!(body["extra"], true);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/user_api/homework_statuses/?from_date=1699999400 "));
        assert!(request
            .to_ascii_lowercase()
            .contains("authorization: oauth secret-token"));
    }

    #[tokio::test]
    async fn test_non_ok_status_is_upstream_error() {
        let (url, server) = one_shot_server("503 Service Unavailable", "").await;

        let err = client_for(url).fetch(PollCursor(0)).await.unwrap_err();
        match err {
            PollError::Upstream { status } => assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE),
            other => panic!("expected upstream error, got {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_non_json_body_is_schema_error() {
        let (url, server) = one_shot_server("200 OK", "<html>maintenance</html>").await;

        let err = client_for(url).fetch(PollCursor(0)).await.unwrap_err();
        assert!(matches!(err, PollError::Schema(_)), "got {err:?}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_refused_connection_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/")).unwrap();
        let err = client_for(url).fetch(PollCursor(0)).await.unwrap_err();
        assert!(matches!(err, PollError::Transport(_)), "got {err:?}");
        assert_eq!(err.kind(), "transport");
    }
}
