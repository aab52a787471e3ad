use crate::{ClientError, Transport, TransportResponse};
use bytes::Bytes;
use std::collections::HashMap;
use wireline_rpc_service::{RPC_CONTENT_TYPE, RequestContext};

/// Sends serialized messages as HTTP POST bodies.
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(host_name: &str, port: u16, path: &str) -> Self {
        HttpTransport {
            client: reqwest::Client::new(),
            url: format!("http://{host_name}:{port}{path}"),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        buffer: Vec<u8>,
        context: &RequestContext,
    ) -> Result<TransportResponse, ClientError> {
        let mut request = self
            .client
            .post(&self.url)
            .header("content-type", RPC_CONTENT_TYPE)
            .body(Bytes::from(buffer));
        for (name, value) in &context.headers {
            request = request.header(name, value);
        }
        if let Some(timeout) = context.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|err| classify_send_error(err, &self.url))?;

        let status_code = response.status().as_u16();
        if !(200..300).contains(&status_code) {
            tracing::debug!(status_code, url = %self.url, "transport returned non-success status");
            return Err(ClientError::Transport { status_code });
        }

        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|err| classify_send_error(err, &self.url))?
            .to_vec();

        Ok(TransportResponse {
            status_code,
            headers,
            body,
        })
    }
}

fn classify_send_error(err: reqwest::Error, url: &str) -> ClientError {
    if err.is_timeout() {
        return ClientError::Timeout;
    }

    // Fold the source chain into the message so resolver failures name the
    // unreachable host; callers match on that text.
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    ClientError::Network {
        message: format!("request to {url} failed: {message}"),
    }
}
