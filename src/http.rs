//! Shared HTTP plumbing for the upstream clients

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::HttpConfig;
use crate::error::{GameError, Result};

/// Longest body excerpt carried in an error message
const MAX_ERROR_BODY: usize = 300;

/// Build a client with the configured timeout and user agent
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout())
        .build()?;
    Ok(client)
}

/// Send a request once and decode its JSON body with [`decode_body`]
pub async fn get_json<T: DeserializeOwned>(service: &'static str, request: RequestBuilder) -> Result<T> {
    let response = request.send().await?;
    let status = response.status().as_u16();
    let text = response.text().await?;
    log::debug!("{} responded {} ({} bytes)", service, status, text.len());

    decode_body(service, status, &text)
}

/// Classify a response by status and body.
///
/// A 2xx body that does not decode becomes `UpstreamUnavailable`. A non-2xx
/// JSON object that still decodes as `T` is a structured failure and goes back
/// to the caller's parser; any other non-2xx response becomes `HttpStatus`.
pub fn decode_body<T: DeserializeOwned>(service: &'static str, status: u16, text: &str) -> Result<T> {
    let decoded = serde_json::from_str::<T>(text);

    if (200..300).contains(&status) {
        return decoded.map_err(|e| {
            GameError::UpstreamUnavailable(format!("unexpected response from {}: {} ({})", service, e, excerpt(text)))
        });
    }

    match decoded {
        Ok(body) if text.trim_start().starts_with('{') => {
            log::debug!("{} HTTP {} carries a structured failure body", service, status);
            Ok(body)
        }
        _ => Err(GameError::HttpStatus {
            service,
            status,
            message: excerpt(text),
        }),
    }
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.len() <= MAX_ERROR_BODY {
        return trimmed.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}

/// One-shot local HTTP server for client tests
#[cfg(test)]
pub(crate) mod testing {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer the first request on a local port with `status` and `body`,
    /// returning the base URL to point a client at
    pub async fn serve_once(status: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 16 * 1024];
            let mut read = 0;
            loop {
                let n = stream.read(&mut buf[read..]).await.unwrap();
                read += n;
                if n == 0 || buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }
}
