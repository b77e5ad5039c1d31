use log::info;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const MAX_RESPONSE_SIZE: usize = 10 * 1024 * 1024;
const HTML_CONTENT_TYPES: [&str; 2] = ["text/html", "application/xhtml+xml"];
const USER_AGENT: &str = "Mozilla/5.0 (compatible; ScheduleScrape/0.1)";

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }

    #[cfg(test)]
    pub(crate) fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// GET the schedule page and return its HTML body.
    pub async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        info!("Fetching {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpError(status.as_u16()));
        }

        if let Some(content_type) = response.headers().get("content-type") {
            let content_type_str = content_type.to_str().unwrap_or("");
            if !HTML_CONTENT_TYPES.iter().any(|ct| content_type_str.contains(ct)) {
                return Err(FetchError::InvalidContentType(content_type_str.to_string()));
            }
        }

        if let Some(content_length) = response.content_length()
            && content_length > MAX_RESPONSE_SIZE as u64
        {
            return Err(FetchError::TooLarge(content_length));
        }

        let body = response.text().await?;
        if body.len() > MAX_RESPONSE_SIZE {
            return Err(FetchError::TooLarge(body.len() as u64));
        }

        info!("Fetched {} bytes", body.len());
        Ok(body)
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    HttpError(u16),
    #[error("Invalid content type: {0}")]
    InvalidContentType(String),
    #[error("Response too large: {0} bytes")]
    TooLarge(u64),
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port.
    async fn serve_once(response: String) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        Url::parse(&format!("http://{addr}/sports/volleyball/schedule")).unwrap()
    }

    fn response(status: &str, content_type: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    fn client() -> HttpClient {
        HttpClient::from_client(Client::builder().no_proxy().build().unwrap())
    }

    #[tokio::test]
    async fn returns_html_body() {
        let body = "<html><body>schedule</body></html>";
        let url = serve_once(response("200 OK", "text/html; charset=utf-8", body)).await;

        assert_eq!(client().fetch(&url).await.unwrap(), body);
    }

    #[tokio::test]
    async fn rejects_error_status() {
        let url = serve_once(response("404 Not Found", "text/html", "gone")).await;

        let err = client().fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::HttpError(404)));
    }

    #[tokio::test]
    async fn accepts_xhtml() {
        let body = "<html xmlns=\"http://www.w3.org/1999/xhtml\"><body>schedule</body></html>";
        let url = serve_once(response("200 OK", "application/xhtml+xml; charset=utf-8", body)).await;

        assert_eq!(client().fetch(&url).await.unwrap(), body);
    }

    #[tokio::test]
    async fn rejects_non_html() {
        let url = serve_once(response("200 OK", "application/json", "{}")).await;

        let err = client().fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidContentType(ct) if ct == "application/json"));
    }
}
