use reqwest::header::HeaderValue;
use reqwest::{Client, header};
use thiserror::Error;

/// Client shared by everything that talks HTTP. Responses are never served from a cache,
/// a cached answer says nothing about reachability.
pub fn new_client() -> Result<Client, HttpClientError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store"));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));

    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    let client = Client::builder().user_agent(user_agent).default_headers(headers).build()?;
    Ok(client)
}

#[derive(Error, Debug)]
pub enum HttpClientError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_client_disables_caching() -> Result<(), HttpClientError> {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/")
            .with_status(204)
            .match_header("cache-control", "no-cache, no-store")
            .match_header("pragma", "no-cache")
            .create_async()
            .await;

        let client = new_client()?;
        client.get(server.url()).send().await?;

        // Verify that the call came in with the headers set
        mock.assert_async().await;

        Ok(())
    }
}
