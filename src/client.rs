use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::error::ClientError;
use crate::model::Recipe;
use crate::server::SEARCH_PATH;
use crate::session::SearchQuery;

/// Talks to a running search proxy
pub struct ProxyClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: Option<String>,
}

impl ProxyClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(60));
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Run one search. An empty list is a successful answer.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Recipe>, ClientError> {
        let mut params = vec![("ingredients", query.ingredients.as_str())];
        if let Some(dietary) = &query.dietary {
            params.push(("dietary", dietary.as_str()));
        }

        debug!("Querying proxy with {:?}", params);
        let response = self
            .client
            .get(format!("{}{}", self.base_url, SEARCH_PATH))
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorPayload>()
                .await
                .ok()
                .and_then(|payload| payload.error)
                .unwrap_or_else(|| "Failed to fetch recipes".to_string());

            return Err(ClientError::Proxy {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn query(dietary: Option<&str>) -> SearchQuery {
        SearchQuery {
            ingredients: "tofu,rice".to_string(),
            dietary: dietary.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_search_sends_both_parameters() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", SEARCH_PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("ingredients".into(), "tofu,rice".into()),
                Matcher::UrlEncoded("dietary".into(), "vegan".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": 3, "title": "Tofu Bowl", "vegan": true}]"#)
            .create_async()
            .await;

        let client = ProxyClient::new(server.url(), None).unwrap();
        let recipes = client.search(&query(Some("vegan"))).await.unwrap();

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].flag("vegan"), Some(true));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_payload_becomes_message() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", SEARCH_PATH)
            .match_query(Matcher::Any)
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "API key not configured"}"#)
            .create_async()
            .await;

        let client = ProxyClient::new(server.url(), None).unwrap();
        let err = client.search(&query(None)).await.unwrap_err();

        assert!(matches!(err, ClientError::Proxy { status: 500, .. }));
        assert_eq!(err.to_string(), "API key not configured");
    }

    #[tokio::test]
    async fn test_unreadable_error_body_falls_back() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", SEARCH_PATH)
            .match_query(Matcher::Any)
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let client = ProxyClient::new(server.url(), None).unwrap();
        let err = client.search(&query(None)).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to fetch recipes");
    }
}
