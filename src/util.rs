use std::sync::Arc;

use cookie_store::CookieStore;
use reqwest_cookie_store::CookieStoreMutex;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde_json::Value;

use crate::constants::USER_AGENT;

/// HTTP transport: a reqwest client behind retry middleware, sharing one
/// cookie store with the auth signer.
#[derive(Clone)]
pub struct HttpClient {
    pub client: ClientWithMiddleware,
    pub cookies: Arc<CookieStoreMutex>,
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("reqwest middleware error: {0}")]
    ReqwestMiddlewareError(#[from] reqwest_middleware::Error),
}

impl HttpClient {
    /// A client with an empty cookie jar. Only useful for pages that do not
    /// require an authenticated session.
    pub fn new() -> reqwest::Result<HttpClient> {
        Self::with_cookie_store(CookieStore::default())
    }

    /// A client over a caller-supplied cookie jar. Loading and persisting
    /// the jar is the caller's business; this crate only reads it.
    pub fn with_cookie_store(store: CookieStore) -> reqwest::Result<HttpClient> {
        let cookies = Arc::new(CookieStoreMutex::new(store));
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);

        let client = reqwest::Client::builder()
            .cookie_provider(cookies.clone())
            .user_agent(USER_AGENT)
            .build()?;

        let client = reqwest_middleware::ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(HttpClient { client, cookies })
    }

    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        Ok(self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?)
    }

    pub async fn get_json(
        &self,
        url: &str,
        params: &[(&str, &str)],
        headers: &[(&'static str, String)],
    ) -> Result<Value, FetchError> {
        let mut req = self.client.get(url).query(params);
        for (name, value) in headers {
            req = req.header(*name, value);
        }
        Ok(req
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?)
    }

    /// Form-encoded POST returning JSON; the browse/service ajax endpoints
    /// take the continuation in the query string and the anti-forgery token
    /// in the body.
    pub async fn post_form_json(
        &self,
        url: &str,
        params: &[(&str, &str)],
        form: &[(&str, &str)],
        headers: &[(&'static str, String)],
    ) -> Result<Value, FetchError> {
        let mut req = self.client.post(url).query(params).form(form);
        for (name, value) in headers {
            req = req.header(*name, value);
        }
        Ok(req
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?)
    }

    /// JSON-bodied POST against the innertube API endpoints.
    pub async fn post_api_json(
        &self,
        url: &str,
        params: &[(&str, &str)],
        headers: &[(&'static str, String)],
        body: &Value,
    ) -> Result<Value, FetchError> {
        let mut req = self.client.post(url).query(params).json(body);
        for (name, value) in headers {
            req = req.header(*name, value);
        }
        Ok(req
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?)
    }
}
