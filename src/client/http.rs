use async_trait::async_trait;
use reqwest::header::{COOKIE, LOCATION};
use reqwest::{redirect, Client, Response};
use tracing::{debug, warn};

use super::response::{failure_message, parse_body, ActionReply};
use super::StrategyBackend;
use crate::config::{ClientConfig, SESSION_COOKIE_NAME};
use crate::error::{DispatchError, Result};
use crate::types::HttpMethod;

/// reqwest-backed client for the strategy management backend
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    session_cookie: Option<String>,
}

impl HttpBackend {
    #[cfg(test)]
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::build(base_url.into(), None)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let backend = Self::build(config.base_url.clone(), config.request_timeout())?;
        Ok(match &config.session_cookie {
            Some(cookie) => backend.with_session(cookie.clone()),
            None => backend,
        })
    }

    fn build(base_url: String, timeout: Option<std::time::Duration>) -> Result<Self> {
        // Redirects are answers, not hops: the backend sends missing or
        // expired sessions to /login.
        let mut builder = Client::builder().redirect(redirect::Policy::none());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie: None,
        })
    }

    pub fn with_session(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn request(&self, method: HttpMethod, path: &str) -> Result<Response> {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut request = self.client.request(method.into(), &url);
        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, format!("{}={}", SESSION_COOKIE_NAME, cookie));
        }

        Ok(request.send().await?)
    }
}

async fn reject(response: Response) -> DispatchError {
    let status = response.status();

    if status.is_redirection() {
        let target = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("<unknown>")
            .to_string();
        warn!("Backend redirected to {} (session missing or expired?)", target);
        return DispatchError::request_failed(format!("redirected to {}", target));
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => return e.into(),
    };
    DispatchError::request_failed(failure_message(status.as_u16(), &body))
}

#[async_trait]
impl StrategyBackend for HttpBackend {
    async fn send(&self, method: HttpMethod, path: &str) -> Result<ActionReply> {
        let response = self.request(method, path).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(reject(response).await);
        }

        let body = response.text().await?;
        Ok(ActionReply::new(status.as_u16(), parse_body(&body)))
    }

    async fn fetch_page(&self, path: &str) -> Result<u16> {
        let response = self.request(HttpMethod::Get, path).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(reject(response).await);
        }
        Ok(status.as_u16())
    }
}
