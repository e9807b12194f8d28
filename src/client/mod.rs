pub mod http;
pub mod response;

pub use http::*;
pub use response::*;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::HttpMethod;

/// The strategy management backend, as seen by the dispatcher.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StrategyBackend: Send + Sync {
    /// Issue one request with an empty body. Any non-2xx outcome, including
    /// transport failures, is a `DispatchError::RequestFailed`.
    async fn send(&self, method: HttpMethod, path: &str) -> Result<ActionReply>;

    /// Re-request a page, returning its HTTP status.
    async fn fetch_page(&self, path: &str) -> Result<u16>;
}
