//! Client for the service that tells which menu entries a set of roles may see.
//!
//! The transport is pluggable, this crate does not speak HTTP itself. Failures are never handled
//! here, they reach the caller unchanged as the error of the returned future.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("menu request failed: {0}")]
    Transport(String),
    #[error("could not encode menu request")]
    Encode(#[source] serde_json::Error),
    #[error("could not decode menu response")]
    Decode(#[source] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuRequest {
    pub roles: Vec<String>,
}

/// Sends a JSON body to a URL and resolves to the JSON response body.
#[async_trait]
pub trait MenuTransport: Send + Sync {
    async fn post_json(&self, url: &str, body: &str) -> Result<String, MenuError>;
}

#[async_trait]
impl<T: MenuTransport + ?Sized> MenuTransport for &T {
    async fn post_json(&self, url: &str, body: &str) -> Result<String, MenuError> {
        (**self).post_json(url, body).await
    }
}

pub struct MenuService<T> {
    base_url: String,
    transport: T,
}

impl<T: MenuTransport> MenuService<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the identifiers of the menu entries permitted for `roles`.
    pub async fn permitted_menus<S>(&self, roles: &[S]) -> Result<Vec<String>, MenuError>
    where
        S: AsRef<str>,
    {
        let request = MenuRequest {
            roles: roles.iter().map(|r| r.as_ref().to_owned()).collect(),
        };
        let body = serde_json::to_string(&request).map_err(MenuError::Encode)?;

        tracing::debug!(url = %self.base_url, roles = request.roles.len(), "fetching menus");

        let response = self.transport.post_json(&self.base_url, &body).await?;
        let menus: Vec<String> = serde_json::from_str(&response).map_err(MenuError::Decode)?;

        tracing::trace!(count = menus.len(), "received menus");

        Ok(menus)
    }
}
