//! `reqwest` implementation of [`RenderService`] against the storefront server.

use crate::config::StorefrontConfig;
use crate::model::{Cart, Markup};
use crate::view_sync::{RenderService, ViewSyncError};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::sync::Arc;
use tracing::{debug, instrument};
use url::Url;

struct Inner {
    client: Client,
    search_url: Url,
    render_cart_url: Url,
}

/// Calls the search and cart-rendering endpoints over HTTP.
///
/// Both endpoints answer with a JSON-encoded string of HTML. Plain-text bodies are
/// accepted as markup too.
#[derive(Clone)]
pub struct HttpRenderService {
    inner: Arc<Inner>,
}

impl HttpRenderService {
    /// Builds the endpoint URLs from `config` and a client with its request timeout.
    ///
    /// Paths are appended to the base URL, so a storefront mounted under a prefix
    /// (`http://host/northwind`) keeps it.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ViewSyncError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            inner: Arc::new(Inner {
                client,
                search_url: endpoint(&config.base_url, &config.search_path)?,
                render_cart_url: endpoint(&config.base_url, &config.render_cart_path)?,
            }),
        })
    }

    pub fn search_url(&self) -> &Url {
        &self.inner.search_url
    }

    pub fn render_cart_url(&self) -> &Url {
        &self.inner.render_cart_url
    }
}

fn endpoint(base_url: &str, path: &str) -> Result<Url, ViewSyncError> {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Ok(Url::parse(&format!("{base}/{path}"))?)
}

async fn read_markup(url: &Url, response: Response) -> Result<Markup, ViewSyncError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ViewSyncError::Status {
            endpoint: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    match serde_json::from_str::<String>(&body) {
        Ok(html) => Ok(Markup::from(html)),
        Err(_) => Ok(Markup::from(body)),
    }
}

#[async_trait]
impl RenderService for HttpRenderService {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Markup, ViewSyncError> {
        let url = &self.inner.search_url;
        let response = self
            .inner
            .client
            .post(url.clone())
            .form(&[("data", query)])
            .send()
            .await?;
        let markup = read_markup(url, response).await?;
        debug!(bytes = markup.as_str().len(), "Search results received");
        Ok(markup)
    }

    #[instrument(skip(self, cart), fields(entries = cart.len()))]
    async fn render_cart(&self, cart: &Cart) -> Result<Markup, ViewSyncError> {
        let url = &self.inner.render_cart_url;
        let response = self
            .inner
            .client
            .post(url.clone())
            .json(cart)
            .send()
            .await?;
        let markup = read_markup(url, response).await?;
        debug!(bytes = markup.as_str().len(), "Cart markup received");
        Ok(markup)
    }
}
