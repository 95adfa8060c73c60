//! The seam between the page and the rendering endpoints.

use crate::model::{Cart, Markup};
use crate::view_sync::ViewSyncError;
use async_trait::async_trait;

/// Something that turns a query or a cart into rendered markup.
///
/// [`HttpRenderService`](super::HttpRenderService) talks to the storefront server;
/// [`MockRenderService`](super::mock::MockRenderService) answers from scripted
/// expectations in tests.
#[async_trait]
pub trait RenderService: Send + Sync + 'static {
    /// Renders the result list for a search query.
    async fn search(&self, query: &str) -> Result<Markup, ViewSyncError>;

    /// Renders the cart summary. Entries are sent in cart order.
    async fn render_cart(&self, cart: &Cart) -> Result<Markup, ViewSyncError>;
}
