//! # View Sync
//!
//! Keeps the two server-rendered regions of the page in step with local state:
//!
//! - the **cart region**, re-rendered after every cart mutation,
//! - the **results region**, re-rendered on every search input change.
//!
//! Each refresh takes a [`RequestToken`] synchronously and then runs as its own
//! task, so the caller never waits on the network. When responses overlap, the
//! region's [`ResponseOrdering`] decides which one ends up on screen.
//!
//! ## Structure
//!
//! - [`region`] - [`DisplayRegion`] and its observable [`RegionState`]
//! - [`service`] - the [`RenderService`] trait
//! - [`http`] - [`HttpRenderService`], the `reqwest` implementation
//! - [`mock`] - [`MockRenderService`](mock::MockRenderService) for tests

pub mod error;
pub mod http;
pub mod mock;
pub mod region;
pub mod service;

pub use error::*;
pub use http::*;
pub use region::*;
pub use service::*;

use crate::model::Cart;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info_span, Instrument};

/// The page's two render-backed regions and the service that fills them.
#[derive(Clone)]
pub struct ViewSync {
    service: Arc<dyn RenderService>,
    cart: DisplayRegion,
    results: DisplayRegion,
}

impl ViewSync {
    pub fn new(service: Arc<dyn RenderService>, ordering: ResponseOrdering) -> Self {
        Self {
            service,
            cart: DisplayRegion::new("cart", ordering),
            results: DisplayRegion::new("results", ordering),
        }
    }

    pub fn cart_region(&self) -> &DisplayRegion {
        &self.cart
    }

    pub fn results_region(&self) -> &DisplayRegion {
        &self.results
    }

    /// Sends `cart` to be rendered and puts the answer in the cart region.
    ///
    /// The token is taken before this returns; the request itself runs on a
    /// spawned task.
    pub fn refresh_cart(&self, cart: Cart) -> JoinHandle<ResolveOutcome> {
        let token = self.cart.issue();
        let region = self.cart.clone();
        let service = Arc::clone(&self.service);
        let span = info_span!("refresh_cart", token = token.sequence(), entries = cart.len());

        tokio::spawn(
            async move {
                let result = service.render_cart(&cart).await;
                region.resolve(token, result)
            }
            .instrument(span),
        )
    }

    /// Searches for `query` and puts the answer in the results region.
    ///
    /// An empty query sends nothing and returns `None`; the region keeps whatever it shows.
    pub fn refresh_results(&self, query: &str) -> Option<JoinHandle<ResolveOutcome>> {
        if query.is_empty() {
            debug!("Empty query; no search issued");
            return None;
        }

        let token = self.results.issue();
        let region = self.results.clone();
        let service = Arc::clone(&self.service);
        let query = query.to_string();
        let span = info_span!("refresh_results", token = token.sequence(), %query);

        Some(tokio::spawn(
            async move {
                let result = service.search(&query).await;
                region.resolve(token, result)
            }
            .instrument(span),
        ))
    }
}
