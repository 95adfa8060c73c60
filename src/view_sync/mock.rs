//! # Mock Render Service
//!
//! [`MockRenderService`] stands in for the storefront server in tests. It answers
//! from scripted expectations, can delay each answer to provoke out-of-order
//! arrivals, and records every call it sees.
//!
//! ```rust
//! use std::time::Duration;
//! use storefront_cart::view_sync::{mock::MockRenderService, ResponseOrdering, ViewSync};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut renderer = MockRenderService::new();
//!     renderer
//!         .expect_search("cha")
//!         .after(Duration::from_millis(5))
//!         .return_ok("<li>Chai</li><li>Chang</li>");
//!
//!     let view = ViewSync::new(renderer.service(), ResponseOrdering::LatestRequest);
//!     view.refresh_results("cha").unwrap().await.unwrap();
//!
//!     assert_eq!(view.results_region().markup().as_str(), "<li>Chai</li><li>Chang</li>");
//!     renderer.verify();
//! }
//! ```
//!
//! Search expectations are matched by query, in any order. Cart renders are
//! answered first in, first out.

use crate::model::{Cart, Markup};
use crate::view_sync::{RenderService, ViewSyncError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A call received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search(String),
    RenderCart(Cart),
}

struct Scripted {
    delay: Option<Duration>,
    response: Result<Markup, ViewSyncError>,
}

#[derive(Default)]
struct MockState {
    searches: VecDeque<(String, Scripted)>,
    renders: VecDeque<Scripted>,
    calls: Vec<Call>,
    unexpected: Vec<Call>,
}

/// A [`RenderService`] with expectation tracking for fluent testing.
#[derive(Clone, Default)]
pub struct MockRenderService {
    state: Arc<Mutex<MockState>>,
}

impl MockRenderService {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// The mock as a shareable service handle.
    pub fn service(&self) -> Arc<dyn RenderService> {
        Arc::new(self.clone())
    }

    /// Expects a search for exactly `query`.
    pub fn expect_search(&mut self, query: impl Into<String>) -> SearchExpectationBuilder {
        SearchExpectationBuilder {
            query: query.into(),
            delay: None,
            state: self.state.clone(),
        }
    }

    /// Expects one cart render.
    pub fn expect_render_cart(&mut self) -> RenderExpectationBuilder {
        RenderExpectationBuilder {
            delay: None,
            state: self.state.clone(),
        }
    }

    /// Every call received so far, in arrival order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// The carts sent for rendering, in arrival order.
    pub fn rendered_carts(&self) -> Vec<Cart> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::RenderCart(cart) => Some(cart.clone()),
                Call::Search(_) => None,
            })
            .collect()
    }

    /// Panics unless every expectation was used and no unexpected call arrived.
    pub fn verify(&self) {
        let state = self.lock();
        if !state.unexpected.is_empty() {
            panic!("Unexpected render calls: {:?}", state.unexpected);
        }
        let remaining = state.searches.len() + state.renders.len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn answer(scripted: Scripted) -> Result<Markup, ViewSyncError> {
        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        scripted.response
    }
}

#[async_trait]
impl RenderService for MockRenderService {
    async fn search(&self, query: &str) -> Result<Markup, ViewSyncError> {
        let scripted = {
            let mut state = self.lock();
            state.calls.push(Call::Search(query.to_string()));
            let position = state.searches.iter().position(|(q, _)| q == query);
            match position.and_then(|i| state.searches.remove(i)) {
                Some((_, scripted)) => scripted,
                None => {
                    state.unexpected.push(Call::Search(query.to_string()));
                    return Err(ViewSyncError::Unexpected(format!("search {query:?}")));
                }
            }
        };
        Self::answer(scripted).await
    }

    async fn render_cart(&self, cart: &Cart) -> Result<Markup, ViewSyncError> {
        let scripted = {
            let mut state = self.lock();
            state.calls.push(Call::RenderCart(cart.clone()));
            match state.renders.pop_front() {
                Some(scripted) => scripted,
                None => {
                    state.unexpected.push(Call::RenderCart(cart.clone()));
                    return Err(ViewSyncError::Unexpected(format!(
                        "render_cart with {} entries",
                        cart.len()
                    )));
                }
            }
        };
        Self::answer(scripted).await
    }
}

/// Builder for `search` expectations.
pub struct SearchExpectationBuilder {
    query: String,
    delay: Option<Duration>,
    state: Arc<Mutex<MockState>>,
}

impl SearchExpectationBuilder {
    /// Holds the answer back for `delay`.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the expectation to return markup.
    pub fn return_ok(self, markup: impl Into<Markup>) {
        self.push(Ok(markup.into()));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ViewSyncError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Markup, ViewSyncError>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.searches.push_back((
            self.query,
            Scripted {
                delay: self.delay,
                response,
            },
        ));
    }
}

/// Builder for `render_cart` expectations.
pub struct RenderExpectationBuilder {
    delay: Option<Duration>,
    state: Arc<Mutex<MockState>>,
}

impl RenderExpectationBuilder {
    /// Holds the answer back for `delay`.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the expectation to return markup.
    pub fn return_ok(self, markup: impl Into<Markup>) {
        self.push(Ok(markup.into()));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ViewSyncError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Markup, ViewSyncError>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.renders.push_back(Scripted {
            delay: self.delay,
            response,
        });
    }
}
