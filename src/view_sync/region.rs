//! # Display Regions
//!
//! A [`DisplayRegion`] is one replaceable slot on the page (the cart summary or the
//! search results). Every request aimed at a region takes a [`RequestToken`] first;
//! when the response arrives the token decides whether it may still be shown.

use crate::model::Markup;
use crate::view_sync::ViewSyncError;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// How a region treats responses that arrive out of order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseOrdering {
    /// Only the response to the most recently issued request may be shown.
    #[default]
    LatestRequest,
    /// Whatever arrives last is shown, even if a newer request is still in flight.
    LastArrival,
}

impl FromStr for ResponseOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "latest-request" => Ok(Self::LatestRequest),
            "last-arrival" => Ok(Self::LastArrival),
            other => Err(format!(
                "unknown response ordering '{other}' (expected latest-request or last-arrival)"
            )),
        }
    }
}

/// Sequence number of a request issued against one region. Starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the page currently shows in a region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionState {
    pub markup: Markup,
    /// Sequence of the request whose markup is shown; 0 before the first one lands.
    pub applied: u64,
    /// Set when the latest request failed. Cleared by the next successful one.
    pub notice: Option<String>,
}

/// How a response was handled by [`DisplayRegion::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The markup replaced the region contents.
    Applied,
    /// The request failed; old markup kept, notice set.
    Failed,
    /// A newer request was issued meanwhile; the response was dropped.
    Stale,
}

struct RegionInner {
    name: &'static str,
    ordering: ResponseOrdering,
    issued: AtomicU64,
    state: watch::Sender<RegionState>,
}

/// A shared, observable display slot. Clones refer to the same region.
#[derive(Clone)]
pub struct DisplayRegion {
    inner: Arc<RegionInner>,
}

impl DisplayRegion {
    pub fn new(name: &'static str, ordering: ResponseOrdering) -> Self {
        let (state, _) = watch::channel(RegionState::default());
        Self {
            inner: Arc::new(RegionInner {
                name,
                ordering,
                issued: AtomicU64::new(0),
                state,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    pub fn ordering(&self) -> ResponseOrdering {
        self.inner.ordering
    }

    /// Takes the next token. Call this before the request is sent.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.inner.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Number of tokens issued so far.
    pub fn issued(&self) -> u64 {
        self.inner.issued.load(Ordering::SeqCst)
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.issued()
    }

    /// Applies a response to the region according to its [`ResponseOrdering`].
    pub fn resolve(
        &self,
        token: RequestToken,
        result: Result<Markup, ViewSyncError>,
    ) -> ResolveOutcome {
        let region = self.inner.name;
        let mut outcome = ResolveOutcome::Stale;

        // The latest-token check runs under the watch lock so two resolutions
        // cannot interleave between check and write.
        self.inner.state.send_if_modified(|state| {
            if self.inner.ordering == ResponseOrdering::LatestRequest && !self.is_latest(token) {
                return false;
            }
            match result {
                Ok(markup) => {
                    state.markup = markup;
                    state.applied = token.0;
                    state.notice = None;
                    outcome = ResolveOutcome::Applied;
                }
                Err(e) => {
                    state.notice = Some(e.to_string());
                    outcome = ResolveOutcome::Failed;
                }
            }
            true
        });

        match outcome {
            ResolveOutcome::Applied => debug!(region, %token, "Region updated"),
            ResolveOutcome::Failed => {
                warn!(region, %token, "Region refresh failed; keeping previous markup")
            }
            ResolveOutcome::Stale => {
                debug!(region, %token, latest = self.issued(), "Discarding stale response")
            }
        }
        outcome
    }

    pub fn state(&self) -> RegionState {
        self.inner.state.borrow().clone()
    }

    pub fn markup(&self) -> Markup {
        self.inner.state.borrow().markup.clone()
    }

    /// Receives a notification every time the region changes.
    pub fn subscribe(&self) -> watch::Receiver<RegionState> {
        self.inner.state.subscribe()
    }
}

impl fmt::Debug for DisplayRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayRegion")
            .field("name", &self.inner.name)
            .field("ordering", &self.inner.ordering)
            .field("issued", &self.issued())
            .finish()
    }
}
