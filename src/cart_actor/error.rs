//! Error types for the cart actor.

use crate::model::ItemId;
use thiserror::Error;

/// Errors that can occur during cart operations.
///
/// Hitting the stock ceiling is not an error; it is reported as an
/// [`AddOutcome`](crate::model::AddOutcome).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// The identifier is empty or contains a checkout delimiter (`,` or `/`).
    #[error("Invalid item id: {0:?}")]
    InvalidItemId(String),

    /// Items must carry a label so the cart can render without a catalog lookup.
    #[error("Empty display name for item {0}")]
    EmptyDisplayName(ItemId),

    /// The cart actor has shut down (its mailbox is closed).
    #[error("Cart actor closed")]
    ActorClosed,

    /// The cart actor dropped the request before answering.
    #[error("Cart actor dropped response channel")]
    ActorDropped,
}
