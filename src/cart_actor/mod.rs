//! # Cart Actor
//!
//! The cart store: one task that exclusively owns the [`Cart`](crate::model::Cart) and the
//! [`InventorySnapshot`] it is checked against.
//!
//! ## Structure
//!
//! - [`actor`] - [`CartActor`], the mailbox loop
//! - [`message`] - [`CartRequest`] and the [`Response`] channel alias
//! - [`error`] - [`CartError`]
//! - [`new()`] - Factory function with the default mailbox size
//!
//! ## Usage
//!
//! ```rust
//! use storefront_cart::cart_actor;
//! use storefront_cart::model::{AddOutcome, InventorySnapshot, ItemId, NewEntryPolicy};
//! use storefront_cart::view_sync::{mock::MockRenderService, ResponseOrdering, ViewSync};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut renderer = MockRenderService::new();
//!     renderer.expect_render_cart().return_ok("<li>Widget x1</li>");
//!     let view = ViewSync::new(renderer.service(), ResponseOrdering::LatestRequest);
//!
//!     let inventory = InventorySnapshot::new().with_level(ItemId::from(4), 5);
//!     let (actor, client) = cart_actor::new(inventory, NewEntryPolicy::AssumeInStock);
//!     tokio::spawn(actor.run(view));
//!
//!     let outcome = client.add_or_increment(ItemId::from(4), "Widget").await?;
//!     assert_eq!(outcome, AddOutcome::Inserted);
//!     assert_eq!(client.serialize().await?, "/4,1");
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod error;
pub mod message;

pub use actor::*;
pub use error::*;
pub use message::*;

use crate::clients::CartClient;
use crate::model::{InventorySnapshot, NewEntryPolicy};

/// Mailbox capacity used by [`new()`].
pub const DEFAULT_MAILBOX_SIZE: usize = 32;

/// Creates a new cart actor and its client.
pub fn new(inventory: InventorySnapshot, policy: NewEntryPolicy) -> (CartActor, CartClient) {
    CartActor::new(DEFAULT_MAILBOX_SIZE, inventory, policy)
}
