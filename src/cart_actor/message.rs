//! # Cart Messages
//!
//! The requests a [`CartClient`](crate::clients::CartClient) sends to the
//! [`CartActor`](super::CartActor). Every variant carries a oneshot sender for its answer.

use crate::cart_actor::CartError;
use crate::model::{AddOutcome, Cart, InventorySnapshot, ItemId};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the cart actor.
pub type Response<T> = oneshot::Sender<Result<T, CartError>>;

/// Internal message type sent to the cart actor.
///
/// Only `AddOrIncrement` can change the cart. `UpdateInventory` changes the stock
/// ceilings the next increments are checked against, and never triggers a redraw.
/// `Shutdown` answers with the final cart and stops the actor, even while other
/// clients are still alive.
#[derive(Debug)]
pub enum CartRequest {
    AddOrIncrement {
        item_id: ItemId,
        display_name: String,
        respond_to: Response<AddOutcome>,
    },
    Snapshot {
        respond_to: Response<Cart>,
    },
    Serialize {
        respond_to: Response<String>,
    },
    UpdateInventory {
        levels: InventorySnapshot,
        respond_to: Response<()>,
    },
    Shutdown {
        respond_to: Response<Cart>,
    },
}
