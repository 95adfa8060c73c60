//! # Cart Actor Server
//!
//! This module defines the [`CartActor`], the "server" half of the cart store. It owns the
//! cart and the stock snapshot and processes [`CartRequest`]s strictly one at a time.

use crate::cart_actor::CartRequest;
use crate::clients::CartClient;
use crate::model::{Cart, InventorySnapshot, NewEntryPolicy};
use crate::view_sync::ViewSync;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that owns a shopper's cart for the lifetime of a page session.
///
/// **Concurrency Model**:
/// Every request runs to completion before the next one is received, exactly like an
/// event handler on the page. No `Mutex` guards the cart; exclusive ownership by this
/// task is the guarantee.
///
/// Network work never runs inside the loop. After a mutation the actor hands a copy
/// of the cart to [`ViewSync::refresh_cart`], which takes a request token on the spot
/// and performs the render call on its own task.
///
/// # Usage Pattern
///
/// 1.  **Create**: [`CartActor::new`] returns the actor and its [`CartClient`].
/// 2.  **Wire**: pass the [`ViewSync`] into [`run`](CartActor::run).
/// 3.  **Run**: spawn the loop; end it with [`CartClient::shutdown`] or by dropping every client.
pub struct CartActor {
    receiver: mpsc::Receiver<CartRequest>,
    cart: Cart,
    inventory: InventorySnapshot,
    policy: NewEntryPolicy,
}

impl CartActor {
    /// Creates a new `CartActor` with an empty cart, and its client.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - Mailbox capacity. Must be greater than zero.
    /// * `inventory` - Stock ceilings known when the page loaded.
    /// * `policy` - How first selections are checked against stock.
    pub fn new(
        buffer_size: usize,
        inventory: InventorySnapshot,
        policy: NewEntryPolicy,
    ) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            cart: Cart::new(),
            inventory,
            policy,
        };
        (actor, CartClient::new(sender))
    }

    /// Runs the mailbox loop until a `Shutdown` request arrives or every
    /// [`CartClient`] has been dropped.
    ///
    /// # Context Injection
    /// `view` is injected here rather than in `new()` so the session can build the
    /// display regions and the actor independently and wire them at start-up.
    pub async fn run(mut self, view: ViewSync) {
        info!(policy = ?self.policy, stocked = self.inventory.len(), "Cart actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddOrIncrement {
                    item_id,
                    display_name,
                    respond_to,
                } => {
                    debug!(%item_id, %display_name, "AddOrIncrement");
                    let result = self.cart.add_or_increment(
                        item_id.clone(),
                        display_name,
                        &self.inventory,
                        self.policy,
                    );

                    match &result {
                        Ok(outcome) if outcome.is_mutation() => {
                            info!(%item_id, ?outcome, size = self.cart.len(), "Cart updated");
                            let _ = view.refresh_cart(self.cart.clone());
                        }
                        Ok(outcome) => debug!(%item_id, ?outcome, "Cart unchanged"),
                        Err(e) => warn!(%item_id, error = %e, "AddOrIncrement rejected"),
                    }
                    let _ = respond_to.send(result);
                }
                CartRequest::Snapshot { respond_to } => {
                    debug!(size = self.cart.len(), "Snapshot");
                    let _ = respond_to.send(Ok(self.cart.clone()));
                }
                CartRequest::Serialize { respond_to } => {
                    let segment = self.cart.checkout_string();
                    debug!(%segment, "Serialize");
                    let _ = respond_to.send(Ok(segment));
                }
                CartRequest::UpdateInventory { levels, respond_to } => {
                    debug!(levels = levels.len(), "UpdateInventory");
                    self.inventory.merge(levels);
                    let _ = respond_to.send(Ok(()));
                }
                CartRequest::Shutdown { respond_to } => {
                    debug!(size = self.cart.len(), "Shutdown");
                    let _ = respond_to.send(Ok(self.cart.clone()));
                    break;
                }
            }
        }

        info!(
            size = self.cart.len(),
            units = self.cart.total_quantity(),
            "Cart actor shutdown"
        );
    }
}
