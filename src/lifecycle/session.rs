use crate::cart_actor::{CartActor, CartError};
use crate::checkout::{build_checkout_path, Navigation};
use crate::clients::CartClient;
use crate::config::StorefrontConfig;
use crate::model::{AddOutcome, InventorySnapshot, ItemId};
use crate::view_sync::{HttpRenderService, RenderService, ResolveOutcome, ViewSync, ViewSyncError};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    View(#[from] ViewSyncError),

    #[error("cart actor task failed: {0}")]
    ActorTask(#[from] JoinError),
}

/// One page session: the cart actor, the two display regions, and the way out to checkout.
///
/// `StorefrontSession` is responsible for:
/// - **Lifecycle Management**: spawning the cart actor and stopping it at checkout
/// - **Dependency Wiring**: injecting the [`ViewSync`] into the actor's `run()`
/// - **Page Events**: translating input changes and "add" clicks into requests
///
/// # Example
///
/// ```ignore
/// let session = StorefrontSession::connect(&config, inventory)?;
/// session.search_input_changed("cha");
/// session.add_to_cart(ItemId::from(1), "Chai").await?;
/// let Navigation::Replace { path } = session.place_order().await?;
/// ```
pub struct StorefrontSession {
    /// Client for interacting with the cart actor
    pub cart_client: CartClient,

    view: ViewSync,
    checkout_base: String,

    /// Task handle of the cart actor (used for shutdown)
    handle: JoinHandle<()>,
}

impl StorefrontSession {
    /// Starts a session against any [`RenderService`].
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(
        config: &StorefrontConfig,
        service: Arc<dyn RenderService>,
        inventory: InventorySnapshot,
    ) -> Self {
        let view = ViewSync::new(service, config.response_ordering);
        let (actor, cart_client) =
            CartActor::new(config.mailbox_size, inventory, config.new_entry_policy);
        let handle = tokio::spawn(actor.run(view.clone()));

        Self {
            cart_client,
            view,
            checkout_base: config.checkout_path.clone(),
            handle,
        }
    }

    /// Starts a session that renders through the storefront server at `config.base_url`.
    pub fn connect(
        config: &StorefrontConfig,
        inventory: InventorySnapshot,
    ) -> Result<Self, SessionError> {
        let service = HttpRenderService::new(config)?;
        Ok(Self::new(config, Arc::new(service), inventory))
    }

    pub fn view(&self) -> &ViewSync {
        &self.view
    }

    /// Reacts to a change of the search box. No debouncing: every change is sent.
    pub fn search_input_changed(&self, query: &str) -> Option<JoinHandle<ResolveOutcome>> {
        self.view.refresh_results(query)
    }

    pub async fn add_to_cart(
        &self,
        item_id: ItemId,
        display_name: impl Into<String>,
    ) -> Result<AddOutcome, SessionError> {
        Ok(self.cart_client.add_or_increment(item_id, display_name).await?)
    }

    pub async fn update_inventory(&self, levels: InventorySnapshot) -> Result<(), SessionError> {
        Ok(self.cart_client.update_inventory(levels).await?)
    }

    /// The order page path for the current cart.
    pub async fn checkout_path(&self) -> Result<String, SessionError> {
        let segment = self.cart_client.serialize().await?;
        Ok(build_checkout_path(&self.checkout_base, segment))
    }

    /// Leaves the page for the order page.
    ///
    /// The session is consumed and the cart actor stopped, so the cart is gone
    /// afterwards. [`CartClient`] clones handed out earlier do not keep it alive;
    /// their later requests fail with [`CartError::ActorClosed`].
    pub async fn place_order(self) -> Result<Navigation, SessionError> {
        // The path is built from the cart the actor hands back while stopping, so
        // no add from another clone can slip in between.
        let cart = self.cart_client.shutdown().await?;
        let path = build_checkout_path(&self.checkout_base, cart.checkout_segment());
        info!(%path, "Checkout");
        self.join().await?;
        Ok(Navigation::Replace { path })
    }

    /// Stops the cart actor and waits for it to finish.
    pub async fn shutdown(self) -> Result<(), SessionError> {
        self.cart_client.shutdown().await?;
        self.join().await
    }

    async fn join(self) -> Result<(), SessionError> {
        drop(self.cart_client);

        if let Err(e) = self.handle.await {
            error!("Cart actor task failed: {:?}", e);
            return Err(e.into());
        }
        info!("Session closed");
        Ok(())
    }
}
