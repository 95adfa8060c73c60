use crate::cart_actor::{CartError, CartRequest, Response};
use crate::model::{AddOutcome, Cart, InventorySnapshot, ItemId};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Client for interacting with the cart actor.
///
/// Holds only the mailbox sender, so cloning is cheap and every page event handler
/// can keep its own copy. Requests are answered in the order the actor receives them.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> CartRequest,
    ) -> Result<T, CartError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| CartError::ActorClosed)?;
        response.await.map_err(|_| CartError::ActorDropped)?
    }

    /// Adds one unit of `item_id`, or inserts it with quantity 1.
    ///
    /// Returns the [`AddOutcome`]; hitting the stock ceiling is not an error.
    #[instrument(skip(self, display_name))]
    pub async fn add_or_increment(
        &self,
        item_id: ItemId,
        display_name: impl Into<String>,
    ) -> Result<AddOutcome, CartError> {
        debug!("Sending request");
        let display_name = display_name.into();
        self.request(|respond_to| CartRequest::AddOrIncrement {
            item_id,
            display_name,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::Snapshot { respond_to })
            .await
    }

    /// The checkout path segment for the current cart, e.g. `/4,2,7,1`.
    #[instrument(skip(self))]
    pub async fn serialize(&self) -> Result<String, CartError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::Serialize { respond_to })
            .await
    }

    /// Stops the cart actor and returns the cart as it was at that moment.
    ///
    /// Other clones stay valid handles but every later request fails with
    /// [`CartError::ActorClosed`] or [`CartError::ActorDropped`].
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::Shutdown { respond_to })
            .await
    }

    #[instrument(skip(self, levels), fields(levels = levels.len()))]
    pub async fn update_inventory(&self, levels: InventorySnapshot) -> Result<(), CartError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::UpdateInventory { levels, respond_to })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_client() -> (CartClient, mpsc::Receiver<CartRequest>) {
        let (sender, receiver) = mpsc::channel(8);
        (CartClient::new(sender), receiver)
    }

    #[tokio::test]
    async fn add_or_increment_forwards_request_and_returns_reply() {
        let (client, mut receiver) = create_client();

        tokio::spawn(async move {
            if let Some(CartRequest::AddOrIncrement {
                item_id,
                display_name,
                respond_to,
            }) = receiver.recv().await
            {
                assert_eq!(item_id, ItemId::from(11));
                assert_eq!(display_name, "Queso Cabrales");
                let _ = respond_to.send(Ok(AddOutcome::Inserted));
            }
        });

        let outcome = client
            .add_or_increment(ItemId::from(11), "Queso Cabrales")
            .await
            .unwrap();
        assert_eq!(outcome, AddOutcome::Inserted);
    }

    #[tokio::test]
    async fn shutdown_returns_final_cart() {
        let (client, mut receiver) = create_client();

        tokio::spawn(async move {
            if let Some(CartRequest::Shutdown { respond_to }) = receiver.recv().await {
                let _ = respond_to.send(Ok(Cart::new()));
            }
        });

        assert!(client.shutdown().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn closed_mailbox_reports_actor_closed() {
        let (client, receiver) = create_client();
        drop(receiver);

        let err = client.serialize().await.unwrap_err();
        assert_eq!(err, CartError::ActorClosed);
    }

    #[tokio::test]
    async fn dropped_reply_reports_actor_dropped() {
        let (client, mut receiver) = create_client();

        tokio::spawn(async move {
            // Receive and drop the responder without answering.
            let _request = receiver.recv().await;
        });

        let err = client.snapshot().await.unwrap_err();
        assert_eq!(err, CartError::ActorDropped);
    }
}
