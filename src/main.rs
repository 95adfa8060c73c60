//! # Storefront Cart Demo
//!
//! Plays through one page session against the storefront server configured in the
//! environment (see [`storefront_cart::config`]):
//!
//! 1.  Types "c", "ch", "cha" into the search box.
//! 2.  Adds a few items, one of them past its stock ceiling.
//! 3.  Places the order and prints where the page would navigate.
//!
//! Without a running server every refresh fails; the regions then keep their
//! markup and show a notice, which the demo reports.

use storefront_cart::config::StorefrontConfig;
use storefront_cart::lifecycle::{setup_tracing, StorefrontSession};
use storefront_cart::model::{InventorySnapshot, ItemId};
use tracing::{info, info_span, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = StorefrontConfig::from_env()?;
    info!(base_url = %config.base_url, "Starting storefront session");

    let inventory: InventorySnapshot = [
        (ItemId::from(1), 39),
        (ItemId::from(2), 17),
        (ItemId::from(11), 1),
    ]
    .into_iter()
    .collect();
    let session = StorefrontSession::connect(&config, inventory)?;

    async {
        let mut pending = Vec::new();
        for query in ["c", "ch", "cha"] {
            pending.extend(session.search_input_changed(query));
        }
        for handle in pending {
            handle.await?;
        }
        Ok::<_, tokio::task::JoinError>(())
    }
    .instrument(info_span!("typing"))
    .await?;

    let results = session.view().results_region().state();
    match results.notice {
        Some(notice) => warn!(%notice, "Search results unavailable"),
        None => info!(request = results.applied, "Search results shown"),
    }

    for (id, name) in [(1, "Chai"), (1, "Chai"), (11, "Queso Cabrales"), (11, "Queso Cabrales")] {
        let outcome = session.add_to_cart(ItemId::from(id), name).await?;
        info!(item_id = id, ?outcome, "Add clicked");
    }

    let cart = session.cart_client.snapshot().await?;
    info!(entries = cart.len(), units = cart.total_quantity(), "Cart before checkout");

    let navigation = session.place_order().await?;
    info!(path = navigation.path(), "Navigating to order page");
    Ok(())
}
