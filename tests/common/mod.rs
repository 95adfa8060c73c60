#![allow(dead_code)]

use std::time::Duration;
use storefront_cart::view_sync::{DisplayRegion, RegionState};

/// Waits until `region` shows the response to request `sequence` (or a later one).
pub async fn wait_for_applied(region: &DisplayRegion, sequence: u64) -> RegionState {
    let mut changes = region.subscribe();
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            let state = changes.borrow_and_update().clone();
            if state.applied >= sequence {
                return state;
            }
            changes.changed().await.expect("region dropped");
        }
    })
    .await
    .expect("region never showed the expected response")
}

/// Waits until `region` carries a failure notice.
pub async fn wait_for_notice(region: &DisplayRegion) -> RegionState {
    let mut changes = region.subscribe();
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            let state = changes.borrow_and_update().clone();
            if state.notice.is_some() {
                return state;
            }
            changes.changed().await.expect("region dropped");
        }
    })
    .await
    .expect("region never reported a failure")
}
