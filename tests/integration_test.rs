mod common;

use common::wait_for_applied;
use std::time::Duration;
use storefront_cart::cart_actor::CartError;
use storefront_cart::checkout::{parse_order_lines, Navigation, OrderLine};
use storefront_cart::config::StorefrontConfig;
use storefront_cart::lifecycle::StorefrontSession;
use storefront_cart::model::{AddOutcome, InventorySnapshot, ItemId};
use storefront_cart::view_sync::mock::{Call, MockRenderService};
use storefront_cart::view_sync::{ResolveOutcome, ResponseOrdering};

fn catalog() -> InventorySnapshot {
    [(4, 5), (7, 1), (11, 22)]
        .iter()
        .map(|&(id, units): &(u32, u32)| (ItemId::from(id), units))
        .collect()
}

/// Full page session with a mocked storefront server.
#[tokio::test]
async fn test_full_session_to_checkout() {
    let mut renderer = MockRenderService::new();
    renderer.expect_search("wid").return_ok("<li>Widget</li>");
    for _ in 0..3 {
        renderer.expect_render_cart().return_ok("<ul>cart</ul>");
    }

    let session = StorefrontSession::new(&StorefrontConfig::default(), renderer.service(), catalog());

    let search = session.search_input_changed("wid").expect("query issued");
    assert_eq!(search.await.unwrap(), ResolveOutcome::Applied);
    assert_eq!(
        session.view().results_region().markup().as_str(),
        "<li>Widget</li>"
    );

    session.add_to_cart(ItemId::from(4), "Widget").await.unwrap();
    session.add_to_cart(ItemId::from(4), "Widget").await.unwrap();
    session.add_to_cart(ItemId::from(7), "Gadget").await.unwrap();
    // Item 7 has a single unit left.
    assert!(matches!(
        session.add_to_cart(ItemId::from(7), "Gadget").await.unwrap(),
        AddOutcome::AtCeiling { .. }
    ));

    assert_eq!(session.checkout_path().await.unwrap(), "/order/4,2,7,1");
    wait_for_applied(session.view().cart_region(), 3).await;

    let navigation = session.place_order().await.unwrap();
    assert_eq!(
        navigation,
        Navigation::Replace {
            path: "/order/4,2,7,1".to_string()
        }
    );

    // The order page decodes what the cart produced.
    let segment = navigation.path().trim_start_matches("/order");
    assert_eq!(
        parse_order_lines(segment).unwrap(),
        vec![
            OrderLine {
                item_id: ItemId::from(4),
                quantity: 2
            },
            OrderLine {
                item_id: ItemId::from(7),
                quantity: 1
            },
        ]
    );
    renderer.verify();
}

#[tokio::test]
async fn test_empty_cart_checks_out_to_base_path() {
    let renderer = MockRenderService::new();
    let session = StorefrontSession::new(&StorefrontConfig::default(), renderer.service(), catalog());

    let navigation = session.place_order().await.unwrap();
    assert_eq!(navigation.path(), "/order");
    renderer.verify();
}

#[tokio::test]
async fn test_place_order_completes_with_client_clone_alive() {
    let mut renderer = MockRenderService::new();
    renderer.expect_render_cart().return_ok("<ul>cart</ul>");

    let session = StorefrontSession::new(&StorefrontConfig::default(), renderer.service(), catalog());
    let add_button = session.cart_client.clone();
    add_button.add_or_increment(ItemId::from(11), "Queso Cabrales").await.unwrap();
    wait_for_applied(session.view().cart_region(), 1).await;

    let navigation = tokio::time::timeout(Duration::from_secs(1), session.place_order())
        .await
        .expect("checkout waited on a live cart client")
        .unwrap();
    assert_eq!(navigation.path(), "/order/11,1");

    // The cart is gone; the leftover handle only reports that.
    assert_eq!(
        add_button.add_or_increment(ItemId::from(11), "Queso Cabrales").await,
        Err(CartError::ActorClosed)
    );
    renderer.verify();
}

#[tokio::test]
async fn test_rapid_typing_shows_latest_query() {
    let mut renderer = MockRenderService::new();
    // Responses arrive in reverse order of the requests.
    renderer
        .expect_search("a")
        .after(Duration::from_millis(90))
        .return_ok("results for a");
    renderer
        .expect_search("ab")
        .after(Duration::from_millis(60))
        .return_ok("results for ab");
    renderer
        .expect_search("abc")
        .after(Duration::from_millis(10))
        .return_ok("results for abc");

    let session = StorefrontSession::new(&StorefrontConfig::default(), renderer.service(), catalog());

    let handles: Vec<_> = ["a", "ab", "abc"]
        .into_iter()
        .filter_map(|q| session.search_input_changed(q))
        .collect();
    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap());
    }

    assert_eq!(
        outcomes,
        vec![ResolveOutcome::Stale, ResolveOutcome::Stale, ResolveOutcome::Applied]
    );
    let results = session.view().results_region().state();
    assert_eq!(results.markup.as_str(), "results for abc");
    assert_eq!(results.applied, 3);

    session.shutdown().await.unwrap();
    renderer.verify();
}

#[tokio::test]
async fn test_rapid_typing_in_order_arrival() {
    let mut renderer = MockRenderService::new();
    renderer.expect_search("a").return_ok("results for a");
    renderer
        .expect_search("ab")
        .after(Duration::from_millis(20))
        .return_ok("results for ab");
    renderer
        .expect_search("abc")
        .after(Duration::from_millis(40))
        .return_ok("results for abc");

    let session = StorefrontSession::new(&StorefrontConfig::default(), renderer.service(), catalog());
    for query in ["a", "ab", "abc"] {
        session.search_input_changed(query);
    }

    let results = wait_for_applied(session.view().results_region(), 3).await;
    assert_eq!(results.markup.as_str(), "results for abc");
    renderer.verify();
}

#[tokio::test]
async fn test_last_arrival_ordering_keeps_faithful_behavior() {
    let mut renderer = MockRenderService::new();
    renderer
        .expect_search("ab")
        .after(Duration::from_millis(60))
        .return_ok("results for ab");
    renderer.expect_search("abc").return_ok("results for abc");

    let config = StorefrontConfig {
        response_ordering: ResponseOrdering::LastArrival,
        ..StorefrontConfig::default()
    };
    let session = StorefrontSession::new(&config, renderer.service(), catalog());

    let slow = session.search_input_changed("ab").unwrap();
    let fast = session.search_input_changed("abc").unwrap();
    assert_eq!(fast.await.unwrap(), ResolveOutcome::Applied);
    assert_eq!(slow.await.unwrap(), ResolveOutcome::Applied);

    // Last response wins, even though it answers an older query.
    assert_eq!(
        session.view().results_region().markup().as_str(),
        "results for ab"
    );
    renderer.verify();
}

#[tokio::test]
async fn test_empty_query_sends_nothing() {
    let mut renderer = MockRenderService::new();
    renderer.expect_search("c").return_ok("<li>Chai</li>");

    let session = StorefrontSession::new(&StorefrontConfig::default(), renderer.service(), catalog());
    session.search_input_changed("c").unwrap().await.unwrap();

    assert!(session.search_input_changed("").is_none());
    assert_eq!(session.view().results_region().issued(), 1);
    assert_eq!(
        session.view().results_region().markup().as_str(),
        "<li>Chai</li>"
    );
    assert_eq!(renderer.calls(), vec![Call::Search("c".to_string())]);
    renderer.verify();
}

#[tokio::test]
async fn test_search_failure_sets_notice() {
    let mut renderer = MockRenderService::new();
    renderer.expect_search("ch").return_ok("<li>Chai</li><li>Chang</li>");
    // Nothing scripted for "cha": the mock answers with an error.

    let session = StorefrontSession::new(&StorefrontConfig::default(), renderer.service(), catalog());
    session.search_input_changed("ch").unwrap().await.unwrap();
    let outcome = session.search_input_changed("cha").unwrap().await.unwrap();

    assert_eq!(outcome, ResolveOutcome::Failed);
    let state = session.view().results_region().state();
    assert_eq!(state.markup.as_str(), "<li>Chai</li><li>Chang</li>");
    assert!(state.notice.is_some());
}
