#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Storefront Cart
//!
//! > **Client-side cart state for a server-rendered storefront page.**
//!
//! The page shows a live search-results panel and a cart summary, both rendered by
//! the storefront server. This crate keeps the cart itself (selected items and
//! quantities, capped by stock), keeps both panels in step with it, and hands the
//! cart to the order page as a compact path segment.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why an actor for one cart?
//!
//! On the page every event handler touches the same cart. Here the cart is owned by a
//! single Tokio task, the *cart actor*, and every handler holds a cheap
//! [`CartClient`](clients::CartClient). Requests run one at a time to completion, so
//! there are no locks and no torn updates, just like a browser event loop.
//!
//! ### Responses are allowed to arrive late
//!
//! Renders and searches run on their own tasks. Each request takes a sequence token
//! from its region first, and a response only lands if its token is still the
//! latest. A slow answer for "ab" can no longer overwrite the answer for "abc".
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each concern has its own error type: [`CartError`](cart_actor::CartError),
//! [`ViewSyncError`](view_sync::ViewSyncError), [`CheckoutError`](checkout::CheckoutError),
//! [`ConfigError`](config::ConfigError). Hitting a stock ceiling is an
//! [`AddOutcome`](model::AddOutcome), not an error.
//!
//! ### 2. Async Context Injection
//! The [`ViewSync`](view_sync::ViewSync) is injected via the actor's `run()` method,
//! not at construction time, so the session can build and wire both independently.
//!
//! ### 3. Observability
//! `tracing` everywhere with structured fields. See the [`lifecycle::tracing`] module.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! - **Role**: [`Cart`](model::Cart), [`ItemId`](model::ItemId),
//!   [`InventorySnapshot`](model::InventorySnapshot) and the lazy
//!   [`CheckoutSegment`](model::CheckoutSegment). No I/O.
//!
//! ### 2. The Store ([`cart_actor`], [`clients`])
//! - **Role**: The mailbox task that owns the cart and its client handle.
//!
//! ### 3. The View ([`view_sync`])
//! - **Role**: Display regions, request sequencing and the [`RenderService`](view_sync::RenderService)
//!   seam with its HTTP and mock implementations.
//!
//! ### 4. The Exit ([`checkout`])
//! - **Role**: Order page path construction and decoding.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! - **Role**: [`StorefrontSession`](lifecycle::StorefrontSession) spins everything up
//!   from a [`StorefrontConfig`](config::StorefrontConfig) and tears it down at checkout.
//!
//! ## 🚀 Quick Start
//!
//! ### Running the Demo
//!
//! ```bash
//! # Run with info logs against a local storefront server
//! STOREFRONT_BASE_URL=http://127.0.0.1:5000 RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod cart_actor;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod view_sync;
