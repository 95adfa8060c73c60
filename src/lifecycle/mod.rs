//! # Lifecycle
//!
//! Start-up and tear-down of a storefront page session.
//!
//! - [`session`] - [`StorefrontSession`]: spawns the cart actor, wires it to the view, hands off to checkout
//! - [`tracing`] - [`setup_tracing`]: subscriber installation

pub mod session;
pub mod tracing;

pub use session::*;
pub use self::tracing::setup_tracing;
