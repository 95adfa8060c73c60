//! Pure data structures: the cart, its entries, stock levels and rendered markup.
//!
//! Nothing in here talks to a channel or the network. The [`cart_actor`](crate::cart_actor)
//! owns a [`Cart`] and an [`InventorySnapshot`] and drives them from its mailbox.

pub mod cart;
pub mod inventory;
pub mod item;
pub mod markup;

pub use cart::*;
pub use inventory::*;
pub use item::*;
pub use markup::*;
