//! The shopper's in-progress selection.
//!
//! # Cart Actor
//! A [`Cart`] is owned by exactly one [`CartActor`](crate::cart_actor::CartActor), which
//! serializes every mutation through its mailbox. The type itself is plain data and
//! can be cloned freely for rendering or inspection.
//!
//! See [`Cart::add_or_increment`] for the only mutation and
//! [`Cart::checkout_segment`] for the compact encoding handed to the order page.
use crate::cart_actor::CartError;
use crate::model::{InventorySnapshot, ItemId};
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

/// One distinct item selected for purchase.
///
/// Field names on the wire (`id`, `quantity`, `name`) are the ones the cart
/// rendering endpoint reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartEntry {
    #[serde(rename = "id")]
    pub item_id: ItemId,
    pub quantity: u32,
    #[serde(rename = "name")]
    pub display_name: String,
}

/// What to do when an item is added for the first time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NewEntryPolicy {
    /// An item offered for selection is assumed to have at least one unit.
    /// The ceiling is only consulted on later increments.
    #[default]
    AssumeInStock,
    /// First selection also requires a ceiling of at least one.
    RequireStock,
}

impl FromStr for NewEntryPolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "assume-in-stock" => Ok(Self::AssumeInStock),
            "require-stock" => Ok(Self::RequireStock),
            other => Err(format!(
                "expected `assume-in-stock` or `require-stock`, got `{other}`"
            )),
        }
    }
}

/// Result of [`Cart::add_or_increment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new entry with quantity 1 was appended.
    Inserted,
    /// An existing entry grew to `quantity`.
    Incremented { quantity: u32 },
    /// The entry is already at its stock ceiling; nothing changed.
    AtCeiling { quantity: u32, ceiling: u32 },
    /// First selection refused under [`NewEntryPolicy::RequireStock`]; nothing changed.
    OutOfStock,
}

impl AddOutcome {
    /// True when the cart changed and the cart view must be refreshed.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Inserted | Self::Incremented { .. })
    }
}

/// Ordered sequence of entries, at most one per [`ItemId`].
///
/// Serializes as the bare entry list, which is the cart-render request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn get(&self, item_id: &ItemId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| &entry.item_id == item_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of units across all entries.
    pub fn total_quantity(&self) -> u64 {
        self.entries.iter().map(|entry| u64::from(entry.quantity)).sum()
    }

    /// Adds one unit of `item_id`, respecting the stock ceiling in `inventory`.
    ///
    /// # Behavior
    /// - Existing entry: incremented only while the new quantity stays within the
    ///   ceiling; at the ceiling this is a no-op ([`AddOutcome::AtCeiling`]).
    /// - New entry: appended with quantity 1, subject to `policy`.
    ///
    /// # Errors
    /// [`CartError::EmptyDisplayName`] if `display_name` is empty. The cart is left untouched.
    pub fn add_or_increment(
        &mut self,
        item_id: ItemId,
        display_name: impl Into<String>,
        inventory: &InventorySnapshot,
        policy: NewEntryPolicy,
    ) -> Result<AddOutcome, CartError> {
        let display_name = display_name.into();
        if display_name.is_empty() {
            return Err(CartError::EmptyDisplayName(item_id));
        }

        let ceiling = inventory.ceiling(&item_id);

        if let Some(entry) = self.entries.iter_mut().find(|e| e.item_id == item_id) {
            return Ok(match entry.quantity.checked_add(1) {
                Some(next) if next <= ceiling => {
                    entry.quantity = next;
                    AddOutcome::Incremented { quantity: next }
                }
                _ => AddOutcome::AtCeiling {
                    quantity: entry.quantity,
                    ceiling,
                },
            });
        }

        if policy == NewEntryPolicy::RequireStock && ceiling == 0 {
            return Ok(AddOutcome::OutOfStock);
        }

        self.entries.push(CartEntry {
            item_id,
            quantity: 1,
            display_name,
        });
        Ok(AddOutcome::Inserted)
    }

    /// Borrowing view of the compact checkout encoding.
    pub fn checkout_segment(&self) -> CheckoutSegment<'_> {
        CheckoutSegment {
            entries: &self.entries,
        }
    }

    /// The checkout encoding as an owned string: `""` or `/<id>,<qty>[,<id>,<qty>...]`.
    pub fn checkout_string(&self) -> String {
        self.checkout_segment().to_string()
    }
}

// =============================================================================
// CHECKOUT ENCODING
// =============================================================================

/// The cart rendered as a path segment for the order page.
///
/// Lazy: nothing is formatted until the tokens are walked or the segment is
/// displayed. Restartable: every call to [`tokens`](Self::tokens) starts over.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutSegment<'a> {
    entries: &'a [CartEntry],
}

impl<'a> CheckoutSegment<'a> {
    pub fn tokens(&self) -> Tokens<'a> {
        Tokens {
            entries: self.entries,
            index: 0,
            phase: Phase::Lead,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for CheckoutSegment<'a> {
    type Item = Token<'a>;
    type IntoIter = Tokens<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens()
    }
}

impl Display for CheckoutSegment<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for token in self.tokens() {
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// One piece of the checkout encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// The leading `/`.
    Lead,
    /// A `,` between an id and its quantity, or between two pairs.
    Delimiter,
    Item(&'a ItemId),
    Quantity(u32),
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Lead => f.write_str("/"),
            Token::Delimiter => f.write_str(","),
            Token::Item(id) => write!(f, "{id}"),
            Token::Quantity(quantity) => write!(f, "{quantity}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Lead,
    Item,
    PairDelimiter,
    Quantity,
    EntryDelimiter,
    Done,
}

/// Iterator over the [`Token`]s of a [`CheckoutSegment`].
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    entries: &'a [CartEntry],
    index: usize,
    phase: Phase,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.phase {
            Phase::Lead => {
                if self.entries.is_empty() {
                    self.phase = Phase::Done;
                    return None;
                }
                self.phase = Phase::Item;
                Some(Token::Lead)
            }
            Phase::Item => {
                let entry = self.entries.get(self.index)?;
                self.phase = Phase::PairDelimiter;
                Some(Token::Item(&entry.item_id))
            }
            Phase::PairDelimiter | Phase::EntryDelimiter => {
                self.phase = if self.phase == Phase::PairDelimiter {
                    Phase::Quantity
                } else {
                    Phase::Item
                };
                Some(Token::Delimiter)
            }
            Phase::Quantity => {
                let entry = self.entries.get(self.index)?;
                self.index += 1;
                self.phase = if self.index < self.entries.len() {
                    Phase::EntryDelimiter
                } else {
                    Phase::Done
                };
                Some(Token::Quantity(entry.quantity))
            }
            Phase::Done => None,
        }
    }
}
