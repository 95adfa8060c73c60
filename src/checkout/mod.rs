//! # Checkout Handoff
//!
//! Turns the cart into the order page path and decodes that path again on the
//! order side. The path looks like `/order` for an empty cart and
//! `/order/4,2,7,1` for two units of item 4 and one of item 7.

use crate::model::ItemId;
use std::fmt::Display;
use thiserror::Error;

/// Where the page goes next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Replace the current page without leaving a history entry.
    Replace { path: String },
}

impl Navigation {
    pub fn path(&self) -> &str {
        match self {
            Navigation::Replace { path } => path,
        }
    }
}

/// Appends a serialized cart segment to the order page path.
///
/// An empty segment yields `base` unchanged.
///
/// ```
/// use storefront_cart::checkout::build_checkout_path;
///
/// assert_eq!(build_checkout_path("/order", ""), "/order");
/// assert_eq!(build_checkout_path("/order/", "/4,2"), "/order/4,2");
/// ```
pub fn build_checkout_path(base: &str, segment: impl Display) -> String {
    let segment = segment.to_string();
    if segment.is_empty() {
        return base.to_string();
    }
    format!("{}{}", base.trim_end_matches('/'), segment)
}

/// One product line on the order page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub item_id: ItemId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("order segment needs an even number of products and quantities, got {fields} fields")]
    UnpairedField { fields: usize },

    #[error("invalid item id '{0}' in order segment")]
    InvalidItemId(String),

    #[error("invalid quantity '{raw}' for item {item_id}")]
    InvalidQuantity { item_id: ItemId, raw: String },
}

/// Decodes the order segment produced by [`Cart::checkout_string`](crate::model::Cart::checkout_string).
///
/// The leading `/` is optional. An empty segment is an empty order.
pub fn parse_order_lines(segment: &str) -> Result<Vec<OrderLine>, CheckoutError> {
    let segment = segment.strip_prefix('/').unwrap_or(segment);
    if segment.is_empty() {
        return Ok(Vec::new());
    }

    let fields: Vec<&str> = segment.split(',').collect();
    if fields.len() % 2 != 0 {
        return Err(CheckoutError::UnpairedField {
            fields: fields.len(),
        });
    }

    fields
        .chunks_exact(2)
        .map(|pair| {
            let item_id = ItemId::new(pair[0])
                .map_err(|_| CheckoutError::InvalidItemId(pair[0].to_string()))?;
            let quantity = match pair[1].parse::<u32>() {
                Ok(q) if q > 0 => q,
                _ => {
                    return Err(CheckoutError::InvalidQuantity {
                        item_id,
                        raw: pair[1].to_string(),
                    })
                }
            };
            Ok(OrderLine { item_id, quantity })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cart, InventorySnapshot, NewEntryPolicy};

    #[test]
    fn empty_segment_leaves_base_untouched() {
        assert_eq!(build_checkout_path("/order", Cart::new().checkout_segment()), "/order");
    }

    #[test]
    fn segment_is_appended_once() {
        assert_eq!(build_checkout_path("/order", "/4,2,7,1"), "/order/4,2,7,1");
        assert_eq!(build_checkout_path("/order/", "/4,2"), "/order/4,2");
    }

    #[test]
    fn parses_pairs_in_order() {
        let lines = parse_order_lines("/4,2,7,1").unwrap();
        assert_eq!(
            lines,
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
        assert!(parse_order_lines("").unwrap().is_empty());
        assert!(parse_order_lines("/").unwrap().is_empty());
    }

    #[test]
    fn rejects_odd_field_count() {
        assert_eq!(
            parse_order_lines("4,2,7"),
            Err(CheckoutError::UnpairedField { fields: 3 })
        );
    }

    #[test]
    fn rejects_bad_quantities_and_ids() {
        assert!(matches!(
            parse_order_lines("4,0"),
            Err(CheckoutError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            parse_order_lines("4,two"),
            Err(CheckoutError::InvalidQuantity { .. })
        ));
        assert_eq!(
            parse_order_lines(",3"),
            Err(CheckoutError::InvalidItemId(String::new()))
        );
    }

    #[test]
    fn serialized_cart_parses_back() {
        let inventory: InventorySnapshot =
            [(ItemId::from(4), 5), (ItemId::from(7), 5)].into_iter().collect();
        let mut cart = Cart::new();
        for id in [4, 7, 4] {
            cart.add_or_increment(ItemId::from(id), "x", &inventory, NewEntryPolicy::default())
                .unwrap();
        }

        let lines = parse_order_lines(&cart.checkout_string()).unwrap();
        let decoded: Vec<(String, u32)> = lines
            .into_iter()
            .map(|line| (line.item_id.to_string(), line.quantity))
            .collect();
        assert_eq!(decoded, vec![("4".to_string(), 2), ("7".to_string(), 1)]);
    }
}
