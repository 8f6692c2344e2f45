//! Order Cart
//!
//! The order in progress at the counter: an insertion-ordered sequence of
//! lines, coalesced by item identity and kind. The cart is ephemeral client
//! state; it is never persisted and is cleared by its owner after a
//! successful checkout.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of entry a cart line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Catalog service booking.
    Service,

    /// Retail product.
    Product,

    /// Unscheduled in-person visit charged as a service.
    WalkIn,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItemKind::Service => "service",
            ItemKind::Product => "product",
            ItemKind::WalkIn => "walkin",
        };

        f.write_str(label)
    }
}

/// Per-kind payload carried by a cart line.
///
/// Metadata never affects arithmetic, but it must round-trip into persisted
/// order lines and the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LineMetadata {
    /// Retail product line.
    Product,

    /// Catalog service line.
    Service {
        /// Products consumed each time the service is performed.
        #[serde(default)]
        products_used: Vec<Uuid>,
    },

    /// Walk-in visit line.
    WalkIn {
        /// Free-form contact details captured at the counter.
        #[serde(default)]
        contact: Option<String>,
    },
}

impl LineMetadata {
    /// The item kind this metadata belongs to.
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        match self {
            LineMetadata::Product => ItemKind::Product,
            LineMetadata::Service { .. } => ItemKind::Service,
            LineMetadata::WalkIn { .. } => ItemKind::WalkIn,
        }
    }
}

/// One aggregated entry in the order in progress, keyed by item identity
/// and kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog identity of the item.
    pub item_id: Uuid,

    /// Display name copied from the catalog at add time.
    pub name: String,

    /// Price per unit in minor units.
    pub unit_price: u64,

    /// Number of units; always at least one.
    pub quantity: u32,

    /// Per-kind payload.
    pub metadata: LineMetadata,
}

impl CartLine {
    /// The kind of this line, derived from its metadata.
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        self.metadata.kind()
    }

    /// Line amount: unit price times quantity.
    #[must_use]
    pub fn amount(&self) -> u64 {
        self.unit_price * u64::from(self.quantity)
    }
}

/// Order in progress.
///
/// Lines keep insertion order (which is display order) and are unique per
/// `(item_id, kind)`.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Add one unit of an item.
    ///
    /// An existing line with the same `(item_id, kind)` has its quantity
    /// incremented; otherwise a new line is appended with quantity 1.
    pub fn add_item(
        &mut self,
        item_id: Uuid,
        name: impl Into<String>,
        unit_price: u64,
        metadata: LineMetadata,
    ) {
        if let Some(line) = self.line_mut(item_id, metadata.kind()) {
            line.quantity += 1;
            return;
        }

        self.lines.push(CartLine {
            item_id,
            name: name.into(),
            unit_price,
            quantity: 1,
            metadata,
        });
    }

    /// Remove the line with the given key; no-op when absent.
    pub fn remove_item(&mut self, item_id: Uuid, kind: ItemKind) {
        self.lines
            .retain(|line| line.item_id != item_id || line.kind() != kind);
    }

    /// Replace a line's quantity.
    ///
    /// A quantity of zero or less removes the line; negative quantities are
    /// never stored.
    pub fn update_quantity(&mut self, item_id: Uuid, kind: ItemKind, new_qty: i64) {
        if new_qty <= 0 {
            self.remove_item(item_id, kind);
            return;
        }

        let new_qty = u32::try_from(new_qty).unwrap_or(u32::MAX);

        if let Some(line) = self.line_mut(item_id, kind) {
            line.quantity = new_qty;
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of unit price times quantity over all lines.
    ///
    /// Recomputed from the current line state on every call.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.lines.iter().map(CartLine::amount).sum()
    }

    /// The lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the lines in display order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, item_id: Uuid, kind: ItemKind) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.item_id == item_id && line.kind() == kind)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
