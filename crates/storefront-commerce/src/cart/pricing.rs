//! Cart totals.

use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::money::Money;

/// Derived totals over a set of cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of quantities.
    pub items: i64,
    /// Sum of `price * quantity`.
    pub subtotal: Money,
}

impl CartTotals {
    /// Compute totals for `lines`. Empty input yields zero totals.
    pub fn compute(lines: &[CartLine]) -> Self {
        let items = lines
            .iter()
            .fold(0_i64, |acc, line| acc.saturating_add(line.quantity));
        let subtotal = Money::saturating_sum(lines.iter().map(CartLine::line_total));
        Self { items, subtotal }
    }

    /// Subtotal formatted with exactly two decimals, e.g. `"39.98"`.
    pub fn price_string(&self) -> String {
        self.subtotal.display_amount()
    }
}
