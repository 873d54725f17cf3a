//! Weighted offer draw.
//!
//! One uniform value picks the category (40% win, 60% lose), a second picks
//! uniformly within that category's subset.

use crate::catalog::{Catalog, Offer, OfferCategory};
use crate::random::RandomSource;

/// Probability of drawing from the `win` subset.
pub const WIN_PROBABILITY: f64 = 0.4;

/// Category selected by a single uniform value `r`.
pub fn category_for(r: f64) -> OfferCategory {
    if r < WIN_PROBABILITY {
        OfferCategory::Win
    } else {
        OfferCategory::Lose
    }
}

/// Draw an offer from `catalog` using two values from `rng`.
pub fn draw<'a>(catalog: &'a Catalog, rng: &dyn RandomSource) -> &'a Offer {
    let category = category_for(rng.next_unit());
    let subset = catalog.subset(category);
    &subset[rng.next_index(subset.len())]
}
