//! Shopping cart.
//!
//! A single in-progress cart pinned to one merchant, with option
//! selections snapshotted by value onto each line.

mod cart;
mod selection;

pub use cart::{Cart, CartItem, CartLinePatch, CartTotals};
pub use selection::{options_delta, resolve_selections, SelectedOption};
