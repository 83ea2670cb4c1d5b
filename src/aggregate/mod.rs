pub mod families;
pub mod fold;

pub use families::*;
pub use fold::{accumulate, merge_partials, Accumulate, PlayerTotals};
