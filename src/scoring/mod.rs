pub mod composite;
pub mod weights;

pub use composite::{CompositeScorer, CompositeTotals};
pub use weights::CompositeWeights;
