pub mod error;
pub mod record;
pub mod table;

pub use error::*;
pub use record::*;
pub use table::*;
