pub mod table;

pub use table::{render_table, strip_formatting};
