pub mod csv;
pub mod json;
pub mod table;

pub use table::{write_table, ResultRecord, HEADERS};
