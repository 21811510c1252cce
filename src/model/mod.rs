pub mod profile;
pub mod series;
pub mod table;

pub use series::Series;
pub use table::{Column, Table, TableError};
