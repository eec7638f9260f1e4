pub mod adder;
pub mod row;

pub use adder::{ProductRows, RowAdder, RowEntry};
pub use row::ProductRow;
