pub mod aggregate;
pub mod field;

pub use aggregate::{
    FieldErrors, FieldValue, InAppProduct, LocaleNames, ProductName, Snapshot,
};
pub use field::ProductField;
