//! Read-only projection of one field of a data source.

mod formatter;
mod widget;

pub use formatter::{identity_formatter, DisplayState, Formatted, Formatter, Ticket};
pub use widget::DisplayText;
