//! Inline edit: a field that toggles between read-only text and an input.

mod events;
mod extractor;
mod registry;
mod state;
mod widget;

pub use events::{EditEvent, FieldCommand};
pub use extractor::{
    CheckboxExtractor, FieldInput, InputKind, SelectExtractor, TextExtractor, ValueExtractor,
};
pub use registry::{FieldHandle, FieldRegistry};
pub use state::{EditMode, FieldChange, FieldSeed, InlineEditState, EDITING_CLASS};
pub use widget::InlineEditField;
