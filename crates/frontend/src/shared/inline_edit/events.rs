use contracts::domain::a001_in_app_product::{FieldValue, ProductField};

/// Messages exchanged on a row's bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    StartEdit,
    DoneEdit,
    ValueChanged {
        field: ProductField,
        value: FieldValue,
    },
    SaveRequested,
    /// Row-level error; the first message is shown.
    Errors(Vec<String>),
}

/// Commands a row sends to one registered field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldCommand {
    /// Field-scoped errors; consumed by the field, never re-broadcast.
    ShowErrors(Vec<String>),
    /// Replace the input value as if the user had typed it.
    SetValue(FieldValue),
}
