use contracts::domain::a001_in_app_product::{FieldValue, ProductField, Snapshot};

/// Marker class added to a widget while it is being edited.
pub const EDITING_CLASS: &str = "editing";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Display,
    Editing,
}

/// Sources for a field's initial value, in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldSeed {
    /// Set explicitly by the caller.
    pub configured: Option<FieldValue>,
    /// Read from the input element.
    pub extracted: FieldValue,
    /// Text of the read-only view.
    pub displayed: String,
}

impl FieldSeed {
    pub fn configured(value: FieldValue) -> Self {
        Self {
            configured: Some(value),
            ..Self::default()
        }
    }

    pub fn from_dom(extracted: FieldValue, displayed: impl Into<String>) -> Self {
        Self {
            configured: None,
            extracted,
            displayed: displayed.into(),
        }
    }

    /// Configured value, else a non-blank extracted value, else the
    /// displayed text.
    pub fn resolve(self) -> FieldValue {
        if let Some(value) = self.configured {
            return value;
        }
        if !self.extracted.is_blank() {
            return self.extracted;
        }
        FieldValue::Text(self.displayed.trim().to_string())
    }
}

/// A value change to publish: `ValueChanged` for the row, `snapshot` for
/// the field's own display widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: ProductField,
    pub value: FieldValue,
    pub snapshot: Snapshot,
}

/// State of one inline-edit field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineEditState {
    pub field: ProductField,
    /// `None` until the first value is applied.
    pub value: Option<FieldValue>,
    pub mode: EditMode,
    pub error: Option<String>,
}

impl InlineEditState {
    pub fn new(field: ProductField) -> Self {
        Self {
            field,
            value: None,
            mode: EditMode::Display,
            error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    pub fn current(&self) -> FieldValue {
        self.value.clone().unwrap_or_default()
    }

    pub fn start_edit(&mut self) {
        self.mode = EditMode::Editing;
    }

    pub fn done_edit(&mut self) {
        self.mode = EditMode::Display;
    }

    /// Take a freshly extracted input value.
    ///
    /// Unchanged values are a no-op. A change updates the value, clears the
    /// error region and returns what to publish.
    pub fn apply_input(&mut self, value: FieldValue) -> Option<FieldChange> {
        if self.value.as_ref() == Some(&value) {
            return None;
        }
        self.value = Some(value.clone());
        self.error = None;

        let mut snapshot = Snapshot::new();
        snapshot.insert(self.field, value.clone());
        Some(FieldChange {
            field: self.field,
            value,
            snapshot,
        })
    }

    /// Show the first message; an empty list clears the region.
    pub fn show_errors(&mut self, errors: &[String]) {
        self.error = errors.first().cloned();
    }

    pub fn css_class(&self, base: &str) -> String {
        if self.is_editing() {
            format!("{} inline-edit {}", base, EDITING_CLASS)
        } else {
            format!("{} inline-edit", base)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_initial_prefers_configured() {
        let seed = FieldSeed {
            configured: Some(FieldValue::text("cfg")),
            extracted: FieldValue::text("input"),
            displayed: "shown".to_string(),
        };
        assert_eq!(seed.resolve(), FieldValue::text("cfg"));
    }

    #[test]
    fn test_resolve_initial_falls_back() {
        let seed = FieldSeed::from_dom(FieldValue::text("input"), "shown");
        assert_eq!(seed.resolve(), FieldValue::text("input"));

        let seed = FieldSeed::from_dom(FieldValue::text(""), "  shown \n");
        assert_eq!(seed.resolve(), FieldValue::text("shown"));

        let seed = FieldSeed::from_dom(FieldValue::Flag(false), "Disabled");
        assert_eq!(seed.resolve(), FieldValue::Flag(false));
    }

    #[test]
    fn test_start_then_done_edit() {
        let mut state = InlineEditState::new(ProductField::Name);
        state.start_edit();
        assert!(state.is_editing());
        assert!(state.css_class("in-app-product-name").ends_with(EDITING_CLASS));

        state.done_edit();
        state.done_edit();
        assert_eq!(state.mode, EditMode::Display);
        assert_eq!(state.css_class("in-app-product-name"), "in-app-product-name inline-edit");
    }

    #[test]
    fn test_same_value_twice_fires_once() {
        let mut state = InlineEditState::new(ProductField::Name);
        let first = state.apply_input(FieldValue::text("Gems"));
        let second = state.apply_input(FieldValue::text("Gems"));

        let change = first.expect("first input must change the value");
        assert_eq!(change.field, ProductField::Name);
        assert_eq!(change.value, FieldValue::text("Gems"));
        assert_eq!(change.snapshot.get(&ProductField::Name), Some(&FieldValue::text("Gems")));
        assert!(second.is_none());
    }

    #[test]
    fn test_change_clears_error() {
        let mut state = InlineEditState::new(ProductField::PriceId);
        state.apply_input(FieldValue::text("1"));
        state.show_errors(&["Invalid price".to_string(), "Other".to_string()]);
        assert_eq!(state.error.as_deref(), Some("Invalid price"));

        state.apply_input(FieldValue::text("1"));
        assert!(state.error.is_some());

        state.apply_input(FieldValue::text("2"));
        assert!(state.error.is_none());
    }

    #[test]
    fn test_initial_value_counts_as_change() {
        let mut state = InlineEditState::new(ProductField::Active);
        assert!(state.apply_input(FieldValue::Flag(false)).is_some());
        assert_eq!(state.current(), FieldValue::Flag(false));
    }
}
