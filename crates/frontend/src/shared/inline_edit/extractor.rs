use contracts::domain::a001_in_app_product::FieldValue;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement};

/// Reads the current value of an input element.
pub trait ValueExtractor {
    fn extract(&self, element: &Element) -> FieldValue;
}

/// `<input type="text">`
pub struct TextExtractor;

impl ValueExtractor for TextExtractor {
    fn extract(&self, element: &Element) -> FieldValue {
        element
            .dyn_ref::<HtmlInputElement>()
            .map(|input| FieldValue::Text(input.value()))
            .unwrap_or(FieldValue::Missing)
    }
}

/// `<select>`
pub struct SelectExtractor;

impl ValueExtractor for SelectExtractor {
    fn extract(&self, element: &Element) -> FieldValue {
        element
            .dyn_ref::<HtmlSelectElement>()
            .map(|select| FieldValue::Text(select.value()))
            .unwrap_or(FieldValue::Missing)
    }
}

/// `<input type="checkbox">`
pub struct CheckboxExtractor;

impl ValueExtractor for CheckboxExtractor {
    fn extract(&self, element: &Element) -> FieldValue {
        element
            .dyn_ref::<HtmlInputElement>()
            .map(|input| FieldValue::Flag(input.checked()))
            .unwrap_or(FieldValue::Missing)
    }
}

/// Which input element a field renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    Text,
    /// `(value, label)` pairs.
    Select(Vec<(String, String)>),
    Checkbox,
}

/// Input kind plus the strategy that reads it back.
#[derive(Clone)]
pub struct FieldInput {
    pub kind: InputKind,
    pub extractor: Rc<dyn ValueExtractor>,
}

impl FieldInput {
    pub fn text() -> Self {
        Self {
            kind: InputKind::Text,
            extractor: Rc::new(TextExtractor),
        }
    }

    pub fn select(options: Vec<(String, String)>) -> Self {
        Self {
            kind: InputKind::Select(options),
            extractor: Rc::new(SelectExtractor),
        }
    }

    pub fn checkbox() -> Self {
        Self {
            kind: InputKind::Checkbox,
            extractor: Rc::new(CheckboxExtractor),
        }
    }
}
