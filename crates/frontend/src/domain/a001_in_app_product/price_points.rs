//! Price tier id -> display label, built from the row template's price
//! `<select>`.

use crate::shared::display_text::{Formatted, Formatter};
use contracts::domain::a001_in_app_product::FieldValue;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use wasm_bindgen::JsCast;
use web_sys::{DocumentFragment, HtmlOptionElement};

pub const PRICE_OPTIONS_SELECTOR: &str = "select[name=\"price_id\"] option";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricePointTable {
    labels: HashMap<String, String>,
    /// Template order, used to render the price `<select>`.
    options: Vec<(String, String)>,
}

impl PricePointTable {
    pub fn from_options<I, V, L>(options: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        let mut table = Self::default();
        for (value, label) in options {
            let (value, label) = (value.into(), label.into());
            // Дубликаты: побеждает последний, как в шаблоне
            if table.labels.insert(value.clone(), label.clone()).is_some() {
                table.options.retain(|(v, _)| *v != value);
            }
            table.options.push((value, label));
        }
        table
    }

    pub fn from_template(content: &DocumentFragment) -> Self {
        let mut options = Vec::new();
        if let Ok(nodes) = content.query_selector_all(PRICE_OPTIONS_SELECTOR) {
            for i in 0..nodes.length() {
                let Some(option) = nodes
                    .item(i)
                    .and_then(|node| node.dyn_into::<HtmlOptionElement>().ok())
                else {
                    continue;
                };
                options.push((option.value(), option.text()));
            }
        }
        Self::from_options(options)
    }

    pub fn format(&self, price_id: &str) -> Option<&str> {
        self.labels.get(price_id).map(String::as_str)
    }

    pub fn options(&self) -> &[(String, String)] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Display formatter for the price field. Unknown ids render empty.
pub fn price_formatter(table: Arc<PricePointTable>) -> Formatter {
    Rc::new(move |value: &FieldValue| {
        let label = value
            .as_text()
            .and_then(|id| table.format(id))
            .unwrap_or_default();
        Formatted::Ready(label.to_string())
    })
}
