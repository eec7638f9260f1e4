use crate::domain::a001_in_app_product::seed::{ProductSeed, RowTemplate};
use crate::shared::components::ui::{Button, ButtonVariant};
use crate::shared::icons::icon;
use leptos::prelude::*;
use std::sync::Arc;

/// A row of the table and the seed it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEntry {
    pub key: usize,
    pub seed: ProductSeed,
    pub start_editing: bool,
}

/// Rows rendered in the product table, keyed for `<For>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductRows {
    next_key: usize,
    entries: Vec<RowEntry>,
}

impl ProductRows {
    pub fn from_seeds(seeds: impl IntoIterator<Item = ProductSeed>) -> Self {
        let mut rows = Self::default();
        for seed in seeds {
            rows.push_seeded(seed);
        }
        rows
    }

    /// Row rendered by the server, shown read-only.
    pub fn push_seeded(&mut self, seed: ProductSeed) -> usize {
        self.push(seed, false)
    }

    /// New row from the template, opened for editing.
    pub fn push_blank(&mut self, template: &RowTemplate) -> usize {
        self.push(ProductSeed::blank(template), true)
    }

    fn push(&mut self, seed: ProductSeed, start_editing: bool) -> usize {
        let key = self.next_key;
        self.next_key += 1;
        self.entries.push(RowEntry {
            key,
            seed,
            start_editing,
        });
        key
    }

    pub fn entries(&self) -> &[RowEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// "Add" trigger: appends a blank row in editing mode on every click.
#[component]
pub fn RowAdder(rows: RwSignal<ProductRows>, template: Arc<RowTemplate>) -> impl IntoView {
    let on_add = Callback::new(move |_: leptos::ev::MouseEvent| {
        if let Some(key) = rows.try_update(|r| r.push_blank(&template)) {
            log::debug!("in-app product row {} added", key);
        }
    });

    view! {
        <Button class="in-app-product-add" variant=ButtonVariant::Secondary on_click=on_add>
            {icon("plus")}
            " Add in-app product"
        </Button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_in_app_product::price_points::PricePointTable;

    fn template() -> RowTemplate {
        RowTemplate::new(
            PricePointTable::from_options([("1", "Tier 1")]),
            vec![("en-US".to_string(), "English".to_string())],
            None,
        )
    }

    #[test]
    fn test_two_clicks_add_two_rows() {
        let mut rows = ProductRows::default();
        let first = rows.push_blank(&template());
        let second = rows.push_blank(&template());

        assert_ne!(first, second);
        assert_eq!(rows.len(), 2);
        for entry in rows.entries() {
            assert!(entry.start_editing);
            assert!(entry.seed.guid.is_empty());
        }
    }

    #[test]
    fn test_seeded_rows_start_read_only() {
        let seed = ProductSeed {
            guid: "abc123".to_string(),
            ..ProductSeed::default()
        };
        let mut rows = ProductRows::from_seeds([seed]);
        rows.push_blank(&template());

        assert_eq!(rows.entries()[0].seed.guid, "abc123");
        assert!(!rows.entries()[0].start_editing);
        assert!(rows.entries()[1].start_editing);
        assert_eq!(rows.entries()[1].key, 1);
    }

    #[test]
    fn test_empty_until_first_row() {
        let mut rows = ProductRows::default();
        assert!(rows.is_empty());
        rows.push_blank(&template());
        assert!(!rows.is_empty());
    }
}
