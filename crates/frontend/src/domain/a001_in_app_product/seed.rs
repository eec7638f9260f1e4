//! Initial page state read once from the server-rendered markup: the row
//! template (price points, locales) and the product rows already on the page.

use super::price_points::PricePointTable;
use crate::shared::inline_edit::{
    CheckboxExtractor, FieldSeed, SelectExtractor, TextExtractor, ValueExtractor,
};
use crate::shared::page_config::{ConfigError, PageConfig};
use contracts::domain::a001_in_app_product::FieldValue;
use std::sync::Arc;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{Document, DocumentFragment, Element, HtmlOptionElement, HtmlTemplateElement};

pub const ROW_TEMPLATE_ID: &str = "in-app-product-row-template";
pub const ROW_SELECTOR: &str = "tr.in-app-product-row";
const LOCALE_OPTIONS_SELECTOR: &str = ".in-app-product-locale select option";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("row template #{0} not found or not a <template>")]
    MissingTemplate(&'static str),
    #[error("no document available")]
    NoDocument,
}

/// What every new row is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowTemplate {
    pub price_points: Arc<PricePointTable>,
    /// `(code, label)` pairs of the locale `<select>`.
    pub locales: Vec<(String, String)>,
    /// Locale preselected in the template, else the first option.
    pub default_locale: Option<String>,
}

impl RowTemplate {
    pub fn new(price_points: PricePointTable, locales: Vec<(String, String)>, selected: Option<String>) -> Self {
        let default_locale = selected
            .filter(|code| !code.is_empty())
            .or_else(|| locales.first().map(|(code, _)| code.clone()))
            .filter(|code| !code.is_empty());
        Self {
            price_points: Arc::new(price_points),
            locales,
            default_locale,
        }
    }

    pub fn read(document: &Document) -> Result<Self, SeedError> {
        let content: DocumentFragment = document
            .get_element_by_id(ROW_TEMPLATE_ID)
            .and_then(|el| el.dyn_into::<HtmlTemplateElement>().ok())
            .ok_or(SeedError::MissingTemplate(ROW_TEMPLATE_ID))?
            .content();

        let mut locales = Vec::new();
        let mut selected = None;
        if let Ok(nodes) = content.query_selector_all(LOCALE_OPTIONS_SELECTOR) {
            for i in 0..nodes.length() {
                let Some(option) = nodes
                    .item(i)
                    .and_then(|node| node.dyn_into::<HtmlOptionElement>().ok())
                else {
                    continue;
                };
                if option.default_selected() {
                    selected = Some(option.value());
                }
                locales.push((option.value(), option.text()));
            }
        }

        Ok(Self::new(PricePointTable::from_template(&content), locales, selected))
    }
}

/// Initial field sources of one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSeed {
    pub guid: String,
    pub name: FieldSeed,
    pub locale: FieldSeed,
    pub price: FieldSeed,
    pub active: FieldSeed,
    pub logo_url: Option<String>,
}

impl ProductSeed {
    /// Seed of a freshly added row: template defaults, no GUID.
    pub fn blank(template: &RowTemplate) -> Self {
        let first_price = template
            .price_points
            .options()
            .first()
            .map(|(value, _)| FieldValue::text(value.clone()))
            .unwrap_or_default();
        let locale = template
            .default_locale
            .clone()
            .map(FieldValue::Text)
            .unwrap_or_default();
        Self {
            guid: String::new(),
            name: FieldSeed::configured(FieldValue::text("")),
            locale: FieldSeed::configured(locale),
            price: FieldSeed::configured(first_price),
            active: FieldSeed::configured(FieldValue::Flag(false)),
            logo_url: None,
        }
    }

    /// Read a server-rendered `tr.in-app-product-row`.
    pub fn read(row: &Element) -> Self {
        Self {
            guid: text_of(row, ".in-app-product-guid"),
            name: field_seed(row, ".in-app-product-name", "input[type=\"text\"]", &TextExtractor),
            locale: field_seed(row, ".in-app-product-locale", "select", &SelectExtractor),
            price: field_seed(row, ".in-app-product-price", "select", &SelectExtractor),
            active: field_seed(
                row,
                ".in-app-product-active",
                "input[type=\"checkbox\"]",
                &CheckboxExtractor,
            ),
            logo_url: row
                .query_selector(".in-app-product-logo-url")
                .ok()
                .flatten()
                .and_then(|img| img.get_attribute("src"))
                .filter(|src| !src.is_empty()),
        }
    }
}

/// Everything the application needs at start-up.
#[derive(Debug, Clone)]
pub struct PageSeed {
    pub config: PageConfig,
    pub template: RowTemplate,
    pub rows: Vec<ProductSeed>,
}

impl PageSeed {
    pub fn read(document: &Document, root: &Element) -> Result<Self, SeedError> {
        let config = PageConfig::from_root(root)?;
        let template = RowTemplate::read(document)?;

        let mut rows = Vec::new();
        if let Ok(nodes) = root.query_selector_all(ROW_SELECTOR) {
            for i in 0..nodes.length() {
                if let Some(row) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    rows.push(ProductSeed::read(&row));
                }
            }
        }
        log::debug!(
            "page seed: {} rows, {} price points, {} locales",
            rows.len(),
            template.price_points.len(),
            template.locales.len()
        );

        Ok(Self {
            config,
            template,
            rows,
        })
    }
}

fn text_of(row: &Element, selector: &str) -> String {
    row.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.text_content())
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

fn field_seed(row: &Element, cell: &str, input: &str, extractor: &dyn ValueExtractor) -> FieldSeed {
    let Some(cell_el) = row.query_selector(cell).ok().flatten() else {
        return FieldSeed::default();
    };
    let extracted = cell_el
        .query_selector(input)
        .ok()
        .flatten()
        .map(|el| extractor.extract(&el))
        .unwrap_or_default();
    FieldSeed::from_dom(extracted, text_of(&cell_el, "span.inline-view"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> RowTemplate {
        RowTemplate::new(
            PricePointTable::from_options([("1", "Tier 1"), ("2", "Tier 2")]),
            vec![
                ("en-US".to_string(), "English".to_string()),
                ("fr".to_string(), "Français".to_string()),
            ],
            None,
        )
    }

    #[test]
    fn test_default_locale_is_first_option() {
        assert_eq!(template().default_locale.as_deref(), Some("en-US"));
    }

    #[test]
    fn test_selected_locale_wins() {
        let t = RowTemplate::new(
            PricePointTable::default(),
            vec![("en-US".to_string(), "English".to_string()), ("fr".to_string(), "Français".to_string())],
            Some("fr".to_string()),
        );
        assert_eq!(t.default_locale.as_deref(), Some("fr"));
    }

    #[test]
    fn test_no_locale_options() {
        let t = RowTemplate::new(PricePointTable::default(), Vec::new(), None);
        assert_eq!(t.default_locale, None);
        let locale = ProductSeed::blank(&t).locale.resolve();
        assert_eq!(locale.as_text(), None);
    }

    #[test]
    fn test_blank_seed_uses_template_defaults() {
        let seed = ProductSeed::blank(&template());
        assert!(seed.guid.is_empty());
        assert_eq!(seed.price.resolve(), FieldValue::text("1"));
        assert_eq!(seed.locale.resolve(), FieldValue::text("en-US"));
        assert_eq!(seed.active.resolve(), FieldValue::Flag(false));
        assert_eq!(seed.name.resolve(), FieldValue::text(""));
        assert_eq!(seed.logo_url, None);
    }

    #[test]
    fn test_blank_seed_ignores_dom_sources() {
        let seed = ProductSeed::blank(&template());
        assert_eq!(seed.price.configured, Some(FieldValue::text("1")));
        assert!(seed.price.displayed.is_empty());
    }
}
