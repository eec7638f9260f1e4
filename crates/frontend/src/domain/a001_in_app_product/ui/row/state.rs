use crate::domain::a001_in_app_product::api::{SaveError, SaveMethod, SaveRequest};
use crate::shared::page_config::PageConfig;
use contracts::domain::a001_in_app_product::{
    FieldErrors, FieldValue, InAppProduct, LocaleNames, ProductField, ProductName,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowInitError {
    #[error("could not determine the locale being edited")]
    NoLocale,
}

/// What a finished save means for the widgets of the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(InAppProduct),
    FieldErrors(FieldErrors),
    Failed(String),
}

/// State of one product row: the record being edited, pending translations
/// and the save lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRowState {
    pub product: InAppProduct,
    pub locale_names: LocaleNames,
    pub editing_locale: String,
    pub editing: bool,
    pub saving: bool,
    pub error: Option<String>,
}

impl ProductRowState {
    pub fn new(guid: String, locale: Option<&str>, start_editing: bool) -> Result<Self, RowInitError> {
        let editing_locale = locale
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or(RowInitError::NoLocale)?
            .to_string();
        Ok(Self {
            product: InAppProduct::with_guid(guid),
            locale_names: LocaleNames::new(),
            editing_locale,
            editing: start_editing,
            saving: false,
            error: None,
        })
    }

    /// Current value of the name input.
    pub fn current_name(&self) -> &str {
        self.product.name.as_plain().unwrap_or_default()
    }

    /// Merge a child field's change into the product.
    ///
    /// A change of `locale` switches translations and returns the name to
    /// show for the new locale.
    pub fn apply_change(&mut self, field: ProductField, value: &FieldValue) -> Option<String> {
        if field == ProductField::Locale {
            return value.as_text().and_then(|code| self.switch_locale(code));
        }
        self.product.apply(field, value);
        None
    }

    /// Store the name input under the locale being edited.
    ///
    /// Nothing is recorded for a locale that never held a name. Clearing a
    /// name that was set stores `None`, which deletes the translation.
    pub fn commit_locale_name(&mut self) {
        let current = self.current_name().to_string();
        let had_name = matches!(
            self.locale_names.get(&self.editing_locale),
            Some(Some(name)) if !name.is_empty()
        );
        if current.is_empty() && !had_name {
            return;
        }
        let value = if current.is_empty() { None } else { Some(current) };
        self.locale_names.insert(self.editing_locale.clone(), value);
    }

    /// Returns the name to display, or `None` when `locale` is already the
    /// one being edited.
    pub fn switch_locale(&mut self, locale: &str) -> Option<String> {
        if locale.is_empty() || locale == self.editing_locale {
            return None;
        }
        self.commit_locale_name();
        log::debug!("locale switch {} -> {}", self.editing_locale, locale);
        self.editing_locale = locale.to_string();
        Some(
            self.locale_names
                .get(locale)
                .cloned()
                .flatten()
                .unwrap_or_default(),
        )
    }

    /// Build the save request and mark the row as saving.
    ///
    /// Returns `None` while a previous save is still in flight.
    pub fn begin_save(&mut self, config: &PageConfig) -> Option<SaveRequest> {
        if self.saving {
            return None;
        }
        self.saving = true;
        self.error = None;
        self.commit_locale_name();

        let mut body = self.product.clone();
        body.name = ProductName::Localized(self.locale_names.clone());
        body.default_locale = Some(config.active_lang.clone());

        Some(SaveRequest {
            method: SaveMethod::for_guid(&self.product.guid),
            url: config.resolve_url(&self.product.guid),
            body,
        })
    }

    /// Apply the server's answer to a save.
    ///
    /// A saved record comes back with `name` as a locale map. The map is
    /// merged into the pending translations and `name` goes back to the
    /// plain name of the editing locale, which is what the name input shows.
    pub fn finish_save(&mut self, result: Result<InAppProduct, SaveError>) -> SaveOutcome {
        self.saving = false;
        match result {
            Ok(mut product) => {
                if let ProductName::Localized(names) = &product.name {
                    self.locale_names.extend(names.clone());
                    let name = self
                        .locale_names
                        .get(&self.editing_locale)
                        .cloned()
                        .flatten()
                        .unwrap_or_default();
                    product.name = ProductName::Plain(name);
                }
                self.product = product.clone();
                self.editing = false;
                SaveOutcome::Saved(product)
            }
            Err(SaveError::Fields(errors)) => SaveOutcome::FieldErrors(errors),
            Err(SaveError::Request(text)) => SaveOutcome::Failed(text),
        }
    }

    pub fn start_edit(&mut self) {
        self.editing = true;
    }

    pub fn done_edit(&mut self) {
        self.editing = false;
    }

    /// Row-level error region shows the first message.
    pub fn show_error(&mut self, errors: &[String]) {
        self.error = errors.first().cloned();
    }

    pub fn css_class(&self) -> &'static str {
        if self.editing {
            "in-app-product-row editing"
        } else {
            "in-app-product-row"
        }
    }
}
