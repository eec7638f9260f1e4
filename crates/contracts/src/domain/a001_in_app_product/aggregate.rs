use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::field::ProductField;

// ============================================================================
// Localized name
// ============================================================================

/// Локализованные названия: код локали -> название.
///
/// `None` is an explicit clear and serializes as `null`, so the backend
/// removes that translation. A locale that was never edited is absent.
pub type LocaleNames = BTreeMap<String, Option<String>>;

/// Product name as it travels over the wire.
///
/// The server returns a plain string; saves send the full locale map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductName {
    Localized(LocaleNames),
    Plain(String),
}

impl Default for ProductName {
    fn default() -> Self {
        ProductName::Plain(String::new())
    }
}

impl ProductName {
    /// Text shown in the name input for the plain form.
    pub fn as_plain(&self) -> Option<&str> {
        match self {
            ProductName::Plain(s) => Some(s.as_str()),
            ProductName::Localized(_) => None,
        }
    }
}

// ============================================================================
// Field values
// ============================================================================

/// Value held by a single editable field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    #[default]
    Missing,
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Blank values fall through to the next source when resolving an
    /// initial value. Flags are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Missing => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Flag(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            FieldValue::Text(s) => match s.as_str() {
                "true" | "on" | "1" => Some(true),
                "false" | "off" | "0" | "" => Some(false),
                _ => None,
            },
            FieldValue::Missing => None,
        }
    }

    /// Plain text rendering used by the identity formatter.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Missing => String::new(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Flag(b) => b.to_string(),
        }
    }
}

/// Field name -> current value, as seen by passive display widgets.
pub type Snapshot = BTreeMap<ProductField, FieldValue>;

/// Server-side validation errors: field name -> ordered messages.
pub type FieldErrors = HashMap<String, Vec<String>>;

// ============================================================================
// Aggregate
// ============================================================================

/// In-app purchase product.
///
/// `guid` is assigned by the server and stays empty until the first save.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InAppProduct {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub guid: String,

    #[serde(default)]
    pub name: ProductName,

    /// Ключ в таблице ценовых точек
    #[serde(default, deserialize_with = "string_or_number")]
    pub price_id: String,

    #[serde(default)]
    pub logo_url: Option<String>,

    #[serde(default)]
    pub active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
}

impl InAppProduct {
    /// Record for a row whose GUID was rendered by the server.
    pub fn with_guid(guid: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            ..Self::default()
        }
    }

    pub fn is_new(&self) -> bool {
        self.guid.is_empty()
    }

    /// Merge one field edit into the record.
    ///
    /// `locale` only drives which translation is being edited and is not a
    /// product attribute, so it is ignored here.
    pub fn apply(&mut self, field: ProductField, value: &FieldValue) {
        match field {
            ProductField::Name => {
                self.name = ProductName::Plain(value.display());
            }
            ProductField::PriceId => self.price_id = value.display(),
            ProductField::LogoUrl => {
                self.logo_url = value.as_text().map(str::to_string);
            }
            ProductField::Active => self.active = value.as_flag().unwrap_or(false),
            ProductField::Guid => self.guid = value.display(),
            ProductField::Locale => {}
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.insert(ProductField::Guid, FieldValue::text(self.guid.clone()));
        if let Some(name) = self.name.as_plain() {
            snapshot.insert(ProductField::Name, FieldValue::text(name));
        }
        snapshot.insert(ProductField::PriceId, FieldValue::text(self.price_id.clone()));
        snapshot.insert(
            ProductField::LogoUrl,
            self.logo_url
                .clone()
                .map(FieldValue::Text)
                .unwrap_or(FieldValue::Missing),
        );
        snapshot.insert(ProductField::Active, FieldValue::Flag(self.active));
        snapshot
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "price_id must be a string or a number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_localized_name_keeps_nulls() {
        let mut names = LocaleNames::new();
        names.insert("en-US".to_string(), Some("Gems".to_string()));
        names.insert("fr".to_string(), None);
        let product = InAppProduct {
            guid: String::new(),
            name: ProductName::Localized(names),
            price_id: "3".to_string(),
            logo_url: Some("https://example.com/gem.png".to_string()),
            active: true,
            default_locale: Some("en-US".to_string()),
        };

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(
            value,
            json!({
                "guid": "",
                "name": {"en-US": "Gems", "fr": null},
                "price_id": "3",
                "logo_url": "https://example.com/gem.png",
                "active": true,
                "default_locale": "en-US",
            })
        );
    }

    #[test]
    fn test_deserialize_server_response() {
        let product: InAppProduct = serde_json::from_value(json!({
            "guid": "abc123",
            "name": "Gems",
            "price_id": 7,
            "logo_url": null,
            "active": false,
        }))
        .unwrap();

        assert_eq!(product.guid, "abc123");
        assert_eq!(product.name, ProductName::Plain("Gems".to_string()));
        assert_eq!(product.price_id, "7");
        assert_eq!(product.logo_url, None);
        assert!(!product.active);
        assert!(!product.is_new());
    }

    #[test]
    fn test_deserialize_rejects_structured_price() {
        let result: Result<InAppProduct, _> =
            serde_json::from_value(json!({"price_id": {"tier": 1}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_merges_by_field() {
        let mut product = InAppProduct::default();
        product.apply(ProductField::Name, &FieldValue::text("Coins"));
        product.apply(ProductField::PriceId, &FieldValue::text("2"));
        product.apply(ProductField::Active, &FieldValue::Flag(true));
        product.apply(ProductField::LogoUrl, &FieldValue::text("/logo.png"));
        product.apply(ProductField::Locale, &FieldValue::text("de"));

        assert_eq!(product.name.as_plain(), Some("Coins"));
        assert_eq!(product.price_id, "2");
        assert!(product.active);
        assert_eq!(product.logo_url.as_deref(), Some("/logo.png"));
        assert!(product.is_new());
    }

    #[test]
    fn test_blank_values() {
        assert!(FieldValue::Missing.is_blank());
        assert!(FieldValue::text("").is_blank());
        assert!(!FieldValue::text("x").is_blank());
        assert!(!FieldValue::Flag(false).is_blank());
    }
}
