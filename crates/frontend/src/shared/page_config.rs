//! Page-level settings read from the `#in-app-products` root element.

use thiserror::Error;
use web_sys::Element;

pub const ROOT_ELEMENT_ID: &str = "in-app-products";
const GUID_PLACEHOLDER: &str = "{guid}";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("element #{0} not found")]
    MissingRoot(&'static str),
    #[error("attribute {0} is missing on #in-app-products")]
    MissingAttribute(&'static str),
    #[error("detail URL format is not valid URL-encoded text: {0}")]
    BadDetailUrl(String),
}

/// REST endpoints and UI language for the product table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    pub list_url: String,
    /// Decoded; contains a `{guid}` placeholder.
    pub detail_url_format: String,
    pub active_lang: String,
}

impl PageConfig {
    pub fn new(list_url: String, encoded_detail_url: &str, active_lang: String) -> Result<Self, ConfigError> {
        let detail_url_format = urlencoding::decode(encoded_detail_url)
            .map_err(|e| ConfigError::BadDetailUrl(e.to_string()))?
            .into_owned();
        Ok(Self {
            list_url,
            detail_url_format,
            active_lang,
        })
    }

    /// Read `data-list-url`, `data-detail-url-format` and `data-active-lang`.
    pub fn from_root(root: &Element) -> Result<Self, ConfigError> {
        let attr = |name: &'static str| root.get_attribute(name).ok_or(ConfigError::MissingAttribute(name));
        Self::new(
            attr("data-list-url")?,
            &attr("data-detail-url-format")?,
            attr("data-active-lang")?,
        )
    }

    pub fn collection_url(&self) -> &str {
        &self.list_url
    }

    pub fn detail_url(&self, guid: &str) -> String {
        self.detail_url_format
            .replace(GUID_PLACEHOLDER, &urlencoding::encode(guid))
    }

    /// Detail URL for saved products, collection URL for new ones.
    pub fn resolve_url(&self, guid: &str) -> String {
        if guid.is_empty() {
            self.list_url.clone()
        } else {
            self.detail_url(guid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PageConfig {
        PageConfig::new(
            "/developers/app/my-app/in-app-config/".to_string(),
            "%2Fdevelopers%2Fapp%2Fmy-app%2Fin-app-config%2F%7Bguid%7D%2F",
            "en-US".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_detail_url_format_is_decoded() {
        assert_eq!(
            config().detail_url_format,
            "/developers/app/my-app/in-app-config/{guid}/"
        );
    }

    #[test]
    fn test_resolve_url() {
        let cfg = config();
        assert_eq!(cfg.resolve_url(""), "/developers/app/my-app/in-app-config/");
        assert_eq!(
            cfg.resolve_url("abc123"),
            "/developers/app/my-app/in-app-config/abc123/"
        );
    }

    #[test]
    fn test_bad_encoding_is_rejected() {
        let result = PageConfig::new("/list/".to_string(), "%FF%FE", "en-US".to_string());
        assert!(matches!(result, Err(ConfigError::BadDetailUrl(_))));
    }
}
