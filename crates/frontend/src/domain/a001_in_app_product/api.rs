use contracts::domain::a001_in_app_product::{FieldErrors, InAppProduct};
use gloo_net::http::Request;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMethod {
    Post,
    Patch,
}

impl SaveMethod {
    pub fn for_guid(guid: &str) -> Self {
        if guid.is_empty() {
            SaveMethod::Post
        } else {
            SaveMethod::Patch
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SaveMethod::Post => "POST",
            SaveMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for SaveMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One save round-trip, fully resolved before it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub method: SaveMethod,
    pub url: String,
    pub body: InAppProduct,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    /// The server rejected individual fields.
    #[error("validation failed for {} field(s)", .0.len())]
    Fields(FieldErrors),
    /// Anything else: transport failure or an unstructured error body.
    #[error("{0}")]
    Request(String),
}

impl SaveError {
    /// Field errors when the body is a non-empty `{field: [messages]}`
    /// object, otherwise the raw text.
    pub fn from_failure_body(body: &str) -> Self {
        match serde_json::from_str::<FieldErrors>(body) {
            Ok(errors) if !errors.is_empty() => SaveError::Fields(errors),
            _ => SaveError::Request(body.to_string()),
        }
    }
}

/// Create (`POST`) or update (`PATCH`) a product.
pub async fn save_product(request: &SaveRequest) -> Result<InAppProduct, SaveError> {
    let builder = match request.method {
        SaveMethod::Post => Request::post(&request.url),
        SaveMethod::Patch => Request::patch(&request.url),
    };

    let response = builder
        .header("Accept", "application/json")
        .json(&request.body)
        .map_err(|e| SaveError::Request(format!("Failed to serialize product: {}", e)))?
        .send()
        .await
        .map_err(|e| SaveError::Request(format!("Failed to send request: {}", e)))?;

    let text = response
        .text()
        .await
        .map_err(|e| SaveError::Request(format!("Failed to read response: {}", e)))?;

    if !response.ok() {
        return Err(SaveError::from_failure_body(&text));
    }

    serde_json::from_str(&text)
        .map_err(|e| SaveError::Request(format!("Failed to parse response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_follows_guid() {
        assert_eq!(SaveMethod::for_guid(""), SaveMethod::Post);
        assert_eq!(SaveMethod::for_guid("abc123"), SaveMethod::Patch);
        assert_eq!(SaveMethod::Patch.to_string(), "PATCH");
    }

    #[test]
    fn test_field_error_body() {
        let err = SaveError::from_failure_body(r#"{"name": ["Too long"]}"#);
        let SaveError::Fields(errors) = err else {
            panic!("expected field errors");
        };
        assert_eq!(errors["name"], vec!["Too long".to_string()]);
    }

    #[test]
    fn test_unstructured_body() {
        assert_eq!(
            SaveError::from_failure_body("Internal Server Error"),
            SaveError::Request("Internal Server Error".to_string())
        );
        assert_eq!(
            SaveError::from_failure_body(r#"{"detail": "Not allowed"}"#),
            SaveError::Request(r#"{"detail": "Not allowed"}"#.to_string())
        );
        assert_eq!(SaveError::from_failure_body("{}"), SaveError::Request("{}".to_string()));
        assert_eq!(SaveError::from_failure_body(""), SaveError::Request(String::new()));
    }
}
