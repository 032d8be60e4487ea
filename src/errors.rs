//! JSON:API error documents.
//!
//! A flat field mapping with none of the graph machinery: error inputs map
//! one-to-one onto members of the top-level `errors` array.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One member of the `errors` array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl ErrorObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.source = Some(ErrorSource {
            pointer: Some(pointer.into()),
            parameter: None,
        });
        self
    }

    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.source = Some(ErrorSource {
            pointer: None,
            parameter: Some(parameter.into()),
        });
        self
    }
}

/// Reference to the source of an error
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorSource {
    /// JSON pointer to the offending document member
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,

    /// Offending query parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

/// A top-level document carrying only errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

impl ErrorDocument {
    pub fn new(errors: Vec<ErrorObject>) -> Self {
        ErrorDocument { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_document_shape() {
        let doc = ErrorDocument::new(vec![ErrorObject::new()
            .with_status("422")
            .with_title("Invalid Attribute")
            .with_detail("first-name must appear")
            .with_pointer("/data/attributes/first-name")]);

        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "errors": [{
                    "status": "422",
                    "title": "Invalid Attribute",
                    "detail": "first-name must appear",
                    "source": { "pointer": "/data/attributes/first-name" }
                }]
            })
        );
    }

    #[test]
    fn test_unset_fields_stay_off_the_wire() {
        let doc = ErrorDocument::new(vec![ErrorObject::new().with_code("E42")]);
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({ "errors": [{ "code": "E42" }] })
        );
    }
}
