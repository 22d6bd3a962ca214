//! XML response envelope shared across API operations.

use serde::Deserialize;

use crate::types::{ProjectDetails, Story};

const FALLBACK_ERROR: &str = "the service reported a failure but gave no reason";

/// The `<response>` document every operation returns.
///
/// The success indicator appears either as a `success` attribute on the root
/// or as a `<success>` child element; both forms occur on the wire and both
/// must compare equal to the literal string "true".
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    #[serde(rename = "@success")]
    success_attr: Option<String>,
    #[serde(rename = "success")]
    success_elem: Option<String>,
    #[serde(default)]
    errors: ErrorList,
    pub message: Option<String>,
    pub project: Option<ProjectDetails>,
    /// Repeated `<story>` elements deserialize to a sequence even when the
    /// body carries exactly one, so callers never special-case single items.
    #[serde(default, rename = "story")]
    pub stories: Vec<Story>,
}

/// Repeated `<error>` elements grouped under one `<errors>` block.
#[derive(Debug, Default, Deserialize)]
struct ErrorList {
    #[serde(default)]
    error: Vec<String>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.success_attr
            .as_deref()
            .or(self.success_elem.as_deref())
            == Some("true")
    }

    /// The service's error strings in document order, or a fallback message
    /// when a failed response carries none.
    pub fn into_errors(self) -> Vec<String> {
        if self.errors.error.is_empty() {
            vec![FALLBACK_ERROR.to_string()]
        } else {
            self.errors.error
        }
    }
}
