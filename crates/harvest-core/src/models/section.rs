use serde::{Deserialize, Serialize};

/// One independently titled portion of a report.
///
/// The body is raw text that may interleave prose lines with `|`-delimited
/// table blocks. Disclaimer sections get the small italic treatment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub is_disclaimer: bool,
}

impl Section {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            is_disclaimer: false,
        }
    }

    pub fn disclaimer(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            is_disclaimer: true,
        }
    }
}
