use std::fmt;
use std::path::Path;

use serde::Serialize;

/// The final JSON record printed after the `===RESULT===` marker. This is
/// the only stdout content a calling process should parse.
#[derive(Debug, Serialize)]
pub struct ResultRecord {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResultRecord {
    pub fn success(path: &Path, count: usize) -> Self {
        ResultRecord {
            success: true,
            path: Some(path.display().to_string()),
            count: Some(count),
            error: None,
        }
    }

    pub fn failure(error: impl fmt::Display) -> Self {
        ResultRecord {
            success: false,
            path: None,
            count: None,
            error: Some(error.to_string()),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":"failed to serialize result record"}"#.to_string()
        })
    }
}
