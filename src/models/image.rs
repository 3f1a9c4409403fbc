use std::path::PathBuf;

use serde_json::Value;

use crate::args::Options;

/// Options forwarded to the generation call. Optional fields are present
/// only when the corresponding flag was supplied.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub count: u32,
    pub model: Option<String>,
    pub size: Option<String>,
    pub seed: Option<i64>,
}

impl GenerationRequest {
    /// Build a request from parsed CLI options.
    ///
    /// `--count` values that fail to parse (or parse to 0) fall back to 1;
    /// a non-numeric `--seed` is treated as absent.
    pub fn from_options(options: &Options) -> Self {
        let count = options
            .get("count")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|c| *c >= 1)
            .unwrap_or(1);

        GenerationRequest {
            count,
            model: options.get("model").map(str::to_string),
            size: options.get("aspectRatio").map(str::to_string),
            seed: options.get("seed").and_then(|v| v.parse().ok()),
        }
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        GenerationRequest {
            count: 1,
            model: None,
            size: None,
            seed: None,
        }
    }
}

/// The closed set of image payload shapes a generation backend may return.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageData {
    /// The image already exists on disk and can be copied into place.
    Saveable(PathBuf),
    /// Raw bytes, written to the output path as-is.
    RawBytes(Vec<u8>),
    /// Base64 text, decoded before writing.
    Base64Encoded(String),
    /// Unrecognized shape; carries the observed field names for diagnostics.
    Unknown(Vec<String>),
}

impl ImageData {
    /// Classify a single result-image JSON object.
    ///
    /// Probes, in order: a local file reference, a `data`/`buffer` byte
    /// payload, an `encodedImage` base64 string. Anything else is `Unknown`.
    pub fn from_value(value: &Value) -> Self {
        if let Some(path) = value.get("filePath").and_then(Value::as_str) {
            return ImageData::Saveable(PathBuf::from(path));
        }

        for key in ["data", "buffer"] {
            if let Some(payload) = value.get(key).and_then(byte_payload) {
                return ImageData::RawBytes(payload);
            }
        }

        if let Some(encoded) = value.get("encodedImage").and_then(Value::as_str) {
            return ImageData::Base64Encoded(encoded.to_string());
        }

        let fields = value
            .as_object()
            .map(|obj| obj.keys().cloned().collect())
            .unwrap_or_default();
        ImageData::Unknown(fields)
    }
}

fn byte_payload(value: &Value) -> Option<Vec<u8>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
            .collect(),
        Value::String(encoded) => base64::decode(encoded).ok(),
        _ => None,
    }
}

/// One image returned by a generation call.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub data: ImageData,
    pub media_id: Option<String>,
    pub prompt: Option<String>,
}

impl GeneratedImage {
    pub fn new(data: ImageData) -> Self {
        GeneratedImage {
            data,
            media_id: None,
            prompt: None,
        }
    }
}
