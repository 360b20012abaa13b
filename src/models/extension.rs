use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Crx,
    Zip,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Crx => "crx",
            OutputFormat::Zip => "zip",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Manifest {
    pub name: Option<String>,
    pub version: Option<String>,
    pub manifest_version: Option<u32>,
    pub description: Option<String>,
    pub default_locale: Option<String>,
}

impl Manifest {
    /// Read the known fields of a parsed `manifest.json`.
    ///
    /// A field with an unexpected type reads as absent without affecting the others.
    pub fn from_json(value: &Value) -> Self {
        let text = |field: &str| value.get(field).and_then(Value::as_str).map(str::to_string);

        Self {
            name: text("name"),
            version: text("version"),
            manifest_version: value
                .get("manifest_version")
                .and_then(Value::as_u64)
                .and_then(|v| u32::try_from(v).ok()),
            description: text("description"),
            default_locale: text("default_locale"),
        }
    }
}

/// Contents of one `_locales/<locale>/messages.json` file.
///
/// Entries stay as raw JSON so one malformed entry does not hide the rest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MessageTable(HashMap<String, Value>);

impl MessageTable {
    /// The `message` text stored under `key`. Entries without a string `message` read as absent.
    pub fn message(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.get("message")?.as_str()
    }
}

/// What a CRX (or plain ZIP) package says about itself.
#[derive(Debug, Clone)]
pub struct ContainerReport {
    pub source: String,
    pub header: Option<crate::unpack::CrxHeader>,
    pub payload_len: usize,
    pub manifest: Option<Manifest>,
    pub resolved_name: Option<String>,
}
