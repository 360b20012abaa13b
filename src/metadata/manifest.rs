use crate::models::Manifest;
use crate::unpack::ArchiveReader;
use anyhow::Result;

pub const MANIFEST_PATH: &str = "manifest.json";

pub fn parse_manifest(json: &str) -> Result<Manifest> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(Manifest::from_json(&value))
}

/// Read `manifest.json` from the archive root. Missing or invalid manifests yield `None`.
pub fn read_manifest(reader: &mut impl ArchiveReader) -> Option<Manifest> {
    let json = match reader.read_text(MANIFEST_PATH) {
        Ok(json) => json,
        Err(e) => {
            tracing::debug!("No usable manifest: {}", e);
            return None;
        }
    };

    match parse_manifest(&json) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            tracing::debug!("Failed to parse manifest: {}", e);
            None
        }
    }
}

/// The `<key>` of a `__MSG_<key>__` placeholder.
pub fn message_key(name: &str) -> Option<&str> {
    name.strip_prefix("__MSG_")?
        .strip_suffix("__")
        .filter(|key| !key.is_empty())
}
