pub mod locale;
pub mod manifest;

use crate::models::ContainerReport;
use crate::unpack::{self, ArchiveReader, ExtensionFormat, ZipPayload};
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

static UNSAFE_CHARS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]").unwrap());
static DASH_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());

/// Turn a display name into a filesystem-safe identifier.
///
/// Characters outside `[A-Za-z0-9_-]` become `-`, dash runs collapse to one
/// dash, and leading or trailing dashes are dropped.
pub fn sanitize_name(name: &str) -> String {
    let replaced = UNSAFE_CHARS_RE.replace_all(name, "-");
    let collapsed = DASH_RUN_RE.replace_all(&replaced, "-");
    collapsed.trim_matches('-').to_string()
}

/// Best-effort display name of the extension inside a ZIP payload.
///
/// Never fails: a corrupt archive, a missing manifest or an empty name all
/// yield `None`.
pub fn resolve_name(zip_payload: &[u8]) -> Option<String> {
    let mut payload = match ZipPayload::open(zip_payload) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::debug!("Cannot open payload for name resolution: {}", e);
            return None;
        }
    };

    resolve_name_from(&mut payload)
}

pub fn resolve_name_from(reader: &mut impl ArchiveReader) -> Option<String> {
    let manifest = manifest::read_manifest(reader)?;
    let raw_name = manifest.name.as_deref().map(str::trim).unwrap_or_default();
    if raw_name.is_empty() {
        return None;
    }

    let name = match manifest::message_key(raw_name) {
        Some(key) => locale::localized_message(reader, key).unwrap_or_else(|| {
            // Unresolved placeholders keep their literal text.
            tracing::debug!("No locale table defines message {}", key);
            raw_name.to_string()
        }),
        None => raw_name.to_string(),
    };

    let sanitized = sanitize_name(&name);
    (!sanitized.is_empty()).then_some(sanitized)
}

/// Validate a package and collect everything the terminal report shows.
pub fn inspect(source: &str, data: &[u8]) -> Result<ContainerReport> {
    let (header, zip_data) = match unpack::detect_format(data) {
        ExtensionFormat::Crx => {
            let header = unpack::validate(data)?;
            (Some(header), unpack::payload_after(data, &header)?)
        }
        ExtensionFormat::Zip => (None, data.to_vec()),
        ExtensionFormat::Unknown => anyhow::bail!("Unknown extension format"),
    };

    let (manifest, resolved_name) = match ZipPayload::open(&zip_data) {
        Ok(mut payload) => {
            let manifest = manifest::read_manifest(&mut payload);
            (manifest, resolve_name_from(&mut payload))
        }
        Err(e) => {
            tracing::warn!("Payload of {} is not a readable ZIP archive: {}", source, e);
            (None, None)
        }
    };

    Ok(ContainerReport {
        source: source.to_string(),
        header,
        payload_len: zip_data.len(),
        manifest,
        resolved_name,
    })
}
