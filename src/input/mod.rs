use crate::metadata::resolve_name;
use crate::models::OutputFormat;
use crate::unpack;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static CHROME_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9]{32}$").unwrap());
static STORE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"chromewebstore\.google\.com/detail/[^/]+/([a-z0-9]{32})").unwrap()
});

/// Extension ID from a Chrome Web Store detail URL, or the input itself if it is a bare ID.
pub fn extract_extension_id(url_or_id: &str) -> Option<String> {
    let input = url_or_id.trim();

    if let Some(captures) = STORE_URL_RE.captures(input) {
        return Some(captures[1].to_string());
    }

    if CHROME_ID_RE.is_match(input) {
        return Some(input.to_string());
    }

    None
}

/// Download file name: the sanitized extension name when known, else the fallback ID.
pub fn output_file_name(name: Option<&str>, fallback_id: &str, format: OutputFormat) -> String {
    let stem = name.filter(|n| !n.is_empty()).unwrap_or(fallback_id);
    format!("{}.{}", stem, format.extension())
}

/// ID used when no name resolves: the given ID or store URL, else the input file stem.
pub fn fallback_id(id: Option<&str>, file: &Path) -> Result<String> {
    if let Some(id) = id {
        return extract_extension_id(id).with_context(|| format!("Invalid extension ID: {}", id));
    }

    Ok(file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "extension".to_string()))
}

#[derive(Debug, Clone)]
pub struct ConvertedPackage {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Prepare a package for saving in `format`.
///
/// ZIP output is named after the resolved extension name; CRX output is
/// validated, kept as-is and named after the ID.
pub fn convert_package(data: &[u8], format: OutputFormat, id: &str) -> Result<ConvertedPackage> {
    let (content, name) = match format {
        OutputFormat::Zip => {
            let zip_data = unpack::to_zip(data)?;
            let name = resolve_name(&zip_data);
            tracing::debug!("Resolved extension name: {:?}", name);
            (zip_data, name)
        }
        OutputFormat::Crx => {
            unpack::validate(data)?;
            (data.to_vec(), None)
        }
    };

    Ok(ConvertedPackage {
        file_name: output_file_name(name.as_deref(), id, format),
        content,
    })
}
