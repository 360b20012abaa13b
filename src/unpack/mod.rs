pub mod archive;
pub mod crx;

pub use archive::{ArchiveError, ArchiveReader, ZipPayload};
pub use crx::{
    CrxError, CrxHeader, compute_zip_offset, extract_zip_payload, payload_after, validate,
};

use anyhow::{Context, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionFormat {
    Crx,
    Zip,
    Unknown,
}

pub fn detect_format(data: &[u8]) -> ExtensionFormat {
    if data.starts_with(crx::CRX_MAGIC) {
        return ExtensionFormat::Crx;
    }

    if data.starts_with(crx::ZIP_LOCAL_HEADER_MAGIC) {
        return ExtensionFormat::Zip;
    }

    ExtensionFormat::Unknown
}

/// Return the ZIP archive inside `data`, which may be a CRX package or a plain ZIP.
pub fn to_zip(data: &[u8]) -> Result<Vec<u8>> {
    match detect_format(data) {
        ExtensionFormat::Crx => Ok(extract_zip_payload(data)?),
        ExtensionFormat::Zip => Ok(data.to_vec()),
        ExtensionFormat::Unknown => anyhow::bail!("Unknown extension format"),
    }
}

pub fn extract(data: &[u8], output_dir: &Path) -> Result<()> {
    let zip_data = to_zip(data)?;

    let mut payload = ZipPayload::open(&zip_data).context("Failed to read ZIP payload")?;
    payload
        .extract_to(output_dir)
        .context("Failed to extract extension contents")?;

    tracing::info!(
        entries = payload.len(),
        dir = %output_dir.display(),
        "Extracted extension"
    );

    Ok(())
}
