use thiserror::Error;

// CRX layout:
// - Magic: "Cr24" (4 bytes)
// - Version: 2 or 3 (4 bytes, little-endian)
// - CRX2: public key length (4 bytes), signature length (4 bytes), key, signature
// - CRX3: header length (4 bytes), header (protobuf, variable length)
// - ZIP data

pub const CRX_MAGIC: &[u8; 4] = b"Cr24";
pub const ZIP_LOCAL_HEADER_MAGIC: &[u8; 4] = b"PK\x03\x04";

/// Smallest buffer that holds the magic, the version and both CRX2 length fields.
pub const MIN_CRX_LEN: usize = 16;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrxError {
    #[error("{0}")]
    MalformedContainer(String),

    #[error("Unsupported CRX version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid ZIP data in CRX")]
    InvalidPayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrxHeader {
    V2 {
        public_key_length: u32,
        signature_length: u32,
    },
    V3 {
        header_length: u32,
    },
}

impl CrxHeader {
    pub fn version(&self) -> u32 {
        match self {
            CrxHeader::V2 { .. } => 2,
            CrxHeader::V3 { .. } => 3,
        }
    }

    /// Byte index in the original buffer where the ZIP payload should begin.
    ///
    /// Not checked against the buffer length; `extract_zip_payload` does that.
    pub fn zip_offset(&self) -> u64 {
        match *self {
            CrxHeader::V2 {
                public_key_length,
                signature_length,
            } => 16 + u64::from(public_key_length) + u64::from(signature_length),
            CrxHeader::V3 { header_length } => 12 + u64::from(header_length),
        }
    }
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(word)
}

/// Check the magic, size and version of a CRX buffer and read its length fields.
pub fn validate(data: &[u8]) -> Result<CrxHeader, CrxError> {
    if data.len() < MIN_CRX_LEN {
        return Err(CrxError::MalformedContainer("CRX file too small".to_string()));
    }

    if !data.starts_with(CRX_MAGIC) {
        return Err(CrxError::MalformedContainer(
            "Invalid CRX header: Not a valid CRX file".to_string(),
        ));
    }

    // Length is checked above, every read below stays inside the first 16 bytes.
    match read_u32_le(data, 4) {
        2 => Ok(CrxHeader::V2 {
            public_key_length: read_u32_le(data, 8),
            signature_length: read_u32_le(data, 12),
        }),
        3 => Ok(CrxHeader::V3 {
            header_length: read_u32_le(data, 8),
        }),
        other => Err(CrxError::UnsupportedVersion(other)),
    }
}

pub fn compute_zip_offset(header: &CrxHeader) -> u64 {
    header.zip_offset()
}

/// Validate a CRX buffer and return a copy of the ZIP archive it wraps.
pub fn extract_zip_payload(data: &[u8]) -> Result<Vec<u8>, CrxError> {
    let header = validate(data)?;
    payload_after(data, &header)
}

/// Slice the ZIP payload out of a buffer whose header was already validated.
pub fn payload_after(data: &[u8], header: &CrxHeader) -> Result<Vec<u8>, CrxError> {
    let offset = compute_zip_offset(header);

    let zip_data = usize::try_from(offset)
        .ok()
        .and_then(|start| data.get(start..))
        .ok_or(CrxError::InvalidPayload)?;

    if !zip_data.starts_with(ZIP_LOCAL_HEADER_MAGIC) {
        tracing::debug!(
            version = header.version(),
            offset,
            len = data.len(),
            "CRX payload does not start with a ZIP local file header"
        );
        return Err(CrxError::InvalidPayload);
    }

    Ok(zip_data.to_vec())
}
