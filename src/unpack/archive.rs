use std::io::{Cursor, Read};
use std::path::Path;
use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Entry not found in archive: {0}")]
    NotFound(String),

    #[error("Corrupt ZIP archive: {0}")]
    Corrupt(#[from] ZipError),

    #[error("Entry is not valid UTF-8 text: {0}")]
    NotUtf8(String),
}

/// Read-only view over an extension archive.
pub trait ArchiveReader {
    /// Entry paths in archive order.
    fn entry_names(&self) -> Vec<String>;

    fn read_text(&mut self, path: &str) -> Result<String, ArchiveError>;
}

/// An in-memory ZIP archive, usually the payload of a CRX file.
pub struct ZipPayload<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
}

impl<'a> ZipPayload<'a> {
    pub fn open(data: &'a [u8]) -> Result<Self, ArchiveError> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        Ok(Self { archive })
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    pub fn extract_to(&mut self, output_dir: &Path) -> Result<(), ArchiveError> {
        self.archive.extract(output_dir)?;
        Ok(())
    }
}

impl ArchiveReader for ZipPayload<'_> {
    fn entry_names(&self) -> Vec<String> {
        (0..self.archive.len())
            .filter_map(|i| self.archive.name_for_index(i).map(str::to_string))
            .collect()
    }

    fn read_text(&mut self, path: &str) -> Result<String, ArchiveError> {
        let mut file = match self.archive.by_name(path) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Err(ArchiveError::NotFound(path.to_string())),
            Err(e) => return Err(e.into()),
        };

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| ArchiveError::Corrupt(ZipError::Io(e)))?;

        String::from_utf8(bytes).map_err(|_| ArchiveError::NotUtf8(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_entry_names_keep_archive_order() {
        let data = build_zip(&[
            ("b.txt", b"b".as_slice()),
            ("a.txt", b"a".as_slice()),
            ("c/d.txt", b"d".as_slice()),
        ]);
        let payload = ZipPayload::open(&data).unwrap();
        assert_eq!(payload.entry_names(), vec!["b.txt", "a.txt", "c/d.txt"]);
        assert_eq!(payload.len(), 3);
    }

    #[test]
    fn test_read_text_outcomes() {
        let data = build_zip(&[
            ("ok.txt", b"hello".as_slice()),
            ("bin.dat", [0xffu8, 0xfe, 0x00].as_slice()),
        ]);
        let mut payload = ZipPayload::open(&data).unwrap();

        assert_eq!(payload.read_text("ok.txt").unwrap(), "hello");
        assert!(matches!(payload.read_text("missing.txt"), Err(ArchiveError::NotFound(_))));
        assert!(matches!(payload.read_text("bin.dat"), Err(ArchiveError::NotUtf8(_))));
    }

    #[test]
    fn test_open_corrupt_archive() {
        let result = ZipPayload::open(b"PK\x03\x04 definitely not a zip");
        assert!(matches!(result, Err(ArchiveError::Corrupt(_))));
    }
}
