use crxkit::input::{convert_package, extract_extension_id, fallback_id, output_file_name};
use crxkit::models::OutputFormat;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;

const ID: &str = "nkbihfbeogaeaoehlefnkodbefgpgknn";

fn crx3_with_manifest(manifest: &str) -> (Vec<u8>, Vec<u8>) {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer.start_file("manifest.json", SimpleFileOptions::default()).unwrap();
    writer.write_all(manifest.as_bytes()).unwrap();
    let zip = writer.finish().unwrap().into_inner();

    let mut crx = b"Cr24".to_vec();
    crx.extend_from_slice(&3u32.to_le_bytes());
    crx.extend_from_slice(&0u32.to_le_bytes());
    crx.extend_from_slice(&zip);
    (crx, zip)
}

#[test]
fn test_bare_extension_id() {
    let input = "nkbihfbeogaeaoehlefnkodbefgpgknn";
    assert_eq!(extract_extension_id(input), Some(input.to_string()));
}

#[test]
fn test_store_url() {
    let input = "https://chromewebstore.google.com/detail/metamask/nkbihfbeogaeaoehlefnkodbefgpgknn";
    assert_eq!(
        extract_extension_id(input),
        Some("nkbihfbeogaeaoehlefnkodbefgpgknn".to_string())
    );
}

#[test]
fn test_rejects_non_ids() {
    assert_eq!(extract_extension_id("ublock-origin"), None);
    assert_eq!(extract_extension_id("NKBIHFBEOGAEAOEHLEFNKODBEFGPGKNN"), None);
    assert_eq!(extract_extension_id("nkbihfbeogaeaoehlefnkodbefgpgknnx"), None);
    assert_eq!(
        extract_extension_id("https://addons.mozilla.org/en-US/firefox/addon/ublock-origin/"),
        None
    );
}

#[test]
fn test_file_name_falls_back_to_id() {
    let id = "nkbihfbeogaeaoehlefnkodbefgpgknn";
    assert_eq!(
        output_file_name(None, id, OutputFormat::Zip),
        format!("{}.zip", id)
    );
    assert_eq!(
        output_file_name(Some("MetaMask"), id, OutputFormat::Zip),
        "MetaMask.zip"
    );
}

#[test]
fn test_fallback_id() {
    let file = Path::new("/tmp/downloads/some-ext.crx");
    assert_eq!(fallback_id(None, file).unwrap(), "some-ext");
    assert_eq!(
        fallback_id(Some("https://chromewebstore.google.com/detail/x/nkbihfbeogaeaoehlefnkodbefgpgknn"), file).unwrap(),
        ID
    );
    assert!(fallback_id(Some("not-an-id"), file).is_err());
}

#[test]
fn test_convert_zip_uses_resolved_name() {
    let (crx, zip) = crx3_with_manifest(r#"{"name": "Cool Extension"}"#);
    let package = convert_package(&crx, OutputFormat::Zip, ID).unwrap();
    assert_eq!(package.file_name, "Cool-Extension.zip");
    assert_eq!(package.content, zip);
}

#[test]
fn test_convert_zip_without_name_uses_id() {
    let (crx, _) = crx3_with_manifest(r#"{"version": "1.0"}"#);
    let package = convert_package(&crx, OutputFormat::Zip, ID).unwrap();
    assert_eq!(package.file_name, format!("{}.zip", ID));
}

#[test]
fn test_convert_crx_keeps_bytes_and_uses_id() {
    let (crx, _) = crx3_with_manifest(r#"{"name": "Cool Extension"}"#);
    let package = convert_package(&crx, OutputFormat::Crx, ID).unwrap();
    assert_eq!(package.file_name, format!("{}.crx", ID));
    assert_eq!(package.content, crx);
}

#[test]
fn test_convert_rejects_bad_container() {
    let mut crx = b"Cr24".to_vec();
    crx.extend_from_slice(&4u32.to_le_bytes());
    crx.extend_from_slice(&[0; 8]);

    let err = convert_package(&crx, OutputFormat::Crx, ID).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported CRX version: 4");
    assert!(convert_package(&crx, OutputFormat::Zip, ID).is_err());
}
