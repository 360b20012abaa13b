use crate::models::ContainerReport;
use crate::unpack::CrxHeader;
use colored::*;

pub fn print_container_report(report: &ContainerReport) {
    print_header(report);
    print_container_section(report);
    print_manifest_section(report);
}

fn print_header(report: &ContainerReport) {
    println!("{}", "┌─────────────────────────────────────────────────────────────┐".bright_black());

    let name = report.resolved_name.as_deref().unwrap_or("Unknown Extension");
    println!("│  Extension: {:<48}│", name.bold());
    println!("│  File: {:<53}│", report.source);

    println!("{}", "└─────────────────────────────────────────────────────────────┘".bright_black());
    println!();
}

fn print_container_section(report: &ContainerReport) {
    println!("{}", "── Container ────────────────────────────────────────────────".bright_black());

    match report.header {
        Some(header) => {
            println!("  {:<18} {}", "Format:", format!("CRX{}", header.version()).cyan());
            match header {
                CrxHeader::V2 {
                    public_key_length,
                    signature_length,
                } => {
                    println!("  {:<18} {} bytes", "Public key:", public_key_length);
                    println!("  {:<18} {} bytes", "Signature:", signature_length);
                }
                CrxHeader::V3 { header_length } => {
                    println!("  {:<18} {} bytes", "Header:", header_length);
                }
            }
            println!("  {:<18} {}", "ZIP offset:", header.zip_offset());
        }
        None => println!("  {:<18} {}", "Format:", "ZIP".cyan()),
    }

    println!("  {:<18} {} bytes", "Payload:", report.payload_len);
    println!();
}

fn print_manifest_section(report: &ContainerReport) {
    println!("{}", "── Manifest ─────────────────────────────────────────────────".bright_black());

    let Some(ref manifest) = report.manifest else {
        println!("  {}", "manifest.json missing or unreadable".yellow());
        println!();
        return;
    };

    let raw_name = manifest.name.as_deref().unwrap_or("?");
    println!("  {:<18} {}", "Name:", raw_name);

    let version = manifest.version.as_deref().unwrap_or("?");
    let manifest_v = manifest
        .manifest_version
        .map(|v| format!("Manifest V{}", v))
        .unwrap_or_else(|| "?".to_string());
    println!("  {:<18} {} │ {}", "Version:", version, manifest_v);

    if let Some(ref locale) = manifest.default_locale {
        println!("  {:<18} {}", "Default locale:", locale);
    }

    match report.resolved_name.as_deref() {
        Some(name) => println!("  {:<18} {}", "File name:", name.green()),
        None => println!("  {:<18} {}", "File name:", "none (falls back to ID)".bright_black()),
    }

    if let Some(ref description) = manifest.description {
        println!();
        println!("  {}", description.bright_black());
    }

    println!();
}
