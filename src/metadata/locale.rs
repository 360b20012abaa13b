use crate::models::MessageTable;
use crate::unpack::ArchiveReader;

/// Locales tried before scanning the whole `_locales` directory.
pub const PREFERRED_LOCALES: &[&str] = &["en", "en_US", "en_GB"];

const LOCALES_DIR: &str = "_locales/";
const MESSAGES_FILE: &str = "/messages.json";

pub fn messages_path(locale: &str) -> String {
    format!("{}{}{}", LOCALES_DIR, locale, MESSAGES_FILE)
}

/// Locale name of a `_locales/<locale>/messages.json` entry.
fn locale_of(path: &str) -> Option<&str> {
    path.strip_prefix(LOCALES_DIR)?
        .strip_suffix(MESSAGES_FILE)
        .filter(|locale| !locale.is_empty() && !locale.contains('/'))
}

fn load_table(reader: &mut impl ArchiveReader, path: &str) -> Option<MessageTable> {
    let json = reader.read_text(path).ok()?;
    match serde_json::from_str(&json) {
        Ok(table) => Some(table),
        Err(e) => {
            tracing::debug!("Skipping malformed locale file {}: {}", path, e);
            None
        }
    }
}

fn lookup(reader: &mut impl ArchiveReader, path: &str, key: &str) -> Option<String> {
    load_table(reader, path)?.message(key).map(str::to_string)
}

/// Resolve a message key against the extension's locale tables.
///
/// The preferred English locales are tried first, then every other locale in
/// archive order. Missing or malformed tables are skipped. The first table
/// defining the key wins; an empty message there resolves to `None`.
pub fn localized_message(reader: &mut impl ArchiveReader, key: &str) -> Option<String> {
    first_message(reader, key).filter(|message| !message.is_empty())
}

fn first_message(reader: &mut impl ArchiveReader, key: &str) -> Option<String> {
    for locale in PREFERRED_LOCALES {
        if let Some(message) = lookup(reader, &messages_path(locale), key) {
            return Some(message);
        }
    }

    let others: Vec<String> = reader
        .entry_names()
        .into_iter()
        .filter(|path| locale_of(path).is_some_and(|l| !PREFERRED_LOCALES.contains(&l)))
        .collect();

    others
        .iter()
        .find_map(|path| lookup(reader, path, key))
}
