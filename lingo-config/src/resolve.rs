// Locale message file resolution

use crate::locale::LocaleObject;
use lingo_log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions recognized as locale message files.
pub const LOCALE_FILE_EXTENSIONS: &[&str] = &["json", "json5", "yaml", "yml"];

/// Whether `name` has one of the [`LOCALE_FILE_EXTENSIONS`].
pub fn is_locale_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| LOCALE_FILE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// All locale message files below `lang_dir`, sorted.
pub fn locale_files(lang_dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(lang_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().to_str().is_some_and(is_locale_file))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Attach resolved absolute paths to every locale's `file`/`files`.
///
/// `file` wins over `files`. References that do not exist on disk are left
/// unresolved (`path: None`, or dropped from `paths`).
pub fn resolve_locale_files(lang_dir: &Path, locales: Vec<LocaleObject>) -> Vec<LocaleObject> {
    let files = locale_files(lang_dir);
    debug!("found {} locale files in {}", files.len(), lang_dir.display());

    let find = |name: &str| -> Option<PathBuf> {
        let wanted = lang_dir.join(name);
        files.iter().find(|f| **f == wanted).cloned()
    };

    locales
        .into_iter()
        .map(|mut locale| {
            if let Some(file) = &locale.file {
                locale.path = find(file);
            } else if let Some(list) = &locale.files {
                locale.paths = list.iter().filter_map(|f| find(f)).collect();
            }
            locale
        })
        .collect()
}
