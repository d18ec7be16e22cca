//! Ordered filename → prompt tables.
//!
//! Catalogs are JSON arrays of `{"filename", "prompt"}` objects. The built-in
//! ones are compiled into the binary from `catalog/*.json`; any file with the
//! same shape can be loaded with [`PromptCatalog::load`].

use std::collections::HashSet;
use std::path::Path;

use crate::constants::{COUNTRIES_CATALOG, COUNTRIES_DIR_NAME, STORIES_CATALOG, STORIES_DIR_NAME};
use crate::error::StartupError;
use crate::models::CatalogEntry;

#[derive(Clone, Debug)]
pub struct PromptCatalog {
    name: String,
    entries: Vec<CatalogEntry>,
}

impl PromptCatalog {
    pub fn new(name: impl Into<String>, entries: Vec<CatalogEntry>) -> Result<Self, StartupError> {
        let name = name.into();
        validate_entries(&name, &entries)?;
        Ok(Self { name, entries })
    }

    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self, StartupError> {
        let name = name.into();
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(json).map_err(|err| StartupError::Catalog {
                name: name.clone(),
                reason: err.to_string(),
            })?;
        Self::new(name, entries)
    }

    /// Reads a catalog from a JSON file on disk. The catalog is named after the
    /// file stem. The bundled binary uses [`PromptCatalog::countries`] and
    /// [`PromptCatalog::stories`]; this is for library callers with their own tables.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StartupError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let json = std::fs::read_to_string(path).map_err(|err| StartupError::Catalog {
            name: name.clone(),
            reason: err.to_string(),
        })?;
        Self::from_json(name, &json)
    }

    pub fn countries() -> Result<Self, StartupError> {
        Self::from_json(COUNTRIES_DIR_NAME, COUNTRIES_CATALOG)
    }

    pub fn stories() -> Result<Self, StartupError> {
        Self::from_json(STORIES_DIR_NAME, STORIES_CATALOG)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_entries(name: &str, entries: &[CatalogEntry]) -> Result<(), StartupError> {
    let invalid = |reason: String| StartupError::Catalog {
        name: name.to_string(),
        reason,
    };

    let mut seen = HashSet::new();
    for entry in entries {
        if !is_safe_file_name(&entry.filename) {
            return Err(invalid(format!("unsafe file name '{}'", entry.filename)));
        }
        if !is_image_file_name(&entry.filename) {
            return Err(invalid(format!(
                "'{}' does not have an image extension",
                entry.filename
            )));
        }
        if entry.prompt.trim().is_empty() {
            return Err(invalid(format!("empty prompt for '{}'", entry.filename)));
        }
        if !seen.insert(entry.filename.as_str()) {
            return Err(invalid(format!("duplicate file name '{}'", entry.filename)));
        }
    }
    Ok(())
}

fn is_safe_file_name(file_name: &str) -> bool {
    !file_name.is_empty()
        && !file_name.contains(['/', '\\'])
        && !file_name.contains("..")
        && !file_name.contains('\0')
}

fn is_image_file_name(file_name: &str) -> bool {
    mime_guess::from_path(file_name)
        .first()
        .is_some_and(|mime| mime.type_() == mime_guess::mime::IMAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_catalogs_parse_in_order() {
        let countries = PromptCatalog::countries().unwrap();
        assert_eq!(countries.name(), "countries");
        assert_eq!(countries.len(), 22);
        assert_eq!(countries.entries()[0].filename, "usa-landmark.jpg");
        assert_eq!(
            countries.entries().last().unwrap().filename,
            "south-korea-landmark.jpg"
        );

        let stories = PromptCatalog::stories().unwrap();
        assert_eq!(stories.name(), "stories");
        assert!(!stories.is_empty());
    }

    #[test]
    fn json_order_is_preserved() {
        let catalog = PromptCatalog::from_json(
            "t",
            r#"[
                {"filename": "z.png", "prompt": "last letter"},
                {"filename": "a.png", "prompt": "first letter"}
            ]"#,
        )
        .unwrap();
        let names: Vec<_> = catalog.entries().iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, vec!["z.png", "a.png"]);
    }

    #[test]
    fn duplicate_file_names_are_rejected() {
        let err = PromptCatalog::new(
            "dup",
            vec![
                CatalogEntry::new("a.jpg", "one"),
                CatalogEntry::new("a.jpg", "two"),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate file name 'a.jpg'"));
    }

    #[test]
    fn path_traversal_is_rejected() {
        for bad in ["../escape.jpg", "nested/file.jpg", "back\\slash.jpg", ""] {
            let result = PromptCatalog::new("bad", vec![CatalogEntry::new(bad, "p")]);
            assert!(result.is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn non_image_extensions_are_rejected() {
        let err = PromptCatalog::new("bad", vec![CatalogEntry::new("notes.txt", "p")]).unwrap_err();
        assert!(err.to_string().contains("image extension"));
        assert!(PromptCatalog::new("ok", vec![CatalogEntry::new("hero.webp", "p")]).is_ok());
    }

    #[test]
    fn blank_prompts_are_rejected() {
        let err = PromptCatalog::new("bad", vec![CatalogEntry::new("a.png", "  ")]).unwrap_err();
        assert!(err.to_string().contains("empty prompt"));
    }

    #[test]
    fn malformed_json_reports_catalog_name() {
        let err = PromptCatalog::from_json("broken", "{not json").unwrap_err();
        assert!(err.to_string().starts_with("invalid prompt catalog 'broken'"));
    }

    #[test]
    fn load_reads_catalog_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"filename": "one.jpg", "prompt": "a lighthouse"}}]"#).unwrap();

        let catalog = PromptCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].prompt, "a lighthouse");
    }
}
