use crate::error::GenerateError;
use crate::traits::FileSystem;
use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

lazy_static! {
    static ref IMPORT_ID_PATTERN: Regex =
        Regex::new(r#"id\s*=\s*"([^"]+)""#).expect("Invalid import id regex");
}

/// Find the first `id = "..."` assignment in an import declaration
pub fn parse_resource_id(content: &str) -> Option<String> {
    IMPORT_ID_PATTERN
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Read the resource identifier out of the import declaration file
pub fn read_resource_id(fs: &dyn FileSystem, import_file: &Path) -> Result<String> {
    if !fs.exists(import_file) {
        return Err(GenerateError::ImportFileNotFound(import_file.to_path_buf()).into());
    }

    let content = fs.read_to_string(import_file)?;

    match parse_resource_id(&content) {
        Some(id) => Ok(id),
        None => Err(GenerateError::ResourceIdNotFound(import_file.to_path_buf()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockFileSystem;

    #[test]
    fn test_parse_resource_id() {
        let content = r#"
import {
  id = "projects/my-project/zones/us-central1-a/instances/web-1"
  to = module.compute.google_compute_instance.this["web-1"]
}
"#;

        assert_eq!(
            parse_resource_id(content),
            Some("projects/my-project/zones/us-central1-a/instances/web-1".to_string())
        );
    }

    #[test]
    fn test_parse_resource_id_flexible_spacing() {
        assert_eq!(parse_resource_id(r#"id="abc""#), Some("abc".to_string()));
        assert_eq!(
            parse_resource_id("id   =\n  \"x y {z}\""),
            Some("x y {z}".to_string())
        );
    }

    #[test]
    fn test_parse_resource_id_takes_first_match() {
        let content = "id = \"first\"\nid = \"second\"\n";
        assert_eq!(parse_resource_id(content), Some("first".to_string()));
    }

    #[test]
    fn test_parse_resource_id_rejects_empty_value() {
        assert_eq!(parse_resource_id(r#"id = """#), None);
        assert_eq!(parse_resource_id("to = module.x"), None);
    }

    #[test]
    fn test_read_missing_file() {
        let fs = MockFileSystem::new();
        let err = read_resource_id(&fs, Path::new("/ws/import.tf")).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GenerateError>(),
            Some(GenerateError::ImportFileNotFound(_))
        ));
    }

    #[test]
    fn test_read_file_without_id() {
        let fs = MockFileSystem::with_files(&[("/ws/import.tf", "import {\n  to = x\n}\n")]);
        let err = read_resource_id(&fs, Path::new("/ws/import.tf")).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GenerateError>(),
            Some(GenerateError::ResourceIdNotFound(_))
        ));
    }

    #[test]
    fn test_read_file_with_id() {
        let fs = MockFileSystem::with_files(&[("/ws/import.tf", "id = \"projects/p/x\"")]);
        assert_eq!(
            read_resource_id(&fs, Path::new("/ws/import.tf")).unwrap(),
            "projects/p/x"
        );
    }
}
