//! Rendering of finished documents to YAML or JSON, and writing them out.

use crate::document::OpenApiDocument;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Serialize a document to YAML.
///
/// ```
/// use openapi_schema_gen::document::{Info, OpenApiDocument};
/// use openapi_schema_gen::serializer::serialize_yaml;
///
/// let yaml = serialize_yaml(&OpenApiDocument::new(Info::default())).unwrap();
/// assert!(yaml.contains("openapi: 3.0.3"));
/// ```
pub fn serialize_yaml(doc: &OpenApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to YAML");
    serde_yaml::to_string(doc).context("Failed to serialize OpenAPI document to YAML")
}

/// Serialize a document to pretty-printed JSON
pub fn serialize_json(doc: &OpenApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to JSON");
    serde_json::to_string_pretty(doc).context("Failed to serialize OpenAPI document to JSON")
}

/// Write `content` to `path`, creating parent directories and replacing any existing file
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Info, Server};
    use crate::schema::Schema;
    use crate::tags::Tag;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn document() -> OpenApiDocument {
        let mut doc = OpenApiDocument::new(Info::new("Test API", "1.2.3"));
        doc.servers.push(Server::new("https://api.example.com"));
        doc.tags.push(Tag::new("users").with_description("User management"));

        let mut schemas = BTreeMap::new();
        schemas.insert(
            "User".to_string(),
            Schema {
                properties: Some(BTreeMap::from([(
                    "id".to_string(),
                    Schema::with_format("integer", "int64"),
                )])),
                required: Some(vec!["id".to_string()]),
                ..Schema::object()
            },
        );
        doc.components = Some(crate::document::Components {
            schemas: Some(schemas),
        });
        doc
    }

    #[test]
    fn test_serialize_yaml() {
        let yaml = serialize_yaml(&document()).unwrap();

        assert!(yaml.contains("openapi: 3.0.3"));
        assert!(yaml.contains("title: Test API"));
        assert!(yaml.contains("- url: https://api.example.com"));
        assert!(yaml.contains("format: int64"));
    }

    #[test]
    fn test_serialize_json() {
        let json = serialize_json(&document()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["info"]["version"], "1.2.3");
        assert_eq!(value["tags"][0]["name"], "users");
        assert_eq!(
            value["components"]["schemas"]["User"]["required"],
            serde_json::json!(["id"])
        );
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_yaml_parses_back_to_same_document() {
        let doc = document();
        let parsed: OpenApiDocument = serde_yaml::from_str(&serialize_yaml(&doc).unwrap()).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_write_to_file_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("docs/api/openapi.yaml");

        write_to_file("openapi: 3.0.3\n", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "openapi: 3.0.3\n");
    }

    #[test]
    fn test_write_to_file_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("openapi.json");

        write_to_file("old", &path).unwrap();
        write_to_file("new", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }
}
