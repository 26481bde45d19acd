//! API manifest files.
//!
//! A manifest declares the document metadata, tags and routes for the command-line tool.
//! Types are written in Rust syntax (`Vec<User>`, `Page<Order>`) and resolved against the
//! definitions found in the scanned project.
//!
//! ```yaml
//! info:
//!   title: Users API
//!   version: 1.0.0
//! tags:
//!   - name: users
//!     description: User management
//! routes:
//!   - path: /users/:id
//!     method: get
//!     operationId: get_user
//!     tags: [users]
//!     parameters:
//!       - { name: id, in: path, type: u64 }
//!     response: User
//! ```

use crate::document::{ExternalDocs, Info, Server};
use crate::generator::Configuration;
use crate::routes::{HttpMethod, ParameterDeclaration, ParameterLocation, RouteDeclaration};
use crate::tags::Tag;
use crate::type_descriptor::TypeDescriptor;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub info: Option<Info>,
    #[serde(default)]
    pub servers: Vec<Server>,
    #[serde(default)]
    pub external_docs: Option<ExternalDocs>,
    /// Tag definitions routes refer to by name
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Types to include in the schema catalogue even if no route mentions them
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
    #[serde(default)]
    pub routes: Vec<ManifestRoute>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestRoute {
    pub path: String,
    pub method: HttpMethod,
    #[serde(default)]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Tag names; names not defined at the top level become bare tags
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<ManifestParameter>,
    #[serde(default)]
    pub request: Option<TypeDescriptor>,
    #[serde(default)]
    pub response: Option<TypeDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ManifestParameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    /// Defaults to true for path parameters and to "not an `Option`" otherwise
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Manifest {
    /// Load a manifest, parsed as JSON for `.json` files and as YAML otherwise
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading manifest {:?}", path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {:?}", path))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let manifest: Manifest = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON manifest: {:?}", path))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML manifest: {:?}", path))?
        };

        info!(
            "Loaded manifest with {} routes and {} tags",
            manifest.routes.len(),
            manifest.tags.len()
        );
        Ok(manifest)
    }

    /// Apply the document metadata of this manifest to `config`
    pub fn configure(&self, mut config: Configuration) -> Configuration {
        if let Some(info) = &self.info {
            config = config.info(info.clone());
        }
        for server in &self.servers {
            config = config.server(server.clone());
        }
        if let Some(docs) = &self.external_docs {
            config = config.external_docs(docs.clone());
        }
        config
    }

    /// Route declarations with tag names replaced by their definitions
    pub fn route_declarations(&self) -> Vec<RouteDeclaration> {
        self.routes
            .iter()
            .map(|route| RouteDeclaration {
                path: route.path.clone(),
                method: route.method,
                operation_id: route.operation_id.clone(),
                summary: route.summary.clone(),
                description: route.description.clone(),
                tags: route.tags.iter().map(|name| self.tag(name)).collect(),
                parameters: route.parameters.iter().map(ManifestParameter::declaration).collect(),
                request: route.request.clone(),
                response: route.response.clone(),
            })
            .collect()
    }

    fn tag(&self, name: &str) -> Tag {
        self.tags
            .iter()
            .find(|tag| tag.name == name)
            .cloned()
            .unwrap_or_else(|| Tag::new(name))
    }
}

impl ManifestParameter {
    fn declaration(&self) -> ParameterDeclaration {
        let mut declaration = match self.location {
            ParameterLocation::Path => ParameterDeclaration::path(&self.name, self.ty.clone()),
            ParameterLocation::Header => ParameterDeclaration::header(&self.name, self.ty.clone()),
            location => ParameterDeclaration::new(
                &self.name,
                location,
                self.ty.clone(),
                !self.ty.is_option(),
            ),
        };
        if let Some(required) = self.required {
            declaration.required = required;
        }
        declaration.description = self.description.clone();
        declaration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::TempDir;

    const YAML: &str = r#"
info:
  title: Users API
  version: 2.1.0
servers:
  - url: https://api.example.com
tags:
  - name: users
    description: User management
types:
  - AuditEvent
routes:
  - path: /users/:id
    method: get
    operationId: get_user
    tags: [users, admin]
    parameters:
      - { name: id, in: path, type: u64 }
      - { name: verbose, in: query, type: Option<bool> }
    response: User
  - path: /users
    method: POST
    request: CreateUserRequest
    response: User
"#;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_yaml_manifest() {
        let dir = TempDir::new().unwrap();
        let manifest = Manifest::load(&write(&dir, "api.yaml", YAML)).unwrap();

        assert_eq!(manifest.info.as_ref().unwrap().title, "Users API");
        assert_eq!(manifest.servers.len(), 1);
        assert_eq!(manifest.types, vec![TypeDescriptor::new("AuditEvent")]);
        assert_eq!(manifest.routes.len(), 2);
        assert_eq!(manifest.routes[1].method, HttpMethod::Post);
        assert_eq!(
            manifest.routes[1].request,
            Some(TypeDescriptor::new("CreateUserRequest"))
        );
    }

    #[test]
    fn test_load_json_manifest() {
        let dir = TempDir::new().unwrap();
        let json = r#"{
            "routes": [
                {"path": "/health", "method": "get", "response": "String"}
            ]
        }"#;
        let manifest = Manifest::load(&write(&dir, "api.json", json)).unwrap();

        assert!(manifest.info.is_none());
        assert_eq!(manifest.routes[0].path, "/health");
    }

    #[test]
    fn test_route_declarations_resolve_tags_and_parameters() {
        let manifest: Manifest = serde_yaml::from_str(YAML).unwrap();
        let routes = manifest.route_declarations();

        let get_user = &routes[0];
        assert_eq!(get_user.tags[0].description.as_deref(), Some("User management"));
        assert_eq!(get_user.tags[1], Tag::new("admin"));
        assert!(get_user.parameters[0].required);
        assert!(!get_user.parameters[1].required);
        assert_eq!(get_user.response, Some(TypeDescriptor::new("User")));
    }

    #[test]
    fn test_explicit_required_overrides_default() {
        let parameter: ManifestParameter =
            serde_yaml::from_str("{ name: page, in: query, type: u32, required: false }").unwrap();
        assert!(!parameter.declaration().required);
    }

    #[test]
    fn test_invalid_type_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "api.yaml",
            "routes:\n  - path: /x\n    method: get\n    response: \"Vec<\"\n",
        );
        let err = Manifest::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse YAML manifest"));
    }

    #[test]
    fn test_missing_file() {
        let err = Manifest::load(Path::new("/nonexistent/api.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read manifest"));
    }
}
