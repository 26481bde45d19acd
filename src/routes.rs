//! Route declarations.
//!
//! A route names the types it exchanges as [`TypeDescriptor`]s; the generator resolves
//! them through the schema registry when the route is added to the document. Routes can
//! be built in code or deserialized from a manifest file.

use crate::tags::Tag;
use crate::type_descriptor::TypeDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single API endpoint to describe
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDeclaration {
    /// URL path pattern, either `/users/:id` or `/users/{id}`
    pub path: String,
    pub method: HttpMethod,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Groupings this route belongs to; registered through the tag registry
    pub tags: Vec<Tag>,
    pub parameters: Vec<ParameterDeclaration>,
    /// Request body type
    pub request: Option<TypeDescriptor>,
    /// Type of the `200` response body
    pub response: Option<TypeDescriptor>,
}

impl RouteDeclaration {
    /// Create a route with no parameters, tags or bodies
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            operation_id: None,
            summary: None,
            description: None,
            tags: Vec::new(),
            parameters: Vec::new(),
            request: None,
            response: None,
        }
    }

    pub fn operation_id(mut self, id: impl Into<String>) -> Self {
        self.operation_id = Some(id.into());
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn parameter(mut self, parameter: ParameterDeclaration) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn request(mut self, ty: TypeDescriptor) -> Self {
        self.request = Some(ty);
        self
    }

    pub fn response(mut self, ty: TypeDescriptor) -> Self {
        self.response = Some(ty);
        self
    }
}

/// HTTP methods an operation can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    #[serde(alias = "GET")]
    Get,
    #[serde(alias = "POST")]
    Post,
    #[serde(alias = "PUT")]
    Put,
    #[serde(alias = "DELETE")]
    Delete,
    #[serde(alias = "PATCH")]
    Patch,
    #[serde(alias = "OPTIONS")]
    Options,
    #[serde(alias = "HEAD")]
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path, query or header parameter of a route
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDeclaration {
    pub name: String,
    pub location: ParameterLocation,
    pub ty: TypeDescriptor,
    pub required: bool,
    pub description: Option<String>,
}

impl ParameterDeclaration {
    /// Path parameters are always required
    pub fn path(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self::new(name, ParameterLocation::Path, ty, true)
    }

    /// Query parameter; required unless its type is an `Option`
    pub fn query(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        let required = !ty.is_option();
        Self::new(name, ParameterLocation::Query, ty, required)
    }

    /// Header parameter; required unless its type is an `Option`
    pub fn header(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        let required = !ty.is_option();
        Self::new(name, ParameterLocation::Header, ty, required)
    }

    pub fn new(
        name: impl Into<String>,
        location: ParameterLocation,
        ty: TypeDescriptor,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            ty,
            required,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Where a parameter value is carried in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(source: &str) -> TypeDescriptor {
        TypeDescriptor::parse(source).unwrap()
    }

    #[test]
    fn test_route_builder() {
        let route = RouteDeclaration::new("/users/:id", HttpMethod::Get)
            .operation_id("get_user")
            .tag(Tag::new("users"))
            .parameter(ParameterDeclaration::path("id", ty("u64")))
            .response(ty("User"));

        assert_eq!(route.operation_id.as_deref(), Some("get_user"));
        assert_eq!(route.tags.len(), 1);
        assert_eq!(route.parameters[0].location, ParameterLocation::Path);
        assert!(route.request.is_none());
        assert_eq!(route.response, Some(ty("User")));
    }

    #[test]
    fn test_optional_query_parameter_is_not_required() {
        assert!(!ParameterDeclaration::query("page", ty("Option<u32>")).required);
        assert!(ParameterDeclaration::query("page", ty("u32")).required);
        assert!(ParameterDeclaration::path("id", ty("Option<u32>")).required);
    }

    #[test]
    fn test_method_serde_accepts_both_cases() {
        let lower: HttpMethod = serde_json::from_str("\"post\"").unwrap();
        let upper: HttpMethod = serde_json::from_str("\"POST\"").unwrap();
        assert_eq!(lower, HttpMethod::Post);
        assert_eq!(upper, HttpMethod::Post);
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_location_serializes_lowercase() {
        let json = serde_json::to_string(&ParameterLocation::Header).unwrap();
        assert_eq!(json, "\"header\"");
    }
}
