use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Path prefix of intra-document schema references
pub const REF_PREFIX: &str = "#/components/schemas/";

/// Build the `$ref` path for a component schema name
pub fn reference_path(name: &str) -> String {
    format!("{}{}", REF_PREFIX, name)
}

/// OpenAPI Schema definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// The type of the schema (string, integer, object, array, etc.)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Format for primitive types (e.g., "int32", "int64", "float", "double")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Human readable description, taken from doc comments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Properties for object types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,
    /// Required field names for object types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Value schema for map-like objects
    #[serde(rename = "additionalProperties", skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<Schema>>,
    /// Items schema for array types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(rename = "uniqueItems", skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,
    #[serde(rename = "minItems", skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(rename = "maxItems", skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    /// Enum values for enum types
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(rename = "allOf", skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<Schema>>,
    #[serde(rename = "oneOf", skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Schema>>,
    /// Reference to another schema
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Schema {
    /// A schema of the given primitive type with no format
    pub fn of_type(schema_type: &str) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            ..Default::default()
        }
    }

    /// A schema of the given primitive type and format
    pub fn with_format(schema_type: &str, format: &str) -> Self {
        Self {
            format: Some(format.to_string()),
            ..Self::of_type(schema_type)
        }
    }

    /// Placeholder object schema with no declared properties
    pub fn object() -> Self {
        Self::of_type("object")
    }

    /// Array of `items`
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of_type("array")
        }
    }

    /// Fixed-length array of the given element schemas.
    ///
    /// Identical element schemas are collapsed; mixed elements become a `oneOf`.
    pub fn tuple(elements: Vec<Schema>) -> Self {
        let len = elements.len();
        let mut distinct: Vec<Schema> = Vec::new();
        for element in elements {
            if !distinct.contains(&element) {
                distinct.push(element);
            }
        }

        let items = if distinct.len() == 1 {
            distinct.remove(0)
        } else {
            Schema {
                one_of: Some(distinct),
                ..Default::default()
            }
        };

        Self {
            min_items: Some(len),
            max_items: Some(len),
            ..Self::array(items)
        }
    }

    /// Free-form schema accepting any value
    pub fn any() -> Self {
        Self::default()
    }

    /// A `$ref` to a component schema
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(reference_path(name)),
            ..Default::default()
        }
    }

    /// Whether this schema is only a `$ref`
    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }
}

/// A schema together with the display name of the type it was produced for.
///
/// Schemas produced by the registry carry a reference; schemas produced by a partial
/// registrar are usually inline bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSchema {
    pub name: String,
    pub schema: Schema,
}

impl NamedSchema {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}
