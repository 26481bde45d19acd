//! Partial schema registrars.
//!
//! A registrar is consulted before the generic resolver and may either claim a type by
//! returning a [`NamedSchema`] or decline with `Ok(None)`. Declining is the normal outcome
//! for types a registrar does not know about. Registrars receive the orchestrating
//! [`SchemaRegistry`] so nested types go through the same resolution chain.

use crate::error::Result;
use crate::registry::SchemaRegistry;
use crate::schema::{NamedSchema, Schema};
use crate::type_descriptor::{TypeDescriptor, TUPLE};
use log::debug;

/// A resolver that may claim a type before the generic fallback runs
pub trait PartialSchemaRegistrar {
    /// Produce a schema for `ty`, or `Ok(None)` to let the next registrar try.
    fn get(&self, ty: &TypeDescriptor, registry: &mut SchemaRegistry)
        -> Result<Option<NamedSchema>>;
}

impl<F> PartialSchemaRegistrar for F
where
    F: Fn(&TypeDescriptor, &mut SchemaRegistry) -> Result<Option<NamedSchema>>,
{
    fn get(
        &self,
        ty: &TypeDescriptor,
        registry: &mut SchemaRegistry,
    ) -> Result<Option<NamedSchema>> {
        self(ty, registry)
    }
}

/// Built-in registrar for scalars, well-known library types, wrappers and collections.
///
/// Results are inline bodies named with the registry's namer; nothing is written to the
/// schema catalogue for the claimed type itself.
pub struct PrimitiveSchemas;

impl PartialSchemaRegistrar for PrimitiveSchemas {
    fn get(
        &self,
        ty: &TypeDescriptor,
        registry: &mut SchemaRegistry,
    ) -> Result<Option<NamedSchema>> {
        let schema = match (ty.name.as_str(), ty.args.as_slice()) {
            ("Option" | "Box" | "Rc" | "Arc" | "Cow", [inner]) => registry.get(inner)?.schema,
            ("Vec" | "VecDeque" | "LinkedList", [inner]) => {
                Schema::array(registry.get(inner)?.schema)
            }
            ("HashSet" | "BTreeSet", [inner]) => Schema {
                unique_items: Some(true),
                ..Schema::array(registry.get(inner)?.schema)
            },
            ("HashMap" | "BTreeMap", [_, value]) => Schema {
                additional_properties: Some(Box::new(registry.get(value)?.schema)),
                ..Schema::object()
            },
            (TUPLE, []) => Schema::any(),
            (TUPLE, elements) => {
                let mut schemas = Vec::with_capacity(elements.len());
                for element in elements {
                    schemas.push(registry.get(element)?.schema);
                }
                Schema::tuple(schemas)
            }
            (name, args) => match library_schema(name) {
                Some(_) if registry.defines(name) => {
                    debug!("{} is defined by the project, not treated as well-known", name);
                    return Ok(None);
                }
                Some(schema) => schema,
                None if args.is_empty() => match scalar_schema(name) {
                    Some(schema) => schema,
                    None => return Ok(None),
                },
                None => return Ok(None),
            },
        };

        Ok(Some(NamedSchema::new(registry.namer().name(ty), schema)))
    }
}

/// Well-known library types, matched regardless of generic arguments (`DateTime<Utc>`)
fn library_schema(name: &str) -> Option<Schema> {
    let schema = match name {
        "DateTime" | "NaiveDateTime" | "SystemTime" => Schema::with_format("string", "date-time"),
        "NaiveDate" => Schema::with_format("string", "date"),
        "Uuid" => Schema::with_format("string", "uuid"),
        "Url" => Schema::with_format("string", "uri"),
        "Value" => Schema::any(),
        _ => return None,
    };
    Some(schema)
}

fn scalar_schema(name: &str) -> Option<Schema> {
    let schema = match name {
        "String" | "str" | "char" => Schema::of_type("string"),
        "i8" | "i16" | "i32" | "u8" | "u16" | "u32" => Schema::with_format("integer", "int32"),
        "i64" | "i128" | "u64" | "u128" | "isize" | "usize" => {
            Schema::with_format("integer", "int64")
        }
        "f32" => Schema::with_format("number", "float"),
        "f64" => Schema::with_format("number", "double"),
        "bool" => Schema::of_type("boolean"),
        _ => return None,
    };
    Some(schema)
}
