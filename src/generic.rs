use crate::error::Result;
use crate::registry::SchemaRegistry;
use crate::schema::Schema;
use crate::type_descriptor::TypeDescriptor;
use crate::type_resolver::{
    DefinitionKind, FieldDef, Fields, SerdeAttributes, TypeDefinition, TypeResolver, VariantDef,
};
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};

/// Fallback resolver that turns a composite type into a schema body.
///
/// Called by the registry only when no partial registrar claims the type. Member types
/// must be requested through `registry` so they share the same caching and naming.
pub trait GenericSchemaResolver {
    fn describe(&self, ty: &TypeDescriptor, registry: &mut SchemaRegistry) -> Result<Schema>;

    /// Whether the described project has its own definition named `name`.
    ///
    /// Well-known library names such as `Url` are left to the resolver when it does.
    fn defines(&self, _name: &str) -> bool {
        false
    }
}

/// Decomposes structs and enums using the definitions indexed by a [`TypeResolver`]
pub struct StructuralResolver {
    types: TypeResolver,
}

impl StructuralResolver {
    pub fn new(types: TypeResolver) -> Self {
        Self { types }
    }

    fn definition_schema(
        &self,
        definition: &TypeDefinition,
        bindings: &HashMap<String, TypeDescriptor>,
        registry: &mut SchemaRegistry,
    ) -> Result<Schema> {
        match &definition.kind {
            DefinitionKind::Struct(Fields::Named(fields)) => object_schema(
                fields,
                &definition.serde_attrs,
                bindings,
                registry,
            ),
            DefinitionKind::Struct(Fields::Tuple(members)) => match members.as_slice() {
                [single] => Ok(registry.get(&single.substitute(bindings))?.schema),
                _ => tuple_schema(members, bindings, registry),
            },
            DefinitionKind::Struct(Fields::Unit) => Ok(Schema::object()),
            DefinitionKind::Enum(variants) => enum_schema(definition, variants, bindings, registry),
        }
    }
}

impl GenericSchemaResolver for StructuralResolver {
    fn describe(&self, ty: &TypeDescriptor, registry: &mut SchemaRegistry) -> Result<Schema> {
        let Some(definition) = self.types.resolve(&ty.name) else {
            warn!("Could not resolve type {}, using object placeholder", ty);
            return Ok(Schema::object());
        };
        debug!("Describing {} from its definition", ty);

        if definition.generics.len() != ty.args.len() {
            warn!(
                "{} declares {} type parameters but was used with {}",
                definition.name,
                definition.generics.len(),
                ty.args.len()
            );
        }
        let mut bindings: HashMap<String, TypeDescriptor> = definition
            .generics
            .iter()
            .cloned()
            .zip(ty.args.iter().cloned())
            .collect();
        bindings.insert("Self".to_string(), ty.clone());

        let mut schema = self.definition_schema(definition, &bindings, registry)?;
        if schema.description.is_none() && !schema.is_reference() {
            schema.description = definition.description.clone();
        }
        Ok(schema)
    }

    fn defines(&self, name: &str) -> bool {
        self.types.resolve(name).is_some()
    }
}

/// Named fields as an object. `container` carries the `rename_all` and `default` of the
/// enclosing struct or variant.
fn object_schema(
    fields: &[FieldDef],
    container: &SerdeAttributes,
    bindings: &HashMap<String, TypeDescriptor>,
    registry: &mut SchemaRegistry,
) -> Result<Schema> {
    let mut properties = BTreeMap::new();
    let mut required = Vec::new();
    let mut flattened = Vec::new();

    for field in fields {
        if field.serde_attrs.skip {
            continue;
        }

        let ty = field.ty.substitute(bindings);
        let mut property = registry.get(&ty)?.schema;

        if field.serde_attrs.flatten {
            flattened.push(property);
            continue;
        }

        let name = match (&field.serde_attrs.rename, container.rename_all) {
            (Some(renamed), _) => renamed.clone(),
            (None, Some(rule)) => rule.apply_to_field(&field.name),
            (None, None) => field.name.clone(),
        };

        if property.description.is_none() && !property.is_reference() {
            property.description = field.description.clone();
        }
        if !ty.is_option() && !field.serde_attrs.default && !container.default {
            required.push(name.clone());
        }
        properties.insert(name, property);
    }

    let object = Schema {
        properties: Some(properties),
        required: if required.is_empty() {
            None
        } else {
            Some(required)
        },
        ..Schema::object()
    };

    if flattened.is_empty() {
        return Ok(object);
    }
    let mut all_of = vec![object];
    all_of.extend(flattened);
    Ok(Schema {
        all_of: Some(all_of),
        ..Default::default()
    })
}

fn tuple_schema(
    members: &[TypeDescriptor],
    bindings: &HashMap<String, TypeDescriptor>,
    registry: &mut SchemaRegistry,
) -> Result<Schema> {
    let mut elements = Vec::with_capacity(members.len());
    for member in members {
        elements.push(registry.get(&member.substitute(bindings))?.schema);
    }
    Ok(Schema::tuple(elements))
}

fn variant_body(
    variant: &VariantDef,
    bindings: &HashMap<String, TypeDescriptor>,
    registry: &mut SchemaRegistry,
) -> Result<Option<Schema>> {
    let body = match &variant.fields {
        Fields::Unit => None,
        Fields::Named(fields) => Some(object_schema(
            fields,
            &variant.serde_attrs,
            bindings,
            registry,
        )?),
        Fields::Tuple(members) => match members.as_slice() {
            [single] => Some(registry.get(&single.substitute(bindings))?.schema),
            _ => Some(tuple_schema(members, bindings, registry)?),
        },
    };
    Ok(body)
}

fn string_enum(values: Vec<String>) -> Schema {
    Schema {
        enum_values: Some(values),
        ..Schema::of_type("string")
    }
}

/// Enums follow serde's representations: plain string enums for unit-only enums, otherwise
/// a `oneOf` of externally, internally or adjacently tagged or untagged variant shapes.
fn enum_schema(
    definition: &TypeDefinition,
    variants: &[VariantDef],
    bindings: &HashMap<String, TypeDescriptor>,
    registry: &mut SchemaRegistry,
) -> Result<Schema> {
    let attrs = &definition.serde_attrs;
    let visible: Vec<&VariantDef> = variants.iter().filter(|v| !v.serde_attrs.skip).collect();
    let serialized_name = |variant: &VariantDef| match (&variant.serde_attrs.rename, attrs.rename_all) {
        (Some(renamed), _) => renamed.clone(),
        (None, Some(rule)) => rule.apply_to_variant(&variant.name),
        (None, None) => variant.name.clone(),
    };

    let unit_only = visible.iter().all(|v| v.fields == Fields::Unit);
    if unit_only && attrs.tag.is_none() && !attrs.untagged {
        return Ok(string_enum(visible.iter().map(|&v| serialized_name(v)).collect()));
    }

    let mut one_of = Vec::with_capacity(visible.len());
    for variant in visible {
        let name = serialized_name(variant);
        let body = variant_body(variant, bindings, registry)?;

        let shape = if attrs.untagged {
            body.unwrap_or_else(Schema::any)
        } else if let (Some(tag), Some(content)) = (&attrs.tag, &attrs.content) {
            let mut properties = BTreeMap::from([(tag.clone(), string_enum(vec![name]))]);
            let mut required = vec![tag.clone()];
            if let Some(body) = body {
                properties.insert(content.clone(), body);
                required.push(content.clone());
            }
            Schema {
                properties: Some(properties),
                required: Some(required),
                ..Schema::object()
            }
        } else if let Some(tag) = &attrs.tag {
            let tag_object = Schema {
                properties: Some(BTreeMap::from([(tag.clone(), string_enum(vec![name]))])),
                required: Some(vec![tag.clone()]),
                ..Schema::object()
            };
            match body {
                Some(body) => Schema {
                    all_of: Some(vec![tag_object, body]),
                    ..Default::default()
                },
                None => tag_object,
            }
        } else {
            match body {
                Some(body) => Schema {
                    properties: Some(BTreeMap::from([(name.clone(), body)])),
                    required: Some(vec![name]),
                    ..Schema::object()
                },
                None => string_enum(vec![name]),
            }
        };
        one_of.push(shape);
    }

    Ok(Schema {
        one_of: Some(one_of),
        ..Default::default()
    })
}
