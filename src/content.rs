//! Content-type providers.
//!
//! Providers decide which media types a request or response body is offered in. The
//! generator asks every configured provider in order and merges their answers; the first
//! provider to name a media type wins it.

use crate::document::MediaType;
use crate::schema::Schema;
use crate::type_descriptor::TypeDescriptor;
use std::collections::BTreeMap;

/// Media-type map for a body, media type -> schema
pub type ContentMap = BTreeMap<String, MediaType>;

pub trait ContentTypeProvider {
    /// Media types `ty` can be carried in, or `None` if this provider does not handle it.
    ///
    /// `schema` is the already-resolved schema of `ty`, usually a `$ref`.
    fn media_types(&self, ty: &TypeDescriptor, schema: &Schema) -> Option<ContentMap>;
}

/// `application/json` for every type
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonContentProvider;

impl ContentTypeProvider for JsonContentProvider {
    fn media_types(&self, _ty: &TypeDescriptor, schema: &Schema) -> Option<ContentMap> {
        Some(single("application/json", schema))
    }
}

/// `text/plain` for string bodies
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextProvider;

impl ContentTypeProvider for PlainTextProvider {
    fn media_types(&self, ty: &TypeDescriptor, schema: &Schema) -> Option<ContentMap> {
        let ty = match ty.name.as_str() {
            "Option" | "Box" | "Cow" => ty.first_arg()?,
            _ => ty,
        };
        match ty.name.as_str() {
            "String" | "str" if ty.args.is_empty() => Some(single("text/plain", schema)),
            _ => None,
        }
    }
}

fn single(media_type: &str, schema: &Schema) -> ContentMap {
    let mut content = BTreeMap::new();
    content.insert(
        media_type.to_string(),
        MediaType {
            schema: schema.clone(),
        },
    );
    content
}

/// Merge the answers of `providers` for one body type
pub fn collect_media_types(
    providers: &[Box<dyn ContentTypeProvider>],
    ty: &TypeDescriptor,
    schema: &Schema,
) -> ContentMap {
    let mut content = ContentMap::new();
    for provider in providers {
        if let Some(types) = provider.media_types(ty, schema) {
            for (media_type, body) in types {
                content.entry(media_type).or_insert(body);
            }
        }
    }
    content
}
