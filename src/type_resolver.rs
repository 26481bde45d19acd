use crate::parser::ParsedFile;
use crate::type_descriptor::TypeDescriptor;
use log::{debug, warn};
use std::collections::HashMap;
use syn::ext::IdentExt;

/// Index of the `struct` and `enum` definitions found in a set of parsed files.
///
/// Definitions are keyed by their identifier. Items inside inline modules are indexed too;
/// when two files define the same name the first one wins.
pub struct TypeResolver {
    definitions: HashMap<String, TypeDefinition>,
}

/// A type definition with the information schema generation needs
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    /// The type name
    pub name: String,
    /// Declared generic type parameters, in order
    pub generics: Vec<String>,
    /// Doc comment text, if any
    pub description: Option<String>,
    /// Container-level serde attributes
    pub serde_attrs: SerdeAttributes,
    pub kind: DefinitionKind,
}

#[derive(Debug, Clone)]
pub enum DefinitionKind {
    Struct(Fields),
    Enum(Vec<VariantDef>),
}

/// Fields of a struct or enum variant
#[derive(Debug, Clone, PartialEq)]
pub enum Fields {
    Named(Vec<FieldDef>),
    Tuple(Vec<TypeDescriptor>),
    Unit,
}

/// Field definition in a struct or struct-like variant
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeDescriptor,
    pub description: Option<String>,
    pub serde_attrs: SerdeAttributes,
}

impl FieldDef {
    /// Whether the field is wrapped in `Option<T>`
    pub fn is_optional(&self) -> bool {
        self.ty.is_option()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantDef {
    pub name: String,
    pub fields: Fields,
    pub serde_attrs: SerdeAttributes,
}

/// Serde attributes recognised on containers, fields and variants
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SerdeAttributes {
    /// Renamed field or variant name
    pub rename: Option<String>,
    pub rename_all: Option<RenameRule>,
    /// `skip` or `skip_serializing`
    pub skip: bool,
    pub flatten: bool,
    /// `default`, with or without a function path; on a struct every field may be absent
    pub default: bool,
    /// Tag field of an enum (`tag = "..."`)
    pub tag: Option<String>,
    /// Content field of an adjacently tagged enum (`content = "..."`)
    pub content: Option<String>,
    pub untagged: bool,
}

/// Case conversions accepted by `#[serde(rename_all = "...")]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    pub fn parse(rule: &str) -> Option<Self> {
        match rule {
            "lowercase" => Some(Self::Lower),
            "UPPERCASE" => Some(Self::Upper),
            "PascalCase" => Some(Self::Pascal),
            "camelCase" => Some(Self::Camel),
            "snake_case" => Some(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Some(Self::ScreamingSnake),
            "kebab-case" => Some(Self::Kebab),
            "SCREAMING-KEBAB-CASE" => Some(Self::ScreamingKebab),
            _ => None,
        }
    }

    /// Apply to a `snake_case` field name
    pub fn apply_to_field(self, field: &str) -> String {
        match self {
            Self::Lower | Self::Snake => field.to_string(),
            Self::Upper | Self::ScreamingSnake => field.to_ascii_uppercase(),
            Self::Pascal => field.split('_').map(capitalize).collect(),
            Self::Camel => {
                let pascal: String = field.split('_').map(capitalize).collect();
                lower_first(&pascal)
            }
            Self::Kebab => field.replace('_', "-"),
            Self::ScreamingKebab => field.replace('_', "-").to_ascii_uppercase(),
        }
    }

    /// Apply to a `PascalCase` variant name
    pub fn apply_to_variant(self, variant: &str) -> String {
        match self {
            Self::Pascal => variant.to_string(),
            Self::Lower => variant.to_ascii_lowercase(),
            Self::Upper => variant.to_ascii_uppercase(),
            Self::Camel => lower_first(variant),
            Self::Snake => snake_case(variant),
            Self::ScreamingSnake => snake_case(variant).to_ascii_uppercase(),
            Self::Kebab => snake_case(variant).replace('_', "-"),
            Self::ScreamingKebab => snake_case(variant).replace('_', "-").to_ascii_uppercase(),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn lower_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn snake_case(pascal: &str) -> String {
    let mut snake = String::new();
    for (i, ch) in pascal.char_indices() {
        if ch.is_ascii_uppercase() && i > 0 {
            snake.push('_');
        }
        snake.push(ch.to_ascii_lowercase());
    }
    snake
}

impl TypeResolver {
    /// Index every definition in the given parsed files
    pub fn new(parsed_files: Vec<ParsedFile>) -> Self {
        debug!("Initializing TypeResolver with {} files", parsed_files.len());

        let mut resolver = Self {
            definitions: HashMap::new(),
        };
        for parsed_file in &parsed_files {
            debug!("Indexing definitions in {}", parsed_file.path.display());
            resolver.index_items(&parsed_file.syntax_tree.items);
        }

        debug!("Indexed {} type definitions", resolver.definitions.len());
        resolver
    }

    /// An index with no definitions; every composite type resolves to a placeholder
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    fn index_items(&mut self, items: &[syn::Item]) {
        for item in items {
            let definition = match item {
                syn::Item::Struct(item_struct) => Self::parse_struct_definition(item_struct),
                syn::Item::Enum(item_enum) => Self::parse_enum_definition(item_enum),
                syn::Item::Mod(item_mod) => {
                    if let Some((_, nested)) = &item_mod.content {
                        self.index_items(nested);
                    }
                    continue;
                }
                _ => continue,
            };

            if self.definitions.contains_key(&definition.name) {
                warn!(
                    "Duplicate definition of {}, keeping the first one",
                    definition.name
                );
                continue;
            }
            self.definitions.insert(definition.name.clone(), definition);
        }
    }

    /// Look up a definition by type name
    pub fn resolve(&self, type_name: &str) -> Option<&TypeDefinition> {
        let found = self.definitions.get(type_name);
        if found.is_none() {
            debug!("No definition found for {}", type_name);
        }
        found
    }

    /// Number of indexed definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Names of all definitions without generic parameters, sorted
    pub fn concrete_type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .definitions
            .values()
            .filter(|definition| definition.generics.is_empty())
            .map(|definition| definition.name.clone())
            .collect();
        names.sort();
        names
    }

    fn parse_struct_definition(item_struct: &syn::ItemStruct) -> TypeDefinition {
        let name = item_struct.ident.to_string();
        debug!("Parsing struct definition: {}", name);

        TypeDefinition {
            name,
            generics: Self::type_params(&item_struct.generics),
            description: Self::doc_comment(&item_struct.attrs),
            serde_attrs: Self::parse_serde_attributes(&item_struct.attrs),
            kind: DefinitionKind::Struct(Self::parse_fields(&item_struct.fields)),
        }
    }

    fn parse_enum_definition(item_enum: &syn::ItemEnum) -> TypeDefinition {
        let name = item_enum.ident.to_string();
        debug!("Parsing enum definition: {}", name);

        let variants: Vec<VariantDef> = item_enum
            .variants
            .iter()
            .map(|variant| VariantDef {
                name: variant.ident.unraw().to_string(),
                fields: Self::parse_fields(&variant.fields),
                serde_attrs: Self::parse_serde_attributes(&variant.attrs),
            })
            .collect();

        debug!("Parsed {} variants", variants.len());

        TypeDefinition {
            name,
            generics: Self::type_params(&item_enum.generics),
            description: Self::doc_comment(&item_enum.attrs),
            serde_attrs: Self::parse_serde_attributes(&item_enum.attrs),
            kind: DefinitionKind::Enum(variants),
        }
    }

    fn type_params(generics: &syn::Generics) -> Vec<String> {
        generics
            .type_params()
            .map(|param| param.ident.to_string())
            .collect()
    }

    fn parse_fields(fields: &syn::Fields) -> Fields {
        match fields {
            syn::Fields::Named(named) => Fields::Named(
                named
                    .named
                    .iter()
                    .filter_map(|field| {
                        Some(FieldDef {
                            name: field.ident.as_ref()?.unraw().to_string(),
                            ty: TypeDescriptor::from_syn(&field.ty),
                            description: Self::doc_comment(&field.attrs),
                            serde_attrs: Self::parse_serde_attributes(&field.attrs),
                        })
                    })
                    .collect(),
            ),
            syn::Fields::Unnamed(unnamed) => Fields::Tuple(
                unnamed
                    .unnamed
                    .iter()
                    .map(|field| TypeDescriptor::from_syn(&field.ty))
                    .collect(),
            ),
            syn::Fields::Unit => Fields::Unit,
        }
    }

    /// Join `///` lines into a single description
    fn doc_comment(attrs: &[syn::Attribute]) -> Option<String> {
        let lines: Vec<String> = attrs
            .iter()
            .filter(|attr| attr.path().is_ident("doc"))
            .filter_map(|attr| match &attr.meta {
                syn::Meta::NameValue(syn::MetaNameValue {
                    value:
                        syn::Expr::Lit(syn::ExprLit {
                            lit: syn::Lit::Str(text),
                            ..
                        }),
                    ..
                }) => Some(text.value().trim().to_string()),
                _ => None,
            })
            .collect();

        let joined = lines.join("\n").trim().to_string();
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }

    /// Parse Serde attributes from item, field or variant attributes
    fn parse_serde_attributes(attrs: &[syn::Attribute]) -> SerdeAttributes {
        let mut serde_attrs = SerdeAttributes::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if let Some(value) = Self::serialize_name(&meta)? {
                        serde_attrs.rename = Some(value);
                    }
                } else if meta.path.is_ident("rename_all") {
                    if let Some(value) = Self::serialize_name(&meta)? {
                        serde_attrs.rename_all = RenameRule::parse(&value);
                        if serde_attrs.rename_all.is_none() {
                            warn!("Unsupported rename_all rule: {}", value);
                        }
                    }
                } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                    serde_attrs.skip = true;
                } else if meta.path.is_ident("flatten") {
                    serde_attrs.flatten = true;
                } else if meta.path.is_ident("untagged") {
                    serde_attrs.untagged = true;
                } else if meta.path.is_ident("tag") {
                    let value: syn::LitStr = meta.value()?.parse()?;
                    serde_attrs.tag = Some(value.value());
                } else if meta.path.is_ident("content") {
                    let value: syn::LitStr = meta.value()?.parse()?;
                    serde_attrs.content = Some(value.value());
                } else if meta.path.is_ident("default") {
                    serde_attrs.default = true;
                    Self::skip_meta(&meta)?;
                } else {
                    Self::skip_meta(&meta)?;
                }
                Ok(())
            });

            if let Err(e) = parsed {
                warn!("Ignoring unparsable serde attribute: {}", e);
            }
        }

        serde_attrs
    }

    /// Value of `name = "x"` or the `serialize` half of `name(serialize = "x", ...)`
    fn serialize_name(meta: &syn::meta::ParseNestedMeta) -> syn::Result<Option<String>> {
        if meta.input.peek(syn::Token![=]) {
            let value: syn::LitStr = meta.value()?.parse()?;
            return Ok(Some(value.value()));
        }

        let mut serialized = None;
        meta.parse_nested_meta(|inner| {
            let value: syn::LitStr = inner.value()?.parse()?;
            if inner.path.is_ident("serialize") {
                serialized = Some(value.value());
            }
            Ok(())
        })?;
        Ok(serialized)
    }

    /// Consume an attribute entry we do not interpret
    fn skip_meta(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
        if meta.input.peek(syn::Token![=]) {
            meta.value()?.parse::<syn::Expr>()?;
        } else if meta.input.peek(syn::token::Paren) {
            meta.parse_nested_meta(|inner| Self::skip_meta(&inner))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::AstParser;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn create_resolver_from_code(code: &str) -> TypeResolver {
        let parsed = AstParser::parse_source(Path::new("test.rs"), code).unwrap();
        TypeResolver::new(vec![parsed])
    }

    fn struct_fields(definition: &TypeDefinition) -> &[FieldDef] {
        match &definition.kind {
            DefinitionKind::Struct(Fields::Named(fields)) => fields,
            other => panic!("Expected named struct, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_simple_struct() {
        let code = r#"
            /// A registered user
            pub struct User {
                pub id: u32,
                pub name: String,
                pub email: Option<String>,
            }
        "#;

        let resolver = create_resolver_from_code(code);
        let user = resolver.resolve("User").unwrap();

        assert_eq!(user.name, "User");
        assert_eq!(user.description.as_deref(), Some("A registered user"));

        let fields = struct_fields(user);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].name, "id");
        assert_eq!(fields[0].ty, TypeDescriptor::new("u32"));
        assert!(!fields[1].is_optional());
        assert!(fields[2].is_optional());
    }

    #[test]
    fn test_resolve_unknown_type() {
        let resolver = create_resolver_from_code("pub struct User;");
        assert!(resolver.resolve("Order").is_none());
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn test_generic_parameters_are_recorded() {
        let resolver = create_resolver_from_code(
            "pub struct Page<'a, T, const N: usize> { items: Vec<T>, cursor: &'a str }",
        );
        let page = resolver.resolve("Page").unwrap();
        assert_eq!(page.generics, vec!["T".to_string()]);
    }

    #[test]
    fn test_raw_identifiers_are_unescaped() {
        let resolver = create_resolver_from_code("pub struct Token { pub r#type: String }");
        let fields = struct_fields(resolver.resolve("Token").unwrap());
        assert_eq!(fields[0].name, "type");
    }

    #[test]
    fn test_nested_modules_are_indexed() {
        let code = r#"
            mod models {
                pub mod billing {
                    pub struct Invoice { pub total: f64 }
                }
            }
        "#;
        let resolver = create_resolver_from_code(code);
        assert!(resolver.resolve("Invoice").is_some());
    }

    #[test]
    fn test_duplicate_definitions_keep_first() {
        let first = AstParser::parse_source(Path::new("a.rs"), "pub struct User { a: u8 }").unwrap();
        let second =
            AstParser::parse_source(Path::new("b.rs"), "pub struct User { b: u8, c: u8 }").unwrap();
        let resolver = TypeResolver::new(vec![first, second]);

        let fields = struct_fields(resolver.resolve("User").unwrap());
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "a");
    }

    #[test]
    fn test_parse_serde_field_attributes() {
        let code = r#"
            #[derive(Serialize, Deserialize)]
            #[serde(rename_all = "camelCase", deny_unknown_fields)]
            pub struct User {
                #[serde(rename = "userName")]
                pub name: String,
                #[serde(skip)]
                pub password: String,
                #[serde(default = "default_role", skip_serializing_if = "Option::is_none")]
                pub role: Option<String>,
                #[serde(flatten)]
                pub audit: Audit,
                #[serde(rename(serialize = "ser", deserialize = "de"))]
                pub both: u8,
            }
        "#;

        let resolver = create_resolver_from_code(code);
        let user = resolver.resolve("User").unwrap();
        assert_eq!(user.serde_attrs.rename_all, Some(RenameRule::Camel));

        let fields = struct_fields(user);
        assert_eq!(fields[0].serde_attrs.rename.as_deref(), Some("userName"));
        assert!(fields[1].serde_attrs.skip);
        assert!(fields[2].serde_attrs.default);
        assert!(!fields[2].serde_attrs.skip);
        assert!(fields[3].serde_attrs.flatten);
        assert_eq!(fields[4].serde_attrs.rename.as_deref(), Some("ser"));
    }

    #[test]
    fn test_parse_enum_definition() {
        let code = r#"
            #[serde(tag = "kind")]
            pub enum Event {
                Created { id: u64 },
                #[serde(rename = "gone")]
                Deleted(u64),
                Ping,
            }
        "#;

        let resolver = create_resolver_from_code(code);
        let event = resolver.resolve("Event").unwrap();
        assert_eq!(event.serde_attrs.tag.as_deref(), Some("kind"));
        assert!(event.serde_attrs.content.is_none());

        let DefinitionKind::Enum(variants) = &event.kind else {
            panic!("Expected enum");
        };
        assert_eq!(variants.len(), 3);
        assert!(matches!(variants[0].fields, Fields::Named(_)));
        assert_eq!(
            variants[1].fields,
            Fields::Tuple(vec![TypeDescriptor::new("u64")])
        );
        assert_eq!(variants[1].serde_attrs.rename.as_deref(), Some("gone"));
        assert_eq!(variants[2].fields, Fields::Unit);
    }

    #[test]
    fn test_parse_container_attributes() {
        let code = r#"
            #[serde(tag = "t", content = "c")]
            pub enum Message { Text(String), Ping }

            #[serde(default)]
            pub struct Options { pub retries: u8 }
        "#;

        let resolver = create_resolver_from_code(code);
        let message = &resolver.resolve("Message").unwrap().serde_attrs;
        assert_eq!(message.tag.as_deref(), Some("t"));
        assert_eq!(message.content.as_deref(), Some("c"));
        assert!(resolver.resolve("Options").unwrap().serde_attrs.default);
    }

    #[test]
    fn test_rename_rules() {
        assert_eq!(RenameRule::Camel.apply_to_field("created_at"), "createdAt");
        assert_eq!(RenameRule::Pascal.apply_to_field("created_at"), "CreatedAt");
        assert_eq!(RenameRule::Kebab.apply_to_field("created_at"), "created-at");
        assert_eq!(
            RenameRule::ScreamingSnake.apply_to_field("created_at"),
            "CREATED_AT"
        );

        assert_eq!(RenameRule::Snake.apply_to_variant("InProgress"), "in_progress");
        assert_eq!(RenameRule::Camel.apply_to_variant("InProgress"), "inProgress");
        assert_eq!(RenameRule::Lower.apply_to_variant("InProgress"), "inprogress");
        assert_eq!(
            RenameRule::ScreamingKebab.apply_to_variant("InProgress"),
            "IN-PROGRESS"
        );
        assert_eq!(RenameRule::parse("Title Case"), None);
    }

    #[test]
    fn test_concrete_type_names_skip_generics() {
        let resolver = create_resolver_from_code(
            "pub struct Zebra; pub struct Page<T> { pub items: Vec<T> } pub enum Animal { Cat }",
        );
        assert_eq!(resolver.concrete_type_names(), vec!["Animal", "Zebra"]);
    }
}
