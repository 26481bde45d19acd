//! OpenAPI document generation driven by type-to-schema resolution.
//!
//! Types are identified by [`TypeDescriptor`]s such as `Vec<User>` or `Page<Order>`. Each
//! one requested from the [`SchemaRegistry`] goes through a chain of resolvers:
//!
//! 1. user-supplied [`PartialSchemaRegistrar`]s, then the built-in [`PrimitiveSchemas`],
//!    which may claim a type and return an inline schema,
//! 2. the registry's cache, which answers with a `$ref` for any type already seen,
//! 3. a [`GenericSchemaResolver`] that describes the type structurally. The default,
//!    [`StructuralResolver`], reads `struct` and `enum` definitions parsed from source
//!    files and honours their serde attributes.
//!
//! Every composite type is converted once, written to the schema catalogue under the name
//! the [`SchemaNamer`] gives it, and referenced from everywhere else. Recursive types are
//! handled by handing out the reference before the body is complete.
//!
//! [`OpenApiGen`] ties the registries together with route declarations and document
//! metadata and produces an [`OpenApiDocument`].
//!
//! # Example
//!
//! ```no_run
//! use openapi_schema_gen::{
//!     parser::AstParser, scanner::FileScanner, serializer::serialize_yaml, Configuration,
//!     HttpMethod, OpenApiGen, ParameterDeclaration, RouteDeclaration, StructuralResolver,
//!     Tag, TypeDescriptor, TypeResolver,
//! };
//! use std::path::PathBuf;
//!
//! let files = FileScanner::new(PathBuf::from("./my-project")).scan().unwrap();
//! let parsed: Vec<_> = AstParser::parse_files(&files.rust_files)
//!     .into_iter()
//!     .filter_map(Result::ok)
//!     .collect();
//!
//! let mut generator = OpenApiGen::new(
//!     Configuration::default(),
//!     StructuralResolver::new(TypeResolver::new(parsed)),
//! );
//! let route = RouteDeclaration::new("/users/:id", HttpMethod::Get)
//!     .tag(Tag::new("users"))
//!     .parameter(ParameterDeclaration::path("id", TypeDescriptor::new("u64")))
//!     .response(TypeDescriptor::parse("User").unwrap());
//! generator.add_route(&route).unwrap();
//!
//! println!("{}", serialize_yaml(&generator.into_document()).unwrap());
//! ```

pub mod cli;
pub mod content;
pub mod document;
pub mod error;
pub mod generator;
pub mod generic;
pub mod manifest;
pub mod namer;
pub mod parser;
pub mod registrar;
pub mod registry;
pub mod routes;
pub mod scanner;
pub mod schema;
pub mod serializer;
pub mod swagger_ui;
pub mod tags;
pub mod type_descriptor;
pub mod type_resolver;

pub use content::{ContentTypeProvider, JsonContentProvider, PlainTextProvider};
pub use document::OpenApiDocument;
pub use error::{Error, Result};
pub use generator::{Configuration, OpenApiGen};
pub use generic::{GenericSchemaResolver, StructuralResolver};
pub use namer::SchemaNamer;
pub use registrar::{PartialSchemaRegistrar, PrimitiveSchemas};
pub use registry::{RegistrationState, SchemaRegistry};
pub use routes::{HttpMethod, ParameterDeclaration, ParameterLocation, RouteDeclaration};
pub use schema::{NamedSchema, Schema};
pub use swagger_ui::SwaggerUiMount;
pub use tags::{Tag, TagRegistry};
pub use type_descriptor::TypeDescriptor;
pub use type_resolver::TypeResolver;
