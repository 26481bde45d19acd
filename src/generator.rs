//! The document generator facade.
//!
//! [`OpenApiGen`] owns one generation session: the schema registry, the tag registry and
//! the document being assembled. It is built from a [`Configuration`] and a fallback
//! [`GenericSchemaResolver`], fed with types and routes, and finally turned into an
//! [`OpenApiDocument`].

use crate::content::{
    collect_media_types, ContentTypeProvider, JsonContentProvider, PlainTextProvider,
};
use crate::document::{
    convert_path_format, Components, Contact, ExternalDocs, Info, License, OpenApiDocument,
    Operation, Parameter, RequestBody, Response, Server,
};
use crate::error::Result;
use crate::generic::GenericSchemaResolver;
use crate::namer::SchemaNamer;
use crate::registrar::PartialSchemaRegistrar;
use crate::registry::SchemaRegistry;
use crate::routes::RouteDeclaration;
use crate::schema::NamedSchema;
use crate::swagger_ui::{SwaggerUiMount, DEFAULT_SWAGGER_UI_PATH};
use crate::tags::{Tag, TagRegistry};
use crate::type_descriptor::TypeDescriptor;
use log::{debug, info, warn};
use std::collections::BTreeMap;

/// Settings for one generation session
pub struct Configuration {
    info: Info,
    servers: Vec<Server>,
    external_docs: Option<ExternalDocs>,
    schema_namer: SchemaNamer,
    registrars: Vec<Box<dyn PartialSchemaRegistrar>>,
    content_providers: Vec<Box<dyn ContentTypeProvider>>,
    swagger_ui_path: String,
    serve_swagger_ui: bool,
}

impl Configuration {
    pub fn new() -> Self {
        Self {
            info: Info::default(),
            servers: Vec::new(),
            external_docs: None,
            schema_namer: SchemaNamer::default(),
            registrars: Vec::new(),
            content_providers: Vec::new(),
            swagger_ui_path: DEFAULT_SWAGGER_UI_PATH.to_string(),
            serve_swagger_ui: true,
        }
    }

    /// Replace the info section. Contact and license set earlier are kept unless `info`
    /// carries its own.
    pub fn info(mut self, info: Info) -> Self {
        let previous = std::mem::replace(&mut self.info, info);
        if self.info.contact.is_none() {
            self.info.contact = previous.contact;
        }
        if self.info.license.is_none() {
            self.info.license = previous.license;
        }
        self
    }

    pub fn contact(mut self, contact: Contact) -> Self {
        self.info.contact = Some(contact);
        self
    }

    pub fn license(mut self, license: License) -> Self {
        self.info.license = Some(license);
        self
    }

    /// Add a server; servers are listed in the order they were added
    pub fn server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }

    pub fn external_docs(mut self, docs: ExternalDocs) -> Self {
        self.external_docs = Some(docs);
        self
    }

    pub fn schema_namer(mut self, namer: SchemaNamer) -> Self {
        self.schema_namer = namer;
        self
    }

    /// Append a partial registrar. Registrars run in the order they were added, all of
    /// them before the built-in primitive registrar.
    pub fn registrar(mut self, registrar: impl PartialSchemaRegistrar + 'static) -> Self {
        self.registrars.push(Box::new(registrar));
        self
    }

    /// Append a content-type provider.
    ///
    /// When no provider is configured, JSON for every body and plain text for string
    /// bodies are used.
    pub fn content_provider(mut self, provider: impl ContentTypeProvider + 'static) -> Self {
        self.content_providers.push(Box::new(provider));
        self
    }

    pub fn swagger_ui_path(mut self, path: impl Into<String>) -> Self {
        self.swagger_ui_path = path.into();
        self
    }

    pub fn serve_swagger_ui(mut self, serve: bool) -> Self {
        self.serve_swagger_ui = serve;
        self
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

/// One document generation session
pub struct OpenApiGen {
    document: OpenApiDocument,
    schemas: SchemaRegistry,
    tags: TagRegistry,
    content_providers: Vec<Box<dyn ContentTypeProvider>>,
    swagger_ui: Option<SwaggerUiMount>,
}

impl OpenApiGen {
    /// Start a session. `fallback` describes every type no partial registrar claims.
    pub fn new(config: Configuration, fallback: impl GenericSchemaResolver + 'static) -> Self {
        let Configuration {
            info,
            servers,
            external_docs,
            schema_namer,
            registrars,
            mut content_providers,
            swagger_ui_path,
            serve_swagger_ui,
        } = config;

        if content_providers.is_empty() {
            content_providers.push(Box::new(JsonContentProvider));
            content_providers.push(Box::new(PlainTextProvider));
        }

        let swagger_ui = serve_swagger_ui.then(|| SwaggerUiMount::new(&swagger_ui_path));
        if let Some(mount) = &swagger_ui {
            debug!("Documentation UI mounted at {}", mount.prefix());
        }

        let mut document = OpenApiDocument::new(info);
        document.servers = servers;
        document.external_docs = external_docs;

        Self {
            document,
            schemas: SchemaRegistry::new(schema_namer, registrars, fallback),
            tags: TagRegistry::new(),
            content_providers,
            swagger_ui,
        }
    }

    /// Resolve a type through the registrar chain, registering it if needed
    pub fn schema(&mut self, ty: &TypeDescriptor) -> Result<NamedSchema> {
        self.schemas.get(ty)
    }

    /// Register a tag, returning its name.
    ///
    /// # Errors
    ///
    /// [`crate::Error::TagConflict`] if a different tag with the same name exists.
    pub fn get_or_register_tag(&mut self, tag: &Tag) -> Result<String> {
        self.tags.get_or_register(tag)
    }

    /// Add an operation for `route`, resolving all types it mentions
    pub fn add_route(&mut self, route: &RouteDeclaration) -> Result<()> {
        debug!("Adding route: {} {}", route.method, route.path);
        let openapi_path = convert_path_format(&route.path);

        // Tags are committed together with the operation
        let mut staged_tags = self.tags.clone();
        let mut tags = Vec::with_capacity(route.tags.len());
        for tag in &route.tags {
            tags.push(staged_tags.get_or_register(tag)?);
        }

        let mut parameters = Vec::with_capacity(route.parameters.len());
        for declared in &route.parameters {
            parameters.push(Parameter {
                name: declared.name.clone(),
                location: declared.location,
                required: declared.required,
                schema: self.schemas.get(&declared.ty)?.schema,
                description: declared.description.clone(),
            });
        }

        let request_body = match &route.request {
            Some(ty) => {
                let schema = self.schemas.get(ty)?.schema;
                Some(RequestBody {
                    description: None,
                    required: !ty.is_option(),
                    content: collect_media_types(&self.content_providers, ty, &schema),
                })
            }
            None => None,
        };

        let content = match &route.response {
            Some(ty) => {
                let schema = self.schemas.get(ty)?.schema;
                Some(collect_media_types(&self.content_providers, ty, &schema))
            }
            None => None,
        };
        let mut responses = BTreeMap::new();
        responses.insert(
            "200".to_string(),
            Response {
                description: "Successful response".to_string(),
                content,
            },
        );

        let operation = Operation {
            tags,
            summary: Some(
                route
                    .summary
                    .clone()
                    .unwrap_or_else(|| format!("{} {}", route.method, route.path)),
            ),
            description: route.description.clone(),
            operation_id: route.operation_id.clone(),
            parameters,
            request_body,
            responses,
        };

        self.tags = staged_tags;
        let path_item = self
            .document
            .paths
            .entry(openapi_path)
            .or_default();
        if path_item.set(route.method, operation).is_some() {
            warn!(
                "Route {} {} declared more than once, keeping the last declaration",
                route.method, route.path
            );
        }
        Ok(())
    }

    pub fn add_routes<'a>(
        &mut self,
        routes: impl IntoIterator<Item = &'a RouteDeclaration>,
    ) -> Result<()> {
        for route in routes {
            self.add_route(route)?;
        }
        Ok(())
    }

    /// The documentation UI mount, if serving the UI is enabled
    pub fn swagger_ui_mount(&self) -> Option<&SwaggerUiMount> {
        self.swagger_ui.as_ref()
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn tag_registry(&self) -> &TagRegistry {
        &self.tags
    }

    /// Snapshot of the document as assembled so far
    pub fn document(&self) -> OpenApiDocument {
        let mut document = self.document.clone();
        document.tags = self.tags.tags().to_vec();
        let catalogue = self.schemas.catalogue();
        if !catalogue.is_empty() {
            document.components = Some(Components {
                schemas: Some(catalogue.clone()),
            });
        }
        document
    }

    /// Finish the session and build the final document
    pub fn into_document(self) -> OpenApiDocument {
        let OpenApiGen {
            mut document,
            schemas,
            tags,
            ..
        } = self;

        document.tags = tags.tags().to_vec();
        let catalogue = schemas.into_catalogue();
        info!(
            "Built document with {} paths, {} schemas and {} tags",
            document.paths.len(),
            catalogue.len(),
            document.tags.len()
        );
        if !catalogue.is_empty() {
            document.components = Some(Components {
                schemas: Some(catalogue),
            });
        }
        document
    }
}
