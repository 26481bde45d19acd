use crate::generator::{Configuration, OpenApiGen};
use crate::generic::StructuralResolver;
use crate::manifest::Manifest;
use crate::namer::SchemaNamer;
use crate::parser::{AstParser, ParsedFile};
use crate::scanner::FileScanner;
use crate::serializer::{serialize_json, serialize_yaml, write_to_file};
use crate::type_descriptor::TypeDescriptor;
use crate::type_resolver::TypeResolver;
use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use std::path::PathBuf;

/// Generate an OpenAPI document from the types defined in a Rust project
#[derive(Parser, Debug)]
#[command(name = "openapi-schema-gen")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the Rust project directory
    #[arg(value_name = "PROJECT_PATH")]
    pub project_path: PathBuf,

    /// API manifest (YAML or JSON) with document metadata, tags and routes
    #[arg(short = 'm', long = "manifest", value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Type to add to the schema catalogue, e.g. `Page<User>`; may be repeated
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "yaml")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// How schema names are derived from types
    #[arg(short = 'n', long = "naming", value_enum, default_value = "canonical")]
    pub naming: Naming,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Schema naming strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Naming {
    /// `Page<User>`
    Canonical,
    /// `Page_User`
    Sanitized,
}

impl Naming {
    pub fn namer(self) -> SchemaNamer {
        match self {
            Naming::Canonical => SchemaNamer::canonical(),
            Naming::Sanitized => SchemaNamer::sanitized(),
        }
    }
}

/// Validate and log already-parsed arguments
pub fn validate_args(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.project_path.is_dir() {
        bail!(
            "Project path is not a directory: {}",
            args.project_path.display()
        );
    }
    if let Some(manifest) = &args.manifest {
        if !manifest.is_file() {
            bail!("Manifest file does not exist: {}", manifest.display());
        }
    }

    info!("Project path: {}", args.project_path.display());
    info!("Output format: {:?}", args.output_format);
    match &args.output_path {
        Some(output) => info!("Output file: {}", output.display()),
        None => info!("Output: stdout"),
    }
    Ok(args)
}

/// Run the generation pipeline and return the rendered document
pub fn generate(args: &CliArgs) -> Result<String> {
    info!("Scanning project directory...");
    let scan_result = FileScanner::new(args.project_path.clone()).scan()?;
    info!("Found {} Rust files", scan_result.rust_files.len());

    let parsed_files: Vec<ParsedFile> = AstParser::parse_files(&scan_result.rust_files)
        .into_iter()
        .filter_map(|result| match result {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!("Skipping file due to parse error: {:#}", e);
                None
            }
        })
        .collect();
    info!("Successfully parsed {} files", parsed_files.len());

    let types = TypeResolver::new(parsed_files);
    info!("Indexed {} type definitions", types.len());

    let manifest = match &args.manifest {
        Some(path) => Some(Manifest::load(path)?),
        None => None,
    };

    let mut requested = Vec::with_capacity(args.types.len());
    for source in &args.types {
        let ty = TypeDescriptor::parse(source)
            .with_context(|| format!("Invalid --type argument: {}", source))?;
        requested.push(ty);
    }
    if let Some(manifest) = &manifest {
        requested.extend(manifest.types.iter().cloned());
    }

    let has_routes = manifest.as_ref().is_some_and(|m| !m.routes.is_empty());
    if requested.is_empty() && !has_routes {
        info!("No routes or types requested, describing every non-generic definition");
        requested = types
            .concrete_type_names()
            .into_iter()
            .map(TypeDescriptor::new)
            .collect();
    }

    let mut config = Configuration::new().schema_namer(args.naming.namer());
    if let Some(manifest) = &manifest {
        config = manifest.configure(config);
    }
    let mut generator = OpenApiGen::new(config, StructuralResolver::new(types));

    if let Some(manifest) = &manifest {
        for tag in &manifest.tags {
            generator.get_or_register_tag(tag)?;
        }
        let routes = manifest.route_declarations();
        generator.add_routes(&routes)?;
        info!("Added {} routes", routes.len());
    }
    for ty in &requested {
        let named = generator.schema(ty)?;
        debug!("Resolved {} as {}", ty, named.name);
    }

    let document = generator.into_document();
    if document.paths.is_empty() && document.components.is_none() {
        warn!("Generated document has no paths and no schemas");
    }

    match args.output_format {
        OutputFormat::Yaml => serialize_yaml(&document),
        OutputFormat::Json => serialize_json(&document),
    }
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    info!("Starting OpenAPI document generation...");
    let content = generate(&args)?;

    match &args.output_path {
        Some(output_path) => {
            write_to_file(&content, output_path)?;
            info!("Wrote OpenAPI document to {}", output_path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
