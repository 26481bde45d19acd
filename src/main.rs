//! Command-line tool generating OpenAPI 3.0 documents from the types of a Rust project.
//!
//! # Usage
//!
//! ```bash
//! openapi-schema-gen [OPTIONS] <PROJECT_PATH>
//! ```
//!
//! Describe every type in a project:
//! ```bash
//! openapi-schema-gen ./my-api-project -o openapi.yaml
//! ```
//!
//! Describe the routes of a manifest as JSON:
//! ```bash
//! openapi-schema-gen ./my-api-project -m api.yaml -f json -o openapi.json
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use openapi_schema_gen::cli;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("openapi-schema-gen starting...");

    let args = cli::validate_args(args)?;
    cli::run(args)?;

    info!("OpenAPI document generation completed successfully");
    Ok(())
}
