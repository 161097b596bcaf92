//! sqlhint CLI - SQL completion at a cursor

use sqlhint_cli::cli;
use sqlhint_cli::input;
use sqlhint_cli::logging;
#[cfg(feature = "metadata-provider")]
use sqlhint_cli::metadata;
use sqlhint_cli::output;
use sqlhint_cli::schema;

use anyhow::{bail, Result};
use clap::Parser;
use sqlhint_core::{
    complete, CompletionRequest, MetadataProvider, SchemaMetadata, SchemaSession,
};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;

use cli::{Args, OutputFormat};

/// Input, schema, or request errors.
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sqlhint: error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(args: Args) -> Result<()> {
    if args.print_schema {
        return write_stdout(&(output::format_metadata_schema(args.compact)? + "\n"));
    }

    let source = input::read_input(args.file.as_deref(), args.sql.as_deref())?;
    let (sql, cursor_offset) = input::resolve_cursor(source.content, args.cursor, args.marker)?;
    debug!(input = %source.name, cursor_offset, "read completion input");

    let session = open_session(&args)?;
    let request = CompletionRequest::new(sql, cursor_offset);
    let result = complete(Some(&session), &request);

    if let Some(error) = &result.error {
        bail!("{error}");
    }

    let rendered = match args.format {
        OutputFormat::Text => output::format_text(&result),
        OutputFormat::Json => output::format_json(&result, args.compact)? + "\n",
    };
    write_stdout(&rendered)
}

/// Build the schema session from the live database, a schema file, or an
/// empty snapshot, in that order of preference.
fn open_session(args: &Args) -> Result<SchemaSession> {
    #[cfg(feature = "metadata-provider")]
    if let Some(url) = &args.metadata_url {
        if args.schema.is_some() {
            eprintln!("sqlhint: warning: --metadata-url takes precedence over --schema");
        }
        let provider = metadata::SqlxProvider::connect(url, args.metadata_schema.clone())?;
        let label = format!("{} database", provider.database_type().name());
        return Ok(SchemaSession::new(label, provider));
    }

    let (label, mut metadata) = match &args.schema {
        Some(path) => {
            let dialect = args.dialect.to_sqlparser_dialect();
            let metadata = schema::load_schema(path, dialect.as_ref())?;
            (path.display().to_string(), metadata)
        }
        None => ("empty schema".to_string(), SchemaMetadata::default()),
    };

    if let Some(default_schema) = &args.default_schema {
        metadata.default_schema = Some(default_schema.clone());
    }
    debug!(
        session = %label,
        tables = metadata.tables.len(),
        default_schema = ?metadata.default_schema,
        "loaded schema snapshot"
    );

    Ok(SchemaSession::new(label, MetadataProvider::new(metadata)))
}

fn write_stdout(content: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
