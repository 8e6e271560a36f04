use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use listui::{
    DocumentFormat, ListUI, OutputDestination, OutputOptions, emit, parse_document_str,
};

#[derive(Debug, Parser)]
#[command(
    name = "listui",
    version,
    about = "Edit schema-described record collections in the terminal"
)]
struct Cli {
    /// Schema spec: file path, inline payload, or "-" for stdin
    #[arg(short = 's', long = "schema", value_name = "SPEC")]
    schema: String,

    /// Collection spec: file path, inline payload, or "-" for stdin
    #[arg(short = 'd', long = "data", alias = "collection", value_name = "SPEC")]
    data: Option<String>,

    /// Title shown at the top of the UI
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Output destinations ("-" writes to stdout). Accepts multiple values per flag use.
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Emit compact output rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Overwrite output files even if they already exist
    #[arg(short = 'f', long = "force", short_alias = 'y', alias = "yes")]
    force: bool,

    /// Skip the exit confirmation for unsaved changes
    #[arg(long = "no-confirm-exit")]
    no_confirm_exit: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.schema == "-" && cli.data.as_deref() == Some("-") {
        return Err(eyre!(
            "cannot read schema and data from stdin simultaneously; provide inline content or files"
        ));
    }

    let schema = load_spec(&cli.schema).wrap_err("failed to load schema")?;
    let data = cli
        .data
        .as_deref()
        .map(|spec| load_spec(spec).wrap_err("failed to load collection data"))
        .transpose()?;

    let destinations = resolve_destinations(&cli.outputs, cli.force)?;

    let options = listui::UiOptions::default().with_confirm_exit(!cli.no_confirm_exit);
    let mut ui = ListUI::new(schema).with_options(options);
    if let Some(value) = data {
        ui = ui.with_collection(value);
    }
    if let Some(title) = cli.title.clone() {
        ui = ui.with_title(title);
    }

    let edited = ui.run().map_err(|err| eyre!("{err:#}"))?;
    write_outputs(&edited, &destinations, !cli.no_pretty)?;
    Ok(())
}

fn load_spec(spec: &str) -> Result<Value> {
    if spec == "-" {
        if io::stdin().is_terminal() {
            return Err(eyre!("stdin requested but no input is piped"));
        }
        let mut contents = String::new();
        io::stdin()
            .read_to_string(&mut contents)
            .wrap_err("failed to read stdin")?;
        return parse_document_str(&contents, DocumentFormat::Json)
            .map_err(|err| eyre!("{err:#}"));
    }

    let path = Path::new(spec);
    if path.exists() {
        let contents =
            fs::read_to_string(path).wrap_err_with(|| format!("failed to read {spec}"))?;
        let format = DocumentFormat::from_path(path);
        return parse_document_str(&contents, format).map_err(|err| eyre!("{err:#}"));
    }

    // Not a file: treat the spec itself as an inline JSON payload.
    parse_document_str(spec, DocumentFormat::Json)
        .map_err(|err| eyre!("'{spec}' is neither a readable file nor valid inline JSON: {err:#}"))
}

fn resolve_destinations(outputs: &[String], force: bool) -> Result<Vec<OutputDestination>> {
    if outputs.is_empty() {
        return Ok(vec![OutputDestination::Stdout]);
    }

    let mut destinations = Vec::with_capacity(outputs.len());
    for output in outputs {
        if output == "-" {
            destinations.push(OutputDestination::Stdout);
            continue;
        }
        let path = PathBuf::from(output);
        if path.exists() && !force {
            return Err(eyre!(
                "output file {output} already exists; pass --force to overwrite"
            ));
        }
        destinations.push(OutputDestination::File(path));
    }
    Ok(destinations)
}

fn write_outputs(value: &Value, destinations: &[OutputDestination], pretty: bool) -> Result<()> {
    for destination in destinations {
        let format = match destination {
            OutputDestination::Stdout => DocumentFormat::Json,
            OutputDestination::File(path) => DocumentFormat::from_path(path),
        };
        let options = OutputOptions::new(format)
            .with_pretty(pretty)
            .with_destinations(vec![destination.clone()]);
        emit(value, &options).map_err(|err| eyre!("{err:#}"))?;
    }
    Ok(())
}
