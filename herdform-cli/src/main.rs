//! Replay a scripted form session against one of the farm entry templates.
//!
//! A script names a preset (or carries an inline template), optionally a
//! record to seed the session with, and a list of commands. Submitted
//! documents are written to the configured outputs.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use clap::{ArgAction, Parser};
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;
use tracing_subscriber::EnvFilter;

use herdform::{
    DocumentFormat, FormCommand, FormEngine, FormSession, FormTemplate, OutputDestination,
    OutputOptions, Preset, SessionOptions, SubmissionState, SubmitEndpoint, SubmitError,
    domain::parse_form_template,
    form::Dispatched,
    io::{emit, parse_document_str, render, template_schema},
};

const LOG_ENV: &str = "HERDFORM_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "herdform",
    version,
    about = "Replay scripted farm entry forms and submit the resulting documents"
)]
struct Cli {
    /// Script file (JSON, YAML or TOML) with a preset or template and steps
    #[arg(short = 's', long = "script", value_name = "FILE")]
    script: Option<PathBuf>,

    /// Preset to use instead of the one named in the script
    #[arg(short = 'p', long = "preset", value_name = "NAME")]
    preset: Option<String>,

    /// JSON Schema every submitted document must satisfy
    #[arg(long = "schema", value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Output destinations for submitted documents ("-" writes to stdout)
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Make every submission fail with MESSAGE
    #[arg(long = "reject", value_name = "MESSAGE")]
    reject: Option<String>,

    /// Print the JSON Schema of the template format and exit
    #[arg(long = "print-template-schema")]
    print_template_schema: bool,

    /// Print the built-in preset names and exit
    #[arg(long = "list-presets")]
    list_presets: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Script {
    preset: Option<String>,
    template: Option<Value>,
    seed: Option<Value>,
    #[serde(default)]
    steps: Vec<FormCommand>,
}

/// Endpoint that writes each submitted document to the configured outputs.
struct SinkEndpoint {
    output: OutputOptions,
    reject: Option<String>,
}

#[async_trait]
impl SubmitEndpoint for SinkEndpoint {
    async fn create_or_update(&self, document: Value) -> Result<Value, SubmitError> {
        if let Some(message) = &self.reject {
            return Err(SubmitError::new(message.clone()));
        }
        emit(&document, &self.output).map_err(|err| SubmitError::new(format!("{err:#}")))?;
        Ok(json!({"status": "saved"}))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();
    let cli = Cli::parse();

    if cli.list_presets {
        for preset in Preset::ALL {
            println!("{}\t{}", preset.name(), preset.template().display_title());
        }
        return Ok(());
    }
    if cli.print_template_schema {
        let schema = render(&template_schema(), DocumentFormat::Json, !cli.no_pretty)
            .map_err(|err| eyre!("{err:#}"))?;
        println!("{schema}");
        return Ok(());
    }

    let script = match cli.script.as_deref() {
        Some(path) => load_script(path)?,
        None => Script::default(),
    };
    let template = resolve_template(cli.preset.as_deref(), &script)?;
    let mut options = SessionOptions::new();
    if let Some(path) = cli.schema.as_deref() {
        let schema = load_document(path)?;
        options = options
            .with_schema(&schema)
            .wrap_err_with(|| format!("failed to compile schema {}", path.display()))?;
    }

    info!(form = %template.name, steps = script.steps.len(), "replaying script");
    let mut session =
        FormSession::with_options(template, options).wrap_err("template cannot back a session")?;
    if let Some(seed) = script.seed.as_ref() {
        session
            .seed_from_value(seed)
            .wrap_err("failed to seed the session")?;
    }

    let endpoint = SinkEndpoint {
        output: build_output_options(&cli)?,
        reject: cli.reject.clone(),
    };
    let mut engine = FormEngine::new(&mut session, &endpoint);
    for (idx, command) in script.steps.into_iter().enumerate() {
        let label = command_label(&command);
        let dispatched = engine
            .dispatch(command)
            .await
            .wrap_err_with(|| format!("step {} ({label}) failed", idx + 1))?;
        let note = match &dispatched {
            Dispatched::Applied(false) => " (no change)",
            _ => "",
        };
        eprintln!(
            "{:>3}. {label}{note} • {}",
            idx + 1,
            engine.session().status().message()
        );
    }

    report(engine.session());
    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("herdform=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_template(preset_override: Option<&str>, script: &Script) -> Result<FormTemplate> {
    if let Some(name) = preset_override.or(script.preset.as_deref()) {
        return Preset::from_name(name)
            .map(Preset::template)
            .ok_or_else(|| eyre!("unknown preset '{name}'; try --list-presets"));
    }
    if let Some(raw) = script.template.as_ref() {
        return parse_form_template(raw).wrap_err("invalid template in script");
    }
    Err(eyre!("provide a preset (--preset or script) or an inline template"))
}

fn load_script(path: &Path) -> Result<Script> {
    let value = load_document(path)?;
    serde_json::from_value(value)
        .wrap_err_with(|| format!("script {} is not well-formed", path.display()))
}

fn load_document(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read file {}", path.display()))?;
    let preferred = DocumentFormat::from_path(path).unwrap_or_default();
    match parse_document_str(&contents, preferred) {
        Ok(value) => Ok(value),
        Err(primary) => {
            for candidate in DocumentFormat::available_formats() {
                if candidate == preferred {
                    continue;
                }
                if let Ok(value) = parse_document_str(&contents, candidate) {
                    return Ok(value);
                }
            }
            Err(eyre!(
                "failed to parse {}: tried {} (first error: {primary:#})",
                path.display(),
                format_list()
            ))
        }
    }
}

fn build_output_options(cli: &Cli) -> Result<OutputOptions> {
    let destinations: Vec<OutputDestination> = if cli.outputs.is_empty() {
        vec![OutputDestination::Stdout]
    } else {
        cli.outputs
            .iter()
            .map(|raw| {
                if raw.trim().is_empty() {
                    Err(eyre!("output destination cannot be empty"))
                } else {
                    Ok(OutputDestination::parse(raw))
                }
            })
            .collect::<Result<_>>()?
    };

    let mut format: Option<DocumentFormat> = None;
    for destination in &destinations {
        let OutputDestination::File(path) = destination else {
            continue;
        };
        let detected = DocumentFormat::from_path(path).ok_or_else(|| {
            eyre!(
                "cannot infer format from output file {}; use one of: {}",
                path.display(),
                format_list()
            )
        })?;
        match format {
            Some(existing) if existing != detected => {
                return Err(eyre!(
                    "output file {} uses {detected} but other destinations use {existing}",
                    path.display()
                ));
            }
            _ => format = Some(detected),
        }
    }

    Ok(OutputOptions::new(format.unwrap_or_default())
        .with_pretty(!cli.no_pretty)
        .with_destinations(destinations))
}

fn command_label(command: &FormCommand) -> String {
    match command {
        FormCommand::Set { path, .. } => format!("set {path}"),
        FormCommand::AddEntry => "add entry".to_string(),
        FormCommand::RemoveEntry { index } => format!("remove entry {index}"),
        FormCommand::Submit => "submit".to_string(),
        FormCommand::Reset => "reset".to_string(),
    }
}

fn report(session: &FormSession) {
    let state = match session.state() {
        SubmissionState::Editable => "editable",
        SubmissionState::Submitting => "submitting",
        SubmissionState::Locked => "locked",
    };
    eprintln!(
        "{}: {} entr{} • session {state}",
        session.template().display_title(),
        session.entries().len(),
        if session.entries().len() == 1 { "y" } else { "ies" }
    );
    if let Some(error) = session.last_error() {
        eprintln!("last error: {error}");
    }
}

fn format_list() -> String {
    DocumentFormat::available_formats()
        .into_iter()
        .map(|format| format.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
