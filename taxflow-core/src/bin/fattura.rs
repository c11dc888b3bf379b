use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use taxflow_core::einvoice::{build_document, validate_invoice};
use taxflow_core::models::InvoiceFormData;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the SDI gateway payload of an electronic invoice from a form file.
///
/// The document goes to stdout. Validation errors go to stderr and the exit
/// status is 1.
#[derive(Parser, Debug)]
#[command(name = "fattura", version)]
struct Args {
    /// Invoice form as JSON (same shape as the web form)
    form: PathBuf,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"))
        .add_directive(LevelFilter::WARN.into());

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let raw = fs::read_to_string(&args.form)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", args.form.display(), e))?;
    let form: InvoiceFormData = serde_json::from_str(&raw).map_err(|e| {
        anyhow::anyhow!("Invalid invoice form in {}: {}", args.form.display(), e)
    })?;

    let validation = validate_invoice(&form);
    if !validation.valid {
        for message in &validation.errors {
            error!("{}", message);
            eprintln!("- {message}");
        }
        return Ok(ExitCode::FAILURE);
    }

    let document = build_document(&form);
    info!("Built invoice {}", document.documento.numero);
    println!("{}", serde_json::to_string_pretty(&document)?);

    Ok(ExitCode::SUCCESS)
}
