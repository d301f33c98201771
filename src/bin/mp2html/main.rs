use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use spdlog::{error, warn};

use mp2html::config::Settings;
use mp2html::logger::configure_logger;
use mp2html::{read_file, Converted};

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "mp2html.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Pretty print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Micropub (.mp, .json) or notedown (.nd, .notedown, .txt) files
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Serialize)]
struct Output<'a> {
    file: String,
    #[serde(flatten)]
    converted: &'a Converted,
}

fn convert(file: &Path, settings: &Settings, pretty: bool) -> Result<String> {
    let converted = read_file(file, settings)
        .with_context(|| format!("Error converting {}", file.display()))?;
    let output = Output { file: file.display().to_string(), converted: &converted };

    let json = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    Ok(json)
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let settings = match open_config(config_path) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{:#}", err);
            eprintln!("Please run mp2html --help");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = configure_logger(&settings) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let mut failed = false;
    for file in &args.files {
        match convert(file, &settings, args.pretty) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                error!("{:#}", err);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
