mod cli;
mod config;
mod error;
mod keywords;
mod model;
mod report;
mod types;

use crate::error::ScorerError;
use clap::Parser;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const INVALID_INPUT: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

const LOG_ENV_VAR: &str = "ADSCORE_LOG";

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_input(path: &Path) -> Result<Value, ScorerError> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|source| input_read_error("stdin", source))?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .map_err(|source| input_read_error(&path.display().to_string(), source))?
    };
    Ok(serde_json::from_str(&content)?)
}

fn input_read_error(path: &str, source: std::io::Error) -> ScorerError {
    ScorerError::InputRead {
        path: path.to_string(),
        source,
    }
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn run() -> Result<i32, ScorerError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(&cwd, cli.config.as_deref())?;
    let model = loaded.build_model()?;
    debug!(bias = model.linear().bias, "scoring model ready");

    match cli.command {
        cli::Commands::Score(cmd) => {
            let input = read_input(&cmd.input)?;
            let result = model.score(&input)?;
            let rendered = report::render(&result, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Features(cmd) => {
            let input = read_input(&cmd.input)?;
            let explanation = model.explain(&input)?;
            let rendered = report::render_explanation(&explanation, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Model => {
            println!("{}", report::md::model_to_markdown(&model));
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = if e.is_input_error() {
                exit_code::INVALID_INPUT
            } else {
                exit_code::RUNTIME_FAILURE
            };
            std::process::exit(code);
        }
    }
}
