use clap::ValueEnum;
use serde::Serialize;
use snafu::prelude::*;
use strum::Display;

use std::fmt::Debug;
use std::process::exit;
use std::sync::OnceLock;

use crate::error::*;
use crate::helpers::exitcode;

/// Serialization used for everything printed on stdout.
#[derive(Copy, Clone, Debug, Default, Display, ValueEnum, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

// Set once from main, read by every command.
static OUTPUT_FORMAT: OnceLock<OutputFormat> = OnceLock::new();

pub fn set_format(format: OutputFormat) {
    if OUTPUT_FORMAT.set(format).is_err() {
        warn!("Output format was already set, ignoring {}", format);
    }
}

pub fn current_format() -> OutputFormat {
    OUTPUT_FORMAT.get().copied().unwrap_or_default()
}

// We introduce a Debug bound so we can print the variable if it ever fails to serialize, which should not happen
pub fn format_as<T: Debug + Serialize>(output: &T, format: OutputFormat) -> Result<String, Error> {
    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(output).context(OutputJsonSnafu {
            content: format!("{:#?}", output),
        })?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(output).context(OutputYamlSnafu {
            content: format!("{:#?}", output),
        })?,
    };

    Ok(output)
}

pub fn format<T: Debug + Serialize>(output: &T) -> Result<String, Error> {
    format_as(output, current_format())
}

/// Format the value in the selected output format and write it to stdout.
pub fn print<T: Debug + Serialize>(output: &T) -> Result<(), Error> {
    let output = format(output)?;
    println!("{}", output.trim_end());
    Ok(())
}

/// Print an error and all the errors that caused it, one per line.
pub fn print_error(e: &Error) {
    error!("{}", e);

    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        error!("  caused by: {}", cause);
        source = cause.source();
    }
}

/// Exit the process with the exit code matching the result. Errors are printed
/// recursively before exiting.
pub fn exit_result<T>(res: Result<T, Error>) -> ! {
    match res {
        Ok(_) => exit(exitcode::OK),
        Err(e) => {
            print_error(&e);
            exit(e.exit_code());
        }
    }
}
