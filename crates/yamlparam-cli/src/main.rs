//! yamlparam - command-line channel for validating YAML parameters
//!
//! ## Commands
//!
//! - `check`: syntax-check a YAML document from a file or stdin
//! - `submit`: resolve a parameter value the way a CLI build trigger does
//! - `validate`: live validation as a configuration form would request it
//! - `gate`: run the execution gate over persisted parameter values
//! - `show`: print the configured parameter definitions

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, Level};

use yamlparam_core::{
    guard_execution, ConfigurableResource, Grants, JobConfig, ParameterError, ParameterSource,
    ParameterValue, Permission, Submission, YamlParameterDescriptor, YamlSyntaxChecker,
};

#[derive(Parser)]
#[command(name = "yamlparam")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validating YAML job parameters", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Job configuration file declaring the parameters
    #[arg(short, long, global = true, env = "YAMLPARAM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a document is valid YAML
    Check {
        /// File to check (default: stdin)
        file: Option<PathBuf>,
    },

    /// Submit a value for a parameter on the command line
    Submit {
        /// Parameter name
        name: String,

        /// Parameter value (empty or omitted selects the default)
        value: Option<String>,
    },

    /// Live-validate a value the way a configuration form does
    Validate {
        /// Text to validate
        #[arg(long)]
        value: Option<String>,

        /// Message to report instead of the parser error
        #[arg(long)]
        failed_validation_message: Option<String>,

        /// Item being configured; without it the query is a no-op
        #[arg(long)]
        item: Option<String>,
    },

    /// Run the execution gate over persisted values (JSON array)
    Gate {
        /// File containing the persisted values
        #[arg(long)]
        values: PathBuf,
    },

    /// Print the configured parameter definitions
    Show,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    yamlparam_core::init_tracing(cli.json, level);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("ERROR: {err}");
            debug!(error = ?err, "command failed");
            ExitCode::from(exit_status(&err))
        }
    }
}

/// Exit status for a failed command.
fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ParameterError>()
        .map(ParameterError::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .unwrap_or(2)
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Check { file } => cmd_check(file.as_deref()),
        Commands::Submit { name, value } => {
            let config = load_config(cli.config.as_deref())?;
            cmd_submit(&config, &name, value.as_deref())
        }
        Commands::Validate {
            value,
            failed_validation_message,
            item,
        } => cmd_validate(
            value.as_deref(),
            failed_validation_message.as_deref(),
            item.as_deref(),
        ),
        Commands::Gate { values } => cmd_gate(&values),
        Commands::Show => {
            let config = load_config(cli.config.as_deref())?;
            cmd_show(&config)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<JobConfig> {
    let Some(path) = path else {
        bail!("no job configuration given (use --config or YAMLPARAM_CONFIG)");
    };
    Ok(JobConfig::from_path(path)?)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Check a document
fn cmd_check(file: Option<&Path>) -> Result<ExitCode> {
    let text = read_input(file)?;
    let result = YamlSyntaxChecker::check(Some(&text));
    match result.error_detail() {
        None => {
            println!("ok");
            Ok(ExitCode::SUCCESS)
        }
        Some(detail) => {
            eprintln!("Invalid yaml string: {detail}");
            Ok(ExitCode::from(1))
        }
    }
}

/// Resolve a parameter value from a command-line argument
fn cmd_submit(config: &JobConfig, name: &str, value: Option<&str>) -> Result<ExitCode> {
    let definition = config.parameter(name)?;
    let resolved = definition.create_from(Submission::CommandLine(value))?;
    info!(job = %config.name, parameter = %name, "parameter resolved");
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(ExitCode::SUCCESS)
}

/// Live validation; `--item` grants the local operator configure on it
fn cmd_validate(
    value: Option<&str>,
    failed_validation_message: Option<&str>,
    item: Option<&str>,
) -> Result<ExitCode> {
    let grants = item.map(|name| Grants::none(name).with(Permission::Configure));
    let resource = grants.as_ref().map(|g| g as &dyn ConfigurableResource);

    let verdict = YamlParameterDescriptor.validate(value, failed_validation_message, resource)?;
    println!("{}", serde_json::to_string(&verdict)?);
    Ok(if verdict.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Gate persisted values before an execution step
fn cmd_gate(values_path: &Path) -> Result<ExitCode> {
    let text = std::fs::read_to_string(values_path)
        .with_context(|| format!("Failed to read {}", values_path.display()))?;
    let values: Vec<ParameterValue> =
        serde_json::from_str(&text).context("Failed to parse persisted values as JSON")?;

    guard_execution(&values)?;
    println!("gate passed: {} value(s)", values.len());
    Ok(ExitCode::SUCCESS)
}

/// Print the configured parameter definitions
fn cmd_show(config: &JobConfig) -> Result<ExitCode> {
    println!("Job: {}", config.name);
    for def in &config.parameters {
        println!(
            "  {} ({}) default={:?} {}",
            def.name(),
            def.type_symbol(),
            def.default_value().value(),
            def.description()
        );
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const JOB: &str = "name: deploy\nparameters:\n  - type: validatingYamlParameter\n    name: CONFIG\n    defaultValue: \"a: 1\"\n";

    fn config() -> JobConfig {
        JobConfig::from_yaml_str(JOB).unwrap()
    }

    #[test]
    fn test_parse_submit_args() {
        let cli = Cli::try_parse_from(["yamlparam", "--config", "job.yaml", "submit", "CONFIG", "a: 2"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("job.yaml")));
        match cli.command {
            Commands::Submit { name, value } => {
                assert_eq!(name, "CONFIG");
                assert_eq!(value.as_deref(), Some("a: 2"));
            }
            _ => panic!("expected submit"),
        }
    }

    #[test]
    fn test_submit_invalid_yaml_exit_status() {
        let err = cmd_submit(&config(), "CONFIG", Some("a: : 2")).unwrap_err();
        assert_eq!(exit_status(&err), 1);
        assert_eq!(
            err.to_string(),
            "Invalid value for parameter [CONFIG] specified: a: : 2"
        );
    }

    #[test]
    fn test_submit_unknown_parameter_is_usage_error() {
        let err = cmd_submit(&config(), "MISSING", None).unwrap_err();
        assert_eq!(exit_status(&err), 2);
    }

    #[test]
    fn test_submit_default() {
        assert_eq!(
            cmd_submit(&config(), "CONFIG", Some("")).unwrap(),
            ExitCode::SUCCESS
        );
    }

    #[test]
    fn test_missing_config_is_error() {
        assert!(load_config(None).is_err());
    }

    #[test]
    fn test_gate_blocks_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"[{"type": "validatingYamlParameter", "name": "CONFIG", "value": "a: [1"}]"#,
        )
        .unwrap();
        let err = cmd_gate(file.path()).unwrap_err();
        assert_eq!(exit_status(&err), 1);
    }

    #[test]
    fn test_gate_refuses_value_without_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"[{"type": "validatingYamlParameter", "name": "", "value": "a: 1"}]"#)
            .unwrap();
        let err = cmd_gate(file.path()).unwrap_err();
        assert_eq!(exit_status(&err), 2);
        assert!(format!("{err:#}").contains("name must not be empty"));
    }

    #[test]
    fn test_check_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"key: value\n").unwrap();
        assert_eq!(cmd_check(Some(file.path())).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_validate_without_item_is_ok() {
        assert_eq!(
            cmd_validate(Some("a: : b"), None, None).unwrap(),
            ExitCode::SUCCESS
        );
        assert_eq!(
            cmd_validate(Some("a: : b"), None, Some("deploy")).unwrap(),
            ExitCode::from(1)
        );
    }
}
