pub mod config;
pub mod stats;
pub mod suggest;
pub mod triples;

use std::path::PathBuf;

use basketry_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use basketry_core::CoOccurrenceIndex;
use basketry_loader::source_for;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome<T: Serialize> {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
}

impl CommandResult {
    pub fn success<T: Serialize>(command: &str, message: impl Into<String>, result: T) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            result: Some(result),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload: CommandOutcome<()> = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            result: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload<T: Serialize>(payload: CommandOutcome<T>) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

pub fn cli_load_options(config_path: Option<PathBuf>, dataset: Option<String>) -> LoadOptions {
    LoadOptions {
        config_path,
        require_file: false,
        overrides: ConfigOverrides { dataset_source: dataset, ..ConfigOverrides::default() },
    }
}

/// Loads the configured dataset and builds the index, blocking on a local
/// runtime so individual commands stay synchronous.
pub(crate) fn build_index(config: &AppConfig) -> Result<CoOccurrenceIndex, (String, String)> {
    let source = source_for(&config.dataset)
        .map_err(|error| ("dataset".to_string(), error.to_string()))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| {
            ("runtime".to_string(), format!("failed to initialize async runtime: {error}"))
        })?;

    let line_items = runtime
        .block_on(source.load())
        .map_err(|error| ("dataset".to_string(), error.to_string()))?;

    Ok(CoOccurrenceIndex::build(&line_items))
}

pub(crate) fn load_config(options: LoadOptions) -> Result<AppConfig, (String, String)> {
    AppConfig::load(options).map_err(|error| ("config".to_string(), error.to_string()))
}
