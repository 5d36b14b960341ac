//! JSON output formatting

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    /// The actual data
    pub data: T,

    /// Metadata about the response
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// Timestamp of the response
    pub timestamp: String,

    /// CLI version
    pub version: String,

    /// Whether nothing was changed because of `--dry-run`
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dry_run: bool,
}

impl<T> JsonOutput<T> {
    /// Create a new JSON output with metadata
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                dry_run: false,
            },
        }
    }

    /// Mark the output as a preview
    pub fn dry_run(mut self) -> Self {
        self.meta.dry_run = true;
        self
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    let output = JsonOutput::new(data);
    serde_json::to_string_pretty(&output)
}

/// Print data wrapped in [`JsonOutput`] to stdout
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> crate::error::Result<()> {
    println!("{}", format_json(data)?);
    Ok(())
}
