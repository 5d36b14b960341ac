//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - human-optimized rich formatting
    #[default]
    Pretty,
    /// Table format - machine-parseable, one row per entry
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
}

impl OutputFormat {
    /// Parse a format name from the config file (`preferences.format`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "table" => Some(Self::Table),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}
