//! Front end configuration.
//!
//! The driver hands one `FrontendConfig` to [`crate::compile_source`] per
//! source text. Defaults mirror running the whole pipeline on an unnamed
//! snippet.

/// Name recorded in positions when the driver does not supply one.
pub const DEFAULT_SOURCE_NAME: &str = "shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    /// Source name stored in every token position and shown in diagnostics.
    pub file_name: Option<String>,
    /// Run the type resolver after parsing. Off means parse only.
    pub resolve_types: bool,
}

impl FrontendConfig {
    pub fn new(file_name: impl Into<String>) -> Self {
        FrontendConfig {
            file_name: Some(file_name.into()),
            ..FrontendConfig::default()
        }
    }

    pub fn source_name(&self) -> String {
        self.file_name
            .clone()
            .unwrap_or_else(|| String::from(DEFAULT_SOURCE_NAME))
    }
}

impl Default for FrontendConfig {
    fn default() -> Self {
        FrontendConfig {
            file_name: None,
            resolve_types: true,
        }
    }
}
