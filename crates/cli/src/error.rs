use thiserror::Error;

use coords::CoordError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{input:?}: {source}")]
    Coordinate {
        input: String,
        #[source]
        source: CoordError,
    },
}

impl CliError {
    pub fn coordinate(input: &str, source: CoordError) -> Self {
        CliError::Coordinate { input: input.to_string(), source }
    }

    /// Stable machine-readable code for JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            CliError::InvalidConfig(_) => "invalid_config",
            CliError::Coordinate { source, .. } => source.kind().as_str(),
        }
    }
}
