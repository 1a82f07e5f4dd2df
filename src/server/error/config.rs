use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The bot requires this environment variable to be defined. Check the
    /// documentation or `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but its value cannot be used.
    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnvVar {
        /// Name of the variable
        name: String,
        /// The rejected value
        value: String,
    },

    /// The server configuration document could not be read from disk.
    #[error("Failed to read configuration file '{path}': {source}")]
    ConfigFile {
        /// Path that was read
        path: String,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },
}
