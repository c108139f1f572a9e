use std::error::Error;

#[derive(Debug)]
pub enum ConfigError {
    ConfigNotFound { path: String },
    ConfigParseError { message: String },
    InvalidConfiguration { message: String },
    IoError { source: std::io::Error },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound { path } => {
                write!(f, "Config file not found at '{}'", path)
            }
            ConfigError::ConfigParseError { message } => {
                write!(f, "Failed to parse config file: {}", message)
            }
            ConfigError::InvalidConfiguration { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
            ConfigError::IoError { source } => {
                write!(f, "IO error reading config: {}", source)
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::IoError { source } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(source: std::io::Error) -> Self {
        ConfigError::IoError { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_display() {
        let error = ConfigError::ConfigNotFound {
            path: "/tmp/missing.toml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Config file not found at '/tmp/missing.toml'"
        );
        assert!(error.source().is_none());
    }

    #[test]
    fn test_io_error_has_source() {
        let error: ConfigError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(error.to_string().starts_with("IO error reading config"));
        assert!(error.source().is_some());
    }
}
