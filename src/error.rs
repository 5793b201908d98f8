use std::fmt;

/// Custom error type for NetBox CLI operations
#[derive(Debug)]
pub enum NbError {
    /// Missing or malformed settings (reported before any request)
    Config(String),
    /// Bad command-line input, e.g. a `--param` without `=`
    InvalidArgument(String),
    /// Network, TLS or timeout failure
    Transport(reqwest::Error),
    /// API returned a non-success status
    Http {
        status: u16,
        reason: String,
        body: String,
    },
    /// Path selector segment did not resolve
    PathNotFound { segment: String, path: String },
    /// JSON parsing or serialization error
    Json(String),
    /// YAML serialization error
    Yaml(String),
    /// Local file I/O error
    Io(String),
    /// Output format not supported by the command
    UnsupportedFormat(String),
    /// Dump file was written but some endpoints failed
    DumpIncomplete { failed: Vec<String> },
}

impl NbError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            NbError::Http { .. } | NbError::DumpIncomplete { .. } => 1,
            NbError::Config(_)
            | NbError::InvalidArgument(_)
            | NbError::PathNotFound { .. }
            | NbError::UnsupportedFormat(_) => 2,
            NbError::Transport(_) => 3,
            NbError::Json(_) | NbError::Yaml(_) | NbError::Io(_) => 4,
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            NbError::Http { status, .. } => Some(*status),
            NbError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl fmt::Display for NbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NbError::Config(msg) => write!(f, "{}", msg),
            NbError::InvalidArgument(msg) => write!(f, "{}", msg),
            NbError::Transport(e) if e.is_timeout() => write!(f, "Request timed out."),
            NbError::Transport(e) if e.is_connect() => write!(f, "Connection failed."),
            NbError::Transport(e) => write!(f, "Request failed: {}", e),
            NbError::Http {
                status,
                reason,
                body,
            } => {
                write!(f, "{} {}", status, reason)?;
                if !body.is_empty() {
                    write!(f, "\n{}", body)?;
                }
                Ok(())
            }
            NbError::PathNotFound { segment, path } => {
                write!(f, "Path not found: {} (no match for '{}')", path, segment)
            }
            NbError::Json(msg) => write!(f, "JSON error: {}", msg),
            NbError::Yaml(msg) => write!(f, "YAML error: {}", msg),
            NbError::Io(msg) => write!(f, "{}", msg),
            NbError::UnsupportedFormat(msg) => write!(f, "{}", msg),
            NbError::DumpIncomplete { failed } => {
                write!(f, "Dump incomplete: {} endpoint(s) failed", failed.len())?;
                for endpoint in failed {
                    write!(f, "\n  {}", endpoint)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for NbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NbError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NbError {
    fn from(err: reqwest::Error) -> Self {
        NbError::Transport(err)
    }
}

impl From<serde_json::Error> for NbError {
    fn from(err: serde_json::Error) -> Self {
        NbError::Json(err.to_string())
    }
}

impl From<serde_yml::Error> for NbError {
    fn from(err: serde_yml::Error) -> Self {
        NbError::Yaml(err.to_string())
    }
}

impl From<std::io::Error> for NbError {
    fn from(err: std::io::Error) -> Self {
        NbError::Io(err.to_string())
    }
}

/// Result type alias for NetBox CLI operations
pub type Result<T> = std::result::Result<T, NbError>;
