/// Configuration constants for the NetBox API
pub mod api {
    /// Path segment of the REST API root
    pub const BASE_PATH: &str = "api";

    /// Status endpoint (relative to the API root)
    pub const STATUS: &str = "status";

    /// Key in list responses holding the page items
    pub const RESULTS_KEY: &str = "results";

    /// Key in list responses holding the next page URL
    pub const NEXT_KEY: &str = "next";

    /// Prefix of v2 API tokens, which use the Bearer scheme
    pub const V2_TOKEN_PREFIX: &str = "nbt_";
}

/// Settings keys read from the environment or the dotenv file
pub mod env {
    pub const URL: &str = "NETBOX_URL";
    pub const TOKEN: &str = "NETBOX_TOKEN";
    pub const TIMEOUT: &str = "NETBOX_TIMEOUT";
    pub const INSECURE: &str = "NETBOX_INSECURE";

    /// Default dotenv file name, looked up in the working directory
    pub const FILE_NAME: &str = ".env";

    /// Fallback directory under the user config dir
    pub const CONFIG_DIR_NAME: &str = "nbcli";
}

/// Dump command constants
pub mod dump {
    /// Endpoints skipped unless `--include-all` is given
    pub const EXCLUDED_ENDPOINTS: &[&str] = &["core/jobs", "core/object-changes"];

    /// Timestamp format for `dump_datetime`
    pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

    /// Top-level key of the dump document
    pub const ROOT_KEY: &str = "netbox_data";
}

/// Default values for CLI
pub mod defaults {
    /// Default HTTP timeout in seconds
    pub const TIMEOUT_SECS: f64 = 30.0;

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}
