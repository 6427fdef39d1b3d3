//! Store Constants
//!
//! Centralized defaults shared by stores, the query coordinator and the API client.

/// Debounce window for free-text search changes
pub const SEARCH_DEBOUNCE_MS: u64 = 250;

/// Default pagination size
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Upper bound accepted for a page size
pub const MAX_PAGE_SIZE: usize = 1000;

/// Remote API defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Application identity used for platform directories
pub const APP_QUALIFIER: &str = "dk";
pub const APP_ORGANIZATION: &str = "energinet";
pub const APP_NAME: &str = "datahub-store";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Separator used for "<number> • <name>" style labels
pub const LABEL_SEPARATOR: &str = " • ";
