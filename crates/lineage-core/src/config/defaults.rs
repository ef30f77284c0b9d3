//! Default values for lineage configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// File Locations
// ============================================================================

/// Project-local configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "lineage.toml";

/// Directory under the user config dir (`~/.config/lineage/`).
pub const DEFAULT_CONFIG_DIR: &str = "lineage";

/// File name inside the user config directory.
pub const DEFAULT_USER_CONFIG_FILE: &str = "config.toml";

// ============================================================================
// Engine Defaults
// ============================================================================

/// Fail a rewrite that leaves edges pointing at removed nodes.
pub const DEFAULT_STRICT: bool = false;

/// Recompute node levels from the queried node before applying rules.
pub const DEFAULT_ASSIGN_LEVELS: bool = false;

/// Drop dangling edges after all rules have run.
pub const DEFAULT_PRUNE_DANGLING: bool = false;

// ============================================================================
// Logging Defaults
// ============================================================================

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Emit logs as JSON lines.
pub const DEFAULT_LOG_JSON: bool = false;
