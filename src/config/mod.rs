//! Configuration module.
//!
//! Settings resolve through Defaults → Config File → Env Vars → CLI Args.

pub mod keybindings;
mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig, CONFIG_ENV, LOG_ENV,
};
