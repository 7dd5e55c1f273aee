// SPDX-License-Identifier: MPL-2.0
//! Where `settings.toml` lives.
//!
//! The first match wins:
//! 1. a directory passed explicitly (tests, `config::load_with_override`)
//! 2. `--config-dir`, recorded once by [`init_cli_overrides`]
//! 3. `PASSPIX_CONFIG_DIR`, ignored when empty
//! 4. the platform config directory joined with `PassPix`

use std::path::PathBuf;
use std::sync::OnceLock;

const APP_NAME: &str = "PassPix";

/// Overrides the config directory when set to a non-empty value.
pub const ENV_CONFIG_DIR: &str = "PASSPIX_CONFIG_DIR";

static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records `--config-dir`. Returns `false` if it was already recorded.
pub fn init_cli_overrides(config_dir: Option<String>) -> bool {
    CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_ok()
}

/// Config directory without an explicit override.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Config directory, preferring `override_path` over every other source.
///
/// Returns `None` only when the platform has no config directory and nothing
/// overrides it.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    override_path
        .or_else(|| CLI_CONFIG_DIR.get().cloned().flatten())
        .or_else(|| {
            std::env::var_os(ENV_CONFIG_DIR)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
        .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_NAME)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests touching the environment run one at a time.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn explicit_directory_wins_over_environment() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "/from/env");

        let chosen = get_app_config_dir_with_override(Some(PathBuf::from("/from/test")));
        assert_eq!(chosen, Some(PathBuf::from("/from/test")));

        std::env::remove_var(ENV_CONFIG_DIR);
    }

    #[test]
    fn environment_directory_is_used_when_set() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "/srv/passpix");

        assert_eq!(get_app_config_dir(), Some(PathBuf::from("/srv/passpix")));

        std::env::remove_var(ENV_CONFIG_DIR);
    }

    #[test]
    fn empty_environment_value_falls_back_to_platform_dir() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "");

        if let Some(path) = get_app_config_dir() {
            assert!(path.ends_with(APP_NAME), "unexpected dir {path:?}");
        }

        std::env::remove_var(ENV_CONFIG_DIR);
    }
}
