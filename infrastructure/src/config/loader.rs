//! Configuration file loader with multi-source merging

use super::error::ConfigError;
use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use tracing::debug;

const PROJECT_FILES: [&str; 2] = ["medibot.toml", ".medibot.toml"];
const ENV_PREFIX: &str = "MEDIBOT_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `MEDIBOT_*` environment variables, `__` separating nested keys
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./medibot.toml` or `./.medibot.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/medibot/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        Self::figment(config_path)
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// The merged provider chain, before extraction
    pub fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            debug!("Loading project config from {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            debug!("Loading explicit config from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/medibot/config.toml if set,
    /// otherwise falls back to ~/.config/medibot/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("medibot").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./medibot.toml or ./.medibot.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn isolate(jail: &mut Jail) {
        let xdg = jail.directory().join("xdg");
        jail.set_env("XDG_CONFIG_HOME", xdg.display());
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.provider.kind, "gemini");
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("medibot"));
    }

    #[test]
    fn test_project_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file(
                "medibot.toml",
                r#"
[provider]
kind = "openrouter"

[server]
port = 7000
"#,
            )?;

            let config = ConfigLoader::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.provider.kind, "openrouter");
            assert_eq!(config.server.port, 7000);
            assert_eq!(config.server.host, "127.0.0.1");
            Ok(())
        });
    }

    #[test]
    fn test_global_then_explicit_precedence() {
        Jail::expect_with(|jail| {
            isolate(jail);
            std::fs::create_dir_all(jail.directory().join("xdg/medibot"))
                .map_err(|e| e.to_string())?;
            jail.create_file(
                "xdg/medibot/config.toml",
                r#"
[server]
host = "0.0.0.0"
port = 6000
"#,
            )?;
            jail.create_file(
                "custom.toml",
                r#"
[server]
port = 6500
"#,
            )?;

            let config = ConfigLoader::load(Some(Path::new("custom.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.server.port, 6500);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_files() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file(
                ".medibot.toml",
                r#"
[server]
port = 7000
"#,
            )?;
            jail.set_env("MEDIBOT_SERVER__PORT", "8080");
            jail.set_env("MEDIBOT_GEMINI__MODEL", "gemini-1.5-flash");

            let config = ConfigLoader::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.gemini.model, "gemini-1.5-flash");
            Ok(())
        });
    }

    #[test]
    fn test_api_key_from_named_env_var() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file(
                "medibot.toml",
                r#"
[gemini]
api_key_env = "CLINIC_TEST_GEMINI_KEY"
"#,
            )?;
            jail.set_env("CLINIC_TEST_GEMINI_KEY", "from-env");

            let config = ConfigLoader::load(None).map_err(|e| e.to_string())?;
            let settings = config.provider_settings().map_err(|e| e.to_string())?;
            assert_eq!(settings.config().api_key, "from-env");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_load_error() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file(
                "medibot.toml",
                r#"
[server]
port = "not-a-port"
"#,
            )?;

            assert!(matches!(
                ConfigLoader::load(None),
                Err(ConfigError::Load(_))
            ));
            Ok(())
        });
    }
}
