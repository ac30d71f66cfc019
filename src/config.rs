use crate::error::{Result, SprinklerError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub openweathermap: OpenWeatherMapConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// Load configuration from a YAML file, falling back to plain
    /// environment variables when no file is found.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = config_override {
            if !path.exists() {
                return Err(SprinklerError::Config(format!(
                    "Config file not found at {:?}",
                    path
                )));
            }
            return Self::load_file(&path);
        }

        match Self::find_config_path() {
            Some(path) => Self::load_file(&path),
            None => Self::from_env(),
        }
    }

    fn load_file(path: &PathBuf) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| SprinklerError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| SprinklerError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("sprinklerd").join("config.yaml");
            if xdg_config.exists() {
                return Some(xdg_config);
            }
        }

        None
    }

    /// Build configuration purely from environment variables. `API_KEY` is
    /// required; `SPRINKLERD_PORT` overrides the default port.
    fn from_env() -> Result<Self> {
        let api_key = std::env::var("API_KEY").map_err(|_| {
            SprinklerError::Config(
                "API_KEY environment variable not set and no config file found".into(),
            )
        })?;

        let port = match std::env::var("SPRINKLERD_PORT") {
            Ok(value) => value.parse::<u16>().map_err(|_| {
                SprinklerError::Config(format!("Invalid SPRINKLERD_PORT '{}'", value))
            })?,
            Err(_) => default_port(),
        };

        Ok(Self {
            server: ServerConfig { port },
            openweathermap: OpenWeatherMapConfig { api_key },
        })
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_yaml_config() {
        let yaml = "server:\n  port: 9000\nopenweathermap:\n  api_key: abc123\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.openweathermap.api_key, "abc123");
    }

    #[test]
    fn server_section_is_optional() {
        let yaml = "openweathermap:\n  api_key: abc123\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn substitutes_known_env_vars_and_leaves_unknown() {
        // Safe to set: name is unique to this test.
        std::env::set_var("SPRINKLERD_TEST_SUBST_VAR", "hello");
        let content = "a: ${SPRINKLERD_TEST_SUBST_VAR}\nb: ${SPRINKLERD_TEST_NO_SUCH_VAR}\n";
        let result = Config::substitute_env_vars(content);
        assert!(result.contains("a: hello"));
        assert!(result.contains("b: ${SPRINKLERD_TEST_NO_SUCH_VAR}"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = OpenWeatherMapConfig {
            api_key: "secret".into(),
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("REDACTED"));
    }
}
