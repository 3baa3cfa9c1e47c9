use crate::core::port_watch::{DEFAULT_END_PORT, DEFAULT_START_PORT, DEFAULT_TIMEOUT_SECS};
use crate::utils::error::{Result, ToolError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "toolshed.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolshedConfig {
    pub todo: TodoConfig,
    pub finance: FinanceConfig,
    pub ports: PortsConfig,
    pub pomoban: PomobanConfig,
    pub web: WebConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoConfig {
    pub file: String,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            file: "todos.txt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceConfig {
    pub file: String,
    pub export_dir: String,
    pub max_attempts: usize,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            file: "finance_data.json".to_string(),
            export_dir: ".".to_string(),
            max_attempts: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortsConfig {
    pub start: u32,
    pub end: u32,
    pub timeout_secs: f64,
}

impl Default for PortsConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_PORT,
            end: DEFAULT_END_PORT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PomobanConfig {
    pub database: String,
    pub pomodoro_secs: u32,
}

impl Default for PomobanConfig {
    fn default() -> Self {
        Self {
            database: "pomoban.db".to_string(),
            pomodoro_secs: 1500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
        }
    }
}

impl ToolshedConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Loads `explicit` if given, else `toolshed.toml` when it exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                tracing::debug!("Loading configuration from {}", DEFAULT_CONFIG_FILE);
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` references (e.g. `${TOOLSHED_HOME}`); unknown variables stay verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ToolError::config(format!("Invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn todo_path(&self) -> PathBuf {
        PathBuf::from(&self.todo.file)
    }

    pub fn finance_path(&self) -> PathBuf {
        PathBuf::from(&self.finance.file)
    }

    pub fn pomoban_path(&self) -> PathBuf {
        PathBuf::from(&self.pomoban.database)
    }
}

impl Validate for ToolshedConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("todo.file", &self.todo.file)?;
        validation::validate_path("finance.file", &self.finance.file)?;
        validation::validate_path("finance.export_dir", &self.finance.export_dir)?;
        validation::validate_range("finance.max_attempts", self.finance.max_attempts, 1, 10)?;
        validation::validate_range("ports.start", self.ports.start, 1, 65535)?;
        validation::validate_range("ports.end", self.ports.end, 1, 65535)?;
        if self.ports.start > self.ports.end {
            return Err(ToolError::InvalidConfigValueError {
                field: "ports.start".to_string(),
                value: self.ports.start.to_string(),
                reason: "Start port must be <= end port".to_string(),
            });
        }
        validation::validate_positive("ports.timeout_secs", self.ports.timeout_secs)?;
        validation::validate_path("pomoban.database", &self.pomoban.database)?;
        validation::validate_range("pomoban.pomodoro_secs", self.pomoban.pomodoro_secs, 1, 24 * 3600)?;
        validation::validate_non_empty_string("web.bind", &self.web.bind)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = ToolshedConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.todo.file, "todos.txt");
        assert_eq!(config.ports.start, 8000);
        assert_eq!(config.ports.end, 9000);
        assert_eq!(config.pomoban.pomodoro_secs, 1500);
    }

    #[test]
    fn test_parse_partial_toml_config() {
        let toml_content = r#"
[ports]
start = 3000
end = 3100

[finance]
file = "money.json"
"#;

        let config = ToolshedConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.ports.start, 3000);
        assert_eq!(config.ports.end, 3100);
        assert_eq!(config.ports.timeout_secs, 0.5);
        assert_eq!(config.finance.file, "money.json");
        assert_eq!(config.finance.max_attempts, 3);
        assert_eq!(config.web.bind, "127.0.0.1:5000");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TOOLSHED_TEST_TODO_DIR", "/tmp/lists");

        let toml_content = r#"
[todo]
file = "${TOOLSHED_TEST_TODO_DIR}/todos.txt"

[web]
bind = "${TOOLSHED_TEST_UNSET_VAR}"
"#;

        let config = ToolshedConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.todo.file, "/tmp/lists/todos.txt");
        assert_eq!(config.web.bind, "${TOOLSHED_TEST_UNSET_VAR}");

        std::env::remove_var("TOOLSHED_TEST_TODO_DIR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[ports]
start = 9000
end = 8000
"#;

        let config = ToolshedConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(ToolshedConfig::from_toml_str("[ports\nstart = 1").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[pomoban]
database = "board.db"
pomodoro_secs = 60
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = ToolshedConfig::load(Some(temp_file.path())).unwrap();
        assert_eq!(config.pomoban.database, "board.db");
        assert_eq!(config.pomoban.pomodoro_secs, 60);
    }
}
