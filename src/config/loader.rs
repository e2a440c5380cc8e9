//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CuratorConfig;
use crate::config::secret_string;
use crate::domain::errors::CuratorError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CuratorConfig
/// 4. Applies environment variable overrides (CURATOR_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use curator::config::loader::load_config;
///
/// let config = load_config("curator.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CuratorConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CuratorError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CuratorError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Perform environment variable substitution
    let contents = substitute_env_vars(&contents)?;

    // Parse TOML
    let mut config: CuratorConfig = toml::from_str(&contents)
        .map_err(|e| CuratorError::Configuration(format!("Failed to parse TOML: {e}")))?;

    // Apply environment variable overrides
    apply_env_overrides(&mut config);

    // Validate configuration
    config
        .validate()
        .map_err(|e| CuratorError::Configuration(format!("Configuration validation failed: {e}")))?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static regex");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CuratorError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the CURATOR_* prefix
///
/// Environment variables follow the pattern: CURATOR_<SECTION>_<KEY>
/// For example: CURATOR_CATALOG_API_URL, CURATOR_EXPORT_DEBUG_LIMIT
fn apply_env_overrides(config: &mut CuratorConfig) {
    if let Ok(val) = std::env::var("CURATOR_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("CURATOR_CATALOG_API_URL") {
        config.catalog.api_url = val;
    }
    if let Ok(val) = std::env::var("CURATOR_CATALOG_PAGE_SIZE") {
        if let Ok(size) = val.parse() {
            config.catalog.page_size = size;
        }
    }
    if let Ok(val) = std::env::var("CURATOR_CATALOG_TLS_VERIFY") {
        config.catalog.tls_verify = val.parse().unwrap_or(true);
    }

    if let Ok(val) = std::env::var("CURATOR_CREDENTIALS_KEY") {
        config.credentials.key = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("CURATOR_CREDENTIALS_USERNAME") {
        config.credentials.username = Some(val);
    }
    if let Ok(val) = std::env::var("CURATOR_CREDENTIALS_PASSWORD") {
        config.credentials.password = Some(secret_string(val));
    }

    if let Ok(val) = std::env::var("CURATOR_EXPORT_OUTPUT_DIRECTORY") {
        config.export.output_directory = val.into();
    }
    if let Ok(val) = std::env::var("CURATOR_EXPORT_DEBUG_LIMIT") {
        if let Ok(limit) = val.parse() {
            config.export.debug_limit = Some(limit);
        }
    }

    if let Ok(val) = std::env::var("CURATOR_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CURATOR_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID_TOML: &str = r#"
[application]
log_level = "info"

[catalog]
api_url = "https://catalog.example.org/api/v1"
page_size = 25

[export]
output_directory = "./exports"

[[export.fields]]
name = "idno"
primary_key = true
required = true

[[export.fields]]
name = "title"

[export.warnings]
missing_fields = true
"#;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CURATOR_TEST_VAR", "test_value");
        let input = "password = \"${CURATOR_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"\n");
        std::env::remove_var("CURATOR_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("CURATOR_MISSING_VAR");
        let input = "password = \"${CURATOR_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# password = \"${CURATOR_UNSET_IN_COMMENT}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(VALID_TOML.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.catalog.api_url, "https://catalog.example.org/api/v1");
        assert_eq!(config.catalog.page_size, 25);
        assert_eq!(config.export.primary_key_field(), Some("idno"));
        assert!(config.export.warnings.missing_fields);
        assert!(!config.export.warnings.singleton_fields);
    }

    #[test]
    fn test_load_config_invalid_rejected() {
        let toml = r#"
[catalog]
api_url = "https://catalog.example.org/api/v1"

[export]
output_directory = "./exports"

[[export.fields]]
name = "idno"
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("primary_key"));
    }
}
