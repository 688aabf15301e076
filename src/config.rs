use crate::error::{DeployError, DeployResult};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;

const SECRET_KEY_LEN: usize = 32;

/// Everything a deployment needs, resolved once at startup. The shell
/// environment is only read here; the rest of the program works off this
/// struct.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub app_module: String,
    pub app_env: String,
    pub api_key: String,
    pub secret_key: String,
}

impl Config {
    /// Build the configuration from the process environment, falling back to
    /// a dotenv-style file for anything not exported. Process env wins.
    pub fn from_env(env_file: &str) -> DeployResult<Self> {
        let file_vars = parse_env_file(env_file);
        let lookup = |key: &str| {
            std::env::var(key)
                .ok()
                .filter(|v| !v.is_empty())
                .or_else(|| file_vars.get(key).cloned())
        };
        Self::from_lookup(lookup)
    }

    /// Testable core of `from_env`: resolve every field through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> DeployResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(DeployError::MissingCredential)?;

        Ok(Config {
            app_name: lookup("APP_NAME").unwrap_or_else(|| "web-app".to_string()),
            app_module: lookup("APP_MODULE").unwrap_or_else(|| "app".to_string()),
            app_env: lookup("APP_ENV").unwrap_or_else(|| "production".to_string()),
            api_key,
            secret_key: generate_secret(),
        })
    }

    pub fn show_configuration_help() {
        println!("Configuration options:");
        println!("  1. Export environment variables:");
        println!("     export API_KEY=your-api-key        (required)");
        println!("     export APP_NAME=my-app             (default: web-app)");
        println!("     export APP_MODULE=app              (default: app)");
        println!("     export APP_ENV=production          (default: production)");
        println!();
        println!("  2. Or create a .env file (or use --env-file to point elsewhere):");
        println!("     API_KEY=your-api-key");
        println!("     APP_NAME=my-app");
        println!();
        println!("Exported variables take precedence over .env file values.");
        println!("SECRET_KEY is generated fresh on every run and is never read from the environment.");
    }

    #[cfg(test)]
    pub fn test_fixture(app_name: &str) -> Self {
        Config {
            app_name: app_name.to_string(),
            app_module: "app".to_string(),
            app_env: "production".to_string(),
            api_key: "test-api-key".to_string(),
            secret_key: generate_secret(),
        }
    }
}

/// A fresh random secret for the generated artifact. Process-lifetime only.
pub fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SECRET_KEY_LEN)
        .map(char::from)
        .collect()
}

// Parse KEY=VALUE lines, skipping blanks and comments. A missing or
// unreadable file is not an error, it just contributes nothing.
fn parse_env_file(path: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    if let Ok(content) = std::fs::read_to_string(path) {
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                vars.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
    }
    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_api_key_is_a_credential_error() {
        let result = Config::from_lookup(|_| None);
        assert!(matches!(result, Err(DeployError::MissingCredential)));
    }

    #[test]
    fn blank_api_key_is_a_credential_error() {
        let result = Config::from_lookup(|key| match key {
            "API_KEY" => Some("   ".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(DeployError::MissingCredential)));
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let config = Config::from_lookup(|key| match key {
            "API_KEY" => Some("abc123".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.app_name, "web-app");
        assert_eq!(config.app_module, "app");
        assert_eq!(config.app_env, "production");
        assert_eq!(config.api_key, "abc123");
    }

    #[test]
    fn secret_is_generated_fresh_and_nonempty() {
        let a = generate_secret();
        let b = generate_secret();
        assert_eq!(a.len(), SECRET_KEY_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn env_file_parsing_skips_comments_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.env");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "# a comment").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "API_KEY = spaced-key").unwrap();
        writeln!(file, "APP_NAME=from-file").unwrap();

        let vars = parse_env_file(path.to_str().unwrap());
        assert_eq!(vars.get("API_KEY").unwrap(), "spaced-key");
        assert_eq!(vars.get("APP_NAME").unwrap(), "from-file");
        assert_eq!(vars.len(), 2);
    }
}
