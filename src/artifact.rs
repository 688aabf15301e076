use crate::config::Config;
use crate::error::DeployResult;
use crate::target::Target;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// DigitalOcean App Platform app spec, serialized to `app-spec.yaml`.
#[derive(Debug, Serialize)]
pub struct AppSpec {
    name: String,
    region: String,
    services: Vec<ServiceSpec>,
}

#[derive(Debug, Serialize)]
struct ServiceSpec {
    name: String,
    environment_slug: String,
    instance_count: u32,
    instance_size_slug: String,
    run_command: String,
    envs: Vec<EnvVar>,
}

#[derive(Debug, Serialize)]
struct EnvVar {
    key: String,
    value: String,
}

/// Render the target's configuration artifact into `workdir` and return the
/// path written. Existing files are overwritten without asking.
pub fn render(target: Target, config: &Config, workdir: &Path) -> DeployResult<PathBuf> {
    match target {
        Target::DigitalOcean => {
            let path = workdir.join("app-spec.yaml");
            let spec = AppSpec {
                name: config.app_name.clone(),
                region: "nyc".to_string(),
                services: vec![ServiceSpec {
                    name: "web".to_string(),
                    environment_slug: "python".to_string(),
                    instance_count: 1,
                    instance_size_slug: "basic-xxs".to_string(),
                    run_command: format!("gunicorn {}:app", config.app_module),
                    envs: env_pairs(config)
                        .into_iter()
                        .map(|(key, value)| EnvVar { key, value })
                        .collect(),
                }],
            };
            std::fs::write(&path, serde_yaml_ng::to_string(&spec)?)?;
            Ok(path)
        }
        Target::Heroku => {
            // Heroku reads the start command from a Procfile. The config
            // values ride along as inline assignments on the web process.
            let path = workdir.join("Procfile");
            let assignments: Vec<String> = env_pairs(config)
                .into_iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect();
            let procfile = format!(
                "web: {} gunicorn {}:app\n",
                assignments.join(" "),
                config.app_module
            );
            std::fs::write(&path, procfile)?;
            Ok(path)
        }
        Target::ElasticBeanstalk => {
            let dir = workdir.join(".ebextensions");
            std::fs::create_dir_all(&dir)?;
            let path = dir.join("environment.config");
            let mut block = String::from("option_settings:\n");
            block.push_str("  aws:elasticbeanstalk:application:environment:\n");
            for (key, value) in env_pairs(config) {
                block.push_str(&format!("    {}: \"{}\"\n", key, value));
            }
            std::fs::write(&path, block)?;
            Ok(path)
        }
        Target::LocalDocker => {
            let path = workdir.join(".env");
            let mut dotenv = String::new();
            for (key, value) in env_pairs(config) {
                dotenv.push_str(&format!("{}={}\n", key, value));
            }
            std::fs::write(&path, dotenv)?;
            Ok(path)
        }
    }
}

// The four values every artifact carries, in a stable order.
fn env_pairs(config: &Config) -> Vec<(String, String)> {
    vec![
        ("APP_MODULE".to_string(), config.app_module.clone()),
        ("APP_ENV".to_string(), config.app_env.clone()),
        ("SECRET_KEY".to_string(), config.secret_key.clone()),
        ("API_KEY".to_string(), config.api_key.clone()),
    ]
}
