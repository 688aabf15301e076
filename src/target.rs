use crate::config::Config;
use crate::error::DeployError;

/// The four supported hosting destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Target {
    #[value(name = "digitalocean")]
    DigitalOcean,
    #[value(name = "heroku")]
    Heroku,
    #[value(name = "eb")]
    ElasticBeanstalk,
    #[value(name = "docker")]
    LocalDocker,
}

/// Outcome of the startup menu: deploy somewhere, or leave without side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Deploy(Target),
    Exit,
}

/// Static per-target description of the external tooling: which executable
/// must be on PATH, how to check the user is logged in, and what single
/// command performs the actual provisioning.
pub struct TargetSpec {
    pub tool: &'static str,
    pub install_hint: &'static str,
    pub auth_probe: &'static [&'static str],
    pub login_hint: &'static str,
}

impl Target {
    pub const MENU: [Target; 4] = [
        Target::DigitalOcean,
        Target::Heroku,
        Target::ElasticBeanstalk,
        Target::LocalDocker,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Target::DigitalOcean => "DigitalOcean App Platform",
            Target::Heroku => "Heroku",
            Target::ElasticBeanstalk => "AWS Elastic Beanstalk",
            Target::LocalDocker => "Local Docker Compose",
        }
    }

    pub fn spec(&self) -> TargetSpec {
        match self {
            Target::DigitalOcean => TargetSpec {
                tool: "doctl",
                install_hint: "See https://docs.digitalocean.com/reference/doctl/how-to/install/",
                auth_probe: &["doctl", "account", "get"],
                login_hint: "Run 'doctl auth init' and paste a DigitalOcean API token",
            },
            Target::Heroku => TargetSpec {
                tool: "heroku",
                install_hint: "See https://devcenter.heroku.com/articles/heroku-cli",
                auth_probe: &["heroku", "auth:whoami"],
                login_hint: "Run 'heroku login' first",
            },
            Target::ElasticBeanstalk => TargetSpec {
                tool: "eb",
                install_hint: "Install the EB CLI with 'pip install awsebcli'",
                // Credentials live with the aws CLI, not eb itself
                auth_probe: &["aws", "sts", "get-caller-identity"],
                login_hint: "Run 'aws configure' and set up your AWS credentials",
            },
            Target::LocalDocker => TargetSpec {
                tool: "docker",
                install_hint: "See https://docs.docker.com/get-docker/",
                auth_probe: &["docker", "info"],
                login_hint: "Is the Docker daemon running?",
            },
        }
    }

    /// The one delegated command that does the real provisioning work.
    pub fn invoke_command(&self, config: &Config) -> Vec<String> {
        let args: Vec<&str> = match self {
            Target::DigitalOcean => vec!["doctl", "apps", "create", "--spec", "app-spec.yaml"],
            Target::Heroku => vec!["heroku", "apps:create", config.app_name.as_str()],
            Target::ElasticBeanstalk => {
                return vec![
                    "eb".to_string(),
                    "create".to_string(),
                    format!("{}-env", config.app_name),
                ];
            }
            Target::LocalDocker => vec!["docker", "compose", "up", "--build", "-d"],
        };
        args.into_iter().map(String::from).collect()
    }
}

/// Parse the user's menu answer. "1"-"4" pick a target, "5" exits,
/// anything else (including blank input) is rejected.
pub fn parse_selection(input: &str) -> Result<Selection, DeployError> {
    match input.trim() {
        "1" => Ok(Selection::Deploy(Target::DigitalOcean)),
        "2" => Ok(Selection::Deploy(Target::Heroku)),
        "3" => Ok(Selection::Deploy(Target::ElasticBeanstalk)),
        "4" => Ok(Selection::Deploy(Target::LocalDocker)),
        "5" => Ok(Selection::Exit),
        other => Err(DeployError::InvalidSelection {
            input: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_maps_menu_numbers() {
        assert_eq!(
            parse_selection("1").unwrap(),
            Selection::Deploy(Target::DigitalOcean)
        );
        assert_eq!(
            parse_selection("4").unwrap(),
            Selection::Deploy(Target::LocalDocker)
        );
        assert_eq!(parse_selection("5").unwrap(), Selection::Exit);
    }

    #[test]
    fn selection_trims_whitespace() {
        assert_eq!(
            parse_selection(" 2\n").unwrap(),
            Selection::Deploy(Target::Heroku)
        );
    }

    #[test]
    fn selection_rejects_out_of_range() {
        assert!(matches!(
            parse_selection("9"),
            Err(DeployError::InvalidSelection { .. })
        ));
        assert!(matches!(
            parse_selection(""),
            Err(DeployError::InvalidSelection { .. })
        ));
        assert!(matches!(
            parse_selection("heroku"),
            Err(DeployError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn every_target_has_a_complete_spec() {
        for target in Target::MENU {
            let spec = target.spec();
            assert!(!spec.tool.is_empty());
            assert!(!spec.install_hint.is_empty());
            assert!(spec.auth_probe.len() >= 2, "probe needs a subcommand");
            assert!(!spec.login_hint.is_empty());
        }
    }

    #[test]
    fn invoke_command_embeds_app_name() {
        let config = Config::test_fixture("demo-app");
        let heroku = Target::Heroku.invoke_command(&config);
        assert_eq!(heroku, vec!["heroku", "apps:create", "demo-app"]);
        let eb = Target::ElasticBeanstalk.invoke_command(&config);
        assert_eq!(eb, vec!["eb", "create", "demo-app-env"]);
    }
}
