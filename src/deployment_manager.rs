use crate::{
    artifact,
    config::Config,
    error::{DeployError, DeployResult},
    runner::CommandRunner,
    target::Target,
};
use std::path::PathBuf;
use tracing::info;

/// Routes one selected target through the four-step deployment sequence:
/// tool check, auth check, config render, delegated invocation. Strictly
/// linear, first failure wins, nothing is retried.
pub struct DeploymentManager<R: CommandRunner> {
    runner: R,
    workdir: PathBuf,
}

impl<R: CommandRunner> DeploymentManager<R> {
    pub fn new(runner: R, workdir: PathBuf) -> Self {
        Self { runner, workdir }
    }

    /// Hand the runner back, mostly so tests can inspect what was called.
    pub fn into_runner(self) -> R {
        self.runner
    }

    pub fn deploy(&self, target: Target, config: &Config) -> DeployResult<()> {
        let spec = target.spec();
        println!(
            "Deploying '{}' to {}",
            config.app_name,
            target.display_name()
        );

        // 1. The vendor CLI has to exist before anything else is attempted
        if self.runner.resolve_tool(spec.tool).is_none() {
            return Err(DeployError::ToolNotInstalled {
                tool: spec.tool.to_string(),
                install_hint: spec.install_hint.to_string(),
            });
        }
        info!("found '{}' on PATH", spec.tool);

        // 2. Identity probe; output is discarded, only the exit status matters
        let authenticated = self
            .runner
            .run_quiet(spec.auth_probe)
            .map_err(|e| map_spawn_error(e, spec.auth_probe[0], spec.install_hint))?;
        if !authenticated {
            return Err(DeployError::NotAuthenticated {
                login_hint: spec.login_hint.to_string(),
            });
        }
        info!("authenticated against {}", target.display_name());

        // 3. Materialize the config artifact (unconditional overwrite)
        let artifact_path = artifact::render(target, config, &self.workdir)?;
        println!("Wrote {}", artifact_path.display());

        // 4. Hand off to the vendor tool and check how it went
        let invoke = target.invoke_command(config);
        info!("delegating to: {}", invoke.join(" "));
        let status = self
            .runner
            .run(&invoke, &self.workdir)
            .map_err(|e| map_spawn_error(e, &invoke[0], spec.install_hint))?;
        if !status.success() {
            return Err(DeployError::CommandFailed {
                command: invoke.join(" "),
                status,
            });
        }

        println!("Deployment to {} complete!", target.display_name());
        Ok(())
    }
}

// A NotFound spawn error means the executable vanished between the PATH
// check and the call, or a secondary CLI (eb's companion 'aws') is missing.
fn map_spawn_error(err: std::io::Error, program: &str, install_hint: &str) -> DeployError {
    if err.kind() == std::io::ErrorKind::NotFound {
        DeployError::ToolNotInstalled {
            tool: program.to_string(),
            install_hint: install_hint.to_string(),
        }
    } else {
        DeployError::Io(err)
    }
}
