use thiserror::Error;

pub type DeployResult<T> = Result<T, DeployError>;

/// Everything that can stop a deployment. All variants are terminal:
/// the dispatcher never retries, it reports the message and exits.
#[derive(Error, Debug)]
pub enum DeployError {
    /// API_KEY missing or empty. Checked before any target logic runs.
    #[error("API_KEY is not set. Export it or add it to your .env file before deploying")]
    MissingCredential,

    /// The target's CLI is not resolvable on PATH.
    #[error("'{tool}' is not installed. {install_hint}")]
    ToolNotInstalled { tool: String, install_hint: String },

    /// The tool is present but its identity probe failed.
    #[error("not authenticated. {login_hint}")]
    NotAuthenticated { login_hint: String },

    /// Menu input outside 1-5.
    #[error("invalid selection '{input}'. Choose a number between 1 and 5")]
    InvalidSelection { input: String },

    /// The delegated provisioning command exited non-zero.
    #[error("'{command}' failed with {status}")]
    CommandFailed { command: String, status: std::process::ExitStatus },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to render app spec: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
