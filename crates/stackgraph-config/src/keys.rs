//! Parameter names and their documented defaults

/// Deployment region
pub const AWS_REGION: &str = "AWS_REGION";
/// Project name, prefix of every resource name
pub const PROJECT_NAME: &str = "PROJECT_NAME";
/// Environment name (`dev`, `staging`, ...)
pub const ENVIRONMENT: &str = "ENVIRONMENT";
/// Account id used by the default image reference
pub const AWS_ACCOUNT_ID: &str = "AWS_ACCOUNT_ID";
/// Container image reference
pub const IMAGE_URI: &str = "IMAGE_URI";
/// Port the container listens on
pub const CONTAINER_PORT: &str = "CONTAINER_PORT";
/// State backend mode, `local` or `remote`
pub const TF_BACKEND: &str = "TF_BACKEND";
/// State bucket, required for the remote backend
pub const TF_STATE_BUCKET: &str = "TF_STATE_BUCKET";
/// Lock table, required for the remote backend
pub const TF_LOCK_TABLE: &str = "TF_LOCK_TABLE";
/// Credentials profile for provider and backend
pub const AWS_PROFILE: &str = "AWS_PROFILE";
/// Alerting gate
pub const ALERTS_ENABLED: &str = "ALERTS_ENABLED";
/// Alert recipient address
pub const ALERT_EMAIL: &str = "ALERT_EMAIL";
/// Container registry gate
pub const CREATE_ECR: &str = "CREATE_ECR";

/// Every key the resolver reads
pub const ALL: [&str; 13] = [
    AWS_REGION,
    PROJECT_NAME,
    ENVIRONMENT,
    AWS_ACCOUNT_ID,
    IMAGE_URI,
    CONTAINER_PORT,
    TF_BACKEND,
    TF_STATE_BUCKET,
    TF_LOCK_TABLE,
    AWS_PROFILE,
    ALERTS_ENABLED,
    ALERT_EMAIL,
    CREATE_ECR,
];

/// Defaults applied when a key is absent or blank
pub mod defaults {
    /// Region
    pub const REGION: &str = "us-west-2";
    /// Project
    pub const PROJECT: &str = "tv-devops";
    /// Environment
    pub const ENVIRONMENT: &str = "dev";
    /// Account id
    pub const ACCOUNT_ID: &str = "342573630114";
    /// Container port
    pub const CONTAINER_PORT: u16 = 3000;
    /// Backend mode
    pub const BACKEND: &str = "local";
    /// Alerting
    pub const ALERTS_ENABLED: bool = false;
    /// Registry
    pub const CREATE_ECR: bool = true;
}
