//! Configuration Resolver
//!
//! Turns [`RawInput`] into an immutable [`Configuration`]: defaults are
//! substituted, values are parsed, and parameter combinations are checked.
//! Resolution is pure; equal input always yields an equal configuration.

use crate::error::ConfigError;
use crate::keys::{self, defaults};
use crate::raw::RawInput;
use serde::Serialize;
use std::collections::BTreeMap;

/// Where the provisioning engine keeps its state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendMode {
    /// State on the operator's disk
    Local,
    /// Shared state with locking
    Remote {
        /// Bucket holding the state file
        state_bucket: String,
        /// Table coordinating locks
        lock_table: String,
    },
}

impl BackendMode {
    /// True for the remote backend
    #[inline]
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote { .. } => "remote",
        }
    }
}

/// Alerting flag and recipient, resolved independently
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSettings {
    enabled: bool,
    recipient: Option<String>,
}

impl AlertSettings {
    /// Whether the alerting subgraph is built
    #[inline]
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Recipient as given, regardless of the flag
    #[inline]
    #[must_use]
    pub fn recipient(&self) -> Option<&str> {
        self.recipient.as_deref()
    }
}

/// Flat view of a resolved parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Text
    String(String),
    /// Integer
    Number(i64),
    /// Flag
    Bool(bool),
}

/// Resolved, immutable configuration of one synthesis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    region: String,
    project: String,
    environment: String,
    account_id: String,
    image_uri: String,
    container_port: u16,
    backend: BackendMode,
    profile: Option<String>,
    alerts: AlertSettings,
    create_registry: bool,
}

impl Configuration {
    /// Resolve raw input
    ///
    /// # Errors
    /// - [`ConfigError::InvalidValue`] for unparseable values
    /// - [`ConfigError::MissingRemoteBackendParameters`] when the remote
    ///   backend is selected without both bucket and lock table
    pub fn resolve(raw: &RawInput) -> Result<Self, ConfigError> {
        let region = text_or(raw, keys::AWS_REGION, defaults::REGION);
        let project = text_or(raw, keys::PROJECT_NAME, defaults::PROJECT);
        let environment = text_or(raw, keys::ENVIRONMENT, defaults::ENVIRONMENT);
        let account_id = text_or(raw, keys::AWS_ACCOUNT_ID, defaults::ACCOUNT_ID);
        let image_uri = raw.get(keys::IMAGE_URI).map_or_else(
            || default_image_uri(&account_id, &region, &project, &environment),
            str::to_owned,
        );
        let container_port = parse_port(raw)?;
        let backend = resolve_backend(raw)?;
        let profile = raw.get(keys::AWS_PROFILE).map(str::to_owned);
        let alerts = AlertSettings {
            enabled: parse_flag(raw, keys::ALERTS_ENABLED, defaults::ALERTS_ENABLED)?,
            recipient: raw.get(keys::ALERT_EMAIL).map(str::to_owned),
        };
        let create_registry = parse_flag(raw, keys::CREATE_ECR, defaults::CREATE_ECR)?;

        let config = Self {
            region,
            project,
            environment,
            account_id,
            image_uri,
            container_port,
            backend,
            profile,
            alerts,
            create_registry,
        };
        tracing::info!(
            region = %config.region,
            project = %config.project,
            environment = %config.environment,
            container_port = config.container_port,
            backend = config.backend.label(),
            alerts = config.alerts.enabled,
            "configuration resolved"
        );
        Ok(config)
    }

    /// Region
    #[inline]
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Project name
    #[inline]
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Environment name
    #[inline]
    #[must_use]
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Account id
    #[inline]
    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// `{project}-{environment}`, the prefix of every resource name
    #[must_use]
    pub fn prefix(&self) -> String {
        format!("{}-{}", self.project, self.environment)
    }

    /// Container image reference
    #[inline]
    #[must_use]
    pub fn image_uri(&self) -> &str {
        &self.image_uri
    }

    /// Container port
    #[inline]
    #[must_use]
    pub fn container_port(&self) -> u16 {
        self.container_port
    }

    /// State backend
    #[inline]
    #[must_use]
    pub fn backend(&self) -> &BackendMode {
        &self.backend
    }

    /// Credentials profile
    #[inline]
    #[must_use]
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Alerting settings
    #[inline]
    #[must_use]
    pub fn alerts(&self) -> &AlertSettings {
        &self.alerts
    }

    /// Whether the container registry is declared
    #[inline]
    #[must_use]
    pub fn create_registry(&self) -> bool {
        self.create_registry
    }

    /// Flat `parameter → value` view, keyed by the input names
    #[must_use]
    pub fn parameters(&self) -> BTreeMap<&'static str, ParamValue> {
        let mut params = BTreeMap::new();
        params.insert(keys::AWS_REGION, ParamValue::String(self.region.clone()));
        params.insert(keys::PROJECT_NAME, ParamValue::String(self.project.clone()));
        params.insert(keys::ENVIRONMENT, ParamValue::String(self.environment.clone()));
        params.insert(keys::AWS_ACCOUNT_ID, ParamValue::String(self.account_id.clone()));
        params.insert(keys::IMAGE_URI, ParamValue::String(self.image_uri.clone()));
        params.insert(
            keys::CONTAINER_PORT,
            ParamValue::Number(i64::from(self.container_port)),
        );
        params.insert(
            keys::TF_BACKEND,
            ParamValue::String(self.backend.label().to_owned()),
        );
        if let BackendMode::Remote {
            state_bucket,
            lock_table,
        } = &self.backend
        {
            params.insert(keys::TF_STATE_BUCKET, ParamValue::String(state_bucket.clone()));
            params.insert(keys::TF_LOCK_TABLE, ParamValue::String(lock_table.clone()));
        }
        if let Some(profile) = &self.profile {
            params.insert(keys::AWS_PROFILE, ParamValue::String(profile.clone()));
        }
        params.insert(keys::ALERTS_ENABLED, ParamValue::Bool(self.alerts.enabled));
        if let Some(recipient) = &self.alerts.recipient {
            params.insert(keys::ALERT_EMAIL, ParamValue::String(recipient.clone()));
        }
        params.insert(keys::CREATE_ECR, ParamValue::Bool(self.create_registry));
        params
    }
}

/// `{account}.dkr.ecr.{region}.amazonaws.com/{project}-{environment}:latest`
#[must_use]
pub fn default_image_uri(account_id: &str, region: &str, project: &str, environment: &str) -> String {
    format!("{account_id}.dkr.ecr.{region}.amazonaws.com/{project}-{environment}:latest")
}

fn text_or(raw: &RawInput, key: &'static str, default: &str) -> String {
    match raw.get(key) {
        Some(value) => value.to_owned(),
        None => {
            tracing::debug!(key, default, "using default");
            default.to_owned()
        }
    }
}

fn parse_port(raw: &RawInput) -> Result<u16, ConfigError> {
    let Some(value) = raw.get(keys::CONTAINER_PORT) else {
        return Ok(defaults::CONTAINER_PORT);
    };
    match value.parse::<u16>() {
        Ok(0) | Err(_) => Err(ConfigError::InvalidValue {
            key: keys::CONTAINER_PORT,
            value: value.to_owned(),
            reason: "expected a port number between 1 and 65535".into(),
        }),
        Ok(port) => Ok(port),
    }
}

fn parse_flag(raw: &RawInput, key: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = raw.get(key) else {
        return Ok(default);
    };
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_owned(),
            reason: "expected true/false, 1/0, yes/no or on/off".into(),
        }),
    }
}

fn resolve_backend(raw: &RawInput) -> Result<BackendMode, ConfigError> {
    let mode = raw.get(keys::TF_BACKEND).unwrap_or(defaults::BACKEND);
    match mode.to_ascii_lowercase().as_str() {
        "local" => {
            if raw.get(keys::TF_STATE_BUCKET).is_some() || raw.get(keys::TF_LOCK_TABLE).is_some() {
                tracing::debug!("local backend selected, ignoring state bucket and lock table");
            }
            Ok(BackendMode::Local)
        }
        "remote" => {
            let bucket = raw.get(keys::TF_STATE_BUCKET);
            let table = raw.get(keys::TF_LOCK_TABLE);
            match (bucket, table) {
                (Some(bucket), Some(table)) => Ok(BackendMode::Remote {
                    state_bucket: bucket.to_owned(),
                    lock_table: table.to_owned(),
                }),
                _ => {
                    let missing = [(keys::TF_STATE_BUCKET, bucket), (keys::TF_LOCK_TABLE, table)]
                        .into_iter()
                        .filter(|(_, value)| value.is_none())
                        .map(|(key, _)| key)
                        .collect();
                    Err(ConfigError::MissingRemoteBackendParameters { missing })
                }
            }
        }
        _ => Err(ConfigError::InvalidValue {
            key: keys::TF_BACKEND,
            value: mode.to_owned(),
            reason: "expected local or remote".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolve(pairs: &[(&str, &str)]) -> Result<Configuration, ConfigError> {
        Configuration::resolve(&pairs.iter().copied().collect())
    }

    #[test]
    fn test_defaults() {
        let config = resolve(&[]).unwrap();
        assert_eq!(config.region(), "us-west-2");
        assert_eq!(config.project(), "tv-devops");
        assert_eq!(config.environment(), "dev");
        assert_eq!(config.container_port(), 3000);
        assert_eq!(config.backend(), &BackendMode::Local);
        assert_eq!(
            config.image_uri(),
            "342573630114.dkr.ecr.us-west-2.amazonaws.com/tv-devops-dev:latest"
        );
        assert!(!config.alerts().enabled());
        assert!(config.create_registry());
        assert_eq!(config.profile(), None);
    }

    #[test]
    fn test_image_template_follows_overrides() {
        let config = resolve(&[
            ("AWS_ACCOUNT_ID", "111122223333"),
            ("AWS_REGION", "eu-central-1"),
            ("PROJECT_NAME", "shop"),
            ("ENVIRONMENT", "prod"),
        ])
        .unwrap();
        assert_eq!(
            config.image_uri(),
            "111122223333.dkr.ecr.eu-central-1.amazonaws.com/shop-prod:latest"
        );
        assert_eq!(config.prefix(), "shop-prod");
    }

    #[test]
    fn test_explicit_image_wins() {
        let config = resolve(&[("IMAGE_URI", "nginx:1.27")]).unwrap();
        assert_eq!(config.image_uri(), "nginx:1.27");
    }

    #[test]
    fn test_invalid_port() {
        for bad in ["abc", "0", "70000", "-1"] {
            let err = resolve(&[("CONTAINER_PORT", bad)]).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { key: "CONTAINER_PORT", .. }));
        }
    }

    #[test]
    fn test_remote_backend_requires_both() {
        let err = resolve(&[("TF_BACKEND", "remote"), ("TF_STATE_BUCKET", "b")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingRemoteBackendParameters {
                missing: vec!["TF_LOCK_TABLE"]
            }
        );

        let err = resolve(&[("TF_BACKEND", "remote")]).unwrap_err();
        assert_eq!(err.keys(), ["TF_STATE_BUCKET", "TF_LOCK_TABLE"]);
    }

    #[test]
    fn test_remote_backend_resolves() {
        let config = resolve(&[
            ("TF_BACKEND", "REMOTE"),
            ("TF_STATE_BUCKET", "tf-state"),
            ("TF_LOCK_TABLE", "tf-locks"),
        ])
        .unwrap();
        assert_eq!(
            config.backend(),
            &BackendMode::Remote {
                state_bucket: "tf-state".into(),
                lock_table: "tf-locks".into()
            }
        );
    }

    #[test]
    fn test_unknown_backend_mode() {
        let err = resolve(&[("TF_BACKEND", "s3")]).unwrap_err();
        assert_eq!(err.keys(), ["TF_BACKEND"]);
    }

    #[test]
    fn test_alert_recipient_kept_when_disabled() {
        let config = resolve(&[("ALERT_EMAIL", "ops@example.com")]).unwrap();
        assert!(!config.alerts().enabled());
        assert_eq!(config.alerts().recipient(), Some("ops@example.com"));
    }

    #[test]
    fn test_flag_spellings() {
        for yes in ["true", "TRUE", "1", "yes", "on"] {
            assert!(resolve(&[("ALERTS_ENABLED", yes)]).unwrap().alerts().enabled());
        }
        for no in ["false", "0", "No", "off"] {
            assert!(!resolve(&[("ALERTS_ENABLED", no)]).unwrap().alerts().enabled());
        }
        assert!(resolve(&[("ALERTS_ENABLED", "maybe")]).is_err());
    }

    #[test]
    fn test_parameters_flat_view() {
        let config = resolve(&[("CONTAINER_PORT", "8080"), ("ALERTS_ENABLED", "true")]).unwrap();
        let params = config.parameters();
        assert_eq!(params["CONTAINER_PORT"], ParamValue::Number(8080));
        assert_eq!(params["ALERTS_ENABLED"], ParamValue::Bool(true));
        assert_eq!(params["TF_BACKEND"], ParamValue::String("local".into()));
        assert!(!params.contains_key("TF_STATE_BUCKET"));
    }

    #[test]
    fn test_parameters_serialize_untagged() {
        let config = resolve(&[]).unwrap();
        let json = serde_json::to_value(config.parameters()).unwrap();
        assert_eq!(json["TF_BACKEND"], "local");
        assert_eq!(json["CONTAINER_PORT"], 3000);
        assert_eq!(json["CREATE_ECR"], true);
    }
}
