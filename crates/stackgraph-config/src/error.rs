//! Configuration errors

/// Raised while resolving raw input, before any declaration exists
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Remote backend selected without its companion parameters
    #[error("TF_BACKEND=remote requires {}", .missing.join(" and "))]
    MissingRemoteBackendParameters {
        /// Every missing key, in a stable order
        missing: Vec<&'static str>,
    },

    /// A value could not be interpreted
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Parameter name
        key: &'static str,
        /// Raw value as given
        value: String,
        /// What was expected
        reason: String,
    },
}

impl ConfigError {
    /// Parameter names the error is about
    #[must_use]
    pub fn keys(&self) -> Vec<&'static str> {
        match self {
            Self::MissingRemoteBackendParameters { missing } => missing.clone(),
            Self::InvalidValue { key, .. } => vec![*key],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameters_message_names_both() {
        let err = ConfigError::MissingRemoteBackendParameters {
            missing: vec!["TF_STATE_BUCKET", "TF_LOCK_TABLE"],
        };
        assert_eq!(
            err.to_string(),
            "TF_BACKEND=remote requires TF_STATE_BUCKET and TF_LOCK_TABLE"
        );
        assert_eq!(err.keys(), ["TF_STATE_BUCKET", "TF_LOCK_TABLE"]);
    }
}
