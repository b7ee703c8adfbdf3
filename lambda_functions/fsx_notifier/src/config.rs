use std::env;

use crate::error::NotifierError;

pub const TOPIC_ARN_VAR: &str = "TOPIC_ARN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    pub topic_arn: String,
}

impl NotifierConfig {
    pub fn from_env() -> Result<Self, NotifierError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, NotifierError> {
        let topic_arn = lookup(TOPIC_ARN_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| NotifierError::EnvVar(TOPIC_ARN_VAR.to_string()))?;

        Ok(Self { topic_arn })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_topic_arn() {
        let config = NotifierConfig::from_lookup(|key| {
            (key == TOPIC_ARN_VAR).then(|| "arn:aws:sns:us-east-1:123456789012:fsx-created".to_string())
        })
        .unwrap();

        assert_eq!(config.topic_arn, "arn:aws:sns:us-east-1:123456789012:fsx-created");
    }

    #[test]
    fn missing_topic_arn_is_an_error() {
        let err = NotifierConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, NotifierError::EnvVar(ref name) if name == TOPIC_ARN_VAR));
        assert_eq!(err.to_string(), "Environment variable not found: TOPIC_ARN");
    }

    #[test]
    fn blank_topic_arn_is_an_error() {
        let err = NotifierConfig::from_lookup(|_| Some("   ".to_string())).unwrap_err();
        assert!(matches!(err, NotifierError::EnvVar(_)));
    }
}
