//! 运行配置，读取自环境变量（可由 `.env` 提供）。

use crate::forecast::ForecastSettings;
use crate::session::dto::Tag;
use crate::session::urls::DEFAULT_REGION;
use crate::session::Credentials;
use serde_json::{Map, Value};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing env {0}")]
    MissingEnv(&'static str),
    #[error("invalid env {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// 服务访问配置
#[derive(Debug, Clone)]
pub struct AwsConfig {
    pub region: String,
    pub credentials: Credentials,
    pub endpoint: Option<String>,
}

/// 一次协调所需的资源定位
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub dataset_group_arn: String,
    pub latest_timestamp: String,
    pub predictor_arn: Option<String>,
    pub dataset_bucket: String,
    pub dataset_key: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub aws: AwsConfig,
    pub pipeline: PipelineConfig,
    pub export_role_arn: Option<String>,
    pub solution_id: Option<String>,
    pub forecast_options: Map<String, Value>,
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl AppConfig {
    /// 先尝试加载 `.env`，再读取进程环境
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| non_empty(lookup(k));
        let require = |k: &'static str| get(k).ok_or(ConfigError::MissingEnv(k));

        let aws = AwsConfig {
            region: get("AWS_REGION")
                .or_else(|| get("AWS_DEFAULT_REGION"))
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            credentials: Credentials {
                access_key_id: require("AWS_ACCESS_KEY_ID")?,
                secret_access_key: require("AWS_SECRET_ACCESS_KEY")?,
                session_token: get("AWS_SESSION_TOKEN"),
            },
            endpoint: get("FORECAST_ENDPOINT"),
        };

        let pipeline = PipelineConfig {
            dataset_group_arn: require("DATASET_GROUP_ARN")?,
            latest_timestamp: require("DATASET_LATEST_TIMESTAMP")?,
            predictor_arn: get("PREDICTOR_ARN"),
            dataset_bucket: require("DATASET_BUCKET")?,
            dataset_key: require("DATASET_KEY")?,
        };

        let forecast_options = match get("FORECAST_CONFIG") {
            Some(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Object(m)) => m,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        name: "FORECAST_CONFIG",
                        reason: "expected a JSON object".to_string(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        name: "FORECAST_CONFIG",
                        reason: e.to_string(),
                    })
                }
            },
            None => Map::new(),
        };

        Ok(Self {
            aws,
            pipeline,
            export_role_arn: get("FORECAST_ROLE"),
            solution_id: get("SOLUTION_ID"),
            forecast_options,
        })
    }

    /// 创建资源时附加的标签
    pub fn tags(&self) -> Vec<Tag> {
        self.solution_id
            .iter()
            .map(|id| Tag {
                key: "SolutionId".to_string(),
                value: id.clone(),
            })
            .collect()
    }

    pub fn forecast_settings(&self) -> ForecastSettings {
        ForecastSettings {
            options: self.forecast_options.clone(),
            tags: self.tags(),
            export_role_arn: self.export_role_arn.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn base() -> HashMap<String, String> {
        env(&[
            ("AWS_ACCESS_KEY_ID", "AKID"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
            ("DATASET_GROUP_ARN", "arn:aws:forecast:us-east-1:123456789012:dataset-group/sales"),
            ("DATASET_LATEST_TIMESTAMP", "2021-05-01T00:00:00Z"),
            ("DATASET_BUCKET", "data-bucket"),
            ("DATASET_KEY", "train/sales.csv"),
        ])
    }

    #[test]
    fn defaults_apply() {
        let vars = base();
        let cfg = AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(cfg.aws.region, "us-east-1");
        assert_eq!(cfg.aws.endpoint, None);
        assert_eq!(cfg.pipeline.predictor_arn, None);
        assert!(cfg.tags().is_empty());
        assert!(cfg.forecast_options.is_empty());
        assert_eq!(cfg.forecast_settings().export_role_arn, "");
    }

    #[test]
    fn reads_optional_values() {
        let mut vars = base();
        vars.extend(env(&[
            ("AWS_REGION", "eu-west-1"),
            ("FORECAST_ROLE", "arn:aws:iam::123456789012:role/ForecastRole"),
            ("SOLUTION_ID", "SO0123"),
            ("FORECAST_CONFIG", r#"{"ForecastTypes": ["0.5"]}"#),
            ("AWS_SESSION_TOKEN", "  "),
        ]));
        let cfg = AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(cfg.aws.region, "eu-west-1");
        assert_eq!(cfg.aws.credentials.session_token, None);
        assert_eq!(cfg.tags()[0].value, "SO0123");

        let settings = cfg.forecast_settings();
        assert!(settings.options.contains_key("ForecastTypes"));
        assert_eq!(
            settings.export_role_arn,
            "arn:aws:iam::123456789012:role/ForecastRole"
        );
    }

    #[test]
    fn missing_required_value() {
        let mut vars = base();
        vars.remove("DATASET_BUCKET");
        let r = AppConfig::from_lookup(|k| vars.get(k).cloned());
        assert!(matches!(r, Err(ConfigError::MissingEnv("DATASET_BUCKET"))));
    }

    #[test]
    fn forecast_config_must_be_an_object() {
        let mut vars = base();
        vars.insert("FORECAST_CONFIG".to_string(), "[1,2]".to_string());
        let r = AppConfig::from_lookup(|k| vars.get(k).cloned());
        assert!(matches!(
            r,
            Err(ConfigError::Invalid {
                name: "FORECAST_CONFIG",
                ..
            })
        ));
    }
}
