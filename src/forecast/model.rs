use crate::session::dto::{CreateForecastRequest, Tag};
use crate::session::ServiceError;
use crate::status::Status;
use serde_json::{Map, Value};

#[derive(thiserror::Error, Debug)]
pub enum ForecastError {
    #[error("Forecast does not yet exist - cannot perform export.")]
    NotCreated,
    #[error("no predictor available to generate forecast {0}")]
    NoPredictor(String),
    #[error("unknown status reported by service: {0}")]
    UnknownStatus(String),
    #[error("invalid forecast configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid forecast arn: {0}")]
    InvalidArn(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// 导出任务的状态快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Export {
    pub status: Status,
}

/// 构造 Forecast 时的设置
#[derive(Debug, Clone, Default)]
pub struct ForecastSettings {
    /// 透传给 CreateForecast 的其它参数（如 `ForecastTypes`）
    pub options: Map<String, Value>,
    /// 创建资源时附加的标签
    pub tags: Vec<Tag>,
    /// 导出任务写 S3 使用的角色
    pub export_role_arn: String,
}

const KEY_FORECAST_NAME: &str = "ForecastName";
const KEY_PREDICTOR_ARN: &str = "PredictorArn";
const KEY_TAGS: &str = "Tags";

const PLACEHOLDER_NAME: &str = "PLACEHOLDER";
const PLACEHOLDER_PREDICTOR: &str =
    "arn:aws:forecast:us-east-1:111111111111:predictor/PredictorName";

pub fn forecast_name(dataset_group_name: &str, latest_timestamp: &str) -> String {
    format!("forecast_{}_{}", dataset_group_name, latest_timestamp)
}

pub fn export_name(dataset_group_name: &str, latest_timestamp: &str) -> String {
    format!("export_{}_{}", dataset_group_name, latest_timestamp)
}

/// 组装 CreateForecast 请求，未知或类型错误的参数返回 `InvalidConfig`
pub fn build_create_request(
    forecast_name: &str,
    predictor_arn: &str,
    tags: &[Tag],
    options: &Map<String, Value>,
) -> Result<CreateForecastRequest, ForecastError> {
    for reserved in [KEY_FORECAST_NAME, KEY_PREDICTOR_ARN, KEY_TAGS] {
        if options.contains_key(reserved) {
            return Err(ForecastError::InvalidConfig(format!(
                "{} is set by the reconciler and cannot be configured",
                reserved
            )));
        }
    }

    let mut body = options.clone();
    body.insert(KEY_FORECAST_NAME.to_string(), Value::from(forecast_name));
    body.insert(KEY_PREDICTOR_ARN.to_string(), Value::from(predictor_arn));
    if !tags.is_empty() {
        let tags =
            serde_json::to_value(tags).map_err(|e| ForecastError::InvalidConfig(e.to_string()))?;
        body.insert(KEY_TAGS.to_string(), tags);
    }

    serde_json::from_value(Value::Object(body))
        .map_err(|e| ForecastError::InvalidConfig(e.to_string()))
}

/// 仅用于构造阶段的参数形状校验
pub fn validate_options(options: &Map<String, Value>) -> Result<(), ForecastError> {
    build_create_request(PLACEHOLDER_NAME, PLACEHOLDER_PREDICTOR, &[], options).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn opts(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn names_are_pure_functions_of_group_and_timestamp() {
        assert_eq!(
            forecast_name("sales", "2021-05-01T00:00:00Z"),
            "forecast_sales_2021-05-01T00:00:00Z"
        );
        assert_eq!(
            export_name("sales", "2021-05-01T00:00:00Z"),
            "export_sales_2021-05-01T00:00:00Z"
        );
        assert_eq!(forecast_name("a", "b"), forecast_name("a", "b"));
    }

    #[test]
    fn accepts_known_options() {
        let o = opts(json!({"ForecastTypes": ["0.10", "0.50", "0.90"]}));
        assert!(validate_options(&o).is_ok());

        let req = build_create_request(
            "f",
            "p",
            &[Tag {
                key: "SolutionId".to_string(),
                value: "SO0123".to_string(),
            }],
            &o,
        )
        .unwrap();
        assert_eq!(req.forecast_name, "f");
        assert_eq!(req.predictor_arn, "p");
        assert_eq!(req.forecast_types.unwrap().len(), 3);
        assert_eq!(req.tags[0].value, "SO0123");
    }

    #[test]
    fn rejects_unknown_or_mistyped_options() {
        assert!(matches!(
            validate_options(&opts(json!({"ForecastHorizon": 30}))),
            Err(ForecastError::InvalidConfig(_))
        ));
        assert!(matches!(
            validate_options(&opts(json!({"ForecastTypes": "0.5"}))),
            Err(ForecastError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_reserved_keys() {
        for key in ["ForecastName", "PredictorArn", "Tags"] {
            let mut o = Map::new();
            o.insert(key.to_string(), json!("x"));
            assert!(matches!(
                validate_options(&o),
                Err(ForecastError::InvalidConfig(m)) if m.contains(key)
            ));
        }
    }

    #[test]
    fn export_defaults_to_does_not_exist() {
        assert_eq!(Export::default().status, Status::DoesNotExist);
    }
}
