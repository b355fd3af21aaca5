use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 服务端时间戳为浮点秒（epoch seconds）
pub mod epoch_seconds {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let secs = dt.timestamp() as f64 + dt.timestamp_subsec_millis() as f64 / 1000.0;
        serializer.serialize_f64(secs)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        let millis = (secs * 1000.0).round() as i64;
        Utc.timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {}", secs)))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match dt {
                Some(dt) => super::serialize(dt, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            #[derive(Deserialize)]
            struct Wrapper(#[serde(with = "crate::session::dto::epoch_seconds")] DateTime<Utc>);

            let v = Option::<Wrapper>::deserialize(deserializer)?;
            Ok(v.map(|Wrapper(dt)| dt))
        }
    }
}

/// 列表接口的过滤条件 `{Key, Condition, Value}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Filter {
    pub key: String,
    pub condition: String,
    pub value: String,
}

impl Filter {
    pub fn is(key: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            condition: "IS".to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForecastSummary {
    pub forecast_arn: String,
    #[serde(default)]
    pub forecast_name: Option<String>,
    #[serde(default)]
    pub predictor_arn: Option<String>,
    #[serde(default)]
    pub dataset_group_arn: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, with = "epoch_seconds::option")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(with = "epoch_seconds")]
    pub last_modification_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListForecastsResponse {
    #[serde(default)]
    pub forecasts: Vec<ForecastSummary>,
    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeForecastResponse {
    pub forecast_arn: String,
    #[serde(default)]
    pub forecast_name: Option<String>,
    pub predictor_arn: String,
    #[serde(default)]
    pub dataset_group_arn: Option<String>,
    pub status: String,
    #[serde(default)]
    pub forecast_types: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(with = "epoch_seconds")]
    pub creation_time: DateTime<Utc>,
    #[serde(default, with = "epoch_seconds::option")]
    pub last_modification_time: Option<DateTime<Utc>>,
}

/// CreateForecast 请求体
///
/// 未知字段会被拒绝，用于校验透传的预测配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct CreateForecastRequest {
    pub forecast_name: String,
    pub predictor_arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_series_selector: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateForecastResponse {
    pub forecast_arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct S3Config {
    pub path: String,
    pub role_arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kms_key_arn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataDestination {
    pub s3_config: S3Config,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateForecastExportJobRequest {
    pub forecast_export_job_name: String,
    pub forecast_arn: String,
    pub destination: DataDestination,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateForecastExportJobResponse {
    pub forecast_export_job_arn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForecastExportJobSummary {
    pub forecast_export_job_arn: String,
    #[serde(default)]
    pub forecast_export_job_name: Option<String>,
    #[serde(default)]
    pub destination: Option<DataDestination>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(with = "epoch_seconds")]
    pub creation_time: DateTime<Utc>,
    #[serde(default, with = "epoch_seconds::option")]
    pub last_modification_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListForecastExportJobsResponse {
    #[serde(default)]
    pub forecast_export_jobs: Vec<ForecastExportJobSummary>,
    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeForecastExportJobResponse {
    pub forecast_export_job_arn: String,
    #[serde(default)]
    pub forecast_export_job_name: Option<String>,
    #[serde(default)]
    pub forecast_arn: Option<String>,
    #[serde(default)]
    pub destination: Option<DataDestination>,
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, with = "epoch_seconds::option")]
    pub creation_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeDatasetGroupResponse {
    pub dataset_group_arn: String,
    pub dataset_group_name: String,
    #[serde(default)]
    pub dataset_arns: Vec<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeDatasetResponse {
    pub dataset_arn: String,
    #[serde(default)]
    pub dataset_name: Option<String>,
    #[serde(default)]
    pub dataset_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, with = "epoch_seconds::option")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(with = "epoch_seconds")]
    pub last_modification_time: DateTime<Utc>,
}

/// 服务端错误响应体
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "__type", default)]
    pub error_type: Option<String>,
    #[serde(alias = "Message", default)]
    pub message: Option<String>,
}
