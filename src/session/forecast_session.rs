use super::api::ForecastApi;
use super::dto::*;
use super::error::ServiceError;
use super::signing::{Credentials, SigV4Signer};
use super::urls::*;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Forecast Session - Amazon Forecast 服务的会话
///
/// 每次调用都是一次签名后的 JSON 1.1 POST 请求；不做重试，超时由 HTTP 客户端控制。
pub struct ForecastSession {
    client: Client,
    endpoint: String,
    host: String,
    path: String,
    region: String,
    credentials: Credentials,
}

impl ForecastSession {
    /// 创建一个新的 ForecastSession
    ///
    /// # 参数
    ///
    /// * `region` - 服务区域，如 `us-east-1`
    /// * `credentials` - 访问凭证
    /// * `endpoint` - 可选的 endpoint 覆盖（本地模拟服务等）
    pub fn new(
        region: String,
        credentials: Credentials,
        endpoint: Option<String>,
    ) -> Result<Self, ServiceError> {
        let endpoint = endpoint.unwrap_or_else(|| url_endpoint(&region));
        let invalid = || ServiceError::InvalidInput(format!("invalid endpoint: {}", endpoint));
        let url = reqwest::Url::parse(&endpoint).map_err(|_| invalid())?;
        let host = url
            .host_str()
            .map(|h| match url.port() {
                Some(p) => format!("{}:{}", h, p),
                None => h.to_string(),
            })
            .ok_or_else(invalid)?;
        // 签名的 canonical URI 必须与实际请求路径一致
        let path = url.path().to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("rustforecast/0.1")
            .build()?;

        Ok(Self {
            client,
            endpoint,
            host,
            path,
            region,
            credentials,
        })
    }

    /// 执行一次 Forecast API 调用
    async fn call<Req, Resp>(&self, operation: &str, req: &Req) -> Result<Resp, ServiceError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let body = serde_json::to_vec(req).map_err(|e| ServiceError::Decode(e.to_string()))?;
        let target = target(operation);

        let signer = SigV4Signer {
            credentials: &self.credentials,
            region: &self.region,
            service: FORECAST_SERVICE,
        };
        let signed = signer.sign(
            "POST",
            &self.host,
            &self.path,
            &[("content-type", CONTENT_TYPE_JSON), ("x-amz-target", &target)],
            &body,
            chrono::Utc::now(),
        );

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", CONTENT_TYPE_JSON)
            .header("X-Amz-Target", &target)
            .header("X-Amz-Date", &signed.amz_date)
            .header("Authorization", &signed.authorization);
        if let Some(token) = &self.credentials.session_token {
            request = request.header("X-Amz-Security-Token", token);
        }

        let resp = request.body(body).send().await?;
        let status = resp.status();
        let raw = resp.text().await?;
        info!("{} {}(...) [{}]", self, operation, status.as_u16());

        if !status.is_success() {
            let err: ErrorBody = serde_json::from_str(&raw).map_err(|e| {
                ServiceError::Decode(format!("{} {}: {}, raw={}", operation, status, e, raw))
            })?;
            let message = err.message.unwrap_or_default();
            return Err(match err.error_type {
                Some(t) => ServiceError::from_error_type(&t, message),
                None => ServiceError::Api {
                    code: status.as_u16().to_string(),
                    message,
                },
            });
        }

        debug!("{} {} response: {}", self, operation, raw);
        let raw = if raw.trim().is_empty() { "{}" } else { raw.as_str() };
        serde_json::from_str(raw)
            .map_err(|e| ServiceError::Decode(format!("{}: {}, raw={}", operation, e, raw)))
    }
}

#[async_trait]
impl ForecastApi for ForecastSession {
    async fn list_forecasts(
        &self,
        filters: &[Filter],
        next_token: Option<String>,
    ) -> Result<ListForecastsResponse, ServiceError> {
        let req = ListRequest {
            filters: filters.to_vec(),
            next_token,
            max_results: None,
        };
        self.call(OP_LIST_FORECASTS, &req).await
    }

    async fn describe_forecast(
        &self,
        forecast_arn: &str,
    ) -> Result<DescribeForecastResponse, ServiceError> {
        let req = serde_json::json!({ "ForecastArn": forecast_arn });
        self.call(OP_DESCRIBE_FORECAST, &req).await
    }

    async fn create_forecast(&self, req: &CreateForecastRequest) -> Result<String, ServiceError> {
        let resp: CreateForecastResponse = self.call(OP_CREATE_FORECAST, req).await?;
        Ok(resp.forecast_arn)
    }

    async fn list_forecast_export_jobs(
        &self,
        filters: &[Filter],
        next_token: Option<String>,
    ) -> Result<ListForecastExportJobsResponse, ServiceError> {
        let req = ListRequest {
            filters: filters.to_vec(),
            next_token,
            max_results: None,
        };
        self.call(OP_LIST_FORECAST_EXPORT_JOBS, &req).await
    }

    async fn describe_forecast_export_job(
        &self,
        export_job_arn: &str,
    ) -> Result<DescribeForecastExportJobResponse, ServiceError> {
        let req = serde_json::json!({ "ForecastExportJobArn": export_job_arn });
        self.call(OP_DESCRIBE_FORECAST_EXPORT_JOB, &req).await
    }

    async fn create_forecast_export_job(
        &self,
        req: &CreateForecastExportJobRequest,
    ) -> Result<String, ServiceError> {
        let resp: CreateForecastExportJobResponse =
            self.call(OP_CREATE_FORECAST_EXPORT_JOB, req).await?;
        Ok(resp.forecast_export_job_arn)
    }

    async fn describe_dataset_group(
        &self,
        dataset_group_arn: &str,
    ) -> Result<DescribeDatasetGroupResponse, ServiceError> {
        let req = serde_json::json!({ "DatasetGroupArn": dataset_group_arn });
        self.call(OP_DESCRIBE_DATASET_GROUP, &req).await
    }

    async fn describe_dataset(
        &self,
        dataset_arn: &str,
    ) -> Result<DescribeDatasetResponse, ServiceError> {
        let req = serde_json::json!({ "DatasetArn": dataset_arn });
        self.call(OP_DESCRIBE_DATASET, &req).await
    }
}

impl std::fmt::Display for ForecastSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<ForecastSession [{}]>", self.region)
    }
}

impl std::fmt::Debug for ForecastSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<ForecastSession [{}]>", self.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials {
            access_key_id: "AKID".to_string(),
            secret_access_key: "secret".to_string(),
            session_token: None,
        }
    }

    #[test]
    fn default_endpoint_follows_region() {
        let s = ForecastSession::new("eu-west-1".to_string(), creds(), None).unwrap();
        assert_eq!(s.endpoint, "https://forecast.eu-west-1.amazonaws.com/");
        assert_eq!(s.host, "forecast.eu-west-1.amazonaws.com");
        assert_eq!(s.path, "/");
        assert_eq!(s.to_string(), "<ForecastSession [eu-west-1]>");
    }

    #[test]
    fn endpoint_override_keeps_port_in_host() {
        let s = ForecastSession::new(
            "us-east-1".to_string(),
            creds(),
            Some("http://localhost:4566/".to_string()),
        )
        .unwrap();
        assert_eq!(s.host, "localhost:4566");
        assert_eq!(s.path, "/");
    }

    #[test]
    fn endpoint_path_is_signed_as_canonical_uri() {
        let s = ForecastSession::new(
            "us-east-1".to_string(),
            creds(),
            Some("http://localhost:4566/forecast/".to_string()),
        )
        .unwrap();
        assert_eq!(s.host, "localhost:4566");
        assert_eq!(s.path, "/forecast/");
    }

    #[test]
    fn rejects_unparseable_endpoint() {
        let r = ForecastSession::new("us-east-1".to_string(), creds(), Some("not a url".to_string()));
        assert!(matches!(r, Err(ServiceError::InvalidInput(_))));
    }
}
