use crate::session::dto::*;
use crate::session::error::ServiceError;
use async_trait::async_trait;

/// Amazon Forecast 服务能力
///
/// 协调器只依赖该 trait，生产环境使用 `ForecastSession`，测试中可替换为内存实现。
#[async_trait]
pub trait ForecastApi: Send + Sync {
    async fn list_forecasts(
        &self,
        filters: &[Filter],
        next_token: Option<String>,
    ) -> Result<ListForecastsResponse, ServiceError>;

    async fn describe_forecast(
        &self,
        forecast_arn: &str,
    ) -> Result<DescribeForecastResponse, ServiceError>;

    async fn create_forecast(&self, req: &CreateForecastRequest) -> Result<String, ServiceError>;

    async fn list_forecast_export_jobs(
        &self,
        filters: &[Filter],
        next_token: Option<String>,
    ) -> Result<ListForecastExportJobsResponse, ServiceError>;

    async fn describe_forecast_export_job(
        &self,
        export_job_arn: &str,
    ) -> Result<DescribeForecastExportJobResponse, ServiceError>;

    async fn create_forecast_export_job(
        &self,
        req: &CreateForecastExportJobRequest,
    ) -> Result<String, ServiceError>;

    async fn describe_dataset_group(
        &self,
        dataset_group_arn: &str,
    ) -> Result<DescribeDatasetGroupResponse, ServiceError>;

    async fn describe_dataset(
        &self,
        dataset_arn: &str,
    ) -> Result<DescribeDatasetResponse, ServiceError>;
}
