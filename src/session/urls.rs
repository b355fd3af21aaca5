/// Amazon Forecast 服务名（用于签名）
pub const FORECAST_SERVICE: &str = "forecast";

/// JSON 1.1 协议的 target 前缀
pub const TARGET_PREFIX: &str = "AmazonForecast";

pub const CONTENT_TYPE_JSON: &str = "application/x-amz-json-1.1";

pub const DEFAULT_REGION: &str = "us-east-1";

/// 区域 endpoint
pub fn url_endpoint(region: &str) -> String {
    format!("https://forecast.{}.amazonaws.com/", region)
}

/// `X-Amz-Target` 头
pub fn target(operation: &str) -> String {
    format!("{}.{}", TARGET_PREFIX, operation)
}

pub const OP_LIST_FORECASTS: &str = "ListForecasts";
pub const OP_DESCRIBE_FORECAST: &str = "DescribeForecast";
pub const OP_CREATE_FORECAST: &str = "CreateForecast";
pub const OP_LIST_FORECAST_EXPORT_JOBS: &str = "ListForecastExportJobs";
pub const OP_DESCRIBE_FORECAST_EXPORT_JOB: &str = "DescribeForecastExportJob";
pub const OP_CREATE_FORECAST_EXPORT_JOB: &str = "CreateForecastExportJob";
pub const OP_DESCRIBE_DATASET_GROUP: &str = "DescribeDatasetGroup";
pub const OP_DESCRIBE_DATASET: &str = "DescribeDataset";
