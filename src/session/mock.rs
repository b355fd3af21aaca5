use super::api::ForecastApi;
use super::dto::*;
use super::error::ServiceError;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// 预设的失败类型（ServiceError 不可 Clone）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fail {
    AlreadyExists,
    InUse,
    NotFound,
    InvalidInput,
    Internal,
}

impl Fail {
    fn to_error(self, what: &str) -> ServiceError {
        match self {
            Fail::AlreadyExists => ServiceError::ResourceAlreadyExists(what.to_string()),
            Fail::InUse => ServiceError::ResourceInUse(what.to_string()),
            Fail::NotFound => ServiceError::ResourceNotFound(what.to_string()),
            Fail::InvalidInput => ServiceError::InvalidInput(what.to_string()),
            Fail::Internal => ServiceError::Api {
                code: "InternalServerException".to_string(),
                message: what.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListForecasts(Vec<Filter>, Option<String>),
    DescribeForecast(String),
    CreateForecast(CreateForecastRequest),
    ListForecastExportJobs(Vec<Filter>, Option<String>),
    DescribeForecastExportJob(String),
    CreateForecastExportJob(CreateForecastExportJobRequest),
    DescribeDatasetGroup(String),
    DescribeDataset(String),
}

#[derive(Default)]
pub struct MockState {
    pub forecast_pages: Vec<Vec<ForecastSummary>>,
    pub forecasts: HashMap<String, DescribeForecastResponse>,
    pub create_forecast_failures: VecDeque<Fail>,
    pub export_pages: Vec<Vec<ForecastExportJobSummary>>,
    pub export_jobs: HashMap<String, DescribeForecastExportJobResponse>,
    pub describe_export_failure: Option<Fail>,
    pub create_export_failure: Option<Fail>,
    pub dataset_groups: HashMap<String, DescribeDatasetGroupResponse>,
    pub datasets: HashMap<String, DescribeDatasetResponse>,
    pub calls: Vec<Call>,
}

/// 内存版 Forecast 服务，记录所有调用
#[derive(Default)]
pub struct MockForecastService {
    pub state: Mutex<MockState>,
}

impl MockForecastService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F: FnOnce(&mut MockState)>(self, f: F) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn created_forecasts(&self) -> Vec<CreateForecastRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateForecast(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn created_exports(&self) -> Vec<CreateForecastExportJobRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateForecastExportJob(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    fn page<T: Clone>(pages: &[Vec<T>], next_token: &Option<String>) -> (Vec<T>, Option<String>) {
        let idx = next_token
            .as_deref()
            .and_then(|t| t.parse::<usize>().ok())
            .unwrap_or(0);
        let items = pages.get(idx).cloned().unwrap_or_default();
        let next = if idx + 1 < pages.len() {
            Some((idx + 1).to_string())
        } else {
            None
        };
        (items, next)
    }
}

#[async_trait]
impl ForecastApi for MockForecastService {
    async fn list_forecasts(
        &self,
        filters: &[Filter],
        next_token: Option<String>,
    ) -> Result<ListForecastsResponse, ServiceError> {
        let mut st = self.state.lock().unwrap();
        st.calls
            .push(Call::ListForecasts(filters.to_vec(), next_token.clone()));
        let (forecasts, next_token) = Self::page(&st.forecast_pages, &next_token);
        Ok(ListForecastsResponse {
            forecasts,
            next_token,
        })
    }

    async fn describe_forecast(
        &self,
        forecast_arn: &str,
    ) -> Result<DescribeForecastResponse, ServiceError> {
        let mut st = self.state.lock().unwrap();
        st.calls.push(Call::DescribeForecast(forecast_arn.to_string()));
        st.forecasts
            .get(forecast_arn)
            .cloned()
            .ok_or_else(|| Fail::NotFound.to_error(forecast_arn))
    }

    async fn create_forecast(&self, req: &CreateForecastRequest) -> Result<String, ServiceError> {
        let mut st = self.state.lock().unwrap();
        st.calls.push(Call::CreateForecast(req.clone()));
        if let Some(fail) = st.create_forecast_failures.pop_front() {
            return Err(fail.to_error(&req.forecast_name));
        }
        Ok(format!(
            "arn:aws:forecast:us-east-1:123456789012:forecast/{}",
            req.forecast_name
        ))
    }

    async fn list_forecast_export_jobs(
        &self,
        filters: &[Filter],
        next_token: Option<String>,
    ) -> Result<ListForecastExportJobsResponse, ServiceError> {
        let mut st = self.state.lock().unwrap();
        st.calls.push(Call::ListForecastExportJobs(
            filters.to_vec(),
            next_token.clone(),
        ));
        let (forecast_export_jobs, next_token) = Self::page(&st.export_pages, &next_token);
        Ok(ListForecastExportJobsResponse {
            forecast_export_jobs,
            next_token,
        })
    }

    async fn describe_forecast_export_job(
        &self,
        export_job_arn: &str,
    ) -> Result<DescribeForecastExportJobResponse, ServiceError> {
        let mut st = self.state.lock().unwrap();
        st.calls
            .push(Call::DescribeForecastExportJob(export_job_arn.to_string()));
        if let Some(fail) = st.describe_export_failure {
            return Err(fail.to_error(export_job_arn));
        }
        st.export_jobs
            .get(export_job_arn)
            .cloned()
            .ok_or_else(|| Fail::NotFound.to_error(export_job_arn))
    }

    async fn create_forecast_export_job(
        &self,
        req: &CreateForecastExportJobRequest,
    ) -> Result<String, ServiceError> {
        let mut st = self.state.lock().unwrap();
        st.calls.push(Call::CreateForecastExportJob(req.clone()));
        if let Some(fail) = st.create_export_failure {
            return Err(fail.to_error(&req.forecast_export_job_name));
        }
        Ok(format!("{}/{}", req.forecast_arn, req.forecast_export_job_name))
    }

    async fn describe_dataset_group(
        &self,
        dataset_group_arn: &str,
    ) -> Result<DescribeDatasetGroupResponse, ServiceError> {
        let mut st = self.state.lock().unwrap();
        st.calls
            .push(Call::DescribeDatasetGroup(dataset_group_arn.to_string()));
        st.dataset_groups
            .get(dataset_group_arn)
            .cloned()
            .ok_or_else(|| Fail::NotFound.to_error(dataset_group_arn))
    }

    async fn describe_dataset(
        &self,
        dataset_arn: &str,
    ) -> Result<DescribeDatasetResponse, ServiceError> {
        let mut st = self.state.lock().unwrap();
        st.calls.push(Call::DescribeDataset(dataset_arn.to_string()));
        st.datasets
            .get(dataset_arn)
            .cloned()
            .ok_or_else(|| Fail::NotFound.to_error(dataset_arn))
    }
}
