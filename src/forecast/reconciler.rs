use crate::forecast::arn::ForecastArn;
use crate::forecast::model::{
    build_create_request, export_name, forecast_name, validate_options, Export, ForecastError,
    ForecastSettings,
};
use crate::resources::{DatasetFile, DatasetGroupSource, PredictorSource};
use crate::session::dto::{
    CreateForecastExportJobRequest, DataDestination, Filter, ForecastExportJobSummary,
    ForecastSummary, S3Config,
};
use crate::session::{ForecastApi, ServiceError};
use crate::status::{ParsedStatus, Status};
use log::{debug, info, warn};
use std::sync::Arc;

/// create() 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// 本次发出了创建请求
    Requested,
    /// 同名 forecast 已存在，未重新创建
    AlreadyExists,
    /// 同名 forecast 正在创建或更新
    InUse,
}

/// 一次协调的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub forecast: Status,
    pub export: Option<Export>,
}

/// Forecast - 期望状态描述
///
/// 绑定一个 Predictor 和一个 DatasetGroup。所有查询都直接访问服务端，不做缓存。
pub struct Forecast {
    api: Arc<dyn ForecastApi>,
    predictor: Arc<dyn PredictorSource>,
    dataset_group: Arc<dyn DatasetGroupSource>,
    settings: ForecastSettings,
}

impl Forecast {
    pub fn new(
        api: Arc<dyn ForecastApi>,
        predictor: Arc<dyn PredictorSource>,
        dataset_group: Arc<dyn DatasetGroupSource>,
        settings: ForecastSettings,
    ) -> Result<Self, ForecastError> {
        validate_options(&settings.options)?;
        Ok(Self {
            api,
            predictor,
            dataset_group,
            settings,
        })
    }

    /// 该数据集组下的历史 forecast，按最后修改时间倒序
    pub async fn history(&self) -> Result<Vec<ForecastSummary>, ForecastError> {
        let filters = [Filter::is("DatasetGroupArn", self.dataset_group.arn())];

        let mut past_forecasts = Vec::new();
        let mut next_token = None;
        loop {
            let page = self.api.list_forecasts(&filters, next_token).await?;
            past_forecasts.extend(page.forecasts);
            next_token = page.next_token;
            if next_token.is_none() {
                break;
            }
        }

        past_forecasts.sort_by(|a, b| b.last_modification_time.cmp(&a.last_modification_time));
        Ok(past_forecasts)
    }

    /// 最近一次 forecast 的 ARN
    pub async fn arn(&self) -> Result<Option<String>, ForecastError> {
        let past_forecasts = self.history().await?;
        Ok(past_forecasts.into_iter().next().map(|f| f.forecast_arn))
    }

    /// 当前 forecast 的状态
    ///
    /// 最近一次 forecast 由其它 predictor 生成，或数据集在其创建之后有更新时，视为 `DoesNotExist`。
    pub async fn status(&self) -> Result<Status, ForecastError> {
        let past_forecasts = self.history().await?;
        let Some(latest) = past_forecasts.first() else {
            debug!("No past forecasts found");
            return Ok(Status::DoesNotExist);
        };

        let past_status = self.api.describe_forecast(&latest.forecast_arn).await?;

        let predictor_arn = self.predictor.arn().await?;
        if predictor_arn.as_deref() != Some(past_status.predictor_arn.as_str()) {
            debug!("Most recent forecast was generated with a different predictor, a new forecast should be created");
            return Ok(Status::DoesNotExist);
        }

        for dataset in self.dataset_group.datasets().await? {
            if dataset.last_modification_time > past_status.creation_time {
                debug!("Datasets have changed since last forecast generation, a new forecast should be created");
                return Ok(Status::DoesNotExist);
            }
        }

        known_status(&past_status.status)
    }

    async fn names(&self) -> Result<(String, String), ForecastError> {
        let group_name = self.dataset_group.name().await?;
        let ts = self.dataset_group.latest_timestamp();
        Ok((forecast_name(&group_name, ts), export_name(&group_name, ts)))
    }

    /// 请求创建 forecast；已存在或正在更新都不视为错误
    pub async fn create(&self) -> Result<CreateOutcome, ForecastError> {
        let (forecast_name, _) = self.names().await?;
        let predictor_arn = self
            .predictor
            .arn()
            .await?
            .ok_or_else(|| ForecastError::NoPredictor(forecast_name.clone()))?;
        let req = build_create_request(
            &forecast_name,
            &predictor_arn,
            &self.settings.tags,
            &self.settings.options,
        )?;

        info!("Creating forecast {}", forecast_name);
        match self.api.create_forecast(&req).await {
            Ok(arn) => {
                debug!("Forecast {} requested: {}", forecast_name, arn);
                Ok(CreateOutcome::Requested)
            }
            Err(ServiceError::ResourceAlreadyExists(_)) => {
                debug!("Forecast {} is already creating", forecast_name);
                Ok(CreateOutcome::AlreadyExists)
            }
            Err(ServiceError::ResourceInUse(msg)) => {
                debug!("Forecast {} is updating: {}", forecast_name, msg);
                Ok(CreateOutcome::InUse)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 当前 forecast 的导出任务历史，按创建时间倒序
    pub async fn export_history(
        &self,
        status: &str,
    ) -> Result<Vec<ForecastExportJobSummary>, ForecastError> {
        let Some(arn) = self.arn().await? else {
            return Ok(Vec::new());
        };
        let filters = [Filter::is("ForecastArn", arn), Filter::is("Status", status)];

        let mut past_exports = Vec::new();
        let mut next_token = None;
        loop {
            let page = self
                .api
                .list_forecast_export_jobs(&filters, next_token)
                .await?;
            past_exports.extend(page.forecast_export_jobs);
            next_token = page.next_token;
            if next_token.is_none() {
                break;
            }
        }

        past_exports.sort_by(|a, b| b.creation_time.cmp(&a.creation_time));
        debug!("there are {} exports", past_exports.len());
        Ok(past_exports)
    }

    /// 默认只看已完成（ACTIVE）的导出
    pub async fn active_exports(&self) -> Result<Vec<ForecastExportJobSummary>, ForecastError> {
        self.export_history(Status::Active.as_str()).await
    }

    /// 检查导出任务，不存在时请求创建
    pub async fn export(&self, dataset_file: &DatasetFile) -> Result<Export, ForecastError> {
        let arn = self.arn().await?.ok_or(ForecastError::NotCreated)?;
        let forecast_arn: ForecastArn = arn.parse()?;
        let (_, export_name) = self.names().await?;

        let mut past_export = Export::default();
        match self
            .api
            .describe_forecast_export_job(&forecast_arn.export_job_arn(&export_name))
            .await
        {
            Ok(job) => past_export.status = known_status(&job.status)?,
            Err(ServiceError::ResourceInUse(msg)) => {
                // status stays DoesNotExist while the job is updating
                debug!("Forecast export {} is updating: {}", export_name, msg);
            }
            Err(ServiceError::ResourceNotFound(_)) => {
                info!("Creating forecast export {}", export_name);
                let req = CreateForecastExportJobRequest {
                    forecast_export_job_name: export_name.clone(),
                    forecast_arn: arn,
                    destination: DataDestination {
                        s3_config: S3Config {
                            path: format!("s3://{}/exports/{}", dataset_file.bucket, export_name),
                            role_arn: self.settings.export_role_arn.clone(),
                            kms_key_arn: None,
                        },
                    },
                    tags: Vec::new(),
                };
                self.api.create_forecast_export_job(&req).await?;
                past_export.status = Status::CreatePending;
            }
            Err(e) => return Err(e.into()),
        }

        debug!("Export status for {} is {}", export_name, past_export.status);
        Ok(past_export)
    }

    /// 一次完整的协调：forecast 缺失或过期时请求创建，ACTIVE 时继续检查导出
    pub async fn reconcile(
        &self,
        dataset_file: &DatasetFile,
    ) -> Result<ReconcileReport, ForecastError> {
        let status = self.status().await?;
        match status {
            Status::DoesNotExist => {
                let forecast = match self.create().await? {
                    CreateOutcome::Requested => Status::CreatePending,
                    CreateOutcome::AlreadyExists | CreateOutcome::InUse => {
                        warn!("Forecast is stale but its name is taken, nothing was requested");
                        Status::DoesNotExist
                    }
                };
                Ok(ReconcileReport {
                    forecast,
                    export: None,
                })
            }
            Status::Active => {
                let export = self.export(dataset_file).await?;
                Ok(ReconcileReport {
                    forecast: status,
                    export: Some(export),
                })
            }
            other => {
                if other.is_failed() {
                    warn!("Forecast is in a failed state: {}", other);
                } else if other.is_updating() {
                    info!("Forecast is still being processed: {}", other);
                }
                Ok(ReconcileReport {
                    forecast: other,
                    export: None,
                })
            }
        }
    }
}

fn known_status(raw: &str) -> Result<Status, ForecastError> {
    match Status::parse(raw) {
        ParsedStatus::Known(s) => Ok(s),
        ParsedStatus::Unknown(raw) => Err(ForecastError::UnknownStatus(raw)),
    }
}
