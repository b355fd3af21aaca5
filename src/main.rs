use anyhow::Context;
use log::{info, warn};
use rustforecast::config::AppConfig;
use rustforecast::resources::{DatasetFile, RemoteDatasetGroup, StaticPredictor};
use rustforecast::session::{ForecastApi, ForecastSession};
use rustforecast::Forecast;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("rustforecast", log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cfg = AppConfig::from_env().context("读取配置失败")?;
    if cfg.export_role_arn.is_none() {
        warn!("FORECAST_ROLE 未设置，导出任务将无法创建");
    }

    let session = ForecastSession::new(
        cfg.aws.region.clone(),
        cfg.aws.credentials.clone(),
        cfg.aws.endpoint.clone(),
    )
    .context("创建 ForecastSession 失败")?;
    info!("✓ Session 创建成功: {}", session);
    let api: Arc<dyn ForecastApi> = Arc::new(session);

    let predictor = match &cfg.pipeline.predictor_arn {
        Some(arn) => StaticPredictor::new(arn.clone()),
        None => StaticPredictor::missing(),
    };
    let dataset_group = RemoteDatasetGroup::new(
        api.clone(),
        cfg.pipeline.dataset_group_arn.clone(),
        cfg.pipeline.latest_timestamp.clone(),
    );
    let dataset_file = DatasetFile::new(
        cfg.pipeline.dataset_bucket.clone(),
        cfg.pipeline.dataset_key.clone(),
    );
    info!("数据文件: {}", dataset_file.s3_url());

    let forecast = Forecast::new(
        api,
        Arc::new(predictor),
        Arc::new(dataset_group),
        cfg.forecast_settings(),
    )?;

    let report = forecast.reconcile(&dataset_file).await?;
    println!("forecast: {}", report.forecast);
    match report.export {
        Some(export) => println!("export: {}", export.status),
        None => println!("export: (waiting for forecast)"),
    }
    Ok(())
}
