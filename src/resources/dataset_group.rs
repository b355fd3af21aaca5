use crate::session::{ForecastApi, ServiceError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use std::sync::Arc;

/// 数据集组内单个数据集的快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetInfo {
    pub arn: String,
    pub last_modification_time: DateTime<Utc>,
}

/// 上游 DatasetGroup 的能力
#[async_trait]
pub trait DatasetGroupSource: Send + Sync {
    fn arn(&self) -> &str;
    async fn name(&self) -> Result<String, ServiceError>;
    /// 最新数据的时间戳，参与 forecast / export 命名
    fn latest_timestamp(&self) -> &str;
    async fn datasets(&self) -> Result<Vec<DatasetInfo>, ServiceError>;
}

/// 内存中的数据集组（值已知）
#[derive(Debug, Clone)]
pub struct DatasetGroupSnapshot {
    pub arn: String,
    pub name: String,
    pub latest_timestamp: String,
    pub datasets: Vec<DatasetInfo>,
}

#[async_trait]
impl DatasetGroupSource for DatasetGroupSnapshot {
    fn arn(&self) -> &str {
        &self.arn
    }

    async fn name(&self) -> Result<String, ServiceError> {
        Ok(self.name.clone())
    }

    fn latest_timestamp(&self) -> &str {
        &self.latest_timestamp
    }

    async fn datasets(&self) -> Result<Vec<DatasetInfo>, ServiceError> {
        Ok(self.datasets.clone())
    }
}

/// 从服务端读取的数据集组，每次访问都重新查询
pub struct RemoteDatasetGroup {
    api: Arc<dyn ForecastApi>,
    arn: String,
    latest_timestamp: String,
}

impl RemoteDatasetGroup {
    pub fn new(api: Arc<dyn ForecastApi>, arn: String, latest_timestamp: String) -> Self {
        Self {
            api,
            arn,
            latest_timestamp,
        }
    }
}

#[async_trait]
impl DatasetGroupSource for RemoteDatasetGroup {
    fn arn(&self) -> &str {
        &self.arn
    }

    async fn name(&self) -> Result<String, ServiceError> {
        let group = self.api.describe_dataset_group(&self.arn).await?;
        Ok(group.dataset_group_name)
    }

    fn latest_timestamp(&self) -> &str {
        &self.latest_timestamp
    }

    async fn datasets(&self) -> Result<Vec<DatasetInfo>, ServiceError> {
        let group = self.api.describe_dataset_group(&self.arn).await?;
        let mut out = Vec::with_capacity(group.dataset_arns.len());
        for dataset_arn in &group.dataset_arns {
            let ds = self.api.describe_dataset(dataset_arn).await?;
            out.push(DatasetInfo {
                arn: ds.dataset_arn,
                last_modification_time: ds.last_modification_time,
            });
        }
        debug!(
            "dataset group {} has {} datasets",
            group.dataset_group_name,
            out.len()
        );
        Ok(out)
    }
}
