use crate::session::ServiceError;
use async_trait::async_trait;

/// 上游 Predictor 的能力：提供当前应使用的 predictor ARN
#[async_trait]
pub trait PredictorSource: Send + Sync {
    async fn arn(&self) -> Result<Option<String>, ServiceError>;
}

/// 固定 ARN 的 Predictor
#[derive(Debug, Clone, Default)]
pub struct StaticPredictor {
    arn: Option<String>,
}

impl StaticPredictor {
    pub fn new(arn: impl Into<String>) -> Self {
        Self {
            arn: Some(arn.into()),
        }
    }

    /// 尚未训练出 predictor
    pub fn missing() -> Self {
        Self { arn: None }
    }
}

#[async_trait]
impl PredictorSource for StaticPredictor {
    async fn arn(&self) -> Result<Option<String>, ServiceError> {
        Ok(self.arn.clone())
    }
}
