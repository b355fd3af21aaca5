use crate::forecast::model::ForecastError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn forecast_arn_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^arn:(aws[a-z-]*):forecast:([a-z0-9-]+):(\d{12}):forecast/(.+)$")
            .expect("forecast arn regex")
    })
}

/// Forecast 资源 ARN
///
/// `arn:<partition>:forecast:<region>:<account>:forecast/<name>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastArn {
    pub partition: String,
    pub region: String,
    pub account: String,
    pub name: String,
}

impl ForecastArn {
    /// 该 forecast 下某个导出任务的 ARN
    ///
    /// `arn:<partition>:forecast:<region>:<account>:forecast-export-job/<forecast name>/<export name>`
    pub fn export_job_arn(&self, export_name: &str) -> String {
        format!(
            "arn:{}:forecast:{}:{}:forecast-export-job/{}/{}",
            self.partition, self.region, self.account, self.name, export_name
        )
    }
}

impl FromStr for ForecastArn {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = forecast_arn_re()
            .captures(s)
            .ok_or_else(|| ForecastError::InvalidArn(s.to_string()))?;
        Ok(Self {
            partition: caps[1].to_string(),
            region: caps[2].to_string(),
            account: caps[3].to_string(),
            name: caps[4].to_string(),
        })
    }
}

impl fmt::Display for ForecastArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:forecast:{}:{}:forecast/{}",
            self.partition, self.region, self.account, self.name
        )
    }
}
