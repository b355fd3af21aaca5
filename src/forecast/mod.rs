pub mod arn;
pub mod model;
pub mod reconciler;

pub use arn::ForecastArn;
pub use model::{Export, ForecastError, ForecastSettings};
pub use reconciler::{CreateOutcome, Forecast, ReconcileReport};
