pub mod config;
pub mod forecast;
pub mod resources;
pub mod session;
pub mod status;

pub use forecast::{Export, Forecast, ForecastError, ForecastSettings};
pub use status::Status;
