pub mod api;
pub mod dto;
pub mod error;
pub mod forecast_session;
pub mod signing;
pub mod urls;

#[cfg(test)]
pub mod mock;

pub use api::ForecastApi;
pub use error::ServiceError;
pub use forecast_session::ForecastSession;
pub use signing::Credentials;
