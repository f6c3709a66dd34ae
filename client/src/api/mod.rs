pub mod types;

mod client;

pub use client::RuneMetricsClient;
pub use types::ApiError;
