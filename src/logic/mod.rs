pub mod calculations;
pub mod health;
pub mod irrigation;
pub mod price;
pub mod rules;
pub mod yield_estimator;

pub use health::monitor_health;
pub use irrigation::schedule_irrigation;
pub use price::PriceForecaster;
pub use rules::FertilizerPlanner;
pub use yield_estimator::{estimate_yield, YieldEstimate};
