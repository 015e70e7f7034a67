use crate::config::Config;
use crate::logic::{
    estimate_yield, monitor_health, schedule_irrigation, FertilizerPlanner, PriceForecaster,
    YieldEstimate,
};
use crate::models::{
    FertilizerPlan, FertilizerRequest, HealthReport, IrrigationPlan, IrrigationRequest,
    PriceForecast, PriceForecastRequest, SensorReading, YieldInput,
};
use crate::pricing::PricingTable;

/// One entry point per advisory kind.
///
/// Holds no per-call state; every method takes `&self` and can be called
/// from any number of threads at once.
pub struct AdvisoryEngine {
    planner: FertilizerPlanner,
    forecast_seed: Option<u64>,
}

impl AdvisoryEngine {
    pub fn new(pricing: PricingTable, forecast_seed: Option<u64>) -> Self {
        Self {
            planner: FertilizerPlanner::new(pricing),
            forecast_seed,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.pricing.clone(), config.forecast.seed)
    }

    pub fn estimate_yield(&self, input: &YieldInput) -> YieldEstimate {
        estimate_yield(input)
    }

    pub fn plan_fertilizer(&self, request: &FertilizerRequest) -> FertilizerPlan {
        self.planner.plan(request)
    }

    pub fn schedule_irrigation(&self, request: &IrrigationRequest) -> IrrigationPlan {
        schedule_irrigation(request)
    }

    pub fn monitor_health(&self, reading: &SensorReading) -> HealthReport {
        monitor_health(reading)
    }

    /// Seeded engines repeat the same curve on every call for a given day.
    pub fn forecast_price(&self, request: &PriceForecastRequest) -> PriceForecast {
        match self.forecast_seed {
            Some(seed) => PriceForecaster::seeded(seed).forecast(request),
            None => PriceForecaster::from_entropy().forecast(request),
        }
    }

    pub fn pricing(&self) -> &PricingTable {
        self.planner.pricing()
    }
}

impl Default for AdvisoryEngine {
    fn default() -> Self {
        Self::new(PricingTable::default(), None)
    }
}
