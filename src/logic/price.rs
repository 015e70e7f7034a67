use super::calculations::round_to;
use crate::models::{PriceForecast, PriceForecastRequest, PricePoint};
use crate::reference::market_profile_or_default;
use chrono::{Datelike, Duration, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

pub const FORECAST_DAYS: i64 = 30;
pub const FORECAST_CONFIDENCE: f64 = 0.75;

/// Maximum multiplicative noise applied to each day's price.
const NOISE: f64 = 0.05;

const FACTORS: [&str; 5] = [
    "Seasonal demand patterns",
    "Historical price trends",
    "Weather conditions",
    "Government procurement policy",
    "Market supply levels",
];

/// Seasonal price curve with bounded noise from an injectable random source.
pub struct PriceForecaster<R: Rng> {
    rng: R,
}

impl PriceForecaster<StdRng> {
    /// Reproducible forecaster: the same seed yields the same curve.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> PriceForecaster<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn forecast(&mut self, request: &PriceForecastRequest) -> PriceForecast {
        self.forecast_on(request, Local::now().date_naive())
    }

    /// Thirty daily prices starting the day after `today`.
    ///
    /// `historical_data` and `external_factors` are accepted but do not
    /// enter the arithmetic.
    pub fn forecast_on(&mut self, request: &PriceForecastRequest, today: NaiveDate) -> PriceForecast {
        let market = market_profile_or_default(&request.crop);

        if !request.historical_data.is_empty() || !request.external_factors.is_empty() {
            tracing::debug!(
                history = request.historical_data.len(),
                factors = request.external_factors.len(),
                "Historical data and external factors are not used by the price model"
            );
        }

        let predictions = (1..=FORECAST_DAYS)
            .map(|offset| {
                let date = today + Duration::days(offset);
                let seasonal = seasonal_factor(date, market.seasonal_variation);
                let noise = 1.0 + self.rng.gen_range(-NOISE..=NOISE);
                PricePoint {
                    date,
                    price: round_to((market.base_price * seasonal * noise).max(0.0), 2),
                    confidence: FORECAST_CONFIDENCE,
                }
            })
            .collect();

        PriceForecast {
            predictions,
            confidence: FORECAST_CONFIDENCE,
            factors: FACTORS.iter().map(|f| f.to_string()).collect(),
            trend: market.trend.to_string(),
        }
    }
}

/// `1 + sin(month / 12 · 2π) · variation`, with `month` in 1..=12.
pub fn seasonal_factor(date: NaiveDate, variation: f64) -> f64 {
    let month = date.month() as f64;
    1.0 + (month / 12.0 * 2.0 * PI).sin() * variation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MarketRecord;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn thirty_points_one_day_apart() {
        let forecast =
            PriceForecaster::seeded(7).forecast_on(&PriceForecastRequest::for_crop("Rice"), today());
        assert_eq!(forecast.predictions.len(), 30);
        assert_eq!(
            forecast.predictions[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
        );
        assert!(forecast
            .predictions
            .windows(2)
            .all(|w| w[1].date == w[0].date + Duration::days(1)));
        assert!(forecast.predictions.iter().all(|p| p.price >= 0.0));
        assert!(forecast.predictions.iter().all(|p| p.confidence == 0.75));
        assert_eq!(forecast.confidence, 0.75);
        assert_eq!(forecast.trend, "stable");
        assert_eq!(forecast.factors.len(), 5);
    }

    #[test]
    fn same_seed_same_curve() {
        let request = PriceForecastRequest::for_crop("wheat");
        let a = PriceForecaster::seeded(42).forecast_on(&request, today());
        let b = PriceForecaster::seeded(42).forecast_on(&request, today());
        assert_eq!(a.predictions, b.predictions);
    }

    #[test]
    fn prices_stay_within_seasonal_and_noise_bounds() {
        let forecast = PriceForecaster::seeded(3)
            .forecast_on(&PriceForecastRequest::for_crop("tomato"), today());
        // tomatoes: base 1500, variation 0.35
        let low = 1500.0 * (1.0 - 0.35) * (1.0 - NOISE) - 0.01;
        let high = 1500.0 * (1.0 + 0.35) * (1.0 + NOISE) + 0.01;
        for point in &forecast.predictions {
            assert!(point.price >= low && point.price <= high, "{}", point.price);
        }
        assert_eq!(forecast.trend, "volatile");
    }

    #[test]
    fn unknown_crop_uses_rice_market() {
        let forecast = PriceForecaster::seeded(1)
            .forecast_on(&PriceForecastRequest::for_crop("dragonfruit"), today());
        assert_eq!(forecast.trend, "stable");
        for point in &forecast.predictions {
            assert!(point.price > 2000.0 * 0.85 * 0.95 - 0.01);
        }
    }

    #[test]
    fn history_does_not_change_the_forecast() {
        let mut with_history = PriceForecastRequest::for_crop("rice");
        with_history.historical_data.push(MarketRecord {
            date: NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
            price: 9999.0,
            market: None,
        });
        with_history.external_factors.push("export ban".into());

        let plain = PriceForecaster::seeded(9)
            .forecast_on(&PriceForecastRequest::for_crop("rice"), today());
        let with_history = PriceForecaster::seeded(9).forecast_on(&with_history, today());
        assert_eq!(plain.predictions, with_history.predictions);
    }

    #[test]
    fn seasonal_factor_follows_month() {
        let march = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let september = NaiveDate::from_ymd_opt(2024, 9, 10).unwrap();
        let december = NaiveDate::from_ymd_opt(2024, 12, 10).unwrap();
        // sin(π/2) = 1, sin(3π/2) = -1, sin(2π) = 0
        assert!((seasonal_factor(march, 0.2) - 1.2).abs() < 1e-9);
        assert!((seasonal_factor(september, 0.2) - 0.8).abs() < 1e-9);
        assert!((seasonal_factor(december, 0.2) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn injectable_rng() {
        let rng = StdRng::seed_from_u64(5);
        let mut forecaster = PriceForecaster::new(rng);
        let forecast = forecaster.forecast_on(&PriceForecastRequest::for_crop("cotton"), today());
        assert_eq!(forecast.predictions.len(), 30);
        assert_eq!(forecast.trend, "increasing");
    }
}
