use agroadvisor::cli::{log_level, parse_request, Cli, Commands, RequestArgs};
use agroadvisor::config::Config;
use agroadvisor::datasources::OpenWeatherMapClient;
use agroadvisor::engine::AdvisoryEngine;
use agroadvisor::error::Result;
use agroadvisor::models::{
    FertilizerPlan, FertilizerRequest, IrrigationRequest, PriceForecastRequest, SensorReading,
    YieldInput,
};
use agroadvisor::reference::{market_profile, CROPS};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Fertilizer plan plus its decision trace rendered for display.
#[derive(Serialize)]
struct FertilizerResponse<'a> {
    #[serde(flatten)]
    plan: &'a FertilizerPlan,
    path: String,
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for JSON responses
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_level(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Init = cli.command {
        Config::setup_interactive()?;
        return Ok(());
    }

    let config = Config::load(cli.config)?;
    let engine = AdvisoryEngine::from_config(&config);

    match cli.command {
        Commands::Yield(args) => {
            let input: YieldInput = read_request(&args)?;
            input.validate()?;
            print_json(&engine.estimate_yield(&input))
        }
        Commands::Fertilizer(args) => {
            let request: FertilizerRequest = read_request(&args)?;
            request.validate()?;
            let plan = engine.plan_fertilizer(&request);
            print_json(&FertilizerResponse {
                path: plan.trace.render(),
                plan: &plan,
            })
        }
        Commands::Irrigation {
            request,
            fetch_weather,
        } => {
            let mut request: IrrigationRequest = read_request(&request)?;
            if fetch_weather && request.weather_data.is_none() {
                request.weather_data = fetch_first_day(&config).await;
            }
            request.validate()?;
            print_json(&engine.schedule_irrigation(&request))
        }
        Commands::Health(args) => {
            let reading: SensorReading = read_request(&args)?;
            reading.validate()?;
            print_json(&engine.monitor_health(&reading))
        }
        Commands::Price(args) => {
            let request: PriceForecastRequest = read_request(&args)?;
            print_json(&engine.forecast_price(&request))
        }
        Commands::Crops => print_json(&crop_table()),
        Commands::Check => check(&config).await,
        Commands::Init => Ok(()),
    }
}

fn read_request<T: serde::de::DeserializeOwned>(args: &RequestArgs) -> Result<T> {
    parse_request(&args.read_json()?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Scheduling goes ahead without weather when the provider is missing or down.
async fn fetch_first_day(config: &Config) -> Option<agroadvisor::models::WeatherDay> {
    let owm = match &config.openweathermap {
        Some(owm) if owm.enabled => owm.clone(),
        _ => {
            tracing::warn!("--fetch-weather given but OpenWeatherMap is not configured");
            return None;
        }
    };

    match OpenWeatherMapClient::new(owm).fetch_first_day().await {
        Ok(day) => {
            tracing::info!(
                temperature = day.temperature,
                humidity = day.humidity,
                rainfall = day.rainfall,
                "Fetched first forecast day"
            );
            Some(day)
        }
        Err(e) => {
            tracing::warn!("Weather fetch failed, scheduling without forecast: {}", e);
            None
        }
    }
}

fn crop_table() -> serde_json::Value {
    let crops: Vec<_> = CROPS
        .iter()
        .map(|crop| {
            let market = market_profile(crop.name);
            serde_json::json!({
                "crop": crop.name,
                "aliases": crop.aliases,
                "waterNeed": crop.water_need,
                "compatibleSoils": crop
                    .compatible_soils
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>(),
                "basePrice": market.map(|m| m.base_price),
                "seasonalVariation": market.map(|m| m.seasonal_variation),
                "trend": market.map(|m| m.trend),
            })
        })
        .collect();
    serde_json::Value::Array(crops)
}

async fn check(config: &Config) -> Result<()> {
    println!("Config OK");
    println!("  Currency: {}", config.pricing.currency);
    println!(
        "  Forecast seed: {}",
        config
            .forecast
            .seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none (stochastic)".into())
    );

    match &config.openweathermap {
        Some(owm) if owm.enabled => {
            println!("  OpenWeatherMap: {:?}", owm);
            let client = OpenWeatherMapClient::new(owm.clone());
            match client.test_connection().await {
                Ok(true) => println!("  OpenWeatherMap connection: OK"),
                Ok(false) => println!("  OpenWeatherMap connection: FAILED (bad response)"),
                Err(e) => println!("  OpenWeatherMap connection: FAILED ({})", e),
            }
        }
        Some(_) => println!("  OpenWeatherMap: disabled"),
        None => println!("  OpenWeatherMap: not configured"),
    }

    Ok(())
}
