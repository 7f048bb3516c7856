//! Weather forecast models and hourly-to-daily aggregation

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of days shown on the dashboard
pub const FORECAST_DAYS: usize = 7;

/// Hourly arrays as returned by the public forecast service.
///
/// The service keeps every array the same length as `time`; missing arrays
/// or null samples count as zero for that hour.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HourlySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
    #[serde(default)]
    pub relative_humidity_2m: Vec<Option<f64>>,
}

impl HourlySeries {
    fn sample(series: &[Option<f64>], index: usize) -> f64 {
        series.get(index).copied().flatten().unwrap_or(0.0)
    }
}

/// Daily weather summary
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DailyForecast {
    /// Calendar date as it appeared in the hourly timestamps (`YYYY-MM-DD`)
    pub date: String,
    /// Mean temperature in °C
    pub temperature: f64,
    /// Mean hourly precipitation in mm
    pub rainfall: f64,
    /// Mean relative humidity in %
    pub humidity: f64,
    /// Text forecast; the hourly source has none, so this stays empty
    pub forecast: String,
}

impl DailyForecast {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// `M/D/YYYY`, falling back to the raw date text
    pub fn display_date(&self) -> String {
        self.parsed_date()
            .map(|d| d.format("%-m/%-d/%Y").to_string())
            .unwrap_or_else(|| self.date.clone())
    }
}

#[derive(Debug, Default)]
struct DayBucket {
    temperature: Vec<f64>,
    rainfall: Vec<f64>,
    humidity: Vec<f64>,
}

/// Buckets hourly samples by calendar date and averages each bucket
#[derive(Debug, Clone)]
pub struct DailyAggregator {
    pub max_days: usize,
    /// Sort buckets by date before truncating instead of keeping first-seen order
    pub chronological: bool,
}

impl Default for DailyAggregator {
    fn default() -> Self {
        Self {
            max_days: FORECAST_DAYS,
            chronological: false,
        }
    }
}

impl DailyAggregator {
    pub fn new(max_days: usize) -> Self {
        Self {
            max_days,
            ..Default::default()
        }
    }

    pub fn chronological(mut self, chronological: bool) -> Self {
        self.chronological = chronological;
        self
    }

    pub fn aggregate(&self, hourly: &HourlySeries) -> Vec<DailyForecast> {
        let mut order: Vec<(String, DayBucket)> = Vec::new();
        let mut index_by_date: HashMap<String, usize> = HashMap::new();

        for (i, time) in hourly.time.iter().enumerate() {
            let date = date_key(time);
            let slot = *index_by_date.entry(date.to_string()).or_insert_with(|| {
                order.push((date.to_string(), DayBucket::default()));
                order.len() - 1
            });

            let bucket = &mut order[slot].1;
            bucket
                .temperature
                .push(HourlySeries::sample(&hourly.temperature_2m, i));
            bucket
                .rainfall
                .push(HourlySeries::sample(&hourly.precipitation, i));
            bucket
                .humidity
                .push(HourlySeries::sample(&hourly.relative_humidity_2m, i));
        }

        if self.chronological {
            order.sort_by(|a, b| a.0.cmp(&b.0));
        }

        order
            .into_iter()
            .take(self.max_days)
            .map(|(date, bucket)| DailyForecast {
                date,
                temperature: mean_one_decimal(&bucket.temperature),
                rainfall: mean_one_decimal(&bucket.rainfall),
                humidity: mean_one_decimal(&bucket.humidity),
                forecast: String::new(),
            })
            .collect()
    }
}

/// Aggregate with the dashboard defaults (first-seen order, 7 days)
pub fn aggregate_daily(hourly: &HourlySeries) -> Vec<DailyForecast> {
    DailyAggregator::default().aggregate(hourly)
}

/// Calendar-date part of an hourly timestamp such as `2024-01-01T13:00`
fn date_key(time: &str) -> &str {
    time.split('T').next().unwrap_or(time)
}

fn mean_one_decimal(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    round_one_decimal(mean)
}

/// Round to tenths, halves away from zero
pub fn round_one_decimal(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(0.0)
}

/// Sum of the daily rainfall means
pub fn total_rainfall(days: &[DailyForecast]) -> f64 {
    round_one_decimal(days.iter().map(|d| d.rainfall).sum())
}
