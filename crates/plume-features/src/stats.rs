//! Normalization statistics: computed once per run, applied everywhere.
//!
//! Four independent statistics standardize every feature dimension:
//! time, the weather 4-vector, traffic volume, and coordinates. The
//! time statistic is deliberately computed over the two range endpoints
//! rather than the sampled timestamps, and the coordinate statistic
//! over the bounding-box corners rather than actual receptor or link
//! positions — downstream consumers of the records depend on exactly
//! this simplification, so it must be reproduced, not "fixed".

use std::error::Error;
use std::fmt;

use chrono::{DateTime, Utc};

use plume_core::{BoundingBox, LatLon, TrafficSeries, WeatherSample, WeatherSeries};

// ── Error type ──────────────────────────────────────────────────

/// Errors from statistic computation.
///
/// Both variants are fatal configuration conditions: a statistic that
/// cannot standardize would corrupt every subsequent record, so the run
/// must stop before any record is produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatsError {
    /// A quantity has no values to compute a statistic over.
    EmptySeries {
        /// Which quantity was empty.
        quantity: &'static str,
    },
    /// A quantity's values are all identical, so its standard deviation
    /// is zero and standardization would divide by zero.
    DegenerateStd {
        /// Which quantity degenerated.
        quantity: &'static str,
    },
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySeries { quantity } => {
                write!(f, "no values to compute the '{quantity}' statistic over")
            }
            Self::DegenerateStd { quantity } => {
                write!(f, "'{quantity}' statistic has zero standard deviation")
            }
        }
    }
}

impl Error for StatsError {}

// ── Stat ────────────────────────────────────────────────────────

/// A `(mean, std)` pair for one standardized quantity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stat {
    /// Population mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
}

impl Stat {
    /// Compute the population statistic over `values`.
    ///
    /// # Errors
    ///
    /// [`StatsError::EmptySeries`] when `values` is empty;
    /// [`StatsError::DegenerateStd`] when all values are identical.
    pub fn from_values(quantity: &'static str, values: &[f64]) -> Result<Self, StatsError> {
        if values.is_empty() {
            return Err(StatsError::EmptySeries { quantity });
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();
        if std == 0.0 {
            return Err(StatsError::DegenerateStd { quantity });
        }
        Ok(Self { mean, std })
    }

    /// Standardize a value: `(x - mean) / std`.
    pub fn normalize(&self, x: f64) -> f64 {
        (x - self.mean) / self.std
    }

    /// Invert [`normalize`](Self::normalize): `z * std + mean`.
    pub fn denormalize(&self, z: f64) -> f64 {
        z * self.std + self.mean
    }
}

// ── NormStats ───────────────────────────────────────────────────

/// The four run-constant statistics.
///
/// Computed exactly once per run over the full configured time range
/// and applied uniformly to every record.
#[derive(Clone, Debug, PartialEq)]
pub struct NormStats {
    /// Statistic over the range endpoints' unix timestamps.
    pub time: Stat,
    /// Per-dimension statistics over all weather 4-vectors, in
    /// `[wind_dir, wind_speed, wind_dir_std, temperature]` order.
    pub weather: [Stat; 4],
    /// Scalar statistic over every volume at every link and hour.
    pub volume: Stat,
    /// Per-dimension statistics over the bounding-box corners, in
    /// `[lat, lon]` order.
    pub coord: [Stat; 2],
}

impl NormStats {
    /// Compute all four statistics for a run.
    ///
    /// # Errors
    ///
    /// Any empty or degenerate quantity fails the whole computation;
    /// see [`StatsError`]. Notably `date_start == date_end` degenerates
    /// the time statistic, a constant weather dimension degenerates
    /// that dimension, and a zero-extent bounding box degenerates the
    /// coordinate statistic.
    pub fn compute(
        date_start: DateTime<Utc>,
        date_end: DateTime<Utc>,
        weather: &WeatherSeries,
        traffic: &TrafficSeries,
        bounding_box: &BoundingBox,
    ) -> Result<Self, StatsError> {
        let endpoints = [date_start.timestamp() as f64, date_end.timestamp() as f64];
        let time = Stat::from_values("time", &endpoints)?;

        let samples: Vec<[f64; 4]> = weather.samples().map(|s| s.to_array()).collect();
        let weather = [
            Stat::from_values("wind_dir", &dimension(&samples, 0))?,
            Stat::from_values("wind_speed", &dimension(&samples, 1))?,
            Stat::from_values("wind_dir_std", &dimension(&samples, 2))?,
            Stat::from_values("temperature", &dimension(&samples, 3))?,
        ];

        let volumes: Vec<f64> = traffic.volumes().collect();
        let volume = Stat::from_values("traffic_volume", &volumes)?;

        let corners = bounding_box.corners();
        let lats: Vec<f64> = corners.iter().map(|c| c.lat).collect();
        let lons: Vec<f64> = corners.iter().map(|c| c.lon).collect();
        let coord = [
            Stat::from_values("lat", &lats)?,
            Stat::from_values("lon", &lons)?,
        ];

        Ok(Self {
            time,
            weather,
            volume,
            coord,
        })
    }

    /// Standardize an hour's unix timestamp.
    pub fn normalize_time(&self, timestamp: DateTime<Utc>) -> f64 {
        self.time.normalize(timestamp.timestamp() as f64)
    }

    /// Standardize a weather sample element-wise.
    pub fn normalize_weather(&self, sample: &WeatherSample) -> [f64; 4] {
        let raw = sample.to_array();
        [
            self.weather[0].normalize(raw[0]),
            self.weather[1].normalize(raw[1]),
            self.weather[2].normalize(raw[2]),
            self.weather[3].normalize(raw[3]),
        ]
    }

    /// Standardize a traffic volume.
    pub fn normalize_volume(&self, volume: f64) -> f64 {
        self.volume.normalize(volume)
    }

    /// Standardize a coordinate pair element-wise.
    pub fn normalize_coord(&self, point: LatLon) -> [f64; 2] {
        [
            self.coord[0].normalize(point.lat),
            self.coord[1].normalize(point.lon),
        ]
    }
}

fn dimension(samples: &[[f64; 4]], index: usize) -> Vec<f64> {
    samples.iter().map(|sample| sample[index]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use plume_core::{Link, NodeId};
    use proptest::prelude::*;

    fn hour(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2017, 7, 1, h, 0, 0).unwrap()
    }

    fn sample(offset: f64) -> WeatherSample {
        WeatherSample {
            wind_dir: 10.0 + offset,
            wind_speed: 2.0 + offset,
            wind_dir_std: 0.5 + offset,
            temperature: 15.0 + offset,
        }
    }

    fn fixture() -> NormStats {
        let mut weather = WeatherSeries::new();
        weather.insert(hour(0), sample(0.0));
        weather.insert(hour(1), sample(2.0));
        let mut traffic = TrafficSeries::new();
        let link = Link::new(NodeId(1), NodeId(2));
        traffic.insert(hour(0), link, 100.0);
        traffic.insert(hour(1), link, 200.0);
        let bbox = BoundingBox::new(LatLon::new(53.2, -6.4), LatLon::new(53.4, -6.1));
        NormStats::compute(hour(0), hour(23), &weather, &traffic, &bbox).unwrap()
    }

    #[test]
    fn time_statistic_uses_only_the_range_endpoints() {
        let stats = fixture();
        let start = hour(0).timestamp() as f64;
        let end = hour(23).timestamp() as f64;
        assert_eq!(stats.time.mean, (start + end) / 2.0);
        assert_eq!(stats.time.std, (end - start) / 2.0);
        // Midpoint of the range standardizes to zero.
        assert!(stats.time.normalize((start + end) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn weather_statistic_is_per_dimension() {
        let stats = fixture();
        // Dimension means sit between the two samples.
        assert!((stats.weather[0].mean - 11.0).abs() < 1e-12);
        assert!((stats.weather[3].mean - 16.0).abs() < 1e-12);
        // Population std of {x, x + 2} is 1.
        for dim in stats.weather {
            assert!((dim.std - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn volume_statistic_pools_all_links_and_hours() {
        let stats = fixture();
        assert!((stats.volume.mean - 150.0).abs() < 1e-12);
        assert!((stats.volume.std - 50.0).abs() < 1e-12);
    }

    #[test]
    fn coord_statistic_comes_from_the_bounding_box() {
        let stats = fixture();
        assert!((stats.coord[0].mean - 53.3).abs() < 1e-12);
        assert!((stats.coord[1].mean - (-6.25)).abs() < 1e-12);
    }

    #[test]
    fn normalizing_the_mean_gives_zero() {
        let stats = fixture();
        for stat in [
            stats.time,
            stats.volume,
            stats.weather[0],
            stats.weather[1],
            stats.weather[2],
            stats.weather[3],
            stats.coord[0],
            stats.coord[1],
        ] {
            assert_eq!(stat.normalize(stat.mean), 0.0);
        }
    }

    #[test]
    fn equal_range_endpoints_degenerate_the_time_statistic() {
        let mut weather = WeatherSeries::new();
        weather.insert(hour(0), sample(0.0));
        weather.insert(hour(1), sample(1.0));
        let mut traffic = TrafficSeries::new();
        traffic.insert(hour(0), Link::new(NodeId(1), NodeId(2)), 100.0);
        traffic.insert(hour(1), Link::new(NodeId(1), NodeId(2)), 150.0);
        let bbox = BoundingBox::new(LatLon::new(0.0, 0.0), LatLon::new(1.0, 1.0));
        let err = NormStats::compute(hour(5), hour(5), &weather, &traffic, &bbox).unwrap_err();
        assert_eq!(err, StatsError::DegenerateStd { quantity: "time" });
    }

    #[test]
    fn single_point_bounding_box_is_fatal() {
        let mut weather = WeatherSeries::new();
        weather.insert(hour(0), sample(0.0));
        weather.insert(hour(1), sample(1.0));
        let mut traffic = TrafficSeries::new();
        traffic.insert(hour(0), Link::new(NodeId(1), NodeId(2)), 100.0);
        traffic.insert(hour(1), Link::new(NodeId(1), NodeId(2)), 150.0);
        let point = LatLon::new(53.3, -6.2);
        let bbox = BoundingBox::new(point, point);
        let err = NormStats::compute(hour(0), hour(23), &weather, &traffic, &bbox).unwrap_err();
        assert_eq!(err, StatsError::DegenerateStd { quantity: "lat" });
    }

    #[test]
    fn empty_weather_series_is_fatal() {
        let weather = WeatherSeries::new();
        let mut traffic = TrafficSeries::new();
        traffic.insert(hour(0), Link::new(NodeId(1), NodeId(2)), 100.0);
        let bbox = BoundingBox::new(LatLon::new(0.0, 0.0), LatLon::new(1.0, 1.0));
        let err = NormStats::compute(hour(0), hour(23), &weather, &traffic, &bbox).unwrap_err();
        assert_eq!(err, StatsError::EmptySeries { quantity: "wind_dir" });
    }

    proptest! {
        #[test]
        fn normalize_round_trips(
            mean in -1000.0f64..1000.0,
            std in 0.001f64..1000.0,
            x in -10_000.0f64..10_000.0,
        ) {
            let stat = Stat { mean, std };
            let z = stat.normalize(x);
            prop_assert!((stat.denormalize(z) - x).abs() < 1e-6);
        }

        #[test]
        fn normalize_is_linear(
            mean in -100.0f64..100.0,
            std in 0.01f64..100.0,
            x in -100.0f64..100.0,
            y in -100.0f64..100.0,
        ) {
            let stat = Stat { mean, std };
            let lhs = stat.normalize(x) - stat.normalize(y);
            let rhs = (x - y) / std;
            prop_assert!((lhs - rhs).abs() < 1e-9);
        }
    }
}
