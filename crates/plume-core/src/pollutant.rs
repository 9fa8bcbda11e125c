//! The pollutant enumeration and its empirical background defaults.

use std::fmt;

/// Pollutant species tracked by the pipeline.
///
/// The variant order is the canonical label order: every receptor in a
/// record contributes one label per pollutant, iterated in
/// [`Pollutant::ALL`] order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pollutant {
    /// Nitrogen dioxide.
    No2,
    /// Particulate matter up to 10 µm.
    Pm10,
    /// Particulate matter up to 2.5 µm.
    Pm25,
}

impl Pollutant {
    /// All pollutants in canonical label order.
    pub const ALL: [Pollutant; 3] = [Pollutant::No2, Pollutant::Pm10, Pollutant::Pm25];

    /// Name of this pollutant as it appears in the measurement store.
    pub fn name(self) -> &'static str {
        match self {
            Pollutant::No2 => "NO2",
            Pollutant::Pm10 => "PM10",
            Pollutant::Pm25 => "PM25",
        }
    }

    /// Empirical background concentration in µg/m³.
    ///
    /// Seeds the carry-forward background state at the start of a run,
    /// before the first measurement update arrives.
    pub fn empirical_background(self) -> f64 {
        match self {
            Pollutant::No2 => 21.1,
            Pollutant::Pm10 => 14.8,
            Pollutant::Pm25 => 8.6,
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
