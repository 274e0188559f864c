//! # Climate Lookups
//!
//! Moisture and temperature at a horizontal position. The classifier only
//! asks for them below the terrain surface, so both are behind
//! [`ClimateSource`] and evaluated lazily.

use crate::config::WorldConfig;
use crate::noise::NoiseField;

/// Closed-form latitude temperature.
///
/// Warmest at `z = world_size / 2`, falling off linearly with distance
/// and clamped to `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemperatureModel {
    /// Temperature at the equator.
    pub equator_temp: f64,
    /// Loss per world unit away from the equator.
    pub decay_coeff: f64,
    /// World extent along Z.
    pub world_size: f64,
}

impl TemperatureModel {
    /// Builds the model from a configuration.
    #[must_use]
    pub fn from_config(config: &WorldConfig) -> Self {
        Self {
            equator_temp: config.equator_temp,
            decay_coeff: config.temp_decay_coeff,
            world_size: config.world_size,
        }
    }

    /// Temperature at world `z`.
    #[inline]
    #[must_use]
    pub fn at(&self, z: f64) -> f64 {
        let from_equator = (z - self.world_size / 2.0).abs();
        (self.equator_temp - from_equator * self.decay_coeff).clamp(0.0, 1.0)
    }
}

/// Per-position climate queried by the classifier.
pub trait ClimateSource {
    /// Moisture in `[0, 1]` at world `(x, z)`.
    fn moisture(&self, x: f64, z: f64) -> f64;

    /// Temperature in `[0, 1]` at world `z`.
    fn temperature(&self, z: f64) -> f64;
}

/// Climate backed by a moisture noise channel and a [`TemperatureModel`].
pub struct Climate<'a, N> {
    moisture: &'a N,
    moisture_octaves: u32,
    temperature: TemperatureModel,
}

impl<'a, N: NoiseField> Climate<'a, N> {
    /// Creates a climate view over a moisture field.
    #[must_use]
    pub fn new(moisture: &'a N, moisture_octaves: u32, temperature: TemperatureModel) -> Self {
        Self {
            moisture,
            moisture_octaves,
            temperature,
        }
    }
}

impl<N: NoiseField> ClimateSource for Climate<'_, N> {
    #[inline]
    fn moisture(&self, x: f64, z: f64) -> f64 {
        self.moisture.eval(x, z, self.moisture_octaves)
    }

    #[inline]
    fn temperature(&self, z: f64) -> f64 {
        self.temperature.at(z)
    }
}
