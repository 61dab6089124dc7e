//! Physical constants and reference tuning values
//!
//! Masses are in kilograms and lengths in world units (the same units the
//! renderer draws radii in). Critical radii are computed in metres and
//! divided by [`CRITICAL_RADIUS_SCALE`] before being compared against
//! world-unit distances.

/// Gravitational constant in m³ kg⁻¹ s⁻²
pub const G: f64 = 6.674_30e-11;

/// Speed of light in m/s
pub const C: f64 = 299_792_458.0;

/// Mass at or above which a body is classified as compact (kg)
pub const COMPACT_MASS_THRESHOLD: f64 = 1e42;

/// Mass assigned to a neutralized body
///
/// Never exactly zero so that `force / mass` stays finite.
pub const NEUTRAL_MASS: f64 = 1e-10;

/// Divisor applied to critical radii before comparing them with distances
pub const CRITICAL_RADIUS_SCALE: f64 = 4e19;

/// Mass divisor of the mass-to-radius mapping
pub const RADIUS_MASS_DIVISOR: f64 = 1e13;

/// Cube-root step of the mass-to-radius mapping
pub const RADIUS_STEP: f64 = 50_000.0;

/// Smallest radius any body may have
pub const MIN_RADIUS: f64 = 1e-6;
