//! Simulation configuration
//!
//! All tunable constants of the kernel live here rather than as literals in
//! the physics code. [`SimulationConfig::default`] reproduces the reference
//! behaviour; a driver can load overrides from YAML:
//!
//! ```yaml
//! physics:
//!   gravitational_constant: 6.6743e-11
//!   compact_mass_threshold: 1.0e42
//!   force_law: reference        # or inverse_square
//! resolution:
//!   order: index_order          # or closest_first
//!   radius_policy:
//!     kind: scale
//!     factor: 0.1
//! ```
//!
//! Omitted keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::body::{Classification, NewBody};
use crate::constants;
use crate::error::ConfigError;

/// Shape of the pairwise gravitational force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceLaw {
    /// `G·mᵢ·mⱼ/r²` applied along the unnormalized separation vector, so the
    /// magnitude falls off as `1/r`
    #[default]
    Reference,
    /// Newtonian `G·mᵢ·mⱼ/r²` along the unit separation vector
    InverseSquare,
}

/// Physical constants and derived-quantity mappings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravitational constant
    pub gravitational_constant: f64,
    /// Speed of light, used only for critical radii
    pub speed_of_light: f64,
    /// Mass at or above which a body is compact
    pub compact_mass_threshold: f64,
    /// Mass of a neutralized body
    pub neutral_mass: f64,
    /// Critical radii are divided by this before comparison with distances
    pub critical_radius_scale: f64,
    /// Mass divisor in the mass-to-radius mapping
    pub radius_mass_divisor: f64,
    /// Cube-root step in the mass-to-radius mapping
    pub radius_step: f64,
    /// Lower clamp for every radius
    pub min_radius: f64,
    /// Plummer softening length added to pair separations
    pub softening: f64,
    pub force_law: ForceLaw,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: constants::G,
            speed_of_light: constants::C,
            compact_mass_threshold: constants::COMPACT_MASS_THRESHOLD,
            neutral_mass: constants::NEUTRAL_MASS,
            critical_radius_scale: constants::CRITICAL_RADIUS_SCALE,
            radius_mass_divisor: constants::RADIUS_MASS_DIVISOR,
            radius_step: constants::RADIUS_STEP,
            min_radius: constants::MIN_RADIUS,
            softening: 0.0,
            force_law: ForceLaw::Reference,
        }
    }
}

impl PhysicsConfig {
    /// Critical (Schwarzschild-like) radius `2·G·m/c²`
    ///
    /// # Examples
    ///
    /// ```
    /// use interstellar::config::PhysicsConfig;
    ///
    /// let physics = PhysicsConfig::default();
    /// let r_sun = physics.critical_radius(1.989e30);
    /// assert!((r_sun - 2_954.0).abs() < 5.0); // about 2.95 km
    /// ```
    pub fn critical_radius(&self, mass: f64) -> f64 {
        2.0 * self.gravitational_constant * mass / (self.speed_of_light * self.speed_of_light)
    }

    /// Radius derived from mass when none is supplied explicitly
    ///
    /// `floor(cbrt(m / divisor) / step) + 1`, which is monotonic in mass and
    /// never below one world unit.
    ///
    /// # Examples
    ///
    /// ```
    /// use interstellar::config::PhysicsConfig;
    ///
    /// let physics = PhysicsConfig::default();
    /// assert_eq!(physics.derived_radius(5e24), 1.0); // Earth-like
    /// assert_eq!(physics.derived_radius(2e30), 12.0); // Sun-like
    /// ```
    pub fn derived_radius(&self, mass: f64) -> f64 {
        let steps = ((mass / self.radius_mass_divisor).cbrt() / self.radius_step).floor();
        (steps + 1.0).max(self.min_radius)
    }

    pub fn classify(&self, mass: f64) -> Classification {
        if mass >= self.compact_mass_threshold {
            Classification::Compact
        } else {
            Classification::Normal
        }
    }

    /// Returns true once a mass has been driven down to the neutral epsilon
    pub fn is_neutral_mass(&self, mass: f64) -> bool {
        mass <= self.neutral_mass
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("gravitational_constant", self.gravitational_constant)?;
        positive("speed_of_light", self.speed_of_light)?;
        positive("compact_mass_threshold", self.compact_mass_threshold)?;
        positive("neutral_mass", self.neutral_mass)?;
        positive("critical_radius_scale", self.critical_radius_scale)?;
        positive("radius_mass_divisor", self.radius_mass_divisor)?;
        positive("radius_step", self.radius_step)?;
        positive("min_radius", self.min_radius)?;
        if !(self.softening.is_finite() && self.softening >= 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "softening",
                value: self.softening,
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }
}

/// How the radius of an absorbed body is shrunk
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RadiusPolicy {
    /// Multiply by `1 / winner.radius`, never growing the loser
    #[default]
    ReciprocalOfWinner,
    /// Multiply by a constant factor in `(0, 1]`
    Scale { factor: f64 },
    /// Replace with a fixed radius
    Fixed { radius: f64 },
}

impl RadiusPolicy {
    /// Radius of a neutralized loser, clamped to `min_radius`
    ///
    /// # Examples
    ///
    /// ```
    /// use interstellar::config::RadiusPolicy;
    ///
    /// let shrunk = RadiusPolicy::ReciprocalOfWinner.shrink(4.0, 8.0, 1e-6);
    /// assert_eq!(shrunk, 0.5);
    ///
    /// // A winner smaller than one unit leaves the loser's radius alone
    /// let kept = RadiusPolicy::ReciprocalOfWinner.shrink(4.0, 0.5, 1e-6);
    /// assert_eq!(kept, 4.0);
    /// ```
    pub fn shrink(&self, loser_radius: f64, winner_radius: f64, min_radius: f64) -> f64 {
        let shrunk = match *self {
            RadiusPolicy::ReciprocalOfWinner => loser_radius * winner_radius.recip().min(1.0),
            RadiusPolicy::Scale { factor } => loser_radius * factor,
            RadiusPolicy::Fixed { radius } => radius,
        };

        if shrunk.is_finite() {
            shrunk.max(min_radius)
        } else {
            min_radius
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            RadiusPolicy::ReciprocalOfWinner => Ok(()),
            RadiusPolicy::Scale { factor } => {
                if factor.is_finite() && factor > 0.0 && factor <= 1.0 {
                    Ok(())
                } else {
                    Err(ConfigError::InvalidParameter {
                        name: "radius_policy.factor",
                        value: factor,
                        reason: "must lie in (0, 1]",
                    })
                }
            }
            RadiusPolicy::Fixed { radius } => positive("radius_policy.radius", radius),
        }
    }
}

/// Order in which detected interactions are applied within a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionOrder {
    /// Ascending `(i, j)` collection index
    #[default]
    IndexOrder,
    /// Smallest separation first, ties broken by index
    ClosestFirst,
}

/// Settings for absorption and collision handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    pub absorption_enabled: bool,
    pub collisions_enabled: bool,
    pub radius_policy: RadiusPolicy,
    pub order: ResolutionOrder,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            absorption_enabled: true,
            collisions_enabled: true,
            radius_policy: RadiusPolicy::default(),
            order: ResolutionOrder::default(),
        }
    }
}

/// Complete kernel configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub resolution: ResolutionConfig,
}

impl SimulationConfig {
    /// Parses and validates a YAML document
    ///
    /// # Examples
    ///
    /// ```
    /// use interstellar::config::{ForceLaw, SimulationConfig};
    ///
    /// let config = SimulationConfig::from_yaml_str("physics:\n  force_law: inverse_square\n")
    ///     .unwrap();
    /// assert_eq!(config.physics.force_law, ForceLaw::InverseSquare);
    /// assert_eq!(config.physics.compact_mass_threshold, 1e42);
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physics.validate()?;
        self.resolution.radius_policy.validate()
    }
}

/// A configuration plus the bodies a driver wants to start from
///
/// # Examples
///
/// ```
/// use interstellar::config::ScenarioConfig;
///
/// let scenario = ScenarioConfig::from_yaml_str(
///     r#"
/// config:
///   physics:
///     compact_mass_threshold: 1.0e40
/// bodies:
///   - position: [400.0, 400.0, 0.0]
///     mass: 4.0e47
///     radius: 5.0
///   - position: [100.0, 200.0, 400.0]
///     mass: 5.0e24
///     velocity: [0.0, 1.0, 0.0]
///     color: [100, 200, 255]
/// "#,
/// )
/// .unwrap();
///
/// assert_eq!(scenario.bodies.len(), 2);
/// assert_eq!(scenario.bodies[0].radius, Some(5.0));
/// assert_eq!(scenario.config.physics.compact_mass_threshold, 1e40);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub config: SimulationConfig,
    pub bodies: Vec<NewBody>,
}

impl ScenarioConfig {
    /// Parses a scenario and validates its configuration
    ///
    /// Bodies are validated later, when they are added to a simulation.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let scenario: ScenarioConfig = serde_yaml::from_str(yaml)?;
        scenario.config.validate()?;
        Ok(scenario)
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            value,
            reason: "must be finite and positive",
        })
    }
}
