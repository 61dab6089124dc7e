//! Error types
//!
//! The kernel only fails hard at the edges: building a body from invalid
//! input, accepting an invalid configuration, or loading a scenario that
//! contains either. Everything that goes wrong
//! inside a step is absorbed per pair and reported in counters instead.

use std::fmt;

/// Reasons a body cannot be constructed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyError {
    /// Mass was zero or negative
    NonPositiveMass(f64),
    /// Mass was NaN or infinite
    NonFiniteMass(f64),
    /// Mass was at or below the neutral mass, indistinguishable from an
    /// absorbed remnant
    BelowNeutralMass { mass: f64, neutral_mass: f64 },
    /// An explicit radius was zero, negative, or not finite
    InvalidRadius(f64),
    /// Position or velocity contained a NaN or infinite component
    NonFiniteState,
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyError::NonPositiveMass(m) => write!(f, "body mass must be positive, got {m}"),
            BodyError::NonFiniteMass(m) => write!(f, "body mass must be finite, got {m}"),
            BodyError::BelowNeutralMass { mass, neutral_mass } => write!(
                f,
                "body mass must exceed the neutral mass {neutral_mass}, got {mass}"
            ),
            BodyError::InvalidRadius(r) => {
                write!(f, "explicit body radius must be positive and finite, got {r}")
            }
            BodyError::NonFiniteState => {
                write!(f, "body position and velocity must be finite")
            }
        }
    }
}

impl std::error::Error for BodyError {}

/// Reasons a configuration is rejected
#[derive(Debug)]
pub enum ConfigError {
    /// A named parameter is outside its valid range
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// The YAML document could not be parsed
    Parse(serde_yaml::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter {
                name,
                value,
                reason,
            } => write!(f, "invalid `{name}` = {value}: {reason}"),
            ConfigError::Parse(err) => write!(f, "failed to parse configuration: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            ConfigError::InvalidParameter { .. } => None,
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Reasons a scenario cannot be turned into a simulation
#[derive(Debug)]
pub enum ScenarioError {
    Config(ConfigError),
    Body(BodyError),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Config(err) => write!(f, "invalid scenario configuration: {err}"),
            ScenarioError::Body(err) => write!(f, "invalid scenario body: {err}"),
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScenarioError::Config(err) => Some(err),
            ScenarioError::Body(err) => Some(err),
        }
    }
}

impl From<ConfigError> for ScenarioError {
    fn from(err: ConfigError) -> Self {
        ScenarioError::Config(err)
    }
}

impl From<BodyError> for ScenarioError {
    fn from(err: BodyError) -> Self {
        ScenarioError::Body(err)
    }
}
