use crate::config::{
    ForceLaw, PhysicsConfig, RadiusPolicy, ResolutionOrder, ScenarioConfig, SimulationConfig,
};
use crate::constants;
use crate::error::ConfigError;

#[test]
fn test_default_matches_reference_constants() {
    let config = SimulationConfig::default();

    assert_eq!(config.physics.gravitational_constant, constants::G);
    assert_eq!(config.physics.speed_of_light, constants::C);
    assert_eq!(config.physics.compact_mass_threshold, 1e42);
    assert_eq!(config.physics.neutral_mass, 1e-10);
    assert_eq!(config.physics.critical_radius_scale, 4e19);
    assert_eq!(config.physics.softening, 0.0);
    assert_eq!(config.physics.force_law, ForceLaw::Reference);
    assert!(config.resolution.absorption_enabled);
    assert!(config.resolution.collisions_enabled);
    assert_eq!(config.resolution.radius_policy, RadiusPolicy::ReciprocalOfWinner);
    assert_eq!(config.resolution.order, ResolutionOrder::IndexOrder);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_yaml_gives_defaults() {
    let config = SimulationConfig::from_yaml_str("{}").unwrap();
    assert_eq!(config, SimulationConfig::default());
}

#[test]
fn test_yaml_overrides() {
    let yaml = r#"
physics:
  gravitational_constant: 1.0
  force_law: inverse_square
  softening: 0.05
resolution:
  collisions_enabled: false
  order: closest_first
  radius_policy:
    kind: scale
    factor: 0.1
"#;
    let config = SimulationConfig::from_yaml_str(yaml).unwrap();

    assert_eq!(config.physics.gravitational_constant, 1.0);
    assert_eq!(config.physics.force_law, ForceLaw::InverseSquare);
    assert_eq!(config.physics.softening, 0.05);
    // Untouched keys keep defaults
    assert_eq!(config.physics.compact_mass_threshold, 1e42);
    assert!(!config.resolution.collisions_enabled);
    assert!(config.resolution.absorption_enabled);
    assert_eq!(config.resolution.order, ResolutionOrder::ClosestFirst);
    assert_eq!(
        config.resolution.radius_policy,
        RadiusPolicy::Scale { factor: 0.1 }
    );
}

#[test]
fn test_yaml_fixed_radius_policy() {
    let yaml = "resolution:\n  radius_policy:\n    kind: fixed\n    radius: 0.5\n";
    let config = SimulationConfig::from_yaml_str(yaml).unwrap();

    assert_eq!(
        config.resolution.radius_policy,
        RadiusPolicy::Fixed { radius: 0.5 }
    );
}

#[test]
fn test_yaml_rejects_invalid_values() {
    let err = SimulationConfig::from_yaml_str("physics:\n  speed_of_light: 0.0\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidParameter {
            name: "speed_of_light",
            ..
        }
    ));

    let yaml = "resolution:\n  radius_policy:\n    kind: scale\n    factor: 2.0\n";
    let err = SimulationConfig::from_yaml_str(yaml).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidParameter {
            name: "radius_policy.factor",
            ..
        }
    ));
}

#[test]
fn test_yaml_parse_error() {
    let err = SimulationConfig::from_yaml_str("physics: [not, a, map]").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("failed to parse configuration"));
}

#[test]
fn test_validate_rejects_negative_softening() {
    let physics = PhysicsConfig {
        softening: -1.0,
        ..PhysicsConfig::default()
    };

    assert!(physics.validate().is_err());
}

#[test]
fn test_validate_rejects_nan() {
    let physics = PhysicsConfig {
        neutral_mass: f64::NAN,
        ..PhysicsConfig::default()
    };

    let err = physics.validate().unwrap_err();
    assert!(err.to_string().contains("neutral_mass"));
}

#[test]
fn test_radius_policy_reciprocal() {
    let policy = RadiusPolicy::ReciprocalOfWinner;

    assert_eq!(policy.shrink(4.0, 8.0, 1e-6), 0.5);
    assert_eq!(policy.shrink(1.0, 12.0, 0.1), 0.1);
    // Never grows the loser
    assert_eq!(policy.shrink(4.0, 0.25, 1e-6), 4.0);
}

#[test]
fn test_radius_policy_scale_and_fixed() {
    assert_eq!(RadiusPolicy::Scale { factor: 0.5 }.shrink(3.0, 100.0, 1e-6), 1.5);
    assert_eq!(RadiusPolicy::Fixed { radius: 0.2 }.shrink(3.0, 100.0, 1e-6), 0.2);
    assert_eq!(RadiusPolicy::Fixed { radius: 0.2 }.shrink(3.0, 100.0, 0.5), 0.5);
}

#[test]
fn test_radius_policy_non_finite_clamps() {
    let shrunk = RadiusPolicy::ReciprocalOfWinner.shrink(f64::INFINITY, 2.0, 1e-3);
    assert_eq!(shrunk, 1e-3);
}

#[test]
fn test_scenario_from_yaml() {
    let yaml = r#"
bodies:
  - position: [400.0, 400.0, 400.0]
    mass: 2.0e30
    color: [255, 160, 0]
  - position: [100.0, 200.0, 400.0]
    mass: 5.0e24
    velocity: [0.0, 1.0, 0.0]
"#;
    let scenario = ScenarioConfig::from_yaml_str(yaml).unwrap();

    assert_eq!(scenario.config, SimulationConfig::default());
    assert_eq!(scenario.bodies.len(), 2);
    assert_eq!(scenario.bodies[0].radius, None);
    assert_eq!(scenario.bodies[1].velocity.y, 1.0);
}

#[test]
fn test_scenario_rejects_invalid_config() {
    let yaml = "config:\n  physics:\n    min_radius: -1.0\n";
    assert!(ScenarioConfig::from_yaml_str(yaml).is_err());
}
