use std::f64::consts::PI;

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use crate::body::{Body, BodyId, NewBody};
use crate::config::{ForceLaw, PhysicsConfig};
use crate::forces::{ForceModel, PairwiseGravity};
use crate::integrator::{
    ExplicitEuler, Integrator, SemiImplicitEuler, acceleration, commit_if_finite,
};

const CENTRAL_MASS: f64 = 1000.0;
const ORBIT_RADIUS: f64 = 10.0;

/// Light body on a circular orbit around a heavy one, G = 1
fn circular_orbit(orbital_speed: f64) -> Vec<Body> {
    let physics = PhysicsConfig::default();
    let sun = NewBody::new(Point3::origin(), CENTRAL_MASS);
    let planet = NewBody::new(Point3::new(ORBIT_RADIUS, 0.0, 0.0), 1e-3)
        .with_velocity(Vector3::new(0.0, orbital_speed, 0.0));

    vec![
        Body::from_new(BodyId(0), &sun, &physics).unwrap(),
        Body::from_new(BodyId(1), &planet, &physics).unwrap(),
    ]
}

/// Runs one orbit and returns the largest relative radius error seen
fn max_radius_error(
    bodies: &mut [Body],
    gravity: &PairwiseGravity,
    integrator: &dyn Integrator,
    period: f64,
    steps: usize,
) -> f64 {
    let dt = period / steps as f64;
    let mut worst: f64 = 0.0;

    for _ in 0..steps {
        let forces = gravity.forces(bodies);
        integrator.step(bodies, &forces, dt);

        let r = bodies[0].distance_to(&bodies[1]);
        worst = worst.max((r - ORBIT_RADIUS).abs() / ORBIT_RADIUS);
    }

    worst
}

#[test]
fn test_semi_implicit_update_order() {
    let physics = PhysicsConfig::default();
    let new = NewBody::new(Point3::origin(), 1.0).with_velocity(Vector3::new(1.0, 0.0, 0.0));
    let mut bodies = vec![Body::from_new(BodyId(0), &new, &physics).unwrap()];

    SemiImplicitEuler.step(&mut bodies, &[Vector3::new(2.0, 0.0, 0.0)], 1.0);

    // Position uses the updated velocity
    assert_eq!(bodies[0].velocity, Vector3::new(3.0, 0.0, 0.0));
    assert_eq!(bodies[0].position, Point3::new(3.0, 0.0, 0.0));
}

#[test]
fn test_explicit_update_order() {
    let physics = PhysicsConfig::default();
    let new = NewBody::new(Point3::origin(), 1.0).with_velocity(Vector3::new(1.0, 0.0, 0.0));
    let mut bodies = vec![Body::from_new(BodyId(0), &new, &physics).unwrap()];

    ExplicitEuler.step(&mut bodies, &[Vector3::new(2.0, 0.0, 0.0)], 1.0);

    assert_eq!(bodies[0].velocity, Vector3::new(3.0, 0.0, 0.0));
    assert_eq!(bodies[0].position, Point3::new(1.0, 0.0, 0.0));
}

#[test]
fn test_zero_timestep_changes_nothing() {
    let physics = PhysicsConfig::default();
    let new = NewBody::new(Point3::new(1.0, 2.0, 3.0), 5.0)
        .with_velocity(Vector3::new(-1.0, 0.5, 0.0));
    let mut bodies = vec![Body::from_new(BodyId(0), &new, &physics).unwrap()];
    let before = bodies.clone();

    SemiImplicitEuler.step(&mut bodies, &[Vector3::new(10.0, 10.0, 10.0)], 0.0);

    assert_eq!(bodies, before);
}

#[test]
fn test_reference_law_circular_orbit() {
    // Reference law acceleration is G·M/r, so v = sqrt(G·M)
    let speed = CENTRAL_MASS.sqrt();
    let period = 2.0 * PI * ORBIT_RADIUS / speed;
    let mut bodies = circular_orbit(speed);
    let gravity = PairwiseGravity::new(1.0);

    let error = max_radius_error(&mut bodies, &gravity, &SemiImplicitEuler, period, 2000);

    assert!(error < 0.01, "radius drifted by {error}");
}

#[test]
fn test_inverse_square_circular_orbit() {
    let speed = (CENTRAL_MASS / ORBIT_RADIUS).sqrt();
    let period = 2.0 * PI * ORBIT_RADIUS / speed;
    let mut bodies = circular_orbit(speed);
    let gravity = PairwiseGravity::new(1.0).with_law(ForceLaw::InverseSquare);

    let error = max_radius_error(&mut bodies, &gravity, &SemiImplicitEuler, period, 2000);

    assert!(error < 0.01, "radius drifted by {error}");
}

#[test]
fn test_explicit_euler_drifts_more() {
    let speed = (CENTRAL_MASS / ORBIT_RADIUS).sqrt();
    let period = 2.0 * PI * ORBIT_RADIUS / speed;
    let gravity = PairwiseGravity::new(1.0).with_law(ForceLaw::InverseSquare);

    let semi = max_radius_error(
        &mut circular_orbit(speed),
        &gravity,
        &SemiImplicitEuler,
        period,
        500,
    );
    let explicit = max_radius_error(
        &mut circular_orbit(speed),
        &gravity,
        &ExplicitEuler,
        period,
        500,
    );

    assert!(explicit > semi, "explicit {explicit} vs semi-implicit {semi}");
}

#[test]
fn test_acceleration() {
    let a = acceleration(&Vector3::new(4.0, -2.0, 1.0), 2.0);
    assert_relative_eq!(a.x, 2.0);
    assert_relative_eq!(a.y, -1.0);
    assert_relative_eq!(a.z, 0.5);
}

#[test]
fn test_acceleration_guards() {
    let force = Vector3::new(1.0, 1.0, 1.0);

    assert_eq!(acceleration(&force, 0.0), Vector3::zeros());
    assert_eq!(acceleration(&force, -1.0), Vector3::zeros());
    assert_eq!(acceleration(&force, f64::NAN), Vector3::zeros());
    assert_eq!(acceleration(&force, f64::INFINITY), Vector3::zeros());
    assert_eq!(
        acceleration(&Vector3::new(f64::NAN, 0.0, 0.0), 1.0),
        Vector3::zeros()
    );
    assert_eq!(acceleration(&Vector3::new(1e300, 0.0, 0.0), 1e-300), Vector3::zeros());
}

#[test]
fn test_overflowing_velocity_keeps_state() {
    let physics = PhysicsConfig::default();
    let new = NewBody::new(Point3::new(1.0, 0.0, 0.0), 1.0)
        .with_velocity(Vector3::new(0.0, 2.0, 0.0));
    let mut bodies = vec![
        Body::from_new(BodyId(0), &new, &physics).unwrap(),
        Body::from_new(BodyId(1), &new, &physics).unwrap(),
    ];
    let before = bodies.clone();
    let forces = [Vector3::new(1e300, 0.0, 0.0), Vector3::zeros()];

    SemiImplicitEuler.step(&mut bodies, &forces, 1e10);

    // Finite acceleration, but 1e300 · 1e10 overflows
    assert_eq!(bodies[0], before[0]);
    // The other body still moves
    assert_eq!(bodies[1].position, Point3::new(1.0, 2e10, 0.0));
}

#[test]
fn test_overflowing_position_keeps_state() {
    let physics = PhysicsConfig::default();
    let new = NewBody::new(Point3::origin(), 1.0).with_velocity(Vector3::new(1e300, 0.0, 0.0));
    let mut bodies = vec![Body::from_new(BodyId(0), &new, &physics).unwrap()];
    let before = bodies.clone();

    ExplicitEuler.step(&mut bodies, &[Vector3::zeros()], 1e10);
    assert_eq!(bodies, before);

    SemiImplicitEuler.step(&mut bodies, &[Vector3::zeros()], 1e10);
    assert_eq!(bodies, before);
}

#[test]
fn test_commit_if_finite() {
    let physics = PhysicsConfig::default();
    let mut body = Body::from_new(BodyId(0), &NewBody::new(Point3::origin(), 1.0), &physics).unwrap();

    assert!(!commit_if_finite(
        &mut body,
        Vector3::new(f64::INFINITY, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0)
    ));
    assert_eq!(body.position, Point3::origin());

    assert!(commit_if_finite(&mut body, Vector3::new(1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)));
    assert_eq!(body.position, Point3::new(1.0, 0.0, 0.0));
    assert_eq!(body.velocity, Vector3::new(1.0, 0.0, 0.0));
}
