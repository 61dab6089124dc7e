//! Time integration for N-body systems
//!
//! Integrators take the per-body net forces computed for the current step
//! and advance velocities and positions by `dt`. They keep no state between
//! calls, so `dt` may change freely from one step to the next. A body whose
//! update would overflow keeps its previous state.

use crate::body::Body;
use crate::forces::finite_or_zero;
use log::trace;
use nalgebra::{Point3, Vector3};

/// A time integrator for N-body systems
pub trait Integrator: Send + Sync {
    /// Advance every body by one timestep
    ///
    /// # Arguments
    ///
    /// * `bodies` - Bodies to advance (modified in place)
    /// * `forces` - Net force on each body, index-aligned with `bodies`
    /// * `dt` - Timestep
    fn step(&self, bodies: &mut [Body], forces: &[Vector3<f64>], dt: f64);
}

/// Acceleration `F / m`, or zero when it cannot be computed
///
/// Non-positive or non-finite masses and non-finite results all give zero,
/// so a single degenerate body cannot spread NaN into the system.
pub fn acceleration(force: &Vector3<f64>, mass: f64) -> Vector3<f64> {
    if !(mass.is_finite() && mass > 0.0) {
        return Vector3::zeros();
    }
    finite_or_zero(force / mass)
}

/// Writes an updated state, or leaves the body alone if the update overflowed
///
/// Returns whether the update was applied.
pub fn commit_if_finite(body: &mut Body, velocity: Vector3<f64>, position: Point3<f64>) -> bool {
    let finite = velocity.iter().all(|c| c.is_finite())
        && position.coords.iter().all(|c| c.is_finite());
    if finite {
        body.velocity = velocity;
        body.position = position;
    } else {
        trace!("body {} update overflowed, state kept", body.id.0);
    }
    finite
}

/// Semi-implicit (symplectic) Euler integrator
///
/// Updates velocity from force first, then position from the new velocity:
///
/// 1. v(t + dt) = v(t) + F(t)/m · dt
/// 2. x(t + dt) = x(t) + v(t + dt) · dt
///
/// Unlike explicit Euler, this keeps the energy error of a bound orbit
/// bounded instead of letting it grow every revolution.
///
/// # Examples
///
/// ```
/// use interstellar::body::{Body, BodyId, NewBody};
/// use interstellar::config::PhysicsConfig;
/// use interstellar::integrator::{Integrator, SemiImplicitEuler};
/// use nalgebra::{Point3, Vector3};
///
/// let physics = PhysicsConfig::default();
/// let mut bodies = vec![Body::from_new(BodyId(0), &NewBody::new(Point3::origin(), 2.0), &physics).unwrap()];
///
/// SemiImplicitEuler.step(&mut bodies, &[Vector3::new(4.0, 0.0, 0.0)], 0.5);
///
/// // v = 4/2 · 0.5 = 1, then x = 1 · 0.5
/// assert_eq!(bodies[0].velocity, Vector3::new(1.0, 0.0, 0.0));
/// assert_eq!(bodies[0].position, Point3::new(0.5, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn step(&self, bodies: &mut [Body], forces: &[Vector3<f64>], dt: f64) {
        bodies
            .iter_mut()
            .zip(forces.iter())
            .for_each(|(body, force)| {
                let accel = acceleration(force, body.mass());
                let velocity = body.velocity + accel * dt;
                let position = body.position + velocity * dt;
                commit_if_finite(body, velocity, position);
            });
    }
}

/// Simple explicit Euler integrator (1st order, for testing/comparison only)
///
/// Moves positions with the old velocity before updating it, so circular
/// orbits spiral outward. Use [`SemiImplicitEuler`] for simulations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn step(&self, bodies: &mut [Body], forces: &[Vector3<f64>], dt: f64) {
        bodies
            .iter_mut()
            .zip(forces.iter())
            .for_each(|(body, force)| {
                let accel = acceleration(force, body.mass());
                let position = body.position + body.velocity * dt;
                let velocity = body.velocity + accel * dt;
                commit_if_finite(body, velocity, position);
            });
    }
}
