//! Force models for N-body simulations
//!
//! A force model turns a slice of bodies into one net force vector per body,
//! index-aligned with the slice. All positions are read from the slice as
//! given, so callers pass the start-of-step state.

use crate::body::Body;
use nalgebra::Vector3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub mod gravity;


pub use gravity::PairwiseGravity;

/// A source of force on bodies in an N-body system
///
/// # Examples
///
/// ```
/// use interstellar::body::{Body, BodyId, NewBody};
/// use interstellar::config::PhysicsConfig;
/// use interstellar::forces::{ForceModel, PairwiseGravity};
/// use nalgebra::Point3;
///
/// let physics = PhysicsConfig::default();
/// let bodies = vec![
///     Body::from_new(BodyId(0), &NewBody::new(Point3::new(0.0, 0.0, 0.0), 1e24), &physics).unwrap(),
///     Body::from_new(BodyId(1), &NewBody::new(Point3::new(10.0, 0.0, 0.0), 1e24), &physics).unwrap(),
/// ];
///
/// let gravity = PairwiseGravity::from_physics(&physics);
/// let forces = gravity.forces(&bodies);
///
/// // Equal and opposite, pointing at each other
/// assert!(forces[0].x > 0.0);
/// assert_eq!(forces[0], -forces[1]);
/// ```
pub trait ForceModel: Send + Sync {
    /// Net force on the body at `idx` from every other body
    fn force(&self, idx: usize, bodies: &[Body]) -> Vector3<f64>;

    /// Net force on every body, index-aligned with `bodies`
    ///
    /// With the `parallel` feature the outer loop runs on the rayon pool.
    /// Every worker only reads `bodies`, so the result is identical to the
    /// serial computation.
    fn forces(&self, bodies: &[Body]) -> Vec<Vector3<f64>> {
        #[cfg(feature = "parallel")]
        {
            (0..bodies.len())
                .into_par_iter()
                .map(|i| self.force(i, bodies))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            (0..bodies.len()).map(|i| self.force(i, bodies)).collect()
        }
    }

    /// Potential energy of the whole configuration
    ///
    /// Default implementation returns 0.0.
    fn potential_energy(&self, _bodies: &[Body]) -> f64 {
        0.0
    }
}

/// Replaces a vector with zero if any component is NaN or infinite
pub(crate) fn finite_or_zero(v: Vector3<f64>) -> Vector3<f64> {
    if v.iter().all(|c| c.is_finite()) {
        v
    } else {
        Vector3::zeros()
    }
}
