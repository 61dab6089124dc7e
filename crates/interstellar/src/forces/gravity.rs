//! Direct pairwise gravity (O(N²) implementation)

use crate::body::Body;
use crate::config::{ForceLaw, PhysicsConfig};
use crate::forces::{ForceModel, finite_or_zero};
use nalgebra::Vector3;

/// Direct O(N²) gravitational force computation
///
/// Every ordered pair `(i, j)` with `i ≠ j` contributes
/// `G·mᵢ·mⱼ/r² · Δ` to body `i`, where `Δ = pⱼ − pᵢ`. Under
/// [`ForceLaw::Reference`] `Δ` is used as is; under
/// [`ForceLaw::InverseSquare`] it is normalized first.
///
/// A pair at zero separation, or whose contribution is not finite,
/// contributes nothing.
///
/// # Examples
///
/// ```
/// use interstellar::forces::PairwiseGravity;
///
/// // Unit gravitational constant with a little softening
/// let gravity = PairwiseGravity::new(1.0).with_softening(0.01);
/// assert_eq!(gravity.g, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct PairwiseGravity {
    /// Gravitational constant
    pub g: f64,
    /// Optional softening length
    pub softening: f64,
    pub law: ForceLaw,
}

impl PairwiseGravity {
    /// Creates a reference-law gravity with no softening
    pub fn new(g: f64) -> Self {
        Self {
            g,
            softening: 0.0,
            law: ForceLaw::Reference,
        }
    }

    pub fn from_physics(physics: &PhysicsConfig) -> Self {
        Self {
            g: physics.gravitational_constant,
            softening: physics.softening,
            law: physics.force_law,
        }
    }

    pub fn with_softening(mut self, softening: f64) -> Self {
        self.softening = softening;
        self
    }

    pub fn with_law(mut self, law: ForceLaw) -> Self {
        self.law = law;
        self
    }

    /// Force exerted on `on` by `by`
    ///
    /// # Examples
    ///
    /// ```
    /// use interstellar::body::{Body, BodyId, NewBody};
    /// use interstellar::config::PhysicsConfig;
    /// use interstellar::forces::PairwiseGravity;
    /// use nalgebra::Point3;
    ///
    /// let physics = PhysicsConfig::default();
    /// let a = Body::from_new(BodyId(0), &NewBody::new(Point3::new(1.0, 2.0, 3.0), 1e24), &physics).unwrap();
    /// let b = Body::from_new(BodyId(1), &NewBody::new(Point3::new(1.0, 2.0, 3.0), 1e24), &physics).unwrap();
    ///
    /// // Coincident bodies exert no force on each other
    /// let f = PairwiseGravity::new(physics.gravitational_constant).pair_force(&a, &b);
    /// assert_eq!(f.magnitude(), 0.0);
    /// ```
    pub fn pair_force(&self, on: &Body, by: &Body) -> Vector3<f64> {
        let delta = by.position - on.position;
        let dist2 = delta.magnitude_squared() + self.softening * self.softening;

        // Also rejects NaN separations
        if !(dist2 > 0.0 && dist2.is_finite()) {
            return Vector3::zeros();
        }

        let magnitude = self.g * on.mass() * by.mass() / dist2;
        let force = match self.law {
            ForceLaw::Reference => delta * magnitude,
            ForceLaw::InverseSquare => delta * (magnitude / dist2.sqrt()),
        };

        finite_or_zero(force)
    }
}

impl ForceModel for PairwiseGravity {
    fn force(&self, idx: usize, bodies: &[Body]) -> Vector3<f64> {
        let body = &bodies[idx];

        let total = bodies
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != idx)
            .map(|(_, other)| self.pair_force(body, other))
            .fold(Vector3::zeros(), |acc, f| acc + f);

        finite_or_zero(total)
    }

    /// Pairwise potential, each pair counted once
    ///
    /// The reference law's force falls off as `1/r`, so its potential is
    /// `G·m·m·ln r`; the inverse-square law uses the usual `−G·m·m/r`.
    fn potential_energy(&self, bodies: &[Body]) -> f64 {
        let eps2 = self.softening * self.softening;

        bodies
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                bodies[i + 1..].iter().map(move |b| {
                    let r = ((a.position - b.position).magnitude_squared() + eps2).sqrt();
                    if r <= 0.0 {
                        return 0.0;
                    }
                    let gmm = self.g * a.mass() * b.mass();
                    let u = match self.law {
                        ForceLaw::Reference => gmm * r.ln(),
                        ForceLaw::InverseSquare => -gmm / r,
                    };
                    if u.is_finite() { u } else { 0.0 }
                })
            })
            .sum()
    }
}
