//! Detection of absorption and collision candidates
//!
//! Detection is read-only: it scans every unordered pair once against the
//! state passed in and reports the first rule each pair satisfies.
//! Absorption is checked before physical collision.

use crate::body::Body;
use crate::config::{PhysicsConfig, ResolutionConfig, SimulationConfig};

/// Which rule a pair triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// Separation below the summed, scale-normalized critical radii
    Absorption,
    /// Separation at or below the summed radii of two non-compact bodies
    Collision,
}

/// A detected interaction between two bodies
///
/// Bodies are referenced by their index in the slice that was scanned, with
/// `body_a < body_b`.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionEvent {
    pub body_a: usize,
    pub body_b: usize,
    pub kind: InteractionKind,
    /// Separation at detection time
    pub separation: f64,
    /// Threshold the separation fell under
    pub threshold: f64,
}

/// Distance under which two bodies absorb one another
///
/// # Examples
///
/// ```
/// use interstellar::body::{Body, BodyId, NewBody};
/// use interstellar::collisions::absorption_threshold;
/// use interstellar::config::PhysicsConfig;
/// use nalgebra::Point3;
///
/// let physics = PhysicsConfig::default();
/// let hole = Body::from_new(BodyId(0), &NewBody::new(Point3::origin(), 4e47).with_radius(5.0), &physics).unwrap();
/// let earth = Body::from_new(BodyId(1), &NewBody::new(Point3::new(10.0, 0.0, 0.0), 5e24), &physics).unwrap();
///
/// // A 4e47 kg hole reaches about 14.8 world units
/// let threshold = absorption_threshold(&hole, &earth, &physics);
/// assert!(threshold > 14.0 && threshold < 15.0);
/// ```
pub fn absorption_threshold(a: &Body, b: &Body, physics: &PhysicsConfig) -> f64 {
    (a.critical_radius() + b.critical_radius()) / physics.critical_radius_scale
}

/// Check whether a pair of bodies interacts this step
///
/// Pairs involving a neutralized body, or whose separation is not finite,
/// never interact.
pub fn check_pair(
    (i, a): (usize, &Body),
    (j, b): (usize, &Body),
    physics: &PhysicsConfig,
    resolution: &ResolutionConfig,
) -> Option<InteractionEvent> {
    if a.is_neutralized(physics) || b.is_neutralized(physics) {
        return None;
    }

    let separation = a.distance_to(b);
    if !separation.is_finite() {
        return None;
    }

    let (body_a, body_b) = if i < j { (i, j) } else { (j, i) };

    if resolution.absorption_enabled {
        let threshold = absorption_threshold(a, b, physics);
        if separation < threshold {
            return Some(InteractionEvent {
                body_a,
                body_b,
                kind: InteractionKind::Absorption,
                separation,
                threshold,
            });
        }
    }

    if resolution.collisions_enabled && !a.is_compact() && !b.is_compact() {
        let threshold = a.radius() + b.radius();
        if separation <= threshold {
            return Some(InteractionEvent {
                body_a,
                body_b,
                kind: InteractionKind::Collision,
                separation,
                threshold,
            });
        }
    }

    None
}

/// Direct O(N²) interaction detector
///
/// Checks every unordered pair and returns events in ascending `(i, j)`
/// index order.
///
/// # Examples
///
/// ```
/// use interstellar::body::{Body, BodyId, NewBody};
/// use interstellar::collisions::{DirectDetector, InteractionKind};
/// use interstellar::config::SimulationConfig;
/// use nalgebra::Point3;
///
/// let config = SimulationConfig::default();
/// let bodies: Vec<Body> = [0.0, 1.5, 100.0]
///     .iter()
///     .enumerate()
///     .map(|(i, &x)| {
///         let new = NewBody::new(Point3::new(x, 0.0, 0.0), 10.0);
///         Body::from_new(BodyId(i as u32), &new, &config.physics).unwrap()
///     })
///     .collect();
///
/// let events = DirectDetector.detect(&bodies, &config);
/// assert_eq!(events.len(), 1);
/// assert_eq!((events[0].body_a, events[0].body_b), (0, 1));
/// assert_eq!(events[0].kind, InteractionKind::Collision);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectDetector;

impl DirectDetector {
    pub fn detect(&self, bodies: &[Body], config: &SimulationConfig) -> Vec<InteractionEvent> {
        let n = bodies.len();

        (0..n)
            .flat_map(|i| {
                ((i + 1)..n).filter_map(move |j| {
                    check_pair(
                        (i, &bodies[i]),
                        (j, &bodies[j]),
                        &config.physics,
                        &config.resolution,
                    )
                })
            })
            .collect()
    }
}
