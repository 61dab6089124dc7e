//! Resolution of absorptions and collisions
//!
//! Both rules end in the same mass transfer: the heavier body takes the
//! lighter body's entire mass and the lighter body is neutralized in place.
//! On equal masses the body with the lower index wins.
//!
//! Absorption leaves the winner's velocity untouched, so momentum is not
//! conserved. Collision first sets both velocities from the perfectly
//! inelastic common velocity, `vᵢ = v_common` and `vⱼ = −v_common` with
//! `i < j`.
//!
//! Every event is applied transactionally: all new values are computed and
//! checked first, and a pair whose results would not be finite is skipped
//! without touching either body.

use std::collections::HashSet;

use log::{debug, trace};
use nalgebra::Vector3;

use crate::body::Body;
use crate::collisions::detection::{DirectDetector, InteractionEvent, InteractionKind};
use crate::config::{PhysicsConfig, RadiusPolicy, ResolutionOrder, SimulationConfig};

/// Why an event was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// One of the bodies already lost an interaction this step
    Consumed,
    /// One of the bodies was neutralized before this step
    Neutralized,
    /// A collision whose body became compact earlier in the step
    Compact,
    /// The outcome would contain NaN or infinite values
    NonFinite,
    /// An index outside the body slice
    OutOfRange,
}

/// Counts of what happened during one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    pub absorptions: usize,
    pub collisions: usize,
    pub skipped: usize,
}

/// Splits a pair into `(winner, loser)`, lower index winning ties
///
/// # Examples
///
/// ```
/// use interstellar::collisions::pick_winner;
///
/// assert_eq!(pick_winner((0, 1.0), (1, 2.0)), (1, 0));
/// assert_eq!(pick_winner((0, 3.0), (1, 2.0)), (0, 1));
/// assert_eq!(pick_winner((4, 2.0), (7, 2.0)), (4, 7));
/// assert_eq!(pick_winner((7, 2.0), (4, 2.0)), (4, 7));
/// ```
pub fn pick_winner((i, mass_i): (usize, f64), (j, mass_j): (usize, f64)) -> (usize, usize) {
    if mass_i > mass_j || (mass_i == mass_j && i < j) {
        (i, j)
    } else {
        (j, i)
    }
}

/// Perfectly inelastic common velocity of two bodies
///
/// # Examples
///
/// ```
/// use interstellar::collisions::common_velocity;
/// use nalgebra::Vector3;
///
/// let v = common_velocity(10.0, Vector3::new(1.0, 0.0, 0.0), 10.0, Vector3::new(-1.0, 0.0, 0.0));
/// assert_eq!(v, Vector3::zeros());
/// ```
pub fn common_velocity(
    mass_a: f64,
    velocity_a: Vector3<f64>,
    mass_b: f64,
    velocity_b: Vector3<f64>,
) -> Vector3<f64> {
    (velocity_a * mass_a + velocity_b * mass_b) / (mass_a + mass_b)
}

/// Values a mass transfer will write, computed before anything is written
struct Transfer {
    winner: usize,
    loser: usize,
    absorbed_mass: f64,
    loser_radius: f64,
}

fn plan_transfer(
    bodies: &[Body],
    a: usize,
    b: usize,
    physics: &PhysicsConfig,
    policy: &RadiusPolicy,
) -> Result<Transfer, SkipReason> {
    let (winner, loser) = pick_winner((a, bodies[a].mass()), (b, bodies[b].mass()));
    let absorbed_mass = bodies[loser].mass();
    let winner_mass = bodies[winner].mass() + absorbed_mass;
    let loser_radius = policy.shrink(
        bodies[loser].radius(),
        bodies[winner].radius(),
        physics.min_radius,
    );

    if !(winner_mass.is_finite() && winner_mass > 0.0) {
        return Err(SkipReason::NonFinite);
    }

    Ok(Transfer {
        winner,
        loser,
        absorbed_mass,
        loser_radius,
    })
}

fn commit_transfer(bodies: &mut [Body], transfer: &Transfer, physics: &PhysicsConfig) {
    bodies[transfer.winner].gain_mass(transfer.absorbed_mass, physics);
    bodies[transfer.loser].neutralize(transfer.loser_radius, physics);
}

/// Applies one event to the bodies
///
/// Returns the index of the neutralized body.
pub fn apply_event(
    bodies: &mut [Body],
    event: &InteractionEvent,
    config: &SimulationConfig,
) -> Result<usize, SkipReason> {
    let physics = &config.physics;
    let (a, b) = (event.body_a, event.body_b);

    if a >= bodies.len() || b >= bodies.len() || a == b {
        return Err(SkipReason::OutOfRange);
    }
    if bodies[a].is_neutralized(physics) || bodies[b].is_neutralized(physics) {
        return Err(SkipReason::Neutralized);
    }

    match event.kind {
        InteractionKind::Absorption => {
            let transfer = plan_transfer(bodies, a, b, physics, &config.resolution.radius_policy)?;
            commit_transfer(bodies, &transfer, physics);
            Ok(transfer.loser)
        }
        InteractionKind::Collision => {
            if bodies[a].is_compact() || bodies[b].is_compact() {
                return Err(SkipReason::Compact);
            }

            let v_common = common_velocity(
                bodies[a].mass(),
                bodies[a].velocity,
                bodies[b].mass(),
                bodies[b].velocity,
            );
            if !v_common.iter().all(|c| c.is_finite()) {
                return Err(SkipReason::NonFinite);
            }
            let transfer = plan_transfer(bodies, a, b, physics, &config.resolution.radius_policy)?;

            bodies[a].velocity = v_common;
            bodies[b].velocity = -v_common;
            commit_transfer(bodies, &transfer, physics);
            Ok(transfer.loser)
        }
    }
}

/// Process all interaction events in the configured order
///
/// A body that loses an interaction is never processed again in the same
/// pass. Winners may keep absorbing.
pub fn resolve_interactions(
    bodies: &mut [Body],
    mut events: Vec<InteractionEvent>,
    config: &SimulationConfig,
) -> ResolutionReport {
    match config.resolution.order {
        ResolutionOrder::IndexOrder => events.sort_by_key(|e| (e.body_a, e.body_b)),
        ResolutionOrder::ClosestFirst => events.sort_by(|a, b| {
            a.separation
                .total_cmp(&b.separation)
                .then((a.body_a, a.body_b).cmp(&(b.body_a, b.body_b)))
        }),
    }

    let mut consumed: HashSet<usize> = HashSet::new();
    let mut report = ResolutionReport::default();

    for event in events {
        let outcome = if consumed.contains(&event.body_a) || consumed.contains(&event.body_b) {
            Err(SkipReason::Consumed)
        } else {
            apply_event(bodies, &event, config)
        };

        match outcome {
            Ok(loser) => {
                consumed.insert(loser);
                let winner = if loser == event.body_a {
                    event.body_b
                } else {
                    event.body_a
                };
                debug!(
                    "{:?}: body {} took body {} at separation {:.3e}, mass now {:.4e}",
                    event.kind,
                    bodies[winner].id.0,
                    bodies[loser].id.0,
                    event.separation,
                    bodies[winner].mass()
                );
                match event.kind {
                    InteractionKind::Absorption => report.absorptions += 1,
                    InteractionKind::Collision => report.collisions += 1,
                }
            }
            Err(reason) => {
                trace!(
                    "skipped {:?} between indices {} and {}: {:?}",
                    event.kind,
                    event.body_a,
                    event.body_b,
                    reason
                );
                report.skipped += 1;
            }
        }
    }

    report
}

/// Detects and resolves interactions in one pass
///
/// # Examples
///
/// ```
/// use interstellar::body::{Body, BodyId, NewBody};
/// use interstellar::collisions::InteractionResolver;
/// use interstellar::config::SimulationConfig;
/// use nalgebra::{Point3, Vector3};
///
/// let config = SimulationConfig::default();
/// let mut bodies = vec![
///     Body::from_new(BodyId(0), &NewBody::new(Point3::new(0.0, 0.0, 0.0), 10.0)
///         .with_velocity(Vector3::new(1.0, 0.0, 0.0)), &config.physics).unwrap(),
///     Body::from_new(BodyId(1), &NewBody::new(Point3::new(1.5, 0.0, 0.0), 10.0)
///         .with_velocity(Vector3::new(-1.0, 0.0, 0.0)), &config.physics).unwrap(),
/// ];
///
/// let report = InteractionResolver::new().resolve(&mut bodies, &config);
/// assert_eq!(report.collisions, 1);
/// assert_eq!(bodies[0].mass(), 20.0);
/// assert!(bodies[1].is_neutralized(&config.physics));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractionResolver {
    detector: DirectDetector,
}

impl InteractionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, bodies: &mut [Body], config: &SimulationConfig) -> ResolutionReport {
        let events = self.detector.detect(bodies, config);
        if events.is_empty() {
            return ResolutionReport::default();
        }
        resolve_interactions(bodies, events, config)
    }
}
