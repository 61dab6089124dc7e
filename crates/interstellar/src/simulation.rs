//! One discrete simulation tick and the type that owns the bodies
//!
//! A step runs three phases in a fixed order:
//!
//! 1. Net forces from start-of-step positions
//! 2. Absorption and collision resolution on pre-integration state
//! 3. Integration with the forces from phase 1
//!
//! Resolution runs before integration so that collisions are judged on the
//! positions the forces were computed from.

use log::{trace, warn};

use crate::body::{Body, BodyId, BodyView, NewBody};
use crate::collisions::InteractionResolver;
use crate::config::{ScenarioConfig, SimulationConfig};
use crate::error::{BodyError, ConfigError, ScenarioError};
use crate::forces::{ForceModel, PairwiseGravity};
use crate::integrator::{Integrator, SemiImplicitEuler};
use crate::state::SystemState;

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub absorptions: usize,
    pub collisions: usize,
    /// Detected interactions that were not applied
    pub skipped: usize,
    /// False when `dt` was not finite and integration was skipped
    pub integrated: bool,
}

/// Runs one step over `bodies` with explicit components
///
/// Bodies are mutated in place and never reordered, so anything the caller
/// keeps per index stays aligned.
pub fn step_with(
    bodies: &mut [Body],
    dt: f64,
    config: &SimulationConfig,
    force: &dyn ForceModel,
    resolver: &InteractionResolver,
    integrator: &dyn Integrator,
) -> StepReport {
    let forces = force.forces(bodies);
    let resolution = resolver.resolve(bodies, config);

    let integrated = dt.is_finite();
    if integrated {
        integrator.step(bodies, &forces, dt);
    } else {
        warn!("non-finite timestep {dt}, skipping integration");
    }

    StepReport {
        absorptions: resolution.absorptions,
        collisions: resolution.collisions,
        skipped: resolution.skipped,
        integrated,
    }
}

/// Runs one step with pairwise gravity and semi-implicit Euler
///
/// # Examples
///
/// ```
/// use interstellar::body::{Body, BodyId, NewBody};
/// use interstellar::config::SimulationConfig;
/// use interstellar::simulation::step;
/// use nalgebra::Point3;
///
/// let config = SimulationConfig::default();
/// let mut bodies = vec![
///     Body::from_new(BodyId(0), &NewBody::new(Point3::new(0.0, 0.0, 0.0), 1e30), &config.physics).unwrap(),
///     Body::from_new(BodyId(1), &NewBody::new(Point3::new(500.0, 0.0, 0.0), 1e24), &config.physics).unwrap(),
/// ];
///
/// let report = step(&mut bodies, 1e-3, &config);
/// assert!(report.integrated);
/// // The light body falls toward the heavy one
/// assert!(bodies[1].velocity.x < 0.0);
/// ```
pub fn step(bodies: &mut [Body], dt: f64, config: &SimulationConfig) -> StepReport {
    let gravity = PairwiseGravity::from_physics(&config.physics);
    step_with(
        bodies,
        dt,
        config,
        &gravity,
        &InteractionResolver::new(),
        &SemiImplicitEuler,
    )
}

/// Owns a system of bodies and advances it step by step
///
/// External readers get either a shared borrow between steps
/// ([`bodies`](Simulation::bodies)) or an owned snapshot
/// ([`snapshot`](Simulation::snapshot)); nothing outside can hold a mutable
/// reference across a step.
///
/// # Examples
///
/// ```
/// use interstellar::body::NewBody;
/// use interstellar::simulation::Simulation;
/// use nalgebra::{Point3, Vector3};
///
/// let mut sim = Simulation::default();
/// sim.add_body(NewBody::new(Point3::new(400.0, 400.0, 400.0), 2e30)).unwrap();
/// sim.add_body(
///     NewBody::new(Point3::new(600.0, 400.0, 400.0), 5e24)
///         .with_velocity(Vector3::new(0.0, 1.0, 0.0)),
/// )
/// .unwrap();
///
/// sim.step(1e-2);
/// sim.step(5e-3); // dt may change between steps
///
/// assert!((sim.time() - 1.5e-2).abs() < 1e-15);
/// assert_eq!(sim.snapshot().len(), 2);
/// ```
pub struct Simulation {
    config: SimulationConfig,
    state: SystemState,
    gravity: PairwiseGravity,
    resolver: InteractionResolver,
    integrator: Box<dyn Integrator>,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        Self::with_state(config, SystemState::new())
    }

    /// Resumes from an existing state
    pub fn with_state(config: SimulationConfig, state: SystemState) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            gravity: PairwiseGravity::from_physics(&config.physics),
            resolver: InteractionResolver::new(),
            integrator: Box::new(SemiImplicitEuler),
            config,
            state,
        })
    }

    /// Builds a simulation from a scenario
    ///
    /// The configuration is validated here as well, since a scenario may be
    /// assembled in code rather than loaded with
    /// [`ScenarioConfig::from_yaml_str`].
    pub fn from_scenario(scenario: ScenarioConfig) -> Result<Self, ScenarioError> {
        let mut sim = Self::new(scenario.config)?;
        for new in scenario.bodies {
            sim.add_body(new)?;
        }
        Ok(sim)
    }

    /// Replaces the integrator
    pub fn with_integrator<I: Integrator + 'static>(mut self, integrator: I) -> Self {
        self.integrator = Box::new(integrator);
        self
    }

    pub fn add_body(&mut self, new: NewBody) -> Result<BodyId, BodyError> {
        self.state.add_body(new, &self.config.physics)
    }

    /// Advances the system by one step of length `dt`
    pub fn step(&mut self, dt: f64) -> StepReport {
        let report = step_with(
            &mut self.state.bodies,
            dt,
            &self.config,
            &self.gravity,
            &self.resolver,
            self.integrator.as_ref(),
        );

        if report.integrated {
            self.state.time += dt;
        }
        trace!(
            "t = {:.6e}: {} absorbed, {} collided",
            self.state.time,
            report.absorptions,
            report.collisions
        );

        report
    }

    /// Advances the system by `n_steps` steps of length `dt`
    ///
    /// Returns the reports summed over all steps.
    pub fn integrate(&mut self, dt: f64, n_steps: usize) -> StepReport {
        (0..n_steps).fold(
            StepReport {
                integrated: true,
                ..StepReport::default()
            },
            |acc, _| {
                let report = self.step(dt);
                StepReport {
                    absorptions: acc.absorptions + report.absorptions,
                    collisions: acc.collisions + report.collisions,
                    skipped: acc.skipped + report.skipped,
                    integrated: acc.integrated && report.integrated,
                }
            },
        )
    }

    /// Drops neutralized bodies between steps and returns their IDs
    pub fn compact(&mut self) -> Vec<BodyId> {
        self.state.compact(&self.config.physics)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.state.bodies
    }

    pub fn snapshot(&self) -> Vec<BodyView> {
        self.state.snapshot(&self.config.physics)
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn time(&self) -> f64 {
        self.state.time
    }

    /// Total kinetic plus potential energy under the configured force law
    pub fn total_energy(&self) -> f64 {
        self.state.kinetic_energy() + self.gravity.potential_energy(&self.state.bodies)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        let config = SimulationConfig::default();
        Self {
            gravity: PairwiseGravity::from_physics(&config.physics),
            resolver: InteractionResolver::new(),
            integrator: Box::new(SemiImplicitEuler),
            config,
            state: SystemState::new(),
        }
    }
}
