//! Gravitational N-body kernel with collisions and critical-radius absorption
//!
//! The kernel advances an ordered collection of bodies one step at a time:
//! pairwise gravity, then absorption/collision resolution, then
//! semi-implicit Euler integration. Bodies that are absorbed are neutralized
//! in place rather than removed, so indices stay valid for the whole step.
//!
//! ```
//! use interstellar::body::NewBody;
//! use interstellar::simulation::Simulation;
//! use nalgebra::Point3;
//!
//! let mut sim = Simulation::default();
//! sim.add_body(NewBody::new(Point3::new(400.0, 400.0, 0.0), 4e47).with_radius(5.0)).unwrap();
//! sim.add_body(NewBody::new(Point3::new(405.0, 400.0, 0.0), 5e24)).unwrap();
//!
//! let report = sim.step(1e-20);
//! assert_eq!(report.absorptions, 1);
//! assert!(sim.bodies()[1].is_neutralized(&sim.config().physics));
//! ```

pub mod body;
pub mod collisions;
pub mod config;
pub mod constants;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod simulation;
pub mod state;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod integrator_test;

pub use body::{Body, BodyId, BodyView, Classification, Color, NewBody};
pub use config::{ScenarioConfig, SimulationConfig};
pub use error::{BodyError, ConfigError, ScenarioError};
pub use simulation::{Simulation, StepReport, step};
