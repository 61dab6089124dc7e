use nalgebra::Vector3;

use crate::body::{Body, BodyId, BodyView, NewBody};
use crate::config::PhysicsConfig;
use crate::error::BodyError;

/// Complete state of an N-body system at a given time
///
/// Bodies are never removed during a step. Consumed bodies stay in place,
/// neutralized, so that per-index force arrays keep lining up; [`compact`]
/// drops them between steps if the caller wants to.
///
/// [`compact`]: SystemState::compact
#[derive(Debug, Clone, Default)]
pub struct SystemState {
    /// Accumulated simulation time
    pub time: f64,
    /// Bodies in insertion order
    pub bodies: Vec<Body>,
    /// Next available body ID
    next_id: u32,
}

impl SystemState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new body to the system and returns its ID
    ///
    /// # Examples
    ///
    /// ```
    /// use interstellar::body::NewBody;
    /// use interstellar::config::PhysicsConfig;
    /// use interstellar::state::SystemState;
    /// use nalgebra::Point3;
    ///
    /// let physics = PhysicsConfig::default();
    /// let mut system = SystemState::new();
    ///
    /// let id = system
    ///     .add_body(NewBody::new(Point3::new(400.0, 400.0, 400.0), 2e30), &physics)
    ///     .unwrap();
    /// assert_eq!(id.0, 0);
    /// assert_eq!(system.body_count(), 1);
    ///
    /// // Non-positive mass is rejected and does not consume an ID
    /// assert!(system.add_body(NewBody::new(Point3::origin(), 0.0), &physics).is_err());
    /// assert_eq!(system.body_count(), 1);
    /// ```
    pub fn add_body(&mut self, new: NewBody, physics: &PhysicsConfig) -> Result<BodyId, BodyError> {
        let id = BodyId(self.next_id);
        let body = Body::from_new(id, &new, physics)?;
        self.next_id += 1;
        self.bodies.push(body);
        Ok(id)
    }

    pub fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Returns the number of bodies, neutralized ones included
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn live_count(&self, physics: &PhysicsConfig) -> usize {
        self.bodies
            .iter()
            .filter(|b| !b.is_neutralized(physics))
            .count()
    }

    /// Total mass of every body, neutralized remnants included
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass()).sum()
    }

    /// Total mass of bodies that have not been neutralized
    pub fn live_mass(&self, physics: &PhysicsConfig) -> f64 {
        self.bodies
            .iter()
            .filter(|b| !b.is_neutralized(physics))
            .map(|b| b.mass())
            .sum()
    }

    pub fn total_momentum(&self) -> Vector3<f64> {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(Vector3::zeros(), |acc, p| acc + p)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }

    /// Drops neutralized bodies and returns their IDs
    ///
    /// Must only be called between steps. Surviving bodies keep their IDs and
    /// relative order.
    pub fn compact(&mut self, physics: &PhysicsConfig) -> Vec<BodyId> {
        let removed = self
            .bodies
            .iter()
            .filter(|b| b.is_neutralized(physics))
            .map(|b| b.id)
            .collect();
        self.bodies.retain(|b| !b.is_neutralized(physics));
        removed
    }

    /// Owned per-body views for renderers
    pub fn snapshot(&self, physics: &PhysicsConfig) -> Vec<BodyView> {
        self.bodies.iter().map(|b| b.view(physics)).collect()
    }
}
