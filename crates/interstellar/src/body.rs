//! Simulated bodies and their construction requests
//!
//! Mass drives everything else about a body: radius (unless given
//! explicitly), critical radius and classification are all derived from it.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::config::PhysicsConfig;
use crate::error::BodyError;

/// Stable identifier, unique within one system and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Label derived from mass; compact bodies skip ordinary collisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Normal,
    Compact,
}

/// RGB display color, carried for renderers and ignored by the physics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub [u8; 3]);

impl Default for Color {
    fn default() -> Self {
        Color([255, 255, 255])
    }
}

/// Construction request for a body
///
/// Radius and critical radius are derived from mass unless a radius is given
/// explicitly, which is how compact objects smaller than their mass would
/// suggest are created.
///
/// # Examples
///
/// ```
/// use interstellar::body::{Body, BodyId, Classification, NewBody};
/// use interstellar::config::PhysicsConfig;
/// use nalgebra::{Point3, Vector3};
///
/// let physics = PhysicsConfig::default();
///
/// let hole = NewBody::new(Point3::new(400.0, 400.0, 0.0), 4e47).with_radius(5.0);
/// let hole = Body::from_new(BodyId(0), &hole, &physics).unwrap();
/// assert_eq!(hole.classification(), Classification::Compact);
/// assert_eq!(hole.radius(), 5.0);
///
/// let earth = NewBody::new(Point3::new(100.0, 200.0, 400.0), 5e24)
///     .with_velocity(Vector3::new(0.0, 1.0, 0.0));
/// let earth = Body::from_new(BodyId(1), &earth, &physics).unwrap();
/// assert_eq!(earth.classification(), Classification::Normal);
/// assert_eq!(earth.radius(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBody {
    pub position: Point3<f64>,
    pub mass: f64,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default = "zero_velocity")]
    pub velocity: Vector3<f64>,
    #[serde(default)]
    pub color: Color,
}

fn zero_velocity() -> Vector3<f64> {
    Vector3::zeros()
}

impl NewBody {
    pub fn new(position: Point3<f64>, mass: f64) -> Self {
        Self {
            position,
            mass,
            radius: None,
            velocity: Vector3::zeros(),
            color: Color::default(),
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_velocity(mut self, velocity: Vector3<f64>) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// One simulated mass
///
/// Position, velocity and color are freely writable. Mass, radius, critical
/// radius and classification change only through methods that keep the
/// derived quantities in step with the mass.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub position: Point3<f64>,
    pub velocity: Vector3<f64>,
    pub color: Color,
    mass: f64,
    radius: f64,
    critical_radius: f64,
    classification: Classification,
}

impl Body {
    /// Validates a construction request and derives the dependent quantities
    ///
    /// This is the only place the kernel fails hard.
    pub fn from_new(
        id: BodyId,
        new: &NewBody,
        physics: &PhysicsConfig,
    ) -> Result<Self, BodyError> {
        if !new.mass.is_finite() {
            return Err(BodyError::NonFiniteMass(new.mass));
        }
        if new.mass <= 0.0 {
            return Err(BodyError::NonPositiveMass(new.mass));
        }
        if physics.is_neutral_mass(new.mass) {
            return Err(BodyError::BelowNeutralMass {
                mass: new.mass,
                neutral_mass: physics.neutral_mass,
            });
        }
        if !(new.position.coords.iter().all(|c| c.is_finite())
            && new.velocity.iter().all(|c| c.is_finite()))
        {
            return Err(BodyError::NonFiniteState);
        }

        let radius = match new.radius {
            Some(r) if r.is_finite() && r > 0.0 => r.max(physics.min_radius),
            Some(r) => return Err(BodyError::InvalidRadius(r)),
            None => physics.derived_radius(new.mass),
        };

        Ok(Body {
            id,
            position: new.position,
            velocity: new.velocity,
            color: new.color,
            mass: new.mass,
            radius,
            critical_radius: physics.critical_radius(new.mass),
            classification: physics.classify(new.mass),
        })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Critical radius in metres, before scale normalization
    pub fn critical_radius(&self) -> f64 {
        self.critical_radius
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn is_compact(&self) -> bool {
        self.classification == Classification::Compact
    }

    pub fn is_neutralized(&self, physics: &PhysicsConfig) -> bool {
        physics.is_neutral_mass(self.mass)
    }

    /// Adds absorbed mass, re-deriving critical radius and classification
    ///
    /// The radius is left alone; it only changes through explicit rescaling.
    pub(crate) fn gain_mass(&mut self, added: f64, physics: &PhysicsConfig) {
        self.set_mass(self.mass + added, physics);
    }

    /// Drives the body to the neutral mass and shrinks its radius
    pub(crate) fn neutralize(&mut self, radius: f64, physics: &PhysicsConfig) {
        self.set_mass(physics.neutral_mass, physics);
        self.radius = radius.max(physics.min_radius);
    }

    fn set_mass(&mut self, mass: f64, physics: &PhysicsConfig) {
        self.mass = mass;
        self.critical_radius = physics.critical_radius(mass);
        self.classification = physics.classify(mass);
    }

    pub fn momentum(&self) -> Vector3<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }

    /// Returns an owned read-only copy of what a renderer needs
    pub fn view(&self, physics: &PhysicsConfig) -> BodyView {
        BodyView {
            id: self.id,
            position: [self.position.x, self.position.y, self.position.z],
            mass: self.mass,
            radius: self.radius,
            critical_radius: self.critical_radius,
            classification: self.classification,
            color: self.color,
            neutralized: self.is_neutralized(physics),
        }
    }
}

/// Read-only body snapshot handed to renderers after a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub id: BodyId,
    pub position: [f64; 3],
    pub mass: f64,
    pub radius: f64,
    /// Critical radius in metres, before scale normalization
    pub critical_radius: f64,
    pub classification: Classification,
    pub color: Color,
    pub neutralized: bool,
}
