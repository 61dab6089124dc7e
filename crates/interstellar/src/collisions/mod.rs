//! Absorption and collision handling for N-body systems
//!
//! Detection finds pairs that are close enough to interact; resolution
//! transfers mass from the lighter to the heavier body and neutralizes the
//! lighter one in place.

pub mod detection;
pub mod resolution;


pub use detection::{
    DirectDetector, InteractionEvent, InteractionKind, absorption_threshold, check_pair,
};
pub use resolution::{
    InteractionResolver, ResolutionReport, SkipReason, apply_event, common_velocity, pick_winner,
    resolve_interactions,
};
