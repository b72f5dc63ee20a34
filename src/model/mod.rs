//! Projection model primitives: growth curves, lifespan timing, lump events

pub mod growth;
mod lifespan;
mod events;

pub use lifespan::{HouseholdClock, Lifespan};
pub use events::EventMap;
