//! Motion availability for the presentation layer.

pub mod resolver;

pub use resolver::{AvailabilityContext, MotionAvailability, available, availability_of};
