//! Simulation core: virtual clock, inventory state, order lifecycle,
//! replenishment policy, and the step driver that ties them together.

pub mod clock;
pub mod generator;
pub mod inventory;
pub mod lifecycle;
pub mod replenish;

pub use generator::{Simulator, StepOutput};
