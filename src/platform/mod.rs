//! Platform glue that sits between raw events and the simulation

pub mod input;

pub use input::EdgeTrigger;
