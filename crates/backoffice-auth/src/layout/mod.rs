//! Host-side driver that runs the gate and performs its effects.

pub mod controller;

pub use controller::{LayoutController, LayoutOutcome};
