// src/sweep/mod.rs
pub mod grid;
pub mod range;

pub use grid::{
    sweep, sweep_curve, sweep_surface, GridPoint, SensitivityCurve, SensitivityGrid,
    SensitivitySurface,
};
pub use range::{default_range, default_surface, Axis, SweepField, SweepRange, SweepSpec};
