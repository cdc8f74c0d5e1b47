// src/sweep/grid.rs
//! Sensitivity grids: the pricing kernel evaluated over swept parameters.
//!
//! Each grid point overrides the swept field(s) of a base parameter set and
//! runs [`bs_analytic::evaluate`]. A point whose derived parameters are
//! invalid (a swept spot ≤ 0, say) becomes an undefined cell (`None`) and the
//! rest of the sweep carries on.
//!
//! Points are evaluated in parallel with Rayon. Indexed parallel iterators
//! collect in input order, so output order is always the ascending sweep
//! order regardless of which thread finished first.

use super::range::{Axis, SweepField, SweepSpec};
use crate::analytics::bs_analytic::{self, Evaluation, Greek};
use crate::error::EngineResult;
use crate::models::OptionParameters;
use ndarray::{Array2, Zip};
use rayon::prelude::*;

/// One sample of a 1D sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    /// Value of the swept field at this point
    pub value: f64,
    /// `None` when the derived parameters were invalid
    pub evaluation: Option<Evaluation>,
}

impl GridPoint {
    pub fn is_defined(&self) -> bool {
        self.evaluation.is_some()
    }

    pub fn price(&self) -> Option<f64> {
        self.evaluation.map(|e| e.pricing.price)
    }

    pub fn greek(&self, greek: Greek) -> Option<f64> {
        self.evaluation.map(|e| e.greeks.get(greek))
    }
}

/// Result of sweeping one field
#[derive(Debug, Clone, PartialEq)]
pub struct SensitivityCurve {
    pub field: SweepField,
    pub points: Vec<GridPoint>,
}

impl SensitivityCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn prices(&self) -> Vec<Option<f64>> {
        self.points.iter().map(GridPoint::price).collect()
    }

    pub fn greek(&self, greek: Greek) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.greek(greek)).collect()
    }

    pub fn undefined_count(&self) -> usize {
        self.points.iter().filter(|p| !p.is_defined()).count()
    }
}

/// Result of sweeping two fields.
///
/// `cells[[i, j]]` holds the evaluation at `x_values[i]` (first field) and
/// `y_values[j]` (second field).
#[derive(Debug, Clone, PartialEq)]
pub struct SensitivitySurface {
    pub x_field: SweepField,
    pub y_field: SweepField,
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
    pub cells: Array2<Option<Evaluation>>,
}

impl SensitivitySurface {
    /// (rows, columns) = (x steps, y steps)
    pub fn shape(&self) -> (usize, usize) {
        self.cells.dim()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<Evaluation> {
        self.cells.get((i, j)).copied().flatten()
    }

    pub fn price_surface(&self) -> Array2<Option<f64>> {
        self.cells.map(|cell| cell.map(|e| e.pricing.price))
    }

    pub fn greek_surface(&self, greek: Greek) -> Array2<Option<f64>> {
        self.cells.map(|cell| cell.map(|e| e.greeks.get(greek)))
    }

    pub fn undefined_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }
}

/// Output of [`sweep`]
#[derive(Debug, Clone, PartialEq)]
pub enum SensitivityGrid {
    Curve(SensitivityCurve),
    Surface(SensitivitySurface),
}

impl SensitivityGrid {
    pub fn as_curve(&self) -> Option<&SensitivityCurve> {
        match self {
            SensitivityGrid::Curve(curve) => Some(curve),
            SensitivityGrid::Surface(_) => None,
        }
    }

    pub fn as_surface(&self) -> Option<&SensitivitySurface> {
        match self {
            SensitivityGrid::Surface(surface) => Some(surface),
            SensitivityGrid::Curve(_) => None,
        }
    }
}

/// Evaluate price and Greeks over the swept field(s) of `spec`.
///
/// # Errors
/// `InvalidParameter` only for a malformed `spec` (empty or inverted range,
/// non-finite bounds, same field swept twice). Invalid points are recorded
/// as undefined, and `base` itself need not be valid.
pub fn sweep(base: &OptionParameters, spec: &SweepSpec) -> EngineResult<SensitivityGrid> {
    spec.validate()?;
    match *spec {
        SweepSpec::Single(axis) => Ok(SensitivityGrid::Curve(curve(base, axis))),
        SweepSpec::Pair(x, y) => Ok(SensitivityGrid::Surface(surface(base, x, y))),
    }
}

/// 1D sweep of a single field
pub fn sweep_curve(base: &OptionParameters, axis: Axis) -> EngineResult<SensitivityCurve> {
    SweepSpec::Single(axis).validate()?;
    Ok(curve(base, axis))
}

/// 2D sweep over the Cartesian product of two fields
pub fn sweep_surface(
    base: &OptionParameters,
    x: Axis,
    y: Axis,
) -> EngineResult<SensitivitySurface> {
    SweepSpec::Pair(x, y).validate()?;
    Ok(surface(base, x, y))
}

fn curve(base: &OptionParameters, axis: Axis) -> SensitivityCurve {
    let values = axis.range.values();
    tracing::debug!(field = %axis.field, points = values.len(), "sweeping sensitivity curve");

    let points: Vec<GridPoint> = values
        .par_iter()
        .map(|&value| GridPoint {
            value,
            evaluation: evaluate_point(axis.field.apply(*base, value)),
        })
        .collect();

    let result = SensitivityCurve {
        field: axis.field,
        points,
    };
    report_undefined(result.undefined_count(), result.len());
    result
}

fn surface(base: &OptionParameters, x: Axis, y: Axis) -> SensitivitySurface {
    let x_values = x.range.values();
    let y_values = y.range.values();
    let (rows, cols) = (x_values.len(), y_values.len());
    tracing::debug!(
        x_field = %x.field,
        y_field = %y.field,
        rows,
        cols,
        "sweeping sensitivity surface"
    );

    let mut cells: Array2<Option<Evaluation>> = Array2::from_elem((rows, cols), None);
    Zip::indexed(&mut cells).par_for_each(|(i, j), cell| {
        let params = y.field.apply(x.field.apply(*base, x_values[i]), y_values[j]);
        *cell = evaluate_point(params);
    });

    let result = SensitivitySurface {
        x_field: x.field,
        y_field: y.field,
        x_values,
        y_values,
        cells,
    };
    report_undefined(result.undefined_count(), rows * cols);
    result
}

fn evaluate_point(params: OptionParameters) -> Option<Evaluation> {
    match bs_analytic::evaluate(&params) {
        Ok(evaluation) => Some(evaluation),
        Err(e) => {
            tracing::trace!(error = %e, "grid point undefined");
            None
        }
    }
}

fn report_undefined(undefined: usize, total: usize) {
    if undefined > 0 {
        tracing::warn!(undefined, total, "sweep produced undefined grid points");
    }
}
