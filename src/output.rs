// src/output.rs
//! CSV export of sweep results for external charting. Undefined cells are
//! written as empty fields.
use crate::analytics::bs_analytic::Greek;
use crate::sweep::{SensitivityCurve, SensitivitySurface};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub fn write_curve_csv<W: Write>(mut out: W, curve: &SensitivityCurve) -> io::Result<()> {
    write!(out, "{},price", curve.field)?;
    for greek in Greek::ALL {
        write!(out, ",{}", greek.name())?;
    }
    writeln!(out)?;

    for point in &curve.points {
        write!(out, "{}", point.value)?;
        write!(out, ",{}", cell(point.price()))?;
        for greek in Greek::ALL {
            write!(out, ",{}", cell(point.greek(greek)))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Long format: one row per (x, y) cell
pub fn write_surface_csv<W: Write>(mut out: W, surface: &SensitivitySurface) -> io::Result<()> {
    write!(out, "{},{},price", surface.x_field, surface.y_field)?;
    for greek in Greek::ALL {
        write!(out, ",{}", greek.name())?;
    }
    writeln!(out)?;

    for (i, x) in surface.x_values.iter().enumerate() {
        for (j, y) in surface.y_values.iter().enumerate() {
            let evaluation = surface.get(i, j);
            write!(out, "{},{}", x, y)?;
            write!(out, ",{}", cell(evaluation.map(|e| e.pricing.price)))?;
            for greek in Greek::ALL {
                write!(out, ",{}", cell(evaluation.map(|e| e.greeks.get(greek))))?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn write_curve_to_csv<P: AsRef<Path>>(filename: P, curve: &SensitivityCurve) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);
    write_curve_csv(&mut file, curve)?;
    file.flush()
}

pub fn write_surface_to_csv<P: AsRef<Path>>(
    filename: P,
    surface: &SensitivitySurface,
) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);
    write_surface_csv(&mut file, surface)?;
    file.flush()
}

pub fn write_summary_to_csv<P: AsRef<Path>>(
    filename: P,
    summary_data: &[(&str, String)],
) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    file.flush()
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
