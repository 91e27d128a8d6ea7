//! # Diagram Markup Generators
//!
//! Pure functions that turn the full beam table into Typst calls to the
//! `force-diagram` helper defined in the report template. Coordinates are
//! emitted verbatim in table order; all axis scaling happens inside the
//! template, never here.
//!
//! Styling mirrors the memorandum theme: the shear diagram fills with the
//! accent color at 10% opacity, the moment diagram with slate at 15%.

use crate::table::{BeamRecord, BeamTable};

/// Markup for the Shear Force Diagram (V vs x)
pub fn shear_diagram_markup(table: &BeamTable) -> String {
    diagram_markup(table, |r| r.shear_kn, DiagramStyle {
        color: "accent",
        fill_opacity: "10%",
        ylabel: "$V$",
        title: "V-Diagram",
    })
}

/// Markup for the Bending Moment Diagram (M vs x)
pub fn moment_diagram_markup(table: &BeamTable) -> String {
    diagram_markup(table, |r| r.moment_knm, DiagramStyle {
        color: "slate",
        fill_opacity: "15%",
        ylabel: "$M$",
        title: "M-Diagram",
    })
}

/// Fixed per-diagram styling knobs
struct DiagramStyle {
    /// Name of a color binding from the template preamble
    color: &'static str,
    /// Typst ratio literal for the area fill
    fill_opacity: &'static str,
    /// Math-mode y-axis label
    ylabel: &'static str,
    title: &'static str,
}

fn diagram_markup<F>(table: &BeamTable, value: F, style: DiagramStyle) -> String
where
    F: Fn(&BeamRecord) -> f64,
{
    // Trailing comma keeps single-point sequences a valid Typst array.
    let mut coords = String::new();
    for record in table.records() {
        coords.push_str(&format!("({}, {}), ", record.position_m, value(record)));
    }

    format!(
        "#force-diagram(\n  ({coords}),\n  color: {color},\n  fill-opacity: {fill_opacity},\n  ylabel: {ylabel},\n  title-text: \"{title}\",\n)\n",
        coords = coords.trim_end(),
        color = style.color,
        fill_opacity = style.fill_opacity,
        ylabel = style.ylabel,
        title = style.title,
    )
}
