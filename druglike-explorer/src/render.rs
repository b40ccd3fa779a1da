//! Plain-text rendering of pass output for the terminal.

use std::fmt::Write as _;

use crate::session::{LookupView, Notice, NoticeLevel, PassOutput};
use crate::views::{
    ActivityRow, BarChart, MoleculeGrid, ScatterPlot, TableRow, ACTIVITY_HEADERS, TABLE_HEADERS,
};

const BAR_WIDTH: usize = 40;

pub fn notice(n: &Notice) -> String {
    let tag = match n.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Success => "ok",
        NoticeLevel::Warning => "warning",
    };
    format!("[{tag}] {}", n.message)
}

/// Left-aligned columns sized to their widest cell.
fn columns(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    line(&mut out, headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));
    for row in rows {
        line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let padded: Vec<String> = cells.zip(widths).map(|(c, &w)| format!("{c:<w$}")).collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}

pub fn table(rows: &[TableRow]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                format!("{:.2}", r.mol_wt),
                format!("{:.2}", r.log_p),
                r.num_h_donors.to_string(),
                r.num_h_acceptors.to_string(),
                if r.lipinski_passed { "True" } else { "False" }.to_string(),
            ]
        })
        .collect();
    columns(&TABLE_HEADERS, &cells)
}

pub fn activities(rows: &[ActivityRow]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| vec![r.target.clone(), r.activity_type.clone(), r.value.clone()])
        .collect();
    columns(&ACTIVITY_HEADERS, &cells)
}

pub fn lookup(view: &LookupView) -> String {
    let mut out = format!("**SMILES:** {}\n", view.hit.smiles);
    if let Some(mol) = &view.molecule {
        let _ = writeln!(out, "{} atoms, {} bonds", mol.atom_count(), mol.bond_count());
    }
    if !view.activities.is_empty() {
        let rows: Vec<ActivityRow> = view.activities.iter().map(ActivityRow::from).collect();
        out.push_str(&activities(&rows));
        if view.activity_total > rows.len() {
            let _ = writeln!(out, "({} of {} shown)", rows.len(), view.activity_total);
        }
    }
    out
}

/// Grid cells as captioned text boxes, one line of boxes per grid row.
pub fn grid(grid: &MoleculeGrid) -> String {
    let mut out = String::new();
    for row in grid.cells.chunks(grid.mols_per_row.max(1)) {
        let captions: Vec<String> = row.iter().map(|c| format!("{:<24}", c.caption)).collect();
        let formulas: Vec<String> = row.iter().map(|c| format!("{:<24}", c.formula)).collect();
        let _ = writeln!(out, "{}", captions.join(" ").trim_end());
        let _ = writeln!(out, "{}", formulas.join(" ").trim_end());
    }
    out
}

/// Horizontal bars, each series scaled to its own largest magnitude.
pub fn bars(chart: &BarChart) -> String {
    let label_width = chart.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for series in &chart.series {
        let _ = writeln!(out, "{}", series.descriptor);
        let max = series.values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        for (label, &value) in chart.labels.iter().zip(&series.values) {
            let len = if max > 0.0 { ((value.abs() / max) * BAR_WIDTH as f64).round() as usize } else { 0 };
            let glyph = if value < 0.0 { "-" } else { "#" };
            let _ = writeln!(out, "  {label:<label_width$}  {} {value:.2}", glyph.repeat(len));
        }
    }
    out
}

pub fn scatter(plot: &ScatterPlot) -> String {
    let mut out = format!("{}\n", plot.title);
    let rows: Vec<Vec<String>> = plot
        .points
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                format!("{:.2}", p.x),
                format!("{:.2}", p.y),
                p.size.to_string(),
                p.lipinski_passed.to_string(),
            ]
        })
        .collect();
    out.push_str(&columns(
        &["Name", plot.x_label, plot.y_label, plot.size_label, plot.colour_label],
        &rows,
    ));
    out
}

/// Everything a pass shows, in display order.
pub fn pass(output: &PassOutput) -> String {
    let mut out = String::new();
    for n in &output.notices {
        let _ = writeln!(out, "{}", notice(n));
    }
    if let Some(view) = &output.lookup {
        out.push('\n');
        out.push_str(&lookup(view));
    }
    if output.dataset.is_empty() {
        out.push_str("\nNo compounds to show.\n");
        return out;
    }
    let _ = write!(out, "\nMolecules (first {} of {})\n", output.preview, output.dataset.len());
    out.push_str(&grid(&output.views.grid));
    out.push_str("\nDescriptors\n");
    out.push_str(&table(&output.views.table));
    out.push('\n');
    out.push_str(&bars(&output.views.bars));
    out.push('\n');
    out.push_str(&scatter(&output.views.scatter));
    if !output.dataset.skipped().is_empty() {
        let _ = writeln!(out, "\n{} compound(s) skipped:", output.dataset.skipped().len());
        for s in output.dataset.skipped() {
            let _ = writeln!(out, "  #{} {} ({}): {}", s.index, s.name, s.smiles, s.reason);
        }
    }
    out
}
