//! Presentation data derived from a dataset.
//!
//! Nothing here draws. Each view is a plain serializable value that a
//! front end (the text renderer in [`crate::render`], or JSON output) turns
//! into pixels or characters.

use druglike_chem::{DescriptorRecord, Descriptors, Molecule};
use druglike_io::Activity;
use serde::Serialize;

use crate::config::ViewConfig;
use crate::dataset::Dataset;

/// Column headers of the activity table.
pub const ACTIVITY_HEADERS: [&str; 3] = ["Target Name", "Activity Type", "Value (nM)"];

/// Column headers of the compound table.
pub const TABLE_HEADERS: [&str; 6] =
    ["Name", "MolWt", "LogP", "NumHDonors", "NumHAcceptors", "LipinskiPassed"];

/// Descriptors charted as bars, in display order.
pub const BAR_DESCRIPTORS: [&str; 4] = ["MolWt", "LogP", "NumHDonors", "NumHAcceptors"];

const BAR_VALUES: [fn(&Descriptors) -> f64; 4] = [
    |d| d.mol_wt,
    |d| d.log_p,
    |d| d.num_h_donors as f64,
    |d| d.num_h_acceptors as f64,
];

pub const SCATTER_TITLE: &str = "Drug-Likeness Properties";
pub const SCATTER_X_LABEL: &str = "LogP (lipophilicity)";
pub const SCATTER_Y_LABEL: &str = "Molecular Weight (g/mol)";
pub const SCATTER_SIZE_LABEL: &str = "# H-Bond Donors";
pub const SCATTER_COLOUR_LABEL: &str = "Lipinski Passed";

/// One row of the compound table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "MolWt")]
    pub mol_wt: f64,
    #[serde(rename = "LogP")]
    pub log_p: f64,
    #[serde(rename = "NumHDonors")]
    pub num_h_donors: usize,
    #[serde(rename = "NumHAcceptors")]
    pub num_h_acceptors: usize,
    #[serde(rename = "LipinskiPassed")]
    pub lipinski_passed: bool,
}

impl From<&DescriptorRecord> for TableRow {
    fn from(r: &DescriptorRecord) -> Self {
        let d = &r.descriptors;
        TableRow {
            name: r.name.clone(),
            mol_wt: d.mol_wt,
            log_p: d.log_p,
            num_h_donors: d.num_h_donors,
            num_h_acceptors: d.num_h_acceptors,
            lipinski_passed: d.lipinski_passed(),
        }
    }
}

pub fn table_rows(dataset: &Dataset) -> Vec<TableRow> {
    dataset.iter().map(TableRow::from).collect()
}

/// Values of one descriptor across the dataset, one bar per record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub descriptor: &'static str,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    /// Record names, shared by every series.
    pub labels: Vec<String>,
    pub series: Vec<BarSeries>,
}

pub fn bar_chart(dataset: &Dataset) -> BarChart {
    let series = BAR_DESCRIPTORS
        .iter()
        .zip(BAR_VALUES)
        .map(|(&descriptor, value)| BarSeries {
            descriptor,
            values: dataset.iter().map(|r| value(&r.descriptors)).collect(),
        })
        .collect();
    BarChart {
        labels: dataset.iter().map(|r| r.name.clone()).collect(),
        series,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Hover text.
    pub name: String,
    /// LogP.
    pub x: f64,
    /// Molecular weight.
    pub y: f64,
    /// Marker size: H-bond donors.
    pub size: usize,
    /// Marker colour: Lipinski pass/fail.
    pub lipinski_passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPlot {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub size_label: &'static str,
    pub colour_label: &'static str,
    pub points: Vec<ScatterPoint>,
}

pub fn scatter_plot(dataset: &Dataset) -> ScatterPlot {
    ScatterPlot {
        title: SCATTER_TITLE,
        x_label: SCATTER_X_LABEL,
        y_label: SCATTER_Y_LABEL,
        size_label: SCATTER_SIZE_LABEL,
        colour_label: SCATTER_COLOUR_LABEL,
        points: dataset
            .iter()
            .map(|r| ScatterPoint {
                name: r.name.clone(),
                x: r.descriptors.log_p,
                y: r.descriptors.mol_wt,
                size: r.descriptors.num_h_donors,
                lipinski_passed: r.lipinski_passed(),
            })
            .collect(),
    }
}

/// A depiction slot in the molecule grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub caption: String,
    pub formula: String,
    pub molecule: Molecule,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoleculeGrid {
    pub mols_per_row: usize,
    pub sub_image_size: u32,
    pub cells: Vec<GridCell>,
}

impl MoleculeGrid {
    pub fn rows(&self) -> usize {
        self.cells.len().div_ceil(self.mols_per_row.max(1))
    }
}

/// Lay out `records` row-major, `mols_per_row` wide, captioned by name.
pub fn molecule_grid(records: &[DescriptorRecord], view: &ViewConfig) -> MoleculeGrid {
    let width = view.mols_per_row.max(1);
    MoleculeGrid {
        mols_per_row: width,
        sub_image_size: view.sub_image_size,
        cells: records
            .iter()
            .enumerate()
            .map(|(i, r)| GridCell {
                row: i / width,
                col: i % width,
                caption: r.name.clone(),
                formula: r.formula.clone(),
                molecule: r.molecule.clone(),
            })
            .collect(),
    }
}

/// One row of the activity table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityRow {
    #[serde(rename = "Target Name")]
    pub target: String,
    #[serde(rename = "Activity Type")]
    pub activity_type: String,
    #[serde(rename = "Value (nM)")]
    pub value: String,
}

impl From<&Activity> for ActivityRow {
    fn from(a: &Activity) -> Self {
        ActivityRow {
            target: a.target.clone(),
            activity_type: a.activity_type.to_string(),
            value: a.value.clone(),
        }
    }
}

/// All views of one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Views {
    pub grid: MoleculeGrid,
    pub table: Vec<TableRow>,
    pub bars: BarChart,
    pub scatter: ScatterPlot,
}

impl Views {
    /// Grid over the first `preview` records; the rest over the whole dataset.
    pub fn build(dataset: &Dataset, preview: usize, view: &ViewConfig) -> Self {
        let shown = &dataset.records()[..preview.min(dataset.len())];
        Views {
            grid: molecule_grid(shown, view),
            table: table_rows(dataset),
            bars: bar_chart(dataset),
            scatter: scatter_plot(dataset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use druglike_chem::default_compounds;

    fn defaults() -> Dataset {
        Dataset::build(&default_compounds())
    }

    #[test]
    fn table_rows_follow_dataset() {
        let rows = table_rows(&defaults());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].name, "Aspirin");
        assert_eq!((rows[0].num_h_donors, rows[0].num_h_acceptors), (1, 3));
        assert!(rows[0].lipinski_passed);
        assert!(!rows[3].lipinski_passed);
    }

    #[test]
    fn table_row_serializes_with_column_names() {
        let rows = table_rows(&defaults());
        let json = serde_json::to_value(&rows[0]).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        for header in TABLE_HEADERS {
            assert!(keys.contains(&header), "{header}");
        }
    }

    #[test]
    fn bar_chart_has_four_series() {
        let ds = defaults();
        let chart = bar_chart(&ds);
        let names: Vec<&str> = chart.series.iter().map(|s| s.descriptor).collect();
        assert_eq!(names, BAR_DESCRIPTORS);
        assert!(chart.series.iter().all(|s| s.values.len() == ds.len()));
        assert_eq!(chart.series[2].values[0], 1.0);
        assert_eq!(chart.labels[1], "Caffeine");
    }

    #[test]
    fn scatter_maps_axes() {
        let ds = defaults();
        let plot = scatter_plot(&ds);
        let aspirin = &plot.points[0];
        assert_eq!(aspirin.x, ds.records()[0].descriptors.log_p);
        assert_eq!(aspirin.y, ds.records()[0].descriptors.mol_wt);
        assert_eq!(aspirin.size, 1);
        assert_eq!(plot.title, "Drug-Likeness Properties");
        assert_eq!(plot.x_label, "LogP (lipophilicity)");
    }

    #[test]
    fn grid_wraps_rows() {
        let ds = defaults();
        let view = ViewConfig { mols_per_row: 3, ..ViewConfig::default() };
        let grid = molecule_grid(ds.records(), &view);
        assert_eq!(grid.rows(), 2);
        let positions: Vec<(usize, usize)> = grid.cells.iter().map(|c| (c.row, c.col)).collect();
        assert_eq!(positions, [(0, 0), (0, 1), (0, 2), (1, 0)]);
        assert_eq!(grid.cells[3].caption, "Palmitic acid");
        assert_eq!(grid.cells[0].formula, "C9H8O4");
    }

    #[test]
    fn views_preview_limits_grid_only() {
        let ds = defaults();
        let views = Views::build(&ds, 2, &ViewConfig::default());
        assert_eq!(views.grid.cells.len(), 2);
        assert_eq!(views.table.len(), 4);
        assert_eq!(views.scatter.points.len(), 4);
    }

    #[test]
    fn activity_row_headers() {
        let activity = Activity {
            target: "Cyclooxygenase-1".into(),
            activity_type: druglike_io::ActivityType::IC50,
            value: "1200.0 nM".into(),
        };
        let json = serde_json::to_value(ActivityRow::from(&activity)).unwrap();
        for header in ACTIVITY_HEADERS {
            assert!(json.get(header).is_some(), "{header}");
        }
        assert_eq!(json["Activity Type"], "IC50");
    }
}
