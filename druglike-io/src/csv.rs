//! Compound CSV input and descriptor CSV output.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use ::csv::{ReaderBuilder, StringRecord, WriterBuilder};
use druglike_chem::{Compound, DescriptorRecord};
use druglike_core::{DruglikeError, Result};
use serde::Serialize;
use tracing::debug;

/// Columns an uploaded compound table must carry.
pub const REQUIRED_COLUMNS: [&str; 2] = ["Name", "SMILES"];

/// Header of the results file, in order.
pub const OUTPUT_COLUMNS: [&str; 8] = [
    "Name",
    "SMILES",
    "MolWt",
    "LogP",
    "NumHDonors",
    "NumHAcceptors",
    "NumRotatableBonds",
    "LipinskiPassed",
];

/// Suggested file name for downloaded results.
pub const DOWNLOAD_FILE_NAME: &str = "drug_likeness_results.csv";

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        DruglikeError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Read compounds from CSV with `Name` and `SMILES` header columns.
///
/// Column order is free and extra columns are ignored. Short rows yield
/// empty fields rather than errors; an empty SMILES is rejected later when
/// descriptors are computed.
pub fn read_compounds<R: Read>(reader: R) -> Result<Vec<Compound>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| DruglikeError::Parse(e.to_string()))?
        .clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| column_index(&headers, c).is_none())
        .map(|c| c.to_string())
        .collect();
    let (Some(name_idx), Some(smiles_idx)) =
        (column_index(&headers, "Name"), column_index(&headers, "SMILES"))
    else {
        return Err(DruglikeError::MissingColumns(missing));
    };

    let mut compounds = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| DruglikeError::Parse(e.to_string()))?;
        compounds.push(Compound::new(
            record.get(name_idx).unwrap_or(""),
            record.get(smiles_idx).unwrap_or(""),
        ));
    }
    debug!(rows = compounds.len(), "read compound table");
    Ok(compounds)
}

/// Read compounds from a CSV file.
pub fn read_compounds_path(path: impl AsRef<Path>) -> Result<Vec<Compound>> {
    read_compounds(open(path.as_ref())?)
}

#[derive(Serialize)]
struct OutputRow<'a> {
    name: &'a str,
    smiles: &'a str,
    mol_wt: f64,
    log_p: f64,
    num_h_donors: usize,
    num_h_acceptors: usize,
    num_rotatable_bonds: usize,
    lipinski_passed: &'static str,
}

impl<'a> From<&'a DescriptorRecord> for OutputRow<'a> {
    fn from(r: &'a DescriptorRecord) -> Self {
        let d = &r.descriptors;
        OutputRow {
            name: &r.name,
            smiles: &r.smiles,
            mol_wt: d.mol_wt,
            log_p: d.log_p,
            num_h_donors: d.num_h_donors,
            num_h_acceptors: d.num_h_acceptors,
            num_rotatable_bonds: d.num_rotatable_bonds,
            lipinski_passed: if d.lipinski_passed() { "True" } else { "False" },
        }
    }
}

/// Write descriptor records as CSV. The header is written even when there are no records.
pub fn write_dataset<'a, W: Write>(
    writer: W,
    records: impl IntoIterator<Item = &'a DescriptorRecord>,
) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    let csv_err = |e: ::csv::Error| DruglikeError::Other(format!("CSV write failed: {e}"));

    writer.write_record(OUTPUT_COLUMNS).map_err(csv_err)?;
    for record in records {
        writer.serialize(OutputRow::from(record)).map_err(csv_err)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write descriptor records to a CSV file, replacing any existing file.
pub fn write_dataset_path<'a>(
    path: impl AsRef<Path>,
    records: impl IntoIterator<Item = &'a DescriptorRecord>,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        DruglikeError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;
    write_dataset(file, records)
}

/// Render descriptor records as a CSV string.
pub fn dataset_to_csv<'a>(records: impl IntoIterator<Item = &'a DescriptorRecord>) -> Result<String> {
    let mut buf = Vec::new();
    write_dataset(&mut buf, records)?;
    String::from_utf8(buf).map_err(|e| DruglikeError::Other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use druglike_chem::compute_compound;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_required_columns_in_any_order() {
        let data = "MW,SMILES,Name\n1,CCO,Ethanol\n2,c1ccccc1,Benzene\n";
        let compounds = read_compounds(data.as_bytes()).unwrap();
        assert_eq!(
            compounds,
            vec![Compound::new("Ethanol", "CCO"), Compound::new("Benzene", "c1ccccc1")]
        );
    }

    #[test]
    fn missing_columns_are_reported() {
        let err = read_compounds("Name,Formula\nEthanol,C2H6O\n".as_bytes()).unwrap_err();
        match err {
            DruglikeError::MissingColumns(cols) => assert_eq!(cols, vec!["SMILES"]),
            other => panic!("unexpected error: {other}"),
        }

        let err = read_compounds("a,b\n1,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DruglikeError::MissingColumns(ref c) if c.len() == 2));
    }

    #[test]
    fn short_rows_become_empty_fields() {
        let compounds = read_compounds("Name,SMILES\nLonely\n".as_bytes()).unwrap();
        assert_eq!(compounds, vec![Compound::new("Lonely", "")]);
    }

    #[test]
    fn reads_from_file() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "Name,SMILES").unwrap();
        writeln!(file, "Aspirin,CC(=O)OC1=CC=CC=C1C(=O)O").unwrap();
        file.flush().unwrap();

        let compounds = read_compounds_path(file.path()).unwrap();
        assert_eq!(compounds.len(), 1);
        assert_eq!(compounds[0].name, "Aspirin");
    }

    #[test]
    fn file_not_found() {
        assert!(matches!(
            read_compounds_path("/nonexistent/compounds.csv"),
            Err(DruglikeError::Io(_))
        ));
    }

    #[test]
    fn writes_header_and_booleans() {
        let aspirin = compute_compound(&Compound::new("Aspirin", "CC(=O)OC1=CC=CC=C1C(=O)O")).unwrap();
        let palmitic = compute_compound(&Compound::new("Palmitic acid", "CCCCCCCCCCCCCCCC(=O)O")).unwrap();
        let text = dataset_to_csv([&aspirin, &palmitic]).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Name,SMILES,MolWt,LogP,NumHDonors,NumHAcceptors,NumRotatableBonds,LipinskiPassed"
        );
        assert!(lines[1].starts_with("Aspirin,CC(=O)OC1=CC=CC=C1C(=O)O,180.1"));
        assert!(lines[1].ends_with(",1,3,2,True"));
        assert!(lines[2].ends_with(",False"));
    }

    #[test]
    fn empty_dataset_still_has_header() {
        let text = dataset_to_csv(std::iter::empty()).unwrap();
        assert_eq!(text.trim_end(), OUTPUT_COLUMNS.join(","));
    }

    #[test]
    fn written_file_reads_back_as_compounds() {
        let record = compute_compound(&Compound::new("Ethanol", "CCO")).unwrap();
        let file = NamedTempFile::with_suffix(".csv").unwrap();
        write_dataset_path(file.path(), [&record]).unwrap();
        let back = read_compounds_path(file.path()).unwrap();
        assert_eq!(back, vec![Compound::new("Ethanol", "CCO")]);
    }
}
