use criterion::{black_box, criterion_group, criterion_main, Criterion};
use druglike_chem::{compute, parse_smiles, Descriptors};

/// A set of representative drug-like SMILES strings
const SMILES_SET: &[&str] = &[
    "CCO",                                   // ethanol
    "CC(=O)O",                               // acetic acid
    "c1ccccc1",                              // benzene
    "CC(=O)OC1=CC=CC=C1C(=O)O",              // aspirin
    "CC12CCC3C(C1CCC2O)CCC4=CC(=O)CCC34C",   // testosterone
    "Cn1cnc2c1c(=O)n(c(=O)n2C)C",            // caffeine
    "CC(C)CC1=CC=C(C=C1)C(C)C(=O)O",         // ibuprofen
    "CCCCCCCCCCCCCCCC(=O)O",                 // palmitic acid
    "CC(=O)NC1=CC=C(C=C1)O",                 // acetaminophen
    "c1ccc2ccccc2c1",                        // naphthalene
    "C1=CN=CN=C1",                           // pyrimidine
    "C1=CSC=C1",                             // thiophene
];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("smiles_parse");

    let smiles_1k: Vec<&str> = SMILES_SET.iter().copied().cycle().take(1000).collect();

    group.bench_function("1k_mols", |b| {
        b.iter(|| {
            for &smi in black_box(&smiles_1k) {
                let _ = parse_smiles(smi);
            }
        })
    });

    group.finish();
}

fn bench_descriptors(c: &mut Criterion) {
    let mut group = c.benchmark_group("descriptors");

    let mols: Vec<_> = SMILES_SET
        .iter()
        .filter_map(|s| parse_smiles(s).ok())
        .collect();
    let mols_1k: Vec<_> = mols.iter().cycle().take(1000).collect();

    group.bench_function("1k_mols_from_molecule", |b| {
        b.iter(|| {
            for mol in black_box(&mols_1k) {
                let _ = Descriptors::from_molecule(mol);
            }
        })
    });

    group.bench_function("1k_smiles_end_to_end", |b| {
        let smiles_1k: Vec<&str> = SMILES_SET.iter().copied().cycle().take(1000).collect();
        b.iter(|| {
            for &smi in black_box(&smiles_1k) {
                let _ = compute(smi);
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_descriptors);
criterion_main!(benches);
