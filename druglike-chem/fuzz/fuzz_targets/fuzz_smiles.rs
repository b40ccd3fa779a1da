#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(mol) = druglike_chem::parse_smiles(data) {
        let _ = druglike_chem::Descriptors::from_molecule(&mol);
    }
});
