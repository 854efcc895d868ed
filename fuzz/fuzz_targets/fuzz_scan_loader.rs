#![no_main]

use ifishmass::scan::{ScanError, ScanLoader};
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must parse or fail with an error, never panic
    let source = Arc::new(PathBuf::from("fuzz.csv"));
    match ScanLoader::new().parse_reader(Cursor::new(data), source) {
        Ok(records) => {
            for record in &records {
                assert!(record.mz.is_finite());
                assert!(record.intensity.is_finite());
            }
        }
        Err(ScanError::Parse { line, .. }) => assert!(line >= 1),
        Err(_) => {}
    }
});
