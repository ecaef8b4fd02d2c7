#![no_main]

use libfuzzer_sys::fuzz_target;
use logsieve_audit::parser::FieldExtractor;
use logsieve_core::types::Transaction;

fuzz_target!(|data: &str| {
    let Ok(extractor) = FieldExtractor::new() else {
        return;
    };

    let mut tx = Transaction::default();
    extractor.apply_line(data, &mut tx);
});
