#![no_main]
use libfuzzer_sys::fuzz_target;
use oss_hooks::results::{ResultsMap, merge_batch, parse_results};

/// Fuzz the results loader and merge.
///
/// The input is split at the first NUL byte into the accumulated document and
/// the batch. Merging must keep every batch entry.
fuzz_target!(|data: &[u8]| {
    let (acc, batch) = match data.iter().position(|&b| b == 0) {
        Some(i) => (&data[..i], &data[i + 1..]),
        None => (data, &[][..]),
    };
    let parse = |bytes: &[u8]| {
        std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| parse_results(s).ok())
    };
    let mut acc = parse(acc).unwrap_or_default();
    if let Some(batch) = parse(batch) {
        let expected: ResultsMap = batch.clone();
        merge_batch(&mut acc, batch);
        for (path, record) in &expected {
            assert_eq!(acc.get(path), Some(record));
        }
    }
});
