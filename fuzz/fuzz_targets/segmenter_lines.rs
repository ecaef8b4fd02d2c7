#![no_main]

use libfuzzer_sys::fuzz_target;
use logsieve_audit::segmenter::LogSegmenter;

fuzz_target!(|data: &str| {
    let Ok(mut segmenter) = LogSegmenter::new() else {
        return;
    };

    for line in data.lines() {
        segmenter.feed_line(line);
    }

    // 열린 블록이 남아 있어도 패닉 없이 정리되어야 한다
    let _ = segmenter.finish();
});
