#![no_main]

use libfuzzer_sys::fuzz_target;
use logsieve_audit::parser::AlertParser;

fuzz_target!(|data: &str| {
    let Ok(parser) = AlertParser::new() else {
        return;
    };

    // 크래시나 패닉 없이 Some 또는 None을 반환해야 한다
    let _ = AlertParser::is_alert_line(data);
    let _ = parser.parse(data);
});
