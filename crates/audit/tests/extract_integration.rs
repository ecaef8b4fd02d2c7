//! 추출 엔진 통합 테스트
//!
//! - 예시 감사 로그 블록의 전체 추출 흐름 (복사, 분할, 직렬화)
//! - 출력 JSON 형태와 필드 키 순서
//! - 중복 unique_id, 미종결 블록, 알림 없는 블록 처리
//! - 재실행 멱등성

use logsieve_audit::config::EngineConfig;
use logsieve_audit::engine::{ExtractEngine, ExtractReport};
use serde_json::Value;

/// 필수 필드와 알림을 전부 갖춘 감사 로그 한 블록
const SAMPLE_BLOCK: &str = r#"--- x1 ---A--
[27/Oct/2025:10:00:00 +0000] 123456.789
[uri "/login"]
[hostname "example.com"]
X-Req-ID:ATRDF-7
ModSecurity: Warning. [id "942100"] [msg "SQL Injection Attack"] [severity "CRITICAL"] [tag "attack-sqli"] [tag "OWASP_CRS"]
--- x1 ---Z--
"#;

struct TestRun {
    // TempDir가 드롭되면 파일이 사라지므로 보관한다
    _dir: tempfile::TempDir,
    config: EngineConfig,
    report: ExtractReport,
}

/// 임시 디렉토리에 감사 로그를 쓰고 엔진을 한 번 실행한다.
async fn extract(content: &str) -> TestRun {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("modsec_audit.log");
    std::fs::write(&source, content).unwrap();

    let config = EngineConfig::builder()
        .source_log(source)
        .work_dir(dir.path().join("work"))
        .output_path(dir.path().join("work/modsec_audit.json"))
        .build()
        .unwrap();

    let engine = ExtractEngine::new(config.clone()).unwrap();
    let report = engine.run().await.unwrap();
    TestRun {
        _dir: dir,
        config,
        report,
    }
}

fn read_output(run: &TestRun) -> String {
    std::fs::read_to_string(&run.config.output_path).unwrap()
}

fn parse_output(run: &TestRun) -> Value {
    serde_json::from_str(&read_output(run)).unwrap()
}

// =============================================================================
// 예시 블록의 전체 추출 흐름
// =============================================================================

#[tokio::test]
async fn extracts_example_block_end_to_end() {
    let run = extract(SAMPLE_BLOCK).await;

    assert_eq!(run.report.stored, 1);
    assert_eq!(run.report.written, 1);
    assert_eq!(run.report.stats.blocks_opened, 1);
    assert_eq!(run.report.stats.blocks_closed, 1);
    assert_eq!(run.report.stats.alerts_parsed, 1);

    let output = parse_output(&run);
    let records = output.as_array().unwrap();
    assert_eq!(records.len(), 1);

    let tx = &records[0];
    assert_eq!(tx["request_id"], "123456.789");
    assert_eq!(tx["primary_key"], "ATRDF-7");
    assert_eq!(tx["timestamp"], "27/Oct/2025:10:00:00 +0000");
    assert_eq!(tx["uri"], "/login");
    assert_eq!(tx["host"], "example.com");

    let alerts = tx["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["id"], "942100");
    assert_eq!(alerts[0]["msg"], "SQL Injection Attack");
    assert_eq!(alerts[0]["severity"], "CRITICAL");
    assert_eq!(alerts[0]["tags"], serde_json::json!(["attack-sqli", "OWASP_CRS"]));
    // ref 태그가 없었으므로 키 자체가 생략된다
    assert!(alerts[0].get("ref").is_none());
}

#[tokio::test]
async fn output_keys_start_with_request_id() {
    let run = extract(SAMPLE_BLOCK).await;
    let raw = read_output(&run);

    // 2칸 들여쓰기 pretty 직렬화에서 request_id가 첫 키로 나온다
    assert!(raw.starts_with("[\n  {\n    \"request_id\": \"123456.789\""));
}

#[tokio::test]
async fn missing_correlation_key_serializes_as_null() {
    let input = SAMPLE_BLOCK.replace("X-Req-ID:ATRDF-7\n", "");
    let run = extract(&input).await;

    let output = parse_output(&run);
    let tx = &output.as_array().unwrap()[0];
    // primary_key 키는 항상 존재하며 값만 null이다
    assert_eq!(tx.get("primary_key"), Some(&Value::Null));
}

#[tokio::test]
async fn working_copy_is_created_and_source_untouched() {
    let run = extract(SAMPLE_BLOCK).await;

    assert_eq!(
        std::fs::read_to_string(run.config.working_copy()).unwrap(),
        SAMPLE_BLOCK
    );
    assert_eq!(
        std::fs::read_to_string(&run.config.source_log).unwrap(),
        SAMPLE_BLOCK
    );
}

// =============================================================================
// 블록 필터링 (알림 없음 / 필드 누락 / 미종결)
// =============================================================================

#[tokio::test]
async fn block_without_alerts_is_excluded_from_output() {
    let quiet_block = r#"--- x2 ---A--
[27/Oct/2025:11:00:00 +0000] 555.777
[uri "/healthz"]
[hostname "example.com"]
--- x2 ---Z--
"#;
    let input = format!("{SAMPLE_BLOCK}{quiet_block}");
    let run = extract(&input).await;

    // 저장은 되지만 출력에서는 제외된다
    assert_eq!(run.report.stored, 2);
    assert_eq!(run.report.written, 1);

    let output = parse_output(&run);
    let records = output.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["request_id"], "123456.789");
}

#[tokio::test]
async fn invalid_block_is_excluded_even_with_alerts() {
    let input = r#"--- x1 ---A--
[27/Oct/2025:10:00:00 +0000] 123456.789
[uri "/login"]
ModSecurity: Warning. [id "942100"] [msg "SQL Injection Attack"]
--- x1 ---Z--
"#;
    let run = extract(input).await;

    assert_eq!(run.report.stored, 0);
    assert_eq!(run.report.written, 0);
    assert_eq!(run.report.stats.dropped_invalid, 1);
    // 기록할 것이 없으면 출력 파일은 비어 있다
    assert!(read_output(&run).is_empty());
}

#[tokio::test]
async fn unterminated_block_is_absent_from_output() {
    let input = format!(
        "{SAMPLE_BLOCK}--- x9 ---A--\n[27/Oct/2025:12:00:00 +0000] 999.999\n[uri \"/cut\"]\n"
    );
    let run = extract(&input).await;

    assert_eq!(run.report.stats.dropped_unterminated, 1);
    let output = parse_output(&run);
    assert_eq!(output.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn empty_source_leaves_empty_output() {
    let run = extract("").await;

    assert_eq!(run.report.stored, 0);
    assert_eq!(run.report.written, 0);
    assert!(read_output(&run).is_empty());
}

// =============================================================================
// 중복 unique_id 처리
// =============================================================================

#[tokio::test]
async fn duplicate_unique_id_keeps_first_position_with_latest_values() {
    let input = r#"--- a ---A--
[27/Oct/2025:10:00:00 +0000] 111.111
[uri "/first"]
[hostname "example.com"]
ModSecurity: Warning. [id "1001"] [msg "first alert"]
--- a ---Z--
--- b ---A--
[27/Oct/2025:10:01:00 +0000] 222.222
[uri "/second"]
[hostname "example.com"]
ModSecurity: Warning. [id "1002"] [msg "second alert"]
--- b ---Z--
--- c ---A--
[27/Oct/2025:10:02:00 +0000] 111.111
[uri "/first-replaced"]
[hostname "example.com"]
ModSecurity: Warning. [id "1003"] [msg "replacement alert"]
--- c ---Z--
"#;
    let run = extract(input).await;

    assert_eq!(run.report.stored, 2);
    assert_eq!(run.report.stats.duplicate_ids, 1);

    let output = parse_output(&run);
    let records = output.as_array().unwrap();
    assert_eq!(records.len(), 2);

    // 최초 등장 위치에 최신 값이 놓인다
    assert_eq!(records[0]["request_id"], "111.111");
    assert_eq!(records[0]["uri"], "/first-replaced");
    assert_eq!(records[0]["alerts"][0]["id"], "1003");
    assert_eq!(records[1]["request_id"], "222.222");
}

// =============================================================================
// 재실행 멱등성
// =============================================================================

#[tokio::test]
async fn rerunning_extraction_yields_identical_output() {
    let run = extract(SAMPLE_BLOCK).await;
    let first = read_output(&run);

    let engine = ExtractEngine::new(run.config.clone()).unwrap();
    let report = engine.run().await.unwrap();

    assert_eq!(report.written, run.report.written);
    assert_eq!(read_output(&run), first);
}

#[tokio::test]
async fn rerun_replaces_stale_output() {
    let run = extract(SAMPLE_BLOCK).await;

    // 원본을 비우고 재실행하면 이전 출력이 남지 않는다
    std::fs::write(&run.config.source_log, "").unwrap();
    let engine = ExtractEngine::new(run.config.clone()).unwrap();
    let report = engine.run().await.unwrap();

    assert_eq!(report.written, 0);
    assert!(read_output(&run).is_empty());
}
