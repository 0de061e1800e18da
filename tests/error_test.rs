//! 오류 케이스 테스트
//!
//! 입력 오류와 오류 타입 변환을 검증

use duty_checklist::config::Config;
use duty_checklist::error::DutyCheckError;
use duty_checklist::export::{build_report, Destination, ReportOptions};
use duty_checklist_common::CheckResult;
use tempfile::tempdir;

/// 최상위가 객체가 아닌 체크 결과 JSON
#[test]
fn test_non_object_check_result() {
    let result = CheckResult::from_json("[1, 2, 3]");
    assert!(matches!(result, Err(duty_checklist_common::Error::Parse(_))));

    let err: DutyCheckError = result.unwrap_err().into();
    assert!(matches!(err, DutyCheckError::Common(_)));
}

/// 잘못된 JSON
#[test]
fn test_malformed_check_result() {
    let result = CheckResult::from_json("{ invalid }");
    assert!(result.is_err());
}

/// 알 수 없는 값은 "아니요"로 처리
#[test]
fn test_unknown_flag_value_is_no() {
    let result = CheckResult::from_json(r#"{"로그인상태": "yes"}"#).unwrap();
    assert!(!result.login.is_yes());
}

/// 저장 경로가 파일이면 디스크 모드 실패
#[test]
fn test_disk_destination_is_a_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let blocker = dir.path().join("logs");
    std::fs::write(&blocker, "not a directory").unwrap();

    let result = build_report(
        &CheckResult::default(),
        None,
        None,
        &Destination::Disk(blocker),
        &ReportOptions {
            asset_dir: dir.path().to_path_buf(),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(DutyCheckError::Io(_))));
}

/// DutyCheckError의 Display 구현 확인
#[test]
fn test_error_display() {
    let errors = vec![
        DutyCheckError::Config("테스트 설정 오류".to_string()),
        DutyCheckError::FileNotFound("dashboard.html".to_string()),
        DutyCheckError::HtmlParse("selector".to_string()),
        DutyCheckError::Classifier("timeout".to_string()),
        DutyCheckError::Probe("client".to_string()),
        DutyCheckError::ExcelGeneration("Excel 생성 오류".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "오류 메시지가 비어 있음: {:?}", err);
    }
}

/// IO 오류 변환
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: DutyCheckError = io_err.into();

    assert!(matches!(err, DutyCheckError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSON 오류 변환
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: DutyCheckError = json_err.into();

    assert!(matches!(err, DutyCheckError::JsonParse(_)));
}

/// 공통 라이브러리 오류는 메시지를 그대로 노출
#[test]
fn test_error_chain_transparent() {
    let common_err = duty_checklist_common::Error::Parse("최상위 값이 객체가 아닙니다".to_string());
    let err: DutyCheckError = common_err.into();

    assert!(matches!(err, DutyCheckError::Common(_)));
    assert_eq!(format!("{}", err), "Parse error: 최상위 값이 객체가 아닙니다");
}

/// 설정 파일 JSON 오류
#[test]
fn test_config_invalid_json() {
    let result = Config::from_json("not json");
    assert!(matches!(result, Err(DutyCheckError::JsonParse(_))));
}
