//! Export core modules shared across CLI wrappers.

#[cfg(feature = "excel")]
pub mod excel_core;

use chrono::NaiveDate;

/// 보고서 파일명 기본 접두사
pub const DEFAULT_REPORT_PREFIX: &str = "당직체크리스트v5";

/// 담당자 이름에서 문자/숫자/공백만 남긴다
pub fn sanitize_operator(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// `<접두사>_<yyyymmdd>[_<담당자>].xlsx`
///
/// 정리 후 담당자 이름이 비면 접미사를 붙이지 않는다.
pub fn report_file_name(prefix: &str, date: NaiveDate, operator: Option<&str>) -> String {
    let suffix = operator
        .map(sanitize_operator)
        .filter(|name| !name.is_empty())
        .map(|name| format!("_{}", name))
        .unwrap_or_default();
    format!("{}_{}{}.xlsx", prefix, date.format("%Y%m%d"), suffix)
}
