//! 운영 대시보드 당직 체크리스트 도구
//!
//! 대시보드 HTML 추출 → 분류 → 링크 재확인 → Excel 보고서 생성 → 메신저 전송.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod deliver;
pub mod error;
pub mod export;
pub mod logging;
pub mod probe;
