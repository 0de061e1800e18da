//! Duty Checklist Common Library
//!
//! CLI와 보고서 생성기가 공유하는 타입과 유틸리티

pub mod types;
pub mod error;
pub mod balance;
pub mod checklist;
pub mod merge;
pub mod layout;
pub mod prompts;
pub mod classifier;
pub mod export;

pub use types::{CheckResult, ExtractedFields, LinkStatus, YesNo};
pub use error::{Error, Result};
pub use checklist::{build_rows, CheckItem, ChecklistRow, ResultFill, ROW_SPECS};
pub use classifier::{expected_from_extracted, parse_classifier_response, reconcile, Mismatch, Reconciliation};
pub use prompts::build_classifier_prompt;
pub use export::{report_file_name, sanitize_operator, DEFAULT_REPORT_PREFIX};
