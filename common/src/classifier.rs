//! 분류 응답 파서와 규칙 기반 판정
//!
//! - expected_from_extracted: 추출값만으로 내리는 결정적 판정
//! - parse_classifier_response: 모델의 "N. 예" 형식 응답 파싱
//! - reconcile: 모델 응답을 결정적 판정과 대조하고 불일치는 판정값으로 교체

use crate::prompts::{KRW_QUESTION_NO, USD_QUESTION_NO};
use crate::types::{CheckResult, ExtractedFields, YesNo, YES_LABEL};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NUMBERED_LINE: Regex = Regex::new(r"^(\d+)[.)]").unwrap();
}

const DEFAULT_USD: &str = "0 USD";
const DEFAULT_KRW: &str = "0 KRW";

const OK: &str = "정상";
const APPLIED: &str = "적용됨";
const ZERO_COUNT: &str = "0 개";
const TWO_COUNT: &str = "2 개";

fn matches(value: Option<&str>, expected: &str) -> YesNo {
    YesNo::from_bool(value == Some(expected))
}

/// 추출값에서 결정적으로 판정
pub fn expected_from_extracted(fields: &ExtractedFields) -> CheckResult {
    let db_sync = fields.db_sync.clone().unwrap_or_default();
    let front_end = fields.front_end.clone().unwrap_or_default();
    let services = fields.services.clone().unwrap_or_default();

    let mut result = base_result(fields);
    result.login = matches(fields.login_status.as_deref(), OK);
    result.scheduler = matches(fields.scheduler.as_deref(), APPLIED);
    result.one_on_one_inquiry = matches(fields.one_on_one_inquiry.as_deref(), ZERO_COUNT);
    result.email_inquiry = matches(fields.email_inquiry.as_deref(), ZERO_COUNT);
    result.error_report = matches(fields.error_report.as_deref(), ZERO_COUNT);
    result.region_active = matches(fields.region_active.as_deref(), TWO_COUNT);
    result.equipment_report = matches(fields.equipment_report.as_deref(), ZERO_COUNT);
    result.db_sync.paused = matches(db_sync.paused.as_deref(), ZERO_COUNT);
    result.db_sync.errors = matches(db_sync.errors.as_deref(), ZERO_COUNT);
    result.front_end.status = matches(Some(front_end.status.as_str()), OK);
    result.front_end.domain_search = matches(Some(front_end.domain_search.as_str()), OK);
    result.services.parking = matches(services.parking.as_deref(), OK);
    result.services.url = matches(services.url.as_deref(), OK);
    result.services.furl = matches(services.furl.as_deref(), OK);
    result
}

/// 판정 플래그는 모두 "아니요", 예치금은 추출값 그대로
fn base_result(fields: &ExtractedFields) -> CheckResult {
    CheckResult {
        whois_usd: Some(fields.whois_usd.clone().unwrap_or_else(|| DEFAULT_USD.into())),
        gabia_krw: Some(fields.gabia_krw.clone().unwrap_or_else(|| DEFAULT_KRW.into())),
        ..Default::default()
    }
}

fn flag_slot(result: &mut CheckResult, question: u32) -> Option<&mut YesNo> {
    let slot = match question {
        1 => &mut result.login,
        2 => &mut result.scheduler,
        3 => &mut result.one_on_one_inquiry,
        4 => &mut result.email_inquiry,
        5 => &mut result.error_report,
        6 => &mut result.region_active,
        7 => &mut result.equipment_report,
        8 => &mut result.db_sync.paused,
        9 => &mut result.db_sync.errors,
        10 => &mut result.front_end.status,
        11 => &mut result.front_end.domain_search,
        12 => &mut result.services.parking,
        13 => &mut result.services.url,
        14 => &mut result.services.furl,
        _ => return None,
    };
    Some(slot)
}

/// 모델 응답 파싱
///
/// 답변이 없는 질문은 "아니요", 15/16번 답이 비어 있으면 추출값 예치금을 유지.
pub fn parse_classifier_response(response: &str, fields: &ExtractedFields) -> CheckResult {
    let mut result = base_result(fields);
    let usd_prefix = format!("{}.", USD_QUESTION_NO);
    let krw_prefix = format!("{}.", KRW_QUESTION_NO);

    for line in response.lines().map(str::trim) {
        if let Some(caps) = NUMBERED_LINE.captures(line) {
            if let Ok(question) = caps[1].parse::<u32>() {
                if let Some(slot) = flag_slot(&mut result, question) {
                    *slot = YesNo::from_bool(line.contains(YES_LABEL));
                }
            }
        }

        if let Some(answer) = line.strip_prefix(usd_prefix.as_str()) {
            let answer = answer.trim();
            if !answer.is_empty() {
                result.whois_usd = Some(answer.to_string());
            }
        } else if let Some(answer) = line.strip_prefix(krw_prefix.as_str()) {
            let answer = answer.trim();
            if !answer.is_empty() {
                result.gabia_krw = Some(answer.to_string());
            }
        }
    }

    result
}

/// 모델 응답과 결정적 판정의 불일치 항목
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub field: &'static str,
    pub expected: String,
    pub actual: String,
}

/// 대조 결과
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub result: CheckResult,
    pub mismatches: Vec<Mismatch>,
}

impl Reconciliation {
    pub fn all_match(&self) -> bool {
        self.mismatches.is_empty()
    }
}

fn comparable_fields(r: &CheckResult) -> Vec<(&'static str, String)> {
    vec![
        ("로그인상태", r.login.to_string()),
        ("whois_usd", r.whois_usd.clone().unwrap_or_default()),
        ("gabia_krw", r.gabia_krw.clone().unwrap_or_default()),
        ("스케줄러상태", r.scheduler.to_string()),
        ("1:1문의", r.one_on_one_inquiry.to_string()),
        ("이메일문의", r.email_inquiry.to_string()),
        ("에러리포트", r.error_report.to_string()),
        ("Region활성", r.region_active.to_string()),
        ("장비미보고", r.equipment_report.to_string()),
        ("DB_Sync.일시중지", r.db_sync.paused.to_string()),
        ("DB_Sync.오류", r.db_sync.errors.to_string()),
        ("FrontEnd.상태", r.front_end.status.to_string()),
        ("FrontEnd.도메인 검색", r.front_end.domain_search.to_string()),
        ("운영중인서비스.parking", r.services.parking.to_string()),
        ("운영중인서비스.url", r.services.url.to_string()),
        ("운영중인서비스.furl", r.services.furl.to_string()),
    ]
}

/// 모델 응답을 결정적 판정과 대조
///
/// 불일치 항목은 판정값으로 교체되므로 최종 결과는 항상 `expected`와 같다.
/// 모델 응답은 불일치 기록용으로만 쓰인다.
pub fn reconcile(parsed: &CheckResult, expected: &CheckResult) -> Reconciliation {
    let mismatches = comparable_fields(expected)
        .into_iter()
        .zip(comparable_fields(parsed))
        .filter(|((_, e), (_, a))| e != a)
        .map(|((field, expected), (_, actual))| Mismatch { field, expected, actual })
        .collect();

    Reconciliation {
        result: expected.clone(),
        mismatches,
    }
}
