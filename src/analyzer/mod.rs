//! 추출값 분류
//!
//! 로컬 모델 응답을 결정적 판정과 대조한다. 모델 실행이 실패하거나
//! 제한 시간을 넘기면 결정적 판정만 사용한다.

mod ollama_cli;

use duty_checklist_common::{
    build_classifier_prompt, expected_from_extracted, parse_classifier_response, reconcile,
    CheckResult, ExtractedFields, Mismatch,
};
use std::time::Duration;
use tracing::{info, warn};

pub use ollama_cli::run_ollama;

/// 분류 실행 설정
#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    pub model: String,
    pub timeout: Duration,
    /// 모델을 호출하지 않고 결정적 판정만 사용
    pub offline: bool,
}

impl ClassifierSettings {
    pub fn from_config(config: &crate::config::Config, offline: bool) -> Self {
        Self {
            model: config.model.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            offline,
        }
    }
}

/// 분류 결과
#[derive(Debug, Clone)]
pub struct Classification {
    pub result: CheckResult,
    pub mismatches: Vec<Mismatch>,
    /// 모델 응답 없이 결정적 판정만 사용했는지
    pub used_fallback: bool,
}

/// 추출값을 분류해 체크 결과를 만든다
///
/// 모델 오류는 로그로만 남기고 반환하지 않는다.
pub async fn classify(fields: &ExtractedFields, settings: &ClassifierSettings) -> Classification {
    let expected = expected_from_extracted(fields);

    if settings.offline {
        info!("오프라인 모드: 규칙 기반 판정 사용");
        return Classification {
            result: expected,
            mismatches: Vec::new(),
            used_fallback: true,
        };
    }

    let prompt = build_classifier_prompt(fields);
    let response = match run_ollama(&settings.model, &prompt, settings.timeout).await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "모델 분류 실패, 규칙 기반 판정으로 대체");
            return Classification {
                result: expected,
                mismatches: Vec::new(),
                used_fallback: true,
            };
        }
    };

    let parsed = parse_classifier_response(&response, fields);
    let reconciliation = reconcile(&parsed, &expected);
    for m in &reconciliation.mismatches {
        warn!(field = m.field, expected = %m.expected, actual = %m.actual, "모델 응답 불일치");
    }
    if reconciliation.all_match() {
        info!("모델 응답이 규칙 기반 판정과 일치");
    }

    Classification {
        result: reconciliation.result,
        mismatches: reconciliation.mismatches,
        used_fallback: false,
    }
}
