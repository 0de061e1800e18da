//! 프롬프트 생성 모듈
//!
//! 대시보드 추출값을 넘겨 항목별 "예"/"아니요" 답변을 받는 분류 프롬프트.
//! 질문 번호는 `classifier::parse_classifier_response`의 번호와 1:1 대응한다.

use crate::types::ExtractedFields;

/// 예/아니요 질문 목록 (1번부터)
pub const FLAG_QUESTIONS: [&str; 14] = [
    "로그인상태의 값이 \"정상\"인가요?",
    "스케줄러상태의 값이 \"적용됨\"인가요?",
    "1:1문의의 값이 \"0 개\"인가요?",
    "이메일문의의 값이 \"0 개\"인가요?",
    "에러리포트의 값이 \"0 개\"인가요?",
    "Region활성의 값이 \"2 개\"인가요?",
    "장비미보고 값이 \"0 개\"인가요?",
    "DB_Sync의 일시중지 값이 \"0 개\"인가요?",
    "DB_Sync의 오류 값이 \"0 개\"인가요?",
    "FrontEnd의 상태 값이 \"정상\"인가요?",
    "FrontEnd의 도메인 검색 값이 \"정상\"인가요?",
    "운영중인서비스의 parking 값이 \"정상\"인가요?",
    "운영중인서비스의 url 값이 \"정상\"인가요?",
    "운영중인서비스의 furl 값이 \"정상\"인가요?",
];

/// 15번: Whois 예치금
pub const USD_QUESTION_NO: u32 = 15;
/// 16번: Gabia 예치금
pub const KRW_QUESTION_NO: u32 = 16;

/// 분류 프롬프트 생성
///
/// # Arguments
/// * `fields` - 대시보드 HTML 추출 결과
///
/// # Returns
/// 번호별 한 줄 답변을 요구하는 프롬프트 문자열
pub fn build_classifier_prompt(fields: &ExtractedFields) -> String {
    let data = serde_json::to_string(fields).unwrap_or_default();

    let questions = FLAG_QUESTIONS
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. {}", i + 1, q))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"다음 데이터를 분석하고, 아래 질문에 대해 정확히 "예" 또는 "아니요"로만 답변해주세요.
각 질문에 대해 번호와 함께 한 줄로 답변하세요. 다른 설명은 추가하지 마세요.
예시 형식: "1. 예", "2. 아니요"

데이터: {data}

질문:
{questions}
{USD_QUESTION_NO}. Whois USD 예치금은 얼마인가요? (숫자만 답하세요)
{KRW_QUESTION_NO}. Gabia KRW 예치금은 얼마인가요? (숫자만 답하세요)
"#
    )
}
