use thiserror::Error;

#[derive(Error, Debug)]
pub enum DutyCheckError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("파일을 찾을 수 없습니다: {0}")]
    FileNotFound(String),

    #[error("HTML 파싱 오류: {0}")]
    HtmlParse(String),

    #[error("분류기 실행 오류: {0}")]
    Classifier(String),

    #[error("링크 확인 오류: {0}")]
    Probe(String),

    #[error("보고서 전송 오류: {0}")]
    Delivery(String),

    #[error("JSON 파싱 오류: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel 생성 오류: {0}")]
    ExcelGeneration(String),

    #[error(transparent)]
    Common(#[from] duty_checklist_common::Error),
}

impl From<rust_xlsxwriter::XlsxError> for DutyCheckError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        DutyCheckError::ExcelGeneration(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DutyCheckError>;
