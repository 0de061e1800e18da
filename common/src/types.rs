//! 점검 결과 타입 정의
//!
//! - ExtractedFields: 대시보드 HTML에서 뽑은 원본 표시값
//! - CheckResult: 분류기 출력 ("예"/"아니요" 문자열 계약)
//!
//! "예"/"아니요" 문자열은 역직렬화 시점에 `YesNo`로 바뀌므로
//! 이후 코드는 문자열 비교를 하지 않는다.

use serde::{Deserialize, Serialize};

pub const YES_LABEL: &str = "예";
pub const NO_LABEL: &str = "아니요";

pub const LINK_OK_LABEL: &str = "정상";
pub const LINK_BROKEN_LABEL: &str = "비정상";

/// 분류기 판정값
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl YesNo {
    pub fn from_label(label: &str) -> Self {
        if label.trim() == YES_LABEL {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }

    pub fn from_bool(value: bool) -> Self {
        if value { YesNo::Yes } else { YesNo::No }
    }

    pub fn is_yes(self) -> bool {
        self == YesNo::Yes
    }

    pub fn label(self) -> &'static str {
        match self {
            YesNo::Yes => YES_LABEL,
            YesNo::No => NO_LABEL,
        }
    }
}

impl From<String> for YesNo {
    fn from(s: String) -> Self {
        YesNo::from_label(&s)
    }
}

impl From<YesNo> for String {
    fn from(v: YesNo) -> Self {
        v.label().to_string()
    }
}

impl std::fmt::Display for YesNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 링크 재확인(HTTP 프로브) 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LinkStatus {
    Ok,
    Broken,
}

impl LinkStatus {
    pub fn from_http_status(code: u16) -> Self {
        if code == 200 { LinkStatus::Ok } else { LinkStatus::Broken }
    }

    pub fn label(self) -> &'static str {
        match self {
            LinkStatus::Ok => LINK_OK_LABEL,
            LinkStatus::Broken => LINK_BROKEN_LABEL,
        }
    }
}

impl From<String> for LinkStatus {
    fn from(s: String) -> Self {
        if s.trim() == LINK_OK_LABEL { LinkStatus::Ok } else { LinkStatus::Broken }
    }
}

impl From<LinkStatus> for String {
    fn from(v: LinkStatus) -> Self {
        v.label().to_string()
    }
}

impl std::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// DB 동기화 판정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbSync {
    #[serde(rename = "일시중지")]
    pub paused: YesNo,
    #[serde(rename = "오류")]
    pub errors: YesNo,
}

/// FrontEnd 서버 판정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontEnd {
    #[serde(rename = "상태")]
    pub status: YesNo,
    #[serde(rename = "도메인 검색")]
    pub domain_search: YesNo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkStatus>,
}

/// 운영중인 서비스 판정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatedServices {
    pub parking: YesNo,
    pub url: YesNo,
    pub furl: YesNo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_link: Option<LinkStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_link: Option<LinkStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub furl_link: Option<LinkStatus>,
}

/// 분류기 결과 (보고서 입력)
///
/// 누락된 키는 모두 "아니요"(실패)로 취급한다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckResult {
    #[serde(rename = "로그인상태")]
    pub login: YesNo,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub whois_usd: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gabia_krw: Option<String>,

    #[serde(rename = "스케줄러상태")]
    pub scheduler: YesNo,

    #[serde(rename = "1:1문의")]
    pub one_on_one_inquiry: YesNo,

    #[serde(rename = "이메일문의")]
    pub email_inquiry: YesNo,

    #[serde(rename = "에러리포트")]
    pub error_report: YesNo,

    #[serde(rename = "Region활성")]
    pub region_active: YesNo,

    #[serde(rename = "장비미보고")]
    pub equipment_report: YesNo,

    #[serde(rename = "DB_Sync")]
    pub db_sync: DbSync,

    #[serde(rename = "FrontEnd")]
    pub front_end: FrontEnd,

    #[serde(rename = "운영중인서비스")]
    pub services: OperatedServices,
}

impl CheckResult {
    /// JSON 문자열에서 파싱 (최상위가 객체가 아니면 에러)
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> crate::Result<Self> {
        if !value.is_object() {
            return Err(crate::Error::Parse(
                "점검 결과의 최상위 값이 객체가 아닙니다".into(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// 대시보드에서 추출한 DB_Sync 원본값
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDbSync {
    #[serde(rename = "일시중지", skip_serializing_if = "Option::is_none")]
    pub paused: Option<String>,
    #[serde(rename = "오류", skip_serializing_if = "Option::is_none")]
    pub errors: Option<String>,
}

impl RawDbSync {
    pub fn is_empty(&self) -> bool {
        self.paused.is_none() && self.errors.is_none()
    }
}

/// 대시보드에서 추출한 FrontEnd 원본값
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFrontEnd {
    #[serde(rename = "상태")]
    pub status: String,
    #[serde(rename = "도메인 검색")]
    pub domain_search: String,
}

/// 대시보드에서 추출한 운영중인 서비스 원본값
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawServices {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub furl: Option<String>,
}

impl RawServices {
    pub fn is_empty(&self) -> bool {
        self.parking.is_none() && self.url.is_none() && self.furl.is_none()
    }
}

/// 대시보드 HTML 추출 결과
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedFields {
    #[serde(rename = "로그인상태", skip_serializing_if = "Option::is_none")]
    pub login_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub whois_usd: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gabia_krw: Option<String>,

    #[serde(rename = "스케줄러상태", skip_serializing_if = "Option::is_none")]
    pub scheduler: Option<String>,

    #[serde(rename = "1:1문의", skip_serializing_if = "Option::is_none")]
    pub one_on_one_inquiry: Option<String>,

    #[serde(rename = "이메일문의", skip_serializing_if = "Option::is_none")]
    pub email_inquiry: Option<String>,

    #[serde(rename = "에러리포트", skip_serializing_if = "Option::is_none")]
    pub error_report: Option<String>,

    #[serde(rename = "Region활성", skip_serializing_if = "Option::is_none")]
    pub region_active: Option<String>,

    #[serde(rename = "장비미보고", skip_serializing_if = "Option::is_none")]
    pub equipment_report: Option<String>,

    #[serde(rename = "DB_Sync", skip_serializing_if = "Option::is_none")]
    pub db_sync: Option<RawDbSync>,

    #[serde(rename = "FrontEnd", skip_serializing_if = "Option::is_none")]
    pub front_end: Option<RawFrontEnd>,

    #[serde(rename = "운영중인서비스", skip_serializing_if = "Option::is_none")]
    pub services: Option<RawServices>,
}
