//! 대시보드 HTML 필드 추출
//!
//! `.box` > `.item` > `.header` / `.value` 구조에서 점검 항목 원본 문자열을 읽는다.

use crate::error::{DutyCheckError, Result};
use duty_checklist_common::types::{RawDbSync, RawFrontEnd, RawServices};
use duty_checklist_common::ExtractedFields;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

struct Selectors {
    dashboard: Selector,
    box_: Selector,
    title: Selector,
    item: Selector,
    header: Selector,
    value: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        let parse = |css: &str| {
            Selector::parse(css).map_err(|e| DutyCheckError::HtmlParse(format!("{}: {}", css, e)))
        };
        Ok(Self {
            dashboard: parse("#dashboard")?,
            box_: parse(".box")?,
            title: parse(".title")?,
            item: parse(".item")?,
            header: parse(".header")?,
            value: parse(".value")?,
        })
    }
}

/// 텍스트 노드별 공백 제거 후 이어붙임
fn stripped_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}

fn child_text(el: ElementRef<'_>, selector: &Selector) -> Option<String> {
    el.select(selector).next().map(stripped_text)
}

/// 대시보드 HTML에서 점검 항목 추출
///
/// # Arguments
/// * `html` - 대시보드 페이지 HTML
/// * `login_status` - 로그인 단계 결과 ("정상" 등). HTML에는 없으므로 외부에서 받는다.
pub fn extract_fields(html: &str, login_status: Option<&str>) -> Result<ExtractedFields> {
    let sel = Selectors::new()?;
    let document = Html::parse_document(html);

    let mut fields = ExtractedFields {
        login_status: login_status.map(str::to_string),
        ..Default::default()
    };

    extract_balances(&document, &sel, &mut fields);

    let mut answer_ready_count = 0;
    let mut db_sync = RawDbSync::default();
    let mut front_end = RawFrontEnd::default();
    let mut services = RawServices::default();

    for box_el in document.select(&sel.box_) {
        let title = child_text(box_el, &sel.title).unwrap_or_default();
        let has_front_end = box_el
            .select(&sel.item)
            .filter_map(|item| child_text(item, &sel.header))
            .any(|h| h.contains("FrontEnd"));

        for item in box_el.select(&sel.item) {
            let (Some(header), Some(value)) =
                (child_text(item, &sel.header), child_text(item, &sel.value))
            else {
                continue;
            };

            if header == "답변 준비중" {
                match answer_ready_count {
                    0 => fields.one_on_one_inquiry = Some(value.clone()),
                    1 => fields.email_inquiry = Some(value.clone()),
                    _ => {}
                }
                answer_ready_count += 1;
            } else if header == "신규" {
                fields.error_report = Some(value.clone());
            } else if header == "활성" {
                fields.region_active = Some(value.clone());
            } else if title.contains("스케줄러") && header.contains("적용여부") {
                fields.scheduler = Some(value.clone());
            } else if header.contains("미보고") {
                fields.equipment_report = Some(value.clone());
            } else if header.contains("일시중지") {
                db_sync.paused = Some(value.clone());
            } else if header.contains("오류") {
                db_sync.errors = Some(value.clone());
            }

            let service_key = header.to_lowercase();
            if service_key == "url" {
                services.url = Some(value.clone());
            } else if service_key.contains("parking") {
                services.parking = Some(value.clone());
            } else if service_key.contains("furl") {
                services.furl = Some(value.clone());
            }

            if has_front_end {
                match header.as_str() {
                    "상태" => front_end.status = value,
                    "도메인 검색" => front_end.domain_search = value,
                    _ => {}
                }
            }
        }
    }

    if !db_sync.is_empty() {
        fields.db_sync = Some(db_sync);
    }
    if !front_end.status.is_empty() || !front_end.domain_search.is_empty() {
        fields.front_end = Some(front_end);
    }
    if !services.is_empty() {
        fields.services = Some(services);
    }

    debug!(?fields, "대시보드 필드 추출 완료");
    Ok(fields)
}

/// `#dashboard` 안의 예치금 박스에서 USD / KRW 값
fn extract_balances(document: &Html, sel: &Selectors, fields: &mut ExtractedFields) {
    let Some(dashboard) = document.select(&sel.dashboard).next() else {
        return;
    };

    for box_el in dashboard.select(&sel.box_) {
        let is_deposit = child_text(box_el, &sel.title).is_some_and(|t| t.contains("예치금"));
        if !is_deposit {
            continue;
        }
        for item in box_el.select(&sel.item) {
            let Some(value) = child_text(item, &sel.value) else {
                continue;
            };
            if value.contains("USD") {
                fields.whois_usd = Some(value);
            } else if value.contains("KRW") {
                fields.gabia_krw = Some(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DASHBOARD: &str = r#"
<html><body>
<div id="dashboard">
  <div class="box">
    <div class="title">예치금</div>
    <div class="item"><div class="header">Whois</div><div class="value"> 1,072.88 <span>USD</span></div></div>
    <div class="item"><div class="header">Gabia</div><div class="value">442,400 KRW</div></div>
  </div>
  <div class="box">
    <div class="title">스케줄러</div>
    <div class="item"><div class="header">적용여부</div><div class="value">적용됨</div></div>
  </div>
  <div class="box">
    <div class="title">고객문의</div>
    <div class="item"><div class="header">답변 준비중</div><div class="value">0 개</div></div>
    <div class="item"><div class="header">답변 준비중</div><div class="value">3 개</div></div>
    <div class="item"><div class="header">신규</div><div class="value">0 개</div></div>
  </div>
  <div class="box">
    <div class="title">시스템</div>
    <div class="item"><div class="header">활성</div><div class="value">2 개</div></div>
    <div class="item"><div class="header">장비 미보고</div><div class="value">0 개</div></div>
    <div class="item"><div class="header">일시중지</div><div class="value">0 개</div></div>
    <div class="item"><div class="header">오류</div><div class="value">1 개</div></div>
  </div>
  <div class="box">
    <div class="title">도메인</div>
    <div class="item"><div class="header">FrontEnd</div><div class="value">-</div></div>
    <div class="item"><div class="header">상태</div><div class="value">정상</div></div>
    <div class="item"><div class="header">도메인 검색</div><div class="value">정상</div></div>
  </div>
  <div class="box">
    <div class="title">운영중인 서비스</div>
    <div class="item"><div class="header">Parking</div><div class="value">정상</div></div>
    <div class="item"><div class="header">URL</div><div class="value">정상</div></div>
    <div class="item"><div class="header">FURL</div><div class="value">비정상</div></div>
  </div>
</div>
</body></html>
"#;

    #[test]
    fn test_extract_full_dashboard() {
        let fields = extract_fields(DASHBOARD, Some("정상")).unwrap();

        assert_eq!(fields.login_status.as_deref(), Some("정상"));
        assert_eq!(fields.whois_usd.as_deref(), Some("1,072.88USD"));
        assert_eq!(fields.gabia_krw.as_deref(), Some("442,400 KRW"));
        assert_eq!(fields.scheduler.as_deref(), Some("적용됨"));
        assert_eq!(fields.one_on_one_inquiry.as_deref(), Some("0 개"));
        assert_eq!(fields.email_inquiry.as_deref(), Some("3 개"));
        assert_eq!(fields.error_report.as_deref(), Some("0 개"));
        assert_eq!(fields.region_active.as_deref(), Some("2 개"));
        assert_eq!(fields.equipment_report.as_deref(), Some("0 개"));

        let db_sync = fields.db_sync.unwrap();
        assert_eq!(db_sync.paused.as_deref(), Some("0 개"));
        assert_eq!(db_sync.errors.as_deref(), Some("1 개"));

        let front_end = fields.front_end.unwrap();
        assert_eq!(front_end.status, "정상");
        assert_eq!(front_end.domain_search, "정상");

        let services = fields.services.unwrap();
        assert_eq!(services.parking.as_deref(), Some("정상"));
        assert_eq!(services.url.as_deref(), Some("정상"));
        assert_eq!(services.furl.as_deref(), Some("비정상"));
    }

    #[test]
    fn test_extract_empty_page() {
        let fields = extract_fields("<html><body></body></html>", None).unwrap();
        assert_eq!(fields, ExtractedFields::default());
    }

    #[test]
    fn test_front_end_requires_front_end_header() {
        let html = r#"<div class="box"><div class="item"><div class="header">상태</div><div class="value">정상</div></div></div>"#;
        let fields = extract_fields(html, None).unwrap();
        assert!(fields.front_end.is_none());
    }

    #[test]
    fn test_balances_outside_dashboard_ignored() {
        let html = r#"<div class="box"><div class="title">예치금</div>
            <div class="item"><div class="value">5 USD</div></div></div>"#;
        let fields = extract_fields(html, None).unwrap();
        assert!(fields.whois_usd.is_none());
    }
}
