//! 당직 체크리스트 행 정의
//!
//! 11개 점검 항목을 고정 순서의 테이블로 정의한다.
//! 각 항목은 라벨, 체크사항, 캡처 이미지 키, 판정 함수를 가진다.

use crate::balance;
use crate::types::{CheckResult, LinkStatus, YesNo};

/// 점검 항목 (표시 순서 그대로)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckItem {
    Login,
    Balance,
    Scheduler,
    OneOnOneInquiry,
    EmailInquiry,
    ErrorReport,
    RegionCount,
    EquipmentReport,
    DbSync,
    FrontEnd,
    OperatedServices,
}

/// 항목별 판정 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub passed: bool,
    pub text: String,
}

impl Verdict {
    fn flag(flag: YesNo, pass_text: &str, fail_text: &str) -> Self {
        let passed = flag.is_yes();
        Self {
            passed,
            text: if passed { pass_text } else { fail_text }.to_string(),
        }
    }
}

/// 체크리스트 행 명세
#[derive(Debug, Clone, Copy)]
pub struct RowSpec {
    pub item: CheckItem,
    pub category: &'static str,
    pub menu: &'static str,
    pub instructions: &'static str,
    /// 행별 캡처 이미지 파일명 ("<n>.jpg")
    pub asset: &'static str,
    pub evaluate: fn(&CheckResult) -> Verdict,
}

pub const CATEGORY_BACK_OFFICE: &str = "backOffice";

pub const ROW_SPECS: [RowSpec; 11] = [
    RowSpec {
        item: CheckItem::Login,
        category: CATEGORY_BACK_OFFICE,
        menu: "로그인",
        instructions: "https://hydra2.uxcloud.net 접속\nID: bomanager",
        asset: "1.jpg",
        evaluate: eval_login,
    },
    RowSpec {
        item: CheckItem::Balance,
        category: CATEGORY_BACK_OFFICE,
        menu: "예치금",
        instructions: "Whois 200.00 USD 이상\nGabia 200,000 KRW 이상\n예치금이 남았는 지 확인",
        asset: "2.jpg",
        evaluate: eval_balance,
    },
    RowSpec {
        item: CheckItem::Scheduler,
        category: CATEGORY_BACK_OFFICE,
        menu: "스케줄러",
        instructions: "스케쥴러 상태가 적용중 인지 확인",
        asset: "3.jpg",
        evaluate: eval_scheduler,
    },
    RowSpec {
        item: CheckItem::OneOnOneInquiry,
        category: CATEGORY_BACK_OFFICE,
        menu: "고객문의",
        instructions: "1:1 문의 답변 준비중이 있는지 확인",
        asset: "4.jpg",
        evaluate: eval_one_on_one,
    },
    RowSpec {
        item: CheckItem::EmailInquiry,
        category: CATEGORY_BACK_OFFICE,
        menu: "고객문의",
        instructions: "이메일 문의 답변 준비중이 있는지 확인",
        asset: "5.jpg",
        evaluate: eval_email,
    },
    RowSpec {
        item: CheckItem::ErrorReport,
        category: CATEGORY_BACK_OFFICE,
        menu: "고객문의",
        instructions: "에러리포트 신규 등록 된 이슈가 있는지 확인",
        asset: "6.jpg",
        evaluate: eval_error_report,
    },
    RowSpec {
        item: CheckItem::RegionCount,
        category: CATEGORY_BACK_OFFICE,
        menu: "Region",
        instructions: "Region 상태가 2개 활성화 인지 확인",
        asset: "7.jpg",
        evaluate: eval_region,
    },
    RowSpec {
        item: CheckItem::EquipmentReport,
        category: CATEGORY_BACK_OFFICE,
        menu: "시스템",
        instructions: "장비의 미보고가 있는지 확인",
        asset: "8.jpg",
        evaluate: eval_equipment,
    },
    RowSpec {
        item: CheckItem::DbSync,
        category: CATEGORY_BACK_OFFICE,
        menu: "시스템",
        instructions: "DBSync 일시중지 및 오류가 있는지 확인",
        asset: "9.jpg",
        evaluate: eval_db_sync,
    },
    RowSpec {
        item: CheckItem::FrontEnd,
        category: CATEGORY_BACK_OFFICE,
        menu: "시스템",
        instructions: "1. FrontEnd 서버 상태가 정상인지 확인\n※ 정상이 아닐경우 열기를 통해서 사이트 이동이 되는지 확인\n\n2. FrontEnd 도메인 검색이 정상적으로 가능한지 확인",
        asset: "10.jpg",
        evaluate: eval_front_end,
    },
    RowSpec {
        item: CheckItem::OperatedServices,
        category: CATEGORY_BACK_OFFICE,
        menu: "운영중인 서비스",
        instructions: "Parking, URL, FURL 모두 정상인지 확인\n※ 정상이 아닐경우 해당 상태를 클릭하여 페이지 이동이 정상적으로 되는지 확인",
        asset: "11.jpg",
        evaluate: eval_services,
    },
];

fn eval_login(r: &CheckResult) -> Verdict {
    Verdict::flag(r.login, "정상", "오류")
}

fn eval_balance(r: &CheckResult) -> Verdict {
    let usd = r.whois_usd.as_deref();
    let krw = r.gabia_krw.as_deref();
    Verdict {
        passed: balance::balance_ok(usd, krw),
        text: format!("{}\n{}", usd.unwrap_or("-"), krw.unwrap_or("-")),
    }
}

fn eval_scheduler(r: &CheckResult) -> Verdict {
    Verdict::flag(r.scheduler, "적용됨", "미적용 상태")
}

fn eval_one_on_one(r: &CheckResult) -> Verdict {
    Verdict::flag(r.one_on_one_inquiry, "0개 확인", "1:1 답변준비중 있음")
}

fn eval_email(r: &CheckResult) -> Verdict {
    Verdict::flag(r.email_inquiry, "0개 확인", "이메일 답변준비중 있음")
}

fn eval_error_report(r: &CheckResult) -> Verdict {
    Verdict::flag(r.error_report, "0개 확인", "신규 에러 있음")
}

fn eval_region(r: &CheckResult) -> Verdict {
    Verdict::flag(r.region_active, "2개 확인", "활성화 개수 확인 필요")
}

fn eval_equipment(r: &CheckResult) -> Verdict {
    Verdict::flag(r.equipment_report, "미보고 0개 확인", "미보고 장비 있음")
}

fn eval_db_sync(r: &CheckResult) -> Verdict {
    let passed = r.db_sync.paused.is_yes() && r.db_sync.errors.is_yes();
    Verdict {
        passed,
        text: if passed { "0개 확인" } else { "일시중지 또는 오류 있음" }.to_string(),
    }
}

fn eval_front_end(r: &CheckResult) -> Verdict {
    let fe = &r.front_end;
    let passed = fe.status.is_yes() && fe.domain_search.is_yes();
    let mut text = status_text(passed).to_string();
    push_link_line(&mut text, "더보기 링크", fe.link);
    Verdict { passed, text }
}

fn eval_services(r: &CheckResult) -> Verdict {
    let s = &r.services;
    let passed = s.parking.is_yes() && s.url.is_yes() && s.furl.is_yes();
    let mut text = status_text(passed).to_string();
    push_link_line(&mut text, "Parking 링크", s.parking_link);
    push_link_line(&mut text, "URL 링크", s.url_link);
    push_link_line(&mut text, "FURL 링크", s.furl_link);
    Verdict { passed, text }
}

fn status_text(passed: bool) -> &'static str {
    if passed { "정상" } else { "비정상" }
}

fn push_link_line(text: &mut String, label: &str, link: Option<LinkStatus>) {
    if let Some(status) = link {
        text.push_str(&format!("\n{} : {}", label, status));
    }
}

/// 결과 셀 배경색
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultFill {
    Good,
    Bad,
}

impl ResultFill {
    pub fn rgb(self) -> u32 {
        match self {
            ResultFill::Good => 0xC6EFCE,
            ResultFill::Bad => 0xFFC7CE,
        }
    }
}

/// 판정이 끝난 체크리스트 행
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistRow {
    pub item: CheckItem,
    pub category: &'static str,
    pub menu: &'static str,
    pub instructions: &'static str,
    pub asset: &'static str,
    pub result_text: String,
    pub passed: bool,
}

impl ChecklistRow {
    pub fn fill(&self) -> ResultFill {
        if self.passed { ResultFill::Good } else { ResultFill::Bad }
    }
}

/// 점검 결과로 11개 행을 생성 (항상 고정 순서)
pub fn build_rows(result: &CheckResult) -> Vec<ChecklistRow> {
    ROW_SPECS
        .iter()
        .map(|spec| {
            let verdict = (spec.evaluate)(result);
            ChecklistRow {
                item: spec.item,
                category: spec.category,
                menu: spec.menu,
                instructions: spec.instructions,
                asset: spec.asset,
                result_text: verdict.text,
                passed: verdict.passed,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DbSync, FrontEnd, OperatedServices};

    fn all_pass() -> CheckResult {
        CheckResult {
            login: YesNo::Yes,
            whois_usd: Some("1,072.88 USD".into()),
            gabia_krw: Some("442,400 KRW".into()),
            scheduler: YesNo::Yes,
            one_on_one_inquiry: YesNo::Yes,
            email_inquiry: YesNo::Yes,
            error_report: YesNo::Yes,
            region_active: YesNo::Yes,
            equipment_report: YesNo::Yes,
            db_sync: DbSync { paused: YesNo::Yes, errors: YesNo::Yes },
            front_end: FrontEnd {
                status: YesNo::Yes,
                domain_search: YesNo::Yes,
                link: None,
            },
            services: OperatedServices {
                parking: YesNo::Yes,
                url: YesNo::Yes,
                furl: YesNo::Yes,
                ..Default::default()
            },
        }
    }

    fn row(rows: &[ChecklistRow], item: CheckItem) -> &ChecklistRow {
        rows.iter().find(|r| r.item == item).unwrap()
    }

    #[test]
    fn test_fixed_order_and_assets() {
        let rows = build_rows(&CheckResult::default());
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[0].item, CheckItem::Login);
        assert_eq!(rows[10].item, CheckItem::OperatedServices);
        for (i, r) in rows.iter().enumerate() {
            assert_eq!(r.asset, format!("{}.jpg", i + 1));
        }
    }

    #[test]
    fn test_all_pass() {
        let rows = build_rows(&all_pass());
        assert!(rows.iter().all(|r| r.passed), "{:?}", rows);
        assert!(rows.iter().all(|r| r.fill() == ResultFill::Good));
    }

    #[test]
    fn test_default_result_fails_every_row() {
        let rows = build_rows(&CheckResult::default());
        assert!(rows.iter().all(|r| !r.passed));
        assert!(rows.iter().all(|r| r.fill() == ResultFill::Bad));
    }

    #[test]
    fn test_each_single_flag_drives_its_row_only() {
        let mut r = all_pass();
        r.email_inquiry = YesNo::No;
        let rows = build_rows(&r);
        for row in &rows {
            assert_eq!(row.passed, row.item != CheckItem::EmailInquiry);
        }
        assert_eq!(row(&rows, CheckItem::EmailInquiry).result_text, "이메일 답변준비중 있음");
    }

    #[test]
    fn test_db_sync_requires_both_flags() {
        let mut r = all_pass();
        r.db_sync.errors = YesNo::No;
        assert!(!row(&build_rows(&r), CheckItem::DbSync).passed);
    }

    #[test]
    fn test_front_end_requires_both_flags() {
        let mut r = all_pass();
        r.front_end.domain_search = YesNo::No;
        let rows = build_rows(&r);
        assert!(!row(&rows, CheckItem::FrontEnd).passed);
        assert_eq!(row(&rows, CheckItem::FrontEnd).result_text, "비정상");
    }

    #[test]
    fn test_services_require_all_three() {
        for which in 0..3 {
            let mut r = all_pass();
            match which {
                0 => r.services.parking = YesNo::No,
                1 => r.services.url = YesNo::No,
                _ => r.services.furl = YesNo::No,
            }
            assert!(!row(&build_rows(&r), CheckItem::OperatedServices).passed);
        }
    }

    #[test]
    fn test_balance_boundary_row() {
        let mut r = all_pass();
        r.whois_usd = Some("199.99 USD".into());
        let rows = build_rows(&r);
        let balance = row(&rows, CheckItem::Balance);
        assert!(!balance.passed);
        assert_eq!(balance.result_text, "199.99 USD\n442,400 KRW");

        r.whois_usd = Some("200.00 USD".into());
        assert!(row(&build_rows(&r), CheckItem::Balance).passed);
    }

    #[test]
    fn test_link_lines_appended() {
        let mut r = all_pass();
        r.front_end.status = YesNo::No;
        r.front_end.link = Some(LinkStatus::Ok);
        r.services.url = YesNo::No;
        r.services.url_link = Some(LinkStatus::Broken);
        let rows = build_rows(&r);
        assert_eq!(row(&rows, CheckItem::FrontEnd).result_text, "비정상\n더보기 링크 : 정상");
        assert_eq!(
            row(&rows, CheckItem::OperatedServices).result_text,
            "비정상\nURL 링크 : 비정상"
        );
        // 링크 재확인 결과는 판정에 영향을 주지 않는다
        assert!(!row(&rows, CheckItem::FrontEnd).passed);
    }
}
