//! 링크 재확인
//!
//! 분류 결과가 "아니요"인 FrontEnd / 운영중인 서비스 링크에 HTTP 요청을 보내
//! 실제 응답 여부를 기록한다. 200 응답만 정상으로 본다.

use crate::config::LinkTargets;
use crate::error::{DutyCheckError, Result};
use duty_checklist_common::{CheckResult, LinkStatus, YesNo};
use std::time::Duration;
use tracing::{info, warn};

/// 재확인 대상 링크
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    FrontEnd,
    Parking,
    Url,
    Furl,
}

impl LinkKind {
    pub fn env_key(self) -> &'static str {
        match self {
            LinkKind::FrontEnd => "FRONTEND_LINK",
            LinkKind::Parking => "PARKING_LINK",
            LinkKind::Url => "URL_LINK",
            LinkKind::Furl => "FURL_LINK",
        }
    }

    fn target(self, targets: &LinkTargets) -> Option<&str> {
        match self {
            LinkKind::FrontEnd => targets.frontend.as_deref(),
            LinkKind::Parking => targets.parking.as_deref(),
            LinkKind::Url => targets.url.as_deref(),
            LinkKind::Furl => targets.furl.as_deref(),
        }
    }

    fn slot(self, result: &mut CheckResult) -> &mut Option<LinkStatus> {
        match self {
            LinkKind::FrontEnd => &mut result.front_end.link,
            LinkKind::Parking => &mut result.services.parking_link,
            LinkKind::Url => &mut result.services.url_link,
            LinkKind::Furl => &mut result.services.furl_link,
        }
    }
}

/// 확인이 필요한 링크 목록
pub fn links_to_probe(result: &CheckResult) -> Vec<LinkKind> {
    let mut kinds = Vec::new();
    if result.front_end.status == YesNo::No || result.front_end.domain_search == YesNo::No {
        kinds.push(LinkKind::FrontEnd);
    }
    let services = &result.services;
    for (flag, kind) in [
        (services.parking, LinkKind::Parking),
        (services.url, LinkKind::Url),
        (services.furl, LinkKind::Furl),
    ] {
        if flag == YesNo::No {
            kinds.push(kind);
        }
    }
    kinds
}

/// 실패 항목의 링크를 재확인해 결과에 기록
///
/// 대상 URL이 없으면 경고만 남기고 건너뛴다. 요청 실패는 비정상으로 기록한다.
pub async fn recheck_links(
    result: &mut CheckResult,
    targets: &LinkTargets,
    timeout: Duration,
) -> Result<()> {
    let pending = links_to_probe(result);
    if pending.is_empty() {
        info!("재확인할 링크 없음");
        return Ok(());
    }

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DutyCheckError::Probe(e.to_string()))?;

    for kind in pending {
        let Some(url) = kind.target(targets) else {
            warn!(link = ?kind, env = kind.env_key(), "링크 주소가 설정되지 않아 건너뜀");
            continue;
        };

        let status = match client.get(url).send().await {
            Ok(response) => LinkStatus::from_http_status(response.status().as_u16()),
            Err(e) => {
                warn!(link = ?kind, error = %e, "링크 요청 실패");
                LinkStatus::Broken
            }
        };
        info!(link = ?kind, %status, "링크 재확인");
        *kind.slot(result) = Some(status);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_yes() -> CheckResult {
        let mut r = CheckResult::default();
        r.front_end.status = YesNo::Yes;
        r.front_end.domain_search = YesNo::Yes;
        r.services.parking = YesNo::Yes;
        r.services.url = YesNo::Yes;
        r.services.furl = YesNo::Yes;
        r
    }

    #[test]
    fn test_nothing_to_probe_when_healthy() {
        assert!(links_to_probe(&all_yes()).is_empty());
    }

    #[test]
    fn test_front_end_probed_when_either_flag_fails() {
        let mut r = all_yes();
        r.front_end.domain_search = YesNo::No;
        assert_eq!(links_to_probe(&r), vec![LinkKind::FrontEnd]);
    }

    #[test]
    fn test_services_probed_individually() {
        let mut r = all_yes();
        r.services.url = YesNo::No;
        r.services.furl = YesNo::No;
        assert_eq!(links_to_probe(&r), vec![LinkKind::Url, LinkKind::Furl]);
    }

    #[tokio::test]
    async fn test_missing_targets_are_skipped() {
        let mut r = CheckResult::default();
        recheck_links(&mut r, &LinkTargets::default(), Duration::from_secs(1))
            .await
            .unwrap();
        assert!(r.front_end.link.is_none());
        assert!(r.services.parking_link.is_none());
        assert!(r.services.furl_link.is_none());
    }
}
