//! 예치금 문자열 파싱
//!
//! "1,072.88 USD" / "442,400 KRW" 형식에서 숫자를 꺼내 기준값과 비교한다.

/// Whois 최소 예치금 (USD)
pub const MIN_USD_BALANCE: f64 = 200.00;

/// Gabia 최소 예치금 (KRW)
pub const MIN_KRW_BALANCE: f64 = 200_000.0;

pub const USD: &str = "USD";
pub const KRW: &str = "KRW";

/// 통화 코드를 제거하고 천 단위 구분자를 뺀 뒤 숫자로 변환
///
/// 통화 코드가 없거나 숫자가 아니면 `None`.
pub fn parse_amount(text: &str, currency: &str) -> Option<f64> {
    if !text.contains(currency) {
        return None;
    }
    let cleaned = text.replace(currency, "").replace(',', "");
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// USD, KRW 모두 기준 이상이어야 통과
pub fn balance_ok(usd: Option<&str>, krw: Option<&str>) -> bool {
    let usd_ok = usd
        .and_then(|t| parse_amount(t, USD))
        .is_some_and(|v| v >= MIN_USD_BALANCE);
    let krw_ok = krw
        .and_then(|t| parse_amount(t, KRW))
        .is_some_and(|v| v >= MIN_KRW_BALANCE);
    usd_ok && krw_ok
}
