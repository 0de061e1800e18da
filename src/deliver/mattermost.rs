//! Mattermost REST v4 클라이언트
//!
//! 요청 구성(`*_request`)과 전송(`send`)은 분리되어 있다.

use crate::error::{DutyCheckError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 로그인 응답 헤더의 세션 토큰
const TOKEN_HEADER: &str = "Token";

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl User {
    /// 닉네임 > "이름 성" > 사용자명
    pub fn display_name(&self) -> String {
        if !self.nickname.trim().is_empty() {
            return self.nickname.trim().to_string();
        }
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if !full.is_empty() {
            return full.to_string();
        }
        self.username.clone()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    login_id: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct CreatePost<'a> {
    channel_id: &'a str,
    message: &'a str,
    file_ids: &'a [String],
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file_infos: Vec<FileInfo>,
}

#[derive(Debug, Deserialize)]
struct FileInfo {
    id: String,
}

#[derive(Debug, Deserialize)]
struct PostResponse {
    id: String,
}

/// 이름/표시명으로 찾을 수 있는 항목
pub trait Named {
    fn name(&self) -> &str;
    fn display_name(&self) -> &str;
}

impl Named for Team {
    fn name(&self) -> &str {
        &self.name
    }
    fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl Named for Channel {
    fn name(&self) -> &str {
        &self.name
    }
    fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// 대소문자 무시 완전 일치 후 부분 일치
pub fn find_named<'a, T: Named>(items: &'a [T], wanted: &str) -> Option<&'a T> {
    let wanted = wanted.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    let fields = |item: &T| [item.name().to_lowercase(), item.display_name().to_lowercase()];

    items
        .iter()
        .find(|item| fields(item).iter().any(|f| *f == wanted))
        .or_else(|| {
            items
                .iter()
                .find(|item| fields(item).iter().any(|f| !f.is_empty() && f.contains(&wanted)))
        })
}

/// 팀은 못 찾으면 첫 번째 팀을 쓴다
pub fn select_team<'a>(teams: &'a [Team], wanted: &str) -> Option<&'a Team> {
    find_named(teams, wanted).or_else(|| teams.first())
}

/// 서버 주소에서 API 기준 경로를 만든다. 스킴이 없으면 https, 경로는 버린다.
pub fn api_base(server: &str) -> Result<String> {
    let server = server.trim();
    let with_scheme = if server.contains("://") {
        server.to_string()
    } else {
        format!("https://{}", server)
    };

    let url = Url::parse(&with_scheme)
        .map_err(|e| DutyCheckError::Delivery(format!("서버 주소 오류 ({}): {}", server, e)))?;
    if url.host_str().is_none() {
        return Err(DutyCheckError::Delivery(format!("서버 주소에 호스트가 없습니다: {}", server)));
    }
    Ok(format!("{}/api/v4", url.origin().ascii_serialization()))
}

pub struct MattermostClient {
    http: reqwest::Client,
    base: String,
    token: Option<String>,
}

impl MattermostClient {
    pub fn new(server: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DutyCheckError::Delivery(e.to_string()))?;

        Ok(Self {
            http,
            base: api_base(server)?,
            token: None,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    #[cfg(test)]
    fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub fn login_request(&self, login_id: &str, password: &str) -> RequestBuilder {
        self.http
            .post(self.url("/users/login"))
            .json(&LoginRequest { login_id, password })
    }

    pub fn direct_channel_request(&self, user_id: &str, other_id: &str) -> RequestBuilder {
        self.authed(self.http.post(self.url("/channels/direct")))
            .json(&[user_id, other_id])
    }

    pub fn teams_request(&self, user_id: &str) -> RequestBuilder {
        self.authed(self.http.get(self.url(&format!("/users/{}/teams", user_id))))
    }

    pub fn channels_request(&self, user_id: &str, team_id: &str) -> RequestBuilder {
        self.authed(
            self.http
                .get(self.url(&format!("/users/{}/teams/{}/channels", user_id, team_id))),
        )
    }

    pub fn upload_request(&self, channel_id: &str, file_name: &str, bytes: Vec<u8>) -> Result<RequestBuilder> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(XLSX_MIME)
            .map_err(|e| DutyCheckError::Delivery(e.to_string()))?;
        let form = Form::new().part("files", part);

        Ok(self
            .authed(self.http.post(self.url("/files")))
            .query(&[("channel_id", channel_id)])
            .multipart(form))
    }

    pub fn post_request(&self, channel_id: &str, message: &str, file_ids: &[String]) -> RequestBuilder {
        self.authed(self.http.post(self.url("/posts"))).json(&CreatePost {
            channel_id,
            message,
            file_ids,
        })
    }

    pub fn logout_request(&self) -> RequestBuilder {
        self.authed(self.http.post(self.url("/users/logout")))
    }

    /// 로그인하고 세션 토큰을 저장
    pub async fn login(&mut self, login_id: &str, password: &str) -> Result<User> {
        let response = send(self.login_request(login_id, password), "로그인").await?;

        let token = response
            .headers()
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| DutyCheckError::Delivery("로그인 응답에 토큰이 없습니다".into()))?;

        let user: User = decode(response, "로그인").await?;
        debug!(user = %user.username, "Mattermost 로그인");
        self.token = Some(token);
        Ok(user)
    }

    pub async fn direct_channel(&self, user_id: &str, other_id: &str) -> Result<Channel> {
        let response = send(self.direct_channel_request(user_id, other_id), "DM 채널 생성").await?;
        decode(response, "DM 채널 생성").await
    }

    pub async fn teams(&self, user_id: &str) -> Result<Vec<Team>> {
        let response = send(self.teams_request(user_id), "팀 목록 조회").await?;
        decode(response, "팀 목록 조회").await
    }

    pub async fn channels(&self, user_id: &str, team_id: &str) -> Result<Vec<Channel>> {
        let response = send(self.channels_request(user_id, team_id), "채널 목록 조회").await?;
        decode(response, "채널 목록 조회").await
    }

    /// 파일을 올리고 파일 ID를 반환
    pub async fn upload_file(&self, channel_id: &str, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let response = send(self.upload_request(channel_id, file_name, bytes)?, "파일 업로드").await?;
        let uploaded: UploadResponse = decode(response, "파일 업로드").await?;
        uploaded
            .file_infos
            .into_iter()
            .next()
            .map(|info| info.id)
            .ok_or_else(|| DutyCheckError::Delivery("업로드 응답에 파일 ID가 없습니다".into()))
    }

    /// 게시물 작성 후 게시물 ID 반환
    pub async fn create_post(&self, channel_id: &str, message: &str, file_ids: &[String]) -> Result<String> {
        let response = send(self.post_request(channel_id, message, file_ids), "메시지 전송").await?;
        let post: PostResponse = decode(response, "메시지 전송").await?;
        Ok(post.id)
    }

    /// 실패해도 경고만 남긴다
    pub async fn logout(&mut self) {
        if self.token.is_none() {
            return;
        }
        if let Err(e) = send(self.logout_request(), "로그아웃").await {
            warn!("Mattermost 로그아웃 실패: {}", e);
        }
        self.token = None;
    }
}

async fn send(builder: RequestBuilder, action: &str) -> Result<Response> {
    let response = builder
        .send()
        .await
        .map_err(|e| DutyCheckError::Delivery(format!("{} 요청 실패: {}", action, e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DutyCheckError::Delivery(format!("{} 실패 ({}): {}", action, status, body.trim())));
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response, action: &str) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| DutyCheckError::Delivery(format!("{} 응답 해석 실패: {}", action, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
    use reqwest::Method;

    fn client() -> MattermostClient {
        MattermostClient::new("chat.example.com", Duration::from_secs(5)).unwrap()
    }

    fn body_json(request: &reqwest::Request) -> serde_json::Value {
        let bytes = request.body().and_then(|b| b.as_bytes()).expect("요청 본문 없음");
        serde_json::from_slice(bytes).unwrap()
    }

    fn team(id: &str, name: &str, display: &str) -> Team {
        Team {
            id: id.into(),
            name: name.into(),
            display_name: display.into(),
        }
    }

    fn channel(id: &str, name: &str, display: &str) -> Channel {
        Channel {
            id: id.into(),
            name: name.into(),
            display_name: display.into(),
        }
    }

    #[test]
    fn test_api_base_defaults_to_https_and_drops_path() {
        assert_eq!(api_base("chat.example.com").unwrap(), "https://chat.example.com/api/v4");
        assert_eq!(
            api_base("http://chat.example.com:8065/some/path").unwrap(),
            "http://chat.example.com:8065/api/v4"
        );
        assert_eq!(api_base(" https://chat.example.com/ ").unwrap(), "https://chat.example.com/api/v4");
    }

    #[test]
    fn test_api_base_rejects_garbage() {
        assert!(matches!(api_base("https://"), Err(DutyCheckError::Delivery(_))));
    }

    #[test]
    fn test_login_request_has_no_auth() {
        let request = client().login_request("duty", "pw").build().unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().as_str(), "https://chat.example.com/api/v4/users/login");
        assert!(request.headers().get(AUTHORIZATION).is_none());
        assert_eq!(body_json(&request), serde_json::json!({"login_id": "duty", "password": "pw"}));
    }

    #[test]
    fn test_direct_channel_request_uses_token() {
        let request = client()
            .with_token("tok")
            .direct_channel_request("u1", "u1")
            .build()
            .unwrap();

        assert_eq!(request.url().path(), "/api/v4/channels/direct");
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer tok");
        assert_eq!(body_json(&request), serde_json::json!(["u1", "u1"]));
    }

    #[test]
    fn test_channels_request_path() {
        let request = client().with_token("tok").channels_request("u1", "t9").build().unwrap();
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.url().path(), "/api/v4/users/u1/teams/t9/channels");
    }

    #[test]
    fn test_upload_request_is_multipart_with_channel_query() {
        let request = client()
            .with_token("tok")
            .upload_request("c1", "당직체크리스트v5_20261018.xlsx", vec![0x50, 0x4b])
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.url().path(), "/api/v4/files");
        assert_eq!(request.url().query(), Some("channel_id=c1"));
        let content_type = request.headers()[CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
    }

    #[test]
    fn test_post_request_carries_file_ids() {
        let ids = vec!["f1".to_string()];
        let request = client()
            .with_token("tok")
            .post_request("c1", "2026년 10월 18일 당직체크리스트입니다", &ids)
            .build()
            .unwrap();

        assert_eq!(request.url().path(), "/api/v4/posts");
        assert_eq!(
            body_json(&request),
            serde_json::json!({
                "channel_id": "c1",
                "message": "2026년 10월 18일 당직체크리스트입니다",
                "file_ids": ["f1"]
            })
        );
    }

    #[test]
    fn test_display_name_priority() {
        let mut user = User {
            id: "u1".into(),
            username: "duty".into(),
            nickname: String::new(),
            first_name: "길동".into(),
            last_name: "홍".into(),
        };
        assert_eq!(user.display_name(), "길동 홍");

        user.nickname = "당직자".into();
        assert_eq!(user.display_name(), "당직자");

        user.nickname.clear();
        user.first_name.clear();
        user.last_name.clear();
        assert_eq!(user.display_name(), "duty");
    }

    #[test]
    fn test_team_exact_then_partial_then_first() {
        let teams = vec![team("t1", "ops", "Operations"), team("t2", "innogs", "INNOGS 본사")];

        assert_eq!(select_team(&teams, "INNOGS").map(|t| t.id.as_str()), Some("t2"));
        assert_eq!(select_team(&teams, "본사").map(|t| t.id.as_str()), Some("t2"));
        assert_eq!(select_team(&teams, "없는팀").map(|t| t.id.as_str()), Some("t1"));
        assert!(select_team(&[], "innogs").is_none());
    }

    #[test]
    fn test_channel_has_no_fallback() {
        let channels = vec![channel("c1", "town-square", "Town Square"), channel("c2", "duty", "당직 보고")];

        assert_eq!(find_named(&channels, "Duty").map(|c| c.id.as_str()), Some("c2"));
        assert_eq!(find_named(&channels, "당직").map(|c| c.id.as_str()), Some("c2"));
        assert!(find_named(&channels, "release").is_none());
    }

    #[test]
    fn test_exact_match_wins_over_partial() {
        let channels = vec![channel("c1", "duty-archive", ""), channel("c2", "duty", "")];
        assert_eq!(find_named(&channels, "duty").map(|c| c.id.as_str()), Some("c2"));
    }
}
