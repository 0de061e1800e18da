use crate::error::{DutyCheckError, Result};
use duty_checklist_common::DEFAULT_REPORT_PREFIX;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 링크 재확인 대상 URL
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LinkTargets {
    pub frontend: Option<String>,
    pub parking: Option<String>,
    pub url: Option<String>,
    pub furl: Option<String>,
}

impl LinkTargets {
    /// 환경 변수를 우선 적용
    pub fn with_env_overrides(mut self) -> Self {
        let pick = |key: &str, current: Option<String>| {
            std::env::var(key).ok().filter(|v| !v.is_empty()).or(current)
        };
        self.frontend = pick("FRONTEND_LINK", self.frontend);
        self.parking = pick("PARKING_LINK", self.parking);
        self.url = pick("URL_LINK", self.url);
        self.furl = pick("FURL_LINK", self.furl);
        self
    }
}

/// Mattermost 전송 설정
///
/// 비밀번호는 설정 파일에 저장하지 않고 `MATTERMOST_PASSWORD`로만 받는다.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct MattermostConfig {
    pub url: Option<String>,
    pub username: Option<String>,
    #[serde(skip)]
    pub password: Option<String>,
    /// 당직 채널이 있는 팀 (이름 또는 표시명)
    pub team: Option<String>,
    pub channel: Option<String>,
}

impl MattermostConfig {
    /// 환경 변수를 우선 적용
    pub fn with_env_overrides(mut self) -> Self {
        let pick = |key: &str, current: Option<String>| {
            std::env::var(key).ok().filter(|v| !v.is_empty()).or(current)
        };
        self.url = pick("MATTERMOST_URL", self.url);
        self.username = pick("MATTERMOST_USERNAME", self.username);
        self.password = pick("MATTERMOST_PASSWORD", self.password);
        self.team = pick("MATTERMOST_TEAM", self.team);
        self.channel = pick("MATTERMOST_CHANNEL", self.channel);
        self
    }

    /// 로그인에 필요한데 비어 있는 항목의 환경 변수 이름
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("MATTERMOST_URL", &self.url),
            ("MATTERMOST_USERNAME", &self.username),
            ("MATTERMOST_PASSWORD", &self.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(key, _)| key)
        .collect()
    }

    /// 팀 채널 전송 대상 (둘 다 있을 때만)
    pub fn team_channel(&self) -> Option<(&str, &str)> {
        match (self.team.as_deref(), self.channel.as_deref()) {
            (Some(team), Some(channel)) if !team.is_empty() && !channel.is_empty() => {
                Some((team, channel))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// 로컬 모델 이름 (ollama)
    pub model: String,
    /// 행별 캡처 이미지 폴더 ("1.jpg" ~ "11.jpg")
    pub asset_dir: PathBuf,
    /// 보고서 저장 폴더
    pub output_dir: PathBuf,
    pub report_prefix: String,
    /// 모델 프로세스 제한 시간
    pub timeout_seconds: u64,
    pub probe_timeout_seconds: u64,
    pub links: LinkTargets,
    pub mattermost: MattermostConfig,
    pub delivery_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "EEVE-Korean-10.8B:latest".into(),
            asset_dir: PathBuf::from("screenshot"),
            output_dir: PathBuf::from("logs"),
            report_prefix: DEFAULT_REPORT_PREFIX.into(),
            timeout_seconds: 300,
            probe_timeout_seconds: 15,
            links: LinkTargets::default(),
            mattermost: MattermostConfig::default(),
            delivery_timeout_seconds: 60,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DutyCheckError::Config("홈 디렉터리를 찾을 수 없습니다".into()))?;
        Ok(home.join(".config").join("duty-checklist").join("config.json"))
    }

    /// 환경 변수가 적용된 링크 대상
    pub fn link_targets(&self) -> LinkTargets {
        self.links.clone().with_env_overrides()
    }

    /// 환경 변수가 적용된 Mattermost 설정
    pub fn mattermost(&self) -> MattermostConfig {
        self.mattermost.clone().with_env_overrides()
    }
}
