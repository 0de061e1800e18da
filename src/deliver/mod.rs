//! 보고서 메신저 전송
//!
//! Mattermost에 로그인해 본인 DM으로 보고서를 올리고, 팀/채널이 설정되어 있으면
//! 해당 채널에도 같은 파일을 게시한다.

mod mattermost;

use crate::config::MattermostConfig;
use crate::error::{DutyCheckError, Result};
use chrono::NaiveDate;
use std::time::Duration;
use tracing::info;

use mattermost::{find_named, select_team, MattermostClient, User};

/// 게시 메시지 본문
pub fn post_message(date: NaiveDate) -> String {
    format!("{} 당직체크리스트입니다", date.format("%Y년 %m월 %d일"))
}

/// 게시 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// "DM" 또는 "팀/채널"
    pub target: String,
    pub channel_id: String,
    pub post_id: String,
}

/// 로그인된 전송 세션
pub struct DeliverySession {
    client: MattermostClient,
    user: User,
    team_channel: Option<(String, String)>,
}

impl DeliverySession {
    /// 설정 확인 후 로그인
    pub async fn open(settings: &MattermostConfig, timeout: Duration) -> Result<Self> {
        let missing = settings.missing_required();
        if !missing.is_empty() {
            return Err(DutyCheckError::Config(format!(
                "Mattermost 설정이 없습니다: {}",
                missing.join(", ")
            )));
        }
        let server = settings.url.as_deref().unwrap_or_default();
        let login_id = settings.username.as_deref().unwrap_or_default();
        let password = settings.password.as_deref().unwrap_or_default();

        let mut client = MattermostClient::new(server, timeout)?;
        let user = client.login(login_id, password).await?;
        info!(base = %client.base(), user = %user.username, "Mattermost 세션 시작");

        Ok(Self {
            client,
            user,
            team_channel: settings
                .team_channel()
                .map(|(team, channel)| (team.to_string(), channel.to_string())),
        })
    }

    /// 보고서 담당자 이름으로 쓸 표시명
    pub fn operator_name(&self) -> String {
        self.user.display_name()
    }

    /// 본인 DM에 먼저 올리고, 설정된 팀 채널에도 올린다
    pub async fn deliver(&self, file_name: &str, bytes: &[u8], date: NaiveDate) -> Result<Vec<DeliveryReceipt>> {
        let message = post_message(date);
        let mut receipts = Vec::new();

        let dm = self.client.direct_channel(&self.user.id, &self.user.id).await?;
        receipts.push(self.post_file("DM", &dm.id, file_name, bytes, &message).await?);

        if let Some((team_name, channel_name)) = &self.team_channel {
            let channel_id = self.resolve_team_channel(team_name, channel_name).await?;
            let target = format!("{}/{}", team_name, channel_name);
            receipts.push(self.post_file(&target, &channel_id, file_name, bytes, &message).await?);
        }

        Ok(receipts)
    }

    pub async fn close(mut self) {
        self.client.logout().await;
    }

    async fn resolve_team_channel(&self, team_name: &str, channel_name: &str) -> Result<String> {
        let teams = self.client.teams(&self.user.id).await?;
        let team = select_team(&teams, team_name)
            .ok_or_else(|| DutyCheckError::Delivery("소속된 팀이 없습니다".into()))?;

        let channels = self.client.channels(&self.user.id, &team.id).await?;
        let channel = find_named(&channels, channel_name).ok_or_else(|| {
            DutyCheckError::Delivery(format!("'{}' 팀에서 '{}' 채널을 찾을 수 없습니다", team.name, channel_name))
        })?;
        Ok(channel.id.clone())
    }

    async fn post_file(
        &self,
        target: &str,
        channel_id: &str,
        file_name: &str,
        bytes: &[u8],
        message: &str,
    ) -> Result<DeliveryReceipt> {
        let file_id = self.client.upload_file(channel_id, file_name, bytes.to_vec()).await?;
        let post_id = self.client.create_post(channel_id, message, &[file_id]).await?;
        info!(to = %target, post_id = %post_id, "보고서 게시");

        Ok(DeliveryReceipt {
            target: target.to_string(),
            channel_id: channel_id.to_string(),
            post_id,
        })
    }
}
