//! ollama CLI 연동

use crate::error::{DutyCheckError, Result};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// `ollama run <model> <prompt>` 실행 후 표준 출력을 반환
///
/// 제한 시간을 넘기면 프로세스를 종료하고 오류를 돌려준다. 재시도는 없다.
pub async fn run_ollama(model: &str, prompt: &str, timeout: Duration) -> Result<String> {
    debug!(model, prompt_len = prompt.chars().count(), "ollama 호출");

    let mut command = Command::new("ollama");
    command.args(["run", model, prompt]).kill_on_drop(true);

    let output = tokio::time::timeout(timeout, command.output())
        .await
        .map_err(|_| DutyCheckError::Classifier(format!("{}초 제한 시간 초과", timeout.as_secs())))?
        .map_err(|e| DutyCheckError::Classifier(format!("ollama 실행 오류: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DutyCheckError::Classifier(format!(
            "ollama failed (code {:?}): {}",
            output.status.code(),
            stderr.trim()
        )));
    }

    let response = String::from_utf8_lossy(&output.stdout).to_string();
    let preview: String = response.chars().take(500).collect();
    debug!(response = %preview, "ollama 응답");

    Ok(response)
}
