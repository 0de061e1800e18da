use clap::Parser;
use duty_checklist::{analyzer, cli, config, dashboard, error, export, logging, probe};
use duty_checklist::deliver::DeliverySession;
use cli::{Cli, Commands};
use config::Config;
use duty_checklist_common::{CheckResult, ExtractedFields};
use error::{DutyCheckError, Result};
use export::{build_report, Destination, ReportOptions, ReportOutput};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Extract { html, output, login_status } => {
            let content = read_text(&html)?;
            let fields = dashboard::extract_fields(&content, login_status.as_deref())?;
            write_json(output.as_deref(), &fields)?;
        }

        Commands::Classify { input, output, offline } => {
            let fields: ExtractedFields = serde_json::from_str(&read_text(&input)?)?;
            let settings = analyzer::ClassifierSettings::from_config(&config, offline);
            let classification = analyzer::classify(&fields, &settings).await;
            if !classification.mismatches.is_empty() {
                eprintln!("⚠ 모델 응답 불일치 {}건 (규칙 기반 값 사용)", classification.mismatches.len());
            }
            write_json(output.as_deref(), &classification.result)?;
        }

        Commands::Probe { input, output } => {
            let mut result = CheckResult::from_json(&read_text(&input)?)?;
            let timeout = Duration::from_secs(config.probe_timeout_seconds);
            probe::recheck_links(&mut result, &config.link_targets(), timeout).await?;
            write_json(Some(output.as_deref().unwrap_or(input.as_path())), &result)?;
        }

        Commands::Report { input, screenshot, operator, output, assets, prefix } => {
            println!("📋 duty-check - 보고서 생성\n");

            let result = CheckResult::from_json(&read_text(&input)?)?;
            let screenshot = screenshot.as_deref().map(read_bytes).transpose()?;

            let mut options = ReportOptions::from_config(&config);
            if let Some(dir) = assets {
                options.asset_dir = dir;
            }
            if let Some(prefix) = prefix {
                options.prefix = prefix;
            }
            let dir = output.unwrap_or_else(|| config.output_dir.clone());

            let report = build_report(
                &result,
                screenshot.as_deref(),
                operator.as_deref(),
                &Destination::Disk(dir),
                &options,
            )?;
            print_report(&report);
        }

        Commands::Run { html, screenshot, operator, output, login_status, offline, skip_probe, skip_deliver } => {
            println!("📋 duty-check - 당직 체크리스트\n");

            // 전송 설정 누락은 추출 전에 확인
            let messenger = config.mattermost();
            if !skip_deliver && !messenger.missing_required().is_empty() {
                return Err(DutyCheckError::Config(format!(
                    "Mattermost 설정이 없습니다: {} (--skip-deliver로 전송 생략)",
                    messenger.missing_required().join(", ")
                )));
            }

            let pb = ProgressBar::new(5);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{pos}/{len}] {bar:30.cyan/blue} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );

            pb.set_message("대시보드 필드 추출 중...");
            let content = read_text(&html)?;
            let fields = dashboard::extract_fields(&content, Some(login_status.as_str()))?;
            pb.inc(1);

            pb.set_message("분류 중...");
            let settings = analyzer::ClassifierSettings::from_config(&config, offline);
            let classification = analyzer::classify(&fields, &settings).await;
            let mut result = classification.result;
            pb.inc(1);

            if skip_probe {
                pb.set_message("링크 재확인 생략");
            } else {
                pb.set_message("링크 재확인 중...");
                let timeout = Duration::from_secs(config.probe_timeout_seconds);
                probe::recheck_links(&mut result, &config.link_targets(), timeout).await?;
            }
            pb.inc(1);

            let session = if skip_deliver {
                None
            } else {
                pb.set_message("Mattermost 로그인 중...");
                let timeout = Duration::from_secs(config.delivery_timeout_seconds);
                Some(DeliverySession::open(&messenger, timeout).await?)
            };
            // 담당자를 지정하지 않으면 메신저 표시명을 쓴다
            let operator = operator.or_else(|| session.as_ref().map(DeliverySession::operator_name));

            pb.set_message("보고서 생성 중...");
            let screenshot = screenshot.as_deref().map(read_bytes).transpose()?;
            let options = ReportOptions::from_config(&config);
            let report = build_report(
                &result,
                screenshot.as_deref(),
                operator.as_deref(),
                &Destination::Memory,
                &options,
            )?;
            let dir = output.unwrap_or_else(|| config.output_dir.clone());
            let saved = report.save_to(&dir)?;
            pb.inc(1);

            let receipts = match (session, &report) {
                (Some(session), ReportOutput::Memory { file_name, bytes }) => {
                    pb.set_message("Mattermost 전송 중...");
                    let delivered = session.deliver(file_name, bytes, options.date).await;
                    session.close().await;
                    delivered?
                }
                _ => Vec::new(),
            };
            pb.inc(1);
            pb.finish_with_message("완료");

            if classification.used_fallback {
                println!("ℹ 규칙 기반 판정 사용");
            }
            println!("✔ 보고서 저장: {}", saved.display());
            if skip_deliver {
                println!("ℹ Mattermost 전송 생략");
            }
            for receipt in &receipts {
                println!("✔ 전송 완료: {} (post {})", receipt.target, receipt.post_id);
            }
        }

        Commands::Config { show, set_model, set_asset_dir, set_output_dir } => {
            let mut config = config;
            let changed = set_model.is_some() || set_asset_dir.is_some() || set_output_dir.is_some();

            if let Some(model) = set_model {
                config.model = model;
            }
            if let Some(dir) = set_asset_dir {
                config.asset_dir = dir;
            }
            if let Some(dir) = set_output_dir {
                config.output_dir = dir;
            }
            if changed {
                config.save()?;
                println!("✔ 설정을 저장했습니다");
            }

            if show {
                let links = config.link_targets();
                println!("설정:");
                println!("  모델: {}", config.model);
                println!("  캡처 이미지 폴더: {}", config.asset_dir.display());
                println!("  보고서 폴더: {}", config.output_dir.display());
                println!("  파일명 접두사: {}", config.report_prefix);
                println!("  분류 제한 시간: {}초", config.timeout_seconds);
                println!("  링크 확인 제한 시간: {}초", config.probe_timeout_seconds);
                println!("  FrontEnd 링크: {}", links.frontend.as_deref().unwrap_or("미설정"));
                println!("  Parking 링크: {}", links.parking.as_deref().unwrap_or("미설정"));
                println!("  URL 링크: {}", links.url.as_deref().unwrap_or("미설정"));
                println!("  FURL 링크: {}", links.furl.as_deref().unwrap_or("미설정"));
                let messenger = config.mattermost();
                println!("  Mattermost 서버: {}", messenger.url.as_deref().unwrap_or("미설정"));
                println!("  Mattermost 계정: {}", messenger.username.as_deref().unwrap_or("미설정"));
                match messenger.team_channel() {
                    Some((team, channel)) => println!("  팀 채널: {}/{}", team, channel),
                    None => println!("  팀 채널: 미설정 (DM만 전송)"),
                }
            }
        }
    }

    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(DutyCheckError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(DutyCheckError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read(path)?)
}

fn write_json<T: Serialize>(output: Option<&Path>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            println!("✔ 결과를 저장: {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn print_report(report: &ReportOutput) {
    match report {
        ReportOutput::Disk(path) => println!("✔ 보고서 저장: {}", path.display()),
        ReportOutput::Memory { file_name, bytes } => {
            println!("✔ 보고서 생성: {} ({} bytes)", file_name, bytes.len())
        }
    }
}
