//! 체크리스트 보고서 생성 (CLI용)
//!
//! 워크북 구성은 duty_checklist_common::export::excel_core 가 담당하고,
//! 여기서는 행별 이미지 로딩과 저장 방식(메모리/디스크)만 처리한다.

use crate::error::{DutyCheckError, Result};
use chrono::{Local, NaiveDate};
use duty_checklist_common::export::excel_core::{build_workbook, ReportHeader};
use duty_checklist_common::{build_rows, report_file_name, CheckResult, DEFAULT_REPORT_PREFIX};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 저장 방식
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// 바이트 배열로 반환 (파일 생성 없음)
    Memory,
    /// 지정 폴더에 저장
    Disk(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutput {
    Memory { file_name: String, bytes: Vec<u8> },
    Disk(PathBuf),
}

impl ReportOutput {
    pub fn file_name(&self) -> Option<String> {
        match self {
            ReportOutput::Memory { file_name, .. } => Some(file_name.clone()),
            ReportOutput::Disk(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().to_string()),
        }
    }

    /// 메모리 보고서를 폴더에 기록. 이미 디스크에 있으면 그 경로를 반환
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        match self {
            ReportOutput::Memory { file_name, bytes } => {
                std::fs::create_dir_all(dir)?;
                let path = dir.join(file_name);
                std::fs::write(&path, bytes)?;
                info!(path = %path.display(), "보고서 저장");
                Ok(path)
            }
            ReportOutput::Disk(path) => Ok(path.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub prefix: String,
    /// 행별 캡처 이미지 폴더
    pub asset_dir: PathBuf,
    pub date: NaiveDate,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_REPORT_PREFIX.to_string(),
            asset_dir: PathBuf::from("screenshot"),
            date: Local::now().date_naive(),
        }
    }
}

impl ReportOptions {
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self {
            prefix: config.report_prefix.clone(),
            asset_dir: config.asset_dir.clone(),
            ..Default::default()
        }
    }
}

/// 체크 결과로 보고서 생성
///
/// # Arguments
/// * `result` - 분류(및 링크 재확인)된 체크 결과
/// * `screenshot` - 대시보드 전체 캡처 PNG
/// * `operator` - 담당자 이름 (파일명 접미사와 헤더에 사용)
/// * `destination` - 메모리 반환 또는 디스크 저장
pub fn build_report(
    result: &CheckResult,
    screenshot: Option<&[u8]>,
    operator: Option<&str>,
    destination: &Destination,
    options: &ReportOptions,
) -> Result<ReportOutput> {
    let rows = build_rows(result);
    let header = ReportHeader::new(options.date, operator);
    let file_name = report_file_name(&options.prefix, options.date, operator);
    let asset_dir = options.asset_dir.as_path();

    debug!(rows = rows.len(), asset_dir = %asset_dir.display(), "워크북 생성");
    let mut workbook = build_workbook(&rows, &header, screenshot, |key| load_asset(asset_dir, key))?;

    match destination {
        Destination::Memory => {
            let bytes = workbook
                .save_to_buffer()
                .map_err(|e| DutyCheckError::ExcelGeneration(e.to_string()))?;
            info!(file_name = %file_name, size = bytes.len(), "보고서 생성 (메모리)");
            Ok(ReportOutput::Memory { file_name, bytes })
        }
        Destination::Disk(dir) => {
            std::fs::create_dir_all(dir)?;
            let path = dir.join(&file_name);
            workbook
                .save(&path)
                .map_err(|e| DutyCheckError::ExcelGeneration(e.to_string()))?;
            info!(path = %path.display(), "보고서 저장");
            Ok(ReportOutput::Disk(path))
        }
    }
}

fn load_asset(asset_dir: &Path, key: &str) -> std::io::Result<Vec<u8>> {
    std::fs::read(asset_dir.join(key))
}
