use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "duty-check")]
#[command(about = "운영 대시보드 당직 체크리스트 생성 도구", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 상세 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 대시보드 HTML에서 점검 항목을 추출해 JSON으로 출력
    Extract {
        /// 대시보드 HTML 파일
        #[arg(required = true)]
        html: PathBuf,

        /// 출력 JSON 파일 (생략 시 표준 출력)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 로그인 단계 결과 (예: 정상)
        #[arg(long)]
        login_status: Option<String>,
    },

    /// 추출 JSON을 분류해 체크 결과 JSON 생성
    Classify {
        /// 추출 JSON 파일
        #[arg(required = true)]
        input: PathBuf,

        /// 출력 JSON 파일 (생략 시 표준 출력)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 모델을 호출하지 않고 규칙 기반 판정만 사용
        #[arg(long)]
        offline: bool,
    },

    /// 실패 항목의 링크를 HTTP로 재확인
    Probe {
        /// 체크 결과 JSON 파일
        #[arg(required = true)]
        input: PathBuf,

        /// 출력 JSON 파일 (생략 시 덮어쓰기)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 체크 결과로 Excel 보고서 생성
    Report {
        /// 체크 결과 JSON 파일
        #[arg(required = true)]
        input: PathBuf,

        /// 대시보드 전체 캡처 PNG
        #[arg(long)]
        screenshot: Option<PathBuf>,

        /// 담당자 이름
        #[arg(long)]
        operator: Option<String>,

        /// 출력 폴더 (기본: 설정의 output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 행별 캡처 이미지 폴더 (기본: 설정의 asset_dir)
        #[arg(long)]
        assets: Option<PathBuf>,

        /// 파일명 접두사
        #[arg(long)]
        prefix: Option<String>,
    },

    /// 추출부터 보고서 생성까지 일괄 실행
    Run {
        /// 대시보드 HTML 파일
        #[arg(required = true)]
        html: PathBuf,

        /// 대시보드 전체 캡처 PNG
        #[arg(long)]
        screenshot: Option<PathBuf>,

        /// 담당자 이름
        #[arg(long)]
        operator: Option<String>,

        /// 출력 폴더
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 로그인 단계 결과
        #[arg(long, default_value = "정상")]
        login_status: String,

        /// 규칙 기반 판정만 사용
        #[arg(long)]
        offline: bool,

        /// 링크 재확인 생략
        #[arg(long)]
        skip_probe: bool,
        /// Mattermost 전송 생략 (보고서는 출력 폴더에 저장)
        #[arg(long)]
        skip_deliver: bool,
    },

    /// 설정 표시/편집
    Config {
        /// 설정 표시
        #[arg(long)]
        show: bool,

        /// 모델 이름 설정
        #[arg(long)]
        set_model: Option<String>,

        /// 행별 캡처 이미지 폴더 설정
        #[arg(long)]
        set_asset_dir: Option<PathBuf>,

        /// 보고서 저장 폴더 설정
        #[arg(long)]
        set_output_dir: Option<PathBuf>,
    },
}
