//! 체크리스트 Excel 생성 (공통 라이브러리)
//!
//! layout.rs 정의를 사용해 두 개의 시트를 만든다.
//! - 대시보드 체크리스트: 11개 점검 행, 결과 색상, 행별 캡처 이미지
//! - 원본 스크린샷: 대시보드 전체 화면 캡처
//!
//! 행 단위 실패(이미지 누락, 셀 크기 부족 등)는 셀 안의 안내 문구로 대체하고
//! 나머지 행은 계속 처리한다.

use crate::checklist::{ChecklistRow, ResultFill};
use crate::export::sanitize_operator;
use crate::layout::{
    column_width_to_px, image_cell_size, place_in_cell, row_image_style, screenshot_cell_size,
    Size, COLUMN_WIDTHS, DATA_ROW_HEIGHT_PT, FIRST_DATA_ROW, HEADERS, HEADER_ROW, IMAGE_COL,
    INSTRUCTIONS_COL, LAST_COL, META_ROW, RESULT_COL, TITLE_ROW, CATEGORY_COL, MENU_COL,
};
use crate::merge::contiguous_runs;
use chrono::NaiveDate;
use rust_xlsxwriter::*;
use std::io;

pub const CHECKLIST_SHEET: &str = "대시보드 체크리스트";
pub const SCREENSHOT_SHEET: &str = "원본 스크린샷";
pub const TITLE: &str = "당직 체크 리스트";
pub const SCREENSHOT_PLACEHOLDER: &str = "대시보드 스크린샷이 제공되지 않았습니다.";

/// 제목 아래 일시/담당자 행
#[derive(Debug, Clone)]
pub struct ReportHeader {
    pub date: NaiveDate,
    pub operator: String,
}

impl ReportHeader {
    pub fn new(date: NaiveDate, operator: Option<&str>) -> Self {
        Self {
            date,
            operator: operator.map(sanitize_operator).unwrap_or_default(),
        }
    }
}

/// 이미지 열에 표시하는 안내 문구
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellDiagnostic {
    /// 점검 실패: 원본 스크린샷 시트 확인 요청
    ReviewScreenshot,
    CellTooSmall,
    MissingImage(String),
    ImageError(String),
    RowError(String),
}

impl CellDiagnostic {
    pub fn text(&self) -> String {
        match self {
            CellDiagnostic::ReviewScreenshot => "아래 원본 스크린샷 시트를 확인해주세요".into(),
            CellDiagnostic::CellTooSmall => "셀이 너무 작습니다".into(),
            CellDiagnostic::MissingImage(asset) => format!("이미지 파일 없음: {}", asset),
            CellDiagnostic::ImageError(asset) => format!("이미지 오류: {}", asset),
            CellDiagnostic::RowError(msg) => format!("행 처리 오류: {}", msg),
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            CellDiagnostic::ReviewScreenshot | CellDiagnostic::ImageError(_) => 0xFF0000,
            CellDiagnostic::CellTooSmall => 0xFFA500,
            CellDiagnostic::MissingImage(_) => 0xFF8C00,
            CellDiagnostic::RowError(_) => 0x800080,
        }
    }

    fn format(&self) -> Format {
        let format = centered(Format::new())
            .set_border(FormatBorder::Thin)
            .set_font_color(Color::RGB(self.color()));
        if matches!(self, CellDiagnostic::ReviewScreenshot) {
            format.set_bold()
        } else {
            format
        }
    }
}

fn centered(format: Format) -> Format {
    format
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

struct Styles {
    title: Format,
    header: Format,
    wrap: Format,
    image_cell: Format,
    good: Format,
    bad: Format,
}

impl Styles {
    fn new() -> Self {
        let wrap = centered(Format::new())
            .set_text_wrap()
            .set_border(FormatBorder::Thin);

        Self {
            title: centered(Format::new())
                .set_bold()
                .set_font_size(14.0)
                .set_border(FormatBorder::Thin),
            header: centered(Format::new())
                .set_bold()
                .set_font_size(14.0)
                .set_font_color(Color::White)
                .set_background_color(Color::RGB(0x003366))
                .set_border(FormatBorder::Thin),
            image_cell: centered(Format::new()).set_border(FormatBorder::Thin),
            good: wrap.clone().set_background_color(Color::RGB(ResultFill::Good.rgb())),
            bad: wrap.clone().set_background_color(Color::RGB(ResultFill::Bad.rgb())),
            wrap,
        }
    }

    fn result(&self, fill: ResultFill) -> &Format {
        match fill {
            ResultFill::Good => &self.good,
            ResultFill::Bad => &self.bad,
        }
    }
}

/// 체크리스트 워크북 생성
///
/// # Arguments
/// * `rows` - `checklist::build_rows`로 만든 11개 행
/// * `header` - 일시/담당자
/// * `screenshot` - 대시보드 전체 캡처 (PNG)
/// * `asset_loader` - 행별 이미지 키("1.jpg" 등)로 이미지 바이트를 읽는 클로저
pub fn build_workbook<F>(
    rows: &[ChecklistRow],
    header: &ReportHeader,
    screenshot: Option<&[u8]>,
    asset_loader: F,
) -> Result<Workbook, XlsxError>
where
    F: Fn(&str) -> io::Result<Vec<u8>>,
{
    let mut workbook = Workbook::new();

    let checklist = workbook.add_worksheet();
    write_checklist_sheet(checklist, rows, header, &asset_loader)?;

    let raw = workbook.add_worksheet();
    write_screenshot_sheet(raw, screenshot)?;

    Ok(workbook)
}

/// 워크북을 바이트 배열로 생성
pub fn generate_checklist_buffer<F>(
    rows: &[ChecklistRow],
    header: &ReportHeader,
    screenshot: Option<&[u8]>,
    asset_loader: F,
) -> Result<Vec<u8>, XlsxError>
where
    F: Fn(&str) -> io::Result<Vec<u8>>,
{
    let mut workbook = build_workbook(rows, header, screenshot, asset_loader)?;
    workbook.save_to_buffer()
}

fn write_checklist_sheet<F>(
    ws: &mut Worksheet,
    rows: &[ChecklistRow],
    header: &ReportHeader,
    asset_loader: &F,
) -> Result<(), XlsxError>
where
    F: Fn(&str) -> io::Result<Vec<u8>>,
{
    let styles = Styles::new();
    ws.set_name(CHECKLIST_SHEET)?;

    // 열 너비는 이미지 배치 계산과 같은 px 값으로 지정
    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        ws.set_column_width_pixels(col as u16, column_width_to_px(*width).round() as u32)?;
    }

    ws.merge_range(TITLE_ROW, CATEGORY_COL, TITLE_ROW, LAST_COL, TITLE, &styles.title)?;
    ws.merge_range(
        META_ROW,
        CATEGORY_COL,
        META_ROW,
        INSTRUCTIONS_COL,
        &format!("일시: {}", header.date.format("%Y-%m-%d")),
        &styles.wrap,
    )?;
    ws.merge_range(
        META_ROW,
        IMAGE_COL,
        META_ROW,
        LAST_COL,
        &format!("담당자: {}", header.operator),
        &styles.wrap,
    )?;

    for (col, label) in HEADERS.iter().enumerate() {
        ws.write_string_with_format(HEADER_ROW, col as u16, *label, &styles.header)?;
    }

    let categories: Vec<&str> = rows.iter().map(|r| r.category).collect();
    write_grouped_column(ws, CATEGORY_COL, &categories, &categories, &styles.wrap)?;

    let menu_keys: Vec<(&str, &str)> = rows.iter().map(|r| (r.category, r.menu)).collect();
    let menus: Vec<&str> = rows.iter().map(|r| r.menu).collect();
    write_grouped_column(ws, MENU_COL, &menu_keys, &menus, &styles.wrap)?;

    let cell = image_cell_size();
    for (index, row) in rows.iter().enumerate() {
        let excel_row = FIRST_DATA_ROW + index as u32;
        if let Err(e) = write_data_row(ws, excel_row, index, row, cell, &styles, asset_loader) {
            let diagnostic = CellDiagnostic::RowError(e.to_string());
            ws.write_string_with_format(excel_row, IMAGE_COL, &diagnostic.text(), &diagnostic.format())?;
        }
    }

    Ok(())
}

/// 연속 구간마다 병합 (한 행짜리 구간은 그냥 쓴다)
fn write_grouped_column<K: PartialEq>(
    ws: &mut Worksheet,
    col: u16,
    keys: &[K],
    labels: &[&str],
    format: &Format,
) -> Result<(), XlsxError> {
    for run in contiguous_runs(keys) {
        let first = FIRST_DATA_ROW + run.start as u32;
        let last = FIRST_DATA_ROW + run.end as u32 - 1;
        let label = labels[run.start];
        if first == last {
            ws.write_string_with_format(first, col, label, format)?;
        } else {
            ws.merge_range(first, col, last, col, label, format)?;
        }
    }
    Ok(())
}

fn write_data_row<F>(
    ws: &mut Worksheet,
    excel_row: u32,
    index: usize,
    row: &ChecklistRow,
    cell: Size,
    styles: &Styles,
    asset_loader: &F,
) -> Result<(), XlsxError>
where
    F: Fn(&str) -> io::Result<Vec<u8>>,
{
    ws.set_row_height(excel_row, DATA_ROW_HEIGHT_PT)?;
    ws.write_string_with_format(excel_row, INSTRUCTIONS_COL, row.instructions, &styles.wrap)?;
    ws.write_string_with_format(excel_row, RESULT_COL, &row.result_text, styles.result(row.fill()))?;

    match insert_row_image(ws, excel_row, index, row, cell, asset_loader) {
        None => {
            ws.write_blank(excel_row, IMAGE_COL, &styles.image_cell)?;
        }
        Some(diagnostic) => {
            ws.write_string_with_format(excel_row, IMAGE_COL, &diagnostic.text(), &diagnostic.format())?;
        }
    }
    Ok(())
}

/// 통과한 행에만 캡처 이미지를 삽입. 삽입하지 못하면 안내 문구를 돌려준다.
///
/// 이미지는 셀 하나에 고정(one-cell)하고 여백/가운데 정렬 오프셋만큼 띄운다.
/// 두 셀에 걸쳐 늘리면 일부 뷰어에서 셀 테두리가 이미지에 가려진다.
fn insert_row_image<F>(
    ws: &mut Worksheet,
    excel_row: u32,
    index: usize,
    row: &ChecklistRow,
    cell: Size,
    asset_loader: &F,
) -> Option<CellDiagnostic>
where
    F: Fn(&str) -> io::Result<Vec<u8>>,
{
    if !row.passed {
        return Some(CellDiagnostic::ReviewScreenshot);
    }

    let bytes = match asset_loader(row.asset) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Some(CellDiagnostic::MissingImage(row.asset.to_string()));
        }
        Err(_) => return Some(CellDiagnostic::ImageError(row.asset.to_string())),
    };

    let image = match Image::new_from_buffer(&bytes) {
        Ok(image) => image,
        Err(_) => return Some(CellDiagnostic::ImageError(row.asset.to_string())),
    };

    let (padding, align) = row_image_style(index);
    let source = Size::new(image.width(), image.height());
    let Some(placement) = place_in_cell(cell, padding, source, align) else {
        return Some(CellDiagnostic::CellTooSmall);
    };

    let image = image
        .set_scale_to_size(placement.width, placement.height, false)
        .set_object_movement(ObjectMovement::MoveButDontSizeWithCells)
        .set_alt_text(row.asset);

    // rust_xlsxwriter는 oneCellAnchor를 쓰지 않는다. twoCellAnchor editAs="oneCell"로 기록되며
    // from/to 마커는 모두 이 셀 안에 놓인다.
    let inserted = ws.insert_image_with_offset(
        excel_row,
        IMAGE_COL,
        &image,
        placement.x_offset.round() as u32,
        placement.y_offset.round() as u32,
    );
    match inserted {
        Ok(_) => None,
        Err(_) => Some(CellDiagnostic::ImageError(row.asset.to_string())),
    }
}

fn write_screenshot_sheet(ws: &mut Worksheet, screenshot: Option<&[u8]>) -> Result<(), XlsxError> {
    ws.set_name(SCREENSHOT_SHEET)?;

    let Some(bytes) = screenshot else {
        ws.write_string(0, 0, SCREENSHOT_PLACEHOLDER)?;
        return Ok(());
    };

    if let Err(e) = embed_screenshot(ws, bytes) {
        ws.write_string(0, 0, &format!("스크린샷 오류: {}", e))?;
    }
    Ok(())
}

fn embed_screenshot(ws: &mut Worksheet, bytes: &[u8]) -> Result<(), XlsxError> {
    let image = Image::new_from_buffer(bytes)?.set_alt_text("dashboard");
    let (row_height, col_width) = screenshot_cell_size(image.width(), image.height());
    ws.set_row_height(0, row_height)?;
    ws.set_column_width(0, col_width)?;
    ws.insert_image(0, 0, &image)?;
    Ok(())
}
