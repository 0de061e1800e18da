//! 레이아웃 설정 모듈
//!
//! 체크리스트 시트의 열 너비/행 높이와 셀 안 이미지 배치 계산.
//! 배치 계산은 스프레드시트 라이브러리와 무관한 순수 함수로 둔다.

// ============================================
// 변환 계수
// ============================================

/// pt → px 변환 (96dpi 기준)
pub const PT_TO_PX: f64 = 96.0 / 72.0;

/// 열 너비 1글자당 픽셀 (근사치)
pub const CHAR_WIDTH_PX: f64 = 7.0;

// ============================================
// 체크리스트 시트
// ============================================

/// 열 너비 (글자 단위): 카테고리, 메뉴, 체크사항, 페이지스크린샷, 결과
pub const COLUMN_WIDTHS: [f64; 5] = [12.0, 22.0, 50.0, 100.0, 20.0];

pub const HEADERS: [&str; 5] = ["카테고리", "메뉴", "체크사항", "페이지스크린샷", "결과"];

pub const TITLE_ROW: u32 = 0;
pub const META_ROW: u32 = 1;
pub const HEADER_ROW: u32 = 2;
pub const FIRST_DATA_ROW: u32 = 3;

pub const CATEGORY_COL: u16 = 0;
pub const MENU_COL: u16 = 1;
pub const INSTRUCTIONS_COL: u16 = 2;
pub const IMAGE_COL: u16 = 3;
pub const RESULT_COL: u16 = 4;
pub const LAST_COL: u16 = 4;

/// 데이터 행 높이 (pt)
pub const DATA_ROW_HEIGHT_PT: f64 = 120.0;

// ============================================
// 원본 스크린샷 시트
// ============================================

pub const SCREENSHOT_MAX_ROW_HEIGHT_PT: f64 = 600.0;
pub const SCREENSHOT_MAX_COL_WIDTH: f64 = 150.0;
const SCREENSHOT_PT_PER_PX: f64 = 0.75;
const SCREENSHOT_CHARS_PER_PX: f64 = 0.1;

/// 이미지 크기가 유효하지 않을 때 사용하는 크기 (px)
const FALLBACK_EXTENT_PX: f64 = 50.0;

/// 열 너비(글자) → px
pub fn column_width_to_px(chars: f64) -> f64 {
    chars * CHAR_WIDTH_PX
}

/// 행 높이(pt) → px
pub fn row_height_to_px(points: f64) -> f64 {
    points * PT_TO_PX
}

/// 스크린샷 시트의 행 높이(pt)와 열 너비(글자)
pub fn screenshot_cell_size(image_width_px: f64, image_height_px: f64) -> (f64, f64) {
    let row_height = (image_height_px * SCREENSHOT_PT_PER_PX).min(SCREENSHOT_MAX_ROW_HEIGHT_PT);
    let col_width = (image_width_px * SCREENSHOT_CHARS_PER_PX).min(SCREENSHOT_MAX_COL_WIDTH);
    (row_height, col_width)
}

// ============================================
// 이미지 배치
// ============================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// 셀 안쪽 여백 (px)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Padding {
    pub const DEFAULT: Padding = Padding { left: 10.0, top: 10.0, right: 10.0, bottom: 10.0 };

    /// 첫 행(로그인) 이미지용: 이미지 자체 여백을 보정
    pub const LEAD: Padding = Padding { left: 20.0, top: 10.0, right: 30.0, bottom: 10.0 };
}

/// 가로 정렬
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
}

/// 셀 원점 기준 이미지 위치와 크기 (px)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x_offset: f64,
    pub y_offset: f64,
    pub width: f64,
    pub height: f64,
}

/// 행 순번(0부터)에 따른 여백과 정렬
pub fn row_image_style(row_index: usize) -> (Padding, HAlign) {
    if row_index == 0 {
        (Padding::LEAD, HAlign::Left)
    } else {
        (Padding::DEFAULT, HAlign::Center)
    }
}

/// 컨테이너 안에 비율을 유지하며 최대 크기로 맞춘다
///
/// 오프셋은 컨테이너 원점 기준. 세로는 항상 가운데 정렬.
pub fn fit_in_container(container: Size, image: Size, align: HAlign) -> Placement {
    let (width, height) = if image.width > 0.0 && image.height > 0.0 {
        let scale = (container.width / image.width).min(container.height / image.height);
        ((image.width * scale).trunc(), (image.height * scale).trunc())
    } else {
        (FALLBACK_EXTENT_PX, FALLBACK_EXTENT_PX)
    };

    let x_offset = match align {
        HAlign::Left => 0.0,
        HAlign::Center => (container.width - width) / 2.0,
    };
    let y_offset = (container.height - height) / 2.0;

    Placement { x_offset, y_offset, width, height }
}

/// 셀 크기와 여백으로 이미지 배치를 계산
///
/// 여백을 뺀 영역이 0 이하이면 `None` (셀이 너무 작음).
pub fn place_in_cell(cell: Size, padding: Padding, image: Size, align: HAlign) -> Option<Placement> {
    let container = Size::new(
        cell.width - (padding.left + padding.right),
        cell.height - (padding.top + padding.bottom),
    );
    if container.width <= 0.0 || container.height <= 0.0 {
        return None;
    }

    let fitted = fit_in_container(container, image, align);
    Some(Placement {
        x_offset: padding.left + fitted.x_offset,
        y_offset: padding.top + fitted.y_offset,
        ..fitted
    })
}

/// 체크리스트 이미지 열의 셀 크기 (px)
pub fn image_cell_size() -> Size {
    Size::new(
        column_width_to_px(COLUMN_WIDTHS[IMAGE_COL as usize]),
        row_height_to_px(DATA_ROW_HEIGHT_PT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_width_limited() {
        let p = fit_in_container(Size::new(400.0, 120.0), Size::new(800.0, 100.0), HAlign::Center);
        assert_eq!(p.width, 400.0);
        assert_eq!(p.height, 50.0);
        assert_eq!(p.x_offset, 0.0);
        assert_eq!(p.y_offset, 35.0);
    }

    #[test]
    fn test_fit_height_limited_centered() {
        let p = fit_in_container(Size::new(400.0, 100.0), Size::new(100.0, 200.0), HAlign::Center);
        assert_eq!((p.width, p.height), (50.0, 100.0));
        assert_eq!(p.x_offset, 175.0);
        assert_eq!(p.y_offset, 0.0);
    }

    #[test]
    fn test_fit_left_aligned() {
        let p = fit_in_container(Size::new(400.0, 100.0), Size::new(100.0, 200.0), HAlign::Left);
        assert_eq!(p.x_offset, 0.0);
    }

    #[test]
    fn test_fit_upscales_small_image() {
        let p = fit_in_container(Size::new(400.0, 120.0), Size::new(40.0, 10.0), HAlign::Center);
        assert_eq!((p.width, p.height), (400.0, 100.0));
        assert_eq!(p.y_offset, 10.0);
    }

    #[test]
    fn test_fit_truncates_to_whole_pixels() {
        let p = fit_in_container(Size::new(80.0, 80.0), Size::new(200.0, 133.0), HAlign::Center);
        assert_eq!(p.width, 80.0);
        assert_eq!(p.height, 53.0);
        assert_eq!(p.y_offset, 13.5);
    }

    #[test]
    fn test_fit_invalid_image_size() {
        let p = fit_in_container(Size::new(400.0, 120.0), Size::new(0.0, 0.0), HAlign::Center);
        assert_eq!((p.width, p.height), (50.0, 50.0));
    }

    #[test]
    fn test_place_in_cell_adds_padding() {
        let cell = Size::new(420.0, 140.0);
        let p = place_in_cell(cell, Padding::DEFAULT, Size::new(800.0, 100.0), HAlign::Center).unwrap();
        assert_eq!((p.width, p.height), (400.0, 50.0));
        assert_eq!(p.x_offset, 10.0);
        assert_eq!(p.y_offset, 45.0);
    }

    #[test]
    fn test_place_in_cell_lead_row() {
        let (padding, align) = row_image_style(0);
        let p = place_in_cell(Size::new(700.0, 160.0), padding, Size::new(650.0, 70.0), align).unwrap();
        // 650 x 140 컨테이너, 가로 제한
        assert_eq!((p.width, p.height), (650.0, 70.0));
        assert_eq!(p.x_offset, 20.0);
        assert_eq!(p.y_offset, 10.0 + 35.0);
    }

    #[test]
    fn test_place_in_cell_too_small() {
        let p = place_in_cell(Size::new(20.0, 160.0), Padding::DEFAULT, Size::new(10.0, 10.0), HAlign::Center);
        assert!(p.is_none());
        let p = place_in_cell(Size::new(200.0, 15.0), Padding::DEFAULT, Size::new(10.0, 10.0), HAlign::Center);
        assert!(p.is_none());
    }

    #[test]
    fn test_image_cell_size() {
        let size = image_cell_size();
        assert_eq!(size.width, 700.0);
        assert!((size.height - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_screenshot_cell_size_caps() {
        assert_eq!(screenshot_cell_size(400.0, 200.0), (150.0, 40.0));
        assert_eq!(screenshot_cell_size(4000.0, 3000.0), (600.0, 150.0));
    }
}
