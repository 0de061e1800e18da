//! 대시보드 HTML 처리

pub mod fields;

pub use fields::extract_fields;
