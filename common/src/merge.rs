//! 연속 구간 병합
//!
//! 같은 값이 연속된 행끼리만 묶는다. 떨어져 있는 같은 값은 별도 구간.

use std::ops::Range;

/// 연속된 같은 값의 최대 구간 목록 (순서 유지)
pub fn contiguous_runs<T: PartialEq>(values: &[T]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = 0;

    for i in 1..=values.len() {
        if i == values.len() || values[i] != values[start] {
            if start < i {
                runs.push(start..i);
            }
            start = i;
        }
    }

    runs
}
