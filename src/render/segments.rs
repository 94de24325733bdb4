//! Grid line segmentation around merged cells.
//!
//! A grid line that crosses the interior of a merged region must not be
//! drawn there. For each line we collect the index spans it must skip,
//! merge them, and subtract them from the drawable span.

use crate::types::CellRect;

/// Half-open index span `[start, end)`.
pub type Span = (i64, i64);

/// Sort and coalesce overlapping or touching spans.
pub fn merge_spans(spans: &mut Vec<Span>) {
    if spans.len() <= 1 {
        return;
    }

    spans.sort_by_key(|s| s.0);
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for (start, end) in spans.drain(..) {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                if end > last.1 {
                    last.1 = end;
                }
                continue;
            }
        }
        merged.push((start, end));
    }
    *spans = merged;
}

/// `full` minus every span in `skips` (which must be merged).
pub fn subtract_spans(full: Span, skips: &[Span]) -> Vec<Span> {
    let (start, end) = full;
    let mut out = Vec::new();
    let mut current = start;
    for &(skip_start, skip_end) in skips {
        if skip_end <= current {
            continue;
        }
        if skip_start >= end {
            break;
        }
        if current < skip_start {
            out.push((current, skip_start));
        }
        current = current.max(skip_end);
    }
    if current < end {
        out.push((current, end));
    }
    out
}

/// Row spans the vertical line at the left edge of `col` must skip.
pub fn vertical_skips(merges: &[CellRect], col: i64) -> Vec<Span> {
    let mut spans: Vec<Span> = merges
        .iter()
        .filter(|m| m.x < col && col < m.x + m.w)
        .map(|m| (m.y, m.y + m.h))
        .collect();
    merge_spans(&mut spans);
    spans
}

/// Column spans the horizontal line at the top edge of `row` must skip.
pub fn horizontal_skips(merges: &[CellRect], row: i64) -> Vec<Span> {
    let mut spans: Vec<Span> = merges
        .iter()
        .filter(|m| m.y < row && row < m.y + m.h)
        .map(|m| (m.x, m.x + m.w))
        .collect();
    merge_spans(&mut spans);
    spans
}
