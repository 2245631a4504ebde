//! Ordering and paging of gallery entries.
//!
//! Entries are shown in case-insensitive natural order, so `img2` comes
//! before `img10`. A page request never fails. Out-of-range page numbers are
//! clamped, and a page size of zero (or one covering everything) yields a
//! single page.
//!
//! [`PageWindow`] is resolved once per request and drives both the reported
//! [`GalleryStats`] and the slice, so the two can never disagree.

use crate::types::{GalleryStats, ImageEntry};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::iter::Peekable;
use std::ops::Range;
use std::str::Chars;

/// Compare two names in case-insensitive natural order.
///
/// Runs of ASCII digits compare by numeric value, everything else by
/// lowercased character. Names that are equal under those rules (`A` and
/// `a`, `01` and `1`) fall back to plain byte order so the result is total
/// and deterministic.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_cmp_folded(a, b).then_with(|| a.cmp(b))
}

fn natural_cmp_folded(a: &str, b: &str) -> Ordering {
    let mut a = a.chars().peekable();
    let mut b = b.chars().peekable();
    loop {
        let (ca, cb) = match (a.peek(), b.peek()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(&ca), Some(&cb)) => (ca, cb),
        };

        let ord = if ca.is_ascii_digit() && cb.is_ascii_digit() {
            compare_numbers(&take_digits(&mut a), &take_digits(&mut b))
        } else {
            a.next();
            b.next();
            ca.to_lowercase().cmp(cb.to_lowercase())
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits
}

/// Numeric comparison of digit strings of any length.
fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Order a scanned mapping by key in natural order.
pub fn sort_natural(images: HashMap<String, ImageEntry>) -> Vec<ImageEntry> {
    let mut entries: Vec<ImageEntry> = images.into_values().collect();
    entries.sort_by(|a, b| natural_cmp(&a.key, &b.key));
    entries
}

/// The slice of a list shown for one page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    /// Resolve a requested page against `total` items.
    ///
    /// `page_size == 0` means unpaginated.
    pub fn resolve(total: usize, page_size: usize, requested_page: i64) -> Self {
        if page_size == 0 || page_size >= total {
            return Self {
                current_page: 1,
                total_pages: 1,
                total_items: total,
                start: 0,
                end: total,
            };
        }

        let total_pages = total.div_ceil(page_size);
        let current_page = requested_page.clamp(1, total_pages as i64) as usize;
        let start = (current_page - 1) * page_size;
        Self {
            current_page,
            total_pages,
            total_items: total,
            start,
            end: (start + page_size).min(total),
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn stats(&self) -> GalleryStats {
        GalleryStats {
            current_page: self.current_page,
            total_images: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// One page of items plus where it sits in the whole list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub stats: GalleryStats,
}

/// Cut the requested page out of `items`.
pub fn paginate<T>(items: Vec<T>, page_size: usize, requested_page: i64) -> Page<T> {
    let window = PageWindow::resolve(items.len(), page_size, requested_page);
    let items = items
        .into_iter()
        .skip(window.start)
        .take(window.range().len())
        .collect();
    Page {
        items,
        stats: window.stats(),
    }
}

/// Read a page number from a raw request value.
///
/// Leading whitespace and a sign are accepted, trailing garbage is ignored
/// (`"3abc"` is page 3). Absent or non-numeric input means page 1; range
/// clamping happens later in [`PageWindow::resolve`].
pub fn parse_page_param(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return 1;
    };
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return 1;
    }
    let digits = &rest[..digits_len];
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    if negative { -magnitude } else { magnitude }
}
