//! Wraparound pagination shared by the partners and testimonials sections.
//!
//! All operations are total: an empty collection yields an empty window and
//! a pinned position.

/// Indices of the `size` slides visible starting at `current`, wrapping
/// around the end of the collection. Never yields more than `len` indices.
#[must_use]
pub fn window(len: usize, current: usize, size: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let current = current % len;
    (0..size.min(len)).map(|offset| (current + offset) % len).collect()
}

/// Where `page` signed steps from the first slide land, wrapping both ways.
#[must_use]
pub fn position(page: i64, len: usize) -> usize {
    match i64::try_from(len) {
        Ok(len) if len != 0 => usize::try_from(page.rem_euclid(len)).unwrap_or_default(),
        _ => 0,
    }
}
