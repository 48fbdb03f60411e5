//! Crate-wide tuning knobs.

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized number of indices (points, cells or edges) handed to a
/// single parallel task. Defaults to [`DEFAULT_GRAIN_SIZE`], but can be overridden:
///  1) **Build-time**: set env var `GRIDCUT_GRAIN_SIZE`
///     (e.g. `GRIDCUT_GRAIN_SIZE=4096 cargo build`)
///  2) **Runtime**: call [`set_grain_size`] once before the first cut
static GRAIN_SIZE_CELL: OnceLock<usize> = OnceLock::new();

/// Default parallel grain size.
pub const DEFAULT_GRAIN_SIZE: usize = 1024;

/// Returns the current grain size.
pub fn grain_size() -> usize {
    *GRAIN_SIZE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("GRIDCUT_GRAIN_SIZE") {
            if let Ok(value) = usize::from_str(environment_variable) {
                return value.max(1);
            }
        }
        DEFAULT_GRAIN_SIZE
    })
}

/// Set the grain size programmatically once (subsequent calls are ignored).
/// Call near program start: `gridcut::config::set_grain_size(4096);`
pub fn set_grain_size(value: usize) {
    let _ = GRAIN_SIZE_CELL.set(value.max(1));
}

/// Split `0..len` into consecutive ranges of at most `grain` indices.
pub fn chunk_ranges(len: usize, grain: usize) -> Vec<std::ops::Range<usize>> {
    let grain = grain.max(1);
    (0..len.div_ceil(grain))
        .map(|chunk| chunk * grain..((chunk + 1) * grain).min(len))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_ranges_cover_everything_once() {
        let ranges = chunk_ranges(10, 4);
        assert_eq!(ranges, vec![0..4, 4..8, 8..10]);
        assert!(chunk_ranges(0, 4).is_empty());
        assert_eq!(chunk_ranges(3, 0), vec![0..1, 1..2, 2..3]);
    }
}
