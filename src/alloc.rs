//! First-fit contiguous allocation over the 127-block data region (block 0
//! is reserved for the superblock and never considered). Mirrors
//! `set_fbl_bits`'s scan style from the original engine: walk the bitmap
//! looking for a run of `size` consecutive free bits.

use crate::layout::{Bitmap, TOTAL_BLOCKS};

/// Finds the lowest-indexed run of `size` consecutive free blocks in
/// `1..TOTAL_BLOCKS`. Returns `None` if no such run exists (including when
/// `size` is 0, which callers never need to allocate for since a size-0
/// file gets no blocks at all).
pub fn find_free_run(bitmap: &Bitmap, size: u8) -> Option<u8> {
    let size = size as usize;
    if size == 0 {
        return None;
    }
    let mut start = 1usize;
    while start + size <= TOTAL_BLOCKS {
        let run_free = (start..start + size).all(|b| !bitmap.is_used(b));
        if run_free {
            return Some(start as u8);
        }
        start += 1;
    }
    None
}

/// Flips the `size`-block run starting at `start` to `used`/free. Index 0
/// (the superblock's own block) is ignored, matching the bitmap's "always
/// reported used, never allocated" treatment of block 0. The sole place
/// callers mark blocks used or free — `create`, `delete` and `defrag` all
/// go through here rather than reaching into `Bitmap::set_range` directly.
pub fn mark(bitmap: &mut Bitmap, start: u8, size: u8, used: bool) {
    let start = start as usize;
    let size = size as usize;
    if start == 0 || size == 0 {
        return;
    }
    bitmap.set_range(start, size, used);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn finds_first_fit() {
        let mut bm = Bitmap::default();
        bm.set_used(0);
        bm.set_range(1, 3, true);
        // blocks 1-3 used, 4.. free
        assert_eq!(find_free_run(&bm, 2), Some(4));
    }

    #[test]
    fn no_room_returns_none() {
        let mut bm = Bitmap::default();
        bm.set_range(0, TOTAL_BLOCKS, true);
        assert_eq!(find_free_run(&bm, 1), None);
    }

    #[test]
    fn exact_fit_at_end() {
        let mut bm = Bitmap::default();
        bm.set_used(0);
        bm.set_range(1, 126, true);
        assert_eq!(find_free_run(&bm, 1), Some(127));
    }

    #[test]
    fn mark_flips_the_given_run_and_ignores_block_zero() {
        let mut bm = Bitmap::default();
        mark(&mut bm, 0, 1, true);
        assert!(!bm.is_used(0));

        mark(&mut bm, 4, 3, true);
        assert!(bm.is_used(4));
        assert!(bm.is_used(5));
        assert!(bm.is_used(6));
        assert!(!bm.is_used(7));

        mark(&mut bm, 4, 3, false);
        assert!(!bm.is_used(4));
        assert!(!bm.is_used(5));
        assert!(!bm.is_used(6));
    }
}
