//! The six consistency rules a superblock image must satisfy to be
//! mountable. Evaluated in order; the lowest violated rule number wins.
//! Rule 6's free-block-list/allocation-coverage check is only reported once
//! rules 2-5 have passed, since its own bookkeeping is computed alongside
//! rule 2's scan.

use crate::layout::{Superblock, TOTAL_BLOCKS};
use crate::namespace::is_reserved_parent;

/// `0` means consistent; any other value is the violated rule number.
pub fn check(sb: &Superblock) -> u8 {
    let mut alloced = [false; TOTAL_BLOCKS];
    let mut fbl_error = false;

    // Rule 1: used inodes have a nonzero first name byte; free inodes are
    // entirely zeroed.
    for inode in &sb.inodes {
        if inode.is_used() {
            if inode.name[0] == 0 {
                return 1;
            }
        } else if inode.name != [0u8; 5]
            || inode.raw_used_size() != 0
            || inode.start_block != 0
            || inode.raw_dir_parent() != 0
        {
            return 1;
        }
    }

    // Rule 2: a file inode's block range must lie within [1, 127], and its
    // blocks are accumulated into `alloced` so double-allocation can be
    // flagged (but not yet reported — that's rule 6).
    for inode in &sb.inodes {
        if inode.is_used() && !inode.is_dir() {
            let start = inode.start_block;
            let size = inode.size_blocks();
            if start < 1 || start > 127 {
                return 2;
            }
            let end = start as u16 + size as u16 - 1;
            if end > 127 {
                return 2;
            }
            for block in start..start + size {
                let block = block as usize;
                if alloced[block] {
                    fbl_error = true;
                } else {
                    alloced[block] = true;
                }
            }
        }
    }

    // Rule 3: a directory inode's size and start block must both be zero.
    for inode in &sb.inodes {
        if inode.is_used() && inode.is_dir() && (inode.size_blocks() != 0 || inode.start_block != 0) {
            return 3;
        }
    }

    // Rule 4: an inode's parent cannot be itself or 126; if the parent is a
    // real inode index (0-125) it must be in use and marked a directory.
    for (i, inode) in sb.inodes.iter().enumerate() {
        if !inode.is_used() {
            continue;
        }
        let parent = inode.parent_index();
        if parent as usize == i || is_reserved_parent(parent) {
            return 4;
        }
        if (parent as usize) <= 125 {
            let parent_inode = &sb.inodes[parent as usize];
            if !parent_inode.is_used() || !parent_inode.is_dir() {
                return 4;
            }
        }
    }

    // Rule 5: names must be unique within a single parent directory.
    for (i, inode1) in sb.inodes.iter().enumerate() {
        if !inode1.is_used() {
            continue;
        }
        for (k, inode2) in sb.inodes.iter().enumerate() {
            if i == k || !inode2.is_used() {
                continue;
            }
            if inode1.name == inode2.name && inode1.parent_index() == inode2.parent_index() {
                return 5;
            }
        }
    }

    // Rule 6: the free-block bitmap must agree with actual allocation.
    if fbl_error {
        return 6;
    }
    for block in 1..TOTAL_BLOCKS {
        if !sb.bitmap.is_used(block) && alloced[block] {
            return 6;
        }
    }

    0
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::layout::ROOT_PARENT;

    #[test]
    fn empty_superblock_is_consistent() {
        assert_eq!(check(&Superblock::empty()), 0);
    }

    #[test]
    fn used_inode_with_zero_name_violates_rule_1() {
        let mut sb = Superblock::empty();
        sb.inodes[0].set_file([0, 0, 0, 0, 0], 1, 1, ROOT_PARENT);
        sb.bitmap.set_used(1);
        assert_eq!(check(&sb), 1);
    }

    #[test]
    fn file_start_block_zero_violates_rule_2() {
        let mut sb = Superblock::empty();
        sb.inodes[0].set_file(*b"a\0\0\0\0", 1, 0, ROOT_PARENT);
        assert_eq!(check(&sb), 2);
    }

    #[test]
    fn file_end_block_past_127_violates_rule_2() {
        let mut sb = Superblock::empty();
        sb.inodes[0].set_file(*b"a\0\0\0\0", 5, 125, ROOT_PARENT);
        assert_eq!(check(&sb), 2);
    }

    #[test]
    fn directory_with_nonzero_size_violates_rule_3() {
        let mut sb = Superblock::empty();
        sb.inodes[0].set_dir(*b"d\0\0\0\0", ROOT_PARENT);
        // tamper directly: set_dir always zeroes size/start, so force it
        sb.inodes[0].start_block = 4;
        assert_eq!(check(&sb), 3);
    }

    #[test]
    fn self_parent_violates_rule_4() {
        let mut sb = Superblock::empty();
        sb.inodes[0].set_dir(*b"d\0\0\0\0", 0);
        assert_eq!(check(&sb), 4);
    }

    #[test]
    fn parent_not_directory_violates_rule_4() {
        let mut sb = Superblock::empty();
        sb.inodes[0].set_file(*b"a\0\0\0\0", 1, 1, 1);
        sb.inodes[1].set_file(*b"b\0\0\0\0", 1, 2, ROOT_PARENT);
        sb.bitmap.set_range(1, 2, true);
        assert_eq!(check(&sb), 4);
    }

    #[test]
    fn duplicate_name_in_same_parent_violates_rule_5() {
        let mut sb = Superblock::empty();
        sb.inodes[0].set_file(*b"a\0\0\0\0", 1, 1, ROOT_PARENT);
        sb.inodes[1].set_file(*b"a\0\0\0\0", 1, 2, ROOT_PARENT);
        sb.bitmap.set_range(1, 2, true);
        assert_eq!(check(&sb), 5);
    }

    #[test]
    fn bitmap_disagreement_violates_rule_6() {
        let mut sb = Superblock::empty();
        sb.inodes[0].set_file(*b"a\0\0\0\0", 1, 1, ROOT_PARENT);
        // bitmap never marked block 1 used
        assert_eq!(check(&sb), 6);
    }

    #[test]
    fn double_allocation_is_deferred_to_rule_6() {
        let mut sb = Superblock::empty();
        sb.inodes[0].set_file(*b"a\0\0\0\0", 2, 1, ROOT_PARENT);
        sb.inodes[1].set_file(*b"b\0\0\0\0", 2, 1, ROOT_PARENT);
        sb.bitmap.set_range(1, 2, true);
        assert_eq!(check(&sb), 6);
    }
}
