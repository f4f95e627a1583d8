//! Defragmentation: repeatedly find the lowest free block, then the next
//! used block after it, and slide that file's blocks down to close the
//! gap. Resumes scanning just past the relocated file so blocks already
//! compacted are never revisited, matching `fs_defrag`'s `fbl_idx` cursor.

use crate::alloc;
use crate::engine::is_file;
use crate::layout::{BLOCK_SIZE, TOTAL_BLOCKS};
use crate::session::Mounted;

pub fn defrag(mounted: &mut Mounted) -> std::io::Result<()> {
    let mut scan_from = 1usize;
    loop {
        let lowest_free = (scan_from..TOTAL_BLOCKS).find(|&b| !mounted.superblock.bitmap.is_used(b));
        let Some(lowest_free) = lowest_free else {
            break;
        };
        let next_used = ((lowest_free + 1)..TOTAL_BLOCKS).find(|&b| mounted.superblock.bitmap.is_used(b));
        let Some(next_used) = next_used else {
            break;
        };

        let file_idx = mounted
            .superblock
            .inodes
            .iter()
            .position(|inode| is_file(inode) && inode.start_block as usize == next_used)
            .expect("bitmap says block is used by exactly one file");

        let size = mounted.superblock.inodes[file_idx].size_blocks();
        for i in 0..size {
            let src = next_used as u8 + i;
            let dst = lowest_free as u8 + i;
            let data = mounted.device.read_block(src)?;
            mounted.device.write_block(src, &[0u8; BLOCK_SIZE])?;
            mounted.device.write_block(dst, &data)?;
        }
        alloc::mark(&mut mounted.superblock.bitmap, next_used as u8, size, false);
        alloc::mark(&mut mounted.superblock.bitmap, lowest_free as u8, size, true);
        mounted.superblock.inodes[file_idx].start_block = lowest_free as u8;
        crate::session::Session::persist(mounted)?;

        scan_from = lowest_free + size as usize;
    }
    Ok(())
}
