//! Host-side storage for a mounted disk: a plain file, read and written one
//! 1024-byte block at a time. Mirrors the teacher's disk-handling style
//! (`utils::disk::get_disk_size`) in keeping I/O reduced to plain
//! `io::Result`-returning calls with no `unsafe`.

use crate::layout::BLOCK_SIZE;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// A disk backing file, opened for the lifetime of a mount.
pub struct BlockDevice {
    file: File,
}

impl BlockDevice {
    /// Opens an existing host file for read/write access. Does not check
    /// its length; a file shorter than the expected 128 blocks will surface
    /// as a short read the first time a block past EOF is requested.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(BlockDevice { file })
    }

    /// Reads block `index` (0-127) in full.
    pub fn read_block(&mut self, index: u8) -> io::Result<[u8; BLOCK_SIZE]> {
        let mut buf = [0u8; BLOCK_SIZE];
        self.file
            .seek(SeekFrom::Start(index as u64 * BLOCK_SIZE as u64))?;
        self.file.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Overwrites block `index` (0-127) in full.
    pub fn write_block(&mut self, index: u8, data: &[u8; BLOCK_SIZE]) -> io::Result<()> {
        self.file
            .seek(SeekFrom::Start(index as u64 * BLOCK_SIZE as u64))?;
        self.file.write_all(data)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write as _;

    fn make_disk() -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&[0u8; BLOCK_SIZE * 128]).unwrap();
        f
    }

    #[test]
    fn read_write_round_trip() {
        let disk = make_disk();
        let mut dev = BlockDevice::open(disk.path()).unwrap();
        let mut block = [0u8; BLOCK_SIZE];
        block[0] = 0xab;
        dev.write_block(5, &block).unwrap();
        let back = dev.read_block(5).unwrap();
        assert_eq!(back[0], 0xab);
    }
}
