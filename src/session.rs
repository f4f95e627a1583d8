//! Owned process state, replacing what the original engine kept in global
//! variables: the mounted device (if any), its decoded superblock, the
//! current working directory, the disk's display name and the shared
//! read/write buffer. A `Session` is created empty and is handed to every
//! [`crate::op::Operation`] dispatch.

use crate::check;
use crate::device::BlockDevice;
use crate::error::FsError;
use crate::layout::{Superblock, ROOT_PARENT};
use std::path::Path;

/// The state of a single mounted disk.
pub struct Mounted {
    pub device: BlockDevice,
    pub superblock: Superblock,
    pub cwd: u8,
    pub disk_name: String,
}

/// All process state. Starts with nothing mounted, matching the reference
/// engine's globals before the first `M` command runs.
pub struct Session {
    pub mounted: Option<Mounted>,
    pub buffer: [u8; 1024],
}

impl Session {
    pub fn new() -> Self {
        Session {
            mounted: None,
            buffer: [0u8; 1024],
        }
    }

    /// Mounts the disk at `path`, running the consistency checker on its
    /// superblock first. Any previously mounted disk is dropped, matching
    /// the original's "free old globals only once the new one passed the
    /// check" sequencing.
    pub fn mount(&mut self, path: &Path, disk_name: String) -> Result<(), FsError> {
        let mut device = BlockDevice::open(path).map_err(|_| FsError::CannotFindDisk {
            disk: disk_name.clone(),
        })?;
        let raw = device.read_block(0).map_err(|_| FsError::CannotFindDisk {
            disk: disk_name.clone(),
        })?;
        let raw = crate::layout::RawSuperblock(raw);
        let superblock = Superblock::decode(&raw);
        let code = check::check(&superblock);
        if code != 0 {
            return Err(FsError::InconsistentFileSystem {
                disk: disk_name,
                code,
            });
        }
        self.mounted = Some(Mounted {
            device,
            superblock,
            cwd: ROOT_PARENT,
            disk_name,
        });
        Ok(())
    }

    pub fn require_mounted(&mut self) -> Result<&mut Mounted, FsError> {
        self.mounted.as_mut().ok_or(FsError::NotMounted)
    }

    /// Persists the current superblock to block 0, matching
    /// `write_superblock`'s unconditional full-block rewrite.
    pub fn persist(mounted: &mut Mounted) -> std::io::Result<()> {
        let raw = mounted.superblock.encode();
        mounted.device.write_block(0, &raw.0)
    }
}
