//! The typed boundary between the front end and the core: one variant per
//! script command, plus the dispatcher that runs it against a [`Session`].
//! Keeping this as data (rather than having the front end call engine
//! functions directly) is what lets the engine be exercised in-process by
//! tests without going through script text at all.

use crate::engine::{self, LsEntry};
use crate::error::FsError;
use crate::namespace::Name;
use crate::session::Session;
use std::path::PathBuf;

/// A single validated script command, already lexically checked and
/// name-normalized by the front end.
#[derive(Debug, Clone)]
pub enum Operation {
    Mount { disk_path: PathBuf, disk_name: String },
    Create { name: Name, size: u8 },
    Delete { name: Name },
    Read { name: Name, block_num: u32 },
    Write { name: Name, block_num: u32 },
    Buffer { payload: Vec<u8> },
    List,
    Defrag,
    ChangeDir { name: Name },
}

impl Operation {
    /// Every command except `M` requires a mounted disk.
    fn requires_mount(&self) -> bool {
        !matches!(self, Operation::Mount { .. })
    }
}

/// The result of a successful `L` (list) operation, handed back so the
/// front end controls formatting.
pub enum Record {
    None,
    Listing(Vec<LsEntry>),
}

pub fn dispatch(session: &mut Session, op: Operation) -> Result<Record, FsError> {
    if op.requires_mount() && session.mounted.is_none() {
        return Err(FsError::NotMounted);
    }

    match op {
        Operation::Mount { disk_path, disk_name } => {
            session.mount(&disk_path, disk_name)?;
            Ok(Record::None)
        }
        Operation::Create { name, size } => {
            let mounted = session.require_mounted()?;
            engine::create(mounted, name, size)?;
            Ok(Record::None)
        }
        Operation::Delete { name } => {
            let mounted = session.require_mounted()?;
            engine::delete(mounted, name)?;
            Ok(Record::None)
        }
        Operation::Read { name, block_num } => {
            engine::read(session, name, block_num)?;
            Ok(Record::None)
        }
        Operation::Write { name, block_num } => {
            engine::write(session, name, block_num)?;
            Ok(Record::None)
        }
        Operation::Buffer { payload } => {
            session.buffer = [0u8; 1024];
            let len = payload.len().min(1024);
            session.buffer[..len].copy_from_slice(&payload[..len]);
            Ok(Record::None)
        }
        Operation::List => {
            let mounted = session.require_mounted()?;
            Ok(Record::Listing(engine::ls(mounted)))
        }
        Operation::Defrag => {
            let mounted = session.require_mounted()?;
            crate::defrag::defrag(mounted).map_err(|_| FsError::CannotFindDisk {
                disk: mounted.disk_name.clone(),
            })?;
            Ok(Record::None)
        }
        Operation::ChangeDir { name } => {
            let mounted = session.require_mounted()?;
            engine::cd(mounted, name)?;
            Ok(Record::None)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::layout::{Superblock, BLOCK_SIZE, TOTAL_BLOCKS};
    use std::io::Write as _;

    fn mounted_session() -> (Session, tempfile::NamedTempFile) {
        let mut disk = tempfile::NamedTempFile::new().unwrap();
        let sb = Superblock::empty();
        let mut bytes = vec![0u8; BLOCK_SIZE * TOTAL_BLOCKS];
        bytes[..BLOCK_SIZE].copy_from_slice(&sb.encode().0);
        disk.write_all(&bytes).unwrap();
        disk.flush().unwrap();

        let mut session = Session::new();
        dispatch(
            &mut session,
            Operation::Mount {
                disk_path: disk.path().to_path_buf(),
                disk_name: "disk".into(),
            },
        )
        .unwrap();
        (session, disk)
    }

    #[test]
    fn create_then_list_round_trip() {
        let (mut session, _disk) = mounted_session();
        dispatch(
            &mut session,
            Operation::Create {
                name: *b"file1",
                size: 2,
            },
        )
        .unwrap();
        let listing = match dispatch(&mut session, Operation::List).unwrap() {
            Record::Listing(entries) => entries,
            _ => unreachable!(),
        };
        // "." + ".." + the one file
        assert_eq!(listing.len(), 3);
    }

    #[test]
    fn operations_before_mount_fail() {
        let mut session = Session::new();
        let err = dispatch(
            &mut session,
            Operation::Create {
                name: *b"a\0\0\0\0",
                size: 0,
            },
        )
        .unwrap_err();
        assert_eq!(err, FsError::NotMounted);
    }
}
