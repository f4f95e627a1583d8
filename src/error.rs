//! Errors the engine can report. One closed enum, one `Display` impl, no
//! `thiserror`/`anyhow` — the teacher's own CLIs propagate plain
//! `io::Result`/`Box<dyn Error>` and format messages by hand
//! (`utils::user`'s `format!("Invalid entry on line `{}`", ...)` is the same
//! idea); here the wording is part of the external contract so it's spelled
//! out exactly rather than derived.

use std::fmt;

/// An error raised by a core operation. Each variant carries exactly the
/// data needed to reproduce the required message; formatting is the single
/// source of truth for wording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    /// No disk could be opened at the given path.
    CannotFindDisk { disk: String },
    /// The disk's superblock failed the consistency checker at mount time.
    InconsistentFileSystem { disk: String, code: u8 },
    /// No inode slot was free.
    SuperblockFull { disk: String, name: String },
    /// A file or directory with this name already exists in the current
    /// directory.
    AlreadyExists { name: String },
    /// No contiguous run of free blocks large enough was found.
    CannotAllocate { size: u8, disk: String },
    /// `name` does not refer to a file or directory in the current
    /// directory (create/delete/cd paths use this wording).
    NotFound { name: String },
    /// `name` does not refer to a file, or is a directory (read/write
    /// paths use this wording; both cases share it).
    NoSuchFile { name: String },
    /// `name` does not refer to a directory (cd's wording).
    NoSuchDirectory { name: String },
    /// `block` is outside `name`'s allocated range.
    NoSuchBlock { name: String, block: u32 },
    /// No disk is currently mounted.
    NotMounted,
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::CannotFindDisk { disk } => write!(f, "Error: Cannot find disk {disk}"),
            FsError::InconsistentFileSystem { disk, code } => write!(
                f,
                "Error: File system in {disk} is inconsistent (error code: {code})"
            ),
            FsError::SuperblockFull { disk, name } => write!(
                f,
                "Error: Superblock in disk {disk} is full, cannot create {name}"
            ),
            FsError::AlreadyExists { name } => {
                write!(f, "Error: File or directory {name} already exists")
            }
            FsError::CannotAllocate { size, disk } => {
                write!(f, "Error: Cannot allocate {size} blocks on {disk}")
            }
            FsError::NotFound { name } => {
                write!(f, "Error: File or directory {name} does not exist")
            }
            FsError::NoSuchFile { name } => write!(f, "Error: File {name} does not exist"),
            FsError::NoSuchDirectory { name } => {
                write!(f, "Error: Directory {name} does not exist")
            }
            FsError::NoSuchBlock { name, block } => {
                write!(f, "Error: {name} does not have block {block}")
            }
            FsError::NotMounted => write!(f, "Error: No file system is mounted"),
        }
    }
}

impl std::error::Error for FsError {}
