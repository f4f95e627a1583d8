//! File engine: create, delete (with cascading directory removal), read,
//! write and directory listing. Each function takes the mounted state
//! directly and persists the superblock itself on success, mirroring the
//! reference engine calling `write_superblock()` at the end of every
//! mutating operation.

use crate::alloc::{self, find_free_run};
use crate::error::FsError;
use crate::layout::{InodeSlot, BLOCK_SIZE};
use crate::namespace::{self, children_of, first_free_inode, is_reserved_name, lookup, Name};
use crate::session::{Mounted, Session};

/// Creates a file (`size > 0`) or directory (`size == 0`) named `name` in
/// the current directory. Superblock-full is checked before the
/// already-exists check, which is in turn checked before the
/// not-enough-space check — this exact order is load-bearing (see
/// namespace collisions vs. capacity in the data model).
pub fn create(mounted: &mut Mounted, name: Name, size: u8) -> Result<(), FsError> {
    let idx = match first_free_inode(&mounted.superblock) {
        Some(idx) => idx,
        None => {
            return Err(FsError::SuperblockFull {
                disk: mounted.disk_name.clone(),
                name: display_name(&name),
            })
        }
    };

    if lookup(&mounted.superblock, mounted.cwd, &name).is_some() || is_reserved_name(&name) {
        return Err(FsError::AlreadyExists {
            name: display_name(&name),
        });
    }

    let start_block = if size > 0 {
        match find_free_run(&mounted.superblock.bitmap, size) {
            Some(start) => start,
            None => {
                return Err(FsError::CannotAllocate {
                    size,
                    disk: mounted.disk_name.clone(),
                })
            }
        }
    } else {
        0
    };

    if size > 0 {
        alloc::mark(&mut mounted.superblock.bitmap, start_block, size, true);
        mounted.superblock.inodes[idx].set_file(name, size, start_block, mounted.cwd);
    } else {
        mounted.superblock.inodes[idx].set_dir(name, mounted.cwd);
    }

    Session::persist(mounted).map_err(|_| FsError::CannotFindDisk {
        disk: mounted.disk_name.clone(),
    })
}

/// Deletes the file or directory named `name`, recursing into directories
/// pre-order (children removed before the directory inode itself, matching
/// `delete_file`'s recursive sweep over every other used inode whose parent
/// is the target).
pub fn delete(mounted: &mut Mounted, name: Name) -> Result<(), FsError> {
    let idx = lookup(&mounted.superblock, mounted.cwd, &name).ok_or(FsError::NotFound {
        name: display_name(&name),
    })?;
    delete_inode(mounted, idx);
    Session::persist(mounted).map_err(|_| FsError::CannotFindDisk {
        disk: mounted.disk_name.clone(),
    })
}

fn delete_inode(mounted: &mut Mounted, idx: usize) {
    let inode = mounted.superblock.inodes[idx];
    if inode.is_dir() {
        for child in children_of(&mounted.superblock, idx as u8) {
            delete_inode(mounted, child);
        }
    } else {
        let start = inode.start_block;
        let size = inode.size_blocks();
        let zero = [0u8; BLOCK_SIZE];
        for block in start..start + size {
            let _ = mounted.device.write_block(block, &zero);
        }
        alloc::mark(&mut mounted.superblock.bitmap, start, size, false);
    }
    mounted.superblock.inodes[idx].clear();
}

/// Reads block `block_num` of file `name` into the shared buffer.
pub fn read(session: &mut Session, name: Name, block_num: u32) -> Result<(), FsError> {
    let mounted = session.mounted.as_mut().expect("checked by caller");
    let idx = file_inode(mounted, &name)?;
    let size = mounted.superblock.inodes[idx].size_blocks();
    if block_num >= size as u32 {
        return Err(FsError::NoSuchBlock {
            name: display_name(&name),
            block: block_num,
        });
    }
    let start = mounted.superblock.inodes[idx].start_block;
    let block = start + block_num as u8;
    let data = mounted
        .device
        .read_block(block)
        .map_err(|_| FsError::CannotFindDisk {
            disk: mounted.disk_name.clone(),
        })?;
    session.buffer = data;
    Ok(())
}

/// Writes the shared buffer to block `block_num` of file `name`.
pub fn write(session: &mut Session, name: Name, block_num: u32) -> Result<(), FsError> {
    let buffer = session.buffer;
    let mounted = session.mounted.as_mut().expect("checked by caller");
    let idx = file_inode(mounted, &name)?;
    let size = mounted.superblock.inodes[idx].size_blocks();
    if block_num >= size as u32 {
        return Err(FsError::NoSuchBlock {
            name: display_name(&name),
            block: block_num,
        });
    }
    let start = mounted.superblock.inodes[idx].start_block;
    let block = start + block_num as u8;
    mounted
        .device
        .write_block(block, &buffer)
        .map_err(|_| FsError::CannotFindDisk {
            disk: mounted.disk_name.clone(),
        })
}

/// Finds `name` as a file (not a directory) in the current directory.
/// Lookup failure and "found but it's a directory" share the same wording.
fn file_inode(mounted: &Mounted, name: &Name) -> Result<usize, FsError> {
    let idx = lookup(&mounted.superblock, mounted.cwd, name);
    match idx {
        Some(idx) if !mounted.superblock.inodes[idx].is_dir() => Ok(idx),
        _ => Err(FsError::NoSuchFile {
            name: display_name(name),
        }),
    }
}

/// One line of `ls` output.
pub enum LsEntry {
    CurrentDir { children: usize },
    ParentDir { children: usize },
    Subdir { name: Name, children: usize },
    File { name: Name, size_blocks: u8 },
}

/// Lists the current directory: `.`, `..`, then every child in ascending
/// inode order.
pub fn ls(mounted: &Mounted) -> Vec<LsEntry> {
    let sb = &mounted.superblock;
    let mut out = Vec::new();
    let own_children = namespace::child_count(sb, mounted.cwd);
    out.push(LsEntry::CurrentDir {
        children: own_children,
    });

    if mounted.cwd == crate::layout::ROOT_PARENT {
        out.push(LsEntry::ParentDir {
            children: own_children,
        });
    } else {
        // cwd is a real inode index; its own parent's child count is what
        // `..` reports.
        let prevwd = sb.inodes[mounted.cwd as usize].parent_index();
        out.push(LsEntry::ParentDir {
            children: namespace::child_count(sb, prevwd),
        });
    }

    for child in children_of(sb, mounted.cwd) {
        let inode = &sb.inodes[child];
        if inode.is_dir() {
            out.push(LsEntry::Subdir {
                name: inode.name,
                children: namespace::child_count(sb, child as u8),
            });
        } else {
            out.push(LsEntry::File {
                name: inode.name,
                size_blocks: inode.size_blocks(),
            });
        }
    }
    out
}

/// Changes the current directory to `name`, or to `.`/`..`.
pub fn cd(mounted: &mut Mounted, name: Name) -> Result<(), FsError> {
    if name == namespace::DOT {
        return Ok(());
    }
    if name == namespace::DOTDOT {
        if mounted.cwd == crate::layout::ROOT_PARENT {
            return Ok(());
        }
        let cwd = mounted.cwd;
        let own = mounted.superblock.inodes[cwd as usize];
        mounted.cwd = own.parent_index();
        return Ok(());
    }
    let idx = lookup(&mounted.superblock, mounted.cwd, &name);
    match idx {
        Some(idx) if mounted.superblock.inodes[idx].is_dir() => {
            mounted.cwd = idx as u8;
            Ok(())
        }
        _ => Err(FsError::NoSuchDirectory {
            name: display_name(&name),
        }),
    }
}

/// Renders a padded 5-byte name back to a trimmed display string, matching
/// the original's `%s`-of-a-fixed-buffer printing (trailing NULs end the
/// C string early; here they're simply trimmed).
pub fn display_name(name: &Name) -> String {
    let end = name.iter().position(|&b| b == 0).unwrap_or(name.len());
    String::from_utf8_lossy(&name[..end]).into_owned()
}

// Re-exported for callers that only have an `InodeSlot` in hand (defrag).
pub(crate) fn is_file(inode: &InodeSlot) -> bool {
    inode.is_used() && !inode.is_dir()
}
