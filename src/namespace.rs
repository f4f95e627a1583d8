//! Lookups over the decoded superblock: finding an entry by name within the
//! current directory, enumerating children, and the two reserved names `.`
//! and `..` that never correspond to a real inode slot.

use crate::layout::{Superblock, NAME_LEN, RESERVED_PARENT};

/// The padded, lowercase 5-byte form every name is normalized to before it
/// ever reaches the core. Front-end responsibility; the core only ever sees
/// this form.
pub type Name = [u8; NAME_LEN];

pub const DOT: Name = *b".\0\0\0\0";
pub const DOTDOT: Name = *b"..\0\0\0";

/// Returns the index of the used inode named `name` with `parent` as its
/// parent, if any.
pub fn lookup(sb: &Superblock, parent: u8, name: &Name) -> Option<usize> {
    sb.inodes
        .iter()
        .position(|inode| inode.is_used() && inode.parent_index() == parent && &inode.name == name)
}

/// Whether `name` is one of the two names that can never be created,
/// because they aren't real inodes.
pub fn is_reserved_name(name: &Name) -> bool {
    *name == DOT || *name == DOTDOT
}

/// All used-inode indices whose parent is `parent`, in ascending order.
pub fn children_of(sb: &Superblock, parent: u8) -> Vec<usize> {
    sb.inodes
        .iter()
        .enumerate()
        .filter(|(_, inode)| inode.is_used() && inode.parent_index() == parent)
        .map(|(i, _)| i)
        .collect()
}

/// Number of children `parent` has, plus the two synthetic `.`/`..`
/// entries every directory is considered to carry.
pub fn child_count(sb: &Superblock, parent: u8) -> usize {
    children_of(sb, parent).len() + 2
}

/// First unused inode slot, if any.
pub fn first_free_inode(sb: &Superblock) -> Option<usize> {
    sb.inodes.iter().position(|inode| !inode.is_used())
}

/// `dir_parent` may never literally be [`RESERVED_PARENT`] (126); it's not
/// a valid directory index and has no root-sentinel meaning either.
pub fn is_reserved_parent(parent: u8) -> bool {
    parent == RESERVED_PARENT
}
