//! Core engine for the simulated block filesystem: layout codec, block
//! device, consistency checker, namespace, allocator, file engine and
//! defragmenter. The front end (script reading, lexical validation, stderr
//! formatting) lives in `src/main.rs` and talks to this crate only through
//! [`op::Operation`] and [`session::Session`].

pub mod alloc;
pub mod check;
pub mod defrag;
pub mod device;
pub mod engine;
pub mod error;
pub mod layout;
pub mod namespace;
pub mod op;
pub mod session;

pub use error::FsError;
pub use op::{Operation, Record};
pub use session::Session;
