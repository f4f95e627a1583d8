//! Line-oriented script front end: tokenizing a line, validating a
//! command's arity/argument shapes, and normalizing names. Grounded in
//! `parse_command`/`pad_string`/`validateCommand` from the reference
//! front end — kept here as a thin layer so `fs_core` never has to know
//! about script text at all.

use fs_core::namespace::Name;
use fs_core::op::Operation;
use std::path::PathBuf;

/// A line that didn't parse into a well-formed command: wrong arity, an
/// unparseable integer, a name over 5 bytes, an empty buffer payload, or an
/// unrecognized command letter.
#[derive(Debug)]
pub struct ScriptError;

/// Splits a line the way the reference tokenizer does: on space, tab and
/// `"`, collapsing runs of delimiters, with a single trailing newline
/// stripped first. The special-cased `B` command is handled by the caller
/// before tokenizing, since its payload must not be split further.
///
/// Operates on raw bytes, not `str`: a line is whatever came off the wire
/// before any UTF-8 validation, and everything other than a `B` payload is
/// ASCII command syntax, so byte-level splitting is all that's needed.
fn tokenize(line: &[u8]) -> Vec<&[u8]> {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.split(|&b| b == b' ' || b == b'\t' || b == b'"')
        .filter(|t| !t.is_empty())
        .collect()
}

/// Lowercases ASCII letters and zero-pads/truncates to 5 bytes.
fn pad_name(raw: &[u8]) -> Name {
    let mut name = [0u8; 5];
    for (i, b) in raw.iter().take(5).enumerate() {
        name[i] = b.to_ascii_lowercase();
    }
    name
}

fn parse_int(tok: &[u8]) -> Option<i64> {
    std::str::from_utf8(tok).ok()?.parse::<i64>().ok()
}

/// Parses one non-empty, non-comment script line into an [`Operation`].
///
/// Takes raw bytes rather than `&str` so a `B` payload containing a byte
/// that isn't valid UTF-8 is still carried through rather than rejected
/// before parsing even starts — the buffer command's payload is arbitrary
/// bytes, not text.
pub fn parse_line(line: &[u8]) -> Result<Operation, ScriptError> {
    let trimmed = line.strip_suffix(b"\n").unwrap_or(line);

    // The `B` command's payload is everything after the first delimiter,
    // taken verbatim — mirrors `parse_buff`'s early split on the literal
    // `"B "` prefix before any further tokenizing happens.
    if trimmed.first() == Some(&b'B')
        && (trimmed.len() == 1 || trimmed[1].is_ascii_whitespace() || trimmed[1] == b'"')
    {
        let payload = trimmed.get(2..).unwrap_or(&[]);
        if payload.is_empty() || payload.len() > 1024 {
            return Err(ScriptError);
        }
        return Ok(Operation::Buffer {
            payload: payload.to_vec(),
        });
    }

    let tokens = tokenize(trimmed);
    let Some(&cmd) = tokens.first() else {
        return Err(ScriptError);
    };

    match cmd {
        b"M" => {
            if tokens.len() != 2 {
                return Err(ScriptError);
            }
            let disk_name = String::from_utf8_lossy(tokens[1]).into_owned();
            Ok(Operation::Mount {
                disk_path: PathBuf::from(&disk_name),
                disk_name,
            })
        }
        b"C" => {
            if tokens.len() != 3 || tokens[1].len() > 5 {
                return Err(ScriptError);
            }
            let size = parse_int(tokens[2]).ok_or(ScriptError)?;
            if !(0..=127).contains(&size) {
                return Err(ScriptError);
            }
            Ok(Operation::Create {
                name: pad_name(tokens[1]),
                size: size as u8,
            })
        }
        b"D" => {
            if tokens.len() != 2 || tokens[1].len() > 5 {
                return Err(ScriptError);
            }
            Ok(Operation::Delete {
                name: pad_name(tokens[1]),
            })
        }
        b"R" => {
            if tokens.len() != 3 || tokens[1].len() > 5 {
                return Err(ScriptError);
            }
            let block = parse_int(tokens[2]).ok_or(ScriptError)?;
            if !(0..=126).contains(&block) {
                return Err(ScriptError);
            }
            Ok(Operation::Read {
                name: pad_name(tokens[1]),
                block_num: block as u32,
            })
        }
        b"W" => {
            if tokens.len() != 3 || tokens[1].len() > 5 {
                return Err(ScriptError);
            }
            let block = parse_int(tokens[2]).ok_or(ScriptError)?;
            if !(0..=126).contains(&block) {
                return Err(ScriptError);
            }
            Ok(Operation::Write {
                name: pad_name(tokens[1]),
                block_num: block as u32,
            })
        }
        b"L" => {
            if tokens.len() != 1 {
                return Err(ScriptError);
            }
            Ok(Operation::List)
        }
        b"O" => {
            if tokens.len() != 1 {
                return Err(ScriptError);
            }
            Ok(Operation::Defrag)
        }
        b"Y" => {
            if tokens.len() != 2 || tokens[1].len() > 5 {
                return Err(ScriptError);
            }
            Ok(Operation::ChangeDir {
                name: pad_name(tokens[1]),
            })
        }
        _ => Err(ScriptError),
    }
}
