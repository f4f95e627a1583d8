//! `fsim` reads a script of filesystem commands, one per line, and applies
//! them to a simulated 128-block virtual disk. See the command table for
//! the accepted letters; everything else about argument handling lives in
//! [`script`].

mod script;

use fs_core::engine::LsEntry;
use fs_core::op::{self, Record};
use fs_core::Session;
use std::env;
use std::fs::File;
use std::io::{self, BufRead};
use std::process::exit;

fn main() {
    let mut args = env::args_os();
    let _bin = args.next();
    let Some(script_path) = args.next() else {
        exit(1);
    };

    let file = match File::open(&script_path) {
        Ok(f) => f,
        Err(_) => exit(1),
    };
    let script_display = script_path.to_string_lossy().into_owned();

    let mut session = Session::new();
    let mut reader = io::BufReader::new(file);
    let mut line_num = 0usize;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf).unwrap_or(0);
        if read == 0 {
            break;
        }
        line_num += 1;
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }

        match script::parse_line(&buf) {
            Err(_) => {
                eprintln!("Command Error: {script_display}, {line_num}");
            }
            Ok(operation) => match op::dispatch(&mut session, operation) {
                Ok(Record::None) => {}
                Ok(Record::Listing(entries)) => print_listing(&entries),
                Err(e) => eprintln!("{e}"),
            },
        }
    }
}

fn print_listing(entries: &[LsEntry]) {
    for entry in entries {
        match entry {
            LsEntry::CurrentDir { children } => println!("{:<5} {:>3}", ".", children),
            LsEntry::ParentDir { children } => println!("{:<5} {:>3}", "..", children),
            LsEntry::Subdir { name, children } => {
                println!("{:<5} {:>3}", fs_core::engine::display_name(name), children)
            }
            LsEntry::File { name, size_blocks } => println!(
                "{:<5} {:>3} KB",
                fs_core::engine::display_name(name),
                size_blocks
            ),
        }
    }
}
