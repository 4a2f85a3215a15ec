//! quillc — command-line driver for the quill engine.
//!
//! Formats one template against positional values, either straight to
//! stdout (direct mode) or through a bounded buffer (`--buffer=N`,
//! snprintf mode). Set `QUILL_LOG=debug` for engine diagnostics.

mod trace;
mod value;

use quill::sink::WriteSink;
use value::Value;

fn main() {
    trace::init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    if argv.is_empty() {
        print_usage();
        std::process::exit(1);
    }

    let mut capacity: Option<usize> = None;
    let mut newline = false;
    let mut positional: Vec<String> = Vec::new();

    for arg in argv {
        if let Some(text) = arg.strip_prefix("--buffer=") {
            match text.parse() {
                Ok(parsed) => capacity = Some(parsed),
                Err(_) => {
                    eprintln!("quillc: invalid buffer capacity `{text}`");
                    std::process::exit(2);
                }
            }
        } else if arg == "--newline" || arg == "-n" {
            newline = true;
        } else if arg == "--help" || arg == "-h" {
            print_usage();
            return;
        } else {
            positional.push(arg);
        }
    }

    let Some((template, raw_values)) = positional.split_first() else {
        print_usage();
        std::process::exit(1);
    };

    let mut values = Vec::with_capacity(raw_values.len());
    for raw in raw_values {
        match Value::parse(raw) {
            Ok(parsed) => values.push(parsed),
            Err(error) => {
                eprintln!("quillc: {error}");
                std::process::exit(2);
            }
        }
    }
    let args: Vec<quill::Arg<'_>> = values.iter().map(Value::as_arg).collect();

    tracing::debug!(template = %template, values = args.len(), "formatting");

    let written = match capacity {
        Some(capacity) => {
            let mut buf = vec![0u8; capacity];
            let len = quill::snprintf(&mut buf, template, &args);
            let stored = if capacity == 0 { 0 } else { len.min(capacity - 1) };
            print!("{}", String::from_utf8_lossy(&buf[..stored]));
            if capacity > 0 && len >= capacity {
                tracing::warn!(len, capacity, "output truncated");
            }
            len
        }
        None => {
            let printer = quill::Printer::new();
            printer.init(WriteSink::new(std::io::stdout()));
            printer.printf(template, &args)
        }
    };

    if newline {
        println!();
    }
    tracing::debug!(written, "done");
}

fn print_usage() {
    println!("quillc — format a printf-style template");
    println!();
    println!("Usage: quillc [options] <template> [value...]");
    println!();
    println!("Options:");
    println!("  --buffer=N     snprintf mode: format through an N-byte buffer");
    println!("  -n, --newline  append a trailing newline");
    println!("  -h, --help     show this help");
    println!();
    println!("Values are inferred (integer, float, text); a prefix pins the");
    println!("type: i:-5  u:28  f:3.14  s:text  x:0102b5 (bytes for %k/%K).");
    println!();
    println!("Environment: QUILL_LOG=debug enables engine diagnostics.");
}
