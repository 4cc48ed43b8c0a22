use std::env;
use std::fs::File;
use std::io::{self, Read};

use memmap2::{Mmap, MmapOptions};
use tracing_subscriber::EnvFilter;

use repair_json::{repair_json, repair_lines, RepairOptions, RepairResult};

enum InputData {
    Owned(Vec<u8>),
    Mapped { _file: File, mmap: Mmap },
}

impl InputData {
    fn as_bytes(&self) -> &[u8] {
        match self {
            InputData::Owned(v) => v.as_slice(),
            InputData::Mapped { mmap, .. } => mmap.as_ref(),
        }
    }
}

fn read_input(input_path: Option<&str>) -> io::Result<InputData> {
    match input_path {
        Some("-") | None => {
            let mut buf: Vec<u8> = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(InputData::Owned(buf))
        }
        Some(p) => {
            let file = File::open(p)?;
            let len = file.metadata()?.len();
            if len == 0 {
                return Ok(InputData::Owned(Vec::new()));
            }
            let mmap = unsafe { MmapOptions::new().map(&file)? };
            Ok(InputData::Mapped { _file: file, mmap })
        }
    }
}

fn parse_usize(arg: &str, name: &str) -> usize {
    arg.parse::<usize>().unwrap_or_else(|_| panic!("invalid {name}: {arg}"))
}

fn usage(bin: &str) -> String {
    format!(
        "usage: {bin} [--input PATH|-] [--max-attempts N] [--lines] [--pretty]\n\
         \x20          [--no-trailing-commas] [--no-unquoted-keys] [--no-single-quotes]\n\
         \x20          [--no-balance-brackets] [--no-escaped-quotes] [--no-extract]\n\
         Reads malformed JSON from a file or stdin, prints the repair result as JSON.\n\
         Exit status: 0 repaired/valid, 1 unrepairable, 2 usage or I/O error."
    )
}

fn result_json(r: &RepairResult) -> serde_json::Value {
    serde_json::json!({
        "success": r.success,
        "repaired": r.repaired,
        "repairs": r.repairs,
        "error": r.error.as_ref().map(|e| e.to_string()),
    })
}

fn run() -> i32 {
    let bin = env::args().next().unwrap_or_else(|| "repair-json".to_string());

    let mut options = RepairOptions::default();
    let mut input_path: Option<String> = None;
    let mut lines_mode = false;
    let mut pretty = false;

    let args = env::args().skip(1).collect::<Vec<_>>();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" | "-i" => {
                i += 1;
                input_path = Some(args.get(i).expect("missing --input value").to_string());
            }
            "--max-attempts" => {
                i += 1;
                options.max_attempts = parse_usize(
                    args.get(i).expect("missing --max-attempts value"),
                    "max_attempts",
                );
            }
            "--no-trailing-commas" => options.remove_trailing_commas = false,
            "--no-unquoted-keys" => options.fix_unquoted_keys = false,
            "--no-single-quotes" => options.fix_single_quotes = false,
            "--no-balance-brackets" => options.balance_brackets = false,
            "--no-escaped-quotes" => options.fix_escaped_quotes = false,
            "--no-extract" => options.extract_from_text = false,
            "--lines" => lines_mode = true,
            "--pretty" => pretty = true,
            "-h" | "--help" => {
                println!("{}", usage(&bin));
                return 0;
            }
            other => {
                eprintln!("unknown argument: {other}");
                eprintln!("{}", usage(&bin));
                return 2;
            }
        }
        i += 1;
    }

    let data = match read_input(input_path.as_deref()) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("failed to read input: {e}");
            return 2;
        }
    };
    let text = String::from_utf8_lossy(data.as_bytes()).to_string();

    let (payload, all_ok) = if lines_mode {
        let results = repair_lines(&text, Some(&options));
        let ok = results.iter().all(|r| r.success);
        let rendered: Vec<serde_json::Value> = results.iter().map(result_json).collect();
        (serde_json::Value::Array(rendered), ok)
    } else {
        let result = repair_json(text.as_str(), Some(&options));
        let ok = result.success;
        (result_json(&result), ok)
    };

    let rendered = if pretty {
        serde_json::to_string_pretty(&payload)
    } else {
        serde_json::to_string(&payload)
    }
    .expect("result record serializes");
    println!("{rendered}");

    if all_ok {
        0
    } else {
        1
    }
}

fn main() {
    // Logs go to stderr; stdout carries the result record.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    std::process::exit(run());
}
