// src/cli.rs
use std::time::Duration;
use std::{env, fs, path::PathBuf};

use crate::config::{ATTENDANCE_PATH, DEFAULT_TIMEOUT_SECS, HOST, POLL_PAUSE_MS, PORT};
use crate::csv::{rows_to_string, write_row, Delim};
use crate::progress::Progress;
use crate::scrape::{self, RefetchFeed};
use crate::table::{render_html, Augmented};
use crate::telemetry;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OutFormat {
    Csv,
    Tsv,
    Html,
}

pub struct Params {
    pub host: String,
    pub path: String,
    pub file: Option<PathBuf>,       // augment a saved page instead of fetching
    pub out: Option<PathBuf>,        // output path; stdout when absent
    pub format: OutFormat,
    pub include_headers: bool,
    pub subjects: bool,              // emit the subject code,name map instead
    pub timeout: Duration,
    pub no_track: bool,
}

impl Params {
    pub fn new() -> Self {
        Self {
            host: s!(HOST),
            path: s!(ATTENDANCE_PATH),
            file: None,
            out: None,
            format: OutFormat::Csv,
            include_headers: true,
            subjects: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            no_track: false,
        }
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let params = parse_cli()?;

    let mut progress = ConsoleProgress;
    let aug = if let Some(file) = &params.file {
        let doc = fs::read_to_string(file)?;
        scrape::collect_static(&doc, Some(&mut progress))
            .map_err(|e| format!("{}: {e}", file.display()))?
    } else {
        let mut feed = RefetchFeed::open(
            &params.host,
            PORT,
            &params.path,
            Duration::from_millis(POLL_PAUSE_MS),
        )?;
        scrape::collect(&mut feed, params.timeout, Some(&mut progress))?
    };

    let tracker = if params.no_track { None } else { Some(telemetry::track_usage()) };

    let rendered = render(&params, &aug);
    match &params.out {
        Some(path) => {
            fs::write(path, rendered)?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }

    if let Some(t) = tracker {
        let _ = t.join();
    }
    Ok(())
}

pub fn render(params: &Params, aug: &Augmented) -> String {
    if params.subjects {
        // The subject map is a first-class result of the scan pass.
        let mut pairs: Vec<_> = aug.subjects.iter().collect();
        pairs.sort();
        let mut buf: Vec<u8> = Vec::new();
        for (code, name) in pairs {
            let _ = write_row(&mut buf, &[code.clone(), name.clone()], params.format_sep());
        }
        return String::from_utf8_lossy(&buf).into_owned();
    }

    match params.format {
        OutFormat::Html => render_html(aug),
        OutFormat::Csv | OutFormat::Tsv => {
            let headers = params.include_headers.then(|| aug.headers.clone());
            rows_to_string(&aug.rows, &headers, params.format_sep())
        }
    }
}

impl Params {
    fn format_sep(&self) -> char {
        match self.format {
            OutFormat::Tsv => Delim::Tsv.sep(),
            _ => Delim::Csv.sep(),
        }
    }
}

fn parse_cli() -> Result<Params, Box<dyn std::error::Error>> {
    let mut params = Params::new();

    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str()
        {
            "-f" | "--file" => params.file = Some(PathBuf::from(args.next().ok_or("Missing value for --file")?)),
            "--host" => params.host = args.next().ok_or("Missing value for --host")?,
            "--path" => params.path = args.next().ok_or("Missing value for --path")?,
            "-o" | "--out" => params.out = Some(PathBuf::from(args.next().ok_or("Missing output path")?)),
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                params.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => OutFormat::Csv,
                    "tsv" => OutFormat::Tsv,
                    "html" => OutFormat::Html,
                    other => return Err(format!("Unknown format: {}", other).into()),
                };}
            "--no-headers" => params.include_headers = false,
            "--subjects" => params.subjects = true,
            "--timeout" => {
                let v: u64 = args.next().ok_or("Missing value for --timeout")?.parse()?;
                params.timeout = Duration::from_secs(v); }
            "--no-track" => params.no_track = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    Ok(params)
}

/* ---------------- Console progress sink ---------------- */

struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        eprintln!("Augmenting {total} rows…");
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn row_done(&mut self, subject: &str, margin: Option<i32>) {
        match margin {
            Some(m) => eprintln!("  {subject}: {m}"),
            None => eprintln!("  {subject}: skipped"),
        }
    }
}
