//! Command dispatch for the `oldworld-ambitions` binary. Exit codes: 0 on
//! success, 1 on a failed run, 2 on a usage error.

use std::env;
use std::path::{Path, PathBuf};

use crate::data::dataset::{store_dataset, DEFAULT_DATASET_PATH};
use crate::data::extract::extract_dataset;
use crate::data::validate::validate_dataset_file;
use crate::server;
use crate::viewer::page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Extract,
    Serve,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("extract") => Some(Command::Extract),
        Some("serve") => Some(Command::Serve),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Extract) => handle_extract(args),
        Some(Command::Serve) => handle_serve(args),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("usage: oldworld-ambitions <extract|serve|validate>");
            eprintln!("  extract <game-xml-dir> <output-dir>");
            eprintln!("  serve [dataset.json]       (bind via AMBITIONS_BIND)");
            eprintln!("  validate [dataset.json]");
            2
        }
    }
}

fn handle_extract(args: &[String]) -> i32 {
    let (Some(input_dir), Some(output_dir)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: oldworld-ambitions extract <game-xml-dir> <output-dir>");
        return 2;
    };

    let (dataset, report) = match extract_dataset(Path::new(input_dir)) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("extraction failed: {err}");
            return 1;
        }
    };

    let output_dir = Path::new(output_dir);
    let dataset_path = output_dir.join("data").join("ambitions.json");
    if let Err(err) = store_dataset(&dataset, &dataset_path) {
        eprintln!("unable to write '{}': {err}", dataset_path.display());
        return 1;
    }
    let page_path = output_dir.join("index.html");
    if let Err(err) = std::fs::write(&page_path, page::viewer_page()) {
        eprintln!("unable to write '{}': {err}", page_path.display());
        return 1;
    }

    println!("{}", report.summary());
    println!("wrote {}", dataset_path.display());
    println!("wrote {}", page_path.display());
    0
}

fn handle_serve(args: &[String]) -> i32 {
    let dataset_path = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH));
    let bind_addr = env::var("AMBITIONS_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    match server::run_server(&bind_addr, &dataset_path) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let dataset_path = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH));
    let report = match validate_dataset_file(&dataset_path) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("validation failed: {err}");
            return 1;
        }
    };

    for diagnostic in &report.diagnostics {
        println!(
            "{}: {}: {}",
            diagnostic.severity, diagnostic.context, diagnostic.message
        );
    }
    if report.has_errors() {
        eprintln!("validation found errors");
        1
    } else {
        println!("dataset is valid ({} diagnostics)", report.diagnostics.len());
        0
    }
}
