//! CLI tool for virtgrid - renders one table frame and outputs JSON
//!
//! Usage:
//!   virtgrid_cli <rows.json> <columns.json>                      # 800x600 frame
//!   virtgrid_cli <rows.json> <columns.json> --width 1200 --sort name
//!   virtgrid_cli <rows.json> <columns.json> --scroll-top 4000 -o frame.json
//!
//! Options: --width W, --height H, --scroll-left X, --scroll-top Y,
//! --sort KEY, --desc, --fixed-rows N, --fixed-columns N, -o FILE

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};
use std::str::FromStr;

use virtgrid::table::{TableConfig, TableController};
use virtgrid::{ColumnDef, Row, SortDirection};

const USAGE: &str = "Usage: virtgrid_cli <rows.json> <columns.json> [--width W] [--height H] \
[--scroll-left X] [--scroll-top Y] [--sort KEY] [--desc] [--fixed-rows N] [--fixed-columns N] \
[-o output.json]";

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn parse_arg<T: FromStr>(flag: &str, value: Option<&String>) -> T {
    match value.map(|v| v.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => fail(&format!("{flag} expects a number\n{USAGE}")),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => fail(&format!("Error reading {path}: {e}")),
    };
    match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(e) => fail(&format!("Error parsing {path}: {e}")),
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        fail(USAGE);
    }

    let mut width = 800.0;
    let mut height = 600.0;
    let mut scroll_left = 0.0;
    let mut scroll_top = 0.0;
    let mut output_path: Option<String> = None;
    let mut config = TableConfig::default();

    let mut i = 3;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--width" => width = parse_arg("--width", value),
            "--height" => height = parse_arg("--height", value),
            "--scroll-left" => scroll_left = parse_arg("--scroll-left", value),
            "--scroll-top" => scroll_top = parse_arg("--scroll-top", value),
            "--fixed-rows" => config.fixed_row_count = parse_arg("--fixed-rows", value),
            "--fixed-columns" => config.fixed_column_count = parse_arg("--fixed-columns", value),
            "--sort" => {
                config.sort_by = Some(value.cloned().unwrap_or_else(|| fail(USAGE)));
                config.sort_direction.get_or_insert(SortDirection::Asc);
            }
            "--desc" => {
                config.sort_direction = Some(SortDirection::Desc);
                i += 1;
                continue;
            }
            "-o" => output_path = Some(value.cloned().unwrap_or_else(|| fail(USAGE))),
            other => fail(&format!("Unknown option {other}\n{USAGE}")),
        }
        i += 2;
    }

    let rows: Vec<Row> = read_json(&args[1]);
    let columns: Vec<ColumnDef> = read_json(&args[2]);

    let mut table = TableController::with_data(config, rows, columns);
    table.set_size(width, height);
    table.scroll_to(scroll_left, scroll_top);
    let view = table.render();

    let json = match serde_json::to_string_pretty(&view) {
        Ok(j) => j,
        Err(e) => fail(&format!("Error serializing JSON: {e}")),
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                fail(&format!("Error writing {path}: {e}"));
            }
            eprintln!("Wrote {} cells to {path}", view.cell_count());
        }
        None => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{json}") {
                fail(&format!("Error writing output: {e}"));
            }
        }
    }
}
