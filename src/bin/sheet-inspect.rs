use anyhow::Context;
use clap::Parser;
use glyphsheet::config::storage::JsonStorageAdapter;
use glyphsheet::config::{config, config_store_write};
use glyphsheet::prelude::*;
use prettytable::{Attr, Cell, Row, Table};
use simple_logger::SimpleLogger;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(name = "sheet-inspect", version = "0.1.0", about = "Inspect a sprite-sheet font")]
struct Cli {
    /// Sheet image to inspect
    sheet: PathBuf,

    /// Text to measure
    #[clap(short = 't', long = "text")]
    text: Option<String>,

    /// Also list reserved (empty) glyph slots
    #[clap(short = 'a', long = "all")]
    all: bool,

    /// Json file with settings
    #[clap(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[clap(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let level = if args.debug { log::LevelFilter::Debug } else { log::LevelFilter::Warn };
    SimpleLogger::new().with_level(level).init()?;

    if let Some(path) = &args.config {
        let storage = JsonStorageAdapter::try_from(path.as_path())?;
        config_store_write().set_storage(Box::new(storage));
    }

    let font = load_cached(&args.sheet).with_context(|| format!("cannot load {}", args.sheet.display()))?;

    let show_empty = args.all || config!(bool "inspect.show_empty");
    render_table(&font, show_empty);

    let text = args.text.unwrap_or_else(|| config!(string "inspect.sample_text"));
    let table = font.table();

    println!();
    println!("Glyph slots : {}", table.len());
    println!("Line height : {}", font.height());
    match table.fallback() {
        Some(rect) => println!("Fallback    : {}x{} at {},{}", rect.width, rect.height, rect.x, rect.y),
        None => println!("Fallback    : none"),
    }
    println!("Text width  : {} ({text:?})", font.text_length(&text));

    Ok(())
}

fn render_table(font: &SheetFont, show_empty: bool) {
    let mut table = Table::new();
    table.set_format(*prettytable::format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(vec![
        Cell::new("Code").with_style(Attr::Bold),
        Cell::new("Char").with_style(Attr::Bold),
        Cell::new("X").with_style(Attr::Bold),
        Cell::new("Y").with_style(Attr::Bold),
        Cell::new("Width").with_style(Attr::Bold),
        Cell::new("Height").with_style(Attr::Bold),
    ]));

    for (code_point, rect) in font.table().iter() {
        if rect.is_empty() && !show_empty {
            continue;
        }

        let ch = char::from_u32(code_point)
            .filter(|c| !c.is_control())
            .map_or_else(|| "-".to_string(), |c| c.to_string());

        if rect.is_empty() {
            table.add_row(Row::new(vec![
                Cell::new(&format!("U+{code_point:04X}")),
                Cell::new(&ch),
                Cell::new("reserved"),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
            ]));
            continue;
        }

        table.add_row(Row::new(vec![
            Cell::new(&format!("U+{code_point:04X}")),
            Cell::new(&ch),
            Cell::new(&rect.x.to_string()),
            Cell::new(&rect.y.to_string()),
            Cell::new(&rect.width.to_string()),
            Cell::new(&rect.height.to_string()),
        ]));
    }

    table.printstd();
}
