mod config;
mod error;
mod layout;
mod pdf;
mod thumbnail;
mod video;

use anyhow::{anyhow, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use config::{Dimension, Layout};
use pdf::{create_tag_sheet, save_tag_sheet};
use thumbnail::HttpThumbnails;

/// Convert YouTube URLs to a printable sheet of QR code tags.
///
/// Lengths accept a unit suffix (mm, cm, in, pt); bare numbers are points.
#[derive(Parser, Debug)]
#[command(name = "tag_creator")]
#[command(about = "Convert YouTube URLs to QR code tags", long_about = None)]
struct Args {
    /// YouTube URLs, one tag each, placed in order
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// Output PDF file
    #[arg(short, long, default_value = "pdffile.pdf")]
    output: PathBuf,

    #[arg(long, default_value = "25 mm")]
    tag_width: Dimension,

    #[arg(long, default_value = "25 mm")]
    tag_height: Dimension,

    /// Space around and between tags
    #[arg(long, default_value = "5 mm")]
    margin: Dimension,

    /// Stroke width of the tag outlines
    #[arg(long, default_value = "0.2 mm")]
    line_width: Dimension,

    #[arg(long, default_value = "504")]
    page_width: Dimension,

    #[arg(long, default_value = "568")]
    page_height: Dimension,

    /// Also save every cropped thumbnail as PNG into this directory
    #[arg(long, value_name = "DIR")]
    dump_thumbnails: Option<PathBuf>,
}

impl Args {
    fn layout(&self) -> Layout {
        Layout {
            tag_width: self.tag_width,
            tag_height: self.tag_height,
            margin: self.margin,
            line_width: self.line_width,
            page_width: self.page_width,
            page_height: self.page_height,
        }
    }
}

fn run(args: Args) -> Result<()> {
    if let Some(dir) = &args.dump_thumbnails {
        if !dir.is_dir() {
            return Err(anyhow!("Thumbnail directory not found: {:?}", dir));
        }
    }

    let layout = args.layout();
    info!("Creating {} tags", args.urls.len());

    let source = HttpThumbnails::new();
    let mut doc = create_tag_sheet(&args.urls, &layout, &source, args.dump_thumbnails.as_deref())?;

    save_tag_sheet(&mut doc, &args.output)?;
    info!("Successfully saved {:?} with {} tags", args.output, args.urls.len());

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        for cause in e.chain().skip(1) {
            eprintln!("Caused by: {}", cause);
        }
        std::process::exit(1);
    }
}
