//! # `cnf2img`
//!
//! A small tool for drawing DIMACS CNF files as grayscale and color BMP images
//! and raw binary dumps.
//!
//! Usage: cnf2img <cnf file> [output base name] [dimension]

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use cnf2img::pipeline::{self, Options, OutputPaths};
use image::imageops::FilterType;
use log::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The DIMACS CNF input file
    in_path: PathBuf,
    /// The base name of the output files. Extensions such as `.original.bmp`
    /// and `.bin` are appended to it.
    #[arg(default_value = OutputPaths::DEFAULT_BASE)]
    out_base: PathBuf,
    /// Additionally write images resized to a `dimension`x`dimension` square
    /// and the binary dumps of the resized images
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    dimension: Option<u32>,
    /// The interpolation used for resizing
    #[arg(long, value_enum, default_value_t = Filter::Triangle)]
    filter: Filter,
    /// Which encodings to write
    #[arg(long, value_enum, default_value_t = Modes::Both)]
    mode: Modes,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Filter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<Filter> for FilterType {
    fn from(value: Filter) -> Self {
        match value {
            Filter::Nearest => FilterType::Nearest,
            Filter::Triangle => FilterType::Triangle,
            Filter::CatmullRom => FilterType::CatmullRom,
            Filter::Gaussian => FilterType::Gaussian,
            Filter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Modes {
    Gray,
    Color,
    Both,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let opts = Options {
        gray: args.mode != Modes::Color,
        color: args.mode != Modes::Gray,
        dimension: args.dimension,
        filter: args.filter.into(),
    };

    let written = pipeline::convert_file(&args.in_path, &OutputPaths::new(args.out_base), &opts)
        .with_context(|| format!("error converting `{}`", args.in_path.display()))?;
    info!("generated {} files", written.len());
    Ok(())
}
