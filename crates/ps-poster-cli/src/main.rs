mod logger;

use anyhow::{Context, Result};
use clap::Parser;
use logger::StderrLogger;
use ps_poster::{PosterOptions, tile_positions, tile_viewport};
use std::path::PathBuf;

/// Resize a PostScript image to print on larger media and/or multiple sheets
#[derive(Parser)]
#[command(
    name = "poster",
    version,
    after_help = "<box> is like 'A4', '3x3letter', '10x25cm', '200x200+10,10p'\n\
                  <margin> is either a simple <box> or <number>%\n\
                  Defaults are '-m A4', '-c 5%', '-i <box>' read from the input file,\n\
                  and output written to stdout."
)]
struct Cli {
    /// Input PostScript file
    input: PathBuf,

    /// Be verbose (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Ask for manual feed on the printing device
    #[arg(short = 'f', long)]
    manual_feed: bool,

    /// Input image size <box>, instead of the file's %%BoundingBox
    #[arg(short, long, value_name = "BOX")]
    image: Option<String>,

    /// Horizontal and vertical cut margin
    #[arg(short, long, value_name = "MARGIN")]
    cut_margin: Option<String>,

    /// Additional white margin around the poster
    #[arg(short, long, value_name = "MARGIN")]
    white_margin: Option<String>,

    /// Media paper size, in portrait format
    #[arg(short, long, value_name = "BOX")]
    media: Option<String>,

    /// Output poster size
    #[arg(short, long, value_name = "BOX")]
    poster: Option<String>,

    /// Linear scale factor for the poster
    #[arg(short, long, value_name = "NUMBER")]
    scale: Option<String>,

    /// Write the poster to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Load base options from a JSON file; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Save the effective options to a JSON file
    #[arg(long, value_name = "FILE")]
    save_config: Option<PathBuf>,

    /// Add an %%Orientation comment to the output header
    #[arg(long)]
    orientation_comment: bool,

    /// Inputs larger than this are reopened for every tile
    #[arg(long, value_name = "BYTES")]
    max_buffer_bytes: Option<u64>,

    /// Show the computed layout only, don't write a poster
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Overlay the flags that were given onto `options`
    fn apply(&self, options: &mut PosterOptions) -> Result<()> {
        options.input_file = self.input.clone();

        if let Some(image) = &self.image {
            options.image = Some(image.clone());
        }
        if let Some(cut_margin) = &self.cut_margin {
            options.cut_margin = cut_margin.clone();
        }
        if let Some(white_margin) = &self.white_margin {
            options.white_margin = white_margin.clone();
        }
        if let Some(media) = &self.media {
            options.media = media.clone();
        }
        if let Some(poster) = &self.poster {
            options.poster = Some(poster.clone());
        }
        if let Some(scale) = &self.scale {
            let value = scale
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Illegal scale value {}", scale))?;
            options.scale = Some(value);
        }
        if let Some(limit) = self.max_buffer_bytes {
            options.max_buffered_bytes = limit;
        }
        options.manual_feed |= self.manual_feed;
        options.orientation_comment |= self.orientation_comment;
        Ok(())
    }
}

/// Parse arguments; usage errors exit with status 1
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = parse_cli();
    StderrLogger::from_verbosity(cli.verbose).init()?;

    let mut options = match &cli.config {
        Some(path) => PosterOptions::load(path)
            .await
            .with_context(|| format!("Cannot read options from '{}'", path.display()))?,
        None => PosterOptions::default(),
    };
    cli.apply(&mut options)?;

    if let Some(path) = &cli.save_config {
        options.save(path).await?;
        log::info!("Saved options to '{}'", path.display());
    }

    let config = options.resolve()?;
    let document = ps_poster::load_document(&config.input_file, config.max_buffered_bytes).await?;
    let job = ps_poster::prepare_job(&document, &config)?;

    let plan = &job.plan;
    if cli.dry_run {
        let image = job.image;
        let poster = plan.poster_box;
        println!("Poster Plan:");
        println!(
            "  Input image: [{}, {}, {}, {}]",
            image.x0, image.y0, image.x1, image.y1
        );
        println!(
            "  Grid: {} row(s) x {} column(s), {} sheet(s)",
            plan.rows,
            plan.columns,
            plan.tile_count()
        );
        println!("  Sheet orientation: {}", plan.sheet_orientation().label());
        println!("  Scale: {}", plan.scale);
        println!(
            "  Poster box: [{:.2}, {:.2}, {:.2}, {:.2}]",
            poster.x0, poster.y0, poster.x1, poster.y1
        );
        for pos in tile_positions(plan) {
            let view = tile_viewport(plan, pos);
            println!(
                "  Tile ({}, {}): [{:.2}, {:.2}, {:.2}, {:.2}]",
                pos.row, pos.col, view.x0, view.y0, view.x1, view.y1
            );
        }
        return Ok(());
    }

    let sheets = plan.tile_count();
    let output = cli.output.clone();
    ps_poster::save_poster(document, config, job, cli.output).await?;
    match output {
        Some(path) => log::info!("Poster of {} sheet(s) written to {}", sheets, path.display()),
        None => log::info!("Poster of {} sheet(s) written to stdout", sheets),
    }

    Ok(())
}
