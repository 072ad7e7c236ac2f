use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use astro_composite_rs::image_pipeline::{
    BandsToCompositePipeline, CompositeImage, CompositeSession, ControlPanel, DisplayParameters,
    ParameterControl, PipelineConfig,
};
use astro_composite_rs::logger;

/// Builds a false-color composite from three survey bands of one object.
#[derive(Parser)]
#[command(name = "astro_composite_rs", version, about)]
struct Cli {
    /// Object folder holding exactly three single-band FITS or TIFF files
    dir: PathBuf,

    /// Skip gap repair before normalization
    #[arg(long)]
    no_repair: bool,

    /// Upper clip percentile applied to each band
    #[arg(long, default_value_t = 99.0)]
    percentile: f32,

    /// Red channel gain
    #[arg(long)]
    red_gain: Option<f32>,

    /// Green channel gain
    #[arg(long)]
    green_gain: Option<f32>,

    /// Blue channel gain
    #[arg(long)]
    blue_gain: Option<f32>,

    /// Intensity ceiling
    #[arg(long)]
    ceiling: Option<f32>,

    /// Read `<control> <value>` updates from stdin and re-render after each
    #[arg(short, long)]
    interactive: bool,

    /// Log the per-step timing summary
    #[arg(long)]
    timings: bool,
}

fn report(image: &CompositeImage, params: &DisplayParameters) {
    let [r, g, b] = image.channel_means();
    info!(
        red_gain = params.red_gain,
        green_gain = params.green_gain,
        blue_gain = params.blue_gain,
        ceiling = params.ceiling,
        "Composite {}x{}: mean rgb=({:.4}, {:.4}, {:.4}), {:.2}% clipped",
        image.width,
        image.height,
        r,
        g,
        b,
        image.clipped_fraction(params.ceiling) * 100.0
    );
}

fn parse_update(line: &str) -> Result<(ParameterControl, f32)> {
    let mut parts = line.split_whitespace();
    let control: ParameterControl = parts
        .next()
        .context("missing control name")?
        .parse()?;
    let value: f32 = parts
        .next()
        .context("missing value")?
        .parse()
        .context("value is not a number")?;
    Ok((control, value))
}

fn main() -> Result<()> {
    logger::init();
    let cli = Cli::parse();

    info!("Starting astro_composite_rs...");

    let config = PipelineConfig::builder()
        .repair_gaps(!cli.no_repair)
        .clip_percentile(cli.percentile)
        .build();
    let pipeline = BandsToCompositePipeline::new(config);

    info!(
        "Gap repair: {}",
        if pipeline.config().repair_gaps {
            "enabled"
        } else {
            "disabled"
        }
    );

    let prepared = pipeline
        .prepare_dir(&cli.dir)
        .with_context(|| format!("failed to prepare bands from {}", cli.dir.display()))?;
    if cli.timings {
        prepared.timings.log_summary();
    }

    let mut session = CompositeSession::new(prepared.bands);
    let mut panel = ControlPanel::default();

    let initial = session.initial_render()?;
    report(&initial, &panel.current());

    let flag_updates = [
        (ParameterControl::RedGain, cli.red_gain),
        (ParameterControl::GreenGain, cli.green_gain),
        (ParameterControl::BlueGain, cli.blue_gain),
        (ParameterControl::Ceiling, cli.ceiling),
    ];
    if flag_updates.iter().any(|(_, v)| v.is_some()) {
        for (control, value) in flag_updates {
            if let Some(value) = value {
                panel.set(control, value);
            }
        }
        let params = panel.current();
        let image = session.on_parameter_change(params)?;
        report(&image, &params);
    }

    if !cli.interactive {
        return Ok(());
    }

    info!("Reading parameter updates, e.g. `red 1.5` or `ceiling 0.8`");
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("reset") {
            let params = panel.reset();
            report(&session.on_parameter_change(params)?, &params);
            continue;
        }

        match parse_update(line) {
            Ok((control, value)) => {
                let params = panel.set(control, value);
                if panel.value(control) != value {
                    warn!("{} clamped to {}", control, panel.value(control));
                }
                match session.on_parameter_change(params) {
                    Ok(image) => report(&image, &params),
                    Err(e) => warn!("Update rejected: {}", e),
                }
            }
            Err(e) => warn!("Ignoring '{}': {:#}", line, e),
        }
    }

    Ok(())
}
