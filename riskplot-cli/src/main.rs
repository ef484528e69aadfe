mod replay;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{error, info};
use riskplot_chart::config::ChartConfig;
use riskplot_chart::data::Dataset;
use riskplot_chart::fields::FieldSelection;
use riskplot_chart::scene::ChartState;
use riskplot_scenegraph::scene_graph::SceneGraph;
use riskplot_svg::scene_graph_to_svg;

use crate::replay::Replay;

/// Step used to run transitions to completion when no frames are kept
const SETTLE_STEP: Duration = Duration::from_millis(50);

/// Health risk scatter plot renderer
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the chart after replaying label clicks
    Save {
        /// Path to the CSV dataset
        csv: PathBuf,

        /// Output path, SVG or PNG by extension (defaults to the CSV path with .svg)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field label to click, such as `income` or `smokes`. Repeatable.
        #[arg(long = "click")]
        clicks: Vec<FieldSelection>,

        /// JSON file overriding the chart layout and styling
        #[arg(long)]
        config: Option<PathBuf>,

        /// Scale factor for PNG output
        #[arg(short, long, default_value_t = 2.0)]
        scale: f32,
    },

    /// Write one SVG per frame of the transitions caused by label clicks
    Frames {
        /// Path to the CSV dataset
        csv: PathBuf,

        /// Field label to click. Each click runs its transition to the end.
        #[arg(long = "click", required = true)]
        clicks: Vec<FieldSelection>,

        /// Directory for the frame files
        #[arg(short, long)]
        output: PathBuf,

        /// Frames per second of the written sequence
        #[arg(long, default_value_t = 30)]
        fps: u32,

        /// JSON file overriding the chart layout and styling
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the scene graph as JSON after replaying label clicks
    Scene {
        /// Path to the CSV dataset
        csv: PathBuf,

        /// Field label to click. Repeatable.
        #[arg(long = "click")]
        clicks: Vec<FieldSelection>,

        /// JSON file overriding the chart layout and styling
        #[arg(long)]
        config: Option<PathBuf>,

        /// Indent the JSON
        #[arg(long)]
        pretty: bool,
    },
}

fn load_state(csv: &Path, config: Option<&Path>) -> anyhow::Result<ChartState> {
    let config = match config {
        Some(path) => ChartConfig::from_json_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => ChartConfig::default(),
    };
    let dataset = Dataset::load_csv(csv)
        .with_context(|| format!("Failed to load dataset {}", csv.display()))?;
    Ok(ChartState::try_new(Arc::new(dataset), config)?)
}

/// Replay every click, letting each transition finish, and return the last frame
fn final_scene(state: ChartState, clicks: &[FieldSelection]) -> anyhow::Result<Arc<SceneGraph>> {
    let mut replay = Replay::new(state)?;
    for selection in clicks {
        replay.click(*selection)?;
        replay.settle(SETTLE_STEP)?;
    }
    Ok(replay.scene_graph().clone())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Ok(())
}

fn save(
    csv: &Path,
    output: Option<PathBuf>,
    clicks: &[FieldSelection],
    config: Option<&Path>,
    scale: f32,
) -> anyhow::Result<()> {
    let state = load_state(csv, config)?;
    let scene_graph = final_scene(state, clicks)?;
    let svg = scene_graph_to_svg(&scene_graph)?;

    let output = output.unwrap_or_else(|| csv.with_extension("svg"));
    ensure_parent_dir(&output)?;
    let is_png = output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_png {
        let png = riskplot_svg::png::svg_to_png(&svg, scale)?;
        fs::write(&output, png)?;
        info!("Saved PNG to {}", output.display());
    } else {
        fs::write(&output, svg)?;
        info!("Saved SVG to {}", output.display());
    }
    Ok(())
}

fn frames(
    csv: &Path,
    clicks: &[FieldSelection],
    output: &Path,
    fps: u32,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    if fps == 0 {
        anyhow::bail!("--fps must be positive");
    }
    let state = load_state(csv, config)?;
    let frame_interval = Duration::from_secs(1) / fps;
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create directory {}", output.display()))?;

    let mut replay = Replay::new(state)?;
    let mut written = 0usize;
    let mut write_frame = |scene_graph: &SceneGraph| -> anyhow::Result<()> {
        let path = output.join(format!("frame_{written:04}.svg"));
        fs::write(&path, scene_graph_to_svg(scene_graph)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written += 1;
        Ok(())
    };

    write_frame(replay.scene_graph())?;
    for selection in clicks {
        replay.click(*selection)?;
        for scene_graph in replay.settle(frame_interval)? {
            write_frame(&scene_graph)?;
        }
    }
    info!("Wrote {written} frames to {}", output.display());
    Ok(())
}

fn scene(
    csv: &Path,
    clicks: &[FieldSelection],
    config: Option<&Path>,
    pretty: bool,
) -> anyhow::Result<()> {
    let state = load_state(csv, config)?;
    let scene_graph = final_scene(state, clicks)?;
    let json = if pretty {
        serde_json::to_string_pretty(scene_graph.as_ref())?
    } else {
        serde_json::to_string(scene_graph.as_ref())?
    };
    println!("{json}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Save {
            csv,
            output,
            clicks,
            config,
            scale,
        } => save(&csv, output, &clicks, config.as_deref(), scale),
        Commands::Frames {
            csv,
            clicks,
            output,
            fps,
            config,
        } => frames(&csv, &clicks, &output, fps, config.as_deref()),
        Commands::Scene {
            csv,
            clicks,
            config,
            pretty,
        } => scene(&csv, &clicks, config.as_deref(), pretty),
    };
    if let Err(err) = &result {
        error!("{err:#}");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use riskplot_chart::fields::{XField, YField};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_clicks() {
        let cli = Cli::try_parse_from([
            "riskplot", "save", "data.csv", "--click", "income", "--click", "Smokes", "-o", "out.png",
        ])
        .unwrap();
        let Commands::Save { clicks, output, scale, .. } = cli.command else {
            panic!("expected save");
        };
        assert_eq!(
            clicks,
            vec![FieldSelection::X(XField::Income), FieldSelection::Y(YField::Smokes)]
        );
        assert_eq!(output, Some(PathBuf::from("out.png")));
        assert_eq!(scale, 2.0);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Cli::try_parse_from(["riskplot", "save", "data.csv", "--click", "height"]).is_err());
        assert!(Cli::try_parse_from(["riskplot", "frames", "data.csv", "-o", "out"]).is_err());
    }

    #[test]
    fn test_missing_csv_reports_cause_once() {
        let err = load_state(Path::new("no/such/data.csv"), None).unwrap_err();
        let cause = err.root_cause().to_string();
        let message = format!("{err:#}");
        assert!(message.starts_with("Failed to load dataset no/such/data.csv: Failed to read data: "));
        assert_eq!(message.matches(&cause).count(), 1);
    }

    #[test]
    fn test_final_scene_after_clicks() {
        let csv = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../riskplot-chart/tests/data/data.csv");
        let state = load_state(&csv, None).unwrap();
        let scene_graph = final_scene(state, &[FieldSelection::Y(YField::Healthcare)]).unwrap();
        let svg = scene_graph_to_svg(&scene_graph).unwrap();
        assert!(svg
            .lines()
            .any(|l| l.contains(r#"font-weight="bold""#) && l.ends_with(">Lack Healthcare (%)</text>")));
    }
}
