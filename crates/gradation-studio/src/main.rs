use std::io::Read as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

use gradation_engine::coords::{Rect, Vec2};
use gradation_engine::logging::{LoggingConfig, init_logging};
use gradation_engine::paint::{DEFAULT_STEPS, Gradation, Rgba8, sample_colors};
use gradation_ui::{EditorLayout, GradationEditor, UiEvent};

#[derive(Parser, Debug)]
#[command(author, version, about, arg_required_else_help = true)]
struct Cli {
    /// Log filter in `env_logger` syntax, e.g. `debug` or `gradation_ui=trace`.
    #[arg(long = "log", global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the interpolated color at each position.
    At {
        /// Gradation JSON file, or `-` for stdin.
        file: PathBuf,
        /// Positions along the gradient, normally 0..=1.
        #[arg(required = true, allow_negative_numbers = true)]
        positions: Vec<f32>,
    },
    /// Print an evenly sampled palette.
    Sample {
        /// Gradation JSON file, or `-` for stdin.
        file: PathBuf,
        #[arg(long, short = 'n', default_value_t = DEFAULT_STEPS)]
        steps: usize,
        #[arg(long, short = 'f', value_enum, default_value_t = PaletteFormat::Hex)]
        format: PaletteFormat,
    },
    /// Print the CSS preview background.
    Css {
        /// Gradation JSON file, or `-` for stdin.
        file: PathBuf,
    },
    /// Replay pointer events against an editor and print the resulting gradation.
    Replay {
        /// Gradation JSON file, or `-` for stdin.
        file: PathBuf,
        /// JSON array of `{"kind": "down"|"move"|"up", "x": .., "y": ..}`.
        script: PathBuf,
        #[arg(long)]
        max_stops: Option<usize>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PaletteFormat {
    /// One `#rrggbbaa` per line.
    Hex,
    /// One decimal `0xRRGGBBAA` integer per line.
    U32,
    /// A JSON array of integers.
    Json,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
enum PointerKind {
    Down,
    Move,
    Up,
}

#[derive(Deserialize, Debug)]
struct ScriptedPointer {
    kind: PointerKind,
    x: f32,
    y: f32,
}

impl From<&ScriptedPointer> for UiEvent {
    fn from(p: &ScriptedPointer) -> Self {
        let pos = Vec2::new(p.x, p.y);
        match p.kind {
            PointerKind::Down => UiEvent::PointerDown { pos },
            PointerKind::Move => UiEvent::PointerMove { pos },
            PointerKind::Up => UiEvent::PointerUp { pos },
        }
    }
}

/// Replay track: 400 px wide, 15 px tall at the origin.
const REPLAY_TRACK: Rect = Rect::new(0.0, 0.0, 400.0, 15.0);

fn main() {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::default();
    if let Some(filter) = &cli.log {
        logging = logging.with_filter(filter.clone());
    }
    init_logging(logging);

    if let Err(e) = run(cli.command) {
        log::error!("{e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::At { file, positions } => {
            let gradation = load_gradation(&file)?;
            for p in positions {
                let color = gradation
                    .color_at(p)
                    .with_context(|| format!("resolving position {p}"))?;
                println!("{p}\t{color}");
            }
        }
        Command::Sample { file, steps, format } => {
            let gradation = load_gradation(&file)?;
            let palette = sample_colors(&gradation, steps).context("sampling gradation")?;
            print_palette(&palette, format)?;
        }
        Command::Css { file } => {
            let gradation = load_gradation(&file)?;
            println!("{}", gradation.to_css());
        }
        Command::Replay { file, script, max_stops } => {
            let gradation = load_gradation(&file)?;
            let text = read_source(&script)?;
            let events: Vec<ScriptedPointer> = serde_json::from_str(&text)
                .with_context(|| format!("parsing pointer script {}", script.display()))?;

            let mut editor = GradationEditor::new(&gradation)
                .layout(EditorLayout::with_track(REPLAY_TRACK))
                .max_stops(max_stops)
                .on_change(|g| log::info!("changed: {} stops", g.len()));
            for (i, ev) in events.iter().enumerate() {
                let result = editor.on_event(&UiEvent::from(ev));
                log::debug!("event {i} {ev:?} -> {result:?}");
            }
            if editor.capture().is_captured() {
                log::warn!("script ended mid-drag; last committed position stands");
            }
            println!("{}", serde_json::to_string_pretty(&editor.gradation())?);
        }
    }
    Ok(())
}

fn print_palette(palette: &[Rgba8], format: PaletteFormat) -> Result<()> {
    match format {
        PaletteFormat::Hex => palette.iter().for_each(|c| println!("{c}")),
        PaletteFormat::U32 => palette.iter().for_each(|c| println!("{}", c.to_u32())),
        PaletteFormat::Json => {
            let packed: Vec<u32> = palette.iter().map(|c| c.to_u32()).collect();
            println!("{}", serde_json::to_string(&packed)?);
        }
    }
    Ok(())
}

fn load_gradation(path: &Path) -> Result<Gradation> {
    let text = read_source(path)?;
    let gradation: Gradation = serde_json::from_str(&text)
        .with_context(|| format!("parsing gradation {}", path.display()))?;
    if gradation.is_empty() {
        bail!("gradation {} has no color stops", path.display());
    }
    log::debug!("loaded {} stops from {}", gradation.len(), path.display());
    Ok(gradation)
}

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_entries_become_ui_events() {
        let events: Vec<ScriptedPointer> = serde_json::from_str(
            r#"[{"kind":"down","x":1,"y":2},{"kind":"move","x":3,"y":4},{"kind":"up","x":5,"y":6}]"#,
        )
        .unwrap();
        let ui: Vec<UiEvent> = events.iter().map(UiEvent::from).collect();
        assert_eq!(
            ui,
            vec![
                UiEvent::PointerDown { pos: Vec2::new(1.0, 2.0) },
                UiEvent::PointerMove { pos: Vec2::new(3.0, 4.0) },
                UiEvent::PointerUp { pos: Vec2::new(5.0, 6.0) },
            ]
        );
    }

    #[test]
    fn bundled_script_removes_then_adds() {
        let gradation: Gradation =
            serde_json::from_str(include_str!("../data/sunset.json")).unwrap();
        let events: Vec<ScriptedPointer> =
            serde_json::from_str(include_str!("../data/drag-out.json")).unwrap();

        let mut editor = GradationEditor::new(&gradation)
            .layout(EditorLayout::with_track(REPLAY_TRACK));
        for ev in &events {
            editor.on_event(&UiEvent::from(ev));
        }

        let positions: Vec<f32> = editor.gradation().iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 0.25, 0.8, 1.0]);
        assert_eq!(editor.gradation()[1].color, Rgba8::WHITE);
    }

    #[test]
    fn cli_parses_sample_flags() {
        let cli = Cli::try_parse_from(["gradation-studio", "sample", "-", "-n", "4", "-f", "u32"]).unwrap();
        match cli.command {
            Command::Sample { steps, format, .. } => {
                assert_eq!(steps, 4);
                assert_eq!(format, PaletteFormat::U32);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
