use clap::Parser;
use pcb_scene::camera::{self, CameraPose};
use pcb_scene::scene::{self, Light, Offset, RenderPrimitive, Scene};
use pcb_scene::{read_board, read_board_bytes, DocumentFormat};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pcb-scene", about = "Build a 3D scene description from a board document")]
struct Cli {
    /// Input board document (.json, .xlsx)
    input: PathBuf,

    /// Output JSON file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override auto-detected format (json, xlsx)
    #[arg(short, long)]
    format: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Shift every component along X before building
    #[arg(long, default_value = "")]
    dx: String,

    /// Shift every component along Y before building
    #[arg(long, default_value = "")]
    dy: String,

    /// Shift every component along Z before building
    #[arg(long, default_value = "")]
    dz: String,
}

/// Everything a renderer needs to draw the board, as plain data.
#[derive(Serialize)]
struct SceneSummary {
    board: String,
    camera: CameraPose,
    lights: Vec<Light>,
    scenery: Vec<RenderPrimitive>,
    primitives: Vec<RenderPrimitive>,
}

fn parse_format(s: &str) -> Result<DocumentFormat, String> {
    match s.to_lowercase().as_str() {
        "json" => Ok(DocumentFormat::Json),
        "xlsx" => Ok(DocumentFormat::Xlsx),
        _ => Err(format!("Unknown format: {s}. Use: json, xlsx")),
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = if let Some(fmt_str) = &cli.format {
        let format = match parse_format(fmt_str) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        };
        let data = match std::fs::read(&cli.input) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Error reading file: {e}");
                std::process::exit(1);
            }
        };
        read_board_bytes(&data, format)
    } else {
        read_board(&cli.input)
    };

    match result {
        Ok(board) => {
            let mut scene = Scene::build(&board);
            let offset = Offset::from_text(&cli.dx, &cli.dy, &cli.dz);
            if offset != Offset::default() {
                scene.apply_offset(&board.components, offset);
            }

            let summary = SceneSummary {
                board: board.name.clone(),
                camera: camera::frame_board(&board.dimensions),
                lights: scene::lights(),
                scenery: scene.scenery().to_vec(),
                primitives: scene.primitives().to_vec(),
            };
            let json = if cli.pretty {
                serde_json::to_string_pretty(&summary)
            } else {
                serde_json::to_string(&summary)
            }
            .expect("JSON serialization failed");

            if let Some(output_path) = cli.output {
                std::fs::write(&output_path, &json).expect("Failed to write output file");
                eprintln!("Written to {}", output_path.display());
            } else {
                println!("{json}");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
