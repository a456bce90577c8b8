use std::path::PathBuf;

use chessgrid::{
    adapter, corners_io,
    dataset::{self, DatasetParams},
    square_name_at, ExtractParams, GridParams, WarpParams,
};
use chessgrid_board::{extract_squares, warp_board_canonical};
use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser)]
#[command(
    name = "chessgrid",
    about = "Rectify chessboard photos and extract per-square crops",
    version
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Warp a photo to a top-down board view
    Warp {
        /// Input photograph
        image: PathBuf,
        /// Corner JSON file (list of four [x, y] pairs)
        corners: PathBuf,
        /// Output image path
        #[arg(long, default_value = "topdown.png")]
        output: PathBuf,
        /// Side of the square top-down view
        #[arg(long, default_value_t = 800)]
        out_size: usize,
        /// Also write the 3x3 homography (row-major JSON)
        #[arg(long)]
        homography: Option<PathBuf>,
    },
    /// Extract the 64 square crops, named by algebraic square
    Split {
        image: PathBuf,
        corners: PathBuf,
        /// Directory for the 64 crops
        #[arg(long, default_value = "squares")]
        out_dir: PathBuf,
        #[arg(long, default_value_t = 800)]
        out_size: usize,
        /// Pixels shaved off each crop edge
        #[arg(long, default_value_t = 2)]
        pad: usize,
        /// Rotate 180 degrees regardless of the a1 darkness check
        #[arg(long)]
        force_flip: bool,
    },
    /// Build a labeled training dataset from annotated photos
    BuildDataset {
        /// Single image path (with --corners and --fen)
        #[arg(long)]
        image: Option<PathBuf>,
        /// Corner JSON for --image
        #[arg(long)]
        corners: Option<PathBuf>,
        /// FEN piece placement for --image
        #[arg(long)]
        fen: Option<String>,
        /// Folder of input images (with --corners-dir and --fen-file)
        #[arg(long)]
        folder: Option<PathBuf>,
        /// Folder with per-image corner JSONs
        #[arg(long)]
        corners_dir: Option<PathBuf>,
        /// Text file with one `filename,FEN` record per line
        #[arg(long)]
        fen_file: Option<PathBuf>,
        /// Dataset root; crops land under `<root>/raw/<label>/`
        #[arg(long)]
        dataset_root: PathBuf,
        /// Side of the resized square crops
        #[arg(long, default_value_t = 96)]
        img_size: u32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    chessgrid_core::init_with_level(level)?;

    match cli.command {
        Command::Warp {
            image,
            corners,
            output,
            out_size,
            homography,
        } => {
            let img = adapter::load_rgb(&image)?;
            let corner_set = corners_io::load_corners(&corners)?;
            let rectified = warp_board_canonical(&img, &corner_set, &WarpParams { out_size })?;
            adapter::save_rgb(&output, &rectified.topdown)?;
            println!("wrote top-down view to {}", output.display());

            if let Some(path) = homography {
                let json = serde_json::to_string_pretty(&rectified.h_board_from_img.to_array())?;
                std::fs::write(&path, json)?;
                println!("wrote homography to {}", path.display());
            }
        }
        Command::Split {
            image,
            corners,
            out_dir,
            out_size,
            pad,
            force_flip,
        } => {
            let img = adapter::load_rgb(&image)?;
            let corner_set = corners_io::load_corners(&corners)?;
            let params = ExtractParams {
                warp: WarpParams { out_size },
                grid: GridParams { pad },
                force_flip,
            };
            let out = extract_squares(&img, corner_set.points(), &params)?;

            std::fs::create_dir_all(&out_dir)?;
            for (i, square) in out.grid.iter().enumerate() {
                let path = out_dir.join(format!("{}.png", square_name_at(i)));
                adapter::save_rgb(&path, square)?;
            }
            println!("wrote 64 squares to {}", out_dir.display());
        }
        Command::BuildDataset {
            image,
            corners,
            fen,
            folder,
            corners_dir,
            fen_file,
            dataset_root,
            img_size,
        } => {
            let params = DatasetParams {
                img_size,
                ..DatasetParams::default()
            };
            let out_root = dataset_root.join("raw");

            if let Some(image) = image {
                let (corners, fen) = match (corners, fen) {
                    (Some(c), Some(f)) => (c, f),
                    _ => {
                        return Err(
                            "single-image mode needs --image, --corners and --fen".into()
                        )
                    }
                };
                let written = dataset::process_one(&image, &corners, &fen, &out_root, &params)?;
                println!("{} -> {written} squares saved", image.display());
                return Ok(());
            }

            let (folder, corners_dir, fen_file) = match (folder, corners_dir, fen_file) {
                (Some(a), Some(b), Some(c)) => (a, b, c),
                _ => {
                    return Err(
                        "folder mode needs --folder, --corners-dir and --fen-file".into()
                    )
                }
            };
            let summary =
                dataset::build_from_folder(&folder, &corners_dir, &fen_file, &out_root, &params)?;
            println!(
                "dataset build complete: {} processed, {} skipped",
                summary.processed, summary.skipped
            );
        }
    }

    Ok(())
}
