use clap::{Args, Parser, Subcommand};
use partforge::progress::AnimStyle;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "partforge")]
#[command(author, version, about = "Split large media files into size-bounded parts")]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a single file into size-bounded parts
    Split(SplitArgs),

    /// Split every video file under a folder
    Batch(BatchArgs),

    /// Probe a media file and display information
    Probe {
        /// File to probe
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,
}

#[derive(Args)]
pub struct SplitArgs {
    /// Input file to split
    #[arg(required = true)]
    pub input: PathBuf,

    /// Maximum size per part, e.g. 2G, 700m, 1.5gb
    #[arg(long, default_value = "2G")]
    pub size_limit: String,

    /// Directory receiving the parts
    #[arg(long, default_value = "splits")]
    pub outdir: PathBuf,

    /// Base name for part files (defaults to the input file stem)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Print the plan without cutting anything
    #[arg(long)]
    pub simulate: bool,

    /// Re-encode video and audio instead of stream copying
    #[arg(long)]
    pub reencode: bool,

    /// Target video bitrate when re-encoding, e.g. 2.5m
    #[arg(long)]
    pub video_bitrate: Option<String>,

    /// Target audio bitrate when re-encoding
    #[arg(long, default_value = "128k")]
    pub audio_bitrate: String,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Folder to scan for video files
    #[arg(required = true)]
    pub folder: PathBuf,

    /// Maximum size per part, e.g. 2G, 700m
    #[arg(long, default_value = "2G")]
    pub size_limit: String,

    /// Root directory receiving mirrored output folders
    #[arg(long, default_value = "splits")]
    pub outroot: PathBuf,

    /// Recurse into subdirectories
    #[arg(long)]
    pub recursive: bool,

    /// Skip files whose first part already exists
    #[arg(long)]
    pub skip_existing: bool,

    /// Parallel jobs (0 = one per CPU core)
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// Spinner style shown while cutting
    #[arg(long, value_enum, default_value = "dots")]
    pub anim: AnimStyle,
}
