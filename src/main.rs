mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{BatchArgs, Cli, Commands, SplitArgs};
use partforge::batch::{self, JobStatus};
use partforge::progress::{created_line, AnimStyle, AnimatedToolchain, Reporter};
use partforge_av::split::{CutStrategy, FfmpegToolchain, SplitRequest, Splitter};
use partforge_av::units::{
    estimate_size, estimated_part_count, format_bytes, parse_bitrate, parse_size,
};
use partforge_av::{probe, tools, CutMode, Error};
use std::path::Path;
use std::process;

/// Video bitrate used for re-encoding when none is given.
const DEFAULT_VIDEO_BPS: u64 = 2_500_000;

/// Process exit codes, one per failure class.
mod exit_codes {
    /// Bad configuration: missing tool, missing input, malformed size
    /// or bitrate.
    pub const CONFIG: i32 = 1;
    /// The source duration could not be determined.
    pub const UNPROBEABLE: i32 = 2;
    /// A stream-copy cut failed.
    pub const COPY_CUT: i32 = 3;
    /// A re-encode cut failed.
    pub const REENCODE_CUT: i32 = 4;
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<Error>() {
        Some(Error::ProbeFailed { .. }) | Some(Error::UnknownDuration { .. }) => {
            exit_codes::UNPROBEABLE
        }
        Some(Error::CutFailed {
            mode: CutMode::StreamCopy,
            ..
        }) => exit_codes::COPY_CUT,
        Some(Error::CutFailed {
            mode: CutMode::ReEncode,
            ..
        }) => exit_codes::REENCODE_CUT,
        _ => exit_codes::CONFIG,
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "partforge=debug,partforge_av=debug".to_string()
        } else {
            "partforge=info,partforge_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    let result = match cli.command {
        Commands::Split(args) => cmd_split(&args),
        Commands::Batch(args) => cmd_batch(&args),
        Commands::Probe { file, json } => cmd_probe(&file, json),
        Commands::CheckTools => cmd_check_tools(),
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        process::exit(exit_code_for(&err));
    }
}

fn cmd_split(args: &SplitArgs) -> Result<()> {
    tools::require_tool("ffprobe")?;
    tools::require_tool("ffmpeg")?;

    if !args.input.is_file() {
        return Err(Error::file_not_found(&args.input).into());
    }

    let limit_bytes = parse_size(&args.size_limit)?;
    let prefix = match &args.prefix {
        Some(prefix) => prefix.clone(),
        None => args
            .input
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned(),
    };

    let info = probe::probe_media(&args.input)?;
    if info.duration <= 0.0 {
        return Err(Error::unknown_duration(&args.input).into());
    }

    let (strategy, estimated) = if args.reencode {
        let video_bps = match &args.video_bitrate {
            Some(text) => parse_bitrate(text)?,
            None => DEFAULT_VIDEO_BPS,
        };
        let audio_bps = parse_bitrate(&args.audio_bitrate)?;
        (
            CutStrategy::re_encode(limit_bytes, video_bps, audio_bps),
            estimate_size(info.duration, video_bps + audio_bps),
        )
    } else {
        (
            CutStrategy::stream_copy(limit_bytes),
            estimate_size(info.duration, info.bitrate),
        )
    };

    println!("== Preview ==");
    println!("Input: {}", args.input.display());
    println!("Duration: {:.2} s", info.duration);
    match strategy {
        CutStrategy::StreamCopy { .. } => println!("Mode: stream copy (no re-encode)"),
        CutStrategy::ReEncode {
            video_bps,
            audio_bps,
            ..
        } => println!("Mode: re-encode (v={video_bps} bps, a={audio_bps} bps)"),
    }
    if estimated > 0 {
        println!("Estimated size: {}", format_bytes(estimated));
        println!("Estimated parts: ~{}", estimated_part_count(estimated, limit_bytes));
    } else {
        println!("Estimated size: N/A");
    }

    if args.simulate {
        println!("Simulation only.");
        return Ok(());
    }

    let reporter = Reporter::new(AnimStyle::Dots);
    let toolchain = AnimatedToolchain::new(FfmpegToolchain, reporter);
    let request = SplitRequest {
        source: args.input.clone(),
        out_dir: args.outdir.clone(),
        prefix,
    };
    let report = Splitter::new(&toolchain, request, strategy)
        .with_part_callback(|part| println!("{}", created_line(part)))
        .run()?;

    println!(
        "Done. {} parts in {}",
        report.parts.len(),
        args.outdir.display()
    );
    Ok(())
}

fn cmd_batch(args: &BatchArgs) -> Result<()> {
    tools::require_tool("ffprobe")?;
    tools::require_tool("ffmpeg")?;

    if !args.folder.is_dir() {
        return Err(Error::file_not_found(&args.folder).into());
    }
    let limit_bytes = parse_size(&args.size_limit)?;

    let files = batch::discover(&args.folder, args.recursive)?;
    if files.is_empty() {
        println!("No videos found.");
        return Ok(());
    }

    let jobs = batch::plan(&files, &args.folder, &args.outroot, args.skip_existing);
    let workers = if args.jobs == 0 {
        num_cpus::get()
    } else {
        args.jobs
    };

    let reporter = Reporter::new(args.anim);
    let toolchain = AnimatedToolchain::new(FfmpegToolchain, reporter);
    let outcomes = batch::run_batch(
        jobs,
        workers,
        CutStrategy::stream_copy(limit_bytes),
        &toolchain,
    );

    let split = count_by_status(&outcomes, JobStatus::Done);
    let skipped = count_by_status(&outcomes, JobStatus::Skipped);
    let failed = count_by_status(&outcomes, JobStatus::Failed);
    println!("Done. {split} split, {skipped} skipped, {failed} failed.");

    // Per-file failures are reported above; they are not a process
    // failure.
    Ok(())
}

fn count_by_status(outcomes: &[batch::BatchOutcome], status: JobStatus) -> usize {
    outcomes.iter().filter(|o| o.job.status == status).count()
}

fn cmd_probe(file: &Path, json: bool) -> Result<()> {
    if !file.is_file() {
        return Err(Error::file_not_found(file).into());
    }

    let info = probe::probe_media(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        let size = std::fs::metadata(file)?.len();
        println!("File: {}", file.display());
        println!("Size: {}", format_bytes(size));
        println!("Duration: {:.2} s", info.duration);
        if info.bitrate > 0 {
            println!("Bitrate: {} bps", info.bitrate);
        } else {
            println!("Bitrate: unknown");
        }
    }

    Ok(())
}

fn cmd_check_tools() -> Result<()> {
    println!("Checking external tools...\n");

    let tools = tools::check_tools();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install ffmpeg and ffprobe to enable splitting.");
    }

    Ok(())
}
