// src/main.rs
use anyhow::{bail, Context, Result};
use clap::Parser;
use colorful::Colorful;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

use mp3checkr::classify::QualityAssessment;
use mp3checkr::cli::{format_legend, format_report};
use mp3checkr::service::AnalysisClient;
use mp3checkr::upload::{declared_media_type, UploadOrchestrator, UploadState};

#[derive(Parser, Debug)]
#[command(name = "mp3checkr")]
#[command(about = "Check MP3 quality through an analysis service: bitrate, loudness, and true source quality")]
struct Args {
    /// Input MP3 file or directory
    #[arg(short, long, required_unless_present = "ping")]
    input: Option<PathBuf>,

    /// Song name to attach to the upload (single file only, pairs with --artist)
    #[arg(long)]
    song: Option<String>,

    /// Artist name to attach to the upload (single file only, pairs with --song)
    #[arg(long)]
    artist: Option<String>,

    /// Analysis service base URL
    #[arg(long, env = "MP3CHECKR_SERVER", default_value = "http://localhost:8080")]
    server: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "120")]
    timeout: u64,

    /// Print raw reports as JSON instead of report cards
    #[arg(long)]
    json: bool,

    /// Check service health and exit
    #[arg(long)]
    ping: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let client = AnalysisClient::new(&args.server, Duration::from_secs(args.timeout))
        .context("Could not build the HTTP client")?;

    if args.ping {
        return ping(&client);
    }

    // clap guarantees the input is present on every non-ping run
    let input = args.input.as_deref().context("no input path given")?;
    let files = collect_mp3_files(input)?;

    if files.is_empty() {
        println!("{}", "No MP3 files found!".red());
        return Ok(());
    }

    println!("Found {} MP3 file(s)\n", files.len());

    // Tags describe one specific track, so they only apply to single-file runs
    let (song, artist) = if files.len() == 1 {
        (
            args.song.as_deref().unwrap_or(""),
            args.artist.as_deref().unwrap_or(""),
        )
    } else {
        if args.song.is_some() || args.artist.is_some() {
            println!(
                "{}",
                "Ignoring --song/--artist: they apply to single-file input only".yellow()
            );
        }
        ("", "")
    };

    let mut session = UploadOrchestrator::new(client);
    let mut failed = 0usize;

    for file in &files {
        if !process_file(&mut session, file, song, artist, &args) {
            failed += 1;
        }
        session.reset();
        println!();
    }

    if !args.json {
        print!("{}", format_legend());
    }

    if failed > 0 {
        bail!("{} of {} file(s) failed analysis", failed, files.len());
    }

    Ok(())
}

fn ping(client: &AnalysisClient) -> Result<()> {
    let health = client
        .health()
        .with_context(|| format!("Health check against {} failed", client.base_url()))?;

    println!("{} {}", "✓".green(), health.status);
    if let Some(message) = &health.message {
        println!("  {}", message);
    }

    Ok(())
}

fn collect_mp3_files(path: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        // A named file goes through as-is; the upload session rejects
        // non-MP3 types with a proper validation message.
        files.push(path.to_path_buf());
    } else if path.is_dir() {
        for entry in WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let entry_path = entry.path();
            if entry_path.is_file() && declared_media_type(entry_path).is_some() {
                files.push(entry_path.to_path_buf());
            }
        }
        files.sort();
    } else {
        bail!("Input path does not exist: {}", path.display());
    }

    Ok(files)
}

fn process_file(
    session: &mut UploadOrchestrator,
    file: &Path,
    song: &str,
    artist: &str,
    args: &Args,
) -> bool {
    println!("Analyzing: {}", file.display().to_string().cyan());

    session.choose_file(file);
    if let Some(error) = session.state().error() {
        println!("  {}", error.red());
        return false;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Uploading and analyzing...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    session.submit(song, artist);
    spinner.finish_and_clear();

    match session.state() {
        UploadState::Succeeded { report } => {
            if args.json {
                match serde_json::to_string_pretty(report.as_ref()) {
                    Ok(json) => println!("{}", json),
                    Err(err) => {
                        println!("  {}", format!("Could not render report: {}", err).red());
                        return false;
                    }
                }
            } else {
                let assessment = QualityAssessment::from_report(report);
                print!("{}", format_report(report, &assessment, args.verbose));
            }
            true
        }
        state => {
            let error = state
                .error()
                .unwrap_or("Analysis ended in an unexpected state");
            println!("  {}", error.red());
            false
        }
    }
}
