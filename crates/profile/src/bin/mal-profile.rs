// ABOUTME: CLI binary for the profile page extractor.
// ABOUTME: Reads profile HTML from a file or stdin and prints the profile as JSON or a summary.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use mal_profile::{AboutFormat, ProfileExtractor, UserProfile};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mal-profile")]
#[command(about = "Extract a user profile from a saved profile page")]
struct Args {
    /// HTML file to parse (default: stdin)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// About section format: bbcode (default), html, text/txt
    #[arg(short = 'f', long = "about-format", default_value = "bbcode")]
    about_format: String,

    /// Output as JSON instead of a text summary
    #[arg(long = "json")]
    json_output: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p).with_context(|| format!("reading {:?}", p)),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn format_output(profile: &UserProfile, json_output: bool) -> anyhow::Result<String> {
    if json_output {
        serde_json::to_string_pretty(profile).context("serializing profile")
    } else {
        Ok(profile.format_summary())
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let html = read_input(args.html.as_ref())?;

    let extractor = ProfileExtractor::builder()
        .about_format(AboutFormat::from(args.about_format.as_str()))
        .build();
    let profile = extractor.extract_html(&html)?;
    let output_str = format_output(&profile, args.json_output)?;

    match &args.output {
        Some(path) => fs::write(path, &output_str).with_context(|| format!("writing {:?}", path))?,
        None => println!("{}", output_str),
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let start = Instant::now();
    let outcome = run(&args);
    let elapsed = start.elapsed();

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
