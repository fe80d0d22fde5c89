use clap::Parser;
use std::error::Error;
use std::fs;
use std::io::{Read, Write};
use std::process::ExitCode;

use nomen::{Entity, MatchSpan, Matcher, ScanPolicy};
use serde::Serialize;

mod cli;
use cli::{Cli, Commands};

/// One output line of `nomen scan`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanRecord<'a> {
    source: &'a str,
    #[serde(flatten)]
    span: MatchSpan,
    entity_ids: Vec<u32>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Scan {
            roster,
            files,
            word_exact,
            fuzzy,
        } => run_scan(&roster, &files, ScanPolicy { word_exact, fuzzy }),
        Commands::Stats { roster, files } => run_stats(&roster, &files),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_matcher(roster_path: &str, policy: ScanPolicy) -> Result<Matcher, Box<dyn Error>> {
    let raw = fs::read_to_string(roster_path)?;
    let entities: Vec<Entity> = serde_json::from_str(&raw)?;
    let mut matcher = Matcher::new(policy);
    matcher.rebuild(entities);
    Ok(matcher)
}

/// (source label, contents) for each input, or stdin when none given.
fn read_inputs(files: &[String]) -> Result<Vec<(String, String)>, Box<dyn Error>> {
    if files.is_empty() {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(vec![("<stdin>".to_string(), text)]);
    }
    files
        .iter()
        .map(|path| Ok((path.clone(), fs::read_to_string(path)?)))
        .collect()
}

fn run_scan(roster: &str, files: &[String], policy: ScanPolicy) -> Result<(), Box<dyn Error>> {
    let mut matcher = load_matcher(roster, policy)?;
    let inputs = read_inputs(files)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (source, text) in &inputs {
        for span in matcher.scan_text(text) {
            let entity_ids = matcher
                .entities_for(&span.text)
                .iter()
                .map(|e| e.id.get())
                .collect();
            let record = ScanRecord {
                source,
                span,
                entity_ids,
            };
            serde_json::to_writer(&mut out, &record)?;
            out.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn run_stats(roster: &str, files: &[String]) -> Result<(), Box<dyn Error>> {
    let mut matcher = load_matcher(roster, ScanPolicy::FULL)?;
    for (_, text) in read_inputs(files)? {
        matcher.scan_text(&text);
    }
    let stats = matcher.stats();
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
