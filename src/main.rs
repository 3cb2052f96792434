// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::ops::ControlFlow;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use jiten::{
    load_dictionary, Deinflector, Dictionary, RecordId, RuleDeinflector, SearchRequest, SearchTuning, WordMatch,
};

mod cli;
use cli::display::{render_hits, render_stats, Painter};
use cli::{Cli, Commands};

/// One hit as printed by `search --json`.
#[derive(Serialize)]
struct HitView<'a> {
    record: RecordId,
    written: &'a str,
    phonetic: &'a str,
    frequency: u32,
    glosses: Vec<&'a str>,
    study_definition: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_form: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    inflections: Vec<String>,
}

impl<'a> HitView<'a> {
    fn new(dict: &'a Dictionary, hit: &'a WordMatch) -> Option<Self> {
        let record = dict.get(hit.record)?;
        Some(Self {
            record: hit.record,
            written: record.written(),
            phonetic: record.phonetic(),
            frequency: record.frequency(),
            glosses: record.glosses().collect(),
            study_definition: hit.study_definition,
            base_form: hit.inflection.as_ref().map(|i| i.base_form.as_str()),
            inflections: hit.inflections().iter().map(ToString::to_string).collect(),
        })
    }
}

fn main() {
    let filter = EnvFilter::try_from_env("JITEN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let tuning = match &cli.tuning {
        Some(path) => SearchTuning::from_path(path).with_context(|| format!("reading tuning file {}", path))?,
        None => SearchTuning::default(),
    };
    let canonical = cli.canonical.as_deref().map(Path::new);

    match cli.command {
        Commands::Search {
            file,
            query,
            by,
            mode,
            same_form,
            no_study,
            rules,
            limit,
            json,
        } => {
            let dict = load(&file, canonical, tuning)?;
            let deinflector = match &rules {
                Some(path) => Some(
                    RuleDeinflector::from_path(path).with_context(|| format!("reading rules file {}", path))?,
                ),
                None => None,
            };

            let mut request = SearchRequest::new(&query)
                .kind(by)
                .mode(mode)
                .same_form(same_form)
                .include_study(!no_study)
                .limit(limit);
            if let Some(d) = &deinflector {
                request = request.deinflector(d as &dyn Deinflector);
            }

            let start = Instant::now();
            let hits = dict.search(&request).context("search failed")?;
            let elapsed = start.elapsed().as_secs_f64() * 1000.0;

            if json {
                let views: Vec<HitView<'_>> = hits.iter().filter_map(|h| HitView::new(&dict, h)).collect();
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else {
                let painter = Painter::detect();
                print!("{}", render_hits(&painter, &dict, &query, by.resolve(&query), &hits, elapsed));
            }
        }
        Commands::Inspect { file, json } => {
            let dict = load(&file, canonical, tuning)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&dict.stats())?);
            } else {
                print!("{}", render_stats(&Painter::detect(), &file, &dict.stats()));
            }
        }
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// LOADING
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(feature = "parallel")]
fn load(file: &str, canonical: Option<&Path>, tuning: SearchTuning) -> Result<Dictionary> {
    use indicatif::{ProgressBar, ProgressStyle};

    let bar = if atty::is(atty::Stream::Stderr) {
        ProgressBar::new(0)
    } else {
        ProgressBar::hidden()
    };
    let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .map(|s| s.progress_chars("━━╸"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar.set_prefix("Indexing");
    bar.set_message("lines...");

    let mut progress = |done: usize, total: usize| {
        bar.set_length(total as u64);
        bar.set_position(done as u64);
        ControlFlow::Continue(())
    };
    let dict = load_dictionary(file, canonical, tuning, &mut progress)
        .with_context(|| format!("loading dictionary {}", file))?;
    bar.finish_and_clear();
    Ok(dict)
}

#[cfg(not(feature = "parallel"))]
fn load(file: &str, canonical: Option<&Path>, tuning: SearchTuning) -> Result<Dictionary> {
    let mut progress = |_: usize, _: usize| ControlFlow::Continue(());
    load_dictionary(file, canonical, tuning, &mut progress).with_context(|| format!("loading dictionary {}", file))
}
