// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the jiten command-line interface.
//!
//! Two subcommands: `search` to query a JSON dictionary and `inspect` to see
//! what the indexes built from it look like. Both load the whole dictionary
//! first, with a progress bar when stderr is a terminal.

pub mod display;

use clap::{Parser, Subcommand};
use jiten::{SearchKind, SearchMode};

#[derive(Parser)]
#[command(
    name = "jiten",
    about = "Dictionary search over written, phonetic and definition indexes",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Tuning file (JSON); missing fields keep their defaults
    #[arg(long, global = true)]
    pub tuning: Option<String>,

    /// Canonical forms file (JSON) shared across dictionaries
    #[arg(long, global = true)]
    pub canonical: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a dictionary and display ranked results
    Search {
        /// Path to the dictionary JSON file
        file: String,

        /// Search query
        query: String,

        /// Which index to search; `auto` picks from the query's script
        #[arg(long, value_enum, default_value = "auto")]
        by: SearchKind,

        /// How the query must line up with the stored form
        #[arg(short, long, value_enum, default_value = "prefix")]
        mode: SearchMode,

        /// Compare literally: no case or script folding
        #[arg(long)]
        same_form: bool,

        /// Ignore study definitions when searching glosses
        #[arg(long)]
        no_study: bool,

        /// Deinflection rules (JSON) for conjugated queries
        #[arg(long)]
        rules: Option<String>,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Inspect the indexes built from a dictionary
    Inspect {
        /// Path to the dictionary JSON file
        file: String,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
}
