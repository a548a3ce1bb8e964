/*
 * Galileo Network Analytics (GNA) Toolkit
 *
 * Copyright 2024-2025 Fidelis Farm & Technologies, LLC
 * All Rights Reserved.
 * See license information in LICENSE.
 */

use anyhow::Context;
use clap::Parser;
use graph_batch::pipeline::exit_code;
use graph_batch::pipeline::jobs::resolve_jobs;
use graph_batch::pipeline::mc::McProcessor;
use graph_batch::pipeline::resolve_database;
use graph_batch::pipeline::{JobProcessor, JobVariant};

#[derive(Debug, Parser)]
#[command(
    version,
    about = "Extract mcgraph, recograph and populate the graph tables for Monte Carlo jobs",
    long_about = None
)]
struct Args {
    #[arg(long, conflicts_with = "jobs_file")]
    jobs: Option<String>,

    #[arg(long)]
    jobs_file: Option<String>,

    #[arg(long)]
    database: Option<String>,

    #[arg(long)]
    options: Option<String>,

    #[arg(long)]
    dry_run: bool,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let jobs = resolve_jobs(
        args.jobs.as_deref(),
        args.jobs_file.as_deref(),
        JobVariant::MC,
    )
    .context("unable to resolve job list")?;

    let mut mc_processor = McProcessor::new(
        "mc",
        jobs,
        &resolve_database(args.database.as_deref()),
        &args.options.clone().unwrap_or(String::new()),
        args.dry_run,
    )?;

    mc_processor.run()?;

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(error) = run(&args) {
        eprintln!("mc: batch failed: {:#}", error);
        let code = error
            .downcast_ref::<std::io::Error>()
            .map(exit_code)
            .unwrap_or(exitcode::SOFTWARE);
        std::process::exit(code);
    }
}
