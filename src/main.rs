#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # nbcollect
//!
//! Collects downloaded homework submissions into an nbgrader course
//! directory, autogrades them, and gathers the feedback reports.

use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use bpaf::*;
use colored::Colorize;
use dotenvy::dotenv;
use nbcollect::{
    Config, DuplicatePolicy, collect,
    config::notebook_name,
    constants::{DEFAULT_OUTPUT_DIR, DEFAULT_SUBMISSION_DIR, NBGRADER_BIN},
    grading::{
        Nbgrader,
        run::{autograde_all, release_all_feedback, review},
    },
    util::grader_path,
};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Command line options.
#[derive(Debug, Clone)]
struct Opts {
    /// Name of the assignment
    assignment:         String,
    /// Pass --force to autograde
    force:              bool,
    /// Only collect, do not grade
    noop:               bool,
    /// Root of the html feedback output
    output:             PathBuf,
    /// Submission directory, relative to the course directory
    submission_dir:     PathBuf,
    /// nbgrader course directory
    course_dir:         PathBuf,
    /// Do not grade submissions with several notebooks
    exclude_duplicates: bool,
    /// Skip waiting for manual grading
    no_review:          bool,
    /// Print the collected submissions as JSON
    json:               bool,
    /// Log debug output
    verbose:            bool,
    /// Notebooks and archives to collect
    inputs:             Vec<PathBuf>,
}

/// Parse the command line arguments and return `Opts`
fn options() -> Opts {
    let assignment = short('a')
        .long("assignment")
        .help("Name of the assignment")
        .argument::<String>("NAME");

    let force = short('f')
        .long("force")
        .help("Pass --force to autograde")
        .switch();

    let noop = short('n')
        .long("noop")
        .help("Do not run autograde and feedback")
        .switch();

    let output = short('o')
        .long("output")
        .help("Output directory for html feedback")
        .argument::<PathBuf>("DIR")
        .fallback(PathBuf::from(DEFAULT_OUTPUT_DIR));

    let submission_dir = short('s')
        .long("submissiondir")
        .help("Submission directory")
        .argument::<PathBuf>("DIR")
        .fallback(PathBuf::from(DEFAULT_SUBMISSION_DIR));

    let course_dir = long("course")
        .env("NBCOLLECT_COURSE_DIR")
        .help("nbgrader course directory")
        .argument::<PathBuf>("DIR")
        .fallback(PathBuf::from("."));

    let exclude_duplicates = long("exclude-duplicates")
        .help("Do not grade submissions that contain several notebooks")
        .switch();

    let no_review = long("no-review")
        .help("Generate feedback without waiting for manual grading")
        .switch();

    let json = long("json")
        .help("Print the collected submissions as JSON")
        .switch();

    let verbose = short('v').long("verbose").help("Log debug output").switch();

    let inputs = positional::<PathBuf>("INPUT")
        .help("Notebook, zip or 7z file to collect")
        .some("at least one input file is required");

    construct!(Opts {
        assignment,
        force,
        noop,
        output,
        submission_dir,
        course_dir,
        exclude_duplicates,
        no_review,
        json,
        verbose,
        inputs
    })
    .to_options()
    .descr("Collect homework submissions and grade them with nbgrader")
    .run()
}

/// Reads an optional timeout in seconds from the environment.
fn read_timeout_secs(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let opts = options();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false)
        .with_target(false);
    let level = if opts.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::registry()
        .with(fmt)
        .with(LevelFilter::from_level(level))
        .init();

    let notebook = notebook_name(&opts.course_dir, &opts.assignment)?;
    let duplicates = if opts.exclude_duplicates {
        DuplicatePolicy::Exclude
    } else {
        DuplicatePolicy::from_env()?
    };
    let submission_dir = opts.course_dir.join(&opts.submission_dir);

    let config = Config::builder()
        .submission_dir(submission_dir)
        .assignment(opts.assignment.clone())
        .notebook_name(notebook.clone())
        .duplicates(duplicates)
        .build();

    let mut collected = Vec::new();
    for input in &opts.inputs {
        match collect(input, &config) {
            Ok(collection) => {
                if collection.submissions.is_empty() {
                    tracing::error!("No submissions found in {}.", input.display());
                } else {
                    tracing::info!("Found {} submissions", collection.submissions.len());
                }
                if !collection.skipped.is_empty() {
                    tracing::warn!(
                        "Skipped {} entries of {}",
                        collection.skipped.len(),
                        input.display()
                    );
                }
                collected.extend(collection.submissions);
            }
            Err(e) => tracing::error!("{e}"),
        }
    }

    let flagged = collected.iter().filter(|s| !s.is_clean()).count();
    if flagged > 0 {
        tracing::warn!("{flagged} submissions have notebook problems");
    }

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&collected)?);
    }

    if opts.noop {
        tracing::info!("-n was specified, exiting");
        return Ok(());
    }

    let program = std::env::var("NBCOLLECT_NBGRADER").unwrap_or_else(|_| NBGRADER_BIN.into());
    let gateway = Nbgrader::builder()
        .program(grader_path(&program)?)
        .course_dir(opts.course_dir.clone())
        .submitted_dir(opts.submission_dir.clone())
        .maybe_timeout(read_timeout_secs("NBCOLLECT_TIMEOUT_SECS"))
        .build();

    let autograded = autograde_all(&gateway, &opts.assignment, opts.force)
        .await
        .context("Autograding failed")?;
    tracing::info!("{} submissions have been autograded", autograded.len());

    if !opts.no_review {
        review(&mut io::stdin().lock())?;
    }

    let output = opts.output.join(&opts.assignment);
    let reports = release_all_feedback(
        &gateway,
        gateway.course_dir(),
        &opts.assignment,
        &autograded,
        &output,
        &notebook,
    )
    .await?;

    tracing::info!(
        "{} reports written to {}",
        reports.to_string().bold(),
        output.display()
    );

    Ok(())
}
