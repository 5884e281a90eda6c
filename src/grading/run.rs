#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    fs,
    io::{self, BufRead, Write},
    path::Path,
};

use anyhow::{Context, Result};
use colored::Colorize;

use super::{GradingError, GradingGateway};
use crate::constants::FEEDBACK_DIR;

/// Autogrades every submitted student. Failures are logged and leave the
/// student out; the batch carries on. Returns the students the gateway
/// reports as autograded afterwards.
pub async fn autograde_all<G: GradingGateway>(
    gateway: &G,
    assignment: &str,
    force: bool,
) -> Result<Vec<String>, GradingError> {
    for student in gateway.list_submitted_students(assignment).await? {
        if let Err(e) = gateway.autograde(assignment, &student, force).await {
            tracing::error!(
                "There were errors while autograding {assignment} of {student}: {e}"
            );
        }
    }

    gateway.list_autograded_students(assignment).await
}

/// Asks for the manual grading step and waits until Enter is pressed on
/// `input`. Closing the input aborts.
pub fn review(input: &mut impl BufRead) -> Result<()> {
    println!();
    tracing::warn!("Formgrading must be done manually in a jupyter instance!");
    tracing::warn!("Run `jupyter notebook --no-browser` and grade manually.");

    print!(
        "{}",
        "Press Enter to continue when you are done formgrading\nor Ctrl-c to abort without \
         generating feedback..."
            .bold()
    );
    io::stdout().flush().context("Could not flush stdout")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Could not read from stdin")?;
    anyhow::ensure!(read > 0, "Input closed, not generating feedback");
    Ok(())
}

/// Copies `feedback/<student>/<assignment>/<notebook stem>.html` from
/// `course_dir` to `<output>/<student>.html`. Returns whether a report was
/// found.
pub fn collect_feedback(
    course_dir: &Path,
    assignment: &str,
    student: &str,
    output: &Path,
    notebook_name: &str,
) -> Result<bool> {
    let stem = Path::new(notebook_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| notebook_name.to_string());
    let html = course_dir
        .join(FEEDBACK_DIR)
        .join(student)
        .join(assignment)
        .join(format!("{stem}.html"));

    if !html.exists() {
        tracing::warn!("No feedback found for {student} at {}", html.display());
        return Ok(false);
    }

    let target = output.join(format!("{student}.html"));
    tracing::info!("Collecting feedback from: {}", html.display());
    fs::copy(&html, &target)
        .with_context(|| format!("Could not copy {} to {}", html.display(), target.display()))?;
    Ok(true)
}

/// Forces fresh feedback for one student and releases it.
async fn generate_and_release<G: GradingGateway>(
    gateway: &G,
    assignment: &str,
    student: &str,
) -> Result<(), GradingError> {
    gateway.generate_feedback(assignment, student, true).await?;
    gateway.release_feedback(assignment, student).await
}

/// Generates and releases feedback for every student in `students`, then
/// collects the rendered reports into `output`. A student whose report cannot
/// be copied is logged and skipped. Returns how many reports were collected.
pub async fn release_all_feedback<G: GradingGateway>(
    gateway: &G,
    course_dir: &Path,
    assignment: &str,
    students: &[String],
    output: &Path,
    notebook_name: &str,
) -> Result<usize> {
    fs::create_dir_all(output)
        .with_context(|| format!("Could not create {}", output.display()))?;

    let mut reports = 0;
    for student in students {
        if let Err(e) = generate_and_release(gateway, assignment, student).await {
            tracing::error!("Could not produce feedback for {student}: {e}");
            continue;
        }

        match collect_feedback(course_dir, assignment, student, output, notebook_name) {
            Ok(true) => reports += 1,
            Ok(false) => {}
            Err(e) => tracing::error!("{e:#}"),
        }
    }

    Ok(reports)
}
