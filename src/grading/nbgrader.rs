#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use bon::Builder;
use itertools::Itertools;

use super::{GradingError, GradingGateway};
use crate::{
    constants::{AUTOGRADED_DIR, DEFAULT_SUBMISSION_DIR, NBGRADER_BIN},
    process::run_collect,
};

/// Drives the `nbgrader` command line inside a course directory.
#[derive(Debug, Clone, Builder)]
#[builder(on(PathBuf, into))]
pub struct Nbgrader {
    /// Executable to run.
    #[builder(default = OsString::from(NBGRADER_BIN), into)]
    program:       OsString,
    /// Course directory the commands run in.
    #[builder(default = PathBuf::from("."))]
    course_dir:    PathBuf,
    /// Directory holding `<student>/<assignment>` submissions.
    #[builder(default = PathBuf::from(DEFAULT_SUBMISSION_DIR))]
    submitted_dir: PathBuf,
    /// Upper bound for one grading command.
    timeout:       Option<Duration>,
}

impl Nbgrader {
    /// Course directory the commands run in.
    pub fn course_dir(&self) -> &Path {
        &self.course_dir
    }

    /// Runs `nbgrader <command> <assignment> --student <student>`.
    async fn run(
        &self,
        command: &str,
        assignment: &str,
        student: &str,
        force: bool,
    ) -> Result<(), GradingError> {
        let mut args: Vec<OsString> = vec![
            command.into(),
            assignment.into(),
            "--student".into(),
            student.into(),
        ];
        if force {
            args.push("--force".into());
        }

        tracing::debug!(
            "Running {} {command} {assignment} for {student}",
            self.program.to_string_lossy()
        );
        let out = run_collect(&self.program, &args, Some(&self.course_dir), self.timeout).await?;

        if out.success() {
            Ok(())
        } else {
            Err(GradingError::Failed {
                command:    command.to_string(),
                assignment: assignment.to_string(),
                student:    student.to_string(),
                stderr:     out.stderr_text(),
            })
        }
    }
}

/// Names of the directories in `root` that contain an `assignment` folder,
/// sorted. A missing `root` means nobody.
pub(crate) fn students_with(root: &Path, assignment: &str) -> Result<Vec<String>, GradingError> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(root).map_err(|e| GradingError::listing(root, e))?;
    let mut students = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| GradingError::listing(root, e))?;
        if entry.path().join(assignment).is_dir() {
            students.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    Ok(students.into_iter().sorted().collect())
}

impl GradingGateway for Nbgrader {
    async fn list_submitted_students(&self, assignment: &str) -> Result<Vec<String>, GradingError> {
        students_with(&self.course_dir.join(&self.submitted_dir), assignment)
    }

    async fn autograde(
        &self,
        assignment: &str,
        student: &str,
        force: bool,
    ) -> Result<(), GradingError> {
        self.run("autograde", assignment, student, force).await
    }

    async fn list_autograded_students(
        &self,
        assignment: &str,
    ) -> Result<Vec<String>, GradingError> {
        students_with(&self.course_dir.join(AUTOGRADED_DIR), assignment)
    }

    async fn generate_feedback(
        &self,
        assignment: &str,
        student: &str,
        force: bool,
    ) -> Result<(), GradingError> {
        self.run("generate_feedback", assignment, student, force)
            .await
    }

    async fn release_feedback(&self, assignment: &str, student: &str) -> Result<(), GradingError> {
        self.run("release_feedback", assignment, student, false)
            .await
    }
}
