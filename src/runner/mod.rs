//! Running `.hurl` files through the external `hurl` interpreter.
//!
//! A run truncates `<document>.out`, then hands a single shell command line
//! to a new process rooted at the document's directory:
//!
//! ```text
//! hurl "<document>" [--variables-file "<env>"] [<additionalArgs>] > "<document>.out" 2>&1
//! ```
//!
//! Dispatch is fire-and-forget. The caller opens the output artifact right
//! away, so it may show empty or partial output until `hurl` exits. Runs are
//! not serialized: invoking twice in quick succession starts two processes
//! that write the same artifact.

pub mod error;

pub use error::RunError;

use crate::classifier::is_hurl_path;
use crate::config::HurlerConfig;
use crate::variables::resolve_environment_path;
use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
#[cfg(feature = "lsp")]
use std::process::Stdio;

/// Executable name of the interpreter.
pub const INTERPRETER: &str = "hurl";

/// Suffix appended to the document path to name the output artifact.
pub const OUTPUT_SUFFIX: &str = ".out";

/// Everything needed to dispatch one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    /// The `.hurl` document being run
    pub document_path: PathBuf,
    /// The truncated `.out` artifact
    pub output_path: PathBuf,
    /// Full shell command line
    pub command: String,
    /// Directory the command runs in
    pub working_dir: PathBuf,
}

/// Returns the output artifact path for a document: `<document>.out`.
pub fn output_path(document_path: &Path) -> PathBuf {
    let mut path = OsString::from(document_path.as_os_str());
    path.push(OUTPUT_SUFFIX);
    PathBuf::from(path)
}

/// Builds the shell command line for running a document.
///
/// The variables file follows the same absolute/relative rule as hover
/// lookups. The result depends only on the arguments.
///
/// # Examples
///
/// ```
/// use hurler::runner::build_command;
/// use std::path::Path;
///
/// let command = build_command(Path::new("/ws/api.hurl"), "vars.env", Path::new("/ws"), "--test");
/// assert_eq!(
///     command,
///     r#"hurl "/ws/api.hurl" --variables-file "/ws/vars.env" --test > "/ws/api.hurl.out" 2>&1"#
/// );
/// ```
pub fn build_command(
    document_path: &Path,
    environment_file: &str,
    base_path: &Path,
    extra_args: &str,
) -> String {
    let mut command = format!("{} \"{}\"", INTERPRETER, document_path.display());

    if let Some(env_path) = resolve_environment_path(environment_file, base_path) {
        command.push_str(&format!(" --variables-file \"{}\"", env_path.display()));
    }

    if !extra_args.is_empty() {
        command.push(' ');
        command.push_str(extra_args);
    }

    command.push_str(&format!(
        " > \"{}\" 2>&1",
        output_path(document_path).display()
    ));
    command
}

/// Creates the output artifact, truncating any previous content.
pub fn prepare_output(path: &Path) -> Result<(), RunError> {
    File::create(path)
        .map(|_| ())
        .map_err(|e| RunError::OutputFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Validates the document and prepares a run.
///
/// Truncates the output artifact as a side effect; nothing is touched when
/// validation fails.
///
/// # Arguments
///
/// * `document_path` - The active document, if any
/// * `config` - Current settings
/// * `base_path` - Workspace root for relative settings
pub fn prepare_run(
    document_path: Option<&Path>,
    config: &HurlerConfig,
    base_path: &Path,
) -> Result<RunPlan, RunError> {
    let document_path = document_path.ok_or(RunError::NoActiveDocument)?;

    if !is_hurl_path(document_path) {
        return Err(RunError::NotHurlFile(document_path.to_path_buf()));
    }

    let output = output_path(document_path);
    prepare_output(&output)?;

    let working_dir = document_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(RunPlan {
        document_path: document_path.to_path_buf(),
        output_path: output,
        command: build_command(
            document_path,
            &config.environment_file,
            base_path,
            &config.additional_args,
        ),
        working_dir,
    })
}

/// Shell program and flag used to interpret the command line.
#[cfg(feature = "lsp")]
fn shell() -> (&'static str, &'static str) {
    if cfg!(target_os = "windows") {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
}

/// Spawns the shell with the planned command line.
///
/// Stdout and stderr are piped: the server's own stdio carries the protocol,
/// and `additionalArgs` may hold shell operators that escape the `.out`
/// redirect.
#[cfg(feature = "lsp")]
fn spawn(plan: &RunPlan) -> Result<tokio::process::Child, RunError> {
    let (program, flag) = shell();

    tokio::process::Command::new(program)
        .arg(flag)
        .arg(&plan.command)
        .current_dir(&plan.working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| RunError::Spawn(e.to_string()))
}

/// Forwards a child's output stream to the log, line by line.
#[cfg(feature = "lsp")]
async fn forward_output<R>(reader: R, stream: &'static str)
where
    R: tokio::io::AsyncRead + Unpin,
{
    use tokio::io::AsyncBufReadExt;

    let mut lines = tokio::io::BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => log::debug!("hurl {}: {}", stream, line),
            Ok(None) => break,
            Err(e) => {
                log::warn!("failed to read hurl {}: {}", stream, e);
                break;
            }
        }
    }
}

/// Starts the planned command without waiting for it.
///
/// Detached tasks drain any output that escaped the redirect into the log,
/// then reap the child and log how it exited. Must be called from within a
/// tokio runtime.
#[cfg(feature = "lsp")]
pub fn dispatch(plan: &RunPlan) -> Result<(), RunError> {
    let mut child = spawn(plan)?;

    log::info!("dispatched: {}", plan.command);

    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(forward_output(stdout, "stdout"));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(forward_output(stderr, "stderr"));
    }

    let document = plan.document_path.clone();
    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) => log::info!("hurl run for {} exited with {}", document.display(), status),
            Err(e) => log::warn!("hurl run for {} could not be awaited: {}", document.display(), e),
        }
    });

    Ok(())
}
