//! Outward collaborators: opening a note and handing a selection to a file
//! manager.

use crate::entry::RowAction;
use crate::error::{Error, Result};
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Receives the paths of the displayed rows.
pub trait ExportSink {
    fn export(&self, paths: &[PathBuf]) -> Result<()>;
}

/// Runs `program [args...] <path>` with the terminal attached.
#[derive(Debug, Clone)]
pub struct OpenWith {
    program: String,
    args: Vec<String>,
}

impl OpenWith {
    pub fn new(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self { program: program.clone(), args: args.to_vec() })
    }

    /// `$VISUAL`, then `$EDITOR`, then `vi`.
    pub fn from_env() -> Self {
        let program = env::var("VISUAL")
            .or_else(|_| env::var("EDITOR"))
            .unwrap_or_else(|_| "vi".to_string());
        Self { program, args: Vec::new() }
    }
}

impl RowAction for OpenWith {
    fn activate(&self, path: &Path) -> Result<()> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;
        if !status.success() {
            return Err(Error::Command {
                cmd: self.program.clone(),
                code: status.code(),
            });
        }
        Ok(())
    }
}

/// One path per line on stdout, for piping into another tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintPaths;

impl ExportSink for PrintPaths {
    fn export(&self, paths: &[PathBuf]) -> Result<()> {
        let mut out = io::stdout().lock();
        for p in paths {
            writeln!(out, "{}", p.display())?;
        }
        Ok(())
    }
}

/// Runs `program [args...] <path>...`, e.g. a file manager that marks the
/// files it is given.
#[derive(Debug, Clone)]
pub struct CommandExport {
    program: String,
    args: Vec<String>,
}

impl CommandExport {
    pub fn new(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self { program: program.clone(), args: args.to_vec() })
    }
}

impl ExportSink for CommandExport {
    fn export(&self, paths: &[PathBuf]) -> Result<()> {
        tracing::info!(
            program = %self.program,
            count = paths.len(),
            "exporting selection"
        );
        let status = Command::new(&self.program)
            .args(&self.args)
            .args(paths)
            .status()?;
        if !status.success() {
            return Err(Error::Command {
                cmd: self.program.clone(),
                code: status.code(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_with_requires_program() {
        assert!(OpenWith::new(&[]).is_none());
        let open = OpenWith::new(&["emacsclient".to_string(), "-n".to_string()])
            .unwrap();
        assert_eq!(open.program, "emacsclient");
        assert_eq!(open.args, vec!["-n"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_open_with_reports_failure() {
        let open = OpenWith::new(&["false".to_string()]).unwrap();
        let err = open.activate(Path::new("/tmp/x")).unwrap_err();
        assert!(matches!(err, Error::Command { .. }));

        let open = OpenWith::new(&["true".to_string()]).unwrap();
        assert!(open.activate(Path::new("/tmp/x")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_export_passes_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("received");
        let script = format!("printf '%s\\n' \"$@\" > {}", out.display());
        let export = CommandExport::new(&[
            "sh".to_string(),
            "-c".to_string(),
            script,
            "sh".to_string(),
        ])
        .unwrap();
        export
            .export(&[PathBuf::from("/n/a.txt"), PathBuf::from("/n/b.txt")])
            .unwrap();
        let received = std::fs::read_to_string(out).unwrap();
        assert_eq!(received, "/n/a.txt\n/n/b.txt\n");
    }
}
