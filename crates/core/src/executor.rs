//! Child-process execution of a single command.

use std::process;

use crate::registry::Command;
use crate::types::{MakeError, MakeResult};

/// Execute one command to completion.
///
/// The command line is echoed to stdout first unless suppressed. The text
/// is split on whitespace, the first token naming the program and the rest
/// its arguments; there is no shell, so quoting and globbing are not
/// interpreted. Output is captured while the child runs: on success the
/// child's stdout is printed and its stderr forwarded, on failure both are
/// folded into [`MakeError::CommandExecutionFailed`].
pub fn execute(command: &Command) -> MakeResult<()> {
    if !command.suppressed {
        println!("{}", command.text);
    }

    let mut parts = command.text.split_whitespace();
    let Some(program) = parts.next() else {
        // The registry never stores empty command text.
        return Ok(());
    };

    let output = process::Command::new(program)
        .args(parts)
        .output()
        .map_err(|err| MakeError::CommandExecutionFailed {
            command: command.text.clone(),
            detail: err.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = if stderr.trim().is_empty() {
            output.status.to_string()
        } else {
            format!("{}: {}", output.status, stderr.trim())
        };
        return Err(MakeError::CommandExecutionFailed {
            command: command.text.clone(),
            detail,
        });
    }

    print!("{}", String::from_utf8_lossy(&output.stdout));
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
        eprint!("{}", stderr);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_a_command_that_exists() {
        let command = Command::parse("echo hello").unwrap();
        execute(&command).unwrap();
    }

    #[test]
    fn suppressed_commands_still_run() {
        let command = Command::parse("@echo quiet").unwrap();
        assert!(command.suppressed);
        execute(&command).unwrap();
    }

    #[test]
    fn splits_the_text_into_program_and_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran");
        let command = Command::parse(&format!("@touch {}", marker.display())).unwrap();

        execute(&command).unwrap();
        assert!(marker.exists());
    }

    #[test]
    fn a_missing_program_is_an_execution_failure() {
        let command = Command::parse("definitely-not-an-installed-program").unwrap();
        let err = execute(&command).unwrap_err();
        match err {
            MakeError::CommandExecutionFailed { command, .. } => {
                assert_eq!(command, "definitely-not-an-installed-program");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn a_non_zero_exit_is_an_execution_failure() {
        let command = Command::parse("false").unwrap();
        let err = execute(&command).unwrap_err();
        assert!(matches!(err, MakeError::CommandExecutionFailed { .. }));
    }
}
