use std::env;
use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::Context;

use crate::ProgError;

/// Copy `secret` to the system clipboard and say so on stderr.
pub(crate) fn copy(secret: &passgen::Secret) -> Result<(), ProgError> {
    if secret.as_str().is_empty() {
        return Err(ProgError::NothingToCopy);
    }
    send_to_clipboard(secret.as_str().as_bytes())?;
    eprintln!("{}", console::style("Copied to the clipboard.").green());
    Ok(())
}

fn send_to_clipboard(data: &[u8]) -> anyhow::Result<()> {
    let mut cmd = clipboard_cmd()?;
    let program = cmd.get_program().to_string_lossy().into_owned();
    tracing::debug!(%program, "piping to clipboard command");
    let mut child = cmd
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to start the clipboard command (`{program}`)"))?;
    {
        let mut stdin = child
            .stdin
            .take()
            .context("the clipboard command has no stdin")?;
        stdin
            .write_all(data)
            .with_context(|| format!("failed to write to the clipboard command (`{program}`)"))?;
    }
    let exit_status = child
        .wait()
        .with_context(|| format!("failed to wait for the clipboard command (`{program}`)"))?;
    if exit_status.success() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "the clipboard command (`{program}`) exited with {exit_status}"
        ))
    }
}

fn clipboard_cmd() -> anyhow::Result<Command> {
    match env::var("PASSGEN_CLIPBOARD") {
        Ok(line) => command_from_line(&line),
        Err(env::VarError::NotPresent) => Ok(default_clipboard_cmd()),
        Err(err) => Err(err).context("PASSGEN_CLIPBOARD is not valid unicode"),
    }
}

fn command_from_line(line: &str) -> anyhow::Result<Command> {
    let mut words = line.split_whitespace();
    let program = words
        .next()
        .ok_or_else(|| anyhow::anyhow!("PASSGEN_CLIPBOARD is set, but empty"))?;
    let mut cmd = Command::new(program);
    cmd.args(words);
    Ok(cmd)
}

#[cfg(target_os = "macos")]
fn default_clipboard_cmd() -> Command {
    Command::new("pbcopy")
}

#[cfg(not(target_os = "macos"))]
fn default_clipboard_cmd() -> Command {
    let mut cmd = Command::new("xsel");
    cmd.arg("-b");
    cmd
}
