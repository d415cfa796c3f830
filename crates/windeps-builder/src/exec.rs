use std::env;
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::log_sanitize::sanitize_log_line;

/// Locate the build-configuration tool. `CMAKE_EXE` overrides PATH lookup.
pub fn cmake_exe() -> Result<PathBuf> {
    locate_tool("cmake", "CMAKE_EXE")
}

/// Locate the project-build tool. `MSBUILD_EXE` overrides PATH lookup.
pub fn msbuild_exe() -> Result<PathBuf> {
    locate_tool("msbuild", "MSBUILD_EXE")
}

fn locate_tool(name: &str, env_var: &str) -> Result<PathBuf> {
    if let Some(raw) = env::var_os(env_var) {
        let path = PathBuf::from(raw);
        if !path.is_file() {
            return Err(Error::msg(format!(
                "{env_var} points at {} which does not exist",
                path.display()
            )));
        }
        return Ok(path);
    }
    which::which(name).map_err(|e| Error::msg(format!("{name} not found on PATH: {e}")))
}

/// Run an external tool to completion, streaming merged stdout/stderr to the
/// log line by line. Blocks with no timeout; a hung tool hangs the run.
/// A non-zero exit is an error.
pub fn run_cmd(mut cmd: Command) -> Result<()> {
    info!("execute: {:?}", cmd);

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::msg(format!("spawn failed: {e}")))?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (tx, rx) = mpsc::channel::<String>();
    if let Some(out) = stdout {
        let tx = tx.clone();
        std::thread::spawn(move || stream_lines(out, tx));
    }
    if let Some(err) = stderr {
        let tx = tx.clone();
        std::thread::spawn(move || stream_lines(err, tx));
    }
    drop(tx);

    for line in rx {
        let line = sanitize_log_line(&line);
        if line.is_empty() {
            continue;
        }
        debug!("{line}");
    }

    let status = child
        .wait()
        .map_err(|e| Error::msg(format!("wait failed: {e}")))?;
    if !status.success() {
        return Err(Error::msg(format!("command failed: {status}")));
    }
    Ok(())
}

// Line splitter for tool output. Bare carriage returns count as line breaks
// too: MSBuild redraws progress counters with `\r` and never sends the `\n`.
// Lines are capped so a tool that never emits a break cannot grow the buffer
// without bound.
fn stream_lines<R: Read>(reader: R, tx: mpsc::Sender<String>) {
    const MAX_LINE_BYTES: usize = 16 * 1024;

    let flush = |pending: &mut Vec<u8>| {
        if !pending.is_empty() {
            let _ = tx.send(String::from_utf8_lossy(pending).into_owned());
            pending.clear();
        }
    };

    let mut r = BufReader::new(reader);
    let mut pending: Vec<u8> = Vec::with_capacity(256);
    loop {
        let consumed = {
            let chunk = match r.fill_buf() {
                Ok(chunk) if !chunk.is_empty() => chunk,
                _ => break,
            };
            for &b in chunk {
                if b == b'\n' || b == b'\r' {
                    flush(&mut pending);
                } else {
                    pending.push(b);
                    if pending.len() >= MAX_LINE_BYTES {
                        flush(&mut pending);
                    }
                }
            }
            chunk.len()
        };
        r.consume(consumed);
    }
    flush(&mut pending);
}
