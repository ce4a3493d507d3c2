//! Clipboard sinks for the final prompt.
//!
//! The system clipboard is reached by piping text into a platform command
//! (pbcopy, wl-copy, xclip, ...). Failures are reported, never fatal.

use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::sync::Mutex;

use crate::error::{PromptBuilderError, Result};

/// Candidate commands tried in order when none is configured
const CANDIDATES: &[&[&str]] = &[
    &["pbcopy"],
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "--clipboard", "--input"],
    &["clip.exe"],
];

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Pipes text into an external clipboard command
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Build from a whitespace-separated command line
    pub fn from_command_line(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or_else(|| PromptBuilderError::Config {
            message: "clipboard command cannot be empty".into(),
        })?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// First candidate found on PATH
    pub fn detect() -> Option<Self> {
        CANDIDATES
            .iter()
            .find(|c| on_path(c[0]))
            .map(|c| Self {
                program: c[0].to_string(),
                args: c[1..].iter().map(|s| s.to_string()).collect(),
            })
    }

    /// Configured command, else auto-detection
    pub fn resolve(configured: Option<&str>) -> Result<Self> {
        match configured {
            Some(line) => Self::from_command_line(line),
            None => Self::detect().ok_or_else(|| PromptBuilderError::Clipboard {
                message: "no clipboard command found (tried pbcopy, wl-copy, xclip, xsel, clip.exe)"
                    .into(),
            }),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Write `text` into the child's stdin and reap it. A child that stops
    /// reading is killed and waited on before the error is returned.
    fn feed(&self, child: &mut Child, text: &str) -> Result<()> {
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        if let Err(e) = written {
            let _ = child.kill();
            let _ = child.wait();
            return Err(PromptBuilderError::Clipboard {
                message: format!("failed to write to {}: {}", self.program, e),
            });
        }
        let status = child.wait().map_err(|e| PromptBuilderError::Clipboard {
            message: e.to_string(),
        })?;
        if !status.success() {
            return Err(PromptBuilderError::Clipboard {
                message: format!("{} exited with {}", self.program, status),
            });
        }
        Ok(())
    }
}

impl Clipboard for CommandClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PromptBuilderError::Clipboard {
                message: format!("failed to spawn {}: {}", self.program, e),
            })?;
        self.feed(&mut child, text)
    }
}

/// Used when no system clipboard could be resolved; every write fails
#[derive(Debug, Clone)]
pub struct UnavailableClipboard {
    pub reason: String,
}

impl Clipboard for UnavailableClipboard {
    fn write_text(&self, _text: &str) -> Result<()> {
        Err(PromptBuilderError::Clipboard {
            message: self.reason.clone(),
        })
    }
}

/// In-memory clipboard, keeps every write
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<String> {
        self.writes.lock().ok()?.last().cloned()
    }

    pub fn len(&self) -> usize {
        self.writes.lock().map(|w| w.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        self.writes
            .lock()
            .map_err(|e| PromptBuilderError::Internal {
                message: format!("clipboard lock poisoned: {}", e),
            })?
            .push(text.to_string());
        Ok(())
    }
}

fn on_path(program: &str) -> bool {
    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| dir.join(program).is_file())
}
