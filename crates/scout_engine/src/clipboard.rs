//! Clipboard copy as a chain of strategies.
//!
//! The primary strategy pipes text into a platform clipboard tool. When no
//! tool is installed, or the tool fails, the fallback asks the terminal to set
//! its selection with an OSC 52 escape sequence, provided stdout is a
//! terminal that can receive it. Callers only see
//! [`ClipboardChain::copy`].

use std::env;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Mutex;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use scout_logging::{scout_debug, scout_warn};

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("{strategy} is not available on this system")]
    Unavailable { strategy: &'static str },
    #[error("{strategy} failed: {message}")]
    Failed {
        strategy: &'static str,
        message: String,
    },
    #[error("all clipboard strategies failed; last error: {0}")]
    Exhausted(Box<ClipboardError>),
}

pub trait ClipboardWriter: Send + Sync {
    fn name(&self) -> &'static str;
    /// Capability check; a writer that reports `false` is skipped.
    fn is_available(&self) -> bool;
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOutcome {
    Primary,
    Fallback,
}

pub struct ClipboardChain {
    primary: Box<dyn ClipboardWriter>,
    fallback: Box<dyn ClipboardWriter>,
}

impl ClipboardChain {
    pub fn new(primary: Box<dyn ClipboardWriter>, fallback: Box<dyn ClipboardWriter>) -> Self {
        Self { primary, fallback }
    }

    /// System clipboard tool first, OSC 52 on stdout second.
    pub fn system_default() -> Self {
        let primary: Box<dyn ClipboardWriter> = match CommandClipboard::detect() {
            Some(command) => Box::new(command),
            None => Box::new(Unavailable("system clipboard")),
        };
        Self::new(primary, Box::new(Osc52Clipboard::stdout()))
    }

    pub fn copy(&self, text: &str) -> Result<ClipboardOutcome, ClipboardError> {
        match attempt(self.primary.as_ref(), text) {
            Ok(()) => return Ok(ClipboardOutcome::Primary),
            Err(err) => scout_warn!("Primary clipboard failed, falling back: {}", err),
        }
        attempt(self.fallback.as_ref(), text)
            .map(|()| ClipboardOutcome::Fallback)
            .map_err(|err| ClipboardError::Exhausted(Box::new(err)))
    }
}

fn attempt(writer: &dyn ClipboardWriter, text: &str) -> Result<(), ClipboardError> {
    if !writer.is_available() {
        return Err(ClipboardError::Unavailable {
            strategy: writer.name(),
        });
    }
    scout_debug!("Copying {} bytes via {}", text.len(), writer.name());
    writer.write_text(text)
}

struct Unavailable(&'static str);

impl ClipboardWriter for Unavailable {
    fn name(&self) -> &'static str {
        self.0
    }

    fn is_available(&self) -> bool {
        false
    }

    fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable { strategy: self.0 })
    }
}

/// Known clipboard tools, in preference order.
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip.exe", &[]),
];

/// Pipes text into an external clipboard program such as `pbcopy` or `xclip`.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<PathBuf>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    /// First known tool found on `PATH`.
    pub fn detect() -> Option<Self> {
        let path = env::var_os("PATH")?;
        let dirs: Vec<PathBuf> = env::split_paths(&path).collect();
        CLIPBOARD_TOOLS.iter().find_map(|(tool, args)| {
            dirs.iter()
                .map(|dir| dir.join(tool))
                .find(|candidate| candidate.is_file())
                .map(|program| Self::new(program, args))
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl ClipboardWriter for CommandClipboard {
    fn name(&self) -> &'static str {
        "clipboard command"
    }

    fn is_available(&self) -> bool {
        self.program.is_file()
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let failed = |message: String| ClipboardError::Failed {
            strategy: self.name(),
            message,
        };
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| failed(format!("{}: {err}", self.program.display())))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|err| failed(err.to_string()))?;
        }
        let status = child.wait().map_err(|err| failed(err.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(failed(format!("{} exited with {status}", self.program.display())))
        }
    }
}

/// Sets the terminal selection through the OSC 52 escape sequence.
///
/// Only available when `out` is a terminal; anywhere else the sequence would
/// land in the user's output instead of the clipboard.
pub struct Osc52Clipboard {
    out: Mutex<Box<dyn Write + Send>>,
    is_terminal: bool,
}

impl Osc52Clipboard {
    pub fn new(out: Box<dyn Write + Send>, is_terminal: bool) -> Self {
        Self {
            out: Mutex::new(out),
            is_terminal,
        }
    }

    pub fn stdout() -> Self {
        let stdout = io::stdout();
        let is_terminal = stdout.is_terminal();
        Self::new(Box::new(stdout), is_terminal)
    }

    pub fn sequence(text: &str) -> String {
        format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
    }
}

impl ClipboardWriter for Osc52Clipboard {
    fn name(&self) -> &'static str {
        "terminal selection (OSC 52)"
    }

    fn is_available(&self) -> bool {
        self.is_terminal
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let failed = |message: String| ClipboardError::Failed {
            strategy: self.name(),
            message,
        };
        let mut out = self
            .out
            .lock()
            .map_err(|_| failed("output lock poisoned".to_string()))?;
        out.write_all(Self::sequence(text).as_bytes())
            .and_then(|()| out.flush())
            .map_err(|err| failed(err.to_string()))
    }
}
