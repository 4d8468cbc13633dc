//! Clipboard copy strategies.
//!
//! Copying walks a ranked list of [`CopyStrategy`]s; the first success wins
//! and the last failure is reported when every strategy fails.

use std::io::{self, IsTerminal, Write};
use std::process::{Command, Stdio};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClipboardError {
    /// One strategy could not copy.
    #[error("{strategy}: {reason}")]
    Strategy {
        strategy: &'static str,
        reason: String,
    },

    /// Every configured strategy failed.
    #[error("clipboard unavailable (last failure: {last})")]
    Unavailable { last: String },

    #[error("unknown clipboard strategy '{0}'. Allowed: system, osc52")]
    UnknownStrategy(String),
}

/// One way of putting text on the clipboard.
pub trait CopyStrategy {
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns [`ClipboardError::Strategy`] when this mechanism cannot copy.
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

// ---------------------------------------------------------------------------
// System clipboard (platform commands)
// ---------------------------------------------------------------------------

/// Copies through the platform clipboard tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

#[cfg(target_os = "macos")]
const COPY_COMMANDS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const COPY_COMMANDS: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const COPY_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

impl CopyStrategy for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let mut last = "no clipboard command found".to_string();
        for (command, args) in COPY_COMMANDS {
            match run_copy_command(command, args, text) {
                Ok(()) => return Ok(()),
                Err(reason) => {
                    tracing::debug!(command, %reason, "clipboard command failed");
                    last = format!("{command}: {reason}");
                }
            }
        }
        Err(ClipboardError::Strategy {
            strategy: self.name(),
            reason: last,
        })
    }
}

fn run_copy_command(command: &str, args: &[&str], text: &str) -> Result<(), String> {
    let mut child = Command::new(command)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => "not installed".to_string(),
            _ => err.to_string(),
        })?;

    if let Some(mut stdin) = child.stdin.take()
        && let Err(err) = stdin.write_all(text.as_bytes())
    {
        drop(stdin);
        let _ = child.kill();
        let _ = child.wait();
        return Err(err.to_string());
    }

    let status = child.wait().map_err(|err| err.to_string())?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("exited with {status}"))
    }
}

// ---------------------------------------------------------------------------
// OSC 52 (terminal escape sequence)
// ---------------------------------------------------------------------------

/// Asks the terminal to set the clipboard with an OSC 52 escape sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Osc52Clipboard;

/// Escape sequence that sets the system clipboard to `text`.
#[must_use]
pub fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

impl CopyStrategy for Osc52Clipboard {
    fn name(&self) -> &'static str {
        "osc52"
    }

    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = io::stdout();
        if !stdout.is_terminal() {
            return Err(ClipboardError::Strategy {
                strategy: self.name(),
                reason: "stdout is not a terminal".to_string(),
            });
        }
        stdout
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|err| ClipboardError::Strategy {
                strategy: self.name(),
                reason: err.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// ClipboardChain
// ---------------------------------------------------------------------------

/// Ranked copy strategies.
#[derive(Default)]
pub struct ClipboardChain {
    strategies: Vec<Box<dyn CopyStrategy>>,
}

impl std::fmt::Debug for ClipboardChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.strategies.iter().map(|s| s.name()))
            .finish()
    }
}

impl ClipboardChain {
    #[must_use]
    pub fn new(strategies: Vec<Box<dyn CopyStrategy>>) -> Self {
        Self { strategies }
    }

    /// Build a chain from strategy names, in order. An empty list falls back
    /// to [`ClipboardChain::platform_default`].
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::UnknownStrategy`] for an unrecognized name.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ClipboardError> {
        if names.is_empty() {
            return Ok(Self::platform_default());
        }
        let strategies = names
            .iter()
            .map(|name| -> Result<Box<dyn CopyStrategy>, ClipboardError> {
                match name.as_ref().trim().to_ascii_lowercase().as_str() {
                    "system" => Ok(Box::new(SystemClipboard)),
                    "osc52" => Ok(Box::new(Osc52Clipboard)),
                    other => Err(ClipboardError::UnknownStrategy(other.to_string())),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(strategies))
    }

    /// Platform clipboard first, then OSC 52.
    #[must_use]
    pub fn platform_default() -> Self {
        Self::new(vec![Box::new(SystemClipboard), Box::new(Osc52Clipboard)])
    }

    /// Try each strategy in order. Returns the name of the one that worked.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::Unavailable`] with the last failure when no
    /// strategy succeeds (or none is configured).
    pub fn copy(&self, text: &str) -> Result<&'static str, ClipboardError> {
        let mut last = "no copy strategy configured".to_string();
        for strategy in &self.strategies {
            match strategy.copy(text) {
                Ok(()) => return Ok(strategy.name()),
                Err(err) => {
                    tracing::debug!(strategy = strategy.name(), %err, "copy strategy failed");
                    last = err.to_string();
                }
            }
        }
        Err(ClipboardError::Unavailable { last })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recording {
        name: &'static str,
        fail: bool,
        seen: Rc<RefCell<Vec<(&'static str, String)>>>,
    }

    impl CopyStrategy for Recording {
        fn name(&self) -> &'static str {
            self.name
        }

        fn copy(&self, text: &str) -> Result<(), ClipboardError> {
            self.seen.borrow_mut().push((self.name, text.to_string()));
            if self.fail {
                Err(ClipboardError::Strategy {
                    strategy: self.name,
                    reason: "blocked".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn chain(spec: &[(&'static str, bool)]) -> (ClipboardChain, Rc<RefCell<Vec<(&'static str, String)>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let strategies = spec
            .iter()
            .map(|&(name, fail)| {
                Box::new(Recording {
                    name,
                    fail,
                    seen: Rc::clone(&seen),
                }) as Box<dyn CopyStrategy>
            })
            .collect();
        (ClipboardChain::new(strategies), seen)
    }

    #[test]
    fn first_success_wins() {
        let (chain, seen) = chain(&[("a", false), ("b", false)]);
        assert_eq!(chain.copy("hello").unwrap(), "a");
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn falls_back_in_order() {
        let (chain, seen) = chain(&[("a", true), ("b", false)]);
        assert_eq!(chain.copy("hello").unwrap(), "b");
        let names: Vec<_> = seen.borrow().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn reports_last_failure() {
        let (chain, _) = chain(&[("a", true), ("b", true)]);
        let err = chain.copy("hello").unwrap_err();
        assert_eq!(
            err,
            ClipboardError::Unavailable {
                last: "b: blocked".into()
            }
        );
    }

    #[test]
    fn empty_chain_is_unavailable() {
        let err = ClipboardChain::default().copy("x").unwrap_err();
        assert!(matches!(err, ClipboardError::Unavailable { .. }));
    }

    #[test]
    fn builds_from_names() {
        let chain = ClipboardChain::from_names(&["System", "osc52"]).unwrap();
        assert_eq!(format!("{chain:?}"), r#"["system", "osc52"]"#);
        assert_eq!(
            ClipboardChain::from_names(&["pigeon"]).unwrap_err(),
            ClipboardError::UnknownStrategy("pigeon".into())
        );
    }

    #[test]
    fn empty_name_list_uses_platform_default() {
        let chain = ClipboardChain::from_names::<&str>(&[]).unwrap();
        assert_eq!(format!("{chain:?}"), r#"["system", "osc52"]"#);
    }

    #[cfg(unix)]
    #[test]
    fn command_closing_stdin_early_reports_write_error() {
        let text = "x".repeat(1 << 20);
        let err = run_copy_command("true", &[], &text).unwrap_err();
        assert!(!err.is_empty());
    }

    #[test]
    fn osc52_payload_is_base64() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x1b\\");
    }
}
