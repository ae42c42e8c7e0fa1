use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{Result as IoResult, Write};
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, warn};

/// Source of user input lines.
///
/// `Ok(None)` means the user closed the input (Ctrl-D) or interrupted it
/// (Ctrl-C); the session then ends without an error.
pub trait Console {
    /// Show `prompt` and read one line without its trailing newline.
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>>;
}

/// Interactive console backed by rustyline, with line editing and history.
pub struct RustylineConsole {
    editor: DefaultEditor,
    history: Option<PathBuf>,
}

impl RustylineConsole {
    /// Open the terminal. When `history` is given, previous entries are loaded
    /// from it and the file is rewritten when the console is dropped.
    pub fn new(history: Option<PathBuf>) -> rustyline::Result<Self> {
        let mut editor = DefaultEditor::new()?;
        if let Some(path) = &history {
            // A missing file on the first run is expected.
            if let Err(err) = editor.load_history(path) {
                debug!(path = %path.display(), error = %err, "no history loaded");
            }
        }
        Ok(Self { editor, history })
    }
}

impl Console for RustylineConsole {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor
                        .add_history_entry(line.as_str())
                        .map_err(|e| anyhow::anyhow!("failed to record history: {}", e))?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => {
                debug!("input interrupted");
                Ok(None)
            }
            Err(ReadlineError::Eof) => {
                debug!("end of input");
                Ok(None)
            }
            Err(err) => Err(anyhow::anyhow!("failed to read input: {}", err)),
        }
    }
}

impl Drop for RustylineConsole {
    fn drop(&mut self) {
        if let Some(path) = &self.history {
            if let Err(err) = self.editor.save_history(path) {
                warn!(path = %path.display(), error = %err, "failed to save history");
            }
        }
    }
}

/// Console that replays a fixed list of lines, echoing each prompt and answer
/// into a shared transcript. Used to drive sessions in tests.
pub struct ScriptedConsole {
    lines: VecDeque<String>,
    transcript: MemWriter,
}

impl ScriptedConsole {
    /// Create a console that answers prompts with `lines` in order and writes
    /// the prompts into `transcript`.
    pub fn new<I, S>(lines: I, transcript: MemWriter) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            transcript,
        }
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        self.transcript.write_all(prompt.as_bytes())?;
        let line = self.lines.pop_front();
        if let Some(line) = &line {
            writeln!(self.transcript, "{}", line)?;
        }
        Ok(line)
    }
}

/// Memory-backed writer for capturing session output.
#[derive(Clone, Default)]
pub struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    /// Public constructor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience: create writer and return (writer, rc_handle).
    pub fn with_handle() -> (Self, Rc<RefCell<Vec<u8>>>) {
        let mw = MemWriter::new();
        let rc = mw.buf.clone();
        (mw, rc)
    }

    /// Everything written so far, decoded lossily.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.borrow()).into_owned()
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_console_replays_lines() {
        let (transcript, handle) = MemWriter::with_handle();
        let mut console = ScriptedConsole::new(["6+3", ""], transcript);

        assert_eq!(console.read_line("> ").unwrap(), Some("6+3".to_string()));
        assert_eq!(console.read_line("> ").unwrap(), Some(String::new()));
        assert_eq!(console.read_line("> ").unwrap(), None);

        let s = String::from_utf8(handle.borrow().clone()).unwrap();
        assert_eq!(s, "> 6+3\n> \n> ");
    }

    #[test]
    fn test_mem_writer_clones_share_buffer() {
        let writer = MemWriter::new();
        let mut other = writer.clone();
        write!(other, "Total: {}", 9).unwrap();
        assert_eq!(writer.contents(), "Total: 9");
    }
}
