//! Destination for `print`, `println` and `time` output.
//!
//! The driver writes to stdout; tests capture into a buffer and read it back.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

pub enum PrintHandler {
    /// Writes to stdout, flushing after partial lines.
    Stdout,
    /// Accumulates output in memory.
    Buffer(Mutex<String>),
    /// Discards output.
    Silent,
}

impl PrintHandler {
    /// Write `text` with no trailing newline.
    pub fn print(&self, text: &str) {
        match self {
            Self::Stdout => {
                let mut out = std::io::stdout().lock();
                // A closed stdout is not a program error.
                let _ = out.write_all(text.as_bytes()).and_then(|()| out.flush());
            }
            Self::Buffer(buf) => buf.lock().push_str(text),
            Self::Silent => {}
        }
    }

    /// Write `text` followed by a newline.
    pub fn println(&self, text: &str) {
        match self {
            Self::Stdout => println!("{text}"),
            Self::Buffer(buf) => {
                let mut buf = buf.lock();
                buf.push_str(text);
                buf.push('\n');
            }
            Self::Silent => {}
        }
    }

    /// Everything captured so far; empty for handlers that do not capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(buf) => buf.lock().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    /// Return the captured output and reset the buffer.
    pub fn take_output(&self) -> String {
        match self {
            Self::Buffer(buf) => std::mem::take(&mut *buf.lock()),
            Self::Stdout | Self::Silent => String::new(),
        }
    }
}

pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_captures_print_and_println() {
        let handler = buffer_handler();
        handler.print("a");
        handler.print("b");
        handler.println("c");
        assert_eq!(handler.output(), "abc\n");
        assert_eq!(handler.take_output(), "abc\n");
        assert_eq!(handler.output(), "");
    }

    #[test]
    fn silent_and_stdout_capture_nothing() {
        let silent = silent_handler();
        silent.println("dropped");
        assert_eq!(silent.output(), "");
        assert_eq!(stdout_handler().take_output(), "");
    }
}
