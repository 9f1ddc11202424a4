//! Output destination for `print` and `println`.
//!
//! Uses enum dispatch: the set of destinations is fixed.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// Where printed text goes.
pub enum PrintHandler {
    /// Write to stdout (default).
    Stdout,
    /// Capture into a buffer (tests, embedding).
    Buffer(RefCell<String>),
    /// Discard.
    Silent,
}

impl PrintHandler {
    pub fn buffer() -> Self {
        PrintHandler::Buffer(RefCell::new(String::new()))
    }

    /// Write `text` without a trailing newline.
    pub fn print(&self, text: &str) {
        match self {
            Self::Stdout => {
                let mut out = std::io::stdout().lock();
                // A closed stdout is not an evaluation error.
                let _ = out.write_all(text.as_bytes()).and_then(|()| out.flush());
            }
            Self::Buffer(buf) => buf.borrow_mut().push_str(text),
            Self::Silent => {}
        }
    }

    pub fn println(&self, text: &str) {
        match self {
            Self::Stdout => println!("{text}"),
            Self::Buffer(buf) => {
                let mut buf = buf.borrow_mut();
                buf.push_str(text);
                buf.push('\n');
            }
            Self::Silent => {}
        }
    }

    /// Captured output; empty for handlers that do not capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(buf) => buf.borrow().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(buf) = self {
            buf.borrow_mut().clear();
        }
    }
}

/// Print handler shared between the interpreter and its clones.
pub type SharedPrintHandler = Rc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Rc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Rc::new(PrintHandler::buffer())
}

pub fn silent_handler() -> SharedPrintHandler {
    Rc::new(PrintHandler::Silent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_captures_and_clears() {
        let handler = buffer_handler();
        handler.print("a");
        handler.println("b");
        assert_eq!(handler.output(), "ab\n");
        handler.clear();
        assert_eq!(handler.output(), "");
    }

    #[test]
    fn silent_and_stdout_capture_nothing() {
        let silent = silent_handler();
        silent.println("hidden");
        assert_eq!(silent.output(), "");
        assert_eq!(stdout_handler().output(), "");
    }
}
