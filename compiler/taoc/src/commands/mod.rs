//! Command handlers for the `tao` CLI.
//!
//! Shared utilities like `read_file` and diagnostic rendering live here in
//! the module root.

mod debug;
mod run;

pub use debug::{lex_file, parse_file};
pub use run::{run_file, run_source};

use tao_eval::{EvalError, DEFAULT_MAX_CALL_DEPTH};
use tao_ir::{LineIndex, Span};
use tao_parse::ParseError;

/// Options accepted by `tao run`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Discard `print`/`println` output.
    pub quiet: bool,
    pub max_call_depth: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            quiet: false,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// Split `run` arguments into options and the file path.
pub fn parse_run_args(args: &[String]) -> Result<(RunOptions, Option<String>), String> {
    let mut options = RunOptions::default();
    let mut path = None;
    for arg in args {
        if arg == "--quiet" || arg == "-q" {
            options.quiet = true;
        } else if let Some(depth) = arg.strip_prefix("--max-depth=") {
            options.max_call_depth = depth
                .parse()
                .map_err(|_| format!("invalid --max-depth value '{depth}'"))?;
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else if path.is_none() {
            path = Some(arg.clone());
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
    }
    Ok((options, path))
}

/// A failure to report, located in the source when a span is known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Option<Span>,
}

impl Diagnostic {
    /// `error: path:line:col: message`, or without the location if unknown.
    pub fn render(&self, path: &str, source: &str) -> String {
        match self.span {
            Some(span) => {
                let (line, col) = LineIndex::new(source).line_col(span.start);
                format!("error: {path}:{line}:{col}: {}", self.message)
            }
            None => format!("error: {path}: {}", self.message),
        }
    }
}

impl From<ParseError> for Diagnostic {
    fn from(err: ParseError) -> Self {
        Diagnostic {
            span: Some(err.span()),
            message: err.to_string(),
        }
    }
}

impl From<EvalError> for Diagnostic {
    fn from(err: EvalError) -> Self {
        Diagnostic {
            span: err.span,
            message: err.to_string(),
        }
    }
}

pub(crate) fn read_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => format!("error: cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => {
            format!("error: permission denied reading '{path}'")
        }
        std::io::ErrorKind::InvalidData => {
            format!("error: '{path}' contains invalid UTF-8 data")
        }
        _ => format!("error: reading '{path}': {e}"),
    })
}
