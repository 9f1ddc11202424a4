//! `tao run`: lex, parse, execute, then drain the task queue.

use tao_eval::{silent_handler, stdout_handler, Interpreter, SharedPrintHandler};
use tracing::debug;

use super::{read_file, Diagnostic, RunOptions};

/// Run a source file, returning a rendered error on failure.
pub fn run_file(path: &str, options: &RunOptions) -> Result<(), String> {
    let source = read_file(path)?;
    let output = if options.quiet {
        silent_handler()
    } else {
        stdout_handler()
    };
    run_source(&source, options, output).map_err(|diag| diag.render(path, &source))
}

/// Run program text with output going to `output`.
pub fn run_source(
    source: &str,
    options: &RunOptions,
    output: SharedPrintHandler,
) -> Result<(), Diagnostic> {
    let program = tao_parse::parse_source(source)?;
    let interp = Interpreter::builder()
        .print_handler(output)
        .max_call_depth(options.max_call_depth)
        .build();
    interp.run(&program)?;
    let tasks = interp.drain_tasks()?;
    debug!(tasks, "task queue drained");
    Ok(())
}
