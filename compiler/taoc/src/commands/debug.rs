//! Debug commands: `parse` and `lex` for inspecting the front end.

use super::{read_file, Diagnostic};

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) -> Result<(), String> {
    let source = read_file(path)?;
    let tokens = tao_lexer::lex(&source)
        .map_err(|e| Diagnostic::from(tao_parse::ParseError::from(e)).render(path, &source))?;

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in &tokens {
        println!("  {:?} @ {}", token.kind, token.span);
    }
    Ok(())
}

/// Parse a file and display the statement tree.
pub fn parse_file(path: &str) -> Result<(), String> {
    let source = read_file(path)?;
    let program = tao_parse::parse_source(&source)
        .map_err(|e| Diagnostic::from(e).render(path, &source))?;

    println!("Parse result for '{path}' ({} statements):", program.stmts.len());
    for stmt in &program.stmts {
        println!("{stmt:#?}");
    }
    Ok(())
}
