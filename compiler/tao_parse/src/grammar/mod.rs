//! Grammar productions.
//!
//! Each module extends `Parser` with methods for one family of productions:
//!
//! - `stmt`: statements, blocks, and function definitions
//! - `expr`: the expression precedence chain, postfix operators, primaries

mod expr;
mod stmt;
