//! Stack growth for deeply nested scripts.
//!
//! The parser descends once per nesting level and the evaluator once per
//! expression node and call frame. Both wrap their recursive entry points in
//! [`ensure_sufficient_stack`], so a script nested far beyond the native
//! stack size grows the stack instead of aborting the process. Runaway
//! recursion in user code is bounded separately by the interpreter's call
//! depth limit.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nest(depth: u32) -> u32 {
        ensure_sufficient_stack(|| if depth == 0 { 0 } else { nest(depth - 1) + 1 })
    }

    #[test]
    fn passes_result_through() {
        let result: Result<&str, ()> = ensure_sufficient_stack(|| Ok("done"));
        assert_eq!(result, Ok("done"));
    }

    #[test]
    fn survives_deep_nesting() {
        assert_eq!(nest(200_000), 200_000);
    }
}
