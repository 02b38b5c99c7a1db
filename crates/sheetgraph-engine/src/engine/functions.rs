//! Function-call detection for usage statistics.
//!
//! A run of uppercase letters directly followed by `(` counts as a call.
//! Names containing digits or dots (`LOG10`, `STDEV.S`) are only partly seen
//! or missed entirely.

use regex::Regex;
use std::sync::OnceLock;

/// Names of the functions called in `formula`, in order, repeats included.
pub fn function_calls(formula: &str) -> Vec<&str> {
    function_call_re()
        .captures_iter(formula)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

fn function_call_re() -> &'static Regex {
    static FUNCTION_CALL_RE: OnceLock<Regex> = OnceLock::new();
    FUNCTION_CALL_RE
        .get_or_init(|| Regex::new(r"([A-Z]+)\(").expect("function call regex must compile"))
}
