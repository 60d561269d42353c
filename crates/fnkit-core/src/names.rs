use regex::Regex;
use std::sync::OnceLock;

static UNSAFE_CHARS_RE: OnceLock<Regex> = OnceLock::new();

fn unsafe_chars_re() -> &'static Regex {
    UNSAFE_CHARS_RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_\-]").unwrap())
}

/// Turn a user-facing function name into a code identifier: every `-`
/// becomes `_`. Idempotent.
pub fn canonicalize(raw: &str) -> String {
    raw.replace('-', "_")
}

/// Strip every character that is not safe to embed verbatim in a generated
/// file or file name. Only ASCII letters, digits, `_` and `-` survive.
pub fn sanitize(name: &str) -> String {
    unsafe_chars_re().replace_all(name, "").into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
