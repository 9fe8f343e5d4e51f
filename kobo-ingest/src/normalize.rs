//! Statement text normalization.
//!
//! Deliberately shallow: it strips repeated delimiter noise and excess
//! whitespace, and must never alter the relative order or count of other
//! characters — downstream amount and date parsing depends on that.

use std::sync::LazyLock;

use regex::Regex;

use kobo_core::text::NOISE_SYMBOLS;

static PIPE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\|{2,}").expect("static regex"));
static DASH_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*-{2,}[ \t]*").expect("static regex"));
static EQUALS_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"={2,}").expect("static regex"));
static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{3,}").expect("static regex"));
static NEWLINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{4,}").expect("static regex"));

/// Normalize raw statement text. Rules apply in order — later rules see
/// the partially-cleaned string:
///
/// 1. runs of `|` collapse to one
/// 2. runs of `-` (and the space padding around them) collapse to ` - `
/// 3. runs of `=` collapse to one
/// 4. `*`, `#`, `~`, and backtick are removed outright
/// 5. runs of 3+ spaces/tabs collapse to a single space; 1–2 survive,
///    since row extraction may treat a double space as a column boundary
/// 6. runs of 4+ newlines cap at 3 (two blank lines)
pub fn quick_clean(text: &str) -> String {
    let cleaned = PIPE_RUNS.replace_all(text, "|");
    let cleaned = DASH_RUNS.replace_all(&cleaned, " - ");
    let cleaned = EQUALS_RUNS.replace_all(&cleaned, "=");
    let cleaned: String = cleaned.chars().filter(|c| !NOISE_SYMBOLS.contains(c)).collect();
    let cleaned = SPACE_RUNS.replace_all(&cleaned, " ");
    let cleaned = NEWLINE_RUNS.replace_all(&cleaned, "\n\n\n");
    cleaned.trim().to_string()
}
