use anyhow::{Context, Result};
use regex::Regex;

use crate::error::ReportError;

// Share of control / replacement characters above which text is treated as
// binary content rather than a report body.
const MAX_GARBAGE_RATIO: f64 = 0.10;

const CONDENSED: [&str; 10] = [
    "OTHER_TEST",
    "PUBLICATION",
    "TEST_INSTANCE",
    "IHC",
    "PATHOLOGIST",
    "BLOCK_ACC",
    "SPECIFIC_MUT",
    "MUT_ANALYSIS",
    "FISH",
    "AUTHOR",
];

pub fn check_well_formed(text: &str) -> Result<(), ReportError> {
    if text.contains('\0') {
        return Err(ReportError::Malformed {
            reason: "NUL byte in report text".to_string(),
        });
    }
    let mut total = 0usize;
    let mut garbage = 0usize;
    for c in text.chars() {
        total += 1;
        if c == char::REPLACEMENT_CHARACTER || (c.is_control() && !c.is_whitespace()) {
            garbage += 1;
        }
    }
    if total > 0 && garbage as f64 / total as f64 > MAX_GARBAGE_RATIO {
        return Err(ReportError::Malformed {
            reason: format!("{} of {} characters are not text", garbage, total),
        });
    }
    Ok(())
}

/// Non-ASCII characters become spaces, space runs collapse, and the
/// `<newline>` placeholder used by report exports becomes a real newline.
pub fn normalize_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_space = false;
    for c in text.chars() {
        let c = if c.is_ascii() { c } else { ' ' };
        if c == ' ' {
            if last_space {
                continue;
            }
            last_space = true;
        } else {
            last_space = false;
        }
        out.push(c);
    }
    out.replace("<newline>", "\n")
}

/// Ordered rewrite table applied after standardization and before the stop
/// list. Order matters.
pub fn substitution_table() -> Result<Vec<(Regex, String)>> {
    let mut table = Vec::new();
    for token in CONDENSED {
        let mut class = String::from(r",.():;andor \-");
        for c in token.chars() {
            class.push_str(&regex::escape(&c.to_string()));
        }
        let pattern = format!("{}[{}]+{}", token, class, token);
        table.push((compile(&pattern)?, format!(" {} ", token)));
    }
    table.push((
        compile(r"TEST_INSTANCE[,.():;andor \-]+OTHER_TEST")?,
        " TEST_INSTANCE ".to_string(),
    ));
    table.push((
        compile(r"[0-9]{2}[\-\\/][0-9]{2}[\-\\/][0-9]{2,5}")?,
        " DATE ".to_string(),
    ));
    table.push((
        compile(r"(?m)(?:^|\s)[A-H]\)?\.")?,
        " SPECIMEN_LABEL ".to_string(),
    ));
    table.push((compile(r#"["()\\\-/']"#)?, " ".to_string()));
    table.push((compile(r"[.,;:?]")?, " PUNCTUATION ".to_string()));
    table.push((compile(r"[\[\]]")?, " ".to_string()));
    Ok(table)
}

pub fn stop_list() -> Result<Regex> {
    compile(
        r"(?m)(?:^|\s)(?:TO|THE|FOR|A|AN|AS|THIS|THAT|THESE|THEY|IN|OF|ON|OR|BY)(?: THE| A| AN)?(?:\s|$)",
    )
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("built-in pattern failed to compile: {}", pattern))
}
