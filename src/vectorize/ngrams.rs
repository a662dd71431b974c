use crate::labels::Marker;
use crate::vectorize::{ReportFeatures, TEST_INSTANCE};

const WINDOW: usize = 10;
const MAX_GAP: usize = 3;
const SECTION: &str = "_SECTION_";
const BREAKS: [&str; 4] = [SECTION, "PUNCTUATION", "SPECIMEN_LABEL", "OTHER_TEST"];

pub fn window_features(tokens: &[&str], marker: Marker, features: &mut ReportFeatures) {
    for (index, token) in tokens.iter().enumerate() {
        if *token != TEST_INSTANCE {
            continue;
        }
        features.mark(marker.name());
        add_section(tokens, index, features);

        let (start, end) = window(tokens, index);
        if index > start {
            features.mark(&format!("immediately_pre_window={}", tokens[index - 1]));
        }
        for i in (start..index).rev() {
            features.mark(&format!("pre_window={}", tokens[i]));
            for gap in 1..=MAX_GAP {
                if i >= start + gap {
                    features.mark(&format!("pre_window={}_{}", tokens[i - gap], tokens[i]));
                }
            }
        }
        if index + 1 < end {
            features.mark(&format!("immediately_post_window={}", tokens[index + 1]));
        }
        for i in index + 1..end {
            features.mark(&format!("post_window={}", tokens[i]));
            for gap in 1..=MAX_GAP {
                if i + gap < end {
                    features.mark(&format!("post_window={}_{}", tokens[i], tokens[i + gap]));
                }
            }
        }
    }
}

/// `[start, end)` around `index`, at most `WINDOW` tokens each way, cut at
/// the nearest break token on either side.
pub fn window(tokens: &[&str], index: usize) -> (usize, usize) {
    let lo = index.saturating_sub(WINDOW);
    let hi = (index + WINDOW).min(tokens.len());
    let start = (lo..index)
        .rev()
        .find(|&i| is_break(tokens[i]))
        .map(|i| i + 1)
        .unwrap_or(lo);
    let end = (index + 1..hi)
        .find(|&i| is_break(tokens[i]))
        .unwrap_or(hi);
    (start, end)
}

fn is_break(token: &str) -> bool {
    BREAKS.contains(&token)
}

// The section name is the token right after the closest preceding `_SECTION_`.
fn add_section(tokens: &[&str], index: usize, features: &mut ReportFeatures) {
    let mut name: &str = "";
    for token in tokens[..index].iter().rev() {
        if *token == SECTION {
            if !name.is_empty() {
                features.mark(&format!("SECTION={}", name));
            }
            return;
        }
        name = *token;
    }
}
