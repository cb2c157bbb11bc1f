use rand::seq::SliceRandom;

/// Whole-word replacements applied by [`sanitize`]. Multi-word phrases come
/// first so they win over their single-word substrings.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("donald trump", "a political figure"),
    ("joe biden", "a political leader"),
    ("kamala harris", "a political figure"),
    ("jerome powell", "a federal reserve official"),
    ("house of representatives", "legislative chamber"),
    ("federal reserve", "central bank"),
    ("fed rate", "interest rate"),
    ("trump", "a politician"),
    ("biden", "a government official"),
    ("harris", "a government official"),
    ("powell", "a fed official"),
    ("democrat", "political party member"),
    ("republican", "political party member"),
    ("gop", "political party"),
    ("congress", "legislative body"),
    ("senate", "legislative chamber"),
];

/// Only truly harmful content trips the sensitivity gate.
const SENSITIVE_KEYWORDS: &[&str] = &[
    "nazi",
    "hitler",
    "terrorism",
    "suicide",
    "murder",
    "hate crime",
];

const SAFE_TOPICS: &[&str] = &[
    "everyday life struggles",
    "work from home experiences",
    "social media habits",
    "food and cooking",
    "entertainment and movies",
    "technology and gadgets",
    "weather and seasons",
    "exercise and fitness",
    "pets and animals",
    "travel and vacation",
];

pub fn detect_sensitive(text: &str) -> bool {
    let lowered = text.to_lowercase();
    SENSITIVE_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// Lowercase the text, swap flagged terms for neutral phrasing, then restore
/// sentence capitalization. Idempotent: replacement outputs contain no
/// flagged terms.
pub fn sanitize(text: &str) -> String {
    let mut sanitized = text.to_lowercase();
    for (original, replacement) in REPLACEMENTS {
        sanitized = replace_word(&sanitized, original, replacement);
    }
    capitalize_sentences(&sanitized)
}

/// Generic prompt substituted when sanitizing leaves nothing usable.
pub fn safe_prompt() -> String {
    let topic = SAFE_TOPICS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("everyday life struggles");
    format!(
        "Create a relatable meme about {} that people will find funny and shareable",
        topic
    )
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Replace `from` with `to` only at word boundaries, so "trumpet" survives a
/// "trump" replacement. Input is already lowercased.
fn replace_word(text: &str, from: &str, to: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(position) = rest.find(from) {
        let before_ok = rest[..position]
            .chars()
            .next_back()
            .map_or(true, |ch| !is_word_char(ch));
        let after_ok = rest[position + from.len()..]
            .chars()
            .next()
            .map_or(true, |ch| !is_word_char(ch));

        out.push_str(&rest[..position]);
        if before_ok && after_ok {
            out.push_str(to);
        } else {
            out.push_str(from);
        }
        rest = &rest[position + from.len()..];
    }
    out.push_str(rest);
    out
}

/// Uppercase the first word character of each line and of each sentence
/// following a period.
fn capitalize_sentences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_line_start = true;
    let mut after_period = false;
    for ch in text.chars() {
        if (at_line_start || after_period) && is_word_char(ch) {
            out.extend(ch.to_uppercase());
            at_line_start = false;
            after_period = false;
            continue;
        }
        if !ch.is_whitespace() {
            after_period = ch == '.';
        }
        at_line_start = ch == '\n';
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_political_terms() {
        assert_eq!(
            sanitize("Trump raises the fed rate again"),
            "A politician raises the interest rate again"
        );
        assert_eq!(
            sanitize("donald trump visits congress"),
            "A political figure visits legislative body"
        );
    }

    #[test]
    fn respects_word_boundaries() {
        assert_eq!(sanitize("a trumpet solo"), "A trumpet solo");
        assert_eq!(sanitize("gopher holes"), "Gopher holes");
    }

    #[test]
    fn capitalizes_sentences() {
        assert_eq!(sanitize("first thing. second thing"), "First thing. Second thing");
        assert_eq!(sanitize("one line\nanother line"), "One line\nAnother line");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let inputs = [
            "Trump and Biden argue about the Fed Rate. congress reacts",
            "already clean text. nothing to do here",
            "the SENATE and the gop",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "input: {}", input);
        }
    }

    #[test]
    fn detects_only_harmful_keywords() {
        assert!(detect_sensitive("a documentary about Hitler"));
        assert!(detect_sensitive("jokes about HATE CRIME statistics"));
        // substring match, as coarse as it sounds
        assert!(detect_sensitive("my cat murdered my houseplant"));
        assert!(!detect_sensitive("politics and the economy"));
        assert!(!detect_sensitive("Trump and Biden argue on TV"));
    }

    #[test]
    fn safe_prompt_names_a_safe_topic() {
        let prompt = safe_prompt();
        assert!(prompt.starts_with("Create a relatable meme about "));
        assert!(SAFE_TOPICS.iter().any(|topic| prompt.contains(topic)));
    }
}
