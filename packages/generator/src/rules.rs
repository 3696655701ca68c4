//! Keyword rule tables.
//!
//! Each generation axis is an explicit ordered list of (keywords, effect)
//! pairs evaluated first-match-wins, so every rule is auditable and
//! testable on its own. Matching is case-insensitive: callers pass the
//! lowercased instruction.

/// True when any keyword occurs in the instruction.
pub fn matches_any(instruction: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| instruction.contains(k))
}

/// Words that request an image block.
pub const IMAGE_KEYWORDS: &[&str] = &["image", "banner", "visual", "product", "logo", "photo"];

/// Words that request a secondary (dismiss) call-to-action.
pub const SECONDARY_CTA_KEYWORDS: &[&str] =
    &["secondary", "later", "not now", "dismiss", "no thanks"];

/// Words that make the body copy more urgent.
pub const URGENCY_KEYWORDS: &[&str] =
    &["urgent", "urgency", "hurry", "last chance", "expires", "ends soon"];

/// Words that request short body copy.
pub const MINIMAL_KEYWORDS: &[&str] = &["minimal", "shorten", "short", "brief", "concise"];

/// Headline/body pair for one tone. Rows are tried in order; the first
/// whose keywords match wins.
#[derive(Debug)]
pub struct ToneRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub headline: &'static str,
    pub body: &'static str,
}

pub const TONE_RULES: &[ToneRule] = &[
    ToneRule {
        name: "welcome",
        keywords: &["welcome", "onboard", "new user"],
        headline: "Welcome!",
        body: "Here's a quick tour to help you get started.",
    },
    ToneRule {
        name: "promo",
        keywords: &["discount", "offer", "sale", "%", "coupon", "black friday"],
        headline: "Limited-time offer",
        body: "Unlock your deal now. Limited time only.",
    },
    ToneRule {
        name: "feature",
        keywords: &["update", "announce", "new feature"],
        headline: "What's new",
        body: "Take a quick look at what we just shipped.",
    },
];

/// Fallback when no tone keywords match.
pub const GENERIC_TONE: ToneRule = ToneRule {
    name: "generic",
    keywords: &[],
    headline: "Quick update",
    body: "Take a moment to review this message.",
};

pub fn select_tone(instruction: &str) -> &'static ToneRule {
    TONE_RULES
        .iter()
        .find(|rule| matches_any(instruction, rule.keywords))
        .unwrap_or(&GENERIC_TONE)
}

/// Primary CTA label table, first match wins.
pub const CTA_LABEL_RULES: &[(&str, &str)] = &[
    ("shop", "Shop Now"),
    ("learn", "Learn More"),
    ("start", "Get Started"),
    ("survey", "Start Survey"),
];

pub const DEFAULT_CTA_LABEL: &str = "Continue";

pub fn select_cta_label(instruction: &str) -> &'static str {
    CTA_LABEL_RULES
        .iter()
        .find(|(keyword, _)| instruction.contains(keyword))
        .map(|(_, label)| *label)
        .unwrap_or(DEFAULT_CTA_LABEL)
}

/// Replacement for the body's trailing sentence under urgency keywords.
pub const URGENT_TRAILING_PHRASE: &str = "Act now, this won't be around for long.";

/// Rewrite the trailing sentence of the body to the urgent phrase. A
/// single-sentence body is replaced wholesale.
pub fn rewrite_trailing_urgent(body: &str) -> String {
    let trimmed = body.trim_end();
    match trimmed.rfind(". ") {
        Some(split) => format!("{} {}", &trimmed[..=split], URGENT_TRAILING_PHRASE),
        None => URGENT_TRAILING_PHRASE.to_string(),
    }
}

/// Maximum body length once a minimal keyword matched.
pub const MINIMAL_BODY_MAX: usize = 60;

/// Truncate at a word boundary within `max` bytes and close with a
/// period.
pub fn truncate_at_word_boundary(body: &str, max: usize) -> String {
    if body.len() <= max {
        return body.to_string();
    }

    let mut out = String::new();
    for word in body.split_whitespace() {
        let needed = if out.is_empty() {
            word.len()
        } else {
            out.len() + 1 + word.len()
        };
        if needed > max {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }

    if out.is_empty() {
        // A single over-long word; cut at a char boundary instead
        out = body.chars().take(max).collect();
    }

    let mut out = out
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':'))
        .to_string();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_rows_are_first_match_wins() {
        assert_eq!(select_tone("welcome sale for new users").name, "welcome");
        assert_eq!(select_tone("black friday sale").name, "promo");
        assert_eq!(select_tone("announce the roadmap").name, "feature");
        assert_eq!(select_tone("hello there").name, "generic");
    }

    #[test]
    fn cta_label_precedence() {
        assert_eq!(select_cta_label("shop the learn page"), "Shop Now");
        assert_eq!(select_cta_label("learn to start"), "Learn More");
        assert_eq!(select_cta_label("nothing matches"), DEFAULT_CTA_LABEL);
    }

    #[test]
    fn urgent_rewrite_replaces_only_the_trailing_sentence() {
        let rewritten = rewrite_trailing_urgent("Unlock your deal now. Limited time only.");
        assert_eq!(
            rewritten,
            format!("Unlock your deal now. {URGENT_TRAILING_PHRASE}")
        );

        let single = rewrite_trailing_urgent("Take a moment to review this message.");
        assert_eq!(single, URGENT_TRAILING_PHRASE);
    }

    #[test]
    fn truncation_respects_word_boundaries_and_closes_the_sentence() {
        let long = "Here's a quick tour to help you get started with everything we offer today.";
        let short = truncate_at_word_boundary(long, MINIMAL_BODY_MAX);
        assert!(short.len() <= MINIMAL_BODY_MAX + 1);
        assert!(short.ends_with('.'));
        assert!(!short.ends_with(" ."));
        // No word was split in half
        for word in short.trim_end_matches('.').split_whitespace() {
            assert!(long.contains(word), "split word {word:?}");
        }
    }

    #[test]
    fn truncation_leaves_short_bodies_alone() {
        let body = "Already short.";
        assert_eq!(truncate_at_word_boundary(body, MINIMAL_BODY_MAX), body);
    }
}
