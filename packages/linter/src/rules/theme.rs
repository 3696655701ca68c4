use regex::Regex;

use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use popdoc_schema::{Mode, PopupDocument};

/// Flags theme/container color strings that do not look like CSS hex
/// colors. The schema deliberately leaves colors as opaque strings, so
/// format problems are advisory.
pub struct ColorFormatRule;

impl LintRule for ColorFormatRule {
    fn name(&self) -> &'static str {
        "color-format"
    }

    fn description(&self) -> &'static str {
        "Colors should be CSS hex strings"
    }

    fn check(&self, doc: &PopupDocument) -> Option<Diagnostic> {
        let hex = Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
            .unwrap();

        let fields = [
            ("theme.brandColor", &doc.theme.brand_color),
            ("theme.backgroundColor", &doc.theme.background_color),
            ("theme.textColor", &doc.theme.text_color),
            ("theme.mutedTextColor", &doc.theme.muted_text_color),
            ("container.backgroundColor", &doc.container.background_color),
        ];

        fields.iter().find_map(|(field, value)| {
            if hex.is_match(value) {
                return None;
            }
            Some(Diagnostic::warning(
                self.name(),
                format!("{field} \"{value}\" does not look like a CSS hex color"),
            ))
        })
    }
}

/// Flags a container background whose lightness disagrees with the
/// theme mode: a near-white surface in dark mode or a near-black one in
/// light mode.
pub struct ModeBackgroundRule;

impl LintRule for ModeBackgroundRule {
    fn name(&self) -> &'static str {
        "mode-background-agreement"
    }

    fn description(&self) -> &'static str {
        "Container background should agree with the theme mode"
    }

    fn check(&self, doc: &PopupDocument) -> Option<Diagnostic> {
        // Unparseable colors are color-format's problem
        let luminance = hex_luminance(&doc.container.background_color)?;

        match doc.theme.mode {
            Mode::Dark if luminance > 0.75 => Some(
                Diagnostic::warning(
                    self.name(),
                    "container background is light while the theme mode is dark",
                )
                .with_suggestion("Pick a darker container background or switch to light mode"),
            ),
            Mode::Light if luminance < 0.25 => Some(
                Diagnostic::warning(
                    self.name(),
                    "container background is dark while the theme mode is light",
                )
                .with_suggestion("Pick a lighter container background or switch to dark mode"),
            ),
            _ => None,
        }
    }
}

/// Approximate relative luminance of a #RGB or #RRGGBB color, 0.0 to 1.0.
fn hex_luminance(color: &str) -> Option<f64> {
    let digits = color.strip_prefix('#')?;
    let (r, g, b) = match digits.len() {
        3 => {
            let channel = |i: usize| u8::from_str_radix(&digits[i..=i], 16).map(|v| v * 17);
            (
                channel(0).ok()?,
                channel(1).ok()?,
                channel(2).ok()?,
            )
        }
        6 => (
            u8::from_str_radix(&digits[0..2], 16).ok()?,
            u8::from_str_radix(&digits[2..4], 16).ok()?,
            u8::from_str_radix(&digits[4..6], 16).ok()?,
        ),
        _ => return None,
    };

    Some((0.2126 * r as f64 + 0.7152 * g as f64 + 0.0722 * b as f64) / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use popdoc_schema::PopupType;

    fn doc(mode: Mode) -> PopupDocument {
        PopupDocument::empty(PopupType::Modal, mode, "#2563EB")
    }

    #[test]
    fn default_themes_are_clean() {
        assert!(ColorFormatRule.check(&doc(Mode::Light)).is_none());
        assert!(ColorFormatRule.check(&doc(Mode::Dark)).is_none());
        assert!(ModeBackgroundRule.check(&doc(Mode::Light)).is_none());
        assert!(ModeBackgroundRule.check(&doc(Mode::Dark)).is_none());
    }

    #[test]
    fn css_keyword_color_is_flagged() {
        let mut doc = doc(Mode::Light);
        doc.theme.brand_color = "rebeccapurple".to_string();
        let diagnostic = ColorFormatRule.check(&doc).unwrap();
        assert!(diagnostic.message.contains("rebeccapurple"));
    }

    #[test]
    fn short_hex_form_is_accepted() {
        let mut doc = doc(Mode::Light);
        doc.theme.brand_color = "#f80".to_string();
        assert!(ColorFormatRule.check(&doc).is_none());
    }

    #[test]
    fn light_background_in_dark_mode_is_flagged() {
        let mut doc = doc(Mode::Dark);
        doc.container.background_color = "#FFFFFF".to_string();
        let diagnostic = ModeBackgroundRule.check(&doc).unwrap();
        assert_eq!(diagnostic.rule, "mode-background-agreement");
    }

    #[test]
    fn dark_background_in_light_mode_is_flagged() {
        let mut doc = doc(Mode::Light);
        doc.container.background_color = "#000".to_string();
        assert!(ModeBackgroundRule.check(&doc).is_some());
    }

    #[test]
    fn unparseable_backgrounds_are_left_to_color_format() {
        let mut doc = doc(Mode::Dark);
        doc.container.background_color = "white".to_string();
        assert!(ModeBackgroundRule.check(&doc).is_none());
        assert!(ColorFormatRule.check(&doc).is_some());
    }

    #[test]
    fn luminance_math() {
        assert_eq!(hex_luminance("#000000"), Some(0.0));
        assert_eq!(hex_luminance("#FFFFFF"), Some(1.0));
        assert!(hex_luminance("#808080").unwrap() > 0.4);
        assert!(hex_luminance("nope").is_none());
    }
}
