//! Document validation.
//!
//! `validate` accepts an arbitrary JSON value (no assumed shape) and
//! either returns the typed document or every violation found, each with
//! a stable field path. It is a pure function: ordinary bad input is
//! reported as data, never as a panic.
//!
//! The validator is strict where the repairer is lenient: out-of-range
//! numbers, unknown enum tokens, unknown element kinds and malformed
//! URLs are violations here and fallbacks there. Duplicate or unsorted
//! `order` values are NOT violations; ties are transiently legal and the
//! ordering engine removes them.

use std::collections::HashSet;

use serde_json::{Map, Value};
use url::Url;

use crate::defaults::DEFAULT_BRAND_COLOR;
use crate::document::{
    clamp_to, Align, AspectRatio, CtaAction, CtaProps, CtaVariant, Element, ElementKind,
    FontWeight, ImageFit, ImageProps, ImageSource, Mode, PopupContainer, PopupDocument,
    PopupTheme, PopupType, Spacing, TextProps, CONTAINER_PADDING_MAX, CONTAINER_RADIUS_MAX,
    FONT_SIZE_MAX, FONT_SIZE_MIN, IMAGE_HEIGHT_MAX, IMAGE_HEIGHT_MIN, IMAGE_RADIUS_MAX,
    MAX_WIDTH_MAX, MAX_WIDTH_MIN, SCHEMA_VERSION, SPACING_MAX,
};
use crate::violation::{Violation, ViolationList};

/// Check a candidate value against the schema.
pub fn validate(candidate: &Value) -> Result<PopupDocument, ViolationList> {
    let mut checker = Checker::default();
    let doc = checker.check_document(candidate);

    if checker.violations.is_empty() {
        Ok(doc)
    } else {
        Err(ViolationList::new(checker.violations))
    }
}

/// Walks the candidate collecting violations while building the typed
/// document. Placeholder values fill violating fields so that one pass
/// reports everything; the built document is discarded on failure.
#[derive(Default)]
struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    fn violation(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.violations.push(Violation::new(path, reason));
    }

    fn check_document(&mut self, candidate: &Value) -> PopupDocument {
        let Some(obj) = candidate.as_object() else {
            self.violation("$", "expected a document object");
            return PopupDocument::empty(PopupType::Modal, Mode::Light, DEFAULT_BRAND_COLOR);
        };

        match obj.get("version") {
            Some(Value::String(s)) if s == SCHEMA_VERSION => {}
            Some(Value::String(s)) => self.violation(
                "version",
                format!("unsupported schema version \"{s}\"; expected \"{SCHEMA_VERSION}\""),
            ),
            Some(_) => self.violation("version", "expected a string"),
            None => self.violation("version", "missing required field"),
        }

        let popup_type = self.enum_field(
            obj,
            "popupType",
            "popupType",
            PopupType::parse,
            PopupType::Modal,
            "one of modal/banner/slideup",
        );

        let theme = self.check_theme(obj.get("theme"));
        let container = self.check_container(obj.get("container"));
        let elements = self.check_elements(obj.get("elements"));
        let warnings = self.check_warnings(obj.get("warnings"));

        PopupDocument {
            version: SCHEMA_VERSION.to_string(),
            popup_type,
            theme,
            container,
            elements,
            warnings,
        }
    }

    fn check_theme(&mut self, value: Option<&Value>) -> PopupTheme {
        let Some(obj) = value.and_then(Value::as_object) else {
            self.violation("theme", "expected an object");
            return PopupTheme::for_mode(Mode::Light, DEFAULT_BRAND_COLOR);
        };

        PopupTheme {
            mode: self.enum_field(
                obj,
                "mode",
                "theme.mode",
                Mode::parse,
                Mode::Light,
                "one of light/dark",
            ),
            brand_color: self.str_field(obj, "brandColor", "theme.brandColor"),
            background_color: self.str_field(obj, "backgroundColor", "theme.backgroundColor"),
            text_color: self.str_field(obj, "textColor", "theme.textColor"),
            muted_text_color: self.str_field(obj, "mutedTextColor", "theme.mutedTextColor"),
        }
    }

    fn check_container(&mut self, value: Option<&Value>) -> PopupContainer {
        let Some(obj) = value.and_then(Value::as_object) else {
            self.violation("container", "expected an object");
            return PopupContainer::for_type(PopupType::Modal, Mode::Light);
        };

        PopupContainer {
            aspect_ratio: self.enum_field(
                obj,
                "aspectRatio",
                "container.aspectRatio",
                AspectRatio::parse,
                AspectRatio::Auto,
                "one of auto/1:1/4:3/16:9",
            ),
            background_color: self.str_field(obj, "backgroundColor", "container.backgroundColor"),
            corner_radius: self.bounded_field(
                obj,
                "cornerRadius",
                "container.cornerRadius",
                0,
                CONTAINER_RADIUS_MAX,
            ),
            show_close_icon: self.bool_field(obj, "showCloseIcon", "container.showCloseIcon"),
            padding: self.bounded_field(obj, "padding", "container.padding", 0, CONTAINER_PADDING_MAX),
            backdrop: self.bool_field(obj, "backdrop", "container.backdrop"),
            dismissible: self.bool_field(obj, "dismissible", "container.dismissible"),
            max_width: self.bounded_field(
                obj,
                "maxWidth",
                "container.maxWidth",
                MAX_WIDTH_MIN,
                MAX_WIDTH_MAX,
            ),
            media_slot: self.bool_field(obj, "mediaSlot", "container.mediaSlot"),
        }
    }

    fn check_elements(&mut self, value: Option<&Value>) -> Vec<Element> {
        let Some(arr) = value.and_then(Value::as_array) else {
            self.violation("elements", "expected an array");
            return Vec::new();
        };

        let mut seen_ids: HashSet<String> = HashSet::new();
        arr.iter()
            .enumerate()
            .filter_map(|(index, v)| self.check_element(index, v, &mut seen_ids))
            .collect()
    }

    fn check_element(
        &mut self,
        index: usize,
        value: &Value,
        seen_ids: &mut HashSet<String>,
    ) -> Option<Element> {
        let path = format!("elements[{index}]");
        let Some(obj) = value.as_object() else {
            self.violation(&path, "expected an object");
            return None;
        };

        let id = self.non_empty_str_field(obj, "id", &format!("{path}.id"));
        if !id.is_empty() && !seen_ids.insert(id.clone()) {
            self.violation(format!("{path}.id"), format!("duplicate element id \"{id}\""));
        }

        let name = self.str_field(obj, "name", &format!("{path}.name"));
        let order = self.int_field(obj, "order", &format!("{path}.order"));
        let align = self.enum_field(
            obj,
            "align",
            &format!("{path}.align"),
            Align::parse,
            Align::Left,
            "one of left/center/right",
        );
        let margin = self.spacing_field(obj, "margin", &format!("{path}.margin"));
        let padding = self.spacing_field(obj, "padding", &format!("{path}.padding"));

        let kind = match obj.get("type").and_then(Value::as_str) {
            Some("text") => ElementKind::Text(self.check_text_props(obj, &path)),
            Some("image") => ElementKind::Image(self.check_image_props(obj, &path)),
            Some("cta") => ElementKind::Cta(self.check_cta_props(obj, &path)),
            Some(other) => {
                self.violation(
                    format!("{path}.type"),
                    format!("unknown element type \"{other}\""),
                );
                return None;
            }
            None => {
                self.violation(format!("{path}.type"), "missing element type tag");
                return None;
            }
        };

        Some(Element {
            id,
            name,
            order,
            align,
            margin,
            padding,
            kind,
        })
    }

    fn check_text_props(&mut self, obj: &Map<String, Value>, path: &str) -> TextProps {
        let weight_path = format!("{path}.fontWeight");
        let font_weight = match FontWeight::parse(self.int_field(obj, "fontWeight", &weight_path)) {
            Some(w) => w,
            None => {
                self.violation(weight_path, "must be one of 400/500/600/700");
                FontWeight::W400
            }
        };

        TextProps {
            text: self.str_field(obj, "text", &format!("{path}.text")),
            font_size: self.bounded_field(
                obj,
                "fontSize",
                &format!("{path}.fontSize"),
                FONT_SIZE_MIN,
                FONT_SIZE_MAX,
            ),
            font_weight,
            color: self.opt_str_field(obj, "color", &format!("{path}.color")),
        }
    }

    fn check_image_props(&mut self, obj: &Map<String, Value>, path: &str) -> ImageProps {
        let source = self.check_image_source(obj.get("source"), &format!("{path}.source"));

        ImageProps {
            source,
            height: self.bounded_field(
                obj,
                "height",
                &format!("{path}.height"),
                IMAGE_HEIGHT_MIN,
                IMAGE_HEIGHT_MAX,
            ),
            corner_radius: self.bounded_field(
                obj,
                "cornerRadius",
                &format!("{path}.cornerRadius"),
                0,
                IMAGE_RADIUS_MAX,
            ),
            fit: self.enum_field(
                obj,
                "fit",
                &format!("{path}.fit"),
                ImageFit::parse,
                ImageFit::Cover,
                "one of cover/contain",
            ),
        }
    }

    fn check_image_source(&mut self, value: Option<&Value>, path: &str) -> ImageSource {
        let Some(obj) = value.and_then(Value::as_object) else {
            self.violation(path, "expected a tagged source object");
            return ImageSource::None;
        };

        match obj.get("kind").and_then(Value::as_str) {
            Some("none") => ImageSource::None,
            Some("url") => {
                // url and alt are required together; an image with one but
                // not the other is invalid, not merely incomplete.
                let url = self.non_empty_str_field(obj, "url", &format!("{path}.url"));
                self.check_url_syntax(&url, &format!("{path}.url"));
                let alt = self.non_empty_str_field(obj, "alt", &format!("{path}.alt"));
                ImageSource::Url { url, alt }
            }
            Some(other) => {
                self.violation(
                    format!("{path}.kind"),
                    format!("unknown image source kind \"{other}\""),
                );
                ImageSource::None
            }
            None => {
                self.violation(format!("{path}.kind"), "missing image source kind tag");
                ImageSource::None
            }
        }
    }

    fn check_cta_props(&mut self, obj: &Map<String, Value>, path: &str) -> CtaProps {
        let action = self.check_cta_action(obj.get("action"), &format!("{path}.action"));

        CtaProps {
            label: self.str_field(obj, "label", &format!("{path}.label")),
            variant: self.enum_field(
                obj,
                "variant",
                &format!("{path}.variant"),
                CtaVariant::parse,
                CtaVariant::Primary,
                "one of primary/secondary",
            ),
            full_width: self.bool_field(obj, "fullWidth", &format!("{path}.fullWidth")),
            action,
        }
    }

    fn check_cta_action(&mut self, value: Option<&Value>, path: &str) -> CtaAction {
        let Some(obj) = value.and_then(Value::as_object) else {
            self.violation(path, "expected a tagged action object");
            return CtaAction::Dismiss;
        };

        match obj.get("type").and_then(Value::as_str) {
            Some("dismiss") => {
                if let Some(Value::String(v)) = obj.get("value") {
                    if !v.is_empty() {
                        self.violation(
                            format!("{path}.value"),
                            "must be absent or empty when action type is dismiss",
                        );
                    }
                }
                CtaAction::Dismiss
            }
            Some("url") => {
                let value = self.non_empty_str_field(obj, "value", &format!("{path}.value"));
                self.check_url_syntax(&value, &format!("{path}.value"));
                CtaAction::Url { value }
            }
            Some(other) => {
                self.violation(
                    format!("{path}.type"),
                    format!("unknown action type \"{other}\""),
                );
                CtaAction::Dismiss
            }
            None => {
                self.violation(format!("{path}.type"), "missing action type tag");
                CtaAction::Dismiss
            }
        }
    }

    fn check_warnings(&mut self, value: Option<&Value>) -> Vec<String> {
        match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => {
                let mut warnings = Vec::new();
                for (index, item) in items.iter().enumerate() {
                    match item {
                        Value::String(s) => warnings.push(s.clone()),
                        _ => self.violation(format!("warnings[{index}]"), "expected a string"),
                    }
                }
                warnings
            }
            Some(_) => {
                self.violation("warnings", "expected an array of strings");
                Vec::new()
            }
        }
    }

    // --- field helpers ---

    fn str_field(&mut self, obj: &Map<String, Value>, key: &str, path: &str) -> String {
        match obj.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                self.violation(path, "expected a string");
                String::new()
            }
            None => {
                self.violation(path, "missing required field");
                String::new()
            }
        }
    }

    fn non_empty_str_field(&mut self, obj: &Map<String, Value>, key: &str, path: &str) -> String {
        match obj.get(key) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::String(_)) => {
                self.violation(path, "must be a non-empty string");
                String::new()
            }
            Some(_) => {
                self.violation(path, "expected a string");
                String::new()
            }
            None => {
                self.violation(path, "missing required field");
                String::new()
            }
        }
    }

    fn opt_str_field(&mut self, obj: &Map<String, Value>, key: &str, path: &str) -> Option<String> {
        match obj.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.violation(path, "expected a string");
                None
            }
        }
    }

    fn bool_field(&mut self, obj: &Map<String, Value>, key: &str, path: &str) -> bool {
        match obj.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                self.violation(path, "expected a boolean");
                false
            }
            None => {
                self.violation(path, "missing required field");
                false
            }
        }
    }

    fn int_field(&mut self, obj: &Map<String, Value>, key: &str, path: &str) -> i64 {
        match obj.get(key) {
            Some(value) => value.as_i64().unwrap_or_else(|| {
                self.violation(path, "expected an integer");
                0
            }),
            None => {
                self.violation(path, "missing required field");
                0
            }
        }
    }

    fn bounded_field(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        path: &str,
        min: u32,
        max: u32,
    ) -> u32 {
        let raw = match obj.get(key) {
            Some(value) => match value.as_i64() {
                Some(n) => n,
                None => {
                    self.violation(path, "expected an integer");
                    return min;
                }
            },
            None => {
                self.violation(path, "missing required field");
                return min;
            }
        };

        if raw < min as i64 || raw > max as i64 {
            self.violation(path, format!("must be between {min} and {max}"));
        }
        clamp_to(raw, min, max)
    }

    fn enum_field<T: Copy>(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        path: &str,
        parse: fn(&str) -> Option<T>,
        fallback: T,
        expected: &str,
    ) -> T {
        match obj.get(key) {
            Some(Value::String(s)) => match parse(s) {
                Some(v) => v,
                None => {
                    self.violation(path, format!("unknown value \"{s}\"; expected {expected}"));
                    fallback
                }
            },
            Some(_) => {
                self.violation(path, "expected a string");
                fallback
            }
            None => {
                self.violation(path, "missing required field");
                fallback
            }
        }
    }

    fn spacing_field(&mut self, obj: &Map<String, Value>, key: &str, path: &str) -> Spacing {
        let Some(sides) = obj.get(key).and_then(Value::as_object) else {
            self.violation(path, "expected a spacing object");
            return Spacing::ZERO;
        };

        Spacing {
            top: self.bounded_field(sides, "top", &format!("{path}.top"), 0, SPACING_MAX),
            right: self.bounded_field(sides, "right", &format!("{path}.right"), 0, SPACING_MAX),
            bottom: self.bounded_field(sides, "bottom", &format!("{path}.bottom"), 0, SPACING_MAX),
            left: self.bounded_field(sides, "left", &format!("{path}.left"), 0, SPACING_MAX),
        }
    }

    fn check_url_syntax(&mut self, value: &str, path: &str) {
        if !value.is_empty() && Url::parse(value).is_err() {
            self.violation(path, format!("\"{value}\" is not a valid URL"));
        }
    }
}
