//! Best-effort coercion of a possibly-invalid candidate into a
//! guaranteed-valid document.
//!
//! `repair` never fails. Every scalar field has a fallback: unknown
//! enum tokens take the default variant, out-of-range numerics clamp to
//! the nearest bound, malformed URLs become placeholders, and fields the
//! caller insists on (brand color, mode, popup type) are force-written
//! from the enforced context rather than trusted from the candidate.
//! Elements with an unrecognized kind tag are dropped; recognized
//! elements are repaired field-by-field, never dropped for missing
//! optional fields.
//!
//! Both historical wire shapes are salvaged: the canonical tagged
//! `source`/`action` objects, and the older flat `url`/`alt` and
//! `actionType`/`actionValue` fields with their `kind`/`button` element
//! tags.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use popdoc_editor::ordering;
use popdoc_schema::defaults::{
    PLACEHOLDER_ACTION_URL, PLACEHOLDER_IMAGE_ALT, PLACEHOLDER_IMAGE_URL,
};
use popdoc_schema::{
    clamp_to, Align, AspectRatio, CtaAction, CtaProps, Element, ElementKind, ElementType,
    FontWeight, IdGenerator, ImageFit, ImageProps, ImageSource, Mode, PopupContainer,
    PopupDocument, PopupTheme, PopupType, Spacing, TextProps, CONTAINER_PADDING_MAX,
    CONTAINER_RADIUS_MAX, FONT_SIZE_MAX, FONT_SIZE_MIN, IMAGE_HEIGHT_MAX, IMAGE_HEIGHT_MIN,
    IMAGE_RADIUS_MAX, MAX_WIDTH_MAX, MAX_WIDTH_MIN, SCHEMA_VERSION, SPACING_MAX,
};

/// Fields the caller insists on regardless of what the candidate
/// contains. They originate from trusted caller state, so they are
/// force-overwritten, not merely defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct EnforcedContext {
    pub brand_color: String,
    pub mode: Mode,
    pub popup_type: PopupType,
}

/// Coerce any candidate value into a valid document.
pub fn repair(candidate: &Value, ctx: &EnforcedContext) -> PopupDocument {
    let mut repairer = Repairer {
        ids: IdGenerator::new("repair"),
        seen_ids: HashSet::new(),
    };

    let mut doc = repairer.document(candidate, ctx);
    ordering::reindex(&mut doc.elements);
    doc
}

struct Repairer {
    ids: IdGenerator,
    seen_ids: HashSet<String>,
}

impl Repairer {
    fn document(&mut self, candidate: &Value, ctx: &EnforcedContext) -> PopupDocument {
        let Some(obj) = candidate.as_object() else {
            debug!("candidate is not an object, substituting an empty document");
            return PopupDocument::empty(ctx.popup_type, ctx.mode, &ctx.brand_color);
        };

        PopupDocument {
            version: SCHEMA_VERSION.to_string(),
            popup_type: ctx.popup_type,
            theme: self.theme(obj.get("theme"), ctx),
            container: self.container(obj.get("container"), ctx),
            elements: self.elements(obj.get("elements")),
            warnings: self.warnings(obj.get("warnings")),
        }
    }

    fn theme(&self, value: Option<&Value>, ctx: &EnforcedContext) -> PopupTheme {
        let mut theme = PopupTheme::for_mode(ctx.mode, &ctx.brand_color);

        if let Some(obj) = value.and_then(Value::as_object) {
            if let Some(color) = non_empty_str(obj.get("backgroundColor")) {
                theme.background_color = color;
            }
            if let Some(color) = non_empty_str(obj.get("textColor")) {
                theme.text_color = color;
            }
            if let Some(color) = non_empty_str(obj.get("mutedTextColor")) {
                theme.muted_text_color = color;
            }
        }

        // mode and brandColor stay enforced even when the candidate
        // disagrees
        theme
    }

    fn container(&self, value: Option<&Value>, ctx: &EnforcedContext) -> PopupContainer {
        let mut container = PopupContainer::for_type(ctx.popup_type, ctx.mode);

        let Some(obj) = value.and_then(Value::as_object) else {
            return container;
        };

        if let Some(ratio) = obj
            .get("aspectRatio")
            .and_then(Value::as_str)
            .and_then(AspectRatio::parse)
        {
            container.aspect_ratio = ratio;
        } else if obj.contains_key("aspectRatio") {
            debug!("unknown aspect ratio, falling back to auto");
            container.aspect_ratio = AspectRatio::Auto;
        }

        if let Some(color) = non_empty_str(obj.get("backgroundColor")) {
            container.background_color = color;
        }
        if let Some(n) = lenient_int(obj.get("cornerRadius")) {
            container.corner_radius = clamp_to(n, 0, CONTAINER_RADIUS_MAX);
        }
        if let Some(n) = lenient_int(obj.get("padding")) {
            container.padding = clamp_to(n, 0, CONTAINER_PADDING_MAX);
        }
        if let Some(n) = lenient_int(obj.get("maxWidth")) {
            container.max_width = clamp_to(n, MAX_WIDTH_MIN, MAX_WIDTH_MAX);
        }
        if let Some(b) = obj.get("showCloseIcon").and_then(Value::as_bool) {
            container.show_close_icon = b;
        }
        if let Some(b) = obj.get("backdrop").and_then(Value::as_bool) {
            container.backdrop = b;
        }
        if let Some(b) = obj.get("dismissible").and_then(Value::as_bool) {
            container.dismissible = b;
        }
        if let Some(b) = obj.get("mediaSlot").and_then(Value::as_bool) {
            container.media_slot = b;
        }

        container
    }

    fn elements(&mut self, value: Option<&Value>) -> Vec<Element> {
        let Some(arr) = value.and_then(Value::as_array) else {
            return Vec::new();
        };

        let mut elements = Vec::new();
        let mut last_order = 0i64;
        for (index, item) in arr.iter().enumerate() {
            if let Some(element) = self.element(index, item, last_order) {
                last_order = element.order;
                elements.push(element);
            }
        }
        elements
    }

    fn element(&mut self, index: usize, value: &Value, last_order: i64) -> Option<Element> {
        let Some(obj) = value.as_object() else {
            debug!(index, "dropping non-object element");
            return None;
        };

        // The oldest generation tagged elements with "kind" and called
        // CTAs "button"
        let tag = obj
            .get("type")
            .or_else(|| obj.get("kind"))
            .and_then(Value::as_str);
        let element_type = match tag {
            Some("text") => ElementType::Text,
            Some("image") => ElementType::Image,
            Some("cta") | Some("button") => ElementType::Cta,
            other => {
                // Generator output may include speculative kinds; they
                // are dropped, not errors.
                debug!(index, kind = ?other, "dropping element with unrecognized kind");
                return None;
            }
        };

        // The defaulted element of this kind is the fallback for every
        // field the candidate is missing or has mangled.
        let mut element = Element::new(element_type, self.usable_id(obj));

        if let Some(name) = non_empty_str(obj.get("name")) {
            element.name = name;
        }
        // A missing order ties with the previous element; the stable
        // reindex then keeps the candidate's relative position.
        element.order = lenient_int(obj.get("order")).unwrap_or(last_order);
        if let Some(align) = obj
            .get("align")
            .and_then(Value::as_str)
            .and_then(Align::parse)
        {
            element.align = align;
        }
        element.margin = self.spacing(obj.get("margin"), element.margin);
        element.padding = self.spacing(obj.get("padding"), element.padding);

        match &mut element.kind {
            ElementKind::Text(props) => Self::text_props(obj, props),
            ElementKind::Image(props) => Self::image_props(obj, props),
            ElementKind::Cta(props) => Self::cta_props(obj, props),
        }

        Some(element)
    }

    fn text_props(obj: &Map<String, Value>, props: &mut TextProps) {
        if let Some(Value::String(text)) = obj.get("text") {
            props.text = text.clone();
        }
        if let Some(n) = lenient_int(obj.get("fontSize")) {
            props.font_size = clamp_to(n, FONT_SIZE_MIN, FONT_SIZE_MAX);
        }
        if let Some(weight) = lenient_int(obj.get("fontWeight")).and_then(FontWeight::parse) {
            props.font_weight = weight;
        }
        if let Some(color) = non_empty_str(obj.get("color")) {
            props.color = Some(color);
        }
    }

    fn image_props(obj: &Map<String, Value>, props: &mut ImageProps) {
        if let Some(source) = Self::image_source(obj) {
            props.source = source;
        }
        if let Some(n) = lenient_int(obj.get("height")) {
            props.height = clamp_to(n, IMAGE_HEIGHT_MIN, IMAGE_HEIGHT_MAX);
        }
        // "radius" is the historical spelling of cornerRadius
        if let Some(n) = lenient_int(obj.get("cornerRadius")).or_else(|| lenient_int(obj.get("radius"))) {
            props.corner_radius = clamp_to(n, 0, IMAGE_RADIUS_MAX);
        }
        if let Some(fit) = obj
            .get("fit")
            .and_then(Value::as_str)
            .and_then(ImageFit::parse)
        {
            props.fit = fit;
        }
    }

    /// None means "nothing usable in the candidate, keep the default".
    fn image_source(obj: &Map<String, Value>) -> Option<ImageSource> {
        if let Some(source) = obj.get("source").and_then(Value::as_object) {
            return match source.get("kind").and_then(Value::as_str) {
                Some("none") => Some(ImageSource::None),
                Some("url") => Some(Self::url_source(source.get("url"), source.get("alt"))),
                _ if source.contains_key("url") => {
                    Some(Self::url_source(source.get("url"), source.get("alt")))
                }
                _ => Some(ImageSource::None),
            };
        }

        // Historical flag form: flat url/alt on the element, optionally
        // gated by enabled/hidden booleans.
        let enabled = obj.get("enabled").and_then(Value::as_bool).unwrap_or(true)
            && !obj.get("hidden").and_then(Value::as_bool).unwrap_or(false);
        if !enabled {
            return Some(ImageSource::None);
        }
        if obj.contains_key("url") || obj.contains_key("alt") {
            return Some(Self::url_source(obj.get("url"), obj.get("alt")));
        }

        None
    }

    fn url_source(url: Option<&Value>, alt: Option<&Value>) -> ImageSource {
        let url = match non_empty_str(url) {
            Some(candidate) if Url::parse(&candidate).is_ok() => candidate,
            _ => {
                debug!("unusable image url, substituting placeholder");
                PLACEHOLDER_IMAGE_URL.to_string()
            }
        };
        let alt = non_empty_str(alt).unwrap_or_else(|| PLACEHOLDER_IMAGE_ALT.to_string());
        ImageSource::Url { url, alt }
    }

    fn cta_props(obj: &Map<String, Value>, props: &mut CtaProps) {
        if let Some(label) = non_empty_str(obj.get("label")) {
            props.label = label;
        }
        if let Some(variant) = obj
            .get("variant")
            .and_then(Value::as_str)
            .and_then(popdoc_schema::CtaVariant::parse)
        {
            props.variant = variant;
        }
        if let Some(b) = obj.get("fullWidth").and_then(Value::as_bool) {
            props.full_width = b;
        }
        if let Some(action) = Self::cta_action(obj) {
            props.action = action;
        }
    }

    /// None means "nothing usable in the candidate, keep the default".
    fn cta_action(obj: &Map<String, Value>) -> Option<CtaAction> {
        if let Some(action) = obj.get("action").and_then(Value::as_object) {
            return match action.get("type").and_then(Value::as_str) {
                Some("dismiss") => Some(CtaAction::Dismiss),
                Some("url") => Some(CtaAction::Url {
                    value: usable_url(action.get("value")),
                }),
                _ => Some(CtaAction::Dismiss),
            };
        }

        // Historical flat form
        match obj.get("actionType").and_then(Value::as_str) {
            Some("dismiss") => Some(CtaAction::Dismiss),
            Some("url") => Some(CtaAction::Url {
                value: usable_url(obj.get("actionValue")),
            }),
            _ => None,
        }
    }

    fn spacing(&self, value: Option<&Value>, fallback: Spacing) -> Spacing {
        let Some(obj) = value.and_then(Value::as_object) else {
            return fallback;
        };

        let side = |key: &str, fallback: u32| {
            lenient_int(obj.get(key))
                .map(|n| clamp_to(n, 0, SPACING_MAX))
                .unwrap_or(fallback)
        };

        Spacing {
            top: side("top", fallback.top),
            right: side("right", fallback.right),
            bottom: side("bottom", fallback.bottom),
            left: side("left", fallback.left),
        }
    }

    fn warnings(&self, value: Option<&Value>) -> Vec<String> {
        match value.and_then(Value::as_array) {
            Some(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }

    /// The candidate's id when it is a fresh non-empty string, a
    /// generated one otherwise. Duplicates are regenerated so repair
    /// output always passes the validator's uniqueness check.
    fn usable_id(&mut self, obj: &Map<String, Value>) -> String {
        if let Some(id) = non_empty_str(obj.get("id")) {
            if self.seen_ids.insert(id.clone()) {
                return id;
            }
            debug!(id = %id, "regenerating duplicate element id");
        }

        loop {
            let id = self.ids.next_id();
            if self.seen_ids.insert(id.clone()) {
                return id;
            }
        }
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn lenient_int(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.round() as i64))
}

fn usable_url(value: Option<&Value>) -> String {
    match non_empty_str(value) {
        Some(candidate) if Url::parse(&candidate).is_ok() => candidate,
        _ => {
            debug!("unusable action url, substituting placeholder");
            PLACEHOLDER_ACTION_URL.to_string()
        }
    }
}
