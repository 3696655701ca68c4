use serde::{Deserialize, Serialize};

/// The single schema version this generation understands. An unknown
/// version is rejected by the validator, never coerced.
pub const SCHEMA_VERSION: &str = "2.0";

/// Bounds enforced on numeric fields. The validator reports values
/// outside these ranges as violations; the repairer and mutation layer
/// clamp instead.
pub const SPACING_MAX: u32 = 80;
pub const FONT_SIZE_MIN: u32 = 10;
pub const FONT_SIZE_MAX: u32 = 72;
pub const IMAGE_HEIGHT_MIN: u32 = 80;
pub const IMAGE_HEIGHT_MAX: u32 = 320;
pub const IMAGE_RADIUS_MAX: u32 = 28;
pub const CONTAINER_RADIUS_MAX: u32 = 40;
pub const CONTAINER_PADDING_MAX: u32 = 48;
pub const MAX_WIDTH_MIN: u32 = 280;
pub const MAX_WIDTH_MAX: u32 = 860;

/// Clamp an arbitrary integer into an inclusive `u32` bound.
pub fn clamp_to(value: i64, min: u32, max: u32) -> u32 {
    value.clamp(min as i64, max as i64) as u32
}

/// Root document node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupDocument {
    pub version: String,
    pub popup_type: PopupType,
    pub theme: PopupTheme,
    pub container: PopupContainer,
    /// Rendered in ascending `order`
    pub elements: Vec<Element>,
    /// Advisory, written by the linter only
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl PopupDocument {
    pub fn find_element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn find_element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.elements.iter().any(|e| e.id == id)
    }

    pub fn count_kind(&self, element_type: ElementType) -> usize {
        self.elements
            .iter()
            .filter(|e| e.kind.element_type() == element_type)
            .count()
    }

    /// Elements in render sequence (ascending `order`, stable on ties).
    pub fn elements_sorted(&self) -> Vec<&Element> {
        let mut sorted: Vec<&Element> = self.elements.iter().collect();
        sorted.sort_by_key(|e| e.order);
        sorted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopupType {
    Modal,
    Banner,
    Slideup,
}

impl PopupType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "modal" => Some(Self::Modal),
            "banner" => Some(Self::Banner),
            "slideup" => Some(Self::Slideup),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Modal => "modal",
            Self::Banner => "banner",
            Self::Slideup => "slideup",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Light,
    Dark,
}

impl Mode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Color/mode record. No structural relation to the container; agreement
/// between the two is a lint concern, not a schema constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupTheme {
    pub mode: Mode,
    pub brand_color: String,
    pub background_color: String,
    pub text_color: String,
    pub muted_text_color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:3")]
    FourThree,
    #[serde(rename = "16:9")]
    SixteenNine,
}

impl AspectRatio {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(Self::Auto),
            "1:1" => Some(Self::Square),
            "4:3" => Some(Self::FourThree),
            "16:9" => Some(Self::SixteenNine),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Square => "1:1",
            Self::FourThree => "4:3",
            Self::SixteenNine => "16:9",
        }
    }
}

/// Chrome/layout record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupContainer {
    pub aspect_ratio: AspectRatio,
    /// Can override `theme.background_color`
    pub background_color: String,
    pub corner_radius: u32,
    pub show_close_icon: bool,
    pub padding: u32,
    pub backdrop: bool,
    pub dismissible: bool,
    pub max_width: u32,
    /// Chrome reserves a leading media region. Expected to agree with the
    /// presence of an image element; the linter reports a mismatch in
    /// either direction.
    pub media_slot: bool,
}

/// Four-sided spacing, each side bounded to `0..=SPACING_MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Spacing {
    pub const ZERO: Spacing = Spacing {
        top: 0,
        right: 0,
        bottom: 0,
        left: 0,
    };

    pub fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Clamp every side into the schema bound.
    pub fn clamped(self) -> Self {
        Self {
            top: self.top.min(SPACING_MAX),
            right: self.right.min(SPACING_MAX),
            bottom: self.bottom.min(SPACING_MAX),
            left: self.left.min(SPACING_MAX),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// One content unit inside a document. Common fields live on the struct;
/// the kind-specific payload is an internally tagged union, giving the
/// historical wire shape `{"id": ..., "type": "text", "text": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,
    pub name: String,
    /// Integer ordering key; ascending defines render sequence. Ties are
    /// transiently legal and removed by reindexing.
    pub order: i64,
    pub align: Align,
    pub margin: Spacing,
    pub padding: Spacing,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }
}

/// Closed set of element variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Text(TextProps),
    Image(ImageProps),
    Cta(CtaProps),
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Text(_) => ElementType::Text,
            Self::Image(_) => ElementType::Image,
            Self::Cta(_) => ElementType::Cta,
        }
    }
}

/// Fieldless variant tag, used by "add element" operations and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Image,
    Cta,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Cta => "cta",
        }
    }

    /// Display label used for default element names ("Text 2", "CTA 1").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Cta => "CTA",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    pub text: String,
    pub font_size: u32,
    pub font_weight: FontWeight,
    /// Optional override; otherwise `theme.text_color`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Fixed weight set, serialized as the bare number (400/500/600/700).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum FontWeight {
    W400,
    W500,
    W600,
    W700,
}

impl FontWeight {
    pub fn parse(value: i64) -> Option<Self> {
        match value {
            400 => Some(Self::W400),
            500 => Some(Self::W500),
            600 => Some(Self::W600),
            700 => Some(Self::W700),
            _ => None,
        }
    }
}

impl TryFrom<u16> for FontWeight {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        FontWeight::parse(value as i64)
            .ok_or_else(|| format!("font weight must be one of 400/500/600/700, got {value}"))
    }
}

impl From<FontWeight> for u16 {
    fn from(value: FontWeight) -> u16 {
        match value {
            FontWeight::W400 => 400,
            FontWeight::W500 => 500,
            FontWeight::W600 => 600,
            FontWeight::W700 => 700,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    pub source: ImageSource,
    pub height: u32,
    pub corner_radius: u32,
    pub fit: ImageFit,
}

/// Canonical representation of an optional image payload. The historical
/// boolean-flag form could state "enabled" while missing the url; this
/// tagged form cannot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ImageSource {
    None,
    Url { url: String, alt: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    Cover,
    Contain,
}

impl ImageFit {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cover" => Some(Self::Cover),
            "contain" => Some(Self::Contain),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaProps {
    pub label: String,
    pub variant: CtaVariant,
    pub full_width: bool,
    pub action: CtaAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaVariant {
    Primary,
    Secondary,
}

impl CtaVariant {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "primary" => Some(Self::Primary),
            "secondary" => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// CTA behavior. A `url` action's value is schema-validated as a
/// syntactically well-formed URL; `dismiss` carries no value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CtaAction {
    Dismiss,
    Url { value: String },
}
