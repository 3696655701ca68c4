//! Round-trip property: encode(document) → decode → validate succeeds
//! with zero violations for every document the validator accepts.

use proptest::prelude::*;

use popdoc_schema::{
    validate, Align, AspectRatio, CtaAction, CtaProps, CtaVariant, Element, ElementKind,
    FontWeight, ImageFit, ImageProps, ImageSource, Mode, PopupContainer, PopupDocument,
    PopupTheme, PopupType, Spacing, TextProps, CONTAINER_PADDING_MAX, CONTAINER_RADIUS_MAX,
    FONT_SIZE_MAX, FONT_SIZE_MIN, IMAGE_HEIGHT_MAX, IMAGE_HEIGHT_MIN, IMAGE_RADIUS_MAX,
    MAX_WIDTH_MAX, MAX_WIDTH_MIN, SCHEMA_VERSION, SPACING_MAX,
};

fn arb_align() -> impl Strategy<Value = Align> {
    prop_oneof![Just(Align::Left), Just(Align::Center), Just(Align::Right)]
}

fn arb_spacing() -> impl Strategy<Value = Spacing> {
    (0..=SPACING_MAX, 0..=SPACING_MAX, 0..=SPACING_MAX, 0..=SPACING_MAX)
        .prop_map(|(top, right, bottom, left)| Spacing::new(top, right, bottom, left))
}

fn arb_hex_color() -> impl Strategy<Value = String> {
    "#[0-9a-fA-F]{6}"
}

fn arb_text_kind() -> impl Strategy<Value = ElementKind> {
    (
        "[ -~]{0,80}",
        FONT_SIZE_MIN..=FONT_SIZE_MAX,
        prop_oneof![
            Just(FontWeight::W400),
            Just(FontWeight::W500),
            Just(FontWeight::W600),
            Just(FontWeight::W700),
        ],
        proptest::option::of(arb_hex_color()),
    )
        .prop_map(|(text, font_size, font_weight, color)| {
            ElementKind::Text(TextProps {
                text,
                font_size,
                font_weight,
                color,
            })
        })
}

fn arb_image_kind() -> impl Strategy<Value = ElementKind> {
    (
        prop_oneof![
            Just(ImageSource::None),
            ("[a-z]{3,10}", "[A-Za-z ]{1,30}").prop_map(|(slug, alt)| ImageSource::Url {
                url: format!("https://img.example/{slug}.png"),
                alt,
            }),
        ],
        IMAGE_HEIGHT_MIN..=IMAGE_HEIGHT_MAX,
        0..=IMAGE_RADIUS_MAX,
        prop_oneof![Just(ImageFit::Cover), Just(ImageFit::Contain)],
    )
        .prop_map(|(source, height, corner_radius, fit)| {
            ElementKind::Image(ImageProps {
                source,
                height,
                corner_radius,
                fit,
            })
        })
}

fn arb_cta_kind() -> impl Strategy<Value = ElementKind> {
    (
        "[A-Za-z !]{1,30}",
        prop_oneof![Just(CtaVariant::Primary), Just(CtaVariant::Secondary)],
        any::<bool>(),
        prop_oneof![
            Just(CtaAction::Dismiss),
            "[a-z]{3,10}".prop_map(|slug| CtaAction::Url {
                value: format!("https://go.example/{slug}"),
            }),
        ],
    )
        .prop_map(|(label, variant, full_width, action)| {
            ElementKind::Cta(CtaProps {
                label,
                variant,
                full_width,
                action,
            })
        })
}

type ElementParts = (ElementKind, String, Align, Spacing, Spacing, i64);

fn arb_element_parts() -> impl Strategy<Value = ElementParts> {
    (
        prop_oneof![arb_text_kind(), arb_image_kind(), arb_cta_kind()],
        "[A-Za-z0-9 ]{0,20}",
        arb_align(),
        arb_spacing(),
        arb_spacing(),
        -500i64..500,
    )
}

fn arb_document() -> impl Strategy<Value = PopupDocument> {
    // Ids are assigned positionally so they are unique by construction
    let elements = proptest::collection::vec(arb_element_parts(), 0..6).prop_map(|parts| {
        parts
            .into_iter()
            .enumerate()
            .map(|(index, (kind, name, align, margin, padding, order))| Element {
                id: format!("el-{index}"),
                name,
                order,
                align,
                margin,
                padding,
                kind,
            })
            .collect::<Vec<_>>()
    });

    (
        prop_oneof![
            Just(PopupType::Modal),
            Just(PopupType::Banner),
            Just(PopupType::Slideup)
        ],
        prop_oneof![Just(Mode::Light), Just(Mode::Dark)],
        arb_hex_color(),
        arb_hex_color(),
        (
            prop_oneof![
                Just(AspectRatio::Auto),
                Just(AspectRatio::Square),
                Just(AspectRatio::FourThree),
                Just(AspectRatio::SixteenNine),
            ],
            0..=CONTAINER_RADIUS_MAX,
            0..=CONTAINER_PADDING_MAX,
            MAX_WIDTH_MIN..=MAX_WIDTH_MAX,
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
        ),
        elements,
        proptest::collection::vec("[ -~]{0,40}", 0..3),
    )
        .prop_map(
            |(popup_type, mode, brand, background, container_bits, elements, warnings)| {
                let (
                    aspect_ratio,
                    corner_radius,
                    padding,
                    max_width,
                    show_close_icon,
                    backdrop,
                    dismissible,
                    media_slot,
                ) = container_bits;

                PopupDocument {
                    version: SCHEMA_VERSION.to_string(),
                    popup_type,
                    theme: PopupTheme::for_mode(mode, &brand),
                    container: PopupContainer {
                        aspect_ratio,
                        background_color: background,
                        corner_radius,
                        show_close_icon,
                        padding,
                        backdrop,
                        dismissible,
                        max_width,
                        media_slot,
                    },
                    elements,
                    warnings,
                }
            },
        )
}

proptest! {
    #[test]
    fn encode_decode_revalidates_losslessly(doc in arb_document()) {
        let encoded = serde_json::to_value(&doc).unwrap();
        let validated = validate(&encoded).unwrap();
        prop_assert_eq!(validated, doc);
    }

    #[test]
    fn json_text_round_trip_is_lossless(doc in arb_document()) {
        let text = serde_json::to_string(&doc).unwrap();
        let back: PopupDocument = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(back, doc);
    }
}
