use proptest::prelude::*;

use pagecraft::content::{
    BlockContent, FlexContainerContent, HeadingContent, HeroContent, SmartGridContent,
    TextAlign, resolve_content,
};
use pagecraft::model::BlockKind;
use pagecraft::style::{
    Background, BackgroundPatch, BorderStyle, Breakpoint, Edge, Responsive, StyleConfig,
    StylePatch, resolve_style,
};

fn opt<T: std::fmt::Debug + Clone + 'static>(
    s: impl Strategy<Value = T> + 'static,
) -> impl Strategy<Value = Option<T>> {
    prop::option::of(s)
}

fn style_patch() -> impl Strategy<Value = StylePatch> {
    (
        opt(0u32..80),
        opt(0u32..80),
        opt(0u32..20),
        opt(0u32..300),
        opt(prop::sample::select(vec![BorderStyle::None, BorderStyle::Solid, BorderStyle::Dashed])),
        opt(any::<bool>()),
        opt(0u32..10),
    )
        .prop_map(|(gap_d, gap_m, cols_t, pad_top, border, hide_mobile, radius)| {
            let mut patch = StylePatch::default();
            if let Some(v) = gap_d {
                patch.layout.gap.set(Breakpoint::Desktop, v);
            }
            if let Some(v) = gap_m {
                patch.layout.gap.set(Breakpoint::Mobile, v);
            }
            if let Some(v) = cols_t {
                patch.layout.columns.set(Breakpoint::Tablet, v);
            }
            if let Some(v) = pad_top {
                patch.advanced.padding.set(Edge::Top, v);
            }
            patch.border.style = border;
            if let Some(v) = hide_mobile {
                patch.advanced.hide_on.set(Breakpoint::Mobile, v);
            }
            if let Some(v) = radius {
                patch.border.radius.set_all(v);
            }
            patch
        })
}

fn content_strategy() -> impl Strategy<Value = BlockContent> {
    prop_oneof![
        (opt("[a-zA-Z ]{0,12}"), opt("[a-z]{0,8}")).prop_map(|(headline, cta)| {
            BlockContent::Hero(HeroContent {
                headline,
                cta_text: cta,
                ..Default::default()
            })
        }),
        (opt("[a-z ]{0,12}"), opt(0u8..12)).prop_map(|(text, level)| {
            BlockContent::Heading(HeadingContent {
                text,
                level,
                align: Some(TextAlign::Right),
            })
        }),
        (style_patch(), opt(0u32..20)).prop_map(|(style, item_count)| {
            BlockContent::FlexContainer(FlexContainerContent { style, item_count })
        }),
        (
            style_patch(),
            opt(0u32..20),
            opt(prop::collection::vec(0u32..10, 0..15))
        )
            .prop_map(|(style, item_count, spans)| {
                BlockContent::SmartGrid(SmartGridContent {
                    style,
                    item_count,
                    spans,
                })
            }),
    ]
}

proptest! {
    #[test]
    fn resolution_is_idempotent(content in content_strategy()) {
        let kind = content.kind();
        let once = resolve_content(kind, &content);
        let twice = resolve_content(kind, &BlockContent::from(&once));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn spans_stay_within_columns(content in content_strategy()) {
        if let pagecraft::content::ResolvedContent::SmartGrid(p) = content.resolve() {
            prop_assert_eq!(p.spans.len(), p.item_count as usize);
            let max = p.style.layout.columns.desktop;
            prop_assert!(p.spans.iter().all(|s| (1..=max).contains(s)));
        }
    }
}

#[test]
fn partial_gap_override_keeps_siblings() {
    let mut content = FlexContainerContent::default();
    content.style.layout.gap.set(Breakpoint::Desktop, 4);
    let resolved = content.resolve();
    assert_eq!(resolved.style.layout.gap, Responsive::new(4, 12, 8));
    // Other facets fall back wholesale.
    assert_eq!(resolved.style.border, StyleConfig::flex_defaults().border);
}

#[test]
fn every_kind_resolves_from_empty_content() {
    for kind in BlockKind::ALL {
        let resolved = resolve_content(kind, &BlockContent::empty(kind));
        assert_eq!(BlockContent::from(&resolved).kind(), kind);
        assert_eq!(resolved.style().is_some(), kind.has_style_config());
    }
}

#[test]
fn background_patch_resolves_per_variant() {
    let mut patch = StylePatch::default();
    patch.background = Some(BackgroundPatch::Solid {
        color: Some("#111827".to_string()),
    });
    let style = patch.resolve(&StyleConfig::flex_defaults());
    assert_eq!(
        style.background,
        Background::Solid {
            color: "#111827".to_string()
        }
    );
    let out = resolve_style(&style);
    assert_eq!(
        out.css_declarations().get("background-color").map(String::as_str),
        Some("#111827")
    );
}

#[test]
fn border_only_emitted_when_styled() {
    let mut style = StyleConfig::grid_defaults();
    assert!(resolve_style(&style).border.is_none());
    style.border.style = BorderStyle::Solid;
    style.border.width.top = 5;
    let border = resolve_style(&style).border.unwrap();
    assert_eq!(border.width.top, 5);
    assert_eq!(border.width.left, 1);
}
