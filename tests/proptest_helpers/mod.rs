#![allow(dead_code)]

use formtag::model::{BoundingBox, EntityId, EntityKind};
use formtag::session::{FormFields, UiEvent};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

/// IDs are drawn from a small range so events hit live entities often.
pub const MAX_ID: u64 = 24;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Integer-aligned rectangles at least 10px on each side.
pub fn arb_bbox() -> BoxedStrategy<BoundingBox> {
    (0u32..600, 0u32..800, 10u32..200, 10u32..120)
        .prop_map(|(x, y, w, h)| {
            let (x, y) = (f64::from(x), f64::from(y));
            BoundingBox::from_xyxy(x, y, x + f64::from(w), y + f64::from(h))
        })
        .boxed()
}

pub fn arb_id() -> BoxedStrategy<EntityId> {
    (1..=MAX_ID).prop_map(EntityId).boxed()
}

/// Short names, sometimes blank, often repeated.
pub fn arb_text() -> BoxedStrategy<String> {
    prop_oneof![
        3 => prop::sample::select(vec!["Personal Info", "Employer", "Name", "Email", "Total"])
            .prop_map(String::from),
        1 => "[a-z ]{0,6}",
    ]
    .boxed()
}

pub fn arb_kind() -> BoxedStrategy<EntityKind> {
    prop::sample::select(EntityKind::all().to_vec()).boxed()
}

pub fn arb_form() -> BoxedStrategy<FormFields> {
    (
        arb_text(),
        proptest::option::of(arb_id()),
        arb_text(),
        proptest::option::of(arb_id()),
        arb_text(),
        prop::sample::select(vec!["", "text", "name", "email", "date", "barcode"]),
        prop::sample::select(vec!["", "en", "ar"]),
        prop::sample::select(vec!["", "42"]),
    )
        .prop_map(
            |(section_name, parent_section, label_text, parent_label, input_name, ty, lang, value)| {
                FormFields {
                    section_name,
                    parent_section,
                    label_text,
                    parent_label,
                    input_name,
                    input_type: ty.to_string(),
                    input_lang: lang.to_string(),
                    input_value: value.to_string(),
                }
            },
        )
        .boxed()
}

pub fn arb_event() -> BoxedStrategy<UiEvent> {
    prop_oneof![
        6 => (arb_bbox(), arb_form()).prop_map(|(bbox, form)| UiEvent::BboxDrawn { bbox, form }),
        3 => arb_kind().prop_map(|kind| UiEvent::ModeChanged { kind }),
        2 => arb_id().prop_map(|id| UiEvent::EditRequested { id }),
        1 => arb_id().prop_map(|id| UiEvent::DeleteRequested { id }),
        2 => arb_id().prop_map(|id| UiEvent::SelectRequested { id }),
        1 => Just(UiEvent::CancelEditRequested),
        2 => arb_form().prop_map(|form| UiEvent::UpdateCommitted { form }),
    ]
    .boxed()
}

pub fn arb_events(max_len: usize) -> BoxedStrategy<Vec<UiEvent>> {
    prop::collection::vec(arb_event(), 0..=max_len).boxed()
}
