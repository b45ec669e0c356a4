//! Unit tests for the annotation snapshot store and `convert_and_restore`

use super::*;
use crate::optional::{from_optional, restore_int, to_optional};
use crate::restorer::{Field, HashedFieldRestorer, UnconditionalFieldRestorer};
use crate::tags::{join_tags, split_tags};

mod legacy {
    use kube::CustomResource;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    #[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
    #[kube(
        group = "test.example.com",
        version = "v1alpha1",
        kind = "Widget",
        namespaced,
        derive = "Default",
        derive = "PartialEq"
    )]
    #[serde(rename_all = "camelCase")]
    pub struct WidgetSpec {
        #[serde(default)]
        pub size: i32,
        #[serde(default)]
        pub tags: String,
    }
}

mod modern {
    use kube::CustomResource;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    #[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
    #[kube(
        group = "test.example.com",
        version = "v1",
        kind = "Widget",
        namespaced,
        derive = "Default",
        derive = "PartialEq"
    )]
    #[serde(rename_all = "camelCase")]
    pub struct WidgetSpec {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub size: Option<i32>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub tags: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub color: Option<String>,
    }
}

fn up(src: &legacy::Widget) -> Result<modern::Widget, ConversionError> {
    Ok(modern::Widget {
        metadata: ObjectMeta::default(),
        spec: modern::WidgetSpec {
            size: to_optional(src.spec.size),
            tags: split_tags(&src.spec.tags),
            color: None,
        },
    })
}

fn down(src: &modern::Widget) -> Result<legacy::Widget, ConversionError> {
    Ok(legacy::Widget {
        metadata: ObjectMeta::default(),
        spec: legacy::WidgetSpec {
            size: from_optional(src.spec.size),
            tags: join_tags(&src.spec.tags),
        },
    })
}

fn modern_restorers() -> RestorerFor<modern::Widget> {
    let mut restorers = RestorerFor::new();
    restorers
        .register(
            "spec.size",
            UnconditionalFieldRestorer::new(Field::new(
                |w: &modern::Widget| w.spec.size,
                |w, value| w.spec.size = value,
            ))
            .with_restore(restore_int),
        )
        .unwrap();
    restorers
        .register(
            "spec.tags",
            HashedFieldRestorer::new(Field::new(
                |w: &modern::Widget| w.spec.tags.clone(),
                |w, value| w.spec.tags = value,
            )),
        )
        .unwrap();
    restorers
        .register(
            "spec.color",
            UnconditionalFieldRestorer::new(Field::new(
                |w: &modern::Widget| w.spec.color.clone(),
                |w, value| w.spec.color = value,
            )),
        )
        .unwrap();
    restorers
}

fn legacy_restorers() -> RestorerFor<legacy::Widget> {
    let mut restorers = RestorerFor::new();
    restorers
        .register(
            "spec.tags",
            HashedFieldRestorer::new(Field::new(
                |w: &legacy::Widget| w.spec.tags.clone(),
                |w, value| w.spec.tags = value,
            )),
        )
        .unwrap();
    restorers
}

fn to_modern(src: &legacy::Widget) -> Result<modern::Widget, ConversionError> {
    convert_and_restore(src, up, down, &legacy_restorers(), &modern_restorers())
}

fn to_legacy(src: &modern::Widget) -> Result<legacy::Widget, ConversionError> {
    convert_and_restore(src, down, up, &modern_restorers(), &legacy_restorers())
}

fn modern_widget() -> modern::Widget {
    let mut widget = modern::Widget::new(
        "widget-1",
        modern::WidgetSpec {
            size: Some(0),
            tags: vec!["a".to_string(), "b".to_string()],
            color: Some("blue".to_string()),
        },
    );
    widget.metadata.namespace = Some("default".to_string());
    widget
}

#[test]
fn test_first_conversion_is_structural() {
    let src = modern_widget();

    let converted = to_legacy(&src).unwrap();

    assert_eq!(converted.spec, legacy::WidgetSpec { size: 0, tags: "a,b".to_string() });
    let data = read_restore_data::<modern::Widget, _>(&converted).unwrap().unwrap();
    assert_eq!(data.object, snapshot_of(&src));
}

#[test]
fn test_metadata_is_copied_and_snapshot_is_stripped() {
    let mut src = modern_widget();
    src.metadata
        .labels
        .get_or_insert_with(BTreeMap::new)
        .insert("app".to_string(), "demo".to_string());

    let converted = to_legacy(&src).unwrap();

    assert_eq!(converted.metadata.name.as_deref(), Some("widget-1"));
    assert_eq!(converted.metadata.labels, src.metadata.labels);
    let data = read_restore_data::<modern::Widget, _>(&converted).unwrap().unwrap();
    assert_eq!(data.object.metadata, ObjectMeta::default(), "Snapshots never carry metadata");
}

#[test]
fn test_round_trip_restores_lost_fields() {
    let src = modern_widget();

    let legacy = to_legacy(&src).unwrap();
    let back = to_modern(&legacy).unwrap();

    assert_eq!(back.spec, src.spec, "Explicit zero and color must come back");
}

#[test]
fn test_round_trip_from_legacy_restores_lossy_tags() {
    let src = legacy::Widget::new(
        "widget-1",
        legacy::WidgetSpec {
            size: 3,
            tags: "a,,b".to_string(),
        },
    );

    let modern = to_modern(&src).unwrap();
    assert_eq!(modern.spec.tags, vec!["a", "b"]);
    let back = to_legacy(&modern).unwrap();

    assert_eq!(back.spec.tags, "a,,b", "Unedited tag string is restored wholesale");
}

#[test]
fn test_edit_in_destination_version_is_not_clobbered() {
    let src = modern_widget();
    let mut legacy = to_legacy(&src).unwrap();

    legacy.spec.tags = "x".to_string();
    let back = to_modern(&legacy).unwrap();

    assert_eq!(back.spec.tags, vec!["x"], "Direct edit must survive");
    assert_eq!(back.spec.color.as_deref(), Some("blue"), "Untouched fields are still restored");
}

#[test]
fn test_edit_survives_full_round_trip() {
    let src = legacy::Widget::new(
        "widget-1",
        legacy::WidgetSpec {
            size: 1,
            tags: "a".to_string(),
        },
    );
    let mut modern = to_modern(&src).unwrap();
    modern.spec.tags = vec!["edited".to_string()];

    let legacy = to_legacy(&modern).unwrap();
    let modern_again = to_modern(&legacy).unwrap();

    assert_eq!(modern_again.spec.tags, vec!["edited"]);
}

#[test]
fn test_corrupt_annotation_is_an_error() {
    let mut src = modern_widget();
    src.metadata.annotations = Some(BTreeMap::from([(
        CONVERSION_DATA_ANNOTATION.to_string(),
        "{not json".to_string(),
    )]));

    let err = to_legacy(&src).unwrap_err();

    assert!(matches!(err, ConversionError::CorruptAnnotation { .. }));
}

#[test]
fn test_annotation_without_object_is_an_error() {
    let mut src = modern_widget();
    src.metadata.annotations = Some(BTreeMap::from([(
        CONVERSION_DATA_ANNOTATION.to_string(),
        r#"{"hashes":{}}"#.to_string(),
    )]));

    assert!(read_restore_data::<legacy::Widget, _>(&src).is_err());
}

#[test]
fn test_snapshot_for_other_version_is_ignored() {
    let src = modern_widget();
    let legacy = to_legacy(&src).unwrap();

    // The annotation on `legacy` holds a v1 snapshot, not a v1alpha1 one
    let data = read_restore_data::<legacy::Widget, _>(&legacy).unwrap();

    assert!(data.is_none());
}

#[test]
fn test_forward_failure_writes_nothing() {
    let src = modern_widget();

    let result: Result<legacy::Widget, _> = convert_and_restore(
        &src,
        |_: &modern::Widget| Err(ConversionError::InvalidObject("boom".to_string())),
        up,
        &modern_restorers(),
        &legacy_restorers(),
    );

    assert!(matches!(result, Err(ConversionError::InvalidObject(_))));
    assert!(src.metadata.annotations.is_none(), "Source is never mutated");
}

#[test]
fn test_conversion_is_idempotent() {
    let src = modern_widget();

    let first = to_legacy(&src).unwrap();
    let second = to_legacy(&src).unwrap();

    assert_eq!(first, second);
}
