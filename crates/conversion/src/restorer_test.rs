//! Unit tests for restorers and the restorer registry

use super::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
struct Spec {
    name: String,
    ports: Vec<u16>,
    note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
struct Object {
    spec: Spec,
}

fn name_field() -> Field<Spec, String> {
    Field::new(|spec: &Spec| spec.name.clone(), |spec, value| spec.name = value)
}

fn ports_field() -> Field<Spec, Vec<u16>> {
    Field::new(|spec: &Spec| spec.ports.clone(), |spec, value| spec.ports = value)
}

fn note_field() -> Field<Spec, Option<String>> {
    Field::new(|spec: &Spec| spec.note.clone(), |spec, value| spec.note = value)
}

fn object_spec(obj: &Object) -> &Spec {
    &obj.spec
}

fn object_spec_mut(obj: &mut Object) -> &mut Spec {
    &mut obj.spec
}

fn sort_ports(ports: &mut Vec<u16>) {
    ports.sort_unstable();
}

fn spec(name: &str) -> Spec {
    Spec {
        name: name.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_hashed_restorer_restores_unchanged_field() {
    let restorer = HashedFieldRestorer::new(name_field());
    let previous = spec("previous");
    let mut dst = spec("converted");
    let stored = restorer.hash(&dst).unwrap().unwrap();

    let restored = restorer.restore(&previous, &mut dst, Some(&stored)).unwrap();

    assert!(restored, "Unchanged field should be restored");
    assert_eq!(dst.name, "previous");
}

#[test]
fn test_hashed_restorer_keeps_edited_field() {
    let restorer = HashedFieldRestorer::new(name_field());
    let previous = spec("previous");
    let stored = restorer.hash(&spec("converted")).unwrap().unwrap();
    let mut dst = spec("edited");

    let restored = restorer.restore(&previous, &mut dst, Some(&stored)).unwrap();

    assert!(!restored, "Edited field must not be clobbered");
    assert_eq!(dst.name, "edited");
}

#[test]
fn test_hashed_restorer_without_stored_hash_does_nothing() {
    let restorer = HashedFieldRestorer::new(name_field());
    let mut dst = spec("converted");

    let restored = restorer.restore(&spec("previous"), &mut dst, None).unwrap();

    assert!(!restored);
    assert_eq!(dst.name, "converted");
}

#[test]
fn test_hashed_restorer_filter_normalises_before_hashing() {
    let restorer = HashedFieldRestorer::new(ports_field()).with_filter(sort_ports);
    let stored = restorer
        .hash(&Spec {
            ports: vec![80, 443],
            ..Default::default()
        })
        .unwrap()
        .unwrap();
    let previous = Spec {
        ports: vec![443, 80, 8080],
        ..Default::default()
    };
    let mut dst = Spec {
        ports: vec![443, 80],
        ..Default::default()
    };

    let restored = restorer.restore(&previous, &mut dst, Some(&stored)).unwrap();

    assert!(restored, "Reordering alone must not defeat the hash gate");
    assert_eq!(dst.ports, vec![443, 80, 8080]);
}

#[test]
fn test_hashed_restorer_custom_restore() {
    fn append_previous(previous: &Vec<u16>, dst: &mut Vec<u16>) {
        let missing: Vec<u16> =
            previous.iter().copied().filter(|port| !dst.contains(port)).collect();
        dst.extend(missing);
    }

    let restorer = HashedFieldRestorer::new(ports_field()).with_restore(append_previous);
    let mut dst = Spec {
        ports: vec![22],
        ..Default::default()
    };
    let stored = restorer.hash(&dst).unwrap().unwrap();
    let previous = Spec {
        ports: vec![22, 6443],
        ..Default::default()
    };

    restorer.restore(&previous, &mut dst, Some(&stored)).unwrap();

    assert_eq!(dst.ports, vec![22, 6443]);
}

#[test]
fn test_unconditional_restorer_always_restores() {
    let restorer = UnconditionalFieldRestorer::new(note_field());
    assert_eq!(restorer.hash(&Spec::default()).unwrap(), None);

    let previous = Spec {
        note: Some("kept".to_string()),
        ..Default::default()
    };
    let mut dst = Spec::default();

    assert!(restorer.restore(&previous, &mut dst, None).unwrap());
    assert_eq!(dst.note.as_deref(), Some("kept"));
}

#[test]
fn test_unconditional_restorer_custom_restore() {
    let restorer = UnconditionalFieldRestorer::new(name_field())
        .with_restore(crate::optional::restore_if_zero::<String>);
    let previous = spec("previous");
    let mut dst = spec("converted");

    restorer.restore(&previous, &mut dst, None).unwrap();

    assert_eq!(dst.name, "converted", "restore_if_zero keeps a non-zero destination");
}

#[test]
fn test_registry_rejects_duplicate_key() {
    let mut registry = RestorerFor::<Spec>::new();
    registry.register("name", HashedFieldRestorer::new(name_field())).unwrap();

    let err = registry
        .register("name", UnconditionalFieldRestorer::new(name_field()))
        .unwrap_err();

    assert!(matches!(err, ConversionError::OverlappingRestorer { .. }));
}

#[test]
fn test_registry_rejects_nested_key() {
    let mut registry = RestorerFor::<Spec>::new();
    registry.register("spec.ports", HashedFieldRestorer::new(ports_field())).unwrap();

    let err = registry
        .register("spec", HashedFieldRestorer::new(name_field()))
        .unwrap_err();

    match err {
        ConversionError::OverlappingRestorer { key, existing } => {
            assert_eq!(key, "spec");
            assert_eq!(existing, "spec.ports");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_registry_allows_sibling_keys_sharing_a_prefix() {
    let mut registry = RestorerFor::<Spec>::new();
    registry.register("spec.port", HashedFieldRestorer::new(name_field())).unwrap();
    registry.register("spec.ports", HashedFieldRestorer::new(ports_field())).unwrap();
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_registry_restore_all_reports_restored_keys() {
    let mut registry = RestorerFor::<Spec>::new();
    registry.register("name", HashedFieldRestorer::new(name_field())).unwrap();
    registry.register("note", UnconditionalFieldRestorer::new(note_field())).unwrap();

    let converted = spec("converted");
    let hashes = registry.hashes(&converted).unwrap();
    assert_eq!(
        hashes.keys().collect::<Vec<_>>(),
        vec!["name"],
        "Only hashed restorers record hashes"
    );

    let previous = Spec {
        name: "previous".to_string(),
        note: Some("note".to_string()),
        ..Default::default()
    };
    let mut dst = spec("edited");
    let restored = registry.restore_all(&previous, &mut dst, &hashes).unwrap();

    assert_eq!(restored, vec!["note".to_string()]);
    assert_eq!(dst.name, "edited");
    assert_eq!(dst.note.as_deref(), Some("note"));
}

#[test]
fn test_lift_prefixes_keys_and_targets_subtree() {
    let mut spec_registry = RestorerFor::<Spec>::new();
    spec_registry.register("name", HashedFieldRestorer::new(name_field())).unwrap();
    let registry: RestorerFor<Object> = spec_registry.lift("spec", object_spec, object_spec_mut);

    assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["spec.name"]);

    let mut dst = Object { spec: spec("converted") };
    let hashes: BTreeMap<String, String> = registry.hashes(&dst).unwrap();
    let previous = Object { spec: spec("previous") };
    let restored = registry.restore_all(&previous, &mut dst, &hashes).unwrap();

    assert_eq!(restored, vec!["spec.name".to_string()]);
    assert_eq!(dst.spec.name, "previous");
}

#[test]
fn test_extend_checks_overlap() {
    let mut first = RestorerFor::<Spec>::new();
    first.register("spec.name", HashedFieldRestorer::new(name_field())).unwrap();
    let mut second = RestorerFor::<Spec>::new();
    second.register("spec.name", HashedFieldRestorer::new(name_field())).unwrap();

    assert!(first.extend(second).is_err());
}

#[test]
fn test_field_macro_reaches_nested_fields() {
    let name = field!(Object, spec.name);
    let mut dst = Object::default();
    let previous = Object { spec: spec("previous") };

    let restorer = UnconditionalFieldRestorer::new(name);
    assert!(restorer.restore(&previous, &mut dst, None).unwrap());

    assert_eq!(dst.spec.name, "previous");
}
