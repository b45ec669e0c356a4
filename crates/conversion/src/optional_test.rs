//! Unit tests for the optional-field codec

use super::*;

#[test]
fn test_to_optional_zero_is_none() {
    assert_eq!(to_optional(String::new()), None);
    assert_eq!(to_optional(false), None);
    assert_eq!(to_optional(0_i32), None);
}

#[test]
fn test_to_optional_non_zero_is_some() {
    assert_eq!(to_optional("10.0.0.1".to_string()), Some("10.0.0.1".to_string()));
    assert_eq!(to_optional(true), Some(true));
    assert_eq!(to_optional(6443_i32), Some(6443));
}

#[test]
fn test_from_optional() {
    assert_eq!(from_optional::<String>(None), "");
    assert_eq!(from_optional(Some(1500_i32)), 1500);
    assert!(!from_optional::<bool>(None));
}

#[test]
fn test_restore_if_zero_fills_zero_destination() {
    let mut dst = String::new();
    restore_if_zero(&"openstack".to_string(), &mut dst);
    assert_eq!(dst, "openstack");
}

#[test]
fn test_restore_if_zero_keeps_non_zero_destination() {
    let mut dst = "edited".to_string();
    restore_if_zero(&"openstack".to_string(), &mut dst);
    assert_eq!(dst, "edited", "A non-zero destination is a real value and must win");
}

#[test]
fn test_restore_optional_explicit_zero() {
    let mut dst = None;
    restore_bool(&Some(false), &mut dst);
    assert_eq!(dst, Some(false));

    let mut dst = None;
    restore_string(&Some(String::new()), &mut dst);
    assert_eq!(dst, Some(String::new()));

    let mut dst = None;
    restore_int(&Some(0), &mut dst);
    assert_eq!(dst, Some(0));
}

#[test]
fn test_restore_optional_ignores_non_zero_previous() {
    // A non-zero previous value would have survived the legacy form, so an
    // unset destination means it was cleared on purpose
    let mut dst = None;
    restore_int(&Some(1500), &mut dst);
    assert_eq!(dst, None);
}

#[test]
fn test_restore_optional_keeps_set_destination() {
    let mut dst = Some(true);
    restore_bool(&Some(false), &mut dst);
    assert_eq!(dst, Some(true));
}
