//! Integration tests for the hash map family
//!
//! Covers wire round trips under both decode policies, merge algebra and its
//! decode-state behavior, vector operations and sorted extraction.

use primap::{
    DecodeOptions, DynKey, IntFloatMap, IntIntMap, LazyContainer, ObjectHashMap, PrimapError,
    SortedView, StringIntMap, VectorOps, WireCodec,
};

// =============================================================================
// TEST DATA
// =============================================================================

fn greeting_map() -> StringIntMap {
    let mut map = StringIntMap::new();
    map.put("hi".to_string(), 5);
    map.put("there".to_string(), 22);
    map
}

fn int_map(entries: &[(i32, i32)]) -> IntIntMap {
    entries.iter().copied().collect()
}

fn float_map(entries: &[(i32, f32)]) -> IntFloatMap {
    entries.iter().copied().collect()
}

fn reencode<T: WireCodec>(value: &T, options: DecodeOptions) -> T {
    let bytes = value.to_bytes().unwrap();
    T::from_bytes(&bytes, &options).unwrap()
}

const POLICIES: [DecodeOptions; 2] = [DecodeOptions::eager(), DecodeOptions::lazy()];

// =============================================================================
// ROUND TRIP
// =============================================================================

#[test]
fn test_round_trip_string_keys() {
    for options in POLICIES {
        let mut copy = reencode(&greeting_map(), options);
        assert_eq!(copy.len(), 2);
        assert_eq!(copy.get(&"hi".to_string()), Some(&5));

        assert_eq!(copy.remove(&"hi".to_string()), Some(5));
        assert_eq!(copy.len(), 1);
        assert_eq!(copy.get(&"there".to_string()), Some(&22));
    }
}

#[test]
fn test_lazy_and_eager_decode_agree() {
    let map: IntIntMap = (0..1000).map(|i| (i * 31, i - 500)).collect();
    let eager = reencode(&map, DecodeOptions::eager());
    let lazy = reencode(&map, DecodeOptions::lazy());

    assert!(!eager.is_pending());
    assert!(lazy.is_pending());
    assert_eq!(lazy.len(), eager.len());

    for (key, value) in eager.entries() {
        assert_eq!(lazy.get(key), value);
    }
    assert_eq!(eager, lazy);
}

#[test]
fn test_reserialize_pending_is_byte_identical() {
    let map: IntIntMap = (0..50).map(|i| (i, i * i)).collect();
    let bytes = map.to_bytes().unwrap();
    let pending = IntIntMap::from_bytes(&bytes, &DecodeOptions::lazy()).unwrap();

    assert_eq!(pending.to_bytes().unwrap(), bytes);
    assert!(pending.is_pending());
}

#[test]
fn test_decode_is_idempotent() {
    let map = reencode(&greeting_map(), DecodeOptions::lazy());
    map.decode();
    map.decode();
    assert!(!map.is_pending());
    assert_eq!(map.len(), 2);
}

#[test]
fn test_string_keys_use_java_modified_utf8() {
    let mut map = StringIntMap::new();
    map.put("a\0".to_string(), 7);
    let bytes = map.to_bytes().unwrap();
    assert!(bytes.ends_with(&[0x00, 0x03, b'a', 0xc0, 0x80, 0x00, 0x00, 0x00, 0x07]));

    let mut map = StringIntMap::new();
    map.put("\u{1F600}".to_string(), 1);
    let bytes = map.to_bytes().unwrap();
    assert!(bytes.ends_with(&[0x00, 0x06, 0xed, 0xa0, 0xbd, 0xed, 0xb8, 0x80, 0, 0, 0, 1]));
}

#[test]
fn test_round_trip_nul_and_supplementary_keys() {
    let mut map = StringIntMap::new();
    map.put("a\0b".to_string(), 1);
    map.put("\u{1F600}".to_string(), 2);
    map.put("caf\u{e9}".to_string(), 3);

    for options in POLICIES {
        let copy = reencode(&map, options);
        assert_eq!(copy.get(&"a\0b".to_string()), Some(&1));
        assert_eq!(copy.get(&"\u{1F600}".to_string()), Some(&2));
        assert_eq!(copy, map);
    }
}

// =============================================================================
// MERGE ALGEBRA
// =============================================================================

#[test]
fn test_plus_sums_overlapping_keys() {
    let mut a = int_map(&[(1, 5), (2, 22)]);
    let b = int_map(&[(1, 4), (3, 5)]);
    a.plus(&b);

    assert_eq!(a.len(), 3);
    assert_eq!(a.get(1), 9);
    assert_eq!(a.get(2), 22);
    assert_eq!(a.get(3), 5);
}

#[test]
fn test_plus_decode_state_for_every_combination() {
    let a_src = int_map(&[(3, 5), (4, 22)]);
    let b_src = int_map(&[(3, 1), (4, 1), (5, 1)]);

    for a_options in POLICIES {
        for b_options in POLICIES {
            let mut a = reencode(&a_src, a_options);
            let b = reencode(&b_src, b_options);
            let b_was_pending = b.is_pending();

            a.plus(&b);

            assert_eq!(a.len(), 3);
            assert_eq!(a.get(3), 6);
            assert_eq!(a.get(4), 23);
            assert_eq!(a.get(5), 1);
            assert!(!a.is_pending());
            assert_eq!(b.is_pending(), b_was_pending);
            assert_eq!(b.len(), 3);
        }
    }
}

#[test]
fn test_plus_with_string_keys_keeps_other_pending() {
    let mut a = greeting_map();
    let b = reencode(&greeting_map(), DecodeOptions::lazy());
    a.plus(&b);
    assert!(b.is_pending());
    assert_eq!(a.value_of(&"there".to_string()), 44);
}

#[test]
fn test_pending_operand_stays_readable_after_raw_use() {
    let src = int_map(&[(3, 5), (4, 22), (9, 1)]);
    let b = reencode(&src, DecodeOptions::lazy());

    let mut a = IntIntMap::new();
    a.plus(&b);
    a.lazy_merge(&b).unwrap();
    assert_eq!(b.to_bytes().unwrap(), src.to_bytes().unwrap());
    assert!(b.is_pending());

    assert_eq!(b.get(4), 22);
    assert_eq!(b.entries().count(), 3);
    assert_eq!(b, src);
    assert!(!b.is_pending());
    assert_eq!(a.get(4), 44);
}

// =============================================================================
// VECTOR OPERATIONS
// =============================================================================

#[test]
fn test_dot_product() {
    let a = float_map(&[(1, 2.3), (2, 1.9), (3, 3.0)]);
    let b = float_map(&[(1, 1.2), (2, 4.3), (4, 5.0)]);
    assert!((a.dot(&b) - 10.93).abs() < 1e-4);
}

#[test]
fn test_length_and_normalize() {
    let mut a = float_map(&[(1, 2.3), (2, 1.9), (3, 3.0)]);
    assert!((a.length() - 4.2308393).abs() < 1e-5);

    a.normalize().unwrap();
    assert!((a.length() - 1.0).abs() < 1e-5);
}

#[test]
fn test_normalize_pending_vector() {
    let src = float_map(&[(1, 3.0), (2, 4.0)]);
    let mut a = reencode(&src, DecodeOptions::lazy());
    a.normalize().unwrap();
    assert!(!a.is_pending());
    assert!((a.get(2) - 0.8).abs() < 1e-6);
}

// =============================================================================
// SORTED VIEW
// =============================================================================

#[test]
fn test_sorted_by_value_is_deterministic() {
    let map = int_map(&[(1, 5), (2, 2), (3, 3), (4, 3), (5, 1)]);
    let order: Vec<(i32, i32)> = map
        .sorted_by_value(None)
        .unwrap()
        .into_iter()
        .map(Into::into)
        .collect();
    assert_eq!(order, vec![(1, 5), (3, 3), (4, 3), (2, 2), (5, 1)]);
}

#[test]
fn test_sorted_on_empty_is_none() {
    let map = IntIntMap::new();
    assert!(map.sorted_by_value(None).is_none());
    assert!(map.sorted_by_value(Some(3)).is_none());

    let decoded = reencode(&map, DecodeOptions::lazy());
    assert!(decoded.sorted_by_value(None).is_none());
}

// =============================================================================
// WIRE FORMAT ERRORS
// =============================================================================

#[test]
fn test_truncated_streams() {
    let bytes = greeting_map().to_bytes().unwrap();
    for cut in 0..bytes.len() {
        let result = StringIntMap::from_bytes(&bytes[..cut], &DecodeOptions::lazy());
        assert!(
            matches!(result, Err(PrimapError::Format { .. })),
            "prefix of {} bytes accepted",
            cut
        );
    }
}

#[test]
fn test_negative_count() {
    let bytes = (-3i32).to_be_bytes();
    let result = IntIntMap::from_bytes(&bytes, &DecodeOptions::eager());
    assert!(matches!(result, Err(PrimapError::Format { .. })));
}

#[test]
fn test_key_tag_mismatch() {
    let ints: ObjectHashMap<i32, i32> = [(1, 1)].into_iter().collect();
    let result = StringIntMap::from_bytes(&ints.to_bytes().unwrap(), &DecodeOptions::eager());
    assert!(matches!(result, Err(PrimapError::Format { .. })));

    let dynamic =
        ObjectHashMap::<DynKey, i32>::from_bytes(&ints.to_bytes().unwrap(), &DecodeOptions::eager())
            .unwrap();
    assert_eq!(dynamic.get(&DynKey::Int(1)), Some(&1));
}

#[test]
fn test_mixed_dynamic_keys_rejected_at_write() {
    let mut map: ObjectHashMap<DynKey, i32> = ObjectHashMap::new();
    map.put(DynKey::from("text"), 1);
    map.put(DynKey::from(2i32), 2);

    let err = map.to_bytes().unwrap_err();
    assert!(matches!(err, PrimapError::TypeHomogeneity { .. }));
    assert_eq!(err.category(), "homogeneity");
}
