//! Integration tests for streaming containers through files and readers
//!
//! Containers are written back to back into one stream, the way records of a
//! batch job share a file, and read back in order.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};
use tempfile::NamedTempFile;

use primap::io::{from_reader, to_writer};
use primap::{
    Config, DataOutput, DecodeOptions, IntDoubleMap, LazyContainer, ObjectHashMap, PrimapError,
    SortedIntList, StringFloatMap, VecDataOutput, WireCodec,
};

fn sample_vector(seed: i32) -> IntDoubleMap {
    (0..100).map(|i| (i * seed, f64::from(i) / f64::from(seed))).collect()
}

#[test]
fn test_file_round_trip() {
    let file = NamedTempFile::new().unwrap();
    let map = sample_vector(3);
    map.write_to(BufWriter::new(file.reopen().unwrap())).unwrap();

    let reader = BufReader::new(File::open(file.path()).unwrap());
    let copy = IntDoubleMap::read_from(reader, &DecodeOptions::lazy()).unwrap();
    assert!(copy.is_pending());
    assert_eq!(copy, map);
}

#[test]
fn test_back_to_back_records() {
    let first = sample_vector(1);
    let second = sample_vector(7);
    let list: SortedIntList = [9, 1, 5].into_iter().collect();

    let mut out = VecDataOutput::new();
    first.serialize(&mut out).unwrap();
    list.serialize(&mut out).unwrap();
    second.serialize(&mut out).unwrap();
    let bytes = out.into_vec();

    let mut input = from_reader(Cursor::new(bytes));
    let options = DecodeOptions::lazy();
    let a = IntDoubleMap::deserialize(&mut input, &options).unwrap();
    let l = SortedIntList::deserialize(&mut input, &options).unwrap();
    let b = IntDoubleMap::deserialize(&mut input, &options).unwrap();

    assert_eq!(a, first);
    assert_eq!(l.as_slice(), &[1, 5, 9]);
    assert_eq!(b, second);
    assert!(IntDoubleMap::deserialize(&mut input, &options).is_err());
}

#[test]
fn test_writer_output_matches_vec_output() {
    let mut map = StringFloatMap::new();
    map.put("alpha".to_string(), 0.25);

    let mut sink = Vec::new();
    {
        let mut out = to_writer(&mut sink);
        map.serialize(&mut out).unwrap();
        out.flush().unwrap();
    }
    assert_eq!(sink, map.to_bytes().unwrap());
}

#[test]
fn test_truncated_file_is_format_error() {
    let file = NamedTempFile::new().unwrap();
    let map: ObjectHashMap<(i32, i32), i32> = [((1, 2), 3), ((4, 5), 6)].into_iter().collect();
    let bytes = map.to_bytes().unwrap();
    std::fs::write(file.path(), &bytes[..bytes.len() - 2]).unwrap();

    let result = ObjectHashMap::<(i32, i32), i32>::read_from(
        File::open(file.path()).unwrap(),
        &DecodeOptions::eager(),
    );
    assert!(matches!(result, Err(PrimapError::Format { .. })));
}

#[test]
fn test_decode_options_from_file_drive_policy() {
    let config_file = NamedTempFile::new().unwrap();
    DecodeOptions::lazy().save_to_file(config_file.path()).unwrap();
    let options = DecodeOptions::load_from_file(config_file.path()).unwrap();

    let map = sample_vector(2);
    let copy = IntDoubleMap::from_bytes(&map.to_bytes().unwrap(), &options).unwrap();
    assert!(copy.is_pending());
}
