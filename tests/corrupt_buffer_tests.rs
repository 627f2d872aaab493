use proplist::{DecodeLimits, PropertyError, PropertyListConfig, PropertyStore};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn record(id: i32, tag: u32, payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&id.to_le_bytes());
    bytes.extend_from_slice(&tag.to_le_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

fn sample_buffer() -> Vec<u8> {
    let mut store = PropertyStore::new();
    store.set_string(4500, "10.0.1").unwrap();
    store.set_integer(4502, 2).unwrap();
    store.set_blob(9, &[1, 2, 3, 4, 5]).unwrap();
    store.set_bool(4513, true).unwrap();
    store.serialize(false).unwrap()
}

#[test]
fn test_truncated_blob_leaves_store_empty() {
    let mut bytes = record(1, 1, &5i32.to_le_bytes());
    let mut payload = 100u32.to_le_bytes().to_vec();
    payload.extend_from_slice(&[0xab; 10]);
    bytes.extend_from_slice(&record(2, 6, &payload));

    let mut store = PropertyStore::new();
    let err = store.deserialize(&bytes).unwrap_err();
    assert!(matches!(err, PropertyError::CorruptData(_)));
    assert!(store.is_empty());
}

#[test]
fn test_every_truncation_is_rejected() {
    let bytes = sample_buffer();
    for cut in 1..bytes.len() {
        let mut store = PropertyStore::new();
        match store.deserialize(&bytes[..cut]) {
            // A cut on a record boundary is a valid shorter list.
            Ok(()) => assert!(store.len() < 4, "cut {cut}"),
            Err(err) => {
                assert!(matches!(err, PropertyError::CorruptData(_)), "cut {cut}");
                assert!(store.is_empty(), "cut {cut}");
            }
        }
    }
}

#[test]
fn test_trailing_garbage_is_rejected() {
    let mut bytes = sample_buffer();
    bytes.push(0);
    let mut store = PropertyStore::new();
    assert!(store.deserialize(&bytes).is_err());
    assert!(store.is_empty());
}

#[test]
fn test_random_mutations_never_panic() {
    let original = sample_buffer();
    let mut rng = StdRng::seed_from_u64(0xbad);

    for _ in 0..2000 {
        let mut bytes = original.clone();
        for _ in 0..rng.random_range(1..4) {
            let pos = rng.random_range(0..bytes.len());
            bytes[pos] = rng.random();
        }
        let mut store = PropertyStore::new();
        if store.deserialize(&bytes).is_err() {
            assert!(store.is_empty());
        }
    }
}

#[test]
fn test_limits_come_from_config() {
    let bytes = sample_buffer();

    let strict = PropertyListConfig::new().max_records(3);
    assert!(matches!(
        PropertyStore::from_bytes(&bytes, strict),
        Err(PropertyError::CorruptData(_))
    ));

    let small_payloads = PropertyListConfig::new().with_limits(DecodeLimits {
        max_records: 16,
        max_payload_size: 4,
    });
    assert!(PropertyStore::from_bytes(&bytes, small_payloads).is_err());

    let roomy = PropertyListConfig::new().max_records(4).max_payload_size(6);
    assert_eq!(PropertyStore::from_bytes(&bytes, roomy).unwrap().len(), 4);
}

#[test]
fn test_invalid_utf8_string_is_rejected() {
    let mut payload = 2u32.to_le_bytes().to_vec();
    payload.extend_from_slice(&[0xc3, 0x28]);
    let bytes = record(1, 2, &payload);
    let mut store = PropertyStore::new();
    assert!(matches!(
        store.deserialize(&bytes),
        Err(PropertyError::CorruptData(_))
    ));
}
