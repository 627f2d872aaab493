use std::collections::HashMap;

use proplist::{
    Handle, PropertyError, PropertyListConfig, PropertyStore, PropertyType, PropertyValue,
    property_id,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_value(rng: &mut StdRng, ty: PropertyType) -> PropertyValue {
    match ty {
        PropertyType::Bool => PropertyValue::Bool(rng.random_bool(0.5)),
        PropertyType::Integer => PropertyValue::Integer(rng.random()),
        PropertyType::Int64 => PropertyValue::Int64(rng.random()),
        PropertyType::Handle => PropertyValue::Handle(Handle(rng.random())),
        PropertyType::String => {
            let len = rng.random_range(0..24);
            PropertyValue::String((0..len).map(|_| rng.random::<char>()).collect())
        }
        PropertyType::Blob => {
            let mut bytes = vec![0u8; rng.random_range(0..64)];
            rng.fill(&mut bytes[..]);
            PropertyValue::Blob(bytes)
        }
        PropertyType::Pointer => unreachable!("pointers are not generated"),
    }
}

/// Builds a store with repeated IDs, each ID keeping a single type.
fn random_store(rng: &mut StdRng, entries: usize) -> PropertyStore {
    let transportable: Vec<PropertyType> = PropertyType::ALL
        .into_iter()
        .filter(|ty| ty.is_transportable())
        .collect();
    let mut types = HashMap::new();
    let mut store = PropertyStore::new();

    for _ in 0..entries {
        let id = rng.random_range(0..16);
        let ty = *types
            .entry(id)
            .or_insert_with(|| transportable[rng.random_range(0..transportable.len())]);
        store.append(id, random_value(rng, ty)).unwrap();
    }
    store
}

#[test]
fn test_random_stores_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for round in 0..200 {
        let entries = rng.random_range(0..40);
        let mut original = random_store(&mut rng, entries);
        let bytes = original.serialize(false).unwrap();

        let decoded = PropertyStore::from_bytes(&bytes, PropertyListConfig::default()).unwrap();
        assert!(decoded.entries_equal(&original), "round {round}");
        assert_eq!(decoded.dirty_count(), 0, "round {round}");

        let mut decoded = decoded;
        assert_eq!(decoded.serialize(false).unwrap(), bytes, "round {round}");
    }
}

#[test]
fn test_guest_tools_scenario() -> anyhow::Result<()> {
    let mut guest = PropertyStore::new();
    guest.set_string(property_id::GUEST_TOOLS_VERSION, "10.0.1")?;
    guest.set_integer(property_id::GUEST_OS_FAMILY, 2)?;

    let bytes = guest.serialize(false)?;
    let ids: Vec<_> = guest.iter().map(|entry| entry.id()).collect();
    assert_eq!(ids, vec![4500, 4502]);

    let mut host = PropertyStore::new();
    host.deserialize(&bytes)?;
    assert_eq!(host.len(), 2);
    assert_eq!(host.get_string(4500, 0)?, "10.0.1");
    assert_eq!(host.get_integer(4502, 0)?, 2);
    assert!(matches!(
        host.get_string(4502, 0),
        Err(PropertyError::TypeMismatch { .. })
    ));
    Ok(())
}

#[test]
fn test_indexed_property_order_survives() -> anyhow::Result<()> {
    let mut store = PropertyStore::new();
    for value in ["a", "b", "c"] {
        store.append(10, value)?;
    }
    store.set_integer(11, 7)?;
    store.append(10, "d")?;

    let bytes = store.serialize(false)?;
    let decoded = PropertyStore::from_bytes(&bytes, PropertyListConfig::default())?;

    assert_eq!(decoded.count(10), 4);
    for (index, expected) in ["a", "b", "c", "d"].iter().enumerate() {
        assert_eq!(decoded.get_string(10, index)?, *expected);
    }
    let ids: Vec<_> = decoded.iter().map(|entry| entry.id()).collect();
    assert_eq!(ids, vec![10, 10, 10, 11, 10]);
    Ok(())
}

#[test]
fn test_partial_sync_is_idempotent() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(99);
    let mut store = random_store(&mut rng, 30);

    let first = store.serialize(true)?;
    assert!(!first.is_empty());
    assert_eq!(store.dirty_count(), 0);
    assert!(store.serialize(true)?.is_empty());

    // A partial buffer carries exactly the dirty entries.
    let mut peer = PropertyStore::new();
    peer.deserialize(&first)?;
    assert!(peer.entries_equal(&store));
    Ok(())
}

#[test]
fn test_partial_sync_sends_only_changes() -> anyhow::Result<()> {
    let mut store = PropertyStore::new();
    store.set_string(property_id::GUEST_NAME, "ubuntu")?;
    store.set_bool(property_id::VM_DHCP_ENABLED, true)?;
    store.serialize(true)?;

    store.set_bool(property_id::VM_DHCP_ENABLED, false)?;
    let delta = store.serialize(true)?;

    let changes = PropertyStore::from_bytes(&delta, PropertyListConfig::default())?;
    assert_eq!(changes.len(), 1);
    assert!(!changes.get_bool(property_id::VM_DHCP_ENABLED, 0)?);
    Ok(())
}

#[test]
fn test_pointers_are_dropped_when_omitted() -> anyhow::Result<()> {
    let config = PropertyListConfig::new().omit_local_values(true);
    let mut store = PropertyStore::with_config(config);
    let local = 0u64;
    store.set_pointer(1, proplist::LocalPointer::from_ref(&local))?;
    store.set_int64(2, -9)?;
    store.set_blob(3, b"\0\xffbinary")?;

    let bytes = store.serialize(false)?;
    let decoded = PropertyStore::from_bytes(&bytes, config)?;

    assert_eq!(decoded.len(), 2);
    assert!(!decoded.exists(1, PropertyType::Pointer));
    assert_eq!(decoded.get_int64(2, 0)?, -9);
    assert_eq!(decoded.get_blob(3, 0)?, b"\0\xffbinary");
    Ok(())
}
