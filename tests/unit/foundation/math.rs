use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    a.write_bytes(b"cinescroll");
    let mut b = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    b.write_bytes(b"cine");
    b.write_bytes(b"scroll");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn stable_hash_depends_on_seed_and_name() {
    assert_eq!(stable_hash64(7, "dust"), stable_hash64(7, "dust"));
    assert_ne!(stable_hash64(7, "dust"), stable_hash64(8, "dust"));
    assert_ne!(stable_hash64(7, "dust"), stable_hash64(7, "shards"));
}
