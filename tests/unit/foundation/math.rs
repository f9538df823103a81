use super::*;

#[test]
fn fnv_split_writes_match_single_write() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"carousel");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"car");
    b.write_bytes(b"ousel");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn fnv_empty_input_is_offset_basis() {
    assert_eq!(Fnv1a64::new_default().finish(), Fnv1a64::OFFSET_BASIS);
    let mut h = Fnv1a64::new_default();
    h.write_bytes(b"a");
    assert_eq!(h.finish(), 0xaf63_dc4c_8601_ec8c);
}
