use super::*;

#[test]
fn premul_rounds_to_nearest() {
    assert_eq!(premul_u8(255, 255), 255);
    assert_eq!(premul_u8(100, 128), ((100u16 * 128 + 127) / 255) as u8);
    assert_eq!(premul_u8(200, 0), 0);
}

#[test]
fn premultiply_then_unpremultiply_is_close() {
    let mut px = vec![200u8, 100, 50, 179, 9, 9, 9, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[4..], &[0, 0, 0, 0]);
    unpremultiply_rgba8_in_place(&mut px);
    for (got, want) in px[..3].iter().zip([200u8, 100, 50]) {
        assert!((i16::from(*got) - i16::from(want)).abs() <= 1);
    }
    assert_eq!(px[3], 179);
}

