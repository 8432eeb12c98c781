use super::*;

#[test]
fn rounds_half_away_from_zero() {
    assert_eq!(round_half_away_from_zero(2.5), 3);
    assert_eq!(round_half_away_from_zero(-2.5), -3);
    assert_eq!(round_half_away_from_zero(2.4999), 2);
    assert_eq!(round_half_away_from_zero(-0.4), 0);
    assert_eq!(round_half_away_from_zero(10.0), 10);
}

#[test]
fn unpremultiply_restores_straight_channels() {
    let mut px = vec![128, 64, 0, 128, 9, 9, 9, 0, 10, 20, 30, 255];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[255, 128, 0, 128]);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..12], &[10, 20, 30, 255]);
}

#[test]
fn coverage_bounds_are_tight_and_exclusive() {
    let (w, h) = (6u32, 5u32);
    let mut data = vec![0u8; (w * h * 4) as usize];
    let mut set = |x: u32, y: u32| data[((y * w + x) * 4 + 3) as usize] = 1;
    set(2, 1);
    set(4, 3);
    set(1, 2);

    assert_eq!(alpha_coverage_bounds(&data, w, h), Some((1, 1, 5, 4)));
}

#[test]
fn coverage_bounds_of_transparent_buffer_is_none() {
    let data = vec![0u8; 4 * 4 * 4];
    assert_eq!(alpha_coverage_bounds(&data, 4, 4), None);
}
