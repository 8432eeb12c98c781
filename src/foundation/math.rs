/// Round to the nearest integer, breaking ties away from zero (`2.5 -> 3`, `-2.5 -> -3`).
///
/// Downstream consumers expect integer pixel addresses, so every coordinate that leaves the
/// layout engine goes through here.
pub fn round_half_away_from_zero(v: f64) -> i64 {
    // `f64::round` already rounds half-way cases away from zero.
    v.round() as i64
}

/// Convert premultiplied RGBA8 pixels to straight alpha in place.
pub fn unpremultiply_rgba8_in_place(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = px[3];
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        let a16 = u16::from(a);
        for c in &mut px[..3] {
            let v = (u16::from(*c) * 255 + a16 / 2) / a16;
            *c = v.min(255) as u8;
        }
    }
}

/// Bounding box of every pixel whose alpha is non-zero, as `(x0, y0, x1, y1)` with exclusive
/// max edges. Returns `None` for a fully transparent buffer.
pub fn alpha_coverage_bounds(
    data: &[u8],
    width: u32,
    height: u32,
) -> Option<(u32, u32, u32, u32)> {
    let stride = width as usize * 4;
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..height {
        let row = &data[y as usize * stride..(y as usize + 1) * stride];
        let mut first = None;
        let mut last = 0u32;
        for (x, px) in row.chunks_exact(4).enumerate() {
            if px[3] != 0 {
                let x = x as u32;
                first.get_or_insert(x);
                last = x;
            }
        }
        let Some(first) = first else {
            continue;
        };
        bounds = Some(match bounds {
            None => (first, y, last + 1, y + 1),
            Some((x0, y0, x1, _)) => (x0.min(first), y0, x1.max(last + 1), y + 1),
        });
    }
    bounds
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
