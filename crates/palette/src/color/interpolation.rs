use super::ColorSpace;

/// Interpolate coordinates of two colors expressed in `space`.
///
/// Hues take the shorter arc around the wheel. When one side has no hue
/// (achromatic), it borrows the hue of the other side so that mixing toward
/// white or black keeps the original hue.
pub(crate) fn interpolate(space: ColorSpace, start: [f64; 3], end: [f64; 3], t: f64) -> [f64; 3] {
    let (start, end) = fix_hues(space, start, end);
    let mut out = [0.0; 3];
    for i in 0..3 {
        out[i] = start[i] + (end[i] - start[i]) * t;
    }
    if let Some(h) = space.hue_index() {
        out[h] = out[h].rem_euclid(360.0);
    }
    out
}

fn fix_hues(space: ColorSpace, mut start: [f64; 3], mut end: [f64; 3]) -> ([f64; 3], [f64; 3]) {
    let Some(h) = space.hue_index() else {
        return (start, end);
    };

    match (space.is_achromatic(start), space.is_achromatic(end)) {
        (true, false) => start[h] = end[h],
        (false, true) => end[h] = start[h],
        (true, true) => {
            start[h] = 0.0;
            end[h] = 0.0;
        }
        (false, false) => {}
    }

    let dh = end[h] - start[h];
    if dh > 180.0 {
        start[h] += 360.0;
    } else if dh < -180.0 {
        end[h] += 360.0;
    }

    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hue_takes_shorter_arc() {
        let mid = interpolate(ColorSpace::Oklch, [0.5, 0.1, 350.0], [0.5, 0.1, 10.0], 0.5);
        assert!(mid[2].abs() < 1e-9 || (mid[2] - 360.0).abs() < 1e-9);

        let quarter = interpolate(ColorSpace::Oklch, [0.5, 0.1, 10.0], [0.5, 0.1, 350.0], 0.25);
        assert!((quarter[2] - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_achromatic_side_borrows_hue() {
        let mid = interpolate(ColorSpace::Oklch, [0.5, 0.2, 260.0], [1.0, 0.0, 0.0], 0.5);
        assert!((mid[2] - 260.0).abs() < 1e-9);
        assert!((mid[1] - 0.1).abs() < 1e-9);
        assert!((mid[0] - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_srgb_is_componentwise() {
        let mid = interpolate(ColorSpace::Srgb, [0.0, 0.2, 1.0], [1.0, 0.4, 0.0], 0.5);
        for (got, want) in mid.iter().zip([0.5, 0.3, 0.5]) {
            assert!((got - want).abs() < 1e-12);
        }
    }
}
