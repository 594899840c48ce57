//! Mapping colors into the sRGB gamut.
//!
//! Uses the CSS Color 4 gamut mapping algorithm: reduce OKLCH chroma by
//! binary search until clipping the result is within a just noticeable
//! difference of the unclipped color.
//!
//! <https://drafts.csswg.org/css-color/#css-gamut-mapping>

use super::{ColorSpace, convert};

const JND: f64 = 0.02;
const EPSILON: f64 = 0.0001;
/// Channels this far outside `[0,1]` still count as in gamut.
const GAMUT_TOLERANCE: f64 = 0.000075;

pub(crate) fn in_srgb_gamut(rgb: [f64; 3]) -> bool {
    rgb.iter()
        .all(|c| (-GAMUT_TOLERANCE..=1.0 + GAMUT_TOLERANCE).contains(c))
}

fn clip(rgb: [f64; 3]) -> [f64; 3] {
    rgb.map(|c| c.clamp(0.0, 1.0))
}

fn delta_e_ok(a: [f64; 3], b: [f64; 3]) -> f64 {
    let [dl, da, db] = [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
    (dl * dl + da * da + db * db).sqrt()
}

/// Map any color to gamma-encoded sRGB channels in `[0,1]`.
///
/// In-gamut colors are returned unchanged (apart from clamping the tolerance band).
pub(crate) fn map_to_srgb(space: ColorSpace, coords: [f64; 3]) -> [f64; 3] {
    let rgb = convert::to_srgb(space, coords);
    if in_srgb_gamut(rgb) {
        return clip(rgb);
    }

    let origin = convert::convert(space, ColorSpace::Oklch, coords);
    let [l, c, h] = origin;
    if l >= 1.0 {
        return [1.0, 1.0, 1.0];
    }
    if l <= 0.0 {
        return [0.0, 0.0, 0.0];
    }

    let mut clipped = clip(rgb);
    let difference = delta_e_ok(
        convert::to_oklab(ColorSpace::Srgb, clipped),
        convert::to_oklab(ColorSpace::Oklch, origin),
    );
    if difference < JND {
        return clipped;
    }

    let mut min = 0.0;
    let mut max = c;
    let mut min_in_gamut = true;

    while max - min > EPSILON {
        let chroma = (min + max) / 2.0;
        let current = [l, chroma, h];
        let current_rgb = convert::to_srgb(ColorSpace::Oklch, current);

        if min_in_gamut && in_srgb_gamut(current_rgb) {
            min = chroma;
            continue;
        }

        clipped = clip(current_rgb);
        let difference = delta_e_ok(
            convert::to_oklab(ColorSpace::Srgb, clipped),
            convert::to_oklab(ColorSpace::Oklch, current),
        );

        if difference < JND {
            if JND - difference < EPSILON {
                return clipped;
            }
            min_in_gamut = false;
            min = chroma;
        } else {
            max = chroma;
        }
    }

    clipped
}
