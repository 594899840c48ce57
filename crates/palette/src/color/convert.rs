//! Coordinate conversions between the supported color spaces.
//!
//! Every space converts through gamma-encoded sRGB. Values outside the sRGB
//! gamut are carried through unclamped so that gamut mapping can happen as a
//! separate, explicit step.

use super::ColorSpace;

/// Chroma (OKLCH) below which a color has no meaningful hue.
pub(crate) const OKLCH_ACHROMATIC: f64 = 1e-5;
/// Chroma (CIE LCH) below which a color has no meaningful hue.
pub(crate) const LCH_ACHROMATIC: f64 = 4e-3;
/// Saturation, in percent, below which an HSL color has no meaningful hue.
pub(crate) const HSL_ACHROMATIC: f64 = 1e-6;

const D50_WHITE: [f64; 3] = [0.3457 / 0.3585, 1.0, (1.0 - 0.3457 - 0.3585) / 0.3585];
const LAB_EPSILON: f64 = 216.0 / 24389.0;
const LAB_KAPPA: f64 = 24389.0 / 27.0;

pub(crate) fn convert(from: ColorSpace, to: ColorSpace, coords: [f64; 3]) -> [f64; 3] {
    if from == to {
        return coords;
    }
    from_srgb(to, to_srgb(from, coords))
}

pub(crate) fn to_srgb(space: ColorSpace, coords: [f64; 3]) -> [f64; 3] {
    match space {
        ColorSpace::Srgb => coords,
        ColorSpace::Hsl => hsl_to_srgb(coords),
        ColorSpace::Hwb => hwb_to_srgb(coords),
        ColorSpace::Oklch => {
            let [l, a, b] = polar_to_rect(coords);
            linear_to_srgb(oklab_to_linear_srgb([l, a, b]))
        }
        ColorSpace::Lch => {
            let lab = polar_to_rect(coords);
            let xyz = d50_to_d65(lab_to_xyz_d50(lab));
            linear_to_srgb(xyz_d65_to_linear_srgb(xyz))
        }
    }
}

pub(crate) fn from_srgb(space: ColorSpace, rgb: [f64; 3]) -> [f64; 3] {
    match space {
        ColorSpace::Srgb => rgb,
        ColorSpace::Hsl => srgb_to_hsl(rgb),
        ColorSpace::Hwb => srgb_to_hwb(rgb),
        ColorSpace::Oklch => rect_to_polar(linear_srgb_to_oklab(srgb_to_linear(rgb)), OKLCH_ACHROMATIC),
        ColorSpace::Lch => {
            let xyz = d65_to_d50(linear_srgb_to_xyz_d65(srgb_to_linear(rgb)));
            rect_to_polar(xyz_d50_to_lab(xyz), LCH_ACHROMATIC)
        }
    }
}

/// Returns OKLab `[L, a, b]` for any color, used for perceptual distances.
pub(crate) fn to_oklab(space: ColorSpace, coords: [f64; 3]) -> [f64; 3] {
    match space {
        ColorSpace::Oklch => polar_to_rect(coords),
        _ => linear_srgb_to_oklab(srgb_to_linear(to_srgb(space, coords))),
    }
}

/// Linear-light sRGB, used for luminance.
pub(crate) fn to_linear_srgb(space: ColorSpace, coords: [f64; 3]) -> [f64; 3] {
    srgb_to_linear(to_srgb(space, coords))
}

fn polar_to_rect([l, c, h]: [f64; 3]) -> [f64; 3] {
    let h_rad = h.to_radians();
    [l, c * h_rad.cos(), c * h_rad.sin()]
}

fn rect_to_polar([l, a, b]: [f64; 3], achromatic: f64) -> [f64; 3] {
    let c = (a * a + b * b).sqrt();
    let h = if c < achromatic {
        0.0
    } else {
        b.atan2(a).to_degrees().rem_euclid(360.0)
    };
    [l, c, h]
}

/// Remove sRGB gamma. Negative channels keep their sign.
fn srgb_to_linear(rgb: [f64; 3]) -> [f64; 3] {
    rgb.map(|c| {
        let abs = c.abs();
        if abs <= 0.04045 {
            c / 12.92
        } else {
            ((abs + 0.055) / 1.055).powf(2.4).copysign(c)
        }
    })
}

/// Apply sRGB gamma. Negative channels keep their sign.
fn linear_to_srgb(rgb: [f64; 3]) -> [f64; 3] {
    rgb.map(|c| {
        let abs = c.abs();
        if abs <= 0.0031308 {
            c * 12.92
        } else {
            (1.055 * abs.powf(1.0 / 2.4) - 0.055).copysign(c)
        }
    })
}

fn oklab_to_linear_srgb([l, a, b]: [f64; 3]) -> [f64; 3] {
    let l_ = l + 0.3963377774 * a + 0.2158037573 * b;
    let m_ = l - 0.1055613458 * a - 0.0638541728 * b;
    let s_ = l - 0.0894841775 * a - 1.2914855480 * b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    [
        4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
        -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
        -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
    ]
}

fn linear_srgb_to_oklab([r, g, b]: [f64; 3]) -> [f64; 3] {
    let l = 0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b;
    let m = 0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b;
    let s = 0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b;

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    [
        0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
        1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
        0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
    ]
}

fn multiply(m: [[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

fn linear_srgb_to_xyz_d65(rgb: [f64; 3]) -> [f64; 3] {
    multiply(
        [
            [0.41239079926595934, 0.357584339383878, 0.1804807884018343],
            [0.21263900587151027, 0.715168678767756, 0.07219231536073371],
            [0.01933081871559182, 0.11919477979462598, 0.9505321522496607],
        ],
        rgb,
    )
}

fn xyz_d65_to_linear_srgb(xyz: [f64; 3]) -> [f64; 3] {
    multiply(
        [
            [3.2409699419045226, -1.537383177570094, -0.4986107602930034],
            [-0.9692436362808796, 1.8759675015077202, 0.04155505740717559],
            [0.05563007969699366, -0.20397695888897652, 1.0569715142428786],
        ],
        xyz,
    )
}

/// Bradford chromatic adaptation D65 → D50.
fn d65_to_d50(xyz: [f64; 3]) -> [f64; 3] {
    multiply(
        [
            [1.0479298208405488, 0.022946793341019088, -0.05019222954313557],
            [0.029627815688159344, 0.990434484573249, -0.01707382502938514],
            [-0.009243058152591178, 0.015055144896577895, 0.7518742899580008],
        ],
        xyz,
    )
}

/// Bradford chromatic adaptation D50 → D65.
fn d50_to_d65(xyz: [f64; 3]) -> [f64; 3] {
    multiply(
        [
            [0.9554734527042182, -0.023098536874261423, 0.0632593086610217],
            [-0.028369706963208136, 1.0099954580058226, 0.021041398966943008],
            [0.012314001688319899, -0.020507696433477912, 1.3303659366080753],
        ],
        xyz,
    )
}

fn xyz_d50_to_lab(xyz: [f64; 3]) -> [f64; 3] {
    let [fx, fy, fz] = [0, 1, 2].map(|i| {
        let v = xyz[i] / D50_WHITE[i];
        if v > LAB_EPSILON {
            v.cbrt()
        } else {
            (LAB_KAPPA * v + 16.0) / 116.0
        }
    });
    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

fn lab_to_xyz_d50([l, a, b]: [f64; 3]) -> [f64; 3] {
    let fy = (l + 16.0) / 116.0;
    let fx = a / 500.0 + fy;
    let fz = fy - b / 200.0;

    let x = if fx.powi(3) > LAB_EPSILON {
        fx.powi(3)
    } else {
        (116.0 * fx - 16.0) / LAB_KAPPA
    };
    let y = if l > LAB_KAPPA * LAB_EPSILON {
        fy.powi(3)
    } else {
        l / LAB_KAPPA
    };
    let z = if fz.powi(3) > LAB_EPSILON {
        fz.powi(3)
    } else {
        (116.0 * fz - 16.0) / LAB_KAPPA
    };

    [x * D50_WHITE[0], y * D50_WHITE[1], z * D50_WHITE[2]]
}

/// sRGB in `[0,1]` to HSL with hue in degrees and saturation/lightness in percent.
fn srgb_to_hsl([r, g, b]: [f64; 3]) -> [f64; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let d = max - min;

    if d.abs() < f64::EPSILON {
        return [0.0, 0.0, l * 100.0];
    }

    let s = if l == 0.0 || l == 1.0 {
        0.0
    } else {
        (max - l) / l.min(1.0 - l)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    [(h * 60.0).rem_euclid(360.0), s * 100.0, l * 100.0]
}

fn hsl_to_srgb([h, s, l]: [f64; 3]) -> [f64; 3] {
    let s = s / 100.0;
    let l = l / 100.0;
    let h = h.rem_euclid(360.0);

    let channel = |n: f64| {
        let k = (n + h / 30.0) % 12.0;
        let a = s * l.min(1.0 - l);
        l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
    };

    [channel(0.0), channel(8.0), channel(4.0)]
}

fn srgb_to_hwb(rgb: [f64; 3]) -> [f64; 3] {
    let [h, _, _] = srgb_to_hsl(rgb);
    let [r, g, b] = rgb;
    let white = r.min(g).min(b);
    let black = 1.0 - r.max(g).max(b);
    [h, white * 100.0, black * 100.0]
}

fn hwb_to_srgb([h, w, b]: [f64; 3]) -> [f64; 3] {
    let w = w / 100.0;
    let b = b / 100.0;
    if w + b >= 1.0 {
        let gray = w / (w + b);
        return [gray, gray, gray];
    }
    hsl_to_srgb([h, 100.0, 50.0]).map(|c| c * (1.0 - w - b) + w)
}
