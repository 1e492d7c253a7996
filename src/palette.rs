//! Sticker palettes for rendered cubes and the contrast checks they must pass.

use crate::error::{CubeError, CubeResult};
use crate::moves::Face;

/// High-contrast palette in U, R, F, D, L, B order, tuned for a light-gray background.
pub const CONTRAST_SAFE_CUBE_COLORS: [&str; 6] = [
    "#FDFF00", // U - yellow
    "#C1121F", // R - red (deep crimson, kept away from orange)
    "#2DBE4A", // F - green
    "#F4F4F4", // D - white
    "#FF7A00", // L - orange
    "#2B63E8", // B - blue
];

/// Face pairs that are easy to confuse on video, with the minimum RGB distance between them.
const CRITICAL_PAIRS: [(Face, Face, f64); 2] = [
    (Face::R, Face::L, 95.0), // red vs orange
    (Face::U, Face::L, 90.0), // yellow vs orange
];

type Rgb = [u8; 3];

fn hex_to_rgb(hex_color: &str) -> CubeResult<Rgb> {
    let trimmed = hex_color.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let invalid =
        || CubeError::validation(format!("Invalid color '{hex_color}' (expected #RRGGBB)"));

    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
    };
    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

fn rgb_distance(a: Rgb, b: Rgb) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

fn parse_palette<S: AsRef<str>>(colors: &[S]) -> CubeResult<[Rgb; 6]> {
    let [u, r, f, d, l, b] = colors else {
        return Err(CubeError::validation(
            "Cube palette must contain exactly 6 face colors (U,R,F,D,L,B)",
        ));
    };
    Ok([
        hex_to_rgb(u.as_ref())?,
        hex_to_rgb(r.as_ref())?,
        hex_to_rgb(f.as_ref())?,
        hex_to_rgb(d.as_ref())?,
        hex_to_rgb(l.as_ref())?,
        hex_to_rgb(b.as_ref())?,
    ])
}

/// Checks a U,R,F,D,L,B palette for format and for contrast between critical pairs.
///
/// # Errors
///
/// [`CubeError::Validation`] for a wrong color count, a malformed color, or a
/// critical pair (`R/L`, `U/L`) closer than its minimum distance.
pub fn validate_cube_palette<S: AsRef<str>>(colors: &[S]) -> CubeResult<()> {
    let rgb = parse_palette(colors)?;

    for (a, b, min_distance) in CRITICAL_PAIRS {
        let distance = rgb_distance(rgb[a as usize], rgb[b as usize]);
        if distance < min_distance {
            return Err(CubeError::validation(format!(
                "Cube palette contrast is too low for critical pair {a}/{b}: distance={distance:.1} < {min_distance:.1}"
            )));
        }
    }

    Ok(())
}

/// Pairwise color distances (`"U-R: 123.4"`), for tuning a palette.
///
/// Returns `["invalid length"]` when the palette does not have six colors.
pub fn palette_diagnostics<S: AsRef<str>>(colors: &[S]) -> CubeResult<Vec<String>> {
    if colors.len() != Face::ALL.len() {
        return Ok(vec!["invalid length".to_string()]);
    }
    let rgb = parse_palette(colors)?;

    let mut lines = Vec::new();
    for (i, a) in Face::ALL.iter().enumerate() {
        for (j, b) in Face::ALL.iter().enumerate().skip(i + 1) {
            lines.push(format!("{a}-{b}: {:.1}", rgb_distance(rgb[i], rgb[j])));
        }
    }
    Ok(lines)
}
