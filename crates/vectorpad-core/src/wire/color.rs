//! Named-color palette used on the wire.
//!
//! Colors travel as names, so encoding is lossy: any RGB value maps to the
//! closest palette entry.

use crate::shapes::Rgba;

/// Palette in lookup order. When two entries are equally close, the earlier one wins.
pub const PALETTE: [(&str, Rgba); 13] = [
    ("red", Rgba::opaque(255, 0, 0)),
    ("green", Rgba::opaque(0, 255, 0)),
    ("blue", Rgba::opaque(0, 0, 255)),
    ("yellow", Rgba::opaque(255, 255, 0)),
    ("black", Rgba::opaque(0, 0, 0)),
    ("white", Rgba::opaque(255, 255, 255)),
    ("cyan", Rgba::opaque(0, 255, 255)),
    ("magenta", Rgba::opaque(255, 0, 255)),
    ("orange", Rgba::opaque(255, 200, 0)),
    ("pink", Rgba::opaque(255, 175, 175)),
    ("gray", Rgba::opaque(128, 128, 128)),
    ("darkGray", Rgba::opaque(64, 64, 64)),
    ("lightGray", Rgba::opaque(192, 192, 192)),
];

/// Names accepted when decoding that are never produced when encoding.
const EXTRA_NAMES: [(&str, Rgba); 2] = [
    ("purple", Rgba::opaque(128, 0, 128)),
    ("brown", Rgba::opaque(165, 42, 42)),
];

fn distance_sq(a: Rgba, b: Rgba) -> i32 {
    let dr = i32::from(a.r) - i32::from(b.r);
    let dg = i32::from(a.g) - i32::from(b.g);
    let db = i32::from(a.b) - i32::from(b.b);
    dr * dr + dg * dg + db * db
}

/// Name of the palette entry closest to `color` (alpha is ignored).
pub fn nearest_color_name(color: Rgba) -> &'static str {
    let mut best = PALETTE[0];
    let mut best_distance = distance_sq(color, best.1);
    for entry in &PALETTE[1..] {
        let distance = distance_sq(color, entry.1);
        if distance < best_distance {
            best = *entry;
            best_distance = distance;
        }
    }
    best.0
}

/// Decode a wire color. Falls back to black for anything unrecognized.
pub fn parse_color(value: &str) -> Rgba {
    let trimmed = value.trim();
    if let Some(color) = named_color(trimmed) {
        return color;
    }
    if let Some(color) = parse_components(trimmed) {
        return color;
    }
    log::warn!("Unrecognized color {:?}, using black", value);
    Rgba::black()
}

fn named_color(name: &str) -> Option<Rgba> {
    PALETTE
        .iter()
        .chain(EXTRA_NAMES.iter())
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, color)| *color)
}

/// Parse a `prefix[r=R,g=G,b=B]` component string. Values are read by
/// position; the labels are not checked.
fn parse_components(value: &str) -> Option<Rgba> {
    let open = value.find('[')?;
    let close = value.rfind(']')?;
    if close <= open {
        return None;
    }
    let mut channels = value[open + 1..close].split(',').map(|part| {
        let (_, number) = part.split_once('=')?;
        number.trim().parse::<u8>().ok()
    });
    let r = channels.next()??;
    let g = channels.next()??;
    let b = channels.next()??;
    Some(Rgba::opaque(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_palette_colors_map_to_themselves() {
        for (name, color) in PALETTE {
            assert_eq!(nearest_color_name(color), name);
        }
    }

    #[test]
    fn test_nearest_color() {
        assert_eq!(nearest_color_name(Rgba::opaque(250, 5, 5)), "red");
        assert_eq!(nearest_color_name(Rgba::opaque(10, 10, 10)), "black");
        assert_eq!(nearest_color_name(Rgba::opaque(70, 60, 66)), "darkGray");
        assert_eq!(nearest_color_name(Rgba::opaque(128, 0, 128)), "red");
    }

    #[test]
    fn test_nearest_ignores_alpha() {
        assert_eq!(nearest_color_name(Rgba::clear_white()), "white");
    }

    #[test]
    fn test_nearest_is_idempotent() {
        let samples = [
            Rgba::opaque(1, 2, 3),
            Rgba::opaque(200, 150, 20),
            Rgba::opaque(90, 200, 210),
        ];
        for sample in samples {
            let name = nearest_color_name(sample);
            assert_eq!(nearest_color_name(parse_color(name)), name);
        }
    }

    #[test]
    fn test_parse_names_case_insensitively() {
        assert_eq!(parse_color("RED"), Rgba::opaque(255, 0, 0));
        assert_eq!(parse_color("darkgray"), Rgba::opaque(64, 64, 64));
        assert_eq!(parse_color("lightGray"), Rgba::opaque(192, 192, 192));
        assert_eq!(parse_color(" orange "), Rgba::opaque(255, 200, 0));
    }

    #[test]
    fn test_parse_decode_only_names() {
        assert_eq!(parse_color("purple"), Rgba::opaque(128, 0, 128));
        assert_eq!(parse_color("Brown"), Rgba::opaque(165, 42, 42));
    }

    #[test]
    fn test_parse_component_string() {
        assert_eq!(
            parse_color("Color[r=12,g=34,b=56]"),
            Rgba::opaque(12, 34, 56)
        );
        // Labels are ignored, values are positional.
        assert_eq!(parse_color("x[b=1, a=2, c=3]"), Rgba::opaque(1, 2, 3));
    }

    #[test]
    fn test_unknown_defaults_to_black() {
        assert_eq!(parse_color("chartreuse"), Rgba::black());
        assert_eq!(parse_color("Color[r=300,g=0,b=0]"), Rgba::black());
        assert_eq!(parse_color("Color[r=1,g=2]"), Rgba::black());
        assert_eq!(parse_color(""), Rgba::black());
    }
}
