// Simple color struct, created from an unsigned 32 representing RRGGBBAA
// or from a CSS hex string, and turned back into a CSS string for canvas fills

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

// Colors fired by the demo page on pointer release
pub const DEFAULT_PALETTE: [Color; 3] = [
    Color::rgb(0x69, 0x63, 0x59),
    Color::rgb(0xf0, 0x2e, 0x2e),
    Color::rgb(0xff, 0xaf, 0x2e),
];

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    /// Parses `#RGB`, `#RRGGBB` or `#RRGGBBAA`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Color> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            3 => {
                let num = u32::from_str_radix(digits, 16).ok()?;
                // Each nibble is doubled, so 0xf maps to 0xff
                let expand = |nibble: u32| (nibble as u8 & 0xf) * 0x11;
                Some(Color::rgb(expand(num >> 8), expand(num >> 4), expand(num)))
            }
            6 => {
                let num = u32::from_str_radix(digits, 16).ok()?;
                Some(Color::from_u32((num << 8) | 0xff))
            }
            8 => u32::from_str_radix(digits, 16).ok().map(Color::from_u32),
            _ => None,
        }
    }

    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            self.a as f64 / 255.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u32_splits_channels() {
        let c = Color::from_u32(0x1122_3344);
        assert_eq!(c, Color { r: 0x11, g: 0x22, b: 0x33, a: 0x44 });
    }

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(Color::from_hex("#FF0000"), Some(Color::rgb(0xff, 0, 0)));
        assert_eq!(Color::from_hex("f02e2e"), Some(Color::rgb(0xf0, 0x2e, 0x2e)));
    }

    #[test]
    fn parses_short_and_alpha_hex() {
        assert_eq!(Color::from_hex("#fa0"), Some(Color::rgb(0xff, 0xaa, 0x00)));
        assert_eq!(
            Color::from_hex("#00000080"),
            Some(Color { r: 0, g: 0, b: 0, a: 0x80 })
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Color::from_hex(""), None);
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
        assert_eq!(Color::from_hex("red"), None);
        assert_eq!(Color::from_hex("#+fff"), None);
        assert_eq!(Color::from_hex("##fff"), None);
        assert_eq!(Color::from_hex(" #fff "), None);
        assert_eq!(Color::from_hex("#fff\n"), None);
    }

    #[test]
    fn css_string_uses_unit_alpha() {
        assert_eq!(Color::rgb(255, 175, 46).to_css(), "rgba(255, 175, 46, 1)");
        assert_eq!(Color::from_u32(0x0000_0000).to_css(), "rgba(0, 0, 0, 0)");
    }

    #[test]
    fn default_palette_matches_page_colors() {
        assert_eq!(Some(DEFAULT_PALETTE[0]), Color::from_hex("#696359"));
        assert_eq!(Some(DEFAULT_PALETTE[1]), Color::from_hex("#F02E2E"));
        assert_eq!(Some(DEFAULT_PALETTE[2]), Color::from_hex("#FFAF2E"));
    }
}
