//! WinAnsi encoding and advance widths for the built-in Helvetica fonts
//!
//! The built-in fonts are declared with `/WinAnsiEncoding`, so text is
//! transcoded to cp1252 bytes before it is written or measured. Widths are in
//! 1/1000 em for bytes 32..=255, taken from the standard Adobe font metrics.
//! Oblique faces share the upright widths.

use super::backend::FontStyle;
use crate::constants::pt_to_mm;

/// Byte written for characters WinAnsi cannot represent
pub const REPLACEMENT_BYTE: u8 = b'?';

/// Characters at 0x80..=0x9F; the gaps are undefined in cp1252
const WIN_ANSI_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

#[rustfmt::skip]
const HELVETICA: [u16; 224] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 350, // 0x70
    556, 350, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350, // 0x80
    350, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 350, 500, 667, // 0x90
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 0xF0
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 224] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 350, // 0x70
    556, 350, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350, // 0x80
    350, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 350, 500, 667, // 0x90
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556, // 0xF0
];

/// cp1252 byte for `c`, if the encoding has one
pub fn win_ansi_byte(c: char) -> Option<u8> {
    match u32::from(c) {
        code @ (0x20..=0x7E | 0xA0..=0xFF) => u8::try_from(code).ok(),
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|&high| high == Some(c))
            .and_then(|i| u8::try_from(0x80 + i).ok()),
    }
}

/// Transcode `text` to WinAnsi bytes, substituting `?` where needed
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_byte(c).unwrap_or(REPLACEMENT_BYTE))
        .collect()
}

fn byte_width(byte: u8, style: FontStyle) -> u16 {
    let table = match style {
        FontStyle::Normal | FontStyle::Italic => &HELVETICA,
        FontStyle::Bold | FontStyle::BoldItalic => &HELVETICA_BOLD,
    };
    byte.checked_sub(32)
        .and_then(|i| table.get(usize::from(i)))
        .copied()
        .unwrap_or(table[usize::from(REPLACEMENT_BYTE - 32)])
}

/// Width of `text` in mm when set in Helvetica at `size_pt`
pub fn helvetica_width_mm(text: &str, style: FontStyle, size_pt: f32) -> f32 {
    let units: u32 = to_win_ansi(text)
        .into_iter()
        .map(|byte| u32::from(byte_width(byte, style)))
        .sum();
    pt_to_mm(units as f32 / 1000.0 * size_pt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lookup() {
        assert_eq!(byte_width(b' ', FontStyle::Normal), 278);
        assert_eq!(byte_width(b'W', FontStyle::Normal), 944);
        assert_eq!(byte_width(b'i', FontStyle::Normal), 222);
        assert_eq!(byte_width(b'i', FontStyle::Bold), 278);
        assert_eq!(byte_width(b'~', FontStyle::Italic), 584);
        // quoteright, emdash, udieresis
        assert_eq!(byte_width(0x92, FontStyle::Normal), 222);
        assert_eq!(byte_width(0x97, FontStyle::Normal), 1000);
        assert_eq!(byte_width(0xFC, FontStyle::Bold), 611);
    }

    #[test]
    fn test_win_ansi_bytes() {
        assert_eq!(to_win_ansi("Grace"), b"Grace".to_vec());
        assert_eq!(to_win_ansi("Jesús’"), vec![b'J', b'e', b's', 0xFA, b's', 0x92]);
        assert_eq!(to_win_ansi("“O Lord” — €"), vec![0x93, b'O', b' ', b'L', b'o', b'r', b'd', 0x94, b' ', 0x97, b' ', 0x80]);
        assert_eq!(to_win_ansi("主 ✝"), b"? ?".to_vec());
        assert_eq!(win_ansi_byte('\u{81}'), None);
        assert_eq!(win_ansi_byte('\t'), None);
    }

    #[test]
    fn test_accented_text_measures_one_glyph_per_char() {
        let plain = helvetica_width_mm("Jesus'", FontStyle::Normal, 10.0);
        let curly = helvetica_width_mm("Jesús’", FontStyle::Normal, 10.0);
        // u and uacute share a width, quotesingle (191) is narrower than quoteright (222)
        let expected = plain + pt_to_mm((222.0 - 191.0) / 1000.0 * 10.0);
        assert!((curly - expected).abs() < 1e-4);
    }

    #[test]
    fn test_width_scales_with_size() {
        let small = helvetica_width_mm("Amazing Grace", FontStyle::Normal, 10.0);
        let large = helvetica_width_mm("Amazing Grace", FontStyle::Normal, 20.0);
        assert!((large - 2.0 * small).abs() < 1e-4);
        assert!(helvetica_width_mm("Bold", FontStyle::Bold, 10.0)
            > helvetica_width_mm("Bold", FontStyle::Normal, 10.0));
    }

    #[test]
    fn test_empty_text_has_no_width() {
        assert_eq!(helvetica_width_mm("", FontStyle::Normal, 12.0), 0.0);
    }
}
