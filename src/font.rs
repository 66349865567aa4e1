use crate::pixel::{PixelBuf, Rgb, SHADOW};

// ── 3x5 bitmap glyphs ───────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

#[rustfmt::skip]
const LETTERS: [[u8; 15]; 26] = [
    [0,1,0, 1,0,1, 1,1,1, 1,0,1, 1,0,1], // A
    [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,1,0], // B
    [0,1,1, 1,0,0, 1,0,0, 1,0,0, 0,1,1], // C
    [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,1,0], // D
    [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,1,1], // E
    [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,0,0], // F
    [0,1,1, 1,0,0, 1,0,1, 1,0,1, 0,1,1], // G
    [1,0,1, 1,0,1, 1,1,1, 1,0,1, 1,0,1], // H
    [1,1,1, 0,1,0, 0,1,0, 0,1,0, 1,1,1], // I
    [0,0,1, 0,0,1, 0,0,1, 1,0,1, 0,1,0], // J
    [1,0,1, 1,0,1, 1,1,0, 1,0,1, 1,0,1], // K
    [1,0,0, 1,0,0, 1,0,0, 1,0,0, 1,1,1], // L
    [1,0,1, 1,1,1, 1,1,1, 1,0,1, 1,0,1], // M
    [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,0,1], // N
    [0,1,0, 1,0,1, 1,0,1, 1,0,1, 0,1,0], // O
    [1,1,0, 1,0,1, 1,1,0, 1,0,0, 1,0,0], // P
    [0,1,0, 1,0,1, 1,0,1, 1,1,0, 0,1,1], // Q
    [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,0,1], // R
    [0,1,1, 1,0,0, 0,1,0, 0,0,1, 1,1,0], // S
    [1,1,1, 0,1,0, 0,1,0, 0,1,0, 0,1,0], // T
    [1,0,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // U
    [1,0,1, 1,0,1, 1,0,1, 1,0,1, 0,1,0], // V
    [1,0,1, 1,0,1, 1,1,1, 1,1,1, 1,0,1], // W
    [1,0,1, 1,0,1, 0,1,0, 1,0,1, 1,0,1], // X
    [1,0,1, 1,0,1, 0,1,0, 0,1,0, 0,1,0], // Y
    [1,1,1, 0,0,1, 0,1,0, 1,0,0, 1,1,1], // Z
];

const BLANK: [u8; 15] = [0; 15];

#[rustfmt::skip]
fn glyph(ch: char) -> &'static [u8; 15] {
    match ch.to_ascii_uppercase() {
        c @ '0'..='9' => &DIGITS[c as usize - '0' as usize],
        c @ 'A'..='Z' => &LETTERS[c as usize - 'A' as usize],
        ':' => &[0,0,0, 0,1,0, 0,0,0, 0,1,0, 0,0,0],
        '!' => &[0,1,0, 0,1,0, 0,1,0, 0,0,0, 0,1,0],
        '-' => &[0,0,0, 0,0,0, 1,1,1, 0,0,0, 0,0,0],
        '.' => &[0,0,0, 0,0,0, 0,0,0, 0,0,0, 0,1,0],
        _ => &BLANK,
    }
}

/// Pixel width of `text` at `scale` (3px glyphs, 1px spacing, both scaled).
pub fn text_width(text: &str, scale: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 { 0 } else { (n * 4 - 1) * scale }
}

pub fn text_height(scale: i32) -> i32 {
    5 * scale
}

/// Draws `text` with its top-left at (`x`, `y`) and a one-pixel drop shadow.
pub fn draw_text(buf: &mut PixelBuf, x: i32, y: i32, text: &str, scale: i32, fg: Rgb) {
    for pass in [Some(SHADOW), None] {
        let off = if pass.is_some() { scale.max(1) } else { 0 };
        let color = pass.unwrap_or(fg);
        for (i, ch) in text.chars().enumerate() {
            let gx = x + i as i32 * 4 * scale;
            let g = glyph(ch);
            for row in 0..5 {
                for col in 0..3 {
                    if g[row * 3 + col] == 1 {
                        buf.fill_rect(
                            gx + col as i32 * scale + off,
                            y + row as i32 * scale + off,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
        }
    }
}

pub fn draw_text_centered(buf: &mut PixelBuf, cx: i32, y: i32, text: &str, scale: i32, fg: Rgb) {
    draw_text(buf, cx - text_width(text, scale) / 2, y, text, scale, fg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::WHITE;

    #[test]
    fn width_accounts_for_spacing_and_scale() {
        assert_eq!(text_width("", 1), 0);
        assert_eq!(text_width("A", 1), 3);
        assert_eq!(text_width("LEVEL 3", 2), 54);
    }

    #[test]
    fn lowercase_draws_like_uppercase() {
        assert_eq!(glyph('k'), glyph('K'));
        assert_eq!(glyph('~'), &BLANK);
    }

    #[test]
    fn draws_the_digit_one() {
        let mut buf = PixelBuf::new(8, 8);
        draw_text(&mut buf, 0, 0, "1", 1, WHITE);
        assert_eq!(buf.get(1, 0), WHITE);
        assert_eq!(buf.get(0, 4), WHITE);
        assert_ne!(buf.get(0, 0), WHITE);
    }
}
