//! Procedural "text" wallpaper: rows of glyph-shaped blocks built from a
//! phrase, scrolling upward over time.

use smear_core::{Color4, Raster};

const PHRASE: &str = "drag to smear the words across the glass ";
const GLYPH_W: u32 = 14;
const LINE_H: u32 = 30;

const BACKGROUND: Color4 = Color4::opaque(0.06, 0.06, 0.09);
const PALETTE: [Color4; 4] = [
    Color4::opaque(0.95, 0.92, 0.85),
    Color4::opaque(0.98, 0.55, 0.35),
    Color4::opaque(0.45, 0.80, 0.95),
    Color4::opaque(0.70, 0.95, 0.55),
];

pub struct Wallpaper {
    glyphs: Vec<u8>,
}

impl Default for Wallpaper {
    fn default() -> Self {
        Self::new(PHRASE)
    }
}

impl Wallpaper {
    pub fn new(phrase: &str) -> Self {
        let glyphs = if phrase.is_empty() {
            PHRASE.bytes().collect()
        } else {
            phrase.bytes().collect()
        };
        Self { glyphs }
    }

    /// Glyph extent within its cell as (top, bottom) rows.
    fn glyph_rows(ch: u8) -> (u32, u32) {
        match ch {
            b'b' | b'd' | b'f' | b'h' | b'k' | b'l' | b't' => (4, 22),
            b'g' | b'p' | b'q' | b'y' | b'j' => (10, 27),
            _ => (10, 22),
        }
    }

    fn texel(&self, x: u32, y: u32) -> Color4 {
        let line = y / LINE_H;
        let row = y % LINE_H;
        let col = x / GLYPH_W;
        let cx = x % GLYPH_W;
        let idx = (col as usize + line as usize * 7) % self.glyphs.len();
        let ch = self.glyphs[idx];
        if ch == b' ' || !(2..GLYPH_W - 2).contains(&cx) {
            return BACKGROUND;
        }
        let (top, bottom) = Self::glyph_rows(ch);
        if row < top || row >= bottom {
            return BACKGROUND;
        }
        // Hollow counters for round letters.
        if matches!(ch, b'o' | b'a' | b'e' | b'd' | b'b' | b'p' | b'q' | b'g')
            && (5..GLYPH_W - 5).contains(&cx)
            && (14..19).contains(&row)
        {
            return BACKGROUND;
        }
        PALETTE[line as usize % PALETTE.len()]
    }

    /// Render the wallpaper scrolled up by `scroll_px`.
    pub fn render(&self, width: u32, height: u32, scroll_px: f32) -> Raster {
        let offset = scroll_px.max(0.0) as u32;
        Raster::from_fn(width, height, |x, y| self.texel(x, y.wrapping_add(offset)))
    }
}
