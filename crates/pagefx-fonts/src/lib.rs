//! Block-letter bitmap face for pagefx favicons.
//!
//! Every glyph is 5 columns by 7 rows. `#` marks a filled cell. Lowercase
//! letters share the uppercase shapes and characters without a glyph are
//! drawn as a hollow box.

/// Height of every glyph in cells.
pub const GLYPH_HEIGHT: usize = 7;

/// Width of every glyph in cells.
pub const GLYPH_WIDTH: usize = 5;

/// Blank cells between two glyphs in a run.
pub const GLYPH_SPACING: usize = 1;

/// One glyph, top row first.
pub type Glyph = [&'static str; GLYPH_HEIGHT];

/// Digits 0-9.
pub static DIGITS: [Glyph; 10] = [
    [".###.", "#...#", "#..##", "#.#.#", "##..#", "#...#", ".###."],
    ["..#..", ".##..", "..#..", "..#..", "..#..", "..#..", ".###."],
    [".###.", "#...#", "....#", "...#.", "..#..", ".#...", "#####"],
    [".###.", "#...#", "....#", "..##.", "....#", "#...#", ".###."],
    ["...#.", "..##.", ".#.#.", "#..#.", "#####", "...#.", "...#."],
    ["#####", "#....", "####.", "....#", "....#", "#...#", ".###."],
    [".###.", "#....", "#....", "####.", "#...#", "#...#", ".###."],
    ["#####", "....#", "...#.", "..#..", ".#...", ".#...", ".#..."],
    [".###.", "#...#", "#...#", ".###.", "#...#", "#...#", ".###."],
    [".###.", "#...#", "#...#", ".####", "....#", "....#", ".###."],
];

/// Letters A-Z.
pub static LETTERS: [Glyph; 26] = [
    [".###.", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"],
    ["####.", "#...#", "#...#", "####.", "#...#", "#...#", "####."],
    [".###.", "#...#", "#....", "#....", "#....", "#...#", ".###."],
    ["####.", "#...#", "#...#", "#...#", "#...#", "#...#", "####."],
    ["#####", "#....", "#....", "####.", "#....", "#....", "#####"],
    ["#####", "#....", "#....", "####.", "#....", "#....", "#...."],
    [".###.", "#...#", "#....", "#.###", "#...#", "#...#", ".####"],
    ["#...#", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"],
    [".###.", "..#..", "..#..", "..#..", "..#..", "..#..", ".###."],
    ["..###", "...#.", "...#.", "...#.", "...#.", "#..#.", ".##.."],
    ["#...#", "#..#.", "#.#..", "##...", "#.#..", "#..#.", "#...#"],
    ["#....", "#....", "#....", "#....", "#....", "#....", "#####"],
    ["#...#", "##.##", "#.#.#", "#.#.#", "#...#", "#...#", "#...#"],
    ["#...#", "#...#", "##..#", "#.#.#", "#..##", "#...#", "#...#"],
    [".###.", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."],
    ["####.", "#...#", "#...#", "####.", "#....", "#....", "#...."],
    [".###.", "#...#", "#...#", "#...#", "#.#.#", "#..#.", ".##.#"],
    ["####.", "#...#", "#...#", "####.", "#.#..", "#..#.", "#...#"],
    [".####", "#....", "#....", ".###.", "....#", "....#", "####."],
    ["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "..#.."],
    ["#...#", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."],
    ["#...#", "#...#", "#...#", "#...#", "#...#", ".#.#.", "..#.."],
    ["#...#", "#...#", "#...#", "#.#.#", "#.#.#", "#.#.#", ".#.#."],
    ["#...#", "#...#", ".#.#.", "..#..", ".#.#.", "#...#", "#...#"],
    ["#...#", "#...#", ".#.#.", "..#..", "..#..", "..#..", "..#.."],
    ["#####", "....#", "...#.", "..#..", ".#...", "#....", "#####"],
];

/// Drawn for characters the face does not cover.
pub static MISSING: Glyph = [
    "#####", "#...#", "#...#", "#...#", "#...#", "#...#", "#####",
];

static SPACE: Glyph = [".....", ".....", ".....", ".....", ".....", ".....", "....."];

/// Punctuation and symbols.
static SYMBOLS: &[(char, Glyph)] = &[
    ('!', ["..#..", "..#..", "..#..", "..#..", "..#..", ".....", "..#.."]),
    ('?', [".###.", "#...#", "....#", "...#.", "..#..", ".....", "..#.."]),
    ('.', [".....", ".....", ".....", ".....", ".....", ".##..", ".##.."]),
    (',', [".....", ".....", ".....", ".....", ".##..", "..#..", ".#..."]),
    (':', [".....", ".##..", ".##..", ".....", ".##..", ".##..", "....."]),
    ('-', [".....", ".....", ".....", "#####", ".....", ".....", "....."]),
    ('+', [".....", "..#..", "..#..", "#####", "..#..", "..#..", "....."]),
    ('=', [".....", ".....", "#####", ".....", "#####", ".....", "....."]),
    ('*', [".....", "#.#.#", ".###.", "#####", ".###.", "#.#.#", "....."]),
    ('/', ["....#", "....#", "...#.", "..#..", ".#...", "#....", "#...."]),
    ('_', [".....", ".....", ".....", ".....", ".....", ".....", "#####"]),
    ('\'', ["..#..", "..#..", ".#...", ".....", ".....", ".....", "....."]),
    ('#', [".#.#.", ".#.#.", "#####", ".#.#.", "#####", ".#.#.", ".#.#."]),
    ('&', [".##..", "#..#.", "#.#..", ".#...", "#.#.#", "#..#.", ".##.#"]),
    ('@', [".###.", "#...#", "#.###", "#.#.#", "#.###", "#....", ".###."]),
];

/// Look up the glyph for `ch`, if the face covers it.
pub fn glyph(ch: char) -> Option<&'static Glyph> {
    match ch {
        ' ' => Some(&SPACE),
        '0'..='9' => Some(&DIGITS[ch as usize - '0' as usize]),
        'A'..='Z' => Some(&LETTERS[ch as usize - 'A' as usize]),
        'a'..='z' => Some(&LETTERS[ch as usize - 'a' as usize]),
        _ => SYMBOLS.iter().find(|(c, _)| *c == ch).map(|(_, g)| g),
    }
}

/// Glyph for `ch`, falling back to [`MISSING`].
pub fn glyph_or_missing(ch: char) -> &'static Glyph {
    glyph(ch).unwrap_or(&MISSING)
}

/// A laid-out run of glyphs as a grid of filled cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBitmap {
    width: usize,
    cells: Vec<bool>,
}

impl TextBitmap {
    /// Lay out `text` on a single line.
    pub fn layout(text: &str) -> Self {
        let glyphs: Vec<&Glyph> = text.chars().map(glyph_or_missing).collect();
        let width = match glyphs.len() {
            0 => 0,
            n => n * GLYPH_WIDTH + (n - 1) * GLYPH_SPACING,
        };

        let mut cells = vec![false; width * GLYPH_HEIGHT];
        for (i, glyph) in glyphs.iter().enumerate() {
            let left = i * (GLYPH_WIDTH + GLYPH_SPACING);
            for (row, line) in glyph.iter().enumerate() {
                for (col, cell) in line.chars().enumerate() {
                    if cell == '#' {
                        cells[row * width + left + col] = true;
                    }
                }
            }
        }

        Self { width, cells }
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells. Always [`GLYPH_HEIGHT`].
    pub fn height(&self) -> usize {
        GLYPH_HEIGHT
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0
    }

    /// Whether the cell at `(col, row)` is filled. Out of range cells are empty.
    pub fn filled(&self, col: usize, row: usize) -> bool {
        col < self.width && row < GLYPH_HEIGHT && self.cells[row * self.width + col]
    }

    /// Render the run as terminal block art, one string per row.
    pub fn to_block_art(&self) -> Vec<String> {
        (0..GLYPH_HEIGHT)
            .map(|row| {
                (0..self.width)
                    .map(|col| if self.filled(col, row) { '█' } else { ' ' })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_glyph_is_well_formed() {
        let all = DIGITS
            .iter()
            .chain(LETTERS.iter())
            .chain(SYMBOLS.iter().map(|(_, g)| g))
            .chain([&MISSING, &SPACE]);
        for glyph in all {
            for line in glyph {
                assert_eq!(line.chars().count(), GLYPH_WIDTH, "bad row {line:?}");
                assert!(line.chars().all(|c| c == '#' || c == '.'));
            }
        }
    }

    #[test]
    fn test_lowercase_shares_uppercase() {
        assert_eq!(glyph('s'), glyph('S'));
        assert_eq!(glyph('a'), Some(&LETTERS[0]));
    }

    #[test]
    fn test_unknown_falls_back_to_box() {
        assert_eq!(glyph('€'), None);
        assert_eq!(glyph_or_missing('€'), &MISSING);
    }

    #[test]
    fn test_layout_width_includes_spacing() {
        assert_eq!(TextBitmap::layout("S").width(), 5);
        assert_eq!(TextBitmap::layout("OK").width(), 11);
        assert!(TextBitmap::layout("").is_empty());
    }

    #[test]
    fn test_layout_cells() {
        let bitmap = TextBitmap::layout("I");
        // Top bar of the I spans the middle three columns
        assert!(!bitmap.filled(0, 0));
        assert!(bitmap.filled(1, 0));
        assert!(bitmap.filled(3, 0));
        assert!(!bitmap.filled(4, 0));
        assert!(bitmap.filled(2, 3));
        assert!(!bitmap.filled(9, 3));
    }

    #[test]
    fn test_block_art() {
        let art = TextBitmap::layout("-").to_block_art();
        assert_eq!(art.len(), 7);
        assert_eq!(art[3], "█████");
        assert_eq!(art[0], "     ");
    }
}
