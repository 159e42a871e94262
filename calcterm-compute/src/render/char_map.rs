//! A rectangular character grid with a baseline row, and the composition rules used by the
//! two-dimensional renderer.

/// A rectangular grid of characters with a horizontal baseline.
///
/// The baseline is the row index (from the top) that neighboring grids align on: digits and
/// symbols sit on it, a fraction keeps it on its bar, and an exponent keeps it with its base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharMap {
    rows: Vec<Vec<char>>,
    baseline: usize,
}

/// Copies `map` into `rows` with its top-left corner at `(x, y)`.
fn blit(rows: &mut [Vec<char>], map: &CharMap, x: usize, y: usize) {
    for (row_idx, row) in map.rows.iter().enumerate() {
        for (col_idx, &c) in row.iter().enumerate() {
            rows[y + row_idx][x + col_idx] = c;
        }
    }
}

/// Pads a row on both sides to center it in the given width. A leftover column goes to the
/// right.
fn centered(row: &[char], width: usize) -> Vec<char> {
    let pad = width - row.len();
    let left = pad / 2;
    let mut out = vec![' '; left];
    out.extend_from_slice(row);
    out.resize(width, ' ');
    out
}

impl CharMap {
    /// A single-row grid with its baseline on that row.
    pub fn text(s: &str) -> Self {
        Self {
            rows: vec![s.chars().collect()],
            baseline: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn baseline(&self) -> usize {
        self.baseline
    }

    /// Places `other` to the right of `self`, aligning the two baselines.
    pub fn beside(self, other: Self) -> Self {
        let baseline = self.baseline.max(other.baseline);
        let below = (self.height() - self.baseline).max(other.height() - other.baseline);
        let width = self.width() + other.width();
        let mut rows = vec![vec![' '; width]; baseline + below];
        let x = self.width();
        blit(&mut rows, &self, 0, baseline - self.baseline);
        blit(&mut rows, &other, x, baseline - other.baseline);
        Self { rows, baseline }
    }

    /// Stacks `self` over a horizontal bar over `bottom`, centering both. The baseline lands on
    /// the bar.
    pub fn over(self, bottom: Self) -> Self {
        let width = self.width().max(bottom.width()) + 2;
        let baseline = self.height();
        let mut rows = Vec::with_capacity(self.height() + bottom.height() + 1);
        rows.extend(self.rows.iter().map(|row| centered(row, width)));
        rows.push(vec!['-'; width]);
        rows.extend(bottom.rows.iter().map(|row| centered(row, width)));
        Self { rows, baseline }
    }

    /// Raises `exponent` so its bottom row sits just above `self`'s top row. The baseline stays
    /// with `self`.
    pub fn raised(self, exponent: Self) -> Self {
        let width = self.width() + exponent.width();
        let height = self.height() + exponent.height();
        let baseline = exponent.height() + self.baseline;
        let mut rows = vec![vec![' '; width]; height];
        let x = self.width();
        let y = exponent.height();
        blit(&mut rows, &exponent, x, 0);
        blit(&mut rows, &self, 0, y);
        Self { rows, baseline }
    }

    /// Wraps the grid in parentheses, using tall multi-row parentheses when the grid is more
    /// than one row high.
    pub fn parenthesized(self) -> Self {
        let height = self.height();
        if height <= 1 {
            return Self::text("(").beside(self).beside(Self::text(")"));
        }

        let width = self.width() + 2;
        let mut rows = Vec::with_capacity(height);
        for (idx, row) in self.rows.into_iter().enumerate() {
            let (left, right) = if idx == 0 {
                ('/', '\\')
            } else if idx == height - 1 {
                ('\\', '/')
            } else {
                ('|', '|')
            };
            let mut new_row = Vec::with_capacity(width);
            new_row.push(left);
            new_row.extend(row);
            new_row.push(right);
            rows.push(new_row);
        }
        Self {
            rows,
            baseline: self.baseline,
        }
    }

    /// The grid as one string per row, padded to a rectangle.
    pub fn into_strings(self) -> Vec<String> {
        self.rows
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn beside_aligns_baselines() {
        let left = CharMap::text("1+");
        let right = CharMap::text("2").over(CharMap::text("3"));
        let combined = left.beside(right);
        assert_eq!(combined.baseline(), 1);
        assert_eq!(
            combined.into_strings(),
            vec![
                "   2 ".to_string(),
                "  ---".to_string(),
                "   3 ".to_string(),
            ],
        );
    }

    #[test]
    fn fractions_center_and_keep_the_baseline_on_the_bar() {
        let map = CharMap::text("x+1").over(CharMap::text("2"));
        assert_eq!(map.baseline(), 1);
        assert_eq!(
            map.into_strings(),
            vec![
                " x+1 ".to_string(),
                "-----".to_string(),
                "  2  ".to_string(),
            ],
        );
    }

    #[test]
    fn exponents_raise_above_the_base() {
        let map = CharMap::text("x").raised(CharMap::text("2"));
        assert_eq!(map.baseline(), 1);
        assert_eq!(map.into_strings(), vec![" 2".to_string(), "x ".to_string()]);
    }

    #[test]
    fn tall_parentheses() {
        let inner = CharMap::text("1").over(CharMap::text("2"));
        let wrapped = inner.parenthesized();
        assert_eq!(
            wrapped.into_strings(),
            vec![
                "/ 1 \\".to_string(),
                "|---|".to_string(),
                "\\ 2 /".to_string(),
            ],
        );
    }

    #[test]
    fn flat_parentheses() {
        let wrapped = CharMap::text("x").parenthesized();
        assert_eq!(wrapped.into_strings(), vec!["(x)".to_string()]);
    }
}
