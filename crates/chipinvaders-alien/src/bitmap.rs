//! Sprite bitmap and its text loader.
//!
//! The resource is one line per sprite row, one `0`/`1` character per
//! column, as written by the BMP converter. The converter emits `1` for
//! background and `0` for ink, so every bit is inverted on load: in memory
//! an ink pixel is `1`.

use std::fmt;

use thiserror::Error;

/// A malformed bitmap resource. Fatal to initialisation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A row's length differs from the first row's.
    #[error("line {line}: row has {found} columns, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A character other than `0` or `1`.
    #[error("line {line}, column {column}: invalid character {found:?}")]
    InvalidCharacter {
        line: usize,
        column: usize,
        found: char,
    },

    /// A bit value other than 0 or 1 in an in-memory row. Rows and
    /// columns are 1-based, like line numbers.
    #[error("row {row}, column {column}: invalid bit value {found}")]
    InvalidBit { row: usize, column: usize, found: u8 },

    /// The resource holds no rows at all.
    #[error("bitmap has no rows")]
    Empty,

    /// Rows are present but hold no columns.
    #[error("bitmap rows have no columns")]
    ZeroWidth,
}

/// An immutable rows × columns matrix of ink bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteBitmap {
    width: usize,
    height: usize,
    /// Row-major bits, `width * height` long.
    bits: Vec<u8>,
}

impl SpriteBitmap {
    /// Parse a text resource. Empty lines are skipped; any other character
    /// besides `0` and `1`, whitespace included, is an error. Line numbers
    /// in errors are 1-based and count skipped lines.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let mut width = None;
        let mut height = 0;
        let mut bits = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if line.is_empty() {
                continue;
            }
            let line_no = idx + 1;

            let mut columns = 0;
            for (col, ch) in line.chars().enumerate() {
                let bit = match ch {
                    '0' => 1,
                    '1' => 0,
                    other => {
                        return Err(FormatError::InvalidCharacter {
                            line: line_no,
                            column: col + 1,
                            found: other,
                        });
                    }
                };
                bits.push(bit);
                columns += 1;
            }

            match width {
                None => width = Some(columns),
                Some(expected) if expected != columns => {
                    return Err(FormatError::RaggedRow {
                        line: line_no,
                        expected,
                        found: columns,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        let width = width.ok_or(FormatError::Empty)?;
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    /// Build from rows already in the in-memory convention (ink = 1).
    /// No inversion is applied.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, FormatError> {
        let width = rows.first().map(Vec::len).ok_or(FormatError::Empty)?;
        if width == 0 {
            return Err(FormatError::ZeroWidth);
        }
        let height = rows.len();
        let mut bits = Vec::with_capacity(width * height);

        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(FormatError::RaggedRow {
                    line: r + 1,
                    expected: width,
                    found: row.len(),
                });
            }
            if let Some((c, &found)) = row.iter().enumerate().find(|&(_, &b)| b > 1) {
                return Err(FormatError::InvalidBit {
                    row: r + 1,
                    column: c + 1,
                    found,
                });
            }
            bits.extend(row);
        }

        Ok(Self {
            width,
            height,
            bits,
        })
    }

    /// Column count.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Row count.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bit at (`col`, `row`), or 0 outside the matrix.
    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> u8 {
        if col >= self.width || row >= self.height {
            return 0;
        }
        self.bits[row * self.width + col]
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.bits.chunks_exact(self.width)
    }

    /// Number of ink pixels.
    #[must_use]
    pub fn ink_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b == 1).count()
    }
}

impl fmt::Display for SpriteBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &bit in row {
                write!(f, "{bit}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_inverts_every_bit() {
        let bmp = SpriteBitmap::parse("10\n01").expect("valid bitmap");
        assert_eq!(bmp.width(), 2);
        assert_eq!(bmp.height(), 2);
        let rows: Vec<&[u8]> = bmp.rows().collect();
        assert_eq!(rows, vec![&[0, 1][..], &[1, 0][..]]);
    }

    #[test]
    fn blank_lines_are_not_rows() {
        let bmp = SpriteBitmap::parse("\n\n110\n\n011\n\n").expect("valid bitmap");
        assert_eq!(bmp.height(), 2);
        assert_eq!(bmp.width(), 3);
    }

    #[test]
    fn crlf_line_endings_parse() {
        let bmp = SpriteBitmap::parse("10\r\n01\r\n").expect("valid bitmap");
        assert_eq!(bmp.height(), 2);
        assert_eq!(bmp.get(1, 0), 1);
    }

    #[test]
    fn ragged_row_reports_source_line() {
        let err = SpriteBitmap::parse("101\n\n10\n").unwrap_err();
        assert_eq!(
            err,
            FormatError::RaggedRow {
                line: 3,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn invalid_character_reports_position() {
        let err = SpriteBitmap::parse("10\n0x").unwrap_err();
        assert_eq!(
            err,
            FormatError::InvalidCharacter {
                line: 2,
                column: 2,
                found: 'x'
            }
        );
    }

    #[test]
    fn empty_resource_is_rejected() {
        assert_eq!(SpriteBitmap::parse("\n\n").unwrap_err(), FormatError::Empty);
        assert_eq!(SpriteBitmap::parse("").unwrap_err(), FormatError::Empty);
    }

    #[test]
    fn surrounding_whitespace_is_invalid() {
        assert_eq!(
            SpriteBitmap::parse(" 10").unwrap_err(),
            FormatError::InvalidCharacter {
                line: 1,
                column: 1,
                found: ' '
            }
        );
        assert_eq!(
            SpriteBitmap::parse("01\n10\t").unwrap_err(),
            FormatError::InvalidCharacter {
                line: 2,
                column: 3,
                found: '\t'
            }
        );
        assert!(SpriteBitmap::parse("10\n  \n01").is_err());
    }

    #[test]
    fn get_outside_matrix_is_zero() {
        let bmp = SpriteBitmap::parse("0").expect("valid bitmap");
        assert_eq!(bmp.get(0, 0), 1);
        assert_eq!(bmp.get(1, 0), 0);
        assert_eq!(bmp.get(0, 1), 0);
    }

    #[test]
    fn from_rows_keeps_bits_as_given() {
        let bmp = SpriteBitmap::from_rows(vec![vec![1, 0], vec![0, 1]]).expect("valid rows");
        assert_eq!(bmp.get(0, 0), 1);
        assert_eq!(bmp.ink_count(), 2);
    }

    #[test]
    fn from_rows_rejects_non_binary() {
        let err = SpriteBitmap::from_rows(vec![vec![0, 2]]).unwrap_err();
        assert_eq!(
            err,
            FormatError::InvalidBit {
                row: 1,
                column: 2,
                found: 2
            }
        );
    }

    #[test]
    fn from_rows_rejects_zero_width() {
        assert_eq!(
            SpriteBitmap::from_rows(vec![vec![]]).unwrap_err(),
            FormatError::ZeroWidth
        );
        assert_eq!(
            SpriteBitmap::from_rows(Vec::new()).unwrap_err(),
            FormatError::Empty
        );
    }

    #[test]
    fn display_shows_in_memory_bits() {
        let bmp = SpriteBitmap::parse("10\n01").expect("valid bitmap");
        assert_eq!(bmp.to_string(), "01\n10\n");
    }
}
