//! Left/right classification of cross-section elements.

use std::fmt;

/// Side of the baseline an element lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    Left,
    #[default]
    Right,
}

impl Side {
    /// Attribute value written to the document.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "-1",
            Side::Right => "1",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies an element from the offsets of its points, in order.
///
/// Only the first offset is consulted: negative means [`Side::Left`],
/// anything else (including no points at all) means [`Side::Right`].
pub fn classify_side<I>(offsets: I) -> Side
where
    I: IntoIterator<Item = f64>,
{
    match offsets.into_iter().next() {
        Some(o) if o < 0.0 => Side::Left,
        _ => Side::Right,
    }
}
