//! Remainder of an exclusion along one axis

/// What is left of an interval after removing another one along a single axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remainder<T> {
    /// Fully covered, nothing remains.
    None,
    /// A prefix or a suffix was removed; one piece remains.
    Single(T),
    /// A strict interior part was removed; the left and right pieces remain.
    Split(T, T),
}

impl<T> Remainder<T> {
    /// Builds a remainder from the pieces that survived on either side.
    pub fn from_pieces(left: Option<T>, right: Option<T>) -> Self {
        match (left, right) {
            (None, None) => Remainder::None,
            (Some(piece), None) | (None, Some(piece)) => Remainder::Single(piece),
            (Some(left), Some(right)) => Remainder::Split(left, right),
        }
    }

    /// Returns true if nothing remains
    pub fn is_none(&self) -> bool {
        matches!(self, Remainder::None)
    }

    /// Number of remaining pieces
    pub fn len(&self) -> usize {
        match self {
            Remainder::None => 0,
            Remainder::Single(_) => 1,
            Remainder::Split(_, _) => 2,
        }
    }

    /// Remaining pieces in order
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Remainder::None => Vec::new(),
            Remainder::Single(piece) => vec![piece],
            Remainder::Split(left, right) => vec![left, right],
        }
    }

    /// Applies `f` to every piece
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Remainder<U> {
        match self {
            Remainder::None => Remainder::None,
            Remainder::Single(piece) => Remainder::Single(f(piece)),
            Remainder::Split(left, right) => Remainder::Split(f(left), f(right)),
        }
    }
}
