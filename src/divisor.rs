use std::fmt;
use std::ops::{Index, IndexMut};

use crate::Vertex;

/// A chip count per vertex.  Entries may be negative while an algorithm is
/// running; everything the search hands back is effective.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Divisor {
    chips: Vec<i32>,
}

impl Divisor {
    pub fn zeroed(vertex_count: Vertex) -> Self {
        Self {
            chips: vec![0; usize::from(vertex_count)],
        }
    }

    pub fn from_chips(chips: Vec<i32>) -> Self {
        assert!(chips.len() <= usize::from(Vertex::MAX));
        Self { chips }
    }

    /// One chip on every vertex for which `f` holds.
    pub fn indicator(vertex_count: Vertex, f: impl Fn(Vertex) -> bool) -> Self {
        Self {
            chips: (0..vertex_count).map(|v| i32::from(f(v))).collect(),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> Vertex {
        Vertex::try_from(self.chips.len()).unwrap()
    }

    /// Total number of chips.
    pub fn degree(&self) -> i64 {
        self.chips.iter().map(|c| i64::from(*c)).sum()
    }

    pub fn is_effective(&self) -> bool {
        self.chips.iter().all(|c| *c >= 0)
    }

    /// Pointwise `self >= other`.
    pub fn dominates(&self, other: &Divisor) -> bool {
        assert_eq!(self.chips.len(), other.chips.len());
        self.chips.iter().zip(&other.chips).all(|(a, b)| a >= b)
    }

    /// The same chips on the first vertices and none on the vertices past the
    /// end, e.g. to carry a divisor over to a subdivision.
    pub fn padded(&self, vertex_count: Vertex) -> Divisor {
        assert!(vertex_count >= self.vertex_count());
        let mut chips = self.chips.clone();
        chips.resize(usize::from(vertex_count), 0);
        Self { chips }
    }

    #[inline]
    pub fn as_slice(&self) -> &[i32] {
        &self.chips
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.chips.iter().copied()
    }

    pub(crate) fn copy_from(&mut self, other: &Divisor) {
        self.chips.clone_from(&other.chips);
    }

    /// `(vertex, chips)` for every vertex holding at least one chip.
    pub fn support(&self) -> impl Iterator<Item = (Vertex, i32)> + '_ {
        self.chips
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(v, c)| (Vertex::try_from(v).unwrap(), *c))
    }
}

impl From<Vec<i32>> for Divisor {
    fn from(chips: Vec<i32>) -> Self {
        Self::from_chips(chips)
    }
}

impl Index<Vertex> for Divisor {
    type Output = i32;

    #[inline]
    fn index(&self, v: Vertex) -> &i32 {
        &self.chips[usize::from(v)]
    }
}

impl IndexMut<Vertex> for Divisor {
    #[inline]
    fn index_mut(&mut self, v: Vertex) -> &mut i32 {
        &mut self.chips[usize::from(v)]
    }
}

impl fmt::Display for Divisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.chips.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, "]")
    }
}

impl fmt::Debug for Divisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Divisor::from_chips(vec!{:?})", self.chips)
    }
}
