//! Ready-made value spaces.
use std::fmt;

use crate::{budget::DefaultBudget, space::Space, space_ops};

/// Integer space; `combine` is wrapping addition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimpleSpace(i64);

impl SimpleSpace {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> i64 {
        self.0
    }

    pub fn set_value(&mut self, value: i64) {
        self.0 = value;
    }
}

impl From<i64> for SimpleSpace {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for SimpleSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Space for SimpleSpace {
    type Budget = DefaultBudget;

    #[inline]
    fn combine(&self, other: &Self) -> Self {
        Self(self.0.wrapping_add(other.0))
    }
}

space_ops!(SimpleSpace);

/// Fixed-dimension integer vectors; `combine` adds element-wise (wrapping).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VectorSpace<const N: usize>([i64; N]);

impl<const N: usize> VectorSpace<N> {
    pub const DIMENSION: usize = N;

    pub const fn new(values: [i64; N]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[i64; N] {
        &self.0
    }
}

impl<const N: usize> Default for VectorSpace<N> {
    fn default() -> Self {
        Self([0; N])
    }
}

impl<const N: usize> fmt::Display for VectorSpace<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}

impl<const N: usize> Space for VectorSpace<N> {
    type Budget = DefaultBudget;

    fn combine(&self, other: &Self) -> Self {
        let mut out = self.0;
        for (lhs, rhs) in out.iter_mut().zip(other.0.iter()) {
            *lhs = lhs.wrapping_add(*rhs);
        }
        Self(out)
    }
}

space_ops!(impl[const N: usize] VectorSpace<N>);
