//! Split axis identification.

/// The axis along which a branch node subdivides space.
///
/// Doubles as a coordinate index via [`Axis::index`], so point and vector
/// components can be addressed uniformly during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The x axis (coordinate index 0).
    X,
    /// The y axis (coordinate index 1).
    Y,
    /// The z axis (coordinate index 2).
    Z,
}

impl Axis {
    /// All three axes, in coordinate order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the coordinate index of this axis (0, 1 or 2).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Returns the axis with the given coordinate index.
    ///
    /// # Panics
    /// Panics if `index` is not 0, 1 or 2.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Axis::X,
            1 => Axis::Y,
            2 => Axis::Z,
            _ => panic!("axis index out of range: {index}"),
        }
    }
}
