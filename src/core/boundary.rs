use crate::core::electron::Electron;

/// Which horizontal edge an electron left through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// Left through x = 0, re-entered on the right.
    Left,
    /// Left through x = width, re-entered on the left.
    Right,
}

/// Periodic boundary on both axes with directional counters on the x axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryTracker {
    left: u64,
    right: u64,
}

impl BoundaryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn left_count(&self) -> u64 {
        self.left
    }

    pub fn right_count(&self) -> u64 {
        self.right
    }

    /// Check the post-integration position of `electron`, count at most one
    /// horizontal crossing and wrap both coordinates back into
    /// `[0, width) x [0, height)`.
    pub fn apply(&mut self, electron: &mut Electron, width: f64, height: f64) -> Option<Crossing> {
        let [x, y] = electron.position;
        let crossing = if x < 0.0 {
            self.left = self.left.saturating_add(1);
            Some(Crossing::Left)
        } else if x >= width {
            self.right = self.right.saturating_add(1);
            Some(Crossing::Right)
        } else {
            None
        };
        if !(0.0..width).contains(&x) {
            electron.position[0] = wrap(x, width);
        }
        if !(0.0..height).contains(&y) {
            electron.position[1] = wrap(y, height);
        }
        crossing
    }
}

/// Reduce `coord` into `[0, extent)`.
///
/// Displacements larger than one extent are folded completely; a result that
/// rounds up to `extent` (tiny negative inputs) is mapped to 0, as is a
/// non-finite coordinate.
#[inline]
pub fn wrap(coord: f64, extent: f64) -> f64 {
    if !coord.is_finite() {
        return 0.0;
    }
    let r = coord.rem_euclid(extent);
    if r >= extent {
        0.0
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_edge_wraps_and_counts() {
        let mut b = BoundaryTracker::new();
        let mut e = Electron::new([804.0, 10.0], [5.0, 0.0]);
        assert_eq!(b.apply(&mut e, 800.0, 600.0), Some(Crossing::Right));
        assert_eq!(e.position, [4.0, 10.0]);
        assert_eq!((b.left_count(), b.right_count()), (0, 1));
    }

    #[test]
    fn left_edge_wraps_and_counts() {
        let mut b = BoundaryTracker::new();
        let mut e = Electron::new([-3.0, 10.0], [-5.0, 0.0]);
        assert_eq!(b.apply(&mut e, 800.0, 600.0), Some(Crossing::Left));
        assert_eq!(e.position, [797.0, 10.0]);
        assert_eq!((b.left_count(), b.right_count()), (1, 0));
    }

    #[test]
    fn exactly_width_counts_as_right_crossing() {
        let mut b = BoundaryTracker::new();
        let mut e = Electron::new([800.0, 10.0], [1.0, 0.0]);
        assert_eq!(b.apply(&mut e, 800.0, 600.0), Some(Crossing::Right));
        assert_eq!(e.position[0], 0.0);
    }

    #[test]
    fn vertical_wrap_is_not_counted() {
        let mut b = BoundaryTracker::new();
        let mut e = Electron::new([10.0, 605.0], [0.0, 5.0]);
        assert_eq!(b.apply(&mut e, 800.0, 600.0), None);
        assert_eq!(e.position, [10.0, 5.0]);

        let mut e = Electron::new([10.0, -2.0], [0.0, -5.0]);
        assert_eq!(b.apply(&mut e, 800.0, 600.0), None);
        assert_eq!(e.position, [10.0, 598.0]);
        assert_eq!((b.left_count(), b.right_count()), (0, 0));
    }

    #[test]
    fn interior_positions_untouched() {
        let mut b = BoundaryTracker::new();
        let mut e = Electron::new([0.0, 599.5], [0.0, 0.0]);
        assert_eq!(b.apply(&mut e, 800.0, 600.0), None);
        assert_eq!(e.position, [0.0, 599.5]);
    }

    #[test]
    fn multi_width_jump_counts_once_and_lands_in_range() {
        let mut b = BoundaryTracker::new();
        let mut e = Electron::new([2500.0, 10.0], [2000.0, 0.0]);
        assert_eq!(b.apply(&mut e, 800.0, 600.0), Some(Crossing::Right));
        assert_eq!(e.position[0], 100.0);
        assert_eq!(b.right_count(), 1);
    }

    #[test]
    fn non_finite_positions_land_in_range() {
        let mut b = BoundaryTracker::new();
        let mut e = Electron::new([f64::INFINITY, f64::NAN], [0.0, 0.0]);
        assert_eq!(b.apply(&mut e, 800.0, 600.0), Some(Crossing::Right));
        assert_eq!(e.position, [0.0, 0.0]);

        let mut e = Electron::new([f64::NEG_INFINITY, 10.0], [0.0, 0.0]);
        assert_eq!(b.apply(&mut e, 800.0, 600.0), Some(Crossing::Left));
        assert_eq!(e.position, [0.0, 10.0]);

        let mut e = Electron::new([f64::NAN, 10.0], [0.0, 0.0]);
        assert_eq!(b.apply(&mut e, 800.0, 600.0), None);
        assert_eq!(e.position, [0.0, 10.0]);
        assert_eq!((b.left_count(), b.right_count()), (1, 1));
    }

    #[test]
    fn wrap_never_returns_extent() {
        assert_eq!(wrap(-1e-18, 800.0), 0.0);
        assert!(wrap(-1e-9, 800.0) < 800.0);
        assert_eq!(wrap(1600.0, 800.0), 0.0);
        assert_eq!(wrap(f64::MAX, 800.0), f64::MAX.rem_euclid(800.0));
        assert_eq!(wrap(f64::NAN, 800.0), 0.0);
        assert_eq!(wrap(f64::NEG_INFINITY, 800.0), 0.0);
    }
}
