use crate::core::DIM;
use crate::error::{Error, Result};
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Default ion radius; also the edge margin kept free of lattice sites.
pub const ION_RADIUS: f64 = 10.0;

/// Upper bound on the number of lattice sites a single grid may contain.
pub const MAX_IONS: usize = 1_000_000;

/// A fixed charge site of the background lattice.
///
/// Ions compare, order and hash by coordinate value (x first, then y, with a
/// total order via `OrderedFloat`), so a lattice can be collected into a
/// `BTreeSet` or `HashSet` when it is treated as a set.
#[derive(Debug, Clone, Copy)]
pub struct Ion {
    /// Position (x, y).
    pub position: [f64; DIM],
}

impl Ion {
    pub fn new(position: [f64; DIM]) -> Self {
        Self { position }
    }

    #[inline]
    fn key(&self) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
        (OrderedFloat(self.position[0]), OrderedFloat(self.position[1]))
    }
}

impl PartialEq for Ion {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Ion {}

impl Hash for Ion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Ord for Ion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Ion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Generate the ion lattice for a `width` x `height` area using the default
/// [`ION_RADIUS`] margin.
pub fn generate(width: f64, height: f64, spacing: f64) -> Result<Vec<Ion>> {
    generate_with_margin(width, height, spacing, ION_RADIUS)
}

/// Generate a regular, centred grid of ions `spacing` apart.
///
/// Sites keep `margin` clear of every edge; leftover space on an axis is split
/// evenly between both sides. Ions are returned x-major (all sites of the first
/// column, bottom to top, then the next column).
///
/// Errors:
/// - `Error::InvalidParameter` on non-positive or non-finite dimensions or spacing,
///   a negative margin, an area narrower than `2 * margin`, or a grid with more
///   than [`MAX_IONS`] sites.
pub fn generate_with_margin(
    width: f64,
    height: f64,
    spacing: f64,
    margin: f64,
) -> Result<Vec<Ion>> {
    if !width.is_finite() || width <= 0.0 || !height.is_finite() || height <= 0.0 {
        return Err(Error::InvalidParameter(
            "area width and height must be finite and > 0".into(),
        ));
    }
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(Error::InvalidParameter(
            "ion_spacing must be finite and > 0".into(),
        ));
    }
    if !margin.is_finite() || margin < 0.0 {
        return Err(Error::InvalidParameter(
            "ion_radius must be finite and >= 0".into(),
        ));
    }
    if width < 2.0 * margin || height < 2.0 * margin {
        return Err(Error::InvalidParameter(
            "area must be at least 2 * ion_radius in every dimension".into(),
        ));
    }

    let xs = axis_sites(width, spacing, margin)?;
    let ys = axis_sites(height, spacing, margin)?;
    if xs.len().saturating_mul(ys.len()) > MAX_IONS {
        return Err(Error::InvalidParameter(format!(
            "lattice of {}x{} sites exceeds the limit of {MAX_IONS}; increase ion_spacing",
            xs.len(),
            ys.len()
        )));
    }

    let mut ions = Vec::with_capacity(xs.len() * ys.len());
    for &x in &xs {
        for &y in &ys {
            ions.push(Ion::new([x, y]));
        }
    }
    Ok(ions)
}

/// Site coordinates along one axis of length `extent`.
fn axis_sites(extent: f64, spacing: f64, margin: f64) -> Result<Vec<f64>> {
    let first = ((extent - 2.0 * margin) % spacing) / 2.0 + margin;
    let mut sites = Vec::new();
    let mut i = 0usize;
    loop {
        let c = first + spacing * i as f64;
        if c + margin > extent || c >= extent {
            break;
        }
        if sites.len() >= MAX_IONS {
            return Err(Error::InvalidParameter(format!(
                "lattice exceeds the limit of {MAX_IONS} sites; increase ion_spacing"
            )));
        }
        sites.push(c);
        i += 1;
    }
    Ok(sites)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashSet};

    #[test]
    fn grid_is_centred_with_margin() -> Result<()> {
        // (800 - 20) % 100 = 80 => first column at 80/2 + 10 = 50
        let ions = generate(800.0, 600.0, 100.0)?;
        assert_eq!(ions[0].position, [50.0, 50.0]);
        // 8 columns (50..=750) by 6 rows (50..=550)
        assert_eq!(ions.len(), 8 * 6);
        let last = ions[ions.len() - 1];
        assert_eq!(last.position, [750.0, 550.0]);
        Ok(())
    }

    #[test]
    fn sites_respect_bounds_and_margin() -> Result<()> {
        let ions = generate(800.0, 600.0, 37.0)?;
        assert!(!ions.is_empty());
        for ion in &ions {
            let [x, y] = ion.position;
            assert!(x >= ION_RADIUS && x + ION_RADIUS <= 800.0);
            assert!(y >= ION_RADIUS && y + ION_RADIUS <= 600.0);
        }
        Ok(())
    }

    #[test]
    fn generation_order_is_x_major() -> Result<()> {
        let ions = generate(200.0, 200.0, 50.0)?;
        let mut sorted = ions.clone();
        sorted.sort();
        assert_eq!(ions, sorted);
        Ok(())
    }

    #[test]
    fn deterministic_for_identical_inputs() -> Result<()> {
        assert_eq!(generate(640.0, 480.0, 45.0)?, generate(640.0, 480.0, 45.0)?);
        Ok(())
    }

    #[test]
    fn spacing_larger_than_area_yields_single_centred_ion() -> Result<()> {
        let ions = generate(100.0, 60.0, 500.0)?;
        assert_eq!(ions.len(), 1);
        assert_eq!(ions[0].position, [50.0, 30.0]);
        Ok(())
    }

    #[test]
    fn zero_margin_keeps_sites_inside_half_open_area() -> Result<()> {
        let ions = generate_with_margin(100.0, 100.0, 25.0, 0.0)?;
        assert_eq!(ions.len(), 16);
        assert!(ions.iter().all(|i| i.position[0] < 100.0 && i.position[1] < 100.0));
        Ok(())
    }

    #[test]
    fn ions_are_distinct_as_a_set() -> Result<()> {
        let ions = generate(800.0, 600.0, 50.0)?;
        let hashed: HashSet<Ion> = ions.iter().copied().collect();
        let ordered: BTreeSet<Ion> = ions.iter().copied().collect();
        assert_eq!(hashed.len(), ions.len());
        assert_eq!(ordered.len(), ions.len());
        Ok(())
    }

    #[test]
    fn invalid_spacing_rejected() {
        for spacing in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = generate(800.0, 600.0, spacing).unwrap_err();
            assert!(err.to_string().contains("ion_spacing"));
        }
    }

    #[test]
    fn area_smaller_than_margin_rejected() {
        let err = generate(15.0, 600.0, 50.0).unwrap_err();
        assert!(err.to_string().contains("2 * ion_radius"));
    }

    #[test]
    fn oversized_grid_rejected() {
        let err = generate(800.0, 600.0, 1e-6).unwrap_err();
        assert!(err.to_string().contains("limit"));
    }
}
