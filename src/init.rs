use crate::domain::*;
use crate::util::*;

/// Smooth bump centred on the grid, `amplitude * exp(-r^2 / width)`
/// for `r < cutoff` and zero elsewhere. With the cutoff inside the
/// grid the boundary stays at zero.
pub fn gaussian_bump<
    const GRID_DIMENSION: usize,
    DomainType: DomainView<GRID_DIMENSION>,
>(
    domain: &mut DomainType,
    amplitude: f64,
    width: f64,
    cutoff: f64,
    chunk_size: usize,
) {
    let aabb = *domain.aabb();
    let center = aabb.min() + aabb.exclusive_bounds() / 2;
    let ic_gen = move |coord: Coord<GRID_DIMENSION>| {
        let r_sq: f64 = (coord - center)
            .iter()
            .map(|d| (*d as f64) * (*d as f64))
            .sum();
        if r_sq.sqrt() < cutoff {
            amplitude * (-r_sq / width).exp()
        } else {
            0.0
        }
    };
    domain.par_set_values(ic_gen, chunk_size);
}

/// The pluck used by the wave driver: amplitude 100,
/// width 50, cut off at radius 20.
pub fn pluck<const GRID_DIMENSION: usize, DomainType: DomainView<GRID_DIMENSION>>(
    domain: &mut DomainType,
    chunk_size: usize,
) {
    gaussian_bump(domain, 100.0, 50.0, 20.0, chunk_size);
}
