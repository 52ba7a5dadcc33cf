use crate::stencil::*;

/// Jacobi averaging over the four orthogonal neighbors.
pub fn jacobi_2d() -> Stencil<impl StencilOperation<4>, 2, 4> {
    Stencil::new(
        [[-1, 0], [1, 0], [0, -1], [0, 1]],
        |args: &[f64; 4]| {
            let north = args[0];
            let south = args[1];
            let west = args[2];
            let east = args[3];
            0.25 * (north + south + west + east)
        },
    )
}

/// Jacobi averaging over the six orthogonal neighbors.
pub fn jacobi_3d() -> Stencil<impl StencilOperation<6>, 3, 6> {
    Stencil::new(
        [
            [-1, 0, 0],
            [1, 0, 0],
            [0, -1, 0],
            [0, 1, 0],
            [0, 0, -1],
            [0, 0, 1],
        ],
        |args: &[f64; 6]| {
            let west = args[0];
            let east = args[1];
            let south = args[2];
            let north = args[3];
            let down = args[4];
            let up = args[5];
            (1.0 / 6.0) * (west + east + south + north + down + up)
        },
    )
}

/// Five point Laplacian, the middle cell comes first.
pub fn laplacian_2d() -> Stencil<impl StencilOperation<5>, 2, 5> {
    Stencil::new(
        [[0, 0], [-1, 0], [1, 0], [0, -1], [0, 1]],
        |args: &[f64; 5]| {
            let middle = args[0];
            let north = args[1];
            let south = args[2];
            let west = args[3];
            let east = args[4];
            north + south + west + east - 4.0 * middle
        },
    )
}

/// Seven point Laplacian, the middle cell comes first.
pub fn laplacian_3d() -> Stencil<impl StencilOperation<7>, 3, 7> {
    Stencil::new(
        [
            [0, 0, 0],
            [-1, 0, 0],
            [1, 0, 0],
            [0, -1, 0],
            [0, 1, 0],
            [0, 0, -1],
            [0, 0, 1],
        ],
        |args: &[f64; 7]| {
            let middle = args[0];
            let neighbors: f64 = args[1..].iter().sum();
            neighbors - 6.0 * middle
        },
    )
}

/// `next = 2 c - old + tau_sq * (sum of neighbors - 4 c)`
pub fn wave_2d(tau_sq: f64) -> LeapfrogStencil<impl StencilOperation<5>, 2, 5> {
    LeapfrogStencil::new(laplacian_2d(), tau_sq)
}

pub fn wave_3d(tau_sq: f64) -> LeapfrogStencil<impl StencilOperation<7>, 3, 7> {
    LeapfrogStencil::new(laplacian_3d(), tau_sq)
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn jacobi_weights() {
        for w in jacobi_2d().weights().iter() {
            assert_approx_eq!(f64, *w, 0.25);
        }
        for w in jacobi_3d().weights().iter() {
            assert_approx_eq!(f64, *w, 1.0 / 6.0);
        }
        assert_approx_eq!(f64, jacobi_3d().weights().sum(), 1.0, ulps = 4);
    }

    #[test]
    fn laplacian_weights() {
        let w = *laplacian_2d().weights();
        assert_eq!(w[0], -4.0);
        for n in 1..5 {
            assert_eq!(w[n], 1.0);
        }
        assert_eq!(laplacian_3d().weights()[0], -6.0);
        assert_eq!(laplacian_3d().weights().sum(), 0.0);
    }

    #[test]
    fn jacobi_is_the_written_average() {
        let args = [0.3, 1.7, -2.9, 4.1, 0.05, 9.9];
        let expected = (1.0 / 6.0) * (0.3 + 1.7 + -2.9 + 4.1 + 0.05 + 9.9);
        assert_eq!(jacobi_3d().apply(&args), expected);
    }

    #[test]
    fn wave_is_the_written_update() {
        let (c, old) = (0.7, 0.2);
        let args = [c, 1.1, -0.4, 0.9, 0.3];
        let expected = 2.0 * c - old + 0.4 * (1.1 + -0.4 + 0.9 + 0.3 - 4.0 * c);
        assert_eq!(wave_2d(0.4).apply(c, old, &args), expected);
        // A flat field stays flat.
        assert_eq!(wave_2d(0.4).apply(3.0, 3.0, &[3.0; 5]), 3.0);
        assert_eq!(wave_3d(0.25).apply(2.0, 2.0, &[2.0; 7]), 2.0);
    }

    #[test]
    fn radius_is_one() {
        assert_eq!(jacobi_2d().radius(), 1);
        assert_eq!(jacobi_3d().radius(), 1);
        assert_eq!(wave_2d(0.1).spatial().radius(), 1);
        assert_eq!(wave_3d(0.1).spatial().radius(), 1);
    }
}
