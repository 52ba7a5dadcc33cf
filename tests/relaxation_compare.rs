use fdstencil::config::*;
use fdstencil::domain::*;
use fdstencil::reduction;
use fdstencil::snapshot::NullWriter;
use fdstencil::solver::*;
use fdstencil::stencil::*;
use fdstencil::util::*;

use rand::prelude::*;

/// Plain nested loop Jacobi on a row-major `rows x cols` grid.
fn reference_jacobi_2d(field: &[f64], rows: usize, cols: usize, steps: usize) -> Vec<f64> {
    let mut current = field.to_vec();
    let mut next = field.to_vec();
    for _ in 0..steps {
        for i in 1..rows - 1 {
            for j in 1..cols - 1 {
                next[i * cols + j] = 0.25
                    * (current[(i - 1) * cols + j]
                        + current[(i + 1) * cols + j]
                        + current[i * cols + j - 1]
                        + current[i * cols + j + 1]);
            }
        }
        std::mem::swap(&mut current, &mut next);
    }
    current
}

/// Plain nested loop Jacobi on a row-major `nx x ny x nz` grid.
fn reference_jacobi_3d(field: &[f64], n: [usize; 3], steps: usize) -> (Vec<f64>, f64) {
    let [nx, ny, nz] = n;
    let at = |i: usize, j: usize, k: usize| (i * ny + j) * nz + k;
    let mut current = field.to_vec();
    let mut next = field.to_vec();
    let mut max_change = f64::INFINITY;
    for _ in 0..steps {
        max_change = 0.0;
        for i in 1..nx - 1 {
            for j in 1..ny - 1 {
                for k in 1..nz - 1 {
                    let v = (1.0 / 6.0)
                        * (current[at(i - 1, j, k)]
                            + current[at(i + 1, j, k)]
                            + current[at(i, j - 1, k)]
                            + current[at(i, j + 1, k)]
                            + current[at(i, j, k - 1)]
                            + current[at(i, j, k + 1)]);
                    next[at(i, j, k)] = v;
                    let change = (v - current[at(i, j, k)]).abs();
                    if change > max_change {
                        max_change = change;
                    }
                }
            }
        }
        std::mem::swap(&mut current, &mut next);
    }
    (current, max_change)
}

fn random_field<const GRID_DIMENSION: usize>(
    aabb: AABB<GRID_DIMENSION>,
    seed: u64,
) -> OwnedDomain<GRID_DIMENSION> {
    let mut rng = StdRng::seed_from_u64(seed);
    let values: Vec<f64> = (0..aabb.buffer_size())
        .map(|_| rng.gen_range(-10.0..10.0))
        .collect();
    OwnedDomain::from_buffer(aabb, values)
}

#[test]
fn jacobi_2d_matches_reference() {
    let aabb = AABB::from_extents(&[5, 5]);
    let steps = 5;
    let initial = random_field(aabb, 1);
    let expected = reference_jacobi_2d(initial.buffer(), 5, 5, steps);

    for chunk_size in [1, 3, 7, 25] {
        let solver =
            JacobiSolver::new(standard_stencils::jacobi_2d(), initial.clone(), chunk_size);
        let mut controller =
            IterationController::new(solver, Termination::Fixed { steps });
        let report = controller.run(&mut NullWriter);
        assert_eq!(report.state, ControllerState::Exhausted);
        assert_eq!(report.steps, steps);

        let result = controller.into_solver().into_current();
        for (a, b) in result.buffer().iter().zip(expected.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}

#[test]
fn non_square_jacobi_2d_matches_reference() {
    let aabb = AABB::from_extents(&[6, 9]);
    let initial = random_field(aabb, 2);
    let expected = reference_jacobi_2d(initial.buffer(), 6, 9, 11);

    let mut solver = JacobiSolver::new(standard_stencils::jacobi_2d(), initial, 4);
    for _ in 0..11 {
        solver.step();
    }
    for (a, b) in solver.current().buffer().iter().zip(expected.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn jacobi_3d_matches_reference() {
    let extents = [6, 7, 8];
    let steps = 9;
    let initial = random_field(AABB::from_extents(&extents), 4);
    let (expected, expected_change) = reference_jacobi_3d(initial.buffer(), extents, steps);

    for chunk_size in [1, 17, 336] {
        let mut solver =
            JacobiSolver::new(standard_stencils::jacobi_3d(), initial.clone(), chunk_size);
        let mut change = None;
        for _ in 0..steps {
            change = solver.step();
        }
        assert_eq!(change, Some(expected_change));
        for (a, b) in solver.current().buffer().iter().zip(expected.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}

#[test]
fn laplace_cube_matches_reference_to_convergence() {
    let mut config = RelaxationConfig::new([10, 10, 10]);
    config.threshold = 1e-3;
    let initial = config.initial_field().unwrap();

    let solver = JacobiSolver::from_config(standard_stencils::jacobi_3d(), &config).unwrap();
    let mut controller = IterationController::relaxation(solver, &config).unwrap();
    let report = controller.run(&mut NullWriter);
    assert_eq!(report.state, ControllerState::Converged);

    let (expected, expected_change) = reference_jacobi_3d(initial.buffer(), [10; 3], report.steps);
    assert_eq!(report.max_change, expected_change);
    assert_eq!(controller.current().buffer(), expected.as_slice());
}

fn converge_10_cube(chunk_size: usize) -> (RunReport, OwnedDomain<3>) {
    let mut config = RelaxationConfig::new([10, 10, 10]);
    config.threshold = 1e-3;
    config.chunk_size = chunk_size;
    let solver = JacobiSolver::from_config(standard_stencils::jacobi_3d(), &config).unwrap();
    let mut controller = IterationController::relaxation(solver, &config).unwrap();
    let report = controller.run(&mut NullWriter);
    (report, controller.into_solver().into_current())
}

#[test]
fn jacobi_3d_converges_reproducibly() {
    let (report, field) = converge_10_cube(1000);
    assert_eq!(report.state, ControllerState::Converged);
    assert!(report.steps > 1);
    assert!(report.steps < 10_000);
    assert!(report.max_change < 1e-3);
    assert_eq!(report.snapshots_written, 1);

    let (again, again_field) = converge_10_cube(1000);
    assert_eq!(again.steps, report.steps);
    assert_eq!(again.max_change, report.max_change);
    assert_eq!(again_field, field);

    for chunk_size in [1, 37, 512] {
        let (other, other_field) = converge_10_cube(chunk_size);
        assert_eq!(other.steps, report.steps);
        assert_eq!(other.max_change, report.max_change);
        assert_eq!(other_field, field);
    }
}

#[test]
fn clamped_face_is_invariant() {
    let config = RelaxationConfig::new([8, 7, 6]);
    let aabb = config.aabb();
    assert_eq!(aabb.interior_size(), 6 * 5 * 4);

    let mut solver = JacobiSolver::from_config(standard_stencils::jacobi_3d(), &config).unwrap();
    let initial = solver.current().clone();
    for _ in 0..20 {
        solver.step();
        let current = solver.current();
        for coord in aabb.coord_iter() {
            if aabb.is_boundary(&coord) {
                assert_eq!(current.view(&coord), initial.view(&coord));
            }
        }
        for z in 0..6 {
            for y in 0..7 {
                assert_eq!(current.view(&vector![0, y, z]), 100.0);
            }
        }
    }
}

#[test]
fn change_matches_reference() {
    let aabb = AABB::from_extents(&[7, 8, 9]);
    let current = random_field(aabb, 3);
    let mut next = current.clone();
    fdstencil::par_stencil::apply(&standard_stencils::jacobi_3d(), &current, &mut next, 13);

    let expected = reduction::max_change(&current, &next);
    assert!(expected > 0.0);
    for chunk_size in [1, 5, 64, 504, 10_000] {
        assert_eq!(reduction::par_max_change(&current, &next, chunk_size), expected);
    }
}

#[test]
fn bad_config_never_builds_a_solver() {
    let mut config = RelaxationConfig::new([10, 2, 10]);
    assert!(matches!(
        JacobiSolver::from_config(standard_stencils::jacobi_3d(), &config),
        Err(ConfigError::ExtentTooSmall { axis: 1, extent: 2 })
    ));
    config.extents = [10, 10, 10];
    config.threshold = 0.0;
    assert!(matches!(
        JacobiSolver::from_config(standard_stencils::jacobi_3d(), &config),
        Err(ConfigError::InvalidThreshold(_))
    ));
}
