use fdstencil::laplace_3d_example::*;
use fdstencil::snapshot::*;
use fdstencil::solver::*;
use fdstencil::stencil::*;

fn main() -> anyhow::Result<()> {
    let args = Args::cli_setup("laplace_3d")?;
    let config = args.to_config();

    println!(
        "Relaxing {}^3 grid, threshold {}, at most {} iterations",
        args.domain_size, config.threshold, config.max_iterations
    );
    let solver = JacobiSolver::from_config(standard_stencils::jacobi_3d(), &config)?;
    let mut controller = IterationController::relaxation(solver, &config)?;
    let mut writer = TextSnapshotWriter::new(&args.output_dir);

    let report = controller.run(&mut writer);
    controller.solver().print_report();
    report.print_report();

    args.finish();
    Ok(())
}
