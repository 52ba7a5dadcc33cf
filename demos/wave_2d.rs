use fdstencil::domain::*;
use fdstencil::image::*;
use fdstencil::init;
use fdstencil::snapshot::*;
use fdstencil::solver::*;
use fdstencil::stencil::*;
use fdstencil::wave_2d_example::*;

fn main() -> anyhow::Result<()> {
    let args = Args::cli_setup("wave_2d")?;
    let config = args.to_config();
    config.validate()?;

    println!(
        "Marching {}^2 grid for {} steps, tau^2 = {}",
        args.domain_size, config.total_steps, config.tau_sq
    );
    let mut initial = OwnedDomain::new(config.aabb());
    init::pluck(&mut initial, config.chunk_size);

    let solver = LeapfrogSolver::from_config(
        standard_stencils::wave_2d(config.tau_sq),
        &config,
        initial,
    )?;
    let mut controller = IterationController::time_marching(solver, &config)?;

    let mut text = TextSnapshotWriter::new(&args.output_dir);
    let report = if args.write_images {
        let frames = ImageSnapshotWriter::new(&args.output_dir, (-50.0, 50.0));
        controller.run(&mut (text, frames))
    } else {
        controller.run(&mut text)
    };
    controller.solver().print_report();
    report.print_report();

    args.finish();
    Ok(())
}
