use crate::build_info;
use crate::config::RelaxationConfig;
use crate::example_util::*;
use clap::Parser;
use std::path::PathBuf;

/// Steady state heat distribution on a cube, Jacobi relaxation.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory for the midpoint slice files, will be created.
    #[arg(short, long, default_value = "laplace_output")]
    pub output_dir: PathBuf,

    /// Chunk size to use for parallelism.
    #[arg(short, long, default_value = "1000")]
    pub chunk_size: usize,

    /// Domain size, assume cube
    #[arg(short, long, default_value = "100")]
    pub domain_size: usize,

    /// Stop after this many iterations even if not converged.
    #[arg(short, long, default_value = "10000")]
    pub max_iterations: usize,

    /// Stop once no interior cell changes by this much in one pass.
    #[arg(short = 'e', long, default_value = "1e-5")]
    pub threshold: f64,

    /// Temperature of the x = 0 face.
    #[arg(long, default_value = "100.0")]
    pub face_value: f64,

    /// The number of threads to use.
    #[arg(short, long, default_value = "8")]
    pub threads: usize,

    /// Report the first step where the field holds NaN or infinity.
    #[arg(long)]
    pub divergence_check: bool,

    /// Print build information and quit
    #[arg(long)]
    pub build_info: bool,
}

impl Args {
    pub fn cli_setup(name: &str) -> std::io::Result<Self> {
        let args = Args::parse();

        if args.build_info {
            build_info::print_report(name);
            std::process::exit(0);
        }

        ensure_dir_exists(&args.output_dir)?;
        runtime_setup(args.threads)?;
        Ok(args)
    }

    pub fn to_config(&self) -> RelaxationConfig<3> {
        let mut config = RelaxationConfig::new([self.domain_size; 3]);
        config.max_iterations = self.max_iterations;
        config.threshold = self.threshold;
        config.chunk_size = self.chunk_size;
        config.divergence_check = self.divergence_check;
        for face in config.faces.iter_mut() {
            face.value = self.face_value;
        }
        config
    }

    pub fn finish(&self) {
        runtime_finish();
    }
}
