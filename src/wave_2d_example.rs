use crate::build_info;
use crate::config::WaveConfig;
use crate::example_util::*;
use clap::Parser;
use std::path::PathBuf;

/// 2D wave equation, explicit leapfrog from a plucked membrane.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory for the wave_XXXXX.dat snapshots, will be created.
    #[arg(short, long, default_value = "wave_output")]
    pub output_dir: PathBuf,

    /// Chunk size to use for parallelism.
    #[arg(short, long, default_value = "1000")]
    pub chunk_size: usize,

    /// Domain size, assume square
    #[arg(short, long, default_value = "500")]
    pub domain_size: usize,

    /// Total number of time steps.
    #[arg(short, long, default_value = "10000")]
    pub steps: usize,

    /// Squared Courant number, must stay below 0.5.
    #[arg(long, default_value = "0.4")]
    pub tau_sq: f64,

    /// Write a snapshot every this many steps.
    #[arg(short = 'e', long, default_value = "5")]
    pub output_every: usize,

    /// Also write frame_XXXXX.png next to each snapshot.
    #[arg(short, long)]
    pub write_images: bool,

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

    pub fn to_config(&self) -> WaveConfig<2> {
        let mut config = WaveConfig::new([self.domain_size; 2]);
        config.total_steps = self.steps;
        config.tau_sq = self.tau_sq;
        config.output_every = self.output_every;
        config.chunk_size = self.chunk_size;
        config.divergence_check = self.divergence_check;
        config
    }

    pub fn finish(&self) {
        runtime_finish();
    }
}
