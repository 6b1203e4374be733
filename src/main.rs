use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use log::{error, info};

use netpath::analyzer::NetworkAnalyzer;
use netpath::persist;

#[derive(Parser)]
#[command(name = "netpath")]
#[command(about = "Along-path distance analysis between the links of a network topology")]
struct Cli {
    /// Topology files: JSON link lists.
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Directory the output artifacts are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn analyze_file(input: &Path, out_dir: &Path) -> Result<()> {
    let analyzer = NetworkAnalyzer::from_file(input)?;
    let analysis = analyzer.run()?;
    persist::save_analysis(out_dir, analyzer.name(), analyzer.network(), &analysis)?;
    info!("analysis of {} completed", input.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    fs::create_dir_all(&cli.out_dir)?;

    // One bad input file should not stop the rest of the batch.
    let mut failures = 0;
    for input in &cli.inputs {
        info!("analyzing network file {}", input.display());
        if let Err(err) = analyze_file(input, &cli.out_dir) {
            error!("failed to analyze {}: {:#}", input.display(), err);
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} input file(s) failed", cli.inputs.len());
    }
    Ok(())
}
