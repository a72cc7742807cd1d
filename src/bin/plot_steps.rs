use anyhow::{bail, Result};
use beam_plots::{run_steps, Config};
use clap::error::ErrorKind;
use clap::Parser;
use std::io;
use std::path::PathBuf;

/// Scatter plots of per-particle position and energy deviation across
/// simulation steps.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Step series array (.npy) indexed as [step, particle, channel]
    #[arg(value_name = "ARRAY_PATH")]
    array_path: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => bail!("Provide one input file"),
    };

    let cfg = Config::new()?;
    let stdout = io::stdout();
    run_steps(&cfg, &args.array_path, &mut stdout.lock())?;
    Ok(())
}
