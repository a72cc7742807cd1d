use anyhow::Result;
use beam_plots::{run_comparison, Config};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = Config::new()?;
    run_comparison(&cfg)?;
    Ok(())
}
