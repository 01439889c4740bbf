use lpshare_cli::{init_tracing, run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::from_env();
    init_tracing();
    run(&cli)?;
    Ok(())
}
