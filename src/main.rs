use pathpick::{cli, init_logging};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    cli::run_from_env()
}
