use collstats::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    cli.init_logging();

    cli::execute(cli)
}
