use std::io;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;

use postbox::cli::{self, Cli};
use postbox::host::SystemHost;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli::stored_log_filter(&args))
        .parse_env(Env::default())
        .format_timestamp_millis()
        .init();

    let mut stdout = io::stdout().lock();

    cli::run(args, Rc::new(SystemHost::new()), &mut stdout)
        .context("postbox-settings command failed")
}
