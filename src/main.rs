// SPDX-License-Identifier: MPL-2.0
use auction_lots::app::{self, paths, Flags};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
auction_lots - group product photographs into auction lots

USAGE:
    auction_lots [OPTIONS] [FOLDER]

OPTIONS:
    --lang <LOCALE>       Interface language (e.g. en-US, fr)
    --config-dir <DIR>    Directory holding settings.toml
    --log <FILTER>        Log filter, e.g. info or auction_lots=debug
    -h, --help            Print this help

ARGS:
    FOLDER                Image folder to open straight away
";

struct Args {
    lang: Option<String>,
    config_dir: Option<String>,
    log: Option<String>,
    folder: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let parsed = Args {
        lang: args.opt_value_from_str("--lang")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        log: args.opt_value_from_str("--log")?,
        folder: args.opt_free_from_str()?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        eprintln!("warning: ignoring extra arguments {rest:?}");
    }
    Ok(Some(parsed))
}

fn main() -> iced::Result {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(EnvFilter::new(args.log.as_deref().unwrap_or("info")))
        .init();

    paths::init_cli_overrides(args.config_dir.clone());

    app::run(Flags {
        lang: args.lang,
        folder: args.folder,
        config_dir: args.config_dir.map(PathBuf::from),
    })
}
