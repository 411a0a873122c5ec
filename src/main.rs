// SPDX-License-Identifier: MPL-2.0
use env_logger::{Builder, Target};
use iced_reel::app::{self, paths, Flags};
use log::LevelFilter;

const HELP: &str = "\
iced_reel - lazily-loaded video thumbnails

USAGE:
  iced_reel [OPTIONS] [VIDEO]...

OPTIONS:
  --manifest <FILE>    Gallery manifest (TOML, [[video]] entries)
  --assets <DIR>       Directory that /thumbnails/{index}.jpg resolves against
  --config-dir <DIR>   Config directory (overrides ICED_REEL_CONFIG_DIR)
  --vertical           Show VIDEO arguments as vertical (9:16) thumbnails
  --loop               Restart VIDEO arguments when they end
  -h, --help           Print this help
";

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("iced_reel", LevelFilter::Info)
        .init();
}

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let manifest = args.opt_value_from_str("--manifest")?;
    let assets = args.opt_value_from_str("--assets")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let vertical = args.contains("--vertical");
    let loop_on_end = args.contains("--loop");
    let sources = args
        .finish()
        .into_iter()
        .filter_map(|arg| arg.into_string().ok())
        .collect();

    Ok(Flags {
        manifest,
        assets,
        config_dir,
        vertical,
        loop_on_end,
        sources,
    })
}

fn main() -> iced::Result {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(flags.config_dir.clone());
    app::run(flags)
}
