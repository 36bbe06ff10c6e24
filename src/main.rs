// SPDX-License-Identifier: MPL-2.0
use iced_zoom_lens::app::{self, Flags};
use std::path::PathBuf;

const HELP: &str = "\
iced_zoom_lens - magnifying lens over an image

USAGE:
  iced_zoom_lens [OPTIONS] [IMAGE]

OPTIONS:
  --lens-size <PX>     Lens size in pixels (50-300)
  --zoom <LEVEL>       Initial magnification (1.0-5.0)
  --format <NAME>      Download format: jpg or png
  --shape <NAME>       Lens shape: circle or square
  --config <PATH>      Settings file to read instead of the default
  -h, --help           Print help

Without IMAGE a generated test pattern is shown.
";

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let flags = Flags {
        lens_size: args.opt_value_from_str("--lens-size")?,
        zoom: args.opt_value_from_str("--zoom")?,
        format: args.opt_value_from_str("--format")?,
        shape: args.opt_value_from_str("--shape")?,
        config_path: args.opt_value_from_os_str("--config", |s| {
            Ok::<_, std::convert::Infallible>(PathBuf::from(s))
        })?,
        file_path: args.finish().into_iter().next().map(PathBuf::from),
    };
    Ok(flags)
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    app::run(flags)
}
