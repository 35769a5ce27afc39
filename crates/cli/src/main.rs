use std::process::ExitCode;

use cmdline_core::{CmdLine, Options};
use log::{debug, info};

/// Settings of the font loader, pre-filled with its defaults.
#[derive(Debug)]
struct FontConfig {
    file: String,
    pt: String,
    dpi: String,
    range: String,
    cache_dir: String,
    verbose: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            file: String::new(),
            pt: "12".to_string(),
            dpi: "96,96".to_string(),
            range: "32,128".to_string(),
            cache_dir: ".".to_string(),
            verbose: false,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let mut config = FontConfig::default();
    let mut version = false;
    let mut options = Options::new("AbyssFreetype")
        .description("Cmdline utility for use of AbyssFreetype library")
        .log_command(true);

    let ok = CmdLine::new()
        .option("file", "Font file to load", &mut config.file, true)
        .option(
            "pt",
            "Requested point size of font (Default: '12')",
            &mut config.pt,
            false,
        )
        .option("dpi", "Dots per inch (Default: '96,96')", &mut config.dpi, false)
        .option(
            "range",
            "Character range to load (Default: '32,128')",
            &mut config.range,
            false,
        )
        .option(
            "cache_dir",
            "Directory to output cached png and binary glyph to (Default '.')",
            &mut config.cache_dir,
            false,
        )
        .flag(
            "version",
            "Display version number and build info",
            &mut version,
            false,
            &["file"],
        )
        .flag("v", "Enable verbose log messages", &mut config.verbose, false, &[])
        .parse_env(&mut options);

    if !ok {
        return ExitCode::FAILURE;
    }

    if version {
        println!("fontcfg {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    debug!("{config:?}");
    info!(
        "Loading `{}` at {}pt, {} dpi, range {} (cache: `{}`)",
        config.file, config.pt, config.dpi, config.range, config.cache_dir
    );

    ExitCode::SUCCESS
}
