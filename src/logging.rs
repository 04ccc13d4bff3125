use std::io::Write;

use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter};

/// Map `-q` / `-v` counts onto a level. CI logs are the only diagnostic
/// surface, so the default shows info lines.
pub fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }

    match verbosity {
        0 => LevelFilter::Info,  // default
        1 => LevelFilter::Debug, // -v
        _ => LevelFilter::Trace, // -vv
    }
}

pub fn init_logger(verbosity: u8, quiet: bool) {
    let mut builder = Builder::new();
    builder.filter_level(level_for(verbosity, quiet));
    // RUST_LOG wins when set
    builder.parse_default_env();

    builder.format(|buf, record| {
        let level = record.level();

        let level_label = match level {
            Level::Error => "ERROR".red().bold(),
            Level::Warn  => "WARN ".yellow().bold(),
            Level::Info  => "INFO ".white().bold(),
            Level::Debug => "DEBUG".bright_black(),
            Level::Trace => "TRACE".bright_black(),
        };

        writeln!(
            buf,
            "{} {}",
            level_label,
            record.args()
        )
    });

    builder.init();
}
