use std::process::ExitCode;

use clap::Parser;
use expect_fail::color_eyre::eyre::{Context, Result};
use expect_fail::status_emitter::{Gha, Json, StatusEmitter, Text};
use expect_fail::{display, run_tests_generic, Args, Config, Format};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let args = Args::parse();
    let root_dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => Config::default_root_dir().wrap_err("failed to locate the `expect-fail` binary")?,
    };
    let mut config = Config::cargo_check(root_dir);
    config.with_args(&args);

    let text: Box<dyn StatusEmitter> = match args.output_format() {
        Format::Json => Box::new(Json),
        format @ (Format::Pretty | Format::Terse) => Box::new(Text::from(format)),
    };
    let name = display(&config.root_dir);
    let status_emitter = if cfg!(feature = "gha") {
        Box::new((text, Gha::<true> { name })) as Box<dyn StatusEmitter>
    } else {
        text
    };

    Ok(match run_tests_generic(config, |_| true, status_emitter) {
        Ok(report) => report.exit_code(),
        // Already reported by the status emitter.
        Err(_) => ExitCode::FAILURE,
    })
}
