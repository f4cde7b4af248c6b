//! Tracing subscriber initialisation.
//!
//! Only the CLI crate is allowed to call [`init_logging`]; `labra-core` and
//! `labra-adapters` only *emit* spans and events.
//!
//! # Verbosity mapping
//!
//! | Flag(s)                       | Filter level |
//! |-------------------------------|--------------|
//! | `--debug` / `LABRA_DEBUG=1`   | DEBUG        |
//! | `--quiet`                     | ERROR        |
//! | (none)                        | WARN         |
//! | `-v`                          | INFO         |
//! | `-vv`                         | DEBUG        |
//! | `-vvv`                        | TRACE        |
//!
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

pub const DEBUG_ENV: &str = "LABRA_DEBUG";

/// Initialise the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros fire.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let debug_env = std::env::var(DEBUG_ENV).ok();
    let level = derive_level(args, debug_env.as_deref());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "labractl={level},labra_core={level},labra_adapters={level}"
        ))
    });

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

/// `1` or `true`, in any case.
pub fn debug_requested(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        let v = v.trim();
        v == "1" || v.eq_ignore_ascii_case("true")
    })
}

fn derive_level(args: &GlobalArgs, debug_env: Option<&str>) -> &'static str {
    if args.debug || debug_requested(debug_env) {
        return "debug";
    }
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            ..GlobalArgs::default()
        }
    }

    #[test]
    fn level_quiet() {
        assert_eq!(derive_level(&args_with(0, true), None), "error");
    }

    #[test]
    fn level_default() {
        assert_eq!(derive_level(&args_with(0, false), None), "warn");
    }

    #[test]
    fn level_verbose_counts() {
        assert_eq!(derive_level(&args_with(1, false), None), "info");
        assert_eq!(derive_level(&args_with(2, false), None), "debug");
        assert_eq!(derive_level(&args_with(3, false), None), "trace");
        assert_eq!(derive_level(&args_with(10, false), None), "trace");
    }

    #[test]
    fn debug_flag_wins_over_quiet() {
        let args = GlobalArgs {
            debug: true,
            quiet: true,
            ..GlobalArgs::default()
        };
        assert_eq!(derive_level(&args, None), "debug");
    }

    #[test]
    fn debug_env_values() {
        assert!(debug_requested(Some("1")));
        assert!(debug_requested(Some("TRUE")));
        assert!(debug_requested(Some("true")));
        assert!(!debug_requested(Some("0")));
        assert!(!debug_requested(Some("yes")));
        assert!(!debug_requested(None));
        assert_eq!(derive_level(&args_with(0, false), Some("1")), "debug");
    }
}
