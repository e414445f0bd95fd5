use std::env;
use std::ffi::OsStr;
use std::io::{IsTerminal, Write};

use env_logger::WriteStyle;
use log::LevelFilter;

use crate::error::VlsmError;

pub const ENV_VLSM_LOG_FORMAT: &str = "VLSM_LOG_FORMAT";

pub fn init(level: LevelFilter) -> Result<(), VlsmError> {
    let format = select_log_format(
        env::var_os(ENV_VLSM_LOG_FORMAT).as_deref(),
        std::io::stderr().is_terminal(),
        running_under_systemd(),
    );

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder.write_style(WriteStyle::Never);
    builder.format(move |buf, record| match format {
        LogFormat::Human => writeln!(buf, "{}: {}", record.level(), record.args()),
        LogFormat::Journal => writeln!(
            buf,
            "level={} target={} msg={}",
            record.level(),
            record.target(),
            record.args()
        ),
    });
    builder.try_init().map_err(|err| VlsmError::LoggerInit {
        reason: err.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Human,
    Journal,
}

fn running_under_systemd() -> bool {
    env::var_os("INVOCATION_ID").is_some() || env::var_os("JOURNAL_STREAM").is_some()
}

fn select_log_format(
    configured: Option<&OsStr>,
    stderr_is_terminal: bool,
    under_systemd: bool,
) -> LogFormat {
    let configured = configured
        .and_then(OsStr::to_str)
        .map(str::trim)
        .filter(|value| !value.is_empty());

    match configured {
        Some(value) if value.eq_ignore_ascii_case("human") => LogFormat::Human,
        Some(value) if value.eq_ignore_ascii_case("journal") => LogFormat::Journal,
        _ => auto_log_format(stderr_is_terminal, under_systemd),
    }
}

fn auto_log_format(stderr_is_terminal: bool, under_systemd: bool) -> LogFormat {
    if stderr_is_terminal && !under_systemd {
        LogFormat::Human
    } else {
        LogFormat::Journal
    }
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::{LogFormat, auto_log_format, init, select_log_format};
    use crate::error::VlsmError;

    #[test]
    fn second_init_reports_logger_init_error() {
        let _ = init(LevelFilter::Off);

        let err = init(LevelFilter::Off).expect_err("second init must fail");
        match err {
            VlsmError::LoggerInit { reason } => assert!(!reason.is_empty()),
            _ => panic!("expected logger init error"),
        }
    }

    #[test]
    fn interactive_terminals_get_human_output() {
        assert_eq!(auto_log_format(true, false), LogFormat::Human);
        assert_eq!(auto_log_format(false, false), LogFormat::Journal);
        assert_eq!(auto_log_format(true, true), LogFormat::Journal);
    }

    #[test]
    fn explicit_format_wins_and_auto_falls_back() {
        assert_eq!(
            select_log_format(Some("HUMAN".as_ref()), false, true),
            LogFormat::Human
        );
        assert_eq!(
            select_log_format(Some(" journal ".as_ref()), true, false),
            LogFormat::Journal
        );
        assert_eq!(
            select_log_format(Some("auto".as_ref()), true, false),
            LogFormat::Human
        );
        assert_eq!(
            select_log_format(Some("bogus".as_ref()), true, true),
            LogFormat::Journal
        );
        assert_eq!(select_log_format(None, false, false), LogFormat::Journal);
    }
}
