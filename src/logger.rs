use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

const LOG_ENV: &str = "PEOPLE_SEED_LOG";

static SINK: OnceLock<Mutex<Sink>> = OnceLock::new();
static LEVEL: OnceLock<LogLevel> = OnceLock::new();

enum Sink {
    Stderr,
    File(File),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn parse(s: &str) -> Option<LogLevel> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    /// Environment override first, then the configured level, then info.
    fn resolve(env: Option<&str>, configured: Option<&str>) -> LogLevel {
        env.and_then(LogLevel::parse)
            .or_else(|| configured.and_then(LogLevel::parse))
            .unwrap_or(LogLevel::Info)
    }

    fn from_env(configured: Option<&str>) -> LogLevel {
        LogLevel::resolve(std::env::var(LOG_ENV).ok().as_deref(), configured)
    }

    fn rank(self) -> u8 {
        match self {
            LogLevel::Trace => 0,
            LogLevel::Debug => 1,
            LogLevel::Info => 2,
            LogLevel::Warn => 3,
            LogLevel::Error => 4,
        }
    }

    fn label(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    fn allows(self, level: LogLevel) -> bool {
        level.rank() >= self.rank()
    }
}

/// Install the global sink. With no `log_path` lines go to stderr.
/// Calling this more than once keeps the first sink.
pub fn init(level: Option<&str>, log_path: Option<&Path>) -> std::io::Result<()> {
    let _ = LEVEL.set(LogLevel::from_env(level));
    let Some(path) = log_path else {
        let _ = SINK.set(Mutex::new(Sink::Stderr));
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = SINK.set(Mutex::new(Sink::File(file)));
    debug(&format!("logging to {}", path.display()));
    Ok(())
}

/// True once a log file sink is installed. Stderr sinks and an
/// uninitialized logger both report false.
pub fn logs_to_file() -> bool {
    SINK.get()
        .and_then(|sink| sink.lock().ok().map(|s| matches!(*s, Sink::File(_))))
        .unwrap_or(false)
}

fn now_ts() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    format!("{}.{:03}", now.as_secs(), now.subsec_millis())
}

fn format_line(level: LogLevel, msg: &str) -> String {
    format!("{} [{}] {}", now_ts(), level.label(), msg)
}

fn write_line(level: LogLevel, msg: &str) {
    let min = *LEVEL.get_or_init(|| LogLevel::from_env(None));
    if !min.allows(level) {
        return;
    }
    let line = format_line(level, msg);
    // Nothing installed yet: fall back to stderr so early errors are not lost.
    let Some(sink) = SINK.get() else {
        eprintln!("{line}");
        return;
    };
    if let Ok(mut sink) = sink.lock() {
        match &mut *sink {
            Sink::Stderr => eprintln!("{line}"),
            Sink::File(f) => {
                let _ = writeln!(f, "{line}");
                let _ = f.flush();
            }
        }
    }
}

pub fn error(msg: &str) {
    write_line(LogLevel::Error, msg);
}
pub fn warn(msg: &str) {
    write_line(LogLevel::Warn, msg);
}
pub fn info(msg: &str) {
    write_line(LogLevel::Info, msg);
}
pub fn debug(msg: &str) {
    write_line(LogLevel::Debug, msg);
}
pub fn trace(msg: &str) {
    write_line(LogLevel::Trace, msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_names_case_insensitively() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse(" warning "), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("Trace"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::parse("verbose"), None);
    }

    #[test]
    fn level_filtering_follows_rank() {
        assert!(LogLevel::Info.allows(LogLevel::Error));
        assert!(LogLevel::Info.allows(LogLevel::Info));
        assert!(!LogLevel::Info.allows(LogLevel::Debug));
        assert!(LogLevel::Trace.allows(LogLevel::Trace));
        assert!(!LogLevel::Error.allows(LogLevel::Warn));
    }

    #[test]
    fn environment_level_overrides_config() {
        assert_eq!(LogLevel::resolve(Some("trace"), Some("error")), LogLevel::Trace);
        assert_eq!(LogLevel::resolve(Some("WARN"), None), LogLevel::Warn);
    }

    #[test]
    fn configured_level_applies_without_environment() {
        assert_eq!(LogLevel::resolve(None, Some("debug")), LogLevel::Debug);
        assert_eq!(LogLevel::resolve(None, None), LogLevel::Info);
    }

    #[test]
    fn unparsable_environment_falls_back_to_config() {
        assert_eq!(LogLevel::resolve(Some("loud"), Some("error")), LogLevel::Error);
        assert_eq!(LogLevel::resolve(Some(""), Some("nonsense")), LogLevel::Info);
    }

    #[test]
    fn reads_override_from_process_environment() {
        std::env::set_var(LOG_ENV, "trace");
        let level = LogLevel::from_env(Some("error"));
        std::env::remove_var(LOG_ENV);
        assert_eq!(level, LogLevel::Trace);
    }

    #[test]
    fn stderr_sink_is_not_a_file() {
        init(None, None).unwrap();
        assert!(!logs_to_file());
    }

    #[test]
    fn formatted_line_carries_level_label() {
        let line = format_line(LogLevel::Warn, "table missing");
        assert!(line.ends_with(" [WARN] table missing"));
        let ts = line.split(' ').next().unwrap();
        let (secs, millis) = ts.split_once('.').unwrap();
        assert!(secs.parse::<u64>().is_ok());
        assert_eq!(millis.len(), 3);
    }
}
