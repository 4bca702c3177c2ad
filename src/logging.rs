//! Console and file logging with per-artifact outcome collection.
use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

/// One recorded artifact (or step) outcome for the summary.
#[derive(Debug, Clone)]
pub struct OutcomeEntry {
    pub name: String,
    pub status: Status,
    pub message: Option<String>,
}

/// Status of a processed artifact or step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Processed successfully (link created/removed or already correct).
    Ok,
    /// Not applicable on this platform (ignore verdict).
    NotApplicable,
    /// Deliberately skipped, with a reason.
    Skipped,
    /// Previewed only.
    DryRun,
    /// Faulted; the rest of the run continued.
    Failed,
}

/// Structured logger with dry-run awareness and summary collection.
///
/// All messages are always written to a persistent log file at
/// `$XDG_CACHE_HOME/cfgsync/<command>.log` (default `~/.cache/cfgsync/<command>.log`)
/// with timestamps and ANSI codes stripped, regardless of the verbose flag.
pub struct Logger {
    verbose: bool,
    outcomes: std::cell::RefCell<Vec<OutcomeEntry>>,
    log_file: Option<PathBuf>,
}

/// Return the log file path under `$XDG_CACHE_HOME/cfgsync/` (or `~/.cache/cfgsync/`).
fn log_file_path(command: &str) -> Option<PathBuf> {
    let cache_dir = std::env::var("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".cache")
        });
    let dir = cache_dir.join("cfgsync");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Strip ANSI escape sequences from a string.
fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until 'm' (end of SGR sequence)
            for inner in chars.by_ref() {
                if inner == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

impl Logger {
    #[must_use]
    pub fn new(verbose: bool, command: &str) -> Self {
        let log_file = log_file_path(command);

        // Truncate and write header (new run = fresh log)
        if let Some(ref path) = log_file {
            let version =
                option_env!("CFGSYNC_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
            let header = format!(
                "==========================================\n\
                 cfgsync {version} {}\n\
                 ==========================================\n",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            );
            let _ = fs::write(path, header);
        }

        Self {
            verbose,
            outcomes: std::cell::RefCell::new(Vec::new()),
            log_file,
        }
    }

    /// Append a line to the persistent log file.
    fn write_to_file(&self, level: &str, msg: &str) {
        if let Some(ref path) = self.log_file
            && let Ok(mut f) = fs::OpenOptions::new().append(true).open(path)
        {
            let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            let clean = strip_ansi(msg);
            let _ = writeln!(f, "{ts} {level} {clean}");
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    pub fn error(&self, msg: &str) {
        eprintln!("\x1b[31mERROR\x1b[0m {msg}");
        self.write_to_file("ERR", msg);
    }

    pub fn warn(&self, msg: &str) {
        eprintln!("\x1b[33mWARN\x1b[0m  {msg}");
        self.write_to_file("WRN", msg);
    }

    pub fn stage(&self, msg: &str) {
        println!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m");
        self.write_to_file("STG", msg);
    }

    pub fn info(&self, msg: &str) {
        println!("  {msg}");
        self.write_to_file("INF", msg);
    }

    pub fn debug(&self, msg: &str) {
        if self.verbose {
            println!("  \x1b[2m{msg}\x1b[0m");
        }
        // Always log debug to file, even when not verbose on terminal
        self.write_to_file("DBG", msg);
    }

    pub fn dry_run(&self, msg: &str) {
        println!("  \x1b[33m[DRY RUN]\x1b[0m {msg}");
        self.write_to_file("DRY", msg);
    }

    /// Record a per-artifact outcome for the summary.
    pub fn record(&self, name: &str, status: Status, message: Option<&str>) {
        self.outcomes.borrow_mut().push(OutcomeEntry {
            name: name.to_string(),
            status,
            message: message.map(String::from),
        });
    }

    /// Number of recorded outcomes.
    #[must_use]
    pub fn outcome_count(&self) -> usize {
        self.outcomes.borrow().len()
    }

    /// Number of recorded outcomes with [`Status::Failed`].
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.outcomes
            .borrow()
            .iter()
            .filter(|o| o.status == Status::Failed)
            .count()
    }

    /// Print the summary of all recorded outcomes.
    pub fn print_summary(&self) {
        let outcomes = self.outcomes.borrow();
        if outcomes.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");

        let mut ok = 0u32;
        let mut not_applicable = 0u32;
        let mut skipped = 0u32;
        let mut dry_run = 0u32;
        let mut failed = 0u32;

        for outcome in outcomes.iter() {
            let (icon, color) = match outcome.status {
                Status::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                Status::NotApplicable => {
                    not_applicable += 1;
                    ("·", "\x1b[2m")
                }
                Status::Skipped => {
                    skipped += 1;
                    ("○", "\x1b[33m")
                }
                Status::DryRun => {
                    dry_run += 1;
                    ("~", "\x1b[33m")
                }
                Status::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = match &outcome.message {
                Some(msg) => format!(" ({msg})"),
                None => String::new(),
            };

            let line = format!("{icon} {}{suffix}", outcome.name);
            println!("  {color}{line}\x1b[0m");
            self.write_to_file("INF", &line);
        }

        println!();
        let total = ok + not_applicable + skipped + dry_run + failed;
        let totals = format!(
            "{total} artifacts: {ok} ok, {not_applicable} n/a, {skipped} skipped, {dry_run} dry-run, {failed} failed"
        );
        println!(
            "  {total} artifacts: \x1b[32m{ok} ok\x1b[0m, {not_applicable} n/a, \x1b[33m{skipped} skipped\x1b[0m, {dry_run} dry-run, \x1b[31m{failed} failed\x1b[0m"
        );
        self.write_to_file("INF", &totals);

        if let Some(path) = &self.log_file {
            println!("  \x1b[2mlog: {}\x1b[0m", path.display());
            self.write_to_file("INF", &format!("log: {}", path.display()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logger_new() {
        let log = Logger::new(false, "test");
        assert!(!log.verbose);
        assert_eq!(log.outcome_count(), 0);
    }

    #[test]
    fn logger_verbose() {
        let log = Logger::new(true, "test");
        assert!(log.verbose);
    }

    #[test]
    fn record_outcome_ok() {
        let log = Logger::new(false, "test");
        log.record("ripgreprc", Status::Ok, None);
        let outcomes = log.outcomes.borrow();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].name, "ripgreprc");
        assert_eq!(outcomes[0].status, Status::Ok);
    }

    #[test]
    fn record_outcome_with_message() {
        let log = Logger::new(false, "test");
        log.record("clangd", Status::NotApplicable, Some("unsupported"));
        let outcomes = log.outcomes.borrow();
        assert_eq!(outcomes[0].message, Some("unsupported".to_string()));
    }

    #[test]
    fn failure_count_counts_only_failed() {
        let log = Logger::new(false, "test");
        log.record("a", Status::Ok, None);
        log.record("b", Status::Failed, Some("boom"));
        log.record("c", Status::DryRun, None);
        log.record("d", Status::Failed, Some("boom again"));
        assert_eq!(log.failure_count(), 2);
        assert_eq!(log.outcome_count(), 4);
    }

    #[test]
    fn strip_ansi_removes_colors() {
        assert_eq!(strip_ansi("\x1b[31mERROR\x1b[0m hello"), "ERROR hello");
        assert_eq!(strip_ansi("no codes here"), "no codes here");
        assert_eq!(
            strip_ansi("\x1b[1;34m==>\x1b[0m \x1b[1mstage\x1b[0m"),
            "==> stage"
        );
    }

    #[test]
    fn log_file_is_created() {
        let log = Logger::new(false, "test");
        if let Some(path) = log.log_path() {
            assert!(path.exists(), "log file should be created on Logger::new");
        }
    }

    #[test]
    fn debug_always_written_to_file() {
        let log = Logger::new(false, "test"); // verbose=false
        // Write a unique marker so we can find it even with parallel tests
        let marker = format!("debug-marker-{}", std::process::id());
        log.debug(&marker);
        if let Some(path) = log.log_path() {
            let contents = fs::read_to_string(path).unwrap();
            assert!(
                contents.contains(&marker),
                "debug messages should always appear in the log file"
            );
        }
    }
}
