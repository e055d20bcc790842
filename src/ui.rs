/// Progress and error lines for a reviewer-matrix run
///
/// Everything here goes to stderr, leaving stdout to the summary table:
/// - "reviewer-matrix: fetching ..." progress lines between API calls
/// - the final `error: ...` line printed before exiting with status 1
use lazy_static::lazy_static;
use std::io::Write;
use std::sync::Mutex;

const STATUS_PREFIX: &str = "reviewer-matrix: ";

lazy_static! {
    static ref STDERR_LOCK: Mutex<()> = Mutex::new(());
}

/// Run `f` while holding the stderr lock, so a line is never split by another writer
fn with_stderr<F>(f: F)
where
    F: FnOnce(),
{
    let _guard = STDERR_LOCK.lock();
    f();
}

/// A progress line as printed, e.g. `reviewer-matrix: fetching open pull requests for org/app`
pub fn format_status(message: &str) -> String {
    format!("{}{}", STATUS_PREFIX, message)
}

/// Report progress (one repository fetched, file saved, ...)
pub fn status(message: &str) {
    with_stderr(|| eprintln!("{}", format_status(message)));
}

/// Write `label` in bold `fg` when stderr is a terminal that supports it.
/// Returns false if nothing colored could be written.
fn write_label(label: &str, fg: term::color::Color) -> bool {
    let Some(mut t) = term::stderr() else {
        return false;
    };
    if t.fg(fg).is_err() {
        return false;
    }
    let _ = t.attr(term::Attr::Bold);
    let written = write!(t, "{}", label).is_ok();
    let _ = t.reset();
    written
}

/// Report the error that ends the run
pub fn print_error(msg: &str) {
    with_stderr(|| {
        eprintln!();
        if !write_label("error", term::color::BRIGHT_RED) {
            eprint!("error");
        }
        eprintln!(": {}", msg);
        eprintln!();
    });
}
