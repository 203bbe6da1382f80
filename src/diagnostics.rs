use crate::config::CONFIG_FILE;
use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
    return;
}

/// Render a fatal error as a structured markdown diagnostic:
/// what happened and, where there is one, how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::RootNotFound { path } => format!("\
# Error: Directory Not Found

`{}` does not exist.

## Fix

Pass the directory that holds your HTML files:

    casefix fix path/to/site
", path.display()),

        Error::NotADirectory { path } => format!("\
# Error: Not A Directory

`{}` is a file. casefix processes every HTML file under a directory.

## Fix

Pass the directory that contains it instead.
", path.display()),

        Error::TomlDe(e) => format!("\
# Error: Invalid Config

`{CONFIG_FILE}` could not be parsed: {e}

## Fix

Supported keys are `extensions`, `attributes`, `exclude` and `strategy`:

    extensions = [\"html\", \"htm\"]
    attributes = [\"src\", \"href\"]
    exclude = [\"vendor/\"]
    strategy = \"span\"
"),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),

        _ => format!("\
# Error

{e}
"),
    };
}
