use crate::config::ExportConfig;
use crate::errors::{ExportError, ExportResult};
use crate::exporter::{export, ExportRequest};
use crate::reporter::Reporter;
use clap::{Arg, ArgMatches, Command};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

// CLI metadata constants
const APP_NAME: &str = env!("CARGO_PKG_NAME");
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Builds the command-line definition.
///
/// Positional arguments are optional here and checked by
/// [`request_from_matches`], so each missing one gets its own message.
pub fn command() -> Command<'static> {
    Command::new(APP_NAME)
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .after_help(
            "Without FIELD arguments the default field list of ELEMENT is used ('user' and 'snip' have one).\n\
             The field name 'attachments' exports every attachment of a record.\n\
             Example:\n  snipexport dump.xml out snip name content attachments",
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("TOML file overriding root element, index width and default field lists")
                .takes_value(true)
                .allow_invalid_utf8(true),
        )
        .arg(
            Arg::new("input")
                .value_name("XMLFILE")
                .help("SnipSnap XML dump to export")
                .allow_invalid_utf8(true),
        )
        .arg(
            Arg::new("output")
                .value_name("DIR")
                .help("Output directory to create (must not exist)")
                .allow_invalid_utf8(true),
        )
        .arg(
            Arg::new("element")
                .value_name("ELEMENT")
                .help("First-level element to export, e.g. 'snip' or 'user'"),
        )
        .arg(
            Arg::new("fields")
                .value_name("FIELD")
                .help("Fields to export from each element")
                .multiple_values(true),
        )
}

/// One-line usage text printed after argument errors.
pub fn usage(program: &str) -> String {
    format!("usage: {program} [--config FILE] XMLFILE DIR ELEMENT [FIELD...]")
}

/// Turns parsed arguments into an export request.
///
/// # Errors
///
/// Returns `Usage` naming the first missing positional argument.
pub fn request_from_matches(matches: &ArgMatches) -> ExportResult<ExportRequest> {
    let input = matches
        .value_of_os("input")
        .ok_or_else(|| ExportError::Usage("document filename not specified".into()))?;
    let output = matches
        .value_of_os("output")
        .ok_or_else(|| ExportError::Usage("output directory path not specified".into()))?;
    let element = matches
        .value_of("element")
        .ok_or_else(|| ExportError::Usage("element name not specified".into()))?;
    let fields = matches
        .values_of("fields")
        .map(|values| values.map(str::to_string).collect())
        .unwrap_or_default();

    Ok(ExportRequest {
        input: PathBuf::from(input),
        output_dir: PathBuf::from(output),
        element: element.to_string(),
        fields,
    })
}

fn load_config(matches: &ArgMatches) -> ExportResult<ExportConfig> {
    match matches.value_of_os("config") {
        Some(path) => ExportConfig::from_toml_file(Path::new(path)),
        None => Ok(ExportConfig::default()),
    }
}

/// Parses `args` (program name first), runs the export and returns the
/// process exit status.
///
/// Fatal errors are reported through `reporter` and yield 1. Argument
/// errors also print the usage line. Per-field problems are reported during
/// the export but leave the status at 0.
pub fn run<I, T>(args: I, reporter: &mut Reporter) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(e) => {
            // clap renders its own help, version and error text
            let _ = e.print();
            return if e.use_stderr() { 1 } else { 0 };
        }
    };

    match execute(&matches, reporter) {
        Ok(()) => 0,
        Err(err) => {
            reporter.report(&err);
            if matches!(err, ExportError::Usage(_)) {
                let usage = usage(reporter.program());
                reporter.message(&usage);
            }
            exit_status(&err)
        }
    }
}

/// Exit status for an error that stopped the export.
pub fn exit_status(err: &ExportError) -> i32 {
    if err.is_fatal() {
        1
    } else {
        0
    }
}

fn execute(matches: &ArgMatches, reporter: &mut Reporter) -> ExportResult<()> {
    let request = request_from_matches(matches)?;
    let config = load_config(matches)?;
    export(&request, &config, reporter)?;
    Ok(())
}
