use std::{
    env, fmt, fs,
    io::{self, Read},
    process::ExitCode,
};

use descstat::{Number, NumberError, Statistic};
use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;
use strum::IntoEnumIterator;

const LOG_ENV: &str = "DESCSTAT_LOG";

const USAGE: &str = "\
usage: descstat [OPTIONS] [STATISTIC|all] [FILE]

Reads whitespace or comma separated numbers from FILE (or stdin when FILE is
missing or `-`) and prints descriptive statistics.

statistics: mean, median, mode, variance, stdev, pvariance, pstdev, all (default)

options:
  --decimal        read literals with a decimal point as exact decimals
  --json           print results as a JSON object
  --center VALUE   precomputed mean for variance, stdev, pvariance and pstdev
  -h, --help       show this message";

fn main() -> ExitCode {
    pretty_env_logger::init_custom_env(LOG_ENV);

    let config = match parse_args(env::args().skip(1)) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(report) => {
            print!("{}", report.output);
            if report.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            if config.json {
                println!("{}", json_error(&err));
            } else {
                eprintln!("error: {err}");
            }
            ExitCode::FAILURE
        }
    }
}

/// What the command line asked for.
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Run(Config),
}

/// Which statistics to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    All,
    One(Statistic),
}

impl Selection {
    fn statistics(self) -> Vec<Statistic> {
        match self {
            Self::All => Statistic::iter().collect(),
            Self::One(statistic) => vec![statistic],
        }
    }
}

#[derive(Debug, PartialEq)]
struct Config {
    selection: Selection,
    /// Input file, `None` for stdin.
    input: Option<String>,
    decimal: bool,
    json: bool,
    center: Option<String>,
}

#[derive(Debug)]
enum CliError {
    Usage(String),
    Io { path: String, source: io::Error },
    Parse { token: String, source: NumberError },
    Json(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(msg) => f.write_str(msg),
            Self::Io { path, source } => write!(f, "cannot read {path}: {source}"),
            Self::Parse { token, source } => write!(f, "bad value {token:?}: {source}"),
            Self::Json(err) => write!(f, "cannot encode JSON: {err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Usage(_) => None,
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command, CliError> {
    let mut decimal = false;
    let mut json = false;
    let mut center = None;
    let mut positional = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--decimal" => decimal = true,
            "--json" => json = true,
            "--center" => match args.next() {
                Some(value) => center = Some(value),
                None => return Err(CliError::Usage("--center needs a value".to_owned())),
            },
            flag if flag.starts_with("--") => {
                if let Some(value) = flag.strip_prefix("--center=") {
                    center = Some(value.to_owned());
                } else {
                    return Err(CliError::Usage(format!("unknown option {flag}")));
                }
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let (selection, input) = match positional.next() {
        None => (Selection::All, None),
        Some(first) => match parse_selection(&first) {
            Some(selection) => (selection, positional.next()),
            None => (Selection::All, Some(first)),
        },
    };
    if let Some(extra) = positional.next() {
        return Err(CliError::Usage(format!("unexpected argument {extra}")));
    }

    Ok(Command::Run(Config {
        selection,
        input: input.filter(|path| path != "-"),
        decimal,
        json,
        center,
    }))
}

fn parse_selection(name: &str) -> Option<Selection> {
    if name.eq_ignore_ascii_case("all") {
        return Some(Selection::All);
    }
    name.to_ascii_lowercase().parse().ok().map(Selection::One)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        Some(path) => {
            debug!("reading {path}");
            fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.to_owned(),
                source,
            })
        }
        None => {
            debug!("reading stdin");
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| CliError::Io {
                    path: "<stdin>".to_owned(),
                    source,
                })?;
            Ok(text)
        }
    }
}

fn parse_value(token: &str, decimal: bool) -> Result<Number, CliError> {
    let parsed = if decimal {
        Number::parse_decimal(token)
    } else {
        token.parse()
    };
    parsed.map_err(|source| CliError::Parse {
        token: token.to_owned(),
        source,
    })
}

/// Splits on whitespace and commas, skipping empty tokens.
fn parse_values(text: &str, decimal: bool) -> Result<Vec<Number>, CliError> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| parse_value(token, decimal))
        .collect()
}

/// Result of one statistic as printed in JSON output.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Outcome {
    Value(String),
    Error { error: String },
}

struct Report {
    output: String,
    success: bool,
}

fn run(config: &Config) -> Result<Report, CliError> {
    let text = read_input(config.input.as_deref())?;
    let data = parse_values(&text, config.decimal)?;
    let center = config
        .center
        .as_deref()
        .map(|value| parse_value(value, config.decimal))
        .transpose()?;
    debug!(
        "parsed {} values ({} mode), center {center:?}",
        data.len(),
        if config.decimal { "decimal" } else { "float" }
    );

    let results = evaluate(config.selection, &data, center.as_ref());
    let success = match config.selection {
        Selection::All => true,
        Selection::One(_) => results.values().all(|outcome| matches!(outcome, Outcome::Value(_))),
    };
    let output = if config.json {
        format!("{}\n", serde_json::to_string_pretty(&results)?)
    } else {
        render_text(config.selection, &results)
    };
    Ok(Report { output, success })
}

fn evaluate(selection: Selection, data: &[Number], center: Option<&Number>) -> IndexMap<Statistic, Outcome> {
    selection
        .statistics()
        .into_iter()
        .map(|statistic| {
            if center.is_some() && !statistic.uses_center() && selection != Selection::All {
                warn!("--center is ignored by {statistic}");
            }
            let outcome = match statistic.apply(data, center.cloned()) {
                Ok(value) => Outcome::Value(value.to_string()),
                Err(err) => {
                    warn!("{statistic} failed: {err}");
                    Outcome::Error { error: err.to_string() }
                }
            };
            (statistic, outcome)
        })
        .collect()
}

fn render_text(selection: Selection, results: &IndexMap<Statistic, Outcome>) -> String {
    let mut output = String::new();
    for (statistic, outcome) in results {
        let line = match (selection, outcome) {
            (Selection::One(_), Outcome::Value(value)) => value.clone(),
            (Selection::One(_), Outcome::Error { error }) => format!("error: {error}"),
            (Selection::All, Outcome::Value(value)) => format!("{statistic}: {value}"),
            (Selection::All, Outcome::Error { error }) => format!("{statistic}: error: {error}"),
        };
        output.push_str(&line);
        output.push('\n');
    }
    output
}

fn json_error(err: &CliError) -> String {
    let mut body = IndexMap::new();
    body.insert("error", err.to_string());
    serde_json::to_string(&body).unwrap_or_else(|_| format!("{{\"error\": {:?}}}", err.to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    fn config(list: &[&str]) -> Config {
        match parse_args(args(list)).unwrap() {
            Command::Run(config) => config,
            Command::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn defaults_to_all_from_stdin() {
        assert_eq!(
            config(&[]),
            Config {
                selection: Selection::All,
                input: None,
                decimal: false,
                json: false,
                center: None,
            }
        );
    }

    #[test]
    fn statistic_and_file() {
        let parsed = config(&["--json", "pvariance", "data.txt", "--center", "1.5"]);
        assert_eq!(parsed.selection, Selection::One(Statistic::Pvariance));
        assert_eq!(parsed.input.as_deref(), Some("data.txt"));
        assert!(parsed.json);
        assert_eq!(parsed.center.as_deref(), Some("1.5"));
    }

    #[test]
    fn lone_path_means_all() {
        let parsed = config(&["numbers.csv"]);
        assert_eq!(parsed.selection, Selection::All);
        assert_eq!(parsed.input.as_deref(), Some("numbers.csv"));
        assert_eq!(config(&["MEAN", "-"]).input, None);
        assert_eq!(config(&["--center=2", "all"]).center.as_deref(), Some("2"));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(matches!(parse_args(args(&["--center"])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(args(&["--verbose"])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(args(&["mean", "a", "b"])), Err(CliError::Usage(_))));
        assert_eq!(parse_args(args(&["mean", "--help"])).unwrap(), Command::Help);
    }

    #[test]
    fn splits_on_commas_and_whitespace() {
        let values = parse_values("1, 2.5\n3/4,,\t4", false).unwrap();
        let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["1", "2.5", "3/4", "4"]);
        assert!(parse_values("", false).unwrap().is_empty());
    }

    #[test]
    fn decimal_mode_keeps_literals_exact() {
        let values = parse_values("0.1 0.2", true).unwrap();
        assert_eq!(values[0].type_name(), "Decimal");
        assert_eq!(values[1].to_string(), "0.2");
    }

    #[test]
    fn decimal_mode_bounds_exponents() {
        let err = parse_values("1 1E+2147483647", true).unwrap_err();
        assert!(matches!(
            &err,
            CliError::Parse {
                source: NumberError::ExponentOutOfRange { .. },
                ..
            }
        ));
        let data = parse_values("1E+999999", true).unwrap();
        let results = evaluate(Selection::One(Statistic::Mean), &data, None);
        assert_eq!(
            render_text(Selection::One(Statistic::Mean), &results),
            "1.000000000000000000000000000E+999999\n"
        );
    }

    #[test]
    fn bad_token_is_reported() {
        let err = parse_values("1 two 3", false).unwrap_err();
        assert!(matches!(&err, CliError::Parse { token, .. } if token == "two"));
        assert!(err.to_string().starts_with("bad value \"two\""));
    }

    #[test]
    fn text_output_for_all() {
        let data = parse_values("1 2 3 4 4", false).unwrap();
        let results = evaluate(Selection::All, &data, None);
        assert_eq!(
            render_text(Selection::All, &results),
            "mean: 2.8\nmedian: 3\nmode: 4\nvariance: 1.7\nstdev: 1.3038404810405297\npvariance: 1.3599999999999999\npstdev: 1.16619037896906\n"
        );
    }

    #[test]
    fn single_statistic_failure_is_reported() {
        let data = parse_values("1 2 3", false).unwrap();
        let results = evaluate(Selection::One(Statistic::Mode), &data, None);
        assert_eq!(
            render_text(Selection::One(Statistic::Mode), &results),
            "error: no unique mode; found 3 equally common values\n"
        );
    }

    #[test]
    fn json_output_is_ordered() {
        let data = parse_values("5", false).unwrap();
        let results = evaluate(Selection::All, &data, None);
        let json: serde_json::Value = serde_json::to_value(&results).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["mean", "median", "mode", "variance", "stdev", "pvariance", "pstdev"]);
        assert_eq!(json["mean"], "5.0");
        assert_eq!(json["median"], "5");
        assert_eq!(
            json["variance"]["error"],
            "variance requires at least two data points"
        );
        assert_eq!(json["pvariance"], "0.0");
    }

    #[test]
    fn center_is_forwarded() {
        let data = parse_values("1 2 3", false).unwrap();
        let center = parse_value("0", false).unwrap();
        let results = evaluate(Selection::One(Statistic::Variance), &data, Some(&center));
        assert_eq!(render_text(Selection::One(Statistic::Variance), &results), "7.0\n");
    }

    #[test]
    fn json_error_body() {
        let err = CliError::Usage("boom".to_owned());
        assert_eq!(json_error(&err), r#"{"error":"boom"}"#);
    }
}
