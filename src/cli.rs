// Command-line front end for spcfile.
//
// Explicit subcommands over the library: inspect a file (`info`, `data`),
// convert to and from CSV (`csv`, `from-csv`) and rewrite a file in the
// plain-float form (`resave`).

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::io::{self, CsvOptions, FileStats};
use crate::spc::{DecodeOptions, SpcFile, Spectrum};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const DEFAULT_POINTS: usize = 5;
const DEFAULT_PRECISION: usize = 6;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Galactic Industries SPC spectral file tool.
#[derive(Parser, Debug)]
#[command(
    name = "spcfile",
    version,
    about = "Inspect and convert SPC spectral files",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output as JSON (`info` to stdout, stats of other commands to stderr).
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print header, flags, sub-header and log header of an SPC file.
    Info(InfoArgs),
    /// Print the first and last points of the spectrum.
    Data(DataArgs),
    /// Convert SPC files to `<name>.csv` next to each input.
    Csv(CsvArgs),
    /// Decode and re-encode an SPC file in plain-float form.
    Resave(ConvertArgs),
    /// Build an SPC file from `x,y` CSV rows.
    FromCsv(FromCsvArgs),
}

#[derive(Args, Debug)]
struct InfoArgs {
    /// SPC file to inspect.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Do not decode the log block header.
    #[arg(long = "no-log")]
    no_log: bool,
}

#[derive(Args, Debug)]
struct DataArgs {
    /// SPC file to read.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Number of points to show from each end.
    #[arg(long, short = 'n', default_value_t = DEFAULT_POINTS)]
    points: usize,
}

#[derive(Args, Debug)]
struct CsvFormatArgs {
    /// Digits after the decimal point.
    #[arg(long, default_value_t = DEFAULT_PRECISION)]
    precision: usize,

    /// Write an `x,y` header line.
    #[arg(long = "header")]
    header_row: bool,
}

#[derive(Args, Debug)]
struct CsvArgs {
    /// SPC files to convert.
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    inputs: Vec<PathBuf>,

    #[command(flatten)]
    format: CsvFormatArgs,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Input file.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Output SPC file.
    #[arg(value_hint = ValueHint::FilePath)]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct FromCsvArgs {
    #[command(flatten)]
    paths: ConvertArgs,

    /// Memo text stored in the header comment field.
    #[arg(long)]
    comment: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Info,
    Data,
    Csv,
    Resave,
    FromCsv,
}

#[derive(Debug)]
struct Options {
    command: Command,
    force: bool,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    inputs: Vec<PathBuf>,
    output: Option<PathBuf>,
    points: usize,
    read_log_header: bool,
    csv: CsvOptions,
    comment: Option<String>,
}

impl Options {
    fn new(command: Command, cli: &Cli) -> Self {
        Self {
            command,
            force: cli.force,
            quiet: cli.quiet,
            verbose: cli.verbose.min(2),
            json_output: cli.json_output,
            inputs: Vec::new(),
            output: None,
            points: DEFAULT_POINTS,
            read_log_header: true,
            csv: CsvOptions::default(),
            comment: None,
        }
    }

    fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            read_log_header: self.read_log_header,
        }
    }

    fn log_filter(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "debug",
            _ => "trace",
        }
    }
}

fn resolve_options(cli: Cli) -> Options {
    match cli.command {
        Cmd::Info(ref args) => Options {
            inputs: vec![args.input.clone()],
            read_log_header: !args.no_log,
            ..Options::new(Command::Info, &cli)
        },
        Cmd::Data(ref args) => Options {
            inputs: vec![args.input.clone()],
            points: args.points,
            ..Options::new(Command::Data, &cli)
        },
        Cmd::Csv(ref args) => Options {
            inputs: args.inputs.clone(),
            csv: CsvOptions {
                precision: args.format.precision,
                header_row: args.format.header_row,
            },
            ..Options::new(Command::Csv, &cli)
        },
        Cmd::Resave(ref args) => Options {
            inputs: vec![args.input.clone()],
            output: Some(args.output.clone()),
            ..Options::new(Command::Resave, &cli)
        },
        Cmd::FromCsv(ref args) => Options {
            inputs: vec![args.paths.input.clone()],
            output: Some(args.paths.output.clone()),
            comment: args.comment.clone(),
            ..Options::new(Command::FromCsv, &cli)
        },
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("spcfile".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn first_input(opts: &Options) -> &Path {
    opts.inputs.first().map_or(Path::new(""), PathBuf::as_path)
}

/// Refuse to clobber `path` unless `--force` was given.
fn check_output(opts: &Options, path: &Path) -> bool {
    if path.exists() && !opts.force {
        eprintln!(
            "spcfile: {}: output file exists (use --force to overwrite)",
            path.display()
        );
        return false;
    }
    true
}

fn read_input(opts: &Options, path: &Path) -> Option<(SpcFile, FileStats)> {
    match io::read_spc_with_options(path, &opts.decode_options()) {
        Ok(r) => Some(r),
        Err(e) => {
            eprintln!("spcfile: {}: {e}", path.display());
            None
        }
    }
}

fn print_json(value: &serde_json::Value, to_stdout: bool) {
    match serde_json::to_string_pretty(value) {
        Ok(s) if to_stdout => println!("{s}"),
        Ok(s) => eprintln!("{s}"),
        Err(e) => eprintln!("spcfile: JSON error: {e}"),
    }
}

/// Indices of the points shown by `data`: the first and last `n`, or all
/// of them when the two ranges would meet.
fn preview_ranges(
    len: usize,
    n: usize,
) -> (std::ops::Range<usize>, Option<std::ops::Range<usize>>) {
    if n.saturating_mul(2) >= len {
        (0..len, None)
    } else {
        (0..n, Some(len - n..len))
    }
}

// ---------------------------------------------------------------------------
// Info command
// ---------------------------------------------------------------------------

fn cmd_info(opts: &Options) -> i32 {
    let path = first_input(opts);
    let Some((file, stats)) = read_input(opts, path) else {
        return 1;
    };

    if opts.json_output {
        print_json(&info_json(path, &file, &stats), true);
        return 0;
    }

    let h = &file.header;
    let flags = file.flag_set();
    println!("File:                   {}", path.display());
    println!("File size:              {}", stats.bytes);
    if let Some(hex) = stats.sha256_hex() {
        println!("SHA-256:                {hex}");
    }
    println!("Version:                {:#04x}", h.version);
    println!("Flags:                  {:#04x}", h.flags);
    for line in flags.describe() {
        println!("  - {line}");
    }
    println!("Experiment type:        {}", h.experiment);
    if h.is_plain_float() {
        println!("Exponent:               {} (float Y)", h.exponent);
    } else {
        println!("Exponent:               {}", h.exponent);
    }
    println!("Points:                 {}", h.point_count);
    println!("First X:                {}", h.first_x);
    println!("Last X:                 {}", h.last_x);
    println!("Subfiles:               {}", h.subfile_count);
    println!(
        "Axis types (X/Y/Z/W):   {}/{}/{}/{}",
        h.x_type, h.y_type, h.z_type, h.w_type
    );
    println!("Date:                   {}", h.date());
    let source = h.source_text();
    if !source.is_empty() {
        println!("Source:                 {source}");
    }
    let method = h.method_text();
    if !method.is_empty() {
        println!("Method:                 {method}");
    }
    let comment = h.comment_text();
    if !comment.is_empty() {
        println!("Comment:                {comment}");
    }
    println!("Log offset:             {}", h.log_offset);

    if let Some(sub) = &file.sub_header {
        println!();
        println!("Sub-header flags:       {:#04x}", sub.flags);
        for line in sub.sub_flags().describe() {
            println!("  - {line}");
        }
        println!("Sub-header exponent:    {}", sub.exponent);
        println!("Sub-header index:       {}", sub.index);
        println!("Z range:                {} .. {}", sub.start_z, sub.end_z);
        println!("Scans:                  {}", sub.scan_count);
    }

    if let Some(log) = &file.log_header {
        println!();
        println!("Log block size:         {}", log.size);
        println!("Log memory size:        {}", log.space);
        println!("Log text offset:        {}", log.text_offset);
        println!("Log binary size:        {}", log.binary_size);
        println!("Log disk area size:     {}", log.binary_spacing);
    }

    if let Some((lo, hi)) = file.spectrum.y_range() {
        println!();
        println!("Y range:                {lo} .. {hi}");
    }

    0
}

fn info_json(path: &Path, file: &SpcFile, stats: &FileStats) -> serde_json::Value {
    let h = &file.header;
    let date = h.date();
    let sub_header = file.sub_header.map(|sub| {
        serde_json::json!({
            "flags": sub.flags,
            "flag_descriptions": sub.sub_flags().describe(),
            "exponent": sub.exponent,
            "index": sub.index,
            "start_z": sub.start_z,
            "end_z": sub.end_z,
            "noise": sub.noise,
            "point_count": sub.point_count,
            "scan_count": sub.scan_count,
            "w_axis": sub.w_axis,
        })
    });
    let log_header = file.log_header.as_ref().map(|log| {
        serde_json::json!({
            "size": log.size,
            "space": log.space,
            "text_offset": log.text_offset,
            "binary_size": log.binary_size,
            "binary_spacing": log.binary_spacing,
        })
    });
    let y_range = file.spectrum.y_range().map(|(lo, hi)| [lo, hi]);

    serde_json::json!({
        "file": path.display().to_string(),
        "file_size": stats.bytes,
        "sha256": stats.sha256_hex(),
        "header": {
            "version": h.version,
            "flags": h.flags,
            "flag_descriptions": file.flag_set().describe(),
            "experiment": h.experiment,
            "exponent": h.exponent,
            "point_count": h.point_count,
            "first_x": h.first_x,
            "last_x": h.last_x,
            "subfile_count": h.subfile_count,
            "x_type": h.x_type,
            "y_type": h.y_type,
            "z_type": h.z_type,
            "w_type": h.w_type,
            "date": {
                "year": date.year,
                "month": date.month,
                "day": date.day,
                "hour": date.hour,
                "minute": date.minute,
            },
            "source": h.source_text(),
            "method": h.method_text(),
            "comment": h.comment_text(),
            "log_offset": h.log_offset,
        },
        "sub_header": sub_header,
        "log_header": log_header,
        "y_range": y_range,
    })
}

// ---------------------------------------------------------------------------
// Data command
// ---------------------------------------------------------------------------

fn cmd_data(opts: &Options) -> i32 {
    let path = first_input(opts);
    let Some((file, _)) = read_input(opts, path) else {
        return 1;
    };
    print!("{}", format_preview(&file.spectrum, opts.points));
    0
}

fn format_preview(spectrum: &Spectrum, n: usize) -> String {
    let (x, y) = (spectrum.x(), spectrum.y());
    let line = |i: usize| format!("{}: {:.6}, {:.6}\n", i + 1, x[i], y[i]);

    let (head, tail) = preview_ranges(spectrum.len(), n);
    let mut out: String = head.map(line).collect();
    if let Some(tail) = tail {
        out.push_str("...\n");
        out.extend(tail.map(line));
    }
    out
}

// ---------------------------------------------------------------------------
// CSV command
// ---------------------------------------------------------------------------

fn cmd_csv(opts: &Options) -> i32 {
    let total = opts.inputs.len();
    let mut failed = 0usize;

    for (i, (path, result)) in io::decode_files(&opts.inputs, &opts.decode_options())
        .into_iter()
        .enumerate()
    {
        let file = match result {
            Ok(f) => f,
            Err(e) => {
                eprintln!("spcfile: {}: {e}", path.display());
                failed += 1;
                continue;
            }
        };

        let csv_path = path.with_extension("csv");
        if !check_output(opts, &csv_path) {
            failed += 1;
            continue;
        }
        if let Err(e) = io::write_csv(&csv_path, &file.spectrum, &opts.csv) {
            eprintln!("spcfile: {}: {e}", csv_path.display());
            failed += 1;
            continue;
        }
        if !opts.quiet {
            eprintln!(
                "spcfile: [{}/{total}] {} -> {} ({} points)",
                i + 1,
                path.display(),
                csv_path.display(),
                file.spectrum.len()
            );
        }
    }

    if opts.json_output {
        print_json(
            &serde_json::json!({
                "command": "csv",
                "files": total,
                "converted": total - failed,
                "failed": failed,
            }),
            false,
        );
    }

    if failed > 0 { 1 } else { 0 }
}

// ---------------------------------------------------------------------------
// Resave / from-csv commands
// ---------------------------------------------------------------------------

fn write_output(opts: &Options, command: &str, file: &SpcFile) -> i32 {
    let Some(output) = opts.output.as_deref() else {
        eprintln!("spcfile: {command} requires an output file");
        return 1;
    };
    if !check_output(opts, output) {
        return 1;
    }

    let stats = match io::write_spc(output, file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("spcfile: {}: {e}", output.display());
            return 1;
        }
    };

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "spcfile: {command}: wrote {} points, {} bytes to {}",
            file.spectrum.len(),
            stats.bytes,
            output.display()
        );
    }

    if opts.json_output {
        print_json(
            &serde_json::json!({
                "command": command,
                "output": output.display().to_string(),
                "points": file.spectrum.len(),
                "bytes": stats.bytes,
                "sha256": stats.sha256_hex(),
            }),
            false,
        );
    }

    0
}

fn cmd_resave(opts: &Options) -> i32 {
    let path = first_input(opts);
    let Some((file, _)) = read_input(opts, path) else {
        return 1;
    };
    if !file.header.is_plain_float() || file.log_header.is_some() {
        log::warn!(
            "{}: rewritten with float Y samples and without the log block",
            path.display()
        );
    }
    write_output(opts, "resave", &file)
}

fn cmd_from_csv(opts: &Options) -> i32 {
    let path = first_input(opts);
    let spectrum = match io::read_csv(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("spcfile: {}: {e}", path.display());
            return 1;
        }
    };

    let (x, y) = spectrum.into_parts();
    let mut file = match SpcFile::from_xy(x, y) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("spcfile: {}: {e}", path.display());
            return 1;
        }
    };
    if let Some(comment) = &opts.comment {
        file.header.set_comment(comment);
    }

    write_output(opts, "from-csv", &file)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let opts = resolve_options(cli);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(opts.log_filter()))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let exit_code = match opts.command {
        Command::Info => cmd_info(&opts),
        Command::Data => cmd_data(&opts),
        Command::Csv => cmd_csv(&opts),
        Command::Resave => cmd_resave(&opts),
        Command::FromCsv => cmd_from_csv(&opts),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_opts(args: &[&str]) -> Options {
        let argv: Vec<String> = std::iter::once("spcfile".to_string())
            .chain(args.iter().map(|s| s.to_string()))
            .collect();
        let cli = Cli::try_parse_from(argv).expect("cli parse failed");
        resolve_options(cli)
    }

    #[test]
    fn info_subcommand_maps_correctly() {
        let opts = parse_opts(&["info", "--no-log", "--json", "raman.spc"]);
        assert_eq!(opts.command, Command::Info);
        assert_eq!(opts.inputs, vec![PathBuf::from("raman.spc")]);
        assert!(!opts.read_log_header);
        assert!(opts.json_output);
    }

    #[test]
    fn data_points_default_and_override() {
        let opts = parse_opts(&["data", "raman.spc"]);
        assert_eq!(opts.command, Command::Data);
        assert_eq!(opts.points, DEFAULT_POINTS);

        let opts = parse_opts(&["data", "-n", "12", "raman.spc"]);
        assert_eq!(opts.points, 12);
    }

    #[test]
    fn csv_takes_many_inputs() {
        let opts = parse_opts(&["csv", "--precision", "3", "--header", "a.spc", "b.spc"]);
        assert_eq!(opts.command, Command::Csv);
        assert_eq!(opts.inputs.len(), 2);
        assert_eq!(opts.csv.precision, 3);
        assert!(opts.csv.header_row);
    }

    #[test]
    fn csv_requires_an_input() {
        let argv = ["spcfile", "csv"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn resave_and_from_csv_map_paths() {
        let opts = parse_opts(&["--force", "resave", "in.spc", "out.spc"]);
        assert_eq!(opts.command, Command::Resave);
        assert!(opts.force);
        assert_eq!(opts.output, Some(PathBuf::from("out.spc")));

        let opts = parse_opts(&["from-csv", "--comment", "hello", "in.csv", "out.spc"]);
        assert_eq!(opts.command, Command::FromCsv);
        assert_eq!(opts.inputs, vec![PathBuf::from("in.csv")]);
        assert_eq!(opts.comment.as_deref(), Some("hello"));
    }

    #[test]
    fn verbose_is_capped() {
        let opts = parse_opts(&["-vvv", "info", "x.spc"]);
        assert_eq!(opts.verbose, 2);
        assert_eq!(opts.log_filter(), "trace");
        assert_eq!(parse_opts(&["-v", "info", "x.spc"]).log_filter(), "debug");
        assert_eq!(parse_opts(&["info", "x.spc"]).log_filter(), "warn");
        assert_eq!(parse_opts(&["-q", "info", "x.spc"]).log_filter(), "error");
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let argv = ["spcfile", "-q", "-v", "info", "x.spc"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn preview_ranges_split() {
        assert_eq!(preview_ranges(100, 5), (0..5, Some(95..100)));
        assert_eq!(preview_ranges(10, 5), (0..10, None));
        assert_eq!(preview_ranges(3, 5), (0..3, None));
        assert_eq!(preview_ranges(0, 5), (0..0, None));
    }

    #[test]
    fn preview_format() {
        let s = Spectrum::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![0.5; 5]).unwrap();
        assert_eq!(
            format_preview(&s, 1),
            "1: 1.000000, 0.500000\n...\n5: 5.000000, 0.500000\n"
        );
        assert_eq!(format_preview(&s, 3).lines().count(), 5);
    }

    #[test]
    fn info_json_shape() {
        let mut file = SpcFile::from_xy(vec![1.0, 2.0], vec![3.0, -1.0]).unwrap();
        file.header.set_comment("memo");
        let stats = FileStats {
            bytes: 10,
            sha256: None,
        };
        let v = info_json(Path::new("a.spc"), &file, &stats);
        assert_eq!(v["header"]["point_count"], 2);
        assert_eq!(v["header"]["comment"], "memo");
        assert_eq!(v["y_range"][0], -1.0);
        assert!(v["log_header"].is_null());
        assert_eq!(v["sub_header"]["index"], 0);
    }

    #[test]
    fn fuzz_parse_does_not_panic() {
        fuzz_try_parse_args(&["info".to_string()]);
        fuzz_try_parse_args(&["--bogus".to_string()]);
        fuzz_try_parse_args(&["csv".to_string(), "a".to_string(), "-vvvv".to_string()]);
    }
}
