// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod log;

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use zeustxt::{ConvertOptions, End, Info, Renderer, Summary};

/// Converts Zeus assembler tokenized source files to text listings.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Log debug messages, including every undefined token
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Command {
    /// Show a summary of a tokenized file
    Info {
        /// Tokenized source file
        zeus_file: PathBuf,
    },
    /// Convert a tokenized file to a text listing
    Convert {
        /// Tokenized source file
        zeus_file: PathBuf,

        /// Output file (default: stdout)
        output_file: Option<PathBuf>,

        /// Follow each line with the record's bytes in hex
        #[arg(long)]
        include_code: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    log::init(args.verbose);

    if let Err(e) = run(args.command) {
        tracing::error!("{:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Info { zeus_file } => show_info(&zeus_file, &mut io::stdout().lock()),
        Command::Convert { zeus_file, output_file, include_code } => {
            let options = ConvertOptions { include_code };
            let summary = match output_file {
                Some(output_file) => convert_file(&zeus_file, &output_file, options)?,
                None => convert_to(&zeus_file, io::stdout().lock(), options)?,
            };
            report(&summary);

            Ok(())
        }
    }
}

fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open '{}'", path.display()))?;

    Ok(BufReader::new(file))
}

fn show_info(zeus_file: &Path, out: &mut impl io::Write) -> anyhow::Result<()> {
    let info = Info::scan(open(zeus_file)?, &Renderer::default())
        .with_context(|| format!("Failed to read '{}'", zeus_file.display()))?;
    writeln!(out, "{}", info).context("Failed to write info")?;

    Ok(())
}

fn convert_file(
    zeus_file: &Path,
    output_file: &Path,
    options: ConvertOptions,
) -> anyhow::Result<Summary> {
    let output = File::create(output_file)
        .with_context(|| format!("Failed to create '{}'", output_file.display()))?;

    convert_to(zeus_file, BufWriter::new(output), options)
}

fn convert_to(
    zeus_file: &Path,
    output: impl io::Write,
    options: ConvertOptions,
) -> anyhow::Result<Summary> {
    tracing::debug!("converting '{}' ({:?})", zeus_file.display(), options);

    zeustxt::convert(open(zeus_file)?, output, options)
        .with_context(|| format!("Failed to convert '{}'", zeus_file.display()))
}

fn report(summary: &Summary) {
    tracing::info!("Wrote {} lines", summary.lines);
    if summary.undefined_tokens > 0 {
        tracing::warn!(
            "Skipped {} undefined tokens; run with --verbose to see them",
            summary.undefined_tokens,
        );
    }
    if summary.end == End::Exhausted {
        tracing::warn!("The file has no end marker; it may be truncated");
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    const INPUT: [u8; 11] = [0x0a, 0x00, 0x0a, 0x06, 0x82, 0x87, 0x2c, 0x34, 0x32, 0x00, 0xff];

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("zeus2txt-{}-{}", std::process::id(), name))
    }

    #[test]
    fn args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_info() {
        let args = Args::try_parse_from(["zeus2txt", "info", "in.zeus"]).unwrap();

        assert!(!args.verbose);
        assert_eq!(args.command, Command::Info { zeus_file: "in.zeus".into() });
    }

    #[test]
    fn parses_convert() {
        let args = Args::try_parse_from([
            "zeus2txt",
            "-v",
            "convert",
            "in.zeus",
            "out.txt",
            "--include-code",
        ])
        .unwrap();

        assert!(args.verbose);
        assert_eq!(
            args.command,
            Command::Convert {
                zeus_file: "in.zeus".into(),
                output_file: Some("out.txt".into()),
                include_code: true,
            },
        );
    }

    #[test]
    fn requires_a_subcommand() {
        assert!(Args::try_parse_from(["zeus2txt"]).is_err());
        assert!(Args::try_parse_from(["zeus2txt", "convert"]).is_err());
    }

    #[test]
    fn converts_between_files() {
        let input = temp_path("convert.bin");
        let output = temp_path("convert.txt");
        std::fs::write(&input, INPUT).unwrap();

        let summary = convert_file(&input, &output, ConvertOptions::default()).unwrap();
        let listing = std::fs::read_to_string(&output).unwrap();
        let _ = std::fs::remove_file(&input);
        let _ = std::fs::remove_file(&output);

        assert_eq!(listing, "00010       ADD BC,42\n");
        assert_eq!(summary.lines, 1);
        assert_eq!(summary.end, End::Exhausted);
    }

    #[test]
    fn shows_info() {
        let input = temp_path("info.bin");
        std::fs::write(&input, INPUT).unwrap();

        let mut out = Vec::new();
        show_info(&input, &mut out).unwrap();
        let _ = std::fs::remove_file(&input);

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Lines:            1\n"));
        assert!(out.ends_with("Ends at:          end of file (no end marker)\n"));
    }

    #[test]
    fn missing_input_is_an_error() {
        let err = convert_to(&temp_path("missing.bin"), io::sink(), ConvertOptions::default())
            .unwrap_err();

        assert!(format!("{:#}", err).starts_with("Failed to open"));
    }
}
