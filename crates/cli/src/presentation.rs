// crates/cli/src/presentation.rs
use crate::config::OutputConfig;
use crate::error::Result;
use crate::options::OutputFormat;
use line_census_core::{FileResult, LineNumbers, Totals};
use line_census_engine::stats::RunResult;
use serde::Serialize;
use std::io::{self, Write};

const RULE: &str =
    "-------------------------------------------------------------------------------";

/// Label for files that could not be opened.
const UNREADABLE: &str = "(unreadable)";

/// Per-language sums, in report order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageSummary {
    pub name: String,
    pub files: u64,
    pub blank: u64,
    pub comment: u64,
    pub code: u64,
}

/// Group file results by language: code descending, then name.
pub fn summarize_languages<'a, I>(files: I) -> Vec<LanguageSummary>
where
    I: IntoIterator<Item = &'a FileResult>,
{
    let mut by_name: hashbrown::HashMap<&str, LanguageSummary> = hashbrown::HashMap::new();
    for file in files {
        let name = if file.language().is_empty() {
            UNREADABLE
        } else {
            file.language()
        };
        let entry = by_name.entry(name).or_insert_with(|| LanguageSummary {
            name: name.to_string(),
            files: 0,
            blank: 0,
            comment: 0,
            code: 0,
        });
        entry.files += 1;
        entry.blank += file.blank();
        entry.comment += file.comment();
        entry.code += file.code();
    }

    let mut summaries: Vec<_> = by_name.into_values().collect();
    summaries.sort_by(|a, b| b.code.cmp(&a.code).then_with(|| a.name.cmp(&b.name)));
    summaries
}

pub fn print_results(result: &RunResult, output: &OutputConfig) -> Result<()> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    write_results(&mut out, result, output)?;
    out.flush()?;
    Ok(())
}

pub fn write_results<W: Write>(
    out: &mut W,
    result: &RunResult,
    output: &OutputConfig,
) -> Result<()> {
    match output.format {
        OutputFormat::Table => write_table(out, result, output),
        OutputFormat::Json => write_json(out, result, output),
    }
}

fn write_table<W: Write>(out: &mut W, result: &RunResult, output: &OutputConfig) -> Result<()> {
    let files = result.files.as_slice();
    let totals = result.totals();

    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "{:<27}{:>13}{:>13}{:>13}{:>13}",
        "Language", "files", "blank", "comment", "code"
    )?;
    writeln!(out, "{RULE}")?;
    for lang in summarize_languages(files) {
        writeln!(
            out,
            "{:<27}{:>13}{:>13}{:>13}{:>13}",
            lang.name, lang.files, lang.blank, lang.comment, lang.code
        )?;
    }
    writeln!(out, "{RULE}")?;
    write_total_row(out, &totals)?;
    writeln!(out, "{RULE}")?;

    if output.by_file {
        writeln!(out)?;
        writeln!(out, "{RULE}")?;
        writeln!(
            out,
            "{:<40}{:>13}{:>13}{:>13}",
            "File", "blank", "comment", "code"
        )?;
        writeln!(out, "{RULE}")?;
        for file in files {
            writeln!(
                out,
                "{:<40}{:>13}{:>13}{:>13}",
                file.name(),
                file.blank(),
                file.comment(),
                file.code()
            )?;
        }
        writeln!(out, "{RULE}")?;
    }
    Ok(())
}

fn write_total_row<W: Write>(out: &mut W, totals: &Totals) -> io::Result<()> {
    writeln!(
        out,
        "{:<27}{:>13}{:>13}{:>13}{:>13}",
        "TOTAL", totals.files, totals.blank, totals.comment, totals.code
    )
}

#[derive(Serialize)]
struct FileRow<'a> {
    name: &'a str,
    language: &'a str,
    code: u64,
    comment: u64,
    blank: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    lines: Option<&'a LineNumbers>,
}

#[derive(Serialize)]
struct IncompleteRow {
    name: String,
    line: u64,
    error: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    languages: Vec<LanguageSummary>,
    files: Vec<FileRow<'a>>,
    total: Totals,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    incomplete: Vec<IncompleteRow>,
}

fn write_json<W: Write>(out: &mut W, result: &RunResult, output: &OutputConfig) -> Result<()> {
    let files = result.files.as_slice();
    let report = JsonReport {
        version: crate::VERSION,
        languages: summarize_languages(files),
        files: files
            .iter()
            .map(|f| FileRow {
                name: f.name(),
                language: f.language(),
                code: f.code(),
                comment: f.comment(),
                blank: f.blank(),
                lines: output.line_numbers.then_some(f.line_numbers()),
            })
            .collect(),
        total: result.totals(),
        incomplete: result
            .incomplete
            .iter()
            .map(|(path, err)| IncompleteRow {
                name: path.display().to_string(),
                line: err.line(),
                error: err.to_string(),
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
