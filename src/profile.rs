//! The `profile` command: streams each input source through the
//! accumulation engine one record at a time and emits the requested
//! report. Multiple header rows are concatenated per column before the
//! accumulator is constructed, mirroring multi-row spreadsheet headers.

use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use csv::QuoteStyle;
use encoding_rs::Encoding;
use log::{info, warn};

use crate::{
    cli::ProfileArgs,
    data::{Value, parse_cell},
    error::ProfileError,
    io_utils, report,
    stats::TableStats,
};

pub fn execute(args: &ProfileArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let sources = select_sources(args)?;
    if args.table {
        write_tabular(args, &sources, encoding)
    } else {
        write_tall(args, &sources, encoding)
    }
}

fn select_sources(args: &ProfileArgs) -> Result<Vec<(usize, &Path)>> {
    match args.source {
        Some(index) => {
            let input = args.inputs.get(index).ok_or_else(|| {
                anyhow!(
                    "no source at index {index} (have {} input(s))",
                    args.inputs.len()
                )
            })?;
            Ok(vec![(index, input.as_path())])
        }
        None => Ok(args
            .inputs
            .iter()
            .enumerate()
            .map(|(index, path)| (index, path.as_path()))
            .collect()),
    }
}

fn write_tall(
    args: &ProfileArgs,
    sources: &[(usize, &Path)],
    encoding: &'static Encoding,
) -> Result<()> {
    let mut out = io_utils::open_output(args.output.as_deref())?;
    for &(index, input) in sources {
        let table = profile_source(input, args, encoding)?;
        let name = source_name(input);
        writeln!(out, "---Begin source: '{name}' (index {index})---")?;
        out.write_all(report::tall_report(&table).as_bytes())?;
        writeln!(out, "---End source: '{name}' (index {index})---")?;
        log_source(&table, input);
    }
    out.flush()?;
    Ok(())
}

fn write_tabular(
    args: &ProfileArgs,
    sources: &[(usize, &Path)],
    encoding: &'static Encoding,
) -> Result<()> {
    let out = io_utils::open_output(args.output.as_deref())?;
    let mut writer = csv::WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .double_quote(true)
        .from_writer(out);
    let prefix_labels = ["Source name".to_string(), "Source index".to_string()];
    writer.write_record(&report::tabular_header(&prefix_labels))?;
    for &(index, input) in sources {
        let table = profile_source(input, args, encoding)?;
        let prefix = [source_name(input), index.to_string()];
        for row in report::tabular_rows(&table, &prefix) {
            writer.write_record(&row)?;
        }
        log_source(&table, input);
    }
    writer.flush()?;
    Ok(())
}

/// Streams one source through a fresh `TableStats`. The first
/// `header_rows` records are concatenated column-wise into names; the
/// rest are data rows.
fn profile_source(
    input: &Path,
    args: &ProfileArgs,
    encoding: &'static Encoding,
) -> Result<TableStats> {
    let delimiter = io_utils::resolve_input_delimiter(input, args.delimiter);
    let mut reader = io_utils::open_record_reader(input, delimiter)?;
    let mut column_names: Vec<String> = Vec::new();
    let mut table: Option<TableStats> = None;
    let mut data_rows = 0usize;

    for (row_idx, record) in reader.byte_records().enumerate() {
        let record =
            record.with_context(|| format!("Reading row {} in {input:?}", row_idx + 1))?;
        let decoded = io_utils::decode_record(&record, encoding)
            .with_context(|| format!("Decoding row {} in {input:?}", row_idx + 1))?;

        if row_idx < args.header_rows {
            if column_names.len() < decoded.len() {
                column_names.resize(decoded.len(), String::new());
            }
            for (name, cell) in column_names.iter_mut().zip(&decoded) {
                name.push_str(cell);
            }
            continue;
        }

        if args.limit > 0 && data_rows >= args.limit {
            break;
        }
        if table.is_none() {
            table = Some(TableStats::new(args.unique_limit, &column_names)?);
        }
        if let Some(table) = table.as_mut() {
            data_rows += 1;
            let values: Vec<Value> = decoded
                .iter()
                .map(|cell| parse_cell(cell, args.infer_types))
                .collect();
            match table.analyze_row(&values) {
                Ok(()) => {}
                Err(err @ ProfileError::UnsupportedValueKind { .. }) if args.skip_unsupported => {
                    warn!("skipping row {} in {input:?}: {err}", row_idx + 1);
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("Analyzing row {} in {input:?}", row_idx + 1));
                }
            }
        }
    }

    // A source with no data rows still reports its (possibly empty)
    // header-derived column set.
    match table {
        Some(table) => Ok(table),
        None => Ok(TableStats::new(args.unique_limit, &column_names)?),
    }
}

fn source_name(input: &Path) -> String {
    input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| input.display().to_string())
}

fn log_source(table: &TableStats, input: &Path) {
    info!(
        "Profiled {} row(s) across {} column(s) from {:?}",
        table.row_count(),
        table.columns().len(),
        input
    );
}
