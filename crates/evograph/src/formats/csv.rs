//! CSV format support.
//!
//! Expects `source,target,time` records, optionally followed by numeric
//! attribute columns named in the header:
//!
//! ```text
//! source,target,time,closeness
//! a,b,1,0.2
//! a,c,1,0.7
//! ```
//!
//! Rows are sorted by timestamp before insertion, so input files need not be
//! in time order.

use crate::edge::Attributes;
use crate::graph::{AttributeEvolvingGraph, EvolvingGraph};
use crate::label::TimeLabel;
use crate::{Error, Result};
use csv::StringRecord;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// Configuration for CSV ingestion.
#[derive(Debug, Clone, Copy)]
pub struct CsvConfig {
    /// Build a directed graph.
    pub directed: bool,
    /// First row holds column names.
    pub has_headers: bool,
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            directed: true,
            has_headers: true,
            delimiter: b',',
        }
    }
}

struct Row<T> {
    line: u64,
    src: String,
    dst: String,
    time: T,
    record: StringRecord,
}

/// Read an evolving graph; columns past the third are ignored.
pub fn read_csv<R, T>(reader: R, config: CsvConfig) -> Result<EvolvingGraph<String, T>>
where
    R: Read,
    T: TimeLabel + FromStr,
    T::Err: Display,
{
    let (_, rows) = read_rows::<R, T>(reader, config)?;

    let mut g = EvolvingGraph::new(config.directed);
    for row in rows {
        g.add_edge(row.src, row.dst, row.time)?;
    }

    tracing::info!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        timestamps = g.timestamp_count(),
        "loaded evolving graph from CSV"
    );
    Ok(g)
}

/// Read an attribute evolving graph; every column past the third is an
/// `f64` attribute named by the header. Empty cells are left out.
pub fn read_attributed_csv<R, T>(
    reader: R,
    config: CsvConfig,
) -> Result<AttributeEvolvingGraph<String, T>>
where
    R: Read,
    T: TimeLabel + FromStr,
    T::Err: Display,
{
    if !config.has_headers {
        return Err(Error::MissingHeader);
    }
    let (headers, rows) = read_rows::<R, T>(reader, config)?;
    let names: Vec<String> = headers
        .map(|h| h.iter().skip(3).map(str::to_string).collect())
        .unwrap_or_default();

    let mut g = EvolvingGraph::new_attributed(config.directed);
    for row in rows {
        let mut attrs = Attributes::new();
        for (name, field) in names.iter().zip(row.record.iter().skip(3)) {
            if field.is_empty() {
                continue;
            }
            let value: f64 = field.parse().map_err(|e| Error::Parse {
                line: row.line,
                message: format!("attribute {name} = {field:?}: {e}"),
            })?;
            attrs.insert(name.as_str(), value);
        }
        if attrs.is_empty() {
            return Err(Error::Parse {
                line: row.line,
                message: "record has no attribute values".to_string(),
            });
        }
        g.add_edge_with_attributes(row.src, row.dst, row.time, attrs)?;
    }

    tracing::info!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        timestamps = g.timestamp_count(),
        attributes = names.len(),
        "loaded attribute evolving graph from CSV"
    );
    Ok(g)
}

/// Read an evolving graph from a CSV file.
pub fn read_csv_file<T>(
    path: impl AsRef<Path>,
    config: CsvConfig,
) -> Result<EvolvingGraph<String, T>>
where
    T: TimeLabel + FromStr,
    T::Err: Display,
{
    let file = File::open(path)?;
    read_csv(BufReader::new(file), config)
}

fn read_rows<R, T>(reader: R, config: CsvConfig) -> Result<(Option<StringRecord>, Vec<Row<T>>)>
where
    R: Read,
    T: TimeLabel + FromStr,
    T::Err: Display,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(config.has_headers)
        .delimiter(config.delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = if config.has_headers {
        Some(reader.headers()?.clone())
    } else {
        None
    };

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);

        if record.len() < 3 {
            tracing::warn!(line, fields = record.len(), "skipping record with fewer than 3 fields");
            continue;
        }

        let time = record[2].parse::<T>().map_err(|e| Error::Parse {
            line,
            message: format!("timestamp {:?}: {e}", &record[2]),
        })?;

        rows.push(Row {
            line,
            src: record[0].to_string(),
            dst: record[1].to_string(),
            time,
            record,
        });
    }

    // Stable: ties keep file order
    rows.sort_by(|a, b| a.time.cmp(&b.time));
    Ok((headers, rows))
}
