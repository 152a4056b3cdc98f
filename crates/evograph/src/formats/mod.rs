//! Edge-list ingestion formats.
//!
//! Readers call [`EvolvingGraph::add_edge`](crate::EvolvingGraph::add_edge)
//! once per record; the graph itself knows nothing about files.

mod csv;

pub use self::csv::{read_attributed_csv, read_csv, read_csv_file, CsvConfig};
