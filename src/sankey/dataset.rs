//! The currently loaded table together with its column filters.

use log::debug;

use super::filter::{ColumnMeta, apply_filters, derive_metadata};
use super::graph;
use super::types::{Row, SankeyGraph};
use crate::error::IngestError;
use crate::ingest::{Table, parse_table};

/// Ingested rows and the filter state over them.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
	table: Table,
	columns: Vec<ColumnMeta>,
}

impl Dataset {
	/// Wraps a freshly ingested table; every column starts unfiltered.
	pub fn new(table: Table) -> Self {
		let columns = derive_metadata(&table.headers, &table.rows);
		Self { table, columns }
	}

	/// Parses text into a dataset. Blank text yields `None`.
	pub fn from_text(text: &str) -> Result<Option<Self>, IngestError> {
		Ok(parse_table(text)?.map(Self::new))
	}

	/// The header row.
	pub fn headers(&self) -> &[String] {
		&self.table.headers
	}

	/// Every body row, unfiltered.
	pub fn rows(&self) -> &[Row] {
		&self.table.rows
	}

	/// One filter per header, in column order.
	pub fn columns(&self) -> &[ColumnMeta] {
		&self.columns
	}

	/// Changes one column's selection. Unknown columns are ignored.
	pub fn select(&mut self, column: usize, option: &str) {
		if let Some(meta) = self.columns.get_mut(column) {
			debug!("filter {:?} -> {:?}", meta.header, option);
			meta.select(option);
		}
	}

	/// Like [`Dataset::select`], by position in the column's option list.
	pub fn select_index(&mut self, column: usize, index: usize) {
		if let Some(meta) = self.columns.get_mut(column) {
			meta.select_index(index);
			debug!("filter {:?} -> {:?}", meta.header, meta.selected);
		}
	}

	/// Resets every column to no filter.
	pub fn clear_filters(&mut self) {
		for meta in &mut self.columns {
			meta.select(super::filter::ALL);
		}
	}

	/// Body rows passing every active filter.
	pub fn filtered_rows(&self) -> Vec<&Row> {
		apply_filters(&self.table.rows, &self.columns)
	}

	/// Graph of the body rows that pass the current filters.
	pub fn graph(&self) -> SankeyGraph {
		graph::build(&self.filtered_rows())
	}
}
