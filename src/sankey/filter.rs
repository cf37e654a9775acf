//! Per-column value filters.
//!
//! Option lists are computed once from the unfiltered rows and never shrink
//! when another column's selection changes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::types::Row;

/// Label of the synthetic "no filter" option.
pub const ALL: &str = "All";
/// Display label for the empty-cell option.
pub const EMPTY_LABEL: &str = "(empty)";

/// What one column is narrowed to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
	/// No filter on this column.
	#[default]
	All,
	/// Only rows whose field equals this value exactly.
	Value(String),
}

impl Selection {
	/// Maps an option label back to a selection; the sentinel means no filter.
	pub fn from_option(option: &str) -> Self {
		if option == ALL {
			Self::All
		} else {
			Self::Value(option.to_owned())
		}
	}

	fn matches(&self, field: Option<&str>) -> bool {
		match self {
			Self::All => true,
			Self::Value(v) => field == Some(v.as_str()),
		}
	}
}

/// Distinct values seen in one column plus the current selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
	/// Column title from the header row.
	pub header: String,
	values: Vec<String>,
	/// Current filter for this column.
	pub selected: Selection,
}

impl ColumnMeta {
	/// Option strings: the sentinel first, then observed values in first-seen order.
	pub fn options(&self) -> impl Iterator<Item = &str> {
		std::iter::once(ALL).chain(self.values.iter().map(String::as_str))
	}

	/// Human-readable option labels, parallel to [`ColumnMeta::options`].
	/// Empty cells and a literal `All` value are spelled so they stay
	/// distinguishable from the sentinel.
	pub fn labels(&self) -> impl Iterator<Item = String> {
		std::iter::once(ALL.to_owned()).chain(self.values.iter().map(|v| match v.as_str() {
			"" => EMPTY_LABEL.to_owned(),
			ALL => format!("\"{ALL}\""),
			other => other.to_owned(),
		}))
	}

	/// Distinct observed values, without the sentinel.
	pub fn values(&self) -> &[String] {
		&self.values
	}

	/// Selects by option string. The sentinel string always means no filter.
	pub fn select(&mut self, option: &str) {
		self.selected = Selection::from_option(option);
	}

	/// Selects by position in [`ColumnMeta::options`]. Index 0 is the sentinel;
	/// out-of-range indices clear the filter.
	pub fn select_index(&mut self, index: usize) {
		self.selected = match index.checked_sub(1).and_then(|i| self.values.get(i)) {
			Some(v) => Selection::Value(v.clone()),
			None => Selection::All,
		};
	}

	/// Position of the current selection in [`ColumnMeta::options`].
	pub fn selected_index(&self) -> usize {
		match &self.selected {
			Selection::All => 0,
			Selection::Value(v) => self.values.iter().position(|x| x == v).map_or(0, |i| i + 1),
		}
	}

	/// Whether this column currently excludes any rows.
	pub fn is_filtering(&self) -> bool {
		self.selected != Selection::All
	}
}

/// Collects, for every header, the distinct values of its column, empty
/// cells included. Rows too short to reach a column contribute nothing to it.
pub fn derive_metadata(headers: &[String], rows: &[Row]) -> Vec<ColumnMeta> {
	headers
		.iter()
		.enumerate()
		.map(|(col, header)| {
			let mut seen: HashSet<&str> = HashSet::new();
			let values = rows
				.iter()
				.filter_map(|row| row.get(col))
				.map(String::as_str)
				.filter(|v| seen.insert(*v))
				.map(str::to_owned)
				.collect();
			ColumnMeta {
				header: header.clone(),
				values,
				selected: Selection::All,
			}
		})
		.collect()
}

/// Keeps the rows matching every active selection. Column `i` of `columns`
/// filters field `i` of each row.
pub fn apply_filters<'a>(rows: &'a [Row], columns: &[ColumnMeta]) -> Vec<&'a Row> {
	let active: Vec<(usize, &Selection)> = columns
		.iter()
		.enumerate()
		.filter(|(_, c)| c.is_filtering())
		.map(|(i, c)| (i, &c.selected))
		.collect();

	rows.iter()
		.filter(|row| {
			active
				.iter()
				.all(|(i, sel)| sel.matches(row.get(*i).map(String::as_str)))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn table() -> (Vec<String>, Vec<Row>) {
		let headers = ["Region", "Channel", "Outcome"]
			.iter()
			.map(|s| s.to_string())
			.collect();
		let rows = [
			["North", "Web", "Won"],
			["South", "Web", "Lost"],
			["North", "Store", "Won"],
			["East", "", "Lost"],
		]
		.iter()
		.map(|r| r.iter().map(|s| s.to_string()).collect())
		.collect();
		(headers, rows)
	}

	#[test]
	fn options_start_with_all_in_first_seen_order() {
		let (headers, rows) = table();
		let meta = derive_metadata(&headers, &rows);
		assert_eq!(meta.len(), 3);
		assert_eq!(
			meta[0].options().collect::<Vec<_>>(),
			["All", "North", "South", "East"]
		);
		assert_eq!(
			meta[1].options().collect::<Vec<_>>(),
			["All", "Web", "Store", ""]
		);
		assert!(meta.iter().all(|m| m.selected == Selection::All));
	}

	#[test]
	fn filter_by_value_is_exact_match() {
		let (headers, rows) = table();
		let mut meta = derive_metadata(&headers, &rows);
		meta[0].select("North");
		let kept = apply_filters(&rows, &meta);
		assert_eq!(kept.len(), 2);
		assert!(kept.iter().all(|r| r[0] == "North"));
	}

	#[test]
	fn selections_combine() {
		let (headers, rows) = table();
		let mut meta = derive_metadata(&headers, &rows);
		meta[0].select("North");
		meta[1].select("Store");
		let kept = apply_filters(&rows, &meta);
		assert_eq!(kept, vec![&rows[2]]);
	}

	#[test]
	fn all_is_no_filter() {
		let (headers, rows) = table();
		let mut meta = derive_metadata(&headers, &rows);
		meta[2].select("Won");
		meta[2].select(ALL);
		assert_eq!(apply_filters(&rows, &meta).len(), rows.len());
	}

	#[test]
	fn selecting_one_column_leaves_other_options_intact() {
		let (headers, rows) = table();
		let mut meta = derive_metadata(&headers, &rows);
		let before = meta[1].clone();
		meta[0].select("South");
		assert_eq!(meta[1].values(), before.values());
		assert_eq!(apply_filters(&rows, &meta).len(), 1);
	}

	#[test]
	fn short_rows_never_match_a_value() {
		let headers = vec!["a".to_string(), "b".to_string()];
		let rows = vec![vec!["x".to_string()], vec!["x".to_string(), "y".to_string()]];
		let mut meta = derive_metadata(&headers, &rows);
		meta[1].select("y");
		assert_eq!(apply_filters(&rows, &meta).len(), 1);
	}

	#[test]
	fn empty_cells_can_be_isolated() {
		let (headers, rows) = table();
		let mut meta = derive_metadata(&headers, &rows);
		assert_eq!(
			meta[1].labels().collect::<Vec<_>>(),
			["All", "Web", "Store", "(empty)"]
		);
		meta[1].select_index(3);
		assert_eq!(meta[1].selected, Selection::Value(String::new()));
		assert_eq!(apply_filters(&rows, &meta), vec![&rows[3]]);
	}

	#[test]
	fn literal_all_value_is_distinct_from_the_sentinel() {
		let headers = vec!["h".to_string()];
		let rows = vec![vec!["All".to_string()], vec!["Some".to_string()]];
		let mut meta = derive_metadata(&headers, &rows);
		assert_eq!(meta[0].options().collect::<Vec<_>>(), ["All", "All", "Some"]);
		assert_eq!(meta[0].labels().collect::<Vec<_>>(), ["All", "\"All\"", "Some"]);

		meta[0].select_index(1);
		assert!(meta[0].is_filtering());
		assert_eq!(meta[0].selected_index(), 1);
		assert_eq!(apply_filters(&rows, &meta), vec![&rows[0]]);

		meta[0].select_index(0);
		assert_eq!(apply_filters(&rows, &meta).len(), 2);
	}

	#[test]
	fn out_of_range_index_clears_the_filter() {
		let (headers, rows) = table();
		let mut meta = derive_metadata(&headers, &rows);
		meta[0].select_index(2);
		assert_eq!(meta[0].selected_index(), 2);
		meta[0].select_index(99);
		assert_eq!(meta[0].selected, Selection::All);
		assert_eq!(meta[0].selected_index(), 0);
	}
}
