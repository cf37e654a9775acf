//! Turns pasted or uploaded text into a header row plus body rows.

use csv::ReaderBuilder;
use log::{debug, info};

use crate::error::IngestError;
use crate::sankey::types::Row;

const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b'\t', b';', b'|'];

/// Parsed input: the first record is always the header row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
	/// Column titles.
	pub headers: Row,
	/// Body records, possibly ragged.
	pub rows: Vec<Row>,
}

/// Picks the most frequent candidate delimiter on the first non-empty line.
/// Comma wins ties and the no-candidate case.
pub fn detect_delimiter(text: &str) -> u8 {
	let Some(line) = text.lines().find(|l| !l.trim().is_empty()) else {
		return b',';
	};
	let mut best = (b',', line.bytes().filter(|&b| b == b',').count());
	for &delim in &CANDIDATE_DELIMITERS[1..] {
		let count = line.bytes().filter(|&b| b == delim).count();
		if count > best.1 {
			best = (delim, count);
		}
	}
	best.0
}

/// Parses delimited text.
///
/// Returns `Ok(None)` for blank input, which callers treat as "clear
/// everything". Ragged rows are kept as-is; empty lines are skipped.
pub fn parse_table(text: &str) -> Result<Option<Table>, IngestError> {
	if text.trim().is_empty() {
		return Ok(None);
	}
	let delimiter = detect_delimiter(text);
	debug!("parsing CSV with delimiter {:?}", delimiter as char);

	let mut reader = ReaderBuilder::new()
		.has_headers(false)
		.flexible(true)
		.delimiter(delimiter)
		.from_reader(text.as_bytes());

	let mut records = reader.records();
	let Some(first) = records.next() else {
		return Ok(None);
	};
	let headers: Row = first?.iter().map(str::to_owned).collect();
	let rows = records
		.map(|record| record.map(|r| r.iter().map(str::to_owned).collect::<Row>()))
		.collect::<Result<Vec<_>, _>>()?;

	info!(
		"ingested {} columns, {} body rows",
		headers.len(),
		rows.len()
	);
	Ok(Some(Table { headers, rows }))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn first_record_is_header() {
		let table = parse_table("Source,Target\nA,B\nA,C\n").unwrap().unwrap();
		assert_eq!(table.headers, vec!["Source", "Target"]);
		assert_eq!(table.rows, vec![vec!["A", "B"], vec!["A", "C"]]);
	}

	#[rstest]
	#[case("")]
	#[case("   ")]
	#[case("\n\n")]
	fn blank_text_yields_none(#[case] text: &str) {
		assert!(parse_table(text).unwrap().is_none());
	}

	#[test]
	fn ragged_rows_are_kept() {
		let table = parse_table("a,b,c\nx,y\np,q,r,s\n").unwrap().unwrap();
		assert_eq!(table.rows[0], vec!["x", "y"]);
		assert_eq!(table.rows[1], vec!["p", "q", "r", "s"]);
	}

	#[test]
	fn quoted_fields_keep_delimiters() {
		let table = parse_table("from,to\n\"Smith, J\",Office\n").unwrap().unwrap();
		assert_eq!(table.rows[0], vec!["Smith, J", "Office"]);
	}

	#[rstest]
	#[case("a,b,c", b',')]
	#[case("a\tb\tc", b'\t')]
	#[case("a;b;c", b';')]
	#[case("a|b|c", b'|')]
	#[case("single", b',')]
	#[case("\n\na\tb", b'\t')]
	fn delimiter_detection(#[case] text: &str, #[case] expected: u8) {
		assert_eq!(detect_delimiter(text), expected);
	}

	#[test]
	fn tab_separated_input_parses() {
		let table = parse_table("from\tto\nA\tB\n").unwrap().unwrap();
		assert_eq!(table.rows[0], vec!["A", "B"]);
	}
}
