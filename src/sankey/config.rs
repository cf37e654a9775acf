//! User-tunable diagram parameters.

use serde::{Deserialize, Serialize};

use super::palette::ColorScheme;

/// Width of every node rectangle, in pixels.
pub const NODE_WIDTH: f64 = 15.0;
/// Relaxation passes run by the layout.
pub const LAYOUT_ITERATIONS: usize = 6;

/// Everything the user can adjust about the drawing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramConfig {
	/// Label size in pixels.
	pub font_size: u32,
	/// Vertical gap between nodes in a column.
	pub node_padding: u32,
	/// Canvas width in pixels.
	pub width: u32,
	/// Canvas height in pixels.
	pub height: u32,
	/// Palette for node colors.
	pub color_scheme: ColorScheme,
	/// Blend link strokes from source to target color.
	pub enable_gradient: bool,
	/// Let the layout reorder nodes within a column.
	pub auto_sort: bool,
}

impl Default for DiagramConfig {
	fn default() -> Self {
		Self {
			font_size: 10,
			node_padding: 10,
			width: 900,
			height: 600,
			color_scheme: ColorScheme::Category10,
			enable_gradient: true,
			auto_sort: false,
		}
	}
}

/// The integer-valued settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericField {
	/// [`DiagramConfig::font_size`]
	FontSize,
	/// [`DiagramConfig::node_padding`]
	NodePadding,
	/// [`DiagramConfig::width`]
	Width,
	/// [`DiagramConfig::height`]
	Height,
}

impl NumericField {
	/// Smallest value the field accepts.
	pub fn floor(self) -> u32 {
		match self {
			Self::FontSize => 1,
			Self::NodePadding => 0,
			Self::Width | Self::Height => 100,
		}
	}

	/// Settings panel caption.
	pub fn label(self) -> &'static str {
		match self {
			Self::FontSize => "Font Size",
			Self::NodePadding => "Node Padding",
			Self::Width => "Diagram Width",
			Self::Height => "Diagram Height",
		}
	}
}

impl DiagramConfig {
	/// Current value of a numeric field.
	pub fn get(&self, field: NumericField) -> u32 {
		match field {
			NumericField::FontSize => self.font_size,
			NumericField::NodePadding => self.node_padding,
			NumericField::Width => self.width,
			NumericField::Height => self.height,
		}
	}

	/// Applies raw input text to a numeric field. Unparsable text counts as 0
	/// and the field's floor is then enforced.
	pub fn set_numeric(&mut self, field: NumericField, text: &str) {
		let parsed = parse_lenient_int(text);
		let value = u32::try_from(parsed.max(0))
			.unwrap_or(u32::MAX)
			.max(field.floor());
		match field {
			NumericField::FontSize => self.font_size = value,
			NumericField::NodePadding => self.node_padding = value,
			NumericField::Width => self.width = value,
			NumericField::Height => self.height = value,
		}
	}

	/// Layout extent `[[x0, y0], [x1, y1]]`, inset from the canvas edges.
	pub fn extent(&self) -> [[f64; 2]; 2] {
		[
			[1.0, 1.0],
			[f64::from(self.width) - 1.0, f64::from(self.height) - 6.0],
		]
	}
}

/// Reads a leading, optionally signed run of digits after any leading
/// whitespace (`"12px"` is 12, `"3.9"` is 3). Text without one yields 0.
pub fn parse_lenient_int(text: &str) -> i64 {
	let s = text.trim_start();
	let (negative, digits) = match s.as_bytes().first() {
		Some(b'-') => (true, &s[1..]),
		Some(b'+') => (false, &s[1..]),
		_ => (false, s),
	};
	let end = digits
		.bytes()
		.position(|b| !b.is_ascii_digit())
		.unwrap_or(digits.len());
	if end == 0 {
		return 0;
	}
	let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
	if negative { -magnitude } else { magnitude }
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("12", 12)]
	#[case("  42", 42)]
	#[case("12px", 12)]
	#[case("3.9", 3)]
	#[case("-7", -7)]
	#[case("+5", 5)]
	#[case("abc", 0)]
	#[case("", 0)]
	#[case("-", 0)]
	#[case("99999999999999999999999", i64::MAX)]
	fn lenient_parsing(#[case] text: &str, #[case] expected: i64) {
		assert_eq!(parse_lenient_int(text), expected);
	}

	#[test]
	fn defaults_match_the_settings_panel() {
		let cfg = DiagramConfig::default();
		assert_eq!(
			(cfg.font_size, cfg.node_padding, cfg.width, cfg.height),
			(10, 10, 900, 600)
		);
		assert!(cfg.enable_gradient);
		assert!(!cfg.auto_sort);
		assert_eq!(cfg.color_scheme, ColorScheme::Category10);
	}

	#[rstest]
	#[case(NumericField::FontSize, "abc", 1)]
	#[case(NumericField::NodePadding, "abc", 0)]
	#[case(NumericField::NodePadding, "-4", 0)]
	#[case(NumericField::Width, "50", 100)]
	#[case(NumericField::Height, "", 100)]
	#[case(NumericField::Width, "1200", 1200)]
	#[case(NumericField::FontSize, "14", 14)]
	fn floors_are_enforced(#[case] field: NumericField, #[case] text: &str, #[case] expected: u32) {
		let mut cfg = DiagramConfig::default();
		cfg.set_numeric(field, text);
		assert_eq!(cfg.get(field), expected);
	}

	#[test]
	fn setting_one_field_leaves_the_rest() {
		let mut cfg = DiagramConfig::default();
		cfg.set_numeric(NumericField::Height, "720");
		assert_eq!(
			cfg,
			DiagramConfig {
				height: 720,
				..DiagramConfig::default()
			}
		);
	}

	#[test]
	fn extent_is_inset() {
		let cfg = DiagramConfig::default();
		assert_eq!(cfg.extent(), [[1.0, 1.0], [899.0, 594.0]]);
	}
}
