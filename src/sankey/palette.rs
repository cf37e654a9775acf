//! Node color palettes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const CATEGORY10: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];
const ACCENT: &[&str] = &[
	"#7fc97f", "#beaed4", "#fdc086", "#ffff99", "#386cb0", "#f0027f", "#bf5b17", "#666666",
];
const DARK2: &[&str] = &[
	"#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e", "#e6ab02", "#a6761d", "#666666",
];
const PAIRED: &[&str] = &[
	"#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f", "#ff7f00",
	"#cab2d6", "#6a3d9a", "#ffff99", "#b15928",
];
const PASTEL1: &[&str] = &[
	"#fbb4ae", "#b3cde3", "#ccebc5", "#decbe4", "#fed9a6", "#ffffcc", "#e5d8bd", "#fddaec",
	"#f2f2f2",
];
const SET1: &[&str] = &[
	"#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
	"#999999",
];
const SET2: &[&str] = &[
	"#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];
const SET3: &[&str] = &[
	"#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
	"#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];
const TABLEAU10: &[&str] = &[
	"#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
	"#9c755f", "#bab0ab",
];
const VIBRANT_MIX: &[&str] = &[
	"#FF6347", "#4682B4", "#32CD32", "#FFD700", "#9370DB", "#FF4500", "#1E90FF", "#20B2AA",
	"#FFA500", "#8A2BE2", "#DC143C", "#6A5ACD", "#00CED1", "#FF8C00", "#BA55D3",
];

/// Named color palettes offered in the settings panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorScheme {
	/// d3 `schemeCategory10`.
	#[default]
	Category10,
	/// d3 `schemeAccent`.
	Accent,
	/// d3 `schemeDark2`.
	Dark2,
	/// d3 `schemePaired`.
	Paired,
	/// d3 `schemePastel1`.
	Pastel1,
	/// d3 `schemeSet1`.
	Set1,
	/// d3 `schemeSet2`.
	Set2,
	/// d3 `schemeSet3`.
	Set3,
	/// d3 `schemeTableau10`.
	Tableau10,
	/// Fifteen saturated named colors.
	VibrantMix,
}

impl ColorScheme {
	/// Every palette, in menu order.
	pub const ALL: [ColorScheme; 10] = [
		Self::Category10,
		Self::Accent,
		Self::Dark2,
		Self::Paired,
		Self::Pastel1,
		Self::Set1,
		Self::Set2,
		Self::Set3,
		Self::Tableau10,
		Self::VibrantMix,
	];

	/// Menu label.
	pub fn name(self) -> &'static str {
		match self {
			Self::Category10 => "Category10",
			Self::Accent => "Accent",
			Self::Dark2 => "Dark2",
			Self::Paired => "Paired",
			Self::Pastel1 => "Pastel1",
			Self::Set1 => "Set1",
			Self::Set2 => "Set2",
			Self::Set3 => "Set3",
			Self::Tableau10 => "Tableau10",
			Self::VibrantMix => "Vibrant Mix (Custom)",
		}
	}

	/// Inverse of [`ColorScheme::name`].
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|s| s.name() == name)
	}

	/// Ordered color list.
	pub fn colors(self) -> &'static [&'static str] {
		match self {
			Self::Category10 => CATEGORY10,
			Self::Accent => ACCENT,
			Self::Dark2 => DARK2,
			Self::Paired => PAIRED,
			Self::Pastel1 => PASTEL1,
			Self::Set1 => SET1,
			Self::Set2 => SET2,
			Self::Set3 => SET3,
			Self::Tableau10 => TABLEAU10,
			Self::VibrantMix => VIBRANT_MIX,
		}
	}
}

/// Ordinal color scale: each new key takes the next palette entry, wrapping
/// around once the palette is exhausted.
#[derive(Clone, Debug)]
pub struct OrdinalColors {
	palette: &'static [&'static str],
	assigned: HashMap<String, usize>,
}

impl OrdinalColors {
	/// A scale with no keys assigned yet.
	pub fn new(scheme: ColorScheme) -> Self {
		Self {
			palette: scheme.colors(),
			assigned: HashMap::new(),
		}
	}

	/// Color for `key`, assigning the next free slot on first use.
	pub fn color(&mut self, key: &str) -> &'static str {
		let next = self.assigned.len();
		let slot = *self.assigned.entry(key.to_owned()).or_insert(next);
		self.palette[slot % self.palette.len()]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn names_round_trip() {
		for scheme in ColorScheme::ALL {
			assert_eq!(ColorScheme::from_name(scheme.name()), Some(scheme));
		}
		assert_eq!(ColorScheme::from_name("Viridis"), None);
	}

	#[test]
	fn palettes_are_non_empty() {
		assert!(ColorScheme::ALL.iter().all(|s| !s.colors().is_empty()));
		assert_eq!(ColorScheme::VibrantMix.colors().len(), 15);
	}

	#[test]
	fn ordinal_lookup_is_stable_and_cyclic() {
		let mut colors = OrdinalColors::new(ColorScheme::Accent);
		let first = colors.color("a");
		for i in 0..ACCENT.len() - 1 {
			colors.color(&format!("n{i}"));
		}
		assert_eq!(colors.color("a"), first);
		assert_eq!(colors.color("wraps"), ACCENT[0]);
		assert_eq!(colors.color("next"), ACCENT[1]);
	}
}
