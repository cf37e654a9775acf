pub mod column_filters;
pub mod data_input;
pub mod sankey;
pub mod settings_panel;
