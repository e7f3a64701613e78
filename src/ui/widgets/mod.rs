//! UI widgets for displaying the meter.

pub mod dial;
pub mod graph;
pub mod help;
pub mod level_bar;
pub mod readout;
pub mod status_bar;

pub use dial::render_dial;
pub use graph::render_graph;
pub use help::render_help;
pub use level_bar::render_level_bar;
pub use readout::render_readout;
pub use status_bar::render_status_bar;
