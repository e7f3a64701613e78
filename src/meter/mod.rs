//! Live meter core: rolling level history, scale mapping and the renderer
//! that turns each reading into panel state and a graph projection.

pub mod graph;
pub mod history;
pub mod reading;
pub mod renderer;
pub mod scale;
pub mod severity;
pub mod surface;

pub use graph::{CanvasSize, GraphFrame};
pub use reading::{MeterEvent, Reading};
pub use renderer::MeterRenderer;
pub use severity::{AccentToken, GlowToken, Severity};
pub use surface::{MeterSurface, PanelState};
