//! Charts module - Axis scaling, layout, animation and rendering

mod animation;
mod axis;
mod layout;
mod plotter;
mod renderer;

pub use animation::{BarAnimation, BarPhase, ChartAnimator, Easing, SyncOutcome};
pub use axis::{AxisScale, AxisScaler, ChartError, DashPattern, Gridline, Tick};
pub use layout::{BarGeometry, ChartGeometry, Rect, TickLabel};
pub use plotter::{to_color32, ChartPlotter, PaintedCounts};
pub use renderer::{RenderError, StaticChartRenderer};
