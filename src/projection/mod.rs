//! Projection Engines
//!
//! Keep externally owned widgets in step with the collection caches. Each
//! projection is one Leptos effect that clears the widget and rebuilds it from
//! the current snapshot, but only once the widget's readiness gate is open.

mod calendar;
mod chart;
mod map;

pub use calendar::{attach_calendar, CalendarEntry, CalendarSurface};
pub use chart::{attach_charts, ChartPanel, ChartSurface, MONTH_LABELS};
pub use map::{attach_map, MapClick, MapSurface, MarkerClickHandler, MarkerSpec};
