//! Monthly Aggregation
//!
//! Buckets events by calendar month regardless of year and feeds the counts
//! to the bar and line charts.

use std::rc::Rc;

use chrono::{Datelike, NaiveDate};

use crate::cache::EventCache;
use crate::models::Event;
use crate::reactive::{Projection, ReadinessGate};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Zero-based month of a stored date such as `2025-06-15` or `2025-06-15T20:00`
fn month_index(date: &str) -> Option<usize> {
    let day = date.split(['T', ' ']).next().unwrap_or(date);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .ok()
        .map(|d| d.month0() as usize)
}

/// Event count per month, January first. Unparseable dates are skipped.
fn monthly_counts(events: &[Event]) -> [u32; 12] {
    let mut counts = [0u32; 12];
    for event in events {
        match month_index(&event.date) {
            Some(month) => counts[month] += 1,
            None => log::warn!("[Chart] Skipping event with unreadable date {:?}", event.date),
        }
    }
    counts
}

/// One chart instance: a mutable dataset plus a redraw trigger
pub trait ChartSurface {
    fn replace_data(&self, data: &[u32]);
    fn update(&self);
}

/// The two charts fed from the same counts
#[derive(Clone)]
pub struct ChartPanel {
    pub bar: Rc<dyn ChartSurface>,
    pub line: Rc<dyn ChartSurface>,
}

impl ChartPanel {
    pub fn render(&self, counts: &[u32; 12]) {
        for chart in [&self.bar, &self.line] {
            chart.replace_data(counts);
            chart.update();
        }
    }
}

/// Redraw both charts behind `gate` whenever the event cache changes
pub fn attach_charts(events: &EventCache, gate: ReadinessGate<ChartPanel>) -> Projection {
    let events = events.clone();
    Projection::new(move || {
        let Some(panel) = gate.widget() else {
            return;
        };
        let counts = events.with_items(monthly_counts);
        panel.render(&counts);
    })
}
