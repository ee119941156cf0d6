//! Map Projection
//!
//! Mirrors the location cache into the map's marker layer, showing only the
//! locations whose category passes the filter.

use std::collections::BTreeSet;
use std::rc::Rc;

use crate::cache::LocationCache;
use crate::filter::FilterSet;
use crate::models::{Coordinates, Location};
use crate::reactive::{Projection, ReadinessGate};

/// Click delivered by the map widget
pub trait MapClick {
    fn coordinates(&self) -> Coordinates;
    /// Keep the click from reaching the underlying map surface
    fn stop_propagation(&self);
}

pub type MarkerClickHandler = Rc<dyn Fn(&dyn MapClick)>;

/// Marker as handed to the map widget
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub location_id: Option<String>,
    pub position: Coordinates,
    pub label: String,
}

impl From<&Location> for MarkerSpec {
    fn from(location: &Location) -> Self {
        Self {
            location_id: location.id.clone(),
            position: location.coordinates(),
            label: location.marker_label(),
        }
    }
}

/// Map widget operations the projection relies on
pub trait MapSurface {
    fn clear_markers(&self);
    fn add_marker(&self, marker: &MarkerSpec, on_click: MarkerClickHandler);
}

/// Clear the marker layer and add one marker per location whose category is
/// in `active`. Returns the number of markers drawn.
fn project_locations(
    surface: &dyn MapSurface,
    locations: &[Location],
    active: &BTreeSet<String>,
    on_select: &Rc<dyn Fn(&Location, Coordinates)>,
) -> usize {
    surface.clear_markers();
    let mut drawn = 0;
    for location in locations.iter().filter(|l| active.contains(&l.category)) {
        let target = location.clone();
        let select = Rc::clone(on_select);
        let handler: MarkerClickHandler = Rc::new(move |click: &dyn MapClick| {
            click.stop_propagation();
            select(&target, click.coordinates());
        });
        surface.add_marker(&MarkerSpec::from(location), handler);
        drawn += 1;
    }
    drawn
}

/// Keep the markers of the map behind `gate` in step with the location cache
/// and the filter. `on_select` runs for a marker click, after propagation was
/// stopped.
pub fn attach_map(
    locations: &LocationCache,
    filters: &FilterSet,
    gate: ReadinessGate<dyn MapSurface>,
    on_select: Rc<dyn Fn(&Location, Coordinates)>,
) -> Projection {
    let (locations, filters) = (locations.clone(), filters.clone());
    Projection::new(move || {
        let Some(surface) = gate.widget() else {
            return;
        };
        let (drawn, total) = filters.with_active(|active| {
            locations.with_items(|locations| {
                (project_locations(surface.as_ref(), locations, active, &on_select), locations.len())
            })
        });
        log::debug!("[MapProjection] Drew {}/{} marker(s)", drawn, total);
    })
}
