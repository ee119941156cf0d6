//! Map View Component
//!
//! Leaflet map centered on the user's position, one marker per location in
//! an active category, category toggles and the create/edit modals.

use std::rc::Rc;

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{ConfirmDelete, TextField};
use crate::context::use_app_context;
use crate::forms::LocationForm;
use crate::models::{Coordinates, Location};
use crate::projection::{attach_map, MapSurface};
use crate::reactive::ReadinessGate;
use crate::store::store_category_active;
use crate::widgets::{current_position, MapWidget};

#[component]
pub fn MapView() -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(LocationForm::default());
    let (status, set_status) = signal(Some("Locating you...".to_string()));
    let container = NodeRef::<html::Div>::new();
    let d = ctx.dashboard();
    let categories: Vec<String> = d.filters.known_categories().to_vec();
    let default_category = categories.first().cloned().unwrap_or_default();

    let gate: ReadinessGate<dyn MapSurface> = ReadinessGate::new();
    let on_select: Rc<dyn Fn(&Location, Coordinates)> =
        Rc::new(move |location: &Location, at: Coordinates| form.update(|f| f.on_marker_click(location, at)));
    let projection = attach_map(&d.locations, &d.filters, gate.clone(), on_select);
    on_cleanup(move || projection.detach());

    // the map is only usable once geolocation answered
    container.on_load(move |el| {
        spawn_local(async move {
            let center = match current_position().await {
                Ok(center) => center,
                Err(e) => {
                    log::error!("[MapView] {}", e);
                    set_status.set(Some(e.to_string()));
                    return;
                }
            };
            let on_map_click = move |at: Coordinates| {
                form.update(|f| {
                    f.on_map_click(at);
                    f.category = default_category.clone();
                })
            };
            match MapWidget::mount(&el, center, on_map_click) {
                Ok(widget) => {
                    gate.open(Rc::new(widget));
                    set_status.set(None);
                }
                Err(e) => {
                    log::error!("[MapView] {}", e);
                    set_status.set(Some(e.to_string()));
                }
            }
        });
    });

    let save_create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let locations = ctx.dashboard().locations;
        ctx.spawn(form.try_update(|f| f.submit_create(&locations)).flatten());
    };
    let save_edit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let locations = ctx.dashboard().locations;
        ctx.spawn(form.try_update(|f| f.submit_edit(&locations)).flatten());
    };
    let delete = move |_: ()| {
        let locations = ctx.dashboard().locations;
        ctx.spawn(form.try_update(|f| f.submit_delete(&locations)).flatten());
    };

    let category_options = StoredValue::new(categories.clone());
    let fields = move || {
        view! {
            <TextField
                label="Name"
                value=Signal::derive(move || form.with(|f| f.name.clone()))
                on_input=move |v: String| form.update(|f| f.name = v)
            />
            <TextField
                label="Description"
                value=Signal::derive(move || form.with(|f| f.description.clone()))
                on_input=move |v: String| form.update(|f| f.description = v)
            />
            <label class="form-field">
                <span class="form-label">"Category"</span>
                <select
                    prop:value=move || form.with(|f| f.category.clone())
                    on:change=move |ev| form.update(|f| f.category = event_target_value(&ev))
                >
                    {category_options
                        .get_value()
                        .into_iter()
                        .map(|c| {
                            let value = c.clone();
                            view! { <option value=value>{c}</option> }
                        })
                        .collect_view()}
                </select>
            </label>
            {move || {
                form.with(|f| f.click).map(|at| {
                    view! { <p class="form-hint">{format!("Position: {:.5}, {:.5}", at.lat, at.lng)}</p> }
                })
            }}
        }
    };

    view! {
        <section class="map-view">
            <h1>"Map"</h1>
            <div class="map-filters">
                {categories
                    .into_iter()
                    .map(|category| {
                        let (name, label) = (category.clone(), category.clone());
                        let store = ctx.store;
                        view! {
                            <label class="filter-toggle">
                                <input
                                    type="checkbox"
                                    prop:checked=move || store_category_active(&store, &name)
                                    on:change=move |_| {
                                        ctx.dashboard().filters.toggle(&category);
                                    }
                                />
                                {label}
                            </label>
                        }
                    })
                    .collect_view()}
            </div>
            {move || status.get().map(|s| view! { <p class="map-status">{s}</p> })}
            <div class="map-container" node_ref=container></div>

            <Show when=move || form.with(|f| f.create_open)>
                <div class="modal-backdrop">
                    <form class="modal" on:submit=save_create>
                        <h2>"New location"</h2>
                        {fields()}
                        <div class="modal-actions">
                            <button type="submit">"Save"</button>
                            <button type="button" on:click=move |_| form.update(LocationForm::dismiss)>"Cancel"</button>
                        </div>
                    </form>
                </div>
            </Show>

            <Show when=move || form.with(|f| f.edit_open)>
                <div class="modal-backdrop">
                    <form class="modal" on:submit=save_edit>
                        <h2>"Edit location"</h2>
                        {fields()}
                        <div class="modal-actions">
                            <button type="submit">"Save"</button>
                            <ConfirmDelete what="location" on_confirm=delete />
                            <button type="button" on:click=move |_| form.update(LocationForm::dismiss)>"Cancel"</button>
                        </div>
                    </form>
                </div>
            </Show>
        </section>
    }
}
