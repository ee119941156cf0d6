//! Calendar View Component
//!
//! FullCalendar month grid kept in step with the event cache, plus the
//! create and edit modals.

use std::rc::Rc;

use leptos::html;
use leptos::prelude::*;

use crate::components::{ConfirmDelete, TextField};
use crate::context::use_app_context;
use crate::forms::CalendarForm;
use crate::projection::{attach_calendar, CalendarSurface};
use crate::reactive::ReadinessGate;
use crate::widgets::CalendarWidget;

const COLORS: &[(&str, &str)] = &[
    ("#3788d8", "Blue"),
    ("#2e7d32", "Green"),
    ("#c62828", "Red"),
    ("#f9a825", "Yellow"),
    ("#6a1b9a", "Purple"),
];

#[component]
pub fn CalendarView() -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(CalendarForm::default());
    let (error, set_error) = signal::<Option<String>>(None);
    let container = NodeRef::<html::Div>::new();

    let gate: ReadinessGate<dyn CalendarSurface> = ReadinessGate::new();
    let projection = attach_calendar(&ctx.dashboard().events, gate.clone());
    on_cleanup(move || projection.detach());

    container.on_load(move |el| {
        let widget = CalendarWidget::mount(
            &el,
            move |date| form.update(|f| f.on_date_click(&date)),
            move |click| form.update(|f| f.on_event_click(click)),
        );
        match widget {
            Ok(widget) => {
                gate.open(Rc::new(widget));
            }
            Err(e) => {
                log::error!("[CalendarView] {}", e);
                set_error.set(Some(e.to_string()));
            }
        }
    });

    let save_create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let events = ctx.dashboard().events;
        ctx.spawn(form.try_update(|f| f.submit_create(&events)).flatten());
    };
    let save_edit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let events = ctx.dashboard().events;
        ctx.spawn(form.try_update(|f| f.submit_edit(&events)).flatten());
    };
    let delete = move |_: ()| {
        let events = ctx.dashboard().events;
        ctx.spawn(form.try_update(|f| f.submit_delete(&events)).flatten());
    };

    let fields = move || {
        view! {
            <TextField
                label="Title"
                value=Signal::derive(move || form.with(|f| f.title.clone()))
                on_input=move |v: String| form.update(|f| f.title = v)
            />
            <label class="form-field">
                <span class="form-label">"Color"</span>
                <select
                    prop:value=move || form.with(|f| f.color.clone())
                    on:change=move |ev| form.update(|f| f.color = event_target_value(&ev))
                >
                    <option value="">"Pick a color"</option>
                    {COLORS
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </select>
            </label>
            <TextField
                label="Date"
                input_type="date"
                value=Signal::derive(move || form.with(|f| f.date.clone()))
                on_input=move |v: String| form.update(|f| f.date = v)
            />
        }
    };

    view! {
        <section class="calendar-view">
            <h1>"Calendar"</h1>
            {move || error.get().map(|e| view! { <p class="widget-error">{e}</p> })}
            <div class="calendar-container" node_ref=container></div>

            <Show when=move || form.with(|f| f.create_open)>
                <div class="modal-backdrop">
                    <form class="modal" on:submit=save_create>
                        <h2>"New event"</h2>
                        {fields()}
                        <div class="modal-actions">
                            <button type="submit">"Save"</button>
                            <button type="button" on:click=move |_| form.update(CalendarForm::dismiss)>"Cancel"</button>
                        </div>
                    </form>
                </div>
            </Show>

            <Show when=move || form.with(|f| f.edit_open)>
                <div class="modal-backdrop">
                    <form class="modal" on:submit=save_edit>
                        <h2>"Edit event"</h2>
                        {fields()}
                        <div class="modal-actions">
                            <button type="submit">"Save"</button>
                            <ConfirmDelete what="event" on_confirm=delete />
                            <button type="button" on:click=move |_| form.update(CalendarForm::dismiss)>"Cancel"</button>
                        </div>
                    </form>
                </div>
            </Show>
        </section>
    }
}
