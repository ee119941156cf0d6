//! Two-step delete control shared by the edit modals and the user table.

use leptos::prelude::*;

/// "Delete" button that asks "Delete <what>?" before running `on_confirm`.
///
/// Clicks never bubble, so a row-level click handler behind the control does
/// not fire. `compact` selects the smaller table-row styling.
#[component]
pub fn ConfirmDelete(
    what: &'static str,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(optional)] compact: bool,
) -> impl IntoView {
    let armed = RwSignal::new(false);
    let class = if compact { "delete-control compact" } else { "delete-control" };

    view! {
        <span class=class>
            <Show
                when=move || armed.get()
                fallback=move || {
                    view! {
                        <button
                            type="button"
                            class="delete-btn"
                            on:click=move |ev| {
                                ev.stop_propagation();
                                armed.set(true);
                            }
                        >
                            "Delete"
                        </button>
                    }
                }
            >
                <span class="delete-prompt">{format!("Delete {what}?")}</span>
                <button
                    type="button"
                    class="delete-yes"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(false);
                        log::debug!("[ConfirmDelete] Confirmed {}", what);
                        on_confirm.run(());
                    }
                >
                    "Yes"
                </button>
                <button
                    type="button"
                    class="delete-no"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(false);
                    }
                >
                    "No"
                </button>
            </Show>
        </span>
    }
}
