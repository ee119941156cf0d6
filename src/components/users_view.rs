//! Users View Component
//!
//! User directory table with create, edit and delete.

use leptos::prelude::*;

use crate::components::{ConfirmDelete, TextField};
use crate::context::use_app_context;
use crate::forms::UserForm;
use crate::models::User;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

#[component]
pub fn UsersView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();
    let form = RwSignal::new(UserForm::default());

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let users = ctx.dashboard().users;
        let op = form.try_update(|f| {
            if f.edit_open {
                f.submit_edit(&users)
            } else {
                f.submit_create(&users)
            }
        });
        ctx.spawn(op.flatten());
    };

    let row = move |user: User| {
        let (selected, target) = (user.clone(), user.clone());
        let delete = move |_: ()| {
            let users = ctx.dashboard().users;
            ctx.spawn(form.try_update(|f| f.submit_delete(&target, &users)).flatten());
        };
        view! {
            <tr class="user-row" on:click=move |_| form.update(|f| f.open_edit(&selected))>
                <td>{user.name}</td>
                <td>{user.email}</td>
                <td>{user.location}</td>
                <td>
                    <ConfirmDelete what="user" on_confirm=delete compact=true />
                </td>
            </tr>
        }
    };

    view! {
        <section class="users-view">
            <div class="view-header">
                <h1>"Users"</h1>
                <button on:click=move |_| form.update(UserForm::open_create)>"Add user"</button>
            </div>
            <Show when=move || store.users_loading().get()>
                <p class="loading">"Loading users..."</p>
            </Show>
            <table class="users-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Email"</th>
                        <th>"Location"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || store.users().get().into_iter().map(row).collect_view()}
                </tbody>
            </table>

            <Show when=move || form.with(|f| f.create_open || f.edit_open)>
                <div class="modal-backdrop">
                    <form class="modal" on:submit=save>
                        <h2>{move || if form.with(|f| f.edit_open) { "Edit user" } else { "New user" }}</h2>
                        <TextField
                            label="Name"
                            value=Signal::derive(move || form.with(|f| f.name.clone()))
                            on_input=move |v: String| form.update(|f| f.name = v)
                        />
                        <TextField
                            label="Email"
                            input_type="email"
                            value=Signal::derive(move || form.with(|f| f.email.clone()))
                            on_input=move |v: String| form.update(|f| f.email = v)
                        />
                        <TextField
                            label="Location"
                            value=Signal::derive(move || form.with(|f| f.location.clone()))
                            on_input=move |v: String| form.update(|f| f.location = v)
                        />
                        <div class="modal-actions">
                            <button type="submit">"Save"</button>
                            <button type="button" on:click=move |_| form.update(UserForm::dismiss)>"Cancel"</button>
                        </div>
                    </form>
                </div>
            </Show>
        </section>
    }
}
