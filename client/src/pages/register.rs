// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::api::UserApi;
use crate::dom;
use crate::registration::{AppNavigator, RegistrationForm};
use sycamore::futures::spawn_local_scoped;
use sycamore::prelude::*;
use web_sys::Event as WebEvent;

#[component]
pub fn RegistrationView<G: Html>(ctx: Scope<'_>) -> View<G> {
	dom::set_page_title("Register an account");

	let api: &UserApi = use_context(ctx);
	let form = create_ref(ctx, RegistrationForm::new(api.clone(), AppNavigator));

	let email_input = create_signal(ctx, String::new());
	let password_input = create_signal(ctx, String::new());
	let first_name_input = create_signal(ctx, String::new());
	let last_name_input = create_signal(ctx, String::new());
	create_effect(ctx, move || form.email.set((*email_input.get()).clone()));
	create_effect(ctx, move || form.password.set((*password_input.get()).clone()));
	create_effect(ctx, move || form.first_name.set((*first_name_input.get()).clone()));
	create_effect(ctx, move || form.last_name.set((*last_name_input.get()).clone()));

	let email_error = create_memo(ctx, move || form.errors.get().get("email").cloned());
	let password_error = create_memo(ctx, move || form.errors.get().get("password").cloned());
	let first_name_error = create_memo(ctx, move || form.errors.get().get("firstName").cloned());
	let last_name_error = create_memo(ctx, move || form.errors.get().get("lastName").cloned());
	let has_errors = create_memo(ctx, move || !form.errors.get().is_empty());

	let has_file = create_memo(ctx, move || form.selected_file.get().is_some());
	let file_name = create_memo(ctx, move || (*form.file_name.get()).clone());

	let registration_error: &Signal<Option<String>> = create_signal(ctx, None);

	let avatar_change_handler = move |event: WebEvent| {
		if let Some(file) = dom::first_selected_file(&event) {
			let name = file.name();
			form.select_file(file, name);
		}
	};

	let clear_file_handler = move |_event: WebEvent| {
		form.clear_file();
	};

	let dismiss_errors_handler = move |_event: WebEvent| {
		form.clear_errors();
	};

	let form_submission_handler = move |event: WebEvent| {
		event.prevent_default();

		spawn_local_scoped(ctx, async move {
			registration_error.set(None);
			if let Err(error) = form.register().await {
				registration_error.set(Some(format!("Registration failed: {}", error)));
			}
		});
	};

	view! {
		ctx,
		h1 { "Register an Account" }
		form(id="register_user", on:submit=form_submission_handler) {
			div(class="input_with_message") {
				label(for="register_email") {
					"Email: "
				}
				input(id="register_email", type="email", bind:value=email_input)
				(
					if let Some(message) = (*email_error.get()).clone() {
						view! {
							ctx,
							span(class="input_error register_field_error") {
								(message)
							}
						}
					} else {
						view! { ctx, }
					}
				)
			}
			div(class="input_with_message") {
				label(for="register_password") {
					"Password: "
				}
				input(id="register_password", type="password", bind:value=password_input)
				(
					if let Some(message) = (*password_error.get()).clone() {
						view! {
							ctx,
							span(class="input_error register_field_error") {
								(message)
							}
						}
					} else {
						view! { ctx, }
					}
				)
			}
			div(class="input_with_message") {
				label(for="register_first_name") {
					"First name: "
				}
				input(id="register_first_name", type="text", bind:value=first_name_input)
				(
					if let Some(message) = (*first_name_error.get()).clone() {
						view! {
							ctx,
							span(class="input_error register_field_error") {
								(message)
							}
						}
					} else {
						view! { ctx, }
					}
				)
			}
			div(class="input_with_message") {
				label(for="register_last_name") {
					"Last name: "
				}
				input(id="register_last_name", type="text", bind:value=last_name_input)
				(
					if let Some(message) = (*last_name_error.get()).clone() {
						view! {
							ctx,
							span(class="input_error register_field_error") {
								(message)
							}
						}
					} else {
						view! { ctx, }
					}
				)
			}
			div(class="input_with_message") {
				label(for="register_avatar") {
					"Avatar: "
				}
				input(id="register_avatar", type="file", accept="image/*", on:change=avatar_change_handler)
				(
					if *has_file.get() {
						view! {
							ctx,
							span(id="register_avatar_selected") {
								(file_name.get())
							}
							button(type="button", id="register_avatar_clear", on:click=clear_file_handler) {
								"Remove"
							}
						}
					} else {
						view! { ctx, }
					}
				)
			}
			(
				if let Some(message) = (*registration_error.get()).clone() {
					view! {
						ctx,
						div(id="register_submit_error", class="input_error") {
							(message)
						}
					}
				} else {
					view! { ctx, }
				}
			)
			(
				if *has_errors.get() {
					view! {
						ctx,
						button(type="button", id="register_dismiss_errors", on:click=dismiss_errors_handler) {
							"Dismiss errors"
						}
					}
				} else {
					view! { ctx, }
				}
			)
			button(type="submit") {
				"Register"
			}
		}
	}
}
