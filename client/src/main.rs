// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use sycamore::prelude::*;
use sycamore_router::{HistoryIntegration, Route, Router};

mod api;
mod dom;
mod error;
mod pages;
mod registration;

use api::UserApi;
use pages::home::HomeView;
use pages::not_found::NotFoundView;
use pages::register::RegistrationView;

#[derive(Route)]
enum AppRoutes {
	#[to("/")]
	Home,
	#[to("/register")]
	Register,
	#[not_found]
	NotFound,
}

fn main() {
	console_error_panic_hook::set_once();
	wasm_logger::init(wasm_logger::Config::default());

	sycamore::render(|ctx| {
		provide_context(ctx, UserApi::from_window_location());

		view! {
			ctx,
			Router(
				integration=HistoryIntegration::new(),
				view=|ctx, route: &ReadSignal<AppRoutes>| {
					view! {
						ctx,
						(match route.get().as_ref() {
							AppRoutes::Home => view! { ctx, HomeView },
							AppRoutes::Register => view! { ctx, RegistrationView },
							AppRoutes::NotFound => view! { ctx, NotFoundView },
						})
					}
				}
			)
		}
	});
}
