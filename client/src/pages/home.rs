// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::dom;
use sycamore::prelude::*;

#[component]
pub fn HomeView<G: Html>(ctx: Scope) -> View<G> {
	dom::set_page_title("Roster");

	view! {
		ctx,
		h1 { "Roster" }
		p { "Keep track of who's on the team." }
		p {
			a(href="/register") {
				"Create an account"
			}
		}
	}
}
