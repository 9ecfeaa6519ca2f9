// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use wasm_bindgen::JsCast;
use web_sys::{Event, File, HtmlInputElement};

/// Pulls the first file out of a change event on a file input. Yields nothing
/// when the event target isn't a file input or no file is selected, so
/// callers can ignore stray events silently.
pub fn first_selected_file(event: &Event) -> Option<File> {
	let input: HtmlInputElement = event.target()?.dyn_into().ok()?;
	let files = input.files()?;
	files.get(0)
}

pub fn set_page_title(new_title: &str) {
	if let Some(window) = web_sys::window() {
		if let Some(document) = window.document() {
			document.set_title(new_title);
		}
	}
}
