// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::ApiError;
use crate::registration::AccountService;
use gloo_net::http::Request;
use roster_shared::messages::image::ImageUploadResponse;
use roster_shared::messages::user_register::{NewUser, UserDataToValidate, ValidationResponse};
use web_sys::{File, FormData, Url};

/// HTTP client for the account service.
#[derive(Clone)]
pub struct UserApi {
	base: String,
}

impl UserApi {
	/// Creates a client rooted at the given API base.
	pub fn new(mut base: String) -> Self {
		if base.ends_with('/') {
			base.pop();
		}
		Self { base }
	}

	/// Derives the API base from the address the application is served at in
	/// a way that adapts to any URL structure at which the application could
	/// be hosted.
	///
	/// # Panics
	///
	/// This function panics when the browser context (window, location, URL,
	/// etc.) is inaccessible.
	pub fn from_window_location() -> Self {
		let js_location = web_sys::window()
			.expect("Failed to get browser window context")
			.location();
		let web_endpoint = js_location.href().expect("Failed to get current address");
		let url = Url::new(&web_endpoint).expect("Failed to generate URL instance");
		url.set_search(""); // Query string is unnecessary and should be cleared
		let url_path = url.pathname();
		let api_path = if let Some(path) = url_path.strip_suffix('/') {
			format!("{}/api", path)
		} else {
			format!("{}/api", url_path)
		};
		url.set_pathname(&api_path);
		Self::new(url.to_string().into())
	}

	fn endpoint(&self, path: &str) -> String {
		format!("{}{}", self.base, path)
	}
}

impl AccountService for UserApi {
	type File = File;

	async fn upload_image(&self, file: &File) -> Result<ImageUploadResponse, ApiError> {
		let form_data =
			FormData::new().map_err(|_| ApiError::Browser(String::from("FormData could not be constructed")))?;
		form_data
			.append_with_blob_and_filename("image", file, &file.name())
			.map_err(|_| ApiError::Browser(String::from("the image could not be attached to the request")))?;
		let response = Request::post(&self.endpoint("/images")).body(form_data)?.send().await?;
		if !response.ok() {
			return Err(ApiError::Status(response.status()));
		}
		Ok(response.json().await?)
	}

	async fn validate(&self, user_data: &UserDataToValidate) -> Result<Option<ValidationResponse>, ApiError> {
		let response = Request::post(&self.endpoint("/users/validate"))
			.json(user_data)?
			.send()
			.await?;
		if !response.ok() {
			return Err(ApiError::Status(response.status()));
		}
		// The service is allowed to answer with an empty body.
		if response.status() == 204 {
			return Ok(None);
		}
		Ok(Some(response.json().await?))
	}

	async fn registration(&self, new_user: &NewUser) -> Result<(), ApiError> {
		let response = Request::post(&self.endpoint("/users")).json(new_user)?.send().await?;
		if !response.ok() {
			return Err(ApiError::Status(response.status()));
		}
		Ok(())
	}
}
