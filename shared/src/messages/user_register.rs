// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Form fields the server checks before an account can be created.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDataToValidate {
	pub email: String,
	pub password: String,
	pub first_name: String,
	pub last_name: String,
}

/// Per-field validation results from the server. The error map is keyed by
/// the field names of [`UserDataToValidate`] as they appear on the wire.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
	pub errors: HashMap<String, String>,
	pub is_valid: bool,
}

/// Complete payload for creating an account. `avatar` is empty when no image
/// was stored for the user.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
	pub email: String,
	pub password: String,
	pub first_name: String,
	pub last_name: String,
	pub avatar: String,
	pub is_admin: bool,
}
