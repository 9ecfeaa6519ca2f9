// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

/// Response from the image storage service after an avatar upload.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ImageUploadResponse {
	pub data: UploadedImage,
}

/// Details of a stored image. `secure_url` is the HTTPS address of the stored
/// copy, named the way the storage service names it.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct UploadedImage {
	pub secure_url: String,
}
