// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

/// Errors that can occur talking to the account service
#[derive(Debug)]
pub enum ApiError {
	/// The request could not be sent or its response could not be read.
	Request(gloo_net::Error),
	/// The service answered with a non-success status code.
	Status(u16),
	/// A browser API needed to build the request was unavailable.
	Browser(String),
}

impl fmt::Display for ApiError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Request(error) => write!(f, "Failed to communicate with the account service: {}", error),
			Self::Status(code) => write!(f, "The account service responded with status {}", code),
			Self::Browser(what) => write!(f, "A required browser interface was unavailable: {}", what),
		}
	}
}

impl From<gloo_net::Error> for ApiError {
	fn from(error: gloo_net::Error) -> Self {
		Self::Request(error)
	}
}
