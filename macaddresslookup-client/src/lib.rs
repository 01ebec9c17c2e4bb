// SPDX-FileCopyrightText: 2026 macaddresslookup contributors
//
// SPDX-License-Identifier: MPL-2.0

//! Vendor lookup for MAC addresses against the macaddress.io API, with
//! field extraction and output formatting for the response.

mod api;
pub use api::Api;
mod conf;
pub use conf::{lookup_conf, require_api_key, LookupConf, API_KEY_VAR, CONF_PATH_VAR};
mod error;
pub use error::{ApiError, Error};
pub mod format;
pub use format::OutputFormat;
mod mac;
pub use mac::{validate, MacAddress};
pub mod resolve;
pub use resolve::{resolve, resolve_str, Document, FieldQuery, ResolvedFields};

/// Resolve `query` against the raw response body and render it.
pub fn formatted_output(raw: &str, query: &FieldQuery, output: OutputFormat) -> String {
    format::format(&resolve_str(raw, query), output)
}
