// SPDX-FileCopyrightText: 2026 macaddresslookup contributors
//
// SPDX-License-Identifier: MPL-2.0

use once_cell::sync::Lazy;
use regex::Regex;

use crate::Error;

// Each octet boundary takes its own optional delimiter, so mixed delimiters
// and no delimiters at all are both accepted.
static MAC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^([0-9A-Fa-f]{2}[:.-]?){5}([0-9A-Fa-f]{2})$").expect("valid MAC regex")
});

/// Check `addr`, ignoring surrounding whitespace.
pub fn validate(addr: &str) -> bool {
    MAC_RE.is_match(addr.trim())
}

/// An address that passed [`validate`]. Holds the text exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacAddress(String);

impl MacAddress {
    pub fn parse(addr: &str) -> Result<Self, Error> {
        if validate(addr) {
            Ok(Self(addr.to_string()))
        } else {
            Err(Error::InvalidMacAddress(addr.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
