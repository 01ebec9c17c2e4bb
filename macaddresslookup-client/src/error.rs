// SPDX-FileCopyrightText: 2026 macaddresslookup contributors
//
// SPDX-License-Identifier: MPL-2.0

use std::{fmt, io};

/// Non-2xx response from the lookup API.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub endpoint: String,
    pub code: u16,
    pub canonical_reason: Option<String>,
    pub message: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let error = if let Some(reason) = &self.canonical_reason {
            format!("{} {}", self.code, reason)
        } else {
            format!("{}", self.code)
        };
        if let Some(message) = &self.message {
            write!(
                f,
                "status code:{} from API endpoint '{}': {}",
                error, self.endpoint, message
            )
        } else {
            write!(f, "status code:{} from API endpoint '{}'", error, self.endpoint)
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug)]
pub enum Error {
    MissingApiKey,
    InvalidMacAddress(String),
    Api(ApiError),
    Reqwest(String),
    Io(io::Error),
    Toml(String),
}

impl Error {
    /// Process exit status for this error. Upstream HTTP failures exit with
    /// the response status; everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Api(err) => i32::from(err.code),
            _ => 1,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(
                f,
                "Please set the environment variable {}",
                crate::conf::API_KEY_VAR
            ),
            Self::InvalidMacAddress(addr) => {
                write!(f, "Could not validate mac_address '{}'", addr)
            }
            Self::Api(err) => write!(f, "{}", err),
            Self::Reqwest(err) => write!(f, "{}", err),
            Self::Io(err) => write!(f, "{}", err),
            Self::Toml(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Reqwest(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Toml(err.to_string())
    }
}
