// SPDX-FileCopyrightText: 2026 macaddresslookup contributors
//
// SPDX-License-Identifier: MPL-2.0

use once_cell::sync::Lazy;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use crate::Error;

pub const API_KEY_VAR: &str = "MACADDRESSIO_API_KEY";
pub const CONF_PATH_VAR: &str = "MACADDRESSLOOKUP_CONF";

const DEFAULT_ENDPOINT_URL: &str = "https://api.macaddress.io/v1";
const DEFAULT_LOG_FILE: &str = "macaddresslookup.log";
const CONF_PATH: &str = "/etc/macaddresslookup.conf";

#[derive(Debug, Default, serde::Deserialize)]
pub struct LookupConf {
    endpoint_url: Option<String>,
    log_file: Option<PathBuf>,
}

impl LookupConf {
    /// Read a conf file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(toml::from_slice(&bytes)?)
    }

    pub fn endpoint_url(&self) -> &str {
        self.endpoint_url.as_deref().unwrap_or(DEFAULT_ENDPOINT_URL)
    }

    pub fn log_file(&self) -> &Path {
        self.log_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_LOG_FILE))
    }
}

fn conf_path() -> PathBuf {
    env::var_os(CONF_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONF_PATH))
}

/// Process-wide conf, read once on first use.
pub fn lookup_conf() -> &'static LookupConf {
    static CONF: Lazy<LookupConf> = Lazy::new(|| {
        let path = conf_path();
        LookupConf::load(&path).unwrap_or_else(|err| {
            // Logging isn't configured yet at this point
            eprintln!("Failed to parse `{}`: {}", path.display(), err);
            LookupConf::default()
        })
    });
    &CONF
}

/// API key as read from `MACADDRESSIO_API_KEY`; unset and empty are both
/// rejected.
pub fn require_api_key(value: Option<String>) -> Result<String, Error> {
    match value {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(Error::MissingApiKey),
    }
}
