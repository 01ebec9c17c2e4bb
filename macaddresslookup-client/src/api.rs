// SPDX-FileCopyrightText: 2026 macaddresslookup contributors
//
// SPDX-License-Identifier: MPL-2.0

use reqwest::blocking::{Client, Request};

use crate::{ApiError, Error, MacAddress};

const AUTH_HEADER: &str = "X-Authentication-Token";

pub struct Api {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl Api {
    pub fn new(endpoint: &str, api_key: String) -> Result<Self, Error> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, endpoint, api_key))
    }

    pub fn with_client(client: Client, endpoint: &str, api_key: String) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            api_key,
        }
    }

    /// `GET <endpoint>?output=json&search=<mac>` with the API key header.
    pub fn request(&self, mac: &MacAddress) -> Result<Request, Error> {
        Ok(self
            .client
            .get(&self.endpoint)
            .query(&[("output", "json"), ("search", mac.as_str())])
            .header(AUTH_HEADER, &self.api_key)
            .build()?)
    }

    /// Run a single lookup and return the response body unparsed.
    ///
    /// The response is dropped, and its connection released, before this
    /// returns on every path.
    pub fn lookup(&self, mac: &MacAddress) -> Result<String, Error> {
        let request = self.request(mac)?;
        tracing::debug!("GET {}", request.url());

        let response = self.client.execute(request)?;
        let status = response.status();
        tracing::debug!("status code:{}", status);

        if !status.is_success() {
            let message = response.text().ok().filter(|text| !text.is_empty());
            return Err(ApiError {
                endpoint: self.endpoint.clone(),
                code: status.as_u16(),
                canonical_reason: status.canonical_reason().map(str::to_string),
                message,
            }
            .into());
        }

        Ok(response.text()?)
    }
}
