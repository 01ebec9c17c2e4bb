// SPDX-FileCopyrightText: 2026 macaddresslookup contributors
//
// SPDX-License-Identifier: GPL-3.0-only

use anyhow::Context;
use clap::Parser;
use std::io::Write;

use macaddresslookup_client::{
    formatted_output, require_api_key, Api, Error, FieldQuery, MacAddress, OutputFormat,
};

#[derive(Debug, Parser)]
#[command(
    name = "macaddresslookup",
    version,
    about = "Query macaddress.io and fetch the vendor information associated with the mac address"
)]
pub struct Args {
    /// MAC Address of the device
    pub macaddr: String,

    /// Output format control, accepted values are json, csv, minimal
    #[arg(short, long, default_value_t = OutputFormat::Minimal)]
    pub output: OutputFormat,

    /// Query fields, one or multiple comma separated eg. name,transmission,valid,blockfound
    #[arg(short, long, default_value = "name")]
    pub query: FieldQuery,

    /// Return raw json from the server that can be piped to jq for other fields
    #[arg(short, long)]
    pub rawjson: bool,

    /// Make output more verbose, sets the log level to DEBUG
    #[arg(short, long)]
    pub verbose: bool,
}

/// Exit status for a failed run.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<Error>().map_or(1, Error::exit_code)
}

/// Check the key, then the address, then query `endpoint`. Nothing is sent
/// unless both checks pass.
pub fn run<W: Write>(
    args: &Args,
    endpoint: &str,
    api_key: Option<String>,
    out: &mut W,
) -> anyhow::Result<()> {
    let api_key = require_api_key(api_key)?;
    let mac = MacAddress::parse(&args.macaddr)?;

    let api = Api::new(endpoint, api_key)?;
    lookup(&api, &mac, args, out)
}

pub fn lookup<W: Write>(
    api: &Api,
    mac: &MacAddress,
    args: &Args,
    out: &mut W,
) -> anyhow::Result<()> {
    let response = api.lookup(mac)?;

    let output = if args.rawjson {
        response
    } else {
        formatted_output(&response, &args.query, args.output)
    };
    writeln!(out, "{}", output).context("Failed to write output")?;
    Ok(())
}
