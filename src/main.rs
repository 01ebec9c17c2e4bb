// SPDX-FileCopyrightText: 2026 macaddresslookup contributors
//
// SPDX-License-Identifier: GPL-3.0-only

use clap::Parser;
use std::{env, io, process};

use macaddresslookup::{cli, logging};
use macaddresslookup_client::API_KEY_VAR;

fn main() {
    let args = cli::Args::parse();
    let conf = macaddresslookup_client::lookup_conf();

    logging::init(args.verbose, conf.log_file());
    tracing::debug!("{:?}", args);

    let api_key = env::var(API_KEY_VAR).ok();
    if let Err(err) = cli::run(&args, conf.endpoint_url(), api_key, &mut io::stdout().lock()) {
        tracing::error!("{:#}", err);
        process::exit(cli::exit_code(&err));
    }
}
