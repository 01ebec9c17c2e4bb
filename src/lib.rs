// SPDX-FileCopyrightText: 2026 macaddresslookup contributors
//
// SPDX-License-Identifier: GPL-3.0-only

pub mod cli;
pub mod logging;
