// SPDX-FileCopyrightText: 2026 macaddresslookup contributors
//
// SPDX-License-Identifier: MPL-2.0

use serde::Serialize;
use serde_json::{ser::Formatter, Value};
use std::{fmt, io, str::FromStr};

use crate::ResolvedFields;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    #[default]
    Minimal,
}

impl OutputFormat {
    pub fn to_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Minimal => "minimal",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "minimal" => Ok(Self::Minimal),
            _ => Err(format!(
                "unknown output format '{}', expected json, csv or minimal",
                s
            )),
        }
    }
}

/// JSON with `", "` and `": "` separators.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

/// Text form of a value for CSV cells and minimal output.
pub fn plain(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "None".to_string(),
        Some(Value::Bool(true)) => "True".to_string(),
        Some(Value::Bool(false)) => "False".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn json(fields: &ResolvedFields) -> String {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
    match fields.serialize(&mut ser) {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        Err(err) => {
            tracing::error!("Could not serialize output: {}", err);
            "{}".to_string()
        }
    }
}

// Cells are quoted but never escaped.
fn csv(fields: &ResolvedFields) -> String {
    let header = fields.iter().map(|(k, _)| k).collect::<Vec<_>>().join(",");
    let values = fields
        .iter()
        .map(|(_, v)| format!("\"{}\"", plain(v)))
        .collect::<Vec<_>>()
        .join(",");
    format!("{}\n{}", header, values)
}

fn minimal(fields: &ResolvedFields) -> String {
    if fields.len() == 1 {
        fields.iter().map(|(_, v)| plain(v)).collect()
    } else {
        fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, plain(v)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn format(fields: &ResolvedFields, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json(fields),
        OutputFormat::Csv => csv(fields),
        OutputFormat::Minimal => minimal(fields),
    }
}
