//! Human-readable report output

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

use crate::aggregate::AggregatedEntry;

use super::config::OutputConfig;
use super::json::module_names_json;

/// Label printed above the machine-readable module list.
const EXTERNAL_MODULES_LABEL: &str = "assumed external modules:";

/// Formats aggregated entries as an aligned listing followed by the JSON
/// array of module names:
///
/// ```text
/// express      routes/index.ts    ( import express from "express"; )
/// @nestjs/core main.ts    ( import { NestFactory } from '@nestjs/core'; )
///
/// assumed external modules:
/// ["@nestjs/core","express"]
/// ```
pub struct ReportFormatter {
    config: OutputConfig,
}

impl ReportFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render the report without colors.
    pub fn render(&self, entries: &[AggregatedEntry]) -> io::Result<String> {
        let mut out = NoColor::new(Vec::new());
        write_report(&mut out, entries)?;
        Ok(String::from_utf8_lossy(&out.into_inner()).into_owned())
    }

    /// Print the report to stdout, colored if enabled.
    pub fn print(&self, entries: &[AggregatedEntry]) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        write_report(&mut stdout, entries)
    }
}

fn write_report<W: WriteColor>(out: &mut W, entries: &[AggregatedEntry]) -> io::Result<()> {
    let width = entries
        .iter()
        .map(|e| e.module_name.chars().count())
        .max()
        .unwrap_or(0);

    for entry in entries {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(out, "{}", entry.module_name)?;
        out.reset()?;
        let padding = width - entry.module_name.chars().count();
        writeln!(
            out,
            "{:padding$} {}    ( {} )",
            "",
            entry.first_found_in.display(),
            entry.raw_line,
            padding = padding
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{}", EXTERNAL_MODULES_LABEL)?;
    writeln!(out, "{}", module_names_json(entries).map_err(io::Error::other)?)?;
    Ok(())
}
