use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::testing::RunReport;

pub fn save_report(path: &Path, report: &RunReport) -> Result<()> {
    ensure_parent_dir(path)?;
    let raw = render_report(report)?;
    fs::write(path, raw).map_err(|source| Error::Report {
        path: path.display().to_string(),
        source,
    })
}

/// Print the report as pretty JSON, after whatever `out` already holds.
pub fn write_json_report<W: Write>(out: &mut W, report: &RunReport) -> Result<()> {
    let raw = render_report(report)?;
    writeln!(out, "{raw}")?;
    out.flush()?;
    Ok(())
}

fn render_report(report: &RunReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Error::ReportFormat)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| Error::Report {
                path: path.display().to_string(),
                source,
            })
        }
        _ => Ok(()),
    }
}
