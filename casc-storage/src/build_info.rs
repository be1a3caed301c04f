//! `.build.info` parsing: selects the active row for the detected title.

use casc_formats::build_info::{self, BuildInfoRow};

use crate::error::Result;
use crate::title::Title;

/// Parse `.build.info` and pick the row for `title`.
pub fn select_entry(input: &str, title: Title) -> Result<BuildInfoRow> {
    Ok(build_info::parse_build_info(input, title.code())?)
}
