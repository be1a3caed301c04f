//! `.build.info`: the local install directory's BPSV bootstrap file.

use crate::bpsv::BpsvTable;
use crate::error::{FormatError, Result};
use crate::hash::CascHash;

/// One row of `.build.info`.
#[derive(Debug, Clone)]
pub struct BuildInfoRow {
    pub region: String,
    pub build_config_hash: CascHash,
    pub product: Option<String>,
}

/// Parse `.build.info` and select the row for `detected_product`.
///
/// A single row is accepted unconditionally. With multiple rows, the row
/// whose `Product` column matches `detected_product` is selected; if the
/// table has no `Product` column at all a lone row is still accepted, but
/// multiple rows with no way to disambiguate is `BadConfig`.
pub fn parse_build_info(input: &str, detected_product: &str) -> Result<BuildInfoRow> {
    let table = BpsvTable::parse(input)?;
    table.require_columns(&["Branch", "Build Key"])?;
    let has_product = table.column_index("Product").is_some();

    if table.rows().len() == 1 {
        return row_from(&table, &table.rows()[0]);
    }

    if !has_product {
        return Err(FormatError::BadConfig(
            "multiple .build.info rows with no Product column to disambiguate".into(),
        ));
    }

    let matching: Vec<&Vec<String>> = table
        .rows()
        .iter()
        .filter(|row| table.get(row, "Product") == Some(detected_product))
        .collect();

    match matching.as_slice() {
        [row] => row_from(&table, row),
        [] => Err(FormatError::NotFound(format!(
            "no .build.info row for product {detected_product}"
        ))),
        _ => Err(FormatError::BadConfig(format!(
            "ambiguous .build.info: multiple rows for product {detected_product}"
        ))),
    }
}

fn row_from(table: &BpsvTable, row: &[String]) -> Result<BuildInfoRow> {
    let region = table.get(row, "Branch").unwrap_or_default().to_string();
    let raw_hash = table.get(row, "Build Key").unwrap_or_default();
    let build_config_hash = CascHash::from_hex(raw_hash)
        .ok_or_else(|| FormatError::BadCsv("invalid Build Key hash".into()))?;
    let product = table
        .get(row, "Product")
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    Ok(BuildInfoRow {
        region,
        build_config_hash,
        product,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row_accepted_without_product_column() {
        let input = "Branch!STRING:0|Active!DEC:1|Build Key!HEX:16\nus|1|6a9e9d6b2a070a4c6a3b777beeb2b7c0\n";
        let row = parse_build_info(input, "wow").expect("single row ok");
        assert_eq!(row.region, "us");
    }

    #[test]
    fn multi_row_disambiguated_by_product() {
        let input = "Branch!STRING:0|Build Key!HEX:16|Product!STRING:0\nus|6a9e9d6b2a070a4c6a3b777beeb2b7c0|wow\nus|66d0476334023bb1eaa241424f9ad178|wow_classic\n";
        let row = parse_build_info(input, "wow_classic").expect("disambiguated row");
        assert_eq!(
            row.build_config_hash.to_hex(),
            "66d0476334023bb1eaa241424f9ad178"
        );
    }

    #[test]
    fn multi_row_without_product_column_fails() {
        let input = "Branch!STRING:0|Build Key!HEX:16\nus|6a9e9d6b2a070a4c6a3b777beeb2b7c0\neu|66d0476334023bb1eaa241424f9ad178\n";
        assert!(parse_build_info(input, "wow").is_err());
    }
}
