//! Format parsers turning uploaded statement files into canonical records

pub mod csv;
pub mod xml;

use bigdecimal::BigDecimal;
use std::str::FromStr;

use crate::types::*;

pub use self::csv::parse_csv;
pub use self::xml::parse_xml;

/// Supported statement file formats, resolved once from the filename
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Csv,
    Xml,
}

impl FileFormat {
    /// Select the format from the declared filename.
    ///
    /// Matching is case-insensitive on the `.csv` / `.xml` suffix only; the file
    /// content is never sniffed.
    pub fn from_filename(filename: Option<&str>) -> StatementResult<Self> {
        let filename = filename.ok_or_else(|| {
            StatementError::InvalidFile("File name is missing from the file".to_string())
        })?;

        let lowercase = filename.to_lowercase();
        if lowercase.ends_with(".csv") {
            Ok(FileFormat::Csv)
        } else if lowercase.ends_with(".xml") {
            Ok(FileFormat::Xml)
        } else {
            Err(StatementError::InvalidFile(
                "Unsupported file type".to_string(),
            ))
        }
    }

    /// Parse the whole content with this format's parser
    pub fn parse(&self, content: &[u8]) -> StatementResult<Vec<StatementRecord>> {
        match self {
            FileFormat::Csv => parse_csv(content),
            FileFormat::Xml => parse_xml(content),
        }
    }

    /// Short name used in log output
    pub fn name(&self) -> &'static str {
        match self {
            FileFormat::Csv => "CSV",
            FileFormat::Xml => "XML",
        }
    }
}

/// Parse a monetary amount, accepting one leading `+` as a no-op sign.
///
/// Only plain decimal notation is accepted. Exponent notation (`1E-9`) is
/// rejected, so the scale of an amount never exceeds its digit count in the file.
pub(crate) fn parse_amount(field: &str, raw: &str) -> Result<BigDecimal, String> {
    let trimmed = raw.trim();
    if trimmed.contains(['e', 'E']) {
        return Err(format!(
            "invalid value for {field}: '{raw}' (exponent notation is not supported)"
        ));
    }
    let unsigned = match trimmed.strip_prefix('+') {
        Some(rest) if rest.starts_with(['+', '-']) => {
            return Err(format!("invalid value for {field}: '{raw}'"));
        }
        Some(rest) => rest,
        None => trimmed,
    };

    BigDecimal::from_str(unsigned)
        .map_err(|e| format!("invalid value for {field}: '{raw}' ({e})"))
}
