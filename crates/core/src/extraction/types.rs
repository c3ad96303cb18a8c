//! Extraction result types.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::ExtractionError;

/// Vendor and invoice number reported when extraction fails.
pub const ERROR_MARKER: &str = "Error";

/// Fields read from an invoice document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedInvoice {
    /// Issuing company name.
    #[serde(deserialize_with = "lenient_text")]
    pub vendor_detected: String,
    /// Invoice number.
    #[serde(deserialize_with = "lenient_text")]
    pub invoice_no: String,
    /// Invoice date, `YYYY-MM-DD` when the model complies.
    #[serde(deserialize_with = "lenient_text")]
    pub date_detected: String,
    /// Total amount.
    #[serde(deserialize_with = "lenient_amount")]
    pub amount_detected: Decimal,
}

/// Extraction outcome for one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentExtraction {
    /// Uploaded file name.
    pub filename: String,
    /// Extracted fields, or the error markers.
    #[serde(flatten)]
    pub fields: ExtractedInvoice,
    /// Failure description, if extraction failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentExtraction {
    /// A successful extraction.
    #[must_use]
    pub fn success(filename: &str, fields: ExtractedInvoice) -> Self {
        Self {
            filename: filename.to_string(),
            fields,
            error: None,
        }
    }

    /// An error record: vendor and invoice number `Error`, empty date, zero amount.
    #[must_use]
    pub fn failure(filename: &str, err: &ExtractionError) -> Self {
        Self {
            filename: filename.to_string(),
            fields: ExtractedInvoice {
                vendor_detected: ERROR_MARKER.to_string(),
                invoice_no: ERROR_MARKER.to_string(),
                date_detected: String::new(),
                amount_detected: Decimal::ZERO,
            },
            error: Some(err.to_string()),
        }
    }

    /// Returns true if extraction failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Accept strings, numbers or null for text fields.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Accept `1234.5`, `"1234.50"`, `"$1,234.50"` or `"NZD 1,234.50"`.
fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Decimal::ZERO),
        Value::Number(n) => parse_amount(&n.to_string()).map_err(serde::de::Error::custom),
        Value::String(s) => parse_amount(&s).map_err(serde::de::Error::custom),
        other => Err(serde::de::Error::custom(format!(
            "expected a number for amount_detected, got {other}"
        ))),
    }
}

/// Parse a loosely formatted money amount.
///
/// # Errors
///
/// Returns a message when no number can be read.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let trimmed = raw.trim();
    if let Ok(amount) = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
        return Ok(amount);
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
        .collect();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned).map_err(|_| format!("invalid amount '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_amount_variants() {
        assert_eq!(parse_amount("1234.5").unwrap(), dec!(1234.5));
        assert_eq!(parse_amount("$1,234.50").unwrap(), dec!(1234.50));
        assert_eq!(parse_amount("NZD 5,000.00").unwrap(), dec!(5000));
        assert_eq!(parse_amount("1.5e3").unwrap(), dec!(1500));
        assert_eq!(parse_amount("").unwrap(), Decimal::ZERO);
        assert!(parse_amount("1.2.3").is_err());
    }

    #[test]
    fn test_extracted_invoice_lenient_fields() {
        let json = r#"{"vendor_detected": " Acme Logging ", "invoice_no": 4411, "date_detected": null, "amount_detected": "$1,234.50"}"#;
        let parsed: ExtractedInvoice = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.vendor_detected, "Acme Logging");
        assert_eq!(parsed.invoice_no, "4411");
        assert_eq!(parsed.date_detected, "");
        assert_eq!(parsed.amount_detected, dec!(1234.50));
    }

    #[test]
    fn test_extracted_invoice_missing_fields_default() {
        let parsed: ExtractedInvoice = serde_json::from_str(r#"{"amount_detected": 12.5}"#).unwrap();
        assert_eq!(parsed.vendor_detected, "");
        assert_eq!(parsed.amount_detected, dec!(12.5));
    }

    #[test]
    fn test_failure_record() {
        let record =
            DocumentExtraction::failure("scan.pdf", &ExtractionError::Configuration("API key missing".into()));

        assert!(record.is_error());
        assert_eq!(record.fields.vendor_detected, "Error");
        assert_eq!(record.fields.invoice_no, "Error");
        assert_eq!(record.fields.date_detected, "");
        assert_eq!(record.fields.amount_detected, Decimal::ZERO);
        assert_eq!(
            record.error.as_deref(),
            Some("extraction configuration error: API key missing")
        );
    }
}
