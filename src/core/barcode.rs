use crate::utils::error::{Result, ToolError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarcodeFormat {
    Ean8,
    Ean13,
    UpcA,
    Code39,
    Code128,
    Isbn,
    Issn,
}

pub struct FormatInfo {
    pub format: BarcodeFormat,
    pub code: &'static str,
    pub description: &'static str,
    pub requirements: &'static str,
}

pub static FORMATS: [FormatInfo; 7] = [
    FormatInfo {
        format: BarcodeFormat::Ean8,
        code: "EAN8",
        description: "EAN-8 (8-digit European Article Number)",
        requirements: "8 digits (numbers only)",
    },
    FormatInfo {
        format: BarcodeFormat::Ean13,
        code: "EAN13",
        description: "EAN-13 (13-digit European Article Number)",
        requirements: "13 digits (numbers only)",
    },
    FormatInfo {
        format: BarcodeFormat::UpcA,
        code: "UPCA",
        description: "UPC-A (12-digit Universal Product Code)",
        requirements: "12 digits (numbers only)",
    },
    FormatInfo {
        format: BarcodeFormat::Code39,
        code: "CODE39",
        description: "Code 39 (alphanumeric barcode)",
        requirements: "Uppercase letters, numbers, and special chars (- . $ / + %)",
    },
    FormatInfo {
        format: BarcodeFormat::Code128,
        code: "CODE128",
        description: "Code 128 (high-density alphanumeric)",
        requirements: "Any ASCII character (128 characters supported)",
    },
    FormatInfo {
        format: BarcodeFormat::Isbn,
        code: "ISBN",
        description: "ISBN (International Standard Book Number)",
        requirements: "10 or 13 digit ISBN (with or without hyphens)",
    },
    FormatInfo {
        format: BarcodeFormat::Issn,
        code: "ISSN",
        description: "ISSN (International Standard Serial Number)",
        requirements: "8 digits (format: XXXX-XXXX)",
    },
];

impl BarcodeFormat {
    pub fn info(&self) -> &'static FormatInfo {
        FORMATS
            .iter()
            .find(|f| f.format == *self)
            .unwrap_or(&FORMATS[4])
    }

    /// Case-insensitive, hyphens ignored: `ean-13` parses as [`BarcodeFormat::Ean13`].
    pub fn parse(name: &str) -> Result<Self> {
        let normalized = name.trim().to_uppercase().replace('-', "");
        FORMATS
            .iter()
            .find(|f| f.code == normalized)
            .map(|f| f.format)
            .ok_or_else(|| {
                let supported: Vec<&str> = FORMATS.iter().map(|f| f.code).collect();
                ToolError::validation(format!(
                    "Unsupported barcode type '{}'. Supported types: {}",
                    name,
                    supported.join(", ")
                ))
            })
    }

    fn fixed_digits(&self) -> Option<usize> {
        match self {
            BarcodeFormat::Ean8 => Some(8),
            BarcodeFormat::Ean13 => Some(13),
            BarcodeFormat::UpcA => Some(12),
            _ => None,
        }
    }

    pub fn is_valid(&self, data: &str) -> bool {
        match self.fixed_digits() {
            Some(len) => data.len() == len && data.chars().all(|c| c.is_ascii_digit()),
            None => !data.is_empty() && data.chars().all(|c| !c.is_control()),
        }
    }

    pub fn validate(&self, data: &str) -> Result<()> {
        if self.is_valid(data) {
            Ok(())
        } else {
            Err(ToolError::validation(format!(
                "Invalid data for {} barcode. Requirements: {}",
                self,
                self.info().requirements
            )))
        }
    }

    /// `Some(true/false)` for EAN/UPC data of the right shape, `None` for formats without a GS1 check digit.
    pub fn check_digit_ok(&self, data: &str) -> Option<bool> {
        self.fixed_digits()?;
        if !self.is_valid(data) {
            return Some(false);
        }
        let (body, last) = data.split_at(data.len() - 1);
        let expected = gs1_check_digit(body)?;
        Some(last.parse::<u32>().ok() == Some(expected))
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().code)
    }
}

/// Mod-10 check digit with weights 3,1,3,... counted from the rightmost body digit.
pub fn gs1_check_digit(body: &str) -> Option<u32> {
    let mut sum = 0;
    for (i, c) in body.chars().rev().enumerate() {
        let d = c.to_digit(10)?;
        sum += if i % 2 == 0 { d * 3 } else { d };
    }
    Some((10 - sum % 10) % 10)
}

pub fn format_list() -> String {
    let rule = "=".repeat(50);
    let mut out = format!("Supported Barcode Formats:\n{}\n", rule);
    for f in &FORMATS {
        out.push_str(&format!("{:15} - {}\n", f.code, f.description));
    }
    out.push_str(&rule);
    out
}
