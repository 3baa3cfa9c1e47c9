use crate::app::prompt::{Prompter, StdPrompter};
use crate::app::tools::report;
use crate::config::cli::BarcodeArgs;
use crate::core::barcode::{format_list, BarcodeFormat};
use crate::utils::error::Result;
use std::io::{BufRead, Write};

pub fn run(args: &BarcodeArgs) -> Result<()> {
    let mut prompter = StdPrompter::stdio();
    if args.list_formats {
        return prompter.say(format_list());
    }
    match (&args.barcode_type, &args.data) {
        (Some(kind), Some(data)) => {
            let message = check(kind, data)?;
            prompter.say(format!("✅ {}", message))
        }
        _ => interactive(&mut prompter),
    }
}

/// Validates `data` for the named format and describes the result.
pub fn check(kind: &str, data: &str) -> Result<String> {
    let format = BarcodeFormat::parse(kind)?;
    format.validate(data)?;
    let mut message = format!("Valid {} data: {}", format, data);
    match format.check_digit_ok(data) {
        Some(true) => message.push_str(" (check digit OK)"),
        Some(false) => message.push_str(" (⚠️  check digit does not match)"),
        None => {}
    }
    Ok(message)
}

pub fn interactive<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<()> {
    prompter.say(format_list())?;
    loop {
        let Some(kind) = prompter.ask("\nBarcode type (or 'q' to quit): ")? else {
            return Ok(());
        };
        if kind.eq_ignore_ascii_case("q") {
            return Ok(());
        }
        let format = match BarcodeFormat::parse(&kind) {
            Ok(format) => format,
            Err(e) => {
                prompter.say(format!("❌ {}", e))?;
                continue;
            }
        };
        prompter.say(format!("Requirements: {}", format.info().requirements))?;
        let data = prompter.ask_required("Data: ")?;
        report(prompter, check(&kind, &data))?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::prompt::scripted;

    #[test]
    fn test_check_reports_check_digit() {
        assert_eq!(
            check("ean13", "4006381333931").unwrap(),
            "Valid EAN13 data: 4006381333931 (check digit OK)"
        );
        assert!(check("EAN13", "4006381333932").unwrap().contains("does not match"));
        assert_eq!(check("code-39", "ABC-123").unwrap(), "Valid CODE39 data: ABC-123");
        assert!(check("UPCA", "12345").is_err());
        assert!(check("QR", "x").is_err());
    }

    #[test]
    fn test_interactive_session() {
        let mut p = scripted("qr\nean8\n1234\nean8\n96385074\nq\n");
        interactive(&mut p).unwrap();
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Supported Barcode Formats:"));
        assert!(out.contains("❌ Unsupported barcode type 'qr'"));
        assert!(out.contains("Requirements: 8 digits (numbers only)"));
        assert!(out.contains("❌ Invalid data for EAN8 barcode"));
        assert!(out.contains("✅ Valid EAN8 data: 96385074 (check digit OK)"));
    }
}
