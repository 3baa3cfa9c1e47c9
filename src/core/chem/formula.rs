use super::table::lookup_symbol;
use crate::utils::error::{Result, ToolError};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub type Composition = BTreeMap<String, u64>;

fn group_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\(\[]([^\(\)\[\]]+)[\)\]](\d*)").expect("static regex"))
}

fn element_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Z][a-z]?)(\d*)").expect("static regex"))
}

fn parse_count(digits: &str) -> Result<u64> {
    if digits.is_empty() {
        Ok(1)
    } else {
        Ok(digits.parse::<u64>()?)
    }
}

/// Splits a bracket-free run into `(symbol, count)` tokens. Every character
/// must belong to a token.
fn tokenize<'a>(text: &'a str, formula: &str) -> Result<Vec<(&'a str, u64)>> {
    let mut tokens = Vec::new();
    let mut cursor = 0;
    for caps in element_pattern().captures_iter(text) {
        let whole = caps.get(0).expect("group 0 always present");
        if whole.start() != cursor {
            return Err(ToolError::validation(format!(
                "Invalid character in formula '{}': {}",
                formula,
                &text[cursor..whole.start()]
            )));
        }
        cursor = whole.end();
        let symbol = caps.get(1).expect("symbol group always present").as_str();
        tokens.push((symbol, parse_count(&caps[2])?));
    }
    if cursor != text.len() {
        return Err(ToolError::validation(format!(
            "Invalid character in formula '{}': {}",
            formula,
            &text[cursor..]
        )));
    }
    Ok(tokens)
}

/// Rewrites the innermost bracket group with its multiplier distributed over
/// the members, e.g. `(SO4)3` becomes `S3O12`.
fn expand_innermost(flat: &str, formula: &str) -> Result<Option<String>> {
    let Some(caps) = group_pattern().captures(flat) else {
        return Ok(None);
    };
    let whole = caps.get(0).expect("group 0 always present");
    let multiplier = parse_count(&caps[2])?;

    let mut expanded = String::new();
    for (symbol, count) in tokenize(&caps[1], formula)? {
        let count = count
            .checked_mul(multiplier)
            .ok_or_else(|| ToolError::validation("Formula count is too large"))?;
        expanded.push_str(symbol);
        if count > 1 {
            expanded.push_str(&count.to_string());
        }
    }

    Ok(Some(format!(
        "{}{}{}",
        &flat[..whole.start()],
        expanded,
        &flat[whole.end()..]
    )))
}

/// `Ca(OH)2` parses to `{Ca: 1, O: 2, H: 2}`.
pub fn parse_formula(formula: &str) -> Result<Composition> {
    let mut flat: String = formula.split_whitespace().collect();
    if flat.is_empty() {
        return Err(ToolError::validation("Formula cannot be empty"));
    }

    while flat.contains(['(', '[']) {
        match expand_innermost(&flat, formula)? {
            Some(next) => flat = next,
            None => break,
        }
    }
    if flat.contains(['(', ')', '[', ']']) {
        return Err(ToolError::validation(format!(
            "Unbalanced brackets in formula: {}",
            formula
        )));
    }

    let mut composition = Composition::new();
    for (symbol, count) in tokenize(&flat, formula)? {
        if lookup_symbol(symbol).is_none() {
            return Err(ToolError::UnknownElement {
                symbol: symbol.to_string(),
            });
        }
        *composition.entry(symbol.to_string()).or_insert(0) += count;
    }

    Ok(composition)
}

/// Per-element contribution `(symbol, count, atomic weight, subtotal)` in symbol order.
pub fn mass_breakdown(composition: &Composition) -> Vec<(String, u64, f64, f64)> {
    composition
        .iter()
        .filter_map(|(symbol, count)| {
            lookup_symbol(symbol).map(|e| (symbol.clone(), *count, e.weight, e.weight * *count as f64))
        })
        .collect()
}

pub fn molar_mass(formula: &str) -> Result<f64> {
    let composition = parse_formula(formula)?;
    Ok(mass_breakdown(&composition).iter().map(|(_, _, _, m)| m).sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(pairs: &[(&str, u64)]) -> Composition {
        pairs.iter().map(|(s, c)| (s.to_string(), *c)).collect()
    }

    #[test]
    fn test_simple_formula() {
        assert_eq!(parse_formula("H2O").unwrap(), comp(&[("H", 2), ("O", 1)]));
        assert_eq!(parse_formula("NaCl").unwrap(), comp(&[("Na", 1), ("Cl", 1)]));
    }

    #[test]
    fn test_bracket_expansion() {
        assert_eq!(
            parse_formula("Ca(OH)2").unwrap(),
            comp(&[("Ca", 1), ("O", 2), ("H", 2)])
        );
        assert_eq!(
            parse_formula("Fe2(SO4)3").unwrap(),
            comp(&[("Fe", 2), ("S", 3), ("O", 12)])
        );
    }

    #[test]
    fn test_nested_and_square_brackets() {
        assert_eq!(
            parse_formula("K4[Fe(CN)6]").unwrap(),
            comp(&[("K", 4), ("Fe", 1), ("C", 6), ("N", 6)])
        );
        assert_eq!(
            parse_formula("Mg3(PO4)2").unwrap(),
            comp(&[("Mg", 3), ("P", 2), ("O", 8)])
        );
    }

    #[test]
    fn test_repeated_elements_are_summed() {
        assert_eq!(
            parse_formula("CH3COOH").unwrap(),
            comp(&[("C", 2), ("H", 4), ("O", 2)])
        );
    }

    #[test]
    fn test_invalid_formulas() {
        assert!(matches!(
            parse_formula("Xx2").unwrap_err(),
            ToolError::UnknownElement { .. }
        ));
        assert!(parse_formula("").is_err());
        assert!(parse_formula("Ca(OH2").is_err());
        assert!(parse_formula("h2o").is_err());
        assert!(parse_formula("H2O!").is_err());
    }

    #[test]
    fn test_junk_inside_brackets_is_rejected() {
        let err = parse_formula("Ca(O!H)2").unwrap_err();
        assert!(err.to_string().contains("Invalid character"));
        assert!(err.to_string().contains('!'));
        assert!(parse_formula("Ca(oh)2").is_err());
        assert!(parse_formula("K4[Fe(C-N)6]").is_err());
    }

    #[test]
    fn test_molar_mass() {
        let water = molar_mass("H2O").unwrap();
        assert!((water - 18.015).abs() < 1e-9);

        let lime = molar_mass("Ca(OH)2").unwrap();
        assert!((lime - (40.078 + 2.0 * 15.999 + 2.0 * 1.008)).abs() < 1e-9);
    }
}
