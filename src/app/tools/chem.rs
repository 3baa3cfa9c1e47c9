use crate::config::cli::{ChemAction, GasUnitArg};
use crate::core::chem::calculators::{BALANCE_GUIDE, PERIODIC_TABLE_ART};
use crate::core::chem::{
    dilution, element_info, ideal_gas_law, mass_breakdown, mole_conversion, molarity, parse_formula,
    ph, AmountUnit, GasConstant,
};
use crate::utils::error::{Result, ToolError};
use std::io::Write;

impl From<GasUnitArg> for GasConstant {
    fn from(arg: GasUnitArg) -> Self {
        match arg {
            GasUnitArg::LAtm => GasConstant::LiterAtm,
            GasUnitArg::J => GasConstant::Joule,
            GasUnitArg::LKpa => GasConstant::LiterKpa,
            GasUnitArg::Cal => GasConstant::Calorie,
        }
    }
}

pub fn run<W: Write>(action: &ChemAction, out: &mut W) -> Result<()> {
    match action {
        ChemAction::Element { query } => {
            let element = element_info(query).ok_or_else(|| ToolError::UnknownElement {
                symbol: query.clone(),
            })?;
            writeln!(out, "\n{} ({})", element.name, element.symbol)?;
            writeln!(out, "  Atomic Number: {}", element.number)?;
            writeln!(out, "  Atomic Weight: {:.3} g/mol", element.weight)?;
            writeln!(out, "  Group:         {}", element.group)?;
            writeln!(out, "  Phase (STP):   {}", element.phase)?;
        }
        ChemAction::Molar { formula } => {
            let composition = parse_formula(formula)?;
            let breakdown = mass_breakdown(&composition);
            let total: f64 = breakdown.iter().map(|(_, _, _, m)| m).sum();
            writeln!(out, "\nMolar mass of {}", formula)?;
            for (symbol, count, weight, subtotal) in &breakdown {
                writeln!(
                    out,
                    "  {:<3} {:>3} × {:>9.3} = {:>10.3} g/mol",
                    symbol, count, weight, subtotal
                )?;
            }
            writeln!(out, "  Total: {:.3} g/mol", total)?;
        }
        ChemAction::Gas {
            pressure,
            volume,
            moles,
            temperature,
            r_unit,
        } => {
            let r = GasConstant::from(*r_unit);
            let (variable, value) = ideal_gas_law(*pressure, *volume, *moles, *temperature, r)?;
            writeln!(out, "\nIdeal Gas Law: PV = nRT (R = {} {})", r.value(), r.unit())?;
            writeln!(out, "  {} = {:.4} {}", variable.label(), value, variable.unit())?;
        }
        ChemAction::Dilution { c1, v1, c2, v2 } => {
            let (variable, value) = dilution(*c1, *v1, *c2, *v2)?;
            writeln!(out, "\nDilution: C1V1 = C2V2")?;
            writeln!(out, "  {} = {:.4}", variable.label(), value)?;
        }
        ChemAction::Molarity {
            moles,
            volume,
            molarity: m,
            mass,
            molar_mass,
        } => {
            let (variable, value) = molarity(*moles, *volume, *m, *mass, *molar_mass)?;
            writeln!(out, "\nMolarity: M = mol/L")?;
            writeln!(out, "  {} = {:.4} {}", variable.label(), value, variable.unit())?;
        }
        ChemAction::Ph {
            h_concentration,
            ph: p,
            poh,
            oh_concentration,
        } => {
            let result = ph(*h_concentration, *p, *poh, *oh_concentration)?;
            writeln!(out, "\npH Calculation")?;
            writeln!(out, "  pH:    {:.2}", result.ph)?;
            writeln!(out, "  pOH:   {:.2}", result.poh)?;
            writeln!(out, "  [H+]:  {:.2e} M", result.h_concentration)?;
            writeln!(out, "  [OH-]: {:.2e} M", result.oh_concentration)?;
            writeln!(out, "  Solution is {}", result.solution_type())?;
        }
        ChemAction::Convert {
            value,
            from,
            to,
            molar_mass,
        } => {
            let from: AmountUnit = from.parse()?;
            let to: AmountUnit = to.parse()?;
            let converted = mole_conversion(*value, from, to, *molar_mass)?;
            writeln!(
                out,
                "\n{} {} = {} {}",
                format_amount(*value),
                from.symbol(),
                format_amount(converted),
                to.symbol()
            )?;
        }
        ChemAction::Table => writeln!(out, "{}", PERIODIC_TABLE_ART)?,
        ChemAction::Balance => writeln!(out, "{}", BALANCE_GUIDE)?,
    }
    Ok(())
}

/// Particle counts are shown in scientific notation, everything else with four decimals.
fn format_amount(value: f64) -> String {
    if value.abs() >= 1e6 {
        format!("{:.4e}", value)
    } else {
        format!("{:.4}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(action: ChemAction) -> Result<String> {
        let mut out = Vec::new();
        run(&action, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_element_lookup_by_name() {
        let out = render(ChemAction::Element { query: "sodium".into() }).unwrap();
        assert!(out.contains("Sodium (Na)"));
        assert!(out.contains("Atomic Number: 11"));
    }

    #[test]
    fn test_unknown_element() {
        let err = render(ChemAction::Element { query: "Xx".into() }).unwrap_err();
        assert!(matches!(err, ToolError::UnknownElement { .. }));
    }

    #[test]
    fn test_molar_mass_output() {
        let out = render(ChemAction::Molar { formula: "H2O".into() }).unwrap();
        assert!(out.contains("Total: 18.015 g/mol"));
    }

    #[test]
    fn test_gas_requires_three_values() {
        let err = render(ChemAction::Gas {
            pressure: Some(1.0),
            volume: None,
            moles: None,
            temperature: Some(273.15),
            r_unit: GasUnitArg::LAtm,
        })
        .unwrap_err();
        assert!(err.to_string().contains("exactly 3"));
    }

    #[test]
    fn test_ph_output() {
        let out = render(ChemAction::Ph {
            h_concentration: None,
            ph: Some(3.0),
            poh: None,
            oh_concentration: None,
        })
        .unwrap();
        assert!(out.contains("pOH:   11.00"));
        assert!(out.contains("Solution is Acidic"));
    }

    #[test]
    fn test_convert_to_particles() {
        let out = render(ChemAction::Convert {
            value: 1.0,
            from: "mol".into(),
            to: "particles".into(),
            molar_mass: None,
        })
        .unwrap();
        assert!(out.contains("1.0000 mol = 6.0220e23 particles"));
    }
}
