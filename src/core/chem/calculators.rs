use super::table::{lookup_name, lookup_number, lookup_symbol};
use crate::domain::model::Element;
use crate::utils::error::{Result, ToolError};

pub const AVOGADRO: f64 = 6.022e23;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GasConstant {
    #[default]
    LiterAtm,
    Joule,
    LiterKpa,
    Calorie,
}

impl GasConstant {
    pub fn value(&self) -> f64 {
        match self {
            GasConstant::LiterAtm => 0.08206,
            GasConstant::Joule => 8.314,
            GasConstant::LiterKpa => 8.314,
            GasConstant::Calorie => 1.987,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            GasConstant::LiterAtm => "L·atm/(mol·K)",
            GasConstant::Joule => "J/(mol·K)",
            GasConstant::LiterKpa => "L·kPa/(mol·K)",
            GasConstant::Calorie => "cal/(mol·K)",
        }
    }
}

/// Symbol first, then atomic number, then case-insensitive name.
pub fn element_info(query: &str) -> Option<&'static Element> {
    let query = query.trim();
    if let Some(e) = lookup_symbol(query) {
        return Some(e);
    }
    if !query.is_empty() && query.chars().all(|c| c.is_ascii_digit()) {
        if let Some(e) = query.parse().ok().and_then(lookup_number) {
            return Some(e);
        }
    }
    lookup_name(query)
}

fn non_zero(name: &str, value: f64) -> Result<f64> {
    if value == 0.0 {
        return Err(ToolError::validation(format!("{} cannot be zero", name)));
    }
    Ok(value)
}

fn exactly_missing<const N: usize>(values: [Option<f64>; N], wanted_known: usize, hint: &str) -> Result<usize> {
    let known = values.iter().filter(|v| v.is_some()).count();
    if known != wanted_known {
        return Err(ToolError::validation(hint.to_string()));
    }
    Ok(values.iter().position(|v| v.is_none()).unwrap_or(0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasVariable {
    Pressure,
    Volume,
    Moles,
    Temperature,
}

impl GasVariable {
    pub fn label(&self) -> &'static str {
        match self {
            GasVariable::Pressure => "Pressure (P)",
            GasVariable::Volume => "Volume (V)",
            GasVariable::Moles => "Moles (n)",
            GasVariable::Temperature => "Temperature (T)",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            GasVariable::Pressure => "atm",
            GasVariable::Volume => "L",
            GasVariable::Moles => "mol",
            GasVariable::Temperature => "K",
        }
    }
}

/// PV = nRT; exactly one of the four must be `None`.
pub fn ideal_gas_law(
    pressure: Option<f64>,
    volume: Option<f64>,
    moles: Option<f64>,
    temperature: Option<f64>,
    r: GasConstant,
) -> Result<(GasVariable, f64)> {
    let missing = exactly_missing(
        [pressure, volume, moles, temperature],
        3,
        "Provide exactly 3 variables to solve for the 4th",
    )?;
    let r = r.value();
    let (p, v, n, t) = (
        pressure.unwrap_or_default(),
        volume.unwrap_or_default(),
        moles.unwrap_or_default(),
        temperature.unwrap_or_default(),
    );
    Ok(match missing {
        0 => (GasVariable::Pressure, n * r * t / non_zero("Volume", v)?),
        1 => (GasVariable::Volume, n * r * t / non_zero("Pressure", p)?),
        2 => (GasVariable::Moles, p * v / non_zero("Temperature", r * t)?),
        _ => (GasVariable::Temperature, p * v / non_zero("Moles", n * r)?),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DilutionVariable {
    InitialConcentration,
    InitialVolume,
    FinalConcentration,
    FinalVolume,
}

impl DilutionVariable {
    pub fn label(&self) -> &'static str {
        match self {
            DilutionVariable::InitialConcentration => "Initial Concentration (C1)",
            DilutionVariable::InitialVolume => "Initial Volume (V1)",
            DilutionVariable::FinalConcentration => "Final Concentration (C2)",
            DilutionVariable::FinalVolume => "Final Volume (V2)",
        }
    }
}

/// C1V1 = C2V2; exactly one of the four must be `None`.
pub fn dilution(
    c1: Option<f64>,
    v1: Option<f64>,
    c2: Option<f64>,
    v2: Option<f64>,
) -> Result<(DilutionVariable, f64)> {
    let missing = exactly_missing(
        [c1, v1, c2, v2],
        3,
        "Provide exactly 3 variables to solve for the 4th",
    )?;
    let (c1, v1, c2, v2) = (
        c1.unwrap_or_default(),
        v1.unwrap_or_default(),
        c2.unwrap_or_default(),
        v2.unwrap_or_default(),
    );
    Ok(match missing {
        0 => (DilutionVariable::InitialConcentration, c2 * v2 / non_zero("V1", v1)?),
        1 => (DilutionVariable::InitialVolume, c2 * v2 / non_zero("C1", c1)?),
        2 => (DilutionVariable::FinalConcentration, c1 * v1 / non_zero("V2", v2)?),
        _ => (DilutionVariable::FinalVolume, c1 * v1 / non_zero("C2", c2)?),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MolarityVariable {
    Molarity,
    Moles,
    Volume,
}

impl MolarityVariable {
    pub fn label(&self) -> &'static str {
        match self {
            MolarityVariable::Molarity => "Molarity",
            MolarityVariable::Moles => "Moles",
            MolarityVariable::Volume => "Volume",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MolarityVariable::Molarity => "M",
            MolarityVariable::Moles => "mol",
            MolarityVariable::Volume => "L",
        }
    }
}

/// M = mol/L. Moles may instead be derived from `mass_g` and `molar_mass`.
pub fn molarity(
    moles: Option<f64>,
    volume_l: Option<f64>,
    molarity: Option<f64>,
    mass_g: Option<f64>,
    molar_mass: Option<f64>,
) -> Result<(MolarityVariable, f64)> {
    let moles = match (mass_g, molar_mass) {
        (Some(mass), Some(mm)) => Some(mass / non_zero("Molar mass", mm)?),
        _ => moles,
    };
    let missing = exactly_missing(
        [molarity, moles, volume_l],
        2,
        "Provide exactly 2 of: moles, volume, molarity",
    )?;
    let (m, n, v) = (
        molarity.unwrap_or_default(),
        moles.unwrap_or_default(),
        volume_l.unwrap_or_default(),
    );
    Ok(match missing {
        0 => (MolarityVariable::Molarity, n / non_zero("Volume", v)?),
        1 => (MolarityVariable::Moles, m * v),
        _ => (MolarityVariable::Volume, n / non_zero("Molarity", m)?),
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhResult {
    pub ph: f64,
    pub poh: f64,
    pub h_concentration: f64,
    pub oh_concentration: f64,
}

impl PhResult {
    pub fn solution_type(&self) -> &'static str {
        if self.ph < 7.0 {
            "Acidic"
        } else if self.ph > 7.0 {
            "Basic"
        } else {
            "Neutral"
        }
    }
}

fn positive_log10(name: &str, value: f64) -> Result<f64> {
    if value <= 0.0 {
        return Err(ToolError::validation(format!("{} must be greater than 0", name)));
    }
    Ok(value.log10())
}

/// Derives all four quantities from whichever one is given, in the order [H+], pH, pOH, [OH-].
pub fn ph(
    h_concentration: Option<f64>,
    ph: Option<f64>,
    poh: Option<f64>,
    oh_concentration: Option<f64>,
) -> Result<PhResult> {
    let ph = if let Some(h) = h_concentration {
        -positive_log10("[H+]", h)?
    } else if let Some(ph) = ph {
        ph
    } else if let Some(poh) = poh {
        14.0 - poh
    } else if let Some(oh) = oh_concentration {
        14.0 + positive_log10("[OH-]", oh)?
    } else {
        return Err(ToolError::validation(
            "Provide one of: H_concentration, pH, pOH, OH_concentration",
        ));
    };
    let poh = 14.0 - ph;
    Ok(PhResult {
        ph,
        poh,
        h_concentration: 10f64.powf(-ph),
        oh_concentration: 10f64.powf(-poh),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountUnit {
    Mol,
    Gram,
    Particles,
}

impl AmountUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            AmountUnit::Mol => "mol",
            AmountUnit::Gram => "g",
            AmountUnit::Particles => "particles",
        }
    }
}

impl std::str::FromStr for AmountUnit {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mol" => Ok(AmountUnit::Mol),
            "g" => Ok(AmountUnit::Gram),
            "particles" => Ok(AmountUnit::Particles),
            other => Err(ToolError::validation(format!("Unknown unit: {}", other))),
        }
    }
}

pub fn mole_conversion(value: f64, from: AmountUnit, to: AmountUnit, molar_mass: Option<f64>) -> Result<f64> {
    let required_mass = || {
        molar_mass.ok_or_else(|| ToolError::validation("Molar mass required for gram conversions"))
    };
    let moles = match from {
        AmountUnit::Mol => value,
        AmountUnit::Gram => value / non_zero("Molar mass", required_mass()?)?,
        AmountUnit::Particles => value / AVOGADRO,
    };
    Ok(match to {
        AmountUnit::Mol => moles,
        AmountUnit::Gram => moles * required_mass()?,
        AmountUnit::Particles => moles * AVOGADRO,
    })
}

pub const BALANCE_GUIDE: &str = "
Equation balancing is a manual process, but here's the approach:

1. Write the unbalanced equation
2. Count atoms of each element on both sides
3. Adjust coefficients (not subscripts) to balance
4. Start with the most complex molecule
5. Balance elements that appear in only one reactant and product first
6. Balance hydrogen and oxygen last

Example:
Unbalanced: C3H8 + O2 → CO2 + H2O
Balanced: C3H8 + 5O2 → 3CO2 + 4H2O

Verification:
  C: 3 = 3 ✓
  H: 8 = 8 ✓
  O: 10 = 10 ✓
";

pub const PERIODIC_TABLE_ART: &str = "
PERIODIC TABLE OF ELEMENTS
═══════════════════════════════════════════════════════════════════════════

  1    2    3    4    5    6    7    8    9   10   11   12   13   14   15   16   17   18
| H |                                                                                  |He |
|Li |Be |                                                       | B | C | N | O | F |Ne |
|Na |Mg |                                                       |Al |Si | P | S |Cl |Ar |
| K |Ca |Sc |Ti | V |Cr |Mn |Fe |Co |Ni |Cu |Zn |               |Ga |Ge |As |Se |Br |Kr |
|Rb |Sr | Y |Zr |Nb |Mo |Tc |Ru |Rh |Pd |Ag |Cd |               |In |Sn |Sb |Te | I |Xe |
|Cs |Ba |La*|Hf |Ta | W |Re |Os |Ir |Pt |Au |Hg |               |Tl |Pb |Bi |Po |At |Rn |
|Fr |Ra |Ac°|Rf |Db |Sg |Bh |Hs |Mt |Ds |Rg |Cn |               |Nh |Fl |Mc |Lv |Ts |Og |

      * Lanthanides:  La Ce Pr Nd Pm Sm Eu Gd Tb Dy Ho Er Tm Yb Lu
      ° Actinides:    Ac Th Pa U  Np Pu Am Cm Bk Cf Es Fm Md No Lr

Use 'toolshed chem element <symbol/name/number>' for detailed information.
";
