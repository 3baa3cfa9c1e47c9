//! Chemistry calculations over a static periodic table.

pub mod calculators;
pub mod formula;
pub mod table;

pub use calculators::{
    dilution, element_info, ideal_gas_law, mole_conversion, molarity, ph, AmountUnit, GasConstant,
    PhResult,
};
pub use formula::{mass_breakdown, molar_mass, parse_formula, Composition};
