use crate::domain::model::{Element, Phase};
use std::collections::HashMap;
use std::sync::OnceLock;

use Phase::{Gas, Liquid, Solid};

const fn el(
    symbol: &'static str,
    number: u32,
    weight: f64,
    name: &'static str,
    group: u32,
    phase: Phase,
) -> Element {
    Element {
        symbol,
        number,
        weight,
        name,
        group,
        phase,
    }
}

/// Ordered by atomic number.
pub static ELEMENTS: [Element; 118] = [
    el("H", 1, 1.008, "Hydrogen", 1, Gas),
    el("He", 2, 4.003, "Helium", 18, Gas),
    el("Li", 3, 6.941, "Lithium", 1, Solid),
    el("Be", 4, 9.012, "Beryllium", 2, Solid),
    el("B", 5, 10.811, "Boron", 13, Solid),
    el("C", 6, 12.011, "Carbon", 14, Solid),
    el("N", 7, 14.007, "Nitrogen", 15, Gas),
    el("O", 8, 15.999, "Oxygen", 16, Gas),
    el("F", 9, 18.998, "Fluorine", 17, Gas),
    el("Ne", 10, 20.180, "Neon", 18, Gas),
    el("Na", 11, 22.990, "Sodium", 1, Solid),
    el("Mg", 12, 24.305, "Magnesium", 2, Solid),
    el("Al", 13, 26.982, "Aluminum", 13, Solid),
    el("Si", 14, 28.086, "Silicon", 14, Solid),
    el("P", 15, 30.974, "Phosphorus", 15, Solid),
    el("S", 16, 32.065, "Sulfur", 16, Solid),
    el("Cl", 17, 35.453, "Chlorine", 17, Gas),
    el("Ar", 18, 39.948, "Argon", 18, Gas),
    el("K", 19, 39.098, "Potassium", 1, Solid),
    el("Ca", 20, 40.078, "Calcium", 2, Solid),
    el("Sc", 21, 44.956, "Scandium", 3, Solid),
    el("Ti", 22, 47.867, "Titanium", 4, Solid),
    el("V", 23, 50.942, "Vanadium", 5, Solid),
    el("Cr", 24, 51.996, "Chromium", 6, Solid),
    el("Mn", 25, 54.938, "Manganese", 7, Solid),
    el("Fe", 26, 55.845, "Iron", 8, Solid),
    el("Co", 27, 58.933, "Cobalt", 9, Solid),
    el("Ni", 28, 58.693, "Nickel", 10, Solid),
    el("Cu", 29, 63.546, "Copper", 11, Solid),
    el("Zn", 30, 65.380, "Zinc", 12, Solid),
    el("Ga", 31, 69.723, "Gallium", 13, Solid),
    el("Ge", 32, 72.640, "Germanium", 14, Solid),
    el("As", 33, 74.922, "Arsenic", 15, Solid),
    el("Se", 34, 78.960, "Selenium", 16, Solid),
    el("Br", 35, 79.904, "Bromine", 17, Liquid),
    el("Kr", 36, 83.798, "Krypton", 18, Gas),
    el("Rb", 37, 85.468, "Rubidium", 1, Solid),
    el("Sr", 38, 87.620, "Strontium", 2, Solid),
    el("Y", 39, 88.906, "Yttrium", 3, Solid),
    el("Zr", 40, 91.224, "Zirconium", 4, Solid),
    el("Nb", 41, 92.906, "Niobium", 5, Solid),
    el("Mo", 42, 95.960, "Molybdenum", 6, Solid),
    el("Tc", 43, 98.000, "Technetium", 7, Solid),
    el("Ru", 44, 101.070, "Ruthenium", 8, Solid),
    el("Rh", 45, 102.906, "Rhodium", 9, Solid),
    el("Pd", 46, 106.420, "Palladium", 10, Solid),
    el("Ag", 47, 107.868, "Silver", 11, Solid),
    el("Cd", 48, 112.411, "Cadmium", 12, Solid),
    el("In", 49, 114.818, "Indium", 13, Solid),
    el("Sn", 50, 118.710, "Tin", 14, Solid),
    el("Sb", 51, 121.760, "Antimony", 15, Solid),
    el("Te", 52, 127.600, "Tellurium", 16, Solid),
    el("I", 53, 126.904, "Iodine", 17, Solid),
    el("Xe", 54, 131.293, "Xenon", 18, Gas),
    el("Cs", 55, 132.905, "Cesium", 1, Solid),
    el("Ba", 56, 137.327, "Barium", 2, Solid),
    el("La", 57, 138.905, "Lanthanum", 3, Solid),
    el("Ce", 58, 140.116, "Cerium", 3, Solid),
    el("Pr", 59, 140.908, "Praseodymium", 3, Solid),
    el("Nd", 60, 144.242, "Neodymium", 3, Solid),
    el("Pm", 61, 145.000, "Promethium", 3, Solid),
    el("Sm", 62, 150.360, "Samarium", 3, Solid),
    el("Eu", 63, 151.964, "Europium", 3, Solid),
    el("Gd", 64, 157.250, "Gadolinium", 3, Solid),
    el("Tb", 65, 158.925, "Terbium", 3, Solid),
    el("Dy", 66, 162.500, "Dysprosium", 3, Solid),
    el("Ho", 67, 164.930, "Holmium", 3, Solid),
    el("Er", 68, 167.259, "Erbium", 3, Solid),
    el("Tm", 69, 168.934, "Thulium", 3, Solid),
    el("Yb", 70, 173.054, "Ytterbium", 3, Solid),
    el("Lu", 71, 174.967, "Lutetium", 3, Solid),
    el("Hf", 72, 178.490, "Hafnium", 4, Solid),
    el("Ta", 73, 180.948, "Tantalum", 5, Solid),
    el("W", 74, 183.840, "Tungsten", 6, Solid),
    el("Re", 75, 186.207, "Rhenium", 7, Solid),
    el("Os", 76, 190.230, "Osmium", 8, Solid),
    el("Ir", 77, 192.217, "Iridium", 9, Solid),
    el("Pt", 78, 195.084, "Platinum", 10, Solid),
    el("Au", 79, 196.967, "Gold", 11, Solid),
    el("Hg", 80, 200.590, "Mercury", 12, Liquid),
    el("Tl", 81, 204.383, "Thallium", 13, Solid),
    el("Pb", 82, 207.200, "Lead", 14, Solid),
    el("Bi", 83, 208.980, "Bismuth", 15, Solid),
    el("Po", 84, 209.000, "Polonium", 16, Solid),
    el("At", 85, 210.000, "Astatine", 17, Solid),
    el("Rn", 86, 222.000, "Radon", 18, Gas),
    el("Fr", 87, 223.000, "Francium", 1, Solid),
    el("Ra", 88, 226.000, "Radium", 2, Solid),
    el("Ac", 89, 227.000, "Actinium", 3, Solid),
    el("Th", 90, 232.038, "Thorium", 3, Solid),
    el("Pa", 91, 231.036, "Protactinium", 3, Solid),
    el("U", 92, 238.029, "Uranium", 3, Solid),
    el("Np", 93, 237.000, "Neptunium", 3, Solid),
    el("Pu", 94, 244.000, "Plutonium", 3, Solid),
    el("Am", 95, 243.000, "Americium", 3, Solid),
    el("Cm", 96, 247.000, "Curium", 3, Solid),
    el("Bk", 97, 247.000, "Berkelium", 3, Solid),
    el("Cf", 98, 251.000, "Californium", 3, Solid),
    el("Es", 99, 252.000, "Einsteinium", 3, Solid),
    el("Fm", 100, 257.000, "Fermium", 3, Solid),
    el("Md", 101, 258.000, "Mendelevium", 3, Solid),
    el("No", 102, 259.000, "Nobelium", 3, Solid),
    el("Lr", 103, 262.000, "Lawrencium", 3, Solid),
    el("Rf", 104, 267.000, "Rutherfordium", 4, Solid),
    el("Db", 105, 268.000, "Dubnium", 5, Solid),
    el("Sg", 106, 271.000, "Seaborgium", 6, Solid),
    el("Bh", 107, 272.000, "Bohrium", 7, Solid),
    el("Hs", 108, 270.000, "Hassium", 8, Solid),
    el("Mt", 109, 276.000, "Meitnerium", 9, Solid),
    el("Ds", 110, 281.000, "Darmstadtium", 10, Solid),
    el("Rg", 111, 280.000, "Roentgenium", 11, Solid),
    el("Cn", 112, 285.000, "Copernicium", 12, Solid),
    el("Nh", 113, 284.000, "Nihonium", 13, Solid),
    el("Fl", 114, 289.000, "Flerovium", 14, Solid),
    el("Mc", 115, 288.000, "Moscovium", 15, Solid),
    el("Lv", 116, 293.000, "Livermorium", 16, Solid),
    el("Ts", 117, 294.000, "Tennessine", 17, Solid),
    el("Og", 118, 294.000, "Oganesson", 18, Solid),
];

fn by_symbol() -> &'static HashMap<&'static str, &'static Element> {
    static INDEX: OnceLock<HashMap<&'static str, &'static Element>> = OnceLock::new();
    INDEX.get_or_init(|| ELEMENTS.iter().map(|e| (e.symbol, e)).collect())
}

pub fn lookup_symbol(symbol: &str) -> Option<&'static Element> {
    by_symbol().get(symbol).copied()
}

pub fn lookup_number(number: u32) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.number == number)
}

pub fn lookup_name(name: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_ordered_by_number() {
        for (i, element) in ELEMENTS.iter().enumerate() {
            assert_eq!(element.number as usize, i + 1);
        }
    }

    #[test]
    fn test_lookups() {
        assert_eq!(lookup_symbol("Na").unwrap().name, "Sodium");
        assert!(lookup_symbol("NA").is_none());
        assert_eq!(lookup_number(6).unwrap().symbol, "C");
        assert_eq!(lookup_name("oxygen").unwrap().symbol, "O");
        assert_eq!(lookup_symbol("Hg").unwrap().phase, Liquid);
        assert_eq!(lookup_symbol("He").unwrap().phase, Gas);
        assert_eq!(lookup_symbol("Fe").unwrap().phase, Solid);
    }
}
