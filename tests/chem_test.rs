use toolshed::core::chem::{
    dilution, element_info, ideal_gas_law, mole_conversion, molar_mass, parse_formula, ph,
    AmountUnit, Composition, GasConstant,
};

fn comp(pairs: &[(&str, u64)]) -> Composition {
    pairs.iter().map(|(s, c)| (s.to_string(), *c)).collect()
}

#[test]
fn test_formula_groups_expand() {
    assert_eq!(
        parse_formula("Ca(OH)2").unwrap(),
        comp(&[("Ca", 1), ("O", 2), ("H", 2)])
    );
    assert_eq!(
        parse_formula("Fe2(SO4)3").unwrap(),
        comp(&[("Fe", 2), ("S", 3), ("O", 12)])
    );
    assert_eq!(
        parse_formula("K4[Fe(CN)6]").unwrap(),
        comp(&[("K", 4), ("Fe", 1), ("C", 6), ("N", 6)])
    );
}

#[test]
fn test_unknown_symbol_is_error() {
    assert!(parse_formula("Xy2").is_err());
    assert!(molar_mass("Qq").is_err());
}

#[test]
fn test_molar_mass_of_water() {
    assert!((molar_mass("H2O").unwrap() - 18.015).abs() < 1e-9);
}

#[test]
fn test_element_lookup_variants() {
    assert_eq!(element_info("Fe").unwrap().name, "Iron");
    assert_eq!(element_info("26").unwrap().symbol, "Fe");
    assert_eq!(element_info("iron").unwrap().number, 26);
    assert!(element_info("Unobtainium").is_none());
}

#[test]
fn test_calculators() {
    // one mole at 1 atm and 273.15 K
    let (_, v) = ideal_gas_law(Some(1.0), None, Some(1.0), Some(273.15), GasConstant::default()).unwrap();
    assert!((v - 22.414).abs() < 0.01);

    let (_, v2) = dilution(Some(2.0), Some(50.0), Some(0.5), None).unwrap();
    assert!((v2 - 200.0).abs() < 1e-9);

    let result = ph(Some(1e-3), None, None, None).unwrap();
    assert!((result.ph + result.poh - 14.0).abs() < 1e-9);
    assert_eq!(result.solution_type(), "Acidic");

    let grams = mole_conversion(2.0, AmountUnit::Mol, AmountUnit::Gram, Some(18.015)).unwrap();
    assert!((grams - 36.03).abs() < 1e-9);
    assert!(mole_conversion(2.0, AmountUnit::Mol, AmountUnit::Gram, None).is_err());
}
