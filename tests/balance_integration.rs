//! Integration tests for complete balances of the built-in municipalities.

mod common;

use climate_balance::errors::{BalanceError, Table};
use climate_balance::refdata::RefData;
use climate_balance::compare::compare;
use climate_balance::{Balance, Value, calculate};

#[test]
fn every_builtin_municipality_balances() {
    for ags in [common::NATIONAL, common::CITY, common::RURAL] {
        for year in [2023, 2035, 2050] {
            let b = common::balance(ags, year);
            assert_eq!(b.ags, ags);
            assert_eq!(b.year, year);
            for (path, value) in b.paths() {
                if let Value::Number(v) = value {
                    assert!(v.is_finite(), "{ags}/{year}: {path} is {v}");
                }
            }
        }
    }
}

/// Aggregate records and the records they are summed from, per snapshot.
const ROLLUPS: &[(&str, &str, &[&str])] = &[
    ("r18", "s", &["s_fueloil", "s_lpg", "s_biomass", "s_coal", "s_petrol", "s_heatnet", "s_solarth", "s_heatpump", "s_gas", "s_elec_heating", "s_elec"]),
    ("r18", "p", &["s"]),
    ("r18", "r", &["p"]),
    ("b18", "s", &["s_fueloil", "s_lpg", "s_biomass", "s_coal", "s_petrol", "s_diesel", "s_heatnet", "s_solarth", "s_heatpump", "s_gas", "s_elec_heating", "s_elec"]),
    ("b18", "p", &["s"]),
    ("b18", "b", &["p"]),
    ("i18", "p_miner", &["p_miner_cement", "p_miner_chalk", "p_miner_glas", "p_miner_ceram"]),
    ("i18", "p_chem", &["p_chem_basic", "p_chem_ammonia", "p_chem_other"]),
    ("i18", "p_metal_steel", &["p_metal_steel_primary", "p_metal_steel_secondary"]),
    ("i18", "p_metal", &["p_metal_steel", "p_metal_nonfe"]),
    ("i18", "p_other", &["p_other_paper", "p_other_food", "p_other_further", "p_other_2efgh"]),
    ("i18", "p", &["p_miner", "p_chem", "p_metal", "p_other"]),
    ("i18", "i", &["p"]),
    ("i18", "s_fossil", &["s_fossil_gas", "s_fossil_coal", "s_fossil_diesel", "s_fossil_fueloil", "s_fossil_lpg", "s_fossil_opetpro", "s_fossil_ofossil"]),
    ("i18", "s_renew", &["s_renew_biomass", "s_renew_heatnet", "s_renew_heatpump", "s_renew_solarth", "s_renew_elec"]),
    ("i18", "s", &["s_fossil", "s_renew"]),
    ("t18", "s", &["s_petrol", "s_jetfuel", "s_diesel", "s_lpg", "s_gas", "s_biogas", "s_bioethanol", "s_biodiesel", "s_elec"]),
    ("t18", "t", &["road", "rail", "ship", "air"]),
    ("a18", "p_fermen", &["p_fermen_dairycow", "p_fermen_nondairy", "p_fermen_pig", "p_fermen_poultry", "p_fermen_oanimal"]),
    ("a18", "p_manure", &["p_manure_dairycow", "p_manure_nondairy", "p_manure_pig", "p_manure_poultry", "p_manure_oanimal"]),
    ("a18", "p_soil", &["p_soil_fertilizer", "p_soil_manure", "p_soil_grazing", "p_soil_residue", "p_soil_orgfarm"]),
    ("a18", "p_other", &["p_other_liming", "p_other_kas"]),
    ("a18", "s", &["s_petrol", "s_diesel", "s_fueloil", "s_lpg", "s_gas", "s_biomass", "s_elec", "s_heatpump"]),
    ("a18", "p_operation", &["p_operation_heat", "p_operation_elec_elcon", "p_operation_elec_heatpump", "p_operation_vehicles"]),
    ("a18", "p", &["p_fermen", "p_manure", "p_soil", "p_other", "p_operation"]),
    ("a18", "a", &["p"]),
    ("l18", "g", &["g_forest", "g_crop", "g_grass", "g_grove", "g_wet", "g_water", "g_settlement", "g_other", "g_wood"]),
    ("l18", "l", &["g"]),
    ("h18", "p_heatnet", &["p_heatnet_cogen", "p_heatnet_plant", "p_heatnet_geoth", "p_heatnet_lheatpump"]),
    ("h18", "p_orenew", &["p_solarth", "p_heatpump"]),
    ("h18", "p", &["p_gas", "p_lpg", "p_fueloil", "p_opetpro", "p_coal", "p_heatnet", "p_biomass", "p_ofossil", "p_orenew"]),
    ("h18", "h", &["p"]),
    ("h18", "d", &["d_r", "d_b", "d_i", "d_t", "d_a"]),
    ("f18", "p", &["p_petrol", "p_jetfuel", "p_diesel", "p_bioethanol", "p_biodiesel", "p_biogas", "p_emethan", "p_hydrogen", "p_hydrogen_reconv"]),
    ("f18", "f", &["p"]),
    ("f18", "d", &["d_r", "d_b", "d_i", "d_t", "d_a"]),
    ("e18", "d", &["d_r", "d_b", "d_i", "d_t", "d_a", "d_h", "d_f_wo_hydrogen", "d_f_hydrogen_reconv"]),
    ("e18", "p_renew_pv", &["p_renew_pv_roof", "p_renew_pv_facade", "p_renew_pv_park", "p_renew_pv_agri"]),
    ("e18", "p_renew_wind", &["p_renew_wind_onshore", "p_renew_wind_offshore"]),
    ("e18", "p_renew", &["p_renew_pv", "p_renew_wind", "p_renew_biomass", "p_renew_geoth", "p_renew_hydro"]),
    ("e18", "p_fossil", &["p_fossil_nuclear", "p_fossil_coal_brown", "p_fossil_coal_black", "p_fossil_gas", "p_fossil_ofossil"]),
    ("e18", "p_fossil_and_renew", &["p_fossil", "p_renew"]),
    ("e18", "p_local_pv", &["p_local_pv_roof", "p_local_pv_facade", "p_local_pv_park", "p_local_pv_agri"]),
    ("e18", "p_local", &["p_local_pv", "p_local_wind_onshore", "p_local_biomass", "p_local_hydro"]),
    ("e18", "p", &["p_fossil_and_renew", "p_local"]),
    ("e18", "e", &["p"]),
    ("r30", "s", &["s_fueloil", "s_lpg", "s_biomass", "s_coal", "s_petrol", "s_heatnet", "s_solarth", "s_heatpump", "s_gas", "s_emethan", "s_elec_heating", "s_elec"]),
    ("r30", "p", &["s", "p_buildings_total", "p_elec_heatpump"]),
    ("r30", "r", &["p"]),
    ("b30", "s", &["s_fueloil", "s_lpg", "s_biomass", "s_coal", "s_petrol", "s_diesel", "s_ediesel", "s_heatnet", "s_solarth", "s_heatpump", "s_gas", "s_emethan", "s_elec_heating", "s_elec"]),
    ("b30", "p", &["s", "p_nonresi", "p_elec_heatpump"]),
    ("b30", "b", &["p"]),
    ("i30", "p_miner", &["p_miner_cement", "p_miner_chalk", "p_miner_glas", "p_miner_ceram"]),
    ("i30", "p_chem", &["p_chem_basic", "p_chem_ammonia", "p_chem_other"]),
    ("i30", "p_metal_steel", &["p_metal_steel_primary", "p_metal_steel_secondary"]),
    ("i30", "p_metal", &["p_metal_steel", "p_metal_nonfe"]),
    ("i30", "p_other", &["p_other_paper", "p_other_food", "p_other_further", "p_other_2efgh"]),
    ("i30", "p", &["p_miner", "p_chem", "p_metal", "p_other"]),
    ("i30", "g", &["g_consult"]),
    ("i30", "i", &["g", "p"]),
    ("i30", "s_fossil", &["s_fossil_gas", "s_fossil_coal", "s_fossil_diesel", "s_fossil_fueloil", "s_fossil_lpg", "s_fossil_opetpro", "s_fossil_ofossil"]),
    ("i30", "s_renew", &["s_renew_hydrogen", "s_renew_emethan", "s_renew_biomass", "s_renew_heatnet", "s_renew_heatpump", "s_renew_solarth", "s_renew_elec"]),
    ("i30", "s", &["s_fossil", "s_renew"]),
    ("t30", "g", &["g_charging", "g_rail"]),
    ("t30", "s", &["s_petrol", "s_jetfuel", "s_diesel", "s_lpg", "s_gas", "s_biogas", "s_bioethanol", "s_biodiesel", "s_elec", "s_hydrogen", "s_epetrol", "s_ediesel", "s_ejetfuel"]),
    ("t30", "t", &["road", "rail", "ship", "air", "g"]),
    ("a30", "p_fermen", &["p_fermen_dairycow", "p_fermen_nondairy", "p_fermen_pig", "p_fermen_poultry", "p_fermen_oanimal"]),
    ("a30", "p_manure", &["p_manure_dairycow", "p_manure_nondairy", "p_manure_pig", "p_manure_poultry", "p_manure_oanimal"]),
    ("a30", "p_soil", &["p_soil_fertilizer", "p_soil_manure", "p_soil_grazing", "p_soil_residue", "p_soil_orgfarm"]),
    ("a30", "p_other", &["p_other_liming", "p_other_kas"]),
    ("a30", "p_operation", &["p_operation_heat", "p_operation_elec_elcon", "p_operation_elec_heatpump", "p_operation_vehicles"]),
    ("a30", "s", &["s_petrol", "s_diesel", "s_fueloil", "s_lpg", "s_gas", "s_biomass", "s_elec", "s_heatpump", "s_epetrol", "s_ediesel"]),
    ("a30", "p", &["p_fermen", "p_manure", "p_soil", "p_other", "p_operation"]),
    ("a30", "a", &["p"]),
    ("l30", "g", &["g_forest", "g_crop", "g_grass", "g_grove", "g_wet", "g_water", "g_settlement", "g_other", "g_wood"]),
    ("l30", "l", &["g"]),
    ("h30", "p_heatnet", &["p_heatnet_cogen", "p_heatnet_plant", "p_heatnet_lheatpump", "p_heatnet_geoth"]),
    ("h30", "p_orenew", &["p_solarth", "p_heatpump"]),
    ("h30", "p", &["p_gas", "p_lpg", "p_fueloil", "p_opetpro", "p_coal", "p_heatnet", "p_biomass", "p_ofossil", "p_orenew"]),
    ("h30", "g", &["g_storage", "g_planning"]),
    ("h30", "h", &["p", "g"]),
    ("h30", "d", &["d_r", "d_b", "d_i", "d_t", "d_a"]),
    ("f30", "p_efuels", &["p_petrol", "p_jetfuel", "p_diesel"]),
    ("f30", "p_hydrogen_total", &["p_hydrogen", "p_hydrogen_reconv"]),
    ("f30", "p", &["p_efuels", "p_bioethanol", "p_biodiesel", "p_biogas", "p_emethan", "p_hydrogen", "p_hydrogen_reconv"]),
    ("f30", "f", &["p"]),
    ("f30", "d", &["d_r", "d_b", "d_i", "d_t", "d_a", "d_e_hydrogen_reconv"]),
    ("e30", "d", &["d_r", "d_b", "d_i", "d_t", "d_a", "d_h", "d_f_wo_hydrogen", "d_f_hydrogen_reconv"]),
    ("e30", "p_fossil", &["p_fossil_nuclear", "p_fossil_coal_brown", "p_fossil_coal_black", "p_fossil_gas", "p_fossil_ofossil"]),
    ("e30", "p_renew_pv", &["p_renew_pv_roof", "p_renew_pv_facade", "p_renew_pv_park", "p_renew_pv_agri"]),
    ("e30", "p_renew_wind", &["p_renew_wind_onshore", "p_renew_wind_offshore"]),
    ("e30", "p_renew", &["p_renew_pv", "p_renew_wind", "p_renew_biomass", "p_renew_geoth", "p_renew_hydro", "p_renew_reverse"]),
    ("e30", "p_fossil_and_renew", &["p_fossil", "p_renew"]),
    ("e30", "p_local_pv", &["p_local_pv_roof", "p_local_pv_facade", "p_local_pv_park", "p_local_pv_agri"]),
    ("e30", "p_local", &["p_local_pv", "p_local_wind_onshore", "p_local_biomass", "p_local_hydro"]),
    ("e30", "p", &["p_fossil_and_renew", "p_local"]),
    ("e30", "g", &["g_grid_offshore", "g_grid_onshore", "g_grid_pv"]),
    ("e30", "e", &["p", "g"]),
];

/// Additive fields checked wherever the aggregate and all its children
/// report them.
const SUMMED: &[&str] = &["energy", "CO2e_total", "invest"];

fn number(b: &Balance, path: &str) -> Option<f64> {
    match b.get(path) {
        Some(Value::Number(v)) => Some(v),
        _ => None,
    }
}

#[test]
fn every_aggregate_is_the_sum_of_its_children() {
    for ags in [common::NATIONAL, common::CITY] {
        let b = common::balance(ags, 2035);
        let mut checked = 0;
        for (snapshot, parent, children) in ROLLUPS {
            for name in children.iter().chain([parent]) {
                assert!(b.record(&format!("{snapshot}.{name}")).is_some(), "{snapshot}.{name}");
            }
            for field in SUMMED {
                let values: Option<Vec<f64>> = children
                    .iter()
                    .map(|child| number(&b, &format!("{snapshot}.{child}.{field}")))
                    .collect();
                let path = format!("{snapshot}.{parent}.{field}");
                let (Some(values), Some(actual)) = (values, number(&b, &path)) else {
                    continue;
                };
                let scale = values.iter().map(|v| v.abs()).sum::<f64>().max(1.0);
                let expected: f64 = values.iter().sum();
                assert!(
                    (actual - expected).abs() <= 1e-9 * scale,
                    "{ags}: {path} is {actual}, children sum to {expected}"
                );
                checked += 1;
            }
        }
        assert!(checked > ROLLUPS.len(), "{ags}: only {checked} sums checked");
    }
}

#[test]
fn national_agriculture_matches_the_hand_computed_reference() {
    let b = common::balance(common::NATIONAL, 2035);
    let reference: serde_json::Value =
        serde_json::from_str(&common::fixture("national_2035_agri.json")).expect("fixture should be JSON");

    let cmp = compare(&b, &reference, 1e-9);
    assert!(cmp.differences.is_empty(), "{:#?}", cmp.differences);
    assert!(cmp.missing_in_result.is_empty(), "{:?}", cmp.missing_in_result);
}

#[test]
fn get_resolves_every_listed_path() {
    let b = common::balance(common::CITY, 2040);
    let paths = b.paths();
    assert!(!paths.is_empty());
    for (path, value) in &paths {
        assert_eq!(b.get(path), Some(*value), "{path}");
    }
    assert_eq!(b.get("i30.nope.energy"), None);
    assert_eq!(b.get("x99.i.energy"), None);
}

#[test]
fn target_year_emits_less_than_2018() {
    let b = common::balance(common::NATIONAL, 2035);
    assert!(b.total_co2e_target() < b.total_co2e_2018());
    assert!(b.i30.i.co2e_total < b.i18.i.co2e_total);
    assert!(b.l30.l.co2e_total <= b.l18.l.co2e_total);
    assert_eq!(b.e30.p_fossil.co2e_total, 0.0);
}

#[test]
fn municipality_without_industry_has_neutral_changes() {
    let b = common::balance(common::RURAL, 2035);
    assert_eq!(b.i18.i.energy, 0.0);
    assert_eq!(b.i30.p_miner_cement.prod_volume, 0.0);
    // zero baselines never divide
    assert_eq!(b.i30.p_miner_cement.change_energy_pct, 0.0);
    assert_eq!(b.i30.p_miner.change_energy_pct, 0.0);
}

#[test]
fn later_target_years_change_durations_only() {
    let early = common::balance(common::NATIONAL, 2030);
    let late = common::balance(common::NATIONAL, 2045);
    // 2018 does not depend on the target year
    assert_eq!(early.r18, late.r18);
    assert_eq!(early.e18, late.e18);
    // more years of retrofitting at the same rate
    assert!(late.r30.p_buildings_total.area_m2_rehab > early.r30.p_buildings_total.area_m2_rehab);
    assert!(late.r30.s.energy < early.r30.s.energy);
}

#[test]
fn calculation_is_idempotent() {
    let data = common::builtin();
    let first = calculate(&data, common::CITY, 2035).expect("first run");
    let second = calculate(&data, common::CITY, 2035).expect("second run");
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("serialize first"),
        serde_json::to_string(&second).expect("serialize second"),
    );
}

#[test]
fn electricity_demand_follows_the_sectors() {
    let b = common::balance(common::NATIONAL, 2035);
    let e30 = &b.e30;
    common::assert_close(e30.d_r.energy, b.r30.p.demand_electricity, "e30.d_r");
    common::assert_close(e30.d_h.energy, b.h30.p.demand_electricity, "e30.d_h");
    common::assert_close(
        e30.d.energy,
        [
            &e30.d_r,
            &e30.d_b,
            &e30.d_i,
            &e30.d_t,
            &e30.d_a,
            &e30.d_h,
            &e30.d_f_wo_hydrogen,
            &e30.d_f_hydrogen_reconv,
        ]
        .iter()
        .map(|r| r.energy)
        .sum(),
        "e30.d",
    );
    assert!(e30.d.energy > b.e18.d.energy);
}

#[test]
fn missing_reference_key_aborts_the_run() {
    let facts: String = common::data_file("facts.csv")
        .lines()
        .filter(|l| !l.starts_with("Fact_L_G_wet_CO2e_per_ha_2018,"))
        .map(|l| format!("{l}\n"))
        .collect();
    let data = RefData::from_csv_strs(
        &facts,
        &common::data_file("assumptions.csv"),
        &common::data_file("municipalities.csv"),
        &common::data_file("entries.csv"),
    )
    .expect("reduced dataset should load");

    let res = calculate(&data, common::NATIONAL, 2035);
    assert!(matches!(
        res,
        Err(BalanceError::UnknownKey { table: Table::Fact, ref key }) if key == "Fact_L_G_wet_CO2e_per_ha_2018"
    ));
}

#[test]
fn data_directory_matches_the_builtin_dataset() {
    let loaded = RefData::load(&common::data_dir()).expect("data directory should load");
    let from_dir = calculate(&loaded, common::RURAL, 2035).expect("run on loaded data");
    assert_eq!(from_dir, common::balance(common::RURAL, 2035));
}
