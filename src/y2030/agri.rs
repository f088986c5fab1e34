//! Agriculture in the target year.
//!
//! Livestock, soil and liming emissions shrink with the assumed changes of
//! herd sizes and emission intensities. Operating energy loses its fossil
//! carriers: heat comes from biomass and heat pumps, vehicles run on
//! synthetic fuels.

use tracing::debug;

use super::{CARRIER, Trade, carrier, rollup_vs};
use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::utils::div;
use crate::y2018::agri::{A18, UNITS};
use crate::y2018::set_shares;

crate::snapshot!(
    /// Agriculture in the target year.
    A30 {
        a,
        p,
        p_fermen,
        p_fermen_dairycow,
        p_fermen_nondairy,
        p_fermen_pig,
        p_fermen_poultry,
        p_fermen_oanimal,
        p_manure,
        p_manure_dairycow,
        p_manure_nondairy,
        p_manure_pig,
        p_manure_poultry,
        p_manure_oanimal,
        p_soil,
        p_soil_fertilizer,
        p_soil_manure,
        p_soil_grazing,
        p_soil_residue,
        p_soil_orgfarm,
        p_other,
        p_other_liming,
        p_other_kas,
        p_operation,
        p_operation_heat,
        p_operation_elec_elcon,
        p_operation_elec_heatpump,
        p_operation_vehicles,
        s,
        s_petrol,
        s_diesel,
        s_fueloil,
        s_lpg,
        s_gas,
        s_biomass,
        s_elec,
        s_heatpump,
        s_epetrol,
        s_ediesel,
    }
);

const HERD: Shape = UNITS.with(Shape::CHANGE);
const LAND: Shape = Shape::EMISSIONS.with(Shape::LAND).with(Shape::CHANGE);
const EMISSIONS: Shape = Shape::EMISSIONS.with(Shape::CHANGE);
const OPERATION: Shape = Shape::BALANCE.with(Shape::DEMAND);
const HEATPUMPS: Shape = OPERATION.with(Shape::INVESTMENT).with(Shape::POWER);
const SECTOR: Shape = OPERATION.with(Shape::INVESTMENT);

/// Counted emitter after the change of its amount and its per-unit factor.
fn units(inputs: &Inputs<'_>, base: &Record, amount_change: f64, factor_change: f64) -> Record {
    let mut r = Record::new(HERD);
    r.amount = base.amount * (1.0 + amount_change);
    r.co2e_production_based_per_t = base.co2e_production_based_per_t * (1.0 + factor_change);
    r.co2e_production_based = r.amount * r.co2e_production_based_per_t;
    r.sum_emissions();
    r.set_co2e_change(base, inputs);
    r
}

/// Soil emitter of unchanged area with a changed per-hectare factor.
fn land(inputs: &Inputs<'_>, base: &Record, factor_change: f64) -> Record {
    let mut r = Record::new(LAND);
    r.area_ha = base.area_ha;
    r.co2e_production_based_per_ha = base.co2e_production_based_per_ha * (1.0 + factor_change);
    r.co2e_production_based = r.area_ha * r.co2e_production_based_per_ha;
    r.sum_emissions();
    r.set_co2e_change(base, inputs);
    r
}

pub fn calc(inputs: &Inputs<'_>, a18: &A18) -> BalanceResult<A30> {
    let manure_factor = inputs.ass("Ass_A_P_manure_ratio_CO2e_to_amount_change")?;
    let herd = |fermen: &Record, manure: &Record, key: &str| -> BalanceResult<(Record, Record)> {
        let change = inputs.ass(key)?;
        Ok((
            units(inputs, fermen, change, 0.0),
            units(inputs, manure, change, manure_factor),
        ))
    };
    let (p_fermen_dairycow, p_manure_dairycow) = herd(
        &a18.p_fermen_dairycow,
        &a18.p_manure_dairycow,
        "Ass_A_P_dairycow_amount_change",
    )?;
    let (p_fermen_nondairy, p_manure_nondairy) = herd(
        &a18.p_fermen_nondairy,
        &a18.p_manure_nondairy,
        "Ass_A_P_nondairy_amount_change",
    )?;
    let (p_fermen_pig, p_manure_pig) =
        herd(&a18.p_fermen_pig, &a18.p_manure_pig, "Ass_A_P_pig_amount_change")?;
    let (p_fermen_poultry, p_manure_poultry) = herd(
        &a18.p_fermen_poultry,
        &a18.p_manure_poultry,
        "Ass_A_P_poultry_amount_change",
    )?;
    let (p_fermen_oanimal, p_manure_oanimal) = herd(
        &a18.p_fermen_oanimal,
        &a18.p_manure_oanimal,
        "Ass_A_P_oanimal_amount_change",
    )?;

    let p_soil_fertilizer = land(
        inputs,
        &a18.p_soil_fertilizer,
        inputs.ass("Ass_A_P_soil_fertilizer_ratio_CO2e_to_ha_change")?,
    );
    let p_soil_manure = land(
        inputs,
        &a18.p_soil_manure,
        inputs.ass("Ass_A_P_soil_manure_ratio_CO2e_to_ha_change")?,
    );
    let p_soil_grazing = land(
        inputs,
        &a18.p_soil_grazing,
        inputs.ass("Ass_A_P_soil_grazing_ratio_CO2e_to_ha_change")?,
    );
    let p_soil_residue = land(
        inputs,
        &a18.p_soil_residue,
        inputs.ass("Ass_A_P_soil_residue_ratio_CO2e_to_ha_change")?,
    );
    let p_soil_orgfarm = land(
        inputs,
        &a18.p_soil_orgfarm,
        inputs.ass("Ass_A_P_soil_orgfarm_ratio_CO2e_to_ha_change")?,
    );

    let p_other_liming = units(
        inputs,
        &a18.p_other_liming,
        inputs.ass("Ass_A_P_other_liming_amount_change")?,
        0.0,
    );
    let p_other_kas = units(
        inputs,
        &a18.p_other_kas,
        inputs.ass("Ass_A_P_other_kas_amount_change")?,
        0.0,
    );

    let p_fermen = rollup_vs(
        EMISSIONS,
        &[
            &p_fermen_dairycow,
            &p_fermen_nondairy,
            &p_fermen_pig,
            &p_fermen_poultry,
            &p_fermen_oanimal,
        ],
        &a18.p_fermen,
    );
    let p_manure = rollup_vs(
        EMISSIONS,
        &[
            &p_manure_dairycow,
            &p_manure_nondairy,
            &p_manure_pig,
            &p_manure_poultry,
            &p_manure_oanimal,
        ],
        &a18.p_manure,
    );
    let p_soil = rollup_vs(
        LAND,
        &[
            &p_soil_fertilizer,
            &p_soil_manure,
            &p_soil_grazing,
            &p_soil_residue,
            &p_soil_orgfarm,
        ],
        &a18.p_soil,
    );
    let p_other = rollup_vs(EMISSIONS, &[&p_other_liming, &p_other_kas], &a18.p_other);

    // Operating energy.
    let heat = (a18.p_operation_heat.energy + a18.p_operation_elec_heatpump.energy)
        * (1.0 + inputs.ass("Ass_A_D_fec_heat_change")?);
    let biomass = heat * inputs.ass("Ass_A_S_biomass_pct_of_heat_2035")?;
    let heatpump_heat = heat - biomass;
    let elec_heatpump = div(heatpump_heat, inputs.ass("Ass_R_S_heatpump_apf")?);
    let ambient = heatpump_heat - elec_heatpump;

    let mut p_operation_heat = Record::new(OPERATION);
    p_operation_heat.energy = biomass + ambient;
    p_operation_heat.demand_biomass = biomass;
    p_operation_heat.demand_heatpump = ambient;
    p_operation_heat.set_change(&a18.p_operation_heat, inputs);

    let mut p_operation_elec_heatpump = Record::new(HEATPUMPS);
    p_operation_elec_heatpump.energy = elec_heatpump;
    p_operation_elec_heatpump.demand_electricity = elec_heatpump;
    p_operation_elec_heatpump.full_load_hour = inputs.ass("Ass_R_P_heatpump_full_load_hours")?;
    p_operation_elec_heatpump.power_to_be_installed =
        div(heatpump_heat, p_operation_elec_heatpump.full_load_hour);
    p_operation_elec_heatpump.invest_per_x = inputs.ass("Ass_R_P_heatpump_invest_per_power")?;
    p_operation_elec_heatpump.invest =
        p_operation_elec_heatpump.power_to_be_installed * p_operation_elec_heatpump.invest_per_x;
    Trade::heating_installation(inputs)?.pay(&mut p_operation_elec_heatpump, inputs);
    p_operation_elec_heatpump.set_change(&a18.p_operation_elec_heatpump, inputs);

    let mut p_operation_elec_elcon = Record::new(OPERATION.with(Shape::PRODUCTION));
    p_operation_elec_elcon.demand_change = inputs.ass("Ass_B_D_fec_elec_elcon_change")?;
    p_operation_elec_elcon.energy =
        a18.p_operation_elec_elcon.energy * (1.0 + p_operation_elec_elcon.demand_change);
    p_operation_elec_elcon.demand_electricity = p_operation_elec_elcon.energy;
    p_operation_elec_elcon.set_change(&a18.p_operation_elec_elcon, inputs);

    let epetrol_factor = inputs.fact("Fact_T_S_petrol_EmFa_tank_wheel_2018")?;
    let ediesel_factor = inputs.fact("Fact_T_S_diesel_EmFa_tank_wheel_2018")?;
    let mut p_operation_vehicles = Record::new(OPERATION);
    p_operation_vehicles.energy =
        a18.p_operation_vehicles.energy * (1.0 + inputs.ass("Ass_A_D_fec_vehicles_change")?);
    // Petrol and diesel engines keep their 2018 proportions.
    p_operation_vehicles.demand_epetrol = p_operation_vehicles.energy
        * div(a18.s_petrol.energy, a18.p_operation_vehicles.energy);
    p_operation_vehicles.demand_ediesel =
        p_operation_vehicles.energy - p_operation_vehicles.demand_epetrol;
    p_operation_vehicles.co2e_combustion_based = p_operation_vehicles.demand_epetrol * epetrol_factor
        + p_operation_vehicles.demand_ediesel * ediesel_factor;
    p_operation_vehicles.sum_emissions();
    p_operation_vehicles.set_change(&a18.p_operation_vehicles, inputs);

    let p_operation = rollup_vs(
        HEATPUMPS,
        &[
            &p_operation_heat,
            &p_operation_elec_elcon,
            &p_operation_elec_heatpump,
            &p_operation_vehicles,
        ],
        &a18.p_operation,
    );

    let retired = |base: &Record| carrier(inputs, 0.0, 0.0, base);
    let mut s_petrol = retired(&a18.s_petrol);
    let mut s_diesel = retired(&a18.s_diesel);
    let mut s_fueloil = retired(&a18.s_fueloil);
    let mut s_lpg = retired(&a18.s_lpg);
    let mut s_gas = retired(&a18.s_gas);
    let mut s_biomass = carrier(inputs, biomass, 0.0, &a18.s_biomass);
    let mut s_elec = carrier(inputs, p_operation.demand_electricity, 0.0, &a18.s_elec);
    let mut s_heatpump = carrier(inputs, ambient, 0.0, &a18.s_heatpump);
    let mut s_epetrol = carrier(
        inputs,
        p_operation_vehicles.demand_epetrol,
        epetrol_factor,
        &Record::new(CARRIER),
    );
    let mut s_ediesel = carrier(
        inputs,
        p_operation_vehicles.demand_ediesel,
        ediesel_factor,
        &Record::new(CARRIER),
    );
    let s = rollup_vs(
        Shape::BALANCE,
        &[
            &s_petrol,
            &s_diesel,
            &s_fueloil,
            &s_lpg,
            &s_gas,
            &s_biomass,
            &s_elec,
            &s_heatpump,
            &s_epetrol,
            &s_ediesel,
        ],
        &a18.s,
    );
    set_shares(
        s.energy,
        &mut [
            &mut s_petrol,
            &mut s_diesel,
            &mut s_fueloil,
            &mut s_lpg,
            &mut s_gas,
            &mut s_biomass,
            &mut s_elec,
            &mut s_heatpump,
            &mut s_epetrol,
            &mut s_ediesel,
        ],
    );

    let p = rollup_vs(
        SECTOR,
        &[&p_fermen, &p_manure, &p_soil, &p_other, &p_operation],
        &a18.p,
    );
    let a = rollup_vs(SECTOR, &[&p], &a18.a);

    debug!(
        energy = a.energy,
        co2e = a.co2e_total,
        invest = a.invest,
        "agriculture target year"
    );

    Ok(A30 {
        a,
        p,
        p_fermen,
        p_fermen_dairycow,
        p_fermen_nondairy,
        p_fermen_pig,
        p_fermen_poultry,
        p_fermen_oanimal,
        p_manure,
        p_manure_dairycow,
        p_manure_nondairy,
        p_manure_pig,
        p_manure_poultry,
        p_manure_oanimal,
        p_soil,
        p_soil_fertilizer,
        p_soil_manure,
        p_soil_grazing,
        p_soil_residue,
        p_soil_orgfarm,
        p_other,
        p_other_liming,
        p_other_kas,
        p_operation,
        p_operation_heat,
        p_operation_elec_elcon,
        p_operation_elec_heatpump,
        p_operation_vehicles,
        s,
        s_petrol,
        s_diesel,
        s_fueloil,
        s_lpg,
        s_gas,
        s_biomass,
        s_elec,
        s_heatpump,
        s_epetrol,
        s_ediesel,
    })
}
