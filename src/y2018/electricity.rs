//! Electricity 2018: demand of every sector, its supply from the national
//! generation mix and the generation of local plants.
//!
//! The municipality's demand is supplied by the national mix
//! (`p_fossil_and_renew`) in the 2018 shares of gross electricity production.
//! Local plants are reported alongside with their own generation.

use tracing::debug;

use super::set_shares;

use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::utils::{MILLION, div};
use crate::y2018::agri::A18;
use crate::y2018::business::B18;
use crate::y2018::heat::H18;
use crate::y2018::industry::I18;
use crate::y2018::residences::R18;
use crate::y2018::transport::T18;

crate::snapshot!(
    /// Electricity baseline.
    E18 {
        e,
        d,
        d_r,
        d_b,
        d_i,
        d_t,
        d_a,
        d_h,
        d_f_wo_hydrogen,
        d_f_hydrogen_reconv,
        p,
        p_fossil_and_renew,
        p_fossil,
        p_fossil_nuclear,
        p_fossil_coal_brown,
        p_fossil_coal_black,
        p_fossil_gas,
        p_fossil_ofossil,
        p_renew,
        p_renew_pv,
        p_renew_pv_roof,
        p_renew_pv_facade,
        p_renew_pv_park,
        p_renew_pv_agri,
        p_renew_wind,
        p_renew_wind_onshore,
        p_renew_wind_offshore,
        p_renew_biomass,
        p_renew_geoth,
        p_renew_hydro,
        p_local,
        p_local_pv,
        p_local_pv_roof,
        p_local_pv_facade,
        p_local_pv_park,
        p_local_pv_agri,
        p_local_wind_onshore,
        p_local_biomass,
        p_local_hydro,
    }
);

pub(crate) const PLANT: Shape = Shape::EMITTER
    .with(Shape::PCT)
    .with(Shape::PER_MWH)
    .with(Shape::FUEL_COST)
    .with(Shape::MRO);
const LOCAL: Shape = PLANT.with(Shape::POWER);
const DEMAND: Shape = Shape::ENERGY.with(Shape::PCT);

/// Generation with combustion emissions and running costs per MWh.
fn plant(energy: f64, cb_per_mwh: f64, cost_fuel_per_mwh: f64, cost_mro_per_mwh: f64) -> Record {
    generation(PLANT, energy, cb_per_mwh, cost_fuel_per_mwh, cost_mro_per_mwh)
}

fn generation(
    shape: Shape,
    energy: f64,
    cb_per_mwh: f64,
    cost_fuel_per_mwh: f64,
    cost_mro_per_mwh: f64,
) -> Record {
    let mut r = Record::new(shape);
    r.energy = energy;
    r.co2e_combustion_based_per_mwh = cb_per_mwh;
    r.co2e_combustion_based = energy * cb_per_mwh;
    r.sum_emissions();
    r.cost_fuel_per_mwh = cost_fuel_per_mwh;
    r.cost_fuel = energy * cost_fuel_per_mwh / MILLION;
    r.cost_mro_per_mwh = cost_mro_per_mwh;
    r.cost_mro = energy * cost_mro_per_mwh / MILLION;
    r
}

/// Local plant generating `power_installed × full_load_hour`.
fn local(power_installed: f64, full_load_hour: f64, cb_per_mwh: f64, cost_fuel_per_mwh: f64, cost_mro_per_mwh: f64) -> Record {
    let mut r = generation(
        LOCAL,
        power_installed * full_load_hour,
        cb_per_mwh,
        cost_fuel_per_mwh,
        cost_mro_per_mwh,
    );
    r.power_installed = power_installed;
    r.full_load_hour = full_load_hour;
    r
}

#[allow(clippy::too_many_arguments)]
pub fn calc(
    inputs: &Inputs<'_>,
    r18: &R18,
    b18: &B18,
    i18: &I18,
    t18: &T18,
    a18: &A18,
    h18: &H18,
) -> BalanceResult<E18> {
    let demand = |energy: f64| {
        let mut r = Record::new(DEMAND);
        r.energy = energy;
        r
    };
    let mut d_r = demand(r18.s_elec.energy + r18.s_elec_heating.energy);
    let mut d_b = demand(b18.s_elec.energy + b18.s_elec_heating.energy);
    let mut d_i = demand(i18.s_renew_elec.energy);
    let mut d_t = demand(t18.s_elec.energy);
    let mut d_a = demand(a18.s_elec.energy);
    let mut d_h = demand(h18.p.demand_electricity);
    // Neither synthetic fuels nor reconversion existed in 2018.
    let mut d_f_wo_hydrogen = demand(0.0);
    let mut d_f_hydrogen_reconv = demand(0.0);
    let d = Record::rollup(
        DEMAND,
        &[
            &d_r,
            &d_b,
            &d_i,
            &d_t,
            &d_a,
            &d_h,
            &d_f_wo_hydrogen,
            &d_f_hydrogen_reconv,
        ],
    );
    set_shares(
        d.energy,
        &mut [
            &mut d_r,
            &mut d_b,
            &mut d_i,
            &mut d_t,
            &mut d_a,
            &mut d_h,
            &mut d_f_wo_hydrogen,
            &mut d_f_hydrogen_reconv,
        ],
    );

    let supplied = d.energy;
    let fossil = |pct: &str, cb: &str, fuel: &str, mro: &str| -> BalanceResult<Record> {
        Ok(plant(
            supplied * inputs.fact(pct)?,
            inputs.fact(cb)?,
            inputs.fact(fuel)?,
            inputs.fact(mro)?,
        ))
    };
    let mut p_fossil_nuclear = fossil(
        "Fact_E_P_nuclear_pct_of_gep_2018",
        "Fact_E_P_nuclear_ratio_CO2e_cb_to_fec_2018",
        "Fact_E_P_nuclear_cost_fuel_per_MWh_2018",
        "Fact_E_P_nuclear_cost_mro_per_MWh_2018",
    )?;
    let mut p_fossil_coal_brown = fossil(
        "Fact_E_P_coal_brown_pct_of_gep_2018",
        "Fact_E_P_coal_brown_ratio_CO2e_cb_to_fec_2018",
        "Fact_E_P_coal_brown_cost_fuel_per_MWh_2018",
        "Fact_E_P_coal_brown_cost_mro_per_MWh_2018",
    )?;
    let mut p_fossil_coal_black = fossil(
        "Fact_E_P_coal_black_pct_of_gep_2018",
        "Fact_E_P_coal_black_ratio_CO2e_cb_to_fec_2018",
        "Fact_E_P_coal_black_cost_fuel_per_MWh_2018",
        "Fact_E_P_coal_black_cost_mro_per_MWh_2018",
    )?;
    let mut p_fossil_gas = fossil(
        "Fact_E_P_gas_pct_of_gep_2018",
        "Fact_E_P_gas_ratio_CO2e_cb_to_fec_2018",
        "Fact_E_P_gas_cost_fuel_per_MWh_2018",
        "Fact_E_P_gas_cost_mro_per_MWh_2018",
    )?;
    let mut p_fossil_ofossil = fossil(
        "Fact_E_P_ofossil_pct_of_gep_2018",
        "Fact_E_P_ofossil_ratio_CO2e_cb_to_fec_2018",
        "Fact_E_P_ofossil_cost_fuel_per_MWh_2018",
        "Fact_E_P_ofossil_cost_mro_per_MWh_2018",
    )?;

    let neutral = inputs.fact("Fact_E_P_climate_neutral_ratio_CO2e_cb_to_fec")?;
    let biomass_cb = inputs.fact("Fact_E_P_biomass_ratio_CO2e_cb_nonCO2_to_gep_2018")?;
    let biomass_fuel = inputs.fact("Fact_E_P_biomass_cost_fuel_per_MWh_2018")?;
    let pv_mro = inputs.fact("Fact_E_P_pv_cost_mro_per_MWh_2018")?;
    let wind_onshore_mro = inputs.fact("Fact_E_P_wind_onshore_cost_mro_per_MWh_2018")?;
    let biomass_mro = inputs.fact("Fact_E_P_biomass_cost_mro_per_MWh_2018")?;
    let hydro_mro = inputs.fact("Fact_E_P_hydro_cost_mro_per_MWh_2018")?;

    let pv = supplied * inputs.fact("Fact_E_P_pv_pct_of_gep_2018")?;
    let mut p_renew_pv_roof = plant(pv * inputs.fact("Fact_E_P_pv_roof_pct_of_pv_2018")?, neutral, 0.0, pv_mro);
    let mut p_renew_pv_facade =
        plant(pv * inputs.fact("Fact_E_P_pv_facade_pct_of_pv_2018")?, neutral, 0.0, pv_mro);
    let mut p_renew_pv_park = plant(pv * inputs.fact("Fact_E_P_pv_park_pct_of_pv_2018")?, neutral, 0.0, pv_mro);
    let mut p_renew_pv_agri = plant(pv * inputs.fact("Fact_E_P_pv_agri_pct_of_pv_2018")?, neutral, 0.0, pv_mro);
    let mut p_renew_wind_onshore = plant(
        supplied * inputs.fact("Fact_E_P_wind_onshore_pct_of_gep_2018")?,
        neutral,
        0.0,
        wind_onshore_mro,
    );
    let mut p_renew_wind_offshore = plant(
        supplied * inputs.fact("Fact_E_P_wind_offshore_pct_of_gep_2018")?,
        neutral,
        0.0,
        inputs.fact("Fact_E_P_wind_offshore_cost_mro_per_MWh_2018")?,
    );
    let mut p_renew_biomass = plant(
        supplied * inputs.fact("Fact_E_P_biomass_pct_of_gep_2018")?,
        biomass_cb,
        biomass_fuel,
        biomass_mro,
    );
    let mut p_renew_geoth = plant(
        supplied * inputs.fact("Fact_E_P_geoth_pct_of_gep_2018")?,
        neutral,
        0.0,
        inputs.fact("Fact_E_P_geoth_cost_mro_per_MWh_2018")?,
    );
    let mut p_renew_hydro = plant(
        supplied * inputs.fact("Fact_E_P_hydro_pct_of_gep_2018")?,
        neutral,
        0.0,
        hydro_mro,
    );

    let mut p_renew_pv = Record::rollup(
        PLANT,
        &[&p_renew_pv_roof, &p_renew_pv_facade, &p_renew_pv_park, &p_renew_pv_agri],
    );
    let mut p_renew_wind = Record::rollup(PLANT, &[&p_renew_wind_onshore, &p_renew_wind_offshore]);
    let mut p_renew = Record::rollup(
        PLANT,
        &[
            &p_renew_pv,
            &p_renew_wind,
            &p_renew_biomass,
            &p_renew_geoth,
            &p_renew_hydro,
        ],
    );
    let mut p_fossil = Record::rollup(
        PLANT,
        &[
            &p_fossil_nuclear,
            &p_fossil_coal_brown,
            &p_fossil_coal_black,
            &p_fossil_gas,
            &p_fossil_ofossil,
        ],
    );
    let mut p_fossil_and_renew = Record::rollup(PLANT, &[&p_fossil, &p_renew]);
    set_shares(
        p_fossil_and_renew.energy,
        &mut [
            &mut p_fossil,
            &mut p_fossil_nuclear,
            &mut p_fossil_coal_brown,
            &mut p_fossil_coal_black,
            &mut p_fossil_gas,
            &mut p_fossil_ofossil,
            &mut p_renew,
            &mut p_renew_wind,
            &mut p_renew_wind_onshore,
            &mut p_renew_wind_offshore,
            &mut p_renew_biomass,
            &mut p_renew_geoth,
            &mut p_renew_hydro,
        ],
    );
    set_shares(
        p_renew_pv.energy,
        &mut [
            &mut p_renew_pv_roof,
            &mut p_renew_pv_facade,
            &mut p_renew_pv_park,
            &mut p_renew_pv_agri,
        ],
    );
    p_renew_pv.pct_energy = div(p_renew_pv.energy, p_fossil_and_renew.energy);
    p_fossil_and_renew.pct_energy = div(p_fossil_and_renew.energy, d.energy);

    let pv_full_load_hour = inputs.entry("In_E_pv_full_load_hours_sta")?;
    let mut p_local_pv_roof = local(
        inputs.entry("In_E_PV_power_inst_roof")?,
        pv_full_load_hour,
        neutral,
        0.0,
        pv_mro,
    );
    let mut p_local_pv_facade = local(
        inputs.entry("In_E_PV_power_inst_facade")?,
        pv_full_load_hour,
        neutral,
        0.0,
        pv_mro,
    );
    let mut p_local_pv_park = local(
        inputs.entry("In_E_PV_power_inst_park")?,
        pv_full_load_hour,
        neutral,
        0.0,
        pv_mro,
    );
    let mut p_local_pv_agri = local(
        inputs.entry("In_E_PV_power_inst_agripv")?,
        pv_full_load_hour,
        neutral,
        0.0,
        pv_mro,
    );
    let mut p_local_wind_onshore = local(
        inputs.entry("In_E_PV_power_inst_wind_on")?,
        inputs.fact("Fact_E_P_wind_onshore_full_load_hours")?,
        neutral,
        0.0,
        wind_onshore_mro,
    );
    let mut p_local_biomass = local(
        inputs.entry("In_E_PV_power_inst_biomass")?,
        inputs.fact("Fact_E_P_biomass_full_load_hours")?,
        biomass_cb,
        biomass_fuel,
        biomass_mro,
    );
    let mut p_local_hydro = local(
        inputs.entry("In_E_PV_power_inst_water")?,
        inputs.fact("Fact_E_P_hydro_full_load_hours")?,
        neutral,
        0.0,
        hydro_mro,
    );

    let mut p_local_pv = Record::rollup(
        LOCAL,
        &[&p_local_pv_roof, &p_local_pv_facade, &p_local_pv_park, &p_local_pv_agri],
    );
    let p_local = Record::rollup(
        LOCAL,
        &[&p_local_pv, &p_local_wind_onshore, &p_local_biomass, &p_local_hydro],
    );
    set_shares(
        p_local_pv.energy,
        &mut [
            &mut p_local_pv_roof,
            &mut p_local_pv_facade,
            &mut p_local_pv_park,
            &mut p_local_pv_agri,
        ],
    );
    set_shares(
        p_local.energy,
        &mut [
            &mut p_local_pv,
            &mut p_local_wind_onshore,
            &mut p_local_biomass,
            &mut p_local_hydro,
        ],
    );

    let p = Record::rollup(PLANT, &[&p_fossil_and_renew, &p_local]);
    let e = Record::rollup(Shape::EMITTER, &[&p]);

    debug!(
        demand = d.energy,
        local = p_local.energy,
        co2e = e.co2e_total,
        "electricity 2018"
    );

    Ok(E18 {
        e,
        d,
        d_r,
        d_b,
        d_i,
        d_t,
        d_a,
        d_h,
        d_f_wo_hydrogen,
        d_f_hydrogen_reconv,
        p,
        p_fossil_and_renew,
        p_fossil,
        p_fossil_nuclear,
        p_fossil_coal_brown,
        p_fossil_coal_black,
        p_fossil_gas,
        p_fossil_ofossil,
        p_renew,
        p_renew_pv,
        p_renew_pv_roof,
        p_renew_pv_facade,
        p_renew_pv_park,
        p_renew_pv_agri,
        p_renew_wind,
        p_renew_wind_onshore,
        p_renew_wind_offshore,
        p_renew_biomass,
        p_renew_geoth,
        p_renew_hydro,
        p_local,
        p_local_pv,
        p_local_pv_roof,
        p_local_pv_facade,
        p_local_pv_park,
        p_local_pv_agri,
        p_local_wind_onshore,
        p_local_biomass,
        p_local_hydro,
    })
}
