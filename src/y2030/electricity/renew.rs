//! Renewable plants of the national mix.
//!
//! The municipality's share of the national generation comes from offshore
//! wind, geothermal plants and gas turbines burning stored hydrogen
//! ("reverse" generation). Photovoltaics, onshore wind, biomass and hydro
//! are expected to be built locally and carry no national share.

use super::{PLANT, hire, loss, running_costs, without_co2e_change};
use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::Record;
use crate::utils::div;
use crate::y2018::electricity::E18;
use crate::y2030::{Trade, rollup_vs};

pub(super) struct Renew {
    pub p_renew: Record,
    pub p_renew_pv: Record,
    pub p_renew_pv_roof: Record,
    pub p_renew_pv_facade: Record,
    pub p_renew_pv_park: Record,
    pub p_renew_pv_agri: Record,
    pub p_renew_wind: Record,
    pub p_renew_wind_onshore: Record,
    pub p_renew_wind_offshore: Record,
    pub p_renew_biomass: Record,
    pub p_renew_geoth: Record,
    pub p_renew_hydro: Record,
    pub p_renew_reverse: Record,
}

/// National plant type without a share in the target year.
fn idle(inputs: &Inputs<'_>, base: &Record, cb_per_mwh: f64, cost_mro_per_mwh: f64) -> Record {
    let mut r = Record::new(PLANT);
    r.co2e_combustion_based_per_mwh = cb_per_mwh;
    r.cost_mro_per_mwh = cost_mro_per_mwh;
    r.set_change(base, inputs);
    without_co2e_change(&mut r);
    running_costs(&mut r, base);
    r
}

/// Generation, emissions and running costs once energy and factors are set.
fn generate(inputs: &Inputs<'_>, r: &mut Record, base: &Record) {
    r.co2e_combustion_based = r.energy * r.co2e_combustion_based_per_mwh;
    r.sum_emissions();
    r.set_change(base, inputs);
    without_co2e_change(r);
    running_costs(r, base);
}

/// Installed capacity growing towards a share of the installable capacity.
fn expand(r: &mut Record, loss: f64) {
    r.power_to_be_installed =
        (r.power_installable * r.power_to_be_installed_pct - r.power_installed).max(0.0);
    r.energy = (r.power_to_be_installed + r.power_installed) * r.full_load_hour * (1.0 - loss);
}

/// MRO cost per MWh from the investment per kW and the yearly MRO share.
pub(super) fn mro_per_mwh(invest_per_kw: f64, mro_per_year: f64, full_load_hour: f64) -> f64 {
    div(invest_per_kw * mro_per_year, full_load_hour) * 1000.0
}

pub(super) fn calc(inputs: &Inputs<'_>, e18: &E18, demand: f64) -> BalanceResult<Renew> {
    let loss = loss(inputs)?;
    let neutral = inputs.fact("Fact_E_P_climate_neutral_ratio_CO2e_cb_to_fec")?;
    let plant_trade = Trade::plant_construction(inputs)?;

    let pv_flh = inputs.entry("In_E_pv_full_load_hours_sta")?;
    let roof_mro_per_year = inputs.ass("Ass_E_P_local_pv_roof_mro_per_year")?;
    let p_renew_pv_roof = idle(
        inputs,
        &e18.p_renew_pv_roof,
        neutral,
        mro_per_mwh(
            inputs.ass("Ass_E_P_local_pv_roof_ratio_invest_to_power_2020")?,
            roof_mro_per_year,
            pv_flh,
        ),
    );
    let p_renew_pv_facade = idle(
        inputs,
        &e18.p_renew_pv_facade,
        neutral,
        mro_per_mwh(
            inputs.ass("Ass_E_S_local_pv_facade_ratio_invest_to_power")?,
            roof_mro_per_year,
            inputs.ass("Ass_E_P_local_pv_facade_full_load_hours")?,
        ),
    );
    let p_renew_pv_park = idle(
        inputs,
        &e18.p_renew_pv_park,
        neutral,
        mro_per_mwh(
            inputs.ass("Ass_E_S_local_pv_park_ratio_invest_to_power_2020")?,
            inputs.ass("Ass_E_P_local_pv_park_mro_per_year")?,
            pv_flh,
        ),
    );
    let p_renew_pv_agri = idle(
        inputs,
        &e18.p_renew_pv_agri,
        neutral,
        mro_per_mwh(
            inputs.ass("Ass_E_P_local_pv_agri_ratio_invest_to_power")?,
            roof_mro_per_year,
            pv_flh,
        ),
    );
    let p_renew_wind_onshore = idle(
        inputs,
        &e18.p_renew_wind_onshore,
        neutral,
        mro_per_mwh(
            inputs.ass("Ass_E_P_local_wind_onshore_ratio_invest_to_power_2020")?,
            inputs.ass("Ass_E_P_local_wind_onshore_mro_per_year")?,
            inputs.fact("Fact_E_P_wind_onshore_full_load_hours")?,
        ),
    );
    let p_renew_hydro = idle(
        inputs,
        &e18.p_renew_hydro,
        neutral,
        inputs.ass("Ass_E_P_local_hydro_mro_per_MWh")?,
    );

    // Biomass keeps its regular CO2e change against 2018.
    let mut p_renew_biomass = Record::new(PLANT);
    p_renew_biomass.co2e_combustion_based_per_mwh =
        e18.p_renew_biomass.co2e_combustion_based_per_mwh;
    p_renew_biomass.cost_fuel_per_mwh = inputs.ass("Ass_E_P_local_biomass_material_costs")?
        / inputs.ass("Ass_E_P_local_biomass_efficiency")?;
    p_renew_biomass.cost_mro_per_mwh = inputs.ass("Ass_E_P_local_biomass_mro_per_MWh")?;
    p_renew_biomass.set_change(&e18.p_renew_biomass, inputs);
    running_costs(&mut p_renew_biomass, &e18.p_renew_biomass);

    let mut p_renew_wind_offshore = Record::new(PLANT);
    p_renew_wind_offshore.power_installed = inputs.fact("Fact_E_P_wind_offshore_power_installed_2018")?;
    p_renew_wind_offshore.full_load_hour = inputs.fact("Fact_E_P_wind_offshore_full_load_hours")?;
    p_renew_wind_offshore.power_installable =
        inputs.ass("Ass_E_P_renew_wind_offshore_power_installable")?;
    p_renew_wind_offshore.power_to_be_installed_pct =
        inputs.ass("Ass_E_P_renew_wind_offshore_power_to_be_installed_2035")?;
    expand(&mut p_renew_wind_offshore, loss);
    let offshore_invest_per_kw = inputs.ass("Ass_E_P_renew_wind_offshore_ratio_invest_to_power_2030")?;
    p_renew_wind_offshore.co2e_combustion_based_per_mwh = neutral;
    p_renew_wind_offshore.cost_mro_per_mwh = mro_per_mwh(
        offshore_invest_per_kw,
        inputs.ass("Ass_E_P_renew_wind_offshore_mro_per_year")?,
        p_renew_wind_offshore.full_load_hour,
    );
    generate(inputs, &mut p_renew_wind_offshore, &e18.p_renew_wind_offshore);
    p_renew_wind_offshore.invest_per_x = offshore_invest_per_kw * 1000.0;
    p_renew_wind_offshore.invest =
        p_renew_wind_offshore.power_to_be_installed * p_renew_wind_offshore.invest_per_x;
    plant_trade.pay(&mut p_renew_wind_offshore, inputs);
    hire(
        &mut p_renew_wind_offshore,
        inputs.fact("Fact_E_P_wind_offshore_emplo_2018")?,
    );

    let mut p_renew_geoth = Record::new(PLANT);
    p_renew_geoth.power_installed = inputs.fact("Fact_E_P_geoth_power_installed_2018")?;
    p_renew_geoth.full_load_hour = inputs.fact("Fact_E_P_geoth_full_load_hours")?;
    p_renew_geoth.power_installable = inputs.ass("Ass_E_P_renew_geoth_power_installable")?;
    p_renew_geoth.power_to_be_installed_pct =
        inputs.ass("Ass_E_P_renew_geoth_power_to_be_installed_2035")?;
    expand(&mut p_renew_geoth, loss);
    p_renew_geoth.co2e_combustion_based_per_mwh = neutral;
    p_renew_geoth.cost_mro_per_mwh = inputs.ass("Ass_E_P_renew_geoth_mro_per_MWh")?;
    generate(inputs, &mut p_renew_geoth, &e18.p_renew_geoth);
    p_renew_geoth.invest_per_x = inputs.ass("Ass_E_P_renew_geoth_invest")? * 1000.0;
    p_renew_geoth.invest = p_renew_geoth.power_to_be_installed * p_renew_geoth.invest_per_x;
    plant_trade.pay(&mut p_renew_geoth, inputs);

    // Gas turbines cover the residual load on top of the demand.
    let addon = demand * inputs.ass("Ass_E_P_renew_reverse_addon_to_demand_2035")?;
    let mut p_renew_reverse = Record::new(PLANT);
    p_renew_reverse.energy = addon * (1.0 - loss);
    p_renew_reverse.power_installed = inputs.fact("Fact_E_P_gas_power_installed_2018")?;
    p_renew_reverse.full_load_hour = inputs.ass("Ass_E_P_renew_reverse_full_load_hours")?;
    p_renew_reverse.power_to_be_installed = (div(
        addon * inputs.ass("Ass_E_P_renew_nep_total_2035")?,
        p_renew_reverse.full_load_hour,
    ) - p_renew_reverse.power_installed)
        .max(0.0);
    p_renew_reverse.co2e_combustion_based_per_mwh = neutral;
    p_renew_reverse.cost_mro_per_mwh = div(
        inputs.ass("Ass_E_P_renew_reverse_gud_cost_mro_per_MW")?,
        p_renew_reverse.full_load_hour,
    );
    generate(inputs, &mut p_renew_reverse, &Record::new(PLANT));
    p_renew_reverse.invest_per_x = inputs.ass("Ass_E_P_renew_reverse_gud_ratio_invest_to_power")? * 1000.0;
    p_renew_reverse.invest = p_renew_reverse.power_to_be_installed * p_renew_reverse.invest_per_x;
    plant_trade.pay(&mut p_renew_reverse, inputs);

    // Plant construction jobs are shared by geothermal and gas turbines.
    let plant_emplo = inputs.fact("Fact_E_P_plant_construct_emplo_2018")?;
    let plant_demand = p_renew_geoth.demand_emplo + p_renew_reverse.demand_emplo;
    let geoth_existing = plant_emplo * div(p_renew_geoth.demand_emplo, plant_demand);
    let reverse_existing = plant_emplo * div(p_renew_reverse.demand_emplo, plant_demand);
    hire(&mut p_renew_geoth, geoth_existing);
    hire(&mut p_renew_reverse, reverse_existing);

    let p_renew_pv = rollup_vs(
        PLANT,
        &[
            &p_renew_pv_roof,
            &p_renew_pv_facade,
            &p_renew_pv_park,
            &p_renew_pv_agri,
        ],
        &e18.p_renew_pv,
    );
    let p_renew_wind = rollup_vs(
        PLANT,
        &[&p_renew_wind_onshore, &p_renew_wind_offshore],
        &e18.p_renew_wind,
    );
    let p_renew = rollup_vs(
        PLANT,
        &[
            &p_renew_pv,
            &p_renew_wind,
            &p_renew_biomass,
            &p_renew_geoth,
            &p_renew_hydro,
            &p_renew_reverse,
        ],
        &e18.p_renew,
    );

    Ok(Renew {
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
        p_renew_reverse,
    })
}
