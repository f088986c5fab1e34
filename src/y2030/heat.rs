//! Heat in the target year.
//!
//! The heat network is fed first by the cogenerated heat of local biomass
//! plants; solar thermal parks, large heat pumps and deep geothermal plants
//! share the remainder in fixed fractions. Fossil heating fuels are gone from
//! the consuming sectors and only keep their 2018 factors for the changes.

use tracing::debug;

use super::{Trade, rollup_vs};
use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::utils::{MILLION, div};
use crate::y2018::heat::H18;
use crate::y2018::set_shares;
use crate::y2030::agri::A30;
use crate::y2030::business::B30;
use crate::y2030::industry::I30;
use crate::y2030::residences::R30;

crate::snapshot!(
    /// Heat in the target year.
    H30 {
        h,
        g,
        g_storage,
        g_planning,
        d,
        d_r,
        d_b,
        d_i,
        d_t,
        d_a,
        p,
        p_gas,
        p_lpg,
        p_fueloil,
        p_opetpro,
        p_coal,
        p_heatnet,
        p_heatnet_cogen,
        p_heatnet_plant,
        p_heatnet_lheatpump,
        p_heatnet_geoth,
        p_biomass,
        p_ofossil,
        p_orenew,
        p_solarth,
        p_heatpump,
    }
);

const FUEL: Shape = Shape::BALANCE.with(Shape::PER_MWH).with(Shape::FUEL_COST);
const SOURCE: Shape = Shape::BALANCE.with(Shape::PER_MWH);
const HEATNET_PLANT: Shape = SOURCE
    .with(Shape::PCT)
    .with(Shape::DEMAND)
    .with(Shape::INVESTMENT)
    .with(Shape::INVEST_COM)
    .with(Shape::POWER)
    .with(Shape::AREA);
const HEATNET: Shape = Shape::BALANCE
    .with(Shape::DEMAND)
    .with(Shape::INVESTMENT)
    .with(Shape::INVEST_COM);
const GRID: Shape = Shape::INVESTMENT.with(Shape::INVEST_COM);
const PRODUCTION: Shape = HEATNET.with(Shape::FUEL_COST);
const SECTOR: Shape = Shape::BALANCE
    .with(Shape::DEMAND)
    .with(Shape::INVESTMENT)
    .with(Shape::INVEST_COM);

/// Heat source burning a fuel at its 2018 emission factors.
fn fuel(inputs: &Inputs<'_>, energy: f64, base: &Record, cost_fuel_per_mwh: f64) -> Record {
    let mut r = Record::new(FUEL);
    r.energy = energy;
    r.co2e_production_based_per_mwh = base.co2e_production_based_per_mwh;
    r.co2e_combustion_based_per_mwh = base.co2e_combustion_based_per_mwh;
    r.co2e_production_based = energy * r.co2e_production_based_per_mwh;
    r.co2e_combustion_based = energy * r.co2e_combustion_based_per_mwh;
    r.sum_emissions();
    r.set_change(base, inputs);
    r.cost_fuel_per_mwh = cost_fuel_per_mwh;
    r.cost_fuel = energy * cost_fuel_per_mwh / MILLION;
    r
}

/// Renewable source whose upstream emissions are not accounted yet.
fn unaccounted(inputs: &Inputs<'_>, shape: Shape, energy: f64, pb_per_mwh: f64, base: &Record) -> Record {
    let mut r = Record::new(shape);
    r.energy = energy;
    r.co2e_production_based_per_mwh = pb_per_mwh;
    r.set_change(base, inputs);
    r.change_co2e_pct = 0.0;
    r
}

/// Share of the heat network not covered by cogeneration.
fn heatnet_source(
    inputs: &Inputs<'_>,
    remainder: f64,
    fraction_key: &str,
    pb_per_mwh: f64,
) -> BalanceResult<Record> {
    let mut r = Record::new(HEATNET_PLANT);
    r.pct_energy = inputs.ass(fraction_key)?;
    r.energy = remainder * r.pct_energy;
    r.co2e_production_based_per_mwh = pb_per_mwh;
    r.co2e_production_based = r.energy * pb_per_mwh;
    r.sum_emissions();
    Ok(r)
}

/// Capacity of a heat network plant running `full_load_hour` per year.
fn install(inputs: &Inputs<'_>, r: &mut Record, flh_key: &str, invest_key: &str) -> BalanceResult<()> {
    r.full_load_hour = inputs.fact(flh_key)?;
    r.power_to_be_installed = div(r.energy, r.full_load_hour);
    r.invest_per_x = inputs.fact(invest_key)?;
    r.invest = r.power_to_be_installed * r.invest_per_x;
    Ok(())
}

fn demand(records: &[&Record]) -> Record {
    let mut r = Record::new(Shape::ENERGY.with(Shape::PCT));
    r.energy = Record::total(records, |r| r.energy);
    r
}

#[allow(clippy::too_many_arguments)]
pub fn calc(
    inputs: &Inputs<'_>,
    h18: &H18,
    r30: &R30,
    b30: &B30,
    i30: &I30,
    a30: &A30,
    p_local_biomass_cogen: &Record,
) -> BalanceResult<H30> {
    let orenew_pb = inputs.fact("Fact_H_P_orenew_ratio_CO2e_pb_to_fec_2018")?;
    let main = Trade::main_construction(inputs)?;

    let p_gas = fuel(
        inputs,
        r30.s_gas.energy + b30.s_gas.energy + a30.s_gas.energy,
        &h18.p_gas,
        inputs.ass("Ass_R_S_gas_energy_cost_factor_2035")?,
    );
    let p_lpg = fuel(
        inputs,
        r30.s_lpg.energy + b30.s_lpg.energy + a30.s_lpg.energy,
        &h18.p_lpg,
        0.0,
    );
    let p_fueloil = fuel(
        inputs,
        r30.s_fueloil.energy + b30.s_fueloil.energy + a30.s_fueloil.energy,
        &h18.p_fueloil,
        inputs.ass("Ass_R_S_fueloil_energy_cost_factor_2035")?,
    );
    let p_opetpro = fuel(inputs, 0.0, &h18.p_opetpro, 0.0);
    let p_coal = fuel(
        inputs,
        r30.s_coal.energy + b30.s_coal.energy,
        &h18.p_coal,
        inputs.ass("Ass_R_S_coal_energy_cost_factor_2035")?,
    );

    let heatnet = r30.s_heatnet.energy + b30.s_heatnet.energy + i30.s_renew_heatnet.energy;
    let mut p_heatnet_cogen = Record::new(HEATNET_PLANT);
    p_heatnet_cogen.energy = p_local_biomass_cogen.energy.min(heatnet);
    p_heatnet_cogen.pct_energy = div(p_heatnet_cogen.energy, heatnet);
    p_heatnet_cogen.co2e_production_based_per_mwh =
        inputs.fact("Fact_H_P_biomass_ratio_CO2e_pb_to_fec_2018")?;
    p_heatnet_cogen.co2e_combustion_based_per_mwh =
        inputs.fact("Fact_H_P_heatnet_biomass_ratio_CO2e_cb_to_fec_2018")?;
    p_heatnet_cogen.co2e_production_based =
        p_heatnet_cogen.energy * p_heatnet_cogen.co2e_production_based_per_mwh;
    p_heatnet_cogen.co2e_combustion_based =
        p_heatnet_cogen.energy * p_heatnet_cogen.co2e_combustion_based_per_mwh;
    p_heatnet_cogen.sum_emissions();
    p_heatnet_cogen.set_change(&h18.p_heatnet_cogen, inputs);

    let remainder = heatnet - p_heatnet_cogen.energy;

    // Solar thermal parks are sized by area and owned by the municipality.
    let mut p_heatnet_plant = heatnet_source(
        inputs,
        remainder,
        "Ass_H_P_heatnet_fraction_solarth_2050",
        orenew_pb,
    )?;
    p_heatnet_plant.area_ha_available =
        div(p_heatnet_plant.energy, inputs.fact("Fact_H_P_heatnet_solarth_park_yield_2025")?);
    p_heatnet_plant.invest_per_x = inputs.fact("Fact_H_P_heatnet_solarth_park_invest_203X")?;
    p_heatnet_plant.invest = p_heatnet_plant.area_ha_available * p_heatnet_plant.invest_per_x;
    p_heatnet_plant.invest_com = p_heatnet_plant.invest;
    main.pay(&mut p_heatnet_plant, inputs);
    p_heatnet_plant.set_change(&h18.p_heatnet_plant, inputs);

    let mut p_heatnet_lheatpump = heatnet_source(
        inputs,
        remainder,
        "Ass_H_P_heatnet_fraction_lheatpump_2050",
        orenew_pb,
    )?;
    install(
        inputs,
        &mut p_heatnet_lheatpump,
        "Fact_H_P_heatnet_lheatpump_full_load_hours",
        "Fact_H_P_heatnet_lheatpump_invest_203X",
    )?;
    p_heatnet_lheatpump.invest_com = p_heatnet_lheatpump.invest;
    p_heatnet_lheatpump.demand_electricity = div(
        p_heatnet_lheatpump.energy,
        inputs.fact("Fact_H_P_heatnet_lheatpump_apf")?,
    );
    main.pay(&mut p_heatnet_lheatpump, inputs);
    p_heatnet_lheatpump.set_change(&h18.p_heatnet_lheatpump, inputs);
    p_heatnet_lheatpump.change_energy_pct = 0.0;
    p_heatnet_lheatpump.change_co2e_pct = 0.0;

    let mut p_heatnet_geoth = heatnet_source(
        inputs,
        remainder,
        "Ass_H_P_heatnet_fraction_geoth_2050",
        orenew_pb,
    )?;
    install(
        inputs,
        &mut p_heatnet_geoth,
        "Fact_H_P_heatnet_geoth_full_load_hours",
        "Fact_H_P_heatnet_geoth_invest_203X",
    )?;
    p_heatnet_geoth.invest_com = p_heatnet_geoth.invest;
    main.pay(&mut p_heatnet_geoth, inputs);
    p_heatnet_geoth.set_change(&h18.p_heatnet_geoth, inputs);
    p_heatnet_geoth.change_energy_pct = 0.0;
    p_heatnet_geoth.change_co2e_pct = 0.0;

    let p_heatnet = rollup_vs(
        HEATNET,
        &[
            &p_heatnet_cogen,
            &p_heatnet_plant,
            &p_heatnet_lheatpump,
            &p_heatnet_geoth,
        ],
        &h18.p_heatnet,
    );

    let mut p_biomass = unaccounted(
        inputs,
        FUEL,
        r30.s_biomass.energy + b30.s_biomass.energy + i30.s_renew_biomass.energy + a30.s_biomass.energy,
        inputs.fact("Fact_H_P_biomass_ratio_CO2e_pb_to_fec_2018")?,
        &h18.p_biomass,
    );
    p_biomass.cost_fuel_per_mwh = inputs.fact("Fact_R_S_wood_energy_cost_factor_2018")?;
    p_biomass.cost_fuel = p_biomass.energy * p_biomass.cost_fuel_per_mwh / MILLION;
    let p_ofossil = unaccounted(
        inputs,
        SOURCE,
        0.0,
        h18.p_ofossil.co2e_production_based_per_mwh,
        &h18.p_ofossil,
    );
    let p_solarth = unaccounted(
        inputs,
        SOURCE,
        r30.s_solarth.energy + b30.s_solarth.energy,
        orenew_pb,
        &h18.p_solarth,
    );
    let p_heatpump = unaccounted(
        inputs,
        SOURCE,
        r30.s_heatpump.energy + b30.s_heatpump.energy + a30.s_heatpump.energy,
        orenew_pb,
        &h18.p_heatpump,
    );
    let mut p_orenew = rollup_vs(SOURCE, &[&p_solarth, &p_heatpump], &h18.p_orenew);
    p_orenew.co2e_production_based_per_mwh = orenew_pb;
    p_orenew.change_co2e_pct = 0.0;

    let p = rollup_vs(
        PRODUCTION,
        &[
            &p_gas,
            &p_lpg,
            &p_fueloil,
            &p_opetpro,
            &p_coal,
            &p_heatnet,
            &p_biomass,
            &p_ofossil,
            &p_orenew,
        ],
        &h18.p,
    );

    // Seasonal storage and planning of the extended heat network.
    let mut g_storage = Record::new(GRID);
    g_storage.invest_per_x = inputs.ass("Ass_H_G_heatnet_storage_invest_per_MWh")?;
    g_storage.invest = p_heatnet.energy
        * inputs.ass("Ass_H_G_heatnet_storage_pct_of_heatnet")?
        * g_storage.invest_per_x;
    g_storage.invest_com = g_storage.invest;
    main.pay(&mut g_storage, inputs);

    let mut g_planning = Record::new(GRID);
    g_planning.invest = (p_heatnet.invest + g_storage.invest)
        * inputs.ass("Ass_H_G_heatnet_planning_pct_of_invest")?;
    g_planning.invest_com = g_planning.invest;
    Trade::assumed(
        inputs,
        "Ass_H_G_planning_invest_pct_of_wage",
        "Ass_T_C_yearly_costs_per_planer",
    )?
    .pay(&mut g_planning, inputs);

    let g = Record::rollup(GRID, &[&g_storage, &g_planning]);
    let h = rollup_vs(SECTOR, &[&p, &g], &h18.h);

    let mut d_r = demand(&[
        &r30.s_gas,
        &r30.s_lpg,
        &r30.s_fueloil,
        &r30.s_coal,
        &r30.s_heatnet,
        &r30.s_biomass,
        &r30.s_solarth,
        &r30.s_heatpump,
    ]);
    let mut d_b = demand(&[
        &b30.s_gas,
        &b30.s_lpg,
        &b30.s_fueloil,
        &b30.s_coal,
        &b30.s_heatnet,
        &b30.s_biomass,
        &b30.s_solarth,
        &b30.s_heatpump,
    ]);
    let mut d_i = demand(&[&i30.s_renew_heatnet, &i30.s_renew_biomass]);
    let mut d_t = demand(&[]);
    let mut d_a = demand(&[
        &a30.s_gas,
        &a30.s_lpg,
        &a30.s_fueloil,
        &a30.s_biomass,
        &a30.s_heatpump,
    ]);
    let d = Record::rollup(Shape::ENERGY, &[&d_r, &d_b, &d_i, &d_t, &d_a]);
    set_shares(d.energy, &mut [&mut d_r, &mut d_b, &mut d_i, &mut d_t, &mut d_a]);

    debug!(
        energy = h.energy,
        heatnet = p_heatnet.energy,
        co2e = h.co2e_total,
        invest = h.invest,
        "heat target year"
    );

    Ok(H30 {
        h,
        g,
        g_storage,
        g_planning,
        d,
        d_r,
        d_b,
        d_i,
        d_t,
        d_a,
        p,
        p_gas,
        p_lpg,
        p_fueloil,
        p_opetpro,
        p_coal,
        p_heatnet,
        p_heatnet_cogen,
        p_heatnet_plant,
        p_heatnet_lheatpump,
        p_heatnet_geoth,
        p_biomass,
        p_ofossil,
        p_orenew,
        p_solarth,
        p_heatpump,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refdata::RefData;
    use crate::y2018;
    use crate::y2030::testing;
    use crate::y2030::{agri, business, electricity, industry, residences};

    fn heat(data: &RefData) -> Option<H30> {
        let inputs = testing::national(data)?;
        let r18 = y2018::residences::calc(&inputs).ok()?;
        let b18 = y2018::business::calc(&inputs).ok()?;
        let i18 = y2018::industry::calc(&inputs).ok()?;
        let a18 = y2018::agri::calc(&inputs).ok()?;
        let h18 = y2018::heat::calc(&inputs, &r18, &b18, &i18, &a18).ok()?;
        let t18 = y2018::transport::calc(&inputs).ok()?;
        let e18 = y2018::electricity::calc(&inputs, &r18, &b18, &i18, &t18, &a18, &h18).ok()?;
        let r30 = residences::calc(&inputs, &r18).ok()?;
        let b30 = business::calc(&inputs, &b18).ok()?;
        let i30 = industry::calc(&inputs, &i18).ok()?;
        let a30 = agri::calc(&inputs, &a18).ok()?;
        let core = electricity::core::calc(&inputs, &e18).ok()?;
        calc(&inputs, &h18, &r30, &b30, &i30, &a30, &core.p_local_biomass_cogen).ok()
    }

    #[test]
    fn heat_network_is_fully_supplied() {
        let data = testing::refdata();
        let h30 = data.as_ref().and_then(heat);
        let h30 = h30.expect("heat should be computed");

        let supplied = h30.p_heatnet_cogen.energy
            + h30.p_heatnet_plant.energy
            + h30.p_heatnet_lheatpump.energy
            + h30.p_heatnet_geoth.energy;
        assert!((h30.p_heatnet.energy - supplied).abs() < 1e-6);
        assert!(h30.p_heatnet_cogen.energy <= h30.p_heatnet.energy);
    }

    #[test]
    fn fossil_heat_is_retired() {
        let data = testing::refdata();
        let h30 = data.as_ref().and_then(heat);
        let h30 = h30.expect("heat should be computed");

        for r in [&h30.p_gas, &h30.p_lpg, &h30.p_fueloil, &h30.p_coal] {
            assert_eq!(r.energy, 0.0);
            assert_eq!(r.co2e_total, 0.0);
        }
        assert!((h30.p.co2e_total - h30.p_heatnet.co2e_total).abs() < 1e-6);
    }

    #[test]
    fn large_heat_pumps_draw_electricity() {
        let data = testing::refdata();
        let h30 = data.as_ref().and_then(heat);
        let h30 = h30.expect("heat should be computed");

        assert!(h30.p_heatnet_lheatpump.energy > 0.0);
        assert!(h30.p_heatnet_lheatpump.demand_electricity > 0.0);
        assert_eq!(h30.p.demand_electricity, h30.p_heatnet_lheatpump.demand_electricity);
    }
}
