//! Electricity in the target year.
//!
//! The demand of every other target-year sector is supplied by the national
//! renewable mix in the municipality's share and by local plants. Fossil
//! and nuclear plants are retired. Local biomass is computed up front in
//! [`core`] because the heat network draws its cogenerated heat.

pub mod core;
mod demand;
mod fossil;
mod grid;
mod local;
mod renew;

use tracing::debug;

pub use self::core::LocalBiomass;
pub use self::demand::Consumers;

use super::{Trade, rollup_vs};
use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::utils::{MILLION, div};
use crate::y2018::business::B18;
use crate::y2018::electricity::E18;
use crate::y2018::residences::R18;
use crate::y2018::set_shares;

crate::snapshot!(
    /// Electricity in the target year.
    E30 {
        e,
        g,
        g_grid_offshore,
        g_grid_onshore,
        g_grid_pv,
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
        p_renew_reverse,
        p_local,
        p_local_pv,
        p_local_pv_roof,
        p_local_pv_facade,
        p_local_pv_park,
        p_local_pv_agri,
        p_local_wind_onshore,
        p_local_biomass,
        p_local_biomass_cogen,
        p_local_hydro,
        p_local_surplus,
    }
);

/// Generating plant with running costs, investment and jobs.
pub(crate) const PLANT: Shape = Shape::BALANCE
    .with(Shape::PCT)
    .with(Shape::PER_MWH)
    .with(Shape::FUEL_COST)
    .with(Shape::MRO)
    .with(Shape::INVESTMENT)
    .with(Shape::INVEST_COM)
    .with(Shape::INVEST_OUTSIDE)
    .with(Shape::EMPLOYMENT)
    .with(Shape::POWER)
    .with(Shape::AREA);
/// Retired plant: only its running costs and changes remain.
const FOSSIL: Shape = Shape::BALANCE
    .with(Shape::PCT)
    .with(Shape::PER_MWH)
    .with(Shape::FUEL_COST)
    .with(Shape::MRO);
const SECTOR: Shape = Shape::BALANCE
    .with(Shape::FUEL_COST)
    .with(Shape::MRO)
    .with(Shape::INVESTMENT)
    .with(Shape::INVEST_COM)
    .with(Shape::INVEST_OUTSIDE)
    .with(Shape::EMPLOYMENT);

/// Share of gross generation lost before it reaches the consumer.
fn loss(inputs: &Inputs<'_>) -> BalanceResult<f64> {
    inputs.ass("Ass_E_P_renew_loss_brutto_to_netto")
}

/// Fuel and MRO costs from the per-MWh figures, with their change
/// against 2018.
fn running_costs(r: &mut Record, base: &Record) {
    r.cost_fuel = r.energy * r.cost_fuel_per_mwh / MILLION;
    r.cost_mro = r.energy * r.cost_mro_per_mwh / MILLION;
    r.change_cost_energy = r.cost_fuel - base.cost_fuel;
    r.change_cost_mro = r.cost_mro - base.cost_mro;
}

/// Clears the CO2e change of plants whose savings are not credited yet.
fn without_co2e_change(r: &mut Record) {
    r.change_co2e_t = 0.0;
    r.change_co2e_pct = 0.0;
    r.cost_climate_saved = 0.0;
}

/// Only jobs beyond the existing workforce are new.
fn hire(r: &mut Record, existing: f64) {
    r.emplo_existing = existing;
    r.demand_emplo_new = (r.demand_emplo - existing).max(0.0);
}

impl Trade {
    /// Power plant construction.
    fn plant_construction(inputs: &Inputs<'_>) -> BalanceResult<Self> {
        Trade::assumed(
            inputs,
            "Ass_E_P_constr_plant_invest_pct_of_wage_2017",
            "Ass_E_P_constr_elec_ratio_wage_to_emplo_2017",
        )
    }

    /// Electricians mounting photovoltaics.
    fn pv_installation(inputs: &Inputs<'_>) -> BalanceResult<Self> {
        Trade::assumed(
            inputs,
            "Ass_E_P_pv_invest_pct_of_wage",
            "Ass_E_P_constr_elec_ratio_wage_to_emplo_2017",
        )
    }
}

pub fn calc(
    inputs: &Inputs<'_>,
    e18: &E18,
    r18: &R18,
    b18: &B18,
    consumers: &Consumers<'_>,
    biomass: &LocalBiomass,
) -> BalanceResult<E30> {
    let mut demand = demand::calc(inputs, e18, consumers)?;
    let mut fossil = fossil::calc(inputs, e18)?;
    let mut renew = renew::calc(inputs, e18, demand.without_reconversion())?;

    let mut p_fossil_and_renew = rollup_vs(
        PLANT,
        &[&fossil.p_fossil, &renew.p_renew],
        &e18.p_fossil_and_renew,
    );
    p_fossil_and_renew.pct_energy = div(p_fossil_and_renew.energy, demand.d.energy);
    set_shares(
        p_fossil_and_renew.energy,
        &mut [
            &mut fossil.p_fossil,
            &mut fossil.p_fossil_nuclear,
            &mut fossil.p_fossil_coal_brown,
            &mut fossil.p_fossil_coal_black,
            &mut fossil.p_fossil_gas,
            &mut fossil.p_fossil_ofossil,
            &mut renew.p_renew,
            &mut renew.p_renew_pv,
            &mut renew.p_renew_wind,
            &mut renew.p_renew_wind_onshore,
            &mut renew.p_renew_wind_offshore,
            &mut renew.p_renew_biomass,
            &mut renew.p_renew_geoth,
            &mut renew.p_renew_hydro,
            &mut renew.p_renew_reverse,
        ],
    );

    let mut local = local::calc(
        inputs,
        &local::Neighbours {
            e18,
            r18,
            b18,
            biomass,
            demand: demand.d.energy,
            national: p_fossil_and_renew.energy,
        },
    )?;
    set_shares(
        local.p_local.energy,
        &mut [
            &mut local.p_local_pv,
            &mut local.p_local_wind_onshore,
            &mut local.p_local_biomass,
            &mut local.p_local_hydro,
        ],
    );
    set_shares(
        local.p_local_pv.energy,
        &mut [
            &mut local.p_local_pv_roof,
            &mut local.p_local_pv_facade,
            &mut local.p_local_pv_park,
            &mut local.p_local_pv_agri,
        ],
    );

    let p = rollup_vs(PLANT, &[&p_fossil_and_renew, &local.p_local], &e18.p);
    local.p_local.pct_energy = div(local.p_local.energy, p.energy);
    // Shares of the total generation.
    for r in [
        &mut renew.p_renew_wind_offshore,
        &mut renew.p_renew_geoth,
        &mut renew.p_renew_reverse,
        &mut local.p_local_pv,
        &mut local.p_local_wind_onshore,
        &mut local.p_local_biomass,
        &mut local.p_local_hydro,
        &mut local.p_local_pv_roof,
    ] {
        r.pct_x = div(r.energy, p.energy);
    }

    let grids = grid::calc(
        inputs,
        &renew.p_renew_wind_offshore,
        &local.p_local_wind_onshore,
        &local.p_local_pv,
    )?;
    let e = rollup_vs(SECTOR, &[&p, &grids.g], &e18.e);

    demand.charge(p_fossil_and_renew.energy, p.energy);

    debug!(
        demand = demand.d.energy,
        local = local.p_local.energy,
        co2e = e.co2e_total,
        invest = e.invest,
        "electricity target year"
    );

    Ok(E30 {
        e,
        g: grids.g,
        g_grid_offshore: grids.g_grid_offshore,
        g_grid_onshore: grids.g_grid_onshore,
        g_grid_pv: grids.g_grid_pv,
        d: demand.d,
        d_r: demand.d_r,
        d_b: demand.d_b,
        d_i: demand.d_i,
        d_t: demand.d_t,
        d_a: demand.d_a,
        d_h: demand.d_h,
        d_f_wo_hydrogen: demand.d_f_wo_hydrogen,
        d_f_hydrogen_reconv: demand.d_f_hydrogen_reconv,
        p,
        p_fossil_and_renew,
        p_fossil: fossil.p_fossil,
        p_fossil_nuclear: fossil.p_fossil_nuclear,
        p_fossil_coal_brown: fossil.p_fossil_coal_brown,
        p_fossil_coal_black: fossil.p_fossil_coal_black,
        p_fossil_gas: fossil.p_fossil_gas,
        p_fossil_ofossil: fossil.p_fossil_ofossil,
        p_renew: renew.p_renew,
        p_renew_pv: renew.p_renew_pv,
        p_renew_pv_roof: renew.p_renew_pv_roof,
        p_renew_pv_facade: renew.p_renew_pv_facade,
        p_renew_pv_park: renew.p_renew_pv_park,
        p_renew_pv_agri: renew.p_renew_pv_agri,
        p_renew_wind: renew.p_renew_wind,
        p_renew_wind_onshore: renew.p_renew_wind_onshore,
        p_renew_wind_offshore: renew.p_renew_wind_offshore,
        p_renew_biomass: renew.p_renew_biomass,
        p_renew_geoth: renew.p_renew_geoth,
        p_renew_hydro: renew.p_renew_hydro,
        p_renew_reverse: renew.p_renew_reverse,
        p_local: local.p_local,
        p_local_pv: local.p_local_pv,
        p_local_pv_roof: local.p_local_pv_roof,
        p_local_pv_facade: local.p_local_pv_facade,
        p_local_pv_park: local.p_local_pv_park,
        p_local_pv_agri: local.p_local_pv_agri,
        p_local_wind_onshore: local.p_local_wind_onshore,
        p_local_biomass: local.p_local_biomass,
        p_local_biomass_cogen: biomass.p_local_biomass_cogen.clone(),
        p_local_hydro: local.p_local_hydro,
        p_local_surplus: local.p_local_surplus,
    })
}

#[cfg(test)]
mod tests {
    use crate::utils::div;
    use crate::y2030::testing;

    #[test]
    fn plants_report_their_share_of_the_generation() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        let e30 = &b.e30;
        for (name, r) in [
            ("p_renew_wind_offshore", &e30.p_renew_wind_offshore),
            ("p_renew_geoth", &e30.p_renew_geoth),
            ("p_renew_reverse", &e30.p_renew_reverse),
            ("p_local_pv", &e30.p_local_pv),
            ("p_local_wind_onshore", &e30.p_local_wind_onshore),
            ("p_local_biomass", &e30.p_local_biomass),
            ("p_local_hydro", &e30.p_local_hydro),
            ("p_local_pv_roof", &e30.p_local_pv_roof),
        ] {
            assert_eq!(r.pct_x, div(r.energy, e30.p.energy), "{name}");
        }
        assert!(e30.p_renew_wind_offshore.pct_x > 0.0);
        assert!(e30.p_local_wind_onshore.pct_x > 0.0);
        assert!(e30.p_local_pv_roof.pct_x > 0.0);
    }

    #[test]
    fn sector_demands_change_against_2018() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        let (e18, e30) = (&b.e18, &b.e30);
        for (name, now, then) in [
            ("d_r", &e30.d_r, &e18.d_r),
            ("d_b", &e30.d_b, &e18.d_b),
            ("d_i", &e30.d_i, &e18.d_i),
            ("d_t", &e30.d_t, &e18.d_t),
            ("d_a", &e30.d_a, &e18.d_a),
            ("d_h", &e30.d_h, &e18.d_h),
            ("d_f_hydrogen_reconv", &e30.d_f_hydrogen_reconv, &e18.d_f_hydrogen_reconv),
            ("d", &e30.d, &e18.d),
        ] {
            assert_eq!(now.change_energy_mwh, now.energy - then.energy, "{name}");
            assert_eq!(
                now.change_energy_pct,
                div(now.change_energy_mwh, then.energy),
                "{name}"
            );
        }
        assert_eq!(e18.d_f_wo_hydrogen.energy, 0.0);
        assert_eq!(e18.d_f_hydrogen_reconv.energy, 0.0);
        assert_eq!(e30.d_f_wo_hydrogen.change_energy_mwh, e30.d_f_wo_hydrogen.energy);

        assert!(b.get("e30.d_r.change_energy_MWh").is_some());
        assert!(b.get("e30.d_h.change_energy_pct").is_some());
        assert_eq!(b.get("e30.d.change_CO2e_t"), None);
        assert_eq!(b.get("e30.d.cost_climate_saved"), None);
    }

    #[test]
    fn demand_is_the_sum_of_the_sector_demands() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        let e30 = &b.e30;
        let parts = e30.d_r.energy
            + e30.d_b.energy
            + e30.d_i.energy
            + e30.d_t.energy
            + e30.d_a.energy
            + e30.d_h.energy
            + e30.d_f_wo_hydrogen.energy
            + e30.d_f_hydrogen_reconv.energy;
        assert!((e30.d.energy - parts).abs() < 1e-9 * e30.d.energy.max(1.0));
        assert_eq!(e30.d_r.energy, b.r30.p.demand_electricity);
        assert_eq!(e30.d_h.energy, b.h30.p.demand_electricity);
        assert_eq!(e30.d_f_hydrogen_reconv.energy, b.f30.p_hydrogen_reconv.demand_electricity);
    }

    #[test]
    fn fossil_plants_are_retired() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        assert_eq!(b.e30.p_fossil.energy, 0.0);
        assert_eq!(b.e30.p_fossil.co2e_total, 0.0);
        assert!((b.e30.p_fossil.change_energy_mwh + b.e18.p_fossil.energy).abs() < 1e-6);
        assert_eq!(b.e30.p_fossil_coal_brown.cost_fuel, 0.0);
    }

    #[test]
    fn agrivoltaics_close_the_supply_gap() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        let e30 = &b.e30;
        if e30.p_local_pv_agri.energy > 0.0 {
            assert!((e30.p.energy - e30.d.energy).abs() < 1e-6 * e30.d.energy);
        } else {
            assert!(e30.p.energy >= e30.d.energy);
        }
        assert!((e30.p_local_surplus.energy - (e30.p_local.energy - e30.d.energy)).abs() < 1e-6);
    }

    #[test]
    fn grids_follow_the_added_power() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        let e30 = &b.e30;
        assert_eq!(
            e30.g_grid_onshore.power_to_be_installed,
            e30.p_local_wind_onshore.power_to_be_installed
        );
        assert_eq!(e30.g_grid_pv.power_to_be_installed, e30.p_local_pv.power_to_be_installed);
        assert!((e30.e.invest - e30.p.invest - e30.g.invest).abs() < 1e-6);
    }
}
