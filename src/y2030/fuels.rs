//! Fuels in the target year: synthetic fuels made from renewable
//! electricity.
//!
//! Production takes as much CO2e out of the air as the fuel later releases
//! where it is burned, so every synthetic fuel carries a negative
//! production-based emission. Hydrogen for reconverting stored energy is
//! sized on the electricity demand of all other sectors before the
//! electricity module runs.

use tracing::debug;

use super::rollup_vs;
use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::utils::div;
use crate::y2018::fuels::F18;
use crate::y2018::set_shares;
use crate::y2030::agri::A30;
use crate::y2030::business::B30;
use crate::y2030::heat::H30;
use crate::y2030::industry::I30;
use crate::y2030::residences::R30;
use crate::y2030::transport::T30;

crate::snapshot!(
    /// Fuels in the target year.
    F30 {
        f,
        d,
        d_r,
        d_b,
        d_i,
        d_t,
        d_a,
        d_e_hydrogen_reconv,
        p,
        p_efuels,
        p_petrol,
        p_jetfuel,
        p_diesel,
        p_bioethanol,
        p_biodiesel,
        p_biogas,
        p_emethan,
        p_hydrogen,
        p_hydrogen_reconv,
        p_hydrogen_total,
    }
);

/// Fuel produced by electrolysis and synthesis plants.
const PLANT: Shape = Shape::BALANCE
    .with(Shape::PER_MWH)
    .with(Shape::DEMAND)
    .with(Shape::INVESTMENT)
    .with(Shape::INVEST_OUTSIDE)
    .with(Shape::POWER);
/// Fuel of a kind that was not produced in 2018; no relative energy change.
const NEW_PLANT: Shape = PLANT.without(Shape::ENERGY_CHANGE_PCT);
const RETIRED: Shape = Shape::BALANCE.with(Shape::PER_MWH);
const DEMAND: Shape = Shape::ENERGY.with(Shape::PCT);

/// Conversion parameters of one production route.
struct Route {
    invest_per_power: &'static str,
    full_load_hours: &'static str,
    efficiency: &'static str,
}

const POWER_TO_LIQUID: Route = Route {
    invest_per_power: "Ass_S_efuels_invest_per_power",
    full_load_hours: "Ass_S_power_to_x_full_load_hours2",
    efficiency: "Ass_S_efuels_efficiency",
};

const METHANATION: Route = Route {
    invest_per_power: "Ass_S_methan_invest_per_power",
    full_load_hours: "Ass_S_power_to_x_full_load_hours2",
    efficiency: "Ass_S_methan_efficiency",
};

const ELECTROLYSIS: Route = Route {
    invest_per_power: "Ass_S_electrolyses_invest_per_power",
    full_load_hours: "Ass_F_P_electrolysis_full_load_hours",
    efficiency: "Ass_F_P_electrolysis_efficiency",
};

/// Synthetic fuel production of `energy` whose combustion emits
/// `tank_to_wheel` per MWh elsewhere.
fn synthesize(
    inputs: &Inputs<'_>,
    shape: Shape,
    route: &Route,
    energy: f64,
    tank_to_wheel: f64,
    base: &Record,
) -> BalanceResult<Record> {
    let mut r = Record::new(shape);
    r.energy = energy;
    r.co2e_production_based_per_mwh = -tank_to_wheel;
    r.co2e_production_based = energy * r.co2e_production_based_per_mwh;
    r.sum_emissions();
    r.set_change(base, inputs);

    r.demand_electricity = div(energy, inputs.ass(route.efficiency)?);
    r.full_load_hour = inputs.ass(route.full_load_hours)?;
    r.power_to_be_installed = div(r.demand_electricity, r.full_load_hour);
    r.invest_per_x = inputs.ass(route.invest_per_power)?;
    r.invest = r.power_to_be_installed * r.invest_per_x;
    // Plants are built outside the municipality.
    r.invest_outside = r.invest;
    r.annualize(inputs);
    r.set_wages(
        inputs.ass("Ass_S_constr_renew_gas_pct_of_wage_2017")?,
        inputs.ass("Ass_S_constr_renew_gas_wage_per_year_2017")?,
    );
    Ok(r)
}

/// Fuel of a kind that did not exist in 2018.
fn new_fuel(inputs: &Inputs<'_>, route: &Route, energy: f64, tank_to_wheel: f64) -> BalanceResult<Record> {
    let mut r = synthesize(inputs, NEW_PLANT, route, energy, tank_to_wheel, &Record::new(RETIRED))?;
    r.change_co2e_pct = 0.0;
    Ok(r)
}

/// Biofuel without a synthetic successor.
fn retired(inputs: &Inputs<'_>, base: &Record) -> Record {
    let mut r = Record::new(RETIRED);
    r.co2e_production_based_per_mwh = base.co2e_production_based_per_mwh;
    r.set_change(base, inputs);
    r
}

fn demand(energy: f64) -> Record {
    let mut r = Record::new(DEMAND);
    r.energy = energy;
    r
}

#[allow(clippy::too_many_arguments)]
pub fn calc(
    inputs: &Inputs<'_>,
    f18: &F18,
    r30: &R30,
    b30: &B30,
    i30: &I30,
    t30: &T30,
    a30: &A30,
    h30: &H30,
) -> BalanceResult<F30> {
    let operation = &a30.p_operation;

    let p_petrol = synthesize(
        inputs,
        PLANT,
        &POWER_TO_LIQUID,
        t30.t.demand_epetrol + operation.demand_epetrol,
        inputs.fact("Fact_T_S_petrol_EmFa_tank_wheel_2018")?,
        &f18.p_petrol,
    )?;
    let p_jetfuel = synthesize(
        inputs,
        PLANT,
        &POWER_TO_LIQUID,
        t30.t.demand_ejetfuel,
        inputs.fact("Fact_T_S_petroljet_EmFa_tank_wheel_2018")?,
        &f18.p_jetfuel,
    )?;
    let p_diesel = synthesize(
        inputs,
        PLANT,
        &POWER_TO_LIQUID,
        b30.p.demand_ediesel + t30.t.demand_ediesel + operation.demand_ediesel,
        inputs.fact("Fact_T_S_diesel_EmFa_tank_wheel_2018")?,
        &f18.p_diesel,
    )?;
    let p_efuels = rollup_vs(
        PLANT,
        &[&p_petrol, &p_jetfuel, &p_diesel],
        &Record::rollup(RETIRED, &[&f18.p_petrol, &f18.p_jetfuel, &f18.p_diesel]),
    );

    let p_bioethanol = retired(inputs, &f18.p_bioethanol);
    let p_biodiesel = retired(inputs, &f18.p_biodiesel);
    let p_biogas = retired(inputs, &f18.p_biogas);

    let p_emethan = new_fuel(
        inputs,
        &METHANATION,
        r30.p.demand_emethan + b30.p.demand_emethan + i30.p.demand_emethan + operation.demand_emethan,
        inputs.fact("Fact_T_S_methan_EmFa_tank_wheel_2018")?,
    )?;
    let p_hydrogen = new_fuel(
        inputs,
        &ELECTROLYSIS,
        i30.p.demand_hydrogen + t30.t.demand_hydrogen,
        0.0,
    )?;

    // Reconversion covers the residual load of the electricity demand known
    // so far; the electricity module itself has not run yet.
    let known_demand = Record::total(
        &[&h30.p, &r30.p, &b30.p, &i30.p, &t30.t, operation],
        |r| r.demand_electricity,
    ) + Record::total(
        &[&p_petrol, &p_jetfuel, &p_diesel, &p_emethan, &p_hydrogen],
        |r| r.demand_electricity,
    );
    let p_hydrogen_reconv = new_fuel(
        inputs,
        &ELECTROLYSIS,
        known_demand * inputs.ass("Ass_E_P_renew_reverse_addon_to_demand_2035")?
            / inputs.ass("Ass_E_P_renew_reverse_gud_efficiency")?,
        0.0,
    )?;
    let p_hydrogen_total = Record::rollup(Shape::ENERGY, &[&p_hydrogen, &p_hydrogen_reconv]);

    let p = rollup_vs(
        PLANT,
        &[
            &p_efuels,
            &p_bioethanol,
            &p_biodiesel,
            &p_biogas,
            &p_emethan,
            &p_hydrogen,
            &p_hydrogen_reconv,
        ],
        &f18.p,
    );
    let f = rollup_vs(PLANT, &[&p], &f18.f);

    let mut d_r = demand(r30.p.demand_emethan);
    let mut d_b = demand(b30.p.demand_emethan + b30.p.demand_ediesel);
    let mut d_i = demand(i30.p.demand_emethan + i30.p.demand_hydrogen);
    let mut d_t = demand(
        t30.t.demand_epetrol + t30.t.demand_ediesel + t30.t.demand_ejetfuel + t30.t.demand_hydrogen,
    );
    let mut d_a = demand(operation.demand_epetrol + operation.demand_ediesel + operation.demand_emethan);
    let mut d_e_hydrogen_reconv = demand(p_hydrogen_reconv.energy);
    let d = Record::rollup(
        Shape::ENERGY,
        &[&d_r, &d_b, &d_i, &d_t, &d_a, &d_e_hydrogen_reconv],
    );
    set_shares(
        d.energy,
        &mut [
            &mut d_r,
            &mut d_b,
            &mut d_i,
            &mut d_t,
            &mut d_a,
            &mut d_e_hydrogen_reconv,
        ],
    );

    debug!(
        energy = f.energy,
        electricity = f.demand_electricity,
        co2e = f.co2e_total,
        invest = f.invest,
        "fuels target year"
    );

    Ok(F30 {
        f,
        d,
        d_r,
        d_b,
        d_i,
        d_t,
        d_a,
        d_e_hydrogen_reconv,
        p,
        p_efuels,
        p_petrol,
        p_jetfuel,
        p_diesel,
        p_bioethanol,
        p_biodiesel,
        p_biogas,
        p_emethan,
        p_hydrogen,
        p_hydrogen_reconv,
        p_hydrogen_total,
    })
}

#[cfg(test)]
mod tests {
    use crate::y2030::testing;

    #[test]
    fn production_matches_demand() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        let f30 = &b.f30;
        assert!(f30.d.energy > 0.0);
        assert!((f30.d.energy - f30.p.energy).abs() < 1e-6 * f30.d.energy);
        assert_eq!(f30.d_e_hydrogen_reconv.energy, f30.p_hydrogen_reconv.energy);
        assert_eq!(
            f30.p_hydrogen_total.energy,
            f30.p_hydrogen.energy + f30.p_hydrogen_reconv.energy
        );
    }

    #[test]
    fn synthetic_fuels_capture_their_combustion() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        let f30 = &b.f30;
        assert!(f30.p_diesel.energy > 0.0);
        assert!(f30.p_diesel.co2e_production_based < 0.0);
        assert_eq!(f30.p_hydrogen.co2e_total, 0.0);
        assert_eq!(f30.p_bioethanol.energy, 0.0);
        assert!(f30.p_bioethanol.change_energy_mwh <= 0.0);
        assert_eq!(f30.p_emethan.change_co2e_pct, 0.0);
    }

    #[test]
    fn new_fuels_report_no_relative_energy_change() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        for name in ["p_emethan", "p_hydrogen", "p_hydrogen_reconv"] {
            let key = format!("f30.{name}");
            assert_eq!(b.get(&format!("{key}.change_energy_pct")), None, "{name}");
            assert_eq!(
                b.get(&format!("{key}.change_energy_MWh")),
                b.get(&format!("{key}.energy")),
                "{name}"
            );
        }
        assert!(b.get("f30.p_diesel.change_energy_pct").is_some());
    }

    #[test]
    fn reconversion_is_sized_on_prior_electricity_demand() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        // Everything the electricity sector supplies except the reconversion
        // itself.
        let e30 = &b.e30;
        let prior = e30.d.energy - e30.d_f_hydrogen_reconv.energy;
        assert!(b.f30.p_hydrogen_reconv.energy > 0.0);
        assert!(b.f30.p_hydrogen_reconv.energy < prior);
        assert!(b.f30.p_hydrogen_reconv.demand_electricity > b.f30.p_hydrogen_reconv.energy);
    }
}
