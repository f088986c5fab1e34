//! Fossil and nuclear plants of the national mix, all retired by the target
//! year. Their 2018 factors stay on the records so the changes read against
//! the old generation.

use super::{FOSSIL, running_costs};
use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::Record;
use crate::utils::div;
use crate::y2018::electricity::E18;
use crate::y2030::rollup_vs;

pub(super) struct Fossil {
    pub p_fossil: Record,
    pub p_fossil_nuclear: Record,
    pub p_fossil_coal_brown: Record,
    pub p_fossil_coal_black: Record,
    pub p_fossil_gas: Record,
    pub p_fossil_ofossil: Record,
}

fn retired(inputs: &Inputs<'_>, base: &Record) -> Record {
    let mut r = Record::new(FOSSIL);
    r.co2e_combustion_based_per_mwh = base.co2e_combustion_based_per_mwh;
    r.cost_fuel_per_mwh = base.cost_fuel_per_mwh;
    r.cost_mro_per_mwh = base.cost_mro_per_mwh;
    r.set_change(base, inputs);
    running_costs(&mut r, base);
    r
}

pub(super) fn calc(inputs: &Inputs<'_>, e18: &E18) -> BalanceResult<Fossil> {
    let mut p_fossil_nuclear = retired(inputs, &e18.p_fossil_nuclear);
    // Nuclear change counted on gross production.
    p_fossil_nuclear.change_co2e_t = e18.p_fossil_nuclear.co2e_combustion_based_per_mwh
        * p_fossil_nuclear.change_energy_mwh
        * inputs.fact("Fact_E_P_ratio_gross_electricity_prod_to_fec_electricity_2018")?;
    p_fossil_nuclear.change_co2e_pct =
        div(p_fossil_nuclear.change_co2e_t, e18.p_fossil_nuclear.co2e_total);
    let p_fossil_coal_brown = retired(inputs, &e18.p_fossil_coal_brown);
    let p_fossil_coal_black = retired(inputs, &e18.p_fossil_coal_black);
    let p_fossil_gas = retired(inputs, &e18.p_fossil_gas);
    let p_fossil_ofossil = retired(inputs, &e18.p_fossil_ofossil);

    let p_fossil = rollup_vs(
        FOSSIL,
        &[
            &p_fossil_nuclear,
            &p_fossil_coal_brown,
            &p_fossil_coal_black,
            &p_fossil_gas,
            &p_fossil_ofossil,
        ],
        &e18.p_fossil,
    );

    Ok(Fossil {
        p_fossil,
        p_fossil_nuclear,
        p_fossil_coal_brown,
        p_fossil_coal_black,
        p_fossil_gas,
        p_fossil_ofossil,
    })
}
