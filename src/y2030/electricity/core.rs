//! Local biomass plants, computed ahead of the heat sector which draws the
//! heat of their cogeneration.

use super::{PLANT, hire, loss, running_costs};
use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::utils::div;
use crate::y2018::electricity::E18;
use crate::y2030::{Trade, population_share};

/// Local biomass generation and its cogenerated heat.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalBiomass {
    pub p_local_biomass: Record,
    pub p_local_biomass_cogen: Record,
}

pub fn calc(inputs: &Inputs<'_>, e18: &E18) -> BalanceResult<LocalBiomass> {
    let loss = loss(inputs)?;
    let mut r = Record::new(PLANT);
    r.power_installed = inputs.entry("In_E_PV_power_inst_biomass")?;
    r.power_to_be_installed_pct = inputs.entry("In_E_PV_power_to_be_inst_local_biomass")?;
    r.power_installable = inputs.entry("In_E_biomass_local_power_installable_sta")?;
    r.full_load_hour = inputs.fact("Fact_E_P_biomass_full_load_hours")?;
    r.power_to_be_installed =
        (r.power_installable * r.power_to_be_installed_pct - r.power_installed).max(0.0);
    r.energy = (r.power_installed + r.power_to_be_installed) * r.full_load_hour * (1.0 - loss);
    r.energy_installable = r.power_installable * r.full_load_hour * (1.0 - loss);

    r.co2e_combustion_based_per_mwh =
        inputs.fact("Fact_E_P_biomass_ratio_CO2e_cb_nonCO2_to_gep_2018")? / (1.0 - loss);
    r.co2e_combustion_based = r.energy * r.co2e_combustion_based_per_mwh;
    r.sum_emissions();
    r.set_change(&e18.p_local_biomass, inputs);
    // The whole emission counts as change: no local biomass is credited in 2018.
    r.change_co2e_t = r.co2e_total;
    r.change_co2e_pct = div(r.change_co2e_t, e18.p_local_biomass.co2e_total);

    r.cost_fuel_per_mwh = inputs.ass("Ass_E_P_local_biomass_material_costs")?
        / inputs.ass("Ass_E_P_local_biomass_efficiency")?;
    r.cost_mro_per_mwh = inputs.ass("Ass_E_P_local_biomass_mro_per_MWh")?;
    running_costs(&mut r, &e18.p_local_biomass);

    r.invest_per_x = inputs.ass("Ass_E_P_local_biomass_ratio_invest_to_power")?;
    r.invest = r.power_to_be_installed * r.invest_per_x;
    Trade::plant_construction(inputs)?.pay(&mut r, inputs);
    // Wages of local biomass plants are spread over the target period twice.
    r.cost_wage /= inputs.duration_target;
    r.demand_emplo = div(r.cost_wage, r.ratio_wage_to_emplo);
    hire(&mut r, inputs.fact("Fact_E_P_biomass_emplo_2018")? * population_share(inputs)?);

    let mut cogen = Record::new(Shape::ENERGY.with(Shape::PCT));
    cogen.pct_energy = inputs.ass("Ass_E_P_local_biomass_cogen_pct")?;
    cogen.energy = r.energy * cogen.pct_energy;

    Ok(LocalBiomass {
        p_local_biomass: r,
        p_local_biomass_cogen: cogen,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::y2030::testing;

    #[test]
    fn local_biomass_follows_the_reference_model() {
        let data = testing::refdata().expect("built-in data should load");
        let balance = testing::balance(&data).expect("national balance should succeed");
        let inputs = testing::national(&data).expect("national inputs should resolve");
        let loss = loss(&inputs).expect("loss should resolve");
        let r = &balance.e30.p_local_biomass;

        assert!(r.energy_installable > 0.0);
        assert_eq!(
            r.energy_installable,
            r.power_installable * r.full_load_hour * (1.0 - loss)
        );
        assert_eq!(r.change_co2e_t, r.co2e_total);
        let cost_wage = r.invest_pa * r.pct_of_wage / inputs.duration_target;
        assert!((r.cost_wage - cost_wage).abs() <= 1e-9 * cost_wage.abs().max(1.0));
        assert_eq!(r.demand_emplo, div(r.cost_wage, r.ratio_wage_to_emplo));
    }
}
