//! Agriculture 2018: livestock, soil and operating energy.
//!
//! Livestock and soil emissions are production based. Operating energy is
//! split into heat, electricity and vehicles; as in the other building
//! sectors the heating fuels are accounted in the heat sector.

use tracing::debug;

use super::{set_shares, supply};
use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};

crate::snapshot!(
    /// Agriculture baseline.
    A18 {
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
    }
);

/// Emitter counted in heads or tonnes with a per-unit factor.
pub(crate) const UNITS: Shape = Shape::EMISSIONS.with(Shape::AMOUNT).with(Shape::PER_T);
/// Emitter counted in hectares.
const FIELDS: Shape = Shape::EMISSIONS.with(Shape::LAND);

fn per_unit(amount: f64, pb_per_unit: f64) -> Record {
    let mut r = Record::new(UNITS);
    r.amount = amount;
    r.co2e_production_based_per_t = pb_per_unit;
    r.co2e_production_based = amount * pb_per_unit;
    r.sum_emissions();
    r
}

/// Emitter of an area with a per-hectare factor.
pub(crate) fn per_ha(area_ha: f64, pb_per_ha: f64) -> Record {
    let mut r = Record::new(FIELDS);
    r.area_ha = area_ha;
    r.co2e_production_based_per_ha = pb_per_ha;
    r.co2e_production_based = area_ha * pb_per_ha;
    r.sum_emissions();
    r
}

/// Head count and the two per-head factors of one animal kind.
struct Animal {
    amount: &'static str,
    fermen: &'static str,
    manure: &'static str,
}

const DAIRYCOW: Animal = Animal {
    amount: "In_A_dairycow_amount",
    fermen: "Fact_A_P_fermen_dairycow_ratio_CO2e_to_amount_2018",
    manure: "Fact_A_P_manure_dairycow_ratio_CO2e_to_amount_2018",
};
const NONDAIRY: Animal = Animal {
    amount: "In_A_nondairy_amount",
    fermen: "Fact_A_P_fermen_nondairy_ratio_CO2e_to_amount_2018",
    manure: "Fact_A_P_manure_nondairy_ratio_CO2e_to_amount_2018",
};
const PIG: Animal = Animal {
    amount: "In_A_pig_amount",
    fermen: "Fact_A_P_fermen_pig_ratio_CO2e_to_amount_2018",
    manure: "Fact_A_P_manure_pig_ratio_CO2e_to_amount_2018",
};
const POULTRY: Animal = Animal {
    amount: "In_A_poultry_amount",
    fermen: "Fact_A_P_fermen_poultry_ratio_CO2e_to_amount_2018",
    manure: "Fact_A_P_manure_poultry_ratio_CO2e_to_amount_2018",
};
const OANIMAL: Animal = Animal {
    amount: "In_A_oanimal_amount",
    fermen: "Fact_A_P_fermen_oanimal_ratio_CO2e_to_amount_2018",
    manure: "Fact_A_P_manure_oanimal_ratio_CO2e_to_amount_2018",
};

pub fn calc(inputs: &Inputs<'_>) -> BalanceResult<A18> {
    let livestock = |animal: &Animal| -> BalanceResult<(Record, Record)> {
        let amount = inputs.entry(animal.amount)?;
        Ok((
            per_unit(amount, inputs.fact(animal.fermen)?),
            per_unit(amount, inputs.fact(animal.manure)?),
        ))
    };
    let (p_fermen_dairycow, p_manure_dairycow) = livestock(&DAIRYCOW)?;
    let (p_fermen_nondairy, p_manure_nondairy) = livestock(&NONDAIRY)?;
    let (p_fermen_pig, p_manure_pig) = livestock(&PIG)?;
    let (p_fermen_poultry, p_manure_poultry) = livestock(&POULTRY)?;
    let (p_fermen_oanimal, p_manure_oanimal) = livestock(&OANIMAL)?;

    let area_agri = inputs.entry("In_M_area_agri_com")?;
    let soil = |pct_key: &str, factor_key: &str| -> BalanceResult<Record> {
        Ok(per_ha(area_agri * inputs.fact(pct_key)?, inputs.fact(factor_key)?))
    };
    let p_soil_fertilizer = soil(
        "Fact_A_P_soil_fertilizer_pct_of_area_2018",
        "Fact_A_P_soil_fertilizer_ratio_CO2e_to_ha_2018",
    )?;
    let p_soil_manure = soil(
        "Fact_A_P_soil_manure_pct_of_area_2018",
        "Fact_A_P_soil_manure_ratio_CO2e_to_ha_2018",
    )?;
    let p_soil_grazing = soil(
        "Fact_A_P_soil_grazing_pct_of_area_2018",
        "Fact_A_P_soil_grazing_ratio_CO2e_to_ha_2018",
    )?;
    let p_soil_residue = soil(
        "Fact_A_P_soil_residue_pct_of_area_2018",
        "Fact_A_P_soil_residue_ratio_CO2e_to_ha_2018",
    )?;
    let p_soil_orgfarm = soil(
        "Fact_A_P_soil_orgfarm_pct_of_area_2018",
        "Fact_A_P_soil_orgfarm_ratio_CO2e_to_ha_2018",
    )?;

    let p_other_liming = per_unit(
        area_agri * inputs.fact("Fact_A_P_other_liming_ratio_amount_to_ha_2018")?,
        inputs.fact("Fact_A_P_other_liming_ratio_CO2e_to_amount_2018")?,
    );
    let p_other_kas = per_unit(
        area_agri * inputs.fact("Fact_A_P_other_kas_ratio_amount_to_ha_2018")?,
        inputs.fact("Fact_A_P_other_kas_ratio_CO2e_to_amount_2018")?,
    );

    let p_fermen = Record::rollup(
        Shape::EMISSIONS,
        &[
            &p_fermen_dairycow,
            &p_fermen_nondairy,
            &p_fermen_pig,
            &p_fermen_poultry,
            &p_fermen_oanimal,
        ],
    );
    let p_manure = Record::rollup(
        Shape::EMISSIONS,
        &[
            &p_manure_dairycow,
            &p_manure_nondairy,
            &p_manure_pig,
            &p_manure_poultry,
            &p_manure_oanimal,
        ],
    );
    let p_soil = Record::rollup(
        Shape::EMISSIONS.with(Shape::LAND),
        &[
            &p_soil_fertilizer,
            &p_soil_manure,
            &p_soil_grazing,
            &p_soil_residue,
            &p_soil_orgfarm,
        ],
    );
    let p_other = Record::rollup(Shape::EMISSIONS, &[&p_other_liming, &p_other_kas]);

    let total = inputs.entry("In_A_energy_total")?;
    let carrier = |key: &str| -> BalanceResult<Record> { Ok(supply(total * inputs.fact(key)?)) };
    let mut s_petrol = carrier("Fact_A_S_petrol_pct_of_fec_2018")?;
    let mut s_diesel = carrier("Fact_A_S_diesel_pct_of_fec_2018")?;
    let mut s_fueloil = carrier("Fact_A_S_fueloil_pct_of_fec_2018")?;
    let mut s_lpg = carrier("Fact_A_S_lpg_pct_of_fec_2018")?;
    let mut s_gas = carrier("Fact_A_S_gas_pct_of_fec_2018")?;
    let mut s_biomass = carrier("Fact_A_S_biomass_pct_of_fec_2018")?;
    let mut s_elec = carrier("Fact_A_S_elec_pct_of_fec_2018")?;
    let mut s_heatpump = carrier("Fact_A_S_heatpump_pct_of_fec_2018")?;

    s_petrol.co2e_combustion_based =
        s_petrol.energy * inputs.fact("Fact_A_S_petrol_ratio_CO2e_cb_to_fec_2018")?;
    s_petrol.sum_emissions();
    s_diesel.co2e_combustion_based =
        s_diesel.energy * inputs.fact("Fact_A_S_diesel_ratio_CO2e_cb_to_fec_2018")?;
    s_diesel.sum_emissions();

    let s = Record::rollup(
        Shape::EMITTER,
        &[
            &s_petrol,
            &s_diesel,
            &s_fueloil,
            &s_lpg,
            &s_gas,
            &s_biomass,
            &s_elec,
            &s_heatpump,
        ],
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
        ],
    );

    let operation = |energy: f64| {
        let mut r = Record::new(Shape::EMITTER);
        r.energy = energy;
        r
    };
    let p_operation_heat = operation(
        Record::total(&[&s_fueloil, &s_lpg, &s_gas, &s_biomass, &s_heatpump], |r| r.energy),
    );
    let p_operation_elec_elcon =
        operation(s_elec.energy * inputs.fact("Fact_A_P_operation_elec_elcon_pct_of_elec_2018")?);
    let p_operation_elec_heatpump = operation(s_elec.energy - p_operation_elec_elcon.energy);
    let mut p_operation_vehicles = operation(s_petrol.energy + s_diesel.energy);
    p_operation_vehicles.co2e_combustion_based =
        s_petrol.co2e_combustion_based + s_diesel.co2e_combustion_based;
    p_operation_vehicles.sum_emissions();
    let p_operation = Record::rollup(
        Shape::EMITTER,
        &[
            &p_operation_heat,
            &p_operation_elec_elcon,
            &p_operation_elec_heatpump,
            &p_operation_vehicles,
        ],
    );

    let p = Record::rollup(
        Shape::EMITTER,
        &[&p_fermen, &p_manure, &p_soil, &p_other, &p_operation],
    );
    let a = Record::rollup(Shape::EMITTER, &[&p]);

    debug!(energy = a.energy, co2e = a.co2e_total, "agriculture 2018");

    Ok(A18 {
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
    })
}
