//! Industry 2018: energy, production volume and emissions per branch.
//!
//! The municipal final energy consumption of industry (`In_I_energy_total`)
//! is split into branches and products by national shares; production
//! volumes and emissions follow from the national 2018 intensities.

use tracing::debug;

use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::utils::div;

crate::snapshot!(
    /// Industry baseline.
    I18 {
        i,
        p,
        p_miner,
        p_miner_cement,
        p_miner_chalk,
        p_miner_glas,
        p_miner_ceram,
        p_chem,
        p_chem_basic,
        p_chem_ammonia,
        p_chem_other,
        p_metal,
        p_metal_steel,
        p_metal_steel_primary,
        p_metal_steel_secondary,
        p_metal_nonfe,
        p_other,
        p_other_paper,
        p_other_food,
        p_other_further,
        p_other_2efgh,
        s,
        s_fossil,
        s_fossil_gas,
        s_fossil_coal,
        s_fossil_diesel,
        s_fossil_fueloil,
        s_fossil_lpg,
        s_fossil_opetpro,
        s_fossil_ofossil,
        s_renew,
        s_renew_hydrogen,
        s_renew_emethan,
        s_renew_biomass,
        s_renew_heatnet,
        s_renew_heatpump,
        s_renew_solarth,
        s_renew_elec,
    }
);

const PRODUCT: Shape = Shape::EMITTER.with(Shape::PER_T).with(Shape::PRODUCTION);
const BRANCH: Shape = Shape::EMITTER.with(Shape::PRODUCTION);
const SUPPLY: Shape = Shape::ENERGY.with(Shape::PCT);

/// Fact keys describing one product of a branch.
struct ProductKeys {
    pct_of_branch: &'static str,
    fec_per_t: &'static str,
    pb_per_t: &'static str,
    cb_per_t: &'static str,
}

fn product(inputs: &Inputs<'_>, branch_energy: f64, keys: &ProductKeys) -> BalanceResult<Record> {
    let mut r = Record::new(PRODUCT);
    r.energy = branch_energy * inputs.fact(keys.pct_of_branch)?;
    r.prod_volume = div(r.energy, inputs.fact(keys.fec_per_t)?);
    r.co2e_production_based_per_t = inputs.fact(keys.pb_per_t)?;
    r.co2e_combustion_based_per_t = inputs.fact(keys.cb_per_t)?;
    r.co2e_production_based = r.prod_volume * r.co2e_production_based_per_t;
    r.co2e_combustion_based = r.prod_volume * r.co2e_combustion_based_per_t;
    r.sum_emissions();
    Ok(r)
}

fn supply(inputs: &Inputs<'_>, total: f64, pct_key: &str) -> BalanceResult<Record> {
    let mut r = Record::new(SUPPLY);
    r.pct_energy = inputs.fact(pct_key)?;
    r.energy = total * r.pct_energy;
    Ok(r)
}

pub fn calc(inputs: &Inputs<'_>) -> BalanceResult<I18> {
    let total = inputs.entry("In_I_energy_total")?;

    let miner = total * inputs.fact("Fact_I_S_miner_fec_pct_of_total_2018")?;
    let p_miner_cement = product(
        inputs,
        miner,
        &ProductKeys {
            pct_of_branch: "Fact_I_P_miner_cement_fec_pct_of_miner_2018",
            fec_per_t: "Fact_I_P_miner_cement_ratio_fec_to_prodvol_2018",
            pb_per_t: "Fact_I_P_miner_cement_ratio_CO2e_pb_to_prodvol_2018",
            cb_per_t: "Fact_I_P_miner_cement_ratio_CO2e_cb_to_prodvol_2018",
        },
    )?;
    let p_miner_chalk = product(
        inputs,
        miner,
        &ProductKeys {
            pct_of_branch: "Fact_I_P_miner_chalk_fec_pct_of_miner_2018",
            fec_per_t: "Fact_I_P_miner_chalk_ratio_fec_to_prodvol_2018",
            pb_per_t: "Fact_I_P_miner_chalk_ratio_CO2e_pb_to_prodvol_2018",
            cb_per_t: "Fact_I_P_miner_chalk_ratio_CO2e_cb_to_prodvol_2018",
        },
    )?;
    let p_miner_glas = product(
        inputs,
        miner,
        &ProductKeys {
            pct_of_branch: "Fact_I_P_miner_glas_fec_pct_of_miner_2018",
            fec_per_t: "Fact_I_P_miner_glas_ratio_fec_to_prodvol_2018",
            pb_per_t: "Fact_I_P_miner_glas_ratio_CO2e_pb_to_prodvol_2018",
            cb_per_t: "Fact_I_P_miner_glas_ratio_CO2e_cb_to_prodvol_2018",
        },
    )?;
    let p_miner_ceram = product(
        inputs,
        miner,
        &ProductKeys {
            pct_of_branch: "Fact_I_P_miner_ceram_fec_pct_of_miner_2018",
            fec_per_t: "Fact_I_P_miner_ceram_ratio_fec_to_prodvol_2018",
            pb_per_t: "Fact_I_P_miner_ceram_ratio_CO2e_pb_to_prodvol_2018",
            cb_per_t: "Fact_I_P_miner_ceram_ratio_CO2e_cb_to_prodvol_2018",
        },
    )?;
    let p_miner = Record::rollup(
        BRANCH,
        &[&p_miner_cement, &p_miner_chalk, &p_miner_glas, &p_miner_ceram],
    );

    let chem = total * inputs.fact("Fact_I_S_chem_fec_pct_of_total_2018")?;
    let p_chem_basic = product(
        inputs,
        chem,
        &ProductKeys {
            pct_of_branch: "Fact_I_P_chem_basic_wo_ammonia_fec_pct_of_chem_2018",
            fec_per_t: "Fact_I_P_chem_basic_wo_ammonia_ratio_fec_to_prodvol_2018",
            pb_per_t: "Fact_I_P_chem_basic_wo_ammonia_ratio_CO2e_pb_to_prodvol_2018",
            cb_per_t: "Fact_I_P_chem_basic_wo_ammonia_ratio_CO2e_cb_to_prodvol_2018",
        },
    )?;
    let p_chem_ammonia = product(
        inputs,
        chem,
        &ProductKeys {
            pct_of_branch: "Fact_I_P_chem_ammonia_fec_pct_of_chem_2018",
            fec_per_t: "Fact_I_P_chem_ammonia_ratio_fec_to_prodvol_2018",
            pb_per_t: "Fact_I_P_chem_ammonia_ratio_CO2e_pb_to_prodvol_2018",
            cb_per_t: "Fact_I_P_chem_ammonia_ratio_CO2e_cb_to_prodvol_2018",
        },
    )?;
    let p_chem_other = product(
        inputs,
        chem,
        &ProductKeys {
            pct_of_branch: "Fact_I_P_chem_other_fec_pct_of_chem_2018",
            fec_per_t: "Fact_I_P_chem_other_ratio_fec_to_prodvol_2018",
            pb_per_t: "Fact_I_P_chem_other_ratio_CO2e_pb_to_prodvol_2018",
            cb_per_t: "Fact_I_P_chem_other_ratio_CO2e_cb_to_prodvol_2018",
        },
    )?;
    let p_chem = Record::rollup(BRANCH, &[&p_chem_basic, &p_chem_ammonia, &p_chem_other]);

    let metal = total * inputs.fact("Fact_I_S_metal_fec_pct_of_total_2018")?;
    let p_metal_steel_primary = product(
        inputs,
        metal,
        &ProductKeys {
            pct_of_branch: "Fact_I_P_metal_steel_primary_fec_pct_of_metal_2018",
            fec_per_t: "Fact_I_P_metal_steel_primary_ratio_fec_to_prodvol_2018",
            pb_per_t: "Fact_I_P_metal_steel_primary_ratio_CO2e_pb_to_prodvol_2018",
            cb_per_t: "Fact_I_P_metal_steel_primary_ratio_CO2e_cb_to_prodvol_2018",
        },
    )?;
    let p_metal_steel_secondary = product(
        inputs,
        metal,
        &ProductKeys {
            pct_of_branch: "Fact_I_P_metal_steel_secondary_fec_pct_of_metal_2018",
            fec_per_t: "Fact_I_P_metal_steel_secondary_ratio_fec_to_prodvol_2018",
            pb_per_t: "Fact_I_P_metal_steel_secondary_ratio_CO2e_pb_to_prodvol_2018",
            cb_per_t: "Fact_I_P_metal_steel_secondary_ratio_CO2e_cb_to_prodvol_2018",
        },
    )?;
    let p_metal_nonfe = product(
        inputs,
        metal,
        &ProductKeys {
            pct_of_branch: "Fact_I_P_metal_nonfe_fec_pct_of_metal_2018",
            fec_per_t: "Fact_I_P_metal_nonfe_ratio_fec_to_prodvol_2018",
            pb_per_t: "Fact_I_P_metal_nonfe_ratio_CO2e_pb_to_prodvol_2018",
            cb_per_t: "Fact_I_P_metal_nonfe_ratio_CO2e_cb_to_prodvol_2018",
        },
    )?;
    let mut p_metal_steel = Record::rollup(
        BRANCH.with(Shape::PCT),
        &[&p_metal_steel_primary, &p_metal_steel_secondary],
    );
    let p_metal = Record::rollup(BRANCH, &[&p_metal_steel, &p_metal_nonfe]);
    p_metal_steel.pct_energy = div(p_metal_steel.energy, p_metal.energy);

    let other = total * inputs.fact("Fact_I_S_other_fec_pct_of_total_2018")?;
    let p_other_paper = product(
        inputs,
        other,
        &ProductKeys {
            pct_of_branch: "Fact_I_P_other_paper_fec_pct_of_other_2018",
            fec_per_t: "Fact_I_P_other_paper_ratio_fec_to_prodvol_2018",
            pb_per_t: "Fact_I_P_other_paper_ratio_CO2e_pb_to_prodvol_2018",
            cb_per_t: "Fact_I_P_other_paper_ratio_CO2e_cb_to_prodvol_2018",
        },
    )?;
    let p_other_food = product(
        inputs,
        other,
        &ProductKeys {
            pct_of_branch: "Fact_I_P_other_food_fec_pct_of_other_2018",
            fec_per_t: "Fact_I_P_other_food_ratio_fec_to_prodvol_2018",
            pb_per_t: "Fact_I_P_other_food_ratio_CO2e_pb_to_prodvol_2018",
            cb_per_t: "Fact_I_P_other_food_ratio_CO2e_cb_to_prodvol_2018",
        },
    )?;

    // Remaining branches have no meaningful product, so their intensities
    // are per MWh of final energy.
    let mut p_other_further = Record::new(Shape::EMITTER.with(Shape::PER_MWH));
    p_other_further.energy = other * inputs.fact("Fact_I_P_other_further_fec_pct_of_other_2018")?;
    p_other_further.co2e_production_based_per_mwh =
        inputs.fact("Fact_I_P_other_further_ratio_CO2e_pb_to_fec_2018")?;
    p_other_further.co2e_combustion_based_per_mwh =
        inputs.fact("Fact_I_P_other_further_ratio_CO2e_cb_to_fec_2018")?;
    p_other_further.co2e_production_based =
        p_other_further.energy * p_other_further.co2e_production_based_per_mwh;
    p_other_further.co2e_combustion_based =
        p_other_further.energy * p_other_further.co2e_combustion_based_per_mwh;
    p_other_further.sum_emissions();

    // Fluorinated gases (CRF 2.E-2.H) scale with the further industry.
    let mut p_other_2efgh = Record::new(Shape::EMISSIONS.with(Shape::PER_MWH));
    p_other_2efgh.co2e_production_based_per_mwh =
        inputs.fact("Fact_I_P_other_2efgh_ratio_CO2e_pb_to_fec_2018")?;
    p_other_2efgh.co2e_production_based =
        p_other_further.energy * p_other_2efgh.co2e_production_based_per_mwh;
    p_other_2efgh.sum_emissions();

    let p_other = Record::rollup(
        BRANCH,
        &[&p_other_paper, &p_other_food, &p_other_further, &p_other_2efgh],
    );

    let p = Record::rollup(Shape::EMITTER, &[&p_miner, &p_chem, &p_metal, &p_other]);
    let i = Record::rollup(Shape::EMITTER, &[&p]);

    let s_fossil_gas = supply(inputs, total, "Fact_I_S_gas_fec_pct_of_total_2018")?;
    let s_fossil_coal = supply(inputs, total, "Fact_I_S_coal_fec_pct_of_total_2018")?;
    let s_fossil_diesel = supply(inputs, total, "Fact_I_S_diesel_fec_pct_of_total_2018")?;
    let s_fossil_fueloil = supply(inputs, total, "Fact_I_S_fueloil_fec_pct_of_total_2018")?;
    let s_fossil_lpg = supply(inputs, total, "Fact_I_S_lpg_fec_pct_of_total_2018")?;
    let s_fossil_opetpro = supply(inputs, total, "Fact_I_S_opetpro_fec_pct_of_total_2018")?;
    let s_fossil_ofossil = supply(inputs, total, "Fact_I_S_ofossil_fec_pct_of_total_2018")?;
    let s_renew_biomass = supply(inputs, total, "Fact_I_S_biomass_fec_pct_of_total_2018")?;
    let s_renew_heatnet = supply(inputs, total, "Fact_I_S_heatnet_fec_pct_of_total_2018")?;
    let s_renew_heatpump = supply(inputs, total, "Fact_I_S_heatpump_fec_pct_of_total_2018")?;
    let s_renew_solarth = supply(inputs, total, "Fact_I_S_solarth_fec_pct_of_total_2018")?;
    let s_renew_elec = supply(inputs, total, "Fact_I_S_elec_fec_pct_of_total_2018")?;

    let s_fossil = Record::rollup(
        Shape::ENERGY,
        &[
            &s_fossil_gas,
            &s_fossil_coal,
            &s_fossil_diesel,
            &s_fossil_fueloil,
            &s_fossil_lpg,
            &s_fossil_opetpro,
            &s_fossil_ofossil,
        ],
    );
    let s_renew = Record::rollup(
        Shape::ENERGY,
        &[
            &s_renew_biomass,
            &s_renew_heatnet,
            &s_renew_heatpump,
            &s_renew_solarth,
            &s_renew_elec,
        ],
    );
    let mut s = Record::rollup(SUPPLY, &[&s_fossil, &s_renew]);
    s.pct_energy = div(s.energy, total);

    debug!(energy = s.energy, co2e = i.co2e_total, "industry 2018");

    Ok(I18 {
        i,
        p,
        p_miner,
        p_miner_cement,
        p_miner_chalk,
        p_miner_glas,
        p_miner_ceram,
        p_chem,
        p_chem_basic,
        p_chem_ammonia,
        p_chem_other,
        p_metal,
        p_metal_steel,
        p_metal_steel_primary,
        p_metal_steel_secondary,
        p_metal_nonfe,
        p_other,
        p_other_paper,
        p_other_food,
        p_other_further,
        p_other_2efgh,
        s,
        s_fossil,
        s_fossil_gas,
        s_fossil_coal,
        s_fossil_diesel,
        s_fossil_fueloil,
        s_fossil_lpg,
        s_fossil_opetpro,
        s_fossil_ofossil,
        s_renew,
        s_renew_hydrogen: Record::new(Shape::EMPTY),
        s_renew_emethan: Record::new(Shape::EMPTY),
        s_renew_biomass,
        s_renew_heatnet,
        s_renew_heatpump,
        s_renew_solarth,
        s_renew_elec,
    })
}
