//! Industry in the target year.
//!
//! Every product switches to its climate-neutral process: production volumes
//! follow the assumed demand change, energy demand and emissions follow the
//! 2050 process intensities, and the switch is paid by the companies
//! (`invest_outside`). Municipal energy consulting is the only municipal cost.

use tracing::debug;

use super::{Trade, population_share};
use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::y2018::industry::I18;

crate::snapshot!(
    /// Industry in the target year.
    I30 {
        i,
        g,
        g_consult,
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

const SWITCH: Shape = Shape::BALANCE
    .with(Shape::DEMAND)
    .with(Shape::INVEST)
    .with(Shape::INVEST_OUTSIDE)
    .with(Shape::WAGES);
const PRODUCT: Shape = SWITCH.with(Shape::PER_T).with(Shape::PRODUCTION);
const BRANCH: Shape = SWITCH.with(Shape::PRODUCTION);
const CONSULT: Shape = Shape::INVESTMENT.with(Shape::INVEST_COM);

/// Production volume after the assumed demand change.
fn produce(base: &Record, demand_change: f64) -> Record {
    let mut r = Record::new(PRODUCT);
    r.demand_change = demand_change;
    r.prod_volume = base.prod_volume * (1.0 + demand_change);
    r
}

/// Emissions from the per-tonne intensities.
fn emit_per_t(r: &mut Record, pb_per_t: f64, cb_per_t: f64) {
    r.co2e_production_based_per_t = pb_per_t;
    r.co2e_combustion_based_per_t = cb_per_t;
    r.co2e_production_based = r.prod_volume * pb_per_t;
    r.co2e_combustion_based = r.prod_volume * cb_per_t;
    r.sum_emissions();
}

/// Investment paid by the company, annualized, with the resulting jobs.
fn invest(r: &mut Record, invest_per_x: f64, driver: f64, inputs: &Inputs<'_>, wages: Trade) {
    r.invest_per_x = invest_per_x;
    r.invest = invest_per_x * driver;
    r.invest_outside = r.invest;
    wages.pay(r, inputs);
}

/// Energy from the carrier demands, changes against 2018 and investment per
/// tonne of product.
fn finish(
    r: &mut Record,
    base: &Record,
    invest_per_t: f64,
    inputs: &Inputs<'_>,
    wages: Trade,
) {
    r.energy = r.demand_sum();
    r.set_change(base, inputs);
    let prod_volume = r.prod_volume;
    invest(r, invest_per_t, prod_volume, inputs, wages);
}

fn rollup_branch(children: &[&Record], base: &Record) -> Record {
    let mut r = Record::rollup(BRANCH, children);
    r.set_change_pct(base);
    r
}

fn chem(
    inputs: &Inputs<'_>,
    i18: &I18,
    wages: Trade,
) -> BalanceResult<(Record, Record, Record, Record)> {
    // Remaining process emissions of the whole chemical industry are an
    // absolute amount, not an intensity.
    let chem_pb = inputs.ass("Ass_I_P_chem_all_co2e_factor_2050")?;

    let mut basic = produce(
        &i18.p_chem_basic,
        inputs.ass("Ass_I_P_chem_basic_wo_ammonia_prodvol_change")?,
    );
    basic.demand_electricity =
        basic.prod_volume * inputs.ass("Ass_I_P_chem_basic_wo_ammonia_fec_factor_electricity_2050")?;
    basic.demand_emethan =
        basic.prod_volume * inputs.ass("Ass_I_P_chem_basic_wo_ammonia_fec_factor_other_energie_2050")?;
    basic.co2e_production_based_per_t = chem_pb;
    basic.co2e_combustion_based_per_t = inputs.ass("Ass_I_P_chem_basic_ratio_CO2e_cb_to_prodvol_2050")?;
    basic.co2e_combustion_based = basic.prod_volume * basic.co2e_combustion_based_per_t;
    basic.co2e_production_based = chem_pb;
    basic.sum_emissions();
    finish(
        &mut basic,
        &i18.p_chem_basic,
        inputs.ass("Ass_I_P_chem_basic_wo_ammonia_factor_invest_per_prodvol_2050")?,
        inputs,
        wages,
    );

    // Ammonia keeps its 2018 volume; the demand change is informational.
    let mut ammonia = produce(&i18.p_chem_ammonia, 0.0);
    ammonia.demand_change = inputs.ass("Ass_I_P_chem_ammonia_prodvol_change")?;
    ammonia.demand_electricity =
        ammonia.prod_volume * inputs.ass("Ass_I_P_chem_ammonia_fec_factor_electricity_2050")?;
    ammonia.co2e_production_based_per_t = chem_pb;
    ammonia.co2e_combustion_based_per_t =
        inputs.ass("Ass_I_P_chem_ammonia_ratio_CO2e_cb_to_prodvol_2050")?;
    ammonia.co2e_production_based = chem_pb;
    ammonia.co2e_combustion_based = chem_pb;
    ammonia.sum_emissions();
    finish(
        &mut ammonia,
        &i18.p_chem_ammonia,
        inputs.ass("Ass_I_P_chem_ammonia_factor_invest_per_prodvol_2050")?,
        inputs,
        wages,
    );
    let ammonia = ammonia.with_action("Ammoniakproduktion aus elektrolytisch erzeugtem H2");

    let mut other = produce(&i18.p_chem_other, 0.0);
    other.demand_change = inputs.ass("Ass_I_P_chem_other_prodvol_change")?;
    other.demand_electricity =
        other.prod_volume * inputs.ass("Ass_I_P_chem_other_fec_factor_electricity_2050")?;
    other.demand_emethan =
        other.prod_volume * inputs.ass("Ass_I_P_chem_other_fec_factor_other_energie_2050")?;
    other.co2e_production_based_per_t = chem_pb;
    other.co2e_combustion_based_per_t = inputs.ass("Ass_I_P_chem_other_ratio_CO2e_cb_to_prodvol_2050")?;
    other.co2e_combustion_based = other.prod_volume * other.co2e_combustion_based_per_t;
    other.co2e_production_based = chem_pb;
    other.sum_emissions();
    finish(
        &mut other,
        &i18.p_chem_other,
        inputs.ass("Ass_I_P_chem_other_factor_invest_per_prodvol_2050")?,
        inputs,
        wages,
    );

    let total = rollup_branch(&[&basic, &ammonia, &other], &i18.p_chem);
    Ok((total, basic, ammonia, other))
}

fn metal(
    inputs: &Inputs<'_>,
    i18: &I18,
    wages: Trade,
) -> BalanceResult<(Record, Record, Record, Record, Record)> {
    let further_elec =
        inputs.ass("Ass_I_P_metal_steel_further_processing_ratio_fec_to_prodvol_electricity_2030")?;
    let further_cb =
        inputs.ass("Ass_I_P_metal_steel_further_production_ratio_CO2e_eb_to_rodvol_2030")?;

    let mut primary = produce(
        &i18.p_metal_steel_primary,
        inputs.ass("Ass_I_P_metal_steel_primary_prodvol_change_2050")?,
    );
    primary.demand_electricity = primary.prod_volume
        * (inputs.ass("Ass_I_P_metal_steel_primary_ratio_fec_to_prodvol_electricity_2030")?
            + further_elec);
    primary.demand_hydrogen =
        primary.prod_volume * inputs.ass("Ass_I_P_metal_steel_primary_ratio_fec_to_prodvol_hydrogen_2030")?;
    emit_per_t(
        &mut primary,
        inputs.ass("Ass_I_P_metal_steel_primary_ratio_CO2e_pb_to_rodvol_2030")?,
        inputs.ass("Ass_I_P_metal_steel_primary_ratio_CO2e_eb_to_rodvol_2030")? + further_cb,
    );
    finish(
        &mut primary,
        &i18.p_metal_steel_primary,
        inputs.ass("Ass_I_P_metal_steel_primary_eaf_ratio_invest_to_prodvol_2019")?,
        inputs,
        wages,
    );
    let primary = primary.with_action("Umstellung auf Wasserstoff-DRI");

    let mut secondary = produce(
        &i18.p_metal_steel_secondary,
        inputs.ass("Ass_I_P_metal_steel_secondary_prodvol_change_2050")?,
    );
    secondary.demand_electricity = secondary.prod_volume
        * (inputs.ass("Ass_I_P_metal_steel_secondary_ratio_fec_to_prodvol_electricity_2030")?
            + further_elec);
    emit_per_t(
        &mut secondary,
        inputs.ass("Ass_I_P_metal_steel_secundary_ratio_CO2e_pb_to_rodvol_2030")?,
        inputs.ass("Ass_I_P_metal_steel_secundary_ratio_CO2e_eb_to_rodvol_2030")? + further_cb,
    );
    finish(
        &mut secondary,
        &i18.p_metal_steel_secondary,
        inputs.ass("Ass_I_P_metal_steel_secondary_ratio_invest_to_prodvol_2018")?,
        inputs,
        wages,
    );
    let secondary = secondary.with_action("Umstellung (der Weiterverarbeitung) auf Elektroöfen");

    let mut nonfe = produce(
        &i18.p_metal_nonfe,
        inputs.ass("Ass_I_P_metal_nonfe_prodvol_change")?,
    );
    nonfe.demand_electricity =
        nonfe.prod_volume * inputs.ass("Ass_I_P_metal_nonfe_ratio_fec_to_prodvol_electricity_2035")?;
    nonfe.demand_biomass =
        nonfe.prod_volume * inputs.ass("Ass_I_P_metal_nonfe_ratio_fec_to_prodvol_biomass_2035")?;
    nonfe.demand_hydrogen =
        nonfe.prod_volume * inputs.ass("Ass_I_P_metal_nonfe_ratio_fec_to_prodvol_hydrogen_2035")?;
    emit_per_t(
        &mut nonfe,
        inputs.ass("Ass_I_P_metal_nonfe_CO2e_pb_2035")?,
        inputs.ass("Ass_I_P_metal_nonfe_CO2e_cb_2035")?,
    );
    finish(
        &mut nonfe,
        &i18.p_metal_nonfe,
        inputs.ass("Ass_I_P_metal_nonfe_alrecycl_ratio_invest_to_prodvol_2013")?,
        inputs,
        wages,
    );
    let nonfe = nonfe.with_action("Umstellung auf strombasierte Sekundärproduktion");

    let steel = rollup_branch(&[&primary, &secondary], &i18.p_metal_steel);
    let total = rollup_branch(&[&steel, &nonfe], &i18.p_metal);
    Ok((total, steel, primary, secondary, nonfe))
}

fn other(
    inputs: &Inputs<'_>,
    i18: &I18,
    wages: Trade,
) -> BalanceResult<(Record, Record, Record, Record, Record)> {
    let mut paper = produce(&i18.p_other_paper, inputs.ass("Ass_I_P_other_paper_prodvol_change")?);
    paper.demand_electricity =
        paper.prod_volume * inputs.ass("Ass_I_P_other_paper_ratio_fec_elec_to_prodvol_2050")?;
    paper.demand_heatnet =
        paper.prod_volume * inputs.ass("Ass_I_P_other_paper_ratio_fec_heatnet_to_prodvol_2050")?;
    emit_per_t(
        &mut paper,
        inputs.fact("Fact_I_P_other_paper_ratio_CO2e_pb_to_prodvol_2018")?,
        inputs.ass("Ass_I_P_other_paper_ratio_CO2e_cb_to_prodvol_2050")?,
    );
    finish(
        &mut paper,
        &i18.p_other_paper,
        inputs.ass("Ass_I_P_other_paper_varel_ratio_invest_to_prodvol_2019")?,
        inputs,
        wages,
    );
    let paper = paper.with_action("Umstellung auf strombasierte Produktion");

    let mut food = produce(&i18.p_other_food, inputs.ass("Ass_I_P_other_food_prodvol_change")?);
    food.demand_electricity =
        food.prod_volume * inputs.ass("Ass_I_P_other_food_ratio_fec_elec_to_prodvol_2050")?;
    food.demand_heatnet =
        food.prod_volume * inputs.ass("Ass_I_P_other_food_ratio_fec_heatnet_to_prodvol_2050")?;
    emit_per_t(
        &mut food,
        inputs.fact("Fact_I_P_other_food_ratio_CO2e_pb_to_prodvol_2018")?,
        inputs.ass("Ass_I_P_other_food_ratio_CO2e_cb_to_prodvol_2050")?,
    );
    finish(
        &mut food,
        &i18.p_other_food,
        inputs.ass("Ass_I_P_other_food_coke_ratio_invest_to_prodvol_2019")?,
        inputs,
        wages,
    );
    let food = food.with_action("Umstellung auf strombasierte Produktion");

    // No product volume: energy changes directly and the carrier mix is a
    // share of it.
    let mut further = Record::new(SWITCH.with(Shape::PER_MWH).with(Shape::PRODUCTION));
    further.demand_change = inputs.ass("Ass_I_P_other_further_fec_change")?;
    further.energy = i18.p_other_further.energy * (1.0 + further.demand_change);
    further.demand_electricity = further.energy * inputs.ass("Ass_I_P_other_further_fec_pct_of_elec_2050")?;
    further.demand_heatnet = further.energy * inputs.ass("Ass_I_P_other_further_fec_pct_of_heatnet_2050")?;
    further.demand_emethan = further.energy * inputs.ass("Ass_I_P_other_further_fec_pct_of_gas_2050")?;
    further.co2e_production_based_per_mwh = inputs.ass("Ass_I_P_other_2d_ratio_of_CO2e_pb_to_fec_2050")?;
    further.co2e_combustion_based_per_mwh =
        inputs.ass("Ass_I_P_other_further_ratio_of_CO2e_cb_to_fec_2050")?;
    further.co2e_production_based = further.energy * further.co2e_production_based_per_mwh;
    further.co2e_combustion_based = further.energy * further.co2e_combustion_based_per_mwh;
    further.sum_emissions();
    further.set_change(&i18.p_other_further, inputs);
    let energy = further.energy;
    invest(
        &mut further,
        inputs.ass("Ass_I_P_other_further_boiler_ratio_invest_to_fec_2050")?,
        energy,
        inputs,
        wages,
    );
    let further = further.with_action("Umstellung auf strombasierte Produktion");

    // Fluorinated gases: investment per tonne of avoided emissions.
    let mut f_gases = Record::new(
        Shape::EMISSIONS
            .with(Shape::PER_MWH)
            .with(Shape::CHANGE)
            .with(Shape::INVEST)
            .with(Shape::INVEST_OUTSIDE)
            .with(Shape::WAGES),
    );
    f_gases.co2e_production_based_per_mwh =
        inputs.ass("Ass_I_P_other_2efgh_ratio_of_CO2e_pb_to_fec_2050")?;
    f_gases.co2e_production_based = further.energy * f_gases.co2e_production_based_per_mwh;
    f_gases.sum_emissions();
    f_gases.set_co2e_change(&i18.p_other_2efgh, inputs);
    let avoided = i18.p_other_2efgh.co2e_production_based - f_gases.co2e_production_based;
    invest(
        &mut f_gases,
        inputs.ass("Ass_I_P_other_further_cooling_ratio_invest_to_CO2e_2050")?,
        avoided,
        inputs,
        wages,
    );
    let f_gases = f_gases.with_action("Umstellung auf natürliche Kühlgase");

    let total = rollup_branch(&[&paper, &food, &further, &f_gases], &i18.p_other);
    Ok((total, paper, food, further, f_gases))
}

fn miner(
    inputs: &Inputs<'_>,
    i18: &I18,
    wages: Trade,
) -> BalanceResult<(Record, Record, Record, Record, Record)> {
    let mut cement = produce(&i18.p_miner_cement, inputs.ass("Ass_I_P_miner_cement_prodvol_change")?);
    cement.demand_electricity =
        cement.prod_volume * inputs.ass("Ass_I_P_miner_cement_ratio_fec_elec_to_prodvol_2050")?;
    cement.demand_emethan =
        cement.prod_volume * inputs.ass("Ass_I_P_miner_cement_ratio_fec_gas_to_prodvol_2050")?;
    emit_per_t(
        &mut cement,
        inputs.ass("Ass_I_P_miner_cement_ratio_CO2e_pb_to_prodvol_2050")?,
        inputs.ass("Ass_I_P_miner_cement_ratio_CO2e_cb_to_prodvol_2050")?,
    );
    finish(
        &mut cement,
        &i18.p_miner_cement,
        inputs.ass("Ass_I_P_miner_cement_kirchdorf_ratio_invest_to_prodvol_2020")?,
        inputs,
        wages,
    );

    let mut chalk = produce(&i18.p_miner_chalk, inputs.ass("Ass_I_P_miner_chalk_prodvol_change")?);
    chalk.demand_electricity =
        chalk.prod_volume * inputs.ass("Ass_I_P_miner_chalk_ratio_fec_elec_to_prodvol_2050")?;
    chalk.demand_emethan =
        chalk.prod_volume * inputs.ass("Ass_I_P_miner_chalk_ratio_fec_gas_to_prodvol_2050")?;
    emit_per_t(
        &mut chalk,
        inputs.ass("Ass_I_P_miner_chalk_ratio_CO2e_pb_to_prodvol_2050")?,
        inputs.ass("Ass_I_P_miner_chalk_ratio_CO2e_cb_to_prodvol_2050")?,
    );
    finish(
        &mut chalk,
        &i18.p_miner_chalk,
        inputs.ass("Ass_I_P_miner_chalk_vockerode_ratio_invest_to_prodvol_2018")?,
        inputs,
        wages,
    );

    let mut glas = produce(&i18.p_miner_glas, inputs.ass("Ass_I_P_miner_glass_prodvol_change")?);
    glas.demand_electricity =
        glas.prod_volume * inputs.ass("Ass_I_P_miner_glass_ratio_fec_elec_to_prodvol_2050")?;
    emit_per_t(
        &mut glas,
        inputs.ass("Ass_I_P_miner_glass_ratio_CO2e_pb_to_prodvol_2050")?,
        inputs.ass("Ass_I_P_miner_glass_ratio_CO2e_cb_to_prodvol_2050")?,
    );
    finish(
        &mut glas,
        &i18.p_miner_glas,
        inputs.ass("Ass_I_P_miner_glass_furnace_ratio_invest_to_prodvol_2021")?,
        inputs,
        wages,
    );

    let mut ceram = produce(&i18.p_miner_ceram, inputs.ass("Ass_I_P_miner_ceramic_prodvol_change")?);
    ceram.demand_electricity =
        ceram.prod_volume * inputs.ass("Ass_I_P_miner_ceramic_ratio_fec_elec_to_prodvol_2050")?;
    ceram.demand_hydrogen =
        ceram.prod_volume * inputs.ass("Ass_I_P_miner_ceramic_ratio_fec_hydrogen_to_prodvol_2050")?;
    ceram.demand_biomass =
        ceram.prod_volume * inputs.ass("Ass_I_P_miner_ceramic_ratio_fec_biomass_to_prodvol_2050")?;
    emit_per_t(
        &mut ceram,
        inputs.ass("Ass_I_P_miner_ceramic_ratio_CO2e_pb_to_prodvol_2050")?,
        inputs.ass("Ass_I_P_miner_ceramic_ratio_CO2e_cb_to_prodvol_2050")?,
    );
    finish(
        &mut ceram,
        &i18.p_miner_ceram,
        inputs.ass("Ass_I_P_miner_ceramic_ratio_invest_to_prodvol")?,
        inputs,
        wages,
    );

    let total = rollup_branch(&[&cement, &chalk, &glas, &ceram], &i18.p_miner);
    Ok((total, cement, chalk, glas, ceram))
}

/// Municipal energy consulting for companies, paid per inhabitant.
fn consulting(inputs: &Inputs<'_>) -> BalanceResult<(Record, Record)> {
    let mut g_consult = Record::new(CONSULT.with(Shape::EMPLOYMENT));
    g_consult.invest_pa = inputs.ass("Ass_I_G_advice_invest_pa_per_capita")?
        * inputs.entry("In_M_population_com_2018")?;
    g_consult.invest_pa_com = g_consult.invest_pa;
    g_consult.invest = g_consult.invest_pa * inputs.duration_target;
    g_consult.invest_com = g_consult.invest;
    g_consult.set_wages(
        inputs.ass("Ass_I_G_advice_invest_pct_of_wage")?,
        inputs.ass("Ass_T_C_yearly_costs_per_planer")?,
    );
    // Consultants already exist; no new jobs.
    g_consult.demand_emplo_new = 0.0;
    g_consult.emplo_existing = g_consult.demand_emplo;

    let g = Record::rollup(CONSULT, &[&g_consult]);
    Ok((g, g_consult))
}

pub fn calc(inputs: &Inputs<'_>, i18: &I18) -> BalanceResult<I30> {
    let wages = Trade::civil_construction(inputs)?;

    let (p_miner, p_miner_cement, p_miner_chalk, p_miner_glas, p_miner_ceram) = miner(inputs, i18, wages)?;
    let (p_chem, p_chem_basic, p_chem_ammonia, p_chem_other) = chem(inputs, i18, wages)?;
    let (p_metal, p_metal_steel, p_metal_steel_primary, p_metal_steel_secondary, p_metal_nonfe) =
        metal(inputs, i18, wages)?;
    let (p_other, p_other_paper, p_other_food, p_other_further, p_other_2efgh) = other(inputs, i18, wages)?;

    let mut p = Record::rollup(BRANCH.with(Shape::EMPLOYMENT), &[&p_miner, &p_chem, &p_metal, &p_other]);
    p.set_change_pct(&i18.p);
    p.emplo_existing = inputs.fact("Fact_I_P_constr_civil_emplo_2018")? * population_share(inputs)?;
    p.demand_emplo_new = p.demand_emplo - p.emplo_existing;

    let (g, g_consult) = consulting(inputs)?;

    let mut i = Record::rollup(
        SWITCH.with(Shape::INVEST_COM).with(Shape::EMPLOYMENT),
        &[&g, &p],
    );
    i.set_change_pct(&i18.i);

    let supply = |energy: f64| {
        let mut r = Record::new(Shape::ENERGY);
        r.energy = energy;
        r
    };
    // Fossil carriers are fully replaced; heat pumps and solar thermal are
    // not modeled for process heat.
    let s_fossil_gas = supply(0.0);
    let s_fossil_coal = supply(0.0);
    let s_fossil_diesel = supply(0.0);
    let s_fossil_fueloil = supply(0.0);
    let s_fossil_lpg = supply(0.0);
    let s_fossil_opetpro = supply(0.0);
    let s_fossil_ofossil = supply(0.0);
    let s_renew_hydrogen = supply(p.demand_hydrogen);
    let s_renew_emethan = supply(p.demand_emethan);
    let s_renew_biomass = supply(p.demand_biomass);
    let s_renew_heatnet = supply(p.demand_heatnet);
    let s_renew_heatpump = supply(0.0);
    let s_renew_solarth = supply(0.0);
    let s_renew_elec = supply(p.demand_electricity);
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
            &s_renew_hydrogen,
            &s_renew_emethan,
            &s_renew_biomass,
            &s_renew_heatnet,
            &s_renew_heatpump,
            &s_renew_solarth,
            &s_renew_elec,
        ],
    );
    let s = Record::rollup(Shape::ENERGY, &[&s_fossil, &s_renew]);

    debug!(
        energy = i.energy,
        co2e = i.co2e_total,
        invest = i.invest,
        "industry target year"
    );

    Ok(I30 {
        i,
        g,
        g_consult,
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
    })
}
