//! Local plants of the municipality.
//!
//! Roof, facade and park photovoltaics and onshore wind are expanded to the
//! municipality's chosen share of the installable power. Agrivoltaics close
//! the gap to the demand that neither the other local plants nor the
//! national mix cover.

use super::renew::mro_per_mwh;
use super::{PLANT, hire, loss, running_costs, without_co2e_change};
use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::utils::div;
use crate::y2018::business::B18;
use crate::y2018::electricity::E18;
use crate::y2018::residences::R18;
use crate::y2030::{Trade, population_share, rollup_vs};

use super::core::LocalBiomass;

pub(super) struct Local {
    pub p_local: Record,
    pub p_local_pv: Record,
    pub p_local_pv_roof: Record,
    pub p_local_pv_facade: Record,
    pub p_local_pv_park: Record,
    pub p_local_pv_agri: Record,
    pub p_local_wind_onshore: Record,
    pub p_local_biomass: Record,
    pub p_local_hydro: Record,
    pub p_local_surplus: Record,
}

/// Area, power and cost parameters of one local plant type.
struct Site {
    power_installed: f64,
    full_load_hour: f64,
    area_ha_available: f64,
    area_pct_of_action: f64,
    ratio_power_to_area_ha: f64,
    invest_per_kw: f64,
    mro_per_year: f64,
}

impl Site {
    /// Plant whose potential follows from the available area.
    fn plant(&self, loss: f64, neutral: f64) -> Record {
        let mut r = Record::new(PLANT);
        r.power_installed = self.power_installed;
        r.full_load_hour = self.full_load_hour;
        r.area_ha_available = self.area_ha_available;
        r.area_ha_available_pct_of_action = self.area_pct_of_action;
        r.ratio_power_to_area_ha = self.ratio_power_to_area_ha;
        r.power_installable =
            self.area_ha_available * self.area_pct_of_action * self.ratio_power_to_area_ha;
        r.energy_installable = r.power_installable * r.full_load_hour * (1.0 - loss);
        r.co2e_combustion_based_per_mwh = neutral;
        r.cost_mro_per_mwh = mro_per_mwh(self.invest_per_kw, self.mro_per_year, self.full_load_hour);
        r.invest_per_x = self.invest_per_kw * 1000.0;
        r
    }
}

fn expand(r: &mut Record, to_be_installed_pct: f64, loss: f64) {
    r.power_to_be_installed_pct = to_be_installed_pct;
    r.power_to_be_installed =
        (r.power_installable * to_be_installed_pct - r.power_installed).max(0.0);
    r.energy = (r.power_to_be_installed + r.power_installed) * r.full_load_hour * (1.0 - loss);
}

/// Changes, costs and investment of a local plant whose emissions are not
/// yet accounted.
fn finish(inputs: &Inputs<'_>, r: &mut Record, base: &Record, invest_com_share: f64, trade: Trade) {
    r.set_change(base, inputs);
    without_co2e_change(r);
    running_costs(r, base);
    r.invest = r.power_to_be_installed * r.invest_per_x;
    r.invest_com = r.invest * invest_com_share;
    trade.pay(r, inputs);
}

pub(super) struct Neighbours<'a> {
    pub e18: &'a E18,
    pub r18: &'a R18,
    pub b18: &'a B18,
    pub biomass: &'a LocalBiomass,
    /// Electricity demand of the target year.
    pub demand: f64,
    /// Generation of the national renewable mix.
    pub national: f64,
}

pub(super) fn calc(inputs: &Inputs<'_>, n: &Neighbours<'_>) -> BalanceResult<Local> {
    let e18 = n.e18;
    let loss = loss(inputs)?;
    let neutral = inputs.fact("Fact_E_P_climate_neutral_ratio_CO2e_cb_to_fec")?;
    let pv_trade = Trade::pv_installation(inputs)?;
    let pv_flh = inputs.entry("In_E_pv_full_load_hours_sta")?;
    let roof_mro_per_year = inputs.ass("Ass_E_P_local_pv_roof_mro_per_year")?;

    // Roofs and facades of municipal buildings are paid by the municipality.
    let com_share = div(
        n.r18.p_buildings_area_m2_com.area_m2 + n.b18.p_nonresi_com.area_m2,
        n.b18.p_nonresi.area_m2 + n.r18.p_buildings_total.area_m2,
    );

    // Roof area in ha from the floor area of each building type.
    let roof_area_ha = 4.0 / 3.0
        * (inputs.entry("In_R_area_m2_1flat")? / 100.0
            * inputs.ass("Ass_E_P_local_pv_roof_area_building1")?
            + inputs.entry("In_R_area_m2_2flat")? / 100.0
                * inputs.ass("Ass_E_P_local_pv_roof_area_building2")?
            + inputs.entry("In_R_area_m2_3flat")? / 100.0
                * inputs.ass("Ass_E_P_local_pv_roof_area_buildingD")?
            + inputs.entry("In_R_area_m2_dorm")? / 100.0
                * inputs.ass("Ass_E_P_local_pv_roof_area_buildingD")?)
        / 10_000.0;
    let mut p_local_pv_roof = Site {
        power_installed: inputs.entry("In_E_PV_power_inst_roof")?,
        full_load_hour: pv_flh,
        area_ha_available: roof_area_ha,
        area_pct_of_action: inputs.ass("Ass_E_P_local_pv_roof_potential")?,
        ratio_power_to_area_ha: inputs.ass("Ass_E_P_local_pv_roof_ratio_power_to_area_ha")?,
        invest_per_kw: inputs.ass("Ass_E_P_local_pv_roof_ratio_invest_to_power_2030")?,
        mro_per_year: roof_mro_per_year,
    }
    .plant(loss, neutral);
    expand(&mut p_local_pv_roof, inputs.entry("In_E_PV_power_to_be_inst_roof")?, loss);
    finish(inputs, &mut p_local_pv_roof, &e18.p_local_pv_roof, com_share, pv_trade);

    let mut p_local_pv_facade = Site {
        power_installed: inputs.entry("In_E_PV_power_inst_facade")?,
        full_load_hour: inputs.ass("Ass_E_P_local_pv_facade_full_load_hours")?,
        area_ha_available: inputs.ass("Ass_E_P_lcoal_pv_facade_potential")?
            * div(
                inputs.entry("In_R_buildings_com")?,
                inputs.entry("In_R_buildings_nat")?,
            ),
        area_pct_of_action: inputs.ass("Ass_E_P_local_pv_facade_potential_usable")?,
        ratio_power_to_area_ha: inputs.ass("Ass_E_P_local_pv_facade_ratio_power_to_area_ha")?,
        invest_per_kw: inputs.ass("Ass_E_S_local_pv_facade_ratio_invest_to_power")?,
        mro_per_year: roof_mro_per_year,
    }
    .plant(loss, neutral);
    expand(&mut p_local_pv_facade, inputs.entry("In_E_PV_power_to_be_inst_facade")?, loss);
    finish(inputs, &mut p_local_pv_facade, &e18.p_local_pv_facade, com_share, pv_trade);

    let mut p_local_pv_park = Site {
        power_installed: inputs.entry("In_E_PV_power_inst_park")?,
        full_load_hour: pv_flh,
        area_ha_available: inputs.entry("In_M_area_total_com")?,
        area_pct_of_action: inputs.ass("Ass_E_P_local_pv_park_area_pct_of_available")?,
        ratio_power_to_area_ha: inputs.ass("Ass_E_P_local_pv_park_power_per_ha")?,
        invest_per_kw: inputs.ass("Ass_E_S_local_pv_park_ratio_invest_to_power_2030")?,
        mro_per_year: inputs.ass("Ass_E_P_local_pv_park_mro_per_year")?,
    }
    .plant(loss, neutral);
    expand(&mut p_local_pv_park, inputs.entry("In_E_PV_power_to_be_inst_park")?, loss);
    finish(inputs, &mut p_local_pv_park, &e18.p_local_pv_park, 0.0, pv_trade);

    let mut p_local_wind_onshore = Site {
        power_installed: inputs.entry("In_E_PV_power_inst_wind_on")?,
        full_load_hour: inputs.fact("Fact_E_P_wind_onshore_full_load_hours")?,
        area_ha_available: inputs.entry("In_M_area_agri_com")? + inputs.entry("In_M_area_wood_com")?,
        area_pct_of_action: inputs.ass("Ass_E_P_local_wind_onshore_pct_action")?,
        ratio_power_to_area_ha: inputs.entry("In_E_local_wind_onshore_ratio_power_to_area_sta")?,
        invest_per_kw: inputs.ass("Ass_E_P_local_wind_onshore_ratio_invest_to_power_2030")?,
        mro_per_year: inputs.ass("Ass_E_P_local_wind_onshore_mro_per_year")?,
    }
    .plant(loss, neutral);
    expand(
        &mut p_local_wind_onshore,
        inputs.entry("In_E_PV_power_to_be_inst_local_wind_onshore")?,
        loss,
    );
    finish(
        inputs,
        &mut p_local_wind_onshore,
        &e18.p_local_wind_onshore,
        0.0,
        Trade::plant_construction(inputs)?,
    );
    hire(
        &mut p_local_wind_onshore,
        inputs.fact("Fact_E_P_wind_onshore_emplo_2018")? * population_share(inputs)?,
    );

    let mut p_local_hydro = Record::new(PLANT);
    p_local_hydro.power_installed = inputs.entry("In_E_PV_power_inst_water")?;
    p_local_hydro.full_load_hour = inputs.fact("Fact_E_P_hydro_full_load_hours")?;
    p_local_hydro.energy =
        p_local_hydro.power_installed * p_local_hydro.full_load_hour * (1.0 - loss);
    p_local_hydro.co2e_combustion_based_per_mwh = neutral;
    p_local_hydro.cost_mro_per_mwh = inputs.ass("Ass_E_P_local_hydro_mro_per_MWh")?;
    p_local_hydro.set_change(&e18.p_local_hydro, inputs);
    without_co2e_change(&mut p_local_hydro);
    running_costs(&mut p_local_hydro, &e18.p_local_hydro);

    let p_local_biomass = n.biomass.p_local_biomass.clone();

    // Agrivoltaics take whatever demand is left.
    let mut p_local_pv_agri = Site {
        power_installed: inputs.entry("In_E_PV_power_inst_agripv")?,
        full_load_hour: pv_flh,
        area_ha_available: inputs.entry("In_M_area_agri_com")?,
        area_pct_of_action: div(
            inputs.ass("Ass_E_P_local_pv_agri_power_installable")?,
            inputs.ass("Ass_E_P_local_pv_agri_power_per_ha")? * inputs.entry("In_M_area_agri_nat")?,
        ),
        ratio_power_to_area_ha: inputs.ass("Ass_E_P_local_pv_agri_power_per_ha")?,
        invest_per_kw: inputs.ass("Ass_E_P_local_pv_agri_ratio_invest_to_power")?,
        mro_per_year: roof_mro_per_year,
    }
    .plant(loss, neutral);
    let covered = Record::total(
        &[
            &p_local_pv_roof,
            &p_local_pv_facade,
            &p_local_pv_park,
            &p_local_wind_onshore,
            &p_local_biomass,
            &p_local_hydro,
        ],
        |r| r.energy,
    ) + n.national;
    p_local_pv_agri.energy = (n.demand - covered).max(0.0);
    p_local_pv_agri.power_to_be_installed_pct =
        div(p_local_pv_agri.energy, p_local_pv_agri.energy_installable);
    p_local_pv_agri.power_to_be_installed = (p_local_pv_agri.power_installable
        * p_local_pv_agri.power_to_be_installed_pct
        - p_local_pv_agri.power_installed)
        .max(0.0);
    finish(inputs, &mut p_local_pv_agri, &e18.p_local_pv_agri, 0.0, pv_trade);

    let mut p_local_pv = rollup_vs(
        PLANT,
        &[
            &p_local_pv_roof,
            &p_local_pv_facade,
            &p_local_pv_park,
            &p_local_pv_agri,
        ],
        &e18.p_local_pv,
    );
    p_local_pv.full_load_hour = pv_flh;
    p_local_pv.co2e_combustion_based_per_mwh = neutral;
    hire(
        &mut p_local_pv,
        inputs.fact("Fact_B_P_install_elec_emplo_2017")? * population_share(inputs)?,
    );

    let mut p_local = rollup_vs(
        PLANT,
        &[&p_local_pv, &p_local_wind_onshore, &p_local_biomass, &p_local_hydro],
        &e18.p_local,
    );
    p_local.co2e_combustion_based_per_mwh = div(p_local.co2e_combustion_based, p_local.energy);
    // Climate savings of local plants are not accounted yet.
    p_local.cost_climate_saved = 0.0;
    p_local.change_co2e_pct = 0.0;

    let mut p_local_surplus = Record::new(Shape::ENERGY);
    p_local_surplus.energy = p_local.energy - n.demand;

    Ok(Local {
        p_local,
        p_local_pv,
        p_local_pv_roof,
        p_local_pv_facade,
        p_local_pv_park,
        p_local_pv_agri,
        p_local_wind_onshore,
        p_local_biomass,
        p_local_hydro,
        p_local_surplus,
    })
}
