//! Heat 2018: production of the heating carriers consumed by residences,
//! business, industry and agriculture.
//!
//! Combustion emissions of heating fuels are accounted here rather than in
//! the consuming sectors. Industry burns its fossil fuels itself and only
//! draws heat from the heat network and biomass.

use tracing::debug;

use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::utils::div;
use crate::y2018::agri::A18;
use crate::y2018::business::B18;
use crate::y2018::industry::I18;
use crate::y2018::residences::R18;

crate::snapshot!(
    /// Heat baseline.
    H18 {
        h,
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
        p_heatnet_geoth,
        p_heatnet_lheatpump,
        p_biomass,
        p_ofossil,
        p_orenew,
        p_solarth,
        p_heatpump,
    }
);

const PLANT: Shape = Shape::EMITTER.with(Shape::PER_MWH);

/// Production record from energy and per-MWh factors.
fn plant(energy: f64, pb_per_mwh: f64, cb_per_mwh: f64) -> Record {
    let mut r = Record::new(PLANT);
    r.energy = energy;
    r.co2e_production_based_per_mwh = pb_per_mwh;
    r.co2e_combustion_based_per_mwh = cb_per_mwh;
    r.co2e_production_based = energy * pb_per_mwh;
    r.co2e_combustion_based = energy * cb_per_mwh;
    r.sum_emissions();
    r
}

fn demand(records: &[&Record]) -> Record {
    let mut r = Record::new(Shape::ENERGY.with(Shape::PCT));
    r.energy = Record::total(records, |r| r.energy);
    r
}

pub fn calc(inputs: &Inputs<'_>, r18: &R18, b18: &B18, i18: &I18, a18: &A18) -> BalanceResult<H18> {
    let orenew_pb = inputs.fact("Fact_H_P_orenew_ratio_CO2e_pb_to_fec_2018")?;

    let p_gas = plant(
        r18.s_gas.energy + b18.s_gas.energy + a18.s_gas.energy,
        inputs.fact("Fact_H_P_gas_ratio_CO2e_pb_to_fec_2018")?,
        inputs.fact("Fact_H_P_gas_ratio_CO2e_cb_to_fec_2018")?,
    );
    let p_lpg = plant(
        r18.s_lpg.energy + b18.s_lpg.energy + a18.s_lpg.energy,
        0.0,
        inputs.fact("Fact_H_P_lpg_ratio_CO2e_cb_to_fec_2018")?,
    );
    let p_fueloil = plant(
        r18.s_fueloil.energy + b18.s_fueloil.energy + a18.s_fueloil.energy,
        0.0,
        inputs.fact("Fact_H_P_fueloil_ratio_CO2e_cb_to_fec_2018")?,
    );
    let p_opetpro = plant(0.0, 0.0, inputs.fact("Fact_H_P_opetpro_ratio_CO2e_cb_to_fec_2018")?);
    let p_coal = plant(
        r18.s_coal.energy + b18.s_coal.energy,
        inputs.fact("Fact_H_P_coal_ratio_CO2e_pb_to_fec_2018")?,
        inputs.fact("Fact_H_P_coal_ratio_CO2e_cb_to_fec_2018")?,
    );
    let p_ofossil = plant(0.0, inputs.fact("Fact_H_P_ofossil_ratio_CO2e_pb_to_fec_2018")?, 0.0);

    let heatnet = r18.s_heatnet.energy + b18.s_heatnet.energy + i18.s_renew_heatnet.energy;
    let p_heatnet_cogen = plant(
        heatnet * inputs.fact("Fact_H_P_heatnet_cogen_pct_of_heatnet_2018")?,
        0.0,
        inputs.fact("Fact_H_P_heatnet_cogen_ratio_CO2e_cb_to_fec_2018")?,
    );
    let p_heatnet_plant = plant(
        heatnet * inputs.fact("Fact_H_P_heatnet_plant_pct_of_heatnet_2018")?,
        0.0,
        inputs.fact("Fact_H_P_heatnet_plant_ratio_CO2e_cb_to_fec_2018")?,
    );
    let p_heatnet_geoth = plant(
        heatnet * inputs.fact("Fact_H_P_heatnet_geoth_pct_of_heatnet_2018")?,
        orenew_pb,
        0.0,
    );
    let mut p_heatnet_lheatpump = plant(
        heatnet * inputs.fact("Fact_H_P_heatnet_lheatpump_pct_of_heatnet_2018")?,
        orenew_pb,
        0.0,
    );
    p_heatnet_lheatpump.demand_electricity =
        div(p_heatnet_lheatpump.energy, inputs.fact("Fact_H_P_heatnet_lheatpump_apf")?);
    let mut p_heatnet = Record::rollup(
        Shape::EMITTER.with(Shape::DEMAND),
        &[
            &p_heatnet_cogen,
            &p_heatnet_plant,
            &p_heatnet_geoth,
            &p_heatnet_lheatpump,
        ],
    );
    p_heatnet.demand_electricity = p_heatnet_lheatpump.demand_electricity;

    let p_biomass = plant(
        r18.s_biomass.energy + b18.s_biomass.energy + i18.s_renew_biomass.energy + a18.s_biomass.energy,
        inputs.fact("Fact_H_P_biomass_ratio_CO2e_pb_to_fec_2018")?,
        0.0,
    );
    let p_solarth = plant(r18.s_solarth.energy + b18.s_solarth.energy, orenew_pb, 0.0);
    let p_heatpump = plant(
        r18.s_heatpump.energy + b18.s_heatpump.energy + a18.s_heatpump.energy,
        orenew_pb,
        0.0,
    );
    let p_orenew = Record::rollup(Shape::EMITTER, &[&p_solarth, &p_heatpump]);

    let mut p = Record::rollup(
        Shape::EMITTER.with(Shape::DEMAND),
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
    );
    p.demand_electricity = p_heatnet.demand_electricity;

    let h = Record::rollup(Shape::EMITTER, &[&p]);

    let mut d_r = demand(&[
        &r18.s_gas,
        &r18.s_lpg,
        &r18.s_fueloil,
        &r18.s_coal,
        &r18.s_heatnet,
        &r18.s_biomass,
        &r18.s_solarth,
        &r18.s_heatpump,
    ]);
    let mut d_b = demand(&[
        &b18.s_gas,
        &b18.s_lpg,
        &b18.s_fueloil,
        &b18.s_coal,
        &b18.s_heatnet,
        &b18.s_biomass,
        &b18.s_solarth,
        &b18.s_heatpump,
    ]);
    let mut d_i = demand(&[&i18.s_renew_heatnet, &i18.s_renew_biomass]);
    let mut d_t = demand(&[]);
    let mut d_a = demand(&[
        &a18.s_gas,
        &a18.s_lpg,
        &a18.s_fueloil,
        &a18.s_biomass,
        &a18.s_heatpump,
    ]);
    let d = Record::rollup(Shape::ENERGY, &[&d_r, &d_b, &d_i, &d_t, &d_a]);
    for r in [&mut d_r, &mut d_b, &mut d_i, &mut d_t, &mut d_a] {
        r.pct_energy = div(r.energy, d.energy);
    }

    debug!(energy = h.energy, co2e = h.co2e_total, "heat 2018");

    Ok(H18 {
        h,
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
        p_heatnet_geoth,
        p_heatnet_lheatpump,
        p_biomass,
        p_ofossil,
        p_orenew,
        p_solarth,
        p_heatpump,
    })
}
