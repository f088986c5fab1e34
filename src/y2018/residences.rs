//! Residences 2018: residential building stock and final energy by carrier.
//!
//! Heating fuels are burned here but their emissions are accounted in the
//! heat sector; only petrol (garden and household machinery) carries
//! combustion emissions of its own.

use tracing::debug;

use super::{set_shares, supply_entry};
use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};

crate::snapshot!(
    /// Residences baseline.
    R18 {
        r,
        p,
        p_buildings_total,
        p_buildings_area_m2_com,
        s,
        s_fueloil,
        s_lpg,
        s_biomass,
        s_coal,
        s_petrol,
        s_heatnet,
        s_solarth,
        s_heatpump,
        s_gas,
        s_elec_heating,
        s_elec,
    }
);

pub fn calc(inputs: &Inputs<'_>) -> BalanceResult<R18> {
    let mut p_buildings_total = Record::new(Shape::BUILDINGS);
    p_buildings_total.area_m2 = inputs.entry("In_R_area_m2")?;
    p_buildings_total.number_of_buildings = inputs.entry("In_R_buildings_com")?;

    let mut p_buildings_area_m2_com = Record::new(Shape::BUILDINGS);
    p_buildings_area_m2_com.area_m2 =
        p_buildings_total.area_m2 * inputs.fact("Fact_R_P_buildings_area_m2_com_pct_2018")?;

    let mut s_fueloil = supply_entry(inputs, "In_R_fueloil_fec")?;
    let mut s_lpg = supply_entry(inputs, "In_R_lpg_fec")?;
    let mut s_biomass = supply_entry(inputs, "In_R_biomass_fec")?;
    let mut s_coal = supply_entry(inputs, "In_R_coal_fec")?;
    let mut s_petrol = supply_entry(inputs, "In_R_petrol_fec")?;
    let mut s_heatnet = supply_entry(inputs, "In_R_heatnet_fec")?;
    let mut s_solarth = supply_entry(inputs, "In_R_solarth_fec")?;
    let mut s_heatpump = supply_entry(inputs, "In_R_heatpump_fec")?;
    let mut s_gas = supply_entry(inputs, "In_R_gas_fec")?;
    let mut s_elec_heating = supply_entry(inputs, "In_R_elec_heating_fec")?;
    let mut s_elec = supply_entry(inputs, "In_R_elec_fec")?;

    s_petrol.co2e_combustion_based =
        s_petrol.energy * inputs.fact("Fact_R_S_petrol_ratio_CO2e_cb_to_fec_2018")?;
    s_petrol.sum_emissions();

    let s = Record::rollup(
        Shape::EMITTER,
        &[
            &s_fueloil,
            &s_lpg,
            &s_biomass,
            &s_coal,
            &s_petrol,
            &s_heatnet,
            &s_solarth,
            &s_heatpump,
            &s_gas,
            &s_elec_heating,
            &s_elec,
        ],
    );
    set_shares(
        s.energy,
        &mut [
            &mut s_fueloil,
            &mut s_lpg,
            &mut s_biomass,
            &mut s_coal,
            &mut s_petrol,
            &mut s_heatnet,
            &mut s_solarth,
            &mut s_heatpump,
            &mut s_gas,
            &mut s_elec_heating,
            &mut s_elec,
        ],
    );

    let mut p = Record::rollup(Shape::EMITTER.with(Shape::BUILDINGS), &[&s]);
    p.area_m2 = p_buildings_total.area_m2;
    p.number_of_buildings = p_buildings_total.number_of_buildings;

    let r = Record::rollup(Shape::EMITTER, &[&p]);

    debug!(energy = r.energy, co2e = r.co2e_total, "residences 2018");

    Ok(R18 {
        r,
        p,
        p_buildings_total,
        p_buildings_area_m2_com,
        s,
        s_fueloil,
        s_lpg,
        s_biomass,
        s_coal,
        s_petrol,
        s_heatnet,
        s_solarth,
        s_heatpump,
        s_gas,
        s_elec_heating,
        s_elec,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::y2018::testing;

    #[test]
    fn carrier_shares_add_up_to_one() {
        let data = testing::refdata();
        let r18 = data.as_ref().and_then(testing::national).and_then(|i| calc(&i).ok());
        let r18 = r18.expect("residences should be computed");
        let shares: f64 = [
            &r18.s_fueloil,
            &r18.s_lpg,
            &r18.s_biomass,
            &r18.s_coal,
            &r18.s_petrol,
            &r18.s_heatnet,
            &r18.s_solarth,
            &r18.s_heatpump,
            &r18.s_gas,
            &r18.s_elec_heating,
            &r18.s_elec,
        ]
        .iter()
        .map(|r| r.pct_energy)
        .sum();
        assert!((shares - 1.0).abs() < 1e-9);
        assert_eq!(r18.r.co2e_total, r18.s_petrol.co2e_total);
    }
}
