//! Business 2018: non-residential floor area and final energy by carrier.

use tracing::debug;

use super::{set_shares, supply_entry};
use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};

crate::snapshot!(
    /// Business baseline.
    B18 {
        b,
        p,
        p_nonresi,
        p_nonresi_com,
        s,
        s_fueloil,
        s_lpg,
        s_biomass,
        s_coal,
        s_petrol,
        s_diesel,
        s_heatnet,
        s_solarth,
        s_heatpump,
        s_gas,
        s_elec_heating,
        s_elec,
    }
);

pub fn calc(inputs: &Inputs<'_>) -> BalanceResult<B18> {
    let mut p_nonresi = Record::new(Shape::BUILDINGS);
    p_nonresi.area_m2 = inputs.entry("In_B_area_nonresi_m2")?;
    p_nonresi.number_of_buildings = inputs.entry("In_B_buildings_nonresi")?;

    let mut p_nonresi_com = Record::new(Shape::BUILDINGS);
    p_nonresi_com.area_m2 = p_nonresi.area_m2 * inputs.fact("Fact_B_P_nonresi_area_m2_com_pct_2018")?;

    let mut s_fueloil = supply_entry(inputs, "In_B_fueloil_fec")?;
    let mut s_lpg = supply_entry(inputs, "In_B_lpg_fec")?;
    let mut s_biomass = supply_entry(inputs, "In_B_biomass_fec")?;
    let mut s_coal = supply_entry(inputs, "In_B_coal_fec")?;
    let mut s_petrol = supply_entry(inputs, "In_B_petrol_fec")?;
    let mut s_diesel = supply_entry(inputs, "In_B_diesel_fec")?;
    let mut s_heatnet = supply_entry(inputs, "In_B_heatnet_fec")?;
    let mut s_solarth = supply_entry(inputs, "In_B_solarth_fec")?;
    let mut s_heatpump = supply_entry(inputs, "In_B_heatpump_fec")?;
    let mut s_gas = supply_entry(inputs, "In_B_gas_fec")?;
    let mut s_elec_heating = supply_entry(inputs, "In_B_elec_heating_fec")?;
    let mut s_elec = supply_entry(inputs, "In_B_elec_fec")?;

    // Motor fuels of construction sites and fleets burn in the sector itself.
    s_petrol.co2e_combustion_based =
        s_petrol.energy * inputs.fact("Fact_B_S_petrol_ratio_CO2e_cb_to_fec_2018")?;
    s_petrol.sum_emissions();
    s_diesel.co2e_combustion_based =
        s_diesel.energy * inputs.fact("Fact_B_S_diesel_ratio_CO2e_cb_to_fec_2018")?;
    s_diesel.sum_emissions();

    let s = Record::rollup(
        Shape::EMITTER,
        &[
            &s_fueloil,
            &s_lpg,
            &s_biomass,
            &s_coal,
            &s_petrol,
            &s_diesel,
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
            &mut s_diesel,
            &mut s_heatnet,
            &mut s_solarth,
            &mut s_heatpump,
            &mut s_gas,
            &mut s_elec_heating,
            &mut s_elec,
        ],
    );

    let mut p = Record::rollup(Shape::EMITTER.with(Shape::BUILDINGS), &[&s]);
    p.area_m2 = p_nonresi.area_m2;
    p.number_of_buildings = p_nonresi.number_of_buildings;

    let b = Record::rollup(Shape::EMITTER, &[&p]);

    debug!(energy = b.energy, co2e = b.co2e_total, "business 2018");

    Ok(B18 {
        b,
        p,
        p_nonresi,
        p_nonresi_com,
        s,
        s_fueloil,
        s_lpg,
        s_biomass,
        s_coal,
        s_petrol,
        s_diesel,
        s_heatnet,
        s_solarth,
        s_heatpump,
        s_gas,
        s_elec_heating,
        s_elec,
    })
}
