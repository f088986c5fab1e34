//! Building retrofit shared by residences and business.
//!
//! A share of the floor area is rehabilitated by the target year, which
//! lowers the heat demand. The remaining demand is supplied without fossil
//! fuels: fixed shares of heat network, solar thermal, biomass and
//! e-methane, the rest by heat pumps.

use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::utils::div;
use crate::y2030::Trade;

/// Assumption keys of one building sector.
pub(crate) struct Keys {
    pub rehab_rate: &'static str,
    pub invest_per_m2: &'static str,
    pub heat_saving: &'static str,
    pub heatnet: &'static str,
    pub solarth: &'static str,
    pub biomass: &'static str,
    pub emethan: &'static str,
    pub elec_change: &'static str,
}

/// Outcome of the retrofit: investments and the new final energy by carrier.
#[derive(Debug, Clone)]
pub(crate) struct Retrofit {
    pub buildings: Record,
    pub heatpumps: Record,
    pub heatnet: f64,
    pub solarth: f64,
    pub biomass: f64,
    pub emethan: f64,
    /// Ambient heat drawn by heat pumps.
    pub heatpump: f64,
    /// Electricity driving the heat pumps.
    pub elec_heating: f64,
    /// Appliances and lighting.
    pub elec: f64,
}

pub(crate) const REHAB: Shape = Shape::BUILDINGS
    .with(Shape::INVESTMENT)
    .with(Shape::INVEST_COM);
pub(crate) const HEATPUMPS: Shape = Shape::INVESTMENT
    .with(Shape::INVEST_COM)
    .with(Shape::POWER);

/// Rehabilitates `stock` and switches its heat supply.
///
/// `stock_com` is the municipally owned part of the stock; it sets the
/// municipal share of both investments.
pub(crate) fn retrofit(
    inputs: &Inputs<'_>,
    keys: &Keys,
    stock: &Record,
    stock_com: &Record,
    heat_2018: f64,
    elec_2018: f64,
) -> BalanceResult<Retrofit> {
    let com_share = div(stock_com.area_m2, stock.area_m2);

    let mut buildings = Record::new(REHAB);
    buildings.area_m2 = stock.area_m2;
    buildings.number_of_buildings = stock.number_of_buildings;
    buildings.rate_rehab_pa = inputs.ass(keys.rehab_rate)?;
    buildings.area_m2_rehab =
        stock.area_m2 * (buildings.rate_rehab_pa * inputs.duration_target).min(1.0);
    buildings.invest_per_x = inputs.ass(keys.invest_per_m2)?;
    buildings.invest = buildings.area_m2_rehab * buildings.invest_per_x;
    buildings.invest_com = buildings.invest * com_share;
    Trade::main_construction(inputs)?.pay(&mut buildings, inputs);

    let rehab_share = div(buildings.area_m2_rehab, stock.area_m2);
    let heat = heat_2018 * (1.0 - rehab_share * inputs.ass(keys.heat_saving)?);
    let heatnet = heat * inputs.ass(keys.heatnet)?;
    let solarth = heat * inputs.ass(keys.solarth)?;
    let biomass = heat * inputs.ass(keys.biomass)?;
    let emethan = heat * inputs.ass(keys.emethan)?;
    let heatpump_heat = (heat - heatnet - solarth - biomass - emethan).max(0.0);
    let elec_heating = div(heatpump_heat, inputs.ass("Ass_R_S_heatpump_apf")?);

    let mut heatpumps = Record::new(HEATPUMPS);
    heatpumps.full_load_hour = inputs.ass("Ass_R_P_heatpump_full_load_hours")?;
    heatpumps.power_to_be_installed = div(heatpump_heat, heatpumps.full_load_hour);
    heatpumps.invest_per_x = inputs.ass("Ass_R_P_heatpump_invest_per_power")?;
    heatpumps.invest = heatpumps.power_to_be_installed * heatpumps.invest_per_x;
    heatpumps.invest_com = heatpumps.invest * com_share;
    Trade::heating_installation(inputs)?.pay(&mut heatpumps, inputs);

    Ok(Retrofit {
        buildings,
        heatpumps,
        heatnet,
        solarth,
        biomass,
        emethan,
        heatpump: heatpump_heat - elec_heating,
        elec_heating,
        elec: elec_2018 * (1.0 + inputs.ass(keys.elec_change)?),
    })
}
