//! Transmission and distribution grids for the added wind and solar power.

use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::utils::MILLION;
use crate::y2030::Trade;

const GRID: Shape = Shape::INVESTMENT.with(Shape::POWER).with(Shape::MRO);

pub(super) struct Grids {
    pub g: Record,
    pub g_grid_offshore: Record,
    pub g_grid_onshore: Record,
    pub g_grid_pv: Record,
}

fn connect(
    inputs: &Inputs<'_>,
    trade: Trade,
    plant: &Record,
    ratio_key: &str,
    mro_key: &str,
) -> BalanceResult<Record> {
    let mut r = Record::new(GRID);
    r.power_to_be_installed = plant.power_to_be_installed;
    r.invest_per_x = inputs.ass(ratio_key)?;
    r.invest = r.power_to_be_installed * r.invest_per_x;
    r.cost_mro = r.invest * inputs.ass(mro_key)? / MILLION;
    trade.pay(&mut r, inputs);
    Ok(r)
}

pub(super) fn calc(
    inputs: &Inputs<'_>,
    offshore: &Record,
    onshore: &Record,
    pv: &Record,
) -> BalanceResult<Grids> {
    let trade = Trade::main_construction(inputs)?;
    let g_grid_offshore = connect(
        inputs,
        trade,
        offshore,
        "Ass_E_G_grid_offshore_ratio_invest_to_power",
        "Ass_E_G_grid_offshore_mro",
    )?;
    let g_grid_onshore = connect(
        inputs,
        trade,
        onshore,
        "Ass_E_G_grid_onshore_ratio_invest_to_power",
        "Ass_E_G_grid_onshore_mro",
    )?;
    let g_grid_pv = connect(
        inputs,
        trade,
        pv,
        "Ass_E_G_grid_pv_ratio_invest_to_power",
        "Ass_E_G_grid_pv_mro",
    )?;
    let g = Record::rollup(GRID, &[&g_grid_offshore, &g_grid_onshore, &g_grid_pv]);
    Ok(Grids {
        g,
        g_grid_offshore,
        g_grid_onshore,
        g_grid_pv,
    })
}
