//! Land use in the target year: part of the cropland is afforested or
//! rewetted, every category keeps its 2018 factor per hectare.

use tracing::debug;

use super::{Trade, rollup_vs};
use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::y2018::lulucf::L18;

crate::snapshot!(
    /// Land use in the target year.
    L30 {
        l,
        g,
        g_forest,
        g_crop,
        g_grass,
        g_grove,
        g_wet,
        g_water,
        g_settlement,
        g_other,
        g_wood,
    }
);

const AREA: Shape = Shape::EMISSIONS.with(Shape::LAND).with(Shape::CHANGE);
const CONVERTED: Shape = AREA.with(Shape::INVESTMENT).with(Shape::INVEST_COM);
/// Totals carry no area: wood products count the forest hectares again.
const TOTAL: Shape = Shape::EMISSIONS
    .with(Shape::CHANGE)
    .with(Shape::INVESTMENT)
    .with(Shape::INVEST_COM);

fn area(inputs: &Inputs<'_>, shape: Shape, area_ha: f64, base: &Record) -> Record {
    let mut r = Record::new(shape);
    r.area_ha = area_ha;
    r.co2e_production_based_per_ha = base.co2e_production_based_per_ha;
    r.co2e_production_based = area_ha * r.co2e_production_based_per_ha;
    r.sum_emissions();
    r.set_co2e_change(base, inputs);
    r
}

/// Conversion of `added_ha` of cropland, paid per hectare.
fn convert(
    inputs: &Inputs<'_>,
    base: &Record,
    added_ha: f64,
    invest_key: &str,
    trade: Trade,
) -> BalanceResult<Record> {
    let mut r = area(inputs, CONVERTED, base.area_ha + added_ha, base);
    r.invest_per_x = inputs.ass(invest_key)?;
    r.invest = added_ha * r.invest_per_x;
    r.invest_com = r.invest * inputs.ass("Ass_L_G_invest_pct_com")?;
    trade.pay(&mut r, inputs);
    Ok(r)
}

pub fn calc(inputs: &Inputs<'_>, l18: &L18) -> BalanceResult<L30> {
    let to_forest = l18.g_crop.area_ha * inputs.ass("Ass_L_G_crop_to_forest_pct")?;
    let to_wet = l18.g_crop.area_ha * inputs.ass("Ass_L_G_crop_to_wet_pct")?;
    let trade = Trade::assumed(
        inputs,
        "Ass_L_G_invest_pct_of_wage",
        "Ass_L_G_ratio_wage_to_emplo",
    )?;

    let g_forest = convert(inputs, &l18.g_forest, to_forest, "Ass_L_G_forest_invest_per_ha", trade)?;
    let g_wet = convert(inputs, &l18.g_wet, to_wet, "Ass_L_G_wet_invest_per_ha", trade)?;
    let g_crop = area(inputs, AREA, l18.g_crop.area_ha - to_forest - to_wet, &l18.g_crop);
    let g_grass = area(inputs, AREA, l18.g_grass.area_ha, &l18.g_grass);
    let g_grove = area(inputs, AREA, l18.g_grove.area_ha, &l18.g_grove);
    let g_water = area(inputs, AREA, l18.g_water.area_ha, &l18.g_water);
    let g_settlement = area(inputs, AREA, l18.g_settlement.area_ha, &l18.g_settlement);
    let g_other = area(inputs, AREA, l18.g_other.area_ha, &l18.g_other);
    let g_wood = area(inputs, AREA, g_forest.area_ha, &l18.g_wood);

    let g = rollup_vs(
        TOTAL,
        &[
            &g_forest,
            &g_crop,
            &g_grass,
            &g_grove,
            &g_wet,
            &g_water,
            &g_settlement,
            &g_other,
            &g_wood,
        ],
        &l18.g,
    );
    let l = rollup_vs(TOTAL, &[&g], &l18.l);

    debug!(co2e = l.co2e_total, invest = l.invest, "lulucf target year");

    Ok(L30 {
        l,
        g,
        g_forest,
        g_crop,
        g_grass,
        g_grove,
        g_wet,
        g_water,
        g_settlement,
        g_other,
        g_wood,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::y2030::testing;

    #[test]
    fn converted_cropland_keeps_the_area() {
        let data = testing::refdata();
        let result = data.as_ref().and_then(testing::national).and_then(|inputs| {
            let l18 = crate::y2018::lulucf::calc(&inputs).ok()?;
            let l30 = calc(&inputs, &l18).ok()?;
            Some((l18, l30))
        });
        let (l18, l30) = result.expect("sector modules should succeed");

        let before = l18.g_forest.area_ha + l18.g_wet.area_ha + l18.g_crop.area_ha;
        let after = l30.g_forest.area_ha + l30.g_wet.area_ha + l30.g_crop.area_ha;
        assert!((before - after).abs() < 1e-6);
        assert!(l30.g_forest.area_ha >= l18.g_forest.area_ha);
        assert!(l30.l.co2e_total <= l18.l.co2e_total);
    }
}
