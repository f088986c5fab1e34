//! Land use, land-use change and forestry 2018.
//!
//! Every land category is an area with a net emission factor per hectare;
//! forests and harvested wood are sinks (negative factors).

use tracing::debug;

use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::y2018::agri::per_ha;

crate::snapshot!(
    /// Land use baseline.
    L18 {
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

pub fn calc(inputs: &Inputs<'_>) -> BalanceResult<L18> {
    let area_agri = inputs.entry("In_M_area_agri_com")?;
    let crop_pct = inputs.fact("Fact_L_G_crop_pct_of_agri_2018")?;

    let g_forest = per_ha(
        inputs.entry("In_M_area_wood_com")?,
        inputs.fact("Fact_L_G_forest_CO2e_per_ha_2018")?,
    );
    let g_crop = per_ha(area_agri * crop_pct, inputs.fact("Fact_L_G_crop_CO2e_per_ha_2018")?);
    let g_grass = per_ha(
        area_agri * (1.0 - crop_pct),
        inputs.fact("Fact_L_G_grass_CO2e_per_ha_2018")?,
    );
    let g_grove = per_ha(
        inputs.entry("In_M_area_grove_com")?,
        inputs.fact("Fact_L_G_grove_CO2e_per_ha_2018")?,
    );
    let g_wet = per_ha(
        inputs.entry("In_M_area_wet_com")?,
        inputs.fact("Fact_L_G_wet_CO2e_per_ha_2018")?,
    );
    let g_water = per_ha(
        inputs.entry("In_M_area_water_com")?,
        inputs.fact("Fact_L_G_water_CO2e_per_ha_2018")?,
    );
    let g_settlement = per_ha(
        inputs.entry("In_M_area_settlement_com")?,
        inputs.fact("Fact_L_G_settlement_CO2e_per_ha_2018")?,
    );
    let g_other = per_ha(
        inputs.entry("In_M_area_other_com")?,
        inputs.fact("Fact_L_G_other_CO2e_per_ha_2018")?,
    );
    // Harvested wood products, counted per hectare of forest.
    let g_wood = per_ha(g_forest.area_ha, inputs.fact("Fact_L_G_wood_CO2e_per_ha_2018")?);

    let g = Record::rollup(
        Shape::EMISSIONS,
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
    );
    let l = Record::rollup(Shape::EMISSIONS, &[&g]);

    debug!(co2e = l.co2e_total, "lulucf 2018");

    Ok(L18 {
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

    #[test]
    fn land_emissions_scale_with_area() {
        let r = per_ha(200.0, -3.5);
        assert_eq!(r.co2e_production_based, -700.0);
        assert_eq!(r.co2e_total, -700.0);
        assert_eq!(r.get("area_ha"), Some(200.0));
        assert_eq!(r.get("energy"), None);
    }
}
