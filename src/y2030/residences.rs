//! Residences in the target year: rehabilitated building stock heated
//! without fossil fuels.

use tracing::debug;

use super::buildings::{self, Keys};
use super::{CARRIER, carrier, rollup_vs};
use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::y2018::residences::R18;
use crate::y2018::set_shares;

crate::snapshot!(
    /// Residences in the target year.
    R30 {
        r,
        p,
        p_buildings_total,
        p_elec_heatpump,
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
        s_emethan,
        s_elec_heating,
        s_elec,
    }
);

const KEYS: Keys = Keys {
    rehab_rate: "Ass_R_P_buildings_rehab_rate_pa",
    invest_per_m2: "Ass_R_P_buildings_rehab_invest_per_m2",
    heat_saving: "Ass_R_P_rehab_heat_saving_pct",
    heatnet: "Ass_R_S_heatnet_pct_of_heat_2035",
    solarth: "Ass_R_S_solarth_pct_of_heat_2035",
    biomass: "Ass_R_S_biomass_pct_of_heat_2035",
    emethan: "Ass_R_S_emethan_pct_of_heat_2035",
    elec_change: "Ass_R_D_fec_elec_change",
};

pub(crate) const SECTOR: Shape = Shape::BALANCE
    .with(Shape::DEMAND)
    .with(Shape::INVESTMENT)
    .with(Shape::INVEST_COM);

/// Heat demand of 2018: every carrier except appliance electricity and petrol.
fn heat_2018(r18: &R18) -> f64 {
    Record::total(
        &[
            &r18.s_fueloil,
            &r18.s_lpg,
            &r18.s_biomass,
            &r18.s_coal,
            &r18.s_heatnet,
            &r18.s_solarth,
            &r18.s_heatpump,
            &r18.s_gas,
            &r18.s_elec_heating,
        ],
        |r| r.energy,
    )
}

pub fn calc(inputs: &Inputs<'_>, r18: &R18) -> BalanceResult<R30> {
    let retrofit = buildings::retrofit(
        inputs,
        &KEYS,
        &r18.p_buildings_total,
        &r18.p_buildings_area_m2_com,
        heat_2018(r18),
        r18.s_elec.energy,
    )?;

    let mut s_fueloil = carrier(inputs, 0.0, 0.0, &r18.s_fueloil);
    let mut s_lpg = carrier(inputs, 0.0, 0.0, &r18.s_lpg);
    let mut s_coal = carrier(inputs, 0.0, 0.0, &r18.s_coal);
    let mut s_gas = carrier(inputs, 0.0, 0.0, &r18.s_gas);
    // Household machinery runs on electricity, covered by the appliance change.
    let mut s_petrol = carrier(inputs, 0.0, 0.0, &r18.s_petrol);
    let mut s_biomass = carrier(inputs, retrofit.biomass, 0.0, &r18.s_biomass);
    let mut s_heatnet = carrier(inputs, retrofit.heatnet, 0.0, &r18.s_heatnet);
    let mut s_solarth = carrier(inputs, retrofit.solarth, 0.0, &r18.s_solarth);
    let mut s_heatpump = carrier(inputs, retrofit.heatpump, 0.0, &r18.s_heatpump);
    // E-methane is burned on site; its capture is booked by fuels.
    let mut s_emethan = carrier(
        inputs,
        retrofit.emethan,
        inputs.fact("Fact_T_S_methan_EmFa_tank_wheel_2018")?,
        &Record::new(CARRIER),
    );
    let mut s_elec_heating = carrier(inputs, retrofit.elec_heating, 0.0, &r18.s_elec_heating);
    let mut s_elec = carrier(inputs, retrofit.elec, 0.0, &r18.s_elec);

    let s = rollup_vs(
        Shape::BALANCE,
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
            &s_emethan,
            &s_elec_heating,
            &s_elec,
        ],
        &r18.s,
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
            &mut s_emethan,
            &mut s_elec_heating,
            &mut s_elec,
        ],
    );

    let p_buildings_total = retrofit.buildings;
    let p_elec_heatpump = retrofit.heatpumps;

    let mut p = rollup_vs(
        SECTOR.with(Shape::BUILDINGS),
        &[&s, &p_buildings_total, &p_elec_heatpump],
        &r18.p,
    );
    p.demand_electricity = s_elec.energy + s_elec_heating.energy;
    p.demand_heatnet = s_heatnet.energy;
    p.demand_solarth = s_solarth.energy;
    p.demand_heatpump = s_heatpump.energy;
    p.demand_biomass = s_biomass.energy;
    p.demand_emethan = s_emethan.energy;

    let r = rollup_vs(SECTOR, &[&p], &r18.r);

    debug!(
        energy = r.energy,
        co2e = r.co2e_total,
        invest = r.invest,
        "residences target year"
    );

    Ok(R30 {
        r,
        p,
        p_buildings_total,
        p_elec_heatpump,
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
        s_emethan,
        s_elec_heating,
        s_elec,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::y2030::testing;

    #[test]
    fn heat_is_supplied_without_fossil_fuels() {
        let data = testing::refdata();
        let result = data.as_ref().and_then(testing::national).and_then(|inputs| {
            let r18 = crate::y2018::residences::calc(&inputs).ok()?;
            let r30 = calc(&inputs, &r18).ok()?;
            Some((r18, r30))
        });
        let (r18, r30) = result.expect("sector modules should succeed");

        for fossil in [&r30.s_fueloil, &r30.s_lpg, &r30.s_coal, &r30.s_gas] {
            assert_eq!(fossil.energy, 0.0);
        }
        // Only e-methane still burns on site.
        assert!((r30.r.co2e_total - r30.s_emethan.co2e_total).abs() < 1e-6);
        assert!(r30.r.change_co2e_t <= 0.0);
        assert!(r30.p_buildings_total.area_m2_rehab <= r18.p_buildings_total.area_m2);
        assert!(
            (r30.p.demand_electricity - r30.s_elec.energy - r30.s_elec_heating.energy).abs() < 1e-9
        );
    }
}
