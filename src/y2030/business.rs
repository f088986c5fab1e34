//! Business in the target year: the non-residential stock follows the
//! residential retrofit pattern, vehicles and machinery run on e-diesel.

use tracing::debug;

use super::buildings::{self, Keys};
use super::residences::SECTOR;
use super::{CARRIER, carrier, rollup_vs};
use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::y2018::business::B18;
use crate::y2018::set_shares;

crate::snapshot!(
    /// Business in the target year.
    B30 {
        b,
        p,
        p_nonresi,
        p_elec_heatpump,
        s,
        s_fueloil,
        s_lpg,
        s_biomass,
        s_coal,
        s_petrol,
        s_diesel,
        s_ediesel,
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
    rehab_rate: "Ass_B_P_buildings_rehab_rate_pa",
    invest_per_m2: "Ass_B_P_buildings_rehab_invest_per_m2",
    heat_saving: "Ass_B_P_rehab_heat_saving_pct",
    heatnet: "Ass_B_S_heatnet_pct_of_heat_2035",
    solarth: "Ass_B_S_solarth_pct_of_heat_2035",
    biomass: "Ass_B_S_biomass_pct_of_heat_2035",
    emethan: "Ass_B_S_emethan_pct_of_heat_2035",
    elec_change: "Ass_B_D_fec_elec_change",
};

fn heat_2018(b18: &B18) -> f64 {
    Record::total(
        &[
            &b18.s_fueloil,
            &b18.s_lpg,
            &b18.s_biomass,
            &b18.s_coal,
            &b18.s_heatnet,
            &b18.s_solarth,
            &b18.s_heatpump,
            &b18.s_gas,
            &b18.s_elec_heating,
        ],
        |r| r.energy,
    )
}

pub fn calc(inputs: &Inputs<'_>, b18: &B18) -> BalanceResult<B30> {
    let retrofit = buildings::retrofit(
        inputs,
        &KEYS,
        &b18.p_nonresi,
        &b18.p_nonresi_com,
        heat_2018(b18),
        b18.s_elec.energy,
    )?;

    let mut s_fueloil = carrier(inputs, 0.0, 0.0, &b18.s_fueloil);
    let mut s_lpg = carrier(inputs, 0.0, 0.0, &b18.s_lpg);
    let mut s_coal = carrier(inputs, 0.0, 0.0, &b18.s_coal);
    let mut s_gas = carrier(inputs, 0.0, 0.0, &b18.s_gas);
    let mut s_petrol = carrier(inputs, 0.0, 0.0, &b18.s_petrol);
    let mut s_diesel = carrier(inputs, 0.0, 0.0, &b18.s_diesel);

    // Petrol and diesel engines alike are replaced by e-diesel machinery.
    let vehicles_2018 = Record::rollup(Shape::EMITTER, &[&b18.s_petrol, &b18.s_diesel]);
    let mut s_ediesel = carrier(
        inputs,
        vehicles_2018.energy * (1.0 + inputs.ass("Ass_B_D_fec_diesel_change")?),
        inputs.fact("Fact_T_S_diesel_EmFa_tank_wheel_2018")?,
        &vehicles_2018,
    );

    let mut s_biomass = carrier(inputs, retrofit.biomass, 0.0, &b18.s_biomass);
    let mut s_heatnet = carrier(inputs, retrofit.heatnet, 0.0, &b18.s_heatnet);
    let mut s_solarth = carrier(inputs, retrofit.solarth, 0.0, &b18.s_solarth);
    let mut s_heatpump = carrier(inputs, retrofit.heatpump, 0.0, &b18.s_heatpump);
    // E-methane is burned on site; its capture is booked by fuels.
    let mut s_emethan = carrier(
        inputs,
        retrofit.emethan,
        inputs.fact("Fact_T_S_methan_EmFa_tank_wheel_2018")?,
        &Record::new(CARRIER),
    );
    let mut s_elec_heating = carrier(inputs, retrofit.elec_heating, 0.0, &b18.s_elec_heating);
    let mut s_elec = carrier(inputs, retrofit.elec, 0.0, &b18.s_elec);

    let s = rollup_vs(
        Shape::BALANCE,
        &[
            &s_fueloil,
            &s_lpg,
            &s_biomass,
            &s_coal,
            &s_petrol,
            &s_diesel,
            &s_ediesel,
            &s_heatnet,
            &s_solarth,
            &s_heatpump,
            &s_gas,
            &s_emethan,
            &s_elec_heating,
            &s_elec,
        ],
        &b18.s,
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
            &mut s_ediesel,
            &mut s_heatnet,
            &mut s_solarth,
            &mut s_heatpump,
            &mut s_gas,
            &mut s_emethan,
            &mut s_elec_heating,
            &mut s_elec,
        ],
    );

    let p_nonresi = retrofit.buildings;
    let p_elec_heatpump = retrofit.heatpumps;

    let mut p = rollup_vs(
        SECTOR.with(Shape::BUILDINGS),
        &[&s, &p_nonresi, &p_elec_heatpump],
        &b18.p,
    );
    p.demand_electricity = s_elec.energy + s_elec_heating.energy;
    p.demand_heatnet = s_heatnet.energy;
    p.demand_solarth = s_solarth.energy;
    p.demand_heatpump = s_heatpump.energy;
    p.demand_biomass = s_biomass.energy;
    p.demand_emethan = s_emethan.energy;
    p.demand_ediesel = s_ediesel.energy;

    let b = rollup_vs(SECTOR, &[&p], &b18.b);

    debug!(
        energy = b.energy,
        co2e = b.co2e_total,
        invest = b.invest,
        "business target year"
    );

    Ok(B30 {
        b,
        p,
        p_nonresi,
        p_elec_heatpump,
        s,
        s_fueloil,
        s_lpg,
        s_biomass,
        s_coal,
        s_petrol,
        s_diesel,
        s_ediesel,
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
    fn vehicles_switch_to_ediesel() {
        let data = testing::refdata();
        let result = data.as_ref().and_then(testing::national).and_then(|inputs| {
            let b18 = crate::y2018::business::calc(&inputs).ok()?;
            let b30 = calc(&inputs, &b18).ok()?;
            Some((b18, b30))
        });
        let (b18, b30) = result.expect("sector modules should succeed");

        assert_eq!(b30.s_diesel.energy, 0.0);
        assert_eq!(b30.s_petrol.energy, 0.0);
        assert!(b30.s_ediesel.energy > 0.0);
        assert_eq!(b30.p.demand_ediesel, b30.s_ediesel.energy);
        // Only e-diesel engines and e-methane boilers still burn on site.
        assert!(
            (b30.b.co2e_total - b30.s_ediesel.co2e_total - b30.s_emethan.co2e_total).abs() < 1e-6
        );
        assert!(b30.p_nonresi.invest_com <= b30.p_nonresi.invest);
        assert_eq!(b30.p_nonresi.area_m2, b18.p_nonresi.area_m2);
    }
}
