//! Transport in the target year.
//!
//! Each mode changes its transport performance and its final energy; the
//! energy is then split over the climate-neutral carriers. Synthetic fuels
//! still emit at the tailpipe, the fuels sector books the matching uptake.

use tracing::debug;

use super::{CARRIER, Trade, carrier, rollup_vs};
use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::utils::div;
use crate::y2018::set_shares;
use crate::y2018::transport::T18;

crate::snapshot!(
    /// Transport in the target year.
    T30 {
        t,
        g,
        g_charging,
        g_rail,
        road,
        rail,
        ship,
        air,
        s,
        s_petrol,
        s_jetfuel,
        s_diesel,
        s_lpg,
        s_gas,
        s_biogas,
        s_bioethanol,
        s_biodiesel,
        s_elec,
        s_hydrogen,
        s_epetrol,
        s_ediesel,
        s_ejetfuel,
    }
);

const MODE: Shape = Shape::BALANCE.with(Shape::TRANSPORT).with(Shape::DEMAND);
const INFRA: Shape = Shape::INVESTMENT.with(Shape::INVEST_COM).with(Shape::POWER);
const SECTOR: Shape = MODE.with(Shape::INVESTMENT).with(Shape::INVEST_COM);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fuel {
    Elec,
    Hydrogen,
    Epetrol,
    Ediesel,
    Ejetfuel,
}

impl Fuel {
    const ALL: [Fuel; 5] = [
        Fuel::Elec,
        Fuel::Hydrogen,
        Fuel::Epetrol,
        Fuel::Ediesel,
        Fuel::Ejetfuel,
    ];

    /// Tailpipe factor; synthetic fuels burn like their fossil counterparts.
    fn tank_to_wheel(self, inputs: &Inputs<'_>) -> BalanceResult<f64> {
        match self {
            Fuel::Elec => inputs.fact("Fact_T_S_elec_EmFa_tank_wheel_2018"),
            Fuel::Hydrogen => Ok(0.0),
            Fuel::Epetrol => inputs.fact("Fact_T_S_petrol_EmFa_tank_wheel_2018"),
            Fuel::Ediesel => inputs.fact("Fact_T_S_diesel_EmFa_tank_wheel_2018"),
            Fuel::Ejetfuel => inputs.fact("Fact_T_S_petroljet_EmFa_tank_wheel_2018"),
        }
    }

    fn add_demand(self, r: &mut Record, energy: f64) {
        match self {
            Fuel::Elec => r.demand_electricity += energy,
            Fuel::Hydrogen => r.demand_hydrogen += energy,
            Fuel::Epetrol => r.demand_epetrol += energy,
            Fuel::Ediesel => r.demand_ediesel += energy,
            Fuel::Ejetfuel => r.demand_ejetfuel += energy,
        }
    }
}

struct ModeKeys {
    transport_change: &'static str,
    fec_change: &'static str,
    mix: &'static [(Fuel, &'static str)],
}

const ROAD: ModeKeys = ModeKeys {
    transport_change: "Ass_T_D_road_transport_change",
    fec_change: "Ass_T_D_road_fec_change",
    mix: &[
        (Fuel::Elec, "Ass_T_S_road_elec_pct_of_fec_2035"),
        (Fuel::Hydrogen, "Ass_T_S_road_hydrogen_pct_of_fec_2035"),
        (Fuel::Epetrol, "Ass_T_S_road_epetrol_pct_of_fec_2035"),
        (Fuel::Ediesel, "Ass_T_S_road_ediesel_pct_of_fec_2035"),
    ],
};

const RAIL: ModeKeys = ModeKeys {
    transport_change: "Ass_T_D_rail_transport_change",
    fec_change: "Ass_T_D_rail_fec_change",
    mix: &[
        (Fuel::Elec, "Ass_T_S_rail_elec_pct_of_fec_2035"),
        (Fuel::Ediesel, "Ass_T_S_rail_ediesel_pct_of_fec_2035"),
    ],
};

const SHIP: ModeKeys = ModeKeys {
    transport_change: "Ass_T_D_ship_transport_change",
    fec_change: "Ass_T_D_ship_fec_change",
    mix: &[
        (Fuel::Hydrogen, "Ass_T_S_ship_hydrogen_pct_of_fec_2035"),
        (Fuel::Ediesel, "Ass_T_S_ship_ediesel_pct_of_fec_2035"),
    ],
};

const AIR: ModeKeys = ModeKeys {
    transport_change: "Ass_T_D_air_transport_change",
    fec_change: "Ass_T_D_air_fec_change",
    mix: &[(Fuel::Ejetfuel, "Ass_T_S_air_ejetfuel_pct_of_fec_2035")],
};

fn mode(inputs: &Inputs<'_>, keys: &ModeKeys, base: &Record) -> BalanceResult<Record> {
    let transport_change = inputs.ass(keys.transport_change)?;
    let mut r = Record::new(MODE);
    r.transport_capacity_pkm = base.transport_capacity_pkm * (1.0 + transport_change);
    r.transport_capacity_tkm = base.transport_capacity_tkm * (1.0 + transport_change);
    r.energy = base.energy * (1.0 + inputs.ass(keys.fec_change)?);
    for (fuel, pct_key) in keys.mix {
        let energy = r.energy * inputs.ass(pct_key)?;
        fuel.add_demand(&mut r, energy);
        r.co2e_combustion_based += energy * fuel.tank_to_wheel(inputs)?;
    }
    r.sum_emissions();
    r.set_change(base, inputs);
    Ok(r)
}

/// Charging points for the electric road traffic.
fn charging(inputs: &Inputs<'_>, road: &Record) -> BalanceResult<Record> {
    let mut r = Record::new(INFRA);
    r.full_load_hour = inputs.ass("Ass_T_C_charging_full_load_hours")?;
    r.power_to_be_installed = div(road.demand_electricity, r.full_load_hour);
    r.invest_per_x = inputs.ass("Ass_T_C_charging_invest_per_power")?;
    r.invest = r.power_to_be_installed * r.invest_per_x;
    r.invest_com = r.invest * inputs.ass("Ass_T_C_charging_invest_pct_com")?;
    Trade::main_construction(inputs)?.pay(&mut r, inputs);
    Ok(r)
}

/// Track extension for the additional rail performance.
fn rail_extension(inputs: &Inputs<'_>, rail: &Record, base: &Record) -> BalanceResult<Record> {
    let added_pkm = (rail.transport_capacity_pkm - base.transport_capacity_pkm).max(0.0);
    let mut r = Record::new(INFRA);
    r.invest_per_x = inputs.ass("Ass_T_C_rail_invest_per_pkm_added")?;
    r.invest = added_pkm * r.invest_per_x;
    r.invest_com = r.invest * inputs.ass("Ass_T_C_rail_invest_pct_com")?;
    Trade::main_construction(inputs)?.pay(&mut r, inputs);
    Ok(r)
}

pub fn calc(inputs: &Inputs<'_>, t18: &T18) -> BalanceResult<T30> {
    let road = mode(inputs, &ROAD, &t18.road)?;
    let rail = mode(inputs, &RAIL, &t18.rail)?;
    let ship = mode(inputs, &SHIP, &t18.ship)?;
    let air = mode(inputs, &AIR, &t18.air)?;

    let g_charging = charging(inputs, &road)?;
    let g_rail = rail_extension(inputs, &rail, &t18.rail)?;
    let g = Record::rollup(INFRA, &[&g_charging, &g_rail]);

    let modes = Record::rollup(MODE, &[&road, &rail, &ship, &air]);
    let mut factors = [0.0; 5];
    for fuel in Fuel::ALL {
        factors[fuel as usize] = fuel.tank_to_wheel(inputs)?;
    }
    let new_carrier = |energy: f64, fuel: Fuel| {
        carrier(inputs, energy, factors[fuel as usize], &Record::new(CARRIER))
    };

    let retired = |base: &Record| carrier(inputs, 0.0, 0.0, base);
    let mut s_petrol = retired(&t18.s_petrol);
    let mut s_jetfuel = retired(&t18.s_jetfuel);
    let mut s_diesel = retired(&t18.s_diesel);
    let mut s_lpg = retired(&t18.s_lpg);
    let mut s_gas = retired(&t18.s_gas);
    let mut s_biogas = retired(&t18.s_biogas);
    let mut s_bioethanol = retired(&t18.s_bioethanol);
    let mut s_biodiesel = retired(&t18.s_biodiesel);
    let mut s_elec = carrier(
        inputs,
        modes.demand_electricity,
        factors[Fuel::Elec as usize],
        &t18.s_elec,
    );
    let mut s_hydrogen = new_carrier(modes.demand_hydrogen, Fuel::Hydrogen);
    let mut s_epetrol = new_carrier(modes.demand_epetrol, Fuel::Epetrol);
    let mut s_ediesel = new_carrier(modes.demand_ediesel, Fuel::Ediesel);
    let mut s_ejetfuel = new_carrier(modes.demand_ejetfuel, Fuel::Ejetfuel);

    let s = rollup_vs(
        Shape::BALANCE,
        &[
            &s_petrol,
            &s_jetfuel,
            &s_diesel,
            &s_lpg,
            &s_gas,
            &s_biogas,
            &s_bioethanol,
            &s_biodiesel,
            &s_elec,
            &s_hydrogen,
            &s_epetrol,
            &s_ediesel,
            &s_ejetfuel,
        ],
        &t18.s,
    );
    set_shares(
        s.energy,
        &mut [
            &mut s_petrol,
            &mut s_jetfuel,
            &mut s_diesel,
            &mut s_lpg,
            &mut s_gas,
            &mut s_biogas,
            &mut s_bioethanol,
            &mut s_biodiesel,
            &mut s_elec,
            &mut s_hydrogen,
            &mut s_epetrol,
            &mut s_ediesel,
            &mut s_ejetfuel,
        ],
    );

    let t = rollup_vs(SECTOR, &[&road, &rail, &ship, &air, &g], &t18.t);

    debug!(
        energy = t.energy,
        co2e = t.co2e_total,
        invest = t.invest,
        "transport target year"
    );

    Ok(T30 {
        t,
        g,
        g_charging,
        g_rail,
        road,
        rail,
        ship,
        air,
        s,
        s_petrol,
        s_jetfuel,
        s_diesel,
        s_lpg,
        s_gas,
        s_biogas,
        s_bioethanol,
        s_biodiesel,
        s_elec,
        s_hydrogen,
        s_epetrol,
        s_ediesel,
        s_ejetfuel,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::y2030::testing;

    #[test]
    fn carriers_cover_the_mode_energy() {
        let data = testing::refdata();
        let t30 = data.as_ref().and_then(testing::national).and_then(|inputs| {
            let t18 = crate::y2018::transport::calc(&inputs).ok()?;
            calc(&inputs, &t18).ok()
        });
        let t30 = t30.expect("transport should be computed");

        assert!((t30.t.demand_sum() - t30.s.energy).abs() < 1e-6);
        assert!((t30.t.co2e_total - t30.s.co2e_total).abs() < 1e-6);
        assert_eq!(t30.s_diesel.energy, 0.0);
        assert_eq!(t30.s_hydrogen.co2e_total, 0.0);
        assert!(t30.t.demand_electricity > 0.0);
    }
}
