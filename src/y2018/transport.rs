//! Transport 2018: final energy of each mode split into fuels.
//!
//! Emissions are tank-to-wheel factors per fuel; the upstream part belongs to
//! the fuels sector.

use tracing::debug;

use super::{set_shares, supply};
use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};

crate::snapshot!(
    /// Transport baseline.
    T18 {
        t,
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
    }
);

const MODE: Shape = Shape::EMITTER.with(Shape::TRANSPORT);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fuel {
    Petrol,
    Jetfuel,
    Diesel,
    Lpg,
    Gas,
    Biogas,
    Bioethanol,
    Biodiesel,
    Elec,
}

impl Fuel {
    const ALL: [Fuel; 9] = [
        Fuel::Petrol,
        Fuel::Jetfuel,
        Fuel::Diesel,
        Fuel::Lpg,
        Fuel::Gas,
        Fuel::Biogas,
        Fuel::Bioethanol,
        Fuel::Biodiesel,
        Fuel::Elec,
    ];

    fn tank_to_wheel_key(self) -> &'static str {
        match self {
            Fuel::Petrol => "Fact_T_S_petrol_EmFa_tank_wheel_2018",
            Fuel::Jetfuel => "Fact_T_S_petroljet_EmFa_tank_wheel_2018",
            Fuel::Diesel => "Fact_T_S_diesel_EmFa_tank_wheel_2018",
            Fuel::Lpg => "Fact_T_S_lpg_EmFa_tank_wheel_2018",
            Fuel::Gas => "Fact_T_S_cng_EmFa_tank_wheel_2018",
            Fuel::Biogas => "Fact_T_S_biogas_EmFa_tank_wheel_2018",
            Fuel::Bioethanol => "Fact_T_S_bioethanol_EmFa_tank_wheel_2018",
            Fuel::Biodiesel => "Fact_T_S_biodiesel_EmFa_tank_wheel_2018",
            Fuel::Elec => "Fact_T_S_elec_EmFa_tank_wheel_2018",
        }
    }
}

/// Keys describing one transport mode.
struct ModeKeys {
    fec: &'static str,
    pkm_per_mwh: &'static str,
    tkm_per_mwh: &'static str,
    mix: &'static [(Fuel, &'static str)],
}

const ROAD: ModeKeys = ModeKeys {
    fec: "In_T_road_fec",
    pkm_per_mwh: "Fact_T_D_road_ratio_pkm_to_fec_2018",
    tkm_per_mwh: "Fact_T_D_road_ratio_tkm_to_fec_2018",
    mix: &[
        (Fuel::Petrol, "Fact_T_S_road_petrol_pct_of_fec_2018"),
        (Fuel::Diesel, "Fact_T_S_road_diesel_pct_of_fec_2018"),
        (Fuel::Lpg, "Fact_T_S_road_lpg_pct_of_fec_2018"),
        (Fuel::Gas, "Fact_T_S_road_gas_pct_of_fec_2018"),
        (Fuel::Biogas, "Fact_T_S_road_biogas_pct_of_fec_2018"),
        (Fuel::Bioethanol, "Fact_T_S_road_bioethanol_pct_of_fec_2018"),
        (Fuel::Biodiesel, "Fact_T_S_road_biodiesel_pct_of_fec_2018"),
        (Fuel::Elec, "Fact_T_S_road_elec_pct_of_fec_2018"),
    ],
};

const RAIL: ModeKeys = ModeKeys {
    fec: "In_T_rail_fec",
    pkm_per_mwh: "Fact_T_D_rail_ratio_pkm_to_fec_2018",
    tkm_per_mwh: "Fact_T_D_rail_ratio_tkm_to_fec_2018",
    mix: &[
        (Fuel::Diesel, "Fact_T_S_rail_diesel_pct_of_fec_2018"),
        (Fuel::Biodiesel, "Fact_T_S_rail_biodiesel_pct_of_fec_2018"),
        (Fuel::Elec, "Fact_T_S_rail_elec_pct_of_fec_2018"),
    ],
};

const SHIP: ModeKeys = ModeKeys {
    fec: "In_T_ship_fec",
    pkm_per_mwh: "Fact_T_D_ship_ratio_pkm_to_fec_2018",
    tkm_per_mwh: "Fact_T_D_ship_ratio_tkm_to_fec_2018",
    mix: &[
        (Fuel::Diesel, "Fact_T_S_ship_diesel_pct_of_fec_2018"),
        (Fuel::Biodiesel, "Fact_T_S_ship_biodiesel_pct_of_fec_2018"),
    ],
};

const AIR: ModeKeys = ModeKeys {
    fec: "In_T_air_fec",
    pkm_per_mwh: "Fact_T_D_air_ratio_pkm_to_fec_2018",
    tkm_per_mwh: "Fact_T_D_air_ratio_tkm_to_fec_2018",
    mix: &[(Fuel::Jetfuel, "Fact_T_S_air_jetfuel_pct_of_fec_2018")],
};

/// Tank-to-wheel factors indexed by [`Fuel`].
struct Factors([f64; 9]);

impl Factors {
    fn load(inputs: &Inputs<'_>) -> BalanceResult<Self> {
        let mut out = [0.0; 9];
        for fuel in Fuel::ALL {
            out[fuel as usize] = inputs.fact(fuel.tank_to_wheel_key())?;
        }
        Ok(Factors(out))
    }

    fn of(&self, fuel: Fuel) -> f64 {
        self.0[fuel as usize]
    }
}

/// One mode with its energy per fuel.
fn mode(inputs: &Inputs<'_>, keys: &ModeKeys, factors: &Factors) -> BalanceResult<(Record, [f64; 9])> {
    let mut r = Record::new(MODE);
    r.energy = inputs.entry(keys.fec)?;
    r.transport_capacity_pkm = r.energy * inputs.fact(keys.pkm_per_mwh)?;
    r.transport_capacity_tkm = r.energy * inputs.fact(keys.tkm_per_mwh)?;

    let mut fuels = [0.0; 9];
    for (fuel, pct_key) in keys.mix {
        let energy = r.energy * inputs.fact(pct_key)?;
        fuels[*fuel as usize] = energy;
        r.co2e_combustion_based += energy * factors.of(*fuel);
    }
    r.sum_emissions();
    Ok((r, fuels))
}

pub fn calc(inputs: &Inputs<'_>) -> BalanceResult<T18> {
    let factors = Factors::load(inputs)?;

    let (road, road_fuels) = mode(inputs, &ROAD, &factors)?;
    let (rail, rail_fuels) = mode(inputs, &RAIL, &factors)?;
    let (ship, ship_fuels) = mode(inputs, &SHIP, &factors)?;
    let (air, air_fuels) = mode(inputs, &AIR, &factors)?;

    let carrier = |fuel: Fuel| {
        let idx = fuel as usize;
        let mut r = supply(road_fuels[idx] + rail_fuels[idx] + ship_fuels[idx] + air_fuels[idx]);
        r.co2e_combustion_based = r.energy * factors.of(fuel);
        r.sum_emissions();
        r
    };
    let mut s_petrol = carrier(Fuel::Petrol);
    let mut s_jetfuel = carrier(Fuel::Jetfuel);
    let mut s_diesel = carrier(Fuel::Diesel);
    let mut s_lpg = carrier(Fuel::Lpg);
    let mut s_gas = carrier(Fuel::Gas);
    let mut s_biogas = carrier(Fuel::Biogas);
    let mut s_bioethanol = carrier(Fuel::Bioethanol);
    let mut s_biodiesel = carrier(Fuel::Biodiesel);
    let mut s_elec = carrier(Fuel::Elec);

    let s = Record::rollup(
        Shape::EMITTER,
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
        ],
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
        ],
    );

    let t = Record::rollup(MODE, &[&road, &rail, &ship, &air]);

    debug!(energy = t.energy, co2e = t.co2e_total, "transport 2018");

    Ok(T18 {
        t,
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
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::y2018::{SUPPLY, testing};

    #[test]
    fn fuels_and_modes_carry_the_same_emissions() {
        let data = testing::refdata();
        let t18 = data.as_ref().and_then(testing::national).and_then(|i| calc(&i).ok());
        let Some(t18) = t18 else {
            panic!("transport 2018 failed on the built-in dataset");
        };
        assert!((t18.t.co2e_total - t18.s.co2e_total).abs() < 1e-6);
        assert!((t18.t.energy - t18.s.energy).abs() < 1e-6);
        assert_eq!(t18.s_petrol.shape(), SUPPLY);
    }
}
