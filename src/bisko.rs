//! BISKO balance of private households for 2018.
//!
//! BISKO books the emissions of heat, electricity and fuel production on
//! the consuming sector. Each carrier of the residences therefore carries its
//! own emissions plus the residences' share of the upstream production.

use serde::Serialize;

use crate::balance::Balance;
use crate::record::Record;
use crate::utils::div;

/// Energy and emissions of one carrier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Carrier {
    pub energy: f64,
    #[serde(rename = "CO2e_cb")]
    pub co2e_cb: f64,
    #[serde(rename = "CO2e_pb")]
    pub co2e_pb: f64,
}

impl Carrier {
    fn new(own: &Record, upstream_cb: f64, upstream_pb: f64) -> Self {
        Carrier {
            energy: own.energy,
            co2e_cb: own.co2e_total + upstream_cb,
            co2e_pb: upstream_pb,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Households {
    pub total: Carrier,
    pub petrol: Carrier,
    pub fueloil: Carrier,
    pub coal: Carrier,
    pub lpg: Carrier,
    pub gas: Carrier,
    pub heatnet: Carrier,
    pub biomass: Carrier,
    pub solarth: Carrier,
    pub heatpump: Carrier,
    pub elec: Carrier,
}

pub fn calc(balance: &Balance) -> Households {
    let r18 = &balance.r18;
    let h18 = &balance.h18;
    let heat = div(h18.d_r.energy, h18.d.energy);
    let elec = div(balance.e18.d_r.energy, balance.e18.d.energy);
    let fuels = div(balance.f18.d_r.energy, balance.f18.d.energy);

    let heated = |own: &Record, plant: &Record| {
        Carrier::new(
            own,
            plant.co2e_combustion_based * heat,
            plant.co2e_production_based * heat,
        )
    };
    let petrol = Carrier::new(
        &r18.s_petrol,
        balance.f18.p_petrol.co2e_production_based * fuels,
        0.0,
    );
    let fueloil = heated(&r18.s_fueloil, &h18.p_fueloil);
    let coal = heated(&r18.s_coal, &h18.p_coal);
    let lpg = heated(&r18.s_lpg, &h18.p_lpg);
    let gas = heated(&r18.s_gas, &h18.p_gas);
    let heatnet = heated(&r18.s_heatnet, &h18.p_heatnet);
    let biomass = heated(&r18.s_biomass, &h18.p_biomass);
    let solarth = heated(&r18.s_solarth, &h18.p_solarth);
    let heatpump = heated(&r18.s_heatpump, &h18.p_heatpump);
    let elec = Carrier::new(&r18.s_elec, balance.e18.p.co2e_total * elec, 0.0);

    let carriers = [
        petrol, fueloil, coal, lpg, gas, heatnet, biomass, solarth, heatpump, elec,
    ];
    let total = carriers.iter().fold(Carrier::default(), |sum, c| Carrier {
        energy: sum.energy + c.energy,
        co2e_cb: sum.co2e_cb + c.co2e_cb,
        co2e_pb: sum.co2e_pb + c.co2e_pb,
    });

    Households {
        total,
        petrol,
        fueloil,
        coal,
        lpg,
        gas,
        heatnet,
        biomass,
        solarth,
        heatpump,
        elec,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::y2030::testing;

    #[test]
    fn total_sums_the_carriers() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        let ph = calc(&b);
        let parts = [
            ph.petrol, ph.fueloil, ph.coal, ph.lpg, ph.gas, ph.heatnet, ph.biomass, ph.solarth,
            ph.heatpump, ph.elec,
        ];
        let energy: f64 = parts.iter().map(|c| c.energy).sum();
        let cb: f64 = parts.iter().map(|c| c.co2e_cb).sum();
        assert!((ph.total.energy - energy).abs() < 1e-6);
        assert!((ph.total.co2e_cb - cb).abs() < 1e-6);
        assert_eq!(ph.gas.energy, b.r18.s_gas.energy);
    }

    #[test]
    fn households_carry_their_share_of_the_power_plants() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        let ph = calc(&b);
        let share = div(b.e18.d_r.energy, b.e18.d.energy);
        assert!(share > 0.0 && share < 1.0);
        assert!((ph.elec.co2e_cb - b.r18.s_elec.co2e_total - b.e18.p.co2e_total * share).abs() < 1e-6);
    }
}
