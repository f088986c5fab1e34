//! Build-rate indicators: how many reference units have to be installed per
//! year until the target year.

use serde::Serialize;

use crate::balance::Balance;
use crate::refdata::YEAR_TODAY;
use crate::utils::div;

/// Sizes of the reference units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct References {
    /// kWp of a family-home PV system.
    pub pv_panel: f64,
    /// MW of a reference onshore wind turbine.
    pub wind_power_plants: f64,
    /// MW of a large heat pump feeding a heat network.
    pub large_heatpumps: f64,
    /// kW of a residential heat pump.
    pub heat_pumps: f64,
    pub renovated_houses: f64,
    pub electric_vehicles: f64,
}

impl Default for References {
    fn default() -> Self {
        References {
            pv_panel: 10.0,
            wind_power_plants: 3.2,
            large_heatpumps: 50.0,
            heat_pumps: 12.0,
            renovated_houses: 0.0,
            electric_vehicles: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indicators {
    pub refs: References,
    pub pv_panels_peryear: f64,
    pub wind_power_plants_peryear: f64,
    /// Hectares of heat plant area per year.
    pub heat_power_plants_area: f64,
    pub large_heatpumps_peryear: f64,
    pub heat_pumps_peryear: f64,
    pub renovated_houses_peryear: f64,
    pub electric_vehicles_peryear: f64,
}

/// Indicators with the default reference units.
pub fn calc(balance: &Balance) -> Indicators {
    calc_with(balance, References::default())
}

/// Indicators for custom reference units.
///
/// The PV reference is divided into the MW figure of the balance as is, so
/// `pv_panels_peryear` is a relative measure rather than a unit count.
pub fn calc_with(balance: &Balance, refs: References) -> Indicators {
    let years = f64::from(balance.year - YEAR_TODAY);
    let e30 = &balance.e30;
    let h30 = &balance.h30;
    Indicators {
        pv_panels_peryear: div(e30.p_local.power_to_be_installed, refs.pv_panel * years),
        wind_power_plants_peryear: div(
            e30.p_local_wind_onshore.power_to_be_installed,
            refs.wind_power_plants * years,
        ),
        heat_power_plants_area: div(h30.p_heatnet_plant.area_ha_available, years),
        large_heatpumps_peryear: div(
            h30.p_heatnet_lheatpump.power_to_be_installed,
            refs.large_heatpumps * years,
        ),
        heat_pumps_peryear: 0.0,
        renovated_houses_peryear: 0.0,
        electric_vehicles_peryear: 0.0,
        refs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::y2030::testing;

    #[test]
    fn rates_spread_the_build_out_over_the_horizon() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        let ind = calc(&b);
        // 2035 - 2022
        let years = 13.0;
        assert!(
            (ind.wind_power_plants_peryear * 3.2 * years
                - b.e30.p_local_wind_onshore.power_to_be_installed)
                .abs()
                < 1e-6
        );
        assert!((ind.pv_panels_peryear * 10.0 * years - b.e30.p_local.power_to_be_installed).abs() < 1e-6);
        assert!((ind.heat_power_plants_area * years - b.h30.p_heatnet_plant.area_ha_available).abs() < 1e-6);
        assert_eq!(ind.heat_pumps_peryear, 0.0);
    }

    #[test]
    fn larger_units_mean_fewer_installations() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        let default = calc(&b);
        let doubled = calc_with(
            &b,
            References {
                large_heatpumps: 100.0,
                ..References::default()
            },
        );
        assert!((doubled.large_heatpumps_peryear * 2.0 - default.large_heatpumps_peryear).abs() < 1e-9);
    }
}
