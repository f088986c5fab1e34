//! Cross-sector orchestrator.
//!
//! Runs the 2018 modules, then the target-year modules, in the single order
//! that satisfies every cross-sector read:
//!
//! 1. `r18, b18, i18, t18, a18, l18, h18, f18, e18`
//! 2. `r30, b30, i30, t30, a30, l30`
//! 3. local biomass plants of `e30`, whose cogenerated heat feeds `h30`
//! 4. `h30`, then `f30` (hydrogen reconversion sized on the electricity
//!    demand known before the electricity module runs)
//! 5. `e30`
//!
//! A failing module aborts the run; no partial [`Balance`] is returned.

use tracing::info;

use crate::balance::Balance;
use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::refdata::RefData;
use crate::{y2018, y2030};

/// Balance of municipality `ags` for target year `year`.
///
/// # Errors
///
/// `UnknownMunicipality` and `InvalidTargetYear` for a bad request, any
/// other variant for inconsistent reference data.
pub fn calculate(data: &RefData, ags: &str, year: i32) -> BalanceResult<Balance> {
    let entries = data.entries(ags, year)?;
    info!(ags, year, name = %entries.name, "balance calculation started");
    let inputs = Inputs::new(data.facts_and_assumptions(), entries)?;
    let balance = calc(&inputs)?;
    info!(
        ags,
        year,
        co2e_2018 = balance.total_co2e_2018(),
        co2e_target = balance.total_co2e_target(),
        "balance calculation finished"
    );
    Ok(balance)
}

/// Runs every sector module on already resolved inputs.
pub fn calc(inputs: &Inputs<'_>) -> BalanceResult<Balance> {
    let r18 = y2018::residences::calc(inputs)?;
    let b18 = y2018::business::calc(inputs)?;
    let i18 = y2018::industry::calc(inputs)?;
    let t18 = y2018::transport::calc(inputs)?;
    let a18 = y2018::agri::calc(inputs)?;
    let l18 = y2018::lulucf::calc(inputs)?;
    let h18 = y2018::heat::calc(inputs, &r18, &b18, &i18, &a18)?;
    let f18 = y2018::fuels::calc(inputs, &r18, &b18, &i18, &t18, &a18)?;
    let e18 = y2018::electricity::calc(inputs, &r18, &b18, &i18, &t18, &a18, &h18)?;

    let r30 = y2030::residences::calc(inputs, &r18)?;
    let b30 = y2030::business::calc(inputs, &b18)?;
    let i30 = y2030::industry::calc(inputs, &i18)?;
    let t30 = y2030::transport::calc(inputs, &t18)?;
    let a30 = y2030::agri::calc(inputs, &a18)?;
    let l30 = y2030::lulucf::calc(inputs, &l18)?;
    let biomass = y2030::electricity::core::calc(inputs, &e18)?;
    let h30 = y2030::heat::calc(
        inputs,
        &h18,
        &r30,
        &b30,
        &i30,
        &a30,
        &biomass.p_local_biomass_cogen,
    )?;
    let f30 = y2030::fuels::calc(inputs, &f18, &r30, &b30, &i30, &t30, &a30, &h30)?;
    let e30 = y2030::electricity::calc(
        inputs,
        &e18,
        &r18,
        &b18,
        &y2030::electricity::Consumers {
            r30: &r30,
            b30: &b30,
            i30: &i30,
            t30: &t30,
            a30: &a30,
            h30: &h30,
            f30: &f30,
        },
        &biomass,
    )?;

    Ok(Balance {
        ags: inputs.entries().ags.clone(),
        year: inputs.entries().year_target,
        r18,
        b18,
        i18,
        t18,
        a18,
        l18,
        h18,
        f18,
        e18,
        r30,
        b30,
        i30,
        t30,
        a30,
        l30,
        h30,
        f30,
        e30,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BalanceError;
    use crate::y2018::testing::refdata;

    #[test]
    fn runs_are_deterministic() {
        let data = refdata().expect("built-in data should load");
        let first = calculate(&data, "DG000000", 2035).expect("first run should succeed");
        let second = calculate(&data, "DG000000", 2035).expect("second run should succeed");
        assert_eq!(first, second);
    }

    #[test]
    fn request_errors_surface_unchanged() {
        let data = refdata().expect("built-in data should load");
        let res = calculate(&data, "00000000", 2035);
        assert!(matches!(res, Err(BalanceError::UnknownMunicipality(_))));
        let res = calculate(&data, "DG000000", 2060);
        assert!(matches!(
            res,
            Err(BalanceError::InvalidTargetYear { min: 2023, max: 2050, .. })
        ));
    }

    #[test]
    fn balance_carries_the_request() {
        let data = refdata().expect("built-in data should load");
        let b = calculate(&data, "09780139", 2040).expect("rural run should succeed");
        assert_eq!(b.ags, "09780139");
        assert_eq!(b.year, 2040);
    }

    #[test]
    fn calculation_fits_a_small_thread_stack() {
        let data = refdata().expect("built-in data should load");
        let total = std::thread::Builder::new()
            .stack_size(2 << 20)
            .spawn(move || calculate(&data, "DG000000", 2035).map(|b| b.total_co2e_target()))
            .expect("thread should spawn")
            .join()
            .expect("calculation should not overflow the stack");
        assert!(total.expect("national run should succeed").is_finite());
    }
}
