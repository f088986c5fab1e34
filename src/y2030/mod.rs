//! Target-year sector modules.
//!
//! Each module reads its own 2018 snapshot for the changes and, where
//! energy crosses sectors, the target-year snapshots of the sectors it
//! supplies. The orchestrator calls them in a fixed order.

pub mod agri;
pub mod business;
pub mod electricity;
pub mod fuels;
pub mod heat;
pub mod industry;
pub mod lulucf;
pub mod residences;
pub mod transport;

mod buildings;

use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::utils::div;

/// Final energy of one carrier with its change against 2018.
pub(crate) const CARRIER: Shape = Shape::BALANCE.with(Shape::PCT);

/// Carrier record with combustion emissions and changes against `base`.
pub(crate) fn carrier(inputs: &Inputs<'_>, energy: f64, cb_per_mwh: f64, base: &Record) -> Record {
    let mut r = Record::new(CARRIER);
    r.energy = energy;
    r.co2e_combustion_based = energy * cb_per_mwh;
    r.sum_emissions();
    r.set_change(base, inputs);
    r
}

/// Rollup whose change percentages are recomputed against `base`.
pub(crate) fn rollup_vs(shape: Shape, children: &[&Record], base: &Record) -> Record {
    let mut r = Record::rollup(shape, children);
    r.set_change_pct(base);
    r
}

/// Municipal share of the national population; scales national jobs.
pub(crate) fn population_share(inputs: &Inputs<'_>) -> BalanceResult<f64> {
    Ok(div(
        inputs.entry("In_M_population_com_2018")?,
        inputs.entry("In_M_population_nat")?,
    ))
}

/// Wage share and wage per employee of one construction trade.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Trade {
    pct_of_wage: f64,
    ratio_wage_to_emplo: f64,
}

impl Trade {
    fn from_facts(inputs: &Inputs<'_>, pct_key: &str, ratio_key: &str) -> BalanceResult<Self> {
        Ok(Trade {
            pct_of_wage: inputs.fact(pct_key)?,
            ratio_wage_to_emplo: inputs.fact(ratio_key)?,
        })
    }

    /// Main construction trade: buildings, grids, plants.
    pub(crate) fn main_construction(inputs: &Inputs<'_>) -> BalanceResult<Self> {
        Trade::from_facts(
            inputs,
            "Fact_B_P_constr_main_revenue_pct_of_wage_2017",
            "Fact_B_P_constr_main_ratio_wage_to_emplo_2017",
        )
    }

    /// Civil engineering: industrial plants.
    pub(crate) fn civil_construction(inputs: &Inputs<'_>) -> BalanceResult<Self> {
        Trade::from_facts(
            inputs,
            "Fact_I_P_constr_civil_revenue_pct_of_wage_2018",
            "Fact_I_P_constr_civil_ratio_wage_to_emplo_2018",
        )
    }

    /// Heating installation trade.
    pub(crate) fn heating_installation(inputs: &Inputs<'_>) -> BalanceResult<Self> {
        Trade::from_facts(
            inputs,
            "Fact_B_P_install_heating_revenue_pct_of_wage_2017",
            "Fact_B_P_install_heating_ratio_wage_to_emplo_2017",
        )
    }

    /// Trade given by assumption keys.
    pub(crate) fn assumed(inputs: &Inputs<'_>, pct_key: &str, ratio_key: &str) -> BalanceResult<Self> {
        Ok(Trade {
            pct_of_wage: inputs.ass(pct_key)?,
            ratio_wage_to_emplo: inputs.ass(ratio_key)?,
        })
    }

    /// Annualizes the investment of `r` and derives wages and jobs from it.
    pub(crate) fn pay(self, r: &mut Record, inputs: &Inputs<'_>) {
        r.annualize(inputs);
        r.set_wages(self.pct_of_wage, self.ratio_wage_to_emplo);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::balance::Balance;
    use crate::inputs::Inputs;
    use crate::refdata::RefData;

    pub use crate::y2018::testing::{national, refdata};

    /// Rural municipality of the built-in dataset, without industry.
    pub const RURAL: &str = "09780139";

    /// Inputs of [`RURAL`] for 2035.
    pub fn rural(data: &RefData) -> Option<Inputs<'_>> {
        let entries = data.entries(RURAL, 2035).ok()?;
        Inputs::new(data.facts_and_assumptions(), entries).ok()
    }

    /// Full national balance for 2035.
    pub fn balance(data: &RefData) -> Option<Balance> {
        crate::engine::calculate(data, "DG000000", 2035).ok()
    }
}
