//! Baseline sector modules.
//!
//! Each module is a pure function of the inputs and of the 2018 snapshots it
//! receives; the orchestrator calls them in the order declared here.

pub mod agri;
pub mod business;
pub mod electricity;
pub mod fuels;
pub mod heat;
pub mod industry;
pub mod lulucf;
pub mod residences;
pub mod transport;

use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::utils::div;

/// Final energy of one carrier with the emissions of the consuming sector.
pub(crate) const SUPPLY: Shape = Shape::ENERGY.with(Shape::PCT).with(Shape::EMISSIONS);

/// Supply record whose energy is a municipality entry.
pub(crate) fn supply_entry(inputs: &Inputs<'_>, key: &str) -> BalanceResult<Record> {
    Ok(supply(inputs.entry(key)?))
}

pub(crate) fn supply(energy: f64) -> Record {
    let mut r = Record::new(SUPPLY);
    r.energy = energy;
    r
}

/// Sets `pct_energy` of every carrier to its share of `total`.
pub(crate) fn set_shares(total: f64, carriers: &mut [&mut Record]) {
    for r in carriers.iter_mut() {
        r.pct_energy = div(r.energy, total);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::inputs::Inputs;
    use crate::refdata::RefData;

    /// Built-in dataset, parsed once per test.
    pub fn refdata() -> Option<RefData> {
        RefData::builtin().ok()
    }

    /// Inputs of the national aggregate for 2035.
    pub fn national(data: &RefData) -> Option<Inputs<'_>> {
        let entries = data.entries("DG000000", 2035).ok()?;
        Inputs::new(data.facts_and_assumptions(), entries).ok()
    }
}
