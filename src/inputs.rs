//! Per-run inputs handed to every sector module.

use crate::errors::BalanceResult;
use crate::record::Record;
use crate::refdata::{Entries, Lookup};
use crate::utils::div;

/// Facts, assumptions and entries of one calculation run, plus the scalars
/// nearly every formula needs.
///
/// Built once per (municipality, year) request and passed by shared
/// reference; nothing in it is mutable.
#[derive(Debug, Clone)]
pub struct Inputs<'a> {
    lookup: Lookup<'a>,
    entries: Entries,
    /// Years from today to the target year; annualizes investments.
    pub duration_target: f64,
    /// Years from the target year to neutrality; scales climate cost savings.
    pub duration_neutral: f64,
    /// `Fact_M_CO2e_wo_lulucf_2021_vs_2018`
    pub co2e_2021_vs_2018: f64,
    /// `Fact_M_cost_per_CO2e_2020`
    pub cost_per_co2e: f64,
}

impl<'a> Inputs<'a> {
    /// Resolves the shared scalars.
    ///
    /// # Errors
    ///
    /// Fails with `UnknownKey` if one of the shared facts is missing.
    pub fn new(lookup: Lookup<'a>, entries: Entries) -> BalanceResult<Self> {
        Ok(Inputs {
            duration_target: entries.duration_target,
            duration_neutral: entries.duration_neutral,
            co2e_2021_vs_2018: lookup.fact("Fact_M_CO2e_wo_lulucf_2021_vs_2018")?,
            cost_per_co2e: lookup.fact("Fact_M_cost_per_CO2e_2020")?,
            lookup,
            entries,
        })
    }

    /// Observed 2018 constant.
    pub fn fact(&self, key: &str) -> BalanceResult<f64> {
        self.lookup.fact(key)
    }

    /// Projection parameter for the target year.
    pub fn ass(&self, key: &str) -> BalanceResult<f64> {
        self.lookup.ass(key)
    }

    /// Municipality entry.
    pub fn entry(&self, key: &str) -> BalanceResult<f64> {
        self.entries.get(key)
    }

    /// Municipality entries.
    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    /// Climate cost avoided between the target year and neutrality when
    /// emissions fall from `estimated_2021` to `co2e_total`.
    pub fn cost_climate_saved(&self, estimated_2021: f64, co2e_total: f64) -> f64 {
        (estimated_2021 - co2e_total) * self.duration_neutral * self.cost_per_co2e
    }
}

impl Record {
    /// Sets `CO2e_total` to the sum of its production and combustion parts.
    pub fn sum_emissions(&mut self) {
        self.co2e_total = self.co2e_production_based + self.co2e_combustion_based;
    }

    /// Derives every change field against the matching 2018 record.
    pub fn set_change(&mut self, base: &Record, inputs: &Inputs<'_>) {
        self.set_energy_change(base);
        self.set_co2e_change(base, inputs);
    }

    /// Derives the energy change fields only.
    pub fn set_energy_change(&mut self, base: &Record) {
        self.change_energy_mwh = self.energy - base.energy;
        self.change_energy_pct = div(self.change_energy_mwh, base.energy);
    }

    /// Derives the CO2e change fields only, leaving the energy change alone.
    pub fn set_co2e_change(&mut self, base: &Record, inputs: &Inputs<'_>) {
        self.change_co2e_t = self.co2e_total - base.co2e_total;
        self.change_co2e_pct = div(self.change_co2e_t, base.co2e_total);
        self.co2e_total_2021_estimated = base.co2e_total * inputs.co2e_2021_vs_2018;
        self.cost_climate_saved =
            inputs.cost_climate_saved(self.co2e_total_2021_estimated, self.co2e_total);
    }

    /// `invest_pa = invest / duration_target`, mirrored into the municipal
    /// and outside variants when the shape carries them.
    pub fn annualize(&mut self, inputs: &Inputs<'_>) {
        self.invest_pa = self.invest / inputs.duration_target;
        self.invest_pa_com = self.invest_com / inputs.duration_target;
        self.invest_pa_outside = self.invest_outside / inputs.duration_target;
    }

    /// Wage cost and employment demand of the annual investment.
    pub fn set_wages(&mut self, pct_of_wage: f64, ratio_wage_to_emplo: f64) {
        self.pct_of_wage = pct_of_wage;
        self.ratio_wage_to_emplo = ratio_wage_to_emplo;
        self.cost_wage = self.invest_pa * pct_of_wage;
        self.demand_emplo = div(self.cost_wage, ratio_wage_to_emplo);
        self.demand_emplo_new = self.demand_emplo;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Shape;
    use crate::refdata::RefData;

    fn refdata() -> Option<RefData> {
        RefData::from_csv_strs(
            "label,value,description\n\
             Fact_M_CO2e_wo_lulucf_2021_vs_2018,0.9,\n\
             Fact_M_cost_per_CO2e_2020,200,\n",
            "label,value,description\n",
            "ags,name\nX1,Testdorf\n",
            "ags,label,value\n",
        )
        .ok()
    }

    #[test]
    fn change_fields_follow_the_standard_formulas() {
        let data = refdata();
        let inputs = data.as_ref().and_then(|d| {
            let entries = d.entries("X1", 2035).ok()?;
            Inputs::new(d.facts_and_assumptions(), entries).ok()
        });
        let inputs = inputs.expect("inputs should resolve");

        let mut base = Record::new(Shape::BALANCE);
        base.energy = 100.0;
        base.co2e_total = 50.0;
        let mut now = Record::new(Shape::BALANCE);
        now.energy = 80.0;
        now.co2e_total = 20.0;
        now.set_change(&base, &inputs);

        assert_eq!(now.change_energy_mwh, -20.0);
        assert_eq!(now.change_energy_pct, -0.2);
        assert_eq!(now.change_co2e_t, -30.0);
        assert_eq!(now.change_co2e_pct, -0.6);
        assert_eq!(now.co2e_total_2021_estimated, 45.0);
        // (45 - 20) * 15 years * 200
        assert_eq!(now.cost_climate_saved, 75_000.0);
    }

    #[test]
    fn zero_baseline_gives_zero_pct() {
        let data = refdata();
        let inputs = data.as_ref().and_then(|d| {
            let entries = d.entries("X1", 2030).ok()?;
            Inputs::new(d.facts_and_assumptions(), entries).ok()
        });
        let inputs = inputs.expect("inputs should resolve");
        let base = Record::new(Shape::BALANCE);
        let mut now = Record::new(Shape::BALANCE);
        now.energy = 12.0;
        now.co2e_total = 3.0;
        now.set_change(&base, &inputs);
        assert_eq!(now.change_energy_pct, 0.0);
        assert_eq!(now.change_co2e_pct, 0.0);
    }

    #[test]
    fn wages_from_annual_investment() {
        let mut r = Record::new(Shape::INVESTMENT);
        r.invest_pa = 1000.0;
        r.set_wages(0.4, 50.0);
        assert_eq!(r.cost_wage, 400.0);
        assert_eq!(r.demand_emplo, 8.0);
        assert_eq!(r.demand_emplo_new, 8.0);

        r.set_wages(0.4, 0.0);
        assert_eq!(r.demand_emplo, 0.0);
    }
}
