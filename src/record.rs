//! Generic record shape shared by every sector snapshot.
//!
//! A [`Record`] is a flat bag of named numeric fields drawn from one common
//! vocabulary (energy, emissions, investment, employment, ...). Which fields a
//! record carries is declared by its [`Shape`], a set of field groups. Absent
//! fields are never serialized and never reachable through [`Record::get`],
//! while present fields are always reported, even when zero.

use std::fmt;
use std::ops::{BitOr, Deref, DerefMut};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::errors::{BalanceError, BalanceResult};

/// Set of field groups a [`Record`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Shape(u32);

macro_rules! shape_groups {
    ($($(#[$doc:meta])* $name:ident = $bit:expr;)*) => {
        impl Shape {
            $(
                $(#[$doc])*
                pub const $name: Shape = Shape(1 << $bit);
            )*

            const NAMES: &'static [(Shape, &'static str)] = &[$((Shape::$name, stringify!($name)),)*];
        }
    };
}

shape_groups! {
    /// `energy`
    ENERGY = 0;
    /// `pct_energy`, `pct_x`
    PCT = 1;
    /// production-based, combustion-based and total CO2e
    EMISSIONS = 2;
    /// CO2e factors per MWh
    PER_MWH = 3;
    /// CO2e factors per tonne of product
    PER_T = 4;
    /// energy delta against the 2018 baseline in MWh
    ENERGY_CHANGE = 5;
    /// `invest`, `invest_pa`, `invest_per_x`
    INVEST = 6;
    /// municipal share of the investment
    INVEST_COM = 7;
    /// investment by actors outside the municipality
    INVEST_OUTSIDE = 8;
    /// wage share and employment demand
    WAGES = 9;
    /// municipal and existing employment
    EMPLOYMENT = 10;
    /// demand by energy carrier
    DEMAND = 11;
    /// installed and installable power
    POWER = 12;
    /// area available for an action
    AREA = 13;
    /// fuel cost
    FUEL_COST = 14;
    /// maintenance, repair and operation cost
    MRO = 15;
    /// production volume and its change ratio
    PRODUCTION = 16;
    /// building stock
    BUILDINGS = 17;
    /// transport performance
    TRANSPORT = 18;
    /// land area and its emission factor
    LAND = 19;
    /// livestock heads or fertilizer amounts
    AMOUNT = 20;
    /// CO2e delta against the 2018 baseline and the climate cost saved
    CO2E_CHANGE = 21;
    /// energy delta relative to the 2018 baseline
    ENERGY_CHANGE_PCT = 22;
}

impl Shape {
    /// Shape without any fields.
    pub const EMPTY: Shape = Shape(0);

    /// Energy with carrier emissions.
    pub const EMITTER: Shape = Shape(Shape::ENERGY.0 | Shape::EMISSIONS.0);

    /// Energy and CO2e deltas against the 2018 baseline.
    pub const CHANGE: Shape =
        Shape(Shape::ENERGY_CHANGE.0 | Shape::ENERGY_CHANGE_PCT.0 | Shape::CO2E_CHANGE.0);

    /// Energy, emissions and change against 2018; the most common shape.
    pub const BALANCE: Shape = Shape(Shape::EMITTER.0 | Shape::CHANGE.0);

    /// Investment with annualization and employment.
    pub const INVESTMENT: Shape = Shape(Shape::INVEST.0 | Shape::WAGES.0);

    /// Union of two shapes, usable in constants.
    pub const fn with(self, other: Shape) -> Shape {
        Shape(self.0 | other.0)
    }

    /// `self` with every group of `other` removed.
    pub const fn without(self, other: Shape) -> Shape {
        Shape(self.0 & !other.0)
    }

    /// True if every group of `other` is part of `self`.
    pub const fn contains(self, other: Shape) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if `self` and `other` have at least one group in common.
    pub const fn overlaps(self, other: Shape) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Shape {
    type Output = Shape;

    fn bitor(self, rhs: Shape) -> Shape {
        self.with(rhs)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Shape::NAMES
            .iter()
            .filter(|(group, _)| self.contains(*group))
            .map(|(_, name)| *name)
            .collect();
        if names.is_empty() {
            f.write_str("EMPTY")
        } else {
            f.write_str(&names.join("|"))
        }
    }
}

macro_rules! record_fields {
    ($($group:ident { $($field:ident => $key:literal,)* })*) => {
        /// Every vocabulary field of a [`Record`].
        ///
        /// Reached through `Deref`, so formulas read `record.energy` as plain
        /// arithmetic; the record's [`Shape`] decides which fields count.
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct Fields {
            $($(pub $field: f64,)*)*
        }

        /// One named entity of a sector snapshot.
        ///
        /// Field storage lives on the heap: a sector snapshot holds dozens of
        /// records and a balance holds hundreds.
        #[derive(Debug, Clone, PartialEq)]
        pub struct Record {
            shape: Shape,
            action: Option<&'static str>,
            fields: Box<Fields>,
        }

        impl Record {
            /// Creates a record of the given shape with every field at zero.
            pub fn new(shape: Shape) -> Self {
                Record {
                    shape,
                    action: None,
                    fields: Box::default(),
                }
            }

            /// Value of a present field by its output key, e.g. `"CO2e_total"`.
            pub fn get(&self, key: &str) -> Option<f64> {
                let (group, value) = match key {
                    $($($key => (Shape::$group, self.$field),)*)*
                    _ => return None,
                };
                self.shape.contains(group).then_some(value)
            }

            /// Present fields as `(key, value)` in vocabulary order.
            pub fn fields(&self) -> Vec<(&'static str, f64)> {
                let mut out = Vec::new();
                $(
                    if self.shape.contains(Shape::$group) {
                        $(out.push(($key, self.$field));)*
                    }
                )*
                out
            }

            fn accumulate(&mut self, other: &Record) {
                let sum = &mut *self.fields;
                $($(sum.$field += other.$field;)*)*
            }
        }
    };
}

record_fields! {
    ENERGY {
        energy => "energy",
    }
    PCT {
        pct_energy => "pct_energy",
        pct_x => "pct_x",
    }
    EMISSIONS {
        co2e_production_based => "CO2e_production_based",
        co2e_combustion_based => "CO2e_combustion_based",
        co2e_total => "CO2e_total",
    }
    PER_MWH {
        co2e_production_based_per_mwh => "CO2e_production_based_per_MWh",
        co2e_combustion_based_per_mwh => "CO2e_combustion_based_per_MWh",
    }
    PER_T {
        co2e_production_based_per_t => "CO2e_production_based_per_t",
        co2e_combustion_based_per_t => "CO2e_combustion_based_per_t",
    }
    ENERGY_CHANGE {
        change_energy_mwh => "change_energy_MWh",
    }
    ENERGY_CHANGE_PCT {
        change_energy_pct => "change_energy_pct",
    }
    CO2E_CHANGE {
        change_co2e_t => "change_CO2e_t",
        change_co2e_pct => "change_CO2e_pct",
        co2e_total_2021_estimated => "CO2e_total_2021_estimated",
        cost_climate_saved => "cost_climate_saved",
    }
    INVEST {
        invest => "invest",
        invest_pa => "invest_pa",
        invest_per_x => "invest_per_x",
    }
    INVEST_COM {
        invest_com => "invest_com",
        invest_pa_com => "invest_pa_com",
    }
    INVEST_OUTSIDE {
        invest_outside => "invest_outside",
        invest_pa_outside => "invest_pa_outside",
    }
    WAGES {
        pct_of_wage => "pct_of_wage",
        cost_wage => "cost_wage",
        ratio_wage_to_emplo => "ratio_wage_to_emplo",
        demand_emplo => "demand_emplo",
        demand_emplo_new => "demand_emplo_new",
    }
    EMPLOYMENT {
        demand_emplo_com => "demand_emplo_com",
        emplo_existing => "emplo_existing",
    }
    DEMAND {
        demand_electricity => "demand_electricity",
        demand_heatnet => "demand_heatnet",
        demand_heatpump => "demand_heatpump",
        demand_solarth => "demand_solarth",
        demand_gas => "demand_gas",
        demand_biomass => "demand_biomass",
        demand_emethan => "demand_emethan",
        demand_hydrogen => "demand_hydrogen",
        demand_ediesel => "demand_ediesel",
        demand_epetrol => "demand_epetrol",
        demand_ejetfuel => "demand_ejetfuel",
    }
    POWER {
        power_installed => "power_installed",
        power_installable => "power_installable",
        power_to_be_installed => "power_to_be_installed",
        power_to_be_installed_pct => "power_to_be_installed_pct",
        full_load_hour => "full_load_hour",
        energy_installable => "energy_installable",
    }
    AREA {
        area_ha_available => "area_ha_available",
        area_ha_available_pct_of_action => "area_ha_available_pct_of_action",
        ratio_power_to_area_ha => "ratio_power_to_area_ha",
    }
    FUEL_COST {
        cost_fuel => "cost_fuel",
        cost_fuel_per_mwh => "cost_fuel_per_MWh",
        change_cost_energy => "change_cost_energy",
    }
    MRO {
        cost_mro => "cost_mro",
        cost_mro_per_mwh => "cost_mro_per_MWh",
        change_cost_mro => "change_cost_mro",
    }
    PRODUCTION {
        prod_volume => "prod_volume",
        demand_change => "demand_change",
    }
    BUILDINGS {
        area_m2 => "area_m2",
        number_of_buildings => "number_of_buildings",
        area_m2_rehab => "area_m2_rehab",
        rate_rehab_pa => "rate_rehab_pa",
    }
    TRANSPORT {
        transport_capacity_pkm => "transport_capacity_pkm",
        transport_capacity_tkm => "transport_capacity_tkm",
    }
    LAND {
        area_ha => "area_ha",
        co2e_production_based_per_ha => "CO2e_production_based_per_ha",
    }
    AMOUNT {
        amount => "amount",
    }
}

impl Deref for Record {
    type Target = Fields;

    fn deref(&self) -> &Fields {
        &self.fields
    }
}

impl DerefMut for Record {
    fn deref_mut(&mut self) -> &mut Fields {
        &mut self.fields
    }
}

impl Record {
    /// Shape this record was created with.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Attaches a textual label, such as the recommended action of an
    /// industry branch.
    pub fn with_action(mut self, action: &'static str) -> Self {
        self.action = Some(action);
        self
    }

    /// Textual label, if any.
    pub fn action(&self) -> Option<&'static str> {
        self.action
    }

    /// Parent record of the given shape whose additive fields are the sum of
    /// the children's fields.
    ///
    /// Ratio-like fields (percentages, per-unit factors, full load hours, ...)
    /// are left at zero; callers derive them from the summed values.
    ///
    /// # Panics
    ///
    /// If `children` is empty or a child shares no field group with the
    /// parent. Both are wiring errors in the sector models.
    pub fn rollup(shape: Shape, children: &[&Record]) -> Record {
        assert!(!children.is_empty(), "rollup into {shape} without children");
        let mut sum = Record::new(shape);
        for child in children {
            assert!(
                shape.overlaps(child.shape),
                "rollup into {shape} from a child of shape {}",
                child.shape
            );
            sum.accumulate(child);
        }
        sum.clear_ratios();
        sum
    }

    /// Sum of all per-carrier demand fields.
    pub fn demand_sum(&self) -> f64 {
        self.demand_electricity
            + self.demand_heatnet
            + self.demand_heatpump
            + self.demand_solarth
            + self.demand_gas
            + self.demand_biomass
            + self.demand_emethan
            + self.demand_hydrogen
            + self.demand_ediesel
            + self.demand_epetrol
            + self.demand_ejetfuel
    }

    /// Recomputes both change percentages of a rolled-up record against its
    /// 2018 counterpart.
    pub fn set_change_pct(&mut self, base: &Record) {
        self.change_energy_pct = crate::utils::div(self.change_energy_mwh, base.energy);
        self.change_co2e_pct = crate::utils::div(self.change_co2e_t, base.co2e_total);
    }

    fn clear_ratios(&mut self) {
        self.pct_energy = 0.0;
        self.pct_x = 0.0;
        self.co2e_production_based_per_mwh = 0.0;
        self.co2e_combustion_based_per_mwh = 0.0;
        self.co2e_production_based_per_t = 0.0;
        self.co2e_combustion_based_per_t = 0.0;
        self.change_energy_pct = 0.0;
        self.change_co2e_pct = 0.0;
        self.invest_per_x = 0.0;
        self.pct_of_wage = 0.0;
        self.ratio_wage_to_emplo = 0.0;
        self.power_to_be_installed_pct = 0.0;
        self.full_load_hour = 0.0;
        self.area_ha_available_pct_of_action = 0.0;
        self.ratio_power_to_area_ha = 0.0;
        self.cost_fuel_per_mwh = 0.0;
        self.cost_mro_per_mwh = 0.0;
        self.demand_change = 0.0;
        self.rate_rehab_pa = 0.0;
        self.co2e_production_based_per_ha = 0.0;
    }

    /// Sum of one field over several records, regardless of their shapes.
    ///
    /// ```
    /// use climate_balance::record::{Record, Shape};
    ///
    /// let mut a = Record::new(Shape::ENERGY);
    /// let mut b = Record::new(Shape::BALANCE);
    /// a.energy = 2.0;
    /// b.energy = 3.0;
    /// assert_eq!(Record::total(&[&a, &b], |r| r.energy), 5.0);
    /// ```
    pub fn total(records: &[&Record], field: impl Fn(&Record) -> f64) -> f64 {
        records.iter().map(|r| field(r)).sum()
    }
}

/// Field-wise sum of same-shaped records.
///
/// The result has the common shape and no action label.
///
/// # Errors
///
/// [`BalanceError::EmptyAggregate`] for an empty slice and
/// [`BalanceError::ShapeMismatch`] as soon as one record differs in shape
/// from the first.
pub fn sum_fields(records: &[&Record]) -> BalanceResult<Record> {
    let first = records.first().ok_or(BalanceError::EmptyAggregate)?;
    let mut sum = Record::new(first.shape);
    for record in records {
        if record.shape != first.shape {
            return Err(BalanceError::ShapeMismatch {
                expected: first.shape,
                found: record.shape,
            });
        }
        sum.accumulate(record);
    }
    Ok(sum)
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.fields();
        let len = fields.len() + usize::from(self.action.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(action) = self.action {
            map.serialize_entry("action", action)?;
        }
        for (key, value) in fields {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn energy_record(energy: f64, co2e: f64) -> Record {
        let mut r = Record::new(Shape::EMITTER);
        r.energy = energy;
        r.co2e_total = co2e;
        r
    }

    #[test]
    fn absent_fields_are_not_reported() {
        let r = Record::new(Shape::ENERGY);
        assert_eq!(r.get("energy"), Some(0.0));
        assert_eq!(r.get("CO2e_total"), None);
        assert_eq!(r.get("no_such_field"), None);
        assert_eq!(r.fields(), vec![("energy", 0.0)]);
    }

    #[test]
    fn sum_fields_adds_every_field() {
        let a = energy_record(1.5, 10.0);
        let b = energy_record(2.5, 20.0);
        let c = energy_record(-1.0, 0.5);
        let sum = sum_fields(&[&a, &b, &c]).ok();
        assert_eq!(sum.as_ref().map(|s| s.energy), Some(3.0));
        assert_eq!(sum.as_ref().map(|s| s.co2e_total), Some(30.5));
        assert_eq!(sum.map(|s| s.shape()), Some(Shape::EMITTER));
    }

    #[test]
    fn sum_fields_rejects_mixed_shapes() {
        let a = energy_record(1.0, 1.0);
        let b = Record::new(Shape::BALANCE);
        let err = sum_fields(&[&a, &b]);
        assert!(matches!(err, Err(BalanceError::ShapeMismatch { .. })));
    }

    #[test]
    fn sum_fields_rejects_empty_input() {
        assert!(matches!(sum_fields(&[]), Err(BalanceError::EmptyAggregate)));
    }

    #[test]
    fn rollup_sums_additive_fields_only() {
        let mut a = Record::new(Shape::BALANCE | Shape::INVESTMENT);
        a.energy = 4.0;
        a.invest = 10.0;
        a.pct_of_wage = 0.3;
        a.change_energy_pct = -0.5;
        let mut b = Record::new(Shape::BALANCE);
        b.energy = 6.0;
        let parent = Record::rollup(Shape::BALANCE | Shape::INVESTMENT, &[&a, &b]);
        assert_eq!(parent.energy, 10.0);
        assert_eq!(parent.invest, 10.0);
        assert_eq!(parent.pct_of_wage, 0.0);
        assert_eq!(parent.change_energy_pct, 0.0);
    }

    #[test]
    #[should_panic(expected = "without children")]
    fn rollup_requires_children() {
        Record::rollup(Shape::EMITTER, &[]);
    }

    #[test]
    #[should_panic(expected = "from a child of shape INVEST")]
    fn rollup_rejects_unrelated_children() {
        let plant = energy_record(1.0, 1.0);
        let grid = Record::new(Shape::INVEST);
        Record::rollup(Shape::EMITTER, &[&plant, &grid]);
    }

    #[test]
    fn record_stays_small_on_the_stack() {
        assert!(std::mem::size_of::<Record>() <= 64);
    }

    #[test]
    fn shape_display_lists_groups() {
        assert_eq!(Shape::EMITTER.to_string(), "ENERGY|EMISSIONS");
        assert_eq!(Shape::EMPTY.to_string(), "EMPTY");
        assert_eq!(
            Shape::BALANCE.without(Shape::ENERGY_CHANGE_PCT).to_string(),
            "ENERGY|EMISSIONS|ENERGY_CHANGE|CO2E_CHANGE"
        );
    }

    #[test]
    fn serialization_keeps_zero_fields_and_action() {
        let r = Record::new(Shape::ENERGY).with_action("Umstellung");
        let json = serde_json::to_value(&r).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({"action": "Umstellung", "energy": 0.0}))
        );
    }
}
