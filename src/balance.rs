//! Result assembler: every sector snapshot of one run, addressable by
//! dotted path such as `e30.p_local.power_to_be_installed`.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::record::Record;
use crate::snapshot::Snapshot;
use crate::y2018::{
    agri::A18, business::B18, electricity::E18, fuels::F18, heat::H18, industry::I18,
    lulucf::L18, residences::R18, transport::T18,
};
use crate::y2030::{
    agri::A30, business::B30, electricity::E30, fuels::F30, heat::H30, industry::I30,
    lulucf::L30, residences::R30, transport::T30,
};

/// One leaf of the result tree.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(&'static str),
}

impl Value {
    /// Numeric value, `None` for text.
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(v),
            Value::Text(_) => None,
        }
    }
}

/// Complete balance of one municipality and target year.
#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    pub ags: String,
    pub year: i32,
    pub r18: R18,
    pub b18: B18,
    pub i18: I18,
    pub t18: T18,
    pub a18: A18,
    pub l18: L18,
    pub h18: H18,
    pub f18: F18,
    pub e18: E18,
    pub r30: R30,
    pub b30: B30,
    pub i30: I30,
    pub t30: T30,
    pub a30: A30,
    pub l30: L30,
    pub h30: H30,
    pub f30: F30,
    pub e30: E30,
}

impl Balance {
    /// Snapshots in serialization order.
    pub fn snapshots(&self) -> [(&'static str, &dyn Snapshot); 18] {
        [
            ("r18", &self.r18),
            ("b18", &self.b18),
            ("i18", &self.i18),
            ("t18", &self.t18),
            ("a18", &self.a18),
            ("l18", &self.l18),
            ("h18", &self.h18),
            ("f18", &self.f18),
            ("e18", &self.e18),
            ("r30", &self.r30),
            ("b30", &self.b30),
            ("i30", &self.i30),
            ("t30", &self.t30),
            ("a30", &self.a30),
            ("l30", &self.l30),
            ("h30", &self.h30),
            ("f30", &self.f30),
            ("e30", &self.e30),
        ]
    }

    /// Snapshot named `name`, e.g. `"i30"`.
    pub fn snapshot(&self, name: &str) -> Option<&dyn Snapshot> {
        self.snapshots()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, s)| s)
    }

    /// Record at `snapshot.record`.
    pub fn record(&self, path: &str) -> Option<&Record> {
        let (snapshot, record) = path.split_once('.')?;
        self.snapshot(snapshot)?.record(record)
    }

    /// Value at `snapshot.record.field`.
    ///
    /// Fields outside the record's shape are absent, fields that are zero
    /// are not.
    ///
    /// ```no_run
    /// # fn main() -> Result<(), climate_balance::errors::BalanceError> {
    /// use climate_balance::{calculate, refdata::RefData};
    ///
    /// let data = RefData::builtin()?;
    /// let balance = calculate(&data, "DG000000", 2035)?;
    /// let power = balance.get("e30.p_local.power_to_be_installed");
    /// assert!(power.is_some());
    /// # Ok(())
    /// # }
    /// ```
    pub fn get(&self, path: &str) -> Option<Value> {
        let (record, field) = path.rsplit_once('.')?;
        let record = self.record(record)?;
        if field == "action" {
            return record.action().map(Value::Text);
        }
        record.get(field).map(Value::Number)
    }

    /// Every `(path, value)` pair in declaration order.
    pub fn paths(&self) -> Vec<(String, Value)> {
        let mut out = Vec::new();
        for (snapshot, s) in self.snapshots() {
            for (record, r) in s.records() {
                if let Some(action) = r.action() {
                    out.push((format!("{snapshot}.{record}.action"), Value::Text(action)));
                }
                for (field, value) in r.fields() {
                    out.push((format!("{snapshot}.{record}.{field}"), Value::Number(value)));
                }
            }
        }
        out
    }

    fn sector_totals(&self, target: bool) -> [&Record; 9] {
        if target {
            [
                &self.r30.r,
                &self.b30.b,
                &self.i30.i,
                &self.t30.t,
                &self.a30.a,
                &self.l30.l,
                &self.h30.h,
                &self.f30.f,
                &self.e30.e,
            ]
        } else {
            [
                &self.r18.r,
                &self.b18.b,
                &self.i18.i,
                &self.t18.t,
                &self.a18.a,
                &self.l18.l,
                &self.h18.h,
                &self.f18.f,
                &self.e18.e,
            ]
        }
    }

    /// CO2e of all sectors in 2018, land use included.
    pub fn total_co2e_2018(&self) -> f64 {
        Record::total(&self.sector_totals(false), |r| r.co2e_total)
    }

    /// CO2e of all sectors in the target year, land use included.
    pub fn total_co2e_target(&self) -> f64 {
        Record::total(&self.sector_totals(true), |r| r.co2e_total)
    }
}

struct SnapshotView<'a>(&'a dyn Snapshot);

impl Serialize for SnapshotView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let records = self.0.records();
        let mut map = serializer.serialize_map(Some(records.len()))?;
        for (name, record) in records {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

impl Serialize for Balance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let snapshots = self.snapshots();
        let mut map = serializer.serialize_map(Some(snapshots.len() + 2))?;
        map.serialize_entry("ags", &self.ags)?;
        map.serialize_entry("year", &self.year)?;
        for (name, snapshot) in snapshots {
            map.serialize_entry(name, &SnapshotView(snapshot))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::y2030::testing;

    #[test]
    fn dotted_paths_reach_every_level() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        assert_eq!(
            b.get("e30.p_local.power_to_be_installed"),
            Some(Value::Number(b.e30.p_local.power_to_be_installed))
        );
        assert_eq!(b.get("i18.i.CO2e_total"), Some(Value::Number(b.i18.i.co2e_total)));
        assert!(b.get("e30.p_local").is_none());
        assert!(b.get("x30.p.energy").is_none());
        assert!(b.get("e30.p_local.no_such_field").is_none());
    }

    #[test]
    fn paths_agree_with_get() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        let paths = b.paths();
        assert!(paths.iter().any(|(p, _)| p == "e30.p_local.power_to_be_installed"));
        for (path, value) in paths.iter().step_by(97) {
            assert_eq!(b.get(path), Some(*value), "{path}");
        }
        assert!(paths.iter().any(|(_, v)| matches!(v, Value::Text(_))));
    }

    #[test]
    fn serializes_as_nested_map() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");
        let json = serde_json::to_value(&b).expect("balance should serialize");

        assert_eq!(json["ags"], "DG000000");
        assert_eq!(json["year"], 2035);
        assert!(json["e30"]["p_local"]["power_to_be_installed"].is_number());
        assert!(json["r18"]["r"]["energy"].is_number());
    }
}
