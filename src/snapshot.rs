//! Named collections of records making up one sector and scenario year.

use crate::record::Record;

/// A sector snapshot such as `I30`: an ordered set of named records.
///
/// Implemented through the [`snapshot!`](crate::snapshot!) macro so the record
/// order of the struct definition is the traversal and serialization order.
pub trait Snapshot {
    /// Records as `(name, record)` in declaration order.
    fn records(&self) -> Vec<(&'static str, &Record)>;

    /// Looks up one record by name.
    fn record(&self, name: &str) -> Option<&Record> {
        self.records()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, r)| r)
    }
}

/// Declares a snapshot struct whose fields are all [`Record`]s and
/// implements [`Snapshot`] for it.
#[macro_export]
macro_rules! snapshot {
    ($(#[$meta:meta])* $name:ident { $($field:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $(pub $field: $crate::record::Record,)*
        }

        impl $crate::snapshot::Snapshot for $name {
            fn records(&self) -> Vec<(&'static str, &$crate::record::Record)> {
                vec![$((stringify!($field), &self.$field),)*]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Shape;

    crate::snapshot!(
        /// Two-record fixture.
        Pair { first, second }
    );

    #[test]
    fn records_follow_declaration_order() {
        let pair = Pair {
            first: Record::new(Shape::ENERGY),
            second: Record::new(Shape::EMITTER),
        };
        let names: Vec<&str> = pair.records().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(pair.record("second").map(Record::shape), Some(Shape::EMITTER));
        assert!(pair.record("third").is_none());
    }
}
