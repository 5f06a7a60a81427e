use crate::error::ValidationError;
use crate::model::Record;
use crate::schema::CollectionSchema;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const ALL: &str = "all";

/// The value a list screen is filtered by.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    pub fn matches(&self, record: &Record, dimension: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Value(v) => record.text(dimension) == v,
        }
    }

    /// Parse `raw` for `schema`, accepting only `all` or a declared value
    /// of its filter dimension.
    pub fn for_schema(schema: &CollectionSchema, raw: &str) -> Result<Self, ValidationError> {
        let selection = match raw.parse::<Selection>() {
            Ok(selection) => selection,
            Err(never) => match never {},
        };
        let Selection::Value(value) = &selection else {
            return Ok(selection);
        };

        let choices = schema
            .dimension
            .and_then(|d| schema.field(d))
            .map(|f| f.choices())
            .unwrap_or(&[]);
        if choices.iter().any(|c| c.value == value.as_str()) {
            return Ok(selection);
        }

        let mut allowed = vec![ALL];
        allowed.extend(choices.iter().map(|c| c.value));
        Err(ValidationError::single(
            "filter",
            format!("must be one of: {}", allowed.join(", ")),
        ))
    }
}

impl FromStr for Selection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            Ok(Selection::All)
        } else {
            Ok(Selection::Value(s.to_string()))
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "{}", ALL),
            Selection::Value(v) => write!(f, "{}", v),
        }
    }
}

/// Records visible under `selection`, in their original order.
pub fn apply(records: &[Record], dimension: &str, selection: &Selection) -> Vec<Record> {
    records
        .iter()
        .filter(|r| selection.matches(r, dimension))
        .cloned()
        .collect()
}

/// One entry of a filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub count: usize,
}

/// `All` followed by every declared value of the collection's dimension,
/// each with the number of records it would show.
///
/// Collections without a dimension get just `All`.
pub fn options(schema: &CollectionSchema, records: &[Record]) -> Vec<FilterOption> {
    let mut options = vec![FilterOption {
        value: ALL.to_string(),
        label: "All".to_string(),
        count: records.len(),
    }];

    let Some(dimension) = schema.dimension else {
        return options;
    };
    let choices = schema.field(dimension).map(|f| f.choices()).unwrap_or(&[]);

    for choice in choices {
        let selection = Selection::Value(choice.value.to_string());
        let count = records
            .iter()
            .filter(|r| selection.matches(r, dimension))
            .count();
        options.push(FilterOption {
            value: choice.value.to_string(),
            label: choice.label.to_string(),
            count,
        });
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FORMS, PAGES, TENDERS};
    use crate::fixtures::seed;
    use proptest::prelude::*;

    #[test]
    fn all_returns_everything() {
        let records = seed(&TENDERS);
        assert_eq!(apply(&records, "status", &Selection::All), records);
    }

    #[test]
    fn value_selects_matching_records_in_order() {
        let records = seed(&FORMS);
        let certs = apply(&records, "category", &"certificates".parse().unwrap());

        let ids: Vec<_> = certs.iter().filter_map(|r| r.id.as_seq()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn only_lowercase_all_selects_everything() {
        assert_eq!("all".parse::<Selection>().unwrap(), Selection::All);
        assert_eq!("ALL".parse::<Selection>().unwrap(), Selection::Value("ALL".into()));
        assert_eq!("".parse::<Selection>().unwrap(), Selection::Value(String::new()));
        assert_eq!(
            "tax".parse::<Selection>().unwrap(),
            Selection::Value("tax".into())
        );
    }

    #[test]
    fn schema_selection_accepts_declared_values_only() {
        assert_eq!(Selection::for_schema(&FORMS, "all").unwrap(), Selection::All);
        assert_eq!(
            Selection::for_schema(&FORMS, "tax").unwrap(),
            Selection::Value("tax".into())
        );

        for bad in ["bogus", "ALL", ""] {
            let err = Selection::for_schema(&FORMS, bad).unwrap_err();
            assert!(err.has_issue("filter"), "{:?}", bad);
        }
        assert!(Selection::for_schema(&FORMS, "bogus")
            .unwrap_err()
            .to_string()
            .contains("all, certificates"));
    }

    #[test]
    fn collections_without_a_dimension_only_take_all() {
        assert_eq!(Selection::for_schema(&PAGES, "all").unwrap(), Selection::All);
        assert!(Selection::for_schema(&PAGES, "published").is_err());
    }

    #[test]
    fn options_list_all_then_declared_values() {
        let records = seed(&TENDERS);
        let opts = options(&TENDERS, &records);

        let values: Vec<_> = opts.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["all", "active", "closed", "draft"]);
        let counts: Vec<_> = opts.iter().map(|o| o.count).collect();
        assert_eq!(counts, vec![4, 2, 1, 1]);
    }

    #[test]
    fn options_include_empty_values() {
        let records = seed(&FORMS);
        let property = options(&FORMS, &records)
            .into_iter()
            .find(|o| o.value == "property")
            .unwrap();
        assert_eq!(property.count, 0);
        assert_eq!(property.label, "Property Related");
    }

    #[test]
    fn collections_without_dimension_only_offer_all() {
        let records = seed(&PAGES);
        let opts = options(&PAGES, &records);
        assert_eq!(opts.len(), 1);
        assert_eq!(opts[0].count, 4);
    }

    fn record_set() -> impl Strategy<Value = Vec<Record>> {
        prop::collection::vec(prop::sample::select(vec!["active", "closed", "draft"]), 0..30)
            .prop_map(|statuses| {
                statuses
                    .into_iter()
                    .enumerate()
                    .map(|(i, s)| Record::seq(i as u64 + 1).with_text("status", s))
                    .collect()
            })
    }

    proptest! {
        #[test]
        fn counts_equal_filtered_subset_sizes(records in record_set()) {
            for option in options(&TENDERS, &records) {
                let selection: Selection = option.value.parse().unwrap();
                let visible = apply(&records, "status", &selection);
                prop_assert_eq!(visible.len(), option.count);
                prop_assert!(visible.iter().all(|r| selection.matches(r, "status")));
            }
        }

        #[test]
        fn value_filter_is_exact(records in record_set()) {
            let selection = Selection::Value("closed".into());
            let visible = apply(&records, "status", &selection);
            let expected: Vec<_> = records
                .iter()
                .filter(|r| r.text("status") == "closed")
                .cloned()
                .collect();
            prop_assert_eq!(visible, expected);
        }
    }
}
