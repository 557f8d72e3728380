use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::FilterSelections;

/// Catalog filter fields understood by the product search.
///
/// Declaration order is the order filter labels are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Category,
    Brand,
    Age,
    Species,
    Type,
    Purpose,
    /// Lower price bound (inclusive)
    PriceMin,
    /// Upper price bound (inclusive)
    PriceMax,
}

impl FilterField {
    pub const ALL: [FilterField; 8] = [
        FilterField::Category,
        FilterField::Brand,
        FilterField::Age,
        FilterField::Species,
        FilterField::Type,
        FilterField::Purpose,
        FilterField::PriceMin,
        FilterField::PriceMax,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterField::Category => "category",
            FilterField::Brand => "brand",
            FilterField::Age => "age",
            FilterField::Species => "species",
            FilterField::Type => "type",
            FilterField::Purpose => "purpose",
            FilterField::PriceMin => "price_min",
            FilterField::PriceMax => "price_max",
        }
    }

    /// Case-insensitive lookup by form field name
    pub fn from_name(name: &str) -> Option<FilterField> {
        FilterField::ALL.into_iter().find(|field| field.as_str().eq_ignore_ascii_case(name))
    }

    /// Checkbox facets select ids; price bounds are free-form numbers
    pub fn is_facet(self) -> bool {
        !matches!(self, FilterField::PriceMin | FilterField::PriceMax)
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single field:value filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: FilterField,
    pub value: String,
}

impl FieldFilter {
    pub fn new(field: FilterField, value: String) -> Self {
        Self { field, value }
    }
}

/// Parsed filter expression.
///
/// The backend ORs values within a field and ANDs across fields, so the expression is a
/// flat list; repeating a field adds another accepted value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpr {
    pub filters: Vec<FieldFilter>,
}

impl FilterExpr {
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    pub fn add_filter(&mut self, filter: FieldFilter) {
        self.filters.push(filter);
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Group values by field name, the shape the catalog form submits
    pub fn to_selections(&self) -> FilterSelections {
        let mut selections = FilterSelections::new();
        for filter in &self.filters {
            selections
                .entry(filter.field.as_str().to_string())
                .or_default()
                .insert(filter.value.clone());
        }
        selections
    }
}
