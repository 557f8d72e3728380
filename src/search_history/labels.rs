use crate::filters::FilterField;
use crate::models::{CatalogLayout, FilterSelections};
use crate::results::card::CURRENCY_SIGN;

/// Facet fields that get a badge per selected value, in badge order
const LABELLED_FIELDS: [FilterField; 6] = [
    FilterField::Category,
    FilterField::Brand,
    FilterField::Age,
    FilterField::Species,
    FilterField::Type,
    FilterField::Purpose,
];

/// Human-readable names of form values
pub trait LabelResolver {
    /// Label of the control `field` = `value`, if such a control exists
    fn label(&self, field: FilterField, value: &str) -> Option<String>;
    fn sort_label(&self, sort: &str) -> Option<String>;
}

impl LabelResolver for CatalogLayout {
    fn label(&self, field: FilterField, value: &str) -> Option<String> {
        self.facets
            .iter()
            .filter(|group| group.field == field)
            .flat_map(|group| group.options.iter())
            .find(|option| option.value == value)
            .map(|option| option.label.clone())
    }

    fn sort_label(&self, sort: &str) -> Option<String> {
        self.sort_options.iter().find(|option| option.value == sort).map(|o| o.label.clone())
    }
}

/// Badges describing a search.
///
/// Facet values without a known control get no badge. A sort key without a label
/// is shown as-is.
pub fn build_filter_labels(
    selections: &FilterSelections,
    sort: &str,
    resolver: &dyn LabelResolver,
) -> Vec<String> {
    let mut labels = Vec::new();

    for field in LABELLED_FIELDS {
        if let Some(values) = selections.get(field.as_str()) {
            labels.extend(values.iter().filter_map(|value| resolver.label(field, value)));
        }
    }

    if let Some(min) = first_value(selections, FilterField::PriceMin) {
        labels.push(format!("Price from: {} {}", min, CURRENCY_SIGN));
    }
    if let Some(max) = first_value(selections, FilterField::PriceMax) {
        labels.push(format!("Price to: {} {}", max, CURRENCY_SIGN));
    }

    if !sort.is_empty() {
        let label = resolver.sort_label(sort).unwrap_or_else(|| sort.to_string());
        labels.push(format!("Sort: {}", label));
    }

    labels
}

fn first_value(selections: &FilterSelections, field: FilterField) -> Option<&str> {
    selections.get(field.as_str()).and_then(|values| values.iter().next()).map(String::as_str)
}
