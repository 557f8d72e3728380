use tracing::debug;

use crate::api::ProductQuery;
use crate::filters::FilterField;
use crate::models::{CatalogLayout, ChoiceOption, FilterSelections, SearchHistoryEntry};
use crate::search_history::LabelResolver;

/// Form field carrying the free-text query
pub const QUERY_FIELD: &str = "search_name";
pub const SORT_FIELD: &str = "sort";

/// One checkbox of the filter form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetControl {
    pub field: FilterField,
    pub value: String,
    pub label: String,
    pub checked: bool,
}

/// The catalog filter form: query text, facet checkboxes, price bounds and sort
#[derive(Debug, Clone)]
pub struct FilterForm {
    pub query: String,
    pub price_min: String,
    pub price_max: String,
    controls: Vec<FacetControl>,
    sort: String,
    sort_options: Vec<ChoiceOption>,
}

impl FilterForm {
    pub fn from_layout(layout: &CatalogLayout) -> Self {
        let controls = layout
            .facets
            .iter()
            .flat_map(|group| {
                group.options.iter().map(|option| FacetControl {
                    field: group.field,
                    value: option.value.clone(),
                    label: option.label.clone(),
                    checked: false,
                })
            })
            .collect();

        Self {
            query: String::new(),
            price_min: String::new(),
            price_max: String::new(),
            controls,
            sort: String::new(),
            sort_options: layout.sort_options.clone(),
        }
    }

    /// Back to the blank form
    pub fn reset(&mut self) {
        self.query.clear();
        self.price_min.clear();
        self.price_max.clear();
        self.sort.clear();
        for control in &mut self.controls {
            control.checked = false;
        }
    }

    pub fn controls(&self) -> &[FacetControl] {
        &self.controls
    }

    /// Flip checkbox `index`; false when there is no such control
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.controls.get_mut(index) {
            Some(control) => {
                control.checked = !control.checked;
                true
            }
            None => false,
        }
    }

    /// Set the checkbox matching `field` + `value`; false when it does not exist
    pub fn set_checked(&mut self, field: FilterField, value: &str, checked: bool) -> bool {
        match self.controls.iter_mut().find(|c| c.field == field && c.value == value) {
            Some(control) => {
                control.checked = checked;
                true
            }
            None => false,
        }
    }

    pub fn sort(&self) -> &str {
        &self.sort
    }

    pub fn sort_options(&self) -> &[ChoiceOption] {
        &self.sort_options
    }

    /// Select a sort key. An empty key clears the sort; an unknown one is refused.
    pub fn set_sort(&mut self, sort: &str) -> bool {
        if sort.is_empty() || self.sort_options.iter().any(|option| option.value == sort) {
            self.sort = sort.to_string();
            true
        } else {
            false
        }
    }

    /// Step through none -> each sort option -> none
    pub fn cycle_sort(&mut self) {
        let next = match self.sort_options.iter().position(|option| option.value == self.sort) {
            None => self.sort_options.first(),
            Some(i) => self.sort_options.get(i + 1),
        };
        self.sort = next.map(|option| option.value.clone()).unwrap_or_default();
    }

    /// Submitted filter values by field name, query and sort excluded
    pub fn selections(&self) -> FilterSelections {
        let mut selections = FilterSelections::new();
        for control in self.controls.iter().filter(|c| c.checked) {
            selections
                .entry(control.field.as_str().to_string())
                .or_default()
                .insert(control.value.clone());
        }
        let prices =
            [(FilterField::PriceMin, &self.price_min), (FilterField::PriceMax, &self.price_max)];
        for (field, value) in prices {
            let value = value.trim();
            if !value.is_empty() {
                selections.entry(field.as_str().to_string()).or_default().insert(value.to_string());
            }
        }
        selections
    }

    /// Request parameters in form order, sort last
    pub fn to_query(&self) -> ProductQuery {
        let mut query = ProductQuery::new();
        query.push(QUERY_FIELD, self.query.trim());
        for control in self.controls.iter().filter(|c| c.checked) {
            query.push(control.field.as_str(), control.value.as_str());
        }
        query.push(FilterField::PriceMin.as_str(), self.price_min.trim());
        query.push(FilterField::PriceMax.as_str(), self.price_max.trim());
        query.push(SORT_FIELD, self.sort.as_str());
        query
    }

    /// Refill the form from a remembered search.
    ///
    /// Returns how many stored selections had no matching control and were skipped.
    pub fn apply_entry(&mut self, entry: &SearchHistoryEntry) -> usize {
        self.fill(&entry.query, &entry.filters, &entry.sort)
    }

    /// Reset the form, then set query, selections and sort.
    ///
    /// Returns how many values had no matching control and were skipped.
    pub fn fill(&mut self, query: &str, selections: &FilterSelections, sort: &str) -> usize {
        self.reset();
        self.query = query.to_string();

        let mut skipped = 0;
        for (name, values) in selections {
            let Some(field) = FilterField::from_name(name) else {
                debug!(field = %name, "Skipping stored filter without a form field");
                skipped += values.len();
                continue;
            };

            for value in values {
                let restored = match field {
                    FilterField::PriceMin => {
                        self.price_min = value.clone();
                        true
                    }
                    FilterField::PriceMax => {
                        self.price_max = value.clone();
                        true
                    }
                    _ => self.set_checked(field, value, true),
                };
                if !restored {
                    debug!(field = %field, value = %value, "Skipping stored filter, no control");
                    skipped += 1;
                }
            }
        }

        if !self.set_sort(sort) {
            debug!(sort = %sort, "Skipping stored sort without an option");
            skipped += 1;
        }

        skipped
    }
}

impl LabelResolver for FilterForm {
    fn label(&self, field: FilterField, value: &str) -> Option<String> {
        self.controls
            .iter()
            .find(|c| c.field == field && c.value == value)
            .map(|c| c.label.clone())
    }

    fn sort_label(&self, sort: &str) -> Option<String> {
        self.sort_options.iter().find(|o| o.value == sort).map(|o| o.label.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::Utc;

    use super::*;
    use crate::models::StorefrontLayout;

    fn form() -> FilterForm {
        FilterForm::from_layout(&StorefrontLayout::default().catalog)
    }

    fn entry(filters: &[(&str, &str)], sort: &str) -> SearchHistoryEntry {
        let mut map = FilterSelections::new();
        for (field, value) in filters {
            map.entry(field.to_string()).or_insert_with(BTreeSet::new).insert(value.to_string());
        }
        SearchHistoryEntry {
            query: "kibble".to_string(),
            filters: map,
            filter_labels: Vec::new(),
            sort: sort.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_to_query_order_and_repeats() {
        let mut form = form();
        form.query = " kibble ".to_string();
        form.set_checked(FilterField::Brand, "1", true);
        form.set_checked(FilterField::Brand, "3", true);
        form.price_max = "900".to_string();
        form.set_sort("price_desc");

        assert_eq!(
            form.to_query().to_query_string(),
            "search_name=kibble&brand=1&brand=3&price_max=900&sort=price_desc"
        );
    }

    #[test]
    fn test_blank_form_has_no_parameters() {
        assert!(form().to_query().is_empty());
    }

    #[test]
    fn test_selections_skip_query_and_sort() {
        let mut form = form();
        form.query = "kibble".to_string();
        form.set_sort("name_asc");
        form.set_checked(FilterField::Species, "2", true);
        form.price_min = "100".to_string();

        let selections = form.selections();
        assert_eq!(selections.keys().collect::<Vec<_>>(), vec!["price_min", "species"]);
    }

    #[test]
    fn test_unknown_sort_refused() {
        let mut form = form();
        assert!(!form.set_sort("popularity"));
        assert_eq!(form.sort(), "");
    }

    #[test]
    fn test_cycle_sort_wraps_to_none() {
        let mut form = form();
        let mut seen = Vec::new();
        for _ in 0..5 {
            form.cycle_sort();
            seen.push(form.sort().to_string());
        }
        assert_eq!(seen, vec!["price_asc", "price_desc", "name_asc", "name_desc", ""]);
    }

    #[test]
    fn test_apply_entry_restores_form() {
        let mut form = form();
        form.set_checked(FilterField::Age, "1", true);

        let skipped = form.apply_entry(&entry(
            &[("brand", "2"), ("category", "4"), ("price_min", "50")],
            "name_desc",
        ));

        assert_eq!(skipped, 0);
        assert_eq!(form.query, "kibble");
        assert_eq!(form.price_min, "50");
        assert_eq!(form.sort(), "name_desc");
        let checked: Vec<(FilterField, &str)> = form
            .controls()
            .iter()
            .filter(|c| c.checked)
            .map(|c| (c.field, c.value.as_str()))
            .collect();
        assert_eq!(checked, vec![(FilterField::Category, "4"), (FilterField::Brand, "2")]);
    }

    #[test]
    fn test_apply_entry_skips_missing_controls() {
        let mut form = form();
        let skipped =
            form.apply_entry(&entry(&[("brand", "77"), ("color", "red"), ("species", "1")], ""));

        assert_eq!(skipped, 2);
        assert!(form.controls().iter().any(|c| c.field == FilterField::Species && c.checked));
    }

    #[test]
    fn test_fill_from_command_line_selections() {
        let mut form = form();
        let mut selections = FilterSelections::new();
        selections.entry("species".to_string()).or_default().insert("2".to_string());
        selections.entry("price_max".to_string()).or_default().insert("900".to_string());

        assert_eq!(form.fill("litter", &selections, "price_desc"), 0);
        assert_eq!(
            form.to_query().to_query_string(),
            "search_name=litter&species=2&price_max=900&sort=price_desc"
        );
    }

    #[test]
    fn test_labels_come_from_controls() {
        let form = form();
        assert_eq!(form.label(FilterField::Brand, "2").as_deref(), Some("NordPet"));
        assert_eq!(form.sort_label("price_asc").as_deref(), Some("Price: low to high"));
        assert_eq!(form.label(FilterField::Brand, "99"), None);
    }
}
