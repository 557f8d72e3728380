use serde::{Deserialize, Serialize};

use super::quiz::QuizKey;
use crate::filters::FilterField;

/// A selectable value with its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }
}

/// One single-choice question of the product quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizStep {
    pub key: QuizKey,
    pub title: String,
    pub options: Vec<ChoiceOption>,
}

impl QuizStep {
    pub fn option(&self, value: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

/// Checkbox group of the catalog filter form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetGroup {
    pub field: FilterField,
    pub title: String,
    pub options: Vec<ChoiceOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogLayout {
    #[serde(default)]
    pub facets: Vec<FacetGroup>,
    #[serde(default)]
    pub sort_options: Vec<ChoiceOption>,
}

/// Quiz questions and catalog controls offered by the storefront
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontLayout {
    pub quiz: Vec<QuizStep>,
    #[serde(default)]
    pub catalog: CatalogLayout,
}

fn choices(pairs: &[(&str, &str)]) -> Vec<ChoiceOption> {
    pairs.iter().map(|(value, label)| ChoiceOption::new(*value, *label)).collect()
}

impl Default for StorefrontLayout {
    fn default() -> Self {
        let species = choices(&[("1", "Dogs"), ("2", "Cats"), ("3", "Birds"), ("4", "Rodents")]);
        let ages = choices(&[("1", "Puppy / kitten"), ("2", "Adult"), ("3", "Senior")]);
        let categories =
            choices(&[("1", "Food"), ("2", "Toys"), ("3", "Grooming"), ("4", "Accessories")]);
        let types = choices(&[("1", "Dry food"), ("2", "Wet food"), ("3", "Treats")]);
        let purposes =
            choices(&[("1", "Everyday"), ("2", "Sensitive digestion"), ("3", "Training")]);
        let brands = choices(&[("1", "Happy Paws"), ("2", "NordPet"), ("3", "Purr & Co")]);

        Self {
            quiz: vec![
                QuizStep {
                    key: QuizKey::Species,
                    title: "Who is your pet?".to_string(),
                    options: species.clone(),
                },
                QuizStep {
                    key: QuizKey::Age,
                    title: "How old?".to_string(),
                    options: ages.clone(),
                },
                QuizStep {
                    key: QuizKey::Category,
                    title: "What are you looking for?".to_string(),
                    options: categories.clone(),
                },
                QuizStep {
                    key: QuizKey::Type,
                    title: "Which kind?".to_string(),
                    options: types.clone(),
                },
                QuizStep {
                    key: QuizKey::Purpose,
                    title: "What for?".to_string(),
                    options: purposes.clone(),
                },
            ],
            catalog: CatalogLayout {
                facets: vec![
                    FacetGroup {
                        field: FilterField::Category,
                        title: "Category".to_string(),
                        options: categories,
                    },
                    FacetGroup {
                        field: FilterField::Brand,
                        title: "Brand".to_string(),
                        options: brands,
                    },
                    FacetGroup { field: FilterField::Age, title: "Age".to_string(), options: ages },
                    FacetGroup {
                        field: FilterField::Species,
                        title: "Species".to_string(),
                        options: species,
                    },
                    FacetGroup {
                        field: FilterField::Type,
                        title: "Type".to_string(),
                        options: types,
                    },
                    FacetGroup {
                        field: FilterField::Purpose,
                        title: "Purpose".to_string(),
                        options: purposes,
                    },
                ],
                sort_options: choices(&[
                    ("price_asc", "Price: low to high"),
                    ("price_desc", "Price: high to low"),
                    ("name_asc", "Name: A to Z"),
                    ("name_desc", "Name: Z to A"),
                ]),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_covers_every_quiz_key() {
        let layout = StorefrontLayout::default();
        let keys: Vec<QuizKey> = layout.quiz.iter().map(|step| step.key).collect();
        assert_eq!(keys, QuizKey::ALL.to_vec());
    }

    #[test]
    fn test_default_layout_facets_are_checkbox_fields() {
        let layout = StorefrontLayout::default();
        assert!(layout.catalog.facets.iter().all(|group| group.field.is_facet()));
        assert_eq!(layout.catalog.sort_options.len(), 4);
    }

    #[test]
    fn test_step_option_lookup() {
        let layout = StorefrontLayout::default();
        let step = &layout.quiz[0];
        assert_eq!(step.option("2").map(|o| o.label.as_str()), Some("Cats"));
        assert!(step.option("99").is_none());
    }

    #[test]
    fn test_layout_json_without_catalog() {
        let json = r#"{"quiz": [{"key": "species", "title": "Pet", "options": [
            {"value": "dog", "label": "Dog"}
        ]}]}"#;

        let layout: StorefrontLayout = serde_json::from_str(json).unwrap();
        assert_eq!(layout.quiz.len(), 1);
        assert!(layout.catalog.facets.is_empty());
    }
}
