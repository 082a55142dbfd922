use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::BjcpCategory;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubcategoryInfo {
    pub category_id: Uuid,
    pub letter: String,
    pub name: Option<String>,
}

/// A main BJCP category with its subcategories, for style pickers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryGroup {
    pub number: String,
    pub name: String,
    pub subcategories: Vec<SubcategoryInfo>,
}

/// Group categories under their main category number, numeric order.
pub fn group_categories(categories: &[BjcpCategory]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for cat in categories {
        let index = match groups.iter().position(|g| g.number == cat.category_number) {
            Some(index) => index,
            None => {
                groups.push(CategoryGroup {
                    number: cat.category_number.clone(),
                    name: cat.category_name.clone(),
                    subcategories: Vec::new(),
                });
                groups.len() - 1
            }
        };

        if let Some(letter) = &cat.subcategory_letter {
            groups[index].subcategories.push(SubcategoryInfo {
                category_id: cat.category_id,
                letter: letter.clone(),
                name: cat.subcategory_name.clone(),
            });
        }
    }

    groups.sort_by_key(|g| g.number.parse::<u32>().unwrap_or(u32::MAX));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(number: &str, letter: Option<&str>, name: &str) -> BjcpCategory {
        BjcpCategory {
            category_id: Uuid::new_v4(),
            category_number: number.to_string(),
            subcategory_letter: letter.map(String::from),
            subcategory_name: letter.map(|l| format!("{name} {l}")),
            category_name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn groups_by_main_number_in_numeric_order() {
        let categories = vec![
            category("21", Some("A"), "IPA"),
            category("21", Some("B"), "IPA"),
            category("2", Some("A"), "International Lager"),
        ];

        let groups = group_categories(&categories);
        assert_eq!(groups.len(), 2);
        // "2" sorts before "21" numerically, not lexicographically
        assert_eq!(groups[0].number, "2");
        assert_eq!(groups[1].number, "21");
        assert_eq!(groups[1].subcategories.len(), 2);
    }

    #[test]
    fn categories_without_subcategory_still_form_a_group() {
        let groups = group_categories(&[category("34", None, "Specialty Beer")]);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].subcategories.is_empty());
    }
}
