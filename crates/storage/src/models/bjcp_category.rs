use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BjcpCategory {
    pub category_id: Uuid,
    pub category_number: String,
    pub subcategory_letter: Option<String>,
    pub subcategory_name: Option<String>,
    pub category_name: String,
    pub description: Option<String>,
}

impl BjcpCategory {
    /// Short style code, e.g. "21A".
    pub fn style_code(&self) -> String {
        format!(
            "{}{}",
            self.category_number,
            self.subcategory_letter.as_deref().unwrap_or_default()
        )
    }

    /// Display string used on entry lists, e.g. "21A - American IPA".
    pub fn display(&self) -> String {
        match self.subcategory_name.as_deref() {
            Some(sub) => format!("{} - {}", self.style_code(), sub),
            None => format!("{} - {}", self.style_code(), self.category_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(letter: Option<&str>, sub_name: Option<&str>) -> BjcpCategory {
        BjcpCategory {
            category_id: Uuid::new_v4(),
            category_number: "21".to_string(),
            subcategory_letter: letter.map(String::from),
            subcategory_name: sub_name.map(String::from),
            category_name: "IPA".to_string(),
            description: None,
        }
    }

    #[test]
    fn display_with_subcategory() {
        let cat = category(Some("A"), Some("American IPA"));
        assert_eq!(cat.display(), "21A - American IPA");
    }

    #[test]
    fn display_falls_back_to_category_name() {
        let cat = category(None, None);
        assert_eq!(cat.display(), "21 - IPA");
    }
}
