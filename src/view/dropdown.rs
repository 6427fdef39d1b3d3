//! Dropdown Projections
//!
//! Pure mappings from a result set to option lists and labels. Every
//! function here accepts an empty slice and returns an empty projection.

use crate::constants::LABEL_SEPARATOR;
use serde::Serialize;

/// One entry of a dropdown
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownOption {
    /// Value submitted when the option is chosen
    pub value: String,
    /// Text shown to the user
    pub display_value: String,
}

impl DropdownOption {
    pub fn new(value: impl Into<String>, display_value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            display_value: display_value.into(),
        }
    }
}

/// Records that can be offered as dropdown options
pub trait DropdownItem {
    /// Value submitted when the record is chosen
    fn option_value(&self) -> String;

    /// Text shown for the record
    fn option_label(&self) -> String;
}

/// Build dropdown options in result-set order
pub fn dropdown_options<T: DropdownItem>(records: &[T]) -> Vec<DropdownOption> {
    records
        .iter()
        .map(|r| DropdownOption::new(r.option_value(), r.option_label()))
        .collect()
}

/// Build dropdown options ordered by display text (case-insensitive)
pub fn sorted_dropdown_options<T: DropdownItem>(records: &[T]) -> Vec<DropdownOption> {
    let mut options = dropdown_options(records);
    options.sort_by_cached_key(|o| o.display_value.to_lowercase());
    options
}

/// Whether the user actually has something to choose between
pub fn has_multiple_choices<T>(records: &[T]) -> bool {
    records.len() > 1
}

/// Join a code and a name into one label ("5790000000001 • Energy Co")
///
/// Falls back to whichever part is non-empty.
pub fn code_name_label(code: &str, name: &str) -> String {
    join_label(code, name, LABEL_SEPARATOR)
}

/// Join two label parts with a custom separator
pub fn join_label(first: &str, second: &str, separator: &str) -> String {
    let first = first.trim();
    let second = second.trim();
    match (first.is_empty(), second.is_empty()) {
        (false, false) => format!("{first}{separator}{second}"),
        (false, true) => first.to_string(),
        (true, false) => second.to_string(),
        (true, true) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Area {
        code: &'static str,
        name: &'static str,
    }

    impl DropdownItem for Area {
        fn option_value(&self) -> String {
            self.code.to_string()
        }

        fn option_label(&self) -> String {
            join_label(self.code, self.name, " - ")
        }
    }

    fn areas() -> Vec<Area> {
        vec![
            Area { code: "804", name: "Vest" },
            Area { code: "543", name: "Øst" },
        ]
    }

    #[test]
    fn test_options_are_pure() {
        let records = areas();
        let first = dropdown_options(&records);
        let second = dropdown_options(&records);
        assert_eq!(first, second);
        assert_eq!(first[0], DropdownOption::new("804", "804 - Vest"));
    }

    #[test]
    fn test_empty_input_gives_empty_projection() {
        let records: Vec<Area> = Vec::new();
        assert!(dropdown_options(&records).is_empty());
        assert!(sorted_dropdown_options(&records).is_empty());
        assert!(!has_multiple_choices(&records));
    }

    #[test]
    fn test_sorted_options() {
        let options = sorted_dropdown_options(&areas());
        assert_eq!(options[0].value, "543");
    }

    #[test]
    fn test_labels() {
        assert_eq!(code_name_label("5790000000001", "Energy Co"), "5790000000001 • Energy Co");
        assert_eq!(code_name_label("5790000000001", ""), "5790000000001");
        assert_eq!(code_name_label(" ", "Energy Co"), "Energy Co");
        assert_eq!(code_name_label("", ""), "");
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&DropdownOption::new("1", "One")).expect("serialize");
        assert_eq!(json, r#"{"value":"1","displayValue":"One"}"#);
    }
}
