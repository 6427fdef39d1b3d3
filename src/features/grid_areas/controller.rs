//! Grid Areas Controller

use super::model::{GridArea, PriceAreaCode};
use crate::domain::config::QueryConfig;
use crate::error::Result;
use crate::features::list_controller::ListController;
use crate::services::{ApiClient, RemoteOperation};
use crate::state::QueryParameters;
use crate::view::{DropdownItem, DropdownOption, Selector, dropdown_options, join_label};
use chrono::{DateTime, Utc};

/// REST path of the grid area list
pub const GRID_AREAS_PATH: &str = "grid-areas";

impl DropdownItem for GridArea {
    fn option_value(&self) -> String {
        self.code.clone()
    }

    fn option_label(&self) -> String {
        join_label(&self.code, &self.name, " - ")
    }
}

/// Picker options for grid areas in effect at `at`, ordered by code
pub fn grid_area_options(areas: &[GridArea], at: DateTime<Utc>) -> Vec<DropdownOption> {
    let mut valid: Vec<GridArea> = areas.iter().filter(|a| a.is_valid_at(at)).cloned().collect();
    valid.sort_by(|a, b| a.code.cmp(&b.code));
    dropdown_options(&valid)
}

/// Grid areas page controller
#[derive(Debug)]
pub struct GridAreasController {
    list: ListController<GridArea>,
}

impl GridAreasController {
    pub fn new(client: &ApiClient, config: &QueryConfig) -> Self {
        Self::with_operation(client.resource::<GridArea>(GRID_AREAS_PATH), config)
    }

    pub fn with_operation(
        operation: impl RemoteOperation<QueryParameters, GridArea>,
        config: &QueryConfig,
    ) -> Self {
        Self {
            list: ListController::new("grid-areas", operation, config),
        }
    }

    pub fn list(&self) -> &ListController<GridArea> {
        &self.list
    }

    pub fn load(&self) {
        self.list.load();
    }

    /// Restrict to one price area, or show all
    pub fn filter_price_area(&self, price_area: Option<PriceAreaCode>) -> Result<()> {
        match price_area {
            Some(code) => self.list.query().set_filter("priceAreaCode", code.as_str()),
            None => {
                self.list.query().clear_filter("priceAreaCode");
                Ok(())
            }
        }
    }

    /// Options for grid areas currently in effect
    pub fn grid_area_options(&self) -> Selector<GridArea, Vec<DropdownOption>> {
        self.list
            .store()
            .select(|s| grid_area_options(s.records(), Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .single()
            .expect("valid date")
    }

    fn area(code: &str, name: &str, valid_to: Option<DateTime<Utc>>) -> GridArea {
        GridArea {
            id: format!("ga-{code}"),
            code: code.into(),
            name: name.into(),
            price_area_code: PriceAreaCode::Dk1,
            valid_from: at(2020),
            valid_to,
        }
    }

    #[test]
    fn test_options_exclude_retired_areas() {
        let areas = vec![
            area("804", "Vest", None),
            area("533", "Nord", Some(at(2022))),
            area("131", "Syd", None),
        ];
        let options = grid_area_options(&areas, at(2024));
        assert_eq!(
            options,
            vec![
                DropdownOption::new("131", "131 - Syd"),
                DropdownOption::new("804", "804 - Vest"),
            ]
        );
        assert_eq!(grid_area_options(&areas, at(2024)), options);
        assert!(grid_area_options(&[], at(2024)).is_empty());
    }

    #[test]
    fn test_price_area_wire_format() {
        let json = r#"{
            "id": "ga-1",
            "code": "804",
            "name": "Vest",
            "priceAreaCode": "DK2",
            "validFrom": "2020-01-01T00:00:00Z"
        }"#;
        let area: GridArea = serde_json::from_str(json).expect("parse");
        assert_eq!(area.price_area_code, PriceAreaCode::Dk2);
        assert!(area.valid_to.is_none());
        assert!(area.is_valid_at(at(2030)));
    }
}
