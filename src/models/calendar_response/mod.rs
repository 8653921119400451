// Calendar REST response
// Body of GET /wp-json/datamachine-events/v1/calendar

use serde::{Deserialize, Serialize};

/// Server-rendered calendar fragment plus the chrome around it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarResponse {
    pub success: bool,
    pub html: String,
    pub pagination: Pagination,
    pub counter: String,
    pub navigation: PastNavigation,
    /// Present on failures
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub html: String,
    pub current_page: u32,
    pub max_pages: u32,
    pub total_events: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PastNavigation {
    pub html: String,
    pub past_count: u32,
    pub future_count: u32,
    pub show_past: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_response() {
        let body = r#"{
            "success": true,
            "html": "<div class=\"dm-date-group dm-day-friday\"></div>",
            "pagination": {"html": "<nav></nav>", "current_page": 2, "max_pages": 5, "total_events": 48},
            "counter": "Showing 11-20 of 48 events",
            "navigation": {"html": "<a>Past</a>", "past_count": 3, "future_count": 48, "show_past": false}
        }"#;

        let response: CalendarResponse = serde_json::from_str(body).unwrap();
        assert!(response.success);
        assert_eq!(response.pagination.current_page, 2);
        assert_eq!(response.pagination.max_pages, 5);
        assert_eq!(response.navigation.past_count, 3);
        assert!(response.message.is_none());
    }

    #[test]
    fn test_deserialize_tolerates_missing_sections() {
        let response: CalendarResponse =
            serde_json::from_str(r#"{"success": false, "message": "Invalid date"}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("Invalid date"));
        assert_eq!(response.pagination, Pagination::default());
    }
}
