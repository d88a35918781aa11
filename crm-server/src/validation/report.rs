//! Report query strings

use serde::Deserialize;
use shared::models::MonthlyRevenueFilter;
use shared::{AppError, AppResult, ErrorCode};

use super::query_text;

/// `GET /reports/monthly-revenue` query string
#[derive(Debug, Default, Deserialize)]
pub struct MonthlyRevenueQuery {
    pub year: Option<String>,
    pub destination: Option<String>,
}

impl MonthlyRevenueQuery {
    pub fn into_filter(self) -> AppResult<MonthlyRevenueFilter> {
        let year = query_text(self.year)
            .map(|y| match y.parse::<i32>() {
                Ok(v) if (1..=9999).contains(&v) => Ok(v),
                _ => Err(AppError::with_message(
                    ErrorCode::ReportInvalidFilter,
                    format!("Invalid year '{y}': expected a four-digit year"),
                )
                .with_detail("field", "year")),
            })
            .transpose()?;
        Ok(MonthlyRevenueFilter {
            year,
            destination: query_text(self.destination),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_filter() {
        let q = |y: &str| MonthlyRevenueQuery {
            year: Some(y.into()),
            destination: Some(" rome ".into()),
        };
        let f = q("2024").into_filter().unwrap();
        assert_eq!(f.year, Some(2024));
        assert_eq!(f.destination.as_deref(), Some("rome"));
        assert_eq!(
            q("twenty").into_filter().unwrap_err().code,
            ErrorCode::ReportInvalidFilter
        );
        assert!(q("").into_filter().unwrap().year.is_none());
    }
}
