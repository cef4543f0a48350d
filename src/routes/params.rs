use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: i64 = 6;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Default, Clone, Copy, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    /// Returns `(page, limit, offset)` with page >= 1 and limit in `1..=MAX_PAGE_SIZE`.
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1).saturating_mul(limit);
        (page, limit, offset)
    }
}

// Kept flat: serde_urlencoded cannot parse numbers through `#[serde(flatten)]`.
#[derive(Debug, Default, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RestaurantQuery {
    /// Page number, default 1
    pub page: Option<i64>,
    /// Items per page, default 6, at most 100
    pub limit: Option<i64>,
    /// Case-insensitive match on name or address
    pub search: Option<String>,
    /// One of moroccan, italian, asian
    pub cuisine: Option<String>,
    /// One of partner, prospect, inactive
    pub status: Option<String>,
}

impl RestaurantQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_six() {
        assert_eq!(Pagination::default().normalize(), (1, 6, 0));
    }

    #[test]
    fn clamps_out_of_range_values() {
        let p = Pagination {
            page: Some(-3),
            limit: Some(10_000),
        };
        assert_eq!(p.normalize(), (1, MAX_PAGE_SIZE, 0));

        let p = Pagination {
            page: Some(3),
            limit: Some(0),
        };
        assert_eq!(p.normalize(), (3, 1, 2));
    }

    #[test]
    fn huge_page_saturates_the_offset() {
        let query = RestaurantQuery {
            page: Some(i64::MAX),
            limit: Some(MAX_PAGE_SIZE),
            ..Default::default()
        };
        assert_eq!(
            query.pagination().normalize(),
            (i64::MAX, MAX_PAGE_SIZE, i64::MAX)
        );
    }

    #[test]
    fn third_page_of_six_skips_twelve() {
        let p = Pagination {
            page: Some(3),
            limit: Some(6),
        };
        assert_eq!(p.normalize(), (3, 6, 12));
    }
}
