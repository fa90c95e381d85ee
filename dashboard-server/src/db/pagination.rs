use serde::Deserialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// `?page=&page_size=` query parameters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    /// Check the bounds callers may ask for
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err(format!("page must be at least 1 (got {})", self.page));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(format!(
                "page_size must be between 1 and {} (got {})",
                MAX_PAGE_SIZE, self.page_size
            ));
        }
        Ok(())
    }

    pub fn limit_offset(&self) -> (i64, i64) {
        paginate(self.page, self.page_size)
    }
}

/// Turn a 1-based page into `(limit, offset)`. Inputs are expected to be
/// validated already; nothing is clamped here.
pub fn paginate(page: i64, page_size: i64) -> (i64, i64) {
    let offset = (page - 1).saturating_mul(page_size);
    (page_size, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_page_has_no_offset() {
        assert_eq!(paginate(1, 10), (10, 0));
    }

    #[test]
    fn test_third_page_offset() {
        assert_eq!(paginate(3, 25), (25, 50));
    }

    #[test]
    fn test_defaults() {
        let page = PageRequest::default();
        assert_eq!(page.limit_offset(), (10, 0));
        assert!(page.validate().is_ok());
    }

    #[test]
    fn test_validation_bounds() {
        assert!(PageRequest::new(0, 10).validate().is_err());
        assert!(PageRequest::new(-3, 10).validate().is_err());
        assert!(PageRequest::new(1, 0).validate().is_err());
        assert!(PageRequest::new(1, 101).validate().is_err());
        assert!(PageRequest::new(1, 100).validate().is_ok());
        assert!(PageRequest::new(1, 1).validate().is_ok());
    }

    proptest! {
        #[test]
        fn prop_offset_is_previous_pages(page in 1i64..100_000, page_size in 1i64..=100) {
            let (limit, offset) = paginate(page, page_size);
            prop_assert_eq!(limit, page_size);
            prop_assert_eq!(offset, (page - 1) * page_size);
        }

        #[test]
        fn prop_consecutive_pages_are_contiguous(page in 1i64..100_000, page_size in 1i64..=100) {
            let (limit, offset) = paginate(page, page_size);
            let (_, next_offset) = paginate(page + 1, page_size);
            prop_assert_eq!(offset + limit, next_offset);
        }
    }
}
