/// Translate 1-indexed page/limit query parameters into a store window.
/// Defaults are page 1, limit 10; a page past the end simply yields an
/// empty result from the store.
pub fn page_window(page: Option<u32>, limit: Option<u32>) -> (i64, i64) {
    let limit = limit.unwrap_or(10) as i64;
    let page = page.unwrap_or(1).max(1) as i64;
    ((page - 1) * limit, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        assert_eq!(page_window(None, None), (0, 10));
    }

    #[test]
    fn computes_offset_from_one_indexed_page() {
        assert_eq!(page_window(Some(2), Some(5)), (5, 5));
        assert_eq!(page_window(Some(3), None), (20, 10));
    }

    #[test]
    fn page_zero_is_clamped_to_one() {
        assert_eq!(page_window(Some(0), Some(5)), (0, 5));
    }
}
