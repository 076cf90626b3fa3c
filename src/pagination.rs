use crate::errors::RequestError;

/// Every list page holds this many posts.
pub const PAGE_SIZE: i64 = 10;

/// One page of a larger result set, 1-based.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: i64,
    pub num_pages: i64,
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    number: i64,
    num_pages: i64,
    count: i64,
}

impl Paginator {
    /// The first page is always valid, even when there is nothing to show.
    /// Any page past the last one (or below 1) is not found.
    pub fn new(count: i64, number: i64) -> Result<Self, RequestError> {
        let num_pages = if count <= 0 {
            1
        } else {
            (count + PAGE_SIZE - 1) / PAGE_SIZE
        };
        if number < 1 || number > num_pages {
            return Err(RequestError::NotFound("Invalid page"));
        }
        Ok(Self {
            number,
            num_pages,
            count: count.max(0),
        })
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1) * PAGE_SIZE
    }

    pub fn page<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            items,
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
        }
    }
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_still_has_a_first_page() {
        let paginator = Paginator::new(0, 1).unwrap();
        let page = paginator.page(Vec::<i64>::new());
        assert_eq!(page.num_pages, 1);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn pages_split_on_page_size() {
        let paginator = Paginator::new(21, 3).unwrap();
        assert_eq!(paginator.offset(), 20);
        assert_eq!(paginator.limit(), PAGE_SIZE);
        let page = paginator.page(vec![1]);
        assert_eq!(page.num_pages, 3);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn out_of_range_pages_are_not_found() {
        assert!(matches!(
            Paginator::new(10, 2),
            Err(RequestError::NotFound(_))
        ));
        assert!(matches!(Paginator::new(5, 0), Err(RequestError::NotFound(_))));
    }
}
