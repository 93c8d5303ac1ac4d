//! Project Endpoints

use serde::Serialize;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Page, Project};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
}

impl PageQuery {
    /// Page numbers start at 1
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page: page.max(1), limit: limit.max(1) }
    }
}

pub async fn list_projects(client: &ApiClient, query: PageQuery) -> Result<Page<Project>, ApiError> {
    client.get_json_with_query("projects", &query).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_clamps_to_one() {
        assert_eq!(PageQuery::new(0, 0), PageQuery { page: 1, limit: 1 });
        assert_eq!(PageQuery::new(3, 10), PageQuery { page: 3, limit: 10 });
    }
}
