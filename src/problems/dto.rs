use serde::{Deserialize, Serialize};

use crate::communities::repo_types::CommunityDetail;
use crate::problems::repo_types::Problem;

#[derive(Debug, Deserialize)]
pub struct CreateProblemRequest {
    pub community_id: i64,
    pub title: String,
    pub content: String,
    pub input: String,
    pub output: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProblemRequest {
    pub title: String,
    pub content: String,
    pub input: String,
    pub output: String,
}

/// Problem detail as served to clients: the row itself plus the author's
/// name and the community it belongs to.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(flatten)]
    pub problem: Problem,
    pub community: CommunityDetail,
    pub author_name: String,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_page() -> i64 {
    1
}
fn default_size() -> i64 {
    10
}

impl Pagination {
    /// LIMIT/OFFSET with the page clamped to 1 and the size to a sane range.
    pub fn limit_offset(&self) -> (i64, i64) {
        let size = self.size.clamp(1, 100);
        let page = self.page.max(1);
        (size, (page - 1) * size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_apply() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.page, 1);
        assert_eq!(p.size, 10);
        assert_eq!(p.limit_offset(), (10, 0));
    }

    #[test]
    fn pagination_clamps_hostile_values() {
        let p = Pagination { page: -3, size: 0 };
        assert_eq!(p.limit_offset(), (1, 0));
        let p = Pagination { page: 2, size: 500 };
        assert_eq!(p.limit_offset(), (100, 100));
    }
}
