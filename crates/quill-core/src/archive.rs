//! Year/month grouping for the admin dashboard.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::domain::Post;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearGroup {
    pub year: i32,
    pub months: Vec<MonthGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGroup {
    /// 1-based month number.
    pub month: u32,
    pub name: String,
    pub posts: Vec<Post>,
}

/// Group posts by `created_at` year, newest year first, then by month in the
/// order months first appear. Post order inside a month is preserved, so
/// feeding posts newest-first yields a fully newest-first archive.
pub fn group_by_month(posts: &[Post]) -> Vec<YearGroup> {
    let mut years: Vec<YearGroup> = Vec::new();

    for post in posts {
        let year = post.created_at.year();
        let month = post.created_at.month();

        let year_idx = match years.iter().position(|g| g.year == year) {
            Some(idx) => idx,
            None => {
                years.push(YearGroup {
                    year,
                    months: Vec::new(),
                });
                years.len() - 1
            }
        };
        let months = &mut years[year_idx].months;

        match months.iter_mut().find(|m| m.month == month) {
            Some(group) => group.posts.push(post.clone()),
            None => months.push(MonthGroup {
                month,
                name: MONTH_NAMES[month as usize - 1].to_string(),
                posts: vec![post.clone()],
            }),
        }
    }

    years.sort_by(|a, b| b.year.cmp(&a.year));
    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostDraft;
    use chrono::{TimeZone, Utc};

    fn post_at(id: &str, y: i32, m: u32, d: u32) -> Post {
        let mut post = Post::new(
            id,
            PostDraft {
                title: format!("Post {id}"),
                ..PostDraft::default()
            },
        );
        post.created_at = Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap();
        post.updated_at = post.created_at;
        post
    }

    #[test]
    fn test_groups_by_year_then_month() {
        let posts = vec![
            post_at("1", 2025, 1, 15),
            post_at("2", 2025, 1, 10),
            post_at("3", 2024, 12, 31),
            post_at("4", 2024, 11, 2),
        ];
        let archive = group_by_month(&posts);

        assert_eq!(archive.len(), 2);
        assert_eq!(archive[0].year, 2025);
        assert_eq!(archive[0].months.len(), 1);
        assert_eq!(archive[0].months[0].name, "January");
        assert_eq!(archive[0].months[0].posts.len(), 2);
        assert_eq!(archive[1].year, 2024);
        let names: Vec<&str> = archive[1].months.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["December", "November"]);
    }

    #[test]
    fn test_years_sorted_descending_regardless_of_input() {
        let posts = vec![post_at("1", 2023, 5, 1), post_at("2", 2025, 2, 1)];
        let years: Vec<i32> = group_by_month(&posts).iter().map(|g| g.year).collect();
        assert_eq!(years, vec![2025, 2023]);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_month(&[]).is_empty());
    }
}
