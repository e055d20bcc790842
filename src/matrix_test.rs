/// Tests for the matrix builder
#[cfg(test)]
mod tests {
    use crate::matrix::*;
    use crate::types::{PullRequest, PullRequestId, Review, ReviewStatus};
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeSet;

    fn pr(number: u64, title: &str, author: &str, requested: &[&str], reviews: &[(&str, ReviewStatus)]) -> PullRequest {
        PullRequest {
            id: PullRequestId { repo: "org/app".to_string(), number },
            title: title.to_string(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, number as u32, 0, 0, 0).unwrap(),
            author: author.to_string(),
            requested_reviewers: requested.iter().map(|s| s.to_string()).collect(),
            reviews: reviews.iter().map(|(r, s)| Review { reviewer: r.to_string(), status: *s }).collect(),
        }
    }

    fn names(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// Status of a reviewer on a request, if any
    fn status_of(matrix: &ReviewerMatrix, request: &str, reviewer: &str) -> Option<ReviewStatus> {
        let col = matrix.reviewers.iter().position(|r| r == reviewer)?;
        let row = matrix.rows.iter().find(|r| r.id.to_string() == request)?;
        row.cells[col]
    }

    /// The whole table as display strings, header first
    fn to_string_table(matrix: &ReviewerMatrix) -> Vec<Vec<String>> {
        let mut table = vec![matrix.header()];
        for row in &matrix.rows {
            table.push(
                matrix
                    .row_values(row)
                    .into_iter()
                    .map(|value| match value {
                        CellValue::Empty => String::new(),
                        CellValue::Text(s) => s,
                        CellValue::Count(n) => n.to_string(),
                    })
                    .collect(),
            );
        }
        table
    }

    #[test]
    fn test_max_status_wins() {
        let prs = vec![pr(
            1,
            "A",
            "carol",
            &[],
            &[("alice", ReviewStatus::Approved), ("bob", ReviewStatus::Commented), ("bob", ReviewStatus::Approved)],
        )];
        let matrix = build_matrix(&prs, &names(&["alice", "bob", "carol"]));

        assert_eq!(matrix.reviewers, vec!["alice", "bob", "carol"]);
        let row = &matrix.rows[0];
        assert_eq!(row.cells, vec![Some(ReviewStatus::Approved), Some(ReviewStatus::Approved), Some(ReviewStatus::Author)]);
        assert_eq!(row.total, 3);
        assert_eq!(row.approvals(), 2);
        assert_eq!(row.count(ReviewStatus::Author), 1);
    }

    #[test]
    fn test_submitted_review_overrides_stale_request() {
        let prs = vec![pr(1, "A", "carol", &["bob"], &[("bob", ReviewStatus::RequestChanges)])];
        let matrix = build_matrix(&prs, &names(&["bob", "carol"]));

        assert_eq!(status_of(&matrix, "org/app#1", "bob"), Some(ReviewStatus::RequestChanges));
    }

    #[test]
    fn test_outstanding_request_shows_requested() {
        let prs = vec![pr(1, "A", "carol", &["bob"], &[])];
        let matrix = build_matrix(&prs, &names(&["bob", "carol"]));

        assert_eq!(status_of(&matrix, "org/app#1", "bob"), Some(ReviewStatus::Requested));
        assert_eq!(matrix.rows[0].total, 2);
    }

    #[test]
    fn test_author_always_author() {
        // The author commenting on (or even approving) their own pull request
        let prs = vec![pr(
            1,
            "A",
            "carol",
            &["carol"],
            &[("carol", ReviewStatus::Commented), ("carol", ReviewStatus::Approved)],
        )];
        let matrix = build_matrix(&prs, &names(&["carol"]));

        assert_eq!(status_of(&matrix, "org/app#1", "carol"), Some(ReviewStatus::Author));
        assert_eq!(matrix.rows[0].approvals(), 0);
    }

    #[test]
    fn test_non_collaborator_requested_reviewer_absent() {
        let prs = vec![pr(1, "A", "carol", &["dave"], &[("alice", ReviewStatus::Commented)])];
        let matrix = build_matrix(&prs, &names(&["alice", "bob", "carol"]));

        assert!(!matrix.reviewers.contains(&"dave".to_string()));
        assert!(!matrix.header().contains(&"dave".to_string()));
    }

    #[test]
    fn test_columns_are_intersection_sorted() {
        let prs = vec![
            pr(1, "A", "zoe", &["mallory"], &[("bob", ReviewStatus::Commented), ("dependabot[bot]", ReviewStatus::Commented)]),
            pr(2, "B", "alice", &[], &[]),
        ];
        // "quinn" is a collaborator with no entries, so no column either
        let matrix = build_matrix(&prs, &names(&["zoe", "bob", "alice", "quinn"]));

        assert_eq!(matrix.reviewers, vec!["alice", "bob", "zoe"]);
    }

    #[test]
    fn test_total_counts_filtered_cells() {
        let prs = vec![pr(
            1,
            "A",
            "outsider",
            &["alice"],
            &[("bot", ReviewStatus::Approved), ("bob", ReviewStatus::Approved)],
        )];
        let matrix = build_matrix(&prs, &names(&["alice", "bob"]));

        let row = &matrix.rows[0];
        assert_eq!(row.total, row.cells.iter().filter(|c| c.is_some()).count());
        assert_eq!(row.total, 2);
        assert_eq!(row.approvals(), 1);
    }

    #[test]
    fn test_rows_ranked_by_approvals_then_total() {
        let prs = vec![
            pr(1, "one approval", "x", &["b"], &[("a", ReviewStatus::Approved)]),
            pr(2, "nothing", "outsider", &[], &[]),
            pr(3, "two approvals", "x", &[], &[("a", ReviewStatus::Approved), ("b", ReviewStatus::Approved)]),
            pr(4, "one approval, more activity", "x", &["c"], &[("a", ReviewStatus::Approved), ("b", ReviewStatus::Commented)]),
            pr(5, "comments only", "x", &[], &[("a", ReviewStatus::Commented)]),
        ];
        let matrix = build_matrix(&prs, &names(&["a", "b", "c", "x"]));

        let order: Vec<u64> = matrix.rows.iter().map(|r| r.id.number).collect();
        assert_eq!(order, vec![3, 4, 1, 5, 2]);

        for pair in matrix.rows.windows(2) {
            assert!(pair[0].approvals() >= pair[1].approvals());
            if pair[0].approvals() == pair[1].approvals() {
                assert!(pair[0].total >= pair[1].total);
            }
        }

        // No resolved reviews at all: last
        assert_eq!(matrix.rows.last().unwrap().total, 0);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let prs = vec![
            pr(9, "newer", "x", &[], &[("a", ReviewStatus::Commented)]),
            pr(3, "older", "x", &[], &[("a", ReviewStatus::Commented)]),
        ];
        let matrix = build_matrix(&prs, &names(&["a"]));

        let order: Vec<u64> = matrix.rows.iter().map(|r| r.id.number).collect();
        assert_eq!(order, vec![9, 3]);
    }

    #[test]
    fn test_summary_statuses_only_present_ones() {
        let prs = vec![pr(1, "A", "carol", &[], &[("alice", ReviewStatus::Approved)])];
        let matrix = build_matrix(&prs, &names(&["alice", "carol"]));

        assert_eq!(matrix.summary_statuses, vec![ReviewStatus::Approved, ReviewStatus::Author]);
        assert_eq!(matrix.header(), vec!["request", "title", "updated_at", "⅀", "✅", "✏️", "alice", "carol"]);
    }

    #[test]
    fn test_full_table_matches_hand_computed() {
        let prs = vec![
            pr(1, "First", "alice", &["carol"], &[("bob", ReviewStatus::Commented)]),
            pr(
                2,
                "Second",
                "bob",
                &["dave"],
                &[("alice", ReviewStatus::Approved), ("carol", ReviewStatus::RequestChanges)],
            ),
        ];
        let matrix = build_matrix(&prs, &names(&["alice", "bob", "carol"]));

        let expected: Vec<Vec<&str>> = vec![
            vec!["request", "title", "updated_at", "⅀", "?", "💬", "❌", "✅", "✏️", "alice", "bob", "carol"],
            vec!["org/app#2", "Second", "2024-01-02T00:00:00Z", "3", "", "", "1", "1", "1", "✅", "✏️", "❌"],
            vec!["org/app#1", "First", "2024-01-01T00:00:00Z", "3", "1", "1", "", "", "1", "✏️", "💬", "?"],
        ];
        let table = to_string_table(&matrix);
        assert_eq!(table, expected.iter().map(|r| r.iter().map(|s| s.to_string()).collect::<Vec<_>>()).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_input() {
        let matrix = build_matrix(&[], &names(&["alice"]));
        assert!(matrix.rows.is_empty());
        assert!(matrix.reviewers.is_empty());
        assert_eq!(matrix.header(), vec!["request", "title", "updated_at", "⅀"]);
    }

    #[test]
    fn test_resolve_statuses_reduces_pairs() {
        let id = PullRequestId { repo: "org/app".to_string(), number: 1 };
        let entry = |reviewer: &str, status| ReviewEntry { request: id.clone(), reviewer: reviewer.to_string(), status };
        let entries = vec![
            entry("a", ReviewStatus::Approved),
            entry("a", ReviewStatus::Requested),
            entry("b", ReviewStatus::Requested),
            entry("b", ReviewStatus::Commented),
        ];
        let resolved = resolve_statuses(&entries);

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[&(id.clone(), "a".to_string())], ReviewStatus::Approved);
        assert_eq!(resolved[&(id, "b".to_string())], ReviewStatus::Commented);
    }

    #[test]
    fn test_collect_entries_sources() {
        let prs = vec![pr(1, "A", "carol", &["dave"], &[("alice", ReviewStatus::Commented)])];
        let entries = collect_entries(&prs);

        let statuses: Vec<(&str, ReviewStatus)> = entries.iter().map(|e| (e.reviewer.as_str(), e.status)).collect();
        assert_eq!(
            statuses,
            vec![("alice", ReviewStatus::Commented), ("carol", ReviewStatus::Author), ("dave", ReviewStatus::Requested)]
        );
    }
}
