use crate::models::DocumentRecord;

fn haystack(record: &DocumentRecord) -> String {
    format!(
        "{} {} {} {}",
        record.code, record.title, record.description, record.category
    )
    .to_lowercase()
}

/// Case-insensitive substring search over code, title, description and category.
/// A blank query matches everything.
pub fn filter_documents(records: &[DocumentRecord], query: &str) -> Vec<DocumentRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| haystack(record).contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: u32, code: &str, title: &str, description: &str, category: &str) -> DocumentRecord {
        DocumentRecord {
            id,
            date: String::new(),
            code: code.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            link: format!("https://example.com/{id}"),
            file_id: None,
        }
    }

    fn sample() -> Vec<DocumentRecord> {
        vec![
            doc(1, "HR-01", "Vacation policy", "Annual leave rules", "Human Resources"),
            doc(2, "FIN-07", "Budget 2024", "Quarterly figures", "Finance"),
            doc(3, "HR-02", "Onboarding", "First week checklist", "Human Resources"),
        ]
    }

    fn ids(records: &[DocumentRecord]) -> Vec<u32> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn blank_query_returns_everything_in_order() {
        let records = sample();
        assert_eq!(filter_documents(&records, ""), records);
        assert_eq!(filter_documents(&records, "   "), records);
    }

    #[test]
    fn matches_any_field_ignoring_case() {
        let records = sample();
        assert_eq!(ids(&filter_documents(&records, "hr-")), vec![1, 3]);
        assert_eq!(ids(&filter_documents(&records, "BUDGET")), vec![2]);
        assert_eq!(ids(&filter_documents(&records, "checklist")), vec![3]);
        assert_eq!(ids(&filter_documents(&records, "  finance ")), vec![2]);
    }

    #[test]
    fn matches_across_field_boundary() {
        let records = sample();
        assert_eq!(ids(&filter_documents(&records, "fin-07 budget")), vec![2]);
    }

    #[test]
    fn substring_not_tokens() {
        let records = sample();
        assert!(filter_documents(&records, "policy vacation").is_empty());
        assert_eq!(ids(&filter_documents(&records, "board")), vec![3]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = sample();
        for query in ["", "hr", "resources", "zzz", "Q"] {
            let once = filter_documents(&records, query);
            assert_eq!(filter_documents(&once, query), once, "query {query:?}");
        }
    }
}
