//! Route handlers organized by resource

pub mod alerts;
pub mod health;
pub mod metrics;
pub mod pages;

/// `?id=` query shared by the delete endpoints
///
/// Built from the raw key/value pairs so a repeated `id` is not a
/// deserialization error; the first one wins.
#[derive(Debug, Default)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let id = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "id").then_some(value));
        Self { id }
    }

    /// The raw id, treating an empty value as absent.
    pub fn raw(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_id_counts_as_missing() {
        let q = IdQuery {
            id: Some(String::new()),
        };
        assert_eq!(q.raw(), None);
        assert_eq!(IdQuery::default().raw(), None);
        assert_eq!(IdQuery { id: Some("3".into()) }.raw(), Some("3"));
    }

    #[test]
    fn first_id_pair_wins() {
        let pairs = vec![
            ("sort".to_string(), "asc".to_string()),
            ("id".to_string(), "4".to_string()),
            ("id".to_string(), "9".to_string()),
        ];
        assert_eq!(IdQuery::from_pairs(pairs).raw(), Some("4"));
        assert_eq!(IdQuery::from_pairs(Vec::new()).raw(), None);
    }
}
