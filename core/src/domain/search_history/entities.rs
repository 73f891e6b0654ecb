/// Search terms, most recent first, without duplicates, never longer than
/// `limit`. The limit is at least one so a recorded term is always kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentSearchList {
    terms: Vec<String>,
    limit: usize,
}

impl RecentSearchList {
    pub fn new(limit: usize) -> Self {
        Self {
            terms: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Builds a list from persisted terms, re-applying the invariants in
    /// case the blob was written with another limit.
    pub fn from_terms(terms: Vec<String>, limit: usize) -> Self {
        let mut list = Self::new(limit);
        for term in terms {
            if !list.terms.contains(&term) {
                list.terms.push(term);
            }
        }
        list.terms.truncate(list.limit);
        list
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Moves `term` to the front. Returns `false` for blank terms, which are
    /// ignored.
    pub fn record(&mut self, term: &str) -> bool {
        if term.trim().is_empty() {
            return false;
        }

        self.terms.retain(|t| t != term);
        self.terms.insert(0, term.to_string());
        self.terms.truncate(self.limit);
        true
    }

    /// Out-of-range indexes are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        (index < self.terms.len()).then(|| self.terms.remove(index))
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }
}
