//! Positional postings.

use log::warn;

use crate::data::DocId;

/// Occurrences of one term in one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    /// Token positions, strictly increasing.
    pub positions: Vec<u32>,
}

impl Posting {
    pub fn new(doc_id: DocId, positions: Vec<u32>) -> Self {
        Posting { doc_id, positions }
    }

    pub fn frequency(&self) -> u32 {
        self.positions.len() as u32
    }
}

/// All postings of one term, ordered by strictly increasing doc id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    postings: Vec<Posting>,
    total_frequency: u64,
}

impl PostingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from postings read back from storage.
    ///
    /// Returns `None` unless doc ids and positions are strictly increasing and
    /// no posting is empty.
    pub fn from_sorted(postings: Vec<Posting>) -> Option<Self> {
        let ordered = postings.windows(2).all(|w| w[0].doc_id < w[1].doc_id);
        let valid = postings.iter().all(|p| {
            !p.positions.is_empty() && p.positions.windows(2).all(|w| w[0] < w[1])
        });
        if !(ordered && valid) {
            return None;
        }
        let total_frequency = postings.iter().map(|p| p.frequency() as u64).sum();
        Some(PostingList {
            postings,
            total_frequency,
        })
    }

    /// Record an occurrence of the term at `position` in `doc_id`.
    pub fn push_position(&mut self, doc_id: DocId, position: u32) {
        self.total_frequency += 1;
        match self.postings.last_mut() {
            Some(last) if last.doc_id == doc_id => match last.positions.last() {
                Some(&prev) if prev >= position => {
                    if let Err(at) = last.positions.binary_search(&position) {
                        last.positions.insert(at, position);
                    } else {
                        self.total_frequency -= 1;
                    }
                }
                _ => last.positions.push(position),
            },
            _ => self.postings.push(Posting::new(doc_id, vec![position])),
        }
    }

    /// Restore doc id order, merging postings of the same document.
    ///
    /// Returns `true` if the list had to be reordered.
    pub fn ensure_sorted(&mut self) -> bool {
        if self.postings.windows(2).all(|w| w[0].doc_id < w[1].doc_id) {
            return false;
        }

        warn!("restoring doc id order of a posting list with {} postings", self.postings.len());
        self.postings.sort_by_key(|p| p.doc_id);
        let mut merged: Vec<Posting> = Vec::with_capacity(self.postings.len());
        for posting in self.postings.drain(..) {
            match merged.last_mut() {
                Some(last) if last.doc_id == posting.doc_id => {
                    last.positions.extend(posting.positions);
                    last.positions.sort_unstable();
                    last.positions.dedup();
                }
                _ => merged.push(posting),
            }
        }
        self.total_frequency = merged.iter().map(|p| p.frequency() as u64).sum();
        self.postings = merged;
        true
    }

    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Posting> {
        self.postings.iter()
    }

    /// Number of documents containing the term.
    pub fn doc_frequency(&self) -> u32 {
        self.postings.len() as u32
    }

    /// Number of occurrences across all documents.
    pub fn total_frequency(&self) -> u64 {
        self.total_frequency
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn get(&self, doc_id: DocId) -> Option<&Posting> {
        self.postings
            .binary_search_by_key(&doc_id, |p| p.doc_id)
            .ok()
            .map(|i| &self.postings[i])
    }
}

impl<'a> IntoIterator for &'a PostingList {
    type Item = &'a Posting;
    type IntoIter = std::slice::Iter<'a, Posting>;

    fn into_iter(self) -> Self::IntoIter {
        self.postings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: u32) -> DocId {
        DocId::new(id)
    }

    #[test]
    fn test_push_groups_by_document() {
        let mut list = PostingList::new();
        list.push_position(doc(0), 1);
        list.push_position(doc(0), 4);
        list.push_position(doc(2), 0);

        assert_eq!(list.doc_frequency(), 2);
        assert_eq!(list.total_frequency(), 3);
        assert_eq!(list.get(doc(0)).unwrap().positions, vec![1, 4]);
        assert_eq!(list.get(doc(2)).unwrap().frequency(), 1);
        assert!(list.get(doc(1)).is_none());
    }

    #[test]
    fn test_out_of_order_positions_are_inserted() {
        let mut list = PostingList::new();
        list.push_position(doc(0), 5);
        list.push_position(doc(0), 2);
        list.push_position(doc(0), 5);
        assert_eq!(list.get(doc(0)).unwrap().positions, vec![2, 5]);
        assert_eq!(list.total_frequency(), 2);
    }

    #[test]
    fn test_ensure_sorted_restores_order() {
        let mut list = PostingList::new();
        list.push_position(doc(3), 0);
        list.push_position(doc(1), 2);
        list.push_position(doc(3), 4);
        assert!(list.ensure_sorted());

        let ids: Vec<u32> = list.iter().map(|p| p.doc_id.as_u32()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(list.get(doc(3)).unwrap().positions, vec![0, 4]);
        assert_eq!(list.total_frequency(), 3);
        assert!(!list.ensure_sorted());
    }

    #[test]
    fn test_from_sorted_validates() {
        let ok = PostingList::from_sorted(vec![
            Posting::new(doc(0), vec![0, 3]),
            Posting::new(doc(2), vec![1]),
        ])
        .unwrap();
        assert_eq!(ok.total_frequency(), 3);

        assert!(PostingList::from_sorted(vec![
            Posting::new(doc(2), vec![0]),
            Posting::new(doc(1), vec![0]),
        ])
        .is_none());
        assert!(PostingList::from_sorted(vec![Posting::new(doc(0), vec![3, 3])]).is_none());
        assert!(PostingList::from_sorted(vec![Posting::new(doc(0), vec![])]).is_none());
    }
}
