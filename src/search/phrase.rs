//! Phrase matching over positional posting lists.
//!
//! Candidate documents are found by intersecting the posting lists of all
//! phrase terms, driven by the rarest list. Each candidate is then verified by
//! walking the sorted position lists with one cursor per term.
//!
//! Every term carries its offset from the first term of the phrase. Offsets
//! are usually `0, 1, 2, ..`, but skip values where analysis removed a word
//! from the query (stop words), so the phrase keeps the gap.

use crate::data::DocId;
use crate::lexical::posting::{Posting, PostingList};

/// A document containing the phrase, with the number of phrase occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch {
    pub doc_id: DocId,
    pub freq: u32,
}

/// Forward-only cursor over a posting list.
struct PostingCursor<'a> {
    postings: &'a [Posting],
    index: usize,
}

impl<'a> PostingCursor<'a> {
    fn new(list: &'a PostingList) -> Self {
        PostingCursor {
            postings: list.postings(),
            index: 0,
        }
    }

    /// Move to the first posting with `doc_id >= target`.
    fn advance(&mut self, target: DocId) -> Option<&'a Posting> {
        let rest = &self.postings[self.index..];
        self.index += rest.partition_point(|p| p.doc_id < target);
        self.postings.get(self.index)
    }
}

/// All documents matching the phrase formed by `lists`, in doc id order.
///
/// `lists` holds one posting list per phrase term, in phrase order, and
/// `offsets` the position of each term relative to the first one. An empty
/// phrase matches nothing.
pub fn matching_docs(lists: &[&PostingList], offsets: &[u32]) -> Vec<PhraseMatch> {
    if lists.is_empty()
        || lists.len() != offsets.len()
        || lists.iter().any(|l| l.is_empty())
    {
        return Vec::new();
    }

    let lead = lists
        .iter()
        .enumerate()
        .min_by_key(|(_, list)| list.doc_frequency())
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut cursors: Vec<PostingCursor<'_>> = lists.iter().map(|l| PostingCursor::new(l)).collect();
    let mut matches = Vec::new();
    let mut positions: Vec<&[u32]> = Vec::with_capacity(lists.len());

    'candidates: for posting in lists[lead].postings() {
        positions.clear();
        for (i, cursor) in cursors.iter_mut().enumerate() {
            if i == lead {
                positions.push(&posting.positions);
                continue;
            }
            match cursor.advance(posting.doc_id) {
                Some(found) if found.doc_id == posting.doc_id => positions.push(&found.positions),
                Some(_) => continue 'candidates,
                None => break 'candidates,
            }
        }

        let freq = phrase_freq(&positions, offsets);
        if freq > 0 {
            matches.push(PhraseMatch {
                doc_id: posting.doc_id,
                freq,
            });
        }
    }

    matches
}

/// Phrase frequency in a single document, or `None` if it does not match.
pub fn match_doc(lists: &[&PostingList], offsets: &[u32], doc_id: DocId) -> Option<u32> {
    if lists.is_empty() || lists.len() != offsets.len() {
        return None;
    }
    let positions = lists
        .iter()
        .map(|list| list.get(doc_id).map(|p| p.positions.as_slice()))
        .collect::<Option<Vec<&[u32]>>>()?;
    let freq = phrase_freq(&positions, offsets);
    (freq > 0).then_some(freq)
}

/// Number of start positions `p` such that `positions[i]` contains
/// `p + offsets[i] - offsets[0]` for every `i`.
///
/// Every slice must be sorted ascending and `offsets` must be strictly
/// increasing.
pub fn phrase_freq(positions: &[&[u32]], offsets: &[u32]) -> u32 {
    let (Some((first, rest)), Some((&base, rest_offsets))) =
        (positions.split_first(), offsets.split_first())
    else {
        return 0;
    };
    if rest.len() != rest_offsets.len() {
        return 0;
    }

    let mut cursors = vec![0usize; rest.len()];
    let mut freq = 0;

    'starts: for &start in first.iter() {
        for ((list, cursor), &offset) in rest.iter().zip(cursors.iter_mut()).zip(rest_offsets) {
            let Some(target) = offset.checked_sub(base).and_then(|d| start.checked_add(d)) else {
                break 'starts;
            };
            while *cursor < list.len() && list[*cursor] < target {
                *cursor += 1;
            }
            match list.get(*cursor) {
                Some(&pos) if pos == target => {}
                Some(_) => continue 'starts,
                // Later starts need even larger positions.
                None => break 'starts,
            }
        }
        freq += 1;
    }

    freq
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(postings: &[(u32, &[u32])]) -> PostingList {
        let mut list = PostingList::new();
        for (doc, positions) in postings {
            for &pos in *positions {
                list.push_position(DocId::new(*doc), pos);
            }
        }
        list
    }

    #[test]
    fn test_phrase_freq() {
        assert_eq!(phrase_freq(&[&[0, 4, 9], &[1, 5, 7], &[2, 8]], &[0, 1, 2]), 1);
        assert_eq!(phrase_freq(&[&[0, 2], &[1, 3]], &[0, 1]), 2);
        assert_eq!(phrase_freq(&[&[1], &[0]], &[0, 1]), 0);
        assert_eq!(phrase_freq(&[&[3, 5, 8]], &[0]), 3);
        assert_eq!(phrase_freq(&[], &[]), 0);
    }

    #[test]
    fn test_phrase_freq_with_gap() {
        // "direttore _ ha": only the run with one slot between the terms.
        assert_eq!(phrase_freq(&[&[1, 6], &[3, 7]], &[0, 2]), 1);
        assert_eq!(phrase_freq(&[&[1, 6], &[3, 7]], &[0, 1]), 1);
        assert_eq!(phrase_freq(&[&[6], &[7]], &[0, 2]), 0);
        // Offsets are relative to the first term.
        assert_eq!(phrase_freq(&[&[1], &[3]], &[1, 3]), 1);
    }

    #[test]
    fn test_repeated_term_phrase() {
        // "a a" in "a a a" occurs at starts 0 and 1.
        assert_eq!(phrase_freq(&[&[0, 1, 2], &[0, 1, 2]], &[0, 1]), 2);
    }

    #[test]
    fn test_matching_docs_intersects() {
        let il = list(&[(0, &[0, 6]), (1, &[3]), (2, &[0]), (4, &[2])]);
        let direttore = list(&[(1, &[4]), (2, &[5]), (4, &[3])]);

        let matches = matching_docs(&[&il, &direttore], &[0, 1]);
        assert_eq!(
            matches,
            vec![
                PhraseMatch { doc_id: DocId::new(1), freq: 1 },
                PhraseMatch { doc_id: DocId::new(4), freq: 1 },
            ]
        );

        // Reversed order does not match.
        assert!(matching_docs(&[&direttore, &il], &[0, 1]).is_empty());
        // One slot between the terms matches nowhere.
        assert!(matching_docs(&[&il, &direttore], &[0, 2]).is_empty());
    }

    #[test]
    fn test_match_doc() {
        let a = list(&[(0, &[0]), (3, &[1, 7])]);
        let b = list(&[(3, &[2, 8])]);
        assert_eq!(match_doc(&[&a, &b], &[0, 1], DocId::new(3)), Some(2));
        assert_eq!(match_doc(&[&a, &b], &[0, 1], DocId::new(0)), None);
        assert_eq!(match_doc(&[&a, &b], &[0, 2], DocId::new(3)), None);
        assert_eq!(match_doc(&[], &[], DocId::new(0)), None);
    }

    #[test]
    fn test_empty_inputs() {
        let empty = PostingList::new();
        let a = list(&[(0, &[0])]);
        assert!(matching_docs(&[], &[]).is_empty());
        assert!(matching_docs(&[&a, &empty], &[0, 1]).is_empty());
    }
}
