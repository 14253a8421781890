//! Snapshot persistence.
//!
//! A saved snapshot is a directory with three files:
//!
//! - `postings.bin`: per-field dictionaries, postings and field lengths, as
//!   checksummed structured records
//! - `documents.json`: the stored documents in doc id order
//! - `meta.json`: format version, generation, configuration and the checksums
//!   of the two data files
//!
//! `meta.json` is written last, so a directory only ever points at data files
//! whose checksums it knows.

use std::fs;
use std::path::Path;
use std::time::Instant;

use ahash::AHashMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::per_field::PerFieldAnalyzer;
use crate::analysis::policy::AnalyzerPolicy;
use crate::data::DocId;
use crate::engine::config::IndexConfig;
use crate::error::{LexisError, Result};
use crate::lexical::field_index::FieldIndex;
use crate::lexical::posting::{Posting, PostingList};
use crate::lexical::snapshot::IndexSnapshot;
use crate::storage::structured::{StructReader, StructWriter};
use crate::storage::write_atomic;
use crate::store::DocumentStore;

pub const POSTINGS_FILE: &str = "postings.bin";
pub const DOCUMENTS_FILE: &str = "documents.json";
pub const META_FILE: &str = "meta.json";

const POSTINGS_MAGIC: u32 = 0x4C58_5053; // "LXPS"
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotMeta {
    format_version: u32,
    generation: u64,
    doc_count: u32,
    config: IndexConfig,
    postings_checksum: u32,
    documents_checksum: u32,
}

fn policy_code(policy: AnalyzerPolicy) -> u8 {
    match policy {
        AnalyzerPolicy::Standard => 0,
        AnalyzerPolicy::Literal => 1,
    }
}

fn policy_from_code(code: u8) -> Result<AnalyzerPolicy> {
    match code {
        0 => Ok(AnalyzerPolicy::Standard),
        1 => Ok(AnalyzerPolicy::Literal),
        other => Err(LexisError::corrupt(format!("unknown analyzer policy code {other}"))),
    }
}

pub(crate) fn save(snapshot: &IndexSnapshot, dir: &Path) -> Result<()> {
    let started = Instant::now();
    fs::create_dir_all(dir)?;

    let mut postings = Vec::new();
    let postings_checksum = encode_postings(snapshot, &mut postings)?;
    let documents = serde_json::to_vec(snapshot.store())?;
    let documents_checksum = crc32fast::hash(&documents);

    write_atomic(&dir.join(POSTINGS_FILE), &postings)?;
    write_atomic(&dir.join(DOCUMENTS_FILE), &documents)?;

    let meta = SnapshotMeta {
        format_version: FORMAT_VERSION,
        generation: snapshot.generation(),
        doc_count: snapshot.doc_count() as u32,
        config: snapshot.config().clone(),
        postings_checksum,
        documents_checksum,
    };
    write_atomic(&dir.join(META_FILE), &serde_json::to_vec_pretty(&meta)?)?;

    info!(
        "saved snapshot generation {} ({} documents) to {} in {:?}",
        meta.generation,
        meta.doc_count,
        dir.display(),
        started.elapsed()
    );
    Ok(())
}

pub(crate) fn load(dir: &Path) -> Result<IndexSnapshot> {
    let started = Instant::now();

    let meta: SnapshotMeta = serde_json::from_slice(&fs::read(dir.join(META_FILE))?)?;
    if meta.format_version != FORMAT_VERSION {
        return Err(LexisError::corrupt(format!(
            "unsupported format version {}",
            meta.format_version
        )));
    }
    meta.config
        .validate()
        .map_err(|e| LexisError::corrupt(format!("stored configuration is invalid: {e}")))?;

    let documents = fs::read(dir.join(DOCUMENTS_FILE))?;
    if crc32fast::hash(&documents) != meta.documents_checksum {
        return Err(LexisError::corrupt(format!("{DOCUMENTS_FILE} checksum mismatch")));
    }
    let store: DocumentStore = serde_json::from_slice(&documents)?;
    if store.len() != meta.doc_count as usize {
        return Err(LexisError::corrupt(format!(
            "expected {} documents, found {}",
            meta.doc_count,
            store.len()
        )));
    }

    let reader = StructReader::new(fs::File::open(dir.join(POSTINGS_FILE))?)?;
    if reader.checksum() != meta.postings_checksum {
        return Err(LexisError::corrupt(format!(
            "{POSTINGS_FILE} does not belong to this snapshot"
        )));
    }
    let fields = decode_postings(reader, meta.doc_count)?;

    let analyzer = PerFieldAnalyzer::from_config(&meta.config)?;
    let snapshot =
        IndexSnapshot::new(meta.config, analyzer, fields, store).with_generation(meta.generation);

    info!(
        "opened snapshot generation {} ({} documents) from {} in {:?}",
        snapshot.generation(),
        snapshot.doc_count(),
        dir.display(),
        started.elapsed()
    );
    Ok(snapshot)
}

fn encode_postings(snapshot: &IndexSnapshot, out: &mut Vec<u8>) -> Result<u32> {
    let mut writer = StructWriter::new(out);
    writer.write_u32(POSTINGS_MAGIC)?;
    writer.write_u32(FORMAT_VERSION)?;

    let mut fields: Vec<(&String, &FieldIndex)> = snapshot.fields().iter().collect();
    fields.sort_unstable_by(|a, b| a.0.cmp(b.0));
    writer.write_varint(fields.len() as u64)?;

    for (name, field) in fields {
        writer.write_string(name)?;
        writer.write_u8(policy_code(field.policy()))?;

        let lengths = field.field_lengths();
        writer.write_varint(lengths.len() as u64)?;
        for &len in lengths {
            writer.write_varint(len as u64)?;
        }

        let terms = field.sorted_terms();
        writer.write_varint(terms.len() as u64)?;
        for (term, list) in terms {
            writer.write_string(term)?;
            writer.write_varint(list.doc_frequency() as u64)?;
            let mut prev_doc = 0u32;
            for posting in list {
                writer.write_varint((posting.doc_id.as_u32() - prev_doc) as u64)?;
                prev_doc = posting.doc_id.as_u32();

                writer.write_varint(posting.positions.len() as u64)?;
                let mut prev_pos = 0u32;
                for &pos in &posting.positions {
                    writer.write_varint((pos - prev_pos) as u64)?;
                    prev_pos = pos;
                }
            }
        }
        debug!("encoded field '{name}'");
    }

    writer.close()
}

fn decode_postings(mut reader: StructReader, doc_count: u32) -> Result<AHashMap<String, FieldIndex>> {
    if reader.read_u32()? != POSTINGS_MAGIC {
        return Err(LexisError::corrupt(format!("{POSTINGS_FILE}: bad magic number")));
    }
    let version = reader.read_u32()?;
    if version != FORMAT_VERSION {
        return Err(LexisError::corrupt(format!(
            "{POSTINGS_FILE}: unsupported version {version}"
        )));
    }

    let field_count = reader.read_varint()?;
    let mut fields = AHashMap::new();
    for _ in 0..field_count {
        let name = reader.read_string()?;
        let policy = policy_from_code(reader.read_u8()?)?;

        let length_count = reader.read_varint_u32()?;
        if length_count > doc_count {
            return Err(LexisError::corrupt(format!(
                "field '{name}' has lengths for {length_count} of {doc_count} documents"
            )));
        }
        let mut lengths = Vec::with_capacity(length_count as usize);
        for _ in 0..length_count {
            lengths.push(reader.read_varint_u32()?);
        }

        let term_count = reader.read_varint()?;
        let mut terms = AHashMap::new();
        for _ in 0..term_count {
            let term = reader.read_string()?;
            let list = read_posting_list(&mut reader, doc_count)
                .map_err(|e| LexisError::corrupt(format!("term '{name}:{term}': {e}")))?;
            terms.insert(term, list);
        }

        lengths.resize(doc_count as usize, 0);
        fields.insert(name, FieldIndex::from_parts(policy, terms, lengths));
    }

    if !reader.is_eof() {
        return Err(LexisError::corrupt(format!("{POSTINGS_FILE}: trailing data")));
    }
    Ok(fields)
}

fn read_posting_list(reader: &mut StructReader, doc_count: u32) -> Result<PostingList> {
    let doc_freq = reader.read_varint_u32()?;
    if doc_freq > doc_count {
        return Err(LexisError::corrupt("more postings than documents"));
    }

    let mut postings = Vec::with_capacity(doc_freq as usize);
    let mut doc = 0u32;
    for _ in 0..doc_freq {
        doc = doc
            .checked_add(reader.read_varint_u32()?)
            .filter(|&d| d < doc_count)
            .ok_or_else(|| LexisError::corrupt("doc id out of range"))?;

        let freq = reader.read_varint_u32()?;
        let mut positions = Vec::with_capacity(freq.min(1 << 16) as usize);
        let mut pos = 0u32;
        for _ in 0..freq {
            pos = pos
                .checked_add(reader.read_varint_u32()?)
                .ok_or_else(|| LexisError::corrupt("position overflow"))?;
            positions.push(pos);
        }
        postings.push(Posting::new(DocId::new(doc), positions));
    }

    PostingList::from_sorted(postings).ok_or_else(|| LexisError::corrupt("postings out of order"))
}
