use anyhow::Result;
use clap::ValueEnum;
use lexis::{IndexSnapshot, SearchHit};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// One `docN:title (score)` line per hit, followed by its explanation.
    Text,
    /// JSON output.
    Json,
}

/// Print search results.
pub fn print_search_results(hits: &[SearchHit], title_field: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(hits)?);
        }
        OutputFormat::Text => {
            if hits.is_empty() {
                println!("No results found.");
            }
            for hit in hits {
                println!("{}", format_hit(hit, title_field));
                if let Some(explanation) = &hit.explanation {
                    print!("{explanation}");
                }
            }
        }
    }
    Ok(())
}

pub fn format_hit(hit: &SearchHit, title_field: &str) -> String {
    let title = hit.document.get_field(title_field).unwrap_or_default();
    format!("doc{}:{} ({})", hit.doc_id, title, hit.score)
}

#[derive(Tabled)]
struct FieldRow {
    field: String,
    policy: String,
    documents: u32,
    tokens: u64,
    terms: u64,
}

/// Print per-field statistics.
pub fn print_stats(snapshot: &IndexSnapshot, format: OutputFormat) -> Result<()> {
    let rows: Vec<FieldRow> = snapshot
        .field_names()
        .into_iter()
        .filter_map(|name| {
            let field = snapshot.field(name)?;
            let stats = field.stats();
            Some(FieldRow {
                field: name.to_string(),
                policy: field.policy().to_string(),
                documents: stats.doc_count,
                tokens: stats.sum_total_term_freq,
                terms: stats.unique_terms,
            })
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let fields: Vec<serde_json::Value> = rows
                .iter()
                .map(|row| {
                    serde_json::json!({
                        "field": row.field,
                        "policy": row.policy,
                        "documents": row.documents,
                        "tokens": row.tokens,
                        "terms": row.terms,
                    })
                })
                .collect();
            let output = serde_json::json!({
                "generation": snapshot.generation(),
                "document_count": snapshot.doc_count(),
                "fields": fields,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("Document count: {}", snapshot.doc_count());
            let table = Table::new(&rows).with(Style::rounded()).to_string();
            println!("{table}");
        }
    }
    Ok(())
}
