//! Context assembly from stored exchanges and documents

use serde::{Deserialize, Serialize};

use crate::types::{Document, QaPair};

/// Strategy bounding how much stored context goes into a prompt
///
/// The store is never truncated; a budget only selects which entries are
/// rendered. Selection always keeps the newest entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ContextBudget {
    /// Every exchange and document
    #[default]
    Unbounded,
    /// The most recent exchanges plus every document
    RecentExchanges { max_exchanges: usize },
    /// Drop oldest exchanges, then oldest documents, until the context fits
    MaxChars { max_chars: usize },
}

/// Renders stored context into prompt text
pub struct ContextBuilder;

impl ContextBuilder {
    /// Render exchanges then documents, each block newline-joined, empty blocks omitted
    pub fn build_context(exchanges: &[QaPair], documents: &[Document]) -> String {
        let history = exchanges
            .iter()
            .map(|e| format!("Q: {}\nA: {}", e.question, e.answer))
            .collect::<Vec<_>>()
            .join("\n");

        let docs = documents
            .iter()
            .map(|d| format!("Document: {}\n{}", d.name, d.content))
            .collect::<Vec<_>>()
            .join("\n");

        [history, docs]
            .into_iter()
            .filter(|block| !block.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the context selected by `budget`
    pub fn build_bounded(
        budget: &ContextBudget,
        exchanges: &[QaPair],
        documents: &[Document],
    ) -> String {
        match budget {
            ContextBudget::Unbounded => Self::build_context(exchanges, documents),
            ContextBudget::RecentExchanges { max_exchanges } => {
                let skip = exchanges.len().saturating_sub(*max_exchanges);
                Self::build_context(&exchanges[skip..], documents)
            }
            ContextBudget::MaxChars { max_chars } => {
                let (ex_start, doc_start) = Self::fit_to_chars(*max_chars, exchanges, documents);
                Self::build_context(&exchanges[ex_start..], &documents[doc_start..])
            }
        }
    }

    /// Start indices of the newest exchanges and documents whose rendering fits `max_chars`
    ///
    /// Entry lengths are measured once; the rendered total is tracked as entries drop.
    fn fit_to_chars(
        max_chars: usize,
        exchanges: &[QaPair],
        documents: &[Document],
    ) -> (usize, usize) {
        let ex_lens: Vec<usize> = exchanges.iter().map(exchange_len).collect();
        let doc_lens: Vec<usize> = documents.iter().map(document_len).collect();

        let mut ex_total: usize = ex_lens.iter().sum();
        let mut doc_total: usize = doc_lens.iter().sum();
        let (mut ex_start, mut doc_start) = (0, 0);

        while rendered_len(
            ex_total,
            exchanges.len() - ex_start,
            doc_total,
            documents.len() - doc_start,
        ) > max_chars
        {
            if ex_start < exchanges.len() {
                ex_total -= ex_lens[ex_start];
                ex_start += 1;
            } else if doc_start < documents.len() {
                doc_total -= doc_lens[doc_start];
                doc_start += 1;
            } else {
                break;
            }
        }

        (ex_start, doc_start)
    }
}

/// Characters in `Q: {question}\nA: {answer}`
fn exchange_len(exchange: &QaPair) -> usize {
    "Q: \nA: ".len() + exchange.question.chars().count() + exchange.answer.chars().count()
}

/// Characters in `Document: {name}\n{content}`
fn document_len(document: &Document) -> usize {
    "Document: \n".len() + document.name.chars().count() + document.content.chars().count()
}

/// Characters in the rendered context, counting the newline separators
fn rendered_len(ex_total: usize, ex_count: usize, doc_total: usize, doc_count: usize) -> usize {
    let history = ex_total + ex_count.saturating_sub(1);
    let docs = doc_total + doc_count.saturating_sub(1);
    let joint = usize::from(ex_count > 0 && doc_count > 0);
    history + docs + joint
}

/// User turn sent upstream: the context, a newline, then the message
pub fn build_user_turn(context: &str, message: &str) -> String {
    format!("{}\n{}", context, message)
}
