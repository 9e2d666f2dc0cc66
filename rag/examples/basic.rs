//! Ingest a markdown guide and a plain note, then query them with a toy embedder.
//!
//! Run with `RUST_LOG=debug` to see per-document chunking logs.

use chunkline_core::{EmbeddingModel, Result};
use chunkline_rag::{Document, DocumentType, Pipeline};
use tracing_subscriber::EnvFilter;

/// Letter-frequency embedder, good enough to show ranking.
struct DemoEmbedder;

impl EmbeddingModel for DemoEmbedder {
    fn dim(&self) -> usize {
        26
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0; self.dim()];
        for byte in text.bytes().filter(u8::is_ascii_alphabetic) {
            vector[usize::from(byte.to_ascii_lowercase() - b'a')] += 1.0;
        }
        Ok(vector)
    }
}

const GUIDE: &str = "\
Preface text that appears before any heading.

# Installation
Download the archive and unpack it somewhere on your PATH.

## Configuration
Settings live in a TOML file. Every key has a sensible default, so an empty file is valid.

# Usage
Pass one or more documents on the command line. Long sections are split along paragraphs, \
then lines, then sentences, and finally words, so no chunk exceeds the configured size.";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let pipeline = Pipeline::builder(DemoEmbedder)
        .chunk_size(120)
        .chunk_overlap(16)
        .top_k(3)
        .build()?;

    let markdown = pipeline
        .add_documents(
            vec![Document::with_id("guide", GUIDE).meta("source", "handbook")],
            DocumentType::Markdown,
        )
        .await?;
    let text = pipeline
        .add_documents(
            vec![Document::with_id(
                "note",
                "Chunk overlap copies a few characters from each neighbour into every chunk.",
            )],
            DocumentType::Text,
        )
        .await?;
    println!("stored {markdown} markdown chunks and {text} text chunks");

    for chunk in pipeline.chunk(&Document::new(GUIDE), DocumentType::Markdown)? {
        println!(
            "[{}] {:?} ({} chars)",
            chunk.chunk_id,
            chunk.section_header().unwrap_or_default(),
            chunk.char_len()
        );
    }

    let results = pipeline.query("How do I configure settings?").await?;
    println!("Top matches:");
    for (rank, hit) in results.iter().enumerate() {
        println!("{rank}: {} (score = {:.3})", hit.id, hit.score);
    }

    println!("{:?}", pipeline.stats());
    Ok(())
}
