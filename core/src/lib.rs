//! # chunkline-core
//!
//! `chunkline-core` hosts the no-std trait APIs that the rest of the workspace builds on. The
//! chunking engine itself never talks to the network; it hands chunk text to whatever implements
//! [`EmbeddingModel`], so provider crates only need to implement this one trait.
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   Documents     │───▶│  chunkline-rag   │───▶│   Providers     │
//! │                 │    │                  │    │                 │
//! │ - plain text    │    │ - splitter       │    │ - openai        │
//! │ - markdown      │    │ - overlap        │    │ - ollama        │
//! │                 │    │ - segmenter      │    │ - local models  │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! | Capability | Trait | Description |
//! |------------|-------|-------------|
//! | **Embeddings** | [`EmbeddingModel`] | Convert chunk text to vectors for semantic search |

#![no_std]
extern crate alloc;

/// Text embeddings.
pub mod embedding;

use alloc::string::String;

#[doc(inline)]
pub use embedding::{Embedding, EmbeddingModel};

/// Result type used throughout the crate.
///
/// Type alias for [`anyhow::Result<T>`](anyhow::Result) with [`String`] as default success type.
pub type Result<T = String> = anyhow::Result<T>;

pub use anyhow::Error;
