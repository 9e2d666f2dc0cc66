//! # Embedding Module
//!
//! Types and traits for turning chunk text into vectors.
//!
//! Embeddings are dense vector representations of text that capture semantic meaning. A
//! retrieval pipeline embeds every chunk once at ingestion time and embeds each query at search
//! time; chunks whose vectors point in a similar direction to the query vector are returned as
//! context.
//!
//! Different models have different characteristics:
//!
//! - **Dimension**: The length of the embedding vector (e.g., 384, 768, 1536)
//! - **Context window**: How much text a single request may carry, which is why documents are
//!   chunked before embedding
//!
//! ## Usage
//!
//! ```rust
//! use chunkline_core::EmbeddingModel;
//!
//! async fn example<T: EmbeddingModel>(model: &T) -> chunkline_core::Result<()> {
//!     let dim = model.dim();
//!     let embedding = model.embed("Hello, world!").await?;
//!     assert_eq!(embedding.len(), dim);
//!     Ok(())
//! }
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::future::Future;

/// A type alias for an embedding vector of 32-bit floats.
pub type Embedding = Vec<f32>;

/// Converts text to vector representations.
///
/// Implementations usually wrap an HTTP provider (`OpenAI`, Ollama, ...) or a local model. The
/// chunking pipeline only relies on the contract below, so providers can be swapped freely.
///
/// # Implementation Requirements
///
/// - [`embed`](EmbeddingModel::embed) must return vectors with length equal to [`dim`](EmbeddingModel::dim)
/// - [`embed_batch`](EmbeddingModel::embed_batch) must return one vector per input, in input order
///
/// # Example
///
/// ```rust
/// use chunkline_core::EmbeddingModel;
///
/// struct MyEmbedding;
///
/// impl EmbeddingModel for MyEmbedding {
///     fn dim(&self) -> usize {
///         768
///     }
///
///     async fn embed(&self, _text: &str) -> chunkline_core::Result<Vec<f32>> {
///         // In a real implementation, this would call the embedding API
///         Ok(vec![0.0; self.dim()])
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let model = MyEmbedding;
/// let vectors = model
///     .embed_batch(&["one".to_string(), "two".to_string()])
///     .await
///     .unwrap();
/// assert_eq!(vectors.len(), 2);
/// assert_eq!(vectors[0].len(), 768);
/// # });
/// ```
pub trait EmbeddingModel: Send + Sized + Sync {
    /// Returns the embedding vector dimension.
    fn dim(&self) -> usize;

    /// Converts text to an embedding vector.
    ///
    /// # Returns
    ///
    /// A [`Vec<f32>`] with length equal to [`Self::dim`](EmbeddingModel::dim).
    fn embed(&self, text: &str) -> impl Future<Output = crate::Result<Vec<f32>>> + Send;

    /// Embeds several texts, preserving input order.
    ///
    /// The provided implementation calls [`embed`](EmbeddingModel::embed) once per text and
    /// stops at the first failure. Providers with a native batch endpoint should override it.
    fn embed_batch(
        &self,
        texts: &[String],
    ) -> impl Future<Output = crate::Result<Vec<Embedding>>> + Send {
        async move {
            let mut vectors = Vec::with_capacity(texts.len());
            for text in texts {
                vectors.push(self.embed(text).await?);
            }
            Ok(vectors)
        }
    }
}
