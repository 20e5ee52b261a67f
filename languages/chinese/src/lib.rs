pub mod builder;
pub mod cedict;
pub mod dictionary;
pub mod engine;
pub mod entry;
pub mod index;
pub mod loader;
pub mod query;
pub mod result;
pub mod search;
pub mod segmenter;

#[cfg(test)]
mod tests;

pub use builder::{BuildError, DictionaryBuilder, EntrySource};
pub use dictionary::Dictionary;
pub use engine::Engine;
pub use entry::{Entry, ExampleSentence, format_definition};
pub use query::format_query;
pub use result::{EnglishMatch, Match, SearchResult};
pub use segmenter::SentenceSegmenter;
