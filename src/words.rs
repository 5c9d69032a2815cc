use crate::error::WordSourceError;

use rand::Rng;
use std::{
    fs,
    path::PathBuf,
    sync::{
        OnceLock,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Served when the word list cannot be loaded, so there is always something to show.
pub const FALLBACK_WORDS: [&str; 3] = ["Error", "Loading", "Words"];

pub trait WordLoader: Send + Sync {
    fn load(&self) -> Result<Vec<String>, WordSourceError>;
}

/// Reads a UTF-8 file with one word per line.
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WordLoader for FileLoader {
    fn load(&self) -> Result<Vec<String>, WordSourceError> {
        let content = fs::read_to_string(&self.path).map_err(|source| WordSourceError::Read {
            path: self.path.clone(),
            source,
        })?;

        let words = parse_word_list(&content);
        if words.is_empty() {
            return Err(WordSourceError::Empty {
                path: self.path.clone(),
            });
        }

        Ok(words)
    }
}

pub fn parse_word_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Process-scoped word list, loaded on first use and kept for the process lifetime.
///
/// Callers racing on the first load wait for the one in flight; the loader
/// runs at most once.
pub struct WordSource<L = FileLoader> {
    loader: L,
    words: OnceLock<Vec<String>>,
    served: AtomicUsize,
}

impl WordSource<FileLoader> {
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileLoader::new(path))
    }
}

impl<L: WordLoader> WordSource<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            words: OnceLock::new(),
            served: AtomicUsize::new(0),
        }
    }

    pub fn initialize(&self) -> &[String] {
        self.words.get_or_init(|| match self.loader.load() {
            Ok(words) if !words.is_empty() => {
                log::info!("loaded {} words", words.len());
                words
            }
            Ok(_) => {
                log::error!("word loader returned no words; using placeholder words");
                fallback_words()
            }
            Err(err) => {
                log::error!("{err}; using placeholder words");
                fallback_words()
            }
        })
    }

    /// Uniformly random word. Never empty, never fails.
    pub fn next_word(&self) -> String {
        let words = self.initialize();
        let index = rand::rng().random_range(0..words.len());
        self.served.fetch_add(1, Ordering::Relaxed);
        words[index].clone()
    }

    /// Number of words handed out by [`next_word`](Self::next_word).
    pub fn served(&self) -> usize {
        self.served.load(Ordering::Relaxed)
    }
}

fn fallback_words() -> Vec<String> {
    FALLBACK_WORDS.iter().map(|w| w.to_string()).collect()
}
