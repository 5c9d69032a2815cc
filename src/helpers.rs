use clap::Parser;
use std::path::PathBuf;
use url::Url;

pub const WORD_PARAM: &str = "word";

#[derive(Debug, Parser)]
#[command(name = "words", version, about = "Displays a random word with a random style.")]
pub struct Args {
    /// Show this word first instead of a random one
    #[arg(short, long)]
    pub word: Option<String>,

    /// Open a shared link; its `word` query parameter picks the first word
    #[arg(short, long)]
    pub url: Option<String>,

    /// Word list, one word per line
    #[arg(long, env = "WORDS_FILE", default_value = "public/words.txt")]
    pub words_file: PathBuf,

    /// Base of the shareable link
    #[arg(long, env = "WORDS_SITE_URL", default_value = "http://localhost:3000")]
    pub site_url: String,

    /// File that receives log records while the screen is in use
    #[arg(long, env = "WORDS_LOG_FILE", default_value = "words.log")]
    pub log_file: PathBuf,

    /// env_logger filter, e.g. "debug" or "words=trace"
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Length of each fade, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub fade_ms: u64,
}

impl Args {
    /// `--word` wins over the link's query parameter. Empty values count as absent.
    pub fn initial_word(&self) -> Option<String> {
        self.word
            .clone()
            .filter(|w| !w.is_empty())
            .or_else(|| self.url.as_deref().and_then(word_from_url))
    }
}

pub fn urlify(raw: &str) -> String {
    if raw.starts_with("http") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    }
}

pub fn parse_site_url(raw: &str) -> Result<Url, url::ParseError> {
    Url::parse(&urlify(raw.trim()))
}

/// `{site}/?word=<word>`, replacing whatever path, query or fragment the site had.
pub fn share_url(site: &Url, word: &str) -> Url {
    let mut url = site.clone();
    url.set_path("/");
    url.set_fragment(None);
    url.query_pairs_mut().clear().append_pair(WORD_PARAM, word);
    url
}

/// Accepts absolute links and bare `/?word=...` paths.
pub fn word_from_url(raw: &str) -> Option<String> {
    let base = Url::parse("http://localhost/").ok()?;
    let url = Url::options().base_url(Some(&base)).parse(raw).ok()?;

    url.query_pairs()
        .find(|(key, _)| key == WORD_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|word| !word.is_empty())
}
