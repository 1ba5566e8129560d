//! The demo sequence.
//!
//! Runs a fixed list of calls against the search server and prints what each
//! one returned:
//!
//! 1. ping and print the status code and version
//! 2. read the version again through the version shortcut
//! 3. create the index unless it exists
//! 4. index a typed tweet and a tweet given as a raw JSON string
//! 5. get the first tweet back
//! 6. flush the index

use std::io::Write;
use tracing::{info, instrument, warn};

use crate::errors::DemoError;
use search_demo_repository::opensearch::{get_index_settings, IndexConfig};
use search_demo_repository::{
    EnsureIndexOutcome, FetchedDocument, IndexedDocument, PingInfo, SearchService,
};
use search_demo_shared::Tweet;

/// Id of the tweet indexed from a typed struct.
pub const FIRST_TWEET_ID: &str = "1";

/// Id of the tweet indexed from a raw JSON string.
pub const SECOND_TWEET_ID: &str = "2";

/// Body of the second tweet, indexed as-is.
pub const SECOND_TWEET_JSON: &str = r#"{"user" : "olivere", "message" : "It's a Raggy Waltz"}"#;

/// Everything the demo observed.
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub ping: PingInfo,
    pub version: String,
    pub index_outcome: EnsureIndexOutcome,
    /// Index responses, in the order the tweets were indexed.
    pub indexed: Vec<IndexedDocument>,
    pub fetched: FetchedDocument,
    /// The fetched source, if the document was found.
    pub fetched_tweet: Option<Tweet>,
}

/// Runs the demo sequence against a search service.
pub struct Demo {
    service: SearchService,
    index: IndexConfig,
    doc_type: String,
}

impl Demo {
    /// Create a new demo.
    ///
    /// # Arguments
    ///
    /// * `service` - Service bound to a live search server
    /// * `index` - The index to create and write to
    /// * `doc_type` - Type label printed when the server does not report one
    pub fn new(service: SearchService, index: IndexConfig, doc_type: impl Into<String>) -> Self {
        Self {
            service,
            index,
            doc_type: doc_type.into(),
        }
    }

    /// The first sample tweet.
    pub fn first_tweet() -> Tweet {
        Tweet::new("olivere", "Take Five", 0)
    }

    /// Run the demo, printing to stdout.
    pub async fn run(&self) -> Result<DemoReport, DemoError> {
        let mut stdout = std::io::stdout();
        self.run_with_output(&mut stdout).await
    }

    /// Run the demo, printing to the given writer.
    ///
    /// Stops at the first failed call.
    #[instrument(skip(self, out), fields(index = %self.index.name))]
    pub async fn run_with_output<W: Write + Send>(
        &self,
        out: &mut W,
    ) -> Result<DemoReport, DemoError> {
        let index = self.index.name.as_str();

        let ping = self.service.ping().await?;
        writeln!(
            out,
            "Search server returned with code {} and version {}",
            ping.status_code,
            ping.version()
        )?;
        info!(status = ping.status_code, version = %ping.version(), "Ping succeeded");

        let version = self.service.server_version().await?;
        writeln!(out, "Search server version {}", version)?;

        let settings = get_index_settings(&self.index, ping.mapping_type());
        let index_outcome = self.service.ensure_index(index, Some(&settings)).await?;
        match index_outcome {
            EnsureIndexOutcome::AlreadyExists => writeln!(out, "Index {} already exists", index)?,
            EnsureIndexOutcome::Created { acknowledged: true } => {
                writeln!(out, "Created index {}", index)?
            }
            EnsureIndexOutcome::Created {
                acknowledged: false,
            } => {
                warn!(index = %index, "Continuing with unacknowledged index");
                writeln!(out, "Created index {} (not acknowledged)", index)?
            }
        }

        let first = self
            .service
            .index_json(index, FIRST_TWEET_ID, &Self::first_tweet())
            .await?;
        self.print_indexed(out, &first)?;

        let second = self
            .service
            .index_raw(index, SECOND_TWEET_ID, SECOND_TWEET_JSON)
            .await?;
        self.print_indexed(out, &second)?;

        let fetched = self.service.get(index, FIRST_TWEET_ID).await?;
        // A reused index may hold a differently shaped document under this id
        let fetched_tweet = fetched.source_as::<Tweet>().unwrap_or_else(|e| {
            warn!(index = %index, id = FIRST_TWEET_ID, error = %e, "Fetched document is not a tweet");
            None
        });
        if fetched.found {
            writeln!(
                out,
                "Got document {} in version {} from index {}, type {}",
                fetched.id,
                fetched.version.unwrap_or_default(),
                fetched.index,
                fetched.doc_type.as_deref().unwrap_or(&self.doc_type)
            )?;
        } else {
            warn!(index = %index, id = FIRST_TWEET_ID, "Indexed document was not found");
            writeln!(out, "Document {} not found in index {}", fetched.id, fetched.index)?;
        }

        self.service.flush(index).await?;
        writeln!(out, "Flushed index {}", index)?;
        info!(index = %index, "Demo completed");

        Ok(DemoReport {
            ping,
            version,
            index_outcome,
            indexed: vec![first, second],
            fetched,
            fetched_tweet,
        })
    }

    fn print_indexed<W: Write>(&self, out: &mut W, doc: &IndexedDocument) -> Result<(), DemoError> {
        writeln!(
            out,
            "Indexed tweet {} to index {}, type {}",
            doc.id,
            doc.index,
            doc.doc_type.as_deref().unwrap_or(&self.doc_type)
        )?;
        info!(id = %doc.id, index = %doc.index, result = %doc.result, "Tweet indexed");
        Ok(())
    }
}
