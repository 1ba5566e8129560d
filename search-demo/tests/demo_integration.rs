//! Integration tests for the demo sequence.
//!
//! These tests run the real Demo and SearchService against a mock
//! SearchProvider that records every call, so no search server is needed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use search_demo::demo::{Demo, FIRST_TWEET_ID, SECOND_TWEET_ID};
use search_demo::errors::DemoError;
use search_demo_repository::opensearch::IndexConfig;
use search_demo_repository::{
    EnsureIndexOutcome, FetchedDocument, IndexedDocument, PingInfo, SearchError, SearchProvider,
    SearchService, ServerInfo, VersionInfo,
};
use search_demo_shared::Tweet;
use serde_json::{json, Value};

// Mock Search Provider for testing
#[derive(Default)]
struct MockSearchProvider {
    calls: Arc<Mutex<Vec<String>>>,
    documents: Arc<Mutex<HashMap<String, Value>>>,
    index_exists: bool,
    fail_on_index: bool,
    lose_documents: bool,
    foreign_documents: bool,
    server_version: Option<&'static str>,
    created_bodies: Arc<Mutex<Vec<Value>>>,
}

impl MockSearchProvider {
    fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl SearchProvider for MockSearchProvider {
    async fn ping(&self) -> Result<PingInfo, SearchError> {
        self.record("ping".to_string());
        Ok(PingInfo {
            status_code: 200,
            info: ServerInfo {
                name: "node-1".to_string(),
                cluster_name: "demo".to_string(),
                cluster_uuid: None,
                version: VersionInfo {
                    number: self.server_version.unwrap_or("7.10.2").to_string(),
                    distribution: None,
                    lucene_version: None,
                },
                tagline: None,
            },
        })
    }

    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        self.record(format!("index_exists:{}", index));
        Ok(self.index_exists)
    }

    async fn create_index(&self, index: &str, body: Option<&Value>) -> Result<bool, SearchError> {
        let has_mapping = body
            .map(|b| b["mappings"]["properties"]["message"].is_object())
            .unwrap_or(false);
        self.record(format!("create_index:{}:mapping={}", index, has_mapping));
        if let Some(body) = body {
            self.created_bodies.lock().unwrap().push(body.clone());
        }
        Ok(true)
    }

    async fn index_document(
        &self,
        index: &str,
        id: &str,
        document: &Value,
    ) -> Result<IndexedDocument, SearchError> {
        self.record(format!("index:{}/{}", index, id));
        if self.fail_on_index {
            return Err(SearchError::index("Index failed with status 503"));
        }
        self.documents
            .lock()
            .unwrap()
            .insert(id.to_string(), document.clone());
        Ok(IndexedDocument {
            index: index.to_string(),
            doc_type: None,
            id: id.to_string(),
            version: 1,
            result: "created".to_string(),
        })
    }

    async fn get_document(&self, index: &str, id: &str) -> Result<FetchedDocument, SearchError> {
        self.record(format!("get:{}/{}", index, id));
        if self.lose_documents {
            return Ok(FetchedDocument::not_found(index, id));
        }
        let source = if self.foreign_documents {
            Some(json!({ "user": 7, "title": "not a tweet" }))
        } else {
            self.documents.lock().unwrap().get(id).cloned()
        };
        Ok(FetchedDocument {
            index: index.to_string(),
            doc_type: Some("_doc".to_string()),
            id: id.to_string(),
            version: Some(1),
            found: source.is_some(),
            source,
        })
    }

    async fn flush(&self, index: &str) -> Result<(), SearchError> {
        self.record(format!("flush:{}", index));
        Ok(())
    }
}

fn demo_with(provider: MockSearchProvider) -> (Demo, Arc<Mutex<Vec<String>>>) {
    let calls = provider.calls.clone();
    let service = SearchService::new(Box::new(provider));
    (Demo::new(service, IndexConfig::default(), "tweet"), calls)
}

#[tokio::test]
async fn test_demo_runs_full_sequence() {
    let (demo, calls) = demo_with(MockSearchProvider::new());
    let mut out = Vec::new();

    let report = demo.run_with_output(&mut out).await.unwrap();

    // The version shortcut pings a second time
    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            "ping",
            "ping",
            "index_exists:twitter",
            "create_index:twitter:mapping=true",
            "index:twitter/1",
            "index:twitter/2",
            "get:twitter/1",
            "flush:twitter",
        ]
    );

    assert_eq!(report.ping.status_code, 200);
    assert_eq!(report.version, "7.10.2");
    assert_eq!(
        report.index_outcome,
        EnsureIndexOutcome::Created { acknowledged: true }
    );
    assert_eq!(report.indexed.len(), 2);
    assert_eq!(report.indexed[0].id, FIRST_TWEET_ID);
    assert_eq!(report.indexed[1].id, SECOND_TWEET_ID);
    assert!(report.fetched.found);
    assert_eq!(report.fetched_tweet, Some(Tweet::new("olivere", "Take Five", 0)));

    let output = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Search server returned with code 200 and version 7.10.2",
            "Search server version 7.10.2",
            "Created index twitter",
            "Indexed tweet 1 to index twitter, type tweet",
            "Indexed tweet 2 to index twitter, type tweet",
            "Got document 1 in version 1 from index twitter, type _doc",
            "Flushed index twitter",
        ]
    );
}

#[tokio::test]
async fn test_demo_skips_existing_index() {
    let provider = MockSearchProvider {
        index_exists: true,
        ..MockSearchProvider::new()
    };
    let (demo, calls) = demo_with(provider);
    let mut out = Vec::new();

    let report = demo.run_with_output(&mut out).await.unwrap();

    assert_eq!(report.index_outcome, EnsureIndexOutcome::AlreadyExists);
    assert!(!calls
        .lock()
        .unwrap()
        .iter()
        .any(|call| call.starts_with("create_index")));
    assert!(String::from_utf8(out)
        .unwrap()
        .contains("Index twitter already exists"));
}

#[tokio::test]
async fn test_demo_indexes_both_tweet_bodies() {
    let provider = MockSearchProvider::new();
    let documents = provider.documents.clone();
    let (demo, _calls) = demo_with(provider);
    let mut out = Vec::new();

    demo.run_with_output(&mut out).await.unwrap();

    let documents = documents.lock().unwrap();
    assert_eq!(
        documents[FIRST_TWEET_ID],
        json!({ "user": "olivere", "message": "Take Five", "retweets": 0 })
    );
    assert_eq!(
        documents[SECOND_TWEET_ID],
        json!({ "user": "olivere", "message": "It's a Raggy Waltz" })
    );
}

#[tokio::test]
async fn test_demo_stops_on_index_failure() {
    let provider = MockSearchProvider {
        fail_on_index: true,
        ..MockSearchProvider::new()
    };
    let (demo, calls) = demo_with(provider);
    let mut out = Vec::new();

    let result = demo.run_with_output(&mut out).await;

    assert!(matches!(
        result,
        Err(DemoError::Search(SearchError::IndexError(_)))
    ));
    let calls = calls.lock().unwrap();
    assert_eq!(calls.last().map(String::as_str), Some("index:twitter/1"));
    assert!(!calls.iter().any(|call| call.starts_with("flush")));
}

#[tokio::test]
async fn test_demo_reports_missing_document() {
    let provider = MockSearchProvider {
        lose_documents: true,
        ..MockSearchProvider::new()
    };
    let (demo, calls) = demo_with(provider);
    let mut out = Vec::new();

    let report = demo.run_with_output(&mut out).await.unwrap();

    assert!(!report.fetched.found);
    assert!(report.fetched_tweet.is_none());
    assert_eq!(calls.lock().unwrap().last().unwrap(), "flush:twitter");
    assert!(String::from_utf8(out)
        .unwrap()
        .contains("Document 1 not found in index twitter"));
}

#[tokio::test]
async fn test_demo_rejects_invalid_index_name_before_any_write() {
    let provider = MockSearchProvider::new();
    let calls = provider.calls.clone();
    let service = SearchService::new(Box::new(provider));
    let demo = Demo::new(service, IndexConfig::new("Twitter"), "tweet");
    let mut out = Vec::new();

    let result = demo.run_with_output(&mut out).await;

    assert!(matches!(
        result,
        Err(DemoError::Search(SearchError::ValidationError(_)))
    ));
    assert_eq!(*calls.lock().unwrap(), vec!["ping", "ping"]);
}

#[tokio::test]
async fn test_demo_nests_mapping_under_type_for_6x_servers() {
    let provider = MockSearchProvider {
        server_version: Some("6.8.23"),
        ..MockSearchProvider::new()
    };
    let created_bodies = provider.created_bodies.clone();
    let (demo, calls) = demo_with(provider);
    let mut out = Vec::new();

    demo.run_with_output(&mut out).await.unwrap();

    assert!(calls
        .lock()
        .unwrap()
        .contains(&"create_index:twitter:mapping=false".to_string()));
    let bodies = created_bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0]["mappings"]["_doc"]["properties"]["user"]["type"],
        "keyword"
    );
    assert!(bodies[0]["mappings"]["properties"].is_null());
}

#[tokio::test]
async fn test_demo_sends_typeless_mapping_to_7x_servers() {
    let provider = MockSearchProvider::new();
    let created_bodies = provider.created_bodies.clone();
    let (demo, _calls) = demo_with(provider);
    let mut out = Vec::new();

    demo.run_with_output(&mut out).await.unwrap();

    let bodies = created_bodies.lock().unwrap();
    assert_eq!(bodies[0]["mappings"]["properties"]["user"]["type"], "keyword");
    assert!(bodies[0]["mappings"]["_doc"].is_null());
}

#[tokio::test]
async fn test_demo_continues_when_fetched_document_is_not_a_tweet() {
    let provider = MockSearchProvider {
        foreign_documents: true,
        ..MockSearchProvider::new()
    };
    let (demo, calls) = demo_with(provider);
    let mut out = Vec::new();

    let report = demo.run_with_output(&mut out).await.unwrap();

    assert!(report.fetched.found);
    assert!(report.fetched_tweet.is_none());
    assert_eq!(calls.lock().unwrap().last().unwrap(), "flush:twitter");
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Got document 1 in version 1 from index twitter, type _doc"));
    assert!(output.contains("Flushed index twitter"));
}
