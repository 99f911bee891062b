//! In-memory document source and XML builders for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use rollcall_shared::{DocumentKey, Result, RollcallError};
use rollcall_source::DocumentSource;

/// Document source backed by a map, recording every key it is asked for.
pub(crate) struct FakeSource {
    documents: HashMap<DocumentKey, Vec<u8>>,
    calls: Mutex<Vec<DocumentKey>>,
}

impl FakeSource {
    pub(crate) fn new() -> Self {
        Self {
            documents: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with(mut self, key: DocumentKey, body: impl Into<Vec<u8>>) -> Self {
        self.documents.insert(key, body.into());
        self
    }

    pub(crate) fn calls(&self) -> Vec<DocumentKey> {
        self.calls.lock().unwrap().clone()
    }
}

impl DocumentSource for FakeSource {
    async fn fetch(&self, key: &DocumentKey) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(*key);
        self.documents
            .get(key)
            .cloned()
            .ok_or_else(|| RollcallError::fetch(key.to_string(), "HTTP 404 Not Found"))
    }
}

/// One `<vote>` entry for [`vote_list_xml`].
pub(crate) struct Entry<'a> {
    pub number: &'a str,
    pub title: &'a str,
    pub issue: &'a str,
    pub result: &'a str,
    pub yeas: &'a str,
    pub nays: &'a str,
}

pub(crate) fn vote_list_xml(entries: &[Entry<'_>]) -> String {
    let mut xml = String::from("<vote_summary><votes>");
    for e in entries {
        xml.push_str(&format!(
            "<vote><vote_number>{}</vote_number><issue>{}</issue><result>{}</result>\
             <vote_tally><yeas>{}</yeas><nays>{}</nays></vote_tally><title>{}</title></vote>",
            e.number, e.issue, e.result, e.yeas, e.nays, e.title
        ));
    }
    xml.push_str("</votes></vote_summary>");
    xml
}

/// A vote record with `(party, vote, count)` member groups.
pub(crate) fn vote_record_xml(majority: &str, tie_vote: &str, groups: &[(&str, &str, usize)]) -> String {
    let mut xml = format!(
        "<roll_call_vote><majority_requirement>{majority}</majority_requirement>\
         <tie_breaker><by_whom>The Vice President</by_whom>\
         <tie_breaker_vote>{tie_vote}</tie_breaker_vote></tie_breaker><members>"
    );
    for (party, vote, count) in groups {
        for _ in 0..*count {
            xml.push_str(&format!(
                "<member><party>{party}</party><vote_cast>{vote}</vote_cast></member>"
            ));
        }
    }
    xml.push_str("</members></roll_call_vote>");
    xml
}
