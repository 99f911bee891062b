//! Retrieval of LIS vote documents.
//!
//! This crate provides:
//! - [`DocumentSource`]: the seam the table builder fetches through
//! - [`DocumentCache`]: the on-disk layout of cached XML files
//! - [`SenateSource`]: HTTP retrieval with a file-existence cache in front

mod cache;
mod http;

use std::future::Future;

use rollcall_shared::{DocumentKey, Result};

pub use cache::DocumentCache;
pub use http::SenateSource;

/// Anything that can hand out the raw bytes of an LIS document.
pub trait DocumentSource: Send + Sync {
    /// Return the full document for `key`.
    fn fetch(&self, key: &DocumentKey) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Path of a document relative to the LIS base URL.
pub fn document_path(key: &DocumentKey) -> String {
    let (c, s) = (key.congress, key.session);
    match key.vote_number {
        None => format!("roll_call_lists/vote_menu_{c}_{s}.xml"),
        Some(n) => format!("roll_call_votes/vote{c}{s}/vote_{c}_{s}_{n:05}.xml"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_shared::{Congress, Session};

    #[test]
    fn vote_list_path() {
        let key = DocumentKey::vote_list(Congress::new(113).unwrap(), Session::Second);
        assert_eq!(document_path(&key), "roll_call_lists/vote_menu_113_2.xml");
    }

    #[test]
    fn vote_record_path_pads_number() {
        let key = DocumentKey::vote(Congress::new(101).unwrap(), Session::First, 7);
        assert_eq!(
            document_path(&key),
            "roll_call_votes/vote1011/vote_101_1_00007.xml"
        );
    }
}
