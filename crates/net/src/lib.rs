#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! HTTP client and retry execution for pkgprobe
//!
//! `NetClient` issues single requests and maps transport failures into the
//! error taxonomy; it never retries on its own. The bounded retry loop
//! lives in [`execute_with_retry`], which wraps whole verification
//! attempts rather than individual sends, so a verifier's classification
//! of the response (not found vs. rate limited vs. server error) decides
//! whether another attempt happens.

mod client;
mod retry;

pub use client::{NetClient, NetConfig};
pub use retry::{execute_with_retry, retry_after_secs, RetryPolicy};
