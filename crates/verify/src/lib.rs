#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Package existence verification against remote registries
//!
//! Five registries have a public query API; each gets a verifier variant
//! with its own URL-construction and response-interpretation rules behind
//! the shared capability `verify(package_name) -> VerificationResult`.
//! The variants are a closed set dispatched through [`Verifier`]; the
//! [`VerifierRegistry`] owns the partition of managers into verifiable
//! and unverifiable.
//!
//! A definitive negative answer (404, empty result set, malformed
//! identifier, non-retryable client error) comes back as a normal failed
//! result. Transient conditions (rate limits, 5xx, transport failures)
//! are raised as errors for the retry executor to absorb or surface.

mod chocolatey;
mod flathub;
mod homebrew;
mod registry;
mod response;
mod snapcraft;
mod winget;

pub use chocolatey::ChocolateyVerifier;
pub use flathub::FlathubVerifier;
pub use homebrew::HomebrewVerifier;
pub use registry::{Verifier, VerifierRegistry};
pub use snapcraft::SnapcraftVerifier;
pub use winget::WingetVerifier;
