//! genconf-core: fontconfig rules for locally installed fonts
//!
//! Point it at a font file or directory and it produces a configuration
//! fragment that makes fontconfig prefer those fonts for their generic
//! family, optionally only for particular languages.
//!
//! ## Pipeline
//!
//! - **Scan** ([`discovery`]): walk the target breadth-first and read the
//!   family name and generic-family hints of every face.
//! - **Dedup** ([`family`]): keep the first face of each family, comparing
//!   names without regard to case or blanks.
//! - **Resolve** ([`generic`]): use the font's own generic family, else the
//!   caller's fallback; fonts with neither are skipped.
//! - **Synthesize** ([`rules`]): one `<match>` per requested language plus
//!   one `<alias>`, or a family-name `<match>` plus `<alias>` when no
//!   languages were requested.
//! - **Assemble** ([`document`]): wrap the blocks in a `<fontconfig>`
//!   document, or produce nothing when no fonts were found.
//!
//! ```rust,no_run
//! use genconf_core::discovery::FilesystemScanner;
//! use genconf_core::generate::{generate, GenerationRequest};
//! use genconf_core::generic::GenericFamily;
//! use genconf_core::lang::LanguageSet;
//!
//! let request = GenerationRequest::new("/usr/local/share/fonts/mine")
//!     .with_generic_family(Some(GenericFamily::SansSerif))
//!     .with_languages(LanguageSet::parse_all(["ja"])?);
//!
//! let generation = generate(&request, &FilesystemScanner::new())?;
//! print!("{}", generation.render());
//! for skipped in &generation.skipped {
//!     eprintln!("skipped {}: {}", skipped.path.display(), skipped.reason);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod discovery;
pub mod document;
pub mod error;
pub mod family;
pub mod generate;
pub mod generic;
pub mod lang;
pub mod output;
pub mod rules;

pub use error::{GenconfError, SkipReason, SkippedFont};
