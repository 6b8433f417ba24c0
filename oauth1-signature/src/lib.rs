#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use oauth1_signature_core::*;

#[cfg(feature = "rsa")]
pub mod rsa {
    pub use oauth1_signature_rsa::*;
}
