//! curl(1) command-line translation (spec §4.F–§4.I): tokenize, expand
//! compound short flags, dispatch, and synthesize the equivalent HTTP
//! request.

pub mod flags;
pub mod tokenizer;
pub mod translate;
pub mod url;

pub use translate::translate;
