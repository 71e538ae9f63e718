//! HTTP/1.1 wire parsing: a strict RFC 9112 path and a lenient
//! recovery-oriented path over the same data model (spec §3).

pub mod chunked;
pub mod lenient;
pub mod normalize;
pub mod strict;
