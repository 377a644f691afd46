//! Cassettes: YAML transcripts of port interactions.
//!
//! A recording context appends every clock reading and store call to a
//! cassette; a replaying context serves them back in order, so a session can
//! be reproduced without the store it originally talked to.

pub mod format;
pub mod recorder;
pub mod replayer;
