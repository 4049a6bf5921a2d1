//! Configuration surface for [`Reader`](crate::Reader)/[`Writer`](crate::Writer),
//! following the `SerializerOptions` pattern used elsewhere in this
//! workspace's lineage: plain structs with `Default` impls, passed by
//! value to the top-level `decode`/`encode` calls.

/// Options controlling how strictly [`Reader::finish`](crate::Reader::finish)
/// validates that an input buffer was fully consumed.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReaderOpts {
    /// Skip the "fully consumed" check at the end of decoding.
    pub allow_unread_bytes: bool,
    /// Permit overlapping reads through distinct pointers. Disabled by
    /// default: this is the DoS guard against pointer cycles/fan-in.
    pub allow_multiple_reads: bool,
}

impl ReaderOpts {
    pub const fn new() -> Self {
        Self {
            allow_unread_bytes: false,
            allow_multiple_reads: false,
        }
    }

    pub const fn allow_unread_bytes(mut self, value: bool) -> Self {
        self.allow_unread_bytes = value;
        self
    }

    pub const fn allow_multiple_reads(mut self, value: bool) -> Self {
        self.allow_multiple_reads = value;
        self
    }
}

/// Options controlling [`Writer`](crate::Writer) behavior. Currently
/// empty — reserved for future knobs (e.g. a strict-canonical-form
/// toggle) the way `ReaderOpts` already exists for the read side.
#[derive(Clone, Copy, Debug, Default)]
pub struct WriterOpts {}

impl WriterOpts {
    pub const fn new() -> Self {
        Self {}
    }
}
