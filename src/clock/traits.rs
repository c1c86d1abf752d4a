// Date source trait — the swap-ready abstraction.
//
// The year lookup only needs "some string holding the current date". The
// default implementation asks a public world clock API; tests plug in a
// fixed string instead.

use anyhow::Result;
use async_trait::async_trait;

/// Something that can report the current date and time as text.
#[async_trait]
pub trait DateTimeSource: Send + Sync {
    /// The current date/time, in whatever layout the source uses.
    async fn current_datetime(&self) -> Result<String>;
}

/// Source that always reports the same string.
pub struct FixedSource(pub String);

#[async_trait]
impl DateTimeSource for FixedSource {
    async fn current_datetime(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}
