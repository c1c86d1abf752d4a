// Current-year lookup — an HTTP date source plus a tolerant date parser.

pub mod traits;
pub mod worldclock;
pub mod year;
