pub mod profile;
pub mod contribution;
pub mod activity;
pub mod score;
pub mod insight;

pub use profile::*;
pub use contribution::*;
pub use activity::*;
pub use score::*;
pub use insight::*;
