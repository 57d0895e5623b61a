pub mod news;
pub mod verification;

pub use news::{NewsArticle, NewsSource};
pub use verification::{Citation, Verdict, VerificationRecord, VerificationResult};
