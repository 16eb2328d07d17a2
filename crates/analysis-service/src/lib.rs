//! Analysis service boundary
//!
//! `ComplianceAnalyzer` is the asynchronous seam between intake and the
//! rules engine. `EngineAnalyzer` runs the real pipeline on the blocking
//! pool; `FixtureAnalyzer` returns the canned reference analysis after a
//! delay. `AnalysisSession` tracks one page's file, in-flight flag and
//! result.

pub mod analyzer;
pub mod error;
pub mod fixture;
pub mod session;

pub use analyzer::{analyze_with_timeout, ComplianceAnalyzer, EngineAnalyzer};
pub use error::{AnalysisError, SessionError};
pub use fixture::{sample_analysis, FixtureAnalyzer, DEFAULT_FIXTURE_DELAY};
pub use session::{run_shared, AnalysisSession, AnalysisTicket};
