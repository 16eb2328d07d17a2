//! Command-line and environment configuration

use std::sync::Arc;
use std::time::Duration;

use analysis_service::{ComplianceAnalyzer, EngineAnalyzer, FixtureAnalyzer};
use clap::{Parser, ValueEnum};
use document_intake::{TesseractOcr, TextExtractor, DEFAULT_MAX_UPLOAD_BYTES};

use crate::AppState;

/// Analysis backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnalyzerKind {
    /// Text extraction and the Tennessee rules engine
    Engine,
    /// Canned reference analysis after a fixed delay
    Fixture,
}

/// OCR backend for scanned images
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OcrKind {
    #[value(name = "none")]
    Disabled,
    Tesseract,
}

/// Command-line arguments for the WarrantWorks server
#[derive(Parser, Debug, Clone)]
#[command(name = "warrantworks-server")]
#[command(about = "Compliance analysis server for Tennessee criminal process documents")]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, env = "WW_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Rate limit: requests per second per IP
    #[arg(long, env = "WW_RATE_LIMIT", default_value = "10")]
    pub rate_limit: u32,

    /// Analysis timeout in milliseconds
    #[arg(long, env = "WW_ANALYSIS_TIMEOUT_MS", default_value = "30000")]
    pub analysis_timeout_ms: u64,

    /// Largest accepted upload, in bytes
    #[arg(long, env = "WW_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    #[arg(long, env = "WW_ANALYZER", value_enum, default_value = "engine")]
    pub analyzer: AnalyzerKind,

    /// Delay of the fixture analyzer in milliseconds
    #[arg(long, env = "WW_FIXTURE_DELAY_MS", default_value = "3000")]
    pub fixture_delay_ms: u64,

    #[arg(long, env = "WW_OCR", value_enum, default_value = "none")]
    pub ocr: OcrKind,

    /// Tesseract language code
    #[arg(long, env = "WW_OCR_LANGUAGE", default_value = "eng")]
    pub ocr_language: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn extractor(&self) -> TextExtractor {
        match self.ocr {
            OcrKind::Disabled => TextExtractor::without_ocr(),
            OcrKind::Tesseract => {
                TextExtractor::new(Arc::new(TesseractOcr::new(self.ocr_language.clone())))
            }
        }
    }

    pub fn analyzer(&self) -> Arc<dyn ComplianceAnalyzer> {
        match self.analyzer {
            AnalyzerKind::Engine => Arc::new(EngineAnalyzer::new(self.extractor())),
            AnalyzerKind::Fixture => Arc::new(FixtureAnalyzer::new(Duration::from_millis(
                self.fixture_delay_ms,
            ))),
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            analyzer: self.analyzer(),
            analysis_timeout: Duration::from_millis(self.analysis_timeout_ms),
            max_upload_bytes: self.max_upload_bytes,
            clock: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flags_select_backends() {
        let args = Args::try_parse_from([
            "warrantworks-server",
            "--analyzer",
            "fixture",
            "--fixture-delay-ms",
            "250",
            "--analysis-timeout-ms",
            "5000",
            "--max-upload-bytes",
            "1024",
        ])
        .unwrap();

        let state = args.app_state();
        assert_eq!(state.analyzer.name(), "fixture");
        assert_eq!(state.analysis_timeout, Duration::from_secs(5));
        assert_eq!(state.max_upload_bytes, 1024);
    }

    #[test]
    fn test_ocr_choice() {
        let args =
            Args::try_parse_from(["warrantworks-server", "--ocr", "tesseract", "--ocr-language", "spa"])
                .unwrap();
        assert_eq!(args.ocr, OcrKind::Tesseract);
        assert_eq!(args.extractor().ocr_backend(), "tesseract");

        assert!(Args::try_parse_from(["warrantworks-server", "--ocr", "cloud"]).is_err());
    }
}
